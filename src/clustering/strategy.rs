use crate::clustering::executor::MergeContext;
use crate::clustering::optimized::OptimizedEngine;
use crate::clustering::reference::ReferenceEngine;
use crate::core::ClusteringResult;

/// A way of driving the merge loop. Every implementation must select the same
/// pair as [`ReferenceEngine`] in every round.
pub trait MergeStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Merges until at most `target` clusters remain; returns the number of rounds.
    /// `target` is at least 1.
    fn run(&self, ctx: &mut MergeContext<'_>, target: usize) -> ClusteringResult<usize>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EngineKind {
    #[default]
    Reference,
    Optimized,
}

impl EngineKind {
    pub fn from_flag(use_optimized_path: bool) -> Self {
        if use_optimized_path {
            EngineKind::Optimized
        } else {
            EngineKind::Reference
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "Reference" => Some(EngineKind::Reference),
            "Optimized" => Some(EngineKind::Optimized),
            _ => None,
        }
    }

    pub fn build(self) -> Box<dyn MergeStrategy> {
        match self {
            EngineKind::Reference => Box::new(ReferenceEngine),
            EngineKind::Optimized => Box::new(OptimizedEngine),
        }
    }
}
