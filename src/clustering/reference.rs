use crate::clustering::executor::MergeContext;
use crate::clustering::selector::scan_nearest_pair;
use crate::clustering::strategy::MergeStrategy;
use crate::core::ClusteringResult;

/// Full pair scan every round. O(k^2) distance evaluations per merge.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceEngine;

impl MergeStrategy for ReferenceEngine {
    fn name(&self) -> &'static str {
        "reference"
    }

    fn run(&self, ctx: &mut MergeContext<'_>, target: usize) -> ClusteringResult<usize> {
        let mut rounds = 0;
        while ctx.arena.len() > target {
            let pair = scan_nearest_pair(ctx.arena, ctx.metric)?;
            ctx.apply(&pair)?;
            rounds += 1;
        }
        Ok(rounds)
    }
}
