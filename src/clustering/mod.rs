pub mod cluster;
pub mod config;
pub mod executor;
pub mod hierarchical;
pub mod optimized;
pub mod reference;
pub mod selector;
pub mod strategy;
pub mod utils;

pub use cluster::{Cluster, ClusterArena, ClusterId};
pub use config::Config;
pub use executor::MergeRecord;
pub use hierarchical::{ClusteringParams, HierarchicalClustering};
pub use optimized::OptimizedEngine;
pub use reference::ReferenceEngine;
pub use selector::NearestPair;
pub use strategy::{EngineKind, MergeStrategy};
