pub mod error;
pub mod float;

pub use error::{ClusteringError, ClusteringResult};
pub use float::ClusterFloat;
