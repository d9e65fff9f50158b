//! Error types for sample validation, configuration and processing.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClusteringError {
    /// The sample contains no points.
    #[error("Invalid input: sample is empty")]
    EmptySample,

    /// Points carry no coordinates.
    #[error("Invalid input: points have zero dimensions")]
    ZeroDimension,

    /// A point's length differs from the first point's.
    #[error("Invalid input: point {index} has {actual} coordinates, expected {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// A coordinate is NaN or infinite.
    #[error("Invalid input: point {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },

    /// Requested cluster count is not usable.
    #[error("Invalid target: number of clusters must be at least 1, got {0}")]
    InvalidTarget(usize),

    /// Some point is lost or present in more than one active cluster.
    #[error("Internal invariant violation: {0}")]
    InvariantViolation(String),

    /// Results were requested before `process()` ran.
    #[error("Clustering has not been processed yet")]
    NotProcessed,

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Malformed sample file.
    #[error("Sample parse error at line {line}: {message}")]
    SampleParse { line: usize, message: String },
}

pub type ClusteringResult<T> = Result<T, ClusteringError>;
