use ndarray::ArrayView1;
use ndarray_stats::DeviationExt;
use std::fmt::Debug;
use std::sync::Arc;

/// Trait defining the interface for distances between cluster centroids.
///
/// Implementations must be symmetric bit for bit: `compute(a, b) == compute(b, a)`.
pub trait DistanceMetric: Send + Sync + Debug {
    /// Computes the distance between two points. Panics if the points have different dimensions.
    fn compute(&self, point1: &ArrayView1<f64>, point2: &ArrayView1<f64>) -> f64;
}

/// [Euclidean Distance](https://en.wikipedia.org/wiki/Euclidean_distance)
#[derive(Debug, Clone, Copy)]
pub struct EuclideanDistance;

impl DistanceMetric for EuclideanDistance {
    #[inline]
    fn compute(&self, point1: &ArrayView1<f64>, point2: &ArrayView1<f64>) -> f64 {
        point1
            .l2_dist(point2)
            .expect("centroids must share the sample dimension")
    }
}

/// Squared Euclidean distance. Orders pairs like [`EuclideanDistance`] without the square root.
#[derive(Debug, Clone, Copy)]
pub struct SquaredEuclideanDistance;

impl DistanceMetric for SquaredEuclideanDistance {
    #[inline]
    fn compute(&self, point1: &ArrayView1<f64>, point2: &ArrayView1<f64>) -> f64 {
        point1
            .sq_l2_dist(point2)
            .expect("centroids must share the sample dimension")
    }
}

/// Selectable centroid metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DistanceKind {
    #[default]
    Euclidean,
    SquaredEuclidean,
}

impl DistanceKind {
    pub fn metric(self) -> Arc<dyn DistanceMetric> {
        match self {
            DistanceKind::Euclidean => Arc::new(EuclideanDistance),
            DistanceKind::SquaredEuclidean => Arc::new(SquaredEuclideanDistance),
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "Euclidean" => Some(DistanceKind::Euclidean),
            "SquaredEuclidean" => Some(DistanceKind::SquaredEuclidean),
            _ => None,
        }
    }
}
