use crate::clustering::cluster::{ClusterArena, ClusterId};
use crate::core::{ClusteringError, ClusteringResult};
use crate::distances::DistanceMetric;
use ndarray::ArrayView1;
use rayon::prelude::*;
use std::cmp::Ordering;

/// Below this many active clusters the pair scan stays on the calling thread.
pub const PARALLEL_SCAN_THRESHOLD: usize = 256;

/// A candidate merge: two distinct clusters and the distance between their centroids.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestPair {
    pub low: ClusterId,
    pub high: ClusterId,
    pub distance: f64,
}

impl NearestPair {
    pub fn new(a: ClusterId, b: ClusterId, distance: f64) -> Self {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        Self {
            low,
            high,
            distance,
        }
    }

    /// Total order used for selection: distance first, then `(low, high)`
    /// lexicographically, so exact ties go to the smallest id pair.
    pub fn cmp_key(&self, other: &NearestPair) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.low.cmp(&other.low))
            .then_with(|| self.high.cmp(&other.high))
    }

    pub fn precedes(&self, other: &NearestPair) -> bool {
        self.cmp_key(other) == Ordering::Less
    }

    pub fn involves(&self, id: ClusterId) -> bool {
        self.low == id || self.high == id
    }

    /// The cluster on the other side of `id`.
    pub fn partner_of(&self, id: ClusterId) -> ClusterId {
        if self.low == id {
            self.high
        } else {
            self.low
        }
    }
}

/// Keeps whichever of the two candidates comes first under [`NearestPair::cmp_key`].
#[inline]
pub fn closer(best: Option<NearestPair>, candidate: NearestPair) -> Option<NearestPair> {
    match best {
        Some(current) if !candidate.precedes(&current) => Some(current),
        _ => Some(candidate),
    }
}

/// Distance between two centroids, always evaluated as `metric(low, high)`.
#[inline]
pub fn pair_distance(
    metric: &dyn DistanceMetric,
    a: (ClusterId, &ArrayView1<f64>),
    b: (ClusterId, &ArrayView1<f64>),
) -> NearestPair {
    if a.0 <= b.0 {
        NearestPair::new(a.0, b.0, metric.compute(a.1, b.1))
    } else {
        NearestPair::new(b.0, a.0, metric.compute(b.1, a.1))
    }
}

/// Best pair among `(centroids[i], centroids[j])` for all `j > i`.
fn row_nearest(
    metric: &dyn DistanceMetric,
    centroids: &[(ClusterId, ArrayView1<f64>)],
    i: usize,
) -> Option<NearestPair> {
    let (id_i, centroid_i) = &centroids[i];
    centroids[i + 1..]
        .iter()
        .fold(None, |best, (id_j, centroid_j)| {
            closer(best, pair_distance(metric, (*id_i, centroid_i), (*id_j, centroid_j)))
        })
}

/// Scans all C(k, 2) pairs of active clusters and returns the nearest one.
///
/// Large scans are split by row across the rayon pool; centroids are only read
/// during the scan and the reduction uses the same total order, so the selected
/// pair does not depend on scheduling.
pub fn scan_nearest_pair(
    arena: &ClusterArena,
    metric: &dyn DistanceMetric,
) -> ClusteringResult<NearestPair> {
    let centroids = arena.active_centroids()?;
    let k = centroids.len();
    if k < 2 {
        return Err(ClusteringError::InvariantViolation(format!(
            "nearest pair requested with {} active cluster(s)",
            k
        )));
    }

    let best = if k >= PARALLEL_SCAN_THRESHOLD {
        (0..k - 1)
            .into_par_iter()
            .filter_map(|i| row_nearest(metric, &centroids, i))
            .reduce_with(|a, b| if b.precedes(&a) { b } else { a })
    } else {
        (0..k - 1)
            .filter_map(|i| row_nearest(metric, &centroids, i))
            .fold(None, closer)
    };

    best.ok_or_else(|| ClusteringError::InvariantViolation("pair scan found no candidates".into()))
}
