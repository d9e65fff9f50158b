use crate::clustering::cluster::{Cluster, ClusterArena, ClusterId};
use crate::clustering::selector::NearestPair;
use crate::clustering::utils::compute_mean;
use crate::core::{ClusteringError, ClusteringResult};
use crate::distances::DistanceMetric;
use log::trace;
use ndarray::{Array1, ArrayView2};

/// One merge round: which clusters were joined, at what distance, and the
/// representative center of the result.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeRecord {
    pub left: ClusterId,
    pub right: ClusterId,
    pub merged: ClusterId,
    pub distance: f64,
    pub size: usize,
    pub centroid: Array1<f64>,
}

/// Everything an engine works on during a single run.
pub struct MergeContext<'a> {
    pub arena: &'a mut ClusterArena,
    pub sample: ArrayView2<'a, f64>,
    pub metric: &'a dyn DistanceMetric,
    pub history: Option<&'a mut Vec<MergeRecord>>,
}

/// Replaces `pair.low` and `pair.high` with a single cluster holding the union of
/// their points. The centroid is recomputed from the raw sample rows.
pub fn merge_pair(
    arena: &mut ClusterArena,
    sample: &ArrayView2<f64>,
    pair: &NearestPair,
) -> ClusteringResult<ClusterId> {
    if pair.low == pair.high {
        return Err(ClusteringError::InvariantViolation(format!(
            "cannot merge cluster {} with itself",
            pair.low
        )));
    }
    let low = arena.take(pair.low)?;
    let high = arena.take(pair.high)?;
    let expected = low.len() + high.len();

    let mut points = low.points;
    points.extend(high.points);
    debug_assert_eq!(points.len(), expected);

    let centroid = compute_mean(sample, &points);
    Ok(arena.insert(Cluster { points, centroid }))
}

impl MergeContext<'_> {
    /// Executes a merge and records it in the history when one is kept.
    pub fn apply(&mut self, pair: &NearestPair) -> ClusteringResult<ClusterId> {
        let merged = merge_pair(self.arena, &self.sample, pair)?;
        trace!(
            "Merged {} and {} into {} at distance {:.6} ({} active)",
            pair.low,
            pair.high,
            merged,
            pair.distance,
            self.arena.len()
        );

        if let Some(history) = self.history.as_deref_mut() {
            let cluster = self.arena.cluster(merged)?;
            history.push(MergeRecord {
                left: pair.low,
                right: pair.high,
                merged,
                distance: pair.distance,
                size: cluster.len(),
                centroid: cluster.centroid.clone(),
            });
        }
        Ok(merged)
    }
}
