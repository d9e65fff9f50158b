use crate::clustering::cluster::ClusterId;
use crate::clustering::executor::MergeContext;
use crate::clustering::selector::{closer, pair_distance, NearestPair};
use crate::clustering::strategy::MergeStrategy;
use crate::core::{ClusteringError, ClusteringResult};
use crate::distances::DistanceMetric;
use fxhash::FxHashMap;
use log::debug;
use ndarray::ArrayView1;

/// Nearest-neighbour cache keyed by cluster identity.
///
/// For every active cluster `x` the cache holds the pair `(x, y)` that is minimal
/// under [`NearestPair::cmp_key`] among all other active `y`. The globally nearest
/// pair is then the minimum over the cache. After a merge only the new cluster's
/// row is computed in full, plus the rows of clusters whose neighbour was merged
/// away; all other distances between untouched clusters stay valid.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptimizedEngine;

type NeighborCache = FxHashMap<ClusterId, NearestPair>;

/// Nearest pair for `id` over every other entry of `centroids`.
fn nearest_for(
    metric: &dyn DistanceMetric,
    centroids: &[(ClusterId, ArrayView1<f64>)],
    id: ClusterId,
    centroid: &ArrayView1<f64>,
) -> Option<NearestPair> {
    centroids
        .iter()
        .filter(|(other, _)| *other != id)
        .fold(None, |best, (other, other_centroid)| {
            closer(best, pair_distance(metric, (id, centroid), (*other, other_centroid)))
        })
}

fn build_cache(
    metric: &dyn DistanceMetric,
    centroids: &[(ClusterId, ArrayView1<f64>)],
) -> NeighborCache {
    let k = centroids.len();
    let mut best: Vec<Option<NearestPair>> = vec![None; k];
    // each pair is evaluated once and offered to both endpoints
    for i in 0..k {
        let (id_i, centroid_i) = &centroids[i];
        for j in i + 1..k {
            let (id_j, centroid_j) = &centroids[j];
            let pair = pair_distance(metric, (*id_i, centroid_i), (*id_j, centroid_j));
            best[i] = closer(best[i], pair);
            best[j] = closer(best[j], pair);
        }
    }
    centroids
        .iter()
        .zip(best)
        .filter_map(|((id, _), pair)| pair.map(|p| (*id, p)))
        .collect()
}

fn cache_minimum(cache: &NeighborCache) -> ClusteringResult<NearestPair> {
    cache
        .values()
        .copied()
        .fold(None, closer)
        .ok_or_else(|| ClusteringError::InvariantViolation("neighbour cache is empty".into()))
}

impl OptimizedEngine {
    /// Brings the cache up to date after `pair` was merged into `merged`.
    fn refresh(
        cache: &mut NeighborCache,
        metric: &dyn DistanceMetric,
        centroids: &[(ClusterId, ArrayView1<f64>)],
        pair: &NearestPair,
        merged: ClusterId,
    ) -> ClusteringResult<usize> {
        cache.remove(&pair.low);
        cache.remove(&pair.high);

        let merged_centroid = centroids
            .iter()
            .find(|(id, _)| *id == merged)
            .map(|(_, c)| *c)
            .ok_or_else(|| {
                ClusteringError::InvariantViolation(format!("merged cluster {} is not active", merged))
            })?;

        let mut merged_best: Option<NearestPair> = None;
        let mut stale = Vec::new();
        for (id, centroid) in centroids.iter().filter(|(id, _)| *id != merged) {
            let candidate = pair_distance(metric, (*id, centroid), (merged, &merged_centroid));
            merged_best = closer(merged_best, candidate);

            let entry = cache.get_mut(id).ok_or_else(|| {
                ClusteringError::InvariantViolation(format!("cluster {} missing from neighbour cache", id))
            })?;
            if entry.involves(pair.low) || entry.involves(pair.high) {
                stale.push((*id, *centroid));
            } else if candidate.precedes(entry) {
                *entry = candidate;
            }
        }
        if let Some(best) = merged_best {
            cache.insert(merged, best);
        }

        for (id, centroid) in &stale {
            if let Some(best) = nearest_for(metric, centroids, *id, centroid) {
                cache.insert(*id, best);
            }
        }
        Ok(stale.len())
    }
}

impl MergeStrategy for OptimizedEngine {
    fn name(&self) -> &'static str {
        "optimized"
    }

    fn run(&self, ctx: &mut MergeContext<'_>, target: usize) -> ClusteringResult<usize> {
        if ctx.arena.len() <= target {
            return Ok(0);
        }
        let mut cache = build_cache(ctx.metric, &ctx.arena.active_centroids()?);

        let mut rounds = 0;
        let mut rescanned = 0;
        while ctx.arena.len() > target {
            let pair = cache_minimum(&cache)?;
            let merged = ctx.apply(&pair)?;
            let centroids = ctx.arena.active_centroids()?;
            rescanned += Self::refresh(&mut cache, ctx.metric, &centroids, &pair, merged)?;
            rounds += 1;
        }
        debug!(
            "Optimized engine finished {} rounds, {} neighbour rows rescanned",
            rounds, rescanned
        );
        Ok(rounds)
    }
}
