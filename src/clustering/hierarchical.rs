use crate::clustering::cluster::ClusterArena;
use crate::clustering::executor::{MergeContext, MergeRecord};
use crate::clustering::strategy::{EngineKind, MergeStrategy};
use crate::core::{ClusterFloat, ClusteringError, ClusteringResult};
use crate::distances::{DistanceKind, DistanceMetric};
use log::{debug, info, warn};
use ndarray::{Array1, Array2, ArrayView2};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct ClusteringParams {
    pub number_clusters: usize,
    pub engine: EngineKind,
    pub distance: DistanceKind,
    pub record_history: bool, // Keep a MergeRecord per round
}

impl Default for ClusteringParams {
    fn default() -> Self {
        Self {
            number_clusters: 1,
            engine: EngineKind::Reference,
            distance: DistanceKind::Euclidean,
            record_history: false,
        }
    }
}

impl ClusteringParams {
    pub fn new(number_clusters: usize, use_optimized_path: bool) -> Self {
        Self {
            number_clusters,
            engine: EngineKind::from_flag(use_optimized_path),
            ..Self::default()
        }
    }

    pub fn with_history(mut self, record_history: bool) -> Self {
        self.record_history = record_history;
        self
    }

    pub fn with_distance(mut self, distance: DistanceKind) -> Self {
        self.distance = distance;
        self
    }
}

/// Agglomerative clustering with centroid linkage.
///
/// Starts from one cluster per point and repeatedly merges the two clusters whose
/// centroids are nearest until the requested number of clusters remains. The
/// engine (reference or optimized) changes how the nearest pair is found, never
/// which pair is chosen.
///
/// A requested cluster count larger than the sample is clamped to the sample size.
pub struct HierarchicalClustering {
    sample: Array2<f64>,
    params: ClusteringParams,
    target: usize,
    strategy: Box<dyn MergeStrategy>,
    metric: Arc<dyn DistanceMetric>,
    arena: Option<ClusterArena>,
    history: Vec<MergeRecord>,
    rounds: usize,
}

/// Rejects empty, zero-dimensional and non-finite samples.
fn validate_sample<F: ClusterFloat>(sample: &ArrayView2<F>) -> ClusteringResult<()> {
    if sample.nrows() == 0 {
        return Err(ClusteringError::EmptySample);
    }
    if sample.ncols() == 0 {
        return Err(ClusteringError::ZeroDimension);
    }
    for (index, row) in sample.rows().into_iter().enumerate() {
        if row.iter().any(|x| !x.is_finite()) {
            return Err(ClusteringError::NonFiniteCoordinate { index });
        }
    }
    Ok(())
}

impl HierarchicalClustering {
    pub fn new<F: ClusterFloat>(
        sample: ArrayView2<F>,
        params: ClusteringParams,
    ) -> ClusteringResult<Self> {
        validate_sample(&sample)?;
        if params.number_clusters == 0 {
            return Err(ClusteringError::InvalidTarget(params.number_clusters));
        }

        let n_points = sample.nrows();
        let target = if params.number_clusters > n_points {
            warn!(
                "Requested {} clusters for a sample of {} points, clamping to {}",
                params.number_clusters, n_points, n_points
            );
            n_points
        } else {
            params.number_clusters
        };

        let strategy = params.engine.build();
        debug!(
            "Configured {} engine with {:?} distance, target {} clusters",
            strategy.name(),
            params.distance,
            target
        );

        Ok(Self {
            sample: sample.mapv(|x| x.to_f64_lossy()),
            metric: params.distance.metric(),
            params,
            target,
            strategy,
            arena: None,
            history: Vec::new(),
            rounds: 0,
        })
    }

    /// Builds the sample from individual points, checking that they share one dimension.
    pub fn from_rows<F: ClusterFloat>(
        rows: &[Vec<F>],
        params: ClusteringParams,
    ) -> ClusteringResult<Self> {
        let first = rows.first().ok_or(ClusteringError::EmptySample)?;
        let dim = first.len();
        for (index, row) in rows.iter().enumerate() {
            if row.len() != dim {
                return Err(ClusteringError::DimensionMismatch {
                    index,
                    expected: dim,
                    actual: row.len(),
                });
            }
        }

        let flat: Vec<F> = rows.iter().flatten().copied().collect();
        let sample = Array2::from_shape_vec((rows.len(), dim), flat)
            .map_err(|e| ClusteringError::InvariantViolation(e.to_string()))?;
        Self::new(sample.view(), params)
    }

    /// Runs the merge loop to completion.
    ///
    /// Calling it again restarts from singletons and yields the same result.
    pub fn process(&mut self) -> ClusteringResult<()> {
        let n_points = self.sample.nrows();
        info!(
            "Clustering {} points of dimension {} into {} clusters ({} engine)",
            n_points,
            self.sample.ncols(),
            self.target,
            self.strategy.name()
        );

        self.arena = None;
        self.history.clear();
        let mut arena = ClusterArena::from_sample(&self.sample.view());
        let history = if self.params.record_history {
            Some(&mut self.history)
        } else {
            None
        };
        let mut ctx = MergeContext {
            arena: &mut arena,
            sample: self.sample.view(),
            metric: self.metric.as_ref(),
            history,
        };
        let rounds = self.strategy.run(&mut ctx, self.target)?;

        arena.verify_partition(n_points)?;
        if arena.len() != self.target {
            return Err(ClusteringError::InvariantViolation(format!(
                "finished with {} clusters, expected {}",
                arena.len(),
                self.target
            )));
        }

        info!("Clustering finished after {} merge rounds", rounds);
        self.rounds = rounds;
        self.arena = Some(arena);
        Ok(())
    }

    fn processed(&self) -> ClusteringResult<&ClusterArena> {
        self.arena.as_ref().ok_or(ClusteringError::NotProcessed)
    }

    /// Final partition: one group per cluster, point indices ascending.
    pub fn get_clusters(&self) -> ClusteringResult<Vec<Vec<usize>>> {
        let arena = self.processed()?;
        Ok(arena
            .iter_active()
            .map(|(_, cluster)| {
                let mut points = cluster.points.clone();
                points.sort_unstable();
                points
            })
            .collect())
    }

    /// Centroid of every group, in the same order as [`get_clusters`](Self::get_clusters).
    pub fn get_centers(&self) -> ClusteringResult<Vec<Array1<f64>>> {
        let arena = self.processed()?;
        Ok(arena
            .iter_active()
            .map(|(_, cluster)| cluster.centroid.clone())
            .collect())
    }

    /// Group index of every point, matching the order of [`get_clusters`](Self::get_clusters).
    pub fn labels(&self) -> ClusteringResult<Vec<usize>> {
        let arena = self.processed()?;
        let mut labels = vec![0usize; self.sample.nrows()];
        for (label, (_, cluster)) in arena.iter_active().enumerate() {
            for &point_idx in &cluster.points {
                labels[point_idx] = label;
            }
        }
        Ok(labels)
    }

    /// Merge rounds in execution order; empty unless `record_history` is set.
    pub fn history(&self) -> &[MergeRecord] {
        &self.history
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Effective number of clusters after clamping.
    pub fn target(&self) -> usize {
        self.target
    }

    pub fn engine_name(&self) -> &'static str {
        self.strategy.name()
    }
}
