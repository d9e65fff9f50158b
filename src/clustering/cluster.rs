use crate::core::{ClusteringError, ClusteringResult};
use ndarray::{Array1, ArrayView1, ArrayView2};
use std::fmt;

/// Identifier of a cluster slot in a [`ClusterArena`].
///
/// Singletons take the id of their point; every merge allocates the next unused id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(pub usize);

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Cluster {
    pub points: Vec<usize>,     // Indices of member points, in merge order
    pub centroid: Array1<f64>,  // Mean of the member rows
}

impl Cluster {
    pub fn singleton(point_idx: usize, row: ArrayView1<f64>) -> Self {
        Self {
            points: vec![point_idx],
            centroid: row.to_owned(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Owned store of every cluster created during a run.
///
/// Merged-away clusters leave an empty slot behind, so an id is never reused
/// and never refers to two different clusters.
#[derive(Debug, Clone)]
pub struct ClusterArena {
    slots: Vec<Option<Cluster>>,
    active: Vec<ClusterId>, // ascending
}

impl ClusterArena {
    /// One singleton cluster per sample row.
    pub fn from_sample(sample: &ArrayView2<f64>) -> Self {
        let slots: Vec<Option<Cluster>> = sample
            .rows()
            .into_iter()
            .enumerate()
            .map(|(idx, row)| Some(Cluster::singleton(idx, row)))
            .collect();
        let active = (0..slots.len()).map(ClusterId).collect();
        Self { slots, active }
    }

    /// Number of active clusters.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn active_ids(&self) -> &[ClusterId] {
        &self.active
    }

    pub fn get(&self, id: ClusterId) -> Option<&Cluster> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    /// Like [`get`](Self::get), but a missing cluster is an invariant violation.
    pub fn cluster(&self, id: ClusterId) -> ClusteringResult<&Cluster> {
        self.get(id).ok_or_else(|| {
            ClusteringError::InvariantViolation(format!("cluster {} is not active", id))
        })
    }

    /// Active clusters with their centroids, in ascending id order.
    pub fn active_centroids(&self) -> ClusteringResult<Vec<(ClusterId, ArrayView1<'_, f64>)>> {
        self.active
            .iter()
            .map(|&id| self.cluster(id).map(|c| (id, c.centroid.view())))
            .collect()
    }

    /// Iterates over active clusters in ascending id order.
    pub fn iter_active(&self) -> impl Iterator<Item = (ClusterId, &Cluster)> + '_ {
        self.active
            .iter()
            .filter_map(move |&id| self.get(id).map(|c| (id, c)))
    }

    /// Removes a cluster from the active set and hands it over.
    pub fn take(&mut self, id: ClusterId) -> ClusteringResult<Cluster> {
        let pos = self.active.binary_search(&id).map_err(|_| {
            ClusteringError::InvariantViolation(format!("cluster {} merged twice", id))
        })?;
        let cluster = self
            .slots
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or_else(|| {
                ClusteringError::InvariantViolation(format!("cluster {} has no storage", id))
            })?;
        self.active.remove(pos);
        Ok(cluster)
    }

    /// Stores a new cluster under a fresh id.
    pub fn insert(&mut self, cluster: Cluster) -> ClusterId {
        let id = ClusterId(self.slots.len());
        self.slots.push(Some(cluster));
        // fresh ids are the largest, so appending keeps `active` sorted
        self.active.push(id);
        id
    }

    /// Checks that every point in `0..n_points` belongs to exactly one active cluster.
    pub fn verify_partition(&self, n_points: usize) -> ClusteringResult<()> {
        let mut seen = vec![false; n_points];
        let mut total = 0usize;
        for (id, cluster) in self.iter_active() {
            if cluster.is_empty() {
                return Err(ClusteringError::InvariantViolation(format!(
                    "cluster {} is empty",
                    id
                )));
            }
            for &point in &cluster.points {
                match seen.get_mut(point) {
                    Some(flag) if !*flag => *flag = true,
                    Some(_) => {
                        return Err(ClusteringError::InvariantViolation(format!(
                            "point {} appears in more than one cluster",
                            point
                        )))
                    }
                    None => {
                        return Err(ClusteringError::InvariantViolation(format!(
                            "point {} is out of range for a sample of {}",
                            point, n_points
                        )))
                    }
                }
                total += 1;
            }
        }
        if total != n_points {
            return Err(ClusteringError::InvariantViolation(format!(
                "{} of {} points are assigned",
                total, n_points
            )));
        }
        Ok(())
    }
}
