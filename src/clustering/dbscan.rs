//! DBSCAN density-based clustering.
//!
//! An entity with at least `min_pts` neighbors within `eps` is a core entity
//! and seeds a cluster; the cluster grows through the neighbors of every core
//! entity it reaches. Entities reached by no core entity are noise.
//! Neighbor queries are brute force, `O(n^2)` distance evaluations.

use super::Clusterer;
use crate::core::{Cluster, ClusterBuilder, Clusterable};
use crate::distance::DistanceMeasure;
use crate::error::{ClusterError, Result};
use crate::parameter::Parameter;
use std::collections::HashSet;
use tracing::{debug, trace};

/// DBSCAN configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DbscanConfig {
    /// Neighborhood radius (inclusive)
    pub eps: f64,
    /// Minimum number of neighbors, not counting the entity itself, of a core entity
    pub min_pts: usize,
}

impl Default for DbscanConfig {
    fn default() -> Self {
        Self {
            eps: 0.5,
            min_pts: 5,
        }
    }
}

impl DbscanConfig {
    /// Set neighborhood radius.
    pub fn eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// Set minimum neighbor count.
    pub fn min_pts(mut self, min_pts: usize) -> Self {
        self.min_pts = min_pts;
        self
    }

    fn validate(&self) -> Result<()> {
        if !self.eps.is_finite() || self.eps < 0.0 {
            return Err(ClusterError::InvalidParameter(format!(
                "eps must be finite and non-negative, got {}",
                self.eps
            )));
        }
        Ok(())
    }
}

/// DBSCAN clustering result.
#[derive(Debug, Clone)]
pub struct DbscanResult<'a, T> {
    /// Clusters in order of discovery
    pub clusters: Vec<Cluster<'a, T>>,
    /// Cluster index of each entity, `None` for noise
    pub labels: Vec<Option<usize>>,
}

impl<'a, T> DbscanResult<'a, T> {
    /// Indices of entities that belong to no cluster.
    pub fn noise(&self) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, l)| l.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices of entities in a specific cluster.
    pub fn cluster_members(&self, cluster: usize) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, l)| **l == Some(cluster))
            .map(|(i, _)| i)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Noise,
    Member,
}

/// DBSCAN over an arbitrary distance measure.
#[derive(Debug, Clone)]
pub struct DbscanClusterer<D, B> {
    config: DbscanConfig,
    distance: D,
    builder: B,
    params: Vec<Parameter>,
}

impl<D, B> DbscanClusterer<D, B> {
    pub fn new(config: DbscanConfig, distance: D, builder: B, params: Vec<Parameter>) -> Self {
        Self {
            config,
            distance,
            builder,
            params,
        }
    }

    pub fn config(&self) -> &DbscanConfig {
        &self.config
    }

    /// Clusters `entities`, also reporting the label of every entity.
    pub fn run<'a, T>(&self, entities: &'a [T]) -> Result<DbscanResult<'a, T>>
    where
        T: Clusterable,
        D: DistanceMeasure<T>,
        B: ClusterBuilder<T>,
    {
        self.config.validate()?;

        let n = entities.len();
        let mut status: Vec<Option<Status>> = vec![None; n];
        let mut labels: Vec<Option<usize>> = vec![None; n];
        let mut clusters = Vec::new();

        for i in 0..n {
            if status[i].is_some() {
                continue;
            }

            let neighbors = self.neighbors(i, entities)?;
            if neighbors.len() < self.config.min_pts {
                status[i] = Some(Status::Noise);
                continue;
            }

            let members = self.expand(i, neighbors, entities, &mut status)?;
            trace!(root = i, size = members.len(), "expanded dbscan cluster");

            let slot = clusters.len();
            let refs: Vec<&'a T> = members.iter().map(|&j| &entities[j]).collect();
            let cluster = self
                .builder
                .create(refs)
                .ok_or(ClusterError::BuilderRejected {
                    size: members.len(),
                })?;
            for &j in &members {
                labels[j] = Some(slot);
            }
            clusters.push(cluster);
        }

        debug!(
            entities = n,
            clusters = clusters.len(),
            noise = labels.iter().filter(|l| l.is_none()).count(),
            "dbscan finished"
        );

        Ok(DbscanResult { clusters, labels })
    }

    /// Grows a cluster from a core entity and its neighbors.
    ///
    /// Candidates appended while walking the list are visited as well.
    fn expand<T>(
        &self,
        root: usize,
        neighbors: Vec<usize>,
        entities: &[T],
        status: &mut [Option<Status>],
    ) -> Result<Vec<usize>>
    where
        T: Clusterable,
        D: DistanceMeasure<T>,
    {
        let mut members = vec![root];
        status[root] = Some(Status::Member);

        let mut seen: HashSet<usize> = neighbors.iter().copied().collect();
        let mut candidates = neighbors;

        let mut idx = 0;
        while idx < candidates.len() {
            let current = candidates[idx];
            let current_status = status[current];

            if current_status.is_none() {
                let current_neighbors = self.neighbors(current, entities)?;
                if current_neighbors.len() >= self.config.min_pts {
                    for j in current_neighbors {
                        if seen.insert(j) {
                            candidates.push(j);
                        }
                    }
                }
            }

            if current_status != Some(Status::Member) {
                status[current] = Some(Status::Member);
                members.push(current);
            }

            idx += 1;
        }

        Ok(members)
    }

    /// Positions of all other entities within `eps` of `entities[target]`.
    fn neighbors<T>(&self, target: usize, entities: &[T]) -> Result<Vec<usize>>
    where
        T: Clusterable,
        D: DistanceMeasure<T>,
    {
        let feature = &entities[target];
        let mut neighbors = Vec::new();

        for (j, candidate) in entities.iter().enumerate() {
            if j == target {
                continue;
            }
            if self.distance.distance(candidate, feature, &self.params)? <= self.config.eps {
                neighbors.push(j);
            }
        }

        Ok(neighbors)
    }
}

impl<T, D, B> Clusterer<T> for DbscanClusterer<D, B>
where
    T: Clusterable,
    D: DistanceMeasure<T>,
    B: ClusterBuilder<T>,
{
    fn cluster<'a>(&self, entities: &'a [T]) -> Result<Vec<Cluster<'a, T>>> {
        Ok(self.run(entities)?.clusters)
    }
}

/// Perform DBSCAN clustering on entities.
///
/// # Arguments
/// * `entities` - Entities to cluster
/// * `config` - Neighborhood radius and minimum neighbor count
/// * `distance` - Distance measure between entities
/// * `builder` - Builds a cluster from each expansion
/// * `params` - Parameters for the distance measure
pub fn dbscan<'a, T, D, B>(
    entities: &'a [T],
    config: &DbscanConfig,
    distance: D,
    builder: B,
    params: &[Parameter],
) -> Result<Vec<Cluster<'a, T>>>
where
    T: Clusterable,
    D: DistanceMeasure<T>,
    B: ClusterBuilder<T>,
{
    DbscanClusterer::new(config.clone(), distance, builder, params.to_vec()).cluster(entities)
}
