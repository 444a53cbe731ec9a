//! K-means clustering over clusterable entities.
//!
//! Centroids are entities themselves: the initial ones are picked from the
//! input, later ones come from the cluster builder's center selection.
//! Seeding is either uniform or k-means++.

use super::Clusterer;
use crate::core::{Cluster, ClusterBuilder, Clusterable};
use crate::distance::DistanceMeasure;
use crate::error::{ClusterError, Result};
use crate::parameter::Parameter;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace, warn};

/// Centroid seeding strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Initialization {
    /// `k` distinct entities chosen uniformly at random
    #[default]
    Random,
    /// k-means++: later seeds favor entities far from the current ones
    PlusPlus,
}

/// K-means configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansConfig {
    /// Number of clusters
    pub k: usize,
    /// Maximum iterations
    pub max_iter: usize,
    /// Random seed for initialization
    pub seed: Option<u64>,
    /// Centroid seeding strategy
    pub init: Initialization,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: 3,
            max_iter: 100,
            seed: None,
            init: Initialization::Random,
        }
    }
}

impl KMeansConfig {
    /// Set number of clusters.
    pub fn k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Set maximum iterations.
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set random seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set seeding strategy.
    pub fn init(mut self, init: Initialization) -> Self {
        self.init = init;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(ClusterError::InvalidParameter(
                "k must be at least 1".to_string(),
            ));
        }
        if self.max_iter == 0 {
            return Err(ClusterError::InvalidParameter(
                "max_iter must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// K-means clustering result.
#[derive(Debug, Clone)]
pub struct KMeansResult<'a, T> {
    /// One cluster per centroid slot
    pub clusters: Vec<Cluster<'a, T>>,
    /// Cluster assignments for each entity (0-indexed)
    pub labels: Vec<usize>,
    /// Number of iterations performed
    pub n_iter: usize,
    /// Whether the centroids stopped moving before the iteration cap
    pub converged: bool,
    /// Sum of member-to-centroid distances
    pub inertia: f64,
}

impl<'a, T> KMeansResult<'a, T> {
    /// Get indices of entities in a specific cluster.
    pub fn cluster_members(&self, cluster: usize) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, &l)| l == cluster)
            .map(|(i, _)| i)
            .collect()
    }

    /// Get the size of each cluster.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        self.clusters.iter().map(|c| c.members().len()).collect()
    }
}

/// K-means over an arbitrary distance measure.
#[derive(Debug, Clone)]
pub struct KMeansClusterer<D, B> {
    config: KMeansConfig,
    distance: D,
    builder: B,
    params: Vec<Parameter>,
}

impl<D, B> KMeansClusterer<D, B> {
    pub fn new(config: KMeansConfig, distance: D, builder: B, params: Vec<Parameter>) -> Self {
        Self {
            config,
            distance,
            builder,
            params,
        }
    }

    /// K-means with k-means++ seeding, whatever `config.init` says.
    pub fn plus_plus(config: KMeansConfig, distance: D, builder: B, params: Vec<Parameter>) -> Self {
        Self::new(config.init(Initialization::PlusPlus), distance, builder, params)
    }

    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }

    /// Clusters `entities` with randomness from the configured seed, or from
    /// entropy when there is none.
    pub fn run<'a, T>(&self, entities: &'a [T]) -> Result<KMeansResult<'a, T>>
    where
        T: Clusterable + Clone,
        D: DistanceMeasure<T>,
        B: ClusterBuilder<T>,
    {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.run_with_rng(entities, &mut rng)
    }

    /// Like [`Clusterer::cluster`], drawing randomness from `rng`.
    pub fn cluster_with_rng<'a, T, R>(&self, entities: &'a [T], rng: &mut R) -> Result<Vec<Cluster<'a, T>>>
    where
        T: Clusterable + Clone,
        D: DistanceMeasure<T>,
        B: ClusterBuilder<T>,
        R: Rng + ?Sized,
    {
        Ok(self.run_with_rng(entities, rng)?.clusters)
    }

    /// Clusters `entities`, drawing randomness from `rng`.
    pub fn run_with_rng<'a, T, R>(&self, entities: &'a [T], rng: &mut R) -> Result<KMeansResult<'a, T>>
    where
        T: Clusterable + Clone,
        D: DistanceMeasure<T>,
        B: ClusterBuilder<T>,
        R: Rng + ?Sized,
    {
        self.config.validate()?;

        let n = entities.len();
        let k = self.config.k;

        if n == 0 {
            return Ok(KMeansResult {
                clusters: Vec::new(),
                labels: Vec::new(),
                n_iter: 0,
                converged: true,
                inertia: 0.0,
            });
        }
        if k > n {
            return Err(ClusterError::InsufficientData { needed: k, got: n });
        }

        let mut centroids = match self.config.init {
            Initialization::Random => random_centroids(entities, k, rng),
            Initialization::PlusPlus => self.plus_plus_centroids(entities, k, rng)?,
        };
        debug!(k, entities = n, init = ?self.config.init, "seeded k-means centroids");

        let mut n_iter = 0;
        let (labels, converged) = loop {
            n_iter += 1;

            // Assignment step
            let mut labels = Vec::with_capacity(n);
            for entity in entities {
                let (nearest, _) = self.find_nearest_centroid(entity, &centroids)?;
                labels.push(nearest);
            }

            // Update step
            let clusters = self.build_clusters(entities, &labels, k)?;
            let next: Vec<T> = clusters.iter().map(|c| c.centroid().clone()).collect();
            let changed = self.centroids_changed(&next, &centroids)?;
            trace!(iteration = n_iter, changed, "k-means iteration");
            centroids = next;

            if !changed {
                debug!(n_iter, "k-means converged");
                break (labels, true);
            }
            if n_iter >= self.config.max_iter {
                warn!(
                    max_iter = self.config.max_iter,
                    "k-means reached the iteration cap without converging"
                );
                break (labels, false);
            }
        };

        // One fresh cluster per final partition
        let clusters = self.build_clusters(entities, &labels, k)?;
        let inertia = self.compute_inertia(&clusters)?;

        Ok(KMeansResult {
            clusters,
            labels,
            n_iter,
            converged,
            inertia,
        })
    }

    /// k-means++ seeding.
    ///
    /// The first seed is uniform; every later one is drawn with probability
    /// proportional to its summed squared distance to the seeds so far.
    fn plus_plus_centroids<T, R>(&self, entities: &[T], k: usize, rng: &mut R) -> Result<Vec<T>>
    where
        T: Clusterable + Clone,
        D: DistanceMeasure<T>,
        R: Rng + ?Sized,
    {
        let mut pool: Vec<usize> = (0..entities.len()).collect();
        let mut centroids = Vec::with_capacity(k);

        let first = pool.remove(rng.gen_range(0..pool.len()));
        centroids.push(entities[first].clone());

        while centroids.len() < k {
            let mut weights = Vec::with_capacity(pool.len());
            for &i in &pool {
                let mut weight = 0.0;
                for centroid in &centroids {
                    let d = self.distance.distance(&entities[i], centroid, &self.params)?;
                    weight += d * d;
                }
                weights.push(weight);
            }

            let picked = pool.remove(select_weighted(&weights, rng));
            trace!(picked, "k-means++ seed");
            centroids.push(entities[picked].clone());
        }

        Ok(centroids)
    }

    /// Find the nearest centroid for an entity. Ties go to the lower slot.
    fn find_nearest_centroid<T>(&self, entity: &T, centroids: &[T]) -> Result<(usize, f64)>
    where
        T: Clusterable,
        D: DistanceMeasure<T>,
    {
        let mut min_dist = f64::INFINITY;
        let mut nearest = 0;

        for (i, centroid) in centroids.iter().enumerate() {
            let dist = self.distance.distance(entity, centroid, &self.params)?;
            if dist < min_dist {
                min_dist = dist;
                nearest = i;
            }
        }

        Ok((nearest, min_dist))
    }

    /// One cluster per slot; an empty slot is an error.
    fn build_clusters<'a, T>(&self, entities: &'a [T], labels: &[usize], k: usize) -> Result<Vec<Cluster<'a, T>>>
    where
        T: Clusterable,
        B: ClusterBuilder<T>,
    {
        let mut partitions: Vec<Vec<&'a T>> = vec![Vec::new(); k];
        for (entity, &label) in entities.iter().zip(labels) {
            partitions[label].push(entity);
        }

        partitions
            .into_iter()
            .enumerate()
            .map(|(slot, members)| {
                if members.is_empty() {
                    return Err(ClusterError::EmptyPartition { slot });
                }
                let size = members.len();
                self.builder
                    .create(members)
                    .ok_or(ClusterError::BuilderRejected { size })
            })
            .collect()
    }

    fn centroids_changed<T>(&self, next: &[T], previous: &[T]) -> Result<bool>
    where
        T: Clusterable,
        D: DistanceMeasure<T>,
    {
        for (a, b) in next.iter().zip(previous) {
            if self.distance.distance(a, b, &self.params)? != 0.0 {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Compute inertia (total member-to-centroid distance).
    fn compute_inertia<T>(&self, clusters: &[Cluster<'_, T>]) -> Result<f64>
    where
        T: Clusterable,
        D: DistanceMeasure<T>,
    {
        let mut inertia = 0.0;
        for cluster in clusters {
            for member in cluster.iter() {
                inertia += self.distance.distance(member, cluster.centroid(), &self.params)?;
            }
        }
        Ok(inertia)
    }
}

impl<T, D, B> Clusterer<T> for KMeansClusterer<D, B>
where
    T: Clusterable + Clone,
    D: DistanceMeasure<T>,
    B: ClusterBuilder<T>,
{
    fn cluster<'a>(&self, entities: &'a [T]) -> Result<Vec<Cluster<'a, T>>> {
        Ok(self.run(entities)?.clusters)
    }
}

/// Picks `k` distinct entities uniformly at random.
fn random_centroids<T, R>(entities: &[T], k: usize, rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let mut indices: Vec<usize> = (0..entities.len()).collect();
    indices.shuffle(rng);
    indices
        .into_iter()
        .take(k)
        .map(|i| entities[i].clone())
        .collect()
}

/// Draws a position with probability proportional to its weight.
///
/// Weights are walked in ascending order. A total that is zero or not finite
/// falls back to a uniform draw; a walk that ends short picks the heaviest.
fn select_weighted<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> usize {
    if weights.is_empty() {
        return 0;
    }

    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return rng.gen_range(0..weights.len());
    }

    let mut order: Vec<usize> = (0..weights.len()).collect();
    order.sort_by(|&a, &b| weights[a].total_cmp(&weights[b]));

    let selector: f64 = rng.gen();
    let mut sum = 0.0;
    for &i in &order {
        sum += weights[i] / total;
        if selector < sum {
            return i;
        }
    }

    order[order.len() - 1]
}

/// Perform k-means clustering on entities.
///
/// Seeding follows `config.init`.
///
/// # Arguments
/// * `entities` - Entities to cluster
/// * `config` - K-means configuration
/// * `distance` - Distance measure between entities and centroids
/// * `builder` - Builds a cluster, and its centroid, from each partition
/// * `params` - Parameters for the distance measure
pub fn kmeans<'a, T, D, B>(
    entities: &'a [T],
    config: &KMeansConfig,
    distance: D,
    builder: B,
    params: &[Parameter],
) -> Result<Vec<Cluster<'a, T>>>
where
    T: Clusterable + Clone,
    D: DistanceMeasure<T>,
    B: ClusterBuilder<T>,
{
    KMeansClusterer::new(config.clone(), distance, builder, params.to_vec()).cluster(entities)
}

/// Perform k-means clustering with k-means++ seeding.
pub fn kmeans_plus_plus<'a, T, D, B>(
    entities: &'a [T],
    config: &KMeansConfig,
    distance: D,
    builder: B,
    params: &[Parameter],
) -> Result<Vec<Cluster<'a, T>>>
where
    T: Clusterable + Clone,
    D: DistanceMeasure<T>,
    B: ClusterBuilder<T>,
{
    KMeansClusterer::plus_plus(config.clone(), distance, builder, params.to_vec()).cluster(entities)
}
