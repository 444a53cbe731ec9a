//! Clustering algorithms over clusterable entities.
//!
//! Provides density-based DBSCAN and centroid-based k-means with random or
//! k-means++ seeding. Algorithms are parameterized by a [`DistanceMeasure`],
//! the parameters it needs and a [`ClusterBuilder`].
//!
//! # Example
//!
//! ```
//! use geocluster::clustering::{dbscan, kmeans, DbscanConfig, KMeansConfig};
//! use geocluster::core::{CentroidClusterBuilder, CentroidSelector, Feature};
//! use geocluster::distance::EuclideanDistance;
//!
//! let features = vec![
//!     Feature::point("Place", 0.0, 0.0),
//!     Feature::point("Place", 0.5, 0.0),
//!     Feature::point("Place", 0.0, 0.5),
//!     Feature::point("Place", 10.0, 10.0),
//!     Feature::point("Place", 10.5, 10.0),
//!     Feature::point("Place", 10.0, 10.5),
//! ];
//! let builder = CentroidClusterBuilder::new(CentroidSelector::new());
//!
//! let config = DbscanConfig::default().eps(1.0).min_pts(2);
//! let clusters = dbscan(&features, &config, EuclideanDistance, &builder, &[]).unwrap();
//! assert_eq!(clusters.len(), 2);
//!
//! let config = KMeansConfig::default().k(2).seed(42);
//! let clusters = kmeans(&features, &config, EuclideanDistance, &builder, &[]).unwrap();
//! assert_eq!(clusters.len(), 2);
//! ```
//!
//! [`DistanceMeasure`]: crate::distance::DistanceMeasure
//! [`ClusterBuilder`]: crate::core::ClusterBuilder

pub mod dbscan;
pub mod kmeans;

use crate::core::Cluster;
use crate::error::Result;

// Re-export from dbscan
pub use dbscan::{dbscan, DbscanClusterer, DbscanConfig, DbscanResult};

// Re-export from kmeans
pub use kmeans::{
    kmeans, kmeans_plus_plus, Initialization, KMeansClusterer, KMeansConfig, KMeansResult,
};

/// A clustering algorithm over a collection of entities.
///
/// Implementations keep no state between calls, so one instance can serve
/// any number of calls.
pub trait Clusterer<T> {
    /// Partitions `entities` into clusters.
    fn cluster<'a>(&self, entities: &'a [T]) -> Result<Vec<Cluster<'a, T>>>;
}
