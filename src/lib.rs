//! # geocluster
//!
//! Clustering of spatial features - DBSCAN, k-means and k-means++ over
//! pluggable distance measures.
//!
//! Entities implement [`core::Clusterable`]; distances between them come
//! from [`distance::DistanceMeasure`] implementations (Euclidean, absolute
//! difference, Hausdorff and weighted combinations), each told which
//! attribute to compare through [`parameter::Parameter`]s.

// Allow some clippy warnings for cleaner code in specific cases
#![allow(clippy::type_complexity)]
#![allow(clippy::needless_range_loop)]

pub mod clustering;
pub mod core;
pub mod distance;
pub mod error;
pub mod parameter;

pub use error::{ClusterError, Result};

pub mod prelude {
    pub use crate::clustering::{
        dbscan, kmeans, kmeans_plus_plus, Clusterer, DbscanClusterer, DbscanConfig,
        Initialization, KMeansClusterer, KMeansConfig,
    };
    pub use crate::core::{
        AttributeValue, CentroidClusterBuilder, CentroidSelector, Cluster, ClusterBuilder,
        Clusterable, Feature,
    };
    pub use crate::distance::{
        AbsoluteDifferenceDistance, CombinedDistance, DistanceMeasure, EuclideanDistance,
        ExactHausdorffDistance,
    };
    pub use crate::error::{ClusterError, Result};
    pub use crate::parameter::Parameter;
}
