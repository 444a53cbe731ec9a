//! Core data structures: clusterable entities, geometry helpers and clusters.

mod cluster;
mod feature;
pub mod geometry;

pub use cluster::{CenterSelector, CentroidClusterBuilder, CentroidSelector, Cluster, ClusterBuilder};
pub use feature::{AttributeValue, Clusterable, Feature, DEFAULT_GEOMETRY_NAME};
pub use geometry::GeometryKind;
