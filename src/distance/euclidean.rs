//! Euclidean distance between representative points.

use super::DistanceMeasure;
use crate::core::geometry::coord_distance;
use crate::core::Clusterable;
use crate::error::Result;
use crate::parameter::Parameter;

/// Point-to-point distance between the entities' representative points.
///
/// Points stand for themselves, segments for their midpoint and polygons for
/// their centroid. No parameter is consulted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EuclideanDistance;

impl<T: Clusterable> DistanceMeasure<T> for EuclideanDistance {
    fn distance(&self, a: &T, b: &T, _params: &[Parameter]) -> Result<f64> {
        Ok(euclidean_distance(a, b))
    }
}

/// Euclidean distance between two entities.
///
/// Returns `+inf` for incomparable entities and `0` for identical ones.
pub fn euclidean_distance<T: Clusterable>(a: &T, b: &T) -> f64 {
    if !a.is_comparable_with(b) {
        return f64::INFINITY;
    }
    if a.is_same(b) {
        return 0.0;
    }
    match (a.representative_point(), b.representative_point()) {
        (Some(pa), Some(pb)) => coord_distance(pa.0, pb.0),
        _ => f64::INFINITY,
    }
}
