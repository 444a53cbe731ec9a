//! Distance measures between clusterable entities.
//!
//! Every measure implements [`DistanceMeasure`]: given two entities and the
//! ordered parameter list it returns a non-negative distance, `+inf` when the
//! entities are not comparable, or [`ClusterError::ParameterNotFound`] when a
//! parameter it needs is missing.
//!
//! # Example
//!
//! ```
//! use geocluster::core::Feature;
//! use geocluster::distance::{DistanceMeasure, EuclideanDistance, ExactHausdorffDistance};
//! use geocluster::parameter::Parameter;
//!
//! let a = Feature::point("PointFeature", 0.0, 0.0);
//! let b = Feature::point("PointFeature", 3.0, 4.0);
//!
//! let d = EuclideanDistance.distance(&a, &b, &[]).unwrap();
//! assert_eq!(d, 5.0);
//!
//! let h = ExactHausdorffDistance::new()
//!     .distance(&a, &b, &[Parameter::geom()])
//!     .unwrap();
//! assert_eq!(h, 5.0);
//! ```
//!
//! [`ClusterError::ParameterNotFound`]: crate::error::ClusterError::ParameterNotFound

pub mod absolute;
pub mod combined;
pub mod euclidean;
pub mod hausdorff;

use crate::core::Clusterable;
use crate::error::Result;
use crate::parameter::Parameter;

pub use absolute::AbsoluteDifferenceDistance;
pub use combined::CombinedDistance;
pub use euclidean::{euclidean_distance, EuclideanDistance};
pub use hausdorff::{
    directed_hausdorff, point_to_set_distance, DiscreteHausdorffDistance, ExactHausdorffDistance,
};

/// A distance between two entities, parameterized by the attributes to compare.
pub trait DistanceMeasure<T> {
    /// Distance between `a` and `b`.
    fn distance(&self, a: &T, b: &T, params: &[Parameter]) -> Result<f64>;
}

impl<T, D> DistanceMeasure<T> for &D
where
    D: DistanceMeasure<T> + ?Sized,
{
    fn distance(&self, a: &T, b: &T, params: &[Parameter]) -> Result<f64> {
        (**self).distance(a, b, params)
    }
}

impl<T, D> DistanceMeasure<T> for Box<D>
where
    D: DistanceMeasure<T> + ?Sized,
{
    fn distance(&self, a: &T, b: &T, params: &[Parameter]) -> Result<f64> {
        (**self).distance(a, b, params)
    }
}

/// Exact Hausdorff distance between two entities.
pub fn exact_hausdorff_distance<T: Clusterable>(a: &T, b: &T, params: &[Parameter]) -> Result<f64> {
    ExactHausdorffDistance::new().distance(a, b, params)
}

/// Vertex-sampled Hausdorff distance between two entities.
pub fn discrete_hausdorff_distance<T: Clusterable>(
    a: &T,
    b: &T,
    params: &[Parameter],
) -> Result<f64> {
    DiscreteHausdorffDistance.distance(a, b, params)
}
