//! Hausdorff distances between entity geometries.
//!
//! The Hausdorff distance between two point sets is the largest distance from
//! a point in one set to the closest point in the other. Two implementations
//! are provided:
//!
//! - [`DiscreteHausdorffDistance`] delegates to `geo`'s vertex-based
//!   Hausdorff computation.
//! - [`ExactHausdorffDistance`] computes both directed distances with the
//!   early-break pruning: while scanning the target set for the closest
//!   point, the scan stops as soon as a candidate is closer than the running
//!   maximum, since that source point can no longer raise the result.

use super::DistanceMeasure;
use crate::core::geometry::coord_distance;
use crate::core::Clusterable;
use crate::error::Result;
use crate::parameter::{self, Parameter, ParameterKind};
use geo::{Coord, HausdorffDistance};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Hausdorff distance over the vertices of both representative geometries.
///
/// Needs a geometry parameter; only its presence is checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscreteHausdorffDistance;

impl<T: Clusterable> DistanceMeasure<T> for DiscreteHausdorffDistance {
    fn distance(&self, a: &T, b: &T, params: &[Parameter]) -> Result<f64> {
        parameter::find(params, ParameterKind::Geometry)?;

        let d = match (a.representative_geometry(), b.representative_geometry()) {
            (Some(ga), Some(gb)) => ga.hausdorff_distance(gb),
            _ => f64::INFINITY,
        };
        Ok(d)
    }
}

/// Exact Hausdorff distance with early-break pruning.
///
/// The first attribute parameter decides the outcome: a geometry attribute
/// computes the distance, any other attribute yields `+inf`. Coordinate
/// sequences are shuffled before scanning so that adversarial vertex orders
/// do not defeat the pruning; the shuffle only affects running time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExactHausdorffDistance {
    seed: Option<u64>,
}

impl ExactHausdorffDistance {
    /// Shuffles with thread-local randomness.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shuffles with a generator seeded from `seed` on every call.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl<T: Clusterable> DistanceMeasure<T> for ExactHausdorffDistance {
    fn distance(&self, a: &T, b: &T, params: &[Parameter]) -> Result<f64> {
        let attr = parameter::find(params, ParameterKind::Attribute)?;
        if !attr.is_geometry() {
            return Ok(f64::INFINITY);
        }

        let d = match self.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                exact_hausdorff(a, b, &mut rng)
            }
            None => exact_hausdorff(a, b, &mut rand::thread_rng()),
        };
        Ok(d)
    }
}

fn exact_hausdorff<T, R>(a: &T, b: &T, rng: &mut R) -> f64
where
    T: Clusterable,
    R: Rng + ?Sized,
{
    directed_hausdorff(a, b, rng).max(directed_hausdorff(b, a, rng))
}

/// Directed Hausdorff distance from `a` to `b`.
///
/// `+inf` if the entities are not comparable, `0` if they are the same.
pub fn directed_hausdorff<T, R>(a: &T, b: &T, rng: &mut R) -> f64
where
    T: Clusterable,
    R: Rng + ?Sized,
{
    if !a.is_comparable_with(b) {
        return f64::INFINITY;
    }
    if a.is_same(b) {
        return 0.0;
    }

    let mut from = a.representative_coordinates();
    let mut to = b.representative_coordinates();
    from.shuffle(rng);
    to.shuffle(rng);

    directed_coords(&from, &to)
}

fn directed_coords(from: &[Coord<f64>], to: &[Coord<f64>]) -> f64 {
    let mut c_max = 0.0_f64;

    for &ca in from {
        let mut c_min = f64::INFINITY;

        for &cb in to {
            let d = coord_distance(ca, cb);
            if d < c_min {
                c_min = d;
            }
            // ca cannot raise c_max any more
            if d < c_max {
                break;
            }
        }

        if c_min > c_max {
            c_max = c_min;
        }
    }

    c_max
}

/// Distance from a point to the closest point of a set; `+inf` for an empty set.
pub fn point_to_set_distance(point: Coord<f64>, set: &[Coord<f64>]) -> f64 {
    set.iter()
        .map(|&c| coord_distance(point, c))
        .fold(f64::INFINITY, f64::min)
}
