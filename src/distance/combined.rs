//! Weighted linear combination of distance measures.

use super::DistanceMeasure;
use crate::core::Clusterable;
use crate::error::{ClusterError, Result};
use crate::parameter::Parameter;
use std::fmt;

/// `d = w1*d1 + w2*d2 + ... + wn*dn`.
///
/// Each sub-measure receives exactly one parameter, taken positionally from
/// the parameter list, so a combination of `n` measures needs at least `n`
/// parameters. Weights are used as given, without normalization.
///
/// A term whose weight is exactly zero contributes nothing, even when its
/// sub-distance is infinite; the sub-distance is still evaluated so that a
/// missing parameter is reported.
pub struct CombinedDistance<T> {
    measures: Vec<Box<dyn DistanceMeasure<T>>>,
    weights: Vec<f64>,
}

impl<T: Clusterable> CombinedDistance<T> {
    /// Creates a combination from parallel lists of measures and weights.
    pub fn new(measures: Vec<Box<dyn DistanceMeasure<T>>>, weights: Vec<f64>) -> Result<Self> {
        if measures.len() != weights.len() {
            return Err(ClusterError::DimensionMismatch {
                expected: measures.len(),
                got: weights.len(),
            });
        }
        Ok(Self { measures, weights })
    }

    /// Creates an empty combination, which always yields `0`.
    pub fn empty() -> Self {
        Self {
            measures: Vec::new(),
            weights: Vec::new(),
        }
    }

    /// Appends a weighted measure.
    pub fn with<D>(mut self, measure: D, weight: f64) -> Self
    where
        D: DistanceMeasure<T> + 'static,
    {
        self.measures.push(Box::new(measure));
        self.weights.push(weight);
        self
    }

    pub fn len(&self) -> usize {
        self.measures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measures.is_empty()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

impl<T: Clusterable> DistanceMeasure<T> for CombinedDistance<T> {
    fn distance(&self, a: &T, b: &T, params: &[Parameter]) -> Result<f64> {
        if params.len() < self.measures.len() {
            return Err(ClusterError::ParameterNotFound(format!(
                "combined distance needs {} parameters, got {}",
                self.measures.len(),
                params.len()
            )));
        }

        let mut total = 0.0;
        for ((measure, &weight), param) in self.measures.iter().zip(&self.weights).zip(params) {
            let d = measure.distance(a, b, std::slice::from_ref(param))?;
            if weight == 0.0 {
                continue;
            }
            total += weight * d;
        }
        Ok(total)
    }
}

impl<T> fmt::Debug for CombinedDistance<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombinedDistance")
            .field("measures", &self.measures.len())
            .field("weights", &self.weights)
            .finish()
    }
}
