//! Absolute difference of a numeric attribute.

use super::DistanceMeasure;
use crate::core::{AttributeValue, Clusterable};
use crate::error::{ClusterError, Result};
use crate::parameter::{self, Parameter, ParameterKind};

/// One-dimensional distance `|a.attr - b.attr|` over a numeric attribute.
///
/// Needs an integer or real parameter naming the attribute. Two integer
/// values are subtracted exactly; if either value is real the difference is
/// taken in floating point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AbsoluteDifferenceDistance;

impl<T: Clusterable> DistanceMeasure<T> for AbsoluteDifferenceDistance {
    fn distance(&self, a: &T, b: &T, params: &[Parameter]) -> Result<f64> {
        let attr = parameter::find(params, ParameterKind::Number)?;
        let name = attr.name();

        let va = numeric_attribute(a, name)?;
        let vb = numeric_attribute(b, name)?;

        let d = match (va, vb) {
            (AttributeValue::Integer(x), AttributeValue::Integer(y)) => x.abs_diff(*y) as f64,
            _ => {
                let x = va.as_number().unwrap_or(f64::NAN);
                let y = vb.as_number().unwrap_or(f64::NAN);
                (x - y).abs()
            }
        };
        Ok(d)
    }
}

fn numeric_attribute<'e, T: Clusterable>(entity: &'e T, name: &str) -> Result<&'e AttributeValue> {
    match entity.attribute(name) {
        Some(value @ (AttributeValue::Integer(_) | AttributeValue::Real(_))) => Ok(value),
        Some(_) => Err(ClusterError::ParameterNotFound(format!(
            "attribute '{}' is not numeric",
            name
        ))),
        None => Err(ClusterError::ParameterNotFound(format!(
            "attribute '{}' not present",
            name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Feature;
    use approx::assert_relative_eq;

    fn with_number(value: impl Into<AttributeValue>) -> Feature {
        Feature::point("PointFeature", 0.0, 0.0).with_attribute("number", value)
    }

    #[test]
    fn positive_integers() {
        let d = AbsoluteDifferenceDistance
            .distance(&with_number(4_i64), &with_number(2_i64), &[Parameter::integer("number")])
            .unwrap();
        assert_eq!(d, 2.0);
    }

    #[test]
    fn negative_integers() {
        let d = AbsoluteDifferenceDistance
            .distance(&with_number(-3_i64), &with_number(-6_i64), &[Parameter::integer("number")])
            .unwrap();
        assert_eq!(d, 3.0);
    }

    #[test]
    fn extreme_integers_do_not_overflow() {
        let d = AbsoluteDifferenceDistance
            .distance(
                &with_number(i64::MIN),
                &with_number(i64::MAX),
                &[Parameter::integer("number")],
            )
            .unwrap();
        assert!(d.is_finite());
        assert!(d > 0.0);
    }

    #[test]
    fn real_values() {
        let d = AbsoluteDifferenceDistance
            .distance(&with_number(1.5), &with_number(4_i64), &[Parameter::real("number")])
            .unwrap();
        assert_relative_eq!(d, 2.5);
    }

    #[test]
    fn geometry_parameter_is_not_enough() {
        let err = AbsoluteDifferenceDistance
            .distance(&with_number(1_i64), &with_number(2_i64), &[Parameter::geom()])
            .unwrap_err();
        assert_eq!(
            err,
            ClusterError::ParameterNotFound("number attribute".to_string())
        );
    }

    #[test]
    fn missing_attribute_is_error() {
        let a = Feature::point("PointFeature", 0.0, 0.0);
        let result = AbsoluteDifferenceDistance.distance(&a, &a, &[Parameter::integer("number")]);
        assert!(matches!(result, Err(ClusterError::ParameterNotFound(_))));
    }

    #[test]
    fn text_attribute_is_error() {
        let a = with_number("four");
        let result = AbsoluteDifferenceDistance.distance(&a, &a, &[Parameter::integer("number")]);
        assert!(matches!(result, Err(ClusterError::ParameterNotFound(_))));
    }

    #[test]
    fn first_numeric_parameter_wins() {
        let a = with_number(10_i64).with_attribute("other", 0_i64);
        let b = with_number(7_i64).with_attribute("other", 100_i64);
        let params = [
            Parameter::geom(),
            Parameter::integer("number"),
            Parameter::integer("other"),
        ];
        assert_eq!(AbsoluteDifferenceDistance.distance(&a, &b, &params).unwrap(), 3.0);
    }
}
