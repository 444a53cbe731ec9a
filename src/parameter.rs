//! Parameters selecting which entity attribute a distance measure compares.
//!
//! A distance computation receives an ordered slice of parameters and looks
//! up the one it needs by [`ParameterKind`]. When several parameters match,
//! the first one in order of occurrence wins.
//!
//! # Example
//!
//! ```
//! use geocluster::parameter::{self, Parameter, ParameterKind};
//!
//! let params = [Parameter::geom(), Parameter::integer("population")];
//! let attr = parameter::find(&params, ParameterKind::Number).unwrap();
//! assert_eq!(attr.name(), "population");
//! assert!(!parameter::has(&params, ParameterKind::Real));
//! ```

use crate::core::DEFAULT_GEOMETRY_NAME;
use crate::error::{ClusterError, Result};
use std::fmt;

/// A typed selector naming an entity attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Parameter {
    /// Geometry attribute
    Geometry(String),
    /// Integer attribute
    Integer(String),
    /// Real (floating point) attribute
    Real(String),
}

impl Parameter {
    /// Geometry attribute with the default name `"geom"`.
    pub fn geom() -> Self {
        Parameter::Geometry(DEFAULT_GEOMETRY_NAME.to_string())
    }

    pub fn geom_named(name: impl Into<String>) -> Self {
        Parameter::Geometry(name.into())
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Parameter::Integer(name.into())
    }

    pub fn real(name: impl Into<String>) -> Self {
        Parameter::Real(name.into())
    }

    /// Name of the selected attribute.
    pub fn name(&self) -> &str {
        match self {
            Parameter::Geometry(name) | Parameter::Integer(name) | Parameter::Real(name) => name,
        }
    }

    pub fn is_geometry(&self) -> bool {
        matches!(self, Parameter::Geometry(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Parameter::Integer(_) | Parameter::Real(_))
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::Geometry(name) => write!(f, "geometry attribute '{}'", name),
            Parameter::Integer(name) => write!(f, "integer attribute '{}'", name),
            Parameter::Real(name) => write!(f, "real attribute '{}'", name),
        }
    }
}

/// Class of parameters a distance measure asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParameterKind {
    /// Any attribute parameter
    #[default]
    Attribute,
    /// Geometry attributes only
    Geometry,
    /// Integer or real attributes
    Number,
    /// Integer attributes only
    Integer,
    /// Real attributes only
    Real,
}

impl ParameterKind {
    /// Whether `param` belongs to this class.
    pub fn matches(&self, param: &Parameter) -> bool {
        match self {
            ParameterKind::Attribute => true,
            ParameterKind::Geometry => matches!(param, Parameter::Geometry(_)),
            ParameterKind::Number => param.is_number(),
            ParameterKind::Integer => matches!(param, Parameter::Integer(_)),
            ParameterKind::Real => matches!(param, Parameter::Real(_)),
        }
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParameterKind::Attribute => "attribute",
            ParameterKind::Geometry => "geometry attribute",
            ParameterKind::Number => "number attribute",
            ParameterKind::Integer => "integer attribute",
            ParameterKind::Real => "real attribute",
        };
        f.write_str(s)
    }
}

/// First parameter of the given kind.
pub fn find(params: &[Parameter], kind: ParameterKind) -> Result<&Parameter> {
    params
        .iter()
        .find(|p| kind.matches(p))
        .ok_or_else(|| ClusterError::ParameterNotFound(kind.to_string()))
}

/// Every parameter of the given kind, in order of occurrence.
pub fn find_all(params: &[Parameter], kind: ParameterKind) -> Result<Vec<&Parameter>> {
    let found: Vec<&Parameter> = params.iter().filter(|p| kind.matches(p)).collect();
    if found.is_empty() {
        Err(ClusterError::ParameterNotFound(kind.to_string()))
    } else {
        Ok(found)
    }
}

/// Whether any parameter of the given kind is present.
pub fn has(params: &[Parameter], kind: ParameterKind) -> bool {
    params.iter().any(|p| kind.matches(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== constructors ====================

    #[test]
    fn default_geometry_name() {
        assert_eq!(Parameter::geom(), Parameter::Geometry("geom".to_string()));
        assert_eq!(Parameter::geom_named("the_geom").name(), "the_geom");
        assert_eq!(Parameter::integer("number").name(), "number");
        assert_eq!(Parameter::real("area").name(), "area");
    }

    #[test]
    fn display_names_kind_and_attribute() {
        assert_eq!(
            Parameter::integer("number").to_string(),
            "integer attribute 'number'"
        );
        assert_eq!(ParameterKind::Number.to_string(), "number attribute");
    }

    // ==================== ParameterKind ====================

    #[test]
    fn number_kind_covers_integer_and_real() {
        assert!(ParameterKind::Number.matches(&Parameter::integer("a")));
        assert!(ParameterKind::Number.matches(&Parameter::real("a")));
        assert!(!ParameterKind::Number.matches(&Parameter::geom()));
        assert!(ParameterKind::Attribute.matches(&Parameter::geom()));
        assert!(!ParameterKind::Integer.matches(&Parameter::real("a")));
    }

    // ==================== find ====================

    #[test]
    fn find_returns_first_match() {
        let params = [
            Parameter::geom(),
            Parameter::integer("first"),
            Parameter::real("second"),
        ];
        assert_eq!(find(&params, ParameterKind::Number).unwrap().name(), "first");
        assert_eq!(find(&params, ParameterKind::Real).unwrap().name(), "second");
        assert_eq!(find(&params, ParameterKind::Attribute).unwrap(), &Parameter::geom());
    }

    #[test]
    fn find_missing_is_error() {
        let params = [Parameter::geom()];
        assert_eq!(
            find(&params, ParameterKind::Integer),
            Err(ClusterError::ParameterNotFound("integer attribute".to_string()))
        );
        assert!(find(&[], ParameterKind::Attribute).is_err());
    }

    #[test]
    fn find_all_collects_every_match() {
        let params = [
            Parameter::integer("a"),
            Parameter::geom(),
            Parameter::integer("b"),
        ];
        let found = find_all(&params, ParameterKind::Integer).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[1].name(), "b");
        assert!(find_all(&params, ParameterKind::Real).is_err());
    }

    #[test]
    fn has_reports_presence() {
        let params = [Parameter::geom()];
        assert!(has(&params, ParameterKind::Geometry));
        assert!(!has(&params, ParameterKind::Number));
    }
}
