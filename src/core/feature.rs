//! Clusterable entities and the in-memory feature type.

use super::geometry::{self, GeometryKind};
use geo::{Coord, Geometry, Point};
use std::collections::BTreeMap;

/// Default name of a feature's geometry attribute.
pub const DEFAULT_GEOMETRY_NAME: &str = "geom";

/// Value of a named entity attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Integer(i64),
    Real(f64),
    Text(String),
    Geometry(Geometry<f64>),
}

impl AttributeValue {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            AttributeValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            AttributeValue::Real(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric value of either integer or real attributes.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttributeValue::Integer(v) => Some(*v as f64),
            AttributeValue::Real(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_geometry(&self) -> Option<&Geometry<f64>> {
        match self {
            AttributeValue::Geometry(g) => Some(g),
            _ => None,
        }
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        AttributeValue::Integer(v)
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        AttributeValue::Real(v)
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        AttributeValue::Text(v.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(v: String) -> Self {
        AttributeValue::Text(v)
    }
}

impl From<Geometry<f64>> for AttributeValue {
    fn from(g: Geometry<f64>) -> Self {
        AttributeValue::Geometry(g)
    }
}

/// Uniform view over anything a clustering algorithm can group.
///
/// Only `type_tag`, `attribute` and `representative_geometry` are required;
/// the derived views and the comparability rules have geometry-based defaults.
pub trait Clusterable {
    /// Type tag of the entity. Entities with different tags are never comparable.
    fn type_tag(&self) -> &str;

    /// Looks up a named attribute.
    fn attribute(&self, name: &str) -> Option<&AttributeValue>;

    /// Geometry standing for the whole entity, if it has one.
    fn representative_geometry(&self) -> Option<&Geometry<f64>>;

    /// Centroid of the representative geometry.
    fn representative_point(&self) -> Option<Point<f64>> {
        self.representative_geometry()
            .and_then(geometry::representative_point)
    }

    /// Vertices of the representative geometry.
    fn representative_coordinates(&self) -> Vec<Coord<f64>> {
        self.representative_geometry()
            .map(geometry::coordinates)
            .unwrap_or_default()
    }

    /// Shape tag of the representative geometry.
    fn geometry_kind(&self) -> Option<GeometryKind> {
        self.representative_geometry().map(GeometryKind::of)
    }

    /// Whether a distance between `self` and `other` can be computed.
    ///
    /// Requires equal type tags and geometries of the same kind on both sides.
    fn is_comparable_with(&self, other: &Self) -> bool {
        if self.type_tag() != other.type_tag() {
            return false;
        }
        match (self.geometry_kind(), other.geometry_kind()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Whether both entities are exactly the same, so their distance is 0.
    fn is_same(&self, other: &Self) -> bool {
        match (self.representative_geometry(), other.representative_geometry()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

/// An attributed feature held in memory.
///
/// The representative geometry is the attribute named by `geometry_name`
/// (`"geom"` unless configured otherwise).
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    id: Option<String>,
    type_tag: String,
    geometry_name: String,
    attributes: BTreeMap<String, AttributeValue>,
}

impl Feature {
    /// Creates a feature of the given type with no attributes.
    pub fn new(type_tag: impl Into<String>) -> Self {
        Self {
            id: None,
            type_tag: type_tag.into(),
            geometry_name: DEFAULT_GEOMETRY_NAME.to_string(),
            attributes: BTreeMap::new(),
        }
    }

    /// Creates a point feature.
    pub fn point(type_tag: impl Into<String>, x: f64, y: f64) -> Self {
        Self::new(type_tag).with_geometry(Geometry::Point(Point::new(x, y)))
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the default geometry.
    pub fn with_geometry(mut self, geometry: Geometry<f64>) -> Self {
        self.attributes
            .insert(self.geometry_name.clone(), AttributeValue::Geometry(geometry));
        self
    }

    /// Renames the default geometry attribute, carrying over any geometry already set.
    pub fn with_geometry_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if let Some(value) = self.attributes.remove(&self.geometry_name) {
            self.attributes.insert(name.clone(), value);
        }
        self.geometry_name = name;
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn geometry_name(&self) -> &str {
        &self.geometry_name
    }

    pub fn attributes(&self) -> &BTreeMap<String, AttributeValue> {
        &self.attributes
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }
}

impl Clusterable for Feature {
    fn type_tag(&self) -> &str {
        &self.type_tag
    }

    fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    fn representative_geometry(&self) -> Option<&Geometry<f64>> {
        self.attributes
            .get(&self.geometry_name)
            .and_then(AttributeValue::as_geometry)
    }
}
