//! Clusters, cluster builders and center selection.

use super::feature::{Clusterable, Feature};
use super::geometry::{self, GeometryKind};
use geo::{Geometry, Point, Translate};

/// A group of entities produced by a clustering algorithm.
///
/// Members are borrowed from the caller's collection. The centroid is fixed
/// when the cluster is built and may be an entity that is not a member.
#[derive(Debug, Clone)]
pub struct Cluster<'a, T> {
    members: Vec<&'a T>,
    geometry_kind: Option<GeometryKind>,
    centroid: T,
}

impl<'a, T: Clusterable> Cluster<'a, T> {
    /// Creates a cluster; the geometry kind is taken from the first member.
    pub fn new(members: Vec<&'a T>, centroid: T) -> Self {
        let geometry_kind = members.first().and_then(|m| m.geometry_kind());
        Self {
            members,
            geometry_kind,
            centroid,
        }
    }

    /// Union of the members' representative geometries.
    pub fn union(&self) -> Option<Geometry<f64>> {
        geometry::union_all(
            self.members
                .iter()
                .filter_map(|m| m.representative_geometry()),
        )
    }
}

impl<'a, T> Cluster<'a, T> {
    pub fn members(&self) -> &[&'a T] {
        &self.members
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.members.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn centroid(&self) -> &T {
        &self.centroid
    }

    pub fn into_centroid(self) -> T {
        self.centroid
    }

    /// Geometry kind shared by the members.
    pub fn geometry_kind(&self) -> Option<GeometryKind> {
        self.geometry_kind
    }

    /// Whether `entity` is one of the members. Membership is by identity.
    pub fn contains(&self, entity: &T) -> bool {
        self.members.iter().any(|m| std::ptr::eq(*m, entity))
    }
}

/// Picks or synthesizes the entity that represents a group.
pub trait CenterSelector<T> {
    /// Representative of `members`, which is never empty.
    fn center(&self, members: &[&T]) -> T;
}

/// Turns a list of entities into a [`Cluster`].
pub trait ClusterBuilder<T> {
    /// Builds a cluster, or `None` when `members` is empty.
    fn create<'a>(&self, members: Vec<&'a T>) -> Option<Cluster<'a, T>>;
}

impl<T, B> ClusterBuilder<T> for &B
where
    B: ClusterBuilder<T> + ?Sized,
{
    fn create<'a>(&self, members: Vec<&'a T>) -> Option<Cluster<'a, T>> {
        (**self).create(members)
    }
}

/// Centroid of a feature group: the mean of the members' representative points.
///
/// The centroid keeps the geometry kind of the first member that has a
/// geometry, so it stays comparable with the members: points yield a point
/// at the mean, other shapes yield that member's geometry translated so its
/// representative point lands on the mean. The result is tagged with the
/// first member's type, unless a type tag is configured.
#[derive(Debug, Clone, Default)]
pub struct CentroidSelector {
    type_tag: Option<String>,
}

impl CentroidSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags every synthesized centroid with `type_tag`.
    pub fn with_type_tag(mut self, type_tag: impl Into<String>) -> Self {
        self.type_tag = Some(type_tag.into());
        self
    }
}

impl CenterSelector<Feature> for CentroidSelector {
    fn center(&self, members: &[&Feature]) -> Feature {
        let tag = match (&self.type_tag, members.first()) {
            (Some(tag), _) => tag.clone(),
            (None, Some(first)) => first.type_tag().to_string(),
            (None, None) => String::new(),
        };

        let points: Vec<Point<f64>> = members
            .iter()
            .filter_map(|m| m.representative_point())
            .collect();

        let template = members
            .iter()
            .find_map(|m| Some((m.representative_geometry()?, m.representative_point()?)));

        let Some((geometry, anchor)) = template else {
            return Feature::new(tag);
        };

        let n = points.len() as f64;
        let cx = points.iter().map(|p| p.x()).sum::<f64>() / n;
        let cy = points.iter().map(|p| p.y()).sum::<f64>() / n;

        match geometry {
            Geometry::Point(_) => Feature::point(tag, cx, cy),
            other => Feature::new(tag)
                .with_geometry(other.translate(cx - anchor.x(), cy - anchor.y())),
        }
    }
}

/// Builds clusters whose centroid comes from a [`CenterSelector`].
#[derive(Debug, Clone, Default)]
pub struct CentroidClusterBuilder<S = CentroidSelector> {
    selector: S,
}

impl<S> CentroidClusterBuilder<S> {
    pub fn new(selector: S) -> Self {
        Self { selector }
    }

    pub fn selector(&self) -> &S {
        &self.selector
    }
}

impl<T, S> ClusterBuilder<T> for CentroidClusterBuilder<S>
where
    T: Clusterable,
    S: CenterSelector<T>,
{
    fn create<'a>(&self, members: Vec<&'a T>) -> Option<Cluster<'a, T>> {
        if members.is_empty() {
            return None;
        }
        let centroid = self.selector.center(&members);
        Some(Cluster::new(members, centroid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::polygon;

    fn points() -> Vec<Feature> {
        vec![
            Feature::point("PointFeature", 0.0, 0.0),
            Feature::point("PointFeature", 2.0, 0.0),
            Feature::point("PointFeature", 2.0, 2.0),
            Feature::point("PointFeature", 0.0, 2.0),
        ]
    }

    fn square(x: f64, y: f64) -> Feature {
        Feature::new("Parcel").with_geometry(Geometry::Polygon(polygon![
            (x: x, y: y),
            (x: x + 1.0, y: y),
            (x: x + 1.0, y: y + 1.0),
            (x: x, y: y + 1.0),
            (x: x, y: y),
        ]))
    }

    // ==================== CentroidSelector ====================

    #[test]
    fn centroid_is_mean_of_points() {
        let features = points();
        let members: Vec<&Feature> = features.iter().collect();
        let c = CentroidSelector::new().center(&members);
        let p = c.representative_point().unwrap();

        assert_relative_eq!(p.x(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.y(), 1.0, epsilon = 1e-12);
        assert_eq!(c.type_tag(), "PointFeature");
    }

    #[test]
    fn centroid_uses_configured_tag() {
        let features = points();
        let members: Vec<&Feature> = features.iter().collect();
        let c = CentroidSelector::new()
            .with_type_tag("Centroid")
            .center(&members);
        assert_eq!(c.type_tag(), "Centroid");
    }

    #[test]
    fn centroid_of_members_without_geometry_has_none() {
        let features = vec![Feature::new("Bare"), Feature::new("Bare")];
        let members: Vec<&Feature> = features.iter().collect();
        let c = CentroidSelector::new().center(&members);
        assert!(c.representative_geometry().is_none());
    }

    #[test]
    fn centroid_of_polygons_keeps_polygon_kind() {
        let features = vec![square(0.0, 0.0), square(4.0, 0.0), square(2.0, 3.0)];
        let members: Vec<&Feature> = features.iter().collect();
        let c = CentroidSelector::new().center(&members);

        assert_eq!(c.geometry_kind(), Some(GeometryKind::Polygon));
        assert!(c.is_comparable_with(&features[0]));

        let p = c.representative_point().unwrap();
        assert_relative_eq!(p.x(), 2.5, epsilon = 1e-12);
        assert_relative_eq!(p.y(), 1.5, epsilon = 1e-12);
    }

    #[test]
    fn centroid_of_single_polygon_is_the_same_polygon() {
        let features = vec![square(3.0, -2.0)];
        let members: Vec<&Feature> = features.iter().collect();
        let c = CentroidSelector::new().center(&members);
        assert!(c.is_same(&features[0]));
    }

    // ==================== CentroidClusterBuilder ====================

    #[test]
    fn builder_returns_none_for_empty_input() {
        let builder = CentroidClusterBuilder::<CentroidSelector>::default();
        let cluster: Option<Cluster<'_, Feature>> = builder.create(Vec::new());
        assert!(cluster.is_none());
    }

    #[test]
    fn builder_infers_geometry_kind_from_first_member() {
        let features = points();
        let builder = CentroidClusterBuilder::<CentroidSelector>::default();
        let cluster = builder.create(features.iter().collect()).unwrap();

        assert_eq!(cluster.len(), 4);
        assert!(!cluster.is_empty());
        assert_eq!(cluster.geometry_kind(), Some(GeometryKind::Point));
    }

    // ==================== Cluster ====================

    #[test]
    fn contains_is_identity_based() {
        let features = points();
        let builder = CentroidClusterBuilder::<CentroidSelector>::default();
        let cluster = builder.create(vec![&features[0], &features[1]]).unwrap();

        assert!(cluster.contains(&features[0]));
        assert!(cluster.contains(&features[1]));
        assert!(!cluster.contains(&features[2]));

        // An equal copy is a different entity.
        let copy = features[0].clone();
        assert!(!cluster.contains(&copy));
    }

    #[test]
    fn iter_yields_members_in_order() {
        let features = points();
        let builder = CentroidClusterBuilder::<CentroidSelector>::default();
        let cluster = builder.create(vec![&features[2], &features[0]]).unwrap();
        let xs: Vec<_> = cluster
            .iter()
            .map(|f| f.representative_point().unwrap().x())
            .collect();
        assert_eq!(xs, vec![2.0, 0.0]);
    }

    #[test]
    fn union_of_polygon_members() {
        let a = Feature::new("Parcel").with_geometry(Geometry::Polygon(polygon![
            (x: 0.0, y: 0.0),
            (x: 2.0, y: 0.0),
            (x: 2.0, y: 1.0),
            (x: 0.0, y: 1.0),
            (x: 0.0, y: 0.0),
        ]));
        let b = Feature::new("Parcel").with_geometry(Geometry::Polygon(polygon![
            (x: 1.0, y: 0.0),
            (x: 3.0, y: 0.0),
            (x: 3.0, y: 1.0),
            (x: 1.0, y: 1.0),
            (x: 1.0, y: 0.0),
        ]));
        let builder = CentroidClusterBuilder::<CentroidSelector>::default();
        let cluster = builder.create(vec![&a, &b]).unwrap();

        let union = cluster.union().unwrap();
        assert_eq!(GeometryKind::of(&union), GeometryKind::Polygon);
        assert_eq!(cluster.geometry_kind(), Some(GeometryKind::Polygon));
    }

    #[test]
    fn into_centroid_moves_out_the_centroid() {
        let features = points();
        let builder = CentroidClusterBuilder::<CentroidSelector>::default();
        let cluster = builder.create(features.iter().collect()).unwrap();
        let expected = cluster.centroid().clone();
        assert_eq!(cluster.into_centroid(), expected);
    }
}
