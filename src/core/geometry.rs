//! Geometry helpers shared by entities, clusters and distance measures.
//!
//! Geometries are `geo` types over `f64`. This module adds the few derived
//! views the clustering core needs: the shape tag of a geometry, its
//! representative point and vertex sequence, and the union of many geometries.

use geo::{
    BooleanOps, Centroid, Coord, CoordsIter, Geometry, GeometryCollection, LineString,
    MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};

/// Shape tag of a geometry, used to decide whether two entities are comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    Line,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
    Rect,
    Triangle,
}

impl GeometryKind {
    /// Shape tag of `geometry`.
    pub fn of(geometry: &Geometry<f64>) -> Self {
        match geometry {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::Line(_) => GeometryKind::Line,
            Geometry::LineString(_) => GeometryKind::LineString,
            Geometry::Polygon(_) => GeometryKind::Polygon,
            Geometry::MultiPoint(_) => GeometryKind::MultiPoint,
            Geometry::MultiLineString(_) => GeometryKind::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryKind::GeometryCollection,
            Geometry::Rect(_) => GeometryKind::Rect,
            Geometry::Triangle(_) => GeometryKind::Triangle,
        }
    }

    /// Whether the kind describes an area.
    pub fn is_polygonal(&self) -> bool {
        matches!(
            self,
            GeometryKind::Polygon
                | GeometryKind::MultiPolygon
                | GeometryKind::Rect
                | GeometryKind::Triangle
        )
    }
}

/// Representative point of a geometry: its centroid.
///
/// A point is its own centroid, a segment yields its midpoint and a polygon
/// its area centroid. Empty geometries have no representative point.
pub fn representative_point(geometry: &Geometry<f64>) -> Option<Point<f64>> {
    geometry.centroid()
}

/// Vertices of a geometry in storage order (closing vertices included).
pub fn coordinates(geometry: &Geometry<f64>) -> Vec<Coord<f64>> {
    geometry.coords_iter().collect()
}

/// Euclidean distance between two coordinates.
pub fn coord_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Union of a sequence of geometries.
///
/// Polygonal parts are dissolved with boolean union, repeated points are
/// collapsed and linear parts are kept as they are. A single resulting part
/// is returned as a simple geometry, several as a collection.
/// Returns `None` for an empty sequence.
pub fn union_all<'g, I>(geometries: I) -> Option<Geometry<f64>>
where
    I: IntoIterator<Item = &'g Geometry<f64>>,
{
    let mut parts = Parts::default();
    let mut seen_any = false;

    for geometry in geometries {
        seen_any = true;
        parts.collect(geometry);
    }

    if !seen_any {
        return None;
    }

    let mut pieces: Vec<Geometry<f64>> = Vec::new();

    match parts.points.len() {
        0 => {}
        1 => pieces.push(Geometry::Point(parts.points[0])),
        _ => pieces.push(Geometry::MultiPoint(MultiPoint::new(parts.points))),
    }

    match parts.lines.len() {
        0 => {}
        1 => pieces.extend(parts.lines.into_iter().map(Geometry::LineString)),
        _ => pieces.push(Geometry::MultiLineString(MultiLineString::new(parts.lines))),
    }

    if let Some(mut dissolved) = dissolve(parts.polygons) {
        if dissolved.0.len() == 1 {
            if let Some(polygon) = dissolved.0.pop() {
                pieces.push(Geometry::Polygon(polygon));
            }
        } else {
            pieces.push(Geometry::MultiPolygon(dissolved));
        }
    }

    if pieces.len() == 1 {
        pieces.pop()
    } else {
        Some(Geometry::GeometryCollection(GeometryCollection(pieces)))
    }
}

/// Simple parts of a set of geometries, split by dimension.
#[derive(Default)]
struct Parts {
    points: Vec<Point<f64>>,
    lines: Vec<LineString<f64>>,
    polygons: Vec<Polygon<f64>>,
}

impl Parts {
    fn collect(&mut self, geometry: &Geometry<f64>) {
        match geometry {
            Geometry::Point(p) => self.push_point(*p),
            Geometry::MultiPoint(mp) => {
                for p in mp.iter() {
                    self.push_point(*p);
                }
            }
            Geometry::Line(line) => self.lines.push(LineString::new(vec![line.start, line.end])),
            Geometry::LineString(ls) => self.lines.push(ls.clone()),
            Geometry::MultiLineString(mls) => self.lines.extend(mls.iter().cloned()),
            Geometry::Polygon(p) => self.polygons.push(p.clone()),
            Geometry::MultiPolygon(mp) => self.polygons.extend(mp.iter().cloned()),
            Geometry::Rect(r) => self.polygons.push(r.to_polygon()),
            Geometry::Triangle(t) => self.polygons.push(t.to_polygon()),
            Geometry::GeometryCollection(gc) => {
                for g in gc.iter() {
                    self.collect(g);
                }
            }
        }
    }

    fn push_point(&mut self, point: Point<f64>) {
        if !self.points.contains(&point) {
            self.points.push(point);
        }
    }
}

/// Boolean union of all polygons, or `None` when there are none.
fn dissolve(polygons: Vec<Polygon<f64>>) -> Option<MultiPolygon<f64>> {
    let mut iter = polygons.into_iter();
    let first = iter.next()?;
    let mut acc = MultiPolygon::new(vec![first]);
    for polygon in iter {
        acc = acc.union(&MultiPolygon::new(vec![polygon]));
    }
    Some(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::{line_string, point, polygon, Area};

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Geometry<f64> {
        Geometry::Polygon(polygon![
            (x: x0, y: y0),
            (x: x1, y: y0),
            (x: x1, y: y1),
            (x: x0, y: y1),
            (x: x0, y: y0),
        ])
    }

    // ==================== GeometryKind ====================

    #[test]
    fn kind_matches_variant() {
        assert_eq!(
            GeometryKind::of(&Geometry::Point(point!(x: 1.0, y: 2.0))),
            GeometryKind::Point
        );
        assert_eq!(
            GeometryKind::of(&square(0.0, 0.0, 1.0, 1.0)),
            GeometryKind::Polygon
        );
        assert!(GeometryKind::Polygon.is_polygonal());
        assert!(!GeometryKind::MultiPoint.is_polygonal());
    }

    // ==================== representative_point ====================

    #[test]
    fn representative_point_of_segment_is_midpoint() {
        let line = Geometry::LineString(line_string![(x: 0.0, y: 0.0), (x: 4.0, y: 2.0)]);
        let p = representative_point(&line).unwrap();
        assert_relative_eq!(p.x(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(p.y(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn representative_point_of_square_is_center() {
        let p = representative_point(&square(0.0, 0.0, 2.0, 2.0)).unwrap();
        assert_relative_eq!(p.x(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.y(), 1.0, epsilon = 1e-12);
    }

    // ==================== coordinates ====================

    #[test]
    fn coordinates_include_closing_vertex() {
        let coords = coordinates(&square(0.0, 0.0, 1.0, 1.0));
        assert_eq!(coords.len(), 5);
        assert_eq!(coords.first(), coords.last());
    }

    #[test]
    fn coord_distance_is_euclidean() {
        let d = coord_distance(Coord { x: 0.0, y: 0.0 }, Coord { x: 3.0, y: 4.0 });
        assert_relative_eq!(d, 5.0, epsilon = 1e-12);
    }

    // ==================== union_all ====================

    #[test]
    fn union_of_nothing_is_none() {
        let empty: Vec<Geometry<f64>> = Vec::new();
        assert!(union_all(&empty).is_none());
    }

    #[test]
    fn union_collapses_repeated_points() {
        let geoms = vec![
            Geometry::Point(point!(x: 1.0, y: 1.0)),
            Geometry::Point(point!(x: 1.0, y: 1.0)),
            Geometry::Point(point!(x: 2.0, y: 2.0)),
        ];
        match union_all(&geoms) {
            Some(Geometry::MultiPoint(mp)) => assert_eq!(mp.0.len(), 2),
            other => panic!("expected multipoint, got {:?}", other),
        }
    }

    #[test]
    fn union_of_single_point_is_point() {
        let geoms = vec![Geometry::Point(point!(x: 1.0, y: 1.0))];
        assert_eq!(
            union_all(&geoms),
            Some(Geometry::Point(point!(x: 1.0, y: 1.0)))
        );
    }

    #[test]
    fn union_dissolves_overlapping_polygons() {
        let geoms = vec![square(0.0, 0.0, 2.0, 1.0), square(1.0, 0.0, 3.0, 1.0)];
        let union = union_all(&geoms).unwrap();
        assert_eq!(GeometryKind::of(&union), GeometryKind::Polygon);
        assert_relative_eq!(union.unsigned_area(), 3.0, epsilon = 1e-9);
    }

    #[test]
    fn union_keeps_disjoint_polygons_apart() {
        let geoms = vec![square(0.0, 0.0, 1.0, 1.0), square(5.0, 5.0, 6.0, 6.0)];
        let union = union_all(&geoms).unwrap();
        assert_eq!(GeometryKind::of(&union), GeometryKind::MultiPolygon);
        assert_relative_eq!(union.unsigned_area(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn union_of_mixed_dimensions_is_collection() {
        let geoms = vec![
            Geometry::Point(point!(x: 9.0, y: 9.0)),
            square(0.0, 0.0, 1.0, 1.0),
        ];
        match union_all(&geoms) {
            Some(Geometry::GeometryCollection(gc)) => assert_eq!(gc.0.len(), 2),
            other => panic!("expected collection, got {:?}", other),
        }
    }
}
