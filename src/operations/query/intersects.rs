use crate::geometry::{Geometry, Ring, Shape};
use crate::math::intersect_2d::paths_cross;
use crate::math::polygon_2d::point_in_polygon;
use crate::math::{Point2, TOLERANCE};

use super::closest_point::closest_point_on_boundary;

/// Tests whether two geometries share at least one point.
///
/// Both geometries must be in the same spatial reference. Covers touching
/// vertices, crossing segments and full containment in a polygon.
pub struct Intersects<'a> {
    a: &'a Geometry,
    b: &'a Geometry,
}

impl<'a> Intersects<'a> {
    /// Creates a new `Intersects` query.
    #[must_use]
    pub fn new(a: &'a Geometry, b: &'a Geometry) -> Self {
        Self { a, b }
    }

    /// Executes the test. Empty geometries intersect nothing.
    #[must_use]
    pub fn execute(&self) -> bool {
        let (Some(ba), Some(bb)) = (self.a.bounding_box(), self.b.bounding_box()) else {
            return false;
        };
        if !ba.intersects(&bb) {
            return false;
        }
        touches_or_contains(self.a, self.b)
            || touches_or_contains(self.b, self.a)
            || paths(self.a)
                .iter()
                .any(|pa| paths(self.b).iter().any(|pb| paths_cross(pa, pb)))
    }
}

/// Some vertex of `b` lies on `a`'s boundary or inside one of its polygons.
fn touches_or_contains(a: &Geometry, b: &Geometry) -> bool {
    let polys = polygons(a);
    b.vertices().any(|v| {
        closest_point_on_boundary(a, *v).is_ok_and(|r| r.distance < TOLERANCE)
            || polys.iter().any(|rings| point_in_polygon(v, rings))
    })
}

fn paths(g: &Geometry) -> Vec<&[Point2]> {
    match g.shape() {
        Shape::Point(_) | Shape::MultiPoint(_) => Vec::new(),
        Shape::LineString(path) => vec![path.as_slice()],
        Shape::MultiLineString(paths) | Shape::Polygon(paths) => {
            paths.iter().map(Vec::as_slice).collect()
        }
        Shape::MultiPolygon(polys) => polys.iter().flatten().map(Vec::as_slice).collect(),
    }
}

fn polygons(g: &Geometry) -> Vec<&[Ring]> {
    match g.shape() {
        Shape::Polygon(rings) => vec![rings.as_slice()],
        Shape::MultiPolygon(polys) => polys.iter().map(Vec::as_slice).collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Srid;

    const SRID: Srid = Srid(5514);

    fn square(x0: f64, y0: f64, size: f64) -> Geometry {
        Geometry::polygon(
            vec![vec![
                Point2::new(x0, y0),
                Point2::new(x0 + size, y0),
                Point2::new(x0 + size, y0 + size),
                Point2::new(x0, y0 + size),
            ]],
            SRID,
        )
    }

    #[test]
    fn point_inside_polygon() {
        let poly = square(0.0, 0.0, 10.0);
        let pt = Geometry::point(Point2::new(3.0, 3.0), SRID);
        assert!(Intersects::new(&poly, &pt).execute());
        assert!(Intersects::new(&pt, &poly).execute());
    }

    #[test]
    fn polygon_inside_polygon() {
        let outer = square(0.0, 0.0, 10.0);
        let inner = square(2.0, 2.0, 1.0);
        assert!(Intersects::new(&outer, &inner).execute());
        assert!(Intersects::new(&inner, &outer).execute());
    }

    #[test]
    fn crossing_lines() {
        let a = Geometry::line_string(vec![Point2::new(0.0, 0.0), Point2::new(4.0, 4.0)], SRID);
        let b = Geometry::line_string(vec![Point2::new(0.0, 4.0), Point2::new(4.0, 0.0)], SRID);
        assert!(Intersects::new(&a, &b).execute());
    }

    #[test]
    fn touching_squares_share_an_edge() {
        assert!(Intersects::new(&square(0.0, 0.0, 1.0), &square(1.0, 0.0, 1.0)).execute());
    }

    #[test]
    fn disjoint_geometries() {
        assert!(!Intersects::new(&square(0.0, 0.0, 1.0), &square(5.0, 5.0, 1.0)).execute());
        // Boxes overlap but shapes do not.
        let diag = Geometry::line_string(vec![Point2::new(0.0, 3.0), Point2::new(3.0, 0.0)], SRID);
        let corner = Geometry::point(Point2::new(0.5, 0.5), SRID);
        assert!(!Intersects::new(&diag, &corner).execute());
    }
}
