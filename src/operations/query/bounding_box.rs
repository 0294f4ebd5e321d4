use crate::error::{GeometryError, Result};
use crate::geometry::Geometry;
use crate::math::Point2;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb2 {
    /// Minimum corner of the bounding box.
    pub min: Point2,
    /// Maximum corner of the bounding box.
    pub max: Point2,
}

impl Aabb2 {
    /// Creates a box from two corners, in any order.
    #[must_use]
    pub fn new(a: Point2, b: Point2) -> Self {
        Self {
            min: Point2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Smallest box containing every point, or `None` if there are none.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point2>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        Some(iter.fold(Self::new(first, first), |b, p| Self {
            min: Point2::new(b.min.x.min(p.x), b.min.y.min(p.y)),
            max: Point2::new(b.max.x.max(p.x), b.max.y.max(p.y)),
        }))
    }

    /// Returns `true` if the point lies inside or on the box.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Returns `true` if the two boxes overlap or touch.
    #[must_use]
    pub fn intersects(&self, other: &Aabb2) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Minimum Euclidean distance from `p` to any point of the box.
    ///
    /// Zero when `p` is inside or on the box, otherwise the distance to the
    /// nearest edge or corner. Never exceeds the distance from `p` to any
    /// geometry the box encloses.
    #[must_use]
    pub fn lower_bound_distance(&self, p: &Point2) -> f64 {
        let dx = (self.min.x - p.x).max(p.x - self.max.x).max(0.0);
        let dy = (self.min.y - p.y).max(p.y - self.max.y).max(0.0);
        (dx * dx + dy * dy).sqrt()
    }
}

/// Minimum possible distance from `point` to anything inside `bbox`.
#[must_use]
pub fn lower_bound_distance(point: &Point2, bbox: &Aabb2) -> f64 {
    bbox.lower_bound_distance(point)
}

/// Computes the axis-aligned bounding box of a geometry.
pub struct BoundingBox<'a> {
    geometry: &'a Geometry,
}

impl<'a> BoundingBox<'a> {
    /// Creates a new `BoundingBox` query.
    #[must_use]
    pub fn new(geometry: &'a Geometry) -> Self {
        Self { geometry }
    }

    /// Executes the query, returning the box.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::EmptyGeometry`] if the geometry has no vertices.
    pub fn execute(&self) -> Result<Aabb2> {
        self.geometry
            .bounding_box()
            .ok_or_else(|| GeometryError::EmptyGeometry.into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Shape, Srid};

    fn unit_box() -> Aabb2 {
        Aabb2::new(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0))
    }

    #[test]
    fn inside_and_on_edge_is_zero() {
        let b = unit_box();
        assert!(b.lower_bound_distance(&Point2::new(0.5, 0.5)).abs() < 1e-12);
        assert!(b.lower_bound_distance(&Point2::new(1.0, 0.3)).abs() < 1e-12);
    }

    #[test]
    fn edge_and_corner_distances() {
        let b = unit_box();
        assert!((b.lower_bound_distance(&Point2::new(3.0, 0.5)) - 2.0).abs() < 1e-12);
        assert!((b.lower_bound_distance(&Point2::new(-3.0, 0.5)) - 3.0).abs() < 1e-12);
        // Corner (1,1) to (4,5): 3-4-5 triangle.
        assert!((lower_bound_distance(&Point2::new(4.0, 5.0), &b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn shrinking_the_box_never_lowers_the_bound() {
        let outer = Aabb2::new(Point2::new(-2.0, -2.0), Point2::new(4.0, 4.0));
        let inner = Aabb2::new(Point2::new(1.0, 1.0), Point2::new(2.0, 2.0));
        for p in [
            Point2::new(10.0, 0.0),
            Point2::new(-7.0, 9.0),
            Point2::new(0.0, 0.0),
            Point2::new(3.0, -5.0),
        ] {
            assert!(inner.lower_bound_distance(&p) >= outer.lower_bound_distance(&p));
        }
    }

    #[test]
    fn intersects_touching_boxes() {
        let b = unit_box();
        let touching = Aabb2::new(Point2::new(1.0, 1.0), Point2::new(2.0, 2.0));
        let apart = Aabb2::new(Point2::new(1.5, 1.5), Point2::new(2.0, 2.0));
        assert!(b.intersects(&touching));
        assert!(!b.intersects(&apart));
        assert!(b.contains(&Point2::new(1.0, 1.0)));
    }

    #[test]
    fn bounding_box_of_geometry() {
        let g = Geometry::new(
            Shape::MultiPoint(vec![Point2::new(3.0, -1.0), Point2::new(-2.0, 4.0)]),
            Srid(3857),
        );
        let b = BoundingBox::new(&g).execute().unwrap();
        assert_eq!(b.min, Point2::new(-2.0, -1.0));
        assert_eq!(b.max, Point2::new(3.0, 4.0));
    }

    #[test]
    fn bounding_box_of_empty_geometry_fails() {
        let g = Geometry::new(Shape::LineString(vec![]), Srid(3857));
        assert!(BoundingBox::new(&g).execute().unwrap_err().is_empty_geometry());
    }
}
