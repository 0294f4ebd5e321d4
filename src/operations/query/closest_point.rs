use crate::error::{GeometryError, Result};
use crate::geometry::{Geometry, Shape};
use crate::math::distance_2d::closest_point_on_segment;
use crate::math::Point2;

/// Result of a closest point query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestPointResult {
    /// The closest point on the geometry's boundary.
    pub point: Point2,
    /// The distance from the query point to the closest point.
    pub distance: f64,
    /// Index of the single-part constituent holding the closest point
    /// (always 0 for single-part geometries).
    pub part: usize,
}

/// Finds the closest point on a geometry's boundary to a given point.
///
/// Polygons are measured against their rings, so a query point inside a
/// polygon yields the distance to its nearest edge, never zero unless the
/// point lies on the outline.
pub struct ClosestPointOnBoundary<'a> {
    geometry: &'a Geometry,
    point: Point2,
}

impl<'a> ClosestPointOnBoundary<'a> {
    /// Creates a new `ClosestPointOnBoundary` query.
    ///
    /// `point` must already be in the geometry's spatial reference.
    #[must_use]
    pub fn new(geometry: &'a Geometry, point: Point2) -> Self {
        Self { geometry, point }
    }

    /// Executes the query.
    ///
    /// Among equidistant candidates the first in storage order wins.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::EmptyGeometry`] if the geometry has no vertices.
    pub fn execute(&self) -> Result<ClosestPointResult> {
        let mut best = Best::default();
        let p = &self.point;

        match self.geometry.shape() {
            Shape::Point(q) => best.offer(p, *q, 0),
            Shape::MultiPoint(pts) => {
                for (i, q) in pts.iter().enumerate() {
                    best.offer(p, *q, i);
                }
            }
            Shape::LineString(path) => best.offer_path(p, path, 0),
            Shape::MultiLineString(paths) => {
                for (i, path) in paths.iter().enumerate() {
                    best.offer_path(p, path, i);
                }
            }
            Shape::Polygon(rings) => {
                for ring in rings {
                    best.offer_path(p, ring, 0);
                }
            }
            Shape::MultiPolygon(polys) => {
                for (i, rings) in polys.iter().enumerate() {
                    for ring in rings {
                        best.offer_path(p, ring, i);
                    }
                }
            }
        }

        best.result.ok_or_else(|| GeometryError::EmptyGeometry.into())
    }
}

/// Closest point on the boundary of `geometry` to `point`.
///
/// # Errors
///
/// Returns [`GeometryError::EmptyGeometry`] if the geometry has no vertices.
pub fn closest_point_on_boundary(geometry: &Geometry, point: Point2) -> Result<ClosestPointResult> {
    ClosestPointOnBoundary::new(geometry, point).execute()
}

#[derive(Default)]
struct Best {
    result: Option<ClosestPointResult>,
}

impl Best {
    fn offer(&mut self, p: &Point2, candidate: Point2, part: usize) {
        let distance = (p - candidate).norm();
        if self.result.map_or(true, |r| distance < r.distance) {
            self.result = Some(ClosestPointResult {
                point: candidate,
                distance,
                part,
            });
        }
    }

    fn offer_path(&mut self, p: &Point2, path: &[Point2], part: usize) {
        match path {
            [] => {}
            [single] => self.offer(p, *single, part),
            _ => {
                for seg in path.windows(2) {
                    self.offer(p, closest_point_on_segment(p, &seg[0], &seg[1]), part);
                }
            }
        }
    }
}
