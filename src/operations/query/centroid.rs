use crate::error::{GeometryError, Result};
use crate::geometry::{Geometry, Shape};
use crate::math::polygon_2d::ring_centroid_moments;
use crate::math::Point2;

/// Computes the centroid of a geometry.
///
/// Polygons use the area-weighted centroid (holes subtract), lines the
/// length-weighted centroid of their segments, points the mean position.
/// A polygon with zero area falls back to the centroid of its rings as
/// lines, and a line with zero length to the mean of its vertices.
pub struct Centroid<'a> {
    geometry: &'a Geometry,
}

impl<'a> Centroid<'a> {
    /// Creates a new `Centroid` query.
    #[must_use]
    pub fn new(geometry: &'a Geometry) -> Self {
        Self { geometry }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::EmptyGeometry`] if the geometry has no vertices.
    pub fn execute(&self) -> Result<Point2> {
        let polygons: Vec<&[Vec<Point2>]> = match self.geometry.shape() {
            Shape::Polygon(rings) => vec![rings.as_slice()],
            Shape::MultiPolygon(polys) => polys.iter().map(Vec::as_slice).collect(),
            _ => Vec::new(),
        };
        if let Some(c) = area_centroid(&polygons) {
            return Ok(c);
        }

        let paths: Vec<&[Point2]> = match self.geometry.shape() {
            Shape::LineString(path) => vec![path.as_slice()],
            Shape::MultiLineString(paths) => paths.iter().map(Vec::as_slice).collect(),
            Shape::Polygon(_) | Shape::MultiPolygon(_) => {
                polygons.iter().flat_map(|rings| rings.iter().map(Vec::as_slice)).collect()
            }
            Shape::Point(_) | Shape::MultiPoint(_) => Vec::new(),
        };
        if let Some(c) = length_centroid(&paths) {
            return Ok(c);
        }

        mean_point(self.geometry.vertices()).ok_or_else(|| GeometryError::EmptyGeometry.into())
    }
}

fn area_centroid(polygons: &[&[Vec<Point2>]]) -> Option<Point2> {
    let mut mx = 0.0;
    let mut my = 0.0;
    let mut area = 0.0;
    for rings in polygons {
        let Some((outer, holes)) = rings.split_first() else {
            continue;
        };
        // Normalize orientation: outer counts positive, holes negative.
        let (ox, oy, oa) = ring_centroid_moments(outer);
        let sign = if oa < 0.0 { -1.0 } else { 1.0 };
        mx += sign * ox;
        my += sign * oy;
        area += sign * oa;
        for hole in holes {
            let (hx, hy, ha) = ring_centroid_moments(hole);
            let sign = if ha < 0.0 { 1.0 } else { -1.0 };
            mx += sign * hx;
            my += sign * hy;
            area += sign * ha;
        }
    }
    (area.abs() > f64::EPSILON).then(|| Point2::new(mx / area, my / area))
}

fn length_centroid(paths: &[&[Point2]]) -> Option<Point2> {
    let mut sx = 0.0;
    let mut sy = 0.0;
    let mut total = 0.0;
    for path in paths {
        for seg in path.windows(2) {
            let len = (seg[1] - seg[0]).norm();
            let mid = nalgebra::center(&seg[0], &seg[1]);
            sx += mid.x * len;
            sy += mid.y * len;
            total += len;
        }
    }
    (total > f64::EPSILON).then(|| Point2::new(sx / total, sy / total))
}

fn mean_point<'a>(points: impl Iterator<Item = &'a Point2>) -> Option<Point2> {
    let (sum, n) = points.fold((crate::math::Vector2::zeros(), 0u32), |(s, n), p| {
        (s + p.coords, n + 1)
    });
    (n > 0).then(|| Point2::from(sum / f64::from(n)))
}
