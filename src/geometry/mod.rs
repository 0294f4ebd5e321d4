mod kind;
mod raw;

pub use kind::GeometryKind;
pub use raw::{normalize, RawCoordinates, RawGeometry};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::math::Point2;
use crate::operations::query::Aabb2;

/// Spatial reference identifier (an EPSG-style code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Srid(pub u32);

impl Srid {
    /// WGS84 geographic coordinates.
    pub const WGS84: Srid = Srid(4326);
}

impl fmt::Display for Srid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.0)
    }
}

/// A closed sequence of vertices (first == last).
pub type Ring = Vec<Point2>;

/// Coordinates of a geometry, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Point(Point2),
    MultiPoint(Vec<Point2>),
    LineString(Vec<Point2>),
    MultiLineString(Vec<Vec<Point2>>),
    /// Outer ring first, then holes.
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
}

/// A planar geometry in a single spatial reference.
///
/// Every polygon ring is closed; [`Geometry::new`] closes open rings.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    shape: Shape,
    srid: Srid,
}

impl Geometry {
    /// Creates a geometry, closing any open polygon ring.
    #[must_use]
    pub fn new(mut shape: Shape, srid: Srid) -> Self {
        match &mut shape {
            Shape::Polygon(rings) => rings.iter_mut().for_each(close_ring),
            Shape::MultiPolygon(polys) => polys.iter_mut().flatten().for_each(close_ring),
            _ => {}
        }
        Self { shape, srid }
    }

    /// Creates a point geometry.
    #[must_use]
    pub fn point(point: Point2, srid: Srid) -> Self {
        Self::new(Shape::Point(point), srid)
    }

    /// Creates a line string geometry.
    #[must_use]
    pub fn line_string(points: Vec<Point2>, srid: Srid) -> Self {
        Self::new(Shape::LineString(points), srid)
    }

    /// Creates a polygon geometry from its outer ring and holes.
    #[must_use]
    pub fn polygon(rings: Vec<Ring>, srid: Srid) -> Self {
        Self::new(Shape::Polygon(rings), srid)
    }

    /// Returns the coordinates.
    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the spatial reference.
    #[must_use]
    pub fn srid(&self) -> Srid {
        self.srid
    }

    /// Returns the geometry kind.
    #[must_use]
    pub fn kind(&self) -> GeometryKind {
        match &self.shape {
            Shape::Point(_) => GeometryKind::Point,
            Shape::MultiPoint(_) => GeometryKind::MultiPoint,
            Shape::LineString(_) => GeometryKind::LineString,
            Shape::MultiLineString(_) => GeometryKind::MultiLineString,
            Shape::Polygon(_) => GeometryKind::Polygon,
            Shape::MultiPolygon(_) => GeometryKind::MultiPolygon,
        }
    }

    /// Iterates over every vertex in storage order.
    pub fn vertices(&self) -> Box<dyn Iterator<Item = &Point2> + '_> {
        match &self.shape {
            Shape::Point(p) => Box::new(std::iter::once(p)),
            Shape::MultiPoint(pts) | Shape::LineString(pts) => Box::new(pts.iter()),
            Shape::MultiLineString(paths) | Shape::Polygon(paths) => {
                Box::new(paths.iter().flatten())
            }
            Shape::MultiPolygon(polys) => Box::new(polys.iter().flatten().flatten()),
        }
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices().count()
    }

    /// Returns `true` if the geometry has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices().next().is_none()
    }

    /// Returns the bounding box, or `None` for an empty geometry.
    #[must_use]
    pub fn bounding_box(&self) -> Option<Aabb2> {
        Aabb2::from_points(self.vertices())
    }

    /// Decomposes a multi-part geometry into its single-part constituents.
    ///
    /// Single-part geometries yield a one-element vector containing a copy
    /// of themselves. Coordinates and spatial reference are unchanged.
    #[must_use]
    pub fn parts(&self) -> Vec<Geometry> {
        let srid = self.srid;
        match &self.shape {
            Shape::MultiPoint(pts) => pts.iter().map(|p| Self::point(*p, srid)).collect(),
            Shape::MultiLineString(paths) => paths
                .iter()
                .map(|p| Self::line_string(p.clone(), srid))
                .collect(),
            Shape::MultiPolygon(polys) => polys
                .iter()
                .map(|rings| Self::polygon(rings.clone(), srid))
                .collect(),
            Shape::Point(_) | Shape::LineString(_) | Shape::Polygon(_) => vec![self.clone()],
        }
    }

    /// Returns a copy with every vertex mapped through `f` and tagged `srid`.
    #[must_use]
    pub fn map_coords<F>(&self, srid: Srid, f: F) -> Geometry
    where
        F: Fn(&Point2) -> Point2,
    {
        let path = |pts: &Vec<Point2>| pts.iter().map(&f).collect::<Vec<_>>();
        let shape = match &self.shape {
            Shape::Point(p) => Shape::Point(f(p)),
            Shape::MultiPoint(pts) => Shape::MultiPoint(path(pts)),
            Shape::LineString(pts) => Shape::LineString(path(pts)),
            Shape::MultiLineString(paths) => Shape::MultiLineString(paths.iter().map(path).collect()),
            Shape::Polygon(rings) => Shape::Polygon(rings.iter().map(path).collect()),
            Shape::MultiPolygon(polys) => Shape::MultiPolygon(
                polys
                    .iter()
                    .map(|rings| rings.iter().map(path).collect())
                    .collect(),
            ),
        };
        Self::new(shape, srid)
    }
}

fn close_ring(ring: &mut Ring) {
    if let (Some(first), Some(last)) = (ring.first(), ring.last()) {
        if first != last {
            ring.push(*first);
        }
    }
}
