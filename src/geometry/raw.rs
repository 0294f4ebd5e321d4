use crate::error::{GeometryError, Result};
use crate::math::Point2;

use super::{Geometry, GeometryKind, Shape, Srid};

/// Nested coordinate arrays as delivered by a host data source.
///
/// The nesting depth must fit the type code: `Sequence` for points, line
/// strings and multi-points, `Rings` for polygons and multi-line strings,
/// `Polygons` for multi-polygons.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCoordinates {
    Sequence(Vec<[f64; 2]>),
    Rings(Vec<Vec<[f64; 2]>>),
    Polygons(Vec<Vec<Vec<[f64; 2]>>>),
}

/// An unclassified geometry: a WKB type code, a spatial reference and
/// coordinate arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct RawGeometry {
    pub type_code: u32,
    pub srid: Srid,
    pub coordinates: RawCoordinates,
}

impl RawGeometry {
    /// Creates a raw geometry.
    #[must_use]
    pub fn new(type_code: u32, srid: Srid, coordinates: RawCoordinates) -> Self {
        Self {
            type_code,
            srid,
            coordinates,
        }
    }
}

/// Classifies a raw geometry into one of the six supported kinds.
///
/// Coordinates and spatial reference are carried over unchanged; open
/// polygon rings are closed.
///
/// # Errors
///
/// - [`GeometryError::UnsupportedGeometryKind`] if the type code is not one
///   of the six supported kinds.
/// - [`GeometryError::ShapeMismatch`] if the coordinate nesting does not fit
///   the type code.
/// - [`GeometryError::EmptyGeometry`] for a point without coordinates.
pub fn normalize(raw: &RawGeometry) -> Result<Geometry> {
    let kind = GeometryKind::from_wkb_type(raw.type_code)?;

    let shape = match (kind, &raw.coordinates) {
        (GeometryKind::Point, RawCoordinates::Sequence(seq)) => match seq.as_slice() {
            [] => return Err(GeometryError::EmptyGeometry.into()),
            [c] => Shape::Point(point(*c)),
            _ => return Err(mismatch(kind, format!("{} coordinates for a point", seq.len()))),
        },
        (GeometryKind::MultiPoint, RawCoordinates::Sequence(seq)) => Shape::MultiPoint(path(seq)),
        (GeometryKind::LineString, RawCoordinates::Sequence(seq)) => Shape::LineString(path(seq)),
        (GeometryKind::MultiLineString, RawCoordinates::Rings(paths)) => {
            Shape::MultiLineString(paths.iter().map(|p| path(p)).collect())
        }
        (GeometryKind::Polygon, RawCoordinates::Rings(rings)) => {
            Shape::Polygon(rings.iter().map(|r| path(r)).collect())
        }
        (GeometryKind::MultiPolygon, RawCoordinates::Polygons(polys)) => Shape::MultiPolygon(
            polys
                .iter()
                .map(|rings| rings.iter().map(|r| path(r)).collect())
                .collect(),
        ),
        (_, coords) => {
            return Err(mismatch(
                kind,
                format!("unexpected nesting depth {}", nesting_depth(coords)),
            ))
        }
    };

    Ok(Geometry::new(shape, raw.srid))
}

fn point(c: [f64; 2]) -> Point2 {
    Point2::new(c[0], c[1])
}

fn path(seq: &[[f64; 2]]) -> Vec<Point2> {
    seq.iter().copied().map(point).collect()
}

fn nesting_depth(coords: &RawCoordinates) -> u8 {
    match coords {
        RawCoordinates::Sequence(_) => 1,
        RawCoordinates::Rings(_) => 2,
        RawCoordinates::Polygons(_) => 3,
    }
}

fn mismatch(kind: GeometryKind, reason: String) -> crate::error::GeoproxError {
    GeometryError::ShapeMismatch {
        kind: kind.name(),
        reason,
    }
    .into()
}
