use std::fmt;

use crate::error::GeometryError;

/// The six geometry kinds the nearest-point routines operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
}

/// EWKB flag bits carried in the high byte of a type code.
const EWKB_FLAGS: u32 = 0x8000_0000 | 0x4000_0000 | 0x2000_0000;

impl GeometryKind {
    /// Classifies a WKB type code.
    ///
    /// Z, M and ZM variants (ISO `+1000/+2000/+3000`) and EWKB flag bits map
    /// to their planar kind.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::UnsupportedGeometryKind`] for unknown codes,
    /// geometry collections and curved types.
    pub fn from_wkb_type(code: u32) -> Result<Self, GeometryError> {
        let plain = code & !EWKB_FLAGS;
        if plain / 1000 > 3 {
            return Err(GeometryError::UnsupportedGeometryKind(code));
        }
        match plain % 1000 {
            1 => Ok(Self::Point),
            2 => Ok(Self::LineString),
            3 => Ok(Self::Polygon),
            4 => Ok(Self::MultiPoint),
            5 => Ok(Self::MultiLineString),
            6 => Ok(Self::MultiPolygon),
            _ => Err(GeometryError::UnsupportedGeometryKind(code)),
        }
    }

    /// Returns the plain 2D WKB type code of this kind.
    #[must_use]
    pub fn wkb_type(self) -> u32 {
        match self {
            Self::Point => 1,
            Self::LineString => 2,
            Self::Polygon => 3,
            Self::MultiPoint => 4,
            Self::MultiLineString => 5,
            Self::MultiPolygon => 6,
        }
    }

    /// Returns the single-part kind of a multi-part kind, or `self`.
    #[must_use]
    pub fn single(self) -> Self {
        match self {
            Self::Point | Self::MultiPoint => Self::Point,
            Self::LineString | Self::MultiLineString => Self::LineString,
            Self::Polygon | Self::MultiPolygon => Self::Polygon,
        }
    }

    /// Topological dimension: 0 for points, 1 for lines, 2 for polygons.
    #[must_use]
    pub fn dimension(self) -> u8 {
        match self.single() {
            Self::Point => 0,
            Self::LineString => 1,
            _ => 2,
        }
    }

    /// Returns the kind's name as used in error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::MultiPoint => "MultiPoint",
            Self::LineString => "LineString",
            Self::MultiLineString => "MultiLineString",
            Self::Polygon => "Polygon",
            Self::MultiPolygon => "MultiPolygon",
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
