use tracing::debug;

use crate::dataset::LayerRegistry;
use crate::error::{GeometryError, GeoproxError, Result};
use crate::geometry::Geometry;
use crate::operations::offset::OffsetPoint;
use crate::operations::query::{ClassifySector, Sector, SectorScheme};

use super::border::{BorderProbe, PointOnBorder};

/// What a label placement computes from the border probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacementMode {
    /// Compass sector of the nearest border, for label alignment.
    Sector(SectorScheme),
    /// Anchor point pushed past the nearest border by this distance.
    OffsetPoint(f64),
}

/// Value handed back to the labelling engine.
#[derive(Debug, Clone, PartialEq)]
pub enum LabelValue {
    Sector(Sector),
    /// Point geometry in the feature's spatial reference.
    Point(Geometry),
}

/// Places a feature's label relative to the nearest border of a
/// neighbouring layer.
pub struct LabelPlacement<'a> {
    geometry: &'a Geometry,
    layer: &'a str,
    mode: PlacementMode,
}

impl<'a> LabelPlacement<'a> {
    /// Creates a new `LabelPlacement`.
    #[must_use]
    pub fn new(geometry: &'a Geometry, layer: &'a str, mode: PlacementMode) -> Self {
        Self {
            geometry,
            layer,
            mode,
        }
    }

    /// Sector of the nearest border of `layer`, or [`Sector::NoNeighbor`]
    /// when the layer has no feature near `geometry`.
    #[must_use]
    pub fn sector(geometry: &'a Geometry, layer: &'a str, scheme: SectorScheme) -> Self {
        Self::new(geometry, layer, PlacementMode::Sector(scheme))
    }

    /// Nearest border point of `layer` moved outward by `offset`, or the
    /// feature centroid when the layer has no feature near `geometry`.
    #[must_use]
    pub fn offset_point(geometry: &'a Geometry, layer: &'a str, offset: f64) -> Self {
        Self::new(geometry, layer, PlacementMode::OffsetPoint(offset))
    }

    /// Executes the placement.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`PointOnBorder::execute`].
    pub fn execute(&self, registry: &LayerRegistry) -> Result<LabelValue> {
        let probe = PointOnBorder::new(self.geometry, self.layer).execute(registry)?;
        let srid = self.geometry.srid();

        let value = match (self.mode, probe) {
            (PlacementMode::Sector(_), BorderProbe::NoNeighbor { .. }) => {
                LabelValue::Sector(Sector::NoNeighbor)
            }
            (PlacementMode::Sector(scheme), BorderProbe::Found { origin, closest, .. }) => {
                LabelValue::Sector(ClassifySector::new(origin, closest).with_scheme(scheme).execute())
            }
            (PlacementMode::OffsetPoint(_), BorderProbe::NoNeighbor { centroid }) => {
                LabelValue::Point(Geometry::point(centroid, srid))
            }
            (PlacementMode::OffsetPoint(offset), BorderProbe::Found { origin, closest, .. }) => {
                let point = match OffsetPoint::new(origin, closest, offset).execute() {
                    Ok(p) => p,
                    Err(GeoproxError::Geometry(GeometryError::ZeroVector)) => {
                        debug!(layer = self.layer, "centroid lies on the border, not offsetting");
                        closest
                    }
                    Err(e) => return Err(e),
                };
                LabelValue::Point(Geometry::point(point, srid))
            }
        };
        Ok(value)
    }
}
