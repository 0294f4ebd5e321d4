use tracing::trace;

use crate::dataset::{FeatureId, LayerRegistry};
use crate::error::Result;
use crate::geometry::Geometry;
use crate::math::Point2;
use crate::operations::query::{BoundingBox, Centroid, ClosestPointOnBoundary, Intersects};
use crate::operations::transform::reproject_if_needed;

/// Outcome of probing a neighbouring layer from a feature's centroid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BorderProbe {
    /// A neighbour was found. `origin` is the feature centroid and
    /// `closest` the nearest point on the neighbour's boundary, both in the
    /// feature's spatial reference.
    Found {
        neighbor: FeatureId,
        origin: Point2,
        closest: Point2,
        distance: f64,
    },
    /// No feature of the layer overlaps the feature's bounding box.
    NoNeighbor { centroid: Point2 },
}

/// Finds the point on a neighbouring feature's boundary closest to a
/// feature's centroid.
///
/// The neighbour is the first feature of the named layer whose bounding box
/// overlaps the feature's. If the neighbour has several parts, the first
/// part touching the feature is measured; otherwise the whole neighbour is.
pub struct PointOnBorder<'a> {
    geometry: &'a Geometry,
    layer: &'a str,
}

impl<'a> PointOnBorder<'a> {
    /// Creates a new `PointOnBorder` query against the layer named `layer`.
    #[must_use]
    pub fn new(geometry: &'a Geometry, layer: &'a str) -> Self {
        Self { geometry, layer }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::LayerNotFound` if the registry has no such
    /// layer, `GeometryError::EmptyGeometry` if the feature has no
    /// vertices, and dataset or reprojection errors unmodified.
    pub fn execute(&self, registry: &LayerRegistry) -> Result<BorderProbe> {
        let layer = registry.layer(self.layer)?;
        let bbox = BoundingBox::new(self.geometry).execute()?;
        let origin = Centroid::new(self.geometry).execute()?;
        let srid = self.geometry.srid();

        let features = if layer.srid() == srid {
            layer.features_in(bbox)
        } else {
            layer.features()
        };

        for item in features {
            let (id, feature) = item?;
            let neighbor = reproject_if_needed(&feature.geometry, srid, registry.transform())?;
            if !neighbor.bounding_box().is_some_and(|b| b.intersects(&bbox)) {
                continue;
            }

            let target = touching_part(&neighbor, self.geometry);
            let closest = ClosestPointOnBoundary::new(&target, origin).execute()?;
            trace!(layer = self.layer, ?id, distance = closest.distance, "border point found");
            return Ok(BorderProbe::Found {
                neighbor: id,
                origin,
                closest: closest.point,
                distance: closest.distance,
            });
        }

        Ok(BorderProbe::NoNeighbor { centroid: origin })
    }
}

/// First part of `neighbor` that intersects `geometry`, or the whole
/// neighbour when none does.
fn touching_part(neighbor: &Geometry, geometry: &Geometry) -> Geometry {
    neighbor
        .parts()
        .into_iter()
        .find(|part| Intersects::new(part, geometry).execute())
        .unwrap_or_else(|| neighbor.clone())
}
