use crate::error::Result;
use crate::geometry::{Geometry, Srid};
use crate::operations::query::Centroid;
use crate::operations::transform::{reproject_if_needed, Reproject};

/// Computes a geometry's centroid and expresses it in another spatial
/// reference, WGS 84 unless told otherwise.
pub struct CentroidToCrs<'a> {
    geometry: &'a Geometry,
    target: Srid,
}

impl<'a> CentroidToCrs<'a> {
    /// Creates a new `CentroidToCrs` query targeting [`Srid::WGS84`].
    #[must_use]
    pub fn new(geometry: &'a Geometry) -> Self {
        Self {
            geometry,
            target: Srid::WGS84,
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: Srid) -> Self {
        self.target = target;
        self
    }

    /// Executes the query. `transform` is only consulted when the spatial
    /// references differ.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::EmptyGeometry` for a geometry without
    /// vertices, or the transform's error unmodified.
    pub fn execute(&self, transform: &dyn Reproject) -> Result<Geometry> {
        let centroid = Centroid::new(self.geometry).execute()?;
        let point = Geometry::point(centroid, self.geometry.srid());
        Ok(reproject_if_needed(&point, self.target, Some(transform))?.into_owned())
    }
}
