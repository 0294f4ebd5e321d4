use slotmap::SlotMap;

use crate::error::ExternalError;
use crate::geometry::{GeometryKind, Srid};
use crate::operations::query::Aabb2;

use super::feature::{Feature, FeatureId};

/// One item yielded by a [`FeatureSource`].
pub type FeatureItem<'a> = Result<(FeatureId, &'a Feature), ExternalError>;

/// Read-only, forward-only access to the features of a dataset.
///
/// Implemented by the host's data-source layer; [`FeatureLayer`] is the
/// in-memory implementation.
pub trait FeatureSource {
    /// Layer name.
    fn name(&self) -> &str;

    /// Spatial reference shared by the layer's geometries.
    fn srid(&self) -> Srid;

    /// Declared WKB geometry type code of the layer.
    fn wkb_type(&self) -> u32;

    /// Number of features, if known. Used for progress reporting only.
    fn feature_count(&self) -> Option<usize>;

    /// Iterates over the features in a stable order.
    fn features(&self) -> Box<dyn Iterator<Item = FeatureItem<'_>> + '_>;

    /// Iterates over the features whose bounding box intersects `bbox`.
    /// Features without vertices never match.
    fn features_in(&self, bbox: Aabb2) -> Box<dyn Iterator<Item = FeatureItem<'_>> + '_> {
        Box::new(self.features().filter(move |item| match item {
            Ok((_, feature)) => feature
                .geometry
                .bounding_box()
                .is_some_and(|b| b.intersects(&bbox)),
            Err(_) => true,
        }))
    }
}

/// In-memory layer owning its features.
///
/// Features are stored in an arena keyed by [`FeatureId`]; iteration
/// follows insertion order.
#[derive(Debug)]
pub struct FeatureLayer {
    name: String,
    srid: Srid,
    wkb_type: u32,
    features: SlotMap<FeatureId, Feature>,
}

impl FeatureLayer {
    /// Creates an empty layer declaring the given geometry kind.
    #[must_use]
    pub fn new(name: impl Into<String>, srid: Srid, kind: GeometryKind) -> Self {
        Self::with_wkb_type(name, srid, kind.wkb_type())
    }

    /// Creates an empty layer with a raw WKB type code, which may be one the
    /// nearest-point routines do not support.
    #[must_use]
    pub fn with_wkb_type(name: impl Into<String>, srid: Srid, wkb_type: u32) -> Self {
        Self {
            name: name.into(),
            srid,
            wkb_type,
            features: SlotMap::with_key(),
        }
    }

    /// Inserts a feature and returns its ID.
    pub fn add_feature(&mut self, feature: Feature) -> FeatureId {
        self.features.insert(feature)
    }

    /// Returns a feature by ID.
    #[must_use]
    pub fn feature(&self, id: FeatureId) -> Option<&Feature> {
        self.features.get(id)
    }

    /// Number of features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns `true` if the layer has no features.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl FeatureSource for FeatureLayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn srid(&self) -> Srid {
        self.srid
    }

    fn wkb_type(&self) -> u32 {
        self.wkb_type
    }

    fn feature_count(&self) -> Option<usize> {
        Some(self.features.len())
    }

    fn features(&self) -> Box<dyn Iterator<Item = FeatureItem<'_>> + '_> {
        Box::new(self.features.iter().map(Ok::<_, ExternalError>))
    }
}
