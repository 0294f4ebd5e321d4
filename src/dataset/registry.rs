use std::collections::HashMap;
use std::fmt;

use crate::error::{OperationError, Result};
use crate::operations::transform::Reproject;

use super::layer::FeatureSource;

type SharedSource = Box<dyn FeatureSource + Send + Sync>;
type SharedTransform = Box<dyn Reproject + Send + Sync>;

/// Read-only set of named layers handed to label placement queries.
///
/// Replaces a host-wide project lookup: callers build the registry once and
/// pass it explicitly to every query.
#[derive(Default)]
pub struct LayerRegistry {
    layers: HashMap<String, SharedSource>,
    transform: Option<SharedTransform>,
}

impl LayerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a layer under its own name, replacing any layer of the
    /// same name.
    pub fn add_layer<S>(&mut self, layer: S)
    where
        S: FeatureSource + Send + Sync + 'static,
    {
        self.layers.insert(layer.name().to_owned(), Box::new(layer));
    }

    /// Sets the transform used when a layer's spatial reference differs from
    /// the query geometry's.
    #[must_use]
    pub fn with_transform<T>(mut self, transform: T) -> Self
    where
        T: Reproject + Send + Sync + 'static,
    {
        self.transform = Some(Box::new(transform));
        self
    }

    /// Looks up a layer by name.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::LayerNotFound` if no layer has that name.
    pub fn layer(&self, name: &str) -> Result<&(dyn FeatureSource + Send + Sync)> {
        self.layers
            .get(name)
            .map(|layer| &**layer)
            .ok_or_else(|| OperationError::LayerNotFound(name.to_owned()).into())
    }

    /// The registered transform, if any.
    #[must_use]
    pub fn transform(&self) -> Option<&dyn Reproject> {
        self.transform.as_deref().map(|t| t as &dyn Reproject)
    }
}

impl fmt::Debug for LayerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.layers.keys().collect();
        names.sort();
        f.debug_struct("LayerRegistry")
            .field("layers", &names)
            .field("transform", &self.transform.is_some())
            .finish()
    }
}
