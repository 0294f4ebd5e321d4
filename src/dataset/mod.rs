mod feature;
mod layer;
mod registry;

pub use feature::{AttributeValue, Feature, FeatureId};
pub use layer::{FeatureItem, FeatureLayer, FeatureSource};
pub use registry::LayerRegistry;
