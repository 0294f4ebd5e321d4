mod border;
mod centroid_crs;
mod placement;

pub use border::{BorderProbe, PointOnBorder};
pub use centroid_crs::CentroidToCrs;
pub use placement::{LabelPlacement, LabelValue, PlacementMode};
