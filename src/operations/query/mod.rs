mod bounding_box;
mod centroid;
mod closest_point;
mod intersects;
mod nearest;
mod sector;

pub use bounding_box::{lower_bound_distance, Aabb2, BoundingBox};
pub use centroid::Centroid;
pub use closest_point::{closest_point_on_boundary, ClosestPointOnBoundary, ClosestPointResult};
pub use intersects::Intersects;
pub use nearest::{find_nearest, CandidateIndex, FindNearest, NearestMatch, NearestResult};
pub use sector::{classify_sector, ClassifySector, Sector, SectorScheme};
