pub mod dataset;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;

pub use error::{GeoproxError, Result};
pub use operations::offset::offset_point;
pub use operations::query::{
    classify_sector, closest_point_on_boundary, find_nearest, lower_bound_distance,
};
