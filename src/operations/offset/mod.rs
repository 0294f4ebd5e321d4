mod offset_point;

pub use offset_point::{offset_point, OffsetPoint};
