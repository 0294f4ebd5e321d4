mod closest_geometry;
mod sink;

pub use closest_geometry::ClosestGeometryJoin;
pub use sink::{
    JoinConfig, JoinRecord, JoinSummary, NoProgress, OutputSink, ProgressSink, SkippedQuery,
};
