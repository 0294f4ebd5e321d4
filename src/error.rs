use thiserror::Error;

use crate::geometry::Srid;

/// Top-level error type for geoprox.
#[derive(Debug, Error)]
pub enum GeoproxError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    External(#[from] ExternalError),
}

/// Errors related to geometry classification and geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("unsupported geometry kind: type code {0}")]
    UnsupportedGeometryKind(u32),

    #[error("coordinates do not match geometry kind {kind}: {reason}")]
    ShapeMismatch { kind: &'static str, reason: String },

    #[error("geometry has no vertices")]
    EmptyGeometry,

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to the operations built on top of the geometry core.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("layer not found: {0}")]
    LayerNotFound(String),
}

/// Failures reported by collaborators supplied by the host (reprojection,
/// dataset iteration, output sinks). Surfaced unmodified, never retried.
#[derive(Debug, Error)]
pub enum ExternalError {
    #[error("reprojection from {from} to {to} failed: {message}")]
    Reprojection { from: Srid, to: Srid, message: String },

    #[error("no reprojection available from {from} to {to}")]
    MissingTransform { from: Srid, to: Srid },

    #[error("dataset read failed: {0}")]
    Dataset(String),

    #[error("output sink rejected record: {0}")]
    Sink(String),
}

impl GeoproxError {
    /// Returns `true` if this error only invalidates a single candidate
    /// geometry rather than the whole query.
    #[must_use]
    pub fn is_empty_geometry(&self) -> bool {
        matches!(self, Self::Geometry(GeometryError::EmptyGeometry))
    }
}

/// Convenience type alias for results using [`GeoproxError`].
pub type Result<T> = std::result::Result<T, GeoproxError>;
