use std::borrow::Cow;

use crate::error::{ExternalError, OperationError, Result};
use crate::geometry::{Geometry, Srid};
use crate::math::{Matrix3, Point2};

/// Reprojection primitive supplied by the host's spatial-reference subsystem.
///
/// Implementations must be deterministic. Geometries are only handed to
/// `transform` when their spatial reference differs from `target`.
pub trait Reproject {
    /// Returns `geometry` expressed in `target`.
    ///
    /// # Errors
    ///
    /// Returns an [`ExternalError`] if the pair of spatial references is not
    /// supported or the transformation fails.
    fn transform(&self, geometry: &Geometry, target: Srid)
        -> std::result::Result<Geometry, ExternalError>;
}

/// Returns `geometry` in `target`, borrowing it when no reprojection is
/// needed.
///
/// # Errors
///
/// Returns [`ExternalError::MissingTransform`] if the spatial references
/// differ and no transform is available, or whatever the transform reports.
pub fn reproject_if_needed<'g>(
    geometry: &'g Geometry,
    target: Srid,
    transform: Option<&dyn Reproject>,
) -> Result<Cow<'g, Geometry>> {
    if geometry.srid() == target {
        return Ok(Cow::Borrowed(geometry));
    }
    let transform = transform.ok_or(ExternalError::MissingTransform {
        from: geometry.srid(),
        to: target,
    })?;
    Ok(Cow::Owned(transform.transform(geometry, target)?))
}

/// Planar affine reprojection between one fixed pair of spatial references.
///
/// Applies a 3x3 homogeneous matrix from `from` to `to`, and its inverse in
/// the other direction. Suitable for local grid shifts and rotations between
/// projected systems.
#[derive(Debug, Clone)]
pub struct AffineReprojection {
    from: Srid,
    to: Srid,
    forward: Matrix3,
    inverse: Matrix3,
}

impl AffineReprojection {
    /// Creates a new `AffineReprojection`.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the matrix is not invertible.
    pub fn new(from: Srid, to: Srid, matrix: Matrix3) -> Result<Self> {
        let inverse = matrix.try_inverse().ok_or_else(|| {
            OperationError::InvalidInput(format!("affine matrix from {from} to {to} is singular"))
        })?;
        Ok(Self {
            from,
            to,
            forward: matrix,
            inverse,
        })
    }

    /// Pure translation by `(dx, dy)` from `from` to `to`.
    #[must_use]
    pub fn translation(from: Srid, to: Srid, dx: f64, dy: f64) -> Self {
        let forward = Matrix3::new_translation(&crate::math::Vector2::new(dx, dy));
        let inverse = Matrix3::new_translation(&crate::math::Vector2::new(-dx, -dy));
        Self {
            from,
            to,
            forward,
            inverse,
        }
    }
}

impl Reproject for AffineReprojection {
    fn transform(
        &self,
        geometry: &Geometry,
        target: Srid,
    ) -> std::result::Result<Geometry, ExternalError> {
        let source = geometry.srid();
        let matrix = if source == target {
            return Ok(geometry.clone());
        } else if source == self.from && target == self.to {
            &self.forward
        } else if source == self.to && target == self.from {
            &self.inverse
        } else {
            return Err(ExternalError::Reprojection {
                from: source,
                to: target,
                message: format!("transform only covers {} <-> {}", self.from, self.to),
            });
        };
        Ok(geometry.map_coords(target, |p| transform_point(matrix, p)))
    }
}

/// Transforms a point by a 3x3 homogeneous matrix.
fn transform_point(matrix: &Matrix3, point: &Point2) -> Point2 {
    let v = matrix * nalgebra::Vector3::new(point.x, point.y, 1.0);
    Point2::new(v.x / v.z, v.y / v.z)
}
