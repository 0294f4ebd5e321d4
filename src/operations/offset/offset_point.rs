use crate::error::{GeometryError, Result};
use crate::math::{Point2, TOLERANCE};

/// Extends the segment `origin → closest` beyond `closest` by a distance
/// along the same bearing and returns the moved endpoint.
///
/// A zero offset returns `closest` unchanged. A negative offset moves the
/// endpoint back toward (and possibly past) `origin`.
pub struct OffsetPoint {
    origin: Point2,
    closest: Point2,
    offset: f64,
}

impl OffsetPoint {
    /// Creates a new `OffsetPoint` operation.
    #[must_use]
    pub fn new(origin: Point2, closest: Point2, offset: f64) -> Self {
        Self {
            origin,
            closest,
            offset,
        }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if `origin` and `closest`
    /// coincide and the offset is non-zero.
    pub fn execute(&self) -> Result<Point2> {
        if self.offset == 0.0 {
            return Ok(self.closest);
        }
        let d = self.closest - self.origin;
        let len = d.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(self.closest + d * (self.offset / len))
    }
}

/// Moves `closest_point` outward along the bearing from `origin` by
/// `offset_distance`.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroVector`] if the bearing is undefined.
pub fn offset_point(origin: Point2, closest_point: Point2, offset_distance: f64) -> Result<Point2> {
    OffsetPoint::new(origin, closest_point, offset_distance).execute()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::GeoproxError;
    use approx::assert_relative_eq;

    #[test]
    fn zero_offset_is_identity() {
        let c = Point2::new(3.3, -7.1);
        assert_eq!(offset_point(Point2::new(1.0, 1.0), c, 0.0).unwrap(), c);
    }

    #[test]
    fn positive_offset_extends_the_ray() {
        let o = Point2::new(1.0, 2.0);
        let c = Point2::new(4.0, 6.0); // |OC| = 5
        let p = offset_point(o, c, 2.5).unwrap();
        assert_relative_eq!((p - o).norm(), 7.5, epsilon = 1e-12);
        // Same direction as O → C.
        let dir_oc = (c - o).normalize();
        let dir_op = (p - o).normalize();
        assert_relative_eq!(dir_oc.dot(&dir_op), 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.x, 5.5, epsilon = 1e-12);
        assert_relative_eq!(p.y, 8.0, epsilon = 1e-12);
    }

    #[test]
    fn negative_offset_moves_back_toward_origin() {
        let o = Point2::origin();
        let c = Point2::new(10.0, 0.0);
        let p = offset_point(o, c, -4.0).unwrap();
        assert_relative_eq!(p.x, 6.0, epsilon = 1e-12);
        let past = offset_point(o, c, -15.0).unwrap();
        assert_relative_eq!(past.x, -5.0, epsilon = 1e-12);
    }

    #[test]
    fn coincident_points_fail() {
        let p = Point2::new(2.0, 2.0);
        let err = offset_point(p, p, 1.0).unwrap_err();
        assert!(matches!(err, GeoproxError::Geometry(GeometryError::ZeroVector)));
        assert_eq!(OffsetPoint::new(p, p, 0.0).execute().unwrap(), p);
    }
}
