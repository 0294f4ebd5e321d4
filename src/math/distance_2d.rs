use super::{Point2, TOLERANCE};

/// Returns the point of segment `a → b` closest to `p`.
///
/// The perpendicular projection of `p` onto the infinite line is clamped
/// to the segment's endpoints.
#[must_use]
pub fn closest_point_on_segment(p: &Point2, a: &Point2, b: &Point2) -> Point2 {
    let d = b - a;
    let len_sq = d.norm_squared();

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return *a;
    }

    let t = ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0);
    a + d * t
}

/// Returns the minimum distance from `p` to the segment `a → b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    (p - closest_point_on_segment(p, a, b)).norm()
}

/// Azimuth from `from` to `to` in degrees, clockwise from north (+y),
/// normalized to `[-180, 180)`.
///
/// Returns `None` when the two points coincide and the bearing is undefined.
#[must_use]
pub fn azimuth_deg(from: &Point2, to: &Point2) -> Option<f64> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dx.abs() < TOLERANCE && dy.abs() < TOLERANCE {
        return None;
    }
    let deg = dx.atan2(dy).to_degrees();
    // atan2 yields (-180, 180]; fold the upper bound onto -180.
    Some(if deg >= 180.0 { deg - 360.0 } else { deg })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    // ── closest_point_on_segment tests ──

    #[test]
    fn segment_perpendicular_projection() {
        // Point (1, 1) to segment (0,0)→(2,0). Closest at (1,0), dist = 1.
        let p = Point2::new(1.0, 1.0);
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(2.0, 0.0);
        let c = closest_point_on_segment(&p, &a, &b);
        assert!((c.x - 1.0).abs() < TOL && c.y.abs() < TOL, "c={c}");
        assert!((point_to_segment_dist(&p, &a, &b) - 1.0).abs() < TOL);
    }

    #[test]
    fn segment_endpoint_closest() {
        // Point (-1, 0) to segment (0,0)→(2,0). Closest at (0,0), dist = 1.
        let p = Point2::new(-1.0, 0.0);
        let c = closest_point_on_segment(&p, &Point2::new(0.0, 0.0), &Point2::new(2.0, 0.0));
        assert!(c.x.abs() < TOL && c.y.abs() < TOL, "c={c}");
    }

    #[test]
    fn segment_point_on_segment() {
        let p = Point2::new(1.5, 0.0);
        let d = point_to_segment_dist(&p, &Point2::new(0.0, 0.0), &Point2::new(2.0, 0.0));
        assert!(d.abs() < TOL, "d={d}");
    }

    #[test]
    fn segment_degenerate() {
        // Zero-length segment: distance is point-to-point.
        let a = Point2::new(0.0, 0.0);
        let d = point_to_segment_dist(&Point2::new(3.0, 4.0), &a, &a);
        assert!((d - 5.0).abs() < TOL, "d={d}");
    }

    // ── azimuth_deg tests ──

    #[test]
    fn azimuth_cardinal_directions() {
        let o = Point2::origin();
        let north = azimuth_deg(&o, &Point2::new(0.0, 1.0)).unwrap();
        let east = azimuth_deg(&o, &Point2::new(1.0, 0.0)).unwrap();
        let west = azimuth_deg(&o, &Point2::new(-1.0, 0.0)).unwrap();
        assert!(north.abs() < TOL, "north={north}");
        assert!((east - 90.0).abs() < TOL, "east={east}");
        assert!((west + 90.0).abs() < TOL, "west={west}");
    }

    #[test]
    fn azimuth_due_south_folds_to_minus_180() {
        let south = azimuth_deg(&Point2::origin(), &Point2::new(0.0, -1.0)).unwrap();
        assert!((south + 180.0).abs() < TOL, "south={south}");
    }

    #[test]
    fn azimuth_undefined_for_coincident_points() {
        let p = Point2::new(2.0, 3.0);
        assert!(azimuth_deg(&p, &p).is_none());
    }
}
