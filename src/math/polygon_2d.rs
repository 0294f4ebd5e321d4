use super::Point2;

/// Computes the signed area of a ring (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise. The ring may be
/// given closed (first == last) or open; the closing edge contributes zero
/// in the first case.
#[must_use]
pub fn signed_area_2d(ring: &[Point2]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += ring[i].x * ring[j].y - ring[j].x * ring[i].y;
    }
    sum * 0.5
}

/// Returns the area-weighted centroid numerator of a ring together with its
/// signed area: `(Σ cx * a, Σ cy * a, a)` where `a` is the signed area.
///
/// Summing these over rings of consistent orientation yields the centroid of
/// a polygon with holes.
#[must_use]
pub fn ring_centroid_moments(ring: &[Point2]) -> (f64, f64, f64) {
    let n = ring.len();
    if n < 3 {
        return (0.0, 0.0, 0.0);
    }
    // Relative to the first vertex to limit cancellation on large coordinates.
    let origin = ring[0];
    let mut mx = 0.0;
    let mut my = 0.0;
    let mut area2 = 0.0;
    for i in 0..n {
        let p = ring[i] - origin;
        let q = ring[(i + 1) % n] - origin;
        let cross = p.x * q.y - q.x * p.y;
        area2 += cross;
        mx += (p.x + q.x) * cross;
        my += (p.y + q.y) * cross;
    }
    let area = area2 * 0.5;
    if area == 0.0 {
        return (0.0, 0.0, 0.0);
    }
    // Centroid relative to origin is (mx, my) / (6a); shift back and weight by a.
    let cx = mx / (6.0 * area) + origin.x;
    let cy = my / (6.0 * area) + origin.y;
    (cx * area, cy * area, area)
}

/// Point-in-ring test using the winding number algorithm.
///
/// Returns `true` if the point is inside the ring. Points exactly on the
/// boundary may fall on either side.
#[must_use]
pub fn point_in_ring(point: &Point2, ring: &[Point2]) -> bool {
    if ring.len() < 3 {
        return false;
    }
    winding_number_2d(point, ring) != 0
}

/// Point-in-polygon test: inside the outer ring and outside every hole.
#[must_use]
pub fn point_in_polygon(point: &Point2, rings: &[Vec<Point2>]) -> bool {
    let Some((outer, holes)) = rings.split_first() else {
        return false;
    };
    point_in_ring(point, outer) && !holes.iter().any(|h| point_in_ring(point, h))
}

/// Winding number of `point` with respect to the ring `verts`.
///
/// Non-zero => inside, zero => outside.
fn winding_number_2d(point: &Point2, verts: &[Point2]) -> i32 {
    let n = verts.len();
    let (px, py) = (point.x, point.y);
    let mut winding = 0i32;
    for i in 0..n {
        let (x0, y0) = (verts[i].x, verts[i].y);
        let (x1, y1) = (verts[(i + 1) % n].x, verts[(i + 1) % n].y);

        if y0 <= py {
            if y1 > py && cross_2d(x1 - x0, y1 - y0, px - x0, py - y0) > 0.0 {
                winding += 1;
            }
        } else if y1 <= py && cross_2d(x1 - x0, y1 - y0, px - x0, py - y0) < 0.0 {
            winding -= 1;
        }
    }
    winding
}

/// 2D cross product: `(ax * by - ay * bx)`.
#[inline]
fn cross_2d(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    ax * by - ay * bx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    fn square(x0: f64, y0: f64, size: f64) -> Vec<Point2> {
        vec![
            Point2::new(x0, y0),
            Point2::new(x0 + size, y0),
            Point2::new(x0 + size, y0 + size),
            Point2::new(x0, y0 + size),
            Point2::new(x0, y0),
        ]
    }

    #[test]
    fn signed_area_ccw_square() {
        let area = signed_area_2d(&square(0.0, 0.0, 1.0));
        assert!((area - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn signed_area_cw_square() {
        let mut pts = square(0.0, 0.0, 1.0);
        pts.reverse();
        assert!((signed_area_2d(&pts) + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn signed_area_degenerate() {
        assert!(signed_area_2d(&[Point2::new(0.0, 0.0)]).abs() < TOLERANCE);
        assert!(signed_area_2d(&[]).abs() < TOLERANCE);
    }

    #[test]
    fn centroid_moments_of_offset_square() {
        let (mx, my, a) = ring_centroid_moments(&square(10.0, 0.0, 10.0));
        assert!((a - 100.0).abs() < 1e-9);
        assert!((mx / a - 15.0).abs() < 1e-9);
        assert!((my / a - 5.0).abs() < 1e-9);
    }

    #[test]
    fn point_in_ring_inside_and_outside() {
        let ring = square(0.0, 0.0, 4.0);
        assert!(point_in_ring(&Point2::new(2.0, 2.0), &ring));
        assert!(!point_in_ring(&Point2::new(5.0, 2.0), &ring));
    }

    #[test]
    fn point_in_polygon_respects_holes() {
        let rings = vec![square(0.0, 0.0, 10.0), square(4.0, 4.0, 2.0)];
        assert!(point_in_polygon(&Point2::new(1.0, 1.0), &rings));
        assert!(!point_in_polygon(&Point2::new(5.0, 5.0), &rings));
        assert!(!point_in_polygon(&Point2::new(5.0, 5.0), &[]));
    }
}
