use std::fmt;

use crate::math::distance_2d::azimuth_deg;
use crate::math::Point2;

/// Compass sector of a neighbouring boundary, as an integer label code.
///
/// Azimuths are measured clockwise from north, so `North` covers bearings
/// around 0°, `East` around 90°, `South` around ±180° and `West` around -90°.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Sector {
    /// Origin and closest point coincide; the bearing is undefined.
    Degenerate = 0,
    North = 1,
    West = 3,
    /// No neighbouring geometry was found.
    NoNeighbor = 4,
    East = 5,
    South = 7,
}

impl Sector {
    /// Integer label code.
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Maps an azimuth in degrees to a sector under `scheme`.
    ///
    /// Values outside `[-180, 180)` are wrapped into that range first. A
    /// NaN or infinite azimuth has no bearing and yields `Degenerate`.
    #[must_use]
    pub fn from_azimuth(azimuth: f64, scheme: SectorScheme) -> Self {
        if !azimuth.is_finite() {
            return Self::Degenerate;
        }
        let a = (azimuth + 180.0).rem_euclid(360.0) - 180.0;
        match scheme {
            SectorScheme::Compatible => {
                if a < -135.0 {
                    Self::South
                } else if a < -45.0 {
                    Self::West
                } else {
                    // Historical `>= -45 or < 45` branch: catches every
                    // remaining bearing.
                    Self::North
                }
            }
            SectorScheme::Quadrant => {
                if a < -135.0 {
                    Self::South
                } else if a < -45.0 {
                    Self::West
                } else if a < 45.0 {
                    Self::North
                } else if a < 135.0 {
                    Self::East
                } else {
                    Self::South
                }
            }
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// How azimuths are partitioned into sectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SectorScheme {
    /// The label expressions' historical mapping: `[-180,-135) → 7`,
    /// `[-135,-45) → 3`, everything else `→ 1`. Sector 5 is never produced.
    #[default]
    Compatible,
    /// Four 90° wedges: `[-180,-135) → 7`, `[-135,-45) → 3`, `[-45,45) → 1`,
    /// `[45,135) → 5`, `[135,180) → 7`.
    Quadrant,
}

/// Classifies the bearing from an origin to its closest boundary point.
pub struct ClassifySector {
    origin: Point2,
    closest: Point2,
    scheme: SectorScheme,
}

impl ClassifySector {
    /// Creates a new `ClassifySector` query using [`SectorScheme::Compatible`].
    #[must_use]
    pub fn new(origin: Point2, closest: Point2) -> Self {
        Self {
            origin,
            closest,
            scheme: SectorScheme::default(),
        }
    }

    /// Selects the azimuth partition.
    #[must_use]
    pub fn with_scheme(mut self, scheme: SectorScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Azimuth from origin to closest point in `[-180, 180)`, or `None` if
    /// the two coincide.
    #[must_use]
    pub fn azimuth(&self) -> Option<f64> {
        azimuth_deg(&self.origin, &self.closest)
    }

    /// Executes the classification. Returns [`Sector::Degenerate`] when the
    /// origin coincides with the closest point.
    #[must_use]
    pub fn execute(&self) -> Sector {
        self.azimuth()
            .map_or(Sector::Degenerate, |a| Sector::from_azimuth(a, self.scheme))
    }
}

/// Sector of the bearing from `origin` to `closest_point` under
/// [`SectorScheme::Compatible`].
#[must_use]
pub fn classify_sector(origin: Point2, closest_point: Point2) -> Sector {
    ClassifySector::new(origin, closest_point).execute()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Sector; 4] = [Sector::North, Sector::West, Sector::East, Sector::South];

    #[test]
    fn quadrant_boundaries_are_half_open() {
        let q = SectorScheme::Quadrant;
        assert_eq!(Sector::from_azimuth(-180.0, q), Sector::South);
        assert_eq!(Sector::from_azimuth(-135.0, q), Sector::West);
        assert_eq!(Sector::from_azimuth(-45.0, q), Sector::North);
        assert_eq!(Sector::from_azimuth(45.0, q), Sector::East);
        assert_eq!(Sector::from_azimuth(135.0, q), Sector::South);
        assert_eq!(Sector::from_azimuth(179.999, q), Sector::South);
    }

    #[test]
    fn compatible_boundaries() {
        let c = SectorScheme::Compatible;
        assert_eq!(Sector::from_azimuth(-180.0, c), Sector::South);
        assert_eq!(Sector::from_azimuth(-135.0001, c), Sector::South);
        assert_eq!(Sector::from_azimuth(-135.0, c), Sector::West);
        assert_eq!(Sector::from_azimuth(-45.0, c), Sector::North);
        assert_eq!(Sector::from_azimuth(90.0, c), Sector::North);
        assert_eq!(Sector::from_azimuth(170.0, c), Sector::North);
    }

    #[test]
    fn total_over_the_circle() {
        for scheme in [SectorScheme::Compatible, SectorScheme::Quadrant] {
            for tenth in -1800..1800 {
                let s = Sector::from_azimuth(f64::from(tenth) / 10.0, scheme);
                assert!(ALL.contains(&s), "{tenth} -> {s:?}");
            }
        }
    }

    #[test]
    fn out_of_range_azimuths_wrap() {
        let q = SectorScheme::Quadrant;
        assert_eq!(Sector::from_azimuth(180.0, q), Sector::South);
        assert_eq!(Sector::from_azimuth(270.0, q), Sector::West);
        assert_eq!(Sector::from_azimuth(-270.0, q), Sector::East);
    }

    #[test]
    fn classify_due_east() {
        let origin = Point2::origin();
        let closest = Point2::new(10.0, 0.0);
        assert_eq!(classify_sector(origin, closest), Sector::North);
        let quadrant = ClassifySector::new(origin, closest).with_scheme(SectorScheme::Quadrant);
        assert_eq!(quadrant.execute(), Sector::East);
        assert!((quadrant.azimuth().unwrap_or(f64::NAN) - 90.0).abs() < 1e-10);
    }

    #[test]
    fn classify_west_and_south() {
        let o = Point2::new(5.0, 5.0);
        assert_eq!(classify_sector(o, Point2::new(0.0, 5.0)), Sector::West);
        assert_eq!(classify_sector(o, Point2::new(5.0, 0.0)), Sector::South);
        assert_eq!(classify_sector(o, Point2::new(5.0, 9.0)), Sector::North);
    }

    #[test]
    fn non_finite_azimuth_is_degenerate() {
        for scheme in [SectorScheme::Compatible, SectorScheme::Quadrant] {
            for az in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
                assert_eq!(Sector::from_azimuth(az, scheme), Sector::Degenerate);
            }
        }
    }

    #[test]
    fn coincident_points_are_degenerate() {
        let p = Point2::new(1.0, 1.0);
        assert_eq!(classify_sector(p, p), Sector::Degenerate);
        assert_eq!(Sector::Degenerate.code(), 0);
        assert_eq!(Sector::NoNeighbor.code(), 4);
    }
}
