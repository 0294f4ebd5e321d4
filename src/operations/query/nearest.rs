use std::borrow::Cow;

use tracing::{debug, trace};

use crate::dataset::{Feature, FeatureId, FeatureSource};
use crate::error::Result;
use crate::geometry::{Geometry, Srid};
use crate::math::Point2;
use crate::operations::transform::{reproject_if_needed, Reproject};

use super::bounding_box::Aabb2;
use super::closest_point::closest_point_on_boundary;

/// The winning candidate of a nearest search.
#[derive(Debug, Clone, Copy)]
pub struct NearestMatch<'a> {
    /// ID of the winning feature in its layer.
    pub feature_id: FeatureId,
    /// The winning feature, as stored in its layer.
    pub feature: &'a Feature,
    /// Closest point on the feature's boundary, in the query's spatial reference.
    pub point: Point2,
    /// Distance from the query point to `point`.
    pub distance: f64,
}

/// Outcome of a nearest search.
#[derive(Debug, Clone, Copy)]
pub enum NearestResult<'a> {
    Found(NearestMatch<'a>),
    /// The candidate set was empty or held no usable geometry.
    NoCandidateFound,
}

impl<'a> NearestResult<'a> {
    /// Returns the match, if any.
    #[must_use]
    pub fn found(&self) -> Option<&NearestMatch<'a>> {
        match self {
            Self::Found(m) => Some(m),
            Self::NoCandidateFound => None,
        }
    }

    /// Returns `true` if a candidate was found.
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

struct PreparedCandidate<'a> {
    id: FeatureId,
    feature: &'a Feature,
    geometry: Cow<'a, Geometry>,
    bbox: Aabb2,
}

/// Candidates of one dataset, reprojected into a common spatial reference
/// with their bounding boxes cached.
///
/// Built once and queried for many points; immutable and shareable across
/// threads once built.
pub struct CandidateIndex<'a> {
    srid: Srid,
    candidates: Vec<PreparedCandidate<'a>>,
}

impl<'a> CandidateIndex<'a> {
    /// Reads every feature of `source`, reprojecting geometries whose
    /// spatial reference differs from `srid`. Features without vertices
    /// are left out.
    ///
    /// # Errors
    ///
    /// Returns the dataset's or the transform's error unmodified, or
    /// `ExternalError::MissingTransform` if a reprojection is needed and
    /// `transform` is `None`.
    pub fn build<S>(source: &'a S, srid: Srid, transform: Option<&dyn Reproject>) -> Result<Self>
    where
        S: FeatureSource + ?Sized,
    {
        let mut candidates = Vec::with_capacity(source.feature_count().unwrap_or(0));
        let mut dropped = 0usize;
        let mut reprojected = 0usize;

        for item in source.features() {
            let (id, feature) = item?;
            let geometry = reproject_if_needed(&feature.geometry, srid, transform)?;
            if matches!(geometry, Cow::Owned(_)) {
                reprojected += 1;
            }
            let Some(bbox) = geometry.bounding_box() else {
                trace!(layer = source.name(), ?id, "skipping candidate without vertices");
                dropped += 1;
                continue;
            };
            candidates.push(PreparedCandidate {
                id,
                feature,
                geometry,
                bbox,
            });
        }

        debug!(
            layer = source.name(),
            %srid,
            candidates = candidates.len(),
            reprojected,
            dropped,
            "candidate index built"
        );

        Ok(Self { srid, candidates })
    }

    /// Spatial reference of the indexed geometries.
    #[must_use]
    pub fn srid(&self) -> Srid {
        self.srid
    }

    /// Number of usable candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns `true` if there is no usable candidate.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Finds the candidate whose boundary is closest to `point`.
    ///
    /// With `pruning`, a candidate is skipped when its box's lower-bound
    /// distance already reaches the best exact distance so far. The result
    /// is identical with and without pruning: a skipped candidate could at
    /// best tie, and ties keep the earlier candidate.
    #[must_use]
    pub fn nearest(&self, point: Point2, pruning: bool) -> NearestResult<'a> {
        let mut best: Option<NearestMatch<'a>> = None;
        let mut best_distance = f64::INFINITY;

        for c in &self.candidates {
            if pruning && c.bbox.lower_bound_distance(&point) >= best_distance {
                continue;
            }
            let Ok(r) = closest_point_on_boundary(&c.geometry, point) else {
                continue;
            };
            if r.distance < best_distance {
                best_distance = r.distance;
                best = Some(NearestMatch {
                    feature_id: c.id,
                    feature: c.feature,
                    point: r.point,
                    distance: r.distance,
                });
            }
        }

        best.map_or(NearestResult::NoCandidateFound, NearestResult::Found)
    }
}

/// Finds the feature of a dataset whose boundary is closest to a point.
pub struct FindNearest<'a> {
    point: Point2,
    srid: Srid,
    candidates: &'a dyn FeatureSource,
    transform: Option<&'a dyn Reproject>,
    pruning: bool,
}

impl<'a> FindNearest<'a> {
    /// Creates a new `FindNearest` query with bounding-box pruning enabled.
    #[must_use]
    pub fn new(point: Point2, srid: Srid, candidates: &'a dyn FeatureSource) -> Self {
        Self {
            point,
            srid,
            candidates,
            transform: None,
            pruning: true,
        }
    }

    /// Sets the transform used for candidates in another spatial reference.
    #[must_use]
    pub fn with_transform(mut self, transform: &'a dyn Reproject) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Enables or disables bounding-box pruning.
    #[must_use]
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns dataset or reprojection errors unmodified.
    pub fn execute(&self) -> Result<NearestResult<'a>> {
        let index = CandidateIndex::build(self.candidates, self.srid, self.transform)?;
        Ok(index.nearest(self.point, self.pruning))
    }
}

/// Finds the candidate whose boundary is closest to `point`, with pruning.
///
/// # Errors
///
/// Returns dataset or reprojection errors unmodified.
pub fn find_nearest<'a>(
    point: Point2,
    point_srid: Srid,
    candidates: &'a dyn FeatureSource,
    transform: Option<&'a dyn Reproject>,
) -> Result<NearestResult<'a>> {
    let mut query = FindNearest::new(point, point_srid, candidates);
    query.transform = transform;
    query.execute()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::dataset::FeatureLayer;
    use crate::error::{ExternalError, GeoproxError};
    use crate::geometry::{GeometryKind, Shape};
    use crate::operations::transform::AffineReprojection;

    const SRID: Srid = Srid(5514);
    const TOL: f64 = 1e-10;

    fn line(a: (f64, f64), b: (f64, f64)) -> Feature {
        Feature::new(Geometry::line_string(
            vec![Point2::new(a.0, a.1), Point2::new(b.0, b.1)],
            SRID,
        ))
    }

    fn both_paths(
        layer: &FeatureLayer,
        point: Point2,
    ) -> (NearestResult<'_>, NearestResult<'_>) {
        let pruned = FindNearest::new(point, SRID, layer).execute().unwrap();
        let exhaustive = FindNearest::new(point, SRID, layer)
            .with_pruning(false)
            .execute()
            .unwrap();
        (pruned, exhaustive)
    }

    fn assert_same(a: &NearestResult<'_>, b: &NearestResult<'_>) {
        match (a.found(), b.found()) {
            (None, None) => {}
            (Some(x), Some(y)) => {
                assert_eq!(x.feature_id, y.feature_id);
                assert!((x.distance - y.distance).abs() < TOL);
                assert!((x.point - y.point).norm() < TOL);
            }
            _ => panic!("pruned and exhaustive disagree: {a:?} vs {b:?}"),
        }
    }

    #[test]
    fn empty_candidate_set() {
        let layer = FeatureLayer::new("lines", SRID, GeometryKind::LineString);
        let (pruned, exhaustive) = both_paths(&layer, Point2::origin());
        assert!(!pruned.is_found());
        assert_same(&pruned, &exhaustive);
    }

    #[test]
    fn single_candidate() {
        let mut layer = FeatureLayer::new("lines", SRID, GeometryKind::LineString);
        let id = layer.add_feature(line((0.0, 5.0), (10.0, 5.0)));
        let (pruned, exhaustive) = both_paths(&layer, Point2::new(3.0, 0.0));
        let m = pruned.found().unwrap();
        assert_eq!(m.feature_id, id);
        assert!((m.distance - 5.0).abs() < TOL);
        assert_same(&pruned, &exhaustive);
    }

    #[test]
    fn nearest_box_is_not_nearest_geometry() {
        // Diagonal segment: its box contains the query point (lower bound 0),
        // but the segment itself passes 3/sqrt(2) away.
        let mut layer = FeatureLayer::new("lines", SRID, GeometryKind::LineString);
        let diagonal = layer.add_feature(line((-10.0, 0.0), (0.0, 10.0)));
        // Horizontal segment: box 1.5 away, true distance 1.5.
        let horizontal = layer.add_feature(line((-10.0, -0.5), (0.0, -0.5)));

        let q = Point2::new(-6.0, 1.0);
        let diagonal_box = layer.feature(diagonal).unwrap().geometry.bounding_box().unwrap();
        assert!(diagonal_box.lower_bound_distance(&q).abs() < TOL);

        let (pruned, exhaustive) = both_paths(&layer, q);
        let m = pruned.found().unwrap();
        assert_eq!(m.feature_id, horizontal);
        assert!((m.distance - 1.5).abs() < TOL);
        assert_same(&pruned, &exhaustive);
    }

    #[test]
    fn pruning_agrees_on_many_candidates() {
        let mut layer = FeatureLayer::new("polys", SRID, GeometryKind::Polygon);
        for i in 0..20 {
            let x = f64::from(i) * 7.0 - 60.0;
            let y = f64::from(i % 5) * 11.0 - 20.0;
            layer.add_feature(Feature::new(Geometry::polygon(
                vec![vec![
                    Point2::new(x, y),
                    Point2::new(x + 3.0, y),
                    Point2::new(x + 3.0, y + 4.0),
                    Point2::new(x, y + 4.0),
                ]],
                SRID,
            )));
        }
        for q in [
            Point2::origin(),
            Point2::new(100.0, 100.0),
            Point2::new(-61.0, 0.5),
            Point2::new(12.5, 3.0),
        ] {
            let (pruned, exhaustive) = both_paths(&layer, q);
            assert!(pruned.is_found());
            assert_same(&pruned, &exhaustive);
        }
    }

    #[test]
    fn empty_candidates_are_skipped() {
        let mut layer = FeatureLayer::new("lines", SRID, GeometryKind::MultiLineString);
        layer.add_feature(Feature::new(Geometry::new(Shape::MultiLineString(vec![]), SRID)));
        let (pruned, _) = both_paths(&layer, Point2::origin());
        assert!(matches!(pruned, NearestResult::NoCandidateFound));

        let good = layer.add_feature(line((1.0, 1.0), (2.0, 1.0)));
        let r = find_nearest(Point2::origin(), SRID, &layer, None).unwrap();
        assert_eq!(r.found().unwrap().feature_id, good);
    }

    #[test]
    fn candidates_are_reprojected_into_query_srid() {
        let other = Srid(900_001);
        let mut layer = FeatureLayer::new("grid", other, GeometryKind::Point);
        // In `other` the point is at (110, 0); shifted by -100 it lands at (10, 0).
        layer.add_feature(Feature::new(Geometry::point(Point2::new(110.0, 0.0), other)));
        let t = AffineReprojection::translation(other, SRID, -100.0, 0.0);

        let r = FindNearest::new(Point2::origin(), SRID, &layer)
            .with_transform(&t)
            .execute()
            .unwrap();
        let m = r.found().unwrap();
        assert!((m.distance - 10.0).abs() < TOL);
        assert!((m.point - Point2::new(10.0, 0.0)).norm() < TOL);
    }

    #[test]
    fn missing_transform_is_surfaced() {
        let other = Srid(900_001);
        let mut layer = FeatureLayer::new("grid", other, GeometryKind::Point);
        layer.add_feature(Feature::new(Geometry::point(Point2::origin(), other)));
        let err = find_nearest(Point2::origin(), SRID, &layer, None).unwrap_err();
        assert!(matches!(
            err,
            GeoproxError::External(ExternalError::MissingTransform { .. })
        ));
    }

    #[test]
    fn index_is_reusable_across_queries() {
        let mut layer = FeatureLayer::new("lines", SRID, GeometryKind::LineString);
        let a = layer.add_feature(line((0.0, 0.0), (0.0, 10.0)));
        let b = layer.add_feature(line((20.0, 0.0), (20.0, 10.0)));
        let index = CandidateIndex::build(&layer, SRID, None).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.nearest(Point2::new(1.0, 5.0), true).found().unwrap().feature_id, a);
        assert_eq!(index.nearest(Point2::new(19.0, 5.0), true).found().unwrap().feature_id, b);
    }
}
