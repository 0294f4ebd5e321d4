use tracing::{debug, info, warn};

use crate::dataset::{AttributeValue, Feature, FeatureId, FeatureSource};
use crate::error::{ExternalError, GeometryError, OperationError, Result};
use crate::geometry::{Geometry, GeometryKind, Shape};
use crate::math::Point2;
use crate::operations::query::{CandidateIndex, NearestResult};
use crate::operations::transform::Reproject;

use super::sink::{JoinConfig, JoinRecord, JoinSummary, OutputSink, ProgressSink, SkippedQuery};

/// Joins every point of an input layer to the closest geometry of a
/// candidate layer.
///
/// For each input point the candidate with the nearest boundary point wins;
/// one [`JoinRecord`] is written per matched point, carrying both ids, the
/// distance and a line from the point to its closest boundary point.
pub struct ClosestGeometryJoin {
    config: JoinConfig,
}

enum Outcome {
    Record(JoinRecord),
    NoMatch,
    Skipped(SkippedQuery),
}

impl ClosestGeometryJoin {
    /// Creates a new join with the given settings.
    #[must_use]
    pub fn new(config: JoinConfig) -> Self {
        Self { config }
    }

    /// Settings of this join.
    #[must_use]
    pub fn config(&self) -> &JoinConfig {
        &self.config
    }

    /// Runs the join on the calling thread.
    ///
    /// Cancellation is checked before each input point; on cancel the
    /// records written so far stay in the sink and the summary is marked
    /// `canceled`.
    ///
    /// # Errors
    ///
    /// Fails before any record is written if the candidate layer's
    /// geometry kind is unsupported, the input layer is not a point layer,
    /// or the layers' spatial references differ and `transform` is `None`.
    /// Dataset, reprojection and sink errors are returned unmodified.
    pub fn execute<I, C>(
        &self,
        inputs: &I,
        candidates: &C,
        transform: Option<&dyn Reproject>,
        progress: &dyn ProgressSink,
        sink: &mut dyn OutputSink,
    ) -> Result<JoinSummary>
    where
        I: FeatureSource + ?Sized,
        C: FeatureSource + ?Sized,
    {
        let index = self.prepare(inputs, candidates, transform)?;
        let total = inputs.feature_count();
        let mut summary = JoinSummary::default();
        let mut processed = 0usize;

        for item in inputs.features() {
            if progress.is_canceled() {
                summary.canceled = true;
                break;
            }
            let (id, feature) = item?;
            let outcome = self.process(&index, id, feature);
            record_outcome(outcome, &mut summary, sink)?;
            processed += 1;
            report_progress(progress, processed, total);
        }

        log_summary(inputs.name(), &summary);
        Ok(summary)
    }

    /// Runs the per-point searches on the rayon thread pool, then writes
    /// the records in input order.
    ///
    /// Cancellation is checked before each input point. Points that were
    /// already searched when the host canceled are still written.
    ///
    /// # Errors
    ///
    /// Same as [`execute`](Self::execute).
    #[cfg(feature = "parallel")]
    pub fn execute_parallel<I, C>(
        &self,
        inputs: &I,
        candidates: &C,
        transform: Option<&dyn Reproject>,
        progress: &(dyn ProgressSink + Sync),
        sink: &mut dyn OutputSink,
    ) -> Result<JoinSummary>
    where
        I: FeatureSource + ?Sized,
        C: FeatureSource + ?Sized,
    {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Mutex;

        use rayon::prelude::*;

        let index = self.prepare(inputs, candidates, transform)?;
        let items = inputs
            .features()
            .collect::<std::result::Result<Vec<_>, ExternalError>>()?;
        let total = Some(items.len());
        let canceled = AtomicBool::new(false);
        // Counting and reporting under one lock keeps reported progress
        // monotonic across workers.
        let processed = Mutex::new(0usize);

        let outcomes: Vec<Option<Outcome>> = items
            .par_iter()
            .map(|&(id, feature)| {
                if canceled.load(Ordering::Relaxed) || progress.is_canceled() {
                    canceled.store(true, Ordering::Relaxed);
                    return None;
                }
                let outcome = self.process(&index, id, feature);
                if let Ok(mut done) = processed.lock() {
                    *done += 1;
                    report_progress(progress, *done, total);
                }
                Some(outcome)
            })
            .collect();

        let mut summary = JoinSummary {
            canceled: canceled.into_inner(),
            ..JoinSummary::default()
        };
        for outcome in outcomes.into_iter().flatten() {
            record_outcome(outcome, &mut summary, sink)?;
        }

        log_summary(inputs.name(), &summary);
        Ok(summary)
    }

    /// Validates both layers and indexes the candidates in the input
    /// layer's spatial reference.
    fn prepare<'c, I, C>(
        &self,
        inputs: &I,
        candidates: &'c C,
        transform: Option<&dyn Reproject>,
    ) -> Result<CandidateIndex<'c>>
    where
        I: FeatureSource + ?Sized,
        C: FeatureSource + ?Sized,
    {
        GeometryKind::from_wkb_type(candidates.wkb_type())?;
        let input_kind = GeometryKind::from_wkb_type(inputs.wkb_type()).map_err(|_| {
            OperationError::InvalidInput(format!(
                "input layer {} has unsupported type code {}",
                inputs.name(),
                inputs.wkb_type()
            ))
        })?;
        if input_kind.single() != GeometryKind::Point {
            return Err(OperationError::InvalidInput(format!(
                "input layer {} must hold points, found {input_kind}",
                inputs.name()
            ))
            .into());
        }
        if inputs.srid() != candidates.srid() && transform.is_none() {
            return Err(ExternalError::MissingTransform {
                from: candidates.srid(),
                to: inputs.srid(),
            }
            .into());
        }

        debug!(
            inputs = inputs.name(),
            candidates = candidates.name(),
            pruning = self.config.pruning,
            "starting closest geometry join"
        );
        CandidateIndex::build(candidates, inputs.srid(), transform)
    }

    fn process(&self, index: &CandidateIndex<'_>, id: FeatureId, feature: &Feature) -> Outcome {
        let point = match query_point(&feature.geometry) {
            Ok(p) => p,
            Err(reason) => {
                warn!(?id, %reason, "skipping input feature");
                return Outcome::Skipped(SkippedQuery {
                    feature_id: id,
                    reason: reason.into(),
                });
            }
        };

        match index.nearest(point, self.config.pruning) {
            NearestResult::NoCandidateFound => Outcome::NoMatch,
            NearestResult::Found(m) => Outcome::Record(JoinRecord {
                candidate_id: attribute_or_null(m.feature, &self.config.candidate_id_field),
                input_id: attribute_or_null(feature, &self.config.input_id_field),
                distance: m.distance,
                line: Geometry::line_string(vec![point, m.point], index.srid()),
            }),
        }
    }
}

/// The single point of a point feature. A multipoint is accepted when it
/// holds exactly one point.
fn query_point(geometry: &Geometry) -> std::result::Result<Point2, GeometryError> {
    match geometry.shape() {
        Shape::Point(p) => Ok(*p),
        Shape::MultiPoint(points) => match points.as_slice() {
            [p] => Ok(*p),
            [] => Err(GeometryError::EmptyGeometry),
            _ => Err(GeometryError::ShapeMismatch {
                kind: GeometryKind::Point.name(),
                reason: format!("multipoint holds {} points", points.len()),
            }),
        },
        _ => Err(GeometryError::ShapeMismatch {
            kind: GeometryKind::Point.name(),
            reason: format!("found {}", geometry.kind()),
        }),
    }
}

fn attribute_or_null(feature: &Feature, field: &str) -> AttributeValue {
    feature.attribute(field).cloned().unwrap_or_default()
}

fn record_outcome(
    outcome: Outcome,
    summary: &mut JoinSummary,
    sink: &mut dyn OutputSink,
) -> Result<()> {
    match outcome {
        Outcome::Record(record) => {
            sink.add_record(record)?;
            summary.written += 1;
        }
        Outcome::NoMatch => summary.no_match += 1,
        Outcome::Skipped(skipped) => summary.skipped.push(skipped),
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn report_progress(progress: &dyn ProgressSink, processed: usize, total: Option<usize>) {
    if let Some(total) = total.filter(|&t| t > 0) {
        progress.set_progress(100.0 * processed as f64 / total as f64);
    }
}

fn log_summary(layer: &str, summary: &JoinSummary) {
    info!(
        layer,
        written = summary.written,
        no_match = summary.no_match,
        skipped = summary.skipped.len(),
        canceled = summary.canceled,
        "closest geometry join finished"
    );
}
