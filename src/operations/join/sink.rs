use serde::{Deserialize, Serialize};

use crate::dataset::{AttributeValue, FeatureId};
use crate::error::{ExternalError, GeoproxError};
use crate::geometry::Geometry;

/// Settings of a closest-geometry join.
///
/// Deserializes with every field optional, so a host can load a partial
/// JSON object and keep the defaults for the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinConfig {
    /// Attribute of the input features copied into each record.
    pub input_id_field: String,
    /// Attribute of the candidate features copied into each record.
    pub candidate_id_field: String,
    /// Name of the output attribute holding the distance.
    pub distance_field: String,
    /// Skip candidates whose bounding box cannot beat the current best.
    pub pruning: bool,
}

impl Default for JoinConfig {
    fn default() -> Self {
        Self {
            input_id_field: "id".to_owned(),
            candidate_id_field: "id".to_owned(),
            distance_field: "distance_closest".to_owned(),
            pruning: true,
        }
    }
}

impl JoinConfig {
    #[must_use]
    pub fn with_input_id_field(mut self, field: impl Into<String>) -> Self {
        self.input_id_field = field.into();
        self
    }

    #[must_use]
    pub fn with_candidate_id_field(mut self, field: impl Into<String>) -> Self {
        self.candidate_id_field = field.into();
        self
    }

    #[must_use]
    pub fn with_distance_field(mut self, field: impl Into<String>) -> Self {
        self.distance_field = field.into();
        self
    }

    #[must_use]
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }
}

/// One output row: an input point joined to its closest candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinRecord {
    pub candidate_id: AttributeValue,
    pub input_id: AttributeValue,
    pub distance: f64,
    /// Two-vertex line from the input point to the closest boundary point,
    /// in the input layer's spatial reference.
    pub line: Geometry,
}

impl JoinRecord {
    /// Output attributes in field order, named after `config`.
    #[must_use]
    pub fn attributes(&self, config: &JoinConfig) -> Vec<(String, AttributeValue)> {
        vec![
            (config.candidate_id_field.clone(), self.candidate_id.clone()),
            (config.input_id_field.clone(), self.input_id.clone()),
            (config.distance_field.clone(), AttributeValue::Float(self.distance)),
        ]
    }
}

/// An input feature the join could not use.
#[derive(Debug)]
pub struct SkippedQuery {
    pub feature_id: FeatureId,
    pub reason: GeoproxError,
}

/// Counters of a finished (or canceled) join.
#[derive(Debug, Default)]
pub struct JoinSummary {
    /// Records handed to the output sink.
    pub written: usize,
    /// Input points for which no candidate had usable geometry.
    pub no_match: usize,
    pub skipped: Vec<SkippedQuery>,
    /// The host asked to stop before every input was processed.
    pub canceled: bool,
}

/// Progress and cancellation channel of the host.
pub trait ProgressSink {
    /// Reports progress as a percentage in `[0, 100]`.
    fn set_progress(&self, percent: f64);

    /// Returns `true` once the host wants the batch to stop.
    fn is_canceled(&self) -> bool;
}

/// A [`ProgressSink`] that ignores progress and never cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn set_progress(&self, _percent: f64) {}

    fn is_canceled(&self) -> bool {
        false
    }
}

/// Destination of join records.
pub trait OutputSink {
    /// Stores one record.
    ///
    /// # Errors
    ///
    /// Returns an [`ExternalError`] if the record cannot be stored; the
    /// batch stops and surfaces it unmodified.
    fn add_record(&mut self, record: JoinRecord) -> Result<(), ExternalError>;
}

impl OutputSink for Vec<JoinRecord> {
    fn add_record(&mut self, record: JoinRecord) -> Result<(), ExternalError> {
        self.push(record);
        Ok(())
    }
}
