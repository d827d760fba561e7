use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{SweepError, SweepResult};
use crate::types::TableFormat;

use super::observability::{PipelineObserver, PipelineSeverity};

/// Which cleaning stages to run. Stages always run in the order duplicates → fill → projection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningOptions {
    /// Drop rows that repeat an earlier row (compared across all loaded columns).
    pub remove_duplicates: bool,
    /// Replace nulls in numeric columns with the column mean.
    pub fill_missing_numeric_with_mean: bool,
    /// Columns to keep, in output order. `None` keeps every column.
    pub selected_columns: Option<Vec<String>>,
}

/// A full per-file request: cleaning stages plus the conversion target.
///
/// Can be deserialized from JSON (see [`SweepRequest::from_json_str`]); the observer is only
/// set from code.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepRequest {
    /// Cleaning stages to apply.
    pub cleaning: CleaningOptions,
    /// Output format.
    pub target: TableFormat,
    /// Optional observer for logging/alerts.
    #[serde(skip)]
    pub observer: Option<Arc<dyn PipelineObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: PipelineSeverity,
}

impl fmt::Debug for SweepRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SweepRequest")
            .field("cleaning", &self.cleaning)
            .field("target", &self.target)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for SweepRequest {
    fn default() -> Self {
        Self {
            cleaning: CleaningOptions::default(),
            target: TableFormat::Csv,
            observer: None,
            alert_at_or_above: PipelineSeverity::Critical,
        }
    }
}

impl SweepRequest {
    /// Request converting to `target` with no cleaning stages.
    pub fn new(target: TableFormat) -> Self {
        Self {
            target,
            ..Default::default()
        }
    }

    /// Attach an observer.
    pub fn with_observer(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Parse a request from JSON, e.g.
    /// `{"cleaning": {"remove_duplicates": true}, "target": "Excel"}`.
    ///
    /// Missing fields take their defaults. JSON that does not parse is
    /// [`SweepError::InvalidRequest`]; a target this crate cannot write is
    /// [`SweepError::UnsupportedFormat`].
    pub fn from_json_str(json: &str) -> SweepResult<Self> {
        let raw: RawRequest = serde_json::from_str(json).map_err(|e| SweepError::InvalidRequest {
            message: e.to_string(),
        })?;
        let defaults = Self::default();
        Ok(Self {
            cleaning: raw.cleaning,
            target: match raw.target {
                Some(label) => label.parse()?,
                None => defaults.target,
            },
            observer: None,
            alert_at_or_above: raw.alert_at_or_above.unwrap_or(defaults.alert_at_or_above),
        })
    }
}

/// [`SweepRequest`] as it appears in JSON, before the target label is resolved.
#[derive(Default, Deserialize)]
#[serde(default)]
struct RawRequest {
    cleaning: CleaningOptions,
    target: Option<String>,
    alert_at_or_above: Option<PipelineSeverity>,
}
