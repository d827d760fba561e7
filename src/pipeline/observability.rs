use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::SweepError;
use crate::types::TableFormat;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PipelineSeverity {
    /// Informational event.
    Info,
    /// The file was skipped for a reason the user can fix by choosing another file.
    Warning,
    /// The file could not be processed.
    Error,
    /// Infrastructure failure (typically I/O).
    Critical,
}

impl PipelineSeverity {
    /// Severity assigned to a failed file run.
    pub fn for_error(e: &SweepError) -> Self {
        match e {
            SweepError::Io(_) => PipelineSeverity::Critical,
            SweepError::UnsupportedFormat { .. } => PipelineSeverity::Warning,
            SweepError::UnknownColumn { .. }
            | SweepError::MalformedInput { .. }
            | SweepError::Encode { .. }
            | SweepError::InvalidRequest { .. } => PipelineSeverity::Error,
        }
    }
}

/// Context about one file's pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    /// Name of the uploaded file.
    pub file_name: String,
    /// Source format, if the file name had a supported extension.
    pub source: Option<TableFormat>,
    /// Requested output format.
    pub target: TableFormat,
}

/// Stats reported on a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipelineStats {
    /// Rows parsed from the input.
    pub rows_loaded: usize,
    /// Rows dropped as duplicates.
    pub duplicates_removed: usize,
    /// Null numeric cells replaced by a column mean.
    pub cells_filled: usize,
    /// Rows in the converted output.
    pub rows_out: usize,
    /// Columns in the converted output.
    pub columns_out: usize,
    /// Size of the converted output.
    pub bytes_out: usize,
}

/// Observer interface for per-file pipeline outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait PipelineObserver: Send + Sync {
    /// Called when a file was converted.
    fn on_success(&self, _ctx: &PipelineContext, _stats: PipelineStats) {}

    /// Called when a file's pipeline stopped with an error.
    fn on_failure(&self, _ctx: &PipelineContext, _severity: PipelineSeverity, _error: &SweepError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &PipelineContext, severity: PipelineSeverity, error: &SweepError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn PipelineObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn PipelineObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl PipelineObserver for CompositeObserver {
    fn on_success(&self, ctx: &PipelineContext, stats: PipelineStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &PipelineContext, severity: PipelineSeverity, error: &SweepError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &PipelineContext, severity: PipelineSeverity, error: &SweepError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

fn source_label(ctx: &PipelineContext) -> String {
    ctx.source
        .map(|s| s.to_string())
        .unwrap_or_else(|| "?".to_string())
}

/// Logs pipeline events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl PipelineObserver for StdErrObserver {
    fn on_success(&self, ctx: &PipelineContext, stats: PipelineStats) {
        eprintln!(
            "[sweep][ok] file={} {}->{} rows_in={} dupes={} filled={} rows_out={} cols_out={} bytes={}",
            ctx.file_name,
            source_label(ctx),
            ctx.target,
            stats.rows_loaded,
            stats.duplicates_removed,
            stats.cells_filled,
            stats.rows_out,
            stats.columns_out,
            stats.bytes_out
        );
    }

    fn on_failure(&self, ctx: &PipelineContext, severity: PipelineSeverity, error: &SweepError) {
        eprintln!(
            "[sweep][{:?}] file={} {}->{} err={}",
            severity,
            ctx.file_name,
            source_label(ctx),
            ctx.target,
            error
        );
    }

    fn on_alert(&self, ctx: &PipelineContext, severity: PipelineSeverity, error: &SweepError) {
        eprintln!(
            "[ALERT][sweep][{:?}] file={} {}->{} err={}",
            severity,
            ctx.file_name,
            source_label(ctx),
            ctx.target,
            error
        );
    }
}

/// Appends pipeline events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl PipelineObserver for FileObserver {
    fn on_success(&self, ctx: &PipelineContext, stats: PipelineStats) {
        self.append_line(&format!(
            "{} ok file={} source={} target={} rows_in={} rows_out={} cols_out={} bytes={}",
            unix_ts(),
            ctx.file_name,
            source_label(ctx),
            ctx.target,
            stats.rows_loaded,
            stats.rows_out,
            stats.columns_out,
            stats.bytes_out
        ));
    }

    fn on_failure(&self, ctx: &PipelineContext, severity: PipelineSeverity, error: &SweepError) {
        self.append_line(&format!(
            "{} fail severity={:?} file={} source={} target={} err={}",
            unix_ts(),
            severity,
            ctx.file_name,
            source_label(ctx),
            ctx.target,
            error
        ));
    }

    fn on_alert(&self, ctx: &PipelineContext, severity: PipelineSeverity, error: &SweepError) {
        self.append_line(&format!(
            "{} ALERT severity={:?} file={} source={} target={} err={}",
            unix_ts(),
            severity,
            ctx.file_name,
            source_label(ctx),
            ctx.target,
            error
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
