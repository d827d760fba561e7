//! Per-file pipeline: load → clean → convert.
//!
//! [`process_file`] runs the whole pipeline for one uploaded file and stops at the first error
//! for that file; [`process_path`] does the same for a file on disk. [`process_batch`] runs it
//! for many files sequentially, collecting one [`FileOutcome`] per input; a failed file never
//! stops the others. For parallel batches see [`crate::execution::BatchExecutor`].
//!
//! ```rust
//! use data_sweeper::pipeline::{process_file, CleaningOptions, FileInput, SweepRequest};
//! use data_sweeper::types::TableFormat;
//!
//! # fn main() -> Result<(), data_sweeper::SweepError> {
//! let input = FileInput::new("scores.csv", b"id,score\n1,10\n1,10\n2,\n3,20\n".to_vec());
//! let request = SweepRequest {
//!     cleaning: CleaningOptions {
//!         remove_duplicates: true,
//!         fill_missing_numeric_with_mean: true,
//!         selected_columns: Some(vec!["score".to_string()]),
//!     },
//!     ..SweepRequest::new(TableFormat::Csv)
//! };
//!
//! let processed = process_file(&input, &request)?;
//! assert_eq!(processed.output.file_name, "scores.csv");
//! assert_eq!(processed.output.mime_type, "text/csv");
//! assert_eq!(processed.output.bytes, b"score\n10\n15\n20\n");
//! assert_eq!(processed.stats.duplicates_removed, 1);
//! # Ok(())
//! # }
//! ```

mod observability;
mod options;

use std::fmt;
use std::path::Path;

use crate::error::SweepResult;
use crate::export::{convert, output_file_name};
use crate::ingestion::load;
use crate::processing::{fill_missing_numeric_with_report, remove_duplicates, select_columns};
use crate::types::{Table, TableFormat};

pub use observability::{
    CompositeObserver, FileObserver, PipelineContext, PipelineObserver, PipelineSeverity, PipelineStats,
    StdErrObserver,
};
pub use options::{CleaningOptions, SweepRequest};

/// One uploaded file: its name (which decides the source format) and raw content.
#[derive(Clone, PartialEq, Eq)]
pub struct FileInput {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for FileInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileInput")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl FileInput {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read a file from disk, naming it after the path's final component.
    pub fn from_path(path: impl AsRef<Path>) -> SweepResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        Ok(Self {
            name: display_name(path),
            bytes,
        })
    }

    /// Size in KiB, as shown in file details.
    pub fn size_kib(&self) -> f64 {
        self.bytes.len() as f64 / 1024.0
    }
}

/// A converted file ready to be offered for download.
#[derive(Clone, PartialEq, Eq)]
pub struct ConvertedFile {
    /// Download name: the input name with its extension replaced.
    pub file_name: String,
    /// MIME type of `bytes`.
    pub mime_type: &'static str,
    /// Output format.
    pub format: TableFormat,
    /// Encoded table.
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ConvertedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConvertedFile")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Result of a successful [`process_file`] run.
#[derive(Debug, Clone)]
pub struct ProcessedFile {
    pub output: ConvertedFile,
    pub stats: PipelineStats,
}

/// The outcome for one file of a batch.
#[derive(Debug)]
pub struct FileOutcome {
    /// Name of the input file.
    pub name: String,
    pub result: SweepResult<ProcessedFile>,
}

impl FileOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Apply the enabled cleaning stages to `table` in order: duplicates → fill → projection.
///
/// Returns the cleaned table and stats (`rows_out`/`columns_out` describe the cleaned table;
/// `bytes_out` is left at zero).
pub fn clean(table: &Table, options: &CleaningOptions) -> SweepResult<(Table, PipelineStats)> {
    let mut stats = PipelineStats {
        rows_loaded: table.row_count(),
        ..Default::default()
    };

    let mut current = if options.remove_duplicates {
        let deduped = remove_duplicates(table);
        stats.duplicates_removed = table.row_count() - deduped.row_count();
        deduped
    } else {
        table.clone()
    };

    if options.fill_missing_numeric_with_mean {
        let (filled, report) = fill_missing_numeric_with_report(&current);
        stats.cells_filled = report.cells_filled;
        current = filled;
    }

    if let Some(columns) = &options.selected_columns {
        current = select_columns(&current, columns)?;
    }

    stats.rows_out = current.row_count();
    stats.columns_out = current.column_count();
    Ok((current, stats))
}

/// Run the full pipeline for one file and report the outcome to `request.observer`.
pub fn process_file(input: &FileInput, request: &SweepRequest) -> SweepResult<ProcessedFile> {
    let result = run_stages(input, request);
    notify(&input.name, request, &result);
    result
}

/// Read `path` from disk and run [`process_file`] on it.
///
/// A read failure is reported to the observer as an [`crate::SweepError::Io`] failure
/// (severity `Critical`).
pub fn process_path(path: impl AsRef<Path>, request: &SweepRequest) -> SweepResult<ProcessedFile> {
    let path = path.as_ref();
    match FileInput::from_path(path) {
        Ok(input) => process_file(&input, request),
        Err(e) => {
            let result = Err(e);
            notify(&display_name(path), request, &result);
            result
        }
    }
}

fn notify(file_name: &str, request: &SweepRequest, result: &SweepResult<ProcessedFile>) {
    let Some(obs) = request.observer.as_ref() else {
        return;
    };
    let ctx = PipelineContext {
        file_name: file_name.to_string(),
        source: TableFormat::from_file_name(file_name).ok(),
        target: request.target,
    };
    match result {
        Ok(processed) => obs.on_success(&ctx, processed.stats),
        Err(e) => {
            let sev = PipelineSeverity::for_error(e);
            obs.on_failure(&ctx, sev, e);
            if sev >= request.alert_at_or_above {
                obs.on_alert(&ctx, sev, e);
            }
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn run_stages(input: &FileInput, request: &SweepRequest) -> SweepResult<ProcessedFile> {
    let source = TableFormat::from_file_name(&input.name)?;
    let table = load(&input.bytes, source)?;
    let (table, mut stats) = clean(&table, &request.cleaning)?;
    let bytes = convert(&table, request.target)?;
    stats.bytes_out = bytes.len();

    Ok(ProcessedFile {
        output: ConvertedFile {
            file_name: output_file_name(&input.name, request.target),
            mime_type: request.target.mime_type(),
            format: request.target,
            bytes,
        },
        stats,
    })
}

/// Run [`process_file`] for every input in order, sequentially.
pub fn process_batch(inputs: &[FileInput], request: &SweepRequest) -> Vec<FileOutcome> {
    inputs
        .iter()
        .map(|input| FileOutcome {
            name: input.name.clone(),
            result: process_file(input, request),
        })
        .collect()
}
