use thiserror::Error;

/// Convenience result type for loading, cleaning and converting tables.
pub type SweepResult<T> = Result<T, SweepError>;

/// Error type returned by every fallible operation in this crate.
///
/// All variants are recoverable at the granularity of a single file: batch helpers report them
/// per file and keep going.
#[derive(Debug, Error)]
pub enum SweepError {
    /// The source or target format is not one of the supported formats (CSV, XLSX).
    #[error("unsupported format: {format}")]
    UnsupportedFormat { format: String },

    /// A column selection referenced a name that is not in the table.
    #[error("unknown column '{column}'. available={available:?}")]
    UnknownColumn {
        column: String,
        available: Vec<String>,
    },

    /// The byte stream cannot be parsed as the declared format.
    #[error("malformed input: {message}")]
    MalformedInput { message: String },

    /// The output encoder rejected the table (e.g. more columns than a worksheet can hold).
    #[error("failed to encode output: {message}")]
    Encode { message: String },

    /// A serialized request (e.g. JSON from a UI layer) could not be understood.
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of a [`SweepError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnsupportedFormat,
    UnknownColumn,
    MalformedInput,
    Encode,
    InvalidRequest,
    Io,
}

impl SweepError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SweepError::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            SweepError::UnknownColumn { .. } => ErrorKind::UnknownColumn,
            SweepError::MalformedInput { .. } => ErrorKind::MalformedInput,
            SweepError::Encode { .. } => ErrorKind::Encode,
            SweepError::InvalidRequest { .. } => ErrorKind::InvalidRequest,
            SweepError::Io(_) => ErrorKind::Io,
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        SweepError::MalformedInput {
            message: message.into(),
        }
    }

    pub(crate) fn unsupported(format: impl Into<String>) -> Self {
        SweepError::UnsupportedFormat {
            format: format.into(),
        }
    }
}
