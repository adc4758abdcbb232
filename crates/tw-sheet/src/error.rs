//! Error types for workbook and settings I/O.

/// Errors raised while loading a workbook or the settings file.
///
/// Fatal to the load attempt only: callers keep whatever catalog they had.
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    /// The workbook could not be opened or read.
    #[error("workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    /// Settings file I/O failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file contents are not valid JSON.
    #[error("settings error: {0}")]
    Settings(#[from] serde_json::Error),
}

/// Convenience result type for sheet operations.
pub type SheetResult<T> = Result<T, SheetError>;
