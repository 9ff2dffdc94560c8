use thiserror::Error;

/// Unified error type for storage, import and export operations
#[derive(Debug, Error)]
pub enum InventoryError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed delimited text
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Workbook could not be opened or read
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),
    /// Workbook could not be written
    #[error("Spreadsheet write error: {0}")]
    SpreadsheetWrite(#[from] rust_xlsxwriter::XlsxError),
    /// JSON (de)serialisation of a persisted blob failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Local database operation failed
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    /// Import file with an extension other than csv, xlsx or xls
    #[error("Unsupported file format: {0:?} (expected csv, xlsx or xls)")]
    UnsupportedFormat(String),
    /// Workbook has no worksheet to import from
    #[error("Workbook contains no worksheets")]
    EmptyWorkbook,
}

/// Result type alias for inventory operations
pub type InventoryResult<T> = Result<T, InventoryError>;
