//! Batch QR code generation engine.
//!
//! Drives validation, chunked concurrent rendering, progress reporting and
//! failure aggregation over a tabular dataset, and packages the resulting
//! PNG artifacts into a zip archive. Rendering primitives live in the
//! `qr-render` crate; tabular file parsing is a collaborator concern and is
//! not handled here.

pub mod archive;
pub mod dataset;
pub mod orchestrator;
pub mod row;
pub mod validate;

// Re-exports for convenience
pub use archive::{default_archive_name, pack};
pub use dataset::{Cell, ColumnMapping, TabularDataset};
pub use orchestrator::{BatchProgress, BatchResult, DEFAULT_BATCH_SIZE, generate};
pub use row::Artifact;
pub use validate::sanitize_filename;

/// Errors that abort a generation run before any row is processed.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("dataset must contain a header row and at least one data row")]
    DatasetTooShort,

    #[error("column index {index} out of range for {columns} columns")]
    ColumnOutOfRange { index: usize, columns: usize },
}

/// Per-row failures. A failing row is dropped and logged; it never aborts
/// the batch.
#[derive(Debug, thiserror::Error)]
pub enum RowError {
    #[error("invalid link: {reason}")]
    InvalidLink { reason: &'static str },

    #[error("QR encoding failed: {0}")]
    Encoding(String),

    #[error("compositing failed: {0}")]
    Compositing(String),

    #[error("image serialization failed: {0}")]
    Serialization(String),
}

/// Errors while building the download archive. These are terminal: no
/// partial archive is delivered.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("archive build failed: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("archive write failed: {0}")]
    Io(#[from] std::io::Error),
}
