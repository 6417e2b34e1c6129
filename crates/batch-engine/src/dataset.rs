//! Tabular input model.
//!
//! Parsers (CSV/TSV/spreadsheet) are collaborators that produce a
//! [`TabularDataset`]; this module only defines the shape they feed into
//! the orchestrator.

use serde::{Deserialize, Serialize};

use crate::BatchError;

const EMPTY_CELL: Cell = Cell::Empty;

/// One spreadsheet cell, as produced by an upstream parser.
///
/// Spreadsheet parsers emit numbers for numeric cells and omit empty ones,
/// so all three shapes flow through the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    /// Presence test used by the valid-row filter.
    ///
    /// Follows spreadsheet truthiness: empty strings and zero are absent,
    /// whitespace-only strings are present (they are rejected later by
    /// link validation instead).
    pub fn is_present(&self) -> bool {
        match self {
            Cell::Text(t) => !t.is_empty(),
            Cell::Number(n) => *n != 0.0,
            Cell::Empty => false,
        }
    }

    /// The cell's string value, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Stringify the cell for filename/caption use.
    pub fn display_string(&self) -> String {
        match self {
            Cell::Text(t) => t.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Empty => String::new(),
        }
    }
}

/// An uploaded table: one header row plus data rows.
///
/// Rows may be ragged (shorter than the header row); missing cells read as
/// [`Cell::Empty`]. The dataset is replaced wholesale on each upload and is
/// never mutated by a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabularDataset {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl TabularDataset {
    /// Build a dataset, requiring at least one header and one data row.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self, BatchError> {
        if headers.is_empty() || rows.is_empty() {
            return Err(BatchError::DatasetTooShort);
        }
        Ok(Self { headers, rows })
    }

    /// Read a cell from a row, tolerating ragged rows.
    pub fn cell_at<'a>(row: &'a [Cell], index: usize) -> &'a Cell {
        row.get(index).unwrap_or(&EMPTY_CELL)
    }
}

/// User-selected column indices, read-only once generation starts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub link: usize,
    pub filename: usize,
}

impl ColumnMapping {
    /// Check both indices against the dataset's header count.
    pub fn validate(&self, dataset: &TabularDataset) -> Result<(), BatchError> {
        let columns = dataset.headers.len();
        for index in [self.link, self.filename] {
            if index >= columns {
                return Err(BatchError::ColumnOutOfRange { index, columns });
            }
        }
        Ok(())
    }
}
