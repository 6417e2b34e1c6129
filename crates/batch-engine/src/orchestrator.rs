//! Chunked batch generation driver.
//!
//! Rows are partitioned into consecutive chunks; all row tasks within a
//! chunk are fired together and awaited together, chunks run strictly in
//! sequence with a short yield in between so an interactive host stays
//! responsive. Chunking is a scheduling detail only: artifact order always
//! matches the filtered row order, whatever the batch size.

use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, info, warn};

use qr_render::{CaptionFont, LogoAsset, RenderOptions};

use crate::BatchError;
use crate::dataset::{ColumnMapping, TabularDataset};
use crate::row::{Artifact, render_row};

/// Default rows per chunk, user-configurable.
pub const DEFAULT_BATCH_SIZE: usize = 25;

/// Yield between chunks, keeping the host event loop responsive.
const INTER_CHUNK_DELAY: Duration = Duration::from_millis(50);

/// Progress snapshot emitted after every completed chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    /// Rows processed so far (success or failure).
    pub processed: usize,
    /// Total rows that passed the valid-row filter.
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchProgress {
    /// Completion percentage, rounded to the nearest integer.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 100;
        }
        ((self.processed as f64 / self.total as f64) * 100.0).round() as u32
    }
}

/// Terminal state of one generation run.
#[derive(Debug)]
pub struct BatchResult {
    /// Successful artifacts, in filtered row order.
    pub artifacts: Vec<Artifact>,
    pub succeeded: usize,
    pub failed: usize,
}

/// Generate QR images for every valid row of the dataset.
///
/// Rows missing a value in either mapped column are excluded up front and
/// count toward neither success nor failure. Per-row failures are logged
/// and dropped without aborting the run. `on_progress` fires once per
/// completed chunk.
///
/// There is no mid-run cancellation; the run ends when all chunks have
/// been processed.
pub async fn generate(
    dataset: &TabularDataset,
    mapping: ColumnMapping,
    options: &RenderOptions,
    logo: Option<&LogoAsset>,
    font: &dyn CaptionFont,
    batch_size: usize,
    mut on_progress: impl FnMut(BatchProgress),
) -> Result<BatchResult, BatchError> {
    mapping.validate(dataset)?;

    let valid_rows: Vec<_> = dataset
        .rows
        .iter()
        .filter_map(|row| {
            let link = TabularDataset::cell_at(row, mapping.link);
            let filename = TabularDataset::cell_at(row, mapping.filename);
            (link.is_present() && filename.is_present()).then_some((link, filename))
        })
        .collect();

    let total = valid_rows.len();
    let batch_size = batch_size.max(1);
    let chunk_count = total.div_ceil(batch_size);
    info!(total, batch_size, chunk_count, "Starting batch generation");

    let mut artifacts = Vec::with_capacity(total);
    let mut succeeded = 0usize;
    let mut failed = 0usize;
    let mut processed = 0usize;

    for (chunk_index, chunk) in valid_rows.chunks(batch_size).enumerate() {
        // Fire every row task in the chunk, then await them all; one row
        // failing does not cancel its neighbors.
        let tasks = chunk
            .iter()
            .map(|(link, filename)| async move { render_row(link, filename, options, logo, font) });
        let results = join_all(tasks).await;

        for ((_, filename), result) in chunk.iter().zip(results) {
            match result {
                Ok(artifact) => {
                    artifacts.push(artifact);
                    succeeded += 1;
                }
                Err(error) => {
                    warn!(filename = %filename.display_string(), %error, "Dropping row");
                    failed += 1;
                }
            }
        }
        processed += chunk.len();

        debug!(chunk_index, processed, total, "Chunk complete");
        on_progress(BatchProgress {
            processed,
            total,
            succeeded,
            failed,
        });

        if chunk_index + 1 < chunk_count {
            tokio::time::sleep(INTER_CHUNK_DELAY).await;
        }
    }

    info!(succeeded, failed, "Batch generation complete");
    Ok(BatchResult {
        artifacts,
        succeeded,
        failed,
    })
}
