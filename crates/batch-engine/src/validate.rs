//! Link validation and filename sanitization.

use crate::RowError;
use crate::dataset::Cell;

/// Longest accepted link payload, in characters.
pub const MAX_LINK_LENGTH: usize = 2000;

/// Validate a link cell, returning the payload to encode.
///
/// Deliberately permissive: QR codes can carry any text, so only
/// non-string cells, blank values and oversized payloads are rejected.
/// The returned payload is the raw cell value, untrimmed.
pub fn validate_link(cell: &Cell) -> Result<&str, RowError> {
    let link = cell.as_text().ok_or(RowError::InvalidLink {
        reason: "value is not text",
    })?;

    let trimmed = link.trim();
    if trimmed.is_empty() {
        return Err(RowError::InvalidLink {
            reason: "empty after trimming",
        });
    }
    if trimmed.chars().count() > MAX_LINK_LENGTH {
        return Err(RowError::InvalidLink {
            reason: "longer than 2000 characters",
        });
    }

    Ok(link)
}

/// Replace every character outside `[A-Za-z0-9]` with `_`, then lowercase.
///
/// Collisions between distinct inputs are possible and are not resolved
/// here; the archive keeps the last entry written under a given name.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}
