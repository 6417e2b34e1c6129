//! Zip packaging of generated artifacts.

use std::io::{Cursor, Write};

use chrono::Utc;
use tracing::{debug, info};
use zip::CompressionMethod;
use zip::write::{FileOptions, ZipWriter};

use crate::ArchiveError;
use crate::row::Artifact;

/// Deflate level balancing speed against size for many PNG entries.
const COMPRESSION_LEVEL: i32 = 6;

/// Pack all artifacts into a single zip archive, keyed by filename.
///
/// Duplicate filenames are not deduplicated: extraction keeps the entry
/// written last. Zero artifacts still produce a valid, empty archive.
pub fn pack(artifacts: &[Artifact]) -> Result<Vec<u8>, ArchiveError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let entry_options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(COMPRESSION_LEVEL));

    for artifact in artifacts {
        debug!(filename = %artifact.filename, bytes = artifact.png.len(), "Adding archive entry");
        writer.start_file(artifact.filename.as_str(), entry_options)?;
        writer.write_all(&artifact.png)?;
    }

    let bytes = writer.finish()?.into_inner();
    info!(entries = artifacts.len(), bytes = bytes.len(), "Archive packed");
    Ok(bytes)
}

/// Default download name, `qr_codes_<YYYY-MM-DD>.zip` in UTC.
pub fn default_archive_name() -> String {
    format!("qr_codes_{}.zip", Utc::now().format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;

    fn artifact(filename: &str, payload: &[u8]) -> Artifact {
        Artifact {
            png: payload.to_vec(),
            filename: filename.to_string(),
            source_link: "https://example.com".to_string(),
            caption: String::new(),
        }
    }

    #[test]
    fn zero_artifacts_yield_a_valid_empty_archive() {
        let bytes = pack(&[]).unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 0);
    }

    #[test]
    fn entries_are_keyed_by_filename() {
        let bytes = pack(&[
            artifact("a.png", b"first"),
            artifact("b.png", b"second"),
        ])
        .unwrap();

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);

        let mut content = Vec::new();
        archive
            .by_name("b.png")
            .unwrap()
            .read_to_end(&mut content)
            .unwrap();
        assert_eq!(content, b"second");
    }

    #[test]
    fn colliding_names_are_all_written() {
        let bytes = pack(&[
            artifact("same.png", b"first"),
            artifact("same.png", b"second"),
        ])
        .unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        // Both entries exist; sequential extraction leaves the last one.
        assert_eq!(archive.len(), 2);
    }

    #[test]
    fn default_name_embeds_the_date() {
        let name = default_archive_name();
        assert!(name.starts_with("qr_codes_"));
        assert!(name.ends_with(".zip"));
        assert_eq!(name.len(), "qr_codes_0000-00-00.zip".len());
    }
}
