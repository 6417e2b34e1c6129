//! Single-row rendering pipeline.

use qr_render::{
    CaptionFont, LogoAsset, RenderError, RenderOptions, compose_with_caption, encode_png,
    overlay_logo, render_qr,
};

use crate::RowError;
use crate::dataset::Cell;
use crate::validate::{sanitize_filename, validate_link};

/// One generated, composited, serialized QR image plus its metadata.
///
/// Immutable once created; owned by the orchestrator until handed to the
/// archive packager.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub png: Vec<u8>,
    pub filename: String,
    pub source_link: String,
    pub caption: String,
}

/// Render one row: validate link, encode QR, overlay logo, compose caption,
/// serialize to PNG and compute the final filename.
pub fn render_row(
    link_cell: &Cell,
    filename_cell: &Cell,
    options: &RenderOptions,
    logo: Option<&LogoAsset>,
    font: &dyn CaptionFont,
) -> Result<Artifact, RowError> {
    let link = validate_link(link_cell)?;
    let name = filename_cell.display_string();

    let mut qr = render_qr(link, options).map_err(encode_error)?;

    if let Some(logo) = logo {
        overlay_logo(&mut qr, logo, options.logo_size_percent, options.logo_background);
    }

    let caption = options
        .caption_text
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or(&name);
    let composed = compose_with_caption(&qr, caption, font, options)
        .map_err(|e| RowError::Compositing(e.to_string()))?;

    let png = encode_png(&composed).map_err(|e| RowError::Serialization(e.to_string()))?;

    let filename = format!(
        "{}{}{}.png",
        options.filename_prefix,
        sanitize_filename(&name),
        options.filename_suffix
    );

    Ok(Artifact {
        png,
        filename,
        source_link: link.to_string(),
        caption: caption.to_string(),
    })
}

fn encode_error(err: RenderError) -> RowError {
    match err {
        RenderError::Serialize(msg) => RowError::Serialization(msg),
        other => RowError::Encoding(other.to_string()),
    }
}
