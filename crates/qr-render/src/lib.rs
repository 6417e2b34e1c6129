//! Rendering primitives for batch QR code images.
//!
//! Provides QR matrix rasterization with configurable colors and margin,
//! logo overlay compositing, caption word-wrapping and layout, and PNG
//! serialization. All operations are pure functions over owned buffers;
//! nothing here touches shared mutable state.

pub mod caption;
pub mod color;
pub mod font;
pub mod logo;
pub mod options;
pub mod png;
pub mod qr;

// Re-exports for convenience
pub use caption::{compose_with_caption, wrap_caption};
pub use font::{CaptionFont, TtfFont};
pub use logo::{LogoAsset, overlay_logo};
pub use options::{ErrorCorrection, QrStyle, RenderOptions};
pub use png::encode_png;
pub use qr::render_qr;

/// Padding around the QR code on the final composite canvas, in pixels.
pub const CANVAS_PADDING: u32 = 20;

/// Minimum width of the final composite canvas, in pixels.
pub const MIN_CANVAS_WIDTH: u32 = 300;

/// Errors that can occur while rendering a single QR image.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("QR encoding failed: {0}")]
    Encode(String),

    #[error("invalid color value '{value}'")]
    InvalidColor { value: String },

    #[error("font data could not be parsed")]
    InvalidFont,

    #[error("logo image could not be decoded: {0}")]
    InvalidLogo(String),

    #[error("PNG serialization failed: {0}")]
    Serialize(String),
}

/// Result type alias for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;
