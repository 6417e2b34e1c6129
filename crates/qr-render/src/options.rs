//! Render configuration for a generation run.

use serde::{Deserialize, Serialize};

/// QR error correction level, trading capacity for occlusion resilience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCorrection {
    L,
    M,
    Q,
    H,
}

impl ErrorCorrection {
    pub(crate) fn to_ec_level(self) -> qrcode::EcLevel {
        match self {
            ErrorCorrection::L => qrcode::EcLevel::L,
            ErrorCorrection::M => qrcode::EcLevel::M,
            ErrorCorrection::Q => qrcode::EcLevel::Q,
            ErrorCorrection::H => qrcode::EcLevel::H,
        }
    }
}

/// How dark modules are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QrStyle {
    /// Solid square modules.
    Square,
    /// Filled circles inscribed in each module cell.
    Dots,
}

/// Immutable appearance snapshot for one generation run.
///
/// The orchestrator takes this by reference at generation start; later
/// changes by the caller never affect an in-flight batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Edge length of the QR square, in pixels.
    pub qr_size: u32,
    /// Quiet zone width, in modules.
    pub margin: u32,
    pub error_correction: ErrorCorrection,
    /// Dark module color, `#RRGGBB` or `#RGB`.
    pub color_dark: String,
    /// Light module / quiet zone color.
    pub color_light: String,
    pub style: QrStyle,
    /// Caption override; when `None` each row uses its filename cell.
    pub caption_text: Option<String>,
    /// Requested caption font size in pixels (clamped to 12..=24 at layout).
    pub caption_size: u32,
    pub caption_color: String,
    pub filename_prefix: String,
    pub filename_suffix: String,
    /// Requested logo edge length as a percentage of the QR width.
    pub logo_size_percent: i32,
    /// Draw a white circle behind the logo for contrast.
    pub logo_background: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            qr_size: 300,
            margin: 2,
            error_correction: ErrorCorrection::M,
            color_dark: "#000000".to_string(),
            color_light: "#FFFFFF".to_string(),
            style: QrStyle::Square,
            caption_text: None,
            caption_size: 16,
            caption_color: "#000000".to_string(),
            filename_prefix: String::new(),
            filename_suffix: String::new(),
            logo_size_percent: 15,
            logo_background: false,
        }
    }
}
