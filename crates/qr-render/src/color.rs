//! Hex color parsing for render options.

use image::Rgba;

use crate::RenderError;

/// Parse a `#RRGGBB` or `#RGB` hex color into an opaque RGBA pixel.
///
/// Matching is case-insensitive; the leading `#` is required.
pub fn parse_hex(value: &str) -> Result<Rgba<u8>, RenderError> {
    let invalid = || RenderError::InvalidColor {
        value: value.to_string(),
    };

    let hex = value.strip_prefix('#').ok_or_else(invalid)?;

    let (r, g, b) = match hex.len() {
        6 => (
            u8::from_str_radix(&hex[0..2], 16).map_err(|_| invalid())?,
            u8::from_str_radix(&hex[2..4], 16).map_err(|_| invalid())?,
            u8::from_str_radix(&hex[4..6], 16).map_err(|_| invalid())?,
        ),
        3 => {
            let expand = |s: &str| u8::from_str_radix(s, 16).map(|v| v * 17);
            (
                expand(&hex[0..1]).map_err(|_| invalid())?,
                expand(&hex[1..2]).map_err(|_| invalid())?,
                expand(&hex[2..3]).map_err(|_| invalid())?,
            )
        }
        _ => return Err(invalid()),
    };

    Ok(Rgba([r, g, b, 255]))
}
