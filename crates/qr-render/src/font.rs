//! Caption font abstraction.
//!
//! Text measurement and drawing sit behind a trait so the layout engine can
//! be exercised with a deterministic fixed-advance font in tests while
//! production callers load a real TTF/OTF face.

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;

use crate::RenderError;

/// Glyph source for caption measurement and drawing.
///
/// Implementations are shared read-only across concurrent row tasks.
pub trait CaptionFont: Send + Sync {
    /// Pixel width of `text` rendered at `px` size.
    fn text_width(&self, px: f32, text: &str) -> u32;

    /// Draw a single line of text at `(x, y)` (top-left origin).
    fn draw_line(&self, img: &mut RgbaImage, x: i32, y: i32, px: f32, color: Rgba<u8>, text: &str);
}

/// A caption font backed by a parsed TTF/OTF face.
pub struct TtfFont {
    font: FontVec,
}

impl TtfFont {
    /// Parse a font from raw TTF/OTF bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> crate::Result<Self> {
        let font = FontVec::try_from_vec(bytes).map_err(|_| RenderError::InvalidFont)?;
        Ok(Self { font })
    }
}

impl CaptionFont for TtfFont {
    fn text_width(&self, px: f32, text: &str) -> u32 {
        let scaled = self.font.as_scaled(PxScale::from(px));
        let mut width = 0.0f32;
        let mut prev: Option<ab_glyph::GlyphId> = None;

        for ch in text.chars() {
            let glyph_id = scaled.glyph_id(ch);
            if let Some(prev) = prev {
                width += scaled.kern(prev, glyph_id);
            }
            width += scaled.h_advance(glyph_id);
            prev = Some(glyph_id);
        }

        width.ceil() as u32
    }

    fn draw_line(&self, img: &mut RgbaImage, x: i32, y: i32, px: f32, color: Rgba<u8>, text: &str) {
        draw_text_mut(img, color, x, y, PxScale::from(px), &self.font, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_garbage_font_bytes() {
        assert!(matches!(
            TtfFont::from_bytes(vec![0, 1, 2, 3]),
            Err(RenderError::InvalidFont)
        ));
    }
}
