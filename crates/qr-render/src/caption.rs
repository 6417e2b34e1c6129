//! Caption layout below the QR image.
//!
//! Wraps the caption into lines with a greedy word-wrap, sizes the final
//! canvas, and composites QR plus text onto a white background.

use image::{Rgba, RgbaImage, imageops};
use tracing::debug;

use crate::font::CaptionFont;
use crate::options::RenderOptions;
use crate::{CANVAS_PADDING, MIN_CANVAS_WIDTH, color};

/// Smallest caption font size honored, in pixels.
pub const MIN_FONT_SIZE: u32 = 12;

/// Largest caption font size honored, in pixels.
pub const MAX_FONT_SIZE: u32 = 24;

/// Vertical space added to the font size per line.
const LINE_SPACING: u32 = 6;

/// Extra padding reserved under the text block.
const TEXT_BLOCK_PADDING: u32 = 30;

/// Greedy word-wrap of `text` into lines no wider than `max_width` pixels.
///
/// Words are never split: a single word wider than `max_width` still gets a
/// line of its own. Whitespace-only input produces no lines.
pub fn wrap_caption(font: &dyn CaptionFont, px: f32, text: &str, max_width: u32) -> Vec<String> {
    let mut words = text.split_whitespace();
    let Some(first) = words.next() else {
        return Vec::new();
    };

    let mut lines = Vec::new();
    let mut current = first.to_string();

    for word in words {
        let candidate = format!("{current} {word}");
        if font.text_width(px, &candidate) > max_width {
            lines.push(current);
            current = word.to_string();
        } else {
            current = candidate;
        }
    }
    lines.push(current);

    lines
}

/// Composite a QR image and an optional caption onto the final canvas.
///
/// Layout rules:
/// - font size clamped to `[12, 24]`,
/// - wrap width is `qr_size - 20`,
/// - canvas width is `max(qr_size + 40, 300)`, height grows by
///   `lines * (font + 6) + 30` when a caption is present,
/// - QR centered horizontally at `y = 20`, caption lines centered below it.
pub fn compose_with_caption(
    qr: &RgbaImage,
    caption: &str,
    font: &dyn CaptionFont,
    opts: &RenderOptions,
) -> crate::Result<RgbaImage> {
    let text_color = color::parse_hex(&opts.caption_color)?;
    let font_size = opts.caption_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
    let px = font_size as f32;
    let line_pitch = font_size + LINE_SPACING;

    let caption = caption.trim();
    let lines = if caption.is_empty() {
        Vec::new()
    } else {
        wrap_caption(font, px, caption, opts.qr_size.saturating_sub(20))
    };

    let text_block = if lines.is_empty() {
        0
    } else {
        lines.len() as u32 * line_pitch + TEXT_BLOCK_PADDING
    };

    let width = (opts.qr_size + 2 * CANVAS_PADDING).max(MIN_CANVAS_WIDTH);
    let height = opts.qr_size + text_block + 2 * CANVAS_PADDING;

    debug!(width, height, lines = lines.len(), "Composing final canvas");

    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));

    let qr_x = (width - opts.qr_size) / 2;
    imageops::overlay(&mut canvas, qr, i64::from(qr_x), i64::from(CANVAS_PADDING));

    let text_start = opts.qr_size + CANVAS_PADDING + 20;
    for (i, line) in lines.iter().enumerate() {
        let y = text_start + i as u32 * line_pitch;
        // Lines that would cross the bottom padding are dropped, not reflowed.
        if y + font_size > height - CANVAS_PADDING {
            continue;
        }
        let line_width = font.text_width(px, line);
        let x = (width.saturating_sub(line_width) / 2) as i32;
        font.draw_line(&mut canvas, x, y as i32, px, text_color, line);
    }

    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fixed-advance font: every char is 10px wide, drawing marks one pixel.
    struct MonoFont;

    impl CaptionFont for MonoFont {
        fn text_width(&self, _px: f32, text: &str) -> u32 {
            text.chars().count() as u32 * 10
        }

        fn draw_line(
            &self,
            img: &mut RgbaImage,
            x: i32,
            y: i32,
            _px: f32,
            color: Rgba<u8>,
            _text: &str,
        ) {
            if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }

    fn white_qr(size: u32) -> RgbaImage {
        RgbaImage::from_pixel(size, size, Rgba([255, 255, 255, 255]))
    }

    #[test]
    fn wrap_keeps_short_text_on_one_line() {
        let lines = wrap_caption(&MonoFont, 16.0, "hello world", 280);
        assert_eq!(lines, vec!["hello world"]);
    }

    #[test]
    fn wrap_breaks_at_word_boundaries() {
        // "aaaa bbbb cccc" at 10px/char: "aaaa bbbb" is 90px wide.
        let lines = wrap_caption(&MonoFont, 16.0, "aaaa bbbb cccc", 95);
        assert_eq!(lines, vec!["aaaa bbbb", "cccc"]);
    }

    #[test]
    fn oversized_word_gets_its_own_line_unsplit() {
        let long = "a".repeat(50); // 500px, far wider than the wrap width
        let text = format!("hi {long} bye");
        let lines = wrap_caption(&MonoFont, 16.0, &text, 100);
        assert_eq!(lines, vec!["hi".to_string(), long, "bye".to_string()]);
    }

    #[test]
    fn wrap_of_whitespace_is_empty() {
        assert!(wrap_caption(&MonoFont, 16.0, "   ", 100).is_empty());
        assert!(wrap_caption(&MonoFont, 16.0, "", 100).is_empty());
    }

    #[test]
    fn canvas_without_caption_has_no_text_block() {
        let opts = RenderOptions::default();
        let out = compose_with_caption(&white_qr(300), "  ", &MonoFont, &opts).unwrap();
        assert_eq!(out.width(), 340);
        assert_eq!(out.height(), 340);
    }

    #[test]
    fn canvas_grows_per_caption_line() {
        let opts = RenderOptions::default(); // caption_size 16 -> pitch 22
        let out = compose_with_caption(&white_qr(300), "one line", &MonoFont, &opts).unwrap();
        assert_eq!(out.height(), 300 + 40 + 22 + 30);
    }

    #[test]
    fn narrow_qr_still_meets_minimum_canvas_width() {
        let opts = RenderOptions {
            qr_size: 200,
            ..RenderOptions::default()
        };
        let out = compose_with_caption(&white_qr(200), "x", &MonoFont, &opts).unwrap();
        assert_eq!(out.width(), 300);
    }

    #[test]
    fn font_size_is_clamped() {
        let small = RenderOptions {
            caption_size: 4,
            ..RenderOptions::default()
        };
        let out = compose_with_caption(&white_qr(300), "x", &MonoFont, &small).unwrap();
        assert_eq!(out.height(), 300 + 40 + (12 + 6) + 30);

        let big = RenderOptions {
            caption_size: 90,
            ..RenderOptions::default()
        };
        let out = compose_with_caption(&white_qr(300), "x", &MonoFont, &big).unwrap();
        assert_eq!(out.height(), 300 + 40 + (24 + 6) + 30);
    }

    #[test]
    fn background_is_white() {
        let opts = RenderOptions::default();
        let out = compose_with_caption(&white_qr(300), "caption", &MonoFont, &opts).unwrap();
        assert_eq!(*out.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
        let h = out.height();
        assert_eq!(*out.get_pixel(0, h - 1), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn invalid_caption_color_fails() {
        let opts = RenderOptions {
            caption_color: "black".to_string(),
            ..RenderOptions::default()
        };
        assert!(compose_with_caption(&white_qr(300), "x", &MonoFont, &opts).is_err());
    }
}
