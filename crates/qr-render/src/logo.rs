//! Logo overlay compositing.
//!
//! A logo is centered over the QR image and clamped to at most 40% of the
//! canvas so that a high-error-correction payload stays recoverable under
//! the occlusion.

use image::imageops::FilterType;
use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_circle_mut;
use tracing::debug;

use crate::RenderError;

/// Hard cap on the requested logo percentage.
const MAX_LOGO_PERCENT: i32 = 40;

/// Extra radius of the white backdrop circle beyond the logo, in pixels.
const BACKGROUND_EXTRA_RADIUS: i32 = 5;

/// A decoded logo raster, shared read-only across all rows of a batch.
#[derive(Debug, Clone)]
pub struct LogoAsset {
    image: DynamicImage,
}

impl LogoAsset {
    /// Decode a logo from raw image bytes (PNG, JPEG, ...).
    pub fn from_bytes(bytes: &[u8]) -> crate::Result<Self> {
        let image =
            image::load_from_memory(bytes).map_err(|e| RenderError::InvalidLogo(e.to_string()))?;
        Ok(Self { image })
    }

    /// Wrap an already-decoded image.
    pub fn from_image(image: DynamicImage) -> Self {
        Self { image }
    }
}

/// Compute the placement square for a logo on a `width`×`height` canvas.
///
/// Returns `(x, y, size)`. The requested percentage is capped at 40 and the
/// pixel size is additionally capped at 40% of the smaller canvas dimension,
/// for any input including negative or >100 percentages.
pub fn logo_rect(width: u32, height: u32, size_percent: i32) -> (u32, u32, u32) {
    let constrained = size_percent.clamp(0, MAX_LOGO_PERCENT);
    let requested = f64::from(width) * f64::from(constrained) / 100.0;
    let max_size = f64::from(width.min(height)) * 0.4;
    let size = requested.min(max_size) as u32;

    let x = (width - size) / 2;
    let y = (height - size) / 2;
    (x, y, size)
}

/// Overlay a logo onto the center of a QR image, in place.
///
/// When `add_background` is set, a white filled circle of radius
/// `size / 2 + 5` is drawn beneath the logo first.
pub fn overlay_logo(qr: &mut RgbaImage, logo: &LogoAsset, size_percent: i32, add_background: bool) {
    let (x, y, size) = logo_rect(qr.width(), qr.height(), size_percent);
    if size == 0 {
        return;
    }

    debug!(x, y, size, add_background, "Overlaying logo");

    if add_background {
        let cx = (qr.width() / 2) as i32;
        let cy = (qr.height() / 2) as i32;
        let radius = (size / 2) as i32 + BACKGROUND_EXTRA_RADIUS;
        draw_filled_circle_mut(qr, (cx, cy), radius, Rgba([255, 255, 255, 255]));
    }

    let resized = logo.image.resize_exact(size, size, FilterType::Lanczos3);
    blend_onto(qr, &resized.to_rgba8(), x, y);
}

/// Alpha-composite `top` over `base` at the given position.
fn blend_onto(base: &mut RgbaImage, top: &RgbaImage, x: u32, y: u32) {
    for (dx, dy, pixel) in top.enumerate_pixels() {
        let tx = x + dx;
        let ty = y + dy;
        if tx >= base.width() || ty >= base.height() {
            continue;
        }
        let alpha = f32::from(pixel[3]) / 255.0;
        if alpha > 0.99 {
            base.put_pixel(tx, ty, *pixel);
        } else if alpha > 0.01 {
            let bg = base.get_pixel(tx, ty);
            let inv = 1.0 - alpha;
            base.put_pixel(
                tx,
                ty,
                Rgba([
                    (f32::from(pixel[0]) * alpha + f32::from(bg[0]) * inv) as u8,
                    (f32::from(pixel[1]) * alpha + f32::from(bg[1]) * inv) as u8,
                    (f32::from(pixel[2]) * alpha + f32::from(bg[2]) * inv) as u8,
                    255,
                ]),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_logo(size: u32) -> LogoAsset {
        let img = RgbaImage::from_pixel(size, size, Rgba([10, 20, 30, 255]));
        LogoAsset::from_image(DynamicImage::ImageRgba8(img))
    }

    #[test]
    fn rect_respects_requested_percent() {
        let (x, y, size) = logo_rect(300, 300, 15);
        assert_eq!(size, 45);
        assert_eq!(x, (300 - 45) / 2);
        assert_eq!(y, (300 - 45) / 2);
    }

    #[test]
    fn rect_caps_at_forty_percent() {
        for pct in [41, 100, 500, i32::MAX] {
            let (_, _, size) = logo_rect(300, 300, pct);
            assert_eq!(size, 120, "pct {pct} must clamp to 40%");
        }
    }

    #[test]
    fn rect_never_exceeds_forty_percent_of_either_dimension() {
        for pct in [-50, 0, 10, 40, 99, 250] {
            let (_, _, size) = logo_rect(300, 400, pct);
            assert!(size <= 120);
            let (_, _, size) = logo_rect(400, 300, pct);
            assert!(size <= 120);
        }
    }

    #[test]
    fn negative_percent_is_a_no_op() {
        let (_, _, size) = logo_rect(300, 300, -10);
        assert_eq!(size, 0);

        let mut qr = RgbaImage::from_pixel(100, 100, Rgba([255, 255, 255, 255]));
        let before = qr.clone();
        overlay_logo(&mut qr, &solid_logo(32), -10, true);
        assert_eq!(qr, before);
    }

    #[test]
    fn overlay_draws_logo_at_center() {
        let mut qr = RgbaImage::from_pixel(200, 200, Rgba([0, 0, 0, 255]));
        overlay_logo(&mut qr, &solid_logo(64), 20, false);
        assert_eq!(*qr.get_pixel(100, 100), Rgba([10, 20, 30, 255]));
        // corners untouched
        assert_eq!(*qr.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn background_circle_extends_past_logo() {
        let mut qr = RgbaImage::from_pixel(200, 200, Rgba([0, 0, 0, 255]));
        overlay_logo(&mut qr, &solid_logo(64), 20, true);
        let (x, _, _) = logo_rect(200, 200, 20);
        // pixel just left of the logo edge, on the center row
        assert_eq!(*qr.get_pixel(x - 2, 100), Rgba([255, 255, 255, 255]));
    }
}
