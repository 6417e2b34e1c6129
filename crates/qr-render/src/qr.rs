//! QR matrix rasterization.

use image::{RgbaImage, imageops};
use imageproc::drawing::draw_filled_circle_mut;
use qrcode::QrCode;
use tracing::debug;

use crate::options::{QrStyle, RenderOptions};
use crate::{RenderError, color};

/// Render a payload into an RGBA image of exactly `qr_size` pixels per side.
///
/// The quiet zone (`margin`, measured in modules) is filled with the light
/// color. Modules are drawn at an integer scale and the result is
/// nearest-neighbor resized to the requested size, keeping edges crisp.
///
/// Unencodable payloads (over-capacity for the chosen error correction
/// level) fail with [`RenderError::Encode`]; a blank image is never
/// returned.
pub fn render_qr(payload: &str, opts: &RenderOptions) -> crate::Result<RgbaImage> {
    let dark = color::parse_hex(&opts.color_dark)?;
    let light = color::parse_hex(&opts.color_light)?;

    let code = QrCode::with_error_correction_level(payload, opts.error_correction.to_ec_level())
        .map_err(|e| RenderError::Encode(e.to_string()))?;

    let modules = code.width() as u32;
    let total = modules + 2 * opts.margin;
    let scale = (opts.qr_size / total).max(1);
    let img_size = total * scale;

    debug!(modules, scale, img_size, "Rasterizing QR matrix");

    let mut img = RgbaImage::from_pixel(img_size, img_size, light);

    for y in 0..modules {
        for x in 0..modules {
            if code[(x as usize, y as usize)] != qrcode::Color::Dark {
                continue;
            }
            let px = (opts.margin + x) * scale;
            let py = (opts.margin + y) * scale;
            match opts.style {
                QrStyle::Square => {
                    for dy in 0..scale {
                        for dx in 0..scale {
                            img.put_pixel(px + dx, py + dy, dark);
                        }
                    }
                }
                QrStyle::Dots => {
                    let radius = (scale / 2).max(1) as i32;
                    let cx = (px + scale / 2) as i32;
                    let cy = (py + scale / 2) as i32;
                    draw_filled_circle_mut(&mut img, (cx, cy), radius, dark);
                }
            }
        }
    }

    if img_size != opts.qr_size {
        img = imageops::resize(
            &img,
            opts.qr_size,
            opts.qr_size,
            imageops::FilterType::Nearest,
        );
    }

    Ok(img)
}
