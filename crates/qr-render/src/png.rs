//! PNG serialization of composited images.

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};

use crate::RenderError;

/// Serialize an RGBA image into PNG bytes.
pub fn encode_png(img: &RgbaImage) -> crate::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| RenderError::Serialize(e.to_string()))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn produces_png_magic_bytes() {
        let img = RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255]));
        let bytes = encode_png(&img).unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
    }

    #[test]
    fn round_trips_through_decoder() {
        let img = RgbaImage::from_pixel(8, 8, Rgba([9, 8, 7, 255]));
        let bytes = encode_png(&img).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (8, 8));
        assert_eq!(*decoded.get_pixel(3, 3), Rgba([9, 8, 7, 255]));
    }
}
