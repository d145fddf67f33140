use crate::error::{ExtractError, Result};
use crate::payload::PixelBuffer;
use image::{ImageFormat, RgbImage};
use std::io::Cursor;

pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Converts the BGR buffer to RGB and hands it to the `image` PNG encoder.
pub fn encode_png(pixels: PixelBuffer) -> Result<Vec<u8>> {
    let (width, height) = (pixels.width(), pixels.height());
    let img = RgbImage::from_raw(width, height, pixels.into_rgb()).ok_or_else(|| {
        ExtractError::Encode(format!("pixel buffer does not match {}x{}", width, height))
    })?;

    let mut png_data = Vec::new();
    img.write_to(&mut Cursor::new(&mut png_data), ImageFormat::Png)?;
    Ok(png_data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimensions::ImageDimensions;

    #[test]
    fn test_encode_png_signature_and_ihdr() {
        let dims = ImageDimensions { width: 3, height: 2 };
        let pixels = PixelBuffer::from_bgr(vec![0x7F; dims.payload_len()], dims).unwrap();

        let png = encode_png(pixels).unwrap();
        assert_eq!(png[..8], PNG_SIGNATURE);
        assert_eq!(&png[12..16], b"IHDR");
        assert_eq!(u32::from_be_bytes([png[16], png[17], png[18], png[19]]), 3);
        assert_eq!(u32::from_be_bytes([png[20], png[21], png[22], png[23]]), 2);
    }

    #[test]
    fn test_encode_png_channel_order() {
        let dims = ImageDimensions { width: 1, height: 1 };
        let pixels = PixelBuffer::from_bgr(vec![0x00, 0x80, 0xFF], dims).unwrap();

        let png = encode_png(pixels).unwrap();
        let decoded = image::load_from_memory_with_format(&png, ImageFormat::Png)
            .unwrap()
            .to_rgb8();
        assert_eq!(decoded.get_pixel(0, 0).0, [0xFF, 0x80, 0x00]);
    }
}
