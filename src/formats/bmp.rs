use crate::payload::PixelBuffer;
use std::io::{self, Write};

pub const BMP_SIGNATURE: [u8; 2] = *b"BM";
pub const FILE_HEADER_LEN: usize = 14;
pub const INFO_HEADER_LEN: usize = 40;
pub const PIXEL_DATA_OFFSET: u32 = (FILE_HEADER_LEN + INFO_HEADER_LEN) as u32;
pub const BITS_PER_PIXEL: u16 = 24;

const ROW_ALIGNMENT: usize = 4;
const PADDING: [u8; ROW_ALIGNMENT - 1] = [0; ROW_ALIGNMENT - 1];

/// Zero bytes appended to each row so it occupies a multiple of 4 bytes.
#[inline]
pub fn row_padding(width: u32) -> usize {
    (ROW_ALIGNMENT - (width as usize * 3) % ROW_ALIGNMENT) % ROW_ALIGNMENT
}

#[inline]
pub fn bmp_file_size(width: u32, height: u32) -> u64 {
    let stride = (width as u64 * 3) + row_padding(width) as u64;
    PIXEL_DATA_OFFSET as u64 + stride * height as u64
}

/// Whether a `width` x `height` image fits the 32-bit file size field.
#[inline]
pub fn fits_bmp(width: u32, height: u32) -> bool {
    bmp_file_size(width, height) <= u32::MAX as u64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BmpInfo {
    pub file_size: u32,
    pub pixel_offset: u32,
    pub width: i32,
    pub height: i32,
    pub bits_per_pixel: u16,
}

fn write_headers<W: Write>(writer: &mut W, width: u32, height: u32) -> io::Result<()> {
    let file_size = u32::try_from(bmp_file_size(width, height)).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{}x{} exceeds the BMP file size limit", width, height),
        )
    })?;

    let mut file_header = [0u8; FILE_HEADER_LEN];
    file_header[0..2].copy_from_slice(&BMP_SIGNATURE);
    file_header[2..6].copy_from_slice(&file_size.to_le_bytes());
    file_header[10..14].copy_from_slice(&PIXEL_DATA_OFFSET.to_le_bytes());

    // Compression, image size, resolution and palette fields stay zero.
    let mut info_header = [0u8; INFO_HEADER_LEN];
    info_header[0..4].copy_from_slice(&(INFO_HEADER_LEN as u32).to_le_bytes());
    info_header[4..8].copy_from_slice(&width.to_le_bytes());
    info_header[8..12].copy_from_slice(&height.to_le_bytes());
    info_header[12..14].copy_from_slice(&1u16.to_le_bytes());
    info_header[14..16].copy_from_slice(&BITS_PER_PIXEL.to_le_bytes());

    writer.write_all(&file_header)?;
    writer.write_all(&info_header)
}

/// Writes `pixels` as an uncompressed 24-bit BMP.
///
/// The buffer is already BGR, which is what BMP stores, so rows go out
/// unchanged apart from the bottom-up order and alignment padding.
pub fn write_bmp<W: Write>(writer: &mut W, pixels: &PixelBuffer) -> io::Result<()> {
    let (width, height) = (pixels.width(), pixels.height());
    write_headers(writer, width, height)?;

    let padding = &PADDING[..row_padding(width)];
    for row in (0..height as usize).rev() {
        writer.write_all(pixels.row(row))?;
        writer.write_all(padding)?;
    }
    Ok(())
}

pub fn encode_bmp(pixels: &PixelBuffer) -> io::Result<Vec<u8>> {
    let mut out = Vec::with_capacity(bmp_file_size(pixels.width(), pixels.height()) as usize);
    write_bmp(&mut out, pixels)?;
    Ok(out)
}

#[inline]
pub fn validate_bmp_header(data: &[u8]) -> Option<BmpInfo> {
    if data.len() < FILE_HEADER_LEN + INFO_HEADER_LEN {
        return None;
    }

    if data[..2] != BMP_SIGNATURE {
        return None;
    }

    let read_u32 = |at: usize| u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]]);
    let read_u16 = |at: usize| u16::from_le_bytes([data[at], data[at + 1]]);

    if read_u32(FILE_HEADER_LEN) != INFO_HEADER_LEN as u32 {
        return None;
    }

    if read_u16(FILE_HEADER_LEN + 12) != 1 {
        return None;
    }

    Some(BmpInfo {
        file_size: read_u32(2),
        pixel_offset: read_u32(10),
        width: read_u32(FILE_HEADER_LEN + 4) as i32,
        height: read_u32(FILE_HEADER_LEN + 8) as i32,
        bits_per_pixel: read_u16(FILE_HEADER_LEN + 14),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimensions::ImageDimensions;

    fn pixels(width: u32, height: u32) -> PixelBuffer {
        let dims = ImageDimensions { width, height };
        let data = (0..dims.payload_len()).map(|i| (i % 251) as u8).collect();
        PixelBuffer::from_bgr(data, dims).unwrap()
    }

    #[test]
    fn test_row_padding() {
        assert_eq!(row_padding(4), 0);
        assert_eq!(row_padding(5), 1);
        assert_eq!(row_padding(1), 1);
        assert_eq!(row_padding(2), 2);
        assert_eq!(row_padding(3), 3);
    }

    #[test]
    fn test_header_layout() {
        let bmp = encode_bmp(&pixels(5, 2)).unwrap();

        assert_eq!(&bmp[0..2], b"BM");
        assert_eq!(&bmp[2..6], &86u32.to_le_bytes());
        assert_eq!(&bmp[6..10], &[0, 0, 0, 0]);
        assert_eq!(&bmp[10..14], &54u32.to_le_bytes());
        assert_eq!(&bmp[14..18], &40u32.to_le_bytes());
        assert_eq!(&bmp[18..22], &5u32.to_le_bytes());
        assert_eq!(&bmp[22..26], &2u32.to_le_bytes());
        assert_eq!(&bmp[26..28], &1u16.to_le_bytes());
        assert_eq!(&bmp[28..30], &24u16.to_le_bytes());
        assert!(bmp[30..54].iter().all(|&b| b == 0));
        assert_eq!(bmp.len(), 86);
    }

    #[test]
    fn test_rows_bottom_up_with_padding() {
        let src = pixels(5, 2);
        let bmp = encode_bmp(&src).unwrap();
        let body = &bmp[54..];

        assert_eq!(&body[0..15], src.row(1));
        assert_eq!(body[15], 0);
        assert_eq!(&body[16..31], src.row(0));
        assert_eq!(body[31], 0);
    }

    #[test]
    fn test_no_padding_when_aligned() {
        let src = pixels(4, 3);
        let bmp = encode_bmp(&src).unwrap();
        assert_eq!(bmp.len(), 54 + 12 * 3);
        assert_eq!(&bmp[54..66], src.row(2));
    }

    #[test]
    fn test_channels_not_swapped() {
        let dims = ImageDimensions { width: 1, height: 1 };
        let src = PixelBuffer::from_bgr(vec![0x10, 0x20, 0x30], dims).unwrap();
        let bmp = encode_bmp(&src).unwrap();
        assert_eq!(&bmp[54..57], &[0x10, 0x20, 0x30]);
        assert_eq!(bmp[57], 0);
    }

    #[test]
    fn test_validate_header_round_trip() {
        let bmp = encode_bmp(&pixels(7, 3)).unwrap();
        let info = validate_bmp_header(&bmp).unwrap();
        assert_eq!(info.width, 7);
        assert_eq!(info.height, 3);
        assert_eq!(info.pixel_offset, 54);
        assert_eq!(info.bits_per_pixel, 24);
        assert_eq!(info.file_size as usize, bmp.len());
    }

    #[test]
    fn test_file_size_field_limit() {
        // 37837 * 3 + 1 padding = 113512 bytes per row.
        assert!(fits_bmp(37837, 37836));
        assert!(!fits_bmp(37837, 37838));
        assert_eq!(bmp_file_size(37837, 37836), 54 + 113_512 * 37836);
        assert!(!fits_bmp(40000, 40000));
        assert_eq!(bmp_file_size(40000, 40000), 4_800_000_054);
    }

    #[test]
    fn test_oversized_header_is_rejected() {
        let mut out = Vec::new();
        let err = write_headers(&mut out, 40000, 40000).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(out.is_empty());
    }

    #[test]
    fn test_validate_header_rejects_garbage() {
        assert!(validate_bmp_header(b"BM").is_none());
        assert!(validate_bmp_header(&[0u8; 64]).is_none());
    }
}
