//! PNG image format support
//!
//! Decoding always produces an 8 bpp grayscale `Pix`: palettes and sub-byte
//! gray are expanded to 8 bits, 16-bit samples keep their high byte, and
//! color is reduced to luma. Alpha is discarded.

use crate::{IoError, IoResult};
use imkit_core::{ImageFormat, Pix, PixelDepth, color};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image as 8 bpp grayscale
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unexpected PNG output depth: {:?}",
            bit_depth
        )));
    }
    let samples = match color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "PNG palette was not expanded".to_string(),
            ));
        }
    };

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    let mut pix_mut = Pix::new(width, height, PixelDepth::Bit8)?.to_mut();
    pix_mut.set_informat(ImageFormat::Png);

    for y in 0..height {
        let row = &data[y as usize * bytes_per_row..][..width as usize * samples];
        for (x, px) in row.chunks_exact(samples).enumerate() {
            let val = match samples {
                1 | 2 => px[0],
                _ => color::rgb_to_gray(px[0], px[1], px[2]),
            };
            pix_mut.set_pixel_unchecked(x as u32, y, val as u32);
        }
    }

    log::debug!(
        "decoded PNG {}x{} ({:?} source)",
        width,
        height,
        color_type
    );
    Ok(pix_mut.into())
}

/// Write a PNG image
///
/// 8 bpp images are written as grayscale, 32 bpp images as RGB.
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    write_png_with_text(pix, writer, &[])
}

/// Write a PNG image with one `tEXt` chunk per `(keyword, text)` pair
pub fn write_png_with_text<W: Write>(
    pix: &Pix,
    writer: W,
    text: &[(String, String)],
) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();

    let (color_type, samples) = match pix.depth() {
        PixelDepth::Bit8 => (ColorType::Grayscale, 1usize),
        PixelDepth::Bit32 => (ColorType::Rgb, 3usize),
    };

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);
    for (keyword, value) in text {
        encoder
            .add_text_chunk(keyword.clone(), value.clone())
            .map_err(|e| IoError::EncodeError(format!("PNG text chunk error: {}", e)))?;
    }

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let mut data = Vec::with_capacity(pix.pixel_count() * samples);
    for &val in pix.data() {
        match pix.depth() {
            PixelDepth::Bit8 => data.push(val as u8),
            PixelDepth::Bit32 => {
                let (r, g, b) = color::extract_rgb(val);
                data.extend_from_slice(&[r, g, b]);
            }
        }
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode_raw(color: ColorType, depth: BitDepth, w: u32, h: u32, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut enc = Encoder::new(&mut out, w, h);
            enc.set_color(color);
            enc.set_depth(depth);
            let mut wr = enc.write_header().unwrap();
            wr.write_image_data(data).unwrap();
        }
        out
    }

    #[test]
    fn test_gray8_roundtrip() {
        let pix = Pix::from_gray_bytes(3, 2, &[0, 50, 100, 150, 200, 255]).unwrap();
        let mut buf = Vec::new();
        write_png(&pix, &mut buf).unwrap();
        let back = read_png(Cursor::new(buf)).unwrap();
        assert_eq!(back.depth(), PixelDepth::Bit8);
        assert_eq!(back.data(), pix.data());
        assert_eq!(back.informat(), ImageFormat::Png);
    }

    #[test]
    fn test_rgb_decodes_to_luma() {
        let bytes = encode_raw(ColorType::Rgb, BitDepth::Eight, 2, 1, &[255, 0, 0, 10, 10, 10]);
        let pix = read_png(Cursor::new(bytes)).unwrap();
        assert_eq!(pix.data(), &[76, 10]);
    }

    #[test]
    fn test_rgba_ignores_alpha() {
        let bytes = encode_raw(ColorType::Rgba, BitDepth::Eight, 1, 1, &[0, 0, 255, 0]);
        let pix = read_png(Cursor::new(bytes)).unwrap();
        assert_eq!(pix.data(), &[29]);
    }

    #[test]
    fn test_gray16_keeps_high_byte() {
        let bytes = encode_raw(ColorType::Grayscale, BitDepth::Sixteen, 2, 1, &[0x12, 0x34, 0xff, 0xff]);
        let pix = read_png(Cursor::new(bytes)).unwrap();
        assert_eq!(pix.data(), &[0x12, 0xff]);
    }

    #[test]
    fn test_gray1_expands() {
        // 0b1000_0000: first pixel white, second black
        let bytes = encode_raw(ColorType::Grayscale, BitDepth::One, 2, 1, &[0x80]);
        let pix = read_png(Cursor::new(bytes)).unwrap();
        assert_eq!(pix.data(), &[255, 0]);
    }

    #[test]
    fn test_rgb_write_with_text() {
        let mut pm = Pix::new(2, 2, PixelDepth::Bit32).unwrap().to_mut();
        pm.set_rgb(0, 0, 255, 255, 255).unwrap();
        let pix: Pix = pm.into();
        let mut buf = Vec::new();
        let text = vec![("Title".to_string(), "Normal".to_string())];
        write_png_with_text(&pix, &mut buf, &text).unwrap();
        assert!(buf.windows(4).any(|w| w == b"tEXt"));
        assert!(buf.windows(6).any(|w| w == b"Normal"));
        let gray = read_png(Cursor::new(buf)).unwrap();
        assert_eq!(gray.data(), &[255, 0, 0, 0]);
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let err = read_png(Cursor::new(vec![0x89, b'P', b'N', b'G', 0, 0])).unwrap_err();
        assert!(matches!(err, IoError::DecodeError(_)));
    }
}
