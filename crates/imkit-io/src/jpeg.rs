//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate and reduces them to
//! 8 bpp grayscale. Writing is not supported; `jpeg-decoder` is decode-only.

use crate::{IoError, IoResult};
use imkit_core::{ImageFormat, Pix, color};
use jpeg_decoder::{Decoder, PixelFormat};
use std::io::Read;

/// Read a JPEG image from a reader as 8 bpp grayscale.
///
/// CMYK images are converted with the naive `(255 - c)(255 - k)` inversion
/// before luma reduction.
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;

    let gray: Vec<u8> = match info.pixel_format {
        PixelFormat::L8 => pixels,
        // Big-endian 16-bit samples: keep the high byte
        PixelFormat::L16 => pixels.chunks_exact(2).map(|s| s[0]).collect(),
        PixelFormat::RGB24 => pixels
            .chunks_exact(3)
            .map(|p| color::rgb_to_gray(p[0], p[1], p[2]))
            .collect(),
        PixelFormat::CMYK32 => pixels
            .chunks_exact(4)
            .map(|p| {
                let k = 255 - p[3] as u32;
                let ch = |c: u8| ((255 - c as u32) * k / 255) as u8;
                color::rgb_to_gray(ch(p[0]), ch(p[1]), ch(p[2]))
            })
            .collect(),
    };

    let mut pix_mut = Pix::from_gray_bytes(width, height, &gray)?.to_mut();
    pix_mut.set_informat(ImageFormat::Jpeg);

    log::debug!(
        "decoded JPEG {}x{} ({:?} source)",
        width,
        height,
        info.pixel_format
    );
    Ok(pix_mut.into())
}
