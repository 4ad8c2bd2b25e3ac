//! PNM (Portable Any Map) format support
//!
//! Reads PGM (P2 ASCII, P5 binary) and PPM (P3 ASCII, P6 binary), always
//! producing 8 bpp grayscale. Samples are rescaled from `[0, maxval]` to
//! `[0, 255]`; 16-bit binary samples are big-endian.
//!
//! Writes P5 for 8 bpp images and P6 for 32 bpp images.

use crate::{IoError, IoResult};
use imkit_core::{ImageFormat, Pix, PixelDepth, color};
use std::io::{Read, Write};

/// Header fields shared by every PNM variant
struct Header {
    magic: [u8; 2],
    width: u32,
    height: u32,
    maxval: u32,
}

/// Byte cursor over the whole file
struct Scanner<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Skip whitespace and `#` comments.
    fn skip_separators(&mut self) {
        while let Some(&b) = self.data.get(self.pos) {
            if b == b'#' {
                while let Some(&c) = self.data.get(self.pos) {
                    self.pos += 1;
                    if c == b'\n' || c == b'\r' {
                        break;
                    }
                }
            } else if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn next_u32(&mut self) -> IoResult<u32> {
        self.skip_separators();
        let start = self.pos;
        while self.data.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
        std::str::from_utf8(&self.data[start..self.pos])
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| IoError::InvalidData(format!("expected a number at byte {}", start)))
    }

    fn header(&mut self) -> IoResult<Header> {
        let magic = match self.data.get(..2) {
            Some(m) => [m[0], m[1]],
            None => return Err(IoError::InvalidData("PNM file too short".to_string())),
        };
        self.pos = 2;
        let width = self.next_u32()?;
        let height = self.next_u32()?;
        let maxval = self.next_u32()?;
        if width == 0 || height == 0 {
            return Err(IoError::InvalidData(format!(
                "invalid PNM dimensions: {}x{}",
                width, height
            )));
        }
        if maxval == 0 || maxval > 65535 {
            return Err(IoError::InvalidData(format!("invalid PNM maxval: {}", maxval)));
        }
        Ok(Header {
            magic,
            width,
            height,
            maxval,
        })
    }
}

/// Read a PNM image (P2/P3/P5/P6) from a reader as 8 bpp grayscale.
pub fn read_pnm<R: Read>(mut reader: R) -> IoResult<Pix> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;

    let mut scanner = Scanner {
        data: &data,
        pos: 0,
    };
    let header = scanner.header()?;
    let channels = match &header.magic {
        b"P2" | b"P5" => 1usize,
        b"P3" | b"P6" => 3usize,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNM type: {}",
                String::from_utf8_lossy(other)
            )));
        }
    };
    let nsamples = (header.width as usize)
        .checked_mul(header.height as usize)
        .and_then(|n| n.checked_mul(channels))
        .ok_or_else(|| {
            IoError::InvalidData(format!(
                "PNM dimensions {}x{} too large",
                header.width, header.height
            ))
        })?;

    let samples: Vec<u32> = if matches!(&header.magic, b"P2" | b"P3") {
        (0..nsamples)
            .map(|_| scanner.next_u32())
            .collect::<IoResult<_>>()?
    } else {
        // Exactly one whitespace byte separates the header from the raster
        let start = scanner.pos + 1;
        let bytes_per_sample = if header.maxval > 255 { 2 } else { 1 };
        let end = nsamples
            .checked_mul(bytes_per_sample)
            .and_then(|n| n.checked_add(start))
            .ok_or_else(|| IoError::InvalidData("PNM raster size overflows".to_string()))?;
        let raster = data
            .get(start..end)
            .ok_or_else(|| IoError::InvalidData("PNM raster truncated".to_string()))?;
        if bytes_per_sample == 2 {
            raster
                .chunks_exact(2)
                .map(|s| u16::from_be_bytes([s[0], s[1]]) as u32)
                .collect()
        } else {
            raster.iter().map(|&b| b as u32).collect()
        }
    };

    let maxval = header.maxval;
    if let Some(&bad) = samples.iter().find(|&&v| v > maxval) {
        return Err(IoError::InvalidData(format!(
            "PNM sample {} exceeds maxval {}",
            bad, maxval
        )));
    }
    let rescale = |v: u32| -> u8 {
        if maxval == 255 {
            v as u8
        } else {
            ((v * 255 + maxval / 2) / maxval) as u8
        }
    };

    let gray: Vec<u8> = if channels == 1 {
        samples.iter().map(|&v| rescale(v)).collect()
    } else {
        samples
            .chunks_exact(3)
            .map(|p| color::rgb_to_gray(rescale(p[0]), rescale(p[1]), rescale(p[2])))
            .collect()
    };

    let mut pix_mut = Pix::from_gray_bytes(header.width, header.height, &gray)?.to_mut();
    pix_mut.set_informat(ImageFormat::Pnm);

    log::debug!(
        "decoded PNM {} {}x{} maxval {}",
        String::from_utf8_lossy(&header.magic),
        header.width,
        header.height,
        maxval
    );
    Ok(pix_mut.into())
}

/// Write a `Pix` as binary PNM to a writer.
///
/// Chooses P5 (8 bpp grayscale) or P6 (32 bpp RGB) based on the pixel depth.
pub fn write_pnm<W: Write>(pix: &Pix, mut writer: W) -> IoResult<()> {
    let (magic, samples) = match pix.depth() {
        PixelDepth::Bit8 => ("P5", 1usize),
        PixelDepth::Bit32 => ("P6", 3usize),
    };
    write!(writer, "{}\n{} {}\n255\n", magic, pix.width(), pix.height())?;

    let mut raster = Vec::with_capacity(pix.pixel_count() * samples);
    for &val in pix.data() {
        match pix.depth() {
            PixelDepth::Bit8 => raster.push(val as u8),
            PixelDepth::Bit32 => {
                let (r, g, b) = color::extract_rgb(val);
                raster.extend_from_slice(&[r, g, b]);
            }
        }
    }
    writer.write_all(&raster)?;
    Ok(())
}
