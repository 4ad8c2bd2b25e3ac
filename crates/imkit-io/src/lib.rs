//! imkit-io - Grayscale image decoding and export
//!
//! Every decoder produces an 8 bpp grayscale [`Pix`], the way a
//! grayscale-mode `imread` does. Encoders write 8 bpp gray or 32 bpp RGB
//! rasters, which is what figures and transformed images need.
//!
//! # Supported formats
//!
//! | Format | Read | Write | Feature |
//! |--------|------|-------|---------|
//! | PNG    | yes  | yes   | `png-format` |
//! | JPEG   | yes  | no    | `jpeg` |
//! | PNM    | yes  | yes   | `pnm` |

mod error;
mod format;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{detect_format, detect_format_from_bytes};
pub use imkit_core::ImageFormat;

use imkit_core::Pix;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::Path;

/// Read an image from a file as 8 bpp grayscale
///
/// The format is detected from the file's magic bytes, not its extension.
///
/// # Errors
///
/// Returns [`IoError::Io`] if the file cannot be opened and a decode
/// error if its contents are not a supported image.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    log::debug!("reading {} as {:?}", path.display(), format);
    read_image_format(reader, format)
}

/// Read an image from memory as 8 bpp grayscale
pub fn read_image_mem(data: &[u8]) -> IoResult<Pix> {
    let format = detect_format_from_bytes(data)?;
    read_image_format(Cursor::new(data), format)
}

/// Decode from a buffered reader in a known format
#[allow(unused_variables)]
pub fn read_image_format<R: std::io::BufRead + std::io::Seek>(
    reader: R,
    format: ImageFormat,
) -> IoResult<Pix> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),

        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(reader),

        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(reader),

        _ => Err(IoError::UnsupportedFormat(format!(
            "format {:?} is not supported for reading",
            format
        ))),
    }
}

/// Write an image to a file
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P, format: ImageFormat) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_image_format(pix, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

/// Encode an image into memory
pub fn write_image_mem(pix: &Pix, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_image_format(pix, &mut buf, format)?;
    Ok(buf)
}

/// Encode to a writer in the given format
#[allow(unused_variables)]
pub fn write_image_format<W: Write>(pix: &Pix, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(pix, writer),

        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(pix, writer),

        _ => Err(IoError::UnsupportedFormat(format!(
            "format {:?} is not supported for writing",
            format
        ))),
    }
}
