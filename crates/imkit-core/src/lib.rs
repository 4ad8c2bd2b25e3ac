//! imkit Core - Basic data structures for grayscale image work
//!
//! This crate provides the data structures shared by every imkit crate:
//!
//! - [`Pix`] / [`PixMut`] - Integer raster (8 bpp gray or 32 bpp RGB)
//! - [`FPix`] - Floating-point image, the working type of the intensity
//!   transforms
//! - [`Numa`] - Numeric array (bin edges, counts, sampled curves)
//! - [`Histogram`] - Bin edges plus counts computed from an [`FPix`]
//! - [`Color`] / [`Rect`] - Drawing primitives used when rendering figures

pub mod error;
pub mod fpix;
pub mod histogram;
pub mod numa;
pub mod pix;

pub use error::{Error, Result};
pub use fpix::{FPix, NegativeHandling};
pub use histogram::Histogram;
pub use numa::Numa;
pub use pix::graphics::{Color, Rect};
pub use pix::{ImageFormat, Pix, PixMut, PixelDepth};

/// Color channel helpers for 32-bit RGBA pixels.
///
/// # Pixel format
///
/// 32-bit pixels are stored as `0xRRGGBBAA` (red in MSB, alpha in LSB).
pub mod color {
    /// Shift amounts for extracting color channels
    pub const RED_SHIFT: u32 = 24;
    pub const GREEN_SHIFT: u32 = 16;
    pub const BLUE_SHIFT: u32 = 8;
    pub const ALPHA_SHIFT: u32 = 0;

    /// Extract red component from a 32-bit pixel.
    #[inline]
    pub fn red(pixel: u32) -> u8 {
        ((pixel >> RED_SHIFT) & 0xff) as u8
    }

    /// Extract green component from a 32-bit pixel.
    #[inline]
    pub fn green(pixel: u32) -> u8 {
        ((pixel >> GREEN_SHIFT) & 0xff) as u8
    }

    /// Extract blue component from a 32-bit pixel.
    #[inline]
    pub fn blue(pixel: u32) -> u8 {
        ((pixel >> BLUE_SHIFT) & 0xff) as u8
    }

    /// Extract alpha component from a 32-bit pixel.
    #[inline]
    pub fn alpha(pixel: u32) -> u8 {
        ((pixel >> ALPHA_SHIFT) & 0xff) as u8
    }

    /// Compose a 32-bit RGB pixel (alpha = 255).
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        compose_rgba(r, g, b, 255)
    }

    /// Compose a 32-bit RGBA pixel.
    #[inline]
    pub fn compose_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
        ((r as u32) << RED_SHIFT)
            | ((g as u32) << GREEN_SHIFT)
            | ((b as u32) << BLUE_SHIFT)
            | ((a as u32) << ALPHA_SHIFT)
    }

    /// Extract RGB values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel))
    }

    /// Extract RGBA values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgba(pixel: u32) -> (u8, u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel), alpha(pixel))
    }

    /// Luma of an RGB triple with BT.601 weights.
    ///
    /// Uses 14-bit fixed point (`4899 R + 9617 G + 1868 B`, rounded), the
    /// same integer form grayscale decoders use, so that gray conversion
    /// of decoded color files is bit-exact and reproducible.
    #[inline]
    pub fn rgb_to_gray(r: u8, g: u8, b: u8) -> u8 {
        let sum = 4899 * r as u32 + 9617 * g as u32 + 1868 * b as u32;
        ((sum + (1 << 13)) >> 14) as u8
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_compose_extract() {
            let p = compose_rgb(10, 20, 30);
            assert_eq!(extract_rgba(p), (10, 20, 30, 255));
        }

        #[test]
        fn test_rgb_to_gray_primaries() {
            assert_eq!(rgb_to_gray(0, 0, 0), 0);
            assert_eq!(rgb_to_gray(255, 255, 255), 255);
            assert_eq!(rgb_to_gray(255, 0, 0), 76);
            assert_eq!(rgb_to_gray(0, 255, 0), 150);
            assert_eq!(rgb_to_gray(0, 0, 255), 29);
        }

        #[test]
        fn test_rgb_to_gray_neutral() {
            for v in [1u8, 17, 128, 254] {
                assert_eq!(rgb_to_gray(v, v, v), v);
            }
        }
    }
}
