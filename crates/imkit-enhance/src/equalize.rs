//! Global histogram equalization of 8 bpp images

use crate::point::{TrcLut, map_copy};
use crate::{EnhanceError, EnhanceResult};
use imkit_core::{Pix, PixelDepth};

/// 256-bin gray histogram of an 8 bpp image.
fn gray_histogram(pix: &Pix) -> [u64; 256] {
    let mut hist = [0u64; 256];
    for &v in pix.data() {
        hist[(v & 0xff) as usize] += 1;
    }
    hist
}

/// Equalization TRC for an 8 bpp image.
///
/// With `i0` the lowest occupied level, `lut[j] = 0` for `j <= i0` and
/// `lut[j] = round(255 * (cdf[j] - hist[i0]) / (total - hist[i0]))`
/// above it, so the darkest level maps to 0 and the brightest to 255.
/// Ties round to even. An image with a single level gets the identity
/// table.
///
/// # Errors
///
/// Returns [`EnhanceError::UnsupportedDepth`] for anything but 8 bpp.
pub fn equalize_trc(pix: &Pix) -> EnhanceResult<TrcLut> {
    if pix.depth() != PixelDepth::Bit8 {
        return Err(EnhanceError::UnsupportedDepth {
            expected: "8 bpp",
            actual: pix.depth().bits(),
        });
    }

    let hist = gray_histogram(pix);
    let total = pix.pixel_count() as u64;

    let mut lut = [0u8; 256];
    // A Pix has at least one pixel, so some level is occupied
    let i0 = hist.iter().position(|&c| c > 0).unwrap_or(0);

    if hist[i0] == total {
        for (i, entry) in lut.iter_mut().enumerate() {
            *entry = i as u8;
        }
        return Ok(lut);
    }

    let scale = 255.0f32 / (total - hist[i0]) as f32;
    let mut sum = 0u64;
    for j in (i0 + 1)..256 {
        sum += hist[j];
        lut[j] = (sum as f32 * scale).round_ties_even().clamp(0.0, 255.0) as u8;
    }

    Ok(lut)
}

/// Standard global histogram equalization.
///
/// Returns a new image of the same size; a single-level image comes back
/// unchanged.
///
/// # Errors
///
/// Returns [`EnhanceError::UnsupportedDepth`] for anything but 8 bpp.
pub fn equalize_hist(pix: &Pix) -> EnhanceResult<Pix> {
    let lut = equalize_trc(pix)?;
    log::debug!("equalize_hist: {}x{}", pix.width(), pix.height());
    map_copy(pix, &lut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_unchanged() {
        let pix = Pix::from_gray_bytes(3, 3, &[77; 9]).unwrap();
        let out = equalize_hist(&pix).unwrap();
        assert_eq!(out.data(), pix.data());
    }

    #[test]
    fn test_two_levels_stretch_to_extremes() {
        let pix = Pix::from_gray_bytes(4, 1, &[10, 200, 10, 200]).unwrap();
        let out = equalize_hist(&pix).unwrap();
        assert_eq!(out.data(), &[0, 255, 0, 255]);
    }

    #[test]
    fn test_uniform_ramp() {
        // Levels 0, 1, 2, 3 once each: cdf above i0 is 1, 2, 3 of 3
        let pix = Pix::from_gray_bytes(4, 1, &[0, 1, 2, 3]).unwrap();
        let out = equalize_hist(&pix).unwrap();
        assert_eq!(out.data(), &[0, 85, 170, 255]);
    }

    #[test]
    fn test_monotonic_lut() {
        let bytes: Vec<u8> = (0..200u32).map(|i| ((i * i) % 251) as u8).collect();
        let pix = Pix::from_gray_bytes(20, 10, &bytes).unwrap();
        let lut = equalize_trc(&pix).unwrap();
        assert!(lut.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(lut[255], 255);
    }

    #[test]
    fn test_rejects_rgb() {
        let pix = Pix::new(2, 2, PixelDepth::Bit32).unwrap();
        assert!(matches!(
            equalize_hist(&pix),
            Err(EnhanceError::UnsupportedDepth { .. })
        ));
    }
}
