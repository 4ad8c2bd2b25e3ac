//! Pointwise intensity transforms
//!
//! Linear rescale, negative, and binarization, each on float images and,
//! for the last two, as 256-entry tone reproduction curves (TRC) for
//! 8 bpp rasters.

use crate::{EnhanceError, EnhanceResult};
use imkit_core::{FPix, Pix, PixMut, PixelDepth};

/// A 256-entry lookup table for tone reproduction curve mapping.
///
/// Maps input pixel values [0..255] to output pixel values [0..255].
pub type TrcLut = [u8; 256];

/// Affinely rescale `fpix` so that its minimum maps to `min_target` and
/// its maximum to `max_target`.
///
/// `scale = (max_target - min_target) / (max - min)`,
/// `offset = -min * scale + min_target`, `out = x * scale + offset`.
/// The targets may be in any order and outside [0, 255].
///
/// # Errors
///
/// Returns [`EnhanceError::DegenerateInput`] for a constant image, where
/// the scale would divide by zero, and for images whose range is not
/// finite.
///
/// # Examples
///
/// ```
/// use imkit_core::FPix;
/// use imkit_enhance::img_scale;
///
/// let fpix = FPix::from_rows(&[[10.0, 20.0, 30.0]]).unwrap();
/// let out = img_scale(&fpix, 0.0, 255.0).unwrap();
/// assert_eq!(out.data(), &[0.0, 127.5, 255.0]);
/// ```
pub fn img_scale(fpix: &FPix, min_target: f32, max_target: f32) -> EnhanceResult<FPix> {
    let min = fpix.min_value() as f64;
    let max = fpix.max_value() as f64;
    if !(min.is_finite() && max.is_finite()) {
        return Err(EnhanceError::DegenerateInput(format!(
            "image range [{}, {}] is not finite",
            min, max
        )));
    }
    if max == min {
        return Err(EnhanceError::DegenerateInput(format!(
            "constant image (all samples {}) cannot be rescaled",
            min
        )));
    }

    let scale = (max_target as f64 - min_target as f64) / (max - min);
    let offset = -min * scale + min_target as f64;
    log::debug!(
        "img_scale: [{}, {}] -> [{}, {}], scale {}, offset {}",
        min,
        max,
        min_target,
        max_target,
        scale,
        offset
    );

    Ok(fpix.map(|v| (v as f64 * scale + offset) as f32))
}

/// Photographic negative: `|255 - x|` for every sample.
///
/// Out-of-range samples are not clamped; `300` becomes `45` and `-10`
/// becomes `265`.
pub fn imcomplement(fpix: &FPix) -> FPix {
    fpix.map(|v| (255.0 - v).abs())
}

/// Threshold into the two levels 0 and 255: `255` where `x >= threshold`,
/// else `0`.
pub fn binarize(fpix: &FPix, threshold: f32) -> FPix {
    fpix.map(|v| if v >= threshold { 255.0 } else { 0.0 })
}

/// TRC of the negative transform (`255 - i`).
pub fn complement_trc() -> TrcLut {
    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = 255 - i as u8;
    }
    lut
}

/// TRC of the binarization transform: `255` where `i >= threshold`, else `0`.
pub fn binarize_trc(threshold: f32) -> TrcLut {
    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = if i as f32 >= threshold { 255 } else { 0 };
    }
    lut
}

/// Apply a TRC lookup table to an 8 bpp image in-place.
///
/// # Errors
///
/// Returns [`EnhanceError::UnsupportedDepth`] for anything but 8 bpp.
pub fn trc_map(pix: &mut PixMut, lut: &TrcLut) -> EnhanceResult<()> {
    if pix.depth() != PixelDepth::Bit8 {
        return Err(EnhanceError::UnsupportedDepth {
            expected: "8 bpp",
            actual: pix.depth().bits(),
        });
    }
    for val in pix.data_mut() {
        *val = lut[(*val & 0xff) as usize] as u32;
    }
    Ok(())
}

/// Copy `pix` and remap it through `lut`.
pub(crate) fn map_copy(pix: &Pix, lut: &TrcLut) -> EnhanceResult<Pix> {
    let mut pix_mut = pix.to_mut();
    trc_map(&mut pix_mut, lut)?;
    Ok(pix_mut.into())
}

/// [`imcomplement`] for 8 bpp rasters.
pub fn imcomplement_pix(pix: &Pix) -> EnhanceResult<Pix> {
    map_copy(pix, &complement_trc())
}

/// [`binarize`] for 8 bpp rasters.
pub fn binarize_pix(pix: &Pix, threshold: f32) -> EnhanceResult<Pix> {
    map_copy(pix, &binarize_trc(threshold))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_img_scale_maps_extremes() {
        let fpix = FPix::from_rows(&[[3.0, 7.0], [5.0, 11.0]]).unwrap();
        let out = img_scale(&fpix, 0.0, 255.0).unwrap();
        assert_eq!(out.min_value(), 0.0);
        assert_eq!(out.max_value(), 255.0);
        assert_eq!(out.get_pixel(0, 1).unwrap(), 63.75);
    }

    #[test]
    fn test_img_scale_inverted_targets() {
        let fpix = FPix::from_rows(&[[0.0, 10.0]]).unwrap();
        let out = img_scale(&fpix, 1.0, -1.0).unwrap();
        assert_eq!(out.data(), &[1.0, -1.0]);
    }

    #[test]
    fn test_img_scale_constant_is_degenerate() {
        let fpix = FPix::new_with_value(4, 4, 9.0).unwrap();
        assert!(matches!(
            img_scale(&fpix, 0.0, 255.0),
            Err(EnhanceError::DegenerateInput(_))
        ));
        let inf = FPix::from_rows(&[[0.0, f32::INFINITY]]).unwrap();
        assert!(img_scale(&inf, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_imcomplement_no_clamp() {
        let fpix = FPix::from_rows(&[[0.0, 255.0, 300.0, -10.0]]).unwrap();
        let out = imcomplement(&fpix);
        assert_eq!(out.data(), &[255.0, 0.0, 45.0, 265.0]);
    }

    #[test]
    fn test_binarize_levels() {
        let fpix = FPix::new_with_value(4, 4, 100.0).unwrap();
        assert!(binarize(&fpix, 100.0).data().iter().all(|&v| v == 255.0));
        assert!(binarize(&fpix, 101.0).data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_trc_tables() {
        let lut = complement_trc();
        assert_eq!((lut[0], lut[255], lut[100]), (255, 0, 155));
        let lut = binarize_trc(127.5);
        assert_eq!((lut[127], lut[128]), (0, 255));
    }

    #[test]
    fn test_pix_variants_match_float() {
        let pix = Pix::from_gray_bytes(4, 1, &[0, 99, 100, 255]).unwrap();
        let fpix = FPix::from_pix(&pix);

        let neg = imcomplement_pix(&pix).unwrap();
        assert_eq!(FPix::from_pix(&neg), imcomplement(&fpix));

        let bin = binarize_pix(&pix, 100.0).unwrap();
        assert_eq!(FPix::from_pix(&bin), binarize(&fpix, 100.0));
        // Input untouched
        assert_eq!(pix.get_pixel(1, 0), Some(99));
    }

    #[test]
    fn test_trc_map_rejects_rgb() {
        let mut pm = Pix::new(1, 1, PixelDepth::Bit32).unwrap().to_mut();
        assert!(matches!(
            trc_map(&mut pm, &complement_trc()),
            Err(EnhanceError::UnsupportedDepth { .. })
        ));
    }
}
