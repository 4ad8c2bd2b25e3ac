//! imkit-enhance - Pointwise intensity transforms
//!
//! Pure functions from image to image; inputs are never modified.
//!
//! - [`img_scale`] - Affine rescale of the intensity range
//! - [`imcomplement`] - Photographic negative, `|255 - x|`
//! - [`binarize`] - Threshold into the levels 0 and 255
//! - [`imadjust`] - Contrast stretching with gamma correction
//! - [`equalize_hist`] - Global histogram equalization (8 bpp)
//!
//! The float transforms work on [`imkit_core::FPix`]; the `_pix`
//! variants and [`equalize_hist`] work on 8 bpp [`imkit_core::Pix`]
//! through 256-entry lookup tables.

mod adjust;
mod equalize;
mod error;
mod point;

pub use adjust::{AdjustParams, CURVE_SAMPLES, adjust_curve, imadjust};
pub use equalize::{equalize_hist, equalize_trc};
pub use error::{EnhanceError, EnhanceResult};
pub use point::{
    TrcLut, binarize, binarize_pix, binarize_trc, complement_trc, img_scale, imcomplement,
    imcomplement_pix, trc_map,
};
