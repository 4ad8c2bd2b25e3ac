//! Contrast stretching with gamma correction
//!
//! `imadjust` remaps intensities through the curve
//!
//! ```text
//! y = ((x - a) / (b - a))^gamma * (d - c) + c
//! ```
//!
//! where `[c, d]` is `lim_in` and `[a, b]` is `lim_out`. Note the naming:
//! `lim_out` supplies the normalization bounds applied to the input and
//! `lim_in` the range the curve is stretched to. The result is rescaled
//! to [0, 255] by its own maximum.

use crate::{EnhanceError, EnhanceResult};
use imkit_core::{FPix, Numa};

/// Number of samples in the curve drawn for `plot = true`.
pub const CURVE_SAMPLES: usize = 1000;

/// Parameters for [`imadjust`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustParams {
    /// `(c, d)`: range the curve is stretched to
    pub lim_in: (f32, f32),
    /// `(a, b)`: normalization bounds of the input
    pub lim_out: (f32, f32),
    /// Power-law exponent
    pub gamma: f32,
    /// Also render the curve (handled by the plotting layer)
    pub plot: bool,
}

impl Default for AdjustParams {
    fn default() -> Self {
        Self {
            lim_in: (0.0, 1.0),
            lim_out: (0.0, 1.0),
            gamma: 1.0,
            plot: false,
        }
    }
}

impl AdjustParams {
    /// Evaluate the adjustment curve at `x`.
    pub fn curve_value(&self, x: f64) -> f64 {
        let (c, d) = (self.lim_in.0 as f64, self.lim_in.1 as f64);
        let (a, b) = (self.lim_out.0 as f64, self.lim_out.1 as f64);
        ((x - a) / (b - a)).powf(self.gamma as f64) * (d - c) + c
    }

    fn check(&self) -> EnhanceResult<()> {
        if self.lim_out.0 == self.lim_out.1 {
            return Err(EnhanceError::DegenerateInput(format!(
                "lim_out bounds are equal ({}), the curve divides by zero",
                self.lim_out.0
            )));
        }
        if !(self.lim_in.0.is_finite()
            && self.lim_in.1.is_finite()
            && self.lim_out.0.is_finite()
            && self.lim_out.1.is_finite()
            && self.gamma.is_finite())
        {
            return Err(EnhanceError::InvalidParameters(format!(
                "non-finite adjust parameters: {:?}",
                self
            )));
        }
        Ok(())
    }
}

/// Contrast stretching with gamma correction, MATLAB `imadjust` style.
///
/// Steps, in order:
/// 1. if the image's maximum exceeds 1, divide every sample by that
///    maximum (not by 255), otherwise use the samples as they are;
/// 2. apply [`AdjustParams::curve_value`];
/// 3. divide by the maximum of the result, multiply by 255 and truncate
///    toward zero.
///
/// The input is not modified. `params.plot` is ignored here.
///
/// # Errors
///
/// Returns [`EnhanceError::DegenerateInput`] if `lim_out` has equal
/// bounds, if the adjusted image has maximum 0, or if any adjusted
/// sample is not finite (e.g. a negative base raised to a fractional
/// gamma).
///
/// # Examples
///
/// ```
/// use imkit_core::FPix;
/// use imkit_enhance::{AdjustParams, imadjust};
///
/// let fpix = FPix::from_rows(&[[0.0, 0.25, 0.5, 1.0]]).unwrap();
/// let out = imadjust(&fpix, &AdjustParams::default()).unwrap();
/// assert_eq!(out.data(), &[0.0, 63.0, 127.0, 255.0]);
/// ```
pub fn imadjust(fpix: &FPix, params: &AdjustParams) -> EnhanceResult<FPix> {
    params.check()?;
    log::debug!(
        "imadjust: lim_in {:?}, lim_out {:?}, gamma {}",
        params.lim_in,
        params.lim_out,
        params.gamma
    );

    let max = fpix.max_value() as f64;
    let norm = if max > 1.0 { max } else { 1.0 };

    let adjusted: Vec<f64> = fpix
        .data()
        .iter()
        .map(|&v| params.curve_value(v as f64 / norm))
        .collect();

    if let Some(bad) = adjusted.iter().find(|v| !v.is_finite()) {
        return Err(EnhanceError::DegenerateInput(format!(
            "adjusted sample is not finite ({})",
            bad
        )));
    }
    let adj_max = adjusted.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if adj_max == 0.0 {
        return Err(EnhanceError::DegenerateInput(
            "adjusted image has maximum 0".to_string(),
        ));
    }

    let data = adjusted
        .into_iter()
        .map(|v| (v / adj_max * 255.0).trunc() as f32)
        .collect();
    Ok(FPix::from_data(fpix.width(), fpix.height(), data)?)
}

/// Sample the adjustment curve at `samples` evenly spaced points in [0, 1].
///
/// Returns `(x, y)`. Points where the curve is not real (NaN) are kept,
/// the plotting layer skips them.
///
/// # Errors
///
/// Returns [`EnhanceError::DegenerateInput`] if `lim_out` has equal bounds
/// and [`EnhanceError::InvalidParameters`] if `samples < 2`.
pub fn adjust_curve(params: &AdjustParams, samples: usize) -> EnhanceResult<(Numa, Numa)> {
    params.check()?;
    let xs = Numa::linspace(0.0, 1.0, samples)
        .map_err(|e| EnhanceError::InvalidParameters(e.to_string()))?;
    let mut ys: Numa = xs.iter().map(|x| params.curve_value(x as f64) as f32).collect();
    let (startx, delx) = xs.parameters();
    ys.set_parameters(startx, delx);
    Ok((xs, ys))
}
