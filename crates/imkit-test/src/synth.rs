//! Synthetic 8 bpp test images

use crate::TestResult;
use imkit_core::{FPix, Pix};

/// Horizontal ramp: column `x` holds `round(255 * x / (width - 1))`.
///
/// A one-column image is all zeros.
pub fn make_gradient(width: u32, height: u32) -> TestResult<Pix> {
    let denom = width.saturating_sub(1).max(1) as f32;
    let row: Vec<u8> = (0..width)
        .map(|x| (255.0 * x as f32 / denom).round() as u8)
        .collect();
    let bytes = row.repeat(height as usize);
    Ok(Pix::from_gray_bytes(width, height, &bytes)?)
}

/// Every pixel set to `value`.
pub fn make_uniform(width: u32, height: u32, value: u8) -> TestResult<Pix> {
    let bytes = vec![value; (width as usize) * (height as usize)];
    Ok(Pix::from_gray_bytes(width, height, &bytes)?)
}

/// Checkerboard of `cell`-pixel squares alternating `lo` (top-left) and `hi`.
pub fn make_checker(width: u32, height: u32, cell: u32, lo: u8, hi: u8) -> TestResult<Pix> {
    let cell = cell.max(1);
    let mut bytes = Vec::with_capacity((width as usize) * (height as usize));
    for y in 0..height {
        for x in 0..width {
            let odd = (x / cell + y / cell) % 2 == 1;
            bytes.push(if odd { hi } else { lo });
        }
    }
    Ok(Pix::from_gray_bytes(width, height, &bytes)?)
}

/// Float view of [`make_gradient`].
pub fn make_gradient_fpix(width: u32, height: u32) -> TestResult<FPix> {
    Ok(FPix::from_pix(&make_gradient(width, height)?))
}
