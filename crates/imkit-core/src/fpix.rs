//! FPix - Floating-point image
//!
//! `FPix` is the working type of the intensity transforms: a 2D array of
//! `f32` samples whose nominal range is [0, 255], though nothing enforces
//! it. Transforms may produce negative, fractional, or larger values.
//!
//! # Examples
//!
//! ```
//! use imkit_core::FPix;
//!
//! let mut fpix = FPix::new(100, 100).unwrap();
//! fpix.set_pixel(10, 20, 0.5).unwrap();
//! assert_eq!(fpix.get_pixel(10, 20).unwrap(), 0.5);
//! assert_eq!(fpix.max_value(), 0.5);
//! ```

use crate::color;
use crate::error::{Error, Result};
use crate::pix::{Pix, PixelDepth};

/// How to handle negative values when converting FPix to Pix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NegativeHandling {
    /// Clip negative values to zero
    #[default]
    ClipToZero,
    /// Take the absolute value
    TakeAbsValue,
}

/// Floating-point image
///
/// # Memory Layout
///
/// Data is stored in row-major order with no padding. The sample at (x, y)
/// is at index `y * width + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct FPix {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl FPix {
    /// Create a new FPix with all samples set to zero
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, 0.0)
    }

    /// Create a new FPix with all samples set to `value`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use imkit_core::FPix;
    ///
    /// let fpix = FPix::new_with_value(4, 4, 100.0).unwrap();
    /// assert_eq!(fpix.get_pixel(3, 3).unwrap(), 100.0);
    /// ```
    pub fn new_with_value(width: u32, height: u32, value: f32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let size = (width as usize) * (height as usize);
        Ok(FPix {
            width,
            height,
            data: vec![value; size],
        })
    }

    /// Create a FPix from row-major data
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or data length doesn't match.
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let expected_size = (width as usize) * (height as usize);
        if data.len() != expected_size {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{} = {}",
                data.len(),
                width,
                height,
                expected_size
            )));
        }

        Ok(FPix { width, height, data })
    }

    /// Create a FPix from a slice of equally long rows
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` for an empty grid and
    /// `Error::InvalidParameter` for ragged rows.
    ///
    /// # Examples
    ///
    /// ```
    /// use imkit_core::FPix;
    ///
    /// let fpix = FPix::from_rows(&[[0.0, 255.0], [255.0, 0.0]]).unwrap();
    /// assert_eq!(fpix.dimensions(), (2, 2));
    /// ```
    pub fn from_rows<R: AsRef<[f32]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.as_ref().len()) as u32;
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let mut data = Vec::with_capacity((width as usize) * (height as usize));
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width as usize {
                return Err(Error::InvalidParameter(format!(
                    "row {} has {} samples, expected {}",
                    y,
                    row.len(),
                    width
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(FPix { width, height, data })
    }

    /// Get the image width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the image dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total number of samples
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false; an FPix has at least one sample.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the sample at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<f32> {
        let idx = self.index(x, y)?;
        Ok(self.data[idx])
    }

    /// Set the sample at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, value: f32) -> Result<()> {
        let idx = self.index(x, y)?;
        self.data[idx] = value;
        Ok(())
    }

    fn index(&self, x: u32, y: u32) -> Result<usize> {
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: idx,
                len: self.data.len(),
            });
        }
        Ok(idx)
    }

    /// Get raw access to the sample data
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Get mutable access to the sample data
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Get a row of sample data
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[f32] {
        let start = (y as usize) * (self.width as usize);
        &self.data[start..start + self.width as usize]
    }

    /// Apply `f` to every sample, producing a new image of the same shape.
    pub fn map<F: FnMut(f32) -> f32>(&self, f: F) -> FPix {
        FPix {
            width: self.width,
            height: self.height,
            data: self.data.iter().copied().map(f).collect(),
        }
    }

    /// Smallest sample. NaN samples are ignored.
    pub fn min_value(&self) -> f32 {
        self.data.iter().copied().fold(f32::INFINITY, f32::min)
    }

    /// Largest sample. NaN samples are ignored.
    pub fn max_value(&self) -> f32 {
        self.data.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }

    /// Sum of all samples, accumulated in f64.
    pub fn sum(&self) -> f64 {
        self.data.iter().map(|&v| v as f64).sum()
    }

    /// Mean sample value.
    pub fn mean(&self) -> f64 {
        self.sum() / self.data.len() as f64
    }

    /// True when no sample is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }

    // ========================================================================
    // Conversion from / to Pix
    // ========================================================================

    /// Create a FPix from a Pix
    ///
    /// 8 bpp samples convert directly; 32 bpp pixels are reduced to their
    /// luma with [`color::rgb_to_gray`].
    pub fn from_pix(pix: &Pix) -> Self {
        let data = match pix.depth() {
            PixelDepth::Bit8 => pix.data().iter().map(|&v| v as f32).collect(),
            PixelDepth::Bit32 => pix
                .data()
                .iter()
                .map(|&p| {
                    let (r, g, b) = color::extract_rgb(p);
                    color::rgb_to_gray(r, g, b) as f32
                })
                .collect(),
        };
        FPix {
            width: pix.width(),
            height: pix.height(),
            data,
        }
    }

    /// Convert to an 8 bpp Pix
    ///
    /// Samples are rounded to the nearest integer and clamped to [0, 255];
    /// negatives are treated according to `neg_handling` first. NaN maps
    /// to 0.
    pub fn to_pix(&self, neg_handling: NegativeHandling) -> Result<Pix> {
        let mut pix_mut = Pix::new(self.width, self.height, PixelDepth::Bit8)?.to_mut();
        for (dst, &fval) in pix_mut.data_mut().iter_mut().zip(&self.data) {
            let fval = if fval < 0.0 {
                match neg_handling {
                    NegativeHandling::ClipToZero => 0.0,
                    NegativeHandling::TakeAbsValue => fval.abs(),
                }
            } else {
                fval
            };
            // `as` saturates and maps NaN to 0
            *dst = ((fval + 0.5) as u32).min(255);
        }
        Ok(pix_mut.into())
    }
}
