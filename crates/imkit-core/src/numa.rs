//! Numa - Numeric arrays
//!
//! Arrays of floating-point numbers used for histogram bin edges and
//! counts, and for sampled curves.

use crate::error::{Error, Result};

/// Array of floating-point numbers
///
/// `Numa` manages a dynamic array of `f32` values. The optional parameters
/// `startx` and `delx` describe evenly spaced x positions for sampled
/// functions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Numa {
    data: Vec<f32>,
    startx: f32,
    delx: f32,
}

impl Numa {
    /// Create a new empty Numa
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Create a Numa with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_vec(Vec::with_capacity(capacity))
    }

    /// Create a Numa from a vector of values
    pub fn from_vec(data: Vec<f32>) -> Self {
        Numa {
            data,
            startx: 0.0,
            delx: 1.0,
        }
    }

    /// Create `count` evenly spaced values over the closed interval
    /// `[start, stop]`.
    ///
    /// The last value is exactly `stop`. The `startx`/`delx` parameters
    /// are set to match the spacing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `count < 2`.
    ///
    /// # Examples
    ///
    /// ```
    /// use imkit_core::Numa;
    ///
    /// let edges = Numa::linspace(0.0, 255.0, 6).unwrap();
    /// assert_eq!(edges.as_slice(), &[0.0, 51.0, 102.0, 153.0, 204.0, 255.0]);
    /// ```
    pub fn linspace(start: f32, stop: f32, count: usize) -> Result<Numa> {
        if count < 2 {
            return Err(Error::InvalidParameter(format!(
                "linspace needs at least 2 points, got {count}"
            )));
        }
        let step = (stop as f64 - start as f64) / (count - 1) as f64;
        let mut na: Numa = (0..count)
            .map(|i| (start as f64 + i as f64 * step) as f32)
            .collect();
        na.data[count - 1] = stop;
        na.set_parameters(start, step as f32);
        Ok(na)
    }

    /// Get the number of values
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get a value by index
    pub fn get(&self, index: usize) -> Option<f32> {
        self.data.get(index).copied()
    }

    /// Add a value to the end
    pub fn push(&mut self, val: f32) {
        self.data.push(val);
    }

    /// Set a value at index
    pub fn set(&mut self, index: usize, val: f32) -> Result<()> {
        let len = self.data.len();
        let slot = self
            .data
            .get_mut(index)
            .ok_or(Error::IndexOutOfBounds { index, len })?;
        *slot = val;
        Ok(())
    }

    /// Get the underlying data as a slice
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Get `(startx, delx)`
    pub fn parameters(&self) -> (f32, f32) {
        (self.startx, self.delx)
    }

    /// Set `(startx, delx)`
    pub fn set_parameters(&mut self, startx: f32, delx: f32) {
        self.startx = startx;
        self.delx = delx;
    }

    /// Smallest value, or `None` if empty
    pub fn min_value(&self) -> Option<f32> {
        self.iter().reduce(f32::min)
    }

    /// Largest value, or `None` if empty
    pub fn max_value(&self) -> Option<f32> {
        self.iter().reduce(f32::max)
    }

    /// Sum of all values, or `None` if empty
    pub fn sum(&self) -> Option<f32> {
        if self.data.is_empty() {
            return None;
        }
        Some(self.data.iter().map(|&v| v as f64).sum::<f64>() as f32)
    }

    /// Compute the cumulative (partial) sums of the array.
    ///
    /// Returns a new Numa where `result[i] = sum(self[0..=i])`.
    /// The last element equals the total sum of the input.
    ///
    /// # Examples
    ///
    /// ```
    /// use imkit_core::Numa;
    ///
    /// let na = Numa::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    /// let psums = na.partial_sums();
    /// assert_eq!(psums.get(0), Some(1.0));
    /// assert_eq!(psums.get(4), Some(15.0));
    /// ```
    pub fn partial_sums(&self) -> Numa {
        let mut result = Numa::with_capacity(self.len());
        let mut cumsum = 0.0f64;
        for val in self.iter() {
            cumsum += val as f64;
            result.push(cumsum as f32);
        }
        result.set_parameters(self.startx, self.delx);
        result
    }

    /// Create an iterator over values
    pub fn iter(&self) -> impl ExactSizeIterator<Item = f32> + '_ {
        self.data.iter().copied()
    }
}

impl IntoIterator for Numa {
    type Item = f32;
    type IntoIter = std::vec::IntoIter<f32>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl FromIterator<f32> for Numa {
    fn from_iter<T: IntoIterator<Item = f32>>(iter: T) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl std::ops::Index<usize> for Numa {
    type Output = f32;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl std::ops::IndexMut<usize> for Numa {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}
