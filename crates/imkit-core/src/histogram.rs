//! Intensity histograms over explicit bin edges
//!
//! A [`Histogram`] pairs `n + 1` bin edges with `n` counts. Bin `i` covers
//! `[edges[i], edges[i + 1])`, except the last bin, which also includes its
//! right edge. Samples outside `[edges[0], edges[n]]` (and NaN samples)
//! are not counted, but still belong to the image's total when
//! normalizing.
//!
//! Per-bin values are kept in `f64`, so raw counts stay exact for any
//! image that fits in memory. The [`Numa`] returned by
//! [`Histogram::counts`] is an `f32` view of them for plotting.

use crate::error::{Error, Result};
use crate::fpix::FPix;
use crate::numa::Numa;

/// Bin edges plus per-bin counts computed from an [`FPix`]
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    edges: Numa,
    values: Vec<f64>,
    counts: Numa,
    total: usize,
    out_of_range: usize,
    normalized: bool,
    cumulative: bool,
}

impl Histogram {
    /// Count the samples of `fpix` falling in each bin delimited by `edges`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if fewer than two edges are given
    /// or the edges are not strictly increasing.
    ///
    /// # Examples
    ///
    /// ```
    /// use imkit_core::{FPix, Histogram, Numa};
    ///
    /// let fpix = FPix::from_rows(&[[0.0, 10.0], [200.0, 255.0]]).unwrap();
    /// let edges = Numa::linspace(0.0, 255.0, 3).unwrap();
    /// let hist = Histogram::compute(&fpix, &edges).unwrap();
    /// assert_eq!(hist.counts().as_slice(), &[2.0, 2.0]);
    /// ```
    pub fn compute(fpix: &FPix, edges: &Numa) -> Result<Self> {
        if edges.len() < 2 {
            return Err(Error::InvalidParameter(format!(
                "histogram needs at least 2 bin edges, got {}",
                edges.len()
            )));
        }
        let e = edges.as_slice();
        if !e.windows(2).all(|w| w[0] < w[1]) {
            return Err(Error::InvalidParameter(
                "bin edges must be strictly increasing".to_string(),
            ));
        }

        let nbins = e.len() - 1;
        let (first, last) = (e[0], e[nbins]);
        let mut counts = vec![0u64; nbins];
        let mut out_of_range = 0usize;

        for &v in fpix.data() {
            if !(v >= first && v <= last) {
                out_of_range += 1;
                continue;
            }
            // Index of the last edge <= v; the right-most edge folds into
            // the last bin.
            let bin = (e.partition_point(|&edge| edge <= v) - 1).min(nbins - 1);
            counts[bin] += 1;
        }

        let values: Vec<f64> = counts.into_iter().map(|c| c as f64).collect();
        Ok(Histogram {
            edges: edges.clone(),
            counts: f32_view(&values),
            values,
            total: fpix.len(),
            out_of_range,
            normalized: false,
            cumulative: false,
        })
    }

    /// Divide every count by the total number of samples in the source image.
    ///
    /// Applying it twice has no further effect.
    pub fn normalize(mut self) -> Self {
        if !self.normalized {
            let total = self.total as f64;
            self.values.iter_mut().for_each(|v| *v /= total);
            self.counts = f32_view(&self.values);
            self.normalized = true;
        }
        self
    }

    /// Replace the counts by their running sum.
    ///
    /// Applying it twice has no further effect.
    pub fn cumulate(mut self) -> Self {
        if !self.cumulative {
            let mut acc = 0.0f64;
            for v in &mut self.values {
                acc += *v;
                *v = acc;
            }
            self.counts = f32_view(&self.values);
            self.cumulative = true;
        }
        self
    }

    /// The `n + 1` bin edges
    pub fn edges(&self) -> &Numa {
        &self.edges
    }

    /// The `n` per-bin values, rounded to `f32`
    pub fn counts(&self) -> &Numa {
        &self.counts
    }

    /// The `n` per-bin values at full precision
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of bins
    pub fn nbins(&self) -> usize {
        self.counts.len()
    }

    /// Number of samples in the source image
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of samples that fell outside every bin
    pub fn out_of_range(&self) -> usize {
        self.out_of_range
    }

    /// Whether counts were divided by [`Histogram::total`]
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// Whether counts are running sums
    pub fn is_cumulative(&self) -> bool {
        self.cumulative
    }

    /// Sum of the per-bin values
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Consume into `(counts, edges)`
    pub fn into_parts(self) -> (Numa, Numa) {
        (self.counts, self.edges)
    }
}

fn f32_view(values: &[f64]) -> Numa {
    values.iter().map(|&v| v as f32).collect()
}

impl FPix {
    /// Histogram of this image over `edges`; see [`Histogram::compute`].
    pub fn histogram(&self, edges: &Numa) -> Result<Histogram> {
        Histogram::compute(self, edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(n: usize) -> Numa {
        Numa::linspace(0.0, 255.0, n).unwrap()
    }

    #[test]
    fn test_half_open_bins_last_closed() {
        // Edges 0, 51, 102, 153, 204, 255
        let fpix = FPix::from_rows(&[[0.0, 50.9, 51.0, 204.0, 255.0]]).unwrap();
        let hist = fpix.histogram(&edges(6)).unwrap();
        assert_eq!(hist.counts().as_slice(), &[2.0, 1.0, 0.0, 0.0, 2.0]);
        assert_eq!(hist.out_of_range(), 0);
    }

    #[test]
    fn test_out_of_range_dropped() {
        let fpix = FPix::from_rows(&[[-1.0, 10.0, 255.5, f32::NAN]]).unwrap();
        let hist = fpix.histogram(&edges(2)).unwrap();
        assert_eq!(hist.sum(), 1.0);
        assert_eq!(hist.out_of_range(), 3);
        assert_eq!(hist.total(), 4);
    }

    #[test]
    fn test_edge_count_relation() {
        let fpix = FPix::new_with_value(8, 8, 77.0).unwrap();
        for n in [2, 3, 20, 256] {
            let hist = fpix.histogram(&edges(n)).unwrap();
            assert_eq!(hist.edges().len(), n);
            assert_eq!(hist.nbins(), n - 1);
            assert_eq!(hist.sum(), 64.0);
        }
    }

    #[test]
    fn test_normalize_and_cumulate() {
        let fpix = FPix::from_rows(&[[0.0, 100.0, 200.0, 250.0]]).unwrap();
        let raw = fpix.histogram(&edges(5)).unwrap();
        let norm = raw.clone().normalize();
        assert!((norm.sum() - 1.0).abs() < 1e-6);
        assert!(norm.is_normalized());

        let cum = norm.clone().cumulate();
        assert!(cum.is_cumulative());
        let c = cum.counts().as_slice();
        assert!(c.windows(2).all(|w| w[0] <= w[1]));
        assert!((c[c.len() - 1] as f64 - norm.sum()).abs() < 1e-6);

        // Idempotent
        assert_eq!(cum.clone().cumulate(), cum);
        assert_eq!(norm.clone().normalize(), norm);
    }

    #[test]
    fn test_counts_exact_past_f32_mantissa() {
        // One bin holding more than 2^24 samples
        let fpix = FPix::new_with_value(4097, 4097, 0.0).unwrap();
        let hist = fpix.histogram(&edges(20)).unwrap();
        let total = hist.total();
        assert_eq!(total, 16_785_409);
        assert_eq!(hist.values()[0], total as f64);
        assert_eq!(hist.sum(), total as f64);

        let cum = hist.clone().cumulate();
        assert_eq!(cum.values()[cum.nbins() - 1], total as f64);

        let norm = hist.normalize();
        assert_eq!(norm.values()[0], 1.0);
    }

    #[test]
    fn test_bad_edges() {
        let fpix = FPix::new(2, 2).unwrap();
        assert!(fpix.histogram(&Numa::from_vec(vec![0.0])).is_err());
        assert!(fpix.histogram(&Numa::from_vec(vec![0.0, 0.0])).is_err());
        assert!(fpix.histogram(&Numa::from_vec(vec![5.0, 1.0])).is_err());
    }
}
