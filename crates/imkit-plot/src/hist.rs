//! Histogram bar plots

use crate::figure::{Figure, FigureSize};
use crate::{PlotError, PlotResult};
use imkit_core::{Color, FPix, Histogram, Numa, Rect};

/// Fill color used when a per-image color is `None`
pub const DEFAULT_BAR_COLOR: Color = Color::new(0x1f, 0x77, 0xb4);

/// Fraction of the data range added on each side of the x axis
const X_MARGIN: f32 = 0.05;
/// Headroom above the tallest bar
const Y_HEADROOM: f32 = 1.05;

/// Extra bar options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarStyle {
    /// Bar width as a fraction of the bin width, in (0, 1]
    pub rwidth: f32,
    /// Fill opacity, in [0, 1]
    pub alpha: f32,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            rwidth: 1.0,
            alpha: 1.0,
        }
    }
}

/// Options for [`show_histograms`]
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramOptions {
    /// Number of bin edges over [0, 255]; gives `bin_value - 1` bins
    pub bin_value: usize,
    /// Fill color per image; `None` selects [`DEFAULT_BAR_COLOR`]
    pub colors: Vec<Option<Color>>,
    /// Panel title per image
    pub titles: Vec<String>,
    /// Divide counts by the pixel count
    pub normalized: bool,
    /// Replace counts by their running sum
    pub cumulative: bool,
    /// Figure size in relative units
    pub size: FigureSize,
    /// Bar outline color; `None` draws no outline
    pub edgecolor: Option<Color>,
    /// Bar width and fill opacity
    pub bar: BarStyle,
}

impl Default for HistogramOptions {
    fn default() -> Self {
        Self {
            bin_value: 20,
            colors: vec![None, Some(Color::new(0, 128, 0))],
            titles: vec!["Normal".to_string(), "No normal".to_string()],
            normalized: true,
            cumulative: false,
            size: FigureSize::new(15.0, 5.0),
            edgecolor: Some(Color::BLACK),
            bar: BarStyle::default(),
        }
    }
}

impl HistogramOptions {
    fn check(&self, nimages: usize) -> PlotResult<()> {
        if nimages == 0 {
            return Err(PlotError::EmptyInput);
        }
        if self.bin_value < 2 {
            return Err(PlotError::InvalidParameters(format!(
                "bin_value must be at least 2, got {}",
                self.bin_value
            )));
        }
        if !(self.bar.rwidth > 0.0 && self.bar.rwidth <= 1.0) {
            return Err(PlotError::InvalidParameters(format!(
                "rwidth must be in (0, 1], got {}",
                self.bar.rwidth
            )));
        }
        if !(0.0..=1.0).contains(&self.bar.alpha) {
            return Err(PlotError::InvalidParameters(format!(
                "alpha must be in [0, 1], got {}",
                self.bar.alpha
            )));
        }
        if self.colors.len() < nimages {
            return Err(PlotError::ConfigurationMismatch(format!(
                "{} colors for {} images",
                self.colors.len(),
                nimages
            )));
        }
        if self.titles.len() < nimages {
            return Err(PlotError::ConfigurationMismatch(format!(
                "{} titles for {} images",
                self.titles.len(),
                nimages
            )));
        }
        Ok(())
    }
}

/// Histograms together with the figure they were drawn in
#[derive(Debug, Clone)]
pub struct HistogramPlot {
    histograms: Vec<Histogram>,
    figure: Figure,
}

impl HistogramPlot {
    /// One histogram per input image, as rendered
    pub fn histograms(&self) -> &[Histogram] {
        &self.histograms
    }

    /// The figure the bars were drawn in
    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    /// `(counts, edges)` when exactly one image was plotted.
    pub fn single(&self) -> Option<(&Numa, &Numa)> {
        match self.histograms.as_slice() {
            [h] => Some((h.counts(), h.edges())),
            _ => None,
        }
    }

    /// Consume into the histograms and the figure
    pub fn into_parts(self) -> (Vec<Histogram>, Figure) {
        (self.histograms, self.figure)
    }
}

/// Compute and draw the histogram of each image in its own panel.
///
/// Edges are `bin_value` evenly spaced values over [0, 255]. Counts are
/// divided by the pixel count when `normalized`, then accumulated when
/// `cumulative`. Samples outside [0, 255] are left out of every bin and
/// reported with a warning.
///
/// # Errors
///
/// - [`PlotError::EmptyInput`] if `images` is empty
/// - [`PlotError::InvalidParameters`] for `bin_value < 2` or a bar style
///   out of range
/// - [`PlotError::ConfigurationMismatch`] if `colors` or `titles` has
///   fewer entries than there are images
///
/// # Examples
///
/// ```
/// use imkit_core::FPix;
/// use imkit_plot::{HistogramOptions, show_histograms};
///
/// let fpix = FPix::from_rows(&[[0.0, 128.0], [255.0, 255.0]]).unwrap();
/// let plot = show_histograms(&[fpix], &HistogramOptions::default()).unwrap();
/// let (counts, edges) = plot.single().unwrap();
/// assert_eq!(edges.len(), 20);
/// assert_eq!(counts.len(), 19);
/// assert!((counts.sum().unwrap() - 1.0).abs() < 1e-6);
/// ```
pub fn show_histograms(images: &[FPix], options: &HistogramOptions) -> PlotResult<HistogramPlot> {
    options.check(images.len())?;
    let edges = Numa::linspace(0.0, 255.0, options.bin_value)?;

    let mut histograms = Vec::with_capacity(images.len());
    for fpix in images {
        let mut hist = fpix.histogram(&edges)?;
        if hist.out_of_range() > 0 {
            log::warn!(
                "show_histograms: {} of {} samples outside [0, 255] not binned",
                hist.out_of_range(),
                hist.total()
            );
        }
        if options.normalized {
            hist = hist.normalize();
        }
        if options.cumulative {
            hist = hist.cumulate();
        }
        histograms.push(hist);
    }

    let mut figure = Figure::new(options.size)?;
    let rects = figure.row_layout(images.len());
    for (i, (hist, axes)) in histograms.iter().zip(rects).enumerate() {
        let fill = options.colors[i].unwrap_or(DEFAULT_BAR_COLOR);
        let bars = bar_rects(hist, &axes, &options.bar);
        figure.draw(|canvas| -> PlotResult<()> {
            for bar in &bars {
                canvas.fill_rect_blend(bar, fill, options.bar.alpha)?;
                if let Some(edge) = options.edgecolor {
                    canvas.render_rect_color(bar, 1, edge);
                }
            }
            canvas.render_rect_color(&axes, 1, Color::BLACK);
            Ok(())
        })?;
        figure.push_panel(axes, Some(options.titles[i].clone()));
    }
    log::debug!(
        "show_histograms: {} images, {} bins",
        images.len(),
        options.bin_value - 1
    );

    Ok(HistogramPlot { histograms, figure })
}

/// Pixel rectangles of the bars of `hist` drawn inside `axes`.
///
/// The x axis spans the edges plus 5% on each side; the y axis runs from
/// 0 to 1.05 times the tallest bar. Empty bins give zero-height bars.
pub fn bar_rects(hist: &Histogram, axes: &Rect, style: &BarStyle) -> Vec<Rect> {
    let edges = hist.edges().as_slice();
    let (first, last) = (edges[0], edges[edges.len() - 1]);
    let margin = (last - first) * X_MARGIN;
    let (xlo, xhi) = (first - margin, last + margin);
    let ymax = match hist.counts().max_value() {
        Some(m) if m > 0.0 => m * Y_HEADROOM,
        _ => 1.0,
    };

    let px = |x: f32| axes.x as f32 + (x - xlo) / (xhi - xlo) * axes.w as f32;
    let bottom = axes.bottom();
    let py = |y: f32| bottom as f32 - y / ymax * (axes.h - 1) as f32;

    hist.counts()
        .iter()
        .zip(edges.windows(2))
        .map(|(count, bin)| {
            let center = (bin[0] + bin[1]) / 2.0;
            let half = (bin[1] - bin[0]) * style.rwidth / 2.0;
            let left = px(center - half).round() as i32;
            let right = px(center + half).round() as i32;
            let top = py(count).round() as i32;
            let h = if count > 0.0 { bottom + 1 - top } else { 0 };
            Rect::new(left, top, (right - left).max(1), h)
        })
        .collect()
}
