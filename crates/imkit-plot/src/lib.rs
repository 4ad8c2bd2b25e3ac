//! imkit-plot - Figures for images, histograms and transfer curves
//!
//! Every call renders into a [`Figure`]: a white 32 bpp canvas sized in
//! relative units at [`DPI`] pixels per unit. Figures are plain values;
//! export them with [`Figure::save`] or [`Figure::encode_png`].
//!
//! - [`show_img`] - One image, axes off
//! - [`show_imgs_row`] - Several images in a 1xN row
//! - [`show_histograms`] - Bar plot of the histogram of each image
//! - [`plot_adjust_curve`] - The `imadjust` transfer curve

mod colormap;
mod curve;
mod error;
mod figure;
mod hist;
mod show;

pub use colormap::{Colormap, ColormapKind};
pub use curve::{CURVE_COLOR, CURVE_FIGURE_SIZE, curve_title, plot_adjust_curve};
pub use error::{PlotError, PlotResult};
pub use figure::{DPI, Figure, FigureSize, Panel};
pub use hist::{
    BarStyle, DEFAULT_BAR_COLOR, HistogramOptions, HistogramPlot, bar_rects, show_histograms,
};
pub use show::{ShowOptions, dimensions_line, show_img, show_imgs_row};
