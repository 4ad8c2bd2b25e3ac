//! imkit - Grayscale image helpers
//!
//! Read an image, look at it, look at its histogram, and apply the usual
//! pointwise intensity transforms.
//!
//! # Example
//!
//! ```
//! use imkit::{FPix, enhance, plot};
//!
//! let fpix = FPix::from_rows(&[[0.0, 64.0], [128.0, 255.0]]).unwrap();
//! let neg = enhance::imcomplement(&fpix);
//! assert_eq!(neg.data(), &[255.0, 191.0, 127.0, 0.0]);
//!
//! let plot = plot::show_histograms(&[neg], &plot::HistogramOptions::default()).unwrap();
//! assert_eq!(plot.histograms().len(), 1);
//! ```

mod error;

// Re-export core types (primary data structures used everywhere)
pub use imkit_core::{
    Color, FPix, Histogram, ImageFormat, NegativeHandling, Numa, Pix, PixMut, PixelDepth, Rect,
    color,
};

// Re-export domain crates as modules to avoid name conflicts
pub use imkit_enhance as enhance;
pub use imkit_io as io;
pub use imkit_plot as plot;

pub use error::{Error, Result};

use imkit_enhance::AdjustParams;
use imkit_plot::{Figure, ShowOptions};
use std::path::Path;

/// Read an image file as 8 bpp grayscale.
///
/// PNG, JPEG and PNM are recognized by their content. Color images are
/// converted to luma.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or decoded.
pub fn read_img<P: AsRef<Path>>(path: P) -> Result<Pix> {
    let pix = imkit_io::read_image(path.as_ref())?;
    log::debug!(
        "read_img: {} is {}x{} ({:?})",
        path.as_ref().display(),
        pix.width(),
        pix.height(),
        pix.informat()
    );
    Ok(pix)
}

/// Read an image and render it with [`imkit_plot::show_img`].
///
/// The dimensions line is always produced, whatever `options.info` says.
pub fn read_and_show<P: AsRef<Path>>(path: P, options: &ShowOptions) -> Result<(Pix, Figure)> {
    let pix = read_img(path)?;
    let options = ShowOptions {
        info: true,
        ..options.clone()
    };
    let figure = imkit_plot::show_img(&FPix::from_pix(&pix), &options)?;
    Ok((pix, figure))
}

/// Output of [`imadjust`]
#[derive(Debug, Clone)]
pub struct Adjusted {
    /// The adjusted image, values in [0, 255]
    pub image: FPix,
    /// The transfer curve, when `plot` was requested
    pub curve: Option<Figure>,
}

/// [`imkit_enhance::imadjust`], also rendering the transfer curve when
/// `params.plot` is set.
///
/// # Errors
///
/// Returns [`Error::Enhance`] for degenerate input or parameters.
pub fn imadjust(fpix: &FPix, params: &AdjustParams) -> Result<Adjusted> {
    let image = imkit_enhance::imadjust(fpix, params)?;
    let curve = if params.plot {
        Some(imkit_plot::plot_adjust_curve(params)?)
    } else {
        None
    };
    Ok(Adjusted { image, curve })
}

#[cfg(test)]
mod tests {
    use super::*;
    use imkit_test::{regout_path, synth};

    #[test]
    fn test_read_img_roundtrip() {
        let pix = synth::make_gradient(32, 8).unwrap();
        let path = regout_path("facade_read.png");
        io::write_image(&pix, &path, ImageFormat::Png).unwrap();

        let back = read_img(&path).unwrap();
        assert_eq!(back.data(), pix.data());
    }

    #[test]
    fn test_read_img_missing() {
        let err = read_img(regout_path("facade_missing.png")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_read_and_show_reports_dimensions() {
        let pix = synth::make_uniform(6, 4, 90).unwrap();
        let path = regout_path("facade_show.pgm");
        io::write_image(&pix, &path, ImageFormat::Pnm).unwrap();

        let options = ShowOptions {
            size: plot::FigureSize::new(1.0, 1.0),
            ..Default::default()
        };
        let (back, fig) = read_and_show(&path, &options).unwrap();
        assert_eq!((back.width(), back.height()), (6, 4));
        assert_eq!(fig.info_lines(), &["Image dimensions: (4, 6), 24 pixels total"]);
    }

    #[test]
    fn test_imadjust_plot_flag() {
        let fpix = synth::make_gradient_fpix(16, 2).unwrap();

        let plain = imadjust(&fpix, &AdjustParams::default()).unwrap();
        assert!(plain.curve.is_none());

        let params = AdjustParams {
            gamma: 0.5,
            plot: true,
            ..Default::default()
        };
        let with_curve = imadjust(&fpix, &params).unwrap();
        let curve = with_curve.curve.unwrap();
        assert_eq!(
            curve.panels()[0].title.as_deref(),
            Some("adjust a=0, b=1, c=0, d=1, gamma=0.5")
        );
        assert_eq!(with_curve.image.max_value(), 255.0);
    }

    #[test]
    fn test_errors_convert() {
        let flat = FPix::new_with_value(2, 2, 3.0).unwrap();
        let err = enhance::img_scale(&flat, 0.0, 1.0).map_err(Error::from).unwrap_err();
        assert!(matches!(err, Error::Enhance(_)));

        let err = plot::show_imgs_row(&[], &ShowOptions::default(), None)
            .map_err(Error::from)
            .unwrap_err();
        assert!(matches!(err, Error::Plot(_)));
    }
}
