//! Image panels: `show_img` and `show_imgs_row`

use crate::colormap::{Colormap, ColormapKind};
use crate::figure::{Figure, FigureSize};
use crate::{PlotError, PlotResult};
use imkit_core::{FPix, PixMut, Rect};

/// Display options shared by [`show_img`] and [`show_imgs_row`]
#[derive(Debug, Clone, PartialEq)]
pub struct ShowOptions {
    /// Figure size in relative units
    pub size: FigureSize,
    /// Gray map with a fixed [0, 255] range; otherwise viridis auto-ranged
    /// to each image's min/max
    pub is_gray: bool,
    /// Emit and attach the dimensions line for each image
    pub info: bool,
}

impl Default for ShowOptions {
    fn default() -> Self {
        Self {
            size: FigureSize::new(7.0, 7.0),
            is_gray: true,
            info: false,
        }
    }
}

impl ShowOptions {
    fn colormap_kind(&self) -> ColormapKind {
        if self.is_gray {
            ColormapKind::Gray
        } else {
            ColormapKind::Viridis
        }
    }
}

/// The line attached by `info = true`.
pub fn dimensions_line(fpix: &FPix) -> String {
    format!(
        "Image dimensions: ({}, {}), {} pixels total",
        fpix.height(),
        fpix.width(),
        fpix.len()
    )
}

/// Render one image in a single-panel figure, axes off.
///
/// The image is scaled with nearest-neighbour sampling to the largest
/// size that fits the panel at its own aspect ratio, and centered.
///
/// # Errors
///
/// Returns [`PlotError::InvalidParameters`] for an unusable figure size.
pub fn show_img(fpix: &FPix, options: &ShowOptions) -> PlotResult<Figure> {
    let mut fig = Figure::new(options.size)?;
    let rect = fig.row_layout(1)[0];
    let cmap = Colormap::for_image(options.colormap_kind(), fpix);
    fig.draw(|canvas| render_image(canvas, &rect, fpix, &cmap));
    fig.push_panel(rect, None);
    if options.info {
        fig.push_info(dimensions_line(fpix));
    }
    Ok(fig)
}

/// Render images side by side in a 1xN row, same color mapping for all.
///
/// `titles`, when given, must hold at least one entry per image; extra
/// entries are ignored.
///
/// # Errors
///
/// - [`PlotError::EmptyInput`] if `images` is empty
/// - [`PlotError::ConfigurationMismatch`] if `titles` is too short
pub fn show_imgs_row(
    images: &[FPix],
    options: &ShowOptions,
    titles: Option<&[&str]>,
) -> PlotResult<Figure> {
    if images.is_empty() {
        return Err(PlotError::EmptyInput);
    }
    if let Some(titles) = titles
        && titles.len() < images.len()
    {
        return Err(PlotError::ConfigurationMismatch(format!(
            "{} titles for {} images",
            titles.len(),
            images.len()
        )));
    }

    let mut fig = Figure::new(options.size)?;
    let rects = fig.row_layout(images.len());
    for (i, (fpix, rect)) in images.iter().zip(rects).enumerate() {
        let cmap = Colormap::for_image(options.colormap_kind(), fpix);
        fig.draw(|canvas| render_image(canvas, &rect, fpix, &cmap));
        let title = titles.map(|t| t[i].to_string());
        fig.push_panel(rect, title);
        if options.info {
            fig.push_info(dimensions_line(fpix));
        }
    }
    Ok(fig)
}

/// Paint `fpix` into `rect` through `cmap`; returns the area covered.
pub(crate) fn render_image(canvas: &mut PixMut, rect: &Rect, fpix: &FPix, cmap: &Colormap) -> Rect {
    let (iw, ih) = (fpix.width() as f32, fpix.height() as f32);
    let scale = (rect.w as f32 / iw).min(rect.h as f32 / ih);
    let dw = ((iw * scale).round() as i32).clamp(1, rect.w.max(1));
    let dh = ((ih * scale).round() as i32).clamp(1, rect.h.max(1));
    let x0 = rect.x + (rect.w - dw) / 2;
    let y0 = rect.y + (rect.h - dh) / 2;
    let (cw, ch) = (canvas.width() as i32, canvas.height() as i32);

    for dy in 0..dh {
        let y = y0 + dy;
        if y < 0 || y >= ch {
            continue;
        }
        let sy = (((dy as f32 + 0.5) * ih / dh as f32) as u32).min(fpix.height() - 1);
        let row = fpix.row(sy);
        for dx in 0..dw {
            let x = x0 + dx;
            if x < 0 || x >= cw {
                continue;
            }
            let sx = (((dx as f32 + 0.5) * iw / dw as f32) as usize).min(row.len() - 1);
            let color = cmap.color(row[sx]);
            canvas.set_pixel_unchecked(x as u32, y as u32, color.to_pixel32());
        }
    }
    Rect::new(x0, y0, dw, dh)
}
