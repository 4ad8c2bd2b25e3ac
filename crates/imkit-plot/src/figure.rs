//! Figures: RGB canvases split into panels
//!
//! A [`Figure`] is a 32 bpp raster with a white background. Its size is
//! given in relative units and rendered at [`DPI`] pixels per unit. Panels
//! are laid out in a single row; each remembers its pixel rectangle and
//! optional title. Titles and info lines are not rasterized; they travel
//! with the figure and are written as PNG `tEXt` chunks on export.

use crate::{PlotError, PlotResult};
use imkit_core::{Color, Pix, PixMut, PixelDepth, Rect};
use imkit_io::IoError;
use std::path::Path;

/// Pixels per size unit
pub const DPI: f32 = 100.0;

/// Fractions of the figure left free around the panel row
const MARGIN_LEFT: f32 = 0.125;
const MARGIN_RIGHT: f32 = 0.1;
const MARGIN_TOP: f32 = 0.12;
const MARGIN_BOTTOM: f32 = 0.11;
/// Gap between panels as a fraction of the panel width
const PANEL_SPACING: f32 = 0.2;

/// Figure size in relative units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureSize {
    /// Width in relative units
    pub width: f32,
    /// Height in relative units
    pub height: f32,
}

impl FigureSize {
    /// Size of `width` by `height` units
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Canvas size in pixels.
    ///
    /// # Errors
    ///
    /// Returns [`PlotError::InvalidParameters`] unless both sides are
    /// finite and at least one pixel.
    pub fn pixels(&self) -> PlotResult<(u32, u32)> {
        let w = (self.width * DPI).round();
        let h = (self.height * DPI).round();
        if !(w >= 1.0 && h >= 1.0 && w.is_finite() && h.is_finite()) {
            return Err(PlotError::InvalidParameters(format!(
                "figure size {}x{} is too small",
                self.width, self.height
            )));
        }
        Ok((w as u32, h as u32))
    }
}

impl From<(f32, f32)> for FigureSize {
    fn from((width, height): (f32, f32)) -> Self {
        Self::new(width, height)
    }
}

/// One drawing area of a figure
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    /// Pixel rectangle the content occupies
    pub rect: Rect,
    /// Title shown above the panel
    pub title: Option<String>,
}

/// A rendered figure
#[derive(Debug, Clone)]
pub struct Figure {
    size: FigureSize,
    canvas: Pix,
    panels: Vec<Panel>,
    info: Vec<String>,
}

impl Figure {
    /// Create a blank white figure.
    pub fn new(size: FigureSize) -> PlotResult<Self> {
        let (w, h) = size.pixels()?;
        let mut canvas = Pix::new(w, h, PixelDepth::Bit32)?.to_mut();
        canvas.set_all(Color::WHITE.to_pixel32());
        Ok(Figure {
            size,
            canvas: canvas.into(),
            panels: Vec::new(),
            info: Vec::new(),
        })
    }

    /// Size in relative units
    pub fn size(&self) -> FigureSize {
        self.size
    }

    /// Canvas width in pixels
    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    /// Canvas height in pixels
    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    /// The rendered raster (32 bpp RGB)
    pub fn pix(&self) -> &Pix {
        &self.canvas
    }

    /// Panels in left-to-right order
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Informational lines attached while rendering
    pub fn info_lines(&self) -> &[String] {
        &self.info
    }

    pub(crate) fn push_panel(&mut self, rect: Rect, title: Option<String>) {
        self.panels.push(Panel { rect, title });
    }

    pub(crate) fn push_info(&mut self, line: String) {
        log::info!("{}", line);
        self.info.push(line);
    }

    /// Run `f` with mutable access to the canvas.
    ///
    /// Rasters previously handed out by [`Figure::pix`] keep their content.
    pub(crate) fn draw<T>(&mut self, f: impl FnOnce(&mut PixMut) -> T) -> T {
        let mut canvas = self.canvas.to_mut();
        let out = f(&mut canvas);
        self.canvas = canvas.into();
        out
    }

    /// Rectangles of `n` equal panels in a single row.
    pub(crate) fn row_layout(&self, n: usize) -> Vec<Rect> {
        let (w, h) = (self.width() as f32, self.height() as f32);
        let left = w * MARGIN_LEFT;
        let avail = w * (1.0 - MARGIN_LEFT - MARGIN_RIGHT);
        let top = h * MARGIN_TOP;
        let panel_h = h * (1.0 - MARGIN_TOP - MARGIN_BOTTOM);
        let n_f = n as f32;
        let panel_w = avail / (n_f + PANEL_SPACING * (n_f - 1.0));
        (0..n)
            .map(|i| {
                let x = left + i as f32 * panel_w * (1.0 + PANEL_SPACING);
                Rect::new(
                    x.round() as i32,
                    top.round() as i32,
                    panel_w.round().max(1.0) as i32,
                    panel_h.round().max(1.0) as i32,
                )
            })
            .collect()
    }

    /// `tEXt` entries written on export: one `Title` per titled panel and
    /// one `Comment` per info line.
    pub fn text_chunks(&self) -> Vec<(String, String)> {
        let titles = self
            .panels
            .iter()
            .filter_map(|p| p.title.clone())
            .map(|t| ("Title".to_string(), t));
        let info = self.info.iter().map(|l| ("Comment".to_string(), l.clone()));
        titles.chain(info).collect()
    }

    /// Encode the figure as PNG.
    pub fn encode_png(&self) -> PlotResult<Vec<u8>> {
        let mut buf = Vec::new();
        imkit_io::png::write_png_with_text(&self.canvas, &mut buf, &self.text_chunks())?;
        Ok(buf)
    }

    /// Write the figure to a PNG file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> PlotResult<()> {
        let bytes = self.encode_png()?;
        std::fs::write(path.as_ref(), bytes).map_err(IoError::Io)?;
        log::debug!("saved figure to {}", path.as_ref().display());
        Ok(())
    }
}
