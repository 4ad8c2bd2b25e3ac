//! Graphics rendering functions
//!
//! Drawing primitives used to compose figures on 32 bpp canvases:
//! - Lines (straight, with variable width) and polylines
//! - Filled and outlined rectangles
//! - Alpha-blended fills

use super::{PixMut, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

/// RGB color for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a new color
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black color
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    /// White color
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };
    /// Red color
    pub const RED: Color = Color { r: 255, g: 0, b: 0 };
    /// Green color
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0 };
    /// Blue color
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255 };

    /// Parse a `#rrggbb` hex string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for anything that isn't
    /// exactly `#` followed by six hex digits.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.is_ascii())
            .ok_or_else(|| Error::InvalidParameter(format!("bad hex color: {hex:?}")))?;
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| Error::InvalidParameter(format!("bad hex color: {hex:?}")))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Compose as 32-bit RGBA pixel
    pub fn to_pixel32(&self) -> u32 {
        color::compose_rgb(self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Axis-aligned rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rightmost column (inclusive).
    pub fn right(&self) -> i32 {
        self.x + self.w - 1
    }

    /// Bottom row (inclusive).
    pub fn bottom(&self) -> i32 {
        self.y + self.h - 1
    }

    /// Shrink by `margin` on every side; never below zero size.
    pub fn inset(&self, margin: i32) -> Rect {
        let w = (self.w - 2 * margin).max(0);
        let h = (self.h - 2 * margin).max(0);
        Rect::new(self.x + margin, self.y + margin, w, h)
    }
}

/// Generate the points of a line using Bresenham's integer algorithm.
///
/// The line connects `(x1, y1)` to `(x2, y2)` with 8-connectivity and
/// includes both end points.
pub fn generate_line_points(x1: i32, y1: i32, x2: i32, y2: i32) -> Vec<(i32, i32)> {
    if x1 == x2 && y1 == y2 {
        return vec![(x1, y1)];
    }

    let dx = (x2 - x1).abs();
    let dy = (y2 - y1).abs();
    let sx = if x2 > x1 { 1i32 } else { -1 };
    let sy = if y2 > y1 { 1i32 } else { -1 };

    let npts = dx.max(dy) + 1;
    let mut pts = Vec::with_capacity(npts as usize);

    let (mut x, mut y) = (x1, y1);

    if dx >= dy {
        let mut err = dx / 2;
        for _ in 0..npts {
            pts.push((x, y));
            err -= dy;
            if err < 0 {
                y += sy;
                err += dx;
            }
            x += sx;
        }
    } else {
        let mut err = dy / 2;
        for _ in 0..npts {
            pts.push((x, y));
            err -= dx;
            if err < 0 {
                x += sx;
                err += dy;
            }
            y += sy;
        }
    }

    pts
}

/// Generate the points of a line with the given width.
///
/// For width > 1, parallel lines are added alternately on both sides,
/// offset perpendicular to the dominant direction.
pub fn generate_wide_line_points(x1: i32, y1: i32, x2: i32, y2: i32, width: u32) -> Vec<(i32, i32)> {
    let width = width.max(1);
    let mut pts = generate_line_points(x1, y1, x2, y2);
    if width == 1 {
        return pts;
    }

    let is_horizontal = (x2 - x1).abs() > (y2 - y1).abs();
    for i in 1..width {
        let offset = (i + 1).div_ceil(2) as i32;
        let offset = if i % 2 == 1 { -offset } else { offset };
        let parallel = if is_horizontal {
            generate_line_points(x1, y1 + offset, x2, y2 + offset)
        } else {
            generate_line_points(x1 + offset, y1, x2 + offset, y2)
        };
        pts.extend(parallel);
    }
    pts
}

impl PixMut {
    fn require_rgb(&self) -> Result<()> {
        if self.depth() != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        Ok(())
    }

    /// Paint points with a color. Points outside the image are clipped.
    ///
    /// On 8 bpp images the color is converted to its luma.
    pub fn render_points_color(&mut self, pts: &[(i32, i32)], color: Color) {
        let (w, h) = (self.width() as i32, self.height() as i32);
        let val = match self.depth() {
            PixelDepth::Bit32 => color.to_pixel32(),
            PixelDepth::Bit8 => color::rgb_to_gray(color.r, color.g, color.b) as u32,
        };
        for &(x, y) in pts {
            if x < 0 || x >= w || y < 0 || y >= h {
                continue;
            }
            self.set_pixel_unchecked(x as u32, y as u32, val);
        }
    }

    /// Render a line from (x1, y1) to (x2, y2) with a specific color.
    pub fn render_line_color(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, width: u32, color: Color) {
        let pts = generate_wide_line_points(x1, y1, x2, y2, width);
        self.render_points_color(&pts, color);
    }

    /// Render connected line segments through `vertices`.
    pub fn render_polyline_color(&mut self, vertices: &[(i32, i32)], width: u32, color: Color) {
        for seg in vertices.windows(2) {
            let ((x1, y1), (x2, y2)) = (seg[0], seg[1]);
            self.render_line_color(x1, y1, x2, y2, width, color);
        }
    }

    /// Render the outline of a rectangle, `width` pixels thick, inside `rect`.
    pub fn render_rect_color(&mut self, rect: &Rect, width: u32, color: Color) {
        if rect.w <= 0 || rect.h <= 0 {
            return;
        }
        let width = width.max(1) as i32;
        for i in 0..width {
            let r = rect.inset(i);
            if r.w <= 0 || r.h <= 0 {
                break;
            }
            let (x0, y0, x1, y1) = (r.x, r.y, r.right(), r.bottom());
            let mut pts = generate_line_points(x0, y0, x1, y0);
            pts.extend(generate_line_points(x1, y0, x1, y1));
            pts.extend(generate_line_points(x1, y1, x0, y1));
            pts.extend(generate_line_points(x0, y1, x0, y0));
            self.render_points_color(&pts, color);
        }
    }

    /// Fill a rectangle with a solid color (32 bpp only). Clipped to the image.
    pub fn fill_rect_color(&mut self, rect: &Rect, color: Color) -> Result<()> {
        self.fill_rect_blend(rect, color, 1.0)
    }

    /// Fill a rectangle with alpha blending (32 bpp only).
    ///
    /// `fract` is the blend fraction: 1.0 = fully opaque, 0.0 = fully transparent.
    pub fn fill_rect_blend(&mut self, rect: &Rect, color: Color, fract: f32) -> Result<()> {
        self.require_rgb()?;
        let fract = fract.clamp(0.0, 1.0);
        let (w, h) = (self.width() as i32, self.height() as i32);
        let xs = rect.x.max(0)..(rect.x + rect.w).min(w);
        let ys = rect.y.max(0)..(rect.y + rect.h).min(h);

        for y in ys {
            for x in xs.clone() {
                let (xu, yu) = (x as u32, y as u32);
                let pixel = if fract >= 1.0 {
                    color.to_pixel32()
                } else {
                    let (r, g, b) = color::extract_rgb(self.get_pixel_unchecked(xu, yu));
                    let mix = |old: u8, new: u8| ((1.0 - fract) * old as f32 + fract * new as f32 + 0.5) as u8;
                    color::compose_rgb(mix(r, color.r), mix(g, color.g), mix(b, color.b))
                };
                self.set_pixel_unchecked(xu, yu, pixel);
            }
        }
        Ok(())
    }
}
