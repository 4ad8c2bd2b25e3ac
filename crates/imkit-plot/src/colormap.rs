//! Scalar-to-color mapping for image panels

use imkit_core::{Color, FPix};

/// Anchor colors of the viridis map, evenly spaced over [0, 1]
const VIRIDIS_STOPS: [(u8, u8, u8); 9] = [
    (0x44, 0x01, 0x54),
    (0x48, 0x28, 0x78),
    (0x3e, 0x49, 0x89),
    (0x31, 0x68, 0x8e),
    (0x26, 0x82, 0x8e),
    (0x1f, 0x9e, 0x89),
    (0x35, 0xb7, 0x79),
    (0x6e, 0xce, 0x58),
    (0xfd, 0xe7, 0x25),
];

/// Number of entries in a lookup table
const LUT_SIZE: usize = 256;

/// Colormap kinds supported by the display helpers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColormapKind {
    /// Black to white
    Gray,
    /// Perceptually uniform dark blue to yellow
    Viridis,
}

/// A colormap bound to a display range.
///
/// Values are normalized with `t = (v - vmin) / (vmax - vmin)`, clamped
/// to [0, 1] and looked up in a 256-entry table at `floor(t * 256)`
/// (capped at 255). NaN maps to white. A zero-width range maps every
/// value to the lowest color.
#[derive(Debug, Clone)]
pub struct Colormap {
    lut: [Color; LUT_SIZE],
    vmin: f32,
    vmax: f32,
}

impl Colormap {
    /// Gray map with the fixed range [0, 255].
    pub fn gray() -> Self {
        let mut lut = [Color::BLACK; LUT_SIZE];
        for (i, c) in lut.iter_mut().enumerate() {
            let v = i as u8;
            *c = Color::new(v, v, v);
        }
        Colormap {
            lut,
            vmin: 0.0,
            vmax: 255.0,
        }
    }

    /// Viridis map auto-ranged to the min and max of `fpix`.
    pub fn viridis_for(fpix: &FPix) -> Self {
        let (vmin, vmax) = (fpix.min_value(), fpix.max_value());
        // An all-NaN image has no finite range
        let (vmin, vmax) = if vmin.is_finite() && vmax.is_finite() {
            (vmin, vmax)
        } else {
            (0.0, 0.0)
        };
        Colormap {
            lut: viridis_lut(),
            vmin,
            vmax,
        }
    }

    /// Map for an image displayed as `kind`.
    pub fn for_image(kind: ColormapKind, fpix: &FPix) -> Self {
        match kind {
            ColormapKind::Gray => Self::gray(),
            ColormapKind::Viridis => Self::viridis_for(fpix),
        }
    }

    /// Display range `(vmin, vmax)`
    pub fn range(&self) -> (f32, f32) {
        (self.vmin, self.vmax)
    }

    /// Color of a sample value.
    pub fn color(&self, v: f32) -> Color {
        if v.is_nan() {
            return Color::WHITE;
        }
        let span = self.vmax - self.vmin;
        if span <= 0.0 {
            return self.lut[0];
        }
        let t = ((v - self.vmin) / span).clamp(0.0, 1.0);
        let idx = ((t * LUT_SIZE as f32) as usize).min(LUT_SIZE - 1);
        self.lut[idx]
    }
}

fn viridis_lut() -> [Color; LUT_SIZE] {
    let segments = (VIRIDIS_STOPS.len() - 1) as f32;
    let mut lut = [Color::BLACK; LUT_SIZE];
    for (i, c) in lut.iter_mut().enumerate() {
        let pos = i as f32 / (LUT_SIZE - 1) as f32 * segments;
        let k = (pos.floor() as usize).min(VIRIDIS_STOPS.len() - 2);
        let f = pos - k as f32;
        let (a, b) = (VIRIDIS_STOPS[k], VIRIDIS_STOPS[k + 1]);
        let lerp = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * f).round() as u8;
        *c = Color::new(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2));
    }
    lut
}
