//! Plot of the `imadjust` transfer curve

use crate::PlotResult;
use crate::figure::{Figure, FigureSize};
use imkit_core::{Color, Rect};
use imkit_enhance::{AdjustParams, CURVE_SAMPLES, adjust_curve};

/// Size of the curve figure
pub const CURVE_FIGURE_SIZE: FigureSize = FigureSize::new(6.4, 4.8);

/// Line color of the curve
pub const CURVE_COLOR: Color = Color::new(0, 128, 0);

const CURVE_WIDTH: u32 = 2;
/// Fraction of the data range added on each side of both axes
const DATA_MARGIN: f32 = 0.05;

/// Title of the curve figure for `params`.
pub fn curve_title(params: &AdjustParams) -> String {
    format!(
        "adjust a={}, b={}, c={}, d={}, gamma={}",
        params.lim_out.0, params.lim_out.1, params.lim_in.0, params.lim_in.1, params.gamma
    )
}

/// Draw `y = ((x - a) / (b - a))^gamma * (d - c) + c` over `x` in [0, 1].
///
/// The curve is sampled at [`CURVE_SAMPLES`] points and drawn as a green
/// polyline inside a framed axes. Points where the curve is undefined
/// split the line.
///
/// # Errors
///
/// Propagates [`imkit_enhance::EnhanceError`] for degenerate parameters.
pub fn plot_adjust_curve(params: &AdjustParams) -> PlotResult<Figure> {
    let (xs, ys) = adjust_curve(params, CURVE_SAMPLES)?;

    let mut fig = Figure::new(CURVE_FIGURE_SIZE)?;
    let axes = fig.row_layout(1)[0];

    let (ylo, yhi) = finite_range(ys.iter()).unwrap_or((0.0, 1.0));
    let to_px = data_to_pixels(axes, (0.0, 1.0), (ylo, yhi));

    // Runs of consecutive finite points
    let mut runs: Vec<Vec<(i32, i32)>> = vec![Vec::new()];
    for (x, y) in xs.iter().zip(ys.iter()) {
        if y.is_finite() {
            if let Some(run) = runs.last_mut() {
                run.push(to_px(x, y));
            }
        } else if runs.last().is_some_and(|r| !r.is_empty()) {
            runs.push(Vec::new());
        }
    }

    fig.draw(|canvas| {
        for run in &runs {
            match run.as_slice() {
                [] => {}
                [p] => canvas.render_points_color(&[*p], CURVE_COLOR),
                pts => canvas.render_polyline_color(pts, CURVE_WIDTH, CURVE_COLOR),
            }
        }
        canvas.render_rect_color(&axes, 1, Color::BLACK);
    });
    fig.push_panel(axes, Some(curve_title(params)));
    Ok(fig)
}

fn finite_range(values: impl Iterator<Item = f32>) -> Option<(f32, f32)> {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if lo > hi {
        return None;
    }
    if lo == hi {
        return Some((lo - 0.5, hi + 0.5));
    }
    Some((lo, hi))
}

/// Map data coordinates into `axes`, leaving a margin around the data.
fn data_to_pixels(axes: Rect, xr: (f32, f32), yr: (f32, f32)) -> impl Fn(f32, f32) -> (i32, i32) {
    let pad = |(lo, hi): (f32, f32)| {
        let m = (hi - lo) * DATA_MARGIN;
        (lo - m, hi + m)
    };
    let (xlo, xhi) = pad(xr);
    let (ylo, yhi) = pad(yr);
    let (x0, bottom) = (axes.x as f32, axes.bottom() as f32);
    let (w, h) = ((axes.w - 1) as f32, (axes.h - 1) as f32);
    move |x, y| {
        let px = x0 + (x - xlo) / (xhi - xlo) * w;
        let py = bottom - (y - ylo) / (yhi - ylo) * h;
        (px.round() as i32, py.round() as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imkit_core::color;

    fn is_curve(pixel: u32) -> bool {
        color::extract_rgb(pixel) == (CURVE_COLOR.r, CURVE_COLOR.g, CURVE_COLOR.b)
    }

    #[test]
    fn test_title() {
        let params = AdjustParams {
            lim_in: (0.1, 0.9),
            gamma: 0.5,
            ..Default::default()
        };
        assert_eq!(
            curve_title(&params),
            "adjust a=0, b=1, c=0.1, d=0.9, gamma=0.5"
        );
    }

    #[test]
    fn test_identity_curve_is_diagonal() {
        let fig = plot_adjust_curve(&AdjustParams::default()).unwrap();
        assert_eq!((fig.width(), fig.height()), (640, 480));
        let axes = fig.panels()[0].rect;
        let to_px = data_to_pixels(axes, (0.0, 1.0), (0.0, 1.0));

        // Samples do not land exactly on every probe; allow one pixel
        for t in [0.0f32, 0.25, 0.5, 1.0] {
            let (x, y) = to_px(t, t);
            let near = (-1..=1).any(|dy| {
                (-1..=1).any(|dx| {
                    fig.pix()
                        .get_pixel((x + dx) as u32, (y + dy) as u32)
                        .is_some_and(is_curve)
                })
            });
            assert!(near, "no curve at t = {t}");
        }
        // Off the diagonal stays white
        let (x, y) = to_px(0.25, 0.75);
        assert_eq!(fig.pix().get_pixel(x as u32, y as u32), Some(Color::WHITE.to_pixel32()));
    }

    #[test]
    fn test_undefined_points_leave_gap() {
        // Negative base for x < 0.5 with fractional gamma
        let params = AdjustParams {
            lim_out: (0.5, 1.0),
            gamma: 0.5,
            ..Default::default()
        };
        let fig = plot_adjust_curve(&params).unwrap();
        let axes = fig.panels()[0].rect;
        let to_px = data_to_pixels(axes, (0.0, 1.0), (0.0, 1.0));
        let (x, _) = to_px(0.25, 0.0);
        let column_has_curve = (axes.y + 2..axes.bottom() - 1)
            .any(|y| fig.pix().get_pixel(x as u32, y as u32).is_some_and(is_curve));
        assert!(!column_has_curve);
    }

    #[test]
    fn test_degenerate_params_rejected() {
        let params = AdjustParams {
            lim_out: (0.2, 0.2),
            ..Default::default()
        };
        assert!(plot_adjust_curve(&params).is_err());
    }

    #[test]
    fn test_finite_range() {
        assert_eq!(finite_range([f32::NAN, 1.0, 3.0].into_iter()), Some((1.0, 3.0)));
        assert_eq!(finite_range([2.0].into_iter()), Some((1.5, 2.5)));
        assert_eq!(finite_range([f32::NAN].into_iter()), None);
    }
}
