//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observed readings: `o`
//! - cooling-phase anchor: `*`
//! - projected cooling curve: `-` line
//! - planned schedule: `.` line

use crate::domain::{CurveFile, CurvePoint, Observation, format_time};
use crate::plot::bounds::{ChartBounds, chart_bounds};

/// Everything that can be drawn on one chart.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlotLayers<'a> {
    pub observations: &'a [Observation],
    pub curve: &'a [CurvePoint],
    pub plan: &'a [CurvePoint],
    /// Series index of the cooling anchor.
    pub cooling_start: Option<usize>,
}

/// Render the given layers inside `bounds`.
pub fn render_ascii_plot(
    layers: &PlotLayers<'_>,
    bounds: ChartBounds,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);
    let b = bounds.non_degenerate();

    let mut grid = vec![vec![' '; width]; height];

    // Lines first so readings overlay them.
    draw_polyline(&mut grid, layers.curve, &b, '-');
    draw_polyline(&mut grid, layers.plan, &b, '.');

    for (i, p) in layers.observations.iter().enumerate() {
        if !(p.hours.is_finite() && p.temp.is_finite()) {
            continue;
        }
        let x = map_x(p.hours, &b, width);
        let y = map_y(p.temp, &b, height);
        grid[y][x] = if layers.cooling_start == Some(i) { '*' } else { 'o' };
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: time=[{}, {}] | temp=[{:.0}, {:.0}]°C\n",
        format_time(b.hours_min),
        format_time(b.hours_max),
        b.temp_min,
        b.temp_max
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

/// Render a saved projection (readings + curve).
pub fn render_ascii_plot_from_curve_file(curve: &CurveFile, width: usize, height: usize) -> String {
    let mut bounds = chart_bounds(&curve.observations, curve.ambient_temp, curve.extrapolate_hours);
    if curve.observations.is_empty() {
        if let Some(range) = curve_hours_range(&curve.curve) {
            bounds.hours_min = range.0.floor();
            bounds.hours_max = range.1.ceil();
        }
    }

    let cooling_start = curve
        .observations
        .iter()
        .position(|p| p.hours == curve.anchor.hours && p.temp == curve.anchor.temp);

    let layers = PlotLayers {
        observations: &curve.observations,
        curve: &curve.curve,
        plan: &[],
        cooling_start,
    };
    render_ascii_plot(&layers, bounds, width, height)
}

fn curve_hours_range(curve: &[CurvePoint]) -> Option<(f64, f64)> {
    let first = curve.first()?;
    let last = curve.last()?;
    if first.hours.is_finite() && last.hours.is_finite() && last.hours > first.hours {
        Some((first.hours, last.hours))
    } else {
        None
    }
}

fn map_x(t: f64, b: &ChartBounds, width: usize) -> usize {
    let width = width.max(2);
    let u = ((t - b.hours_min) / (b.hours_max - b.hours_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(temp: f64, b: &ChartBounds, height: usize) -> usize {
    let height = height.max(2);
    let u = ((temp - b.temp_min) / (b.temp_max - b.temp_min)).clamp(0.0, 1.0);
    // temp=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_polyline(grid: &mut [Vec<char>], points: &[CurvePoint], b: &ChartBounds, ch: char) {
    if points.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev: Option<(usize, usize)> = None;
    for p in points {
        if !(p.hours.is_finite() && p.temp.is_finite()) {
            continue;
        }
        let x = map_x(p.hours, b, width);
        let y = map_y(p.temp, b, height);
        match prev {
            Some((x0, y0)) => draw_line(grid, x0, y0, x, y, ch),
            None => {
                if grid[y][x] == ' ' {
                    grid[y][x] = ch;
                }
            }
        }
        prev = Some((x, y));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
