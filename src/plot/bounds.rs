//! Axis ranges for firing charts.
//!
//! Hours snap outward to whole hours and leave room for the projection
//! horizon. Temperatures snap to 50 °C below (including ambient, so the
//! asymptote is visible) and 100 °C above.

use crate::domain::Observation;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartBounds {
    pub hours_min: f64,
    pub hours_max: f64,
    pub temp_min: f64,
    pub temp_max: f64,
}

impl ChartBounds {
    /// Bounds for an empty chart: one day, 0-1200 °C.
    pub const EMPTY: ChartBounds = ChartBounds {
        hours_min: 0.0,
        hours_max: 24.0,
        temp_min: 0.0,
        temp_max: 1200.0,
    };

    /// Bounds with a non-zero span on both axes.
    pub fn non_degenerate(self) -> Self {
        let mut b = self;
        if !(b.hours_max > b.hours_min) {
            b.hours_max = b.hours_min + 1.0;
        }
        if !(b.temp_max > b.temp_min) {
            b.temp_max = b.temp_min + 100.0;
        }
        b
    }
}

pub fn chart_bounds(
    observations: &[Observation],
    ambient: f64,
    extrapolate_hours: f64,
) -> ChartBounds {
    if observations.is_empty() {
        return ChartBounds::EMPTY;
    }

    let mut h_min = f64::INFINITY;
    let mut h_max = f64::NEG_INFINITY;
    let mut t_min = ambient;
    let mut t_max = f64::NEG_INFINITY;
    for p in observations {
        h_min = h_min.min(p.hours);
        h_max = h_max.max(p.hours);
        t_min = t_min.min(p.temp);
        t_max = t_max.max(p.temp);
    }

    let extrapolate = if extrapolate_hours.is_finite() {
        extrapolate_hours
    } else {
        0.0
    };
    ChartBounds {
        hours_min: h_min.floor(),
        hours_max: (h_max + extrapolate).ceil(),
        temp_min: (t_min / 50.0).floor() * 50.0,
        temp_max: (t_max / 100.0).ceil() * 100.0,
    }
}
