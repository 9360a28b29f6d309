//! Decay-rate fitting for a single cooling phase.
//!
//! Given:
//! - cooling readings `(t_i, T_i)`, anchored at the first one `(t0, T0)`
//! - a fixed ambient temperature `A`
//!
//! we pick the `k` minimizing
//!
//! ```text
//! SSE(k) = Σ (A + (T0 - A) * exp(-k (t_i - t0)) - T_i)^2
//! ```
//!
//! With the anchor and ambient fixed, `SSE` is unimodal in `k` over the
//! search bracket, so a ternary search finds it without derivatives.

use crate::domain::{DEFAULT_DECAY_RATE, FitQuality, Observation};
use crate::fit::search::{DECAY_RATE_RANGE, ternary_search_min};
use crate::models::predict;

/// Sum of squared residuals of the model at rate `k`.
///
/// Empty input has zero error.
pub fn error_for(k: f64, points: &[Observation], ambient: f64) -> f64 {
    let Some(anchor) = points.first() else {
        return 0.0;
    };

    points
        .iter()
        .map(|p| {
            let r = predict(ambient, anchor.temp, k, p.hours - anchor.hours) - p.temp;
            r * r
        })
        .sum()
}

/// Best-fit decay rate for a cooling phase.
///
/// Fewer than two readings carry no rate information; the default is returned.
pub fn fit_decay_rate(points: &[Observation], ambient: f64) -> f64 {
    if points.len() < 2 {
        return DEFAULT_DECAY_RATE;
    }
    ternary_search_min(DECAY_RATE_RANGE, |k| error_for(k, points, ambient))
}

/// SSE/RMSE of the model at `k` over `points`.
pub fn fit_quality(k: f64, points: &[Observation], ambient: f64) -> FitQuality {
    let sse = error_for(k, points, ambient);
    let n = points.len();
    let rmse = if n > 0 { (sse / n as f64).sqrt() } else { 0.0 };
    FitQuality { sse, rmse, n }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthetic(k: f64, ambient: f64, t0: f64, temp0: f64, hours: &[f64]) -> Vec<Observation> {
        hours
            .iter()
            .map(|&dt| Observation {
                time: String::new(),
                hours: t0 + dt,
                temp: predict(ambient, temp0, k, dt),
            })
            .collect()
    }

    #[test]
    fn recovers_known_rate() {
        let hours = [0.0, 0.5, 1.0, 2.0, 3.0, 4.5, 6.0];
        for &k0 in &[0.05, 0.35, 1.2, 3.0, 4.8] {
            let pts = synthetic(k0, 20.0, 14.0, 1200.0, &hours);
            let k = fit_decay_rate(&pts, 20.0);
            assert!((k - k0).abs() < 1e-4, "k0={k0} fitted={k}");
        }
    }

    #[test]
    fn recovers_rate_with_nonzero_ambient_and_two_points() {
        let pts = synthetic(0.8, 35.0, 3.25, 640.0, &[0.0, 1.5]);
        let k = fit_decay_rate(&pts, 35.0);
        assert!((k - 0.8).abs() < 1e-4, "fitted={k}");
    }

    #[test]
    fn short_phase_uses_default() {
        let pts = synthetic(2.0, 20.0, 0.0, 900.0, &[0.0]);
        assert_eq!(fit_decay_rate(&pts, 20.0), DEFAULT_DECAY_RATE);
        assert_eq!(fit_decay_rate(&[], 20.0), DEFAULT_DECAY_RATE);
    }

    #[test]
    fn error_is_zero_on_curve_and_positive_off_it() {
        let mut pts = synthetic(0.6, 20.0, 10.0, 1000.0, &[0.0, 1.0, 2.0, 3.0]);
        assert!(error_for(0.6, &pts, 20.0) < 1e-18);
        assert!(error_for(0.7, &pts, 20.0) > 0.0);

        pts[2].temp += 5.0;
        assert!((error_for(0.6, &pts, 20.0) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn error_is_never_negative() {
        let pts = synthetic(1.0, -10.0, 0.0, 50.0, &[0.0, 0.25, 4.0]);
        for &k in &[0.0, 0.01, 1.0, 5.0, 50.0] {
            for &ambient in &[-100.0, 0.0, 20.0, 500.0] {
                assert!(error_for(k, &pts, ambient) >= 0.0);
            }
        }
        assert_eq!(error_for(1.0, &[], 20.0), 0.0);
    }

    #[test]
    fn out_of_bracket_optimum_lands_near_boundary() {
        let pts = synthetic(9.0, 20.0, 0.0, 1000.0, &[0.0, 0.1, 0.2, 0.3]);
        let k = fit_decay_rate(&pts, 20.0);
        assert!(k <= 5.0 && 5.0 - k < 1e-5, "fitted={k}");
    }

    #[test]
    fn quality_reports_rmse() {
        let mut pts = synthetic(0.5, 20.0, 0.0, 800.0, &[0.0, 1.0, 2.0, 3.0]);
        pts[1].temp += 4.0;
        pts[3].temp -= 4.0;
        let q = fit_quality(0.5, &pts, 20.0);
        assert_eq!(q.n, 4);
        assert!((q.sse - 32.0).abs() < 1e-9);
        assert!((q.rmse - 8.0_f64.sqrt()).abs() < 1e-9);
    }
}
