//! Effective decay-rate selection.
//!
//! The projection uses either the operator's manual rate or the fitted one.
//! Selection rules:
//! 1. Auto-fit disabled: manual rate.
//! 2. Fewer than `MIN_AUTO_FIT_POINTS` cooling readings: manual rate (a
//!    two-point fit is exact but too noisy to trust).
//! 3. Otherwise: fitted rate, with fit diagnostics.

use crate::domain::{FitQuality, MIN_AUTO_FIT_POINTS, Observation, RateSource};
use crate::fit::fitter::{fit_decay_rate, fit_quality};

/// The decay rate a projection should use, and where it came from.
#[derive(Debug, Clone)]
pub struct RateSelection {
    pub decay_rate: f64,
    pub source: RateSource,
    /// Diagnostics of `decay_rate` against the cooling phase (always computed
    /// when there is a phase, so manual rates can be judged too).
    pub quality: Option<FitQuality>,
}

pub fn select_decay_rate(
    cooling: Option<&[Observation]>,
    ambient: f64,
    manual_rate: f64,
    auto_fit: bool,
) -> RateSelection {
    let Some(points) = cooling else {
        return RateSelection {
            decay_rate: manual_rate,
            source: RateSource::Manual,
            quality: None,
        };
    };

    let (decay_rate, source) = if auto_fit && points.len() >= MIN_AUTO_FIT_POINTS {
        (fit_decay_rate(points, ambient), RateSource::Fitted)
    } else {
        (manual_rate, RateSource::Manual)
    };

    RateSelection {
        decay_rate,
        source,
        quality: Some(fit_quality(decay_rate, points, ambient)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::predict;

    fn cooling(n: usize, k: f64) -> Vec<Observation> {
        (0..n)
            .map(|i| {
                let dt = i as f64;
                Observation {
                    time: String::new(),
                    hours: 12.0 + dt,
                    temp: predict(20.0, 1000.0, k, dt),
                }
            })
            .collect()
    }

    #[test]
    fn auto_fit_uses_fitted_rate() {
        let pts = cooling(5, 0.42);
        let sel = select_decay_rate(Some(&pts), 20.0, 0.5, true);
        assert_eq!(sel.source, RateSource::Fitted);
        assert!((sel.decay_rate - 0.42).abs() < 1e-4);
        assert!(sel.quality.unwrap().sse < 1e-6);
    }

    #[test]
    fn two_point_phase_keeps_manual_rate() {
        let pts = cooling(2, 0.42);
        let sel = select_decay_rate(Some(&pts), 20.0, 0.5, true);
        assert_eq!(sel.source, RateSource::Manual);
        assert_eq!(sel.decay_rate, 0.5);
        assert_eq!(sel.quality.unwrap().n, 2);
    }

    #[test]
    fn auto_fit_off_keeps_manual_rate() {
        let pts = cooling(6, 0.42);
        let sel = select_decay_rate(Some(&pts), 20.0, 1.25, false);
        assert_eq!(sel.source, RateSource::Manual);
        assert_eq!(sel.decay_rate, 1.25);
    }

    #[test]
    fn no_phase_means_no_quality() {
        let sel = select_decay_rate(None, 20.0, 0.5, true);
        assert_eq!(sel.source, RateSource::Manual);
        assert!(sel.quality.is_none());
    }
}
