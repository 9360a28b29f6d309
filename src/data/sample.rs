//! Synthetic firing generation.
//!
//! Produces a plausible logbook for a single firing: a linear ramp from room
//! temperature to a peak, followed by exponential cooling toward ambient,
//! with Gaussian sensor noise. The output is bulk-import text so demo runs
//! flow through the same parser as real logs.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::format_time;
use crate::error::AppError;

/// Upper bound on generated readings.
const MAX_POINTS: usize = 100_000;

/// Parameters for a synthetic firing.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub seed: u64,
    /// Clock time of the first reading (decimal hours).
    pub start_hours: f64,
    pub start_temp: f64,
    pub peak_temp: f64,
    /// Ramp speed in °C per hour.
    pub heating_rate: f64,
    pub ambient_temp: f64,
    pub decay_rate: f64,
    /// How long to keep logging after the peak (hours).
    pub cooling_hours: f64,
    pub interval_minutes: u32,
    /// Standard deviation of the reading noise (°C).
    pub noise_sd: f64,
}

#[derive(Debug, Clone)]
pub struct SampleData {
    /// Tab-separated `time<TAB>temp` lines.
    pub text: String,
    pub n_points: usize,
    /// Clock time of the noiseless peak.
    pub peak_hours: f64,
}

pub fn generate_firing(config: &SampleConfig) -> Result<SampleData, AppError> {
    if config.interval_minutes == 0 {
        return Err(AppError::new(2, "Sample interval must be > 0 minutes."));
    }
    if !(config.heating_rate.is_finite() && config.heating_rate > 0.0) {
        return Err(AppError::new(2, "Heating rate must be finite and > 0."));
    }
    if !(config.peak_temp.is_finite()
        && config.start_temp.is_finite()
        && config.peak_temp > config.start_temp)
    {
        return Err(AppError::new(2, "Peak temperature must exceed the start temperature."));
    }
    if !(config.cooling_hours.is_finite() && config.cooling_hours >= 0.0) {
        return Err(AppError::new(2, "Cooling duration must be finite and >= 0."));
    }
    if !(config.noise_sd.is_finite() && config.noise_sd >= 0.0) {
        return Err(AppError::new(2, "Noise must be finite and >= 0."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, config.noise_sd)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let ramp_hours = (config.peak_temp - config.start_temp) / config.heating_rate;
    let peak_hours = config.start_hours + ramp_hours;
    let end_hours = peak_hours + config.cooling_hours;

    let mut text = String::new();
    let mut n_points = 0usize;
    let mut i = 0u32;
    loop {
        // Whole-minute clock so every reading survives the `H:MM` round-trip.
        let minutes =
            (config.start_hours * 60.0).round() + i as f64 * config.interval_minutes as f64;
        let t = minutes / 60.0;
        if t > end_hours + 1e-9 || n_points >= MAX_POINTS {
            break;
        }

        let clean = firing_temp(config, t, peak_hours);
        let temp = clean + normal.sample(&mut rng);

        text.push_str(&format!("{}\t{temp:.1}\n", format_time(t)));
        n_points += 1;
        i += 1;
    }

    Ok(SampleData {
        text,
        n_points,
        peak_hours,
    })
}

fn firing_temp(config: &SampleConfig, t: f64, peak_hours: f64) -> f64 {
    if t <= peak_hours {
        config.start_temp + config.heating_rate * (t - config.start_hours).max(0.0)
    } else {
        let dt = t - peak_hours;
        let drop = (config.peak_temp - config.ambient_temp) * (-config.decay_rate * dt).exp();
        config.ambient_temp + drop
    }
}
