//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory by the session and the fitter
//! - exported to JSON/CSV
//! - reloaded later for plotting

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Decay rate used when there is not enough cooling data to fit.
pub const DEFAULT_DECAY_RATE: f64 = 0.5;

/// Minimum number of cooling-phase points before the auto-fit rate is trusted.
pub const MIN_AUTO_FIT_POINTS: usize = 3;

/// A logged temperature reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Clock time as the operator entered it (e.g. `"14:30"`).
    pub time: String,
    /// `time` on the continuous hour scale. Used for ordering and math.
    pub hours: f64,
    /// Temperature in °C.
    pub temp: f64,
}

/// Where the cooling phase starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoolingPhaseSelection {
    /// Start at the temperature peak.
    #[default]
    Auto,
    /// Start at a fixed position in the series.
    Manual(usize),
}

impl CoolingPhaseSelection {
    /// `None` means peak detection.
    pub fn from_index(index: Option<usize>) -> Self {
        match index {
            Some(i) => CoolingPhaseSelection::Manual(i),
            None => CoolingPhaseSelection::Auto,
        }
    }
}

/// One sample of a model curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub hours: f64,
    pub temp: f64,
}

/// Outcome of a bulk import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub errors: usize,
}

/// A planned heating segment: ramp at `heating_speed` until `stop_temp`, then hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Ramp speed in °C per hour.
    pub heating_speed: f64,
    /// Target temperature in °C.
    pub stop_temp: f64,
    /// Hold duration as typed (`H:MM`).
    pub hold: String,
}

/// Which decay rate drove a projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateSource {
    /// Least-squares fit to the cooling phase.
    Fitted,
    /// Operator-supplied rate.
    Manual,
}

impl RateSource {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            RateSource::Fitted => "fitted",
            RateSource::Manual => "manual",
        }
    }
}

/// Fit quality diagnostics over the cooling phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitQuality {
    pub sse: f64,
    pub rmse: f64,
    pub n: usize,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus environment defaults).
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Temperature the model decays toward (°C).
    pub ambient_temp: f64,
    /// Rate used when auto-fit is off or the cooling phase is too short.
    pub decay_rate: f64,
    /// Projection horizon (hours) measured from the cooling anchor.
    pub extrapolate_hours: f64,
    pub auto_fit: bool,

    /// Manual cooling start (series index); `None` means peak detection.
    pub cooling_start: Option<usize>,
    pub segments: Vec<Segment>,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_csv: Option<PathBuf>,
    pub export_curve: Option<PathBuf>,
}

/// A saved projection (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub ambient_temp: f64,
    pub decay_rate: f64,
    pub rate_source: RateSource,
    pub extrapolate_hours: f64,
    pub anchor: CurvePoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fit_quality: Option<FitQuality>,
    pub observations: Vec<Observation>,
    pub curve: Vec<CurvePoint>,
}
