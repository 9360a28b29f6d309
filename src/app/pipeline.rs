//! Shared "projection pipeline" logic used by every front-end command.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! log text -> session -> cooling phase -> rate selection -> projection -> bounds
//!
//! The commands can then focus on presentation (printing vs exporting).

use tracing::{debug, warn};

use crate::domain::{
    CoolingPhaseSelection, CurvePoint, ImportSummary, Observation, ProjectionConfig,
};
use crate::error::AppError;
use crate::fit::selection::{RateSelection, select_decay_rate};
use crate::models::MAX_EXTRAPOLATE_HOURS;
use crate::plot::{ChartBounds, chart_bounds};
use crate::session::KilnSession;

/// A session built from a log plus what the import skipped.
#[derive(Debug, Clone)]
pub struct LoadedSession {
    pub session: KilnSession,
    pub import: ImportSummary,
}

/// All computed outputs of a single projection run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub observations: Vec<Observation>,
    /// Series index of the first cooling reading.
    pub cooling_start: usize,
    pub cooling_len: usize,
    pub rate: RateSelection,
    pub curve: Vec<CurvePoint>,
    /// Planned schedule expanded from the first reading (empty without segments).
    pub plan: Vec<CurvePoint>,
    pub bounds: ChartBounds,
}

impl RunOutput {
    pub fn anchor(&self) -> Option<&Observation> {
        self.observations.get(self.cooling_start)
    }
}

/// Import a log and apply the schedule and cooling start from `config`.
pub fn load_session(text: &str, config: &ProjectionConfig) -> Result<LoadedSession, AppError> {
    let mut session = KilnSession::new();
    let import = session.bulk_import(text);
    if import.imported == 0 {
        return Err(AppError::new(
            3,
            format!(
                "No valid readings found ({} line(s) had errors). \
                 Expected `H:MM<sep>temp` per line.",
                import.errors
            ),
        ));
    }

    for segment in &config.segments {
        session.add_segment(segment.clone())?;
    }

    let selection = CoolingPhaseSelection::from_index(config.cooling_start);
    if let CoolingPhaseSelection::Manual(index) = selection {
        if index >= session.series().len() {
            warn!(
                index,
                len = session.series().len(),
                "cooling start out of range; using peak detection"
            );
        }
    }
    session.set_cooling_phase_selection(selection);

    Ok(LoadedSession { session, import })
}

/// Execute the projection pipeline on a prepared session.
pub fn run_projection(
    session: &KilnSession,
    config: &ProjectionConfig,
) -> Result<RunOutput, AppError> {
    validate_config(config)?;

    let series = session.series();
    let (Some(cooling), Some(cooling_start)) =
        (session.cooling_phase(), session.cooling_start_index())
    else {
        return Err(AppError::new(
            3,
            format!(
                "Need at least 2 readings to locate a cooling phase (have {}).",
                series.len()
            ),
        ));
    };

    let rate = select_decay_rate(
        Some(cooling),
        config.ambient_temp,
        config.decay_rate,
        config.auto_fit,
    );
    debug!(
        cooling_start,
        cooling_len = cooling.len(),
        decay_rate = rate.decay_rate,
        source = rate.source.display_name(),
        "decay rate selected"
    );

    let curve = session.projected_curve(
        config.ambient_temp,
        rate.decay_rate,
        config.extrapolate_hours,
    );

    let plan = match series.first() {
        Some(first) if !session.schedule().is_empty() => {
            session.schedule().planned_profile(first.hours, first.temp)
        }
        _ => Vec::new(),
    };

    let bounds = chart_bounds(series, config.ambient_temp, config.extrapolate_hours);

    Ok(RunOutput {
        observations: series.to_vec(),
        cooling_start,
        cooling_len: cooling.len(),
        rate,
        curve,
        plan,
        bounds,
    })
}

fn validate_config(config: &ProjectionConfig) -> Result<(), AppError> {
    if !config.ambient_temp.is_finite() {
        return Err(AppError::new(2, "Ambient temperature must be a finite number."));
    }
    if !config.decay_rate.is_finite() {
        return Err(AppError::new(2, "Decay rate must be a finite number."));
    }
    if !(config.extrapolate_hours.is_finite()
        && (0.0..=MAX_EXTRAPOLATE_HOURS).contains(&config.extrapolate_hours))
    {
        return Err(AppError::new(
            2,
            format!("Extrapolation horizon must be between 0 and {MAX_EXTRAPOLATE_HOURS} hours."),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RateSource, Segment};

    fn config() -> ProjectionConfig {
        ProjectionConfig {
            ambient_temp: 20.0,
            decay_rate: 0.5,
            extrapolate_hours: 2.0,
            auto_fit: true,
            cooling_start: None,
            segments: Vec::new(),
            plot: false,
            plot_width: 80,
            plot_height: 20,
            export_csv: None,
            export_curve: None,
        }
    }

    const LOG: &str = "8:00\t20\n10:00\t600\n12:00\t1000\n\
                       13:00\t676.9\n14:00\t460.3\n15:00\t315.2\noops\n";

    #[test]
    fn full_run_fits_and_projects() {
        let cfg = config();
        let loaded = load_session(LOG, &cfg).unwrap();
        assert_eq!(
            loaded.import,
            ImportSummary {
                imported: 6,
                errors: 1,
            }
        );

        let run = run_projection(&loaded.session, &cfg).unwrap();
        assert_eq!(run.cooling_start, 2);
        assert_eq!(run.cooling_len, 4);
        assert_eq!(run.rate.source, RateSource::Fitted);
        assert!((run.rate.decay_rate - 0.4).abs() < 0.01);
        assert_eq!(run.curve.len(), 25);
        assert_eq!(
            run.curve[0],
            CurvePoint {
                hours: 12.0,
                temp: 1000.0,
            }
        );
        assert_eq!(run.anchor().unwrap().time, "12:00");
        assert!(run.plan.is_empty());
        assert_eq!(run.bounds.hours_min, 8.0);
        assert_eq!(run.bounds.hours_max, 17.0);
    }

    #[test]
    fn manual_rate_when_auto_fit_disabled() {
        let mut cfg = config();
        cfg.auto_fit = false;
        cfg.decay_rate = 0.25;
        let loaded = load_session(LOG, &cfg).unwrap();
        let run = run_projection(&loaded.session, &cfg).unwrap();
        assert_eq!(run.rate.source, RateSource::Manual);
        assert_eq!(run.rate.decay_rate, 0.25);
    }

    #[test]
    fn stale_cooling_start_falls_back_to_peak() {
        let mut cfg = config();
        cfg.cooling_start = Some(40);
        let loaded = load_session(LOG, &cfg).unwrap();
        let run = run_projection(&loaded.session, &cfg).unwrap();
        assert_eq!(run.cooling_start, 2);
    }

    #[test]
    fn schedule_is_expanded_from_first_reading() {
        let mut cfg = config();
        cfg.segments = vec![Segment {
            heating_speed: 245.0,
            stop_temp: 1000.0,
            hold: "0:30".to_string(),
        }];
        let loaded = load_session(LOG, &cfg).unwrap();
        let run = run_projection(&loaded.session, &cfg).unwrap();
        assert_eq!(run.plan.len(), 3);
        assert!((run.plan[1].hours - 12.0).abs() < 1e-9);
        assert!((run.plan[2].hours - 12.5).abs() < 1e-9);
    }

    #[test]
    fn empty_log_is_not_enough_data() {
        let err = load_session("nothing useful\n", &config()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn single_reading_has_no_cooling_phase() {
        let cfg = config();
        let loaded = load_session("9:00,500", &cfg).unwrap();
        let err = run_projection(&loaded.session, &cfg).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn rejects_negative_horizon() {
        let mut cfg = config();
        cfg.extrapolate_hours = -1.0;
        let loaded = load_session(LOG, &cfg).unwrap();
        let err = run_projection(&loaded.session, &cfg).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn rejects_horizon_past_cap() {
        let mut cfg = config();
        let loaded = load_session(LOG, &cfg).unwrap();

        cfg.extrapolate_hours = MAX_EXTRAPOLATE_HOURS;
        assert!(run_projection(&loaded.session, &cfg).is_ok());

        for hours in [MAX_EXTRAPOLATE_HOURS + 1.0, 1e12, 1e300] {
            cfg.extrapolate_hours = hours;
            let err = run_projection(&loaded.session, &cfg).unwrap_err();
            assert_eq!(err.exit_code(), 2);
        }
    }

    #[test]
    fn cooling_start_maps_to_manual_selection() {
        let mut cfg = config();
        cfg.cooling_start = Some(3);
        let loaded = load_session(LOG, &cfg).unwrap();
        assert_eq!(
            loaded.session.cooling_phase_selection(),
            CoolingPhaseSelection::Manual(3)
        );
        let run = run_projection(&loaded.session, &cfg).unwrap();
        assert_eq!(run.cooling_start, 3);

        let loaded = load_session(LOG, &config()).unwrap();
        assert_eq!(loaded.session.cooling_phase_selection(), CoolingPhaseSelection::Auto);
    }
}
