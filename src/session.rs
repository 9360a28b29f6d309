//! A single operator session: the logged series, the cooling-phase choice and
//! the planned schedule.
//!
//! Front-ends own a `KilnSession` and call into it; nothing here reaches back
//! into presentation state. Fitting and projection are recomputed on every
//! call.

use tracing::debug;

use crate::data::{Schedule, SeriesStore};
use crate::domain::{CoolingPhaseSelection, CurvePoint, ImportSummary, Observation, Segment};
use crate::error::KilnError;
use crate::fit::{cooling_start, fit_decay_rate, select_cooling_phase};
use crate::models::project;

#[derive(Debug, Clone, Default)]
pub struct KilnSession {
    series: SeriesStore,
    selection: CoolingPhaseSelection,
    schedule: Schedule,
}

impl KilnSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_observation(&mut self, time: &str, temp: f64) -> Result<(), KilnError> {
        self.series.add(time, temp)
    }

    /// Delete a reading.
    ///
    /// Deleting the reading a manual cooling start points at, or shrinking the
    /// series below a manual index, resets the selection to `Auto`.
    pub fn delete_observation(&mut self, index: usize) -> Result<(), KilnError> {
        self.series.delete(index)?;
        if let CoolingPhaseSelection::Manual(selected) = self.selection {
            if selected == index || selected >= self.series.len() {
                debug!(selected, deleted = index, "manual cooling start invalidated");
                self.selection = CoolingPhaseSelection::Auto;
            }
        }
        Ok(())
    }

    pub fn bulk_import(&mut self, text: &str) -> ImportSummary {
        self.series.bulk_import(text)
    }

    /// Empty the series and go back to peak detection. The schedule is kept.
    pub fn clear_all(&mut self) {
        self.series.clear();
        self.selection = CoolingPhaseSelection::Auto;
        debug!("session cleared");
    }

    pub fn set_cooling_phase_selection(&mut self, selection: CoolingPhaseSelection) {
        self.selection = selection;
    }

    pub fn cooling_phase_selection(&self) -> CoolingPhaseSelection {
        self.selection
    }

    pub fn series(&self) -> &[Observation] {
        self.series.points()
    }

    /// The current cooling phase, or `None` with fewer than two readings.
    pub fn cooling_phase(&self) -> Option<&[Observation]> {
        select_cooling_phase(self.series.points(), self.selection)
    }

    /// Series index where the cooling phase starts.
    pub fn cooling_start_index(&self) -> Option<usize> {
        cooling_start(self.series.points(), self.selection)
    }

    /// Least-squares decay rate for the current cooling phase.
    ///
    /// Without a cooling phase this is the default rate.
    pub fn fitted_decay_rate(&self, ambient: f64) -> f64 {
        let phase = self.cooling_phase().unwrap_or(&[]);
        let k = fit_decay_rate(phase, ambient);
        debug!(ambient, points = phase.len(), decay_rate = k, "decay rate fitted");
        k
    }

    /// Project the model from the first cooling reading.
    ///
    /// Empty when there is no cooling phase.
    pub fn projected_curve(
        &self,
        ambient: f64,
        decay_rate: f64,
        extrapolate_hours: f64,
    ) -> Vec<CurvePoint> {
        match self.cooling_phase().and_then(|phase| phase.first()) {
            Some(anchor) => project(
                anchor.hours,
                anchor.temp,
                ambient,
                decay_rate,
                extrapolate_hours,
            ),
            None => Vec::new(),
        }
    }

    pub fn add_segment(&mut self, segment: Segment) -> Result<(), KilnError> {
        self.schedule.add_segment(segment)
    }

    pub fn delete_segment(&mut self, index: usize) -> Result<(), KilnError> {
        self.schedule.delete_segment(index).map(|_| ())
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }
}
