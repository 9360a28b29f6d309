//! Cooling phase selection.
//!
//! The cooling phase is a suffix of the series: everything from the chosen
//! start point onward. With no (valid) manual start, the start is the first
//! reading at the maximum temperature.

use crate::domain::{CoolingPhaseSelection, Observation};

/// Index of the first maximum-temperature reading.
pub fn peak_index(series: &[Observation]) -> Option<usize> {
    let first = series.first()?;
    let mut peak = 0;
    let mut peak_temp = first.temp;
    for (i, p) in series.iter().enumerate().skip(1) {
        if p.temp > peak_temp {
            peak_temp = p.temp;
            peak = i;
        }
    }
    Some(peak)
}

/// Resolve where the cooling phase starts, or `None` for fewer than 2 readings.
///
/// A manual index past the end falls back to peak detection.
pub fn cooling_start(series: &[Observation], selection: CoolingPhaseSelection) -> Option<usize> {
    if series.len() < 2 {
        return None;
    }
    match selection {
        CoolingPhaseSelection::Manual(index) if index < series.len() => Some(index),
        _ => peak_index(series),
    }
}

/// The cooling-phase suffix of `series`.
pub fn select_cooling_phase(
    series: &[Observation],
    selection: CoolingPhaseSelection,
) -> Option<&[Observation]> {
    cooling_start(series, selection).map(|start| &series[start..])
}
