//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - observations and the cooling-phase selection (`Observation`, `CoolingPhaseSelection`)
//! - projection outputs (`CurvePoint`, `FitQuality`, `CurveFile`)
//! - the time-of-day codec (`parse_time`, `format_time`)

pub mod time;
pub mod types;

pub use time::*;
pub use types::*;
