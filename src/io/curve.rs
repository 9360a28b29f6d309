//! Read/write curve JSON files.
//!
//! Curve JSON is the "portable" representation of a projection:
//! - decay rate, its source, and the ambient temperature
//! - the cooling anchor and fit diagnostics
//! - the readings and the projected samples, for replotting without the log
//!
//! The schema is defined by `domain::CurveFile`.

use std::fs::File;
use std::path::Path;

use chrono::Utc;
use tracing::info;

use crate::app::pipeline::RunOutput;
use crate::domain::{CurveFile, CurvePoint, ProjectionConfig};
use crate::error::AppError;

/// Build the serializable form of a run.
pub fn curve_file(run: &RunOutput, config: &ProjectionConfig) -> Result<CurveFile, AppError> {
    let anchor = run
        .anchor()
        .ok_or_else(|| AppError::new(4, "Cooling anchor is outside the series."))?;

    Ok(CurveFile {
        tool: "kiln".to_string(),
        generated_at: Utc::now(),
        ambient_temp: config.ambient_temp,
        decay_rate: run.rate.decay_rate,
        rate_source: run.rate.source,
        extrapolate_hours: config.extrapolate_hours,
        anchor: CurvePoint {
            hours: anchor.hours,
            temp: anchor.temp,
        },
        fit_quality: run.rate.quality.clone(),
        observations: run.observations.clone(),
        curve: run.curve.clone(),
    })
}

/// Write a curve JSON file.
pub fn write_curve_json(
    path: &Path,
    run: &RunOutput,
    config: &ProjectionConfig,
) -> Result<(), AppError> {
    let curve = curve_file(run, config)?;

    let file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create curve JSON '{}': {e}", path.display()),
        )
    })?;
    serde_json::to_writer_pretty(file, &curve)
        .map_err(|e| AppError::new(2, format!("Failed to write curve JSON: {e}")))?;

    info!(path = %path.display(), samples = curve.curve.len(), "curve JSON written");
    Ok(())
}

/// Read a curve JSON file.
pub fn read_curve_json(path: &Path) -> Result<CurveFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to open curve JSON '{}': {e}", path.display()),
        )
    })?;
    let curve: CurveFile = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid curve JSON: {e}")))?;
    Ok(curve)
}
