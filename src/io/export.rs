//! Export the projected curve to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::domain::{CurvePoint, format_time};
use crate::error::AppError;

/// Write projected samples as `time,hours,temp_c`.
pub fn write_curve_csv(path: &Path, curve: &[CurvePoint]) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create export CSV '{}': {e}", path.display()),
        )
    })?;

    writeln!(file, "time,hours,temp_c")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for p in curve {
        writeln!(file, "{},{:.6},{:.3}", format_time(p.hours), p.hours, p.temp)
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    info!(path = %path.display(), rows = curve.len(), "curve CSV written");
    Ok(())
}
