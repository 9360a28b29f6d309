//! Firing log ingest.
//!
//! A log is plain text, one reading per line, in the bulk-import format
//! (`H:MM<TAB|,|space>temp`). It can come from a file or from stdin (`-`).
//! Line-level problems are not errors here: the session counts and skips
//! them. Only an unreadable source fails.

use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::AppError;

/// Read a firing log. `-` reads stdin.
pub fn read_log(path: &Path) -> Result<String, AppError> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| AppError::new(2, format!("Failed to read log from stdin: {e}")))?;
        debug!(bytes = text.len(), "log read from stdin");
        return Ok(text);
    }

    let bytes = fs::read(path)
        .map_err(|e| AppError::new(2, format!("Failed to open log '{}': {e}", path.display())))?;
    let text = decode_log(&bytes).ok_or_else(|| {
        AppError::new(
            2,
            format!("Log '{}' is not valid UTF-8 text.", path.display()),
        )
    })?;
    debug!(path = %path.display(), bytes = text.len(), "log read");
    Ok(text)
}

fn decode_log(bytes: &[u8]) -> Option<String> {
    let text = std::str::from_utf8(bytes).ok()?;
    // Spreadsheet exports sometimes prefix a BOM; it would break the first time field.
    Some(text.trim_start_matches('\u{feff}').to_string())
}
