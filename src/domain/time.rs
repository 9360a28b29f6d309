//! Time-of-day codec.
//!
//! Operators log clock times as `H:MM`; all math runs on a continuous hour
//! scale (`14:30` -> `14.5`). There is no range validation: `26:15` is a
//! valid reading for a firing that runs past midnight, and `9:75` parses to
//! `10.25`.

use crate::error::KilnError;

/// Parse `H:MM` into decimal hours.
///
/// Each field is read as a leading integer: surrounding whitespace and a sign
/// are accepted, trailing junk after the digits is ignored (`"08"` -> 8,
/// `"30min"` -> 30). A field without leading digits is rejected.
pub fn parse_time(s: &str) -> Result<f64, KilnError> {
    let fields: Vec<&str> = s.split(':').collect();
    if fields.len() != 2 {
        return Err(KilnError::parse(s));
    }

    let hour = parse_leading_int(fields[0]).ok_or_else(|| KilnError::parse(s))?;
    let minute = parse_leading_int(fields[1]).ok_or_else(|| KilnError::parse(s))?;

    Ok(hour + minute / 60.0)
}

/// Format decimal hours as `H:MM`.
///
/// Minutes are rounded to the nearest whole minute. A rounded value of 60
/// carries into the hour, so `1.9999` formats as `2:00` rather than `1:60`.
pub fn format_time(hours: f64) -> String {
    if !hours.is_finite() {
        return "--:--".to_string();
    }

    let mut h = hours.floor() as i64;
    let mut m = ((hours - hours.floor()) * 60.0).round() as i64;
    if m >= 60 {
        h += 1;
        m -= 60;
    }
    format!("{h}:{m:02}")
}

/// Leading-integer parse: optional whitespace, optional sign, then digits.
///
/// The digits are read as `f64`, so fields wider than `i64` still parse.
fn parse_leading_int(field: &str) -> Option<f64> {
    let s = field.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1.0, &s[1..]),
        Some(b'+') => (1.0, &s[1..]),
        _ => (1.0, s),
    };

    let digits = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    rest[..digits].parse::<f64>().ok().map(|v| sign * v)
}
