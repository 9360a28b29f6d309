//! Observation series storage and bulk text import.
//!
//! The series is kept sorted by `hours` at all times. Sorting is stable, so
//! readings logged at the same clock time keep the order they were entered.

use tracing::{debug, warn};

use crate::domain::{ImportSummary, Observation, parse_time};
use crate::error::KilnError;

/// Time-sorted collection of temperature readings.
#[derive(Debug, Clone, Default)]
pub struct SeriesStore {
    points: Vec<Observation>,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Read-only view in time order.
    pub fn points(&self) -> &[Observation] {
        &self.points
    }

    /// Add a single reading.
    ///
    /// Nothing is inserted when either field is rejected.
    pub fn add(&mut self, time: &str, temp: f64) -> Result<(), KilnError> {
        if !temp.is_finite() {
            return Err(KilnError::validation(format!(
                "temperature must be a finite number, got {temp}"
            )));
        }
        let hours = parse_time(time).map_err(|e| KilnError::validation(e.to_string()))?;

        self.points.push(Observation {
            time: time.to_string(),
            hours,
            temp,
        });
        self.sort();
        debug!(time, hours, temp, len = self.points.len(), "observation added");
        Ok(())
    }

    /// Remove the reading at `index`, returning it.
    pub fn delete(&mut self, index: usize) -> Result<Observation, KilnError> {
        if index >= self.points.len() {
            return Err(KilnError::Index {
                index,
                len: self.points.len(),
            });
        }
        let removed = self.points.remove(index);
        debug!(index, time = %removed.time, len = self.points.len(), "observation deleted");
        Ok(removed)
    }

    /// Import one reading per line (`time<sep>temp`).
    ///
    /// Separators are tried in order: tab, comma, whitespace run. Bad lines are
    /// counted and skipped; the import itself never fails.
    pub fn bulk_import(&mut self, text: &str) -> ImportSummary {
        let mut summary = ImportSummary::default();

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            match parse_import_line(line) {
                Some(obs) => {
                    self.points.push(obs);
                    summary.imported += 1;
                }
                None => {
                    warn!(line = idx + 1, content = line, "skipping unparsable import line");
                    summary.errors += 1;
                }
            }
        }

        self.sort();
        debug!(
            imported = summary.imported,
            errors = summary.errors,
            len = self.points.len(),
            "bulk import finished"
        );
        summary
    }

    /// Drop every reading.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    fn sort(&mut self) {
        self.points.sort_by(|a, b| a.hours.total_cmp(&b.hours));
    }
}

fn parse_import_line(line: &str) -> Option<Observation> {
    let fields = split_fields(line);
    if fields.len() < 2 {
        return None;
    }

    let time = fields[0].trim();
    let temp = parse_leading_f64(fields[1].trim())?;
    let hours = parse_time(time).ok()?;

    Some(Observation {
        time: time.to_string(),
        hours,
        temp,
    })
}

fn split_fields(line: &str) -> Vec<&str> {
    let tabbed: Vec<&str> = line.split('\t').collect();
    if tabbed.len() >= 2 {
        return tabbed;
    }
    let commas: Vec<&str> = line.split(',').collect();
    if commas.len() >= 2 {
        return commas;
    }
    line.split_whitespace().collect()
}

/// Parse the longest leading decimal number (`"150°C"` -> 150).
///
/// Returns `None` when the text does not start with a number.
fn parse_leading_f64(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    // Exponent only counts when digits follow it.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn times(store: &SeriesStore) -> Vec<&str> {
        store.points().iter().map(|p| p.time.as_str()).collect()
    }

    #[test]
    fn add_keeps_series_sorted() {
        let mut store = SeriesStore::new();
        store.add("10:00", 300.0).unwrap();
        store.add("8:00", 20.0).unwrap();
        store.add("9:30", 150.0).unwrap();
        assert_eq!(times(&store), ["8:00", "9:30", "10:00"]);
    }

    #[test]
    fn duplicate_times_keep_insertion_order() {
        let mut store = SeriesStore::new();
        store.add("9:00", 1.0).unwrap();
        store.add("8:00", 0.0).unwrap();
        store.add("9:00", 2.0).unwrap();
        store.add("09:00", 3.0).unwrap();
        let temps: Vec<f64> = store.points().iter().map(|p| p.temp).collect();
        assert_eq!(temps, [0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn rejected_add_leaves_series_untouched() {
        let mut store = SeriesStore::new();
        store.add("8:00", 20.0).unwrap();

        let err = store.add("noon", 100.0).unwrap_err();
        assert!(matches!(err, KilnError::Validation(_)));
        let err = store.add("9:00", f64::NAN).unwrap_err();
        assert!(matches!(err, KilnError::Validation(_)));

        assert_eq!(store.len(), 1);
    }

    #[test]
    fn delete_out_of_range_is_an_index_error() {
        let mut store = SeriesStore::new();
        store.add("8:00", 20.0).unwrap();
        assert_eq!(
            store.delete(1).unwrap_err(),
            KilnError::Index { index: 1, len: 1 }
        );
        let removed = store.delete(0).unwrap();
        assert_eq!(removed.time, "8:00");
        assert!(store.is_empty());
    }

    #[test]
    fn bulk_import_mixed_separators() {
        let mut store = SeriesStore::new();
        let summary = store.bulk_import("8:00\t20\n9:00,150\ngarbage line\n10:30 300");
        assert_eq!(
            summary,
            ImportSummary {
                imported: 3,
                errors: 1,
            }
        );
        assert_eq!(times(&store), ["8:00", "9:00", "10:30"]);
        assert!((store.points()[2].hours - 10.5).abs() < 1e-12);
    }

    #[test]
    fn bulk_import_skips_blank_lines_and_sorts_once() {
        let mut store = SeriesStore::new();
        let text = "\n  11:00, 500 \n\n8:00 , 20\n   \n9:45\t210.5\textra\n";
        let summary = store.bulk_import(text);
        assert_eq!(
            summary,
            ImportSummary {
                imported: 3,
                errors: 0,
            }
        );
        assert_eq!(times(&store), ["8:00", "9:45", "11:00"]);
        assert!((store.points()[1].temp - 210.5).abs() < 1e-12);
    }

    #[test]
    fn bulk_import_counts_bad_temperature_and_time() {
        let mut store = SeriesStore::new();
        let summary = store.bulk_import("8:00,hot\nlunch,200\nsingle\n9:00,210");
        assert_eq!(
            summary,
            ImportSummary {
                imported: 1,
                errors: 3,
            }
        );
    }

    #[test]
    fn tab_split_wins_over_comma() {
        // The comma stays inside the temperature field, which still parses
        // as a leading number.
        let mut store = SeriesStore::new();
        let summary = store.bulk_import("8:00\t1,200");
        assert_eq!(summary.imported, 1);
        assert!((store.points()[0].temp - 1.0).abs() < 1e-12);
    }

    #[test]
    fn leading_number_parse() {
        assert_eq!(parse_leading_f64("150°C"), Some(150.0));
        assert_eq!(parse_leading_f64("-3.5e2x"), Some(-350.0));
        assert_eq!(parse_leading_f64(".5"), Some(0.5));
        assert_eq!(parse_leading_f64("7."), Some(7.0));
        assert_eq!(parse_leading_f64("12e"), Some(12.0));
        assert_eq!(parse_leading_f64("hot"), None);
        assert_eq!(parse_leading_f64("-"), None);
        assert_eq!(parse_leading_f64("."), None);
        assert_eq!(parse_leading_f64(""), None);
    }
}
