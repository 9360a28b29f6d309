//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::app::pipeline::RunOutput;
use crate::data::Schedule;
use crate::data::schedule::hold_hours;
use crate::domain::{CurvePoint, ImportSummary, Observation, ProjectionConfig, format_time};

/// Hover-style label for one point: `14:30 - 1187.0°C`.
pub fn point_label(hours: f64, temp: f64) -> String {
    format!("{} - {temp:.1}°C", format_time(hours))
}

/// Format the full run summary (import, cooling phase, rate, projection end).
pub fn format_run_summary(
    run: &RunOutput,
    import: Option<&ImportSummary>,
    config: &ProjectionConfig,
) -> String {
    let mut out = String::new();

    out.push_str("=== kiln - Cooling Curve Projection ===\n");
    if let Some(import) = import {
        out.push_str(&format!("Imported: {} reading(s)", import.imported));
        if import.errors > 0 {
            out.push_str(&format!(" | {} line(s) skipped", import.errors));
        }
        out.push('\n');
    }

    if let (Some(first), Some(last)) = (run.observations.first(), run.observations.last()) {
        out.push_str(&format!(
            "Series: n={} | time=[{}, {}] | ambient={:.1}°C\n",
            run.observations.len(),
            first.time,
            last.time,
            config.ambient_temp
        ));
    }

    if let Some(anchor) = run.anchor() {
        out.push_str(&format!(
            "Cooling phase: n={} from #{} ({})\n",
            run.cooling_len,
            run.cooling_start,
            point_label(anchor.hours, anchor.temp)
        ));
    }

    out.push_str("\nDecay rate:\n");
    out.push_str(&format!(
        "- k = {:.3} /h ({})\n",
        run.rate.decay_rate,
        run.rate.source.display_name()
    ));
    if let Some(q) = &run.rate.quality {
        out.push_str(&format!(
            "- SSE={:.3} RMSE={:.3}°C over {} reading(s)\n",
            q.sse, q.rmse, q.n
        ));
    }
    if run.rate.decay_rate > 0.0 {
        let half_life = std::f64::consts::LN_2 / run.rate.decay_rate;
        out.push_str(&format!("- half-life to ambient: {half_life:.2} h\n"));
    }

    if let Some(end) = run.curve.last() {
        out.push_str(&format!(
            "\nProjection: {} sample(s), ends at {}\n",
            run.curve.len(),
            point_label(end.hours, end.temp)
        ));
    }

    out
}

/// Format the series as a table, marking the cooling anchor.
pub fn format_series_table(observations: &[Observation], cooling_start: Option<usize>) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:>4}  {:>6}  {:>8}\n", "#", "time", "temp"));
    for (i, p) in observations.iter().enumerate() {
        let mark = if cooling_start == Some(i) { " <- cooling start" } else { "" };
        out.push_str(&format!("{i:>4}  {:>6}  {:>8.1}{mark}\n", p.time, p.temp));
    }
    out
}

/// Format the schedule table plus the planned corners.
pub fn format_schedule(schedule: &Schedule, plan: &[CurvePoint]) -> String {
    let mut out = String::new();
    out.push_str("Schedule:\n");
    out.push_str(&format!("{:>4}  {:>8}  {:>8}  {:>6}\n", "#", "°C/h", "stop °C", "hold"));
    for (i, seg) in schedule.segments().iter().enumerate() {
        let note = if hold_hours(&seg.hold) == 0.0 && seg.hold.trim() != "0:00" {
            " (unparsed hold)"
        } else {
            ""
        };
        out.push_str(&format!(
            "{i:>4}  {:>8.1}  {:>8.1}  {:>6}{note}\n",
            seg.heating_speed, seg.stop_temp, seg.hold
        ));
    }

    if plan.len() > 1 {
        let labels: Vec<String> = plan.iter().map(|p| point_label(p.hours, p.temp)).collect();
        out.push_str(&format!("Plan: {}\n", labels.join(" -> ")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Segment;

    #[test]
    fn label_matches_tooltip_format() {
        assert_eq!(point_label(14.5, 1187.04), "14:30 - 1187.0°C");
    }

    #[test]
    fn series_table_marks_anchor() {
        let obs = vec![
            Observation {
                time: "8:00".into(),
                hours: 8.0,
                temp: 20.0,
            },
            Observation {
                time: "12:00".into(),
                hours: 12.0,
                temp: 1000.0,
            },
        ];
        let txt = format_series_table(&obs, Some(1));
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(!lines[1].contains("cooling start"));
        assert!(lines[2].ends_with("1000.0 <- cooling start"));
    }

    #[test]
    fn schedule_flags_unparsed_holds() {
        let mut schedule = Schedule::new();
        schedule
            .add_segment(Segment {
                heating_speed: 100.0,
                stop_temp: 600.0,
                hold: "soak".into(),
            })
            .unwrap();
        schedule
            .add_segment(Segment {
                heating_speed: 150.0,
                stop_temp: 900.0,
                hold: "0:20".into(),
            })
            .unwrap();
        let plan = schedule.planned_profile(0.0, 20.0);
        let txt = format_schedule(&schedule, &plan);
        assert!(txt.contains("soak (unparsed hold)"));
        assert!(!txt.contains("0:20 (unparsed"));
        assert!(txt.contains("Plan: 0:00 - 20.0°C -> 5:48 - 600.0°C"));
    }
}
