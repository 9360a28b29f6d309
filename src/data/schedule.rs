//! Planned heating schedule.
//!
//! A schedule is a list of segments. Each segment ramps toward a stop
//! temperature at a fixed speed and then holds. Holds are stored exactly as
//! typed so the operator sees what they entered.

use tracing::debug;

use crate::domain::{CurvePoint, Segment, parse_time};
use crate::error::KilnError;

#[derive(Debug, Clone, Default)]
pub struct Schedule {
    segments: Vec<Segment>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn add_segment(&mut self, segment: Segment) -> Result<(), KilnError> {
        if !segment.heating_speed.is_finite() {
            return Err(KilnError::validation("heating speed must be a finite number"));
        }
        if !segment.stop_temp.is_finite() {
            return Err(KilnError::validation("stop temperature must be a finite number"));
        }
        if segment.hold.trim().is_empty() {
            return Err(KilnError::validation("hold time is required"));
        }

        debug!(
            speed = segment.heating_speed,
            stop = segment.stop_temp,
            hold = %segment.hold,
            "segment added"
        );
        self.segments.push(segment);
        Ok(())
    }

    pub fn delete_segment(&mut self, index: usize) -> Result<Segment, KilnError> {
        if index >= self.segments.len() {
            return Err(KilnError::Index {
                index,
                len: self.segments.len(),
            });
        }
        Ok(self.segments.remove(index))
    }

    /// Expand the schedule into a piecewise-linear temperature plan.
    ///
    /// Output starts at `(start_hours, start_temp)` and adds a corner at the
    /// end of every ramp and every non-zero hold. Segments with a
    /// non-positive speed skip the ramp; unparsable holds are treated as zero.
    pub fn planned_profile(&self, start_hours: f64, start_temp: f64) -> Vec<CurvePoint> {
        let mut out = vec![CurvePoint {
            hours: start_hours,
            temp: start_temp,
        }];
        let mut t = start_hours;
        let mut temp = start_temp;

        for seg in &self.segments {
            if seg.heating_speed > 0.0 {
                let ramp = (seg.stop_temp - temp).abs() / seg.heating_speed;
                if ramp > 0.0 {
                    t += ramp;
                    temp = seg.stop_temp;
                    out.push(CurvePoint { hours: t, temp });
                }
            }

            let hold = hold_hours(&seg.hold);
            if hold > 0.0 {
                t += hold;
                out.push(CurvePoint { hours: t, temp });
            }
        }

        out
    }
}

/// Hold duration in hours; `0` when the text is not `H:MM`.
pub fn hold_hours(hold: &str) -> f64 {
    match parse_time(hold.trim()) {
        Ok(h) if h.is_finite() && h > 0.0 => h,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(speed: f64, stop: f64, hold: &str) -> Segment {
        Segment {
            heating_speed: speed,
            stop_temp: stop,
            hold: hold.to_string(),
        }
    }

    #[test]
    fn add_rejects_incomplete_segments() {
        let mut schedule = Schedule::new();
        assert!(schedule.add_segment(seg(f64::NAN, 600.0, "0:30")).is_err());
        assert!(schedule.add_segment(seg(100.0, f64::INFINITY, "0:30")).is_err());
        assert!(schedule.add_segment(seg(100.0, 600.0, "  ")).is_err());
        assert!(schedule.is_empty());
    }

    #[test]
    fn delete_checks_range() {
        let mut schedule = Schedule::new();
        schedule.add_segment(seg(100.0, 600.0, "0:30")).unwrap();
        assert!(matches!(
            schedule.delete_segment(3),
            Err(KilnError::Index { index: 3, len: 1 })
        ));
        assert_eq!(schedule.delete_segment(0).unwrap().stop_temp, 600.0);
    }

    #[test]
    fn profile_ramps_then_holds() {
        let mut schedule = Schedule::new();
        schedule.add_segment(seg(100.0, 620.0, "0:30")).unwrap();
        schedule.add_segment(seg(300.0, 1220.0, "0:15")).unwrap();

        let plan = schedule.planned_profile(8.0, 20.0);
        let expected = [
            (8.0, 20.0),
            (14.0, 620.0),
            (14.5, 620.0),
            (16.5, 1220.0),
            (16.75, 1220.0),
        ];
        assert_eq!(plan.len(), expected.len());
        for (p, (h, t)) in plan.iter().zip(expected) {
            assert!((p.hours - h).abs() < 1e-9, "hours {} vs {h}", p.hours);
            assert!((p.temp - t).abs() < 1e-9);
        }
    }

    #[test]
    fn profile_skips_zero_speed_and_bad_hold() {
        let mut schedule = Schedule::new();
        schedule.add_segment(seg(0.0, 900.0, "forever")).unwrap();
        let plan = schedule.planned_profile(0.0, 20.0);
        assert_eq!(plan.len(), 1);
    }
}
