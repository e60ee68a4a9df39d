//! Heat-wave event extraction.
//!
//! A heat wave is a maximal run of consecutive readings at or above the
//! threshold, lasting at least [`MIN_EVENT_DURATION`] readings. Shorter
//! runs are dropped, never merged with their neighbours.

use chrono::NaiveDate;
use hw_lst::error::LstError;
use hw_lst::event::{HeatWaveEvent, MIN_EVENT_DURATION};
use hw_lst::reading::Reading;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What counts as "consecutive" when a series has missing days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GapPolicy {
    /// Neighbouring positions in the sorted series are consecutive, however
    /// many calendar days lie between them. A gap in the data does not end
    /// a run.
    #[default]
    IndexAdjacent,
    /// A run also ends when the next reading is more than one calendar day
    /// after the previous one. Duplicate dates do not end a run.
    CalendarAdjacent,
}

impl GapPolicy {
    fn breaks_run(self, previous: Option<NaiveDate>, current: NaiveDate) -> bool {
        match (self, previous) {
            (GapPolicy::CalendarAdjacent, Some(previous)) => (current - previous).num_days() > 1,
            _ => false,
        }
    }
}

impl FromStr for GapPolicy {
    type Err = LstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "index-adjacent" => Ok(GapPolicy::IndexAdjacent),
            "calendar-adjacent" => Ok(GapPolicy::CalendarAdjacent),
            other => Err(LstError::InvalidOption {
                option: "gap policy",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for GapPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GapPolicy::IndexAdjacent => f.write_str("index-adjacent"),
            GapPolicy::CalendarAdjacent => f.write_str("calendar-adjacent"),
        }
    }
}

/// Extract the heat waves of one region's series against a fixed threshold.
///
/// The series does not need to be sorted. Comparison is inclusive
/// (`value >= threshold`) and an empty series yields no events.
pub fn extract_events(series: &[Reading], threshold: f64) -> Vec<HeatWaveEvent> {
    extract_events_with(series, |_| threshold, GapPolicy::IndexAdjacent)
}

/// Extract heat waves where each reading may have its own threshold.
///
/// Events come back in chronological order; excess is measured against
/// the threshold of each reading. Duplicate dates each count toward
/// duration, but a date that ended a run cannot start the next one, so
/// events never share a day.
pub fn extract_events_with<F>(
    series: &[Reading],
    threshold_for: F,
    gap_policy: GapPolicy,
) -> Vec<HeatWaveEvent>
where
    F: Fn(&Reading) -> f64,
{
    let mut sorted = series.to_vec();
    Reading::sort_chronologically(&mut sorted);

    let mut events = Vec::new();
    let mut run: Vec<(&Reading, f64)> = Vec::new();
    let mut previous_date = None;
    let mut closed_on = None;

    for reading in &sorted {
        let threshold = threshold_for(reading);
        let above = reading.value >= threshold;
        if !above || gap_policy.breaks_run(previous_date, reading.date) {
            if let Some(last_date) = close_run(&mut run, &mut events) {
                closed_on = Some(last_date);
            }
        }
        if above && !(run.is_empty() && closed_on == Some(reading.date)) {
            run.push((reading, reading.value - threshold));
        }
        previous_date = Some(reading.date);
    }
    close_run(&mut run, &mut events);

    events
}

/// Turn the pending run into an event if it is long enough, then reset it.
///
/// Returns the last date of the run, if there was one.
fn close_run(
    run: &mut Vec<(&Reading, f64)>,
    events: &mut Vec<HeatWaveEvent>,
) -> Option<NaiveDate> {
    let (last, _) = *run.last()?;
    let last_date = last.date;
    if run.len() >= MIN_EVENT_DURATION {
        let (first, _) = run[0];
        let excess_sum: f64 = run.iter().map(|(_, excess)| excess).sum();
        let max_excess = run
            .iter()
            .map(|(_, excess)| *excess)
            .fold(f64::NEG_INFINITY, f64::max);
        events.push(HeatWaveEvent {
            region_id: first.region_id.clone(),
            start_date: first.date,
            end_date: last_date,
            duration: run.len(),
            mean_excess: excess_sum / run.len() as f64,
            max_excess,
        });
    }
    run.clear();
    Some(last_date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
    }

    /// Daily series starting on 2020-01-01.
    fn daily(values: &[f64]) -> Vec<Reading> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Reading::new("Pajeú", start() + Duration::days(i as i64), *v))
            .collect()
    }

    fn day(offset: i64) -> NaiveDate {
        start() + Duration::days(offset)
    }

    #[test]
    fn test_two_runs_kept() {
        let series = daily(&[5.0, 6.0, 10.0, 11.0, 12.0, 6.0, 5.0, 9.0, 9.0, 9.0, 9.0, 3.0]);
        let events = extract_events(&series, 9.0);
        assert_eq!(events.len(), 2);

        assert_eq!(events[0].start_date, day(2));
        assert_eq!(events[0].end_date, day(4));
        assert_eq!(events[0].duration, 3);
        // excesses 1, 2, 3
        assert!((events[0].mean_excess - 2.0).abs() < 1e-9);
        assert!((events[0].max_excess - 3.0).abs() < 1e-9);

        assert_eq!(events[1].start_date, day(7));
        assert_eq!(events[1].end_date, day(10));
        assert_eq!(events[1].duration, 4);
        // inclusive comparison: value == threshold qualifies with zero excess
        assert_eq!(events[1].mean_excess, 0.0);
        assert_eq!(events[1].max_excess, 0.0);
        assert_eq!(events[1].region_id, "Pajeú");
    }

    #[test]
    fn test_short_runs_discarded_not_merged() {
        let series = daily(&[10.0, 10.0, 5.0, 5.0, 10.0, 10.0]);
        assert!(extract_events(&series, 10.0).is_empty());

        // a single cool day splits what would otherwise be a 4-day run
        let series = daily(&[10.0, 10.0, 5.0, 10.0, 10.0]);
        assert!(extract_events(&series, 10.0).is_empty());
    }

    #[test]
    fn test_run_reaching_end_of_series() {
        let series = daily(&[1.0, 12.0, 13.0, 14.0]);
        let events = extract_events(&series, 10.0);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].end_date, day(3));
    }

    #[test]
    fn test_empty_series() {
        assert!(extract_events(&[], 30.0).is_empty());
    }

    #[test]
    fn test_unsorted_input_is_sorted_first() {
        let mut series = daily(&[5.0, 10.0, 11.0, 12.0, 5.0]);
        series.reverse();
        series.swap(0, 2);
        let events = extract_events(&series, 10.0);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].start_date, day(1));
        assert_eq!(events[0].end_date, day(3));
        assert_eq!(events[0].duration, 3);
    }

    #[test]
    fn test_index_adjacency_bridges_gaps() {
        // 3 hot readings with a 10-day hole in the middle
        let series = vec![
            Reading::new("A", day(0), 40.0),
            Reading::new("A", day(1), 40.0),
            Reading::new("A", day(11), 40.0),
        ];
        let events = extract_events(&series, 35.0);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].start_date, day(0));
        assert_eq!(events[0].end_date, day(11));
        assert_eq!(events[0].duration, 3);
    }

    #[test]
    fn test_calendar_adjacency_breaks_on_gaps() {
        let series = vec![
            Reading::new("A", day(0), 40.0),
            Reading::new("A", day(1), 40.0),
            Reading::new("A", day(11), 40.0),
            Reading::new("A", day(12), 40.0),
            Reading::new("A", day(13), 40.0),
        ];
        let events = extract_events_with(&series, |_| 35.0, GapPolicy::CalendarAdjacent);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].start_date, day(11));
        assert_eq!(events[0].duration, 3);
    }

    #[test]
    fn test_duplicate_dates_count_as_readings() {
        let series = vec![
            Reading::new("A", day(0), 40.0),
            Reading::new("A", day(0), 41.0),
            Reading::new("A", day(1), 42.0),
        ];
        for policy in [GapPolicy::IndexAdjacent, GapPolicy::CalendarAdjacent] {
            let events = extract_events_with(&series, |_| 35.0, policy);
            assert_eq!(events.len(), 1);
            assert_eq!(events[0].duration, 3);
        }
    }

    #[test]
    fn test_duplicate_date_below_threshold_does_not_split_a_day() {
        let series = vec![
            Reading::new("A", day(0), 40.0),
            Reading::new("A", day(1), 40.0),
            Reading::new("A", day(2), 40.0),
            Reading::new("A", day(2), 10.0),
            Reading::new("A", day(2), 40.0),
            Reading::new("A", day(3), 40.0),
            Reading::new("A", day(4), 40.0),
        ];
        for policy in [GapPolicy::IndexAdjacent, GapPolicy::CalendarAdjacent] {
            let events = extract_events_with(&series, |_| 35.0, policy);
            assert_eq!(events.len(), 1);
            assert_eq!(events[0].start_date, day(0));
            assert_eq!(events[0].end_date, day(2));
            assert_eq!(events[0].duration, 3);
        }
    }

    #[test]
    fn test_duplicate_date_can_start_a_run_after_cool_reading() {
        // no run was open on day 0, so its hot duplicate starts one
        let series = vec![
            Reading::new("A", day(0), 10.0),
            Reading::new("A", day(0), 40.0),
            Reading::new("A", day(1), 40.0),
            Reading::new("A", day(2), 40.0),
        ];
        let events = extract_events(&series, 35.0);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].start_date, day(0));
        assert_eq!(events[0].duration, 3);
    }

    #[test]
    fn test_per_reading_thresholds() {
        let series = daily(&[20.0, 20.0, 20.0, 20.0]);
        // the second reading faces a higher bar and splits the series
        let events = extract_events_with(
            &series,
            |r| if r.date == day(1) { 25.0 } else { 15.0 },
            GapPolicy::IndexAdjacent,
        );
        assert!(events.is_empty());

        let events =
            extract_events_with(&series, |r| 10.0 + r.value / 4.0, GapPolicy::IndexAdjacent);
        assert_eq!(events.len(), 1);
        assert!((events[0].mean_excess - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_nan_never_qualifies() {
        let series = daily(&[40.0, 40.0, f64::NAN, 40.0, 40.0, 40.0]);
        let events = extract_events(&series, 35.0);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].start_date, day(3));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let series = daily(&[30.0, 36.0, 37.0, 38.0, 31.0, 36.5, 36.5, 36.5, 36.5]);
        assert_eq!(extract_events(&series, 36.0), extract_events(&series, 36.0));
    }

    #[test]
    fn test_every_long_run_found_once_without_overlap() {
        // deterministic pseudo-random walk
        let mut state = 17u64;
        let values: Vec<f64> = (0..400)
            .map(|_| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                25.0 + ((state >> 33) % 150) as f64 / 10.0
            })
            .collect();
        let series = daily(&values);
        let threshold = 33.0;
        let events = extract_events(&series, threshold);

        // reference run lengths from a plain scan
        let mut expected = Vec::new();
        let mut len = 0usize;
        for (i, v) in values.iter().enumerate() {
            if *v >= threshold {
                len += 1;
            } else {
                if len >= MIN_EVENT_DURATION {
                    expected.push((i - len, len));
                }
                len = 0;
            }
        }
        if len >= MIN_EVENT_DURATION {
            expected.push((values.len() - len, len));
        }

        let found: Vec<(usize, usize)> = events
            .iter()
            .map(|e| ((e.start_date - start()).num_days() as usize, e.duration))
            .collect();
        assert_eq!(found, expected);
        assert!(events.iter().all(|e| e.duration >= MIN_EVENT_DURATION));
        for pair in events.windows(2) {
            assert!(pair[0].end_date < pair[1].start_date);
            assert!(!pair[0].overlaps(&pair[1]));
        }
    }

    #[test]
    fn test_events_never_overlap_with_duplicate_dates() {
        // every day appears twice or three times with varying values
        let mut state = 5u64;
        let mut series = Vec::new();
        for offset in 0..200 {
            let copies = 2 + (offset % 2) as usize;
            for _ in 0..copies {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let value = 25.0 + ((state >> 33) % 150) as f64 / 10.0;
                series.push(Reading::new("A", day(offset), value));
            }
        }
        for policy in [GapPolicy::IndexAdjacent, GapPolicy::CalendarAdjacent] {
            let events = extract_events_with(&series, |_| 30.0, policy);
            assert!(events.iter().all(|e| e.duration >= MIN_EVENT_DURATION));
            for pair in events.windows(2) {
                assert!(pair[0].end_date < pair[1].start_date);
                assert!(!pair[0].overlaps(&pair[1]));
            }
        }
    }
}
