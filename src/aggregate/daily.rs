//! Calendar-day breakdown.
//!
//! Entries are grouped by the UTC calendar date of their clock-in. An entry
//! that runs past midnight is counted entirely against its start date.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::TimeLogEntry;

/// Accumulated activity for one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBucket {
    /// UTC date, `YYYY-MM-DD`.
    pub date: String,
    /// Total hours logged on this date.
    pub total_hours: f64,
    /// Number of sessions started on this date.
    pub sessions: usize,
    /// `min(100, total_hours / baseline * 100)`.
    pub productivity: f64,
}

/// Groups entries by UTC start date, summing duration and session counts.
///
/// `baseline_hours` is the day length treated as 100% productivity (8 hours
/// in the default configuration).
pub fn daily_breakdown(entries: &[TimeLogEntry], baseline_hours: f64) -> Vec<DayBucket> {
    let mut days: BTreeMap<String, (f64, usize)> = BTreeMap::new();

    for entry in entries {
        let Some(date) = entry.start_date() else {
            continue;
        };
        let (hours, sessions) = days.entry(date).or_default();
        *hours += entry.hours();
        *sessions += 1;
    }

    days.into_iter()
        .map(|(date, (total_hours, sessions))| DayBucket {
            date,
            total_hours,
            sessions,
            productivity: (total_hours / baseline_hours * 100.0).min(100.0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SessionStatus;
    use chrono::{TimeZone, Utc};

    fn at(day: u32, hour: u32) -> i64 {
        Utc.with_ymd_and_hms(2026, 1, day, hour, 0, 0)
            .unwrap()
            .timestamp_millis()
    }

    fn entry(start: i64, hours: f64) -> TimeLogEntry {
        let duration = (hours * 3_600_000.0) as i64;
        TimeLogEntry {
            id: format!("log_{start}"),
            user_id: "u1".to_string(),
            user_name: None,
            start_time: start,
            end_time: Some(start + duration),
            duration_ms: Some(duration),
            project: None,
            department: None,
            status: SessionStatus::Completed,
        }
    }

    #[test]
    fn test_groups_by_utc_start_date() {
        let entries = vec![
            entry(at(15, 9), 4.0),
            entry(at(15, 14), 2.0),
            entry(at(16, 9), 8.0),
        ];
        let days = daily_breakdown(&entries, 8.0);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, "2026-01-15");
        assert!((days[0].total_hours - 6.0).abs() < 1e-9);
        assert_eq!(days[0].sessions, 2);
        assert_eq!(days[1].date, "2026-01-16");
        assert_eq!(days[1].sessions, 1);
    }

    #[test]
    fn test_productivity_against_baseline() {
        let days = daily_breakdown(&[entry(at(15, 9), 4.0)], 8.0);
        assert!((days[0].productivity - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_productivity_caps_at_100() {
        let days = daily_breakdown(&[entry(at(15, 6), 12.0)], 8.0);
        assert_eq!(days[0].productivity, 100.0);
    }

    #[test]
    fn test_days_sorted_ascending() {
        let entries = vec![entry(at(20, 9), 1.0), entry(at(12, 9), 1.0)];
        let days = daily_breakdown(&entries, 8.0);
        assert_eq!(days[0].date, "2026-01-12");
        assert_eq!(days[1].date, "2026-01-20");
    }

    #[test]
    fn test_overnight_entry_counts_against_start_date() {
        // Starts 23:00 on the 15th, runs 3 hours into the 16th
        let days = daily_breakdown(&[entry(at(15, 23), 3.0)], 8.0);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, "2026-01-15");
    }
}
