//! Time-log entry model and filter types.
//!
//! A [`TimeLogEntry`] is one continuous work interval recorded by
//! clock-in/clock-out. Timestamps are epoch milliseconds, as stored by the
//! upstream time-tracking tables; all derived calendar values (hour of day,
//! date) use UTC.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Milliseconds in one hour, the divisor for all duration-to-hours math.
pub(crate) const MS_PER_HOUR: f64 = 3_600_000.0;

/// Lifecycle status of a work session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Clock-in recorded, no clock-out yet.
    InProgress,
    /// Session closed by clock-out.
    Completed,
    /// Session paused by the user.
    Paused,
    /// Session abandoned without completing.
    Cancelled,
}

/// One continuous work interval.
///
/// `end_time` is `None` only while the session is in progress; once closed,
/// `start_time < end_time` and `duration_ms = end_time - start_time`.
/// Created on clock-in, mutated exactly once on clock-out, immutable after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeLogEntry {
    /// Unique identifier for the entry.
    pub id: String,
    /// The user who logged this interval.
    pub user_id: String,
    /// Display name of the user, when the upstream row carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    /// Clock-in timestamp (epoch milliseconds).
    pub start_time: i64,
    /// Clock-out timestamp (epoch milliseconds); `None` while in progress.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    /// Derived duration in milliseconds, set on clock-out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<i64>,
    /// The project this interval was logged against, when declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// The department of the user, when declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Session lifecycle status.
    pub status: SessionStatus,
}

impl TimeLogEntry {
    /// Returns true once the session has a clock-out timestamp.
    pub fn is_closed(&self) -> bool {
        self.end_time.is_some()
    }

    /// Duration of the closed session in milliseconds, 0 while open.
    pub fn duration(&self) -> i64 {
        match self.end_time {
            Some(end) => self.duration_ms.unwrap_or(end - self.start_time),
            None => 0,
        }
    }

    /// Duration of the closed session in fractional hours.
    pub fn hours(&self) -> f64 {
        self.duration() as f64 / MS_PER_HOUR
    }

    /// The clock-in instant as a UTC datetime, when representable.
    pub fn start_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.start_time)
    }

    /// The clock-out instant as a UTC datetime, when closed and representable.
    pub fn end_datetime(&self) -> Option<DateTime<Utc>> {
        self.end_time.and_then(DateTime::from_timestamp_millis)
    }

    /// UTC wall-clock hour of day (0-23) of the clock-in.
    pub fn start_hour(&self) -> Option<u32> {
        self.start_datetime().map(|dt| dt.hour())
    }

    /// UTC wall-clock hour of day (0-23) of the clock-out.
    pub fn end_hour(&self) -> Option<u32> {
        self.end_datetime().map(|dt| dt.hour())
    }

    /// UTC calendar date of the clock-in, formatted `YYYY-MM-DD`.
    pub fn start_date(&self) -> Option<String> {
        self.start_datetime()
            .map(|dt| dt.format("%Y-%m-%d").to_string())
    }
}

/// Optional dimension filters applied when fetching entries.
///
/// An empty set means the dimension is not filtered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntryFilters {
    /// Restrict to these user ids.
    pub users: Vec<String>,
    /// Restrict to these departments.
    pub departments: Vec<String>,
    /// Restrict to these projects.
    pub projects: Vec<String>,
}

impl EntryFilters {
    /// Returns true when the entry passes every declared filter.
    ///
    /// Entries without a department (or project) never match a department
    /// (or project) filter, mirroring the upstream behavior.
    pub fn matches(&self, entry: &TimeLogEntry) -> bool {
        if !self.users.is_empty() && !self.users.contains(&entry.user_id) {
            return false;
        }
        if !self.departments.is_empty() {
            match &entry.department {
                Some(dept) if self.departments.contains(dept) => {}
                _ => return false,
            }
        }
        if !self.projects.is_empty() {
            match &entry.project {
                Some(project) if self.projects.contains(project) => {}
                _ => return false,
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(user_id: &str, start: i64, end: Option<i64>) -> TimeLogEntry {
        TimeLogEntry {
            id: format!("log_{user_id}_{start}"),
            user_id: user_id.to_string(),
            user_name: None,
            start_time: start,
            end_time: end,
            duration_ms: end.map(|e| e - start),
            project: None,
            department: None,
            status: if end.is_some() {
                SessionStatus::Completed
            } else {
                SessionStatus::InProgress
            },
        }
    }

    #[test]
    fn test_open_entry_has_zero_duration() {
        let open = entry("u1", 1_000, None);
        assert!(!open.is_closed());
        assert_eq!(open.duration(), 0);
        assert_eq!(open.hours(), 0.0);
    }

    #[test]
    fn test_closed_entry_duration_and_hours() {
        // 2.5 hours
        let closed = entry("u1", 0, Some(9_000_000));
        assert!(closed.is_closed());
        assert_eq!(closed.duration(), 9_000_000);
        assert!((closed.hours() - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_duration_prefers_stored_value() {
        let mut e = entry("u1", 0, Some(10_000));
        e.duration_ms = Some(7_000);
        assert_eq!(e.duration(), 7_000);
    }

    #[test]
    fn test_start_hour_and_date_are_utc() {
        // 2026-01-15T09:30:00Z
        let e = entry("u1", 1_768_469_400_000, Some(1_768_469_400_000 + 3_600_000));
        assert_eq!(e.start_hour(), Some(9));
        assert_eq!(e.start_date().as_deref(), Some("2026-01-15"));
    }

    #[test]
    fn test_empty_filters_match_everything() {
        let filters = EntryFilters::default();
        assert!(filters.matches(&entry("anyone", 0, Some(1))));
    }

    #[test]
    fn test_user_filter() {
        let filters = EntryFilters {
            users: vec!["u1".to_string()],
            ..Default::default()
        };
        assert!(filters.matches(&entry("u1", 0, Some(1))));
        assert!(!filters.matches(&entry("u2", 0, Some(1))));
    }

    #[test]
    fn test_department_filter_skips_undeclared() {
        let filters = EntryFilters {
            departments: vec!["kitchen".to_string()],
            ..Default::default()
        };
        let mut with_dept = entry("u1", 0, Some(1));
        with_dept.department = Some("kitchen".to_string());
        let without_dept = entry("u2", 0, Some(1));

        assert!(filters.matches(&with_dept));
        assert!(!filters.matches(&without_dept));
    }

    #[test]
    fn test_entry_serialization_round_trip() {
        let mut e = entry("u1", 0, Some(3_600_000));
        e.project = Some("alpha".to_string());
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"userId\":\"u1\""));
        assert!(json.contains("\"startTime\":0"));
        let back: TimeLogEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(e, back);
    }
}
