//! Scalar hour metrics.

use crate::models::TimeLogEntry;

/// Sums the duration of all entries in fractional hours.
///
/// # Example
///
/// ```
/// use payroll_engine::aggregate::total_hours;
/// use payroll_engine::models::{SessionStatus, TimeLogEntry};
///
/// let entry = TimeLogEntry {
///     id: "log_001".to_string(),
///     user_id: "u1".to_string(),
///     user_name: None,
///     start_time: 0,
///     end_time: Some(5_400_000), // 1.5 hours
///     duration_ms: Some(5_400_000),
///     project: None,
///     department: None,
///     status: SessionStatus::Completed,
/// };
/// assert!((total_hours(&[entry]) - 1.5).abs() < 1e-9);
/// ```
pub fn total_hours(entries: &[TimeLogEntry]) -> f64 {
    entries.iter().map(TimeLogEntry::hours).sum()
}

/// Mean session length in hours: `total_hours / session_count`.
///
/// Returns 0 when there are no sessions; there is no division by zero.
pub fn average_session_duration(entries: &[TimeLogEntry]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }
    total_hours(entries) / entries.len() as f64
}

/// Rounds half away from zero to one decimal place, the presentation
/// precision used in report payloads.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
