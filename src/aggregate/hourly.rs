//! Hour-of-day breakdown.
//!
//! Each entry spans the wall-clock hours `[start_hour, end_hour]` (UTC,
//! inclusive) and its duration is distributed evenly across every hour
//! bucket it touches. This is an approximation inherited from the upstream
//! reports (it does not account for partial-hour occupancy) and is kept
//! exactly for compatibility; do not replace it with minute-level
//! attribution.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::TimeLogEntry;

/// Accumulated activity within one wall-clock hour of day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourBucket {
    /// Hour of day, 0-23.
    pub hour: u32,
    /// Hours of work attributed to this bucket.
    pub total_hours: f64,
    /// Number of distinct users active in this bucket.
    pub active_users: usize,
}

/// Distributes each entry's duration evenly across the hour buckets it
/// touches and counts distinct active users per bucket.
///
/// An overnight span (`end_hour < start_hour` after the midnight wrap) is
/// clamped to the single start-hour bucket rather than iterating a negative
/// range.
pub fn hourly_breakdown(entries: &[TimeLogEntry]) -> Vec<HourBucket> {
    let mut buckets: BTreeMap<u32, (f64, HashSet<&str>)> = BTreeMap::new();

    for entry in entries {
        let (Some(start_hour), Some(end_hour)) = (entry.start_hour(), entry.end_hour()) else {
            continue;
        };
        let end_hour = if end_hour < start_hour {
            start_hour
        } else {
            end_hour
        };

        let span = (end_hour - start_hour + 1) as f64;
        let per_hour_share = entry.hours() / span;

        for hour in start_hour..=end_hour {
            let (total, users) = buckets.entry(hour).or_default();
            *total += per_hour_share;
            users.insert(entry.user_id.as_str());
        }
    }

    buckets
        .into_iter()
        .map(|(hour, (total_hours, users))| HourBucket {
            hour,
            total_hours,
            active_users: users.len(),
        })
        .collect()
}
