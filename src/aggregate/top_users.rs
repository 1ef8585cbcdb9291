//! Per-user activity ranking.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::TimeLogEntry;

/// Accumulated activity for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserActivity {
    /// The user id.
    pub user_id: String,
    /// Display name, falling back to `User <id>` when the rows carry none.
    pub user_name: String,
    /// Total hours across all of the user's sessions.
    pub total_hours: f64,
    /// Number of sessions.
    pub sessions: usize,
}

/// Groups entries by user, sums hours and session counts, and returns the
/// top `n` users by hours.
///
/// The sort is stable and descending, so ties keep the original grouping
/// order (first appearance in the entry list).
pub fn top_users(entries: &[TimeLogEntry], n: usize) -> Vec<UserActivity> {
    let mut order: Vec<String> = Vec::new();
    let mut by_user: HashMap<String, UserActivity> = HashMap::new();

    for entry in entries {
        let activity = by_user
            .entry(entry.user_id.clone())
            .or_insert_with(|| {
                order.push(entry.user_id.clone());
                UserActivity {
                    user_id: entry.user_id.clone(),
                    user_name: entry
                        .user_name
                        .clone()
                        .unwrap_or_else(|| format!("User {}", entry.user_id)),
                    total_hours: 0.0,
                    sessions: 0,
                }
            });
        activity.total_hours += entry.hours();
        activity.sessions += 1;
    }

    let mut ranked: Vec<UserActivity> = order
        .into_iter()
        .filter_map(|user_id| by_user.remove(&user_id))
        .collect();
    ranked.sort_by(|a, b| {
        b.total_hours
            .partial_cmp(&a.total_hours)
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(n);
    ranked
}
