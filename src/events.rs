//! Raw event store adapter.
//!
//! [`EventFeed`] is the read-only gateway from the backing store to the
//! aggregator. It owns the window policy: windows are inclusive on both
//! bounds (`entry.start_time >= start && entry.end_time <= end`), and only
//! entries fully closed inside the window are returned. In-progress sessions
//! are never counted in historical reports.

use std::sync::Arc;

use crate::error::EngineResult;
use crate::models::{EntryFilters, PaySlip, TimeLogEntry};
use crate::ports::RecordStore;

/// Read-only access to time-log entries and pay slips, windowed and filtered.
#[derive(Clone)]
pub struct EventFeed {
    store: Arc<dyn RecordStore>,
}

impl EventFeed {
    /// Creates a feed over the given store.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Fetches entries fully closed within `[start, end]` that pass the
    /// dimension filters. Empty results are not errors; store errors
    /// propagate unchanged.
    pub async fn fetch_entries(
        &self,
        start: i64,
        end: i64,
        filters: &EntryFilters,
    ) -> EngineResult<Vec<TimeLogEntry>> {
        let entries = self.store.list_time_logs().await?;
        Ok(entries
            .into_iter()
            .filter(|entry| match entry.end_time {
                Some(entry_end) => entry.start_time >= start && entry_end <= end,
                None => false,
            })
            .filter(|entry| filters.matches(entry))
            .collect())
    }

    /// Fetches pay slips created within `[start, end]`.
    pub async fn fetch_pay_slips(&self, start: i64, end: i64) -> EngineResult<Vec<PaySlip>> {
        let slips = self.store.list_pay_slips().await?;
        Ok(slips
            .into_iter()
            .filter(|slip| slip.created_at >= start && slip.created_at <= end)
            .collect())
    }
}
