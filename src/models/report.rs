//! Report record model.
//!
//! A [`Report`] is a persisted analytical artifact. Reports are append-only:
//! new requests create new rows, never mutate old ones, so the table doubles
//! as an audit trail.

use serde::{Deserialize, Serialize};

use super::EntryFilters;

/// Lifecycle status of a report row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// Aggregation in progress.
    Generating,
    /// Data and download URL present.
    Completed,
    /// Aggregation or persistence failed.
    Failed,
}

/// The parameters a report was generated with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportParameters {
    /// Window start (epoch milliseconds, inclusive).
    pub start_date: i64,
    /// Window end (epoch milliseconds, inclusive).
    pub end_date: i64,
    /// Dimension filters, when the report type supports them.
    pub filters: EntryFilters,
}

/// A generated analytical artifact.
///
/// `status == Completed` implies `data` and `download_url` are both present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Unique identifier.
    pub id: String,
    /// Human-readable report name.
    pub name: String,
    /// Report kind, e.g. `summary` or `time_tracking_weekly`.
    pub report_type: String,
    /// The parameters the report was generated with.
    pub parameters: ReportParameters,
    /// Lifecycle status.
    pub status: ReportStatus,
    /// Row creation timestamp (epoch milliseconds).
    pub created_at: i64,
    /// When aggregation finished (epoch milliseconds).
    pub generated_at: i64,
    /// Where the rendered report can be fetched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    /// The aggregated payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// The principal that requested the report.
    pub created_by: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_round_trip() {
        let report = Report {
            id: "rep_001".to_string(),
            name: "summary Report - 2026-01-01 to 2026-01-31".to_string(),
            report_type: "summary".to_string(),
            parameters: ReportParameters {
                start_date: 0,
                end_date: 100,
                filters: EntryFilters::default(),
            },
            status: ReportStatus::Completed,
            created_at: 100,
            generated_at: 100,
            download_url: Some("/api/payroll/reports/rep_001/download".to_string()),
            data: Some(serde_json::json!({"totalEmployees": 0})),
            created_by: "admin_001".to_string(),
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"reportType\":\"summary\""));
        let back: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(report, back);
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&ReportStatus::Generating).unwrap(),
            "\"generating\""
        );
        assert_eq!(
            serde_json::to_string(&ReportStatus::Failed).unwrap(),
            "\"failed\""
        );
    }
}
