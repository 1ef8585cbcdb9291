//! Report dispatch and row assembly.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::aggregate::{
    DayBucket, DepartmentShare, HourBucket, ProjectShare, UserActivity, average_session_duration,
    benefits_report, daily_breakdown, department_breakdown, detailed_payroll_report,
    hourly_breakdown, payroll_summary, project_breakdown, round1, tax_report, top_users,
    total_hours,
};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::events::EventFeed;
use crate::models::{EntryFilters, Report, ReportParameters, ReportStatus};
use crate::ports::{Principal, RecordStore};

/// The payroll report kinds the builder can dispatch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollReportType {
    /// Scalar totals over the window.
    Summary,
    /// Totals plus one row per pay slip.
    Detailed,
    /// Tax withholding classification.
    Tax,
    /// Tax withholding classification, condensed naming kept for callers of
    /// the original report endpoint.
    TaxSummary,
    /// Benefit contribution classification.
    Benefits,
}

impl PayrollReportType {
    /// The wire name of the report type.
    pub fn as_str(&self) -> &'static str {
        match self {
            PayrollReportType::Summary => "summary",
            PayrollReportType::Detailed => "detailed",
            PayrollReportType::Tax => "tax",
            PayrollReportType::TaxSummary => "tax_summary",
            PayrollReportType::Benefits => "benefits",
        }
    }
}

/// The time-tracking report granularities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeTrackingReportType {
    /// One-day window.
    Daily,
    /// One-week window.
    Weekly,
    /// One-month window.
    Monthly,
    /// Caller-chosen window.
    Custom,
}

impl TimeTrackingReportType {
    /// The wire name of the granularity.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeTrackingReportType::Daily => "daily",
            TimeTrackingReportType::Weekly => "weekly",
            TimeTrackingReportType::Monthly => "monthly",
            TimeTrackingReportType::Custom => "custom",
        }
    }
}

/// The reporting window, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPeriod {
    /// Window start, `YYYY-MM-DD`.
    pub start_date: String,
    /// Window end, `YYYY-MM-DD`.
    pub end_date: String,
}

/// Result of a payroll report generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollReportOutcome {
    /// Always true; failures are errors.
    pub success: bool,
    /// The persisted report row id.
    pub report_id: String,
    /// The dispatched report type.
    pub report_type: PayrollReportType,
    /// When aggregation finished (epoch milliseconds).
    pub generated_at: i64,
    /// The reporting window.
    pub period: ReportPeriod,
    /// Where the rendered report can be fetched.
    pub download_url: String,
    /// The aggregated payload.
    pub data: serde_json::Value,
}

/// Aggregated time-tracking metrics, rounded to presentation precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeTrackingData {
    /// Total hours across all sessions.
    pub total_hours: f64,
    /// Number of sessions.
    pub total_sessions: usize,
    /// Mean session length in hours.
    pub average_session_duration: f64,
    /// `total_hours / (sessions * baseline) * 100`, 0 with no activity.
    pub productivity_score: f64,
    /// Top users by hours.
    pub top_users: Vec<UserActivity>,
    /// Hour-of-day buckets.
    pub hourly_breakdown: Vec<HourBucket>,
    /// Calendar-day buckets.
    pub daily_breakdown: Vec<DayBucket>,
    /// Per-project shares.
    pub project_breakdown: Vec<ProjectShare>,
    /// Per-department shares.
    pub department_breakdown: Vec<DepartmentShare>,
}

/// The assembled time-tracking report returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeTrackingReport {
    /// The persisted report row id.
    pub id: String,
    /// Caller-supplied report name.
    pub name: String,
    /// Granularity, e.g. `weekly`.
    #[serde(rename = "type")]
    pub report_type: TimeTrackingReportType,
    /// The reporting window.
    pub period: ReportPeriod,
    /// When aggregation finished (epoch milliseconds).
    pub generated_at: i64,
    /// The principal that requested the report.
    pub generated_by: String,
    /// The aggregated metrics.
    pub data: TimeTrackingData,
    /// The dimension filters applied.
    pub filters: EntryFilters,
}

/// Result of a time-tracking report generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeTrackingReportOutcome {
    /// Always true; failures are errors.
    pub success: bool,
    /// The persisted report row id.
    pub report_id: String,
    /// The assembled report.
    pub report: TimeTrackingReport,
}

/// Builds reports and appends them to the store.
pub struct ReportService {
    store: Arc<dyn RecordStore>,
    feed: EventFeed,
    config: EngineConfig,
}

fn format_date(timestamp_ms: i64, field: &str) -> EngineResult<String> {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .ok_or_else(|| EngineError::validation(field, "not a representable timestamp"))
}

fn validate_window(start_date: i64, end_date: i64) -> EngineResult<ReportPeriod> {
    if start_date > end_date {
        return Err(EngineError::validation(
            "dateRange",
            "start date is after end date",
        ));
    }
    Ok(ReportPeriod {
        start_date: format_date(start_date, "startDate")?,
        end_date: format_date(end_date, "endDate")?,
    })
}

fn encode<T: Serialize>(data: &T) -> EngineResult<serde_json::Value> {
    serde_json::to_value(data)
        .map_err(|e| EngineError::upstream("encoding", format!("failed to encode report data: {e}")))
}

impl ReportService {
    /// Creates a service over the given store and feed.
    pub fn new(store: Arc<dyn RecordStore>, feed: EventFeed, config: EngineConfig) -> Self {
        Self {
            store,
            feed,
            config,
        }
    }

    /// Best-effort `failed` row, recorded when aggregation or the source
    /// fetch breaks. The original error propagates regardless.
    async fn record_failure(
        &self,
        principal: &Principal,
        name: String,
        report_type: String,
        parameters: ReportParameters,
        error: &EngineError,
    ) {
        let now = Utc::now().timestamp_millis();
        let row = Report {
            id: Uuid::new_v4().to_string(),
            name,
            report_type,
            parameters,
            status: ReportStatus::Failed,
            created_at: now,
            generated_at: now,
            download_url: None,
            data: None,
            created_by: principal.user_id.clone(),
        };
        if let Err(insert_err) = self.store.insert_report(row).await {
            warn!(error = %error, insert_error = %insert_err, "Could not record failed report row");
        }
    }

    /// Generates a payroll report over `[start_date, end_date]` and appends
    /// the completed row.
    pub async fn generate_payroll_report(
        &self,
        principal: &Principal,
        start_date: i64,
        end_date: i64,
        report_type: PayrollReportType,
    ) -> EngineResult<PayrollReportOutcome> {
        let period = validate_window(start_date, end_date)?;
        let name = format!(
            "{} Report - {} to {}",
            report_type.as_str(),
            period.start_date,
            period.end_date
        );
        let parameters = ReportParameters {
            start_date,
            end_date,
            filters: EntryFilters::default(),
        };

        let slips = match self.feed.fetch_pay_slips(start_date, end_date).await {
            Ok(slips) => slips,
            Err(err) => {
                self.record_failure(
                    principal,
                    name,
                    report_type.as_str().to_string(),
                    parameters,
                    &err,
                )
                .await;
                return Err(err);
            }
        };

        let data = match report_type {
            PayrollReportType::Summary => {
                encode(&payroll_summary(&slips, start_date, end_date))?
            }
            PayrollReportType::Detailed => {
                let mut names: HashMap<String, String> = HashMap::new();
                for slip in &slips {
                    if names.contains_key(&slip.staff_id) {
                        continue;
                    }
                    if let Some(employee) = self.store.get_employee(&slip.staff_id).await? {
                        names.insert(slip.staff_id.clone(), employee.name);
                    }
                }
                encode(&detailed_payroll_report(
                    &slips, start_date, end_date, &names,
                ))?
            }
            PayrollReportType::Tax | PayrollReportType::TaxSummary => {
                encode(&tax_report(&slips))?
            }
            PayrollReportType::Benefits => encode(&benefits_report(&slips))?,
        };

        let now = Utc::now().timestamp_millis();
        let row_id = Uuid::new_v4().to_string();
        let download_url = format!("/api/payroll/reports/{row_id}/download");
        let report_id = self
            .store
            .insert_report(Report {
                id: row_id,
                name,
                report_type: report_type.as_str().to_string(),
                parameters,
                status: ReportStatus::Completed,
                created_at: now,
                generated_at: now,
                download_url: Some(download_url.clone()),
                data: Some(data.clone()),
                created_by: principal.user_id.clone(),
            })
            .await?;

        info!(%report_id, report_type = report_type.as_str(), "Payroll report generated");
        Ok(PayrollReportOutcome {
            success: true,
            report_id,
            report_type,
            generated_at: now,
            period,
            download_url,
            data,
        })
    }

    /// Generates a time-tracking report over `[start_date, end_date]` and
    /// appends the completed row.
    pub async fn generate_time_tracking_report(
        &self,
        principal: &Principal,
        name: &str,
        report_type: TimeTrackingReportType,
        start_date: i64,
        end_date: i64,
        filters: EntryFilters,
    ) -> EngineResult<TimeTrackingReportOutcome> {
        let period = validate_window(start_date, end_date)?;
        let stored_type = format!("time_tracking_{}", report_type.as_str());
        let parameters = ReportParameters {
            start_date,
            end_date,
            filters: filters.clone(),
        };

        let entries = match self.feed.fetch_entries(start_date, end_date, &filters).await {
            Ok(entries) => entries,
            Err(err) => {
                self.record_failure(
                    principal,
                    name.to_string(),
                    stored_type,
                    parameters,
                    &err,
                )
                .await;
                return Err(err);
            }
        };

        let data = self.time_tracking_data(&entries);
        let now = Utc::now().timestamp_millis();
        let row_id = Uuid::new_v4().to_string();
        let download_url = format!("/api/time-tracking/reports/{row_id}/download");
        let report_id = self
            .store
            .insert_report(Report {
                id: row_id,
                name: name.to_string(),
                report_type: stored_type,
                parameters,
                status: ReportStatus::Completed,
                created_at: now,
                generated_at: now,
                download_url: Some(download_url),
                data: Some(encode(&data)?),
                created_by: principal.user_id.clone(),
            })
            .await?;

        info!(%report_id, granularity = report_type.as_str(), "Time-tracking report generated");
        Ok(TimeTrackingReportOutcome {
            success: true,
            report_id: report_id.clone(),
            report: TimeTrackingReport {
                id: report_id,
                name: name.to_string(),
                report_type,
                period,
                generated_at: now,
                generated_by: principal.user_id.clone(),
                data,
                filters,
            },
        })
    }

    /// Runs the full aggregation suite over the filtered entry set.
    ///
    /// Rounding to one decimal happens here, at report assembly; the
    /// aggregate functions stay exact so the hourly-sum conservation
    /// property holds internally.
    fn time_tracking_data(&self, entries: &[crate::models::TimeLogEntry]) -> TimeTrackingData {
        let total = total_hours(entries);
        let sessions = entries.len();
        let baseline = self.config.reporting.productivity_baseline_hours;
        let productivity_score = if total > 0.0 {
            round1(total / (sessions as f64 * baseline) * 100.0)
        } else {
            0.0
        };

        TimeTrackingData {
            total_hours: round1(total),
            total_sessions: sessions,
            average_session_duration: round1(average_session_duration(entries)),
            productivity_score,
            top_users: top_users(entries, self.config.reporting.top_users_limit)
                .into_iter()
                .map(|mut user| {
                    user.total_hours = round1(user.total_hours);
                    user
                })
                .collect(),
            hourly_breakdown: hourly_breakdown(entries)
                .into_iter()
                .map(|mut bucket| {
                    bucket.total_hours = round1(bucket.total_hours);
                    bucket
                })
                .collect(),
            daily_breakdown: daily_breakdown(entries, baseline)
                .into_iter()
                .map(|mut day| {
                    day.total_hours = round1(day.total_hours);
                    day.productivity = round1(day.productivity);
                    day
                })
                .collect(),
            project_breakdown: project_breakdown(entries)
                .into_iter()
                .map(|mut share| {
                    share.total_hours = round1(share.total_hours);
                    share.percentage = round1(share.percentage);
                    share
                })
                .collect(),
            department_breakdown: department_breakdown(entries)
                .into_iter()
                .map(|mut share| {
                    share.total_hours = round1(share.total_hours);
                    share.average_hours = round1(share.average_hours);
                    share
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Employee, PayAdjustment, PaySlip, PaySlipStatus, Role, SessionStatus, TimeLogEntry,
    };
    use crate::ports::MemoryStore;
    use async_trait::async_trait;
    use chrono::TimeZone;

    fn admin() -> Principal {
        Principal {
            user_id: "admin_001".to_string(),
            role: Role::Admin,
        }
    }

    fn service(store: Arc<MemoryStore>) -> ReportService {
        ReportService::new(
            store.clone(),
            EventFeed::new(store),
            EngineConfig::default(),
        )
    }

    fn slip(staff: &str, created_at: i64, gross: i64, deductions: Vec<(&str, i64)>) -> PaySlip {
        PaySlip {
            id: format!("slip_{staff}_{created_at}"),
            staff_id: staff.to_string(),
            period_id: "2026-01".to_string(),
            gross_pay: gross,
            net_pay: gross - deductions.iter().map(|(_, a)| a).sum::<i64>(),
            deductions: deductions
                .into_iter()
                .map(|(kind, amount)| PayAdjustment {
                    kind: kind.to_string(),
                    amount,
                })
                .collect(),
            bonuses: vec![],
            status: PaySlipStatus::Issued,
            created_at,
        }
    }

    fn at(hour: u32, minute: u32) -> i64 {
        Utc.with_ymd_and_hms(2026, 1, 15, hour, minute, 0)
            .unwrap()
            .timestamp_millis()
    }

    fn entry(user: &str, start: i64, end: i64, project: Option<&str>) -> TimeLogEntry {
        TimeLogEntry {
            id: format!("log_{user}_{start}"),
            user_id: user.to_string(),
            user_name: None,
            start_time: start,
            end_time: Some(end),
            duration_ms: Some(end - start),
            project: project.map(str::to_string),
            department: None,
            status: SessionStatus::Completed,
        }
    }

    const DAY: i64 = 86_400_000;

    #[tokio::test]
    async fn test_inverted_window_is_validation_error_and_no_row() {
        let store = Arc::new(MemoryStore::new());
        let service = service(store.clone());

        let result = service
            .generate_payroll_report(&admin(), 100, 50, PayrollReportType::Summary)
            .await;
        assert!(matches!(result, Err(EngineError::Validation { .. })));
        assert!(store.reports().is_empty());
    }

    #[tokio::test]
    async fn test_summary_over_zero_slips_succeeds_with_zero_totals() {
        let store = Arc::new(MemoryStore::new());
        let service = service(store.clone());

        let outcome = service
            .generate_payroll_report(&admin(), 0, DAY, PayrollReportType::Summary)
            .await
            .unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.data["totalEmployees"], 0);
        assert_eq!(outcome.data["totalGrossPay"], 0);
        assert_eq!(outcome.data["totalNetPay"], 0);

        let rows = store.reports();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, ReportStatus::Completed);
        assert_eq!(rows[0].id, outcome.report_id);
        assert!(
            outcome
                .download_url
                .contains(&format!("/payroll/reports/{}/download", outcome.report_id))
        );
    }

    #[tokio::test]
    async fn test_detailed_report_resolves_employee_names() {
        let store = Arc::new(MemoryStore::new());
        store.add_employee(Employee {
            id: "s1".to_string(),
            name: "Ada Ngozi".to_string(),
            email: "ada@example.com".to_string(),
            department: None,
            role: Role::Employee,
        });
        store.add_pay_slip(slip("s1", 10, 1_000, vec![]));
        store.add_pay_slip(slip("s2", 20, 500, vec![]));
        let service = service(store);

        let outcome = service
            .generate_payroll_report(&admin(), 0, DAY, PayrollReportType::Detailed)
            .await
            .unwrap();

        let details = outcome.data["details"].as_array().unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details[0]["employeeName"], "Ada Ngozi");
        assert_eq!(details[1]["employeeName"], "Unknown");
    }

    #[tokio::test]
    async fn test_tax_report_dispatch_classifies_deductions() {
        let store = Arc::new(MemoryStore::new());
        store.add_pay_slip(slip(
            "s1",
            10,
            1_000,
            vec![("Federal Income Tax", 100), ("Union Dues", 10)],
        ));
        let service = service(store);

        let outcome = service
            .generate_payroll_report(&admin(), 0, DAY, PayrollReportType::Tax)
            .await
            .unwrap();

        assert_eq!(outcome.data["federalTaxes"], 100);
        assert_eq!(outcome.data["totalTaxesWithheld"], 110);
    }

    #[tokio::test]
    async fn test_time_tracking_report_hourly_scenario() {
        let store = Arc::new(MemoryStore::new());
        store.add_time_log(entry("u1", at(9, 0), at(11, 30), None));
        let service = service(store.clone());

        let outcome = service
            .generate_time_tracking_report(
                &admin(),
                "January activity",
                TimeTrackingReportType::Weekly,
                0,
                at(23, 59),
                EntryFilters::default(),
            )
            .await
            .unwrap();

        let data = &outcome.report.data;
        assert_eq!(data.total_sessions, 1);
        assert!((data.total_hours - 2.5).abs() < 1e-9);
        assert!((data.average_session_duration - 2.5).abs() < 1e-9);
        // 2.5h over one session against the 8h baseline, rounded
        assert!((data.productivity_score - 31.3).abs() < 1e-9);
        // 2.5/3 per touched hour, rounded to one decimal
        assert_eq!(data.hourly_breakdown.len(), 3);
        for bucket in &data.hourly_breakdown {
            assert!((bucket.total_hours - 0.8).abs() < 1e-9);
        }

        let rows = store.reports();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].report_type, "time_tracking_weekly");
        assert_eq!(rows[0].created_by, "admin_001");
    }

    #[tokio::test]
    async fn test_time_tracking_report_applies_filters() {
        let store = Arc::new(MemoryStore::new());
        store.add_time_log(entry("u1", at(9, 0), at(10, 0), Some("alpha")));
        store.add_time_log(entry("u2", at(9, 0), at(12, 0), Some("beta")));
        let service = service(store);

        let filters = EntryFilters {
            projects: vec!["alpha".to_string()],
            ..Default::default()
        };
        let outcome = service
            .generate_time_tracking_report(
                &admin(),
                "alpha only",
                TimeTrackingReportType::Custom,
                0,
                at(23, 59),
                filters.clone(),
            )
            .await
            .unwrap();

        assert_eq!(outcome.report.data.total_sessions, 1);
        assert!((outcome.report.data.total_hours - 1.0).abs() < 1e-9);
        assert_eq!(outcome.report.filters, filters);
    }

    #[tokio::test]
    async fn test_zero_activity_productivity_score_is_zero() {
        let store = Arc::new(MemoryStore::new());
        let service = service(store);

        let outcome = service
            .generate_time_tracking_report(
                &admin(),
                "empty window",
                TimeTrackingReportType::Daily,
                0,
                DAY,
                EntryFilters::default(),
            )
            .await
            .unwrap();

        assert_eq!(outcome.report.data.productivity_score, 0.0);
        assert_eq!(outcome.report.data.average_session_duration, 0.0);
    }

    /// Store whose list reads fail but whose report inserts succeed, to
    /// observe the failed-row bookkeeping.
    struct BrokenListsStore {
        inner: MemoryStore,
    }

    #[async_trait]
    impl crate::ports::RecordStore for BrokenListsStore {
        async fn list_time_logs(&self) -> EngineResult<Vec<TimeLogEntry>> {
            Err(EngineError::upstream("store", "read replica down"))
        }

        async fn list_pay_slips(&self) -> EngineResult<Vec<PaySlip>> {
            Err(EngineError::upstream("store", "read replica down"))
        }

        async fn get_employee(&self, id: &str) -> EngineResult<Option<Employee>> {
            self.inner.get_employee(id).await
        }

        async fn insert_document(
            &self,
            document: crate::models::TaxDocument,
        ) -> EngineResult<String> {
            self.inner.insert_document(document).await
        }

        async fn get_document(
            &self,
            id: &str,
        ) -> EngineResult<Option<crate::models::TaxDocument>> {
            self.inner.get_document(id).await
        }

        async fn patch_document(
            &self,
            id: &str,
            patch: crate::ports::DocumentPatch,
        ) -> EngineResult<()> {
            self.inner.patch_document(id, patch).await
        }

        async fn delete_document(&self, id: &str) -> EngineResult<()> {
            self.inner.delete_document(id).await
        }

        async fn insert_report(&self, report: Report) -> EngineResult<String> {
            self.inner.insert_report(report).await
        }

        async fn get_report(&self, id: &str) -> EngineResult<Option<Report>> {
            self.inner.get_report(id).await
        }
    }

    #[tokio::test]
    async fn test_fetch_failure_records_failed_row_and_propagates() {
        let store = Arc::new(BrokenListsStore {
            inner: MemoryStore::new(),
        });
        let service = ReportService::new(
            store.clone(),
            EventFeed::new(store.clone()),
            EngineConfig::default(),
        );

        let result = service
            .generate_payroll_report(&admin(), 0, DAY, PayrollReportType::Summary)
            .await;
        assert!(matches!(result, Err(EngineError::Upstream { .. })));

        let rows = store.inner.reports();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, ReportStatus::Failed);
        assert!(rows[0].data.is_none());
        assert!(rows[0].download_url.is_none());
    }
}
