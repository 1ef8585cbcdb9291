//! Aggregation logic for the payroll reporting engine.
//!
//! This module contains all the pure computation over filtered entry sets:
//! scalar totals and averages, per-user rankings, hourly and daily
//! breakdowns, project and department groupings, and the pay-slip based
//! tax and benefits classifications. Nothing here performs I/O; malformed
//! entries (open sessions) are filtered upstream by the event feed.

mod daily;
mod grouping;
mod hourly;
mod hours;
mod payroll;
mod top_users;

pub use daily::{DayBucket, daily_breakdown};
pub use grouping::{
    DepartmentShare, ProjectShare, department_breakdown, project_breakdown,
};
pub use hourly::{HourBucket, hourly_breakdown};
pub use hours::{average_session_duration, round1, total_hours};
pub use payroll::{
    BenefitsReportData, DetailedPayrollReport, PaySlipDetail, PayrollSummary, TaxReportData,
    TypeBreakdown, benefits_report, detailed_payroll_report, payroll_summary, tax_report,
};
pub use top_users::{UserActivity, top_users};
