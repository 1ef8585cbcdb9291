//! Report building and persistence.
//!
//! [`ReportService`] dispatches on the requested report kind, runs the
//! aggregation over the event feed, and appends one [`crate::models::Report`]
//! row per invocation. Rows are never updated; a failed aggregation is
//! recorded as a `failed` row and the error propagates to the caller.

mod builder;

pub use builder::{
    PayrollReportOutcome, PayrollReportType, ReportPeriod, ReportService, TimeTrackingData,
    TimeTrackingReport, TimeTrackingReportOutcome, TimeTrackingReportType,
};
