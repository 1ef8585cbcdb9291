//! Request types for the payroll reporting engine API.
//!
//! Wire field names are camelCase, matching the upstream row format.

use serde::{Deserialize, Serialize};

use crate::models::{DocumentType, EntryFilters, Period, StatusUpdate};
use crate::report::{PayrollReportType, TimeTrackingReportType};

/// Body of `POST /payroll/tax-documents`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDocumentRequest {
    /// The employee the document is for.
    pub employee_id: String,
    /// The kind of document to generate.
    pub document_type: DocumentType,
    /// The period the document covers.
    pub period: Period,
    /// The tax year the document covers.
    pub tax_year: i32,
    /// Amount referenced by the document, smallest currency unit.
    #[serde(default)]
    pub amount: Option<i64>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body of `POST /payroll/tax-documents/bulk`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkGenerateRequest {
    /// The employees to generate documents for.
    pub employee_ids: Vec<String>,
    /// The kind of document to generate for every employee.
    pub document_type: DocumentType,
    /// The period the documents cover.
    pub period: Period,
    /// The tax year the documents cover.
    pub tax_year: i32,
}

/// Body of `POST /payroll/tax-documents/{id}/send`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendDocumentRequest {
    /// The address to deliver the document to.
    pub recipient_email: String,
    /// Free-form message included in the email body.
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `PATCH /payroll/tax-documents/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    /// The status to transition to; `archived` is stored as `downloaded`.
    pub status: StatusUpdate,
    /// Replacement notes on the document metadata.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body of `POST /payroll/reports`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollReportRequest {
    /// Window start (epoch milliseconds, inclusive).
    pub start_date: i64,
    /// Window end (epoch milliseconds, inclusive).
    pub end_date: i64,
    /// The report kind to build.
    pub report_type: PayrollReportType,
}

/// Body of `POST /time-tracking/reports`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeTrackingReportRequest {
    /// Caller-supplied report name.
    pub name: String,
    /// Report granularity.
    #[serde(rename = "type")]
    pub report_type: TimeTrackingReportType,
    /// Window start (epoch milliseconds, inclusive).
    pub start_date: i64,
    /// Window end (epoch milliseconds, inclusive).
    pub end_date: i64,
    /// Dimension filters.
    #[serde(default)]
    pub filters: EntryFilters,
}
