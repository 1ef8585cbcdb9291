//! Tax-document model and status machine.
//!
//! A [`TaxDocument`] is a generated employee-facing certificate or payslip
//! copy. Its status moves one-directionally through
//! `pending -> generated -> sent -> downloaded`, with `error` reachable from
//! any non-terminal state; there is no rollback.

use serde::{Deserialize, Serialize};

/// The closed set of document kinds this engine can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// UK end-of-year certificate.
    #[serde(rename = "p60")]
    P60,
    /// UK leaver's statement.
    #[serde(rename = "p45")]
    P45,
    /// UK benefits-in-kind return.
    #[serde(rename = "p11d")]
    P11d,
    /// Self-assessment summary.
    #[serde(rename = "self_assessment")]
    SelfAssessment,
    /// Standard payslip copy.
    #[serde(rename = "payslip")]
    Payslip,
    /// Nigerian-format payslip copy.
    #[serde(rename = "payslip_ng")]
    PayslipNg,
    /// Tax clearance certificate.
    #[serde(rename = "tax_clearance")]
    TaxClearance,
    /// National Housing Fund certificate.
    #[serde(rename = "nhf_certificate")]
    NhfCertificate,
    /// National Health Insurance Scheme certificate.
    #[serde(rename = "nhis_certificate")]
    NhisCertificate,
    /// Pension contribution certificate.
    #[serde(rename = "pension_certificate")]
    PensionCertificate,
}

impl DocumentType {
    /// The wire name of the document type, as used in filenames and payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::P60 => "p60",
            DocumentType::P45 => "p45",
            DocumentType::P11d => "p11d",
            DocumentType::SelfAssessment => "self_assessment",
            DocumentType::Payslip => "payslip",
            DocumentType::PayslipNg => "payslip_ng",
            DocumentType::TaxClearance => "tax_clearance",
            DocumentType::NhfCertificate => "nhf_certificate",
            DocumentType::NhisCertificate => "nhis_certificate",
            DocumentType::PensionCertificate => "pension_certificate",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a tax document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Created but not yet generated (bulk queue phase).
    Pending,
    /// Byte payload generated.
    Generated,
    /// Delivered by email.
    Sent,
    /// Downloaded or archived by the employee.
    Downloaded,
    /// Generation or delivery failed.
    Error,
}

impl DocumentStatus {
    fn rank(self) -> u8 {
        match self {
            DocumentStatus::Pending => 0,
            DocumentStatus::Generated => 1,
            DocumentStatus::Sent => 2,
            DocumentStatus::Downloaded => 3,
            DocumentStatus::Error => 4,
        }
    }

    /// Whether the status may move to `next`.
    ///
    /// Transitions are one-directional; `Error` is reachable from any
    /// non-error state and is terminal.
    pub fn can_transition_to(self, next: DocumentStatus) -> bool {
        if self == DocumentStatus::Error {
            return next == DocumentStatus::Error;
        }
        next == DocumentStatus::Error || next.rank() >= self.rank()
    }
}

/// A status value accepted by the status-update operation.
///
/// The external name `archived` is stored internally as
/// [`DocumentStatus::Downloaded`]; every other name passes through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusUpdate {
    /// Mark the document generated.
    Generated,
    /// Mark the document sent.
    Sent,
    /// Archive the document (stored as `downloaded`).
    Archived,
}

impl StatusUpdate {
    /// The canonical internal status for this update.
    pub fn canonical(self) -> DocumentStatus {
        match self {
            StatusUpdate::Generated => DocumentStatus::Generated,
            StatusUpdate::Sent => DocumentStatus::Sent,
            StatusUpdate::Archived => DocumentStatus::Downloaded,
        }
    }
}

/// A half of the reporting period a document covers (epoch milliseconds).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// Period start (epoch milliseconds).
    pub start: i64,
    /// Period end (epoch milliseconds).
    pub end: i64,
}

/// Free-form metadata attached to a tax document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentMetadata {
    /// The period the document covers.
    pub period: Period,
    /// Amount referenced by the document, in the smallest currency unit.
    pub amount: i64,
    /// Free-form notes.
    pub notes: String,
    /// Display name of the employee at generation time.
    pub employee_name: String,
    /// Filing due date (epoch milliseconds); informational only, the engine
    /// does no scheduling with it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<i64>,
    /// Size in bytes of the rendered payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    /// When the document was emailed (epoch milliseconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<i64>,
    /// The address the document was emailed to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_email: Option<String>,
    /// Free-form message included with the email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A generated employee-facing certificate or payslip copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxDocument {
    /// Unique identifier.
    pub id: String,
    /// The employee the document belongs to.
    pub employee_id: String,
    /// The kind of document.
    pub document_type: DocumentType,
    /// The tax year the document covers.
    pub tax_year: i32,
    /// Lifecycle status.
    pub status: DocumentStatus,
    /// When the payload was generated (epoch milliseconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<i64>,
    /// Object-storage reference for the rendered payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_ref: Option<String>,
    /// Serving URL for the rendered payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    /// Free-form metadata.
    #[serde(default)]
    pub metadata: DocumentMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&DocumentType::P60).unwrap(),
            "\"p60\""
        );
        assert_eq!(
            serde_json::to_string(&DocumentType::SelfAssessment).unwrap(),
            "\"self_assessment\""
        );
        assert_eq!(
            serde_json::to_string(&DocumentType::PayslipNg).unwrap(),
            "\"payslip_ng\""
        );
        assert_eq!(DocumentType::NhfCertificate.to_string(), "nhf_certificate");
    }

    #[test]
    fn test_forward_transitions_allowed() {
        assert!(DocumentStatus::Pending.can_transition_to(DocumentStatus::Generated));
        assert!(DocumentStatus::Generated.can_transition_to(DocumentStatus::Sent));
        assert!(DocumentStatus::Sent.can_transition_to(DocumentStatus::Downloaded));
        // Re-asserting the current status is a no-op, not a rollback
        assert!(DocumentStatus::Generated.can_transition_to(DocumentStatus::Generated));
    }

    #[test]
    fn test_backward_transitions_rejected() {
        assert!(!DocumentStatus::Sent.can_transition_to(DocumentStatus::Generated));
        assert!(!DocumentStatus::Downloaded.can_transition_to(DocumentStatus::Sent));
    }

    #[test]
    fn test_error_reachable_from_any_state_and_terminal() {
        assert!(DocumentStatus::Pending.can_transition_to(DocumentStatus::Error));
        assert!(DocumentStatus::Sent.can_transition_to(DocumentStatus::Error));
        assert!(!DocumentStatus::Error.can_transition_to(DocumentStatus::Generated));
    }

    #[test]
    fn test_archived_maps_to_downloaded() {
        assert_eq!(
            StatusUpdate::Archived.canonical(),
            DocumentStatus::Downloaded
        );
        assert_eq!(StatusUpdate::Sent.canonical(), DocumentStatus::Sent);
        assert_eq!(
            StatusUpdate::Generated.canonical(),
            DocumentStatus::Generated
        );
    }

    #[test]
    fn test_status_update_accepts_archived_wire_name() {
        let update: StatusUpdate = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(update, StatusUpdate::Archived);
    }

    #[test]
    fn test_document_serialization_skips_absent_fields() {
        let document = TaxDocument {
            id: "doc_001".to_string(),
            employee_id: "emp_001".to_string(),
            document_type: DocumentType::P60,
            tax_year: 2025,
            status: DocumentStatus::Generated,
            generated_at: Some(1_768_000_000_000),
            storage_ref: None,
            file_url: None,
            metadata: DocumentMetadata {
                employee_name: "Ada Ngozi".to_string(),
                ..Default::default()
            },
        };
        let json = serde_json::to_string(&document).unwrap();
        assert!(!json.contains("storageRef"));
        assert!(!json.contains("fileUrl"));
        assert!(json.contains("\"employeeName\":\"Ada Ngozi\""));
    }
}
