//! Document payload rendering.
//!
//! Rendering is a pure function of the document and the supplied generation
//! timestamp: the same inputs always produce the same bytes. The payload is
//! a minimal single-page PDF embedding the document type, tax year,
//! employee id and generation date. Layout fidelity is out of scope; the
//! shape matches what the upstream viewer expects.

use chrono::{DateTime, Utc};

use crate::error::{EngineError, EngineResult};
use crate::models::TaxDocument;

/// Content type of rendered payloads.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Renders the byte payload for a tax document.
///
/// Fails with a validation error when required metadata is missing; no
/// external calls are made.
pub fn render(document: &TaxDocument, generated_at: DateTime<Utc>) -> EngineResult<Vec<u8>> {
    if document.metadata.employee_name.trim().is_empty() {
        return Err(EngineError::validation(
            "employeeName",
            "document metadata is missing the employee name",
        ));
    }

    let title = format!(
        "{} - {}",
        document.document_type.as_str().to_uppercase(),
        document.tax_year
    );
    let content = format!(
        "%PDF-1.4\n\
         1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n\
         2 0 obj\n<< /Type /Pages /Kids [3 0 R] /Count 1 >>\nendobj\n\
         3 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R \
         /Resources << /Font << /F1 5 0 R >> >> >>\nendobj\n\
         4 0 obj\n<< /Length 200 >>\nstream\n\
         BT\n/F1 12 Tf\n100 700 Td\n({title}) Tj\n\
         0 -20 Td\n(Employee ID: {employee_id}) Tj\n\
         0 -20 Td\n(Generated: {generated}) Tj\nET\nendstream\nendobj\n\
         5 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>\nendobj\n\
         trailer\n<< /Size 6 /Root 1 0 R >>\n%%EOF\n",
        employee_id = document.employee_id,
        generated = generated_at.format("%Y-%m-%d"),
    );

    Ok(content.into_bytes())
}
