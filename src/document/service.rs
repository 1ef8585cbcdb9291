//! Document lifecycle orchestration.
//!
//! [`DocumentService`] drives the generate -> upload -> persist -> send
//! pipeline for tax documents, in single and bulk variants. Single-item
//! operations propagate the first error to the caller unchanged; bulk
//! operations fold per-item failures into the result array and never abort
//! the batch.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    DocumentMetadata, DocumentStatus, DocumentType, Period, StatusUpdate, TaxDocument,
};
use crate::ports::{
    DocumentPatch, EmailAttachment, EmailMessage, EmailProvider, ObjectStorage, Principal,
    RecordStore,
};

use super::render::{PDF_CONTENT_TYPE, render};

/// Result of a single document generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOutcome {
    /// Always true; failures are errors.
    pub success: bool,
    /// The inserted document id.
    pub document_id: String,
}

/// Result of a document download.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadOutcome {
    /// Always true; failures are errors.
    pub success: bool,
    /// Where the rendered document can be fetched.
    pub download_url: String,
    /// The kind of document.
    pub document_type: DocumentType,
    /// Display name on the document.
    pub employee_name: String,
    /// The tax year the document covers.
    pub tax_year: i32,
    /// Size of the rendered payload in bytes.
    pub file_size: u64,
}

/// Result of sending a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOutcome {
    /// Always true; failures are errors.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
    /// The address the document was sent to.
    pub recipient_email: String,
}

/// Per-employee result inside a bulk generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkItemOutcome {
    /// The employee this item processed.
    pub employee_id: String,
    /// Whether a document was created for the employee.
    pub success: bool,
    /// The inserted document id, on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    /// The failure message, on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Summary of a bulk generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkOutcome {
    /// True when the batch itself ran; per-item failures live in `results`.
    pub success: bool,
    /// One entry per requested employee, in request order.
    pub results: Vec<BulkItemOutcome>,
    /// Number of requested employees.
    pub total_processed: usize,
    /// Number of items that created a document.
    pub successful: usize,
    /// Number of items that failed.
    pub failed: usize,
}

/// Result of a status update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusOutcome {
    /// Always true; failures are errors.
    pub success: bool,
}

/// How an upload failure is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UploadPolicy {
    /// Abort the operation; no partial state may reference a missing blob.
    Strict,
    /// Record a placeholder reference and carry on.
    Fallback,
}

/// Orchestrates the tax-document lifecycle.
pub struct DocumentService {
    store: Arc<dyn RecordStore>,
    object_storage: Arc<dyn ObjectStorage>,
    mailer: Option<Arc<dyn EmailProvider>>,
    config: EngineConfig,
}

impl DocumentService {
    /// Creates a service over the given collaborators.
    ///
    /// `mailer` may be `None`: delivery then degrades to a logged send that
    /// still reports success, the one deliberate exception to the
    /// never-swallow-errors policy (the document stays downloadable).
    pub fn new(
        store: Arc<dyn RecordStore>,
        object_storage: Arc<dyn ObjectStorage>,
        mailer: Option<Arc<dyn EmailProvider>>,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            object_storage,
            mailer,
            config,
        }
    }

    async fn get_required(&self, document_id: &str) -> EngineResult<TaxDocument> {
        self.store
            .get_document(document_id)
            .await?
            .ok_or_else(|| EngineError::not_found("document", document_id))
    }

    /// Inserts one document row for one employee, shared by the single and
    /// bulk paths.
    async fn insert_for_employee(
        &self,
        employee_id: &str,
        document_type: DocumentType,
        period: Period,
        tax_year: i32,
        amount: i64,
        notes: String,
    ) -> EngineResult<String> {
        let employee = self
            .store
            .get_employee(employee_id)
            .await?
            .ok_or_else(|| EngineError::not_found("employee", employee_id))?;

        // Filing due date: January 31 of the following year. Metadata only;
        // the engine does no scheduling with it.
        let due_date = Utc
            .with_ymd_and_hms(tax_year + 1, 1, 31, 0, 0, 0)
            .single()
            .map(|dt| dt.timestamp_millis())
            .ok_or_else(|| EngineError::validation("taxYear", "not a representable year"))?;

        let document = TaxDocument {
            id: Uuid::new_v4().to_string(),
            employee_id: employee_id.to_string(),
            document_type,
            tax_year,
            status: DocumentStatus::Generated,
            generated_at: Some(Utc::now().timestamp_millis()),
            storage_ref: None,
            file_url: None,
            metadata: DocumentMetadata {
                period,
                amount,
                notes,
                employee_name: employee.name,
                due_date: Some(due_date),
                ..Default::default()
            },
        };
        self.store.insert_document(document).await
    }

    /// Renders and uploads the document payload unless it is already
    /// uploaded, returning `(storage_ref, file_url, file_size)`.
    ///
    /// The document row is patched with the new references. Under
    /// [`UploadPolicy::Fallback`] an upload failure yields a placeholder
    /// reference instead of aborting.
    async fn ensure_uploaded(
        &self,
        document: &TaxDocument,
        policy: UploadPolicy,
    ) -> EngineResult<(String, String, u64)> {
        if let (Some(storage_ref), Some(file_url)) = (&document.storage_ref, &document.file_url) {
            // Idempotent once uploaded: never touch object storage again.
            return Ok((
                storage_ref.clone(),
                file_url.clone(),
                document.metadata.file_size.unwrap_or(0),
            ));
        }

        let now = Utc::now();
        let bytes = render(document, now)?;
        let file_size = bytes.len() as u64;

        let (storage_ref, file_url) = match self.object_storage.put(bytes, PDF_CONTENT_TYPE).await
        {
            Ok(stored) => (stored.storage_id, stored.url),
            Err(err) => match policy {
                UploadPolicy::Strict => {
                    return Err(EngineError::upstream(
                        "object-storage",
                        format!("failed to upload document payload: {err}"),
                    ));
                }
                UploadPolicy::Fallback => {
                    warn!(
                        document_id = %document.id,
                        error = %err,
                        "Upload failed; recording placeholder storage reference"
                    );
                    let placeholder = format!("pending-{}", Uuid::new_v4());
                    let url = format!("/api/storage/{placeholder}");
                    (placeholder, url)
                }
            },
        };

        let mut metadata = document.metadata.clone();
        metadata.file_size = Some(file_size);
        self.store
            .patch_document(
                &document.id,
                DocumentPatch {
                    status: Some(DocumentStatus::Generated),
                    storage_ref: Some(storage_ref.clone()),
                    file_url: Some(file_url.clone()),
                    generated_at: Some(now.timestamp_millis()),
                    metadata: Some(metadata),
                },
            )
            .await?;

        Ok((storage_ref, file_url, file_size))
    }

    /// Generates a tax document for one employee. Admin only.
    pub async fn generate(
        &self,
        principal: &Principal,
        employee_id: &str,
        document_type: DocumentType,
        period: Period,
        tax_year: i32,
        amount: Option<i64>,
        notes: Option<String>,
    ) -> EngineResult<GenerateOutcome> {
        if !principal.is_admin() {
            return Err(EngineError::Forbidden {
                message: "admin role required".to_string(),
            });
        }

        let document_id = self
            .insert_for_employee(
                employee_id,
                document_type,
                period,
                tax_year,
                amount.unwrap_or(0),
                notes.unwrap_or_default(),
            )
            .await?;

        info!(%document_id, %employee_id, document_type = %document_type, "Tax document generated");
        Ok(GenerateOutcome {
            success: true,
            document_id,
        })
    }

    /// Renders, uploads and returns the download handle for a document.
    ///
    /// Owner-or-staff-or-admin only. Upload failure aborts the operation:
    /// a document never carries a `file_url` pointing at a blob that failed
    /// to upload.
    pub async fn download(
        &self,
        principal: &Principal,
        document_id: &str,
    ) -> EngineResult<DownloadOutcome> {
        let document = self.get_required(document_id).await?;
        if !principal.can_read_documents_of(&document.employee_id) {
            return Err(EngineError::Forbidden {
                message: "not permitted to download this document".to_string(),
            });
        }

        let (_, _, file_size) = self.ensure_uploaded(&document, UploadPolicy::Strict).await?;

        Ok(DownloadOutcome {
            success: true,
            download_url: format!("/api/payroll/tax-documents/{document_id}/download"),
            document_type: document.document_type,
            employee_name: document.metadata.employee_name.clone(),
            tax_year: document.tax_year,
            file_size,
        })
    }

    /// Emails a document to a recipient, generating and uploading it first
    /// when needed.
    ///
    /// The upload here is deliberately more lenient than the download path:
    /// a failed upload falls back to a placeholder reference so delivery can
    /// proceed. With no email provider configured the send degrades to a
    /// logged delivery that still succeeds.
    pub async fn send(
        &self,
        _principal: &Principal,
        document_id: &str,
        recipient_email: &str,
        message: Option<String>,
    ) -> EngineResult<SendOutcome> {
        let document = self.get_required(document_id).await?;

        let (_, file_url, _) = self
            .ensure_uploaded(&document, UploadPolicy::Fallback)
            .await?;

        let body_note = message.clone().unwrap_or_else(|| {
            "If you have any questions about this document, please contact our payroll department."
                .to_string()
        });
        let email = EmailMessage {
            from: self.config.email.sender.clone(),
            to: recipient_email.to_string(),
            subject: format!(
                "Your {} for Tax Year {}",
                document.document_type, document.tax_year
            ),
            html: format!(
                "<div><h2>Tax Document Delivery</h2>\
                 <p>Dear {},</p>\
                 <p>Please find your {} for tax year {} attached to this email.</p>\
                 <p>{}</p></div>",
                document.metadata.employee_name,
                document.document_type,
                document.tax_year,
                body_note,
            ),
            attachment: Some(EmailAttachment {
                filename: format!(
                    "{}_{}_{}.pdf",
                    document.document_type,
                    document.tax_year,
                    document
                        .metadata
                        .employee_name
                        .split_whitespace()
                        .collect::<Vec<_>>()
                        .join("_"),
                ),
                url: file_url,
            }),
        };

        match &self.mailer {
            Some(mailer) => {
                let accepted = mailer.send(email).await?;
                if !accepted {
                    return Err(EngineError::upstream(
                        "email",
                        "message was not accepted for delivery",
                    ));
                }
            }
            None => {
                // Provider absence is not an error: record the delivery in
                // the log and keep the pipeline moving. The document remains
                // generated and downloadable.
                info!(
                    %document_id,
                    recipient = %recipient_email,
                    "No email provider configured; recording logged delivery"
                );
            }
        }

        let mut metadata = self.get_required(document_id).await?.metadata;
        metadata.sent_at = Some(Utc::now().timestamp_millis());
        metadata.recipient_email = Some(recipient_email.to_string());
        metadata.message = message;
        self.store
            .patch_document(
                document_id,
                DocumentPatch {
                    status: Some(DocumentStatus::Sent),
                    metadata: Some(metadata),
                    ..Default::default()
                },
            )
            .await?;

        Ok(SendOutcome {
            success: true,
            message: "Tax document sent successfully".to_string(),
            recipient_email: recipient_email.to_string(),
        })
    }

    /// Generates documents for a set of employees. Admin only.
    ///
    /// Items run concurrently up to the configured limit, each under a
    /// per-item timeout; one employee's failure never aborts the batch.
    /// Results come back in request order.
    pub async fn bulk_generate(
        &self,
        principal: &Principal,
        employee_ids: Vec<String>,
        document_type: DocumentType,
        period: Period,
        tax_year: i32,
    ) -> EngineResult<BulkOutcome> {
        if !principal.is_admin() {
            return Err(EngineError::Forbidden {
                message: "admin role required".to_string(),
            });
        }

        let item_timeout = Duration::from_millis(self.config.bulk.item_timeout_ms);
        let concurrency = self.config.bulk.concurrency.max(1);
        let total_processed = employee_ids.len();

        let results: Vec<BulkItemOutcome> = stream::iter(employee_ids)
            .map(|employee_id| async move {
                let inserted = timeout(
                    item_timeout,
                    self.insert_for_employee(
                        &employee_id,
                        document_type,
                        period,
                        tax_year,
                        0,
                        String::new(),
                    ),
                )
                .await;
                match inserted {
                    Ok(Ok(document_id)) => BulkItemOutcome {
                        employee_id,
                        success: true,
                        document_id: Some(document_id),
                        error: None,
                    },
                    Ok(Err(err)) => BulkItemOutcome {
                        employee_id,
                        success: false,
                        document_id: None,
                        error: Some(err.to_string()),
                    },
                    Err(_) => BulkItemOutcome {
                        employee_id,
                        success: false,
                        document_id: None,
                        error: Some("timed out".to_string()),
                    },
                }
            })
            .buffered(concurrency)
            .collect()
            .await;

        let successful = results.iter().filter(|item| item.success).count();
        let failed = results.len() - successful;
        info!(total_processed, successful, failed, "Bulk generation finished");

        Ok(BulkOutcome {
            success: true,
            results,
            total_processed,
            successful,
            failed,
        })
    }

    /// Applies a direct status transition.
    ///
    /// The external `archived` status is stored as `downloaded`; backward
    /// transitions are rejected.
    pub async fn update_status(
        &self,
        _principal: &Principal,
        document_id: &str,
        update: StatusUpdate,
        notes: Option<String>,
    ) -> EngineResult<StatusOutcome> {
        let document = self.get_required(document_id).await?;
        let next = update.canonical();
        if !document.status.can_transition_to(next) {
            return Err(EngineError::validation(
                "status",
                format!(
                    "cannot move a {:?} document to {:?}",
                    document.status, next
                )
                .to_lowercase(),
            ));
        }

        let mut metadata = document.metadata;
        metadata.notes = notes.unwrap_or_default();
        if next == DocumentStatus::Sent {
            metadata.sent_at = Some(Utc::now().timestamp_millis());
        }
        self.store
            .patch_document(
                document_id,
                DocumentPatch {
                    status: Some(next),
                    metadata: Some(metadata),
                    ..Default::default()
                },
            )
            .await?;

        Ok(StatusOutcome { success: true })
    }

    /// Deletes a document row. Admin only.
    pub async fn delete(
        &self,
        principal: &Principal,
        document_id: &str,
    ) -> EngineResult<StatusOutcome> {
        if !principal.is_admin() {
            return Err(EngineError::Forbidden {
                message: "admin role required".to_string(),
            });
        }
        self.store.delete_document(document_id).await?;
        Ok(StatusOutcome { success: true })
    }
}
