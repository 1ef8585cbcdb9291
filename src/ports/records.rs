//! Backing-store port.
//!
//! [`RecordStore`] is the engine's view of the persistent row store. Raw
//! domain rows (time logs, pay slips, employees) are read-only; report and
//! tax-document rows are written through it. The store is assumed to provide
//! its own atomicity for single-row writes.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    DocumentMetadata, DocumentStatus, Employee, PaySlip, Report, TaxDocument, TimeLogEntry,
};

/// A partial update to a tax-document row.
///
/// Only the set fields are written; everything else is left untouched.
#[derive(Debug, Clone, Default)]
pub struct DocumentPatch {
    /// New lifecycle status.
    pub status: Option<DocumentStatus>,
    /// Object-storage reference for the rendered payload.
    pub storage_ref: Option<String>,
    /// Serving URL for the rendered payload.
    pub file_url: Option<String>,
    /// Generation timestamp (epoch milliseconds).
    pub generated_at: Option<i64>,
    /// Replacement metadata.
    pub metadata: Option<DocumentMetadata>,
}

/// Port to the persistent row store.
#[async_trait]
pub trait RecordStore: Send + Sync + 'static {
    /// All time-log rows. Window and dimension filtering is applied by
    /// [`crate::events::EventFeed`], not the store.
    async fn list_time_logs(&self) -> EngineResult<Vec<TimeLogEntry>>;

    /// All pay-slip rows.
    async fn list_pay_slips(&self) -> EngineResult<Vec<PaySlip>>;

    /// Look up an employee by id.
    async fn get_employee(&self, id: &str) -> EngineResult<Option<Employee>>;

    /// Insert a tax-document row, returning its id.
    async fn insert_document(&self, document: TaxDocument) -> EngineResult<String>;

    /// Look up a tax-document row by id.
    async fn get_document(&self, id: &str) -> EngineResult<Option<TaxDocument>>;

    /// Apply a partial update to a tax-document row.
    async fn patch_document(&self, id: &str, patch: DocumentPatch) -> EngineResult<()>;

    /// Delete a tax-document row.
    async fn delete_document(&self, id: &str) -> EngineResult<()>;

    /// Append a report row, returning its id.
    async fn insert_report(&self, report: Report) -> EngineResult<String>;

    /// Look up a report row by id.
    async fn get_report(&self, id: &str) -> EngineResult<Option<Report>>;
}

#[derive(Debug, Default)]
struct Inner {
    time_logs: Vec<TimeLogEntry>,
    pay_slips: Vec<PaySlip>,
    employees: HashMap<String, Employee>,
    documents: HashMap<String, TaxDocument>,
    reports: HashMap<String, Report>,
}

/// In-memory [`RecordStore`] adapter.
///
/// Used by the test suites; rows are seeded through the `add_*` methods.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Seeds an employee row.
    pub fn add_employee(&self, employee: Employee) {
        self.lock().employees.insert(employee.id.clone(), employee);
    }

    /// Seeds a time-log row.
    pub fn add_time_log(&self, entry: TimeLogEntry) {
        self.lock().time_logs.push(entry);
    }

    /// Seeds a pay-slip row.
    pub fn add_pay_slip(&self, slip: PaySlip) {
        self.lock().pay_slips.push(slip);
    }

    /// Snapshot of all tax-document rows, for assertions.
    pub fn documents(&self) -> Vec<TaxDocument> {
        self.lock().documents.values().cloned().collect()
    }

    /// Snapshot of all report rows, for assertions.
    pub fn reports(&self) -> Vec<Report> {
        self.lock().reports.values().cloned().collect()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_time_logs(&self) -> EngineResult<Vec<TimeLogEntry>> {
        Ok(self.lock().time_logs.clone())
    }

    async fn list_pay_slips(&self) -> EngineResult<Vec<PaySlip>> {
        Ok(self.lock().pay_slips.clone())
    }

    async fn get_employee(&self, id: &str) -> EngineResult<Option<Employee>> {
        Ok(self.lock().employees.get(id).cloned())
    }

    async fn insert_document(&self, document: TaxDocument) -> EngineResult<String> {
        let id = document.id.clone();
        self.lock().documents.insert(id.clone(), document);
        Ok(id)
    }

    async fn get_document(&self, id: &str) -> EngineResult<Option<TaxDocument>> {
        Ok(self.lock().documents.get(id).cloned())
    }

    async fn patch_document(&self, id: &str, patch: DocumentPatch) -> EngineResult<()> {
        let mut inner = self.lock();
        let document = inner
            .documents
            .get_mut(id)
            .ok_or_else(|| EngineError::not_found("document", id))?;
        if let Some(status) = patch.status {
            document.status = status;
        }
        if let Some(storage_ref) = patch.storage_ref {
            document.storage_ref = Some(storage_ref);
        }
        if let Some(file_url) = patch.file_url {
            document.file_url = Some(file_url);
        }
        if let Some(generated_at) = patch.generated_at {
            document.generated_at = Some(generated_at);
        }
        if let Some(metadata) = patch.metadata {
            document.metadata = metadata;
        }
        Ok(())
    }

    async fn delete_document(&self, id: &str) -> EngineResult<()> {
        self.lock()
            .documents
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| EngineError::not_found("document", id))
    }

    async fn insert_report(&self, report: Report) -> EngineResult<String> {
        let id = report.id.clone();
        self.lock().reports.insert(id.clone(), report);
        Ok(id)
    }

    async fn get_report(&self, id: &str) -> EngineResult<Option<Report>> {
        Ok(self.lock().reports.get(id).cloned())
    }
}
