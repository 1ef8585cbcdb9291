//! Application state for the payroll reporting engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::document::DocumentService;
use crate::ports::AuthProvider;
use crate::report::ReportService;

/// Shared application state.
///
/// Contains the session verifier and the two domain services, shared
/// across all request handlers.
#[derive(Clone)]
pub struct AppState {
    auth: Arc<dyn AuthProvider>,
    documents: Arc<DocumentService>,
    reports: Arc<ReportService>,
}

impl AppState {
    /// Creates a new application state over the given services.
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        documents: Arc<DocumentService>,
        reports: Arc<ReportService>,
    ) -> Self {
        Self {
            auth,
            documents,
            reports,
        }
    }

    /// Returns the session verifier.
    pub fn auth(&self) -> &dyn AuthProvider {
        self.auth.as_ref()
    }

    /// Returns the document lifecycle service.
    pub fn documents(&self) -> &DocumentService {
        &self.documents
    }

    /// Returns the report builder service.
    pub fn reports(&self) -> &ReportService {
        &self.reports
    }
}
