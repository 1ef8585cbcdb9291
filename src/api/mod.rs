//! HTTP API module for the payroll reporting engine.
//!
//! This module provides the REST endpoints for tax-document lifecycle
//! operations and report generation. Callers authenticate with a session
//! token in the `x-session-token` header.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    BulkGenerateRequest, GenerateDocumentRequest, PayrollReportRequest, SendDocumentRequest,
    TimeTrackingReportRequest, UpdateStatusRequest,
};
pub use response::ApiError;
pub use state::AppState;
