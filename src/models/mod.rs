//! Core data models for the payroll reporting engine.
//!
//! This module contains all the domain rows consumed and produced by the
//! engine. Wire field names are camelCase, matching the upstream row format.

mod employee;
mod pay_slip;
mod report;
mod tax_document;
mod time_log;

pub use employee::{Employee, Role};
pub use pay_slip::{PayAdjustment, PaySlip, PaySlipStatus};
pub use report::{Report, ReportParameters, ReportStatus};
pub use tax_document::{
    DocumentMetadata, DocumentStatus, DocumentType, Period, StatusUpdate, TaxDocument,
};
pub use time_log::{EntryFilters, SessionStatus, TimeLogEntry};
