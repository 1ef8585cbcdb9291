//! Tax-document generation and lifecycle management.
//!
//! [`render`] produces the deterministic byte payload for a document;
//! [`DocumentService`] orchestrates the generate, upload, persist, send and
//! status-transition pipeline, including the bulk variant with per-item
//! failure isolation.

mod render;
mod service;

pub use render::{PDF_CONTENT_TYPE, render};
pub use service::{
    BulkItemOutcome, BulkOutcome, DocumentService, DownloadOutcome, GenerateOutcome, SendOutcome,
    StatusOutcome,
};
