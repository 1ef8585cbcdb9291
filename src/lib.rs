//! Payroll and workforce-time reporting engine.
//!
//! This crate turns raw event logs (clock-in/clock-out sessions, pay-slip
//! records) into structured reports (summary, detailed, tax, benefits,
//! time-tracking) and manages the lifecycle of generated tax documents
//! (generate, store, send, archive/download). Persistent storage, object
//! storage, email delivery and authentication are consumed through the
//! collaborator ports in [`ports`].

#![warn(missing_docs)]

pub mod aggregate;
pub mod api;
pub mod config;
pub mod document;
pub mod error;
pub mod events;
pub mod models;
pub mod ports;
pub mod report;
