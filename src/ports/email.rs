//! Outbound email port.
//!
//! Tax documents are delivered through [`EmailProvider`]. Provider absence
//! is not modelled here: a service holding no provider at all takes the
//! logged-fallback path instead (see the document lifecycle service).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::EngineResult;

/// A file referenced by an outbound email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAttachment {
    /// Suggested filename for the recipient.
    pub filename: String,
    /// URL of the attached payload.
    pub url: String,
}

/// An outbound email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Sender address.
    pub from: String,
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
    /// Optional attachment.
    pub attachment: Option<EmailAttachment>,
}

/// Port to the email delivery provider.
#[async_trait]
pub trait EmailProvider: Send + Sync + 'static {
    /// Submits a message for delivery. `Ok(true)` means accepted.
    async fn send(&self, message: EmailMessage) -> EngineResult<bool>;
}

/// In-memory [`EmailProvider`] adapter that records every message.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<EmailMessage>>,
}

impl RecordingMailer {
    /// Creates an empty mailer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all accepted messages, for assertions.
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl EmailProvider for RecordingMailer {
    async fn send(&self, message: EmailMessage) -> EngineResult<bool> {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message);
        Ok(true)
    }
}
