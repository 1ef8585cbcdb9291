//! Collaborator ports and in-memory adapters.
//!
//! The engine consumes its surroundings (backing store, object storage,
//! email delivery, authentication) through the traits defined here. Each
//! port ships with an in-memory adapter used by the test suites and suitable
//! for local development.

mod auth;
mod email;
mod object_storage;
mod records;

pub use auth::{AuthProvider, Principal, StaticTokenAuth, require_admin, require_auth};
pub use email::{EmailAttachment, EmailMessage, EmailProvider, RecordingMailer};
pub use object_storage::{MemoryObjectStorage, ObjectStorage, StoredObject};
pub use records::{DocumentPatch, MemoryStore, RecordStore};
