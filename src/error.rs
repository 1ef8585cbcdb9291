//! Error types for the payroll reporting engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while building reports or
//! driving the tax-document lifecycle.

use thiserror::Error;

/// The main error type for the payroll reporting engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::NotFound {
///     entity: "employee".to_string(),
///     id: "emp_404".to_string(),
/// };
/// assert_eq!(error.to_string(), "employee not found: emp_404");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Input was malformed (missing metadata, invalid date range).
    #[error("Invalid {field}: {message}")]
    Validation {
        /// The field or parameter that was invalid.
        field: String,
        /// A description of what made it invalid.
        message: String,
    },

    /// A referenced employee, document or report does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of record that was missing (e.g. "employee").
        entity: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// The caller presented no valid session.
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// A description of the authentication failure.
        message: String,
    },

    /// The caller is authenticated but not allowed to perform the action.
    #[error("Access denied: {message}")]
    Forbidden {
        /// A description of the missing permission.
        message: String,
    },

    /// A collaborator (store, object storage, email) failed.
    #[error("Upstream {system} error: {message}")]
    Upstream {
        /// The collaborator that failed (e.g. "store", "object-storage").
        system: String,
        /// A description of the failure.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Creates a validation error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a not-found error.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates an upstream collaborator error.
    pub fn upstream(system: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upstream {
            system: system.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_displays_field_and_message() {
        let error = EngineError::validation("endDate", "must not precede startDate");
        assert_eq!(
            error.to_string(),
            "Invalid endDate: must not precede startDate"
        );
    }

    #[test]
    fn test_not_found_displays_entity_and_id() {
        let error = EngineError::not_found("document", "doc_001");
        assert_eq!(error.to_string(), "document not found: doc_001");
    }

    #[test]
    fn test_unauthorized_displays_message() {
        let error = EngineError::Unauthorized {
            message: "session token missing".to_string(),
        };
        assert_eq!(error.to_string(), "Unauthorized: session token missing");
    }

    #[test]
    fn test_forbidden_displays_message() {
        let error = EngineError::Forbidden {
            message: "admin role required".to_string(),
        };
        assert_eq!(error.to_string(), "Access denied: admin role required");
    }

    #[test]
    fn test_upstream_displays_system_and_message() {
        let error = EngineError::upstream("object-storage", "upload rejected");
        assert_eq!(
            error.to_string(),
            "Upstream object-storage error: upload rejected"
        );
    }

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/engine.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/engine.yaml"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::not_found("report", "rep_001"))
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
