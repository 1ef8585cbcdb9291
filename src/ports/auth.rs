//! Authentication port.
//!
//! Session tokens are verified into an explicit [`Principal`] which is then
//! passed through every call; the engine never consults ambient identity
//! state.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::{EngineError, EngineResult};
use crate::models::Role;

/// The verified identity of a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// The user id behind the session.
    pub user_id: String,
    /// The caller's access role.
    pub role: Role,
}

impl Principal {
    /// Whether the caller has the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Whether the caller has the staff role.
    pub fn is_staff(&self) -> bool {
        self.role == Role::Staff
    }

    /// Owner-or-staff-or-admin: whether the caller may read documents that
    /// belong to `employee_id`.
    pub fn can_read_documents_of(&self, employee_id: &str) -> bool {
        self.is_admin() || self.is_staff() || self.user_id == employee_id
    }
}

/// Port to the session verifier.
#[async_trait]
pub trait AuthProvider: Send + Sync + 'static {
    /// Verifies a session token into a [`Principal`].
    ///
    /// A missing or unknown token is an [`EngineError::Unauthorized`].
    async fn verify(&self, session_token: Option<&str>) -> EngineResult<Principal>;
}

/// Verifies the session and returns the principal.
pub async fn require_auth(
    provider: &dyn AuthProvider,
    session_token: Option<&str>,
) -> EngineResult<Principal> {
    provider.verify(session_token).await
}

/// Verifies the session and requires the admin role.
pub async fn require_admin(
    provider: &dyn AuthProvider,
    session_token: Option<&str>,
) -> EngineResult<Principal> {
    let principal = provider.verify(session_token).await?;
    if !principal.is_admin() {
        return Err(EngineError::Forbidden {
            message: "admin role required".to_string(),
        });
    }
    Ok(principal)
}

/// [`AuthProvider`] adapter backed by a static token table.
#[derive(Debug, Default)]
pub struct StaticTokenAuth {
    tokens: HashMap<String, Principal>,
}

impl StaticTokenAuth {
    /// Creates an empty token table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a token for a principal, builder style.
    pub fn with_token(mut self, token: impl Into<String>, principal: Principal) -> Self {
        self.tokens.insert(token.into(), principal);
        self
    }
}

#[async_trait]
impl AuthProvider for StaticTokenAuth {
    async fn verify(&self, session_token: Option<&str>) -> EngineResult<Principal> {
        let token = session_token.ok_or_else(|| EngineError::Unauthorized {
            message: "session token missing".to_string(),
        })?;
        self.tokens
            .get(token)
            .cloned()
            .ok_or_else(|| EngineError::Unauthorized {
                message: "invalid session token".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> Principal {
        Principal {
            user_id: "admin_001".to_string(),
            role: Role::Admin,
        }
    }

    fn employee(id: &str) -> Principal {
        Principal {
            user_id: id.to_string(),
            role: Role::Employee,
        }
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let auth = StaticTokenAuth::new();
        let result = require_auth(&auth, None).await;
        assert!(matches!(result, Err(EngineError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_unknown_token_is_unauthorized() {
        let auth = StaticTokenAuth::new().with_token("tok_admin", admin());
        let result = require_auth(&auth, Some("tok_wrong")).await;
        assert!(matches!(result, Err(EngineError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_require_admin_rejects_employee() {
        let auth = StaticTokenAuth::new().with_token("tok_emp", employee("emp_001"));
        let result = require_admin(&auth, Some("tok_emp")).await;
        assert!(matches!(result, Err(EngineError::Forbidden { .. })));
    }

    #[tokio::test]
    async fn test_require_admin_accepts_admin() {
        let auth = StaticTokenAuth::new().with_token("tok_admin", admin());
        let principal = require_admin(&auth, Some("tok_admin")).await.unwrap();
        assert_eq!(principal.user_id, "admin_001");
    }

    #[test]
    fn test_document_read_rule() {
        assert!(admin().can_read_documents_of("emp_999"));
        assert!(employee("emp_001").can_read_documents_of("emp_001"));
        assert!(!employee("emp_001").can_read_documents_of("emp_002"));
        let staff = Principal {
            user_id: "staff_001".to_string(),
            role: Role::Staff,
        };
        assert!(staff.can_read_documents_of("emp_002"));
    }
}
