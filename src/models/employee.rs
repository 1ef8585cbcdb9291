//! Employee model.
//!
//! Employees are managed by the surrounding application; this engine reads
//! them to resolve names for reports and documents and to make ownership
//! decisions on downloads.

use serde::{Deserialize, Serialize};

/// Access role of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full administrative access.
    Admin,
    /// Back-office staff; may read any employee's documents.
    Staff,
    /// Regular employee; may only read their own documents.
    Employee,
}

/// A staff member known to the payroll system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Unique identifier.
    pub id: String,
    /// Display name, used on documents and detailed reports.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Department, when assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Access role.
    pub role: Role,
}
