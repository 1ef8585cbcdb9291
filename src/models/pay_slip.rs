//! Pay-slip model.
//!
//! A [`PaySlip`] is one pay-period settlement for one staff member, created
//! by the upstream payroll-run process and read-only to this engine. Money
//! amounts are integers in the smallest currency unit.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a pay slip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaySlipStatus {
    /// Drafted but not yet submitted.
    Draft,
    /// Awaiting approval.
    Pending,
    /// Issued to the employee.
    Issued,
    /// Settled.
    Paid,
}

/// A single deduction or bonus line on a pay slip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayAdjustment {
    /// Free-form adjustment type (e.g. "Federal Income Tax", "401k").
    #[serde(rename = "type")]
    pub kind: String,
    /// Amount in the smallest currency unit.
    pub amount: i64,
}

/// One pay-period settlement for one staff member.
///
/// `net_pay = gross_pay - Σ deductions + Σ bonuses` is expected but not
/// enforced here; source data may already be reconciled upstream and this
/// engine only aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaySlip {
    /// Unique identifier for the slip.
    pub id: String,
    /// The staff member this slip settles.
    pub staff_id: String,
    /// The pay period this slip covers.
    pub period_id: String,
    /// Gross pay in the smallest currency unit.
    pub gross_pay: i64,
    /// Net pay in the smallest currency unit.
    pub net_pay: i64,
    /// Deduction lines.
    #[serde(default)]
    pub deductions: Vec<PayAdjustment>,
    /// Bonus lines.
    #[serde(default)]
    pub bonuses: Vec<PayAdjustment>,
    /// Lifecycle status.
    pub status: PaySlipStatus,
    /// Creation timestamp (epoch milliseconds), the report window key.
    pub created_at: i64,
}

impl PaySlip {
    /// Sum of all deduction amounts.
    pub fn total_deductions(&self) -> i64 {
        self.deductions.iter().map(|d| d.amount).sum()
    }

    /// Sum of all bonus amounts.
    pub fn total_bonuses(&self) -> i64 {
        self.bonuses.iter().map(|b| b.amount).sum()
    }
}
