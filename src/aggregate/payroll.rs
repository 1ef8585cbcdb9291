//! Pay-slip aggregation: summary, detailed, tax and benefits reports.
//!
//! Deduction lines are classified by case-insensitive substring match on
//! their free-form type: `federal`/`state`/`local` for taxes and
//! `health`/`dental`/`vision`/`retirement`/`401k`/`pension` for benefits.
//! The tax report sums every deduction into the withheld total and tracks
//! every type in its breakdown; the benefits report counts only matched
//! categories.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::PaySlip;

/// Deduction types treated as benefits.
const BENEFIT_KEYWORDS: [&str; 6] = [
    "health",
    "dental",
    "vision",
    "retirement",
    "401k",
    "pension",
];

/// Scalar totals over a pay-slip window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollSummary {
    /// Window start (epoch milliseconds, inclusive).
    pub start_date: i64,
    /// Window end (epoch milliseconds, inclusive).
    pub end_date: i64,
    /// Distinct staff members with a slip in the window.
    pub total_employees: usize,
    /// Sum of gross pay, smallest currency unit.
    pub total_gross_pay: i64,
    /// Sum of net pay, smallest currency unit.
    pub total_net_pay: i64,
    /// Sum of all deduction lines.
    pub total_deductions: i64,
    /// Sum of all bonus lines.
    pub total_bonuses: i64,
}

/// One slip row in the detailed report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaySlipDetail {
    /// The slip id.
    pub slip_id: String,
    /// The staff member settled by the slip.
    pub staff_id: String,
    /// Resolved display name, `Unknown` when unresolvable.
    pub employee_name: String,
    /// The pay period the slip covers.
    pub period: String,
    /// Gross pay, smallest currency unit.
    pub gross_pay: i64,
    /// Net pay, smallest currency unit.
    pub net_pay: i64,
    /// Deduction lines.
    pub deductions: Vec<crate::models::PayAdjustment>,
    /// Bonus lines.
    pub bonuses: Vec<crate::models::PayAdjustment>,
}

/// Summary plus per-slip detail rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedPayrollReport {
    /// Scalar totals.
    pub summary: PayrollSummary,
    /// One row per slip in the window.
    pub details: Vec<PaySlipDetail>,
}

/// Amount and line count for one deduction type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeBreakdown {
    /// Total amount, smallest currency unit.
    pub amount: i64,
    /// Number of deduction lines of this type.
    pub count: u64,
}

/// Tax withholding totals over a pay-slip window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxReportData {
    /// Distinct staff members with a slip in the window.
    pub employee_count: usize,
    /// Sum of every deduction line, matched or not.
    pub total_taxes_withheld: i64,
    /// Deductions whose type contains `federal`.
    pub federal_taxes: i64,
    /// Deductions whose type contains `state`.
    pub state_taxes: i64,
    /// Deductions whose type contains `local`.
    pub local_taxes: i64,
    /// Per-type totals across all deduction lines.
    pub breakdown_by_type: BTreeMap<String, TypeBreakdown>,
}

/// Benefit contribution totals over a pay-slip window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitsReportData {
    /// Distinct staff members with a slip in the window.
    pub employee_count: usize,
    /// Sum of matched benefit deductions only.
    pub total_benefits: i64,
    /// Per-type totals across matched benefit deductions.
    pub breakdown_by_type: BTreeMap<String, TypeBreakdown>,
}

fn distinct_staff(slips: &[PaySlip]) -> usize {
    slips
        .iter()
        .map(|slip| slip.staff_id.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Computes the scalar payroll summary for a window.
pub fn payroll_summary(slips: &[PaySlip], start_date: i64, end_date: i64) -> PayrollSummary {
    PayrollSummary {
        start_date,
        end_date,
        total_employees: distinct_staff(slips),
        total_gross_pay: slips.iter().map(|s| s.gross_pay).sum(),
        total_net_pay: slips.iter().map(|s| s.net_pay).sum(),
        total_deductions: slips.iter().map(PaySlip::total_deductions).sum(),
        total_bonuses: slips.iter().map(PaySlip::total_bonuses).sum(),
    }
}

/// Computes the detailed payroll report for a window.
///
/// `employee_names` maps staff id to display name; unresolved ids render as
/// `Unknown`.
pub fn detailed_payroll_report(
    slips: &[PaySlip],
    start_date: i64,
    end_date: i64,
    employee_names: &HashMap<String, String>,
) -> DetailedPayrollReport {
    let details = slips
        .iter()
        .map(|slip| PaySlipDetail {
            slip_id: slip.id.clone(),
            staff_id: slip.staff_id.clone(),
            employee_name: employee_names
                .get(&slip.staff_id)
                .cloned()
                .unwrap_or_else(|| "Unknown".to_string()),
            period: slip.period_id.clone(),
            gross_pay: slip.gross_pay,
            net_pay: slip.net_pay,
            deductions: slip.deductions.clone(),
            bonuses: slip.bonuses.clone(),
        })
        .collect();

    DetailedPayrollReport {
        summary: payroll_summary(slips, start_date, end_date),
        details,
    }
}

/// Classifies deductions into the tax report.
pub fn tax_report(slips: &[PaySlip]) -> TaxReportData {
    let mut data = TaxReportData {
        employee_count: distinct_staff(slips),
        total_taxes_withheld: 0,
        federal_taxes: 0,
        state_taxes: 0,
        local_taxes: 0,
        breakdown_by_type: BTreeMap::new(),
    };

    for slip in slips {
        for deduction in &slip.deductions {
            data.total_taxes_withheld += deduction.amount;

            let kind = deduction.kind.to_lowercase();
            if kind.contains("federal") {
                data.federal_taxes += deduction.amount;
            } else if kind.contains("state") {
                data.state_taxes += deduction.amount;
            } else if kind.contains("local") {
                data.local_taxes += deduction.amount;
            }

            let entry = data
                .breakdown_by_type
                .entry(deduction.kind.clone())
                .or_default();
            entry.amount += deduction.amount;
            entry.count += 1;
        }
    }

    data
}

/// Classifies deductions into the benefits report.
pub fn benefits_report(slips: &[PaySlip]) -> BenefitsReportData {
    let mut data = BenefitsReportData {
        employee_count: distinct_staff(slips),
        total_benefits: 0,
        breakdown_by_type: BTreeMap::new(),
    };

    for slip in slips {
        for deduction in &slip.deductions {
            let kind = deduction.kind.to_lowercase();
            if !BENEFIT_KEYWORDS.iter().any(|keyword| kind.contains(keyword)) {
                continue;
            }
            data.total_benefits += deduction.amount;
            let entry = data
                .breakdown_by_type
                .entry(deduction.kind.clone())
                .or_default();
            entry.amount += deduction.amount;
            entry.count += 1;
        }
    }

    data
}
