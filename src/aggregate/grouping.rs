//! Project and department breakdowns.
//!
//! Both groupings skip entries that do not declare the dimension; there is
//! no synthetic "unknown" bucket, and percentages are computed only across
//! the entries that declare the field.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::TimeLogEntry;

/// Hours attributed to one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectShare {
    /// Project name.
    pub project: String,
    /// Total hours logged against the project.
    pub total_hours: f64,
    /// Share of hours across all project-declaring entries, 0-100.
    pub percentage: f64,
}

/// Hours attributed to one department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentShare {
    /// Department name.
    pub department: String,
    /// Total hours logged by the department.
    pub total_hours: f64,
    /// Mean hours per distinct user in the department.
    pub average_hours: f64,
    /// Number of distinct users.
    pub users: usize,
}

/// Groups project-declaring entries by project, sorted descending by hours.
pub fn project_breakdown(entries: &[TimeLogEntry]) -> Vec<ProjectShare> {
    let mut order: Vec<String> = Vec::new();
    let mut hours_by_project: HashMap<String, f64> = HashMap::new();
    let mut declared_total = 0.0;

    for entry in entries {
        let Some(project) = &entry.project else {
            continue;
        };
        let hours = entry.hours();
        declared_total += hours;
        *hours_by_project.entry(project.clone()).or_insert_with(|| {
            order.push(project.clone());
            0.0
        }) += hours;
    }

    let mut shares: Vec<ProjectShare> = order
        .into_iter()
        .filter_map(|project| {
            let total_hours = hours_by_project.remove(&project)?;
            let percentage = if declared_total > 0.0 {
                total_hours / declared_total * 100.0
            } else {
                0.0
            };
            Some(ProjectShare {
                project,
                total_hours,
                percentage,
            })
        })
        .collect();
    shares.sort_by(|a, b| {
        b.total_hours
            .partial_cmp(&a.total_hours)
            .unwrap_or(Ordering::Equal)
    });
    shares
}

/// Groups department-declaring entries by department, sorted descending by
/// hours, with per-user averages.
pub fn department_breakdown(entries: &[TimeLogEntry]) -> Vec<DepartmentShare> {
    let mut order: Vec<String> = Vec::new();
    let mut by_department: HashMap<String, (f64, HashSet<&str>)> = HashMap::new();

    for entry in entries {
        let Some(department) = &entry.department else {
            continue;
        };
        let (hours, users) = by_department.entry(department.clone()).or_insert_with(|| {
            order.push(department.clone());
            (0.0, HashSet::new())
        });
        *hours += entry.hours();
        users.insert(entry.user_id.as_str());
    }

    let mut shares: Vec<DepartmentShare> = order
        .into_iter()
        .filter_map(|department| {
            let (total_hours, users) = by_department.remove(&department)?;
            let average_hours = if users.is_empty() {
                0.0
            } else {
                total_hours / users.len() as f64
            };
            Some(DepartmentShare {
                department,
                total_hours,
                average_hours,
                users: users.len(),
            })
        })
        .collect();
    shares.sort_by(|a, b| {
        b.total_hours
            .partial_cmp(&a.total_hours)
            .unwrap_or(Ordering::Equal)
    });
    shares
}
