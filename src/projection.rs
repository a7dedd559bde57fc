//! Pure projections over cached collections.
//!
//! Everything here takes a snapshot slice and returns a fresh `Vec` — no
//! function mutates its input, so views can recompute on every render. The
//! dashboard aggregates at the bottom back the admin analytics widgets.

use chrono::{DateTime, Utc};

use crate::types::{
    CatalogCourse, EmployeeProfile, ProgressRecord, ProgressStatus, RequestStatus, TrainingRequest,
};

/// Bucket label used when a grouping key has no value on a row.
const MISSING_KEY_BUCKET: &str = "Undefined";

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Keep rows matching `status`; `None` means the "All" tab.
pub fn filter_by_status(
    rows: &[ProgressRecord],
    status: Option<ProgressStatus>,
) -> Vec<ProgressRecord> {
    match status {
        None => rows.to_vec(),
        Some(s) => rows.iter().filter(|r| r.status == s).cloned().collect(),
    }
}

/// Keep training requests matching `status`; `None` means the "All" tab.
pub fn filter_request_status(
    rows: &[TrainingRequest],
    status: Option<RequestStatus>,
) -> Vec<TrainingRequest> {
    match status {
        None => rows.to_vec(),
        Some(s) => rows.iter().filter(|r| r.status == s).cloned().collect(),
    }
}

/// Keep progress rows whose course category matches exactly.
pub fn filter_by_category(rows: &[ProgressRecord], category: &str) -> Vec<ProgressRecord> {
    rows.iter()
        .filter(|r| r.course_details.category == category)
        .cloned()
        .collect()
}

/// Fields a free-text search runs over for a given entity.
pub trait FreeTextFields {
    fn free_text_haystack(&self) -> Vec<String>;
}

impl FreeTextFields for ProgressRecord {
    fn free_text_haystack(&self) -> Vec<String> {
        let mut fields = vec![self.employee_id.to_string(), self.course_details.title.clone()];
        if let Some(emp) = &self.employee_details {
            fields.push(emp.name.clone());
            fields.push(emp.email.clone());
        }
        fields
    }
}

impl FreeTextFields for TrainingRequest {
    fn free_text_haystack(&self) -> Vec<String> {
        vec![self.request_id.to_string(), self.course_details.title.clone()]
    }
}

impl FreeTextFields for EmployeeProfile {
    fn free_text_haystack(&self) -> Vec<String> {
        vec![self.employee_id.to_string(), self.name.clone(), self.email.clone()]
    }
}

impl FreeTextFields for CatalogCourse {
    fn free_text_haystack(&self) -> Vec<String> {
        vec![self.course_id.to_string(), self.title.clone()]
    }
}

/// Case-insensitive substring match over each entity's configured fields.
///
/// An empty needle returns the collection unchanged.
pub fn filter_by_free_text<T: FreeTextFields + Clone>(rows: &[T], needle: &str) -> Vec<T> {
    if needle.is_empty() {
        return rows.to_vec();
    }
    let needle = needle.to_lowercase();
    rows.iter()
        .filter(|row| {
            row.free_text_haystack()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Keep rows whose start date falls inside the inclusive range.
///
/// When either bound is set, rows with no start date are excluded.
pub fn filter_by_start_date(
    rows: &[ProgressRecord],
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Vec<ProgressRecord> {
    if from.is_none() && to.is_none() {
        return rows.to_vec();
    }
    rows.iter()
        .filter(|r| match r.start_date {
            Some(start) => {
                from.map_or(true, |f| start >= f) && to.map_or(true, |t| start <= t)
            }
            None => false,
        })
        .cloned()
        .collect()
}

/// Keep rows whose course point value falls inside the inclusive range.
pub fn filter_by_points_range(
    rows: &[ProgressRecord],
    min: Option<u32>,
    max: Option<u32>,
) -> Vec<ProgressRecord> {
    rows.iter()
        .filter(|r| {
            let points = r.course_details.points;
            min.map_or(true, |m| points >= m) && max.map_or(true, |m| points <= m)
        })
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Sorts
// ---------------------------------------------------------------------------

/// Newest request first, the order the request queues render in.
pub fn sort_by_request_date(mut rows: Vec<TrainingRequest>) -> Vec<TrainingRequest> {
    rows.sort_by(|a, b| b.request_date.cmp(&a.request_date));
    rows
}

/// Most recently touched progress row first.
pub fn sort_by_last_updated(mut rows: Vec<ProgressRecord>) -> Vec<ProgressRecord> {
    rows.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
    rows
}

// ---------------------------------------------------------------------------
// Multi-key grouping
// ---------------------------------------------------------------------------

/// Named grouping keys an entity exposes.
pub trait GroupFields {
    /// Value of the named key on this row, `None` when the row has no value.
    fn group_value(&self, key: &str) -> Option<String>;
}

impl GroupFields for ProgressRecord {
    fn group_value(&self, key: &str) -> Option<String> {
        match key {
            "status" => Some(self.status.label().to_string()),
            "category" => Some(self.course_details.category.clone()),
            "trainingMode" => Some(self.course_details.training_mode.clone()),
            "courseTitle" => Some(self.course_details.title.clone()),
            "monthCompleted" => self.month_completed.clone(),
            "employeeName" => self.employee_details.as_ref().map(|e| e.name.clone()),
            "designation" => self.employee_details.as_ref().map(|e| e.designation.clone()),
            "location" => self.employee_details.as_ref().map(|e| e.location.clone()),
            _ => None,
        }
    }
}

/// One bucket in a grouping tree. Inner nodes carry `children`, leaves carry
/// `items`; `key` is the key name the level grouped by.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupNode<T> {
    pub key: String,
    pub value: String,
    pub children: Vec<GroupNode<T>>,
    pub items: Vec<T>,
}

/// Group rows by `keys[0]`, then each bucket by `keys[1]`, and so on,
/// terminating in leaf buckets when the keys are exhausted. Bucket order
/// follows first appearance in the input; rows missing a key value land in
/// an `"Undefined"` bucket.
pub fn group_by_keys<T: GroupFields + Clone>(rows: &[T], keys: &[&str]) -> Vec<GroupNode<T>> {
    let Some((current, rest)) = keys.split_first() else {
        return Vec::new();
    };

    let mut buckets: Vec<(String, Vec<T>)> = Vec::new();
    for row in rows {
        let value = row
            .group_value(current)
            .unwrap_or_else(|| MISSING_KEY_BUCKET.to_string());
        match buckets.iter_mut().find(|(v, _)| *v == value) {
            Some((_, items)) => items.push(row.clone()),
            None => buckets.push((value, vec![row.clone()])),
        }
    }

    buckets
        .into_iter()
        .map(|(value, items)| {
            if rest.is_empty() {
                GroupNode {
                    key: current.to_string(),
                    value,
                    children: Vec::new(),
                    items,
                }
            } else {
                GroupNode {
                    key: current.to_string(),
                    value,
                    children: group_by_keys(&items, rest),
                    items: Vec::new(),
                }
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Dashboard aggregates
// ---------------------------------------------------------------------------

/// Headline status counts for the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub completed: usize,
    pub started: usize,
    pub not_started: usize,
}

pub fn status_counts(rows: &[ProgressRecord]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for row in rows {
        match row.status {
            ProgressStatus::Completed => counts.completed += 1,
            ProgressStatus::Started => counts.started += 1,
            ProgressStatus::NotStarted => counts.not_started += 1,
            _ => {}
        }
    }
    counts
}

/// Enrollment count per course title, most popular first.
pub fn course_popularity(rows: &[ProgressRecord]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for row in rows {
        let title = &row.course_details.title;
        match counts.iter_mut().find(|(t, _)| t == title) {
            Some((_, n)) => *n += 1,
            None => counts.push((title.clone(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Completions per month label, most recent month first.
pub fn monthly_completions(rows: &[ProgressRecord]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for row in rows {
        if row.status != ProgressStatus::Completed {
            continue;
        }
        let Some(month) = &row.month_completed else {
            continue;
        };
        match counts.iter_mut().find(|(m, _)| m == month) {
            Some((_, n)) => *n += 1,
            None => counts.push((month.clone(), 1)),
        }
    }
    counts.sort_by(|a, b| b.0.cmp(&a.0));
    counts
}

/// Enrollment count per training mode, in first-seen order.
pub fn training_mode_distribution(rows: &[ProgressRecord]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for row in rows {
        let mode = &row.course_details.training_mode;
        match counts.iter_mut().find(|(m, _)| m == mode) {
            Some((_, n)) => *n += 1,
            None => counts.push((mode.clone(), 1)),
        }
    }
    counts
}

/// Employees with the most completed courses, best first. Rows without
/// embedded employee details are skipped.
pub fn top_completers(rows: &[ProgressRecord], limit: usize) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for row in rows {
        if row.status != ProgressStatus::Completed {
            continue;
        }
        let Some(emp) = &row.employee_details else {
            continue;
        };
        match counts.iter_mut().find(|(n, _)| n == &emp.name) {
            Some((_, n)) => *n += 1,
            None => counts.push((emp.name.clone(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);
    counts
}

/// Average course hours across completed rows; `None` when nothing completed.
pub fn average_completed_hours(rows: &[ProgressRecord]) -> Option<f64> {
    let completed: Vec<_> = rows
        .iter()
        .filter(|r| r.status == ProgressStatus::Completed)
        .collect();
    if completed.is_empty() {
        return None;
    }
    let total: u64 = completed
        .iter()
        .map(|r| u64::from(r.course_details.duration_in_hours))
        .sum();
    Some(total as f64 / completed.len() as f64)
}
