//! Wire types for the WinLearn backend.
//!
//! Field names follow the backend's camelCase JSON. Every entity here is a
//! working-copy snapshot of backend-owned state: the backend is the source of
//! truth, and nothing in this module outlives the session.

use chrono::{DateTime, Datelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::state::Keyed;

/// Completion state of one employee's enrollment in one course.
///
/// The client may only move a record forward along
/// `NotStarted -> Started -> Completed`. `Requested` and `PendingBulkRequest`
/// show up in backend reads for enrollments that came out of the request
/// pipeline; they are distinct statuses with no client-side transition, not
/// aliases of a request's `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProgressStatus {
    #[serde(rename = "Not Started")]
    NotStarted,
    Started,
    Completed,
    Requested,
    #[serde(rename = "Pending Bulk Request")]
    PendingBulkRequest,
}

impl ProgressStatus {
    /// Whether the client is allowed to move a record from `self` to `target`.
    ///
    /// No skips, no backward edges; `Completed` is terminal.
    pub fn can_advance_to(self, target: ProgressStatus) -> bool {
        matches!(
            (self, target),
            (ProgressStatus::NotStarted, ProgressStatus::Started)
                | (ProgressStatus::Started, ProgressStatus::Completed)
        )
    }

    pub fn is_terminal(self) -> bool {
        self == ProgressStatus::Completed
    }

    /// Display label, matching what the backend serializes.
    pub fn label(self) -> &'static str {
        match self {
            ProgressStatus::NotStarted => "Not Started",
            ProgressStatus::Started => "Started",
            ProgressStatus::Completed => "Completed",
            ProgressStatus::Requested => "Requested",
            ProgressStatus::PendingBulkRequest => "Pending Bulk Request",
        }
    }
}

/// Decision state of a training request. `Pending` moves exactly once to
/// `Approved` or `Rejected`; both are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }

    pub fn label(self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Approved => "Approved",
            RequestStatus::Rejected => "Rejected",
        }
    }
}

/// First-time vs repeated enrollment marker on a progress record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Enrollment {
    New,
    Reused,
}

/// Portal role of an authenticated employee.
///
/// The backend writes `"Admin"` and `"user"` — a closed enumeration here so
/// route gating never falls back to duck-typed string comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    #[serde(rename = "user")]
    User,
}

/// A published training course in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogCourse {
    #[serde(rename = "courseID")]
    pub course_id: i64,
    pub title: String,
    pub resource_link: String,
    pub description: String,
    pub category: String,
    pub training_mode: String,
    pub training_source: String,
    pub duration_in_weeks: u32,
    pub duration_in_hours: u32,
    /// None means the course is free.
    pub price: Option<f64>,
    /// Delimited skill tags, stored as the backend sends them.
    pub skills: String,
    pub points: u32,
}

impl Keyed for CatalogCourse {
    fn key(&self) -> i64 {
        self.course_id
    }
}

/// Payload for creating a catalog course through the admin form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    pub title: String,
    pub resource_link: String,
    pub description: String,
    pub category: String,
    pub training_mode: String,
    pub training_source: String,
    pub duration_in_weeks: u32,
    pub duration_in_hours: u32,
    pub price: Option<f64>,
    pub skills: String,
    pub points: u32,
}

impl NewCourse {
    /// Field-level checks the form runs before any network call.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::MissingField("description"));
        }
        if self.category.trim().is_empty() {
            return Err(ValidationError::MissingField("category"));
        }
        if !self.resource_link.starts_with("http") {
            return Err(ValidationError::InvalidField("resourceLink"));
        }
        Ok(())
    }
}

/// Authenticated identity, fetched at login and held for the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeProfile {
    #[serde(rename = "employeeID")]
    pub employee_id: i64,
    pub name: String,
    pub email: String,
    pub designation: String,
    pub tech_group: String,
    pub cadre: String,
    pub location: String,
    pub role: Role,
}

impl Keyed for EmployeeProfile {
    fn key(&self) -> i64 {
        self.employee_id
    }
}

/// One employee's relationship to one course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    #[serde(rename = "progressID")]
    pub progress_id: i64,
    #[serde(rename = "employeeID")]
    pub employee_id: i64,
    #[serde(rename = "courseID")]
    pub course_id: i64,
    pub status: ProgressStatus,
    pub last_updated: DateTime<Utc>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub new_or_re_used: Enrollment,
    /// Sortable `YYYY-MM` label, set together with `end_date` on completion.
    pub month_completed: Option<String>,
    pub course_details: CatalogCourse,
    /// Present on admin-wide reads, absent on per-employee reads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_details: Option<EmployeeProfile>,
}

impl Keyed for ProgressRecord {
    fn key(&self) -> i64 {
        self.progress_id
    }
}

/// A request to enroll (self or group) in a course, awaiting admin decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingRequest {
    #[serde(rename = "requestID")]
    pub request_id: i64,
    #[serde(rename = "employeeID")]
    pub employee_id: i64,
    #[serde(rename = "courseID")]
    pub course_id: i64,
    /// Comma-joined participant employee ids. More than one id marks the
    /// request as a group request.
    #[serde(rename = "requestEmpIDs")]
    pub request_emp_ids: String,
    pub request_date: DateTime<Utc>,
    pub status: RequestStatus,
    #[serde(default)]
    pub comments: String,
    /// Public URL of the justification attachment; empty when none.
    #[serde(default)]
    pub image_link: String,
    pub course_details: CatalogCourse,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_details: Option<EmployeeProfile>,
}

impl TrainingRequest {
    pub fn is_group(&self) -> bool {
        self.request_emp_ids.contains(',')
    }

    pub fn participant_ids(&self) -> Vec<i64> {
        self.request_emp_ids
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect()
    }
}

impl Keyed for TrainingRequest {
    fn key(&self) -> i64 {
        self.request_id
    }
}

/// Creation payload for a training request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrainingRequest {
    #[serde(rename = "employeeID")]
    pub employee_id: i64,
    #[serde(rename = "courseID")]
    pub course_id: i64,
    #[serde(rename = "requestEmpIDs")]
    pub request_emp_ids: String,
    pub request_date: DateTime<Utc>,
    pub status: RequestStatus,
    pub comments: String,
    pub image_link: String,
}

impl NewTrainingRequest {
    /// Single-participant request: the requester is the only participant and
    /// no justification attachment is required.
    pub fn single(
        employee_id: i64,
        course_id: i64,
        comments: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            employee_id,
            course_id,
            request_emp_ids: employee_id.to_string(),
            request_date: now,
            status: RequestStatus::Pending,
            comments: comments.into(),
            image_link: String::new(),
        }
    }

    /// Group request naming more than one participant. Group requests carry a
    /// justification attachment, so the uploaded link is mandatory here.
    pub fn group(
        employee_id: i64,
        course_id: i64,
        participants: &[i64],
        comments: impl Into<String>,
        justification_link: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        if participants.len() < 2 {
            return Err(ValidationError::InvalidField("participants"));
        }
        let link = justification_link.into();
        if link.trim().is_empty() {
            return Err(ValidationError::MissingField("imageLink"));
        }
        Ok(Self {
            employee_id,
            course_id,
            request_emp_ids: participants
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(","),
            request_date: now,
            status: RequestStatus::Pending,
            comments: comments.into(),
            image_link: link,
        })
    }
}

/// A proposed knowledge-sharing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrownBagRequest {
    pub request_id: i64,
    #[serde(rename = "employeeID")]
    pub employee_id: i64,
    pub employee_name: String,
    pub topic_type: String,
    pub topic_name: String,
    pub agenda: String,
    pub speaker_description: String,
    pub request_date: DateTime<Utc>,
}

impl Keyed for BrownBagRequest {
    fn key(&self) -> i64 {
        self.request_id
    }
}

/// Creation payload for a brown bag session request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBrownBagRequest {
    #[serde(rename = "employeeID")]
    pub employee_id: i64,
    pub employee_name: String,
    pub topic_type: String,
    pub topic_name: String,
    pub agenda: String,
    pub speaker_description: String,
    pub request_date: DateTime<Utc>,
}

impl NewBrownBagRequest {
    /// Validates the form fields and the Fridays-only session date rule.
    ///
    /// `today` is the caller's current date so the past-date check stays
    /// deterministic in tests.
    pub fn validate(&self, today: DateTime<Utc>) -> Result<(), ValidationError> {
        if self.topic_type.trim().is_empty() {
            return Err(ValidationError::MissingField("topicType"));
        }
        if self.topic_name.trim().is_empty() {
            return Err(ValidationError::MissingField("topicName"));
        }
        if self.agenda.trim().is_empty() {
            return Err(ValidationError::MissingField("agenda"));
        }
        if self.speaker_description.trim().is_empty() {
            return Err(ValidationError::MissingField("speakerDescription"));
        }
        if self.request_date.weekday() != Weekday::Fri {
            return Err(ValidationError::InvalidField("requestDate"));
        }
        if self.request_date.date_naive() < today.date_naive() {
            return Err(ValidationError::InvalidField("requestDate"));
        }
        Ok(())
    }
}

/// Local validation failure, caught before any network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("required field missing: {0}")]
    MissingField(&'static str),
    #[error("invalid value for field: {0}")]
    InvalidField(&'static str),
}

/// Derive the month-completed label for a completion timestamp.
///
/// `YYYY-MM` so labels sort chronologically as plain strings.
pub fn month_label(at: DateTime<Utc>) -> String {
    format!("{:04}-{:02}", at.year(), at.month())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn course() -> CatalogCourse {
        CatalogCourse {
            course_id: 7,
            title: "Rust Fundamentals".to_string(),
            resource_link: "https://learn.example.com/rust".to_string(),
            description: "Ownership, borrowing, traits".to_string(),
            category: "Technical trainings".to_string(),
            training_mode: "Self-paced".to_string(),
            training_source: "Internal".to_string(),
            duration_in_weeks: 4,
            duration_in_hours: 20,
            price: None,
            skills: "rust,systems".to_string(),
            points: 40,
        }
    }

    #[test]
    fn progress_status_transitions() {
        assert!(ProgressStatus::NotStarted.can_advance_to(ProgressStatus::Started));
        assert!(ProgressStatus::Started.can_advance_to(ProgressStatus::Completed));
        // No skips, no backward edges.
        assert!(!ProgressStatus::NotStarted.can_advance_to(ProgressStatus::Completed));
        assert!(!ProgressStatus::Completed.can_advance_to(ProgressStatus::Started));
        assert!(!ProgressStatus::Started.can_advance_to(ProgressStatus::NotStarted));
        // Read-only variants admit no client transition.
        assert!(!ProgressStatus::Requested.can_advance_to(ProgressStatus::Started));
        assert!(!ProgressStatus::PendingBulkRequest.can_advance_to(ProgressStatus::Started));
    }

    #[test]
    fn progress_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&ProgressStatus::NotStarted).unwrap(),
            r#""Not Started""#
        );
        assert_eq!(
            serde_json::from_str::<ProgressStatus>(r#""Pending Bulk Request""#).unwrap(),
            ProgressStatus::PendingBulkRequest
        );
    }

    #[test]
    fn role_wire_names() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), r#""user""#);
        assert_eq!(serde_json::from_str::<Role>(r#""Admin""#).unwrap(), Role::Admin);
    }

    #[test]
    fn progress_record_round_trip() {
        let json = r#"{
            "progressID": 42,
            "employeeID": 1001,
            "courseID": 7,
            "status": "Started",
            "lastUpdated": "2025-03-10T09:30:00Z",
            "startDate": "2025-03-10T09:30:00Z",
            "endDate": null,
            "newOrReUsed": "New",
            "monthCompleted": null,
            "courseDetails": {
                "courseID": 7,
                "title": "Rust Fundamentals",
                "resourceLink": "https://learn.example.com/rust",
                "description": "Ownership, borrowing, traits",
                "category": "Technical trainings",
                "trainingMode": "Self-paced",
                "trainingSource": "Internal",
                "durationInWeeks": 4,
                "durationInHours": 20,
                "price": null,
                "skills": "rust,systems",
                "points": 40
            }
        }"#;

        let record: ProgressRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.progress_id, 42);
        assert_eq!(record.status, ProgressStatus::Started);
        assert!(record.end_date.is_none());
        assert!(record.employee_details.is_none());
        assert_eq!(record.course_details.title, "Rust Fundamentals");

        // Serializes back with the backend's field names.
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("progressID").is_some());
        assert!(value.get("newOrReUsed").is_some());
    }

    #[test]
    fn group_request_detection() {
        let single = TrainingRequest {
            request_id: 1,
            employee_id: 1001,
            course_id: 7,
            request_emp_ids: "1001".to_string(),
            request_date: Utc::now(),
            status: RequestStatus::Pending,
            comments: String::new(),
            image_link: String::new(),
            course_details: course(),
            employee_details: None,
        };
        assert!(!single.is_group());
        assert_eq!(single.participant_ids(), vec![1001]);

        let mut group = single.clone();
        group.request_emp_ids = "1001,1002,1003".to_string();
        assert!(group.is_group());
        assert_eq!(group.participant_ids(), vec![1001, 1002, 1003]);
    }

    #[test]
    fn group_creation_requires_attachment() {
        let now = Utc::now();
        let err = NewTrainingRequest::group(1001, 7, &[1001, 1002], "", "  ", now);
        assert_eq!(err.unwrap_err(), ValidationError::MissingField("imageLink"));

        let ok = NewTrainingRequest::group(1001, 7, &[1001, 1002], "", "https://blob/x.pdf", now)
            .unwrap();
        assert_eq!(ok.request_emp_ids, "1001,1002");
        assert_eq!(ok.status, RequestStatus::Pending);

        let single = NewTrainingRequest::single(1001, 7, "other topic", now);
        assert_eq!(single.request_emp_ids, "1001");
        assert!(single.image_link.is_empty());
    }

    #[test]
    fn brown_bag_fridays_only() {
        // 2025-03-14 is a Friday.
        let friday = Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap();
        let monday = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();

        let mut req = NewBrownBagRequest {
            employee_id: 1001,
            employee_name: "Alice Wong".to_string(),
            topic_type: "Tech".to_string(),
            topic_name: "Async Rust".to_string(),
            agenda: "Futures, executors, pitfalls".to_string(),
            speaker_description: "Platform engineer".to_string(),
            request_date: friday,
        };
        assert!(req.validate(monday).is_ok());

        req.request_date = monday;
        assert_eq!(
            req.validate(monday).unwrap_err(),
            ValidationError::InvalidField("requestDate")
        );

        // A Friday in the past is rejected too.
        let later = Utc.with_ymd_and_hms(2025, 3, 20, 0, 0, 0).unwrap();
        req.request_date = friday;
        assert_eq!(
            req.validate(later).unwrap_err(),
            ValidationError::InvalidField("requestDate")
        );
    }

    #[test]
    fn month_label_is_sortable() {
        let march = Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap();
        let nov = Utc.with_ymd_and_hms(2024, 11, 2, 12, 0, 0).unwrap();
        assert_eq!(month_label(march), "2025-03");
        assert_eq!(month_label(nov), "2024-11");
        assert!(month_label(nov) < month_label(march));
    }
}
