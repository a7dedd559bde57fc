//! Training request lifecycle endpoints.

use async_trait::async_trait;

use super::{ApiClient, ApiError};
use crate::mutation::DecisionBackend;
use crate::types::{NewTrainingRequest, TrainingRequest};

impl ApiClient {
    /// Submit a training request (single or group; the payload constructors
    /// enforce the group-attachment invariant).
    pub async fn create_training_request(
        &self,
        request: &NewTrainingRequest,
    ) -> Result<(), ApiError> {
        self.post_status("api/CoursesRequest/create", request).await
    }

    /// Every training request, for the admin review queue.
    pub async fn fetch_all_requests(&self) -> Result<Vec<TrainingRequest>, ApiError> {
        self.get_data("api/CoursesRequest/Requests").await
    }

    /// Requests raised by one employee.
    pub async fn fetch_employee_requests(
        &self,
        employee_id: i64,
    ) -> Result<Vec<TrainingRequest>, ApiError> {
        self.get_data(&format!("api/CoursesRequest/Requests/Employee/{employee_id}"))
            .await
    }

    /// Approve a pending request. The backend creates the enrollment; the
    /// query flag asks for a fresh progress row rather than a reused one.
    pub async fn approve_request(&self, request_id: i64) -> Result<(), ApiError> {
        self.patch_status(&format!(
            "api/CoursesRequest/Approve/{request_id}?newOrReused=new"
        ))
        .await
    }

    /// Reject a pending request.
    pub async fn reject_request(&self, request_id: i64) -> Result<(), ApiError> {
        self.patch_status(&format!("api/CoursesRequest/Reject/{request_id}"))
            .await
    }
}

#[async_trait]
impl DecisionBackend for ApiClient {
    async fn approve_request(&self, request_id: i64) -> Result<(), ApiError> {
        ApiClient::approve_request(self, request_id).await
    }

    async fn reject_request(&self, request_id: i64) -> Result<(), ApiError> {
        ApiClient::reject_request(self, request_id).await
    }
}
