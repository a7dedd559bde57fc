//! Course-progress endpoints.

use async_trait::async_trait;

use super::{ApiClient, ApiError};
use crate::mutation::ProgressBackend;
use crate::types::ProgressRecord;

impl ApiClient {
    /// Progress records for one employee.
    pub async fn fetch_employee_progress(
        &self,
        employee_id: i64,
    ) -> Result<Vec<ProgressRecord>, ApiError> {
        self.get_data(&format!("api/CourseProgress/employee/{employee_id}"))
            .await
    }

    /// Every progress record in the organization (admin analytics).
    pub async fn fetch_all_progress(&self) -> Result<Vec<ProgressRecord>, ApiError> {
        self.get_data("api/CourseProgress/progresses").await
    }

    /// Full-record update of one progress row.
    pub async fn update_progress(&self, record: &ProgressRecord) -> Result<(), ApiError> {
        self.put_status(
            &format!("api/CourseProgress/update/{}", record.progress_id),
            record,
        )
        .await
    }
}

#[async_trait]
impl ProgressBackend for ApiClient {
    async fn update_progress(&self, record: &ProgressRecord) -> Result<(), ApiError> {
        ApiClient::update_progress(self, record).await
    }
}
