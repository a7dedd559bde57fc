//! Brown bag session request endpoints.

use chrono::Utc;

use super::{ApiClient, ApiError};
use crate::types::{BrownBagRequest, NewBrownBagRequest};

impl ApiClient {
    /// Submit a brown bag session request. The Fridays-only date rule is
    /// checked locally before the call.
    pub async fn create_brown_bag(&self, request: &NewBrownBagRequest) -> Result<(), ApiError> {
        request.validate(Utc::now())?;
        self.post_status("api/BrownBagRequest/create", request).await
    }

    /// Every brown bag request, for the admin listing.
    pub async fn fetch_all_brown_bags(&self) -> Result<Vec<BrownBagRequest>, ApiError> {
        self.get_data("api/BrownBagRequest/Requests").await
    }

    /// Brown bag requests raised by one employee.
    pub async fn fetch_employee_brown_bags(
        &self,
        employee_id: i64,
    ) -> Result<Vec<BrownBagRequest>, ApiError> {
        self.get_data(&format!("api/BrownBagRequest/Requests/Employee/{employee_id}"))
            .await
    }
}
