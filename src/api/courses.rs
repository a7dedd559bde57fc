//! Course catalog endpoints.

use super::{ApiClient, ApiError};
use crate::types::{CatalogCourse, NewCourse};

impl ApiClient {
    /// The published catalog.
    pub async fn fetch_catalog(&self) -> Result<Vec<CatalogCourse>, ApiError> {
        self.get_data("api/Courses/AllCourses").await
    }

    /// Create a catalog course from the admin form. Field validation runs
    /// before the request goes out.
    pub async fn create_course(&self, course: &NewCourse) -> Result<(), ApiError> {
        course.validate()?;
        self.post_status("api/Courses/add", course).await
    }
}
