//! Login and roster endpoints.

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};
use crate::session::Portal;
use crate::types::{EmployeeProfile, Role};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginPayload<'a> {
    email: &'a str,
    password: &'a str,
    user_type: &'a str,
}

/// Login is the one endpoint that answers outside the uniform envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    #[serde(default)]
    is_success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    employee: Option<EmployeeProfile>,
}

impl ApiClient {
    /// Authenticate and establish the session in one step.
    ///
    /// This is the session's single initialization point. An admin-portal
    /// login by a non-Admin account is rejected locally after the call and
    /// leaves the session empty.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        portal: Portal,
    ) -> Result<EmployeeProfile, ApiError> {
        let payload = LoginPayload {
            email,
            password,
            user_type: match portal {
                Portal::Admin => "admin",
                Portal::Employee => "employee",
            },
        };

        let url = self.url_for("api/Employee/Login")?;
        let response = self.execute(self.http().post(url).json(&payload)).await?;
        let body = response.text().await?;
        let login: LoginResponse = serde_json::from_str(&body)?;

        if !login.is_success {
            return Err(ApiError::Rejected(
                login.message.unwrap_or_else(|| "login failed".to_string()),
            ));
        }
        let token = login
            .token
            .ok_or_else(|| ApiError::Rejected("login response carried no token".to_string()))?;
        let employee = login
            .employee
            .ok_or_else(|| ApiError::Rejected("login response carried no profile".to_string()))?;

        if portal == Portal::Admin && employee.role != Role::Admin {
            return Err(ApiError::Rejected(
                "account is not an L&D administrator".to_string(),
            ));
        }

        self.session().establish(token, employee.clone());
        Ok(employee)
    }

    /// Full employee roster, used by the participant picker on the request
    /// form.
    pub async fn fetch_all_employees(&self) -> Result<Vec<EmployeeProfile>, ApiError> {
        self.get_data("api/Employee/AllEmployees").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_parses_backend_shape() {
        let json = r#"{
            "isSuccess": true,
            "token": "eyJ0.example",
            "employee": {
                "employeeID": 1001,
                "name": "Alice Wong",
                "email": "alice@example.com",
                "designation": "Engineer",
                "techGroup": "Platform",
                "cadre": "IC",
                "location": "Hyderabad",
                "role": "user"
            }
        }"#;
        let login: LoginResponse = serde_json::from_str(json).unwrap();
        assert!(login.is_success);
        assert_eq!(login.token.as_deref(), Some("eyJ0.example"));
        assert_eq!(login.employee.unwrap().role, Role::User);
    }

    #[test]
    fn login_failure_parses_without_profile() {
        let json = r#"{ "isSuccess": false, "message": "Invalid credentials" }"#;
        let login: LoginResponse = serde_json::from_str(json).unwrap();
        assert!(!login.is_success);
        assert!(login.token.is_none());
        assert!(login.employee.is_none());
    }
}
