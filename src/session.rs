//! Explicit session context.
//!
//! One object owns the bearer token and the authenticated profile for the
//! whole session: initialized once at login, cleared once at logout, passed
//! to whatever needs an actor identity. Nothing reads ambient storage and no
//! role marker is duplicated anywhere else.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::types::{EmployeeProfile, Role};

/// Which portal tab the user signed in through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Portal {
    Employee,
    Admin,
}

/// Token + profile established by a successful login.
#[derive(Debug, Clone)]
pub struct SessionData {
    pub token: String,
    pub profile: EmployeeProfile,
}

/// Shared session cell. Cheap to clone via `Arc`; the API client holds one
/// and attaches the token to every outgoing request.
#[derive(Default)]
pub struct Session {
    data: Mutex<Option<SessionData>>,
}

impl Session {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Single initialization point, called by the login flow.
    pub fn establish(&self, token: String, profile: EmployeeProfile) {
        *self.data.lock() = Some(SessionData { token, profile });
    }

    /// Single teardown point, called at logout.
    pub fn clear(&self) {
        *self.data.lock() = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.data.lock().is_some()
    }

    /// Bearer token for the current session, if any. Absence is not an error
    /// here — unauthenticated calls surface as 401 from the backend.
    pub fn token(&self) -> Option<String> {
        self.data.lock().as_ref().map(|d| d.token.clone())
    }

    pub fn profile(&self) -> Option<EmployeeProfile> {
        self.data.lock().as_ref().map(|d| d.profile.clone())
    }

    pub fn role(&self) -> Option<Role> {
        self.data.lock().as_ref().map(|d| d.profile.role)
    }

    pub fn employee_id(&self) -> Option<i64> {
        self.data.lock().as_ref().map(|d| d.profile.employee_id)
    }
}
