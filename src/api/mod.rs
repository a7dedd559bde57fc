//! HTTP client for the WinLearn REST backend.
//!
//! Direct reqwest calls, one per operation: no retries, no backoff, no
//! cancellation. A failed call fails once and the user retries by hand.
//! Every request carries `Authorization: Bearer <token>` when the session
//! holds a token; when it doesn't, the call goes out unauthenticated and the
//! backend answers 401.
//!
//! Modules, one per backend resource:
//! - employees: login + roster
//! - courses: catalog read/create
//! - progress: course-progress rows and full-record updates
//! - requests: training request lifecycle (create, list, approve, reject)
//! - brown_bag: brown bag session requests
//! - upload: multipart attachment upload

pub mod brown_bag;
pub mod courses;
pub mod employees;
pub mod progress;
pub mod requests;
pub mod upload;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::ClientConfig;
use crate::session::Session;
use crate::types::ValidationError;

/// Failure of a backend call, classified per the error taxonomy: transport,
/// backend-reported, or local validation. Callers log it, surface a
/// transient notification, and leave retry to the user.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No usable response at all (DNS, connect, TLS, timed-out body).
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    /// Non-2xx status; the backend's message body is preserved unmodified.
    #[error("backend error {status}: {message}")]
    Backend { status: u16, message: String },
    /// 2xx envelope that reports failure (`isSuccess: false`).
    #[error("backend rejected the request: {0}")]
    Rejected(String),
    /// Response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    /// Caught before any network call.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("invalid endpoint path: {0}")]
    InvalidPath(String),
}

impl ApiError {
    /// HTTP status of a backend-reported failure, if there is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The backend's uniform response wrapper.
///
/// List endpoints omit `isSuccess`, so it defaults to true; a present
/// `false` is a backend-reported failure even under a 200.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    #[serde(default = "default_true")]
    pub is_success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

fn default_true() -> bool {
    true
}

impl<T> ApiEnvelope<T> {
    pub fn into_data(self) -> Result<T, ApiError> {
        if !self.is_success {
            return Err(ApiError::Rejected(
                self.message.unwrap_or_else(|| "request failed".to_string()),
            ));
        }
        self.data
            .ok_or_else(|| ApiError::Rejected("response carried no data".to_string()))
    }
}

/// Authenticated client for the WinLearn backend.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<Session>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, session: Arc<Session>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.clone(),
            session,
        })
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Tear down the session. Cached collections live in `ClientState` and
    /// are cleared by its owner.
    pub fn logout(&self) {
        self.session.clear();
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|_| ApiError::InvalidPath(path.to_string()))
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send one request; map non-2xx to `ApiError::Backend` with the message
    /// body preserved.
    pub(crate) async fn execute(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        let response = self.authorize(builder).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Backend {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn read_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let body = response.text().await?;
        let envelope: ApiEnvelope<T> = serde_json::from_str(&body)?;
        envelope.into_data()
    }

    /// GET an enveloped collection or record.
    pub(crate) async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let response = self.execute(self.http.get(url)).await?;
        Self::read_envelope(response).await
    }

    /// POST a JSON body; the response body is ignored beyond the status.
    pub(crate) async fn post_status<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(path)?;
        self.execute(self.http.post(url).json(body)).await?;
        Ok(())
    }

    /// PUT a JSON body; the response body is ignored beyond the status.
    pub(crate) async fn put_status<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(path)?;
        self.execute(self.http.put(url).json(body)).await?;
        Ok(())
    }

    /// PATCH with no body; the response body is ignored beyond the status.
    pub(crate) async fn patch_status(&self, path: &str) -> Result<(), ApiError> {
        let url = self.endpoint(path)?;
        self.execute(self.http.patch(url)).await?;
        Ok(())
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn url_for(&self, path: &str) -> Result<Url, ApiError> {
        self.endpoint(path)
    }
}
