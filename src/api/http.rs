//! Cookie-backed HTTP implementation of [`SessionApi`]. One `reqwest::Client`
//! with a cookie store is shared by all calls, so the session cookie set by
//! `login` is presented on every later `fetch_session` and `logout`. Request
//! and response bodies are never logged; error bodies are trimmed before they
//! reach the caller.

use super::{
    config::ApiConfig,
    errors::ApiError,
    types::{LoginRequest, SessionResponse},
    SessionApi,
};
use crate::APP_USER_AGENT;
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument};

/// Maximum number of error body characters surfaced to callers.
const MAX_ERROR_CHARS: usize = 200;
/// JSON fields checked, in order, for a server-provided error message.
const ERROR_FIELDS: [&str; 3] = ["error", "detail", "message"];

#[derive(Clone, Debug)]
pub struct HttpSessionApi {
    client: Client,
    config: ApiConfig,
}

impl HttpSessionApi {
    /// Builds a client with a private cookie jar, the crate user agent, and the
    /// configured timeout.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the underlying HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .cookie_store(true)
            .timeout(config.timeout)
            .build()
            .map_err(|err| ApiError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self { client, config })
    }

    #[must_use]
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }
}

impl SessionApi for HttpSessionApi {
    #[instrument(skip(self), fields(path = %self.config.session_path))]
    async fn fetch_session(&self) -> Result<SessionResponse, ApiError> {
        let url = self.config.url_for(&self.config.session_path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(map_request_error)?;

        handle_session_response(response).await
    }

    #[instrument(skip_all, fields(path = %self.config.login_path))]
    async fn login(&self, email: &str) -> Result<(), ApiError> {
        let url = self.config.url_for(&self.config.login_path);
        let request = LoginRequest {
            email: email.to_string(),
        };
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(map_request_error)?;

        handle_empty_response(response).await
    }

    #[instrument(skip(self), fields(path = %self.config.logout_path))]
    async fn logout(&self) -> Result<(), ApiError> {
        let url = self.config.url_for(&self.config.logout_path);
        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(map_request_error)?;

        handle_empty_response(response).await
    }
}

/// Maps transport errors into `ApiError` variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout("Request timed out. Please try again.".to_string())
    } else if err.is_builder() {
        ApiError::Serialization(format!("Failed to build request: {err}"))
    } else {
        ApiError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Parses the session body and treats 204/401/403 as an anonymous visitor.
async fn handle_session_response(response: Response) -> Result<SessionResponse, ApiError> {
    let status = response.status();

    if matches!(
        status,
        StatusCode::NO_CONTENT | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
    ) {
        debug!(status = status.as_u16(), "no active session");
        return Ok(SessionResponse::anonymous());
    }

    if status.is_success() {
        response
            .json::<SessionResponse>()
            .await
            .map_err(|err| ApiError::Parse(format!("Failed to decode response: {err}")))
    } else {
        Err(http_error(response).await)
    }
}

/// Accepts any 2xx and discards the body.
async fn handle_empty_response(response: Response) -> Result<(), ApiError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(http_error(response).await)
    }
}

async fn http_error(response: Response) -> ApiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    debug!(status, "request rejected");

    ApiError::Http {
        status,
        message: error_message(&body),
    }
}

/// Prefers a JSON `error`/`detail`/`message` field, otherwise falls back to the
/// sanitized raw body.
fn error_message(body: &str) -> String {
    if let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(body) {
        let message = ERROR_FIELDS
            .iter()
            .find_map(|field| fields.get(*field).and_then(Value::as_str));
        if let Some(message) = message {
            return sanitize_body(message);
        }
    }

    sanitize_body(body)
}

/// Trims and truncates error bodies for user-facing messages.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
