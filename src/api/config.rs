//! Endpoint configuration for the HTTP session client. Values are public and
//! must not carry credentials; the session itself lives in the cookie jar.

use super::errors::ApiError;
use std::time::Duration;
use url::Url;

/// Default request timeout applied to every call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_SESSION_PATH: &str = "/api/patient/dashboard/";
pub const DEFAULT_LOGIN_PATH: &str = "/api/patient/login/";
pub const DEFAULT_LOGOUT_PATH: &str = "/api/patient/logout/";

/// Backend location and endpoint paths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub session_path: String,
    pub login_path: String,
    pub logout_path: String,
    pub timeout: Duration,
}

impl ApiConfig {
    /// Builds a config for `base_url` with the default endpoint paths.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the URL does not parse or is not http(s).
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(base_url)?;

        Ok(Self {
            base_url,
            session_path: DEFAULT_SESSION_PATH.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            logout_path: DEFAULT_LOGOUT_PATH.to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    #[must_use]
    pub fn with_session_path(mut self, path: &str) -> Self {
        if let Some(path) = normalize_path(path) {
            self.session_path = path;
        }
        self
    }

    #[must_use]
    pub fn with_login_path(mut self, path: &str) -> Self {
        if let Some(path) = normalize_path(path) {
            self.login_path = path;
        }
        self
    }

    #[must_use]
    pub fn with_logout_path(mut self, path: &str) -> Self {
        if let Some(path) = normalize_path(path) {
            self.logout_path = path;
        }
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Joins the base URL and an endpoint path with exactly one slash.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim();

        if path.is_empty() {
            base.to_string()
        } else {
            format!("{}/{}", base, path.trim_start_matches('/'))
        }
    }
}

fn normalize_base_url(value: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    let url = Url::parse(trimmed)
        .map_err(|err| ApiError::Config(format!("Invalid API base URL '{trimmed}': {err}")))?;

    match url.scheme() {
        "http" | "https" => Ok(trimmed.trim_end_matches('/').to_string()),
        scheme => Err(ApiError::Config(format!(
            "Unsupported API URL scheme '{scheme}', expected http or https"
        ))),
    }
}

/// Blank overrides keep the default path.
fn normalize_path(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
