use thiserror::Error;

/// Failures raised by a [`super::SessionApi`] implementation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
}

impl ApiError {
    /// User-facing text without the category prefix, suitable for a form error.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            ApiError::Config(message)
            | ApiError::Network(message)
            | ApiError::Timeout(message)
            | ApiError::Parse(message)
            | ApiError::Serialization(message)
            | ApiError::Http { message, .. } => message,
        }
    }

    /// True when the server rejected the caller's credentials or session.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Http { status: 401 | 403, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;

    #[test]
    fn display_includes_status_for_http_errors() {
        let err = ApiError::Http {
            status: 401,
            message: "Invalid credentials".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed (401): Invalid credentials");
        assert_eq!(err.message(), "Invalid credentials");
    }

    #[test]
    fn unauthorized_covers_401_and_403_only() {
        let status = |status| ApiError::Http {
            status,
            message: String::new(),
        };
        assert!(status(401).is_unauthorized());
        assert!(status(403).is_unauthorized());
        assert!(!status(500).is_unauthorized());
        assert!(!ApiError::Network("down".to_string()).is_unauthorized());
    }
}
