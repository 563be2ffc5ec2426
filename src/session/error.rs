use crate::api::ApiError;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("email must not be empty")]
    MissingEmail,
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("session store has been closed")]
    Closed,
}

impl SessionError {
    /// Message recorded in the session `error` field; `fallback` covers API
    /// failures that carry no text.
    #[must_use]
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            SessionError::Api(err) if err.message().trim().is_empty() => fallback.to_string(),
            SessionError::Api(err) => err.message().to_string(),
            other => other.to_string(),
        }
    }
}
