//! Backend contract for the session store and its default HTTP implementation.
//!
//! The store never talks to the network directly. It calls the three operations
//! of [`SessionApi`], and whichever implementation is plugged in owns transport,
//! cookies, and timeouts. [`HttpSessionApi`] keeps the server-side session in a
//! cookie jar shared by all of its requests.

pub mod config;
pub mod errors;
pub mod http;
pub mod types;

use std::{future::Future, sync::Arc};

pub use self::config::ApiConfig;
pub use self::errors::ApiError;
pub use self::http::HttpSessionApi;
pub use self::types::{LoginRequest, PatientRecord, SessionResponse};

/// Remote operations the session store delegates to.
pub trait SessionApi: Send + Sync + 'static {
    /// Reads the current server-side session. A visitor without a session is
    /// either `Ok` with no patient or an `Err`; the store treats both the same.
    fn fetch_session(&self) -> impl Future<Output = Result<SessionResponse, ApiError>> + Send;

    /// Establishes a server-side session for `email`. Returns no profile data.
    fn login(&self, email: &str) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Clears the server-side session.
    fn logout(&self) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// Lets several stores share one client (and therefore one cookie jar).
impl<T: SessionApi> SessionApi for Arc<T> {
    fn fetch_session(&self) -> impl Future<Output = Result<SessionResponse, ApiError>> + Send {
        (**self).fetch_session()
    }

    fn login(&self, email: &str) -> impl Future<Output = Result<(), ApiError>> + Send {
        (**self).login(email)
    }

    fn logout(&self) -> impl Future<Output = Result<(), ApiError>> + Send {
        (**self).logout()
    }
}
