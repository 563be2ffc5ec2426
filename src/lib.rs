//! # Patient Session (client-side authentication state)
//!
//! `patient_session` mirrors the server-side authentication state of a patient
//! portal. The server is the source of truth: this crate never decides whether a
//! user is authenticated, it only asks.
//!
//! ## Session Store
//!
//! [`session::SessionStore`] holds the current user, a loading flag, and the last
//! error. It exposes `login`, `logout`, and `check_auth_status`, and derives
//! `is_authenticated` from the presence of a user.
//!
//! - **Hydration:** a store built with [`session::SessionStore::start`] checks the
//!   session once, immediately, before any other operation can run.
//! - **Single-flight:** at most one operation talks to the backend at a time; later
//!   callers queue behind it in arrival order.
//! - **Teardown:** [`session::SessionStore::close`] abandons in-flight calls and
//!   freezes the state so a discarded session can never be mutated.
//!
//! ## Backend Contract
//!
//! The store is generic over [`api::SessionApi`]. [`api::HttpSessionApi`] is the
//! default implementation: a cookie-carrying HTTP client where `login` establishes
//! the server-side session and `fetch_session` reads it back. A missing or expired
//! session (`401`, `403`, `204`) is an anonymous visitor, not an error.

pub mod api;
pub mod cli;
pub mod session;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with("patient-session/"));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
