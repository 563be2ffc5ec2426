use crate::api::{
    config::{DEFAULT_LOGIN_PATH, DEFAULT_LOGOUT_PATH, DEFAULT_SESSION_PATH},
    ApiConfig,
};
use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use std::time::Duration;

pub const ARG_API_URL: &str = "api-url";
pub const ARG_SESSION_PATH: &str = "session-path";
pub const ARG_LOGIN_PATH: &str = "login-path";
pub const ARG_LOGOUT_PATH: &str = "logout-path";
pub const ARG_TIMEOUT: &str = "timeout";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_URL)
                .short('u')
                .long("api-url")
                .help("Backend base URL, example: https://portal.example.com")
                .env("PATIENT_SESSION_API_URL")
                .required(true),
        )
        .arg(
            Arg::new(ARG_SESSION_PATH)
                .long("session-path")
                .help("Path returning the current patient session")
                .env("PATIENT_SESSION_SESSION_PATH")
                .default_value(DEFAULT_SESSION_PATH),
        )
        .arg(
            Arg::new(ARG_LOGIN_PATH)
                .long("login-path")
                .help("Path accepting the login request")
                .env("PATIENT_SESSION_LOGIN_PATH")
                .default_value(DEFAULT_LOGIN_PATH),
        )
        .arg(
            Arg::new(ARG_LOGOUT_PATH)
                .long("logout-path")
                .help("Path clearing the server-side session")
                .env("PATIENT_SESSION_LOGOUT_PATH")
                .default_value(DEFAULT_LOGOUT_PATH),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long("timeout")
                .help("Request timeout in seconds")
                .env("PATIENT_SESSION_TIMEOUT_SECONDS")
                .default_value("10")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
}

/// Builds the backend configuration from validated matches.
///
/// # Errors
/// Returns an error if the base URL is missing or invalid.
pub fn config(matches: &ArgMatches) -> Result<ApiConfig> {
    let base_url = matches
        .get_one::<String>(ARG_API_URL)
        .context("missing required argument: --api-url")?;
    let path = |id: &str| matches.get_one::<String>(id).map_or("", String::as_str);
    let timeout = matches.get_one::<u64>(ARG_TIMEOUT).copied().unwrap_or(10);

    let config = ApiConfig::new(base_url)?
        .with_session_path(path(ARG_SESSION_PATH))
        .with_login_path(path(ARG_LOGIN_PATH))
        .with_logout_path(path(ARG_LOGOUT_PATH))
        .with_timeout(Duration::from_secs(timeout));

    Ok(config)
}
