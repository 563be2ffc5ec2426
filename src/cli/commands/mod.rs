pub mod api;
pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const CMD_STATUS: &str = "status";
pub const CMD_LOGIN: &str = "login";
pub const CMD_LOGOUT: &str = "logout";
pub const ARG_EMAIL: &str = "email";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("patient-session")
        .about("Patient authentication session client")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new(CMD_STATUS).about("Check the current session and print it"))
        .subcommand(
            Command::new(CMD_LOGIN)
                .about("Log in and print the refreshed session")
                .arg(
                    Arg::new(ARG_EMAIL)
                        .help("Patient email address")
                        .required(true),
                ),
        )
        .subcommand(Command::new(CMD_LOGOUT).about("Log out and print the outcome"));

    let command = api::with_args(command);
    logging::with_args(command)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "patient-session");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("Patient authentication session client".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_defaults() {
        temp_env::with_vars(
            [
                ("PATIENT_SESSION_SESSION_PATH", None::<&str>),
                ("PATIENT_SESSION_TIMEOUT_SECONDS", None::<&str>),
                ("PATIENT_SESSION_LOG_FORMAT", None::<&str>),
            ],
            || {
                let matches = new().get_matches_from(vec![
                    "patient-session",
                    "--api-url",
                    "http://localhost:8000",
                    "status",
                ]);

                assert_eq!(
                    matches.get_one::<String>(api::ARG_SESSION_PATH).cloned(),
                    Some("/api/patient/dashboard/".to_string())
                );
                assert_eq!(matches.get_one::<u64>(api::ARG_TIMEOUT).copied(), Some(10));
                assert_eq!(
                    matches.get_one::<String>(logging::ARG_LOG_FORMAT).cloned(),
                    Some("pretty".to_string())
                );
                assert_eq!(matches.subcommand_name(), Some(CMD_STATUS));
            },
        );
    }

    #[test]
    fn test_login_requires_email() {
        let result = new().try_get_matches_from(vec![
            "patient-session",
            "--api-url",
            "http://localhost:8000",
            "login",
        ]);
        assert!(result.is_err());

        let matches = new()
            .try_get_matches_from(vec![
                "patient-session",
                "--api-url",
                "http://localhost:8000",
                "login",
                "a@b.com",
            ])
            .unwrap();
        let (name, sub_m) = matches.subcommand().unwrap();
        assert_eq!(name, CMD_LOGIN);
        assert_eq!(
            sub_m.get_one::<String>(ARG_EMAIL).cloned(),
            Some("a@b.com".to_string())
        );
    }

    #[test]
    fn test_subcommand_required() {
        let result = new().try_get_matches_from(vec![
            "patient-session",
            "--api-url",
            "http://localhost:8000",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_timeout_must_be_positive() {
        let result = new().try_get_matches_from(vec![
            "patient-session",
            "--api-url",
            "http://localhost:8000",
            "--timeout",
            "0",
            "status",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("PATIENT_SESSION_API_URL", Some("https://portal.example.com")),
                ("PATIENT_SESSION_LOGIN_PATH", Some("/auth/login/")),
                ("PATIENT_SESSION_TIMEOUT_SECONDS", Some("3")),
                ("PATIENT_SESSION_LOG_LEVEL", Some("info")),
                ("PATIENT_SESSION_LOG_FORMAT", Some("json")),
            ],
            || {
                let matches = new().get_matches_from(vec!["patient-session", "logout"]);

                assert_eq!(
                    matches.get_one::<String>(api::ARG_API_URL).cloned(),
                    Some("https://portal.example.com".to_string())
                );
                assert_eq!(
                    matches.get_one::<String>(api::ARG_LOGIN_PATH).cloned(),
                    Some("/auth/login/".to_string())
                );
                assert_eq!(matches.get_one::<u64>(api::ARG_TIMEOUT).copied(), Some(3));
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );
                assert_eq!(
                    matches.get_one::<String>(logging::ARG_LOG_FORMAT).cloned(),
                    Some("json".to_string())
                );
            },
        );
    }

    #[test]
    fn test_check_log_level_verbosity() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            temp_env::with_vars([("PATIENT_SESSION_LOG_LEVEL", None::<String>)], || {
                let mut args = vec![
                    "patient-session".to_string(),
                    "--api-url".to_string(),
                    "http://localhost:8000".to_string(),
                    "status".to_string(),
                ];

                // Add the appropriate number of "-v" flags based on the index
                if index > 0 {
                    args.push(format!("-{}", "v".repeat(index)));
                }

                let matches = new().get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(u8::try_from(index).unwrap())
                );
            });
        }
    }
}
