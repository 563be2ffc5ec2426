//! Maps validated CLI arguments to an [`Action`].

use crate::cli::{
    actions::{session::Args, Action},
    commands::{self, api},
};
use anyhow::{anyhow, Context, Result};

/// Map validated CLI matches to a session action.
///
/// # Errors
/// Returns an error if required arguments are missing or the backend URL is invalid.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let args = Args {
        config: api::config(matches)?,
    };

    match matches.subcommand() {
        Some((commands::CMD_STATUS, _)) => Ok(Action::Status(args)),
        Some((commands::CMD_LOGIN, sub_m)) => {
            let email = sub_m
                .get_one::<String>(commands::ARG_EMAIL)
                .cloned()
                .context("missing required argument: <email>")?;
            Ok(Action::Login { args, email })
        }
        Some((commands::CMD_LOGOUT, _)) => Ok(Action::Logout(args)),
        Some((other, _)) => Err(anyhow!("unknown command: {other}")),
        None => Err(anyhow!("missing command")),
    }
}
