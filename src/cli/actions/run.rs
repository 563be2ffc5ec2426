use crate::cli::actions::{session, Action};
use anyhow::Result;

/// Execute the provided action.
// Single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Status(args) => session::status(args).await,
        Action::Login { args, email } => session::login(args, &email).await,
        Action::Logout(args) => session::logout(args).await,
    }
}
