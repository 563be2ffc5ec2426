use crate::{
    api::{ApiConfig, HttpSessionApi},
    session::{Outcome, SessionSnapshot, SessionStore},
};
use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug)]
pub struct Args {
    pub config: ApiConfig,
}

#[derive(Serialize)]
struct Report<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<&'a Outcome>,
    session: &'a SessionSnapshot,
}

/// Hydrate a store against the backend; the returned store is already checking.
fn open(args: Args) -> Result<SessionStore<HttpSessionApi>> {
    debug!(
        base_url = %args.config.base_url,
        timeout_secs = args.config.timeout.as_secs(),
        "opening session"
    );
    let api = HttpSessionApi::new(args.config).context("failed to build HTTP client")?;

    Ok(SessionStore::start(api))
}

fn report(outcome: Option<&Outcome>, session: &SessionSnapshot) -> Result<String> {
    Ok(serde_json::to_string_pretty(&Report { outcome, session })?)
}

fn emit(outcome: Option<&Outcome>, session: &SessionSnapshot) -> Result<()> {
    println!("{}", report(outcome, session)?);
    Ok(())
}

/// Print the session as seen by the backend.
/// # Errors
/// Returns an error if the report cannot be encoded.
pub async fn status(args: Args) -> Result<()> {
    let store = open(args)?;
    store.settled().await;

    let snapshot = store.snapshot();
    info!(authenticated = snapshot.is_authenticated, "session checked");
    store.close();

    emit(None, &snapshot)
}

/// Log in, then print the refreshed session.
/// # Errors
/// Returns an error if the backend rejects the login.
pub async fn login(args: Args, email: &str) -> Result<()> {
    let store = open(args)?;
    let result = store.login(email).await;

    let snapshot = store.snapshot();
    store.close();

    match result {
        Ok(outcome) => emit(Some(&outcome), &snapshot),
        Err(err) => {
            emit(Some(&Outcome::failed(err.to_string())), &snapshot)?;
            Err(anyhow::Error::new(err).context("login failed"))
        }
    }
}

/// Log out and print the outcome.
/// # Errors
/// Returns an error if the backend refuses to clear the session.
pub async fn logout(args: Args) -> Result<()> {
    let store = open(args)?;
    let outcome = store.logout().await;

    let snapshot = store.snapshot();
    store.close();
    emit(Some(&outcome), &snapshot)?;

    if outcome.success {
        Ok(())
    } else {
        Err(anyhow!(
            "logout failed: {}",
            outcome.error.as_deref().unwrap_or("unknown error")
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::report;
    use crate::session::{Outcome, Role, SessionSnapshot, User};
    use serde_json::{json, Value};

    #[test]
    fn status_report_has_session_only() {
        let text = report(None, &SessionSnapshot::default()).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(
            value,
            json!({
                "session": {
                    "user": null,
                    "loading": false,
                    "error": null,
                    "is_authenticated": false
                }
            })
        );
    }

    #[test]
    fn login_report_includes_outcome_and_user() {
        let session = SessionSnapshot {
            user: Some(User {
                id: "42".to_string(),
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                role: Role::Patient,
            }),
            loading: false,
            error: None,
            is_authenticated: true,
        };
        let text = report(Some(&Outcome::ok()), &session).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["outcome"], json!({"success": true}));
        assert_eq!(value["session"]["user"]["role"], json!("patient"));
        assert_eq!(value["session"]["is_authenticated"], json!(true));
    }

    #[test]
    fn failed_logout_report_carries_error() {
        let text = report(
            Some(&Outcome::failed("upstream exploded")),
            &SessionSnapshot::default(),
        )
        .unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(
            value["outcome"],
            json!({"success": false, "error": "upstream exploded"})
        );
    }
}
