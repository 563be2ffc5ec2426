//! Session store shared by every consumer that needs authentication state.
//! Consumers hold a cloned handle; all clones see the same state. Operations
//! are single-flight: one backend call at a time, later callers wait their turn.

use super::{
    error::SessionError,
    state::{Outcome, SessionSnapshot, User},
};
use crate::api::SessionApi;
use std::{future::Future, sync::Arc};
use tokio::sync::{watch, Mutex, OwnedMutexGuard};
use tracing::{debug, info, instrument, warn};

const LOGIN_FAILED: &str = "Login failed";
const LOGOUT_FAILED: &str = "Logout failed";

pub struct SessionStore<A> {
    inner: Arc<Inner<A>>,
}

struct Inner<A> {
    api: A,
    state: watch::Sender<SessionSnapshot>,
    flight: Arc<Mutex<()>>,
    closed: watch::Sender<bool>,
}

impl<A> Clone for SessionStore<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: SessionApi> SessionStore<A> {
    /// Builds an idle store without contacting the backend.
    pub fn new(api: A) -> Self {
        Self::with_snapshot(api, SessionSnapshot::default())
    }

    /// Builds a store and checks the session in the background. The store starts
    /// out loading, and any operation issued afterwards runs only once this
    /// first check has finished.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(api: A) -> Self {
        let store = Self::with_snapshot(api, SessionSnapshot::hydrating());

        // Taken before spawning so nothing queued later can overtake hydration.
        // The mutex was created above and has no other holder, so this cannot fail.
        match Arc::clone(&store.inner.flight).try_lock_owned() {
            Ok(guard) => {
                let hydrate = store.clone();
                tokio::spawn(async move {
                    hydrate.refresh().await;
                    drop(guard);
                });
            }
            Err(err) => debug!(error = %err, "hydration skipped, flight guard busy"),
        }

        store
    }

    fn with_snapshot(api: A, snapshot: SessionSnapshot) -> Self {
        let (state, _) = watch::channel(snapshot);
        let (closed, _) = watch::channel(false);

        Self {
            inner: Arc::new(Inner {
                api,
                state,
                flight: Arc::new(Mutex::new(())),
                closed,
            }),
        }
    }

    /// Owned copy of the current session record.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.state.borrow().clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated
    }

    /// Receiver that observes every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.inner.state.subscribe()
    }

    /// Waits until the operations queued before this call have finished.
    pub async fn settled(&self) {
        let _guard = self.inner.flight.lock().await;
    }

    /// Tears the store down: in-flight backend calls are abandoned, queued and
    /// future operations are rejected, and the state is frozen.
    pub fn close(&self) {
        self.inner.closed.send_replace(true);
        // Waits out an update that already holds the state lock; every later
        // update observes the closed flag under that lock.
        self.inner.state.send_if_modified(|_| false);
        debug!("session store closed");
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        *self.inner.closed.borrow()
    }

    /// Re-reads the server-side session. Failures, including "not logged in",
    /// leave the visitor anonymous and never touch `error`.
    #[instrument(skip(self))]
    pub async fn check_auth_status(&self) {
        let Ok(_guard) = self.acquire().await else {
            return;
        };

        self.refresh().await;
    }

    /// Logs in with `email`, then refreshes the user from the new session.
    ///
    /// # Errors
    /// Returns `SessionError::MissingEmail` for a blank email, `SessionError::Api`
    /// when the backend rejects the login, and `SessionError::Closed` once the
    /// store has been closed. The failure message is also recorded in `error`.
    #[instrument(skip_all)]
    pub async fn login(&self, email: &str) -> Result<Outcome, SessionError> {
        let _guard = self.acquire().await?;

        self.update(|snapshot| {
            snapshot.loading = true;
            snapshot.error = None;
        });

        let result = self.attempt_login(email).await;

        if let Err(err) = &result {
            warn!(error = %err, "login failed");
            let message = err.message_or(LOGIN_FAILED);
            self.update(|snapshot| snapshot.error = Some(message));
        }

        self.update(|snapshot| snapshot.loading = false);

        result.map(|()| Outcome::ok())
    }

    /// Logs out. Failures are recorded in `error` and reported in the outcome,
    /// never returned as `Err`; the user is kept when the backend refuses.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Outcome {
        let _guard = match self.acquire().await {
            Ok(guard) => guard,
            Err(err) => return Outcome::failed(err.to_string()),
        };

        self.update(|snapshot| snapshot.loading = true);

        let outcome = match self.cancellable(self.inner.api.logout()).await {
            Ok(Ok(())) => {
                info!("logged out");
                self.update(|snapshot| snapshot.user = None);
                Outcome::ok()
            }
            Ok(Err(err)) => {
                warn!(error = %err, "logout failed");
                let message = SessionError::from(err).message_or(LOGOUT_FAILED);
                self.update(|snapshot| snapshot.error = Some(message.clone()));
                Outcome::failed(message)
            }
            Err(err) => Outcome::failed(err.to_string()),
        };

        self.update(|snapshot| snapshot.loading = false);

        outcome
    }

    async fn attempt_login(&self, email: &str) -> Result<(), SessionError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(SessionError::MissingEmail);
        }

        self.cancellable(self.inner.api.login(email)).await??;
        debug!("login accepted, refreshing session");

        self.load_user().await;

        Ok(())
    }

    async fn refresh(&self) {
        self.update(|snapshot| snapshot.loading = true);
        self.load_user().await;
        self.update(|snapshot| snapshot.loading = false);
    }

    /// Replaces `user` wholesale from the backend session.
    async fn load_user(&self) {
        let user = match self.cancellable(self.inner.api.fetch_session()).await {
            Ok(Ok(response)) => response.patient.map(User::from),
            Ok(Err(err)) if err.is_unauthorized() => None,
            Ok(Err(err)) => {
                warn!(error = %err, "session check failed, treating visitor as anonymous");
                None
            }
            Err(_) => return,
        };

        match &user {
            Some(user) => debug!(user_id = %user.id, "session active"),
            None => debug!("no active session"),
        }

        self.update(|snapshot| snapshot.user = user);
    }

    async fn acquire(&self) -> Result<OwnedMutexGuard<()>, SessionError> {
        self.cancellable(Arc::clone(&self.inner.flight).lock_owned())
            .await
    }

    /// Runs `future` unless the store is closed first.
    async fn cancellable<F: Future>(&self, future: F) -> Result<F::Output, SessionError> {
        let mut closed = self.inner.closed.subscribe();
        if *closed.borrow_and_update() {
            return Err(SessionError::Closed);
        }

        tokio::select! {
            output = future => Ok(output),
            _ = closed.wait_for(|is_closed| *is_closed) => Err(SessionError::Closed),
        }
    }

    /// Applies `apply` and re-derives `is_authenticated`; a no-op once closed.
    fn update(&self, apply: impl FnOnce(&mut SessionSnapshot)) {
        let closed = &self.inner.closed;
        self.inner.state.send_if_modified(|snapshot| {
            if *closed.borrow() {
                return false;
            }
            apply(snapshot);
            snapshot.is_authenticated = snapshot.user.is_some();
            true
        });
    }
}
