//! Client-side mirror of the server-side patient session.
//!
//! The store owns three fields (`user`, `loading`, `error`) plus the derived
//! `is_authenticated`, and changes them only through `check_auth_status`,
//! `login`, and `logout`. A visitor without a session is a normal state: it
//! shows up as `user: None`, never as an error.

mod error;
mod state;
mod store;

pub use self::error::SessionError;
pub use self::state::{Outcome, Role, SessionSnapshot, User};
pub use self::store::SessionStore;
