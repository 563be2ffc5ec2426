use crate::api::PatientRecord;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Patient,
}

/// Authenticated user as seen by consumers of the store.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<PatientRecord> for User {
    fn from(patient: PatientRecord) -> Self {
        Self {
            id: patient.id,
            name: patient.name,
            email: patient.email,
            role: Role::Patient,
        }
    }
}

/// Readable session record. `is_authenticated` is recomputed by the store on
/// every change and always equals `user.is_some()`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
    pub is_authenticated: bool,
}

impl SessionSnapshot {
    /// State of a freshly constructed store whose first status check is pending.
    #[must_use]
    pub fn hydrating() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }
}

/// Result of `login` and `logout`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Outcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Outcome {
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}
