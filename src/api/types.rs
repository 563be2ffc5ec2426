//! Request and response payloads for the patient session endpoints. Email
//! addresses travel in these types, so they must never be logged.

use serde::{Deserialize, Deserializer, Serialize};

/// Patient profile as returned by the session (dashboard) endpoint.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatientRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Body of the session endpoint. Only the patient record is read; any other
/// dashboard fields are ignored.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionResponse {
    #[serde(default)]
    pub patient: Option<PatientRecord>,
}

impl SessionResponse {
    /// Response for a visitor without a server-side session.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { patient: None }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
}

/// Accepts identifiers sent either as JSON strings or JSON integers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn patient_id_accepts_numbers_and_strings() {
        let numeric: PatientRecord = serde_json::from_value(json!({
            "id": 42,
            "name": "Ada",
            "email": "ada@example.com"
        }))
        .unwrap();
        assert_eq!(numeric.id, "42");

        let text: PatientRecord = serde_json::from_value(json!({
            "id": "p-42",
            "name": "Ada",
            "email": "ada@example.com"
        }))
        .unwrap();
        assert_eq!(text.id, "p-42");
    }

    #[test]
    fn session_response_ignores_dashboard_fields() {
        let response: SessionResponse = serde_json::from_value(json!({
            "patient": {"id": 7, "name": "Grace", "email": "grace@example.com"},
            "appointments": [{"id": 1}],
            "unread_messages": 3
        }))
        .unwrap();
        assert_eq!(
            response.patient.map(|patient| patient.name),
            Some("Grace".to_string())
        );
    }

    #[test]
    fn session_response_without_patient_is_anonymous() {
        let missing: SessionResponse = serde_json::from_value(json!({})).unwrap();
        let null: SessionResponse = serde_json::from_value(json!({"patient": null})).unwrap();
        assert_eq!(missing, SessionResponse::anonymous());
        assert_eq!(null, SessionResponse::anonymous());
    }
}
