//! Wire types for the MediTrack REST API.
//!
//! The backend serializes everything as camelCase JSON; `LocalDate` fields
//! travel as ISO `YYYY-MM-DD` strings and stay strings on this side so they
//! round-trip through `<input type="date">` unchanged.

use serde::{Deserialize, Serialize};

/// Current user, as returned by `/user/profile` and inside the login payload.
///
/// The login payload predates `emailVerified`/`createdAt`, so both default
/// when absent; the session store re-fetches the profile to fill them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// `/auth/login` response: token pair plus the user it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub refresh_token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest<'a> {
    pub refresh_token: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileUpdateRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest<'a> {
    pub current_password: &'a str,
    pub new_password: &'a str,
}

/// One medication record owned by the current user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub id: i64,
    pub drug_name: String,
    #[serde(default)]
    pub rxcui: Option<String>,
    pub dosage: String,
    pub frequency: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationCreate {
    pub drug_name: String,
    pub rxcui: Option<String>,
    pub dosage: String,
    pub frequency: String,
    pub start_date: Option<String>,
    pub instructions: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationUpdate {
    pub dosage: String,
    pub frequency: String,
    pub start_date: Option<String>,
    pub instructions: Option<String>,
}

/// One hit from the public drug search. Every field is optional because the
/// upstream label data is sparse and inconsistent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrugResult {
    #[serde(default)]
    pub brand_name: Option<String>,
    #[serde(default)]
    pub generic_name: Option<String>,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub indications: Option<String>,
    #[serde(default)]
    pub warnings: Option<String>,
    #[serde(default)]
    pub side_effects: Option<String>,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default)]
    pub route: Option<String>,
    #[serde(default)]
    pub rxcui: Option<String>,
}

impl DrugResult {
    /// Display name: brand name, falling back to generic, then a placeholder.
    pub fn primary_name(&self) -> &str {
        self.brand_name
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.generic_name.as_deref().filter(|s| !s.trim().is_empty()))
            .unwrap_or("Unknown drug")
    }

    /// Brand names as a list; the label data packs several into one string.
    pub fn brand_list(&self) -> Vec<String> {
        split_list(self.brand_name.as_deref().unwrap_or(""))
    }

    /// Key used to collapse duplicate hits: RXCUI when present, otherwise the
    /// lower-cased display name.
    pub fn dedup_key(&self) -> String {
        match self.rxcui.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(rxcui) => rxcui.to_string(),
            None => self.primary_name().to_lowercase(),
        }
    }
}

/// Split a free-text field on commas, semicolons and newlines, dropping
/// empty segments.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(|c| matches!(c, ',' | ';' | '\n'))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_deserializes_camel_case() {
        let json = r#"{
            "id": 7,
            "name": "Jane",
            "email": "jane@x.com",
            "emailVerified": true,
            "createdAt": "2024-05-01"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, 7);
        assert!(user.email_verified);
        assert_eq!(user.created_at.as_deref(), Some("2024-05-01"));
    }

    #[test]
    fn login_payload_user_defaults_missing_fields() {
        // The login payload carries a slimmer user object.
        let json = r#"{"id": 1, "name": "Jane", "email": "jane@x.com"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(!user.email_verified);
        assert!(user.created_at.is_none());
    }

    #[test]
    fn auth_response_reads_token_pair() {
        let json = r#"{
            "token": "acc",
            "refreshToken": "ref",
            "user": {"id": 1, "name": "Jane", "email": "jane@x.com"}
        }"#;
        let auth: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(auth.token, "acc");
        assert_eq!(auth.refresh_token, "ref");
        assert_eq!(auth.user.email, "jane@x.com");
    }

    #[test]
    fn medication_create_serializes_camel_case() {
        let create = MedicationCreate {
            drug_name: "Lipitor".into(),
            rxcui: Some("617312".into()),
            dosage: "10 mg".into(),
            frequency: "daily".into(),
            start_date: Some("2024-01-15".into()),
            instructions: None,
        };
        let json = serde_json::to_value(&create).unwrap();
        assert_eq!(json["drugName"], "Lipitor");
        assert_eq!(json["startDate"], "2024-01-15");
        assert!(json["instructions"].is_null());
    }

    #[test]
    fn primary_name_prefers_brand_then_generic() {
        let both = DrugResult {
            brand_name: Some("Lipitor".into()),
            generic_name: Some("atorvastatin".into()),
            ..Default::default()
        };
        assert_eq!(both.primary_name(), "Lipitor");

        let generic_only = DrugResult {
            generic_name: Some("atorvastatin".into()),
            ..Default::default()
        };
        assert_eq!(generic_only.primary_name(), "atorvastatin");

        let neither = DrugResult::default();
        assert_eq!(neither.primary_name(), "Unknown drug");
    }

    #[test]
    fn dedup_key_uses_rxcui_or_lowercased_name() {
        let with_rxcui = DrugResult {
            brand_name: Some("Lipitor".into()),
            rxcui: Some("617312".into()),
            ..Default::default()
        };
        assert_eq!(with_rxcui.dedup_key(), "617312");

        let without = DrugResult {
            brand_name: Some("Lipitor".into()),
            ..Default::default()
        };
        assert_eq!(without.dedup_key(), "lipitor");
    }

    #[test]
    fn split_list_handles_mixed_separators() {
        let items = split_list("Advil, Motrin;Nurofen\n ,");
        assert_eq!(items, vec!["Advil", "Motrin", "Nurofen"]);
        assert!(split_list("").is_empty());
    }
}
