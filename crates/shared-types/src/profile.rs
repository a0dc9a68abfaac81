use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Role;

// ---------------------------------------------------------------------------
// Session & Profile
// ---------------------------------------------------------------------------

/// Proof of authentication: who the auth layer says is signed in.
///
/// Carries no role. The role lives on the [`Profile`], which is fetched
/// separately once the session is confirmed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
}

/// Application record keyed by the account id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    #[cfg_attr(feature = "server", sqlx(try_from = "String"))]
    pub role: Role,
    pub roll_no: Option<String>,
    pub branch: Option<String>,
    pub batch: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    #[serde(default)]
    pub is_alumni_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// First name for greetings ("Welcome back, Ada!").
    pub fn first_name(&self) -> &str {
        self.full_name
            .split_whitespace()
            .next()
            .unwrap_or(self.full_name.as_str())
    }
}

// ---------------------------------------------------------------------------
// Request/Response DTOs
// ---------------------------------------------------------------------------

/// Login request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct LoginRequest {
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Valid email is required"))
    )]
    pub email: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Password is required"))
    )]
    pub password: String,
}

/// Sign-up request. Creates the account and its profile together.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct SignUpRequest {
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Valid email is required"))
    )]
    pub email: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 8, message = "Password must be at least 8 characters"))
    )]
    pub password: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Full name is required"))
    )]
    pub full_name: String,
    pub role: Role,
    #[serde(default)]
    pub roll_no: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub batch: Option<String>,
}

/// Editable profile fields. Role and email are not editable here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct UpdateProfileRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Full name is required"))
    )]
    pub full_name: String,
    #[serde(default)]
    pub roll_no: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub batch: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[cfg_attr(feature = "validation", validate(url(message = "Must be a valid URL")))]
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[cfg_attr(feature = "validation", validate(url(message = "Must be a valid URL")))]
    #[serde(default)]
    pub github_url: Option<String>,
}

/// Returned by REST login / sign-up.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AuthResponse {
    pub session: Session,
    pub access_token: String,
}

/// Plain acknowledgement body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile(role: Role) -> Profile {
        Profile {
            id: Uuid::nil(),
            email: "ada@campus.edu".into(),
            full_name: "Ada Lovelace".into(),
            role,
            roll_no: Some("CS-042".into()),
            branch: Some("CSE".into()),
            batch: Some("2026".into()),
            skills: vec!["rust".into()],
            linkedin_url: None,
            github_url: None,
            is_alumni_verified: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn first_name_takes_leading_word() {
        assert_eq!(sample_profile(Role::Student).first_name(), "Ada");
    }

    #[test]
    fn first_name_of_single_word_name() {
        let mut p = sample_profile(Role::Alumni);
        p.full_name = "Grace".into();
        assert_eq!(p.first_name(), "Grace");
    }

    #[test]
    fn profile_deserializes_with_missing_optional_collections() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000000",
            "email": "a@b.edu",
            "full_name": "A B",
            "role": "alumni",
            "roll_no": null,
            "branch": null,
            "batch": null,
            "linkedin_url": null,
            "github_url": null,
            "created_at": "2026-01-01T00:00:00Z",
            "updated_at": "2026-01-01T00:00:00Z"
        }"#;
        let p: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(p.role, Role::Alumni);
        assert!(p.skills.is_empty());
        assert!(!p.is_alumni_verified);
    }

    #[test]
    fn sign_up_request_rejects_unknown_role() {
        let json = r#"{"email":"a@b.edu","password":"12345678","full_name":"A","role":"dean"}"#;
        assert!(serde_json::from_str::<SignUpRequest>(json).is_err());
    }
}
