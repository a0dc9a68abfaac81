use serde::{Deserialize, Serialize};
use std::fmt;

/// Campus role carried on every profile.
///
/// Students browse and apply for internships. Alumni publish interview
/// experience posts. Admins manage internships, applications and post
/// approval.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Role {
    #[default]
    Student,
    Alumni,
    Admin,
}

/// All roles in display order.
pub const ALL_ROLES: &[Role] = &[Role::Student, Role::Alumni, Role::Admin];

/// Returned when a stored role string is outside the fixed role set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError(pub String);

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role '{}'", self.0)
    }
}

impl std::error::Error for ParseRoleError {}

impl Role {
    /// Parse a role string (case-insensitive).
    pub fn parse(s: &str) -> Result<Self, ParseRoleError> {
        match s.trim().to_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "alumni" => Ok(Role::Alumni),
            "admin" => Ok(Role::Admin),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }

    /// Lowercase string for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Alumni => "alumni",
            Role::Admin => "admin",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Alumni => "Alumni",
            Role::Admin => "Admin",
        }
    }

    /// Landing page for this role after sign-in.
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::Student => "/student/dashboard",
            Role::Alumni => "/alumni/dashboard",
            Role::Admin => "/admin/dashboard",
        }
    }

    /// Roles a visitor may pick on the sign-up form. Admin is granted out of band.
    pub fn self_selectable(&self) -> bool {
        !matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Role {
    type Error = ParseRoleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Role::parse(&value)
    }
}

/// Dashboard link for an optional role; visitors without a profile go home.
pub fn dashboard_path_for(role: Option<Role>) -> &'static str {
    role.map(|r| r.dashboard_path()).unwrap_or("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_roles_case_insensitive() {
        assert_eq!(Role::parse("student"), Ok(Role::Student));
        assert_eq!(Role::parse("Alumni"), Ok(Role::Alumni));
        assert_eq!(Role::parse(" ADMIN "), Ok(Role::Admin));
    }

    #[test]
    fn parse_unknown_role_is_an_error() {
        assert_eq!(Role::parse("judge"), Err(ParseRoleError("judge".into())));
        assert!(Role::parse("").is_err());
    }

    #[test]
    fn as_str_parses_back() {
        for role in ALL_ROLES {
            assert_eq!(Role::parse(role.as_str()), Ok(*role));
        }
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Role::Alumni).unwrap(), r#""alumni""#);
        let role: Role = serde_json::from_str(r#""admin""#).unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn dashboard_links_follow_role() {
        assert_eq!(dashboard_path_for(Some(Role::Student)), "/student/dashboard");
        assert_eq!(dashboard_path_for(Some(Role::Alumni)), "/alumni/dashboard");
        assert_eq!(dashboard_path_for(Some(Role::Admin)), "/admin/dashboard");
        assert_eq!(dashboard_path_for(None), "/");
    }

    #[test]
    fn admin_is_not_self_selectable() {
        assert!(Role::Student.self_selectable());
        assert!(Role::Alumni.self_selectable());
        assert!(!Role::Admin.self_selectable());
    }
}
