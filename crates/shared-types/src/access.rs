//! Route access decisions.
//!
//! [`decide`] maps the provider's state and a page's allowed roles to what
//! the guard should do. It performs no navigation itself; the guard
//! component issues the redirect.

use crate::session::{ProfileStatus, SessionState};
use crate::Role;

pub const LOGIN_PATH: &str = "/auth/login";
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

#[derive(Debug, Clone, PartialEq)]
pub enum AccessDecision {
    /// Session restore still running. Show a spinner, never redirect.
    Loading,
    Render,
    RedirectToLogin,
    RedirectToUnauthorized,
    /// Signed in but the profile has not arrived. Render nothing.
    PendingProfile,
    /// Signed in but the profile could not be loaded before the deadline.
    ProfileUnavailable(String),
}

impl AccessDecision {
    /// Target path when the decision is a redirect.
    pub fn redirect(&self) -> Option<&'static str> {
        match self {
            AccessDecision::RedirectToLogin => Some(LOGIN_PATH),
            AccessDecision::RedirectToUnauthorized => Some(UNAUTHORIZED_PATH),
            _ => None,
        }
    }

    pub fn renders_page(&self) -> bool {
        matches!(self, AccessDecision::Render)
    }
}

/// Decide access for a page. `allowed_roles == None` means any signed-in
/// user may see it.
pub fn decide(state: &SessionState, allowed_roles: Option<&[Role]>) -> AccessDecision {
    if state.is_loading() {
        return AccessDecision::Loading;
    }
    if state.session().is_none() {
        return AccessDecision::RedirectToLogin;
    }
    let Some(allowed) = allowed_roles else {
        return AccessDecision::Render;
    };
    match state.profile_status() {
        ProfileStatus::Loaded(profile) if allowed.contains(&profile.role) => AccessDecision::Render,
        ProfileStatus::Loaded(_) => AccessDecision::RedirectToUnauthorized,
        ProfileStatus::Unavailable(error) => AccessDecision::ProfileUnavailable(error.clone()),
        ProfileStatus::Pending | ProfileStatus::Absent => AccessDecision::PendingProfile,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionEvent;
    use crate::{Profile, Session, ALL_ROLES};
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn session() -> Session {
        Session {
            user_id: Uuid::from_u128(42),
            email: "someone@campus.edu".into(),
        }
    }

    fn profile(role: Role) -> Profile {
        Profile {
            id: Uuid::from_u128(42),
            email: "someone@campus.edu".into(),
            full_name: "Some One".into(),
            role,
            roll_no: None,
            branch: None,
            batch: None,
            skills: vec![],
            linkedin_url: None,
            github_url: None,
            is_alumni_verified: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn anonymous() -> SessionState {
        let mut state = SessionState::new(3);
        state.apply(SessionEvent::RestoreResolved {
            epoch: 0,
            session: None,
        });
        state
    }

    fn signed_in_pending() -> SessionState {
        let mut state = SessionState::new(3);
        state.apply(SessionEvent::SignedIn(session()));
        state
    }

    fn signed_in_as(role: Role) -> SessionState {
        let mut state = signed_in_pending();
        let epoch = state.epoch();
        state.apply(SessionEvent::ProfileLoaded {
            epoch,
            profile: profile(role),
        });
        state
    }

    #[test]
    fn student_on_alumni_page_goes_to_unauthorized() {
        let decision = decide(&signed_in_as(Role::Student), Some(&[Role::Alumni]));
        assert_eq!(decision, AccessDecision::RedirectToUnauthorized);
        assert_eq!(decision.redirect(), Some("/unauthorized"));
    }

    #[test]
    fn anonymous_on_student_page_goes_to_login() {
        let decision = decide(&anonymous(), Some(&[Role::Student]));
        assert_eq!(decision, AccessDecision::RedirectToLogin);
        assert_eq!(decision.redirect(), Some("/auth/login"));
    }

    #[test]
    fn pending_profile_on_admin_page_renders_blank() {
        let decision = decide(&signed_in_pending(), Some(&[Role::Admin]));
        assert_eq!(decision, AccessDecision::PendingProfile);
        assert_eq!(decision.redirect(), None);
        assert!(!decision.renders_page());
    }

    #[test]
    fn admin_without_restriction_renders() {
        assert_eq!(decide(&signed_in_as(Role::Admin), None), AccessDecision::Render);
    }

    #[test]
    fn never_redirects_while_loading() {
        let state = SessionState::new(3);
        let student_only: &[Role] = &[Role::Student];
        for allowed in [None, Some(student_only), Some(ALL_ROLES)] {
            let decision = decide(&state, allowed);
            assert_eq!(decision, AccessDecision::Loading);
            assert_eq!(decision.redirect(), None);
        }
    }

    #[test]
    fn restored_session_waiting_on_profile_is_still_loading() {
        let mut state = SessionState::new(3);
        state.apply(SessionEvent::RestoreResolved {
            epoch: 0,
            session: Some(session()),
        });
        assert_eq!(decide(&state, Some(&[Role::Alumni])), AccessDecision::Loading);
    }

    #[test]
    fn role_outside_any_restricted_set_never_renders() {
        for role in ALL_ROLES {
            let state = signed_in_as(*role);
            for allowed in ALL_ROLES {
                let decision = decide(&state, Some(std::slice::from_ref(allowed)));
                if role == allowed {
                    assert_eq!(decision, AccessDecision::Render);
                } else {
                    assert_eq!(decision, AccessDecision::RedirectToUnauthorized);
                }
            }
        }
    }

    #[test]
    fn anonymous_never_renders_any_page() {
        let state = anonymous();
        assert_eq!(decide(&state, None), AccessDecision::RedirectToLogin);
        assert_eq!(decide(&state, Some(ALL_ROLES)), AccessDecision::RedirectToLogin);
    }

    #[test]
    fn unrestricted_page_renders_before_profile_arrives() {
        assert_eq!(decide(&signed_in_pending(), None), AccessDecision::Render);
    }

    #[test]
    fn exhausted_profile_reports_unavailable() {
        let mut state = SessionState::new(1);
        state.apply(SessionEvent::SignedIn(session()));
        state.apply(SessionEvent::ProfileFailed {
            epoch: 1,
            error: "Profile not found".into(),
        });
        let decision = decide(&state, Some(&[Role::Student]));
        assert_eq!(
            decision,
            AccessDecision::ProfileUnavailable("Profile not found".into())
        );
        assert_eq!(decision.redirect(), None);
    }

    #[test]
    fn sign_out_sends_guarded_page_to_login() {
        let mut state = signed_in_as(Role::Alumni);
        state.apply(SessionEvent::SignedOut);
        assert_eq!(
            decide(&state, Some(&[Role::Alumni])),
            AccessDecision::RedirectToLogin
        );
    }

    #[test]
    fn expired_session_sends_every_page_to_login() {
        let mut state = SessionState::new(3);
        state.apply(SessionEvent::RestoreResolved {
            epoch: 0,
            session: Some(session()),
        });
        let epoch = state.epoch();
        state.apply(SessionEvent::SessionExpired { epoch });

        for allowed in [None, Some(ALL_ROLES)] {
            let decision = decide(&state, allowed);
            assert_eq!(decision, AccessDecision::RedirectToLogin);
            assert_eq!(decision.redirect(), Some("/auth/login"));
        }
    }

    #[test]
    fn expiry_after_profile_loaded_still_redirects() {
        let mut state = signed_in_as(Role::Student);
        let epoch = state.epoch();
        state.apply(SessionEvent::SessionExpired { epoch });
        assert_eq!(
            decide(&state, Some(&[Role::Student])),
            AccessDecision::RedirectToLogin
        );
    }
}
