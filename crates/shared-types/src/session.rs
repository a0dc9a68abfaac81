//! Session/profile state as a pure reducer.
//!
//! The app's provider owns one [`SessionState`] and is its only writer. It
//! feeds [`SessionEvent`]s in as auth and profile calls complete and runs
//! whatever [`SessionEffect`] comes back. Every result from an async call
//! carries the epoch it was started under; a result from an older epoch
//! belongs to a session that has since been replaced or cleared and is
//! dropped.

use uuid::Uuid;

use crate::{Profile, Role, Session};

/// What the auth layer currently says about the visitor.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionStatus {
    /// Startup: the backend has not answered whether a session exists yet.
    Restoring,
    Anonymous,
    Authenticated(Session),
}

/// Where the profile for the current session stands.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileStatus {
    /// No session, so no profile is expected.
    Absent,
    /// Fetch in flight or scheduled for retry.
    Pending,
    Loaded(Profile),
    /// Retries exhausted; carries the last error message.
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Startup restore finished. Errors count as `None`.
    RestoreResolved {
        epoch: u64,
        session: Option<Session>,
    },
    SignedIn(Session),
    SignedOut,
    /// The backend rejected the session's credentials (expired or revoked).
    /// Only honoured for the epoch the failing call was made under.
    SessionExpired {
        epoch: u64,
    },
    ProfileLoaded {
        epoch: u64,
        profile: Profile,
    },
    ProfileFailed {
        epoch: u64,
        error: String,
    },
    /// Re-fetch the profile for the current session (guard retry button,
    /// or after the profile was edited).
    ProfileRefreshRequested,
}

/// Work the provider must start after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEffect {
    FetchProfile { epoch: u64, user_id: Uuid },
    /// Fetch again after the configured retry delay.
    RetryProfile { epoch: u64, user_id: Uuid },
}

impl SessionEffect {
    pub fn epoch(&self) -> u64 {
        match self {
            SessionEffect::FetchProfile { epoch, .. } | SessionEffect::RetryProfile { epoch, .. } => {
                *epoch
            }
        }
    }

    pub fn user_id(&self) -> Uuid {
        match self {
            SessionEffect::FetchProfile { user_id, .. }
            | SessionEffect::RetryProfile { user_id, .. } => *user_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    status: SessionStatus,
    profile: ProfileStatus,
    epoch: u64,
    loading: bool,
    profile_attempts: u64,
    max_profile_attempts: u64,
    /// A fetch or retry for the current epoch has been handed out and its
    /// result has not come back yet.
    fetch_outstanding: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(1)
    }
}

impl SessionState {
    /// Startup state: restoring, loading, no profile.
    pub fn new(max_profile_attempts: u64) -> Self {
        Self {
            status: SessionStatus::Restoring,
            profile: ProfileStatus::Absent,
            epoch: 0,
            loading: true,
            profile_attempts: 0,
            max_profile_attempts: max_profile_attempts.max(1),
            fetch_outstanding: false,
        }
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn profile_status(&self) -> &ProfileStatus {
        &self.profile
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.status {
            SessionStatus::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    pub fn profile(&self) -> Option<&Profile> {
        match &self.profile {
            ProfileStatus::Loaded(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.profile().map(|p| p.role)
    }

    /// Last error once profile retries have run out.
    pub fn profile_error(&self) -> Option<&str> {
        match &self.profile {
            ProfileStatus::Unavailable(error) => Some(error),
            _ => None,
        }
    }

    /// True until startup restore resolves to anonymous, or until the first
    /// profile outcome for a restored session arrives.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Apply one event. Returns the follow-up work, if any.
    pub fn apply(&mut self, event: SessionEvent) -> Option<SessionEffect> {
        match event {
            SessionEvent::RestoreResolved { epoch, session } => {
                if epoch != self.epoch || self.status != SessionStatus::Restoring {
                    return None;
                }
                match session {
                    Some(session) => self.establish(session),
                    None => {
                        self.status = SessionStatus::Anonymous;
                        self.profile = ProfileStatus::Absent;
                        self.loading = false;
                        None
                    }
                }
            }
            SessionEvent::SignedIn(session) => {
                let effect = self.establish(session);
                // A sign-in that beats the startup restore ends startup.
                self.loading = false;
                effect
            }
            SessionEvent::SignedOut => {
                self.clear();
                None
            }
            SessionEvent::SessionExpired { epoch } => {
                self.current_user_id(epoch)?;
                self.clear();
                None
            }
            SessionEvent::ProfileLoaded { epoch, profile } => {
                let user_id = self.current_user_id(epoch)?;
                self.fetch_outstanding = false;
                if profile.id != user_id {
                    return self.profile_failed(user_id, "Profile does not match session".into());
                }
                self.profile = ProfileStatus::Loaded(profile);
                self.profile_attempts = 0;
                self.loading = false;
                None
            }
            SessionEvent::ProfileFailed { epoch, error } => {
                let user_id = self.current_user_id(epoch)?;
                self.fetch_outstanding = false;
                self.profile_failed(user_id, error)
            }
            SessionEvent::ProfileRefreshRequested => {
                let user_id = self.session()?.user_id;
                if self.fetch_outstanding {
                    // the fetch or retry already handed out will report back
                    return None;
                }
                self.profile_attempts = 0;
                if !matches!(self.profile, ProfileStatus::Loaded(_)) {
                    self.profile = ProfileStatus::Pending;
                }
                self.fetch_outstanding = true;
                Some(SessionEffect::FetchProfile {
                    epoch: self.epoch,
                    user_id,
                })
            }
        }
    }

    fn establish(&mut self, session: Session) -> Option<SessionEffect> {
        self.epoch += 1;
        let user_id = session.user_id;
        self.status = SessionStatus::Authenticated(session);
        self.profile = ProfileStatus::Pending;
        self.profile_attempts = 0;
        self.fetch_outstanding = true;
        Some(SessionEffect::FetchProfile {
            epoch: self.epoch,
            user_id,
        })
    }

    /// Back to anonymous. Bumping the epoch orphans any fetch still running.
    fn clear(&mut self) {
        self.epoch += 1;
        self.status = SessionStatus::Anonymous;
        self.profile = ProfileStatus::Absent;
        self.profile_attempts = 0;
        self.fetch_outstanding = false;
        self.loading = false;
    }

    /// User id of the live session when `epoch` is current.
    fn current_user_id(&self, epoch: u64) -> Option<Uuid> {
        if epoch != self.epoch {
            return None;
        }
        self.session().map(|s| s.user_id)
    }

    fn profile_failed(&mut self, user_id: Uuid, error: String) -> Option<SessionEffect> {
        self.loading = false;
        if matches!(self.profile, ProfileStatus::Loaded(_)) {
            // A failed refresh keeps the profile we already have.
            return None;
        }
        self.profile_attempts += 1;
        if self.profile_attempts >= self.max_profile_attempts {
            self.profile = ProfileStatus::Unavailable(error);
            return None;
        }
        self.profile = ProfileStatus::Pending;
        self.fetch_outstanding = true;
        Some(SessionEffect::RetryProfile {
            epoch: self.epoch,
            user_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn session(n: u128) -> Session {
        Session {
            user_id: Uuid::from_u128(n),
            email: format!("user{n}@campus.edu"),
        }
    }

    fn profile_for(s: &Session, role: Role) -> Profile {
        Profile {
            id: s.user_id,
            email: s.email.clone(),
            full_name: "Test User".into(),
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

    #[test]
    fn starts_restoring_and_loading() {
        let state = SessionState::new(3);
        assert_eq!(state.status(), &SessionStatus::Restoring);
        assert!(state.is_loading());
        assert!(state.session().is_none());
        assert!(state.profile().is_none());
    }

    #[test]
    fn restore_without_session_clears_loading() {
        let mut state = SessionState::new(3);
        let effect = state.apply(SessionEvent::RestoreResolved {
            epoch: 0,
            session: None,
        });
        assert_eq!(effect, None);
        assert_eq!(state.status(), &SessionStatus::Anonymous);
        assert!(!state.is_loading());
    }

    #[test]
    fn loading_stays_true_until_profile_step_resolves() {
        let mut state = SessionState::new(3);
        let s = session(1);
        let effect = state
            .apply(SessionEvent::RestoreResolved {
                epoch: 0,
                session: Some(s.clone()),
            })
            .unwrap();
        assert_eq!(
            effect,
            SessionEffect::FetchProfile {
                epoch: 1,
                user_id: s.user_id
            }
        );
        assert!(state.is_loading());
        assert_eq!(state.profile_status(), &ProfileStatus::Pending);

        state.apply(SessionEvent::ProfileLoaded {
            epoch: effect.epoch(),
            profile: profile_for(&s, Role::Student),
        });
        assert!(!state.is_loading());
        assert_eq!(state.role(), Some(Role::Student));
    }

    #[test]
    fn profile_failure_also_clears_loading() {
        let mut state = SessionState::new(3);
        let s = session(1);
        state.apply(SessionEvent::RestoreResolved {
            epoch: 0,
            session: Some(s.clone()),
        });
        let effect = state.apply(SessionEvent::ProfileFailed {
            epoch: 1,
            error: "network".into(),
        });
        assert!(!state.is_loading());
        assert_eq!(state.profile_status(), &ProfileStatus::Pending);
        assert_eq!(
            effect,
            Some(SessionEffect::RetryProfile {
                epoch: 1,
                user_id: s.user_id
            })
        );
    }

    #[test]
    fn stale_profile_result_is_ignored() {
        let mut state = SessionState::new(3);
        let first = session(1);
        let second = session(2);
        state.apply(SessionEvent::SignedIn(first.clone()));
        state.apply(SessionEvent::SignedIn(second.clone()));
        assert_eq!(state.epoch(), 2);

        let effect = state.apply(SessionEvent::ProfileLoaded {
            epoch: 1,
            profile: profile_for(&first, Role::Admin),
        });
        assert_eq!(effect, None);
        assert_eq!(state.profile_status(), &ProfileStatus::Pending);

        state.apply(SessionEvent::ProfileLoaded {
            epoch: 2,
            profile: profile_for(&second, Role::Alumni),
        });
        assert_eq!(state.role(), Some(Role::Alumni));
    }

    #[test]
    fn profile_arriving_after_sign_out_is_dropped() {
        let mut state = SessionState::new(3);
        let s = session(7);
        state.apply(SessionEvent::SignedIn(s.clone()));
        state.apply(SessionEvent::SignedOut);
        state.apply(SessionEvent::ProfileLoaded {
            epoch: 1,
            profile: profile_for(&s, Role::Student),
        });
        assert_eq!(state.status(), &SessionStatus::Anonymous);
        assert_eq!(state.profile_status(), &ProfileStatus::Absent);
    }

    #[test]
    fn late_restore_after_sign_in_is_ignored() {
        let mut state = SessionState::new(3);
        let signed_in = session(1);
        state.apply(SessionEvent::SignedIn(signed_in.clone()));
        assert!(!state.is_loading());
        let effect = state.apply(SessionEvent::RestoreResolved {
            epoch: 0,
            session: None,
        });
        assert_eq!(effect, None);
        assert_eq!(state.session(), Some(&signed_in));
    }

    #[test]
    fn mismatched_profile_counts_as_failure() {
        let mut state = SessionState::new(3);
        let s = session(1);
        state.apply(SessionEvent::SignedIn(s));
        let other = session(9);
        let effect = state.apply(SessionEvent::ProfileLoaded {
            epoch: 1,
            profile: profile_for(&other, Role::Admin),
        });
        assert!(matches!(effect, Some(SessionEffect::RetryProfile { .. })));
        assert_eq!(state.role(), None);
    }

    #[test]
    fn retries_exhaust_into_unavailable() {
        let mut state = SessionState::new(2);
        state.apply(SessionEvent::SignedIn(session(1)));
        let first = state.apply(SessionEvent::ProfileFailed {
            epoch: 1,
            error: "row missing".into(),
        });
        assert!(matches!(first, Some(SessionEffect::RetryProfile { .. })));
        let second = state.apply(SessionEvent::ProfileFailed {
            epoch: 1,
            error: "row missing".into(),
        });
        assert_eq!(second, None);
        assert_eq!(
            state.profile_status(),
            &ProfileStatus::Unavailable("row missing".into())
        );
    }

    #[test]
    fn refresh_after_unavailable_goes_back_to_pending() {
        let mut state = SessionState::new(1);
        let s = session(1);
        state.apply(SessionEvent::SignedIn(s.clone()));
        state.apply(SessionEvent::ProfileFailed {
            epoch: 1,
            error: "timeout".into(),
        });
        assert!(matches!(state.profile_status(), ProfileStatus::Unavailable(_)));

        let effect = state.apply(SessionEvent::ProfileRefreshRequested);
        assert_eq!(
            effect,
            Some(SessionEffect::FetchProfile {
                epoch: 1,
                user_id: s.user_id
            })
        );
        assert_eq!(state.profile_status(), &ProfileStatus::Pending);
    }

    #[test]
    fn failed_refresh_keeps_loaded_profile() {
        let mut state = SessionState::new(3);
        let s = session(1);
        state.apply(SessionEvent::SignedIn(s.clone()));
        state.apply(SessionEvent::ProfileLoaded {
            epoch: 1,
            profile: profile_for(&s, Role::Alumni),
        });
        assert!(state.apply(SessionEvent::ProfileRefreshRequested).is_some());
        let effect = state.apply(SessionEvent::ProfileFailed {
            epoch: 1,
            error: "offline".into(),
        });
        assert_eq!(effect, None);
        assert_eq!(state.role(), Some(Role::Alumni));
    }

    #[test]
    fn refresh_without_session_does_nothing() {
        let mut state = SessionState::new(3);
        state.apply(SessionEvent::RestoreResolved {
            epoch: 0,
            session: None,
        });
        assert_eq!(state.apply(SessionEvent::ProfileRefreshRequested), None);
    }

    #[test]
    fn refresh_while_first_fetch_in_flight_is_deduplicated() {
        let mut state = SessionState::new(3);
        state.apply(SessionEvent::SignedIn(session(1)));
        assert_eq!(state.apply(SessionEvent::ProfileRefreshRequested), None);
    }

    #[test]
    fn refresh_while_retry_is_scheduled_is_deduplicated() {
        let mut state = SessionState::new(2);
        let s = session(1);
        state.apply(SessionEvent::SignedIn(s.clone()));
        let retry = state.apply(SessionEvent::ProfileFailed {
            epoch: 1,
            error: "timeout".into(),
        });
        assert_eq!(
            retry,
            Some(SessionEffect::RetryProfile {
                epoch: 1,
                user_id: s.user_id
            })
        );

        assert_eq!(state.apply(SessionEvent::ProfileRefreshRequested), None);

        // The refresh did not reset the attempt count.
        let last = state.apply(SessionEvent::ProfileFailed {
            epoch: 1,
            error: "timeout".into(),
        });
        assert_eq!(last, None);
        assert_eq!(
            state.profile_status(),
            &ProfileStatus::Unavailable("timeout".into())
        );
    }

    #[test]
    fn refresh_is_accepted_again_once_the_fetch_reports_back() {
        let mut state = SessionState::new(3);
        let s = session(1);
        state.apply(SessionEvent::SignedIn(s.clone()));
        assert_eq!(state.apply(SessionEvent::ProfileRefreshRequested), None);
        state.apply(SessionEvent::ProfileLoaded {
            epoch: 1,
            profile: profile_for(&s, Role::Student),
        });
        assert_eq!(
            state.apply(SessionEvent::ProfileRefreshRequested),
            Some(SessionEffect::FetchProfile {
                epoch: 1,
                user_id: s.user_id
            })
        );
        assert_eq!(state.apply(SessionEvent::ProfileRefreshRequested), None);
    }

    #[test]
    fn expired_session_becomes_anonymous() {
        let mut state = SessionState::new(3);
        let s = session(1);
        state.apply(SessionEvent::RestoreResolved {
            epoch: 0,
            session: Some(s),
        });
        let effect = state.apply(SessionEvent::SessionExpired { epoch: 1 });
        assert_eq!(effect, None);
        assert_eq!(state.status(), &SessionStatus::Anonymous);
        assert_eq!(state.profile_status(), &ProfileStatus::Absent);
        assert!(!state.is_loading());
        assert_eq!(state.epoch(), 2);

        // The fetch started before expiry reports back late.
        let late = state.apply(SessionEvent::ProfileFailed {
            epoch: 1,
            error: "Authentication required".into(),
        });
        assert_eq!(late, None);
        assert_eq!(state.profile_status(), &ProfileStatus::Absent);
    }

    #[test]
    fn expiry_from_a_replaced_session_is_ignored() {
        let mut state = SessionState::new(3);
        state.apply(SessionEvent::SignedIn(session(1)));
        let current = session(2);
        state.apply(SessionEvent::SignedIn(current.clone()));

        assert_eq!(state.apply(SessionEvent::SessionExpired { epoch: 1 }), None);
        assert_eq!(state.session(), Some(&current));
        assert_eq!(state.epoch(), 2);
    }

    #[test]
    fn expiry_while_anonymous_does_nothing() {
        let mut state = SessionState::new(3);
        state.apply(SessionEvent::RestoreResolved {
            epoch: 0,
            session: None,
        });
        state.apply(SessionEvent::SessionExpired { epoch: 0 });
        assert_eq!(state.epoch(), 0);
        assert_eq!(state.status(), &SessionStatus::Anonymous);
    }

    #[test]
    fn profile_error_only_set_once_unavailable() {
        let mut state = SessionState::new(2);
        let s = session(1);
        state.apply(SessionEvent::SignedIn(s.clone()));
        state.apply(SessionEvent::ProfileFailed {
            epoch: 1,
            error: "Profile not found".into(),
        });
        assert_eq!(state.profile_error(), None);
        state.apply(SessionEvent::ProfileFailed {
            epoch: 1,
            error: "Profile not found".into(),
        });
        assert_eq!(state.profile_error(), Some("Profile not found"));

        state.apply(SessionEvent::ProfileRefreshRequested);
        state.apply(SessionEvent::ProfileLoaded {
            epoch: 1,
            profile: profile_for(&s, Role::Student),
        });
        assert_eq!(state.profile_error(), None);
    }
}
