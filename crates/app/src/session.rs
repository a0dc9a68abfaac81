//! Session/profile provider.
//!
//! [`use_session_provider`] runs once in `App` and puts a [`SessionContext`]
//! into context; everything else reads it through [`use_session`]. The
//! context is the only writer of the [`SessionState`] reducer: auth calls and
//! profile fetches feed events in, and any effect the reducer hands back
//! (fetch or retry the profile) is started here.

use dioxus::prelude::*;
use shared_types::access::{decide, AccessDecision};
use shared_types::session::{SessionEffect, SessionEvent, SessionState};
use shared_types::{
    AppError, LoginRequest, Profile, Role, Session, SessionConfig, SignUpRequest,
};

#[derive(Clone, Copy, PartialEq)]
pub struct SessionContext {
    state: Signal<SessionState>,
    config: SessionConfig,
}

impl SessionContext {
    pub fn session(&self) -> Option<Session> {
        self.state.read().session().cloned()
    }

    pub fn profile(&self) -> Option<Profile> {
        self.state.read().profile().cloned()
    }

    pub fn role(&self) -> Option<Role> {
        self.state.read().role()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().is_loading()
    }

    pub fn profile_error(&self) -> Option<String> {
        self.state.read().profile_error().map(str::to_string)
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    /// Guard decision for a page with the given allowed roles.
    pub fn decide(&self, allowed_roles: Option<&[Role]>) -> AccessDecision {
        decide(&self.state.read(), allowed_roles)
    }

    /// Sign in and start loading the profile. Returns the friendly error
    /// message on failure.
    pub async fn sign_in(mut self, email: String, password: String) -> Result<Session, String> {
        let response = server::api::sign_in(LoginRequest { email, password })
            .await
            .map_err(|e| AppError::friendly_message(&e.to_string()))?;
        self.dispatch(SessionEvent::SignedIn(response.session.clone()));
        Ok(response.session)
    }

    /// Create the account, then behave like [`Self::sign_in`]. Field errors
    /// are returned raw so the form can show them per field.
    pub async fn sign_up(mut self, request: SignUpRequest) -> Result<Session, ServerFnError> {
        let response = server::api::sign_up(request).await?;
        self.dispatch(SessionEvent::SignedIn(response.session.clone()));
        Ok(response.session)
    }

    /// Revoke the session on the server, then clear local state. Local state
    /// is cleared even when the server call fails.
    pub async fn sign_out(mut self) {
        if let Err(e) = server::api::sign_out().await {
            tracing::warn!(error = %e, "sign-out request failed; clearing local session anyway");
        }
        self.dispatch(SessionEvent::SignedOut);
    }

    /// Fetch the profile again for the current session.
    pub fn refresh_profile(mut self) {
        self.dispatch(SessionEvent::ProfileRefreshRequested);
    }

    /// Message for a failed server call. A 401 means the session's tokens
    /// are gone, so the local session is dropped and the guard sends the
    /// visitor to the login page.
    pub fn report_error(self, error: &ServerFnError) -> String {
        let raw = error.to_string();
        self.expire_if_unauthorized(&raw);
        AppError::friendly_message(&raw)
    }

    /// Drop the local session when `raw` is a 401 from the server.
    pub fn expire_if_unauthorized(mut self, raw: &str) {
        if is_unauthenticated(raw) {
            let epoch = self.state.peek().epoch();
            tracing::info!("server rejected the session; signing out locally");
            self.dispatch(SessionEvent::SessionExpired { epoch });
        }
    }

    fn dispatch(&mut self, event: SessionEvent) {
        let effect = self.state.write().apply(event);
        if let Some(effect) = effect {
            self.run(effect);
        }
    }

    /// Start the profile fetch for `effect`. The task lives at the root so a
    /// page unmounting mid-fetch does not drop it; a result for an epoch
    /// that has moved on is ignored by the reducer.
    fn run(self, effect: SessionEffect) {
        let mut ctx = self;
        spawn_forever(async move {
            if let SessionEffect::RetryProfile { .. } = effect {
                crate::timer::sleep_ms(ctx.config.profile_retry_delay_ms()).await;
                if ctx.state.peek().epoch() != effect.epoch() {
                    return;
                }
            }
            let event = profile_event(effect.epoch(), server::api::get_profile(effect.user_id()).await);
            ctx.dispatch(event);
        });
    }

    fn restore(mut self) {
        let epoch = self.state.peek().epoch();
        spawn_forever(async move {
            let session = match server::api::get_session().await {
                Ok(session) => session,
                Err(e) => {
                    tracing::warn!(error = %e, "session restore failed; continuing signed out");
                    None
                }
            };
            self.dispatch(SessionEvent::RestoreResolved { epoch, session });
        });
    }
}

fn is_unauthenticated(raw: &str) -> bool {
    AppError::from_server_error(raw).is_some_and(|e| e.is_unauthenticated())
}

fn profile_event(epoch: u64, result: Result<Option<Profile>, ServerFnError>) -> SessionEvent {
    match result {
        Ok(Some(profile)) => SessionEvent::ProfileLoaded { epoch, profile },
        Ok(None) => SessionEvent::ProfileFailed {
            epoch,
            error: "Profile not found".to_string(),
        },
        Err(e) => {
            let raw = e.to_string();
            if is_unauthenticated(&raw) {
                SessionEvent::SessionExpired { epoch }
            } else {
                SessionEvent::ProfileFailed {
                    epoch,
                    error: AppError::friendly_message(&raw),
                }
            }
        }
    }
}

/// Create the provider. Call once, from the root component.
///
/// Restore only starts on the client. A server-rendered page goes out in
/// the loading state and the client picks up from there after hydrating.
pub fn use_session_provider(config: SessionConfig) -> SessionContext {
    let ctx = use_context_provider(|| SessionContext {
        state: Signal::new(SessionState::new(config.max_profile_attempts())),
        config,
    });

    use_hook(|| {
        #[cfg(not(feature = "server"))]
        ctx.restore();
    });

    ctx
}

pub fn use_session() -> SessionContext {
    use_context::<SessionContext>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_profile_row_becomes_failure() {
        assert_eq!(
            profile_event(3, Ok(None)),
            SessionEvent::ProfileFailed {
                epoch: 3,
                error: "Profile not found".to_string()
            }
        );
    }

    #[test]
    fn transport_error_gets_generic_message() {
        assert_eq!(
            profile_event(7, Err(ServerFnError::new("connection refused"))),
            SessionEvent::ProfileFailed {
                epoch: 7,
                error: "Something went wrong. Please try again.".to_string()
            }
        );
    }

    #[test]
    fn rejected_credentials_expire_the_session() {
        let error = ServerFnError::new(
            r#"{"kind":"Unauthorized","message":"Authentication required"}"#,
        );
        assert_eq!(profile_event(5, Err(error)), SessionEvent::SessionExpired { epoch: 5 });
    }

    #[test]
    fn only_unauthorized_counts_as_expiry() {
        assert!(is_unauthenticated(
            r#"error running server function: {"kind":"Unauthorized","message":"Authentication required"} (details: None)"#
        ));
        assert!(!is_unauthenticated(
            r#"{"kind":"Forbidden","message":"Admins only"}"#
        ));
        assert!(!is_unauthenticated("connection refused"));
    }
}
