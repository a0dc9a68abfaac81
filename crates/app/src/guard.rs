//! Route guard.
//!
//! [`ProtectedRoute`] asks the session provider for an [`AccessDecision`]
//! and either renders its children or does something else: a spinner while
//! the session restores, nothing while the profile is on its way, an error
//! card once the profile deadline has passed, or a redirect. Redirects run
//! in an effect keyed on the decision, so the guard re-evaluates on every
//! session change and never navigates during render.

use dioxus::prelude::*;
use shared_types::access::AccessDecision;
use shared_types::Role;
use shared_ui::components::{
    Button, ButtonVariant, Card, CardContent, CardDescription, CardFooter, CardHeader, CardTitle,
    Spinner,
};

use crate::routes::Route;
use crate::session::use_session;

/// Route a redirect decision points at.
pub fn redirect_route(decision: &AccessDecision) -> Option<Route> {
    match decision {
        AccessDecision::RedirectToLogin => Some(Route::Login {}),
        AccessDecision::RedirectToUnauthorized => Some(Route::Unauthorized {}),
        _ => None,
    }
}

/// Wraps a page. `allowed_roles` left out means any signed-in user.
#[component]
pub fn ProtectedRoute(
    #[props(default)] allowed_roles: Option<Vec<Role>>,
    children: Element,
) -> Element {
    let session = use_session();
    let decision = session.decide(allowed_roles.as_deref());

    use_effect(use_reactive!(|decision| {
        if let Some(target) = redirect_route(&decision) {
            tracing::debug!(?decision, %target, "guard redirect");
            navigator().replace(target);
        }
    }));

    match decision {
        AccessDecision::Render => children,
        AccessDecision::Loading => rsx! {
            Spinner { label: "Loading your session...".to_string() }
        },
        AccessDecision::ProfileUnavailable(error) => rsx! {
            ProfileUnavailableCard { error }
        },
        AccessDecision::PendingProfile
        | AccessDecision::RedirectToLogin
        | AccessDecision::RedirectToUnauthorized => rsx! {},
    }
}

/// Shown when the profile deadline has passed. Offers a retry and a way out.
#[component]
pub fn ProfileUnavailableCard(error: String) -> Element {
    let session = use_session();
    let mut signing_out = use_signal(|| false);

    rsx! {
        div { class: "guard-error",
            Card {
                CardHeader {
                    CardTitle { "We couldn't load your profile" }
                    CardDescription { "You are signed in, but your profile did not arrive in time." }
                }
                CardContent {
                    p { class: "guard-error-detail", "{error}" }
                }
                CardFooter {
                    Button {
                        variant: ButtonVariant::Primary,
                        onclick: move |_| session.refresh_profile(),
                        "Retry"
                    }
                    Button {
                        variant: ButtonVariant::Ghost,
                        busy: signing_out(),
                        onclick: move |_| {
                            signing_out.set(true);
                            spawn(async move {
                                session.sign_out().await;
                                navigator().push(Route::Home {});
                            });
                        },
                        "Sign out"
                    }
                }
            }
        }
    }
}

/// Layout for pages any signed-in user may open.
#[component]
pub fn SignedInArea() -> Element {
    rsx! {
        ProtectedRoute { Outlet::<Route> {} }
    }
}

#[component]
pub fn StudentArea() -> Element {
    rsx! {
        ProtectedRoute { allowed_roles: vec![Role::Student], Outlet::<Route> {} }
    }
}

#[component]
pub fn AlumniArea() -> Element {
    rsx! {
        ProtectedRoute { allowed_roles: vec![Role::Alumni], Outlet::<Route> {} }
    }
}

#[component]
pub fn AdminArea() -> Element {
    rsx! {
        ProtectedRoute { allowed_roles: vec![Role::Admin], Outlet::<Route> {} }
    }
}
