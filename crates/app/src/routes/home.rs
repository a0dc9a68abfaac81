use dioxus::prelude::*;
use shared_ui::components::{Card, CardDescription, CardHeader, CardTitle, Spinner};

use crate::routes::{dashboard_route, Route};
use crate::session::use_session;

/// Public landing page.
#[component]
pub fn Home() -> Element {
    let session = use_session();
    let profile = session.profile();

    if session.is_loading() {
        return rsx! { Spinner {} };
    }

    rsx! {
        section { class: "hero",
            h1 { class: "hero-title", "Your campus, your next opportunity" }
            p { class: "hero-subtitle",
                "Find internships posted by the placement cell, track your applications, and learn from alumni who have been through the interviews."
            }
            div { class: "hero-actions",
                match profile {
                    Some(profile) => rsx! {
                        Link { class: "navbar-cta", to: dashboard_route(Some(profile.role)),
                            "Continue as {profile.full_name}"
                        }
                    },
                    None => rsx! {
                        Link { class: "navbar-cta", to: Route::Signup {}, "Get started" }
                        Link { class: "navbar-cta ghost", to: Route::Login {}, "Sign in" }
                    },
                }
            }
        }
        section { class: "feature-grid",
            Card {
                CardHeader {
                    CardTitle { "Students" }
                    CardDescription { "Browse open internships, bookmark the interesting ones and apply with a cover letter." }
                }
            }
            Card {
                CardHeader {
                    CardTitle { "Alumni" }
                    CardDescription { "Share interview rounds and tips so the next batch walks in prepared." }
                }
            }
            Card {
                CardHeader {
                    CardTitle { "Placement cell" }
                    CardDescription { "Publish openings, review applications and approve alumni posts." }
                }
            }
        }
    }
}
