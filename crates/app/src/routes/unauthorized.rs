use dioxus::prelude::*;
use shared_ui::components::{Card, CardContent, CardDescription, CardHeader, CardTitle};

use crate::routes::{dashboard_route, Route};
use crate::session::use_session;

#[component]
pub fn Unauthorized() -> Element {
    let session = use_session();
    let role = session.role();

    rsx! {
        div { class: "status-page",
            Card {
                CardHeader {
                    CardTitle { "Access denied" }
                    CardDescription { "Your account does not have permission to view that page." }
                }
                CardContent {
                    div { class: "status-page-actions",
                        Link { class: "navbar-cta", to: Route::Home {}, "Return Home" }
                        if role.is_some() {
                            Link { class: "navbar-cta ghost", to: dashboard_route(role), "Go to your dashboard" }
                        }
                    }
                }
            }
        }
    }
}
