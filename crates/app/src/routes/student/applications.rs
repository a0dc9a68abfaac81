use dioxus::prelude::*;
use shared_types::count_active;
use shared_ui::components::{
    Badge, Card, CardContent, EmptyState, PageHeader, PageSubtitle, PageTitle, Skeleton,
};

use crate::components::status::application_badge;
use crate::format_helpers::format_date;
use crate::routes::Route;
use crate::session::use_session;

#[component]
pub fn MyApplications() -> Element {
    let session = use_session();
    let data = use_resource(move || async move {
        server::api::my_applications()
            .await
            .map_err(|e| session.report_error(&e))
    });

    rsx! {
        div { class: "container narrow",
            match &*data.read() {
                None => rsx! {
                    PageHeader { PageTitle { "My applications" } }
                    Skeleton { style: "height: 5rem" }
                    Skeleton { style: "height: 5rem" }
                },
                Some(Err(message)) => rsx! {
                    PageHeader { PageTitle { "My applications" } }
                    div { class: "page-error", "{message}" }
                },
                Some(Ok(items)) => {
                    let active = count_active(items);
                    let total = items.len();
                    rsx! {
                        PageHeader {
                            div {
                                PageTitle { "My applications" }
                                PageSubtitle { "{active} of {total} still awaiting a decision" }
                            }
                        }
                        if items.is_empty() {
                            EmptyState {
                                title: "No applications yet",
                                message: "Find an opening you like and apply from its page.".to_string(),
                                Link { class: "card-link", to: Route::InternshipList {}, "Browse internships" }
                            }
                        } else {
                            ul { class: "row-list",
                                for item in items.iter().cloned() {
                                    li { key: "{item.id}",
                                        Card {
                                            CardContent {
                                                div { class: "row-head",
                                                    Link {
                                                        to: Route::InternshipDetail { id: item.internship_id },
                                                        "{item.internship_title}"
                                                    }
                                                    Badge {
                                                        variant: application_badge(item.status),
                                                        {item.status.label()}
                                                    }
                                                }
                                                p { class: "muted",
                                                    {format!("{} · applied {}", item.company, format_date(item.applied_at))}
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
