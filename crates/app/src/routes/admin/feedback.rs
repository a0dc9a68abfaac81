use dioxus::prelude::*;
use shared_types::average_rating;
use shared_ui::components::{
    Card, CardContent, EmptyState, PageHeader, PageSubtitle, PageTitle, Skeleton,
};

use crate::format_helpers::format_datetime;
use crate::session::use_session;

fn stars(rating: i32) -> String {
    let filled = rating.clamp(0, 5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

#[component]
pub fn FeedbackList() -> Element {
    let session = use_session();
    let data = use_resource(move || async move {
        server::api::list_feedback()
            .await
            .map_err(|e| session.report_error(&e))
    });

    rsx! {
        div { class: "container narrow",
            match &*data.read() {
                None => rsx! {
                    PageHeader { PageTitle { "Feedback" } }
                    Skeleton { style: "height: 5rem" }
                },
                Some(Err(message)) => rsx! {
                    PageHeader { PageTitle { "Feedback" } }
                    div { class: "page-error", "{message}" }
                },
                Some(Ok(items)) => {
                    let summary = match average_rating(items) {
                        Some(avg) => format!("Average {avg:.1} / 5 from {} responses", items.len()),
                        None => "No responses yet".to_string(),
                    };
                    rsx! {
                        PageHeader {
                            div {
                                PageTitle { "Feedback" }
                                PageSubtitle { "{summary}" }
                            }
                        }
                        if items.is_empty() {
                            EmptyState { title: "No feedback yet" }
                        } else {
                            ul { class: "row-list",
                                for item in items.iter().cloned() {
                                    li { key: "{item.id}",
                                        Card {
                                            CardContent {
                                                div { class: "row-head",
                                                    span { class: "rating", {stars(item.rating)} }
                                                    span { class: "muted", {format_datetime(item.created_at)} }
                                                }
                                                if let Some(comment) = item.comment.clone() {
                                                    p { "{comment}" }
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
