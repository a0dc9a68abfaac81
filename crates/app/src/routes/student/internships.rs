use dioxus::prelude::*;
use shared_types::{filter_internships, Internship};
use shared_ui::components::{
    CardGrid, EmptyState, Input, PageHeader, PageSubtitle, PageTitle, SearchBar, Skeleton,
};
use shared_ui::{use_toast, ToastOptions};
use std::collections::HashSet;
use uuid::Uuid;

use crate::components::internship_card::InternshipCard;
use crate::session::use_session;

/// Open internships with a client-side search and bookmark toggles.
#[component]
pub fn InternshipList() -> Element {
    let session = use_session();
    let toast = use_toast();
    let mut query = use_signal(String::new);
    let mut bookmarked = use_signal(HashSet::<Uuid>::new);

    let listing = use_resource(move || async move {
        server::api::list_open_internships()
            .await
            .map_err(|e| session.report_error(&e))
    });

    use_resource(move || async move {
        match server::api::bookmarked_ids().await {
            Ok(ids) => bookmarked.set(ids.into_iter().collect()),
            Err(e) => tracing::warn!(error = %e, "could not load bookmarks"),
        }
    });

    let toggle = move |id: Uuid| {
        spawn(async move {
            match server::api::toggle_bookmark(id).await {
                Ok(result) => {
                    if result.bookmarked {
                        bookmarked.write().insert(id);
                    } else {
                        bookmarked.write().remove(&id);
                    }
                    let (title, body) = result.toast_text();
                    toast.success(format!("{title} {body}"), ToastOptions::new());
                }
                Err(e) => {
                    toast.error(session.report_error(&e), ToastOptions::new());
                }
            }
        });
    };

    rsx! {
        div { class: "container",
            PageHeader {
                div {
                    PageTitle { "Internships" }
                    PageSubtitle { "Openings that are still taking applications." }
                }
            }
            SearchBar {
                Input {
                    placeholder: "Search by title, company or tag",
                    value: query(),
                    on_input: move |e: FormEvent| query.set(e.value()),
                }
            }

            match &*listing.read() {
                None => rsx! {
                    CardGrid {
                        Skeleton { style: "height: 12rem" }
                        Skeleton { style: "height: 12rem" }
                        Skeleton { style: "height: 12rem" }
                    }
                },
                Some(Err(message)) => rsx! {
                    div { class: "page-error", "{message}" }
                },
                Some(Ok(items)) => {
                    let query = query();
                    let saved = bookmarked();
                    let visible: Vec<(Internship, bool)> = filter_internships(items, &query)
                        .into_iter()
                        .map(|i| (i.clone(), saved.contains(&i.id)))
                        .collect();
                    if visible.is_empty() {
                        let message = if items.is_empty() {
                            "Check back soon, the placement cell posts new roles every week."
                        } else {
                            "Try a different search term."
                        };
                        rsx! {
                            EmptyState {
                                title: "No internships found",
                                message: message.to_string(),
                            }
                        }
                    } else {
                        rsx! {
                            CardGrid {
                                for (internship, is_saved) in visible {
                                    InternshipCard {
                                        key: "{internship.id}",
                                        bookmarked: is_saved,
                                        internship,
                                        on_toggle_bookmark: toggle,
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
