use dioxus::prelude::*;
use shared_types::Internship;
use shared_ui::components::{CardGrid, EmptyState, PageHeader, PageTitle, Skeleton};
use shared_ui::{use_toast, ToastOptions};
use uuid::Uuid;

use crate::components::internship_card::InternshipCard;
use crate::routes::Route;
use crate::session::use_session;

#[component]
pub fn Bookmarks() -> Element {
    let session = use_session();
    let toast = use_toast();
    let mut items = use_signal(Vec::<Internship>::new);

    let loaded = use_resource(move || async move {
        match server::api::bookmarked_internships().await {
            Ok(list) => {
                items.set(list);
                Ok(())
            }
            Err(e) => Err(session.report_error(&e)),
        }
    });

    // Toggling from this page can only remove.
    let remove = move |id: Uuid| {
        spawn(async move {
            match server::api::toggle_bookmark(id).await {
                Ok(result) => {
                    if !result.bookmarked {
                        items.write().retain(|i| i.id != id);
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
            PageHeader { PageTitle { "Bookmarks" } }
            match &*loaded.read() {
                None => rsx! {
                    CardGrid {
                        Skeleton { style: "height: 12rem" }
                        Skeleton { style: "height: 12rem" }
                    }
                },
                Some(Err(message)) => rsx! {
                    div { class: "page-error", "{message}" }
                },
                Some(Ok(())) if items.read().is_empty() => rsx! {
                    EmptyState {
                        title: "No bookmarks yet",
                        message: "Save internships from the listing to compare them later.".to_string(),
                        Link { class: "card-link", to: Route::InternshipList {}, "Browse internships" }
                    }
                },
                Some(Ok(())) => rsx! {
                    CardGrid {
                        for internship in items.read().iter().cloned() {
                            InternshipCard {
                                key: "{internship.id}",
                                internship,
                                bookmarked: true,
                                on_toggle_bookmark: remove,
                            }
                        }
                    }
                },
            }
        }
    }
}
