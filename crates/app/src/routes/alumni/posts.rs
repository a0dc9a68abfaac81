use dioxus::prelude::*;
use shared_types::AlumniPost;
use shared_ui::components::{
    Badge, Button, Card, CardContent, EmptyState, PageActions, PageHeader, PageTitle, Skeleton,
};

use crate::components::status::approval_badge;
use crate::format_helpers::format_date;
use crate::routes::Route;
use crate::session::use_session;

#[component]
pub fn MyPosts() -> Element {
    let session = use_session();
    let data = use_resource(move || async move {
        server::api::my_posts()
            .await
            .map_err(|e| session.report_error(&e))
    });

    rsx! {
        div { class: "container narrow",
            PageHeader {
                PageTitle { "My posts" }
                PageActions {
                    Button {
                        onclick: move |_| {
                            navigator().push(Route::NewPost {});
                        },
                        "New post"
                    }
                }
            }
            match &*data.read() {
                None => rsx! {
                    Skeleton { style: "height: 5rem" }
                    Skeleton { style: "height: 5rem" }
                },
                Some(Err(message)) => rsx! {
                    div { class: "page-error", "{message}" }
                },
                Some(Ok(posts)) if posts.is_empty() => rsx! {
                    EmptyState {
                        title: "No posts yet",
                        message: "Share your interview experience to get started.".to_string(),
                    }
                },
                Some(Ok(posts)) => rsx! {
                    ul { class: "row-list",
                        for post in posts.iter().cloned() {
                            PostRow { key: "{post.id}", post }
                        }
                    }
                },
            }
        }
    }
}

/// One post in the alumni's own listings, with its approval state.
#[component]
pub(super) fn PostRow(post: AlumniPost) -> Element {
    let approval = post.approval_label();
    let posted = format_date(post.posted_at);
    let difficulty = post.difficulty_label();

    rsx! {
        li {
            Card {
                CardContent {
                    div { class: "row-head",
                        strong { "{post.company} · {post.job_role}" }
                        Badge { variant: approval_badge(post.approved), "{approval}" }
                    }
                    p { class: "muted",
                        "Posted {posted}"
                        if let Some(difficulty) = difficulty {
                            " · {difficulty}"
                        }
                    }
                    Link { class: "card-link", to: Route::EditPost { id: post.id }, "Edit" }
                }
            }
        }
    }
}
