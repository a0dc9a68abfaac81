use dioxus::prelude::*;
use shared_types::AlumniPost;
use shared_ui::components::{
    Badge, BadgeVariant, Button, ButtonVariant, Card, CardContent, CardDescription, CardFooter,
    CardHeader, CardTitle, EmptyState, PageHeader, PageSubtitle, PageTitle, Skeleton,
};
use shared_ui::{use_toast, ToastOptions};
use uuid::Uuid;

use crate::format_helpers::format_date;
use crate::session::use_session;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Decision {
    Approve,
    Delete,
}

/// Alumni posts awaiting approval, oldest first.
#[component]
pub fn ReviewPosts() -> Element {
    let session = use_session();
    let toast = use_toast();
    let mut items = use_signal(Vec::<AlumniPost>::new);

    let loaded = use_resource(move || async move {
        match server::api::pending_posts().await {
            Ok(list) => {
                items.set(list);
                Ok(())
            }
            Err(e) => Err(session.report_error(&e)),
        }
    });

    let decide = move |(id, decision): (Uuid, Decision)| {
        spawn(async move {
            let outcome = match decision {
                Decision::Approve => server::api::approve_post(id)
                    .await
                    .map(|_| "Post approved"),
                Decision::Delete => server::api::delete_post(id).await.map(|_| "Post deleted"),
            };
            match outcome {
                Ok(message) => {
                    items.write().retain(|p| p.id != id);
                    toast.success(message.to_string(), ToastOptions::new());
                }
                Err(e) => {
                    toast.error(session.report_error(&e), ToastOptions::new());
                }
            }
        });
    };

    let pending = items.read().len();

    rsx! {
        div { class: "container narrow",
            PageHeader {
                div {
                    PageTitle { "Alumni posts" }
                    PageSubtitle { "{pending} waiting for review" }
                }
            }
            match &*loaded.read() {
                None => rsx! {
                    Skeleton { style: "height: 10rem" }
                },
                Some(Err(message)) => rsx! {
                    div { class: "page-error", "{message}" }
                },
                Some(Ok(())) if items.read().is_empty() => rsx! {
                    EmptyState {
                        title: "Nothing to review",
                        message: "New alumni posts will show up here.".to_string(),
                    }
                },
                Some(Ok(())) => rsx! {
                    for post in items.read().iter().cloned() {
                        PendingPost { key: "{post.id}", post, on_decide: decide }
                    }
                },
            }
        }
    }
}

#[component]
fn PendingPost(post: AlumniPost, on_decide: EventHandler<(Uuid, Decision)>) -> Element {
    let id = post.id;
    let posted = format_date(post.posted_at);
    let difficulty = post.difficulty_label();

    rsx! {
        Card { class: "review-post",
            CardHeader {
                CardTitle { "{post.company} · {post.job_role}" }
                CardDescription { "Submitted {posted}" }
            }
            CardContent {
                if let Some(difficulty) = difficulty {
                    Badge { variant: BadgeVariant::Outline, "{difficulty}" }
                }
                p { class: "post-content", "{post.content}" }
                if !post.rounds.is_empty() {
                    ol { class: "round-list",
                        for round in post.rounds.iter() {
                            li {
                                strong { "{round.name}" }
                                if !round.description.is_empty() {
                                    span { ": {round.description}" }
                                }
                            }
                        }
                    }
                }
                if !post.tips.is_empty() {
                    ul { class: "tip-list",
                        for tip in post.tips.iter() {
                            li { "{tip}" }
                        }
                    }
                }
            }
            CardFooter {
                Button {
                    onclick: move |_| on_decide.call((id, Decision::Approve)),
                    "Approve"
                }
                Button {
                    variant: ButtonVariant::Destructive,
                    onclick: move |_| on_decide.call((id, Decision::Delete)),
                    "Delete"
                }
            }
        }
    }
}
