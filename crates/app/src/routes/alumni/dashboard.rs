use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdClock, LdFileText, LdUserCheck};
use dioxus_free_icons::Icon;
use shared_ui::components::{
    Button, EmptyState, PageActions, PageHeader, PageSubtitle, PageTitle, Skeleton, StatCard,
    StatGrid,
};

use super::posts::PostRow;
use crate::routes::Route;
use crate::session::use_session;

#[component]
pub fn AlumniDashboard() -> Element {
    let session = use_session();
    let greeting = session
        .profile()
        .map(|p| format!("Welcome back, {}!", p.first_name()))
        .unwrap_or_default();

    let data = use_resource(move || async move {
        server::api::alumni_dashboard()
            .await
            .map_err(|e| session.report_error(&e))
    });

    rsx! {
        div { class: "container",
            PageHeader {
                div {
                    PageTitle { "{greeting}" }
                    PageSubtitle { "Your interview experiences help the next batch prepare." }
                }
                PageActions {
                    Button {
                        onclick: move |_| {
                            navigator().push(Route::NewPost {});
                        },
                        "Share an experience"
                    }
                }
            }

            match &*data.read() {
                None => rsx! {
                    StatGrid {
                        Skeleton { style: "height: 6rem" }
                        Skeleton { style: "height: 6rem" }
                        Skeleton { style: "height: 6rem" }
                    }
                },
                Some(Err(message)) => rsx! {
                    div { class: "page-error", "{message}" }
                },
                Some(Ok(stats)) => {
                    let total = stats.counts.total.to_string();
                    let approved = stats.counts.approved.to_string();
                    let pending = stats.counts.pending.to_string();
                    rsx! {
                        StatGrid {
                            StatCard {
                                label: "Posts",
                                value: total,
                                icon: rsx! { Icon { icon: LdFileText, width: 18, height: 18 } },
                            }
                            StatCard {
                                label: "Approved",
                                value: approved,
                                hint: "Visible to students".to_string(),
                                icon: rsx! { Icon { icon: LdUserCheck, width: 18, height: 18 } },
                            }
                            StatCard {
                                label: "Pending",
                                value: pending,
                                hint: "Waiting for the placement cell".to_string(),
                                icon: rsx! { Icon { icon: LdClock, width: 18, height: 18 } },
                            }
                        }

                        div { class: "section-head",
                            h2 { "Recent posts" }
                            Link { class: "card-link", to: Route::MyPosts {}, "View all" }
                        }
                        if stats.recent_posts.is_empty() {
                            EmptyState {
                                title: "No posts yet",
                                message: "Share your interview experience to get started.".to_string(),
                            }
                        } else {
                            ul { class: "row-list",
                                for post in stats.recent_posts.iter().cloned() {
                                    PostRow { key: "{post.id}", post }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
