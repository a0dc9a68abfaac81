use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdBriefcase, LdClock, LdFileText, LdUsers};
use dioxus_free_icons::Icon;
use shared_ui::components::{
    Card, CardContent, CardDescription, CardGrid, CardHeader, CardTitle, PageHeader,
    PageSubtitle, PageTitle, Skeleton, StatCard, StatGrid,
};

use crate::routes::Route;
use crate::session::use_session;

#[component]
pub fn AdminDashboard() -> Element {
    let session = use_session();
    let data = use_resource(move || async move {
        server::api::admin_dashboard()
            .await
            .map_err(|e| session.report_error(&e))
    });

    rsx! {
        div { class: "container",
            PageHeader {
                div {
                    PageTitle { "Placement cell" }
                    PageSubtitle { "Openings, applications and alumni posts at a glance." }
                }
            }

            match &*data.read() {
                None => rsx! {
                    StatGrid {
                        Skeleton { style: "height: 6rem" }
                        Skeleton { style: "height: 6rem" }
                        Skeleton { style: "height: 6rem" }
                        Skeleton { style: "height: 6rem" }
                    }
                },
                Some(Err(message)) => rsx! {
                    div { class: "page-error", "{message}" }
                },
                Some(Ok(stats)) => {
                    let internships = stats.internships.to_string();
                    let applications = stats.applications.to_string();
                    let pending = stats.pending_posts.to_string();
                    let users = stats.users.to_string();
                    rsx! {
                        StatGrid {
                            StatCard {
                                label: "Internships",
                                value: internships,
                                icon: rsx! { Icon { icon: LdBriefcase, width: 18, height: 18 } },
                            }
                            StatCard {
                                label: "Applications",
                                value: applications,
                                icon: rsx! { Icon { icon: LdFileText, width: 18, height: 18 } },
                            }
                            StatCard {
                                label: "Posts to review",
                                value: pending,
                                icon: rsx! { Icon { icon: LdClock, width: 18, height: 18 } },
                            }
                            StatCard {
                                label: "Users",
                                value: users,
                                icon: rsx! { Icon { icon: LdUsers, width: 18, height: 18 } },
                            }
                        }
                    }
                }
            }

            CardGrid {
                QuickLink {
                    title: "Post an internship",
                    description: "Publish a new opening and notify every student.",
                    to: Route::NewInternship {},
                }
                QuickLink {
                    title: "Review applications",
                    description: "Move applicants through review and record outcomes.",
                    to: Route::ReviewApplications {},
                }
                QuickLink {
                    title: "Approve alumni posts",
                    description: "Interview experiences stay hidden until approved.",
                    to: Route::ReviewPosts {},
                }
            }
        }
    }
}

#[component]
fn QuickLink(title: String, description: String, to: Route) -> Element {
    rsx! {
        Link { class: "quick-link", to: to,
            Card {
                CardHeader {
                    CardTitle { "{title}" }
                    CardDescription { "{description}" }
                }
                CardContent {}
            }
        }
    }
}
