use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdBookOpen, LdBriefcase, LdFileText};
use dioxus_free_icons::Icon;
use shared_ui::components::{
    CardGrid, EmptyState, PageHeader, PageSubtitle, PageTitle, Skeleton, StatCard, StatGrid,
};

use crate::components::internship_card::InternshipCard;
use crate::routes::Route;
use crate::session::use_session;

#[component]
pub fn StudentDashboard() -> Element {
    let session = use_session();
    let greeting = session
        .profile()
        .map(|p| format!("Welcome back, {}!", p.first_name()))
        .unwrap_or_default();

    let data = use_resource(move || async move {
        server::api::student_dashboard()
            .await
            .map_err(|e| session.report_error(&e))
    });

    rsx! {
        div { class: "container",
            PageHeader {
                div {
                    PageTitle { "{greeting}" }
                    PageSubtitle { "Here is where your internship search stands." }
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
                    let applications = stats.applications.to_string();
                    let bookmarks = stats.bookmarks.to_string();
                    let upcoming = stats.upcoming_internships.to_string();
                    rsx! {
                        StatGrid {
                            StatCard {
                                label: "Applications",
                                value: applications,
                                icon: rsx! { Icon { icon: LdFileText, width: 18, height: 18 } },
                            }
                            StatCard {
                                label: "Bookmarks",
                                value: bookmarks,
                                icon: rsx! { Icon { icon: LdBookOpen, width: 18, height: 18 } },
                            }
                            StatCard {
                                label: "Open internships",
                                value: upcoming,
                                hint: "Deadline still ahead".to_string(),
                                icon: rsx! { Icon { icon: LdBriefcase, width: 18, height: 18 } },
                            }
                        }

                        div { class: "section-head",
                            h2 { "Recently posted" }
                            Link { class: "card-link", to: Route::InternshipList {}, "Browse all" }
                        }
                        if stats.recent_internships.is_empty() {
                            EmptyState {
                                title: "No openings yet",
                                message: "New internships will appear here as soon as they are posted.".to_string(),
                            }
                        } else {
                            CardGrid {
                                for internship in stats.recent_internships.iter().cloned() {
                                    InternshipCard { key: "{internship.id}", internship }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
