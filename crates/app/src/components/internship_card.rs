use chrono::Utc;
use dioxus::prelude::*;
use shared_types::Internship;
use shared_ui::components::{
    Badge, BadgeVariant, Button, ButtonVariant, Card, CardContent, CardDescription, CardFooter,
    CardHeader, CardTitle,
};

use crate::format_helpers::format_snake_case_title;
use crate::routes::Route;

/// Listing card used on the internship list, bookmarks and the student
/// dashboard. The bookmark button only shows when `on_toggle_bookmark` is
/// given.
#[component]
pub fn InternshipCard(
    internship: Internship,
    #[props(default)] bookmarked: bool,
    #[props(default)] on_toggle_bookmark: Option<EventHandler<uuid::Uuid>>,
) -> Element {
    let now = Utc::now();
    let id = internship.id;
    let deadline = internship.deadline_label(now);
    let urgent = internship.days_until_deadline(now) <= 3;
    let mode = format_snake_case_title(&internship.mode);
    let kind = format_snake_case_title(&internship.internship_type);

    rsx! {
        Card { class: "internship-card",
            CardHeader {
                div { class: "internship-card-top",
                    CardTitle { "{internship.title}" }
                    if let Some(handler) = on_toggle_bookmark {
                        Button {
                            variant: ButtonVariant::Ghost,
                            class: if bookmarked { "bookmark-toggle on" } else { "bookmark-toggle" },
                            onclick: move |_| handler.call(id),
                            if bookmarked { "Saved" } else { "Save" }
                        }
                    }
                }
                CardDescription { "{internship.company} · {internship.location}" }
            }
            CardContent {
                div { class: "internship-meta",
                    Badge { variant: BadgeVariant::Outline, "{mode}" }
                    Badge { variant: BadgeVariant::Outline, "{kind}" }
                    if let Some(stipend) = internship.stipend.clone() {
                        Badge { variant: BadgeVariant::Secondary, "{stipend}" }
                    }
                }
                div { class: "internship-tags",
                    for tag in internship.tags.iter() {
                        span { class: "tag", "#{tag}" }
                    }
                }
            }
            CardFooter {
                Badge {
                    variant: if urgent { BadgeVariant::Warning } else { BadgeVariant::Secondary },
                    "{deadline}"
                }
                Link { class: "card-link", to: Route::InternshipDetail { id }, "View details" }
            }
        }
    }
}
