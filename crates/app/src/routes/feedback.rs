use dioxus::prelude::*;
use shared_types::FeedbackRequest;
use shared_ui::components::{
    Button, Card, CardContent, CardDescription, CardHeader, CardTitle, PageHeader, PageTitle,
    Textarea,
};
use shared_ui::{use_toast, ToastOptions};

use crate::format_helpers::non_empty;
use crate::session::use_session;

const RATINGS: [i32; 5] = [1, 2, 3, 4, 5];

/// Rating (1 to 5) plus an optional comment, open to every signed-in user.
#[component]
pub fn GiveFeedback() -> Element {
    let session = use_session();
    let toast = use_toast();
    let mut rating = use_signal(|| 0i32);
    let mut comment = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut sending = use_signal(|| false);

    let submit = move |evt: FormEvent| async move {
        evt.prevent_default();
        if rating() == 0 {
            error_msg.set(Some("Pick a rating first".to_string()));
            return;
        }
        sending.set(true);
        error_msg.set(None);

        let body = FeedbackRequest {
            rating: rating(),
            comment: non_empty(&comment()),
        };
        match server::api::submit_feedback(body).await {
            Ok(_) => {
                toast.success("Thanks for the feedback!".to_string(), ToastOptions::new());
                rating.set(0);
                comment.set(String::new());
            }
            Err(e) => error_msg.set(Some(session.report_error(&e))),
        }
        sending.set(false);
    };

    rsx! {
        div { class: "container narrow",
            PageHeader {
                PageTitle { "Feedback" }
            }
            Card {
                CardHeader {
                    CardTitle { "How is Campus Catalyst working for you?" }
                    CardDescription { "The placement cell reads every response." }
                }
                CardContent {
                    if let Some(err) = error_msg() {
                        div { class: "auth-error", role: "alert", "{err}" }
                    }
                    form { class: "stack-form", onsubmit: submit,
                        div { class: "rating-picker", role: "radiogroup",
                            for value in RATINGS {
                                button {
                                    r#type: "button",
                                    class: if value <= rating() { "rating-star active" } else { "rating-star" },
                                    "aria-label": "{value} stars",
                                    onclick: move |_| rating.set(value),
                                    "★"
                                }
                            }
                        }
                        Textarea {
                            label: "Comments (optional)",
                            placeholder: "What should we improve?",
                            value: comment(),
                            on_input: move |e: FormEvent| comment.set(e.value()),
                        }
                        Button {
                            submit: true,
                            busy: sending(),
                            busy_label: "Sending...".to_string(),
                            "Submit feedback"
                        }
                    }
                }
            }
        }
    }
}
