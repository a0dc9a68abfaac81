use chrono::Utc;
use dioxus::prelude::*;
use shared_types::{AppError, Application, ApplyRequest, Internship};
use shared_ui::components::{
    Badge, BadgeVariant, Button, ButtonVariant, Card, CardContent, CardDescription, CardHeader,
    CardTitle, Input, PageActions, PageHeader, PageSubtitle, PageTitle, Skeleton, Textarea,
};
use shared_ui::{use_toast, ToastOptions};
use std::collections::HashMap;
use uuid::Uuid;

use crate::components::status::application_badge;
use crate::format_helpers::{format_date, format_snake_case_title, non_empty};
use crate::routes::Route;
use crate::session::use_session;

#[component]
pub fn InternshipDetail(id: Uuid) -> Element {
    let session = use_session();
    let data = use_resource(move || async move {
        server::api::get_internship(id)
            .await
            .map_err(|e| session.report_error(&e))
    });

    rsx! {
        div { class: "container narrow",
            Link { class: "back-link", to: Route::InternshipList {}, "← All internships" }
            match &*data.read() {
                None => rsx! {
                    Skeleton { style: "height: 3rem" }
                    Skeleton { style: "height: 16rem" }
                },
                Some(Err(message)) => rsx! {
                    div { class: "page-error", "{message}" }
                },
                Some(Ok(internship)) => rsx! {
                    InternshipBody { internship: internship.clone() }
                },
            }
        }
    }
}

#[component]
fn InternshipBody(internship: Internship) -> Element {
    let session = use_session();
    let toast = use_toast();
    let id = internship.id;
    let mut saved = use_signal(|| false);

    use_resource(move || async move {
        if let Ok(ids) = server::api::bookmarked_ids().await {
            saved.set(ids.contains(&id));
        }
    });

    let toggle = move |_| {
        spawn(async move {
            match server::api::toggle_bookmark(id).await {
                Ok(result) => {
                    saved.set(result.bookmarked);
                    let (title, body) = result.toast_text();
                    toast.success(format!("{title} {body}"), ToastOptions::new());
                }
                Err(e) => {
                    toast.error(session.report_error(&e), ToastOptions::new());
                }
            }
        });
    };

    let now = Utc::now();
    let accepting = internship.is_accepting(now);
    let deadline = format_date(internship.deadline);
    let deadline_hint = internship.deadline_label(now);
    let mode = format_snake_case_title(&internship.mode);
    let kind = format_snake_case_title(&internship.internship_type);

    rsx! {
        PageHeader {
            div {
                PageTitle { "{internship.title}" }
                PageSubtitle { "{internship.company} · {internship.location}" }
            }
            PageActions {
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: toggle,
                    if saved() { "Remove bookmark" } else { "Bookmark" }
                }
            }
        }

        Card {
            CardContent {
                div { class: "internship-meta",
                    Badge { variant: BadgeVariant::Outline, "{mode}" }
                    Badge { variant: BadgeVariant::Outline, "{kind}" }
                    if let Some(stipend) = internship.stipend.clone() {
                        Badge { variant: BadgeVariant::Secondary, "{stipend}" }
                    }
                }
                dl { class: "detail-list",
                    dt { "Deadline" }
                    dd { "{deadline} ({deadline_hint})" }
                    if let Some(eligibility) = internship.eligibility.clone() {
                        dt { "Eligibility" }
                        dd { "{eligibility}" }
                    }
                }
                p { class: "detail-description", "{internship.description}" }
                div { class: "internship-tags",
                    for tag in internship.tags.iter() {
                        span { class: "tag", "#{tag}" }
                    }
                }
            }
        }

        ApplicationPanel { internship_id: id, accepting }
    }
}

/// Existing application status, or the apply form while the internship is
/// still accepting.
#[component]
fn ApplicationPanel(internship_id: Uuid, accepting: bool) -> Element {
    let session = use_session();
    let mut existing = use_signal(|| Option::<Application>::None);

    let lookup = use_resource(move || async move {
        match server::api::my_application(internship_id).await {
            Ok(found) => {
                existing.set(found);
                Ok(())
            }
            Err(e) => Err(session.report_error(&e)),
        }
    });

    match (&*lookup.read(), existing()) {
        (None, _) => rsx! {
            Skeleton { style: "height: 8rem" }
        },
        (Some(Err(message)), _) => rsx! {
            div { class: "page-error", "{message}" }
        },
        (Some(Ok(())), Some(application)) => {
            let label = application.status.label();
            let applied = format_date(application.applied_at);
            rsx! {
                Card {
                    CardHeader {
                        CardTitle { "Your application" }
                        CardDescription { "Submitted {applied}" }
                    }
                    CardContent {
                        Badge { variant: application_badge(application.status), "{label}" }
                        p { class: "muted",
                            "Track every application from "
                            Link { to: Route::MyApplications {}, "My applications" }
                            "."
                        }
                    }
                }
            }
        }
        (Some(Ok(())), None) if !accepting => rsx! {
            Card {
                CardContent {
                    p { class: "muted", "Applications for this internship are closed." }
                }
            }
        },
        (Some(Ok(())), None) => rsx! {
            ApplyForm {
                internship_id,
                on_applied: move |application: Application| existing.set(Some(application)),
            }
        },
    }
}

#[component]
fn ApplyForm(internship_id: Uuid, on_applied: EventHandler<Application>) -> Element {
    let session = use_session();
    let toast = use_toast();
    let mut cover_letter = use_signal(String::new);
    let mut resume_url = use_signal(String::new);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut submitting = use_signal(|| false);

    let submit = move |evt: FormEvent| async move {
        evt.prevent_default();
        submitting.set(true);
        field_errors.set(HashMap::new());

        let body = ApplyRequest {
            cover_letter: non_empty(&cover_letter()),
            resume_url: non_empty(&resume_url()),
        };
        match server::api::apply(internship_id, body).await {
            Ok(application) => {
                toast.success("Application submitted".to_string(), ToastOptions::new());
                on_applied.call(application);
            }
            Err(e) => {
                let raw = e.to_string();
                let fields = AppError::parse_field_errors(&raw);
                if fields.is_empty() {
                    toast.error(session.report_error(&e), ToastOptions::new());
                } else {
                    field_errors.set(fields);
                }
            }
        }
        submitting.set(false);
    };

    let field_error = move |name: &str| field_errors.read().get(name).cloned();

    rsx! {
        Card {
            CardHeader {
                CardTitle { "Apply" }
                CardDescription { "Both fields are optional. The placement cell sees your profile either way." }
            }
            CardContent {
                form { class: "stack-form", onsubmit: submit,
                    Textarea {
                        label: "Cover letter",
                        rows: 6,
                        value: cover_letter(),
                        error: field_error("cover_letter"),
                        on_input: move |e: FormEvent| cover_letter.set(e.value()),
                    }
                    Input {
                        label: "Resume link",
                        input_type: "url",
                        placeholder: "https://drive.example.com/resume.pdf",
                        value: resume_url(),
                        error: field_error("resume_url"),
                        on_input: move |e: FormEvent| resume_url.set(e.value()),
                    }
                    Button {
                        submit: true,
                        busy: submitting(),
                        busy_label: "Submitting...".to_string(),
                        "Submit application"
                    }
                }
            }
        }
    }
}
