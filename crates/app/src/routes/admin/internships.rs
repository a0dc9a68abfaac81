use chrono::Utc;
use dioxus::prelude::*;
use shared_types::{parse_tags, AppError, CreateInternshipRequest, Internship, InternshipStatus};
use shared_ui::components::{
    Badge, BadgeVariant, Button, ButtonVariant, Card, CardContent, EmptyState, FormSelect, Input,
    PageActions, PageHeader, PageSubtitle, PageTitle, Skeleton, Textarea,
};
use shared_ui::{use_toast, ToastOptions};
use std::collections::HashMap;
use uuid::Uuid;

use crate::format_helpers::{date_input_value, format_date, non_empty, parse_date_input};
use crate::routes::Route;
use crate::session::use_session;

fn status_badge(status: InternshipStatus) -> BadgeVariant {
    match status {
        InternshipStatus::Open => BadgeVariant::Success,
        InternshipStatus::Closed => BadgeVariant::Secondary,
        InternshipStatus::Draft => BadgeVariant::Outline,
    }
}

/// Every internship regardless of status, with a close action on open ones.
#[component]
pub fn ManageInternships() -> Element {
    let session = use_session();
    let toast = use_toast();
    let mut items = use_signal(Vec::<Internship>::new);

    let loaded = use_resource(move || async move {
        match server::api::list_all_internships().await {
            Ok(list) => {
                items.set(list);
                Ok(())
            }
            Err(e) => Err(session.report_error(&e)),
        }
    });

    let close = move |id: Uuid| {
        spawn(async move {
            match server::api::close_internship(id).await {
                Ok(updated) => {
                    if let Some(row) = items.write().iter_mut().find(|i| i.id == id) {
                        *row = updated;
                    }
                    toast.success("Internship closed".to_string(), ToastOptions::new());
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
                PageTitle { "Internships" }
                PageActions {
                    Button {
                        onclick: move |_| {
                            navigator().push(Route::NewInternship {});
                        },
                        "Post internship"
                    }
                }
            }
            match &*loaded.read() {
                None => rsx! {
                    Skeleton { style: "height: 4rem" }
                    Skeleton { style: "height: 4rem" }
                },
                Some(Err(message)) => rsx! {
                    div { class: "page-error", "{message}" }
                },
                Some(Ok(())) if items.read().is_empty() => rsx! {
                    EmptyState {
                        title: "No internships posted",
                        message: "Post the first opening for this season.".to_string(),
                    }
                },
                Some(Ok(())) => rsx! {
                    table { class: "data-table",
                        thead {
                            tr {
                                th { "Title" }
                                th { "Company" }
                                th { "Deadline" }
                                th { "Status" }
                                th {}
                            }
                        }
                        tbody {
                            for internship in items.read().iter().cloned() {
                                InternshipRow { key: "{internship.id}", internship, on_close: close }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn InternshipRow(internship: Internship, on_close: EventHandler<Uuid>) -> Element {
    let id = internship.id;
    let deadline = format_date(internship.deadline);
    let status = internship.status.as_str();

    rsx! {
        tr {
            td { "{internship.title}" }
            td { "{internship.company}" }
            td { "{deadline}" }
            td {
                Badge { variant: status_badge(internship.status), "{status}" }
            }
            td {
                if internship.status == InternshipStatus::Open {
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| on_close.call(id),
                        "Close"
                    }
                }
            }
        }
    }
}

#[component]
pub fn NewInternship() -> Element {
    let session = use_session();
    let toast = use_toast();
    let mut title = use_signal(String::new);
    let mut company = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut location = use_signal(String::new);
    let mut mode = use_signal(|| "remote".to_string());
    let mut internship_type = use_signal(|| "summer".to_string());
    let mut stipend = use_signal(String::new);
    let mut eligibility = use_signal(String::new);
    let mut tags = use_signal(String::new);
    let mut deadline = use_signal(|| date_input_value(Utc::now() + chrono::Duration::days(14)));
    let mut draft = use_signal(|| false);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);

    let submit = move |evt: FormEvent| async move {
        evt.prevent_default();
        field_errors.set(HashMap::new());

        let Some(deadline_at) = parse_date_input(&deadline()) else {
            let mut errors = HashMap::new();
            errors.insert("deadline".to_string(), "Pick a valid deadline".to_string());
            field_errors.set(errors);
            return;
        };
        saving.set(true);

        let body = CreateInternshipRequest {
            title: title().trim().to_string(),
            company: company().trim().to_string(),
            description: description().trim().to_string(),
            location: location().trim().to_string(),
            mode: mode(),
            internship_type: internship_type(),
            stipend: non_empty(&stipend()),
            eligibility: non_empty(&eligibility()),
            tags: parse_tags(&tags()),
            deadline: deadline_at,
            status: draft().then_some(InternshipStatus::Draft),
        };
        match server::api::create_internship(body).await {
            Ok(_) => {
                toast.success("Internship posted".to_string(), ToastOptions::new());
                navigator().push(Route::ManageInternships {});
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
        saving.set(false);
    };

    let field_error = move |name: &str| field_errors.read().get(name).cloned();

    rsx! {
        div { class: "container narrow",
            PageHeader {
                div {
                    PageTitle { "Post an internship" }
                    PageSubtitle { "Open postings notify every student." }
                }
            }
            Card {
                CardContent {
                    form { class: "stack-form", onsubmit: submit,
                        div { class: "form-row",
                            Input {
                                label: "Title",
                                value: title(),
                                error: field_error("title"),
                                on_input: move |e: FormEvent| title.set(e.value()),
                            }
                            Input {
                                label: "Company",
                                value: company(),
                                error: field_error("company"),
                                on_input: move |e: FormEvent| company.set(e.value()),
                            }
                        }
                        Textarea {
                            label: "Description",
                            rows: 6,
                            value: description(),
                            error: field_error("description"),
                            on_input: move |e: FormEvent| description.set(e.value()),
                        }
                        div { class: "form-row",
                            Input {
                                label: "Location",
                                value: location(),
                                error: field_error("location"),
                                on_input: move |e: FormEvent| location.set(e.value()),
                            }
                            FormSelect {
                                label: "Mode",
                                value: mode(),
                                onchange: move |e: FormEvent| mode.set(e.value()),
                                option { value: "remote", "Remote" }
                                option { value: "on_site", "On-site" }
                                option { value: "hybrid", "Hybrid" }
                            }
                            FormSelect {
                                label: "Type",
                                value: internship_type(),
                                onchange: move |e: FormEvent| internship_type.set(e.value()),
                                option { value: "summer", "Summer" }
                                option { value: "winter", "Winter" }
                                option { value: "full_time", "Full-time" }
                                option { value: "part_time", "Part-time" }
                            }
                        }
                        div { class: "form-row",
                            Input {
                                label: "Stipend",
                                placeholder: "₹25,000 / month",
                                value: stipend(),
                                on_input: move |e: FormEvent| stipend.set(e.value()),
                            }
                            Input {
                                label: "Deadline",
                                input_type: "date",
                                value: deadline(),
                                error: field_error("deadline"),
                                on_input: move |e: FormEvent| deadline.set(e.value()),
                            }
                        }
                        Input {
                            label: "Eligibility",
                            placeholder: "CSE and ECE, 2027 batch",
                            value: eligibility(),
                            on_input: move |e: FormEvent| eligibility.set(e.value()),
                        }
                        Input {
                            label: "Tags",
                            placeholder: "rust, backend, fintech",
                            value: tags(),
                            on_input: move |e: FormEvent| tags.set(e.value()),
                        }
                        label { class: "checkbox",
                            input {
                                r#type: "checkbox",
                                checked: draft(),
                                onchange: move |e: FormEvent| draft.set(e.checked()),
                            }
                            "Save as draft (students will not see it)"
                        }
                        Button {
                            submit: true,
                            busy: saving(),
                            busy_label: "Posting...".to_string(),
                            "Post internship"
                        }
                    }
                }
            }
        }
    }
}
