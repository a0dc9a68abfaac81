use dioxus::prelude::*;
use shared_types::{parse_tips, AlumniPost, AppError, InterviewRound, PostRequest};
use shared_ui::components::{
    Button, ButtonVariant, Card, CardContent, FormSelect, Input, PageHeader, PageSubtitle,
    PageTitle, Skeleton, Textarea,
};
use shared_ui::{use_toast, ToastOptions};
use std::collections::HashMap;
use uuid::Uuid;

use crate::routes::Route;
use crate::session::use_session;

#[component]
pub fn NewPost() -> Element {
    rsx! {
        div { class: "container narrow",
            PageHeader {
                div {
                    PageTitle { "Share an interview experience" }
                    PageSubtitle { "Posts go live once the placement cell approves them." }
                }
            }
            PostForm { existing: None }
        }
    }
}

#[component]
pub fn EditPost(id: Uuid) -> Element {
    let session = use_session();
    let data = use_resource(move || async move {
        server::api::get_post(id)
            .await
            .map_err(|e| session.report_error(&e))
    });

    rsx! {
        div { class: "container narrow",
            PageHeader {
                div {
                    PageTitle { "Edit post" }
                    PageSubtitle { "Saving sends the post back for approval." }
                }
            }
            match &*data.read() {
                None => rsx! {
                    Skeleton { style: "height: 20rem" }
                },
                Some(Err(message)) => rsx! {
                    div { class: "page-error", "{message}" }
                },
                Some(Ok(post)) => rsx! {
                    PostForm { key: "{post.id}", existing: Some(post.clone()) }
                },
            }
        }
    }
}

fn difficulty_value(rating: Option<i32>) -> String {
    rating.map(|d| d.to_string()).unwrap_or_default()
}

/// Round name and description as editable rows; rows with a blank name are
/// dropped on submit.
fn collect_rounds(rows: &[(String, String)]) -> Vec<InterviewRound> {
    rows.iter()
        .filter(|(name, _)| !name.trim().is_empty())
        .map(|(name, description)| InterviewRound {
            name: name.trim().to_string(),
            description: description.trim().to_string(),
        })
        .collect()
}

#[component]
fn PostForm(existing: Option<AlumniPost>) -> Element {
    let session = use_session();
    let toast = use_toast();
    let editing = existing.as_ref().map(|p| p.id);
    let initial = existing.clone();

    let mut company = use_signal(|| initial.as_ref().map(|p| p.company.clone()).unwrap_or_default());
    let mut job_role =
        use_signal(|| initial.as_ref().map(|p| p.job_role.clone()).unwrap_or_default());
    let mut content = use_signal(|| initial.as_ref().map(|p| p.content.clone()).unwrap_or_default());
    let mut difficulty =
        use_signal(|| difficulty_value(initial.as_ref().and_then(|p| p.difficulty_rating)));
    let mut tips = use_signal(|| {
        initial
            .as_ref()
            .map(|p| p.tips.join("\n"))
            .unwrap_or_default()
    });
    let mut rounds = use_signal(|| {
        let mut rows: Vec<(String, String)> = initial
            .as_ref()
            .map(|p| {
                p.rounds
                    .iter()
                    .map(|r| (r.name.clone(), r.description.clone()))
                    .collect()
            })
            .unwrap_or_default();
        if rows.is_empty() {
            rows.push((String::new(), String::new()));
        }
        rows
    });
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);

    let submit = move |evt: FormEvent| async move {
        evt.prevent_default();
        saving.set(true);
        field_errors.set(HashMap::new());

        let body = PostRequest {
            company: company().trim().to_string(),
            job_role: job_role().trim().to_string(),
            content: content().trim().to_string(),
            difficulty_rating: difficulty().parse().ok(),
            rounds: collect_rounds(&rounds.read()),
            tips: parse_tips(&tips()),
        };
        let result = match editing {
            Some(id) => server::api::update_post(id, body).await,
            None => server::api::create_post(body).await,
        };
        match result {
            Ok(_) => {
                toast.success(
                    "Post submitted for approval".to_string(),
                    ToastOptions::new(),
                );
                navigator().push(Route::MyPosts {});
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
    let round_count = rounds.read().len();

    rsx! {
        Card {
            CardContent {
                form { class: "stack-form", onsubmit: submit,
                    div { class: "form-row",
                        Input {
                            label: "Company",
                            value: company(),
                            error: field_error("company"),
                            on_input: move |e: FormEvent| company.set(e.value()),
                        }
                        Input {
                            label: "Role",
                            placeholder: "SDE Intern",
                            value: job_role(),
                            error: field_error("job_role"),
                            on_input: move |e: FormEvent| job_role.set(e.value()),
                        }
                    }
                    FormSelect {
                        label: "Difficulty",
                        value: difficulty(),
                        onchange: move |e: FormEvent| difficulty.set(e.value()),
                        option { value: "", "Not rated" }
                        option { value: "1", "1 (easy)" }
                        option { value: "2", "2" }
                        option { value: "3", "3" }
                        option { value: "4", "4" }
                        option { value: "5", "5 (hard)" }
                    }
                    Textarea {
                        label: "Your experience",
                        rows: 8,
                        value: content(),
                        error: field_error("content"),
                        on_input: move |e: FormEvent| content.set(e.value()),
                    }

                    fieldset { class: "rounds",
                        legend { "Interview rounds" }
                        for index in 0..round_count {
                            div { key: "{index}", class: "round-row",
                                Input {
                                    placeholder: "Round name",
                                    value: rounds.read()[index].0.clone(),
                                    on_input: move |e: FormEvent| {
                                        rounds.write()[index].0 = e.value();
                                    },
                                }
                                Input {
                                    placeholder: "What happened",
                                    value: rounds.read()[index].1.clone(),
                                    on_input: move |e: FormEvent| {
                                        rounds.write()[index].1 = e.value();
                                    },
                                }
                                Button {
                                    variant: ButtonVariant::Ghost,
                                    disabled: round_count == 1,
                                    onclick: move |_| {
                                        rounds.write().remove(index);
                                    },
                                    "Remove"
                                }
                            }
                        }
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| {
                                rounds.write().push((String::new(), String::new()));
                            },
                            "Add round"
                        }
                    }

                    Textarea {
                        label: "Tips (one per line)",
                        value: tips(),
                        on_input: move |e: FormEvent| tips.set(e.value()),
                    }
                    Button {
                        submit: true,
                        busy: saving(),
                        busy_label: "Saving...".to_string(),
                        if editing.is_some() { "Save changes" } else { "Submit post" }
                    }
                }
            }
        }
    }
}
