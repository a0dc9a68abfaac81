use dioxus::prelude::*;
use shared_types::{parse_tags, AppError, Profile, UpdateProfileRequest};
use shared_ui::components::{
    Badge, BadgeVariant, Button, Card, CardContent, CardHeader, CardTitle, Input, PageHeader,
    PageSubtitle, PageTitle, Spinner,
};
use shared_ui::{use_toast, ToastOptions};
use std::collections::HashMap;

use crate::format_helpers::non_empty;
use crate::guard::ProfileUnavailableCard;
use crate::session::use_session;

/// Edit the signed-in user's profile. Saving refreshes the provider so the
/// navbar picks up a new name.
#[component]
pub fn ProfileSettings() -> Element {
    let session = use_session();

    if let Some(profile) = session.profile() {
        return rsx! {
            ProfileForm { key: "{profile.id}", profile }
        };
    }
    match session.profile_error() {
        Some(error) => rsx! {
            ProfileUnavailableCard { error }
        },
        None => rsx! {
            Spinner { label: "Loading your profile...".to_string() }
        },
    }
}

#[component]
fn ProfileForm(profile: Profile) -> Element {
    let session = use_session();
    let toast = use_toast();
    let initial = profile.clone();
    let mut full_name = use_signal(|| initial.full_name.clone());
    let mut roll_no = use_signal(|| initial.roll_no.clone().unwrap_or_default());
    let mut branch = use_signal(|| initial.branch.clone().unwrap_or_default());
    let mut batch = use_signal(|| initial.batch.clone().unwrap_or_default());
    let mut skills = use_signal(|| initial.skills.join(", "));
    let mut linkedin = use_signal(|| initial.linkedin_url.clone().unwrap_or_default());
    let mut github = use_signal(|| initial.github_url.clone().unwrap_or_default());
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);

    let save = move |evt: FormEvent| async move {
        evt.prevent_default();
        saving.set(true);
        field_errors.set(HashMap::new());

        let body = UpdateProfileRequest {
            full_name: full_name().trim().to_string(),
            roll_no: non_empty(&roll_no()),
            branch: non_empty(&branch()),
            batch: non_empty(&batch()),
            skills: parse_tags(&skills()),
            linkedin_url: non_empty(&linkedin()),
            github_url: non_empty(&github()),
        };
        match server::api::update_profile(body).await {
            Ok(_) => {
                toast.success("Profile saved".to_string(), ToastOptions::new());
                session.refresh_profile();
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
    let role_label = profile.role.label();

    rsx! {
        div { class: "container narrow",
            PageHeader {
                div {
                    PageTitle { "Your profile" }
                    PageSubtitle { "{profile.email}" }
                }
                Badge { variant: BadgeVariant::Primary, "{role_label}" }
            }
            Card {
                CardHeader {
                    CardTitle { "Details" }
                }
                CardContent {
                    form { class: "stack-form", onsubmit: save,
                        Input {
                            label: "Full name",
                            value: full_name(),
                            error: field_error("full_name"),
                            on_input: move |e: FormEvent| full_name.set(e.value()),
                        }
                        div { class: "form-row",
                            Input {
                                label: "Roll number",
                                value: roll_no(),
                                on_input: move |e: FormEvent| roll_no.set(e.value()),
                            }
                            Input {
                                label: "Branch",
                                value: branch(),
                                on_input: move |e: FormEvent| branch.set(e.value()),
                            }
                            Input {
                                label: "Batch",
                                value: batch(),
                                on_input: move |e: FormEvent| batch.set(e.value()),
                            }
                        }
                        Input {
                            label: "Skills",
                            placeholder: "rust, sql, system design",
                            value: skills(),
                            on_input: move |e: FormEvent| skills.set(e.value()),
                        }
                        div { class: "form-row",
                            Input {
                                label: "LinkedIn",
                                input_type: "url",
                                value: linkedin(),
                                error: field_error("linkedin_url"),
                                on_input: move |e: FormEvent| linkedin.set(e.value()),
                            }
                            Input {
                                label: "GitHub",
                                input_type: "url",
                                value: github(),
                                error: field_error("github_url"),
                                on_input: move |e: FormEvent| github.set(e.value()),
                            }
                        }
                        Button {
                            submit: true,
                            busy: saving(),
                            busy_label: "Saving...".to_string(),
                            "Save changes"
                        }
                    }
                }
            }
        }
    }
}
