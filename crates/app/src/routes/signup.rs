use dioxus::prelude::*;
use shared_types::{AppError, Role, SignUpRequest};
use shared_ui::components::{
    Button, Card, CardContent, CardDescription, CardFooter, CardHeader, CardTitle, FormSelect,
    Input,
};
use std::collections::HashMap;

use crate::format_helpers::non_empty;
use crate::routes::{dashboard_route, Route};
use crate::session::use_session;

/// Account creation. Students and alumni pick their role here; admin
/// access is granted by the placement cell.
#[component]
pub fn Signup() -> Element {
    let session = use_session();
    let mut full_name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut role = use_signal(|| Role::Student);
    let mut roll_no = use_signal(String::new);
    let mut branch = use_signal(String::new);
    let mut batch = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut loading = use_signal(|| false);

    let current_role = session.role();
    use_effect(use_reactive!(|current_role| {
        if current_role.is_some() {
            navigator().replace(dashboard_route(current_role));
        }
    }));

    let handle_signup = move |evt: FormEvent| async move {
        evt.prevent_default();
        loading.set(true);
        error_msg.set(None);
        field_errors.set(HashMap::new());

        let request = SignUpRequest {
            email: email().trim().to_string(),
            password: password(),
            full_name: full_name().trim().to_string(),
            role: role(),
            roll_no: non_empty(&roll_no()),
            branch: non_empty(&branch()),
            batch: non_empty(&batch()),
        };

        if let Err(e) = session.sign_up(request).await {
            let raw = e.to_string();
            let fields = AppError::parse_field_errors(&raw);
            if fields.is_empty() {
                error_msg.set(Some(AppError::friendly_message(&raw)));
            } else {
                field_errors.set(fields);
            }
        }
        loading.set(false);
    };

    let field_error = move |name: &str| field_errors.read().get(name).cloned();
    let role_options: Vec<(&str, &str)> = shared_types::ALL_ROLES
        .iter()
        .filter(|r| r.self_selectable())
        .map(|r| (r.as_str(), r.label()))
        .collect();
    let batch_label = if role() == Role::Alumni { "Graduating batch" } else { "Batch" };

    rsx! {
        div { class: "auth-page",
            Card { class: "auth-card",
                CardHeader {
                    CardTitle { "Create your account" }
                    CardDescription { "Join as a student or as an alumnus" }
                }
                CardContent {
                    if let Some(err) = error_msg() {
                        div { class: "auth-error", role: "alert", "{err}" }
                    }
                    form { class: "auth-form", onsubmit: handle_signup,
                        Input {
                            label: "Full name",
                            required: true,
                            value: full_name(),
                            error: field_error("full_name"),
                            on_input: move |e: FormEvent| full_name.set(e.value()),
                        }
                        Input {
                            label: "Email",
                            input_type: "email",
                            required: true,
                            value: email(),
                            error: field_error("email"),
                            on_input: move |e: FormEvent| email.set(e.value()),
                        }
                        Input {
                            label: "Password",
                            input_type: "password",
                            placeholder: "At least 8 characters",
                            required: true,
                            value: password(),
                            error: field_error("password"),
                            on_input: move |e: FormEvent| password.set(e.value()),
                        }
                        FormSelect {
                            label: "I am a",
                            value: role().as_str().to_string(),
                            onchange: move |e: Event<FormData>| {
                                if let Ok(picked) = Role::parse(&e.value()) {
                                    role.set(picked);
                                }
                            },
                            for (value, text) in role_options {
                                option { value: value, "{text}" }
                            }
                        }
                        if role() == Role::Student {
                            div { class: "form-row",
                                Input {
                                    label: "Roll number",
                                    value: roll_no(),
                                    on_input: move |e: FormEvent| roll_no.set(e.value()),
                                }
                                Input {
                                    label: "Branch",
                                    placeholder: "CSE",
                                    value: branch(),
                                    on_input: move |e: FormEvent| branch.set(e.value()),
                                }
                            }
                        }
                        Input {
                            label: batch_label,
                            placeholder: "2026",
                            value: batch(),
                            on_input: move |e: FormEvent| batch.set(e.value()),
                        }
                        Button {
                            submit: true,
                            class: "auth-submit",
                            busy: loading(),
                            busy_label: "Creating account...".to_string(),
                            "Sign Up"
                        }
                    }
                }
                CardFooter {
                    p { class: "auth-link",
                        "Already registered? "
                        Link { to: Route::Login {}, "Sign in" }
                    }
                }
            }
        }
    }
}
