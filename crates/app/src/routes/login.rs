use dioxus::prelude::*;
use shared_ui::components::{
    Button, Card, CardContent, CardDescription, CardFooter, CardHeader, CardTitle, Input,
};

use crate::routes::{dashboard_route, Route};
use crate::session::use_session;

/// Sign-in form. Once the profile for the new session arrives the page
/// moves on to that role's dashboard; an already signed-in visitor is sent
/// there straight away.
#[component]
pub fn Login() -> Element {
    let session = use_session();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let role = session.role();
    use_effect(use_reactive!(|role| {
        if role.is_some() {
            navigator().replace(dashboard_route(role));
        }
    }));

    let handle_login = move |evt: FormEvent| async move {
        evt.prevent_default();
        loading.set(true);
        error_msg.set(None);

        if let Err(message) = session.sign_in(email(), password()).await {
            error_msg.set(Some(message));
        }
        loading.set(false);
    };

    let waiting_for_profile = session.session().is_some() && role.is_none();

    rsx! {
        div { class: "auth-page",
            Card { class: "auth-card",
                CardHeader {
                    CardTitle { "Welcome back" }
                    CardDescription { "Sign in to continue to Campus Catalyst" }
                }
                CardContent {
                    if let Some(err) = error_msg() {
                        div { class: "auth-error", role: "alert", "{err}" }
                    }
                    form { class: "auth-form", onsubmit: handle_login,
                        Input {
                            label: "Email",
                            input_type: "email",
                            placeholder: "you@university.edu",
                            required: true,
                            value: email(),
                            on_input: move |e: FormEvent| email.set(e.value()),
                        }
                        Input {
                            label: "Password",
                            input_type: "password",
                            placeholder: "Enter your password",
                            required: true,
                            value: password(),
                            on_input: move |e: FormEvent| password.set(e.value()),
                        }
                        Button {
                            submit: true,
                            class: "auth-submit",
                            busy: loading() || waiting_for_profile,
                            busy_label: "Signing in...".to_string(),
                            "Sign In"
                        }
                    }
                }
                CardFooter {
                    p { class: "auth-link",
                        "New here? "
                        Link { to: Route::Signup {}, "Create an account" }
                    }
                }
            }
        }
    }
}
