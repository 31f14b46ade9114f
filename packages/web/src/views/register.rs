//! Registration page view.

use dioxus::prelude::*;

use api::ApiError;
use store::models::RegisterRequest;
use store::Severity;
use ui::components::{Button, ButtonVariant};
use ui::{client_of, sign_out, use_console, use_notifier, use_session};

use crate::Route;

/// Register page component. Success sends the user to the login page.
#[component]
pub fn Register() -> Element {
    let console = use_console();
    let session = use_session();
    let notifier = use_notifier();
    let nav = use_navigator();
    let mut first_name = use_signal(String::new);
    let mut last_name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    use_effect(move || sign_out(console, session));

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        error.set(None);

        let request = RegisterRequest {
            first_name: first_name().trim().to_string(),
            last_name: last_name().trim().to_string(),
            email: email().trim().to_string(),
            password: password(),
        };
        if request.first_name.is_empty() || request.last_name.is_empty() {
            error.set(Some("First and last name are required".to_string()));
            return;
        }
        if request.email.is_empty() || !request.email.contains('@') {
            error.set(Some("Please enter a valid email".to_string()));
            return;
        }
        if request.password.is_empty() {
            error.set(Some("Password is required".to_string()));
            return;
        }

        loading.set(true);
        let client = client_of(console);
        spawn(async move {
            match client.register(&request).await {
                Ok(()) => {
                    notifier.push("Registration successful! Please sign in.", Severity::Success);
                    nav.push(Route::Login {});
                }
                Err(ApiError::Rejected(reason)) => error.set(Some(reason)),
                Err(e) => {
                    tracing::error!("registration failed: {e}");
                    error.set(Some("Registration failed. Please try again.".to_string()));
                }
            }
            loading.set(false);
        });
    };

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                h1 { "Create Account" }

                form {
                    onsubmit: handle_register,

                    if let Some(err) = error() {
                        p { class: "auth-error", "{err}" }
                    }

                    input {
                        class: "input",
                        r#type: "text",
                        placeholder: "First name",
                        value: first_name(),
                        oninput: move |evt: FormEvent| first_name.set(evt.value()),
                    }

                    input {
                        class: "input",
                        r#type: "text",
                        placeholder: "Last name",
                        value: last_name(),
                        oninput: move |evt: FormEvent| last_name.set(evt.value()),
                    }

                    input {
                        class: "input",
                        r#type: "email",
                        placeholder: "Email",
                        value: email(),
                        oninput: move |evt: FormEvent| email.set(evt.value()),
                    }

                    input {
                        class: "input",
                        r#type: "password",
                        placeholder: "Password",
                        value: password(),
                        oninput: move |evt: FormEvent| password.set(evt.value()),
                    }

                    Button {
                        variant: ButtonVariant::Primary,
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "Creating account..." } else { "Sign up" }
                    }
                }

                p {
                    class: "auth-switch",
                    "Already have an account? "
                    Link { to: Route::Login {}, "Sign in" }
                }
            }
        }
    }
}
