//! Login page view with email/password form.

use dioxus::prelude::*;

use api::ApiError;
use ui::components::{Button, ButtonVariant};
use ui::{client_of, sign_in, sign_out, use_console, use_session};

use crate::Route;

/// Login page component. Opening it ends any existing session.
#[component]
pub fn Login() -> Element {
    let console = use_console();
    let session = use_session();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    use_effect(move || sign_out(console, session));

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        error.set(None);

        let e = email().trim().to_string();
        let p = password();
        if e.is_empty() || p.is_empty() {
            error.set(Some("Email and password are required".to_string()));
            return;
        }

        loading.set(true);
        let client = client_of(console);
        spawn(async move {
            match client.login(&e, &p).await {
                Ok(signed_in) => {
                    tracing::info!("signed in");
                    sign_in(session, signed_in);
                    nav.replace(Route::Dashboard {});
                }
                Err(ApiError::Rejected(reason)) => {
                    error.set(Some(reason));
                }
                Err(err) => {
                    tracing::error!("login failed: {err}");
                    error.set(Some("Login failed. Please try again.".to_string()));
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
                h1 { "Sign in to Streamline" }

                form {
                    onsubmit: handle_login,

                    if let Some(err) = error() {
                        p { class: "auth-error", "{err}" }
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
                        if loading() { "Signing in..." } else { "Sign in" }
                    }
                }

                p {
                    class: "auth-switch",
                    "No account yet? "
                    Link { to: Route::Register {}, "Register" }
                }
            }
        }
    }
}
