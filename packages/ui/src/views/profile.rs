use dioxus::prelude::*;

use api::actions::save_profile;
use store::draft::{form_key, value_text};
use store::entity::PROFILE_FIELDS;
use store::{Draft, Record};

use crate::components::{Button, FieldInput};
use crate::console::{client_of, use_console};
use crate::notification::use_notifier;
use crate::session::use_session;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// The signed-in user's profile. Only changed fields are sent.
#[component]
pub fn ProfileView() -> Element {
    let console = use_console();
    let notifier = use_notifier();
    let session = use_session();

    let mut profile = use_resource(move || async move {
        let client = client_of(console);
        match client.profile().await {
            Ok(record) => Some(record),
            Err(e) => {
                let policy = console.peek().config.error_policy("profile");
                notifier.fetch_failed(policy, "profile", &e);
                None
            }
        }
    });

    let Some(Some(record)) = profile.read().clone() else {
        return rsx! {
            document::Link { rel: "stylesheet", href: VIEWS_CSS }
            p { class: "muted", "Loading profile..." }
        };
    };

    let email = session
        .read()
        .session
        .as_ref()
        .and_then(|s| s.user_email.clone())
        .unwrap_or_default();
    let name = format!(
        "{} {}",
        record.get("firstName").map(value_text).unwrap_or_default(),
        record.get("lastName").map(value_text).unwrap_or_default()
    )
    .trim()
    .to_string();
    let form = form_key(&record, PROFILE_FIELDS);

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        section {
            class: "profile",
            h1 { class: "screen-title", "Profile" }
            div {
                class: "profile-header",
                h2 { "{name}" }
                p { class: "muted", "{email}" }
            }
            ProfileForm {
                key: "{form}",
                email: email.clone(),
                record,
                on_saved: move |_| profile.restart(),
            }
        }
    }
}

#[component]
fn ProfileForm(email: String, record: Record, on_saved: EventHandler<()>) -> Element {
    let console = use_console();
    let notifier = use_notifier();
    let mut draft = use_signal(|| Draft::edit(email.clone(), &record, PROFILE_FIELDS));
    let mut saving = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if saving() {
            return;
        }
        saving.set(true);
        let client = client_of(console);
        let current = draft.read().clone();
        spawn(async move {
            let outcome = save_profile(&client, &current, PROFILE_FIELDS).await;
            saving.set(false);
            notifier.outcome(&outcome);
            if outcome.succeeded() {
                on_saved.call(());
            }
        });
    };

    rsx! {
        form {
            class: "record-form",
            onsubmit: submit,
            div {
                class: "form-grid",
                for field in PROFILE_FIELDS.iter() {
                    FieldInput {
                        key: "{field.key}",
                        field: *field,
                        value: draft.read().text(field.key),
                        oninput: move |value: String| draft.write().set(field.key, value),
                    }
                }
            }
            div {
                class: "modal-actions",
                Button {
                    r#type: "submit",
                    disabled: saving(),
                    if saving() { "Saving..." } else { "Update Profile" }
                }
            }
        }
    }
}
