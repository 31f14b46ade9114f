use dioxus::prelude::*;

use api::actions::raise_ticket;
use store::entity::RAISE_TICKET_FIELDS;
use store::models::NewTicket;
use store::Draft;

use crate::components::{Button, FieldInput};
use crate::console::{client_of, use_console};
use crate::notification::use_notifier;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// New support ticket. The form is cleared after a successful submit.
#[component]
pub fn RaiseTicketView(#[props(default)] on_submitted: Option<EventHandler<()>>) -> Element {
    let console = use_console();
    let notifier = use_notifier();
    let mut draft = use_signal(|| Draft::create(RAISE_TICKET_FIELDS));
    let mut sending = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if sending() {
            return;
        }
        sending.set(true);
        let client = client_of(console);
        let ticket = NewTicket::from_draft(&draft.read());
        spawn(async move {
            let outcome = raise_ticket(&client, &ticket).await;
            sending.set(false);
            notifier.outcome(&outcome);
            if outcome.succeeded() {
                draft.set(Draft::create(RAISE_TICKET_FIELDS));
                if let Some(handler) = &on_submitted {
                    handler.call(());
                }
            }
        });
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        section {
            class: "raise-ticket",
            h1 { class: "screen-title", "Raise a Ticket" }
            form {
                class: "record-form",
                onsubmit: submit,
                div {
                    class: "form-grid",
                    for field in RAISE_TICKET_FIELDS.iter() {
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
                        disabled: sending(),
                        if sending() { "Submitting..." } else { "Submit Ticket" }
                    }
                }
            }
        }
    }
}
