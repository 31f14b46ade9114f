//! Incident (support ticket) detail: SLA progress, editable fields,
//! assignee search, comments and the server-kept history.

use std::time::Duration;

use chrono::{DateTime, Utc};
use dioxus::prelude::*;

use api::actions::{add_comment, save_ticket};
use store::draft::{form_key, value_text};
use store::entity::TICKET_FIELDS;
use store::models::{Assignee, HistoryEntry, TicketDetail};
use store::sla::format_hms;
use store::{Draft, SlaSnapshot};

use crate::components::{Button, ButtonVariant, FieldInput};
use crate::console::{client_of, use_console};
use crate::debounce::use_debounced;
use crate::notification::use_notifier;
use crate::timer::sleep;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");
const ASSIGNED_TO: &str = "assignedTo";

#[component]
pub fn IncidentDetailView(id: String) -> Element {
    let console = use_console();
    let notifier = use_notifier();

    let ticket_id = id.clone();
    let mut ticket = use_resource(move || {
        let id = ticket_id.clone();
        async move {
            let client = client_of(console);
            match client.ticket(&id).await {
                Ok(ticket) => Some(ticket),
                Err(e) => {
                    let policy = console.peek().config.error_policy("incidents");
                    notifier.fetch_failed(policy, "ticket", &e);
                    None
                }
            }
        }
    });

    let Some(Some(detail)) = ticket.read().clone() else {
        return rsx! {
            document::Link { rel: "stylesheet", href: VIEWS_CSS }
            p { class: "muted", "Loading ticket..." }
        };
    };

    let number = detail
        .fields
        .get("ticketId")
        .map(value_text)
        .unwrap_or_else(|| detail.id.clone());
    let history: Vec<HistoryEntry> = detail.history_newest_first().into_iter().cloned().collect();

    // The editor restarts only when the saved fields differ, so a comment
    // reload keeps unsaved edits
    let editor_key = form_key(&detail.fields, TICKET_FIELDS);
    let refresh = move |_: ()| ticket.restart();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        section {
            class: "incident-detail",
            h1 { class: "screen-title", "Ticket {number}" }
            if let Some(created_at) = detail.created_at {
                SlaPanel { created_at }
            }
            div {
                class: "incident-columns",
                TicketEditor {
                    key: "{editor_key}",
                    ticket: detail.clone(),
                    on_saved: refresh,
                }
                div {
                    class: "incident-side",
                    CommentBox { ticket_id: detail.id.clone(), on_added: refresh }
                    TicketHistory { entries: history }
                }
            }
        }
    }
}

/// SLA progress recomputed every second from `created_at` alone.
#[component]
fn SlaPanel(created_at: DateTime<Utc>) -> Element {
    let console = use_console();
    let window = console.peek().config.sla_duration();
    let mut now = use_signal(Utc::now);

    use_future(move || async move {
        loop {
            sleep(Duration::from_secs(1)).await;
            now.set(Utc::now());
        }
    });

    let sla = SlaSnapshot::compute(created_at, now(), window);
    let remaining = format_hms(sla.remaining);

    rsx! {
        div {
            class: "sla-panel sla-{sla.tier.css_class()}",
            div {
                class: "sla-header",
                span { "SLA Progress" }
                span {
                    class: "sla-remaining",
                    if sla.is_expired() { "SLA breached" } else { "{remaining} remaining" }
                }
            }
            div {
                class: "sla-track",
                div { class: "sla-fill", style: "width: {sla.progress}%" }
            }
            span { class: "sla-percent", "{sla.progress}%" }
        }
    }
}

#[component]
fn TicketEditor(ticket: TicketDetail, on_saved: EventHandler<()>) -> Element {
    let console = use_console();
    let notifier = use_notifier();
    let ticket_id = ticket.id.clone();
    let mut draft = use_signal(|| Draft::edit(ticket.id.clone(), &ticket.fields, TICKET_FIELDS));
    let mut saving = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if saving() {
            return;
        }
        saving.set(true);
        let client = client_of(console);
        let current = draft.read().clone();
        let id = ticket_id.clone();
        spawn(async move {
            let outcome = save_ticket(&client, &id, &current, TICKET_FIELDS).await;
            saving.set(false);
            notifier.outcome(&outcome);
            if outcome.succeeded() {
                on_saved.call(());
            }
        });
    };

    rsx! {
        form {
            class: "record-form ticket-form",
            onsubmit: submit,
            div {
                class: "form-grid",
                for field in TICKET_FIELDS.iter() {
                    if field.key == ASSIGNED_TO {
                        AssigneePicker {
                            key: "{field.key}",
                            value: draft.read().text(ASSIGNED_TO),
                            onselect: move |id: String| draft.write().set(ASSIGNED_TO, id),
                        }
                    } else {
                        FieldInput {
                            key: "{field.key}",
                            field: *field,
                            value: draft.read().text(field.key),
                            oninput: move |value: String| draft.write().set(field.key, value),
                        }
                    }
                }
            }
            div {
                class: "modal-actions",
                Button {
                    r#type: "submit",
                    disabled: saving() || !draft.read().is_dirty(),
                    if saving() { "Saving..." } else { "Save Changes" }
                }
            }
        }
    }
}

/// Search-as-you-type assignee selection. Queries are debounced.
#[component]
fn AssigneePicker(value: String, onselect: EventHandler<String>) -> Element {
    let console = use_console();
    let notifier = use_notifier();
    let search = use_debounced(console.peek().config.debounce_delay());

    let candidates = use_resource(move || async move {
        let term = search.settled();
        if term.trim().is_empty() {
            return Vec::new();
        }
        let client = client_of(console);
        match client.assignees(&term).await {
            Ok(list) => list,
            Err(e) => {
                let policy = console.peek().config.error_policy("assignees");
                notifier.fetch_failed(policy, "assignees", &e);
                Vec::new()
            }
        }
    });

    let candidates: Vec<Assignee> = candidates.read().clone().unwrap_or_default();
    let current = candidates
        .iter()
        .find(|a| a.id == value)
        .map(|a| a.email.clone())
        .unwrap_or_else(|| value.clone());

    rsx! {
        div {
            class: "field assignee-picker",
            span { class: "field-label", "Assigned To" }
            span { class: "assignee-current", if current.is_empty() { "Unassigned" } else { "{current}" } }
            input {
                class: "input",
                r#type: "search",
                placeholder: "Search assignee",
                value: "{search.raw()}",
                oninput: move |evt: FormEvent| search.input(evt.value()),
            }
            ul {
                class: "assignee-options",
                for assignee in candidates {
                    li {
                        key: "{assignee.id}",
                        class: if assignee.id == value { "selected" },
                        onclick: {
                            let id = assignee.id.clone();
                            move |_| {
                                search.clear();
                                onselect.call(id.clone());
                            }
                        },
                        "{assignee.email}"
                    }
                }
            }
        }
    }
}

#[component]
fn CommentBox(ticket_id: String, on_added: EventHandler<()>) -> Element {
    let console = use_console();
    let notifier = use_notifier();
    let mut text = use_signal(String::new);
    let mut sending = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if sending() {
            return;
        }
        sending.set(true);
        let client = client_of(console);
        let id = ticket_id.clone();
        let body = text();
        spawn(async move {
            let outcome = add_comment(&client, &id, &body).await;
            sending.set(false);
            notifier.outcome(&outcome);
            if outcome.succeeded() {
                text.set(String::new());
                on_added.call(());
            }
        });
    };

    rsx! {
        form {
            class: "comment-box",
            onsubmit: submit,
            textarea {
                class: "input",
                rows: "3",
                placeholder: "Add a comment",
                value: "{text}",
                oninput: move |evt: FormEvent| text.set(evt.value()),
            }
            Button {
                r#type: "submit",
                variant: ButtonVariant::Secondary,
                disabled: sending() || text.read().trim().is_empty(),
                "Comment"
            }
        }
    }
}

#[component]
fn TicketHistory(entries: Vec<HistoryEntry>) -> Element {
    rsx! {
        div {
            class: "history",
            h2 { class: "section-title", "History" }
            if entries.is_empty() {
                p { class: "muted", "No history yet." }
            }
            ul {
                for (index, entry) in entries.into_iter().enumerate() {
                    HistoryItem { key: "{index}", entry }
                }
            }
        }
    }
}

#[component]
fn HistoryItem(entry: HistoryEntry) -> Element {
    let when = entry.timestamp.format("%Y-%m-%d %H:%M").to_string();
    let changes: Vec<(String, String, String)> = entry
        .changes
        .iter()
        .map(|c| (c.field.clone(), value_text(&c.old_value), value_text(&c.new_value)))
        .collect();

    rsx! {
        li {
            class: "history-entry",
            div {
                class: "history-meta",
                span { class: "history-actor", "{entry.actor}" }
                span { class: "history-time", "{when}" }
            }
            for (field, before, after) in changes {
                p {
                    class: "history-change",
                    strong { "{field}: " }
                    "{before} → {after}"
                }
            }
        }
    }
}
