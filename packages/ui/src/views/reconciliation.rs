use chrono::Datelike;
use dioxus::prelude::*;

use store::entity::RECON_COLUMNS;
use store::{Record, Severity};

use crate::components::{Button, DataTable};
use crate::console::{client_of, use_console};
use crate::notification::use_notifier;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Monthly financial reconciliation, fetched on demand.
///
/// Failures always raise a notification here, whatever the configured
/// policy, because the user asked for the data explicitly.
#[component]
pub fn ReconciliationView() -> Element {
    let console = use_console();
    let notifier = use_notifier();
    let today = chrono::Local::now().date_naive();
    let mut month = use_signal(|| today.month().to_string());
    let mut year = use_signal(|| today.year().to_string());
    let mut rows = use_signal(Vec::<Record>::new);
    let mut loading = use_signal(|| false);

    let fetch = move |evt: FormEvent| {
        evt.prevent_default();
        let Ok(m) = month().trim().parse::<u32>() else {
            notifier.push("Enter a month between 1 and 12", Severity::Warning);
            return;
        };
        let Ok(y) = year().trim().parse::<i32>() else {
            notifier.push("Enter a valid year", Severity::Warning);
            return;
        };
        if !(1..=12).contains(&m) {
            notifier.push("Enter a month between 1 and 12", Severity::Warning);
            return;
        }
        if loading() {
            return;
        }
        loading.set(true);
        let client = client_of(console);
        spawn(async move {
            match client.reconciliations(m, y).await {
                Ok(found) => {
                    if found.is_empty() {
                        notifier.push("No reconciliation data for that month", Severity::Info);
                    }
                    rows.set(found);
                }
                Err(e) => {
                    tracing::error!("fetching reconciliation failed: {e}");
                    notifier.push("Failed to fetch reconciliation data.", Severity::Error);
                }
            }
            loading.set(false);
        });
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        section {
            class: "reconciliation",
            h1 { class: "screen-title", "Financial Reconciliation" }
            form {
                class: "toolbar",
                onsubmit: fetch,
                label {
                    class: "field",
                    span { class: "field-label", "Month" }
                    input {
                        class: "input",
                        r#type: "number",
                        min: "1",
                        max: "12",
                        value: "{month}",
                        oninput: move |evt: FormEvent| month.set(evt.value()),
                    }
                }
                label {
                    class: "field",
                    span { class: "field-label", "Year" }
                    input {
                        class: "input",
                        r#type: "number",
                        value: "{year}",
                        oninput: move |evt: FormEvent| year.set(evt.value()),
                    }
                }
                Button {
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Loading..." } else { "Fetch" }
                }
            }
            DataTable {
                columns: RECON_COLUMNS,
                rows: rows(),
                id_field: "reconciliationId",
                loading: loading(),
            }
        }
    }
}
