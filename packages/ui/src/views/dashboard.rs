use dioxus::prelude::*;

use store::models::DashboardSummary;

use crate::console::{client_of, use_console};
use crate::notification::use_notifier;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Count cards and warehouse fill gauges.
///
/// Load failures follow the `dashboard` error policy, which is silent by
/// default: the cards simply stay at zero.
#[component]
pub fn DashboardView() -> Element {
    let console = use_console();
    let notifier = use_notifier();

    let summary = use_resource(move || async move {
        let client = client_of(console);
        match client.dashboard().await {
            Ok(summary) => summary,
            Err(e) => {
                let policy = console.peek().config.error_policy("dashboard");
                notifier.fetch_failed(policy, "dashboard", &e);
                DashboardSummary::default()
            }
        }
    });

    let summary = summary.read().clone().unwrap_or_default();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        section {
            class: "dashboard",
            h1 { class: "screen-title", "Dashboard" }
            div {
                class: "card-row",
                for (label, count) in summary.cards() {
                    div {
                        key: "{label}",
                        class: "count-card",
                        span { class: "count-value", "{count}" }
                        span { class: "count-label", "{label}" }
                    }
                }
            }
            h2 { class: "section-title", "Warehouse Capacity" }
            if summary.warehouse_summary.is_empty() {
                p { class: "muted", "No warehouse data." }
            }
            div {
                class: "gauge-grid",
                for warehouse in summary.warehouse_summary.iter() {
                    FillGauge {
                        key: "{warehouse.warehouse_id}",
                        label: warehouse.warehouse_id.clone(),
                        percent: warehouse.fill_percent(),
                    }
                }
            }
        }
    }
}

#[component]
fn FillGauge(label: String, percent: u8) -> Element {
    let tier = match percent {
        0..=59 => "gauge-ok",
        60..=84 => "gauge-warn",
        _ => "gauge-full",
    };
    rsx! {
        div {
            class: "gauge",
            div { class: "gauge-label", "{label}" }
            div {
                class: "gauge-track",
                div { class: "gauge-fill {tier}", style: "width: {percent}%" }
            }
            div { class: "gauge-value", "{percent}%" }
        }
    }
}
