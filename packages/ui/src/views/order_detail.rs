use dioxus::prelude::*;

use api::actions::change_order_status;
use store::entity::ORDER_ITEM_COLUMNS;
use store::models::OrderDetail;
use store::{Column, OrderStatus, OrderWorkflow, Record};

use crate::components::{Button, DataTable, Select};
use crate::console::{client_of, use_console};
use crate::notification::use_notifier;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

const ORDER_SUMMARY: &[Column] = &[
    Column::text("customerName", "Customer"),
    Column::text("customerEmail", "Email"),
    Column::date("orderDate", "Order Date"),
    Column::date("shippingDate", "Shipping Date"),
    Column::text("paymentMethod", "Payment Method"),
    Column::text("paymentStatus", "Payment Status"),
    Column::text("totalAmount", "Total"),
    Column::text("shippingAddress", "Shipping Address"),
];

fn current_status(order: &OrderDetail) -> OrderStatus {
    order.status.parse().unwrap_or_else(|e| {
        tracing::warn!("{e}, showing as pending");
        OrderStatus::Pending
    })
}

fn item_rows(order: &OrderDetail) -> Vec<Record> {
    order
        .items
        .iter()
        .filter_map(|item| match serde_json::to_value(item) {
            Ok(serde_json::Value::Object(row)) => Some(row),
            _ => None,
        })
        .collect()
}

/// Order header, status stepper, line items and the status change form.
#[component]
pub fn OrderDetailView(id: String, #[props(default)] workflow: OrderWorkflow) -> Element {
    let console = use_console();
    let notifier = use_notifier();
    let mut selected = use_signal(|| Option::<OrderStatus>::None);
    let mut saving = use_signal(|| false);

    let order_id = id.clone();
    let mut order = use_resource(move || {
        let id = order_id.clone();
        async move {
            let client = client_of(console);
            match client.order(&id).await {
                Ok(order) => Some(order),
                Err(e) => {
                    let policy = console.peek().config.error_policy("orders");
                    notifier.fetch_failed(policy, "order", &e);
                    None
                }
            }
        }
    });

    let Some(Some(detail)) = order.read().clone() else {
        return rsx! {
            document::Link { rel: "stylesheet", href: VIEWS_CSS }
            p { class: "muted", "Loading order..." }
        };
    };

    let current = current_status(&detail);
    let choice = selected().unwrap_or(current);
    let can_submit = workflow.status_change(current, choice).is_some() && !saving();
    let mut offered = vec![current];
    offered.extend_from_slice(workflow.transitions(current));
    let choices: Vec<(String, String)> = offered
        .iter()
        .map(|s| (s.as_str().to_string(), s.label().to_string()))
        .collect();
    let header = detail.fields.clone();
    let title = detail.order_id.clone().unwrap_or_else(|| id.clone());

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if saving() {
            return;
        }
        saving.set(true);
        let client = client_of(console);
        let id = id.clone();
        spawn(async move {
            let outcome = change_order_status(&client, &workflow, &id, current, choice).await;
            saving.set(false);
            notifier.outcome(&outcome);
            if outcome.succeeded() {
                selected.set(None);
                order.restart();
            }
        });
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        section {
            class: "order-detail",
            h1 { class: "screen-title", "Order {title}" }

            ol {
                class: "stepper",
                for step in OrderWorkflow::steps(current) {
                    li {
                        key: "{step.status}",
                        class: if step.active { "step active" } else if step.completed { "step completed" } else { "step" },
                        class: if step.status == OrderStatus::Cancelled { "cancelled" },
                        "{step.status.label()}"
                    }
                }
            }

            dl {
                class: "detail-grid",
                for column in ORDER_SUMMARY.iter() {
                    div {
                        key: "{column.key}",
                        dt { "{column.label}" }
                        dd { "{column.cell(&header)}" }
                    }
                }
            }

            h2 { class: "section-title", "Items" }
            DataTable {
                columns: ORDER_ITEM_COLUMNS,
                rows: item_rows(&detail),
                id_field: "itemId",
            }

            form {
                class: "status-form",
                onsubmit: submit,
                label {
                    class: "field",
                    span { class: "field-label", "Status" }
                    Select {
                        value: choice.as_str().to_string(),
                        choices,
                        onchange: move |value: String| {
                            selected.set(value.parse().ok());
                        },
                    }
                }
                Button {
                    r#type: "submit",
                    disabled: !can_submit,
                    if saving() { "Updating..." } else { "Update Status" }
                }
            }
        }
    }
}
