use dioxus::prelude::*;

use api::actions::place_order;
use store::entity::ORDERS;
use store::models::OrderCatalog;
use store::new_order::TAX_RATE;
use store::NewOrder;

use crate::components::{Button, ButtonVariant, FieldInput, ModalOverlay, Select};
use crate::console::{client_of, use_console};
use crate::notification::use_notifier;

/// Header fields filled by the customer picker rather than typed.
const FROM_CUSTOMER: &[&str] = &["customerName", "customerNumber", "customerEmail"];

fn money(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Create-order dialog: customer picker, header fields and item lines with
/// running totals.
#[component]
pub fn OrderCreateForm(on_close: EventHandler<()>, on_saved: EventHandler<()>) -> Element {
    let console = use_console();
    let notifier = use_notifier();
    let mut saving = use_signal(|| false);
    let mut order = use_signal(|| {
        let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
        NewOrder::new(&today)
    });

    let catalog = use_resource(move || async move {
        let client = client_of(console);
        match client.order_catalog().await {
            Ok(catalog) => catalog,
            Err(e) => {
                let policy = console.peek().config.error_policy(ORDERS.key);
                notifier.fetch_failed(policy, "customers and items", &e);
                OrderCatalog::default()
            }
        }
    });

    let (customer_choices, item_choices) = match &*catalog.read() {
        Some(c) => (
            c.customers
                .iter()
                .map(|x| (x.id.clone(), x.customer_name.clone()))
                .collect::<Vec<_>>(),
            c.items
                .iter()
                .map(|i| (i.name.clone(), i.name.clone()))
                .collect::<Vec<_>>(),
        ),
        None => (Vec::new(), Vec::new()),
    };

    let current = order.read().clone();
    let customer = current.customer_id().unwrap_or_default().to_string();
    let number = current.header().text("customerNumber");
    let email = current.header().text("customerEmail");
    let lines: Vec<(usize, String, String, String)> = current
        .items()
        .iter()
        .enumerate()
        .map(|(index, line)| {
            let amount = format!(
                "{} × {} = {}",
                money(line.price),
                line.quantity,
                money(line.amount())
            );
            (index, line.item_name.clone(), line.quantity.to_string(), amount)
        })
        .collect();
    let totals = current.totals();
    let total = money(totals.total_amount);
    let tax = money(totals.tax_amount);
    let net = money(totals.net_amount);
    let tax_label = format!("Tax ({:.0}%)", TAX_RATE * 100.0);

    let choose_customer = move |id: String| {
        let picked = catalog
            .peek()
            .as_ref()
            .and_then(|c| c.customer(&id).cloned());
        if let Some(customer) = picked {
            order.write().choose_customer(&customer);
        }
    };

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if saving() {
            return;
        }
        saving.set(true);
        let client = client_of(console);
        let current = order.read().clone();
        spawn(async move {
            let outcome = place_order(&client, &current).await;
            saving.set(false);
            notifier.outcome(&outcome);
            if outcome.succeeded() {
                on_saved.call(());
            }
        });
    };

    rsx! {
        ModalOverlay {
            title: "Create Order",
            wide: true,
            on_close: move |_| on_close.call(()),
            form {
                class: "record-form",
                onsubmit: submit,
                div {
                    class: "form-grid",
                    label {
                        class: "field",
                        span { class: "field-label", "Customer *" }
                        Select {
                            value: customer,
                            choices: customer_choices,
                            placeholder: "Select customer",
                            required: true,
                            onchange: choose_customer,
                        }
                    }
                    label {
                        class: "field",
                        span { class: "field-label", "Customer Number" }
                        input { class: "input", readonly: true, value: "{number}" }
                    }
                    label {
                        class: "field",
                        span { class: "field-label", "Customer Email" }
                        input { class: "input", readonly: true, value: "{email}" }
                    }
                    for field in ORDERS.form.iter().filter(|f| !FROM_CUSTOMER.contains(&f.key)) {
                        FieldInput {
                            key: "{field.key}",
                            field: *field,
                            value: current.header().text(field.key),
                            oninput: move |value: String| order.write().set(field.key, &value),
                        }
                    }
                }
                div {
                    class: "order-lines",
                    div {
                        class: "order-lines-header",
                        h3 { "Items" }
                        Button {
                            variant: ButtonVariant::Secondary,
                            onclick: move |_| order.write().add_item(),
                            "Add item"
                        }
                    }
                    if lines.is_empty() {
                        p { class: "muted", "No items yet." }
                    }
                    for (index, name, quantity, amount) in lines {
                        div {
                            key: "{index}",
                            class: "order-line",
                            Select {
                                value: name,
                                choices: item_choices.clone(),
                                placeholder: "Select item",
                                required: true,
                                onchange: move |name: String| {
                                    let picked = catalog
                                        .peek()
                                        .as_ref()
                                        .and_then(|c| c.item(&name).cloned());
                                    if let Some(item) = picked {
                                        order.write().choose_item(index, &item);
                                    }
                                },
                            }
                            input {
                                class: "input order-qty",
                                r#type: "number",
                                min: "1",
                                value: "{quantity}",
                                oninput: move |evt: FormEvent| {
                                    if let Ok(quantity) = evt.value().trim().parse::<u32>() {
                                        order.write().set_quantity(index, quantity);
                                    }
                                },
                            }
                            span { class: "order-line-amount", "{amount}" }
                            Button {
                                variant: ButtonVariant::Ghost,
                                title: "Remove item",
                                onclick: move |_| order.write().remove_item(index),
                                "×"
                            }
                        }
                    }
                    dl {
                        class: "order-totals",
                        dt { "Total" }
                        dd { "{total}" }
                        dt { "{tax_label}" }
                        dd { "{tax}" }
                        dt { "Net" }
                        dd { "{net}" }
                    }
                }
                div {
                    class: "modal-actions",
                    Button {
                        variant: ButtonVariant::Secondary,
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    Button {
                        r#type: "submit",
                        disabled: saving(),
                        if saving() { "Saving..." } else { "Create" }
                    }
                }
            }
        }
    }
}
