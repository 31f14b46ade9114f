use dioxus::prelude::*;

use store::entity::{format_date, FieldKind, FieldSpec};

/// Dropdown over `(value, label)` pairs with a blank first entry.
#[component]
pub fn Select(
    value: String,
    choices: Vec<(String, String)>,
    #[props(default = "Select...".to_string())] placeholder: String,
    #[props(default)] required: bool,
    #[props(default)] class: String,
    onchange: EventHandler<String>,
) -> Element {
    rsx! {
        select {
            class: "input {class}",
            required,
            onchange: move |evt: FormEvent| onchange.call(evt.value()),
            option { value: "", selected: value.is_empty(), "{placeholder}" }
            for (v, label) in choices {
                option {
                    key: "{v}",
                    selected: v == value,
                    value: "{v}",
                    "{label}"
                }
            }
        }
    }
}

/// Labelled input for one form field, chosen by the field's kind.
///
/// `choices` is only used by `Options` and `Lookup` fields; `Choice` fields
/// carry their own list.
#[component]
pub fn FieldInput(
    field: FieldSpec,
    value: String,
    #[props(default)] choices: Vec<(String, String)>,
    oninput: EventHandler<String>,
) -> Element {
    let label = if field.required {
        format!("{} *", field.label)
    } else {
        field.label.to_string()
    };

    let input = match field.kind {
        FieldKind::Text | FieldKind::Email | FieldKind::Number | FieldKind::Date => {
            let (kind, shown) = match field.kind {
                FieldKind::Email => ("email", value.clone()),
                FieldKind::Number => ("number", value.clone()),
                FieldKind::Date => ("date", format_date(&value)),
                _ => ("text", value.clone()),
            };
            rsx! {
                input {
                    class: "input",
                    r#type: kind,
                    name: field.key,
                    required: field.required,
                    value: "{shown}",
                    oninput: move |evt: FormEvent| oninput.call(evt.value()),
                }
            }
        }
        FieldKind::TextArea => rsx! {
            textarea {
                class: "input",
                name: field.key,
                rows: "3",
                required: field.required,
                value: "{value}",
                oninput: move |evt: FormEvent| oninput.call(evt.value()),
            }
        },
        FieldKind::Choice(list) => rsx! {
            Select {
                value: value.clone(),
                choices: list.iter().map(|c| (c.to_string(), c.to_string())).collect::<Vec<_>>(),
                required: field.required,
                onchange: move |v| oninput.call(v),
            }
        },
        FieldKind::Options(_) | FieldKind::Lookup { .. } => rsx! {
            Select {
                value: value.clone(),
                choices: choices.clone(),
                required: field.required,
                onchange: move |v| oninput.call(v),
            }
        },
    };

    rsx! {
        label {
            class: "field",
            span { class: "field-label", "{label}" }
            {input}
        }
    }
}
