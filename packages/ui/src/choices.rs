//! Dropdown values for form fields that are not fixed in the entity registry.

use std::collections::HashMap;

use dioxus::prelude::*;

use store::{EntityConfig, FieldKind};

use crate::console::{client_of, use_console, Client};
use crate::notification::use_notifier;

/// `(value, label)` pairs keyed by field key.
pub type Choices = HashMap<&'static str, Vec<(String, String)>>;

/// Load the choices for every `Options` and `Lookup` field of `entity`,
/// both in its form and in its bulk-edit fields. Fields whose source fails
/// to load are left out and render an empty dropdown.
pub fn use_choices(entity: &'static EntityConfig) -> Signal<Choices> {
    let console = use_console();
    let notifier = use_notifier();
    let mut choices = use_signal(Choices::new);

    use_effect(move || {
        let client = client_of(console);
        let policy = console.peek().config.error_policy(entity.key);
        spawn(async move {
            match load_choices(&client, entity).await {
                Ok(loaded) => choices.set(loaded),
                Err(e) => notifier.fetch_failed(policy, "form options", &e),
            }
        });
    });

    choices
}

async fn load_choices(client: &Client, entity: &EntityConfig) -> Result<Choices, api::ApiError> {
    let options = if entity.needs_options() {
        Some(client.entity_options(entity).await?)
    } else {
        None
    };

    let mut choices = Choices::new();
    for field in entity.form.iter().chain(entity.bulk_fields) {
        if choices.contains_key(field.key) {
            continue;
        }
        match field.kind {
            FieldKind::Options(list) => {
                if let Some(options) = &options {
                    choices.insert(field.key, options.choices(list));
                }
            }
            FieldKind::Lookup {
                endpoint,
                value_key,
                label_key,
            } => {
                let pairs = client.lookup(endpoint, value_key, label_key).await?;
                choices.insert(field.key, pairs);
            }
            _ => {}
        }
    }
    Ok(choices)
}
