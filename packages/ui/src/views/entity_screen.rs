//! The generic grid screen used for every registry entity.

use dioxus::prelude::*;

use api::actions::{apply_bulk_edit, delete_record, export_csv, submit_draft};
use api::Outcome;
use store::draft::record_id;
use store::entity::ORDERS;
use store::{BulkEdit, Draft, EntityConfig, FilterOptions, FilterSpec, Record, Severity};

use crate::choices::use_choices;
use crate::components::{Button, ButtonVariant, ConfirmDialog, DataTable, FieldInput, ModalOverlay, Pager, Select};
use crate::console::{client_of, use_console};
use crate::debounce::use_debounced;
use crate::download::download_csv;
use crate::list::{use_list, ListController};
use crate::notification::use_notifier;
use crate::views::order_create::OrderCreateForm;
use crate::Icon;
use crate::icons::{FaFileCsv, FaMagnifyingGlass, FaPenToSquare, FaPlus};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

#[derive(Clone, Debug, PartialEq)]
enum Dialog {
    Closed,
    Create,
    Edit(Record),
    Delete(String),
    BulkEdit,
}

/// Grid, search, filters, paging, export and the create/edit/delete/bulk-edit
/// dialogs for one entity.
///
/// Callers must key this component by `entity.key`, otherwise switching
/// entities would keep the previous entity's list state.
#[component]
pub fn EntityScreen(entity: &'static EntityConfig, on_open: Option<EventHandler<String>>) -> Element {
    let console = use_console();
    let notifier = use_notifier();
    let list = use_list(entity);
    let search = use_debounced(console.peek().config.debounce_delay());
    let mut dialog = use_signal(|| Dialog::Closed);
    let mut exporting = use_signal(|| false);

    use_effect(move || {
        let term = search.settled();
        list.set_search(&term);
    });

    let export = move |_: MouseEvent| {
        if exporting() {
            return;
        }
        exporting.set(true);
        let client = client_of(console);
        spawn(async move {
            match export_csv(&client, entity).await {
                Ok(file) => match download_csv(file.filename, &file.contents) {
                    Ok(()) => {
                        tracing::info!("exported {}", file.filename);
                        notifier.push(format!("Exported {}", file.filename), Severity::Success);
                    }
                    Err(e) => {
                        tracing::error!("download of {} failed: {e}", file.filename);
                        notifier.push("Failed to export data. Please try again.", Severity::Error);
                    }
                },
                Err(outcome) => notifier.outcome(&outcome),
            }
            exporting.set(false);
        });
    };

    let state = list.state.read();
    let selected = state.selection.len();
    let page_sizes = console.read().config.ui.page_sizes.clone();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        section {
            class: "entity-screen",
            div {
                class: "screen-header",
                h1 { class: "screen-title", "{entity.title}" }
                div {
                    class: "toolbar",
                    if entity.searchable {
                        label {
                            class: "search-box",
                            Icon { width: 14, height: 14, icon: FaMagnifyingGlass }
                            input {
                                class: "input",
                                r#type: "search",
                                placeholder: "Search...",
                                value: "{search.raw()}",
                                oninput: move |evt: FormEvent| search.input(evt.value()),
                            }
                        }
                    }
                    for filter in entity.filters.iter() {
                        FilterSelect { key: "{filter.key}", filter: *filter, list }
                    }
                    if entity.supports_bulk_edit() {
                        Button {
                            variant: ButtonVariant::Secondary,
                            disabled: selected == 0,
                            title: "Edit the selected rows",
                            onclick: move |_| dialog.set(Dialog::BulkEdit),
                            Icon { width: 14, height: 14, icon: FaPenToSquare }
                            " Bulk Edit ({selected})"
                        }
                    }
                    Button {
                        variant: ButtonVariant::Secondary,
                        disabled: exporting(),
                        onclick: export,
                        Icon { width: 14, height: 14, icon: FaFileCsv }
                        if exporting() { " Exporting..." } else { " Export CSV" }
                    }
                    if entity.can_create() {
                        Button {
                            onclick: move |_| dialog.set(Dialog::Create),
                            Icon { width: 14, height: 14, icon: FaPlus }
                            " Add {entity.noun}"
                        }
                    }
                }
            }

            DataTable {
                columns: entity.columns,
                rows: state.result.rows.clone(),
                id_field: entity.id_field,
                loading: state.loading,
                selection: entity.supports_bulk_edit().then(|| state.selection.clone()),
                on_toggle_row: move |id: String| list.toggle_row(&id),
                on_toggle_page: move |ids: Vec<String>| list.toggle_page(ids),
                on_open,
                on_edit: entity.can_edit.then_some(EventHandler::new(move |row: Record| {
                    dialog.set(Dialog::Edit(row));
                })),
                on_delete: entity.can_delete.then_some(EventHandler::new(move |id: String| {
                    dialog.set(Dialog::Delete(id));
                })),
            }

            Pager {
                page: state.request.page(),
                page_count: state.page_count(),
                page_size: state.request.page_size(),
                page_sizes,
                total: state.result.total_count,
                on_page: move |page| list.set_page(page),
                on_page_size: move |size| list.set_page_size(size),
            }

            match dialog() {
                Dialog::Closed => rsx! {},
                Dialog::Create if entity.key == ORDERS.key => rsx! {
                    OrderCreateForm {
                        on_close: move |_| dialog.set(Dialog::Closed),
                        on_saved: move |_| {
                            dialog.set(Dialog::Closed);
                            list.reload();
                        },
                    }
                },
                Dialog::Create => rsx! {
                    RecordForm {
                        entity,
                        record: None,
                        on_close: move |_| dialog.set(Dialog::Closed),
                        on_saved: move |_| {
                            dialog.set(Dialog::Closed);
                            list.reload();
                        },
                    }
                },
                Dialog::Edit(record) => rsx! {
                    RecordForm {
                        entity,
                        record: Some(record),
                        on_close: move |_| dialog.set(Dialog::Closed),
                        on_saved: move |_| {
                            dialog.set(Dialog::Closed);
                            list.reload();
                        },
                    }
                },
                Dialog::Delete(id) => rsx! {
                    DeleteDialog {
                        entity,
                        id,
                        on_close: move |_| dialog.set(Dialog::Closed),
                        on_deleted: move |_| {
                            dialog.set(Dialog::Closed);
                            list.reload();
                        },
                    }
                },
                Dialog::BulkEdit => rsx! {
                    BulkEditForm {
                        list,
                        on_close: move |_| dialog.set(Dialog::Closed),
                        on_saved: move |_| {
                            dialog.set(Dialog::Closed);
                            list.reload();
                        },
                    }
                },
            }
        }
    }
}

/// One filter dropdown. Remote values are fetched once on mount.
#[component]
fn FilterSelect(filter: FilterSpec, list: ListController) -> Element {
    let console = use_console();
    let notifier = use_notifier();

    let values = use_resource(move || async move {
        match filter.options {
            FilterOptions::Fixed(values) => values.iter().map(|v| v.to_string()).collect(),
            FilterOptions::Remote(endpoint) => {
                let client = client_of(console);
                let policy = console.peek().config.error_policy(list.entity().key);
                match client.filter_values(endpoint).await {
                    Ok(values) => values,
                    Err(e) => {
                        notifier.fetch_failed(policy, &format!("{} filter", filter.label.to_lowercase()), &e);
                        Vec::new()
                    }
                }
            }
        }
    });

    let choices: Vec<(String, String)> = values
        .read()
        .as_ref()
        .map(|values: &Vec<String>| values.iter().map(|v| (v.clone(), v.clone())).collect())
        .unwrap_or_default();
    let current = list
        .state
        .read()
        .request
        .filter(filter.key)
        .unwrap_or_default()
        .to_string();

    rsx! {
        Select {
            class: "filter",
            value: current,
            choices,
            placeholder: format!("All {}", filter.label.to_lowercase()),
            onchange: move |value: String| list.set_filter(filter.key, &value),
        }
    }
}

/// Create (no `record`) or edit form in a modal.
#[component]
fn RecordForm(
    entity: &'static EntityConfig,
    record: Option<Record>,
    on_close: EventHandler<()>,
    on_saved: EventHandler<()>,
) -> Element {
    let console = use_console();
    let notifier = use_notifier();
    let choices = use_choices(entity);
    let mut saving = use_signal(|| false);
    let mut draft = use_signal(|| match &record {
        Some(row) => Draft::edit(
            record_id(row, entity.id_field).unwrap_or_default(),
            row,
            entity.form,
        ),
        None => Draft::create(entity.form),
    });

    let title = if draft.peek().is_edit() {
        format!("Edit {}", entity.noun)
    } else {
        format!("Add {}", entity.noun)
    };

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if saving() {
            return;
        }
        saving.set(true);
        let client = client_of(console);
        let current = draft.read().clone();
        spawn(async move {
            let outcome = submit_draft(&client, entity, &current).await;
            saving.set(false);
            notifier.outcome(&outcome);
            match outcome {
                Outcome::Done(_) => on_saved.call(()),
                Outcome::Unchanged(_) => on_close.call(()),
                Outcome::Invalid(_) | Outcome::Failed(_) => {}
            }
        });
    };

    rsx! {
        ModalOverlay {
            title,
            wide: entity.form.len() > 6,
            on_close: move |_| on_close.call(()),
            form {
                class: "record-form",
                onsubmit: submit,
                div {
                    class: "form-grid",
                    for field in entity.form.iter() {
                        FieldInput {
                            key: "{field.key}",
                            field: *field,
                            value: draft.read().text(field.key),
                            choices: choices.read().get(field.key).cloned().unwrap_or_default(),
                            oninput: move |value: String| draft.write().set(field.key, value),
                        }
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
                        if saving() { "Saving..." } else { "Save" }
                    }
                }
            }
        }
    }
}

/// Sparse edit applied to every selected row. Untouched fields are not sent.
#[component]
fn BulkEditForm(list: ListController, on_close: EventHandler<()>, on_saved: EventHandler<()>) -> Element {
    let console = use_console();
    let notifier = use_notifier();
    let entity = list.entity();
    let choices = use_choices(entity);
    let mut edit = use_signal(BulkEdit::new);
    let mut saving = use_signal(|| false);
    let count = list.state.read().selection.len();

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if saving() {
            return;
        }
        saving.set(true);
        let client = client_of(console);
        let current = edit.read().clone();
        let selection = list.state.peek().selection.clone();
        spawn(async move {
            let outcome = apply_bulk_edit(&client, entity, &current, &selection).await;
            saving.set(false);
            notifier.outcome(&outcome);
            if outcome.succeeded() {
                on_saved.call(());
            }
        });
    };

    rsx! {
        ModalOverlay {
            title: format!("Bulk Edit {} ({count} selected)", entity.title),
            on_close: move |_| on_close.call(()),
            form {
                class: "record-form",
                onsubmit: submit,
                p { class: "modal-hint", "Only the fields you set are changed." }
                div {
                    class: "form-grid",
                    for field in entity.bulk_fields.iter() {
                        FieldInput {
                            key: "{field.key}",
                            field: *field,
                            value: edit.read().text(field.key),
                            choices: choices.read().get(field.key).cloned().unwrap_or_default(),
                            oninput: move |value: String| edit.write().set(field.key, value),
                        }
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
                        disabled: saving() || count == 0,
                        if saving() { "Applying..." } else { "Apply" }
                    }
                }
            }
        }
    }
}

#[component]
fn DeleteDialog(
    entity: &'static EntityConfig,
    id: String,
    on_close: EventHandler<()>,
    on_deleted: EventHandler<()>,
) -> Element {
    let console = use_console();
    let notifier = use_notifier();
    let mut busy = use_signal(|| false);

    let confirm = move |_: ()| {
        if busy() {
            return;
        }
        busy.set(true);
        let client = client_of(console);
        let id = id.clone();
        spawn(async move {
            let outcome = delete_record(&client, entity, &id).await;
            busy.set(false);
            notifier.outcome(&outcome);
            if outcome.succeeded() {
                on_deleted.call(());
            }
        });
    };

    rsx! {
        ConfirmDialog {
            title: format!("Delete {}", entity.noun),
            message: format!(
                "Are you sure you want to delete this {}? This cannot be undone.",
                entity.noun.to_lowercase()
            ),
            busy: busy(),
            on_confirm: confirm,
            on_cancel: move |_| on_close.call(()),
        }
    }
}
