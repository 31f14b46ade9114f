use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaPen, FaTrash};
use dioxus_free_icons::Icon;

use store::draft::record_id;
use store::entity::ColumnFormat;
use store::{Column, Record, Selection};

/// Colored status label. The class is derived from the value, so
/// `"out of stock"` becomes `status-out-of-stock`.
#[component]
pub fn StatusChip(value: String) -> Element {
    let slug = value.trim().to_lowercase().replace(' ', "-");
    rsx! {
        span { class: "status-chip status-{slug}", "{value}" }
    }
}

/// Grid over untyped records, driven by column configuration.
///
/// Row selection checkboxes appear only when `selection` is given. Edit and
/// delete buttons appear only for the handlers that are set.
#[component]
pub fn DataTable(
    columns: &'static [Column],
    rows: Vec<Record>,
    id_field: &'static str,
    #[props(default)] loading: bool,
    selection: Option<Selection>,
    on_toggle_row: Option<EventHandler<String>>,
    on_toggle_page: Option<EventHandler<Vec<String>>>,
    on_open: Option<EventHandler<String>>,
    on_edit: Option<EventHandler<Record>>,
    on_delete: Option<EventHandler<String>>,
) -> Element {
    let page_ids: Vec<String> = rows.iter().filter_map(|r| record_id(r, id_field)).collect();
    let all_selected = selection
        .as_ref()
        .is_some_and(|s| !page_ids.is_empty() && page_ids.iter().all(|id| s.contains(id)));
    let has_actions = on_edit.is_some() || on_delete.is_some();
    let span = columns.len() + usize::from(selection.is_some()) + usize::from(has_actions);
    let entries: Vec<(String, Option<bool>, Record)> = rows
        .into_iter()
        .map(|row| {
            let id = record_id(&row, id_field).unwrap_or_default();
            let selected = selection.as_ref().map(|s| s.contains(&id));
            (id, selected, row)
        })
        .collect();

    rsx! {
        div {
            class: if loading { "table-wrap loading" } else { "table-wrap" },
            table {
                class: "data-table",
                thead {
                    tr {
                        if selection.is_some() {
                            th {
                                class: "select-cell",
                                input {
                                    r#type: "checkbox",
                                    checked: all_selected,
                                    onchange: move |_| {
                                        if let Some(handler) = &on_toggle_page {
                                            handler.call(page_ids.clone());
                                        }
                                    },
                                }
                            }
                        }
                        for column in columns.iter() {
                            th { key: "{column.key}", "{column.label}" }
                        }
                        if has_actions {
                            th { class: "actions-cell", "Actions" }
                        }
                    }
                }
                tbody {
                    if entries.is_empty() {
                        tr {
                            td {
                                class: "empty-row",
                                colspan: "{span}",
                                if loading { "Loading..." } else { "No records found" }
                            }
                        }
                    }
                    for (index, (id, selected, row)) in entries.into_iter().enumerate() {
                        DataRow {
                            key: "{index}",
                            columns,
                            id,
                            selected,
                            row,
                            on_toggle_row,
                            on_open,
                            on_edit,
                            on_delete,
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn DataRow(
    columns: &'static [Column],
    row: Record,
    id: String,
    selected: Option<bool>,
    on_toggle_row: Option<EventHandler<String>>,
    on_open: Option<EventHandler<String>>,
    on_edit: Option<EventHandler<Record>>,
    on_delete: Option<EventHandler<String>>,
) -> Element {
    let clickable = on_open.is_some() && !id.is_empty();
    let open_id = id.clone();
    let toggle_id = id.clone();
    let edit_row = row.clone();

    rsx! {
        tr {
            class: if clickable { "clickable" } else { "" },
            onclick: move |_| {
                if let Some(handler) = &on_open {
                    if !open_id.is_empty() {
                        handler.call(open_id.clone());
                    }
                }
            },
            if let Some(checked) = selected {
                td {
                    class: "select-cell",
                    onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                    input {
                        r#type: "checkbox",
                        checked,
                        onchange: move |_| {
                            if let Some(handler) = &on_toggle_row {
                                handler.call(toggle_id.clone());
                            }
                        },
                    }
                }
            }
            for column in columns.iter() {
                td {
                    key: "{column.key}",
                    if column.format == ColumnFormat::Status {
                        StatusChip { value: column.cell(&row) }
                    } else {
                        "{column.cell(&row)}"
                    }
                }
            }
            if on_edit.is_some() || on_delete.is_some() {
                td {
                    class: "actions-cell",
                    onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                    if let Some(handler) = on_edit {
                        button {
                            class: "icon-button",
                            title: "Edit",
                            onclick: move |_| handler.call(edit_row.clone()),
                            Icon { width: 14, height: 14, icon: FaPen }
                        }
                    }
                    if let Some(handler) = on_delete {
                        button {
                            class: "icon-button danger",
                            title: "Delete",
                            onclick: move |_| handler.call(id.clone()),
                            Icon { width: 14, height: 14, icon: FaTrash }
                        }
                    }
                }
            }
        }
    }
}
