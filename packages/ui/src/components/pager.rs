use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant};

/// Previous/next paging with a page-size picker and the total row count.
#[component]
pub fn Pager(
    page: u32,
    page_count: u32,
    page_size: u32,
    page_sizes: Vec<u32>,
    total: u64,
    on_page: EventHandler<u32>,
    on_page_size: EventHandler<u32>,
) -> Element {
    let last = page_count.max(1);
    rsx! {
        div {
            class: "pager",
            span { class: "pager-total", "{total} rows" }
            label {
                class: "pager-size",
                "Rows per page"
                select {
                    class: "input",
                    onchange: move |evt: FormEvent| {
                        if let Ok(size) = evt.value().parse::<u32>() {
                            on_page_size.call(size);
                        }
                    },
                    for size in page_sizes {
                        option {
                            key: "{size}",
                            value: "{size}",
                            selected: size == page_size,
                            "{size}"
                        }
                    }
                }
            }
            Button {
                variant: ButtonVariant::Ghost,
                disabled: page <= 1,
                onclick: move |_| on_page.call(page - 1),
                "Previous"
            }
            span { class: "pager-position", "Page {page} of {last}" }
            Button {
                variant: ButtonVariant::Ghost,
                disabled: page >= last,
                onclick: move |_| on_page.call(page + 1),
                "Next"
            }
        }
    }
}
