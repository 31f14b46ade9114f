//! List-fetch controller for entity grids.
//!
//! [`use_list`] owns a [`ListState`] and issues exactly one page request per
//! change of page, page size, search text or filter. Each request is tagged;
//! responses to superseded requests are dropped in [`ListState::finish`].

use dioxus::prelude::*;

use store::{EntityConfig, ListState, ListUpdate};

use crate::console::{client_of, use_console, Console};
use crate::notification::{use_notifier, Notifier};

#[derive(Clone, Copy, PartialEq)]
pub struct ListController {
    pub state: Signal<ListState>,
    entity: &'static EntityConfig,
    console: Signal<Console>,
    notifier: Notifier,
}

impl ListController {
    pub fn entity(&self) -> &'static EntityConfig {
        self.entity
    }

    /// Fetch the current request. Also the refresh after a mutation.
    pub fn reload(&self) {
        let controller = *self;
        let mut state = self.state;
        let entity = self.entity;
        let notifier = self.notifier;
        let client = client_of(self.console);
        let policy = self.console.peek().config.error_policy(entity.key);
        let (token, request) = state.write().begin();

        spawn(async move {
            let outcome = client.fetch_page(entity, &request).await;
            let error = outcome.as_ref().err().map(ToString::to_string);
            let update = state.write().finish(token, outcome);
            match update {
                ListUpdate::Applied => {}
                ListUpdate::PastEnd => controller.reload(),
                ListUpdate::Stale => {
                    tracing::debug!("dropped stale {} page", entity.key);
                }
                ListUpdate::Failed => {
                    let error = error.unwrap_or_default();
                    notifier.fetch_failed(policy, &entity.title.to_lowercase(), &error);
                }
            }
        });
    }

    pub fn set_page(&self, page: u32) {
        let mut state = self.state;
        if state.write().request.set_page(page) {
            self.reload();
        }
    }

    pub fn set_page_size(&self, size: u32) {
        let mut state = self.state;
        if state.write().request.set_page_size(size) {
            self.reload();
        }
    }

    pub fn set_search(&self, search: &str) {
        let mut state = self.state;
        if state.write().request.set_search(search) {
            self.reload();
        }
    }

    pub fn set_filter(&self, key: &str, value: &str) {
        let mut state = self.state;
        if state.write().request.set_filter(key, value) {
            self.reload();
        }
    }

    pub fn toggle_row(&self, id: &str) {
        let mut state = self.state;
        state.write().selection.toggle(id);
    }

    pub fn toggle_page(&self, ids: Vec<String>) {
        let mut state = self.state;
        state.write().selection.toggle_all(ids.iter().map(String::as_str));
    }
}

/// Controller for `entity`. The first page is fetched after the first render.
pub fn use_list(entity: &'static EntityConfig) -> ListController {
    let console = use_console();
    let notifier = use_notifier();
    let state = use_signal(|| ListState::new(console.peek().config.ui.default_page_size));
    let controller = ListController {
        state,
        entity,
        console,
        notifier,
    };

    use_effect(move || controller.reload());

    controller
}
