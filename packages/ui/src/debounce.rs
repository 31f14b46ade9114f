use std::time::Duration;

use dioxus::prelude::*;

use store::Debouncer;

use crate::timer::sleep;

/// A text input whose value is published to [`settled`](Self::settled) only
/// after the user stops typing for the configured delay.
///
/// Timer tasks belong to the owning component, so they are dropped with it
/// and never fire into a disposed view.
#[derive(Clone, Copy, PartialEq)]
pub struct DebouncedInput {
    raw: Signal<String>,
    settled: Signal<String>,
    debouncer: Signal<Debouncer<String>>,
}

impl DebouncedInput {
    /// What the input currently shows.
    pub fn raw(&self) -> String {
        self.raw.read().clone()
    }

    /// The last published value. Reading it subscribes.
    pub fn settled(&self) -> String {
        self.settled.read().clone()
    }

    pub fn input(&self, value: String) {
        let mut raw = self.raw;
        let mut settled = self.settled;
        let mut debouncer = self.debouncer;
        raw.set(value.clone());
        let delay = debouncer.peek().delay();
        let token = debouncer.write().input(value);
        spawn(async move {
            sleep(delay).await;
            let published = debouncer.write().settle(token);
            if let Some(value) = published {
                settled.set(value);
            }
        });
    }

    /// Empty the box and drop any keystroke still waiting to publish.
    pub fn clear(&self) {
        let mut raw = self.raw;
        let mut debouncer = self.debouncer;
        debouncer.write().cancel();
        raw.set(String::new());
    }
}

pub fn use_debounced(delay: Duration) -> DebouncedInput {
    let raw = use_signal(String::new);
    let settled = use_signal(String::new);
    let debouncer = use_signal(|| Debouncer::new(String::new(), delay));
    DebouncedInput {
        raw,
        settled,
        debouncer,
    }
}
