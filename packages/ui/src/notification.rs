use std::fmt::Display;

use dioxus::prelude::*;

use api::Outcome;
use store::{ErrorPolicy, NotificationCenter, Severity};

use crate::console::use_console;
use crate::timer::sleep;

/// Handle for raising notifications. Cheap to copy into handlers and tasks.
#[derive(Clone, Copy, PartialEq)]
pub struct Notifier {
    center: Signal<NotificationCenter>,
}

impl Notifier {
    pub fn push(&self, message: impl Into<String>, severity: Severity) {
        let mut center = self.center;
        center.write().push(message, severity);
    }

    pub fn outcome(&self, outcome: &Outcome) {
        self.push(outcome.message(), outcome.severity());
    }

    /// Report a failed background fetch according to the site's policy.
    pub fn fetch_failed(&self, policy: ErrorPolicy, what: &str, err: &dyn Display) {
        tracing::error!("fetching {what} failed: {err}");
        if policy == ErrorPolicy::Notify {
            self.push(format!("Failed to load {what}."), Severity::Error);
        }
    }
}

pub fn use_notifier() -> Notifier {
    use_context::<Notifier>()
}

#[component]
pub fn NotificationProvider(children: Element) -> Element {
    let center = use_signal(NotificationCenter::new);
    use_context_provider(|| Notifier { center });

    rsx! {
        {children}
        NotificationBanner { center }
    }
}

/// The single visible notification. Each new message restarts the
/// auto-dismiss timer; an older timer only clears its own message.
#[component]
fn NotificationBanner(center: Signal<NotificationCenter>) -> Element {
    let console = use_console();
    let duration = console.peek().config.notification_duration();
    let mut center = center;

    use_effect(move || {
        let Some(id) = center.read().current().map(|n| n.id) else {
            return;
        };
        spawn(async move {
            sleep(duration).await;
            center.write().expire(id);
        });
    });

    let Some(current) = center.read().current().cloned() else {
        return rsx! {};
    };

    rsx! {
        div {
            class: "notification notification-{current.severity}",
            role: "status",
            span { class: "notification-message", "{current.message}" }
            button {
                class: "notification-close",
                title: "Dismiss",
                onclick: move |_| center.write().dismiss(),
                "×"
            }
        }
    }
}
