//! # Transient notifications
//!
//! One message is visible at a time. Pushing a new one replaces whatever is
//! showing; each push returns an id so the auto-dismiss timer started for it
//! only clears that message and never a later one.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    /// CSS modifier for the banner.
    pub fn css_class(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_class())
    }
}

/// How a failed background fetch is surfaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Logged only.
    Silent,
    /// Logged and shown as an error notification.
    Notify,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NotificationCenter {
    current: Option<Notification>,
    next_id: u64,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `message`, replacing the current notification. Returns its id.
    pub fn push(&mut self, message: impl Into<String>, severity: Severity) -> u64 {
        self.next_id += 1;
        self.current = Some(Notification {
            id: self.next_id,
            message: message.into(),
            severity,
        });
        self.next_id
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Timer callback: clear the notification only if it is still `id`.
    pub fn expire(&mut self, id: u64) -> bool {
        if self.current.as_ref().is_some_and(|n| n.id == id) {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// User closed the banner.
    pub fn dismiss(&mut self) {
        self.current = None;
    }
}
