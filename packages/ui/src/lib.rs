//! This crate contains all shared UI for the workspace.
//!
//! Screens take plain props and callbacks; routing lives in the platform
//! package. Everything below [`ConsoleProvider`] can reach the configuration,
//! the backend client, the session and the notification banner.

use dioxus::prelude::*;

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod views;

/// Console stylesheet. Screens link it themselves; pages outside the shell
/// (login, register) rely on the app linking it once.
pub const VIEWS_CSS: Asset = asset!("/src/views/views.css");

mod timer;

mod console;
pub use console::{client_of, make_client, use_console, Client, Console, ConsoleProvider, PlatformStorage};

mod notification;
pub use notification::{use_notifier, NotificationProvider, Notifier};

mod session;
pub use session::{sign_in, sign_out, use_session, verify_session, LogoutButton, SessionProvider, SessionState};

mod navbar;
pub use navbar::Navbar;

mod debounce;
pub use debounce::{use_debounced, DebouncedInput};

mod list;
pub use list::{use_list, ListController};

mod choices;
pub use choices::{use_choices, Choices};

mod download;
pub use download::download_csv;
