//! Session context and hooks for the UI.

use dioxus::prelude::*;

use store::Session;

use crate::console::{client_of, use_console, Console};

/// Session state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub session: Option<Session>,
    /// Token verification against the backend is still running.
    pub verifying: bool,
}

impl SessionState {
    pub fn is_signed_in(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_authenticated)
    }
}

/// Get the current session state.
/// Returns a signal that updates on login, logout and failed verification.
pub fn use_session() -> Signal<SessionState> {
    use_context::<Signal<SessionState>>()
}

/// Provider component that restores the persisted session and verifies it
/// once on start.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let console = use_console();
    let state = use_signal(|| {
        let session = client_of(console).session();
        SessionState {
            session: session.is_authenticated().then_some(session),
            verifying: false,
        }
    });

    use_context_provider(|| state);
    use_hook(|| verify_session(console, state));

    rsx! {
        {children}
    }
}

/// Check the stored token against the backend. A rejected token clears the
/// session, which sends guarded routes back to login. Does nothing without a
/// token or while a check is already running.
pub fn verify_session(console: Signal<Console>, mut state: Signal<SessionState>) {
    {
        let current = state.peek();
        if current.verifying || !current.is_signed_in() {
            return;
        }
    }
    state.write().verifying = true;

    spawn(async move {
        let client = client_of(console);
        match client.verify_token().await {
            Ok(()) => {
                tracing::debug!("session token verified");
                state.write().verifying = false;
            }
            Err(e) => {
                tracing::warn!("token verification failed: {e}");
                if let Err(e) = client.logout() {
                    tracing::error!("clearing session failed: {e}");
                }
                state.set(SessionState {
                    session: None,
                    verifying: false,
                });
            }
        }
    });
}

/// Record a fresh login.
pub fn sign_in(mut state: Signal<SessionState>, session: Session) {
    state.set(SessionState {
        session: Some(session),
        verifying: false,
    });
}

/// Clear the persisted session and the in-memory state. Call it from an
/// effect or a handler, never while rendering.
pub fn sign_out(console: Signal<Console>, mut state: Signal<SessionState>) {
    if let Err(e) = client_of(console).logout() {
        tracing::error!("clearing session failed: {e}");
    }
    let signed_out = SessionState {
        session: None,
        verifying: false,
    };
    if *state.peek() != signed_out {
        state.set(signed_out);
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
    on_logout: EventHandler<()>,
) -> Element {
    let console = use_console();
    let state = use_session();

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| {
                sign_out(console, state);
                on_logout.call(());
            },
            "{label}"
        }
    }
}
