//! Shared console context: configuration plus the backend client.
//!
//! Returns an [`api::ApiClient`] backed by the platform's session storage:
//! - **Web** (WASM + `web` feature): browser `localStorage` via [`store::LocalStorage`]
//! - **Everything else**: [`store::MemoryStorage`]

use dioxus::prelude::*;

use api::{ApiClient, HttpTransport};
use store::ConsoleConfig;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStorage = store::LocalStorage;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformStorage = store::MemoryStorage;

pub type Client = ApiClient<HttpTransport, PlatformStorage>;

/// Create a client for the configured backend.
pub fn make_client(config: &ConsoleConfig) -> Client {
    ApiClient::new(
        HttpTransport::new(config.api.base_url.clone()),
        PlatformStorage::default(),
        &config.api,
    )
}

#[derive(Clone)]
pub struct Console {
    pub config: ConsoleConfig,
    pub client: Client,
}

/// Get the console context provided by [`ConsoleProvider`].
pub fn use_console() -> Signal<Console> {
    use_context::<Signal<Console>>()
}

/// Client handle for use inside event handlers and tasks. Does not subscribe.
pub fn client_of(console: Signal<Console>) -> Client {
    console.peek().client.clone()
}

/// Provides configuration, client, session and notifications to everything
/// below it.
#[component]
pub fn ConsoleProvider(config: ConsoleConfig, children: Element) -> Element {
    let console = use_signal(|| Console {
        client: make_client(&config),
        config: config.clone(),
    });
    use_context_provider(|| console);

    rsx! {
        crate::NotificationProvider {
            crate::SessionProvider {
                {children}
            }
        }
    }
}
