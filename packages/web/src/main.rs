use dioxus::prelude::*;

use store::ConsoleConfig;
use ui::ConsoleProvider;
use views::{
    Dashboard, EntityList, IncidentDetail, Login, NotFound, OrderDetail, Profile, RaiseTicket,
    Reconciliation, Register, Shell,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},
    #[layout(Shell)]
        #[route("/")]
        Dashboard {},
        #[route("/raise-ticket")]
        RaiseTicket {},
        #[route("/reconciliation")]
        Reconciliation {},
        #[route("/profile")]
        Profile {},
        #[route("/orders/:id")]
        OrderDetail { id: String },
        #[route("/incidents/:id")]
        IncidentDetail { id: String },
        #[route("/:entity")]
        EntityList { entity: String },
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const CONFIG_TOML: &str = include_str!("../streamline.toml");

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

fn load_config() -> ConsoleConfig {
    ConsoleConfig::from_toml(CONFIG_TOML).unwrap_or_else(|e| {
        tracing::error!("invalid {}, using defaults: {e}", ConsoleConfig::filename());
        ConsoleConfig::default()
    })
}

#[component]
fn App() -> Element {
    let config = use_hook(load_config);

    rsx! {
        document::Link { rel: "stylesheet", href: ui::VIEWS_CSS }
        ConsoleProvider {
            config,
            Router::<Route> {}
        }
    }
}
