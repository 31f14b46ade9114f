use dioxus::prelude::*;

use crate::session::{use_session, LogoutButton};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Top bar: product name, the signed-in user and a logout button. Extra
/// controls go in `children`.
#[component]
pub fn Navbar(on_logout: EventHandler<()>, children: Element) -> Element {
    let session = use_session();
    let state = session.read();
    let user = state.session.as_ref();
    let name = user.map(|s| s.display_name().to_string()).unwrap_or_default();
    let avatar = user.and_then(|s| s.avatar_path.clone()).filter(|p| !p.is_empty());

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        header {
            class: "navbar",
            span { class: "navbar-brand", "Streamline" }
            div {
                class: "navbar-actions",
                {children}
                if state.verifying {
                    span { class: "muted", "Verifying session..." }
                }
                if let Some(src) = avatar {
                    img { class: "navbar-avatar", src: "{src}", alt: "" }
                }
                span { class: "navbar-user", "{name}" }
                LogoutButton { class: "btn btn-ghost", on_logout: move |_| on_logout.call(()) }
            }
        }
    }
}
