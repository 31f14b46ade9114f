use dioxus::prelude::*;

use ui::views::ShellLayout;
use ui::{use_console, use_session, verify_session};

use crate::Route;

/// Layout for every signed-in route. Without a session it redirects to the
/// login page; each navigation re-checks the stored token.
#[component]
pub fn Shell() -> Element {
    let console = use_console();
    let session = use_session();
    let nav = use_navigator();
    let route = use_route::<Route>();
    let path = route.to_string();

    use_effect(use_reactive((&path,), move |(_,)| verify_session(console, session)));

    use_effect(move || {
        if !session.read().is_signed_in() {
            nav.replace(Route::Login {});
        }
    });

    if !session.read().is_signed_in() {
        return rsx! {};
    }

    rsx! {
        ShellLayout {
            active: path,
            on_navigate: move |target: String| {
                nav.push(target);
            },
            on_logout: move |_| {
                nav.replace(Route::Login {});
            },
            Outlet::<Route> {}
        }
    }
}
