//! Route wrappers around the shared screens.

use dioxus::prelude::*;

use store::entity::{self, DetailKind};
use ui::views::{
    DashboardView, EntityScreen, IncidentDetailView, OrderDetailView, ProfileView, RaiseTicketView,
    ReconciliationView,
};

use crate::Route;

#[component]
pub fn Dashboard() -> Element {
    rsx! { DashboardView {} }
}

/// Grid for any registry entity, e.g. `/customers`.
#[component]
pub fn EntityList(entity: String) -> Element {
    let nav = use_navigator();
    let Some(config) = entity::find(&entity) else {
        return rsx! {
            NotFound { segments: vec![entity] }
        };
    };

    let on_open = config.detail.map(|kind| {
        EventHandler::new(move |id: String| {
            let target = match kind {
                DetailKind::Order => Route::OrderDetail { id },
                DetailKind::Ticket => Route::IncidentDetail { id },
            };
            nav.push(target);
        })
    });

    rsx! {
        EntityScreen { key: "{config.key}", entity: config, on_open }
    }
}

#[component]
pub fn OrderDetail(id: String) -> Element {
    rsx! {
        OrderDetailView { key: "{id}", id: id.clone() }
    }
}

#[component]
pub fn IncidentDetail(id: String) -> Element {
    rsx! {
        IncidentDetailView { key: "{id}", id: id.clone() }
    }
}

#[component]
pub fn RaiseTicket() -> Element {
    let nav = use_navigator();
    rsx! {
        RaiseTicketView {
            on_submitted: move |_| {
                nav.push(Route::EntityList { entity: entity::TICKETS.key.to_string() });
            },
        }
    }
}

#[component]
pub fn Reconciliation() -> Element {
    rsx! { ReconciliationView {} }
}

#[component]
pub fn Profile() -> Element {
    rsx! { ProfileView {} }
}

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                h1 { "Page not found" }
                p { class: "muted", "Nothing lives at /{path}." }
                Link { to: Route::Dashboard {}, "Back to the dashboard" }
            }
        }
    }
}
