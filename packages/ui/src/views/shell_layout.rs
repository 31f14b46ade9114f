use dioxus::prelude::*;
use dioxus_free_icons::IconShape;

use store::entity::REGISTRY;

use crate::icons::{
    FaAddressBook, FaBoxesStacked, FaCartShopping, FaChartLine, FaFileInvoiceDollar, FaGauge,
    FaHeadset, FaTicket, FaUser, FaUsers, FaWarehouse,
};
use crate::{Icon, Navbar};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

#[component]
fn NavIcon(key_name: &'static str) -> Element {
    fn draw<I: IconShape + Clone + PartialEq + 'static>(icon: I) -> Element {
        rsx! { Icon { width: 16, height: 16, icon } }
    }
    match key_name {
        "dashboard" => draw(FaGauge),
        "users" => draw(FaUsers),
        "inventory" => draw(FaBoxesStacked),
        "orders" => draw(FaCartShopping),
        "sales" => draw(FaChartLine),
        "warehouses" => draw(FaWarehouse),
        "customers" => draw(FaAddressBook),
        "incidents" => draw(FaHeadset),
        "raise-ticket" => draw(FaTicket),
        "reconciliation" => draw(FaFileInvoiceDollar),
        _ => draw(FaUser),
    }
}

/// Sidebar navigation plus the top bar around the routed screen.
///
/// Platform packages pass the current path and turn `on_navigate` paths
/// into router pushes.
#[component]
pub fn ShellLayout(
    /// Path of the current route, e.g. `/customers`.
    active: String,
    on_navigate: EventHandler<String>,
    on_logout: EventHandler<()>,
    /// The router outlet.
    children: Element,
) -> Element {
    let mut links: Vec<(&'static str, String, &'static str)> = vec![("dashboard", "/".to_string(), "Dashboard")];
    links.extend(REGISTRY.iter().map(|e| (e.key, format!("/{}", e.key), e.title)));
    links.push(("raise-ticket", "/raise-ticket".to_string(), "Raise Ticket"));
    links.push(("reconciliation", "/reconciliation".to_string(), "Reconciliation"));
    links.push(("profile", "/profile".to_string(), "Profile"));
    let links: Vec<_> = links
        .into_iter()
        .map(|(key, path, label)| {
            let current = is_active(&active, &path);
            (key, path, label, current)
        })
        .collect();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "shell",
            nav {
                class: "sidebar",
                ul {
                    for (key, path, label, current) in links {
                        li {
                            key: "{key}",
                            class: if current { "nav-item active" } else { "nav-item" },
                            onclick: move |_| on_navigate.call(path.clone()),
                            NavIcon { key_name: key }
                            span { "{label}" }
                        }
                    }
                }
            }
            div {
                class: "shell-main",
                Navbar { on_logout: move |_| on_logout.call(()) }
                main { class: "shell-content", {children} }
            }
        }
    }
}

/// `/orders/42` keeps the Orders entry highlighted.
fn is_active(active: &str, path: &str) -> bool {
    if path == "/" {
        return active == "/";
    }
    active == path || active.starts_with(&format!("{path}/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_active() {
        assert!(is_active("/", "/"));
        assert!(!is_active("/orders", "/"));
        assert!(is_active("/orders/42", "/orders"));
        assert!(!is_active("/orders-archive", "/orders"));
    }
}
