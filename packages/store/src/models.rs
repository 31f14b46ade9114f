//! # Wire models for the Streamline backend
//!
//! Typed shapes for the responses that screens read field-by-field. Grid rows
//! stay untyped ([`crate::Record`]) because every entity screen renders them
//! through its column configuration.
//!
//! The backend mixes naming styles (`user_first_name`, `currentStock`,
//! `warehouse_summary`), so renames are spelled out per field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::draft::{Draft, Record};

/// `user` object inside a login response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginUser {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub user_profile: Option<String>,
    #[serde(default)]
    pub user_first_name: Option<String>,
    #[serde(default)]
    pub user_last_name: Option<String>,
}

/// `POST /api/login` response. A missing token means the login was refused and
/// `data`/`message` carries the reason.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<LoginUser>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// `GET /api/dashboard` payload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[serde(default)]
    pub user_count: u64,
    #[serde(default)]
    pub warehouse_count: u64,
    #[serde(default)]
    pub order_count: u64,
    #[serde(default)]
    pub customer_count: u64,
    #[serde(default)]
    pub ticket_count: u64,
    #[serde(default, rename = "warehouse_summary")]
    pub warehouse_summary: Vec<WarehouseSummary>,
}

impl DashboardSummary {
    /// Count cards in display order.
    pub fn cards(&self) -> [(&'static str, u64); 5] {
        [
            ("Total Users", self.user_count),
            ("Total Warehouses", self.warehouse_count),
            ("Total Orders", self.order_count),
            ("Total Customers", self.customer_count),
            ("Total Tickets", self.ticket_count),
        ]
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WarehouseSummary {
    #[serde(default)]
    pub warehouse_id: String,
    #[serde(default, rename = "currentStock")]
    pub current_stock: f64,
    #[serde(default)]
    pub capacity: f64,
}

impl WarehouseSummary {
    /// Fill level as a whole percentage in `0..=100`. Zero capacity reads as empty.
    pub fn fill_percent(&self) -> u8 {
        if self.capacity <= 0.0 || self.current_stock <= 0.0 {
            return 0;
        }
        let pct = (self.current_stock / self.capacity * 100.0).round();
        pct.min(100.0) as u8
    }
}

/// One line of an order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default)]
    pub item_name: String,
    #[serde(default)]
    pub quantity: Value,
    #[serde(default)]
    pub tax_rate: Value,
    #[serde(default)]
    pub total_price: Value,
    #[serde(default)]
    pub unit_price: Value,
}

/// `GET /api/orders/:id` payload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(default, rename = "orderId")]
    pub order_id: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(flatten)]
    pub fields: Record,
}

/// A customer the order form can bill.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CatalogCustomer {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub contact_number: Value,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
}

/// A sellable item with its list price.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CatalogItem {
    #[serde(default, rename = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: Value,
}

impl CatalogItem {
    /// Numeric prices and numeric strings both count; anything else is zero.
    pub fn unit_price(&self) -> f64 {
        match &self.price {
            Value::Number(n) => n.as_f64().unwrap_or(0.0),
            Value::String(s) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        }
    }
}

/// `GET /api/orders/customers-items` payload.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct OrderCatalog {
    #[serde(default)]
    pub customers: Vec<CatalogCustomer>,
    #[serde(default)]
    pub items: Vec<CatalogItem>,
}

impl OrderCatalog {
    pub fn customer(&self, id: &str) -> Option<&CatalogCustomer> {
        self.customers.iter().find(|c| c.id == id)
    }

    pub fn item(&self, name: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|i| i.name == name)
    }
}

/// One field-level change inside a ticket history entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldChange {
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub old_value: Value,
    #[serde(default)]
    pub new_value: Value,
}

/// Server-maintained audit entry on a ticket.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    #[serde(default, rename = "updatedByName")]
    pub actor: String,
    #[serde(default)]
    pub changes: Vec<FieldChange>,
}

/// `GET /api/tickets/:id` payload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketDetail {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    /// Every other field, used as the edit form's original snapshot.
    #[serde(flatten)]
    pub fields: Record,
}

impl TicketDetail {
    /// History newest-first, as it is displayed.
    pub fn history_newest_first(&self) -> Vec<&HistoryEntry> {
        let mut entries: Vec<_> = self.history.iter().collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries
    }
}

/// Payload for `POST /api/tickets`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicket {
    pub issue_type: String,
    pub priority: String,
    pub subject: String,
    pub description: String,
    pub department: String,
    pub user_id: Option<String>,
}

impl NewTicket {
    /// Read the raise-ticket form. `user_id` is filled in when submitting.
    pub fn from_draft(draft: &Draft) -> Self {
        Self {
            issue_type: draft.text("issueType"),
            priority: draft.text("priority"),
            subject: draft.text("subject"),
            description: draft.text("description"),
            department: draft.text("department"),
            user_id: None,
        }
    }

    /// Names of the required fields that are still blank.
    pub fn missing_required(&self) -> Vec<&'static str> {
        [
            ("issueType", &self.issue_type),
            ("subject", &self.subject),
            ("description", &self.description),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(k, _)| k)
        .collect()
    }
}

/// Candidate for a ticket's `assignedTo`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Assignee {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Value lists served by `GET /api/<entity>/options`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityOptions {
    #[serde(default)]
    pub statuses: Vec<String>,
    #[serde(default)]
    pub suppliers: Vec<Supplier>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl EntityOptions {
    /// `(value, label)` pairs for a named list, as rendered in a dropdown.
    pub fn choices(&self, list: &str) -> Vec<(String, String)> {
        match list {
            "statuses" => self.statuses.iter().map(|s| (s.clone(), s.clone())).collect(),
            "categories" => self.categories.iter().map(|s| (s.clone(), s.clone())).collect(),
            "suppliers" => self
                .suppliers
                .iter()
                .map(|s| (s.id.clone(), s.name.clone()))
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dashboard_parses_mixed_case() {
        let summary: DashboardSummary = serde_json::from_value(json!({
            "userCount": 3,
            "warehouseCount": 2,
            "orderCount": 10,
            "customerCount": 4,
            "warehouse_summary": [
                { "warehouse_id": "W1", "currentStock": 50, "capacity": 200 }
            ]
        }))
        .unwrap();
        assert_eq!(summary.ticket_count, 0);
        assert_eq!(summary.cards()[2], ("Total Orders", 10));
        assert_eq!(summary.warehouse_summary[0].fill_percent(), 25);
    }

    #[test]
    fn test_fill_percent_bounds() {
        let empty = WarehouseSummary {
            warehouse_id: "W".to_string(),
            current_stock: 10.0,
            capacity: 0.0,
        };
        assert_eq!(empty.fill_percent(), 0);

        let over = WarehouseSummary {
            capacity: 10.0,
            current_stock: 30.0,
            ..empty
        };
        assert_eq!(over.fill_percent(), 100);
    }

    #[test]
    fn test_ticket_keeps_unknown_fields() {
        let ticket: TicketDetail = serde_json::from_value(json!({
            "_id": "t1",
            "subject": "Printer on fire",
            "createdAt": "2024-03-01T10:00:00Z",
            "history": [
                { "timestamp": "2024-03-01T11:00:00Z", "updatedByName": "Sam", "changes": [] },
                { "timestamp": "2024-03-01T12:00:00Z", "updatedByName": "Kim",
                  "changes": [{ "field": "status", "oldValue": "open", "newValue": "closed" }] }
            ]
        }))
        .unwrap();
        assert_eq!(ticket.fields.get("subject"), Some(&json!("Printer on fire")));
        let history = ticket.history_newest_first();
        assert_eq!(history[0].actor, "Kim");
        assert_eq!(history[1].actor, "Sam");
    }

    #[test]
    fn test_new_ticket_required_fields() {
        let ticket = NewTicket {
            issue_type: "Bug".to_string(),
            subject: "  ".to_string(),
            ..NewTicket::default()
        };
        assert_eq!(ticket.missing_required(), vec!["subject", "description"]);
    }

    #[test]
    fn test_new_ticket_from_form() {
        let mut draft = Draft::create(crate::entity::RAISE_TICKET_FIELDS);
        draft.set("issueType", "Bug");
        draft.set("subject", "Login fails");
        let ticket = NewTicket::from_draft(&draft);
        assert_eq!(ticket.priority, "low");
        assert_eq!(ticket.issue_type, "Bug");
        assert_eq!(ticket.missing_required(), vec!["description"]);
        assert_eq!(ticket.user_id, None);
    }

    #[test]
    fn test_option_choices() {
        let options: EntityOptions = serde_json::from_value(json!({
            "statuses": ["in stock"],
            "suppliers": [{ "_id": "s1", "name": "Acme" }]
        }))
        .unwrap();
        assert_eq!(options.choices("suppliers"), vec![("s1".to_string(), "Acme".to_string())]);
        assert!(options.choices("categories").is_empty());
    }

    #[test]
    fn test_order_catalog_lookups() {
        let catalog: OrderCatalog = serde_json::from_value(json!({
            "customers": [{ "_id": "c1", "customer_name": "Acme", "contact_number": 555 }],
            "items": [
                { "_id": "i1", "name": "Widget", "price": 12.5 },
                { "name": "Gasket", "price": "3.25" },
                { "name": "Sample" }
            ]
        }))
        .unwrap();
        assert_eq!(catalog.customer("c1").map(|c| c.customer_name.as_str()), Some("Acme"));
        assert!(catalog.customer("c9").is_none());
        assert_eq!(catalog.item("Widget").map(CatalogItem::unit_price), Some(12.5));
        assert_eq!(catalog.item("Gasket").map(CatalogItem::unit_price), Some(3.25));
        assert_eq!(catalog.item("Sample").map(CatalogItem::unit_price), Some(0.0));
    }
}
