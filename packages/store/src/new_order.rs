//! # New orders
//!
//! The create-order form is a header (customer, dates, payment) plus line items
//! picked from the catalog. Totals are derived from the lines and sent with the
//! order, tax charged at [`TAX_RATE`] on the item total.

use serde_json::{json, Value};

use crate::draft::{value_text, Draft, Record};
use crate::entity::ORDERS;
use crate::error::StoreError;
use crate::models::{CatalogCustomer, CatalogItem};

pub const TAX_RATE: f64 = 0.18;

#[derive(Clone, Debug, PartialEq)]
pub struct LineItem {
    pub item_id: Option<String>,
    pub item_name: String,
    pub quantity: u32,
    pub price: f64,
}

impl Default for LineItem {
    fn default() -> Self {
        Self {
            item_id: None,
            item_name: String::new(),
            quantity: 1,
            price: 0.0,
        }
    }
}

impl LineItem {
    pub fn amount(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }

    fn to_value(&self) -> Value {
        let mut line = json!({
            "itemName": self.item_name,
            "quantity": self.quantity,
            "price": self.price,
        });
        if let (Some(id), Value::Object(map)) = (&self.item_id, &mut line) {
            map.insert("itemId".to_string(), Value::String(id.clone()));
        }
        line
    }
}

/// Amounts in currency units, each rounded to cents.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrderTotals {
    pub total_amount: f64,
    pub tax_amount: f64,
    pub net_amount: f64,
}

impl OrderTotals {
    pub fn of(items: &[LineItem]) -> Self {
        let total = cents(items.iter().map(LineItem::amount).sum());
        let tax = cents(total * TAX_RATE);
        Self {
            total_amount: total,
            tax_amount: tax,
            net_amount: cents(total + tax),
        }
    }
}

fn cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewOrder {
    header: Draft,
    customer_id: Option<String>,
    items: Vec<LineItem>,
}

impl NewOrder {
    /// Blank order dated `order_date` (`YYYY-MM-DD`), with no lines yet.
    pub fn new(order_date: &str) -> Self {
        let mut header = Draft::create(ORDERS.form);
        header.set("orderDate", order_date);
        Self {
            header,
            customer_id: None,
            items: Vec::new(),
        }
    }

    pub fn header(&self) -> &Draft {
        &self.header
    }

    pub fn set(&mut self, field: &str, value: &str) {
        self.header.set(field, value);
    }

    pub fn customer_id(&self) -> Option<&str> {
        self.customer_id.as_deref()
    }

    /// Fills the contact fields and both addresses from the picked customer.
    pub fn choose_customer(&mut self, customer: &CatalogCustomer) {
        self.customer_id = Some(customer.id.clone());
        self.header.set("customerName", customer.customer_name.as_str());
        self.header.set("customerNumber", value_text(&customer.contact_number));
        self.header.set("customerEmail", customer.email.as_str());
        self.header.set("shippingAddress", customer.address.as_str());
        self.header.set("billingAddress", customer.address.as_str());
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn add_item(&mut self) {
        self.items.push(LineItem::default());
    }

    pub fn remove_item(&mut self, index: usize) {
        if index < self.items.len() {
            self.items.remove(index);
        }
    }

    /// Picking an item also takes its list price.
    pub fn choose_item(&mut self, index: usize, item: &CatalogItem) {
        if let Some(line) = self.items.get_mut(index) {
            line.item_id = item.id.clone();
            line.item_name = item.name.clone();
            line.price = item.unit_price();
        }
    }

    /// Quantities below one are raised to one.
    pub fn set_quantity(&mut self, index: usize, quantity: u32) {
        if let Some(line) = self.items.get_mut(index) {
            line.quantity = quantity.max(1);
        }
    }

    pub fn totals(&self) -> OrderTotals {
        OrderTotals::of(&self.items)
    }

    /// The `POST /api/orders` body: header fields, `customerId`, `items` and
    /// the three totals.
    pub fn submission(&self) -> Result<Record, StoreError> {
        if let Some(missing) = self.header.missing_required(ORDERS.form).first() {
            return Err(StoreError::MissingField(missing.to_string()));
        }
        if self.items.is_empty() {
            return Err(StoreError::EmptyOrder);
        }
        if let Some(blank) = self.items.iter().position(|l| l.item_name.trim().is_empty()) {
            return Err(StoreError::BlankLine(blank + 1));
        }

        let mut body: Record = ORDERS
            .form
            .iter()
            .map(|f| {
                let value = self.header.get(f.key).cloned().unwrap_or_default();
                (f.key.to_string(), value)
            })
            .collect();
        if let Some(id) = &self.customer_id {
            body.insert("customerId".to_string(), Value::String(id.clone()));
        }
        body.insert(
            "items".to_string(),
            Value::Array(self.items.iter().map(LineItem::to_value).collect()),
        );
        let totals = self.totals();
        body.insert("totalAmount".to_string(), json!(totals.total_amount));
        body.insert("taxAmount".to_string(), json!(totals.tax_amount));
        body.insert("netAmount".to_string(), json!(totals.net_amount));
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acme() -> CatalogCustomer {
        CatalogCustomer {
            id: "c1".to_string(),
            customer_name: "Acme".to_string(),
            contact_number: json!(5550100),
            email: "ops@acme.test".to_string(),
            address: "1 Harbour Rd".to_string(),
        }
    }

    fn widget() -> CatalogItem {
        CatalogItem {
            id: Some("i1".to_string()),
            name: "Widget".to_string(),
            price: json!(10.5),
        }
    }

    fn bolt() -> CatalogItem {
        CatalogItem {
            id: Some("i2".to_string()),
            name: "Bolt".to_string(),
            price: json!("4"),
        }
    }

    fn ready_order() -> NewOrder {
        let mut order = NewOrder::new("2024-03-01");
        order.choose_customer(&acme());
        order.add_item();
        order.choose_item(0, &widget());
        order.set_quantity(0, 2);
        order.add_item();
        order.choose_item(1, &bolt());
        order
    }

    #[test]
    fn test_totals_charge_eighteen_percent() {
        let totals = ready_order().totals();
        assert_eq!(totals.total_amount, 25.0);
        assert_eq!(totals.tax_amount, 4.5);
        assert_eq!(totals.net_amount, 29.5);
    }

    #[test]
    fn test_totals_round_to_cents() {
        let lines = [LineItem {
            quantity: 3,
            price: 3.33,
            ..LineItem::default()
        }];
        let totals = OrderTotals::of(&lines);
        assert_eq!(totals.total_amount, 9.99);
        assert_eq!(totals.tax_amount, 1.8);
        assert_eq!(totals.net_amount, 11.79);
        assert_eq!(OrderTotals::of(&[]), OrderTotals::default());
    }

    #[test]
    fn test_customer_fills_contact_and_addresses() {
        let order = ready_order();
        assert_eq!(order.customer_id(), Some("c1"));
        assert_eq!(order.header().text("customerNumber"), "5550100");
        assert_eq!(order.header().text("customerEmail"), "ops@acme.test");
        assert_eq!(order.header().text("billingAddress"), "1 Harbour Rd");
    }

    #[test]
    fn test_line_edits() {
        let mut order = ready_order();
        assert_eq!(order.items()[1].price, 4.0);
        assert_eq!(order.items()[1].quantity, 1);

        order.set_quantity(1, 0);
        assert_eq!(order.items()[1].quantity, 1);

        order.remove_item(0);
        order.remove_item(7);
        assert_eq!(order.items().len(), 1);
        assert_eq!(order.items()[0].item_name, "Bolt");
        assert_eq!(order.totals().net_amount, 4.72);
    }

    #[test]
    fn test_order_needs_items() {
        let mut order = NewOrder::new("2024-03-01");
        order.choose_customer(&acme());
        assert!(matches!(order.submission(), Err(StoreError::EmptyOrder)));

        order.add_item();
        assert!(matches!(order.submission(), Err(StoreError::BlankLine(1))));
    }

    #[test]
    fn test_header_checked_before_items() {
        let order = NewOrder::new("2024-03-01");
        assert!(matches!(
            order.submission(),
            Err(StoreError::MissingField(label)) if label == "Customer Name"
        ));
    }

    #[test]
    fn test_submission_body() {
        let body = ready_order().submission().unwrap();
        assert_eq!(body["customerId"], json!("c1"));
        assert_eq!(body["orderDate"], json!("2024-03-01"));
        assert_eq!(
            body["items"],
            json!([
                { "itemId": "i1", "itemName": "Widget", "quantity": 2, "price": 10.5 },
                { "itemId": "i2", "itemName": "Bolt", "quantity": 1, "price": 4.0 }
            ])
        );
        assert_eq!(body["totalAmount"], json!(25.0));
        assert_eq!(body["taxAmount"], json!(4.5));
        assert_eq!(body["netAmount"], json!(29.5));
    }
}
