//! # Entity registry
//!
//! Every list screen in the console is the same component driven by one
//! [`EntityConfig`]: which endpoint to page through, which columns to show,
//! which fields the create/edit form has, which filters and bulk-edit fields
//! exist and which columns go into the CSV export.
//!
//! | Entity | Endpoint | Create | Edit/Delete | Filters | Bulk edit | Export file |
//! |--------|----------|--------|-------------|---------|-----------|-------------|
//! | customers | `/api/customers` | yes | yes | - | - | `customers.csv` |
//! | inventory | `/api/inventory` | yes | - | search, status | status, supplier, category, price, cost | `inventory.csv` |
//! | orders | `/api/orders` | yes | - | status | - | `orders.csv` |
//! | sales | `/api/sales` | - | - | - | - | `sales.csv` |
//! | users | `/api/users` | - | - | role, status | - | `users.csv` |
//! | warehouses | `/api/warehouse` | yes | - | status | - | `warehouse.csv` |
//! | tickets | `/api/tickets` | - | - | status | - | `tickets.csv` |
//!
//! Orders and tickets link each row to a detail screen.

use chrono::{DateTime, NaiveDate};

use crate::draft::{value_text, Record};

/// How a grid cell renders its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnFormat {
    Text,
    /// ISO timestamp shown as a calendar date.
    Date,
    /// Rendered as a colored chip.
    Status,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
    pub format: ColumnFormat,
}

impl Column {
    pub const fn text(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            format: ColumnFormat::Text,
        }
    }

    pub const fn date(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            format: ColumnFormat::Date,
        }
    }

    pub const fn status(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            format: ColumnFormat::Status,
        }
    }

    /// Cell text for a record.
    pub fn cell(&self, record: &Record) -> String {
        let text = record.get(self.key).map(value_text).unwrap_or_default();
        match self.format {
            ColumnFormat::Date => format_date(&text),
            ColumnFormat::Text | ColumnFormat::Status => text,
        }
    }
}

/// `2024-05-01T10:00:00Z` → `2024-05-01`. Anything unparseable is shown as is.
pub fn format_date(text: &str) -> String {
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return ts.date_naive().to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.to_string();
    }
    text.to_string()
}

/// Input widget for a form field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Number,
    Date,
    TextArea,
    /// Fixed list of values.
    Choice(&'static [&'static str]),
    /// Named list from `GET /api/<entity>/options` (`statuses`, `suppliers`, `categories`).
    Options(&'static str),
    /// Value list served by another endpoint, as `{data: [{value_key, label_key}]}`.
    Lookup {
        endpoint: &'static str,
        value_key: &'static str,
        label_key: &'static str,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Initial value in create mode.
    pub default: &'static str,
}

impl FieldSpec {
    pub const fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            required: false,
            default: "",
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn with_default(mut self, default: &'static str) -> Self {
        self.default = default;
        self
    }
}

/// Where a filter dropdown gets its values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterOptions {
    Fixed(&'static [&'static str]),
    /// `GET endpoint` → `{data: [string]}`.
    Remote(&'static str),
}

/// A discrete filter sent as a query parameter named `key`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub options: FilterOptions,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExportSpec {
    pub filename: &'static str,
    pub columns: &'static [&'static str],
}

/// Which detail screen a row links to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailKind {
    Order,
    Ticket,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntityConfig {
    /// Route segment and registry key.
    pub key: &'static str,
    pub title: &'static str,
    /// Singular noun for messages ("Customer deleted").
    pub noun: &'static str,
    pub endpoint: &'static str,
    pub id_field: &'static str,
    pub columns: &'static [Column],
    /// Create/edit form. Empty when records are read-only here.
    pub form: &'static [FieldSpec],
    pub can_edit: bool,
    pub can_delete: bool,
    /// Bulk-edit fields. Empty disables bulk edit and row selection.
    pub bulk_fields: &'static [FieldSpec],
    pub searchable: bool,
    pub filters: &'static [FilterSpec],
    pub detail: Option<DetailKind>,
    pub export: ExportSpec,
}

impl EntityConfig {
    pub fn can_create(&self) -> bool {
        !self.form.is_empty()
    }

    pub fn supports_bulk_edit(&self) -> bool {
        !self.bulk_fields.is_empty()
    }

    pub fn item_path(&self, id: &str) -> String {
        format!("{}/{id}", self.endpoint)
    }

    pub fn delete_path(&self) -> String {
        format!("{}/delete", self.endpoint)
    }

    pub fn bulk_edit_path(&self) -> String {
        format!("{}/bulk-edit", self.endpoint)
    }

    pub fn options_path(&self) -> String {
        format!("{}/options", self.endpoint)
    }

    /// Whether any field needs `GET /api/<entity>/options`.
    pub fn needs_options(&self) -> bool {
        self.form
            .iter()
            .chain(self.bulk_fields)
            .any(|f| matches!(f.kind, FieldKind::Options(_)))
    }
}

const INVENTORY_STATUSES: &[&str] = &["in stock", "out of stock", "discontinued"];
const ORDER_STATUSES: &[&str] = &["pending", "shipped", "delivered", "cancelled"];
const TICKET_STATUSES: &[&str] = &["open", "in progress", "resolved", "closed"];
const USER_STATUSES: &[&str] = &["active", "inactive"];
const CUSTOMER_TYPES: &[&str] = &["individual", "business"];
const PAYMENT_METHODS: &[&str] = &["credit card", "paypal", "cash on delivery"];
const PAYMENT_STATUSES: &[&str] = &["paid", "unpaid", "pending"];

pub static CUSTOMERS: EntityConfig = EntityConfig {
    key: "customers",
    title: "Customers",
    noun: "Customer",
    endpoint: "/api/customers",
    id_field: "_id",
    columns: &[
        Column::text("customer_name", "Customer Name"),
        Column::text("contact_number", "Contact Number"),
        Column::text("email", "Email"),
        Column::text("address", "Address"),
        Column::text("city", "City"),
        Column::text("state", "State"),
        Column::text("zip_code", "Zip Code"),
        Column::text("country", "Country"),
        Column::text("company_name", "Company Name"),
        Column::text("customer_type", "Customer Type"),
        Column::text("credit_limit", "Credit Limit"),
        Column::text("balance_due", "Balance Due"),
        Column::date("created_at", "Created At"),
        Column::date("updated_at", "Updated At"),
    ],
    form: &[
        FieldSpec::new("customer_name", "Customer Name", FieldKind::Text).required(),
        FieldSpec::new("contact_number", "Contact Number", FieldKind::Text).required(),
        FieldSpec::new("email", "Email", FieldKind::Email).required(),
        FieldSpec::new("address", "Address", FieldKind::Text),
        FieldSpec::new("city", "City", FieldKind::Text),
        FieldSpec::new("state", "State", FieldKind::Text),
        FieldSpec::new("zip_code", "Zip Code", FieldKind::Text),
        FieldSpec::new("country", "Country", FieldKind::Text),
        FieldSpec::new("customer_type", "Customer Type", FieldKind::Choice(CUSTOMER_TYPES)),
        FieldSpec::new("company_name", "Company Name", FieldKind::Text),
        FieldSpec::new("credit_limit", "Credit Limit", FieldKind::Number),
        FieldSpec::new("balance_due", "Balance Due", FieldKind::Number),
    ],
    can_edit: true,
    can_delete: true,
    bulk_fields: &[],
    searchable: false,
    filters: &[],
    detail: None,
    export: ExportSpec {
        filename: "customers.csv",
        columns: &[
            "customer_name",
            "contact_number",
            "email",
            "address",
            "city",
            "state",
            "zip_code",
            "country",
            "company_name",
            "customer_type",
            "credit_limit",
            "balance_due",
            "created_at",
            "updated_at",
        ],
    },
};

pub static INVENTORY: EntityConfig = EntityConfig {
    key: "inventory",
    title: "Inventory",
    noun: "Item",
    endpoint: "/api/inventory",
    id_field: "_id",
    columns: &[
        Column::status("status", "Status"),
        Column::text("sku", "SKU"),
        Column::text("name", "Name"),
        Column::text("description", "Description"),
        Column::text("category", "Category"),
        Column::text("on_hand_quantity", "On-Hand Quantity"),
        Column::text("price", "Price"),
        Column::text("cost", "Cost"),
        Column::text("supplier", "Supplier"),
        Column::text("warehouse", "Warehouse"),
        Column::date("dateAdded", "Date Added"),
        Column::date("expiryDate", "Expiry Date"),
    ],
    form: &[
        FieldSpec::new("name", "Name", FieldKind::Text).required(),
        FieldSpec::new("description", "Description", FieldKind::Text),
        FieldSpec::new("category", "Category", FieldKind::Text).required(),
        FieldSpec::new("on_hand_quantity", "On-Hand Quantity", FieldKind::Number).required(),
        FieldSpec::new("price", "Price", FieldKind::Number).required(),
        FieldSpec::new("cost", "Cost", FieldKind::Number),
        FieldSpec::new("supplier", "Supplier", FieldKind::Text),
        FieldSpec::new(
            "warehouse",
            "Warehouse",
            FieldKind::Lookup {
                endpoint: "/api/warehouse/lov",
                value_key: "warehouse_id",
                label_key: "name",
            },
        )
        .required(),
        FieldSpec::new("dateAdded", "Date Added", FieldKind::Date),
        FieldSpec::new("expiryDate", "Expiry Date", FieldKind::Date),
        FieldSpec::new("status", "Status", FieldKind::Choice(INVENTORY_STATUSES))
            .with_default("in stock"),
    ],
    can_edit: false,
    can_delete: false,
    bulk_fields: &[
        FieldSpec::new("status", "Status", FieldKind::Options("statuses")),
        FieldSpec::new("supplier", "Supplier", FieldKind::Options("suppliers")),
        FieldSpec::new("category", "Category", FieldKind::Options("categories")),
        FieldSpec::new("price", "Price", FieldKind::Number),
        FieldSpec::new("cost", "Cost", FieldKind::Number),
    ],
    searchable: true,
    filters: &[FilterSpec {
        key: "status",
        label: "Status",
        options: FilterOptions::Fixed(INVENTORY_STATUSES),
    }],
    detail: None,
    export: ExportSpec {
        filename: "inventory.csv",
        columns: &[
            "sku",
            "name",
            "description",
            "category",
            "on_hand_quantity",
            "price",
            "cost",
            "supplier",
            "warehouse",
            "dateAdded",
            "expiryDate",
            "status",
        ],
    },
};

pub static ORDERS: EntityConfig = EntityConfig {
    key: "orders",
    title: "Orders",
    noun: "Order",
    endpoint: "/api/orders",
    id_field: "orderId",
    columns: &[
        Column::text("orderId", "Order ID"),
        Column::text("lineCount", "Lines"),
        Column::text("customerName", "Customer Name"),
        Column::text("customerNumber", "Customer Number"),
        Column::text("customerEmail", "Customer Email"),
        Column::date("orderDate", "Order Date"),
        Column::date("shippingDate", "Shipping Date"),
        Column::status("status", "Status"),
        Column::text("totalAmount", "Total Amount"),
        Column::text("taxAmount", "Tax Amount"),
        Column::text("netAmount", "Net Amount"),
        Column::text("paymentMethod", "Payment Method"),
        Column::text("paymentStatus", "Payment Status"),
        Column::text("shippingAddress", "Shipping Address"),
        Column::text("billingAddress", "Billing Address"),
    ],
    form: &[
        FieldSpec::new("customerName", "Customer Name", FieldKind::Text).required(),
        FieldSpec::new("customerNumber", "Customer Number", FieldKind::Text),
        FieldSpec::new("customerEmail", "Customer Email", FieldKind::Email).required(),
        FieldSpec::new("orderDate", "Order Date", FieldKind::Date).required(),
        FieldSpec::new("shippingAddress", "Shipping Address", FieldKind::TextArea).required(),
        FieldSpec::new("billingAddress", "Billing Address", FieldKind::TextArea),
        FieldSpec::new("paymentMethod", "Payment Method", FieldKind::Choice(PAYMENT_METHODS)),
        FieldSpec::new("paymentStatus", "Payment Status", FieldKind::Choice(PAYMENT_STATUSES)),
    ],
    can_edit: false,
    can_delete: false,
    bulk_fields: &[],
    searchable: false,
    filters: &[FilterSpec {
        key: "status",
        label: "Status",
        options: FilterOptions::Remote("/api/orders/status"),
    }],
    detail: Some(DetailKind::Order),
    export: ExportSpec {
        filename: "orders.csv",
        columns: &[
            "orderId",
            "customerName",
            "customerNumber",
            "customerEmail",
            "orderDate",
            "shippingDate",
            "status",
            "totalAmount",
            "taxAmount",
            "netAmount",
            "paymentMethod",
            "paymentStatus",
            "paymentDate",
            "shippingAddress",
            "billingAddress",
        ],
    },
};

pub static SALES: EntityConfig = EntityConfig {
    key: "sales",
    title: "Sales",
    noun: "Sale",
    endpoint: "/api/sales",
    id_field: "orderNumber",
    columns: &[
        Column::text("orderNumber", "Order Number"),
        Column::text("customerName", "Customer Name"),
        Column::text("customerEmail", "Customer Email"),
        Column::text("customerPhone", "Customer Phone"),
        Column::text("totalAmount", "Total Amount"),
        Column::status("paymentStatus", "Payment Status"),
        Column::status("orderStatus", "Order Status"),
        Column::date("createdAt", "Created At"),
    ],
    form: &[],
    can_edit: false,
    can_delete: false,
    bulk_fields: &[],
    searchable: false,
    filters: &[],
    detail: None,
    export: ExportSpec {
        filename: "sales.csv",
        columns: &[
            "customerName",
            "customerEmail",
            "customerPhone",
            "orderNumber",
            "totalAmount",
            "paymentStatus",
            "orderStatus",
            "createdAt",
            "items",
            "updatedAt",
        ],
    },
};

pub static USERS: EntityConfig = EntityConfig {
    key: "users",
    title: "Users",
    noun: "User",
    endpoint: "/api/users",
    id_field: "_id",
    columns: &[
        Column::text("first_name", "First Name"),
        Column::text("last_name", "Last Name"),
        Column::text("email", "Email"),
        Column::text("phone_number", "Phone Number"),
        Column::text("role", "Role"),
        Column::status("status", "Status"),
        Column::date("created_at", "Created At"),
        Column::date("last_login", "Last Login"),
    ],
    form: &[],
    can_edit: false,
    can_delete: false,
    bulk_fields: &[],
    searchable: false,
    filters: &[
        FilterSpec {
            key: "role",
            label: "Role",
            options: FilterOptions::Remote("/api/users/roles"),
        },
        FilterSpec {
            key: "status",
            label: "Status",
            options: FilterOptions::Fixed(USER_STATUSES),
        },
    ],
    detail: None,
    export: ExportSpec {
        filename: "users.csv",
        columns: &[
            "first_name",
            "last_name",
            "email",
            "status",
            "created_at",
            "updated_at",
            "phone_number",
            "role",
        ],
    },
};

pub static WAREHOUSES: EntityConfig = EntityConfig {
    key: "warehouses",
    title: "Warehouses",
    noun: "Warehouse",
    endpoint: "/api/warehouse",
    id_field: "warehouse_id",
    columns: &[
        Column::status("status", "Status"),
        Column::text("warehouse_id", "Warehouse ID"),
        Column::text("name", "Name"),
        Column::text("location", "Location"),
        Column::text("capacity", "Capacity"),
        Column::text("current_stock", "Current Stock"),
        Column::text("managerName", "Manager Name"),
        Column::text("managerNumber", "Manager Number"),
        Column::text("managerEmail", "Manager Email"),
        Column::text("contact_number", "Contact Number"),
    ],
    form: &[
        FieldSpec::new("warehouse_id", "Warehouse ID", FieldKind::Text).required(),
        FieldSpec::new("name", "Name", FieldKind::Text).required(),
        FieldSpec::new("location", "Location", FieldKind::Text).required(),
        FieldSpec::new("capacity", "Capacity", FieldKind::Number).required(),
        FieldSpec::new("contact_number", "Contact Number", FieldKind::Text),
        FieldSpec::new("status", "Status", FieldKind::Choice(USER_STATUSES)).with_default("active"),
        FieldSpec::new("manager_id", "Manager ID", FieldKind::Text),
        FieldSpec::new("manager_name", "Manager Name", FieldKind::Text),
    ],
    can_edit: false,
    can_delete: false,
    bulk_fields: &[],
    searchable: false,
    filters: &[FilterSpec {
        key: "status",
        label: "Status",
        options: FilterOptions::Remote("/api/warehouse/status"),
    }],
    detail: None,
    export: ExportSpec {
        filename: "warehouse.csv",
        columns: &[
            "warehouse_id",
            "name",
            "location",
            "capacity",
            "current_stock",
            "contact_number",
            "status",
            "manager_name",
        ],
    },
};

pub static TICKETS: EntityConfig = EntityConfig {
    key: "incidents",
    title: "Incidents",
    noun: "Ticket",
    endpoint: "/api/tickets",
    id_field: "_id",
    columns: &[
        Column::text("ticketId", "Ticket ID"),
        Column::text("subject", "Subject"),
        Column::text("issueType", "Issue Type"),
        Column::text("department", "Department"),
        Column::text("priority", "Priority"),
        Column::status("status", "Status"),
        Column::date("createdAt", "Created At"),
    ],
    form: &[],
    can_edit: false,
    can_delete: false,
    bulk_fields: &[],
    searchable: false,
    filters: &[FilterSpec {
        key: "status",
        label: "Status",
        options: FilterOptions::Fixed(TICKET_STATUSES),
    }],
    detail: Some(DetailKind::Ticket),
    export: ExportSpec {
        filename: "tickets.csv",
        columns: &[
            "ticketId",
            "subject",
            "issueType",
            "priority",
            "status",
            "department",
            "createdAt",
        ],
    },
};

/// Every list screen, in navigation order.
pub static REGISTRY: [&EntityConfig; 7] = [
    &USERS, &INVENTORY, &ORDERS, &SALES, &WAREHOUSES, &CUSTOMERS, &TICKETS,
];

pub fn find(key: &str) -> Option<&'static EntityConfig> {
    REGISTRY.iter().copied().find(|e| e.key == key)
}

const ISSUE_TYPES: &[&str] = &["Bug", "Billing", "Feature Request", "UI Issues", "Performance", "Other"];
const DEPARTMENTS: &[&str] = &["Support", "Sales", "Billing", "Technical", "Other"];
const PRIORITIES: &[&str] = &["low", "medium", "high", "critical"];

/// Fields editable on the incident detail screen.
pub const TICKET_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("issueType", "Issue Type", FieldKind::Choice(ISSUE_TYPES)),
    FieldSpec::new("department", "Department", FieldKind::Choice(DEPARTMENTS)),
    FieldSpec::new("subject", "Subject", FieldKind::Text).required(),
    FieldSpec::new("priority", "Priority", FieldKind::Choice(PRIORITIES)),
    FieldSpec::new("status", "Status", FieldKind::Choice(TICKET_STATUSES)),
    FieldSpec::new("assignedTo", "Assigned To", FieldKind::Text),
    FieldSpec::new("description", "Description", FieldKind::TextArea).required(),
];

/// The raise-ticket form.
pub const RAISE_TICKET_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("issueType", "Issue Type", FieldKind::Choice(ISSUE_TYPES)).required(),
    FieldSpec::new("priority", "Priority", FieldKind::Choice(PRIORITIES)).with_default("low"),
    FieldSpec::new("department", "Department", FieldKind::Choice(DEPARTMENTS)),
    FieldSpec::new("subject", "Subject", FieldKind::Text).required(),
    FieldSpec::new("description", "Description", FieldKind::TextArea).required(),
];

/// Fields editable on the profile screen.
pub const PROFILE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("firstName", "First Name", FieldKind::Text).required(),
    FieldSpec::new("lastName", "Last Name", FieldKind::Text).required(),
    FieldSpec::new("phoneNumber", "Phone Number", FieldKind::Text),
];

/// Columns of the order detail line-item table.
pub const ORDER_ITEM_COLUMNS: &[Column] = &[
    Column::text("itemName", "Item Name"),
    Column::text("quantity", "Quantity"),
    Column::text("taxRate", "Tax Rate"),
    Column::text("totalPrice", "Total Price"),
    Column::text("unitPrice", "Price"),
];

/// Columns of the financial reconciliation table.
pub const RECON_COLUMNS: &[Column] = &[
    Column::text("reconciliationId", "Reconciliation ID"),
    Column::text("recon_month", "Reconciliation Month"),
    Column::text("recon_year", "Reconciliation Year"),
    Column::text("totalIncome", "Total Income"),
    Column::text("totalExpenses", "Total Expenses"),
    Column::text("totalReconciled", "Total Reconciled"),
    Column::text("createdBy", "Created By"),
    Column::text("updatedBy", "Updated By"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_registry_keys_are_unique() {
        let mut keys: Vec<_> = REGISTRY.iter().map(|e| e.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), REGISTRY.len());
        assert_eq!(find("warehouses").map(|e| e.endpoint), Some("/api/warehouse"));
        assert!(find("nope").is_none());
    }

    #[test]
    fn test_paths() {
        assert_eq!(CUSTOMERS.item_path("c1"), "/api/customers/c1");
        assert_eq!(CUSTOMERS.delete_path(), "/api/customers/delete");
        assert_eq!(INVENTORY.bulk_edit_path(), "/api/inventory/bulk-edit");
        assert_eq!(INVENTORY.options_path(), "/api/inventory/options");
    }

    #[test]
    fn test_capabilities() {
        assert!(CUSTOMERS.can_create());
        assert!(!SALES.can_create());
        assert!(INVENTORY.supports_bulk_edit());
        assert!(INVENTORY.needs_options());
        assert!(!CUSTOMERS.needs_options());
    }

    #[test]
    fn test_required_form_fields_exist() {
        for entity in REGISTRY {
            for field in entity.form {
                assert!(!field.label.is_empty(), "{}.{}", entity.key, field.key);
            }
        }
        let required: Vec<_> = CUSTOMERS
            .form
            .iter()
            .filter(|f| f.required)
            .map(|f| f.key)
            .collect();
        assert_eq!(required, vec!["customer_name", "contact_number", "email"]);
    }

    #[test]
    fn test_date_cells() {
        let record = json!({ "created_at": "2024-05-01T10:00:00Z", "city": 12 })
            .as_object()
            .cloned()
            .unwrap();
        assert_eq!(Column::date("created_at", "Created").cell(&record), "2024-05-01");
        assert_eq!(Column::text("city", "City").cell(&record), "12");
        assert_eq!(Column::text("missing", "Missing").cell(&record), "");
        assert_eq!(format_date("soon"), "soon");
    }
}
