//! # User actions
//!
//! The mutating flows a screen triggers, each returning an [`Outcome`]. Every
//! outcome maps to exactly one notification; failures are also logged here so
//! screens don't have to.
//!
//! Local validation happens before any request: a blank required field, an
//! empty selection or an unchanged draft never reach the network.

use store::order::OrderWorkflow;
use store::{
    csv_export, BulkEdit, BulkSubmission, Draft, EntityConfig, FieldSpec, NewOrder, OrderStatus,
    Selection, SessionStorage, Severity, StoreError, Submission,
};
use store::models::NewTicket;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::Transport;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Saved. Close the form and refresh.
    Done(String),
    /// Nothing to send.
    Unchanged(String),
    /// Blocked by local validation. Nothing was sent.
    Invalid(String),
    /// The request failed. Keep the form and its draft.
    Failed(String),
}

impl Outcome {
    pub fn message(&self) -> &str {
        match self {
            Outcome::Done(m) | Outcome::Unchanged(m) | Outcome::Invalid(m) | Outcome::Failed(m) => m,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Outcome::Done(_) => Severity::Success,
            Outcome::Unchanged(_) => Severity::Info,
            Outcome::Invalid(_) => Severity::Warning,
            Outcome::Failed(_) => Severity::Error,
        }
    }

    pub fn succeeded(&self) -> bool {
        matches!(self, Outcome::Done(_))
    }
}

fn failed(what: &str, err: &ApiError) -> Outcome {
    tracing::error!("{what} failed: {err}");
    match err {
        ApiError::Rejected(reason) | ApiError::Status { message: reason, .. } => {
            Outcome::Failed(format!("Failed to {what}: {reason}"))
        }
        _ => Outcome::Failed(format!("Failed to {what}. Please try again.")),
    }
}

fn invalid(err: &StoreError) -> Outcome {
    match err {
        StoreError::MissingField(label) => Outcome::Invalid(format!("{label} is required")),
        StoreError::EmptySelection => Outcome::Invalid("Select at least one row".to_string()),
        StoreError::EmptyOrder => Outcome::Invalid("Add at least one item".to_string()),
        StoreError::BlankLine(line) => Outcome::Invalid(format!("Choose an item for line {line}")),
        other => Outcome::Invalid(other.to_string()),
    }
}

/// Create or update from a record form.
pub async fn submit_draft<T: Transport, S: SessionStorage>(
    client: &ApiClient<T, S>,
    entity: &EntityConfig,
    draft: &Draft,
) -> Outcome {
    let noun = entity.noun.to_lowercase();
    let submission = match draft.submission(entity.form) {
        Ok(s) => s,
        Err(e) => return invalid(&e),
    };
    match submission {
        Submission::NoChanges => Outcome::Unchanged("No changes to save".to_string()),
        Submission::Create(record) => match client.create(entity, &record).await {
            Ok(()) => Outcome::Done(format!("{} created successfully", entity.noun)),
            Err(e) => failed(&format!("create {noun}"), &e),
        },
        Submission::Update { id, patch } => match client.update(entity, &id, &patch).await {
            Ok(()) => Outcome::Done(format!("{} updated successfully", entity.noun)),
            Err(e) => failed(&format!("update {noun}"), &e),
        },
    }
}

pub async fn delete_record<T: Transport, S: SessionStorage>(
    client: &ApiClient<T, S>,
    entity: &EntityConfig,
    id: &str,
) -> Outcome {
    match client.delete(entity, id).await {
        Ok(()) => Outcome::Done(format!("{} deleted successfully", entity.noun)),
        Err(e) => failed(&format!("delete {}", entity.noun.to_lowercase()), &e),
    }
}

pub async fn apply_bulk_edit<T: Transport, S: SessionStorage>(
    client: &ApiClient<T, S>,
    entity: &EntityConfig,
    edit: &BulkEdit,
    selection: &Selection,
) -> Outcome {
    match edit.submission(selection) {
        Err(e) => invalid(&e),
        Ok(BulkSubmission::NoChanges) => Outcome::Unchanged("No fields selected to update".to_string()),
        Ok(BulkSubmission::Apply(body)) => match client.bulk_edit(entity, &body).await {
            Ok(()) => Outcome::Done(format!("{} records updated", selection.len())),
            Err(e) => failed("apply bulk edit", &e),
        },
    }
}

/// A rendered export, ready to download.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: &'static str,
    pub contents: String,
}

/// Fetch everything and render the entity's export columns.
pub async fn export_csv<T: Transport, S: SessionStorage>(
    client: &ApiClient<T, S>,
    entity: &EntityConfig,
) -> Result<CsvExport, Outcome> {
    let rows = client
        .fetch_all(entity)
        .await
        .map_err(|e| failed("export data", &e))?;
    let contents = csv_export::to_csv(entity.export.columns, &rows).map_err(|e| {
        tracing::error!("csv export failed: {e}");
        Outcome::Failed("Failed to export data. Please try again.".to_string())
    })?;
    Ok(CsvExport {
        filename: entity.export.filename,
        contents,
    })
}

/// Create an order with its lines and totals.
pub async fn place_order<T: Transport, S: SessionStorage>(
    client: &ApiClient<T, S>,
    order: &NewOrder,
) -> Outcome {
    let body = match order.submission() {
        Ok(body) => body,
        Err(e) => return invalid(&e),
    };
    match client.create_order(&body).await {
        Ok(()) => Outcome::Done("Order created successfully!".to_string()),
        Err(e) => failed("create order", &e),
    }
}

pub async fn change_order_status<T: Transport, S: SessionStorage>(
    client: &ApiClient<T, S>,
    workflow: &OrderWorkflow,
    order_id: &str,
    current: OrderStatus,
    selected: OrderStatus,
) -> Outcome {
    if current == selected {
        return Outcome::Unchanged("No changes made to the status.".to_string());
    }
    let Some(target) = workflow.status_change(current, selected) else {
        return Outcome::Invalid(format!("An order can't move from {current} to {selected}"));
    };
    match client.set_order_status(order_id, target).await {
        Ok(()) => Outcome::Done("Order status updated successfully!".to_string()),
        Err(e) => failed("update order status", &e),
    }
}

/// Save the incident detail form as a minimal patch.
pub async fn save_ticket<T: Transport, S: SessionStorage>(
    client: &ApiClient<T, S>,
    ticket_id: &str,
    draft: &Draft,
    fields: &[FieldSpec],
) -> Outcome {
    match draft.submission(fields) {
        Err(e) => invalid(&e),
        Ok(Submission::NoChanges) => Outcome::Unchanged("No changes to save".to_string()),
        Ok(Submission::Update { patch, .. }) | Ok(Submission::Create(patch)) => {
            match client.update_ticket(ticket_id, &patch).await {
                Ok(()) => Outcome::Done("Ticket Updated Successfully!".to_string()),
                Err(e) => failed("update ticket", &e),
            }
        }
    }
}

pub async fn add_comment<T: Transport, S: SessionStorage>(
    client: &ApiClient<T, S>,
    ticket_id: &str,
    text: &str,
) -> Outcome {
    let text = text.trim();
    if text.is_empty() {
        return Outcome::Invalid("Write a comment first".to_string());
    }
    match client.add_comment(ticket_id, text).await {
        Ok(()) => Outcome::Done("Comment Submitted Successfully!".to_string()),
        Err(e) => failed("submit comment", &e),
    }
}

pub async fn raise_ticket<T: Transport, S: SessionStorage>(
    client: &ApiClient<T, S>,
    ticket: &NewTicket,
) -> Outcome {
    if !ticket.missing_required().is_empty() {
        return Outcome::Invalid("Please fill in all required fields.".to_string());
    }
    let mut ticket = ticket.clone();
    if ticket.user_id.is_none() {
        ticket.user_id = client.session().user_id;
    }
    match client.raise_ticket(&ticket).await {
        Ok(()) => Outcome::Done("Ticket submitted successfully!".to_string()),
        Err(e) => failed("submit the ticket", &e),
    }
}

pub async fn save_profile<T: Transport, S: SessionStorage>(
    client: &ApiClient<T, S>,
    draft: &Draft,
    fields: &[FieldSpec],
) -> Outcome {
    match draft.submission(fields) {
        Err(e) => invalid(&e),
        Ok(Submission::NoChanges) => Outcome::Unchanged("No changes to save".to_string()),
        Ok(Submission::Update { patch, .. }) | Ok(Submission::Create(patch)) => {
            match client.update_profile(&patch).await {
                Ok(()) => Outcome::Done("Profile updated successfully!".to_string()),
                Err(e) => failed("update profile", &e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use serde_json::{json, Value};
    use store::config::ApiConfig;
    use store::entity::{CUSTOMERS, INVENTORY, TICKET_FIELDS, USERS};
    use store::models::{CatalogCustomer, CatalogItem};
    use store::{MemoryStorage, Record};

    fn client() -> (ApiClient<MockTransport, MemoryStorage>, MockTransport) {
        let transport = MockTransport::new();
        let client = ApiClient::new(transport.clone(), MemoryStorage::new(), &ApiConfig::default());
        (client, transport)
    }

    fn customer() -> Record {
        json!({
            "_id": "c1",
            "customer_name": "Acme",
            "contact_number": "555",
            "email": "ops@acme.test",
            "city": "Accra",
            "credit_limit": 5000
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[tokio::test]
    async fn test_unchanged_edit_sends_nothing() {
        let (client, transport) = client();
        let draft = Draft::edit("c1", &customer(), CUSTOMERS.form);

        let outcome = submit_draft(&client, &CUSTOMERS, &draft).await;
        assert!(matches!(outcome, Outcome::Unchanged(_)));
        assert_eq!(outcome.severity(), Severity::Info);
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_edit_sends_one_minimal_patch() {
        let (client, transport) = client();
        transport.respond(json!({ "success": true }));
        let mut draft = Draft::edit("c1", &customer(), CUSTOMERS.form);
        draft.set("city", "Kumasi");
        draft.set("credit_limit", "6000");

        let outcome = submit_draft(&client, &CUSTOMERS, &draft).await;
        assert!(outcome.succeeded());
        assert_eq!(transport.request_count(), 1);
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.path, "/api/customers/c1");
        assert_eq!(sent.body, Some(json!({ "city": "Kumasi", "credit_limit": "6000" })));
    }

    #[tokio::test]
    async fn test_missing_required_field_blocks_create() {
        let (client, transport) = client();
        let mut draft = Draft::create(CUSTOMERS.form);
        draft.set("customer_name", "Globex");

        let outcome = submit_draft(&client, &CUSTOMERS, &draft).await;
        assert_eq!(outcome, Outcome::Invalid("Contact Number is required".to_string()));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_save_reports_error() {
        let (client, transport) = client();
        transport.fail("offline");
        let mut draft = Draft::edit("c1", &customer(), CUSTOMERS.form);
        draft.set("city", "Tema");

        let outcome = submit_draft(&client, &CUSTOMERS, &draft).await;
        assert_eq!(outcome.severity(), Severity::Error);
        assert!(!outcome.succeeded());
    }

    #[tokio::test]
    async fn test_place_order_posts_lines_and_totals() {
        let (client, transport) = client();
        let mut order = NewOrder::new("2024-05-02");
        order.choose_customer(&CatalogCustomer {
            id: "c1".to_string(),
            customer_name: "Acme".to_string(),
            email: "ops@acme.test".to_string(),
            address: "1 Harbour Rd".to_string(),
            ..CatalogCustomer::default()
        });

        let outcome = place_order(&client, &order).await;
        assert_eq!(outcome, Outcome::Invalid("Add at least one item".to_string()));
        order.add_item();
        let outcome = place_order(&client, &order).await;
        assert_eq!(outcome, Outcome::Invalid("Choose an item for line 1".to_string()));
        assert_eq!(transport.request_count(), 0);

        transport.respond(json!({ "success": true }));
        order.choose_item(
            0,
            &CatalogItem {
                id: Some("i1".to_string()),
                name: "Widget".to_string(),
                price: json!(50),
            },
        );
        order.set_quantity(0, 2);
        let outcome = place_order(&client, &order).await;
        assert!(outcome.succeeded());
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.path, "/api/orders");
        let body = sent.body.unwrap();
        assert_eq!(body["items"][0]["quantity"], json!(2));
        assert_eq!(body["totalAmount"], json!(100.0));
        assert_eq!(body["taxAmount"], json!(18.0));
        assert_eq!(body["netAmount"], json!(118.0));
    }

    #[tokio::test]
    async fn test_bulk_edit() {
        let (client, transport) = client();
        let mut edit = BulkEdit::new();
        edit.set("status", "discontinued");

        let outcome = apply_bulk_edit(&client, &INVENTORY, &edit, &Selection::new()).await;
        assert!(matches!(outcome, Outcome::Invalid(_)));
        assert_eq!(transport.request_count(), 0);

        transport.respond(json!({ "success": true }));
        let mut selection = Selection::new();
        selection.toggle("i1");
        let outcome = apply_bulk_edit(&client, &INVENTORY, &edit, &selection).await;
        assert!(outcome.succeeded());
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, crate::Method::Patch);
        assert_eq!(sent.body, Some(json!({ "ids": ["i1"], "status": "discontinued" })));
    }

    #[tokio::test]
    async fn test_export_ignores_list_state() {
        let (client, transport) = client();
        transport.respond(json!({
            "data": [{ "first_name": "Ann", "email": "ann@x.test", "role": "admin", "_id": "u1" }],
            "totalCount": 1
        }));

        let export = export_csv(&client, &USERS).await.unwrap();
        assert_eq!(export.filename, "users.csv");
        let header = export.contents.lines().next().unwrap();
        assert_eq!(
            header,
            "first_name,last_name,email,status,created_at,updated_at,phone_number,role"
        );
        assert_eq!(export.contents.lines().nth(1), Some("Ann,,ann@x.test,,,,,admin"));
        assert!(transport.last_request().unwrap().query.is_empty());
    }

    #[tokio::test]
    async fn test_order_status_change() {
        let (client, transport) = client();
        let workflow = OrderWorkflow::default();

        let same = change_order_status(&client, &workflow, "o1", OrderStatus::Shipped, OrderStatus::Shipped).await;
        assert!(matches!(same, Outcome::Unchanged(_)));
        assert_eq!(transport.request_count(), 0);

        transport.respond(json!({ "success": true }));
        let changed =
            change_order_status(&client, &workflow, "o1", OrderStatus::Shipped, OrderStatus::Cancelled).await;
        assert!(changed.succeeded());
        assert_eq!(transport.request_count(), 1);
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.path, "/api/orders/o1/status");
        assert_eq!(sent.body, Some(json!({ "status": "cancelled" })));
    }

    #[tokio::test]
    async fn test_ticket_save_sends_patch() {
        let (client, transport) = client();
        transport.respond(json!({ "success": true }));
        let snapshot = json!({
            "issueType": "Bug", "department": "Support", "subject": "Login broken",
            "priority": "high", "status": "open", "assignedTo": null, "description": "500 on submit"
        });
        let mut draft = Draft::edit("t1", snapshot.as_object().unwrap(), TICKET_FIELDS);
        draft.set("status", "resolved");

        let outcome = save_ticket(&client, "t1", &draft, TICKET_FIELDS).await;
        assert!(outcome.succeeded());
        assert_eq!(transport.last_request().unwrap().body, Some(json!({ "status": "resolved" })));
    }

    #[tokio::test]
    async fn test_blank_comment_is_not_sent() {
        let (client, transport) = client();
        let outcome = add_comment(&client, "t1", "   ").await;
        assert!(matches!(outcome, Outcome::Invalid(_)));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_raise_ticket_validation() {
        let (client, transport) = client();
        let ticket = NewTicket {
            issue_type: "Bug".to_string(),
            subject: "Printer".to_string(),
            ..NewTicket::default()
        };
        let outcome = raise_ticket(&client, &ticket).await;
        assert_eq!(outcome.severity(), Severity::Warning);
        assert_eq!(transport.request_count(), 0);

        transport.respond(json!({ "success": true }));
        let ticket = NewTicket {
            description: "Out of toner".to_string(),
            ..ticket
        };
        assert!(raise_ticket(&client, &ticket).await.succeeded());
        let body: Value = transport.last_request().unwrap().body.unwrap();
        assert_eq!(body["issueType"], json!("Bug"));
    }
}
