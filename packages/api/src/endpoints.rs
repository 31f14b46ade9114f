//! # Typed endpoints
//!
//! One method per backend call the console makes. Entity screens share the
//! generic list/CRUD calls, parameterized by [`EntityConfig`]:
//!
//! | Call | Request |
//! |------|---------|
//! | [`fetch_page`](ApiClient::fetch_page) | `GET /api/<entity>?page&limit&search&<filters>` |
//! | [`fetch_all`](ApiClient::fetch_all) | `GET /api/<entity>` |
//! | [`create`](ApiClient::create) | `POST /api/<entity>` |
//! | [`update`](ApiClient::update) | `PUT /api/<entity>/:id` |
//! | [`delete`](ApiClient::delete) | `POST /api/<entity>/delete {id}` |
//! | [`bulk_edit`](ApiClient::bulk_edit) | `PATCH /api/<entity>/bulk-edit {ids, ...fields}` |
//! | [`entity_options`](ApiClient::entity_options) | `GET /api/<entity>/options` |

use serde::Deserialize;
use serde_json::{json, Value};

use store::draft::value_text;
use store::models::{
    Assignee, DashboardSummary, EntityOptions, LoginResponse, NewTicket, OrderCatalog,
    OrderDetail, RegisterRequest, TicketDetail,
};
use store::order::OrderStatus;
use store::{EntityConfig, PageRequest, PageResult, Record, Session, SessionStorage};

use crate::client::{ApiClient, Envelope};
use crate::error::{body_message, ApiError};
use crate::transport::{Method, Transport};

#[derive(Deserialize)]
struct VerifyResponse {
    #[serde(default)]
    success: bool,
}

#[derive(Deserialize)]
struct AssigneeList {
    #[serde(default)]
    assignees: Vec<Assignee>,
}

#[derive(Deserialize)]
struct ListData {
    #[serde(default)]
    data: Vec<Value>,
}

impl<T: Transport, S: SessionStorage> ApiClient<T, S> {
    // ----- session -----

    /// `POST /api/login`. On success the session is persisted and returned.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let body = json!({ "email": email, "password": password });
        let response = match self
            .send_json::<LoginResponse, _>(Method::Post, "/api/login", &body)
            .await
        {
            Err(ApiError::Unauthenticated) => {
                return Err(ApiError::Rejected("Invalid email or password".to_string()))
            }
            other => other?,
        };
        let Some(token) = response.token.filter(|t| !t.is_empty()) else {
            let reason = response
                .data
                .as_ref()
                .map(value_text)
                .filter(|m| !m.is_empty())
                .or(response.message)
                .unwrap_or_else(|| "Login failed".to_string());
            return Err(ApiError::Rejected(reason));
        };
        let session = Session::from_login(token, &response.user.unwrap_or_default());
        session.save(self.storage())?;
        tracing::info!("signed in as {}", session.display_name());
        Ok(session)
    }

    /// `POST /api/register`. The backend signals refusal with `error: true`
    /// and the reason in `data`.
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        let body: Value = self.send_json(Method::Post, "/api/register", request).await?;
        let refused = body.get("error").is_some_and(|e| e != &Value::Bool(false) && !e.is_null());
        if refused {
            let reason = body
                .get("data")
                .map(value_text)
                .filter(|m| !m.is_empty())
                .or_else(|| body_message(&body))
                .unwrap_or_else(|| "Registration failed".to_string());
            return Err(ApiError::Rejected(reason));
        }
        Ok(())
    }

    /// `GET /api/verify-token`. No token means no request and `Unauthenticated`.
    pub async fn verify_token(&self) -> Result<(), ApiError> {
        if !self.session().is_authenticated() {
            return Err(ApiError::Unauthenticated);
        }
        let response: VerifyResponse = self.get("/api/verify-token", Vec::new()).await?;
        if response.success {
            Ok(())
        } else {
            Err(ApiError::Unauthenticated)
        }
    }

    /// Clear every persisted session key. Local only.
    pub fn logout(&self) -> Result<(), ApiError> {
        Session::clear(self.storage())?;
        tracing::info!("signed out");
        Ok(())
    }

    // ----- generic entity calls -----

    pub async fn fetch_page(
        &self,
        entity: &EntityConfig,
        request: &PageRequest,
    ) -> Result<PageResult, ApiError> {
        self.get(entity.endpoint, request.query_pairs()).await
    }

    /// Every record of an entity, ignoring paging, search and filters.
    pub async fn fetch_all(&self, entity: &EntityConfig) -> Result<Vec<Record>, ApiError> {
        let page: PageResult = self.get(entity.endpoint, Vec::new()).await?;
        Ok(page.rows)
    }

    pub async fn create(&self, entity: &EntityConfig, record: &Record) -> Result<(), ApiError> {
        let _: Value = self.send_json(Method::Post, entity.endpoint, record).await?;
        Ok(())
    }

    pub async fn update(&self, entity: &EntityConfig, id: &str, patch: &Record) -> Result<(), ApiError> {
        let _: Value = self
            .send_json(Method::Put, entity.item_path(id), patch)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, entity: &EntityConfig, id: &str) -> Result<(), ApiError> {
        let _: Value = self
            .send_json(Method::Post, entity.delete_path(), &json!({ "id": id }))
            .await?;
        Ok(())
    }

    /// `body` is `{ids, ...fields}` as built by [`store::BulkEdit`].
    pub async fn bulk_edit(&self, entity: &EntityConfig, body: &Record) -> Result<(), ApiError> {
        let _: Value = self
            .send_json(Method::Patch, entity.bulk_edit_path(), body)
            .await?;
        Ok(())
    }

    pub async fn entity_options(&self, entity: &EntityConfig) -> Result<EntityOptions, ApiError> {
        self.get_data(entity.options_path()).await
    }

    /// Filter values from an endpoint answering `{data: [value]}`.
    pub async fn filter_values(&self, endpoint: &str) -> Result<Vec<String>, ApiError> {
        let list: ListData = self.get(endpoint, Vec::new()).await?;
        Ok(list
            .data
            .iter()
            .map(value_text)
            .filter(|v| !v.is_empty())
            .collect())
    }

    /// `(value, label)` pairs from an endpoint answering `{data: [{..}]}`.
    pub async fn lookup(
        &self,
        endpoint: &str,
        value_key: &str,
        label_key: &str,
    ) -> Result<Vec<(String, String)>, ApiError> {
        let list: ListData = self.get(endpoint, Vec::new()).await?;
        Ok(list
            .data
            .iter()
            .filter_map(|item| {
                let value = item.get(value_key).map(value_text)?;
                let label = item
                    .get(label_key)
                    .map(value_text)
                    .filter(|l| !l.is_empty())
                    .unwrap_or_else(|| value.clone());
                Some((value, label))
            })
            .collect())
    }

    // ----- dashboard -----

    pub async fn dashboard(&self) -> Result<DashboardSummary, ApiError> {
        self.get_data("/api/dashboard").await
    }

    // ----- orders -----

    pub async fn order(&self, id: &str) -> Result<OrderDetail, ApiError> {
        self.get_data(format!("/api/orders/{id}")).await
    }

    /// Customers and items the create-order form picks from.
    pub async fn order_catalog(&self) -> Result<OrderCatalog, ApiError> {
        self.get_data("/api/orders/customers-items").await
    }

    /// `body` is built by [`store::NewOrder::submission`].
    pub async fn create_order(&self, body: &Record) -> Result<(), ApiError> {
        let _: Value = self.send_json(Method::Post, "/api/orders", body).await?;
        Ok(())
    }

    pub async fn set_order_status(&self, id: &str, status: OrderStatus) -> Result<(), ApiError> {
        let _: Value = self
            .send_json(
                Method::Put,
                format!("/api/orders/{id}/status"),
                &json!({ "status": status }),
            )
            .await?;
        Ok(())
    }

    // ----- tickets -----

    pub async fn ticket(&self, id: &str) -> Result<TicketDetail, ApiError> {
        self.get_data(format!("/api/tickets/{id}")).await
    }

    pub async fn update_ticket(&self, id: &str, patch: &Record) -> Result<(), ApiError> {
        let _: Value = self
            .send_json(Method::Put, format!("/api/tickets/{id}"), patch)
            .await?;
        Ok(())
    }

    pub async fn add_comment(&self, ticket_id: &str, text: &str) -> Result<(), ApiError> {
        let body = json!({ "ticketId": ticket_id, "text": text });
        let _: Value = self
            .send_json(Method::Put, "/api/tickets/comment", &body)
            .await?;
        Ok(())
    }

    /// Assignees matching `search`. A blank search matches nobody and sends
    /// no request.
    pub async fn assignees(&self, search: &str) -> Result<Vec<Assignee>, ApiError> {
        let search = search.trim();
        if search.is_empty() {
            return Ok(Vec::new());
        }
        let list: AssigneeList = self
            .get(
                "/api/tickets/assignees",
                vec![("search".to_string(), search.to_string())],
            )
            .await?;
        Ok(list.assignees)
    }

    pub async fn raise_ticket(&self, ticket: &NewTicket) -> Result<(), ApiError> {
        let _: Value = self.send_json(Method::Post, "/api/tickets", ticket).await?;
        Ok(())
    }

    // ----- finance -----

    /// `GET /api/recon?recon_month&recon_year`.
    pub async fn reconciliations(&self, month: u32, year: i32) -> Result<Vec<Record>, ApiError> {
        let query = vec![
            ("recon_month".to_string(), month.to_string()),
            ("recon_year".to_string(), year.to_string()),
        ];
        let envelope: Envelope<Option<Vec<Record>>> = self.get("/api/recon", query).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    // ----- profile -----

    pub async fn profile(&self) -> Result<Record, ApiError> {
        let email = self.session().user_email.ok_or(ApiError::Unauthenticated)?;
        let envelope: Envelope<Record> = self
            .send_json(Method::Post, "/api/users/profile", &json!({ "email": email }))
            .await?;
        Ok(envelope.data)
    }

    /// `PUT /api/users/update`. The backend finds the user by `email`, so the
    /// signed-in address is added to the patch.
    pub async fn update_profile(&self, patch: &Record) -> Result<(), ApiError> {
        let email = self.session().user_email.ok_or(ApiError::Unauthenticated)?;
        let mut body = patch.clone();
        body.insert("email".to_string(), Value::String(email));
        let _: Value = self.send_json(Method::Put, "/api/users/update", &body).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use store::config::ApiConfig;
    use store::entity::{CUSTOMERS, INVENTORY, USERS};
    use store::session::{SESSION_KEYS, TOKEN_KEY};
    use store::MemoryStorage;

    fn client() -> (ApiClient<MockTransport, MemoryStorage>, MockTransport, MemoryStorage) {
        let transport = MockTransport::new();
        let storage = MemoryStorage::new();
        (
            ApiClient::new(transport.clone(), storage.clone(), &ApiConfig::default()),
            transport,
            storage,
        )
    }

    fn login_body() -> Value {
        json!({
            "token": "jwt",
            "user": {
                "user_id": "u1",
                "user_email": "ann@x.test",
                "user_profile": "/img/ann.png",
                "user_first_name": "Ann",
                "user_last_name": "Lee"
            }
        })
    }

    #[tokio::test]
    async fn test_login_persists_session() {
        let (client, transport, storage) = client();
        transport.respond(login_body());

        let session = client.login("ann@x.test", "pw").await.unwrap();
        assert_eq!(session.display_name(), "Ann Lee");
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("jwt"));
        assert_eq!(storage.get("userProfile").as_deref(), Some("/img/ann.png"));

        let request = transport.last_request().unwrap();
        assert_eq!(request.path, "/api/login");
        assert_eq!(request.body, Some(json!({ "email": "ann@x.test", "password": "pw" })));
    }

    #[tokio::test]
    async fn test_login_without_token_is_rejected() {
        let (client, transport, storage) = client();
        transport.respond(json!({ "data": "User not found" }));
        let err = client.login("x@x.test", "pw").await.unwrap_err();
        assert!(matches!(err, ApiError::Rejected(ref m) if m == "User not found"));
        assert!(storage.get(TOKEN_KEY).is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_keys_and_headers() {
        let (client, transport, storage) = client();
        transport.respond(login_body()).respond(json!({ "data": [] }));
        client.login("ann@x.test", "pw").await.unwrap();

        client.logout().unwrap();
        for key in SESSION_KEYS {
            assert!(storage.get(key).is_none(), "{key} still stored");
        }
        client.fetch_all(&USERS).await.unwrap();
        assert!(transport.last_request().unwrap().headers.is_empty());
    }

    #[test]
    fn test_logout_twice_is_harmless() {
        let (client, transport, storage) = client();
        client.logout().unwrap();
        client.logout().unwrap();
        assert!(storage.get(TOKEN_KEY).is_none());
        assert!(client.session().token.is_none());
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_verify_token_without_session_sends_nothing() {
        let (client, transport, _) = client();
        assert!(client.verify_token().await.unwrap_err().is_unauthenticated());
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_verify_token_failure() {
        let (client, transport, _) = client();
        transport.respond(login_body()).respond(json!({ "success": false }));
        client.login("ann@x.test", "pw").await.unwrap();
        assert!(client.verify_token().await.is_err());
    }

    #[tokio::test]
    async fn test_register_refusal() {
        let (client, transport, _) = client();
        transport
            .respond(json!({ "error": true, "data": "Email already registered" }))
            .respond(json!({ "error": false }));
        let request = RegisterRequest {
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ann@x.test".to_string(),
            password: "pw".to_string(),
        };
        let err = client.register(&request).await.unwrap_err();
        assert!(matches!(err, ApiError::Rejected(ref m) if m == "Email already registered"));
        client.register(&request).await.unwrap();
        assert_eq!(
            transport.last_request().unwrap().body.unwrap()["firstName"],
            json!("Ann")
        );
    }

    #[tokio::test]
    async fn test_fetch_page_sends_exact_request() {
        let (client, transport, _) = client();
        transport.respond(json!({ "data": [{ "_id": "a" }, { "_id": "b" }], "totalCount": 52 }));

        let mut request = PageRequest::new(50);
        request.set_filter("status", "in stock");
        request.set_page(2);
        let page = client.fetch_page(&INVENTORY, &request).await.unwrap();

        assert_eq!(page.rows.len(), 2);
        assert_eq!(page.total_count, 52);
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.path, "/api/inventory");
        assert_eq!(sent.query_value("page"), Some("2"));
        assert_eq!(sent.query_value("limit"), Some("50"));
        assert_eq!(sent.query_value("status"), Some("in stock"));
        assert_eq!(sent.query_value("search"), None);
    }

    #[tokio::test]
    async fn test_crud_paths() {
        let (client, transport, _) = client();
        for _ in 0..3 {
            transport.respond(json!({ "success": true }));
        }
        let record = json!({ "city": "Lagos" }).as_object().cloned().unwrap();

        client.create(&CUSTOMERS, &record).await.unwrap();
        client.update(&CUSTOMERS, "c1", &record).await.unwrap();
        client.delete(&CUSTOMERS, "c1").await.unwrap();

        let sent: Vec<_> = transport
            .requests()
            .into_iter()
            .map(|r| (r.method, r.path, r.body))
            .collect();
        assert_eq!(
            sent,
            vec![
                (Method::Post, "/api/customers".to_string(), Some(json!({ "city": "Lagos" }))),
                (Method::Put, "/api/customers/c1".to_string(), Some(json!({ "city": "Lagos" }))),
                (Method::Post, "/api/customers/delete".to_string(), Some(json!({ "id": "c1" }))),
            ]
        );
    }

    #[tokio::test]
    async fn test_lookup_lists() {
        let (client, transport, _) = client();
        transport
            .respond(json!({ "data": [{ "warehouse_id": "W1", "name": "North" }, { "name": "no id" }] }))
            .respond(json!({ "data": ["admin", "staff", null] }))
            .respond(json!({ "success": true, "data": { "statuses": ["in stock"], "suppliers": [], "categories": ["tools"] } }));

        let warehouses = client.lookup("/api/warehouse/lov", "warehouse_id", "name").await.unwrap();
        assert_eq!(warehouses, vec![("W1".to_string(), "North".to_string())]);

        let roles = client.filter_values("/api/users/roles").await.unwrap();
        assert_eq!(roles, vec!["admin", "staff"]);

        let options = client.entity_options(&INVENTORY).await.unwrap();
        assert_eq!(options.categories, vec!["tools"]);
    }

    #[tokio::test]
    async fn test_order_catalog_and_create() {
        let (client, transport, _) = client();
        transport
            .respond(json!({ "data": {
                "customers": [{ "_id": "c1", "customer_name": "Acme" }],
                "items": [{ "_id": "i1", "name": "Widget", "price": 10 }]
            } }))
            .respond(json!({ "success": true }));

        let catalog = client.order_catalog().await.unwrap();
        assert_eq!(transport.last_request().unwrap().path, "/api/orders/customers-items");
        assert_eq!(catalog.items[0].unit_price(), 10.0);

        let body = json!({ "customerId": "c1", "netAmount": 11.8 }).as_object().cloned().unwrap();
        client.create_order(&body).await.unwrap();
        let sent = transport.last_request().unwrap();
        assert_eq!((sent.method, sent.path.as_str()), (Method::Post, "/api/orders"));
        assert_eq!(sent.body, Some(json!({ "customerId": "c1", "netAmount": 11.8 })));
    }

    #[tokio::test]
    async fn test_blank_assignee_search_sends_nothing() {
        let (client, transport, _) = client();

        assert!(client.assignees("").await.unwrap().is_empty());
        assert!(client.assignees("   ").await.unwrap().is_empty());
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_ticket_calls() {
        let (client, transport, _) = client();
        transport
            .respond(json!({ "assignees": [{ "_id": "u2", "email": "kim@x.test" }] }))
            .respond(json!({ "success": true }));

        let found = client.assignees("ki").await.unwrap();
        assert_eq!(found[0].email, "kim@x.test");
        assert_eq!(transport.last_request().unwrap().query_value("search"), Some("ki"));

        client.add_comment("t1", "Looking into it").await.unwrap();
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.path, "/api/tickets/comment");
        assert_eq!(sent.body, Some(json!({ "ticketId": "t1", "text": "Looking into it" })));
    }

    #[tokio::test]
    async fn test_reconciliations_query() {
        let (client, transport, _) = client();
        transport.respond(json!({ "data": [{ "reconciliationId": "R1" }] }));
        let rows = client.reconciliations(3, 2024).await.unwrap();
        assert_eq!(rows.len(), 1);
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.query_value("recon_month"), Some("3"));
        assert_eq!(sent.query_value("recon_year"), Some("2024"));
    }

    #[tokio::test]
    async fn test_profile_update_names_the_user() {
        let (client, transport, storage) = client();
        storage.set("token", "t").unwrap();
        storage.set("userEmail", "ann@example.com").unwrap();
        transport.respond(json!({ "success": true }));

        let patch = json!({ "phoneNumber": "555" }).as_object().cloned().unwrap();
        client.update_profile(&patch).await.unwrap();
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.path, "/api/users/update");
        assert_eq!(
            sent.body,
            Some(json!({ "phoneNumber": "555", "email": "ann@example.com" }))
        );
    }

    #[tokio::test]
    async fn test_profile_needs_email() {
        let (client, transport, _) = client();
        assert!(client.profile().await.unwrap_err().is_unauthenticated());
        assert_eq!(transport.request_count(), 0);
    }
}
