//! # ApiClient: request building and response checking
//!
//! Every request is built by [`ApiClient::request`], which reads the session
//! from storage at that moment and attaches its headers. There is no shared
//! mutable header state: logging out (clearing storage) takes effect on the
//! very next request.
//!
//! Responses go through one check, in this order:
//!
//! | Response | Result |
//! |----------|--------|
//! | 401 | [`ApiError::Unauthenticated`] |
//! | other non-2xx | [`ApiError::Status`] with the body's `message` |
//! | 2xx with `success: false` | [`ApiError::Rejected`] |
//! | 2xx | body decoded into the caller's type |

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use store::config::ApiConfig;
use store::{Session, SessionStorage};

use crate::error::{body_message, ApiError};
use crate::transport::{ApiRequest, Method, Transport};

/// `{ data: T }` wrapper used by most single-record endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

#[derive(Clone, Debug)]
pub struct ApiClient<T, S> {
    transport: T,
    storage: S,
    send_identity_headers: bool,
}

impl<T: Transport, S: SessionStorage> ApiClient<T, S> {
    pub fn new(transport: T, storage: S, config: &ApiConfig) -> Self {
        Self {
            transport,
            storage,
            send_identity_headers: config.send_identity_headers,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The session as currently persisted.
    pub fn session(&self) -> Session {
        Session::load(&self.storage)
    }

    /// A request carrying the current session's headers (none when signed out).
    pub fn request(&self, method: Method, path: impl Into<String>) -> ApiRequest {
        let mut request = ApiRequest::new(method, path);
        request.headers = self
            .session()
            .auth_headers(self.send_identity_headers)
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        request
    }

    /// Send a request and decode the checked response.
    pub async fn execute<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        let method = request.method;
        let path = request.path.clone();
        tracing::debug!("{method} {path}");

        let response = self.transport.send(request).await?;
        if response.status == 401 {
            return Err(ApiError::Unauthenticated);
        }
        if !response.is_success() {
            let message = body_message(&response.body)
                .unwrap_or_else(|| format!("{method} {path} failed"));
            return Err(ApiError::Status {
                status: response.status,
                message,
            });
        }
        if response.body.get("success") == Some(&Value::Bool(false)) {
            let message = body_message(&response.body).unwrap_or_else(|| "request failed".to_string());
            return Err(ApiError::Rejected(message));
        }
        Ok(serde_json::from_value(response.body)?)
    }

    pub async fn get<R: DeserializeOwned>(
        &self,
        path: impl Into<String>,
        query: Vec<(String, String)>,
    ) -> Result<R, ApiError> {
        let mut request = self.request(Method::Get, path);
        request.query = query;
        self.execute(request).await
    }

    /// `GET path` and unwrap the `data` envelope.
    pub async fn get_data<R: DeserializeOwned>(&self, path: impl Into<String>) -> Result<R, ApiError> {
        let envelope: Envelope<R> = self.get(path, Vec::new()).await?;
        Ok(envelope.data)
    }

    pub async fn send_json<R: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: impl Into<String>,
        body: &B,
    ) -> Result<R, ApiError> {
        let mut request = self.request(method, path);
        request.body = Some(serde_json::to_value(body)?);
        self.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use crate::transport::ApiResponse;
    use serde_json::json;
    use store::MemoryStorage;

    fn client(identity: bool) -> (ApiClient<MockTransport, MemoryStorage>, MockTransport, MemoryStorage) {
        let transport = MockTransport::new();
        let storage = MemoryStorage::new();
        let config = ApiConfig {
            send_identity_headers: identity,
            ..ApiConfig::default()
        };
        (
            ApiClient::new(transport.clone(), storage.clone(), &config),
            transport,
            storage,
        )
    }

    fn sign_in(storage: &MemoryStorage) {
        Session {
            token: Some("tok".to_string()),
            user_id: Some("u1".to_string()),
            user_email: Some("a@x.test".to_string()),
            user_name: Some("Ann Lee".to_string()),
            avatar_path: None,
        }
        .save(storage)
        .unwrap();
    }

    #[tokio::test]
    async fn test_signed_out_requests_carry_no_headers() {
        let (client, transport, _) = client(true);
        transport.respond(json!({}));
        let _: Value = client.get("/api/users", Vec::new()).await.unwrap();
        assert!(transport.last_request().unwrap().headers.is_empty());
    }

    #[tokio::test]
    async fn test_session_is_read_per_request() {
        let (client, transport, storage) = client(false);
        transport.respond(json!({})).respond(json!({}));

        sign_in(&storage);
        let _: Value = client.get("/api/users", Vec::new()).await.unwrap();
        let first = transport.last_request().unwrap();
        assert_eq!(first.header("Authorization"), Some("Bearer tok"));
        assert_eq!(first.header("user_id"), None);

        Session::clear(&storage).unwrap();
        let _: Value = client.get("/api/users", Vec::new()).await.unwrap();
        assert!(transport.last_request().unwrap().headers.is_empty());
    }

    #[tokio::test]
    async fn test_identity_headers_are_opt_in() {
        let (client, transport, storage) = client(true);
        sign_in(&storage);
        transport.respond(json!({}));
        let _: Value = client.get("/api/users", Vec::new()).await.unwrap();
        let request = transport.last_request().unwrap();
        assert_eq!(request.header("user_email"), Some("a@x.test"));
        assert_eq!(request.header("user_name"), Some("Ann Lee"));
    }

    #[tokio::test]
    async fn test_response_checks() {
        let (client, transport, _) = client(false);
        transport
            .respond_with(ApiResponse {
                status: 401,
                body: Value::Null,
            })
            .respond_with(ApiResponse {
                status: 500,
                body: json!({ "message": "database down" }),
            })
            .respond(json!({ "success": false, "message": "duplicate email" }))
            .fail("offline");

        let err = client.get::<Value>("/a", Vec::new()).await.unwrap_err();
        assert!(err.is_unauthenticated());

        let err = client.get::<Value>("/a", Vec::new()).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500, ref message } if message == "database down"));

        let err = client.get::<Value>("/a", Vec::new()).await.unwrap_err();
        assert!(matches!(err, ApiError::Rejected(ref m) if m == "duplicate email"));

        let err = client.get::<Value>("/a", Vec::new()).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[tokio::test]
    async fn test_envelope_and_body() {
        let (client, transport, _) = client(false);
        transport.respond(json!({ "success": true, "data": { "n": 3 } })).respond(json!({}));

        let data: Value = client.get_data("/api/orders/o1").await.unwrap();
        assert_eq!(data, json!({ "n": 3 }));

        let _: Value = client
            .send_json(Method::Put, "/api/orders/o1/status", &json!({ "status": "shipped" }))
            .await
            .unwrap();
        let request = transport.last_request().unwrap();
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.body, Some(json!({ "status": "shipped" })));
    }
}
