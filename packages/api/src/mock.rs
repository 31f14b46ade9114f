use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::error::ApiError;
use crate::transport::{ApiRequest, ApiResponse, Transport};

/// In-memory transport for tests: records every request and answers from a
/// FIFO queue of canned responses. An empty queue answers with a transport
/// error so an unexpected call fails loudly.
#[derive(Clone, Debug, Default)]
pub struct MockTransport {
    requests: Arc<Mutex<Vec<ApiRequest>>>,
    responses: Arc<Mutex<VecDeque<Result<ApiResponse, String>>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a 200 response with `body`.
    pub fn respond(&self, body: Value) -> &Self {
        self.respond_with(ApiResponse::ok(body))
    }

    pub fn respond_with(&self, response: ApiResponse) -> &Self {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(Ok(response));
        }
        self
    }

    /// Queue a network failure.
    pub fn fail(&self, message: &str) -> &Self {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(Err(message.to_string()));
        }
        self
    }

    /// Every request sent so far, oldest first.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.lock().ok()?.last().cloned()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        let next = self
            .responses
            .lock()
            .map_err(|e| ApiError::Transport(e.to_string()))?
            .pop_front();
        match next {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(ApiError::Transport(message)),
            None => Err(ApiError::Transport("no response queued".to_string())),
        }
    }
}
