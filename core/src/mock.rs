//! Scripted transport for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};

/// In-memory `Transport` that replays queued results and records requests.
///
/// Queue results with `push_*`; each `execute` pops the oldest one. When
/// the queue is empty the transport answers 404, which is what Trello
/// returns for an unknown id.
#[derive(Default)]
pub struct MockTransport {
    results: Mutex<VecDeque<Result<HttpResponse, ApiError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and body.
    pub fn push_response(&self, status: u16, body: impl Into<String>) {
        self.push_result(Ok(HttpResponse {
            status,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: body.into(),
        }));
    }

    /// Queue a 200 response carrying `value` as JSON.
    pub fn push_json(&self, value: serde_json::Value) {
        self.push_response(200, value.to_string());
    }

    /// Queue a transport failure.
    pub fn push_transport_error(&self, message: &str) {
        self.push_result(Err(ApiError::Transport(message.to_string())));
    }

    pub fn push_result(&self, result: Result<HttpResponse, ApiError>) {
        self.results.lock().unwrap().push_back(result);
    }

    /// Every request executed so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// URL of the most recent request.
    pub fn last_url(&self) -> Option<String> {
        self.requests.lock().unwrap().last().map(|r| r.url.clone())
    }
}

impl Transport for MockTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.lock().unwrap().push(request);
        self.results.lock().unwrap().pop_front().unwrap_or_else(|| {
            Ok(HttpResponse {
                status: 404,
                headers: Vec::new(),
                body: "The requested resource was not found.".to_string(),
            })
        })
    }
}
