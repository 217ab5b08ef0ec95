//! HTTP transport types and the blocking transport.
//!
//! # Design
//! Requests and responses are plain data. `Client` builds an `HttpRequest`,
//! hands it to a [`Transport`], and parses the `HttpResponse` it gets back.
//! The transport is the only piece that touches the network, so tests swap
//! it for a scripted one and the rest of the client stays deterministic.
//!
//! Every call this client makes is a GET, so the request carries no method
//! and no body.

use std::time::Duration;

use crate::error::ApiError;

/// An HTTP GET request described as plain data.
///
/// `query` already contains the credentials; never log it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Executes requests built by `Client`.
///
/// Implementations return `Ok` for every response the server produced,
/// whatever its status; status interpretation belongs to the client. `Err`
/// is reserved for requests that never got an answer.
pub trait Transport: Send + Sync {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Blocking transport backed by a shared `ureq::Agent`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(crate::config::DEFAULT_TIMEOUT_SECS))
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = self.agent.get(&request.url);
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        let mut response = builder
            .query_pairs(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .call()?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.body_mut().read_to_string()?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_param_finds_first_match() {
        let req = HttpRequest {
            url: "https://api.trello.com/1/members/me".to_string(),
            query: vec![
                ("fields".to_string(), "username".to_string()),
                ("key".to_string(), "k".to_string()),
            ],
            headers: Vec::new(),
        };
        assert_eq!(req.query_param("fields"), Some("username"));
        assert_eq!(req.query_param("token"), None);
    }

    #[test]
    fn unreachable_host_is_a_transport_error() {
        // Nothing listens on the loopback discard port.
        let transport = UreqTransport::new(Duration::from_secs(2));
        let err = transport
            .execute(HttpRequest {
                url: "http://127.0.0.1:9/1/members/me".to_string(),
                query: Vec::new(),
                headers: Vec::new(),
            })
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
