//! Shared request helper and client-level accessors for the Trello API.
//!
//! # Design
//! `Client` is a cheap handle around an `Arc`: base URL, credentials and the
//! transport never change after construction, so every fetched entity can
//! hold its own clone and make follow-up calls without borrowing from the
//! caller. Each GET is split into `build_get` (produces the request),
//! the transport round-trip, and `parse_response` (status check and JSON
//! decode). Only the middle step performs I/O.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::arguments::Arguments;
use crate::board::Board;
use crate::card::Card;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::member::Member;
use crate::organization::Organization;

/// Handle to the Trello API.
///
/// Clones share the same connection pool and credentials. Equality is handle
/// identity: two clones compare equal, two separately built clients do not.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    base_url: String,
    key: String,
    token: Option<String>,
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Client for the public API using the blocking ureq transport.
    pub fn new(key: impl Into<String>, token: impl Into<String>) -> Self {
        Self::from_config(&ClientConfig::new(key, token))
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        let transport = UreqTransport::new(Duration::from_secs(config.timeout_secs));
        Self::with_transport(config, Arc::new(transport))
    }

    /// Client that sends every request through `transport`.
    pub fn with_transport(config: &ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                base_url: config.base_url.trim_end_matches('/').to_string(),
                key: config.key.clone(),
                token: config.token.clone(),
                transport,
            }),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Build the GET request for `path` (relative to the base URL).
    ///
    /// Credentials are appended after the caller's arguments and replace the
    /// caller's `key`, and its `token` when the client holds one. A key-only
    /// client forwards a per-call `token` argument unchanged.
    pub fn build_get(&self, path: &str, args: &Arguments) -> HttpRequest {
        let has_token = self.inner.token.is_some();
        let mut query: Vec<(String, String)> = args
            .iter()
            .filter(|(k, _)| *k != "key" && !(has_token && *k == "token"))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        query.push(("key".to_string(), self.inner.key.clone()));
        if let Some(token) = &self.inner.token {
            query.push(("token".to_string(), token.clone()));
        }

        HttpRequest {
            url: format!("{}/{}", self.inner.base_url, path.trim_start_matches('/')),
            query,
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }

    /// Check the status and decode the JSON body into `T`.
    pub fn parse_response<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    /// GET `path` with `args` and decode the response into `T`.
    ///
    /// Errors from the transport, the status check and the decode step are
    /// returned as-is. Nothing is retried.
    pub fn get<T: DeserializeOwned>(&self, path: &str, args: &Arguments) -> Result<T, ApiError> {
        let request = self.build_get(path, args);
        tracing::debug!(path, "trello GET");

        let response = self.inner.transport.execute(request).inspect_err(|err| {
            tracing::debug!(path, error = %err, "trello transport failed");
        })?;

        if (200..300).contains(&response.status) {
            tracing::debug!(path, status = response.status, "trello response");
        } else {
            tracing::warn!(path, status = response.status, "trello request failed");
        }
        self.parse_response(response)
    }

    /// Fetch a member by id or username.
    pub fn get_member(&self, member_id: &str, args: &Arguments) -> Result<Member, ApiError> {
        let mut member: Member = self.get(&format!("members/{member_id}"), args)?;
        member.set_client(self.clone());
        Ok(member)
    }

    /// Fetch the member the token belongs to.
    pub fn get_my_member(&self, args: &Arguments) -> Result<Member, ApiError> {
        let mut member: Member = self.get("members/me", args)?;
        member.set_client(self.clone());
        Ok(member)
    }

    /// Boards the token's member belongs to.
    pub fn get_my_boards(&self, args: &Arguments) -> Result<Vec<Board>, ApiError> {
        let mut boards: Vec<Board> = self.get("members/me/boards", args)?;
        for board in &mut boards {
            board.set_client(self.clone());
        }
        Ok(boards)
    }

    pub fn get_board(&self, board_id: &str, args: &Arguments) -> Result<Board, ApiError> {
        let mut board: Board = self.get(&format!("boards/{board_id}"), args)?;
        board.set_client(self.clone());
        Ok(board)
    }

    pub fn get_card(&self, card_id: &str, args: &Arguments) -> Result<Card, ApiError> {
        let mut card: Card = self.get(&format!("cards/{card_id}"), args)?;
        card.set_client(self.clone());
        Ok(card)
    }

    pub fn get_organization(&self, org_id: &str, args: &Arguments) -> Result<Organization, ApiError> {
        let mut org: Organization = self.get(&format!("organizations/{org_id}"), args)?;
        org.set_client(self.clone());
        Ok(org)
    }
}

impl PartialEq for Client {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Client {}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url)
            .field("has_token", &self.inner.token.is_some())
            .finish_non_exhaustive()
    }
}

/// Map non-success status codes to `ApiError::HttpError`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
