//! The Trello member resource.
//!
//! # Design
//! A `Member` only ever comes out of a fetch: it has no public constructor
//! and its id cannot be changed once decoded. Besides its data it carries the
//! `Client` that fetched it, so it can make its own follow-up calls
//! (`get_boards`, `get_organizations`). The client is never serialized and is
//! replaced only through `set_client`.

use serde::{Deserialize, Serialize};

use crate::arguments::Arguments;
use crate::board::Board;
use crate::client::Client;
use crate::error::ApiError;
use crate::organization::Organization;

/// A Trello user.
///
/// <https://developer.atlassian.com/cloud/trello/rest/api-group-members/>
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(skip)]
    client: Option<Client>,

    id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initials: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_hash: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,

    /// Only present when the token is allowed to see it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_boards: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_organizations: Option<Vec<String>>,
}

impl Member {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The client this member makes its own calls through.
    pub fn client(&self) -> Option<&Client> {
        self.client.as_ref()
    }

    /// Replace the client this member uses for follow-up calls.
    ///
    /// Accessors set it automatically; call this to move a member onto a
    /// different client (for example one holding another user's token).
    pub fn set_client(&mut self, client: Client) {
        self.client = Some(client);
    }

    fn attached_client(&self) -> Result<&Client, ApiError> {
        self.client
            .as_ref()
            .ok_or(ApiError::NoClient { entity: "member" })
    }

    /// Boards this member belongs to.
    pub fn get_boards(&self, args: &Arguments) -> Result<Vec<Board>, ApiError> {
        let client = self.attached_client()?;
        let mut boards: Vec<Board> = client.get(&format!("members/{}/boards", self.id), args)?;
        for board in &mut boards {
            board.set_client(client.clone());
        }
        Ok(boards)
    }

    /// Organizations (workspaces) this member belongs to.
    pub fn get_organizations(&self, args: &Arguments) -> Result<Vec<Organization>, ApiError> {
        let client = self.attached_client()?;
        let mut orgs: Vec<Organization> =
            client.get(&format!("members/{}/organizations", self.id), args)?;
        for org in &mut orgs {
            org.set_client(client.clone());
        }
        Ok(orgs)
    }
}

/// GET a member collection through `client` and attach `client` to every
/// member, keeping the order the service returned.
pub(crate) fn fetch_members(
    client: &Client,
    path: &str,
    args: &Arguments,
) -> Result<Vec<Member>, ApiError> {
    let mut members: Vec<Member> = client.get(path, args)?;
    for member in &mut members {
        member.set_client(client.clone());
    }
    Ok(members)
}
