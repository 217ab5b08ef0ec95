//! Trello organizations and their member lists.

use serde::{Deserialize, Serialize};

use crate::arguments::Arguments;
use crate::client::Client;
use crate::error::ApiError;
use crate::member::{fetch_members, Member};

/// A Trello organization (shown as a "Workspace" in the Trello UI).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    #[serde(skip)]
    client: Option<Client>,

    id: String,

    /// Short name used in URLs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl Organization {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn client(&self) -> Option<&Client> {
        self.client.as_ref()
    }

    pub fn set_client(&mut self, client: Client) {
        self.client = Some(client);
    }

    fn attached_client(&self) -> Result<&Client, ApiError> {
        self.client
            .as_ref()
            .ok_or(ApiError::NoClient { entity: "organization" })
    }

    /// All members of the organization.
    pub fn get_members(&self, args: &Arguments) -> Result<Vec<Member>, ApiError> {
        let client = self.attached_client()?;
        fetch_members(client, &format!("organizations/{}/members", self.id), args)
    }
}
