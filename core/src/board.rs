//! Trello boards and the members scoped to them.

use serde::{Deserialize, Serialize};

use crate::arguments::Arguments;
use crate::client::Client;
use crate::error::ApiError;
use crate::member::{fetch_members, Member};

/// A Trello board.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    #[serde(skip)]
    client: Option<Client>,

    id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,

    #[serde(default)]
    pub closed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_organization: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_url: Option<String>,
}

impl Board {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn client(&self) -> Option<&Client> {
        self.client.as_ref()
    }

    /// Override this board's connection to the API. Accessors set it
    /// automatically after every successful fetch.
    pub fn set_client(&mut self, client: Client) {
        self.client = Some(client);
    }

    fn attached_client(&self) -> Result<&Client, ApiError> {
        self.client
            .as_ref()
            .ok_or(ApiError::NoClient { entity: "board" })
    }

    /// Members of this board, each attached to this board's client.
    pub fn get_members(&self, args: &Arguments) -> Result<Vec<Member>, ApiError> {
        let client = self.attached_client()?;
        fetch_members(client, &format!("boards/{}/members", self.id), args)
    }
}
