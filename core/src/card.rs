//! Trello cards and the members assigned to them.

use serde::{Deserialize, Serialize};

use crate::arguments::Arguments;
use crate::client::Client;
use crate::error::ApiError;
use crate::member::{fetch_members, Member};

/// A card on a Trello board.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
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
    pub id_board: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_list: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_members: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_url: Option<String>,
}

impl Card {
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
            .ok_or(ApiError::NoClient { entity: "card" })
    }

    /// Members assigned to this card.
    pub fn get_members(&self, args: &Arguments) -> Result<Vec<Member>, ApiError> {
        let client = self.attached_client()?;
        fetch_members(client, &format!("cards/{}/members", self.id), args)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::config::ClientConfig;
    use crate::mock::MockTransport;

    #[test]
    fn get_members_of_card() {
        let mock = Arc::new(MockTransport::new());
        let client = Client::with_transport(&ClientConfig::new("appkey", "usertoken"), mock.clone());

        mock.push_json(json!({"id": "c1", "name": "Ship it", "idBoard": "b1", "idMembers": ["m2"]}));
        let card = client.get_card("c1", &Arguments::new()).unwrap();
        assert_eq!(card.id_members, Some(vec!["m2".to_string()]));

        mock.push_json(json!([{"id": "m2", "username": "sam"}]));
        let members = card.get_members(&Arguments::new()).unwrap();

        assert_eq!(mock.last_url().as_deref(), Some("https://api.trello.com/1/cards/c1/members"));
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].username.as_deref(), Some("sam"));
        assert_eq!(members[0].client(), Some(&client));
    }

    #[test]
    fn error_status_is_propagated() {
        let mock = Arc::new(MockTransport::new());
        let client = Client::with_transport(&ClientConfig::new("appkey", "usertoken"), mock.clone());

        mock.push_json(json!({"id": "c1"}));
        let card = client.get_card("c1", &Arguments::new()).unwrap();

        mock.push_response(401, "unauthorized card permission requested");
        let err = card.get_members(&Arguments::new()).unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn detached_card_cannot_make_calls() {
        let card: Card = serde_json::from_value(json!({"id": "c1"})).unwrap();
        let err = card.get_members(&Arguments::new()).unwrap_err();
        assert!(matches!(err, ApiError::NoClient { entity: "card" }));
    }
}
