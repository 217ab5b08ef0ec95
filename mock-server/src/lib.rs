//! In-memory stand-in for the part of the Trello API the client uses.
//!
//! Serves a fixed directory of members, boards, cards and organizations under
//! `/1/...`. Every request must carry `key=TEST_KEY` and a known token. A
//! `fields=a,b` query keeps only `id` plus the named fields, like Trello.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::net::TcpListener;

pub const TEST_KEY: &str = "test-key";
/// Token belonging to `alice` (`m1`).
pub const TEST_TOKEN: &str = "test-token";
/// Token belonging to `bob` (`m2`).
pub const OTHER_TOKEN: &str = "other-token";

const NOT_FOUND: &str = "The requested resource was not found.";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecord {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub initials: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub id_boards: Vec<String>,
    pub id_organizations: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardRecord {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub closed: bool,
    pub id_organization: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub id: String,
    pub name: String,
    pub id_board: String,
    pub id_members: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationRecord {
    pub id: String,
    pub name: String,
    pub display_name: String,
}

/// Read-only fixture data served by [`app`].
#[derive(Clone, Debug)]
pub struct Directory {
    pub members: Vec<MemberRecord>,
    pub boards: Vec<BoardRecord>,
    pub cards: Vec<CardRecord>,
    pub organizations: Vec<OrganizationRecord>,
    tokens: HashMap<String, String>,
}

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl Directory {
    pub fn seeded() -> Self {
        let members = vec![
            MemberRecord {
                id: "m1".into(),
                username: "alice".into(),
                full_name: "Alice Archer".into(),
                initials: "AA".into(),
                email: Some("alice@example.com".into()),
                id_boards: ids(&["board1", "board2"]),
                id_organizations: ids(&["org1"]),
            },
            MemberRecord {
                id: "m2".into(),
                username: "bob".into(),
                full_name: "Bob Baker".into(),
                initials: "BB".into(),
                email: None,
                id_boards: ids(&["board1"]),
                id_organizations: ids(&["org1"]),
            },
            MemberRecord {
                id: "m3".into(),
                username: "carol".into(),
                full_name: "Carol Cook".into(),
                initials: "CC".into(),
                email: None,
                id_boards: ids(&["board2"]),
                id_organizations: Vec::new(),
            },
        ];
        let boards = vec![
            BoardRecord {
                id: "board1".into(),
                name: "Roadmap".into(),
                desc: "What ships next".into(),
                closed: false,
                id_organization: Some("org1".into()),
            },
            BoardRecord {
                id: "board2".into(),
                name: "Personal".into(),
                desc: String::new(),
                closed: false,
                id_organization: None,
            },
        ];
        let cards = vec![
            CardRecord {
                id: "card1".into(),
                name: "Ship the client".into(),
                id_board: "board1".into(),
                id_members: ids(&["m2", "m1"]),
            },
            CardRecord {
                id: "card2".into(),
                name: "Nobody's card".into(),
                id_board: "board2".into(),
                id_members: Vec::new(),
            },
        ];
        let organizations = vec![OrganizationRecord {
            id: "org1".into(),
            name: "acme".into(),
            display_name: "Acme Inc".into(),
        }];
        let tokens = HashMap::from([
            (TEST_TOKEN.to_string(), "m1".to_string()),
            (OTHER_TOKEN.to_string(), "m2".to_string()),
        ]);

        Self {
            members,
            boards,
            cards,
            organizations,
            tokens,
        }
    }

    fn member(&self, id_or_username: &str) -> Option<&MemberRecord> {
        self.members
            .iter()
            .find(|m| m.id == id_or_username || m.username == id_or_username)
    }

    fn members_by_id(&self, ids: &[String]) -> Vec<&MemberRecord> {
        ids.iter()
            .filter_map(|id| self.members.iter().find(|m| &m.id == id))
            .collect()
    }
}

pub type Db = Arc<Directory>;

type ApiResult = Result<Json<Value>, (StatusCode, &'static str)>;

pub fn app() -> Router {
    let db: Db = Arc::new(Directory::seeded());
    Router::new()
        .route("/1/members/{id}", get(get_member))
        .route("/1/members/{id}/boards", get(member_boards))
        .route("/1/members/{id}/organizations", get(member_organizations))
        .route("/1/boards/{id}", get(get_board))
        .route("/1/boards/{id}/members", get(board_members))
        .route("/1/cards/{id}", get(get_card))
        .route("/1/cards/{id}/members", get(card_members))
        .route("/1/organizations/{id}", get(get_organization))
        .route("/1/organizations/{id}/members", get(organization_members))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Check credentials and return the id of the member the token belongs to.
fn authenticate<'a>(db: &'a Directory, params: &HashMap<String, String>) -> Result<&'a str, (StatusCode, &'static str)> {
    if params.get("key").map(String::as_str) != Some(TEST_KEY) {
        return Err((StatusCode::UNAUTHORIZED, "invalid key"));
    }
    params
        .get("token")
        .and_then(|token| db.tokens.get(token))
        .map(String::as_str)
        .ok_or((StatusCode::UNAUTHORIZED, "invalid token"))
}

/// Resolve `me` to the token's member, anything else by id or username.
fn resolve_member<'a>(db: &'a Directory, id: &str, me: &str) -> Result<&'a MemberRecord, (StatusCode, &'static str)> {
    let lookup = if id == "me" { me } else { id };
    db.member(lookup).ok_or((StatusCode::NOT_FOUND, NOT_FOUND))
}

/// Serialize `record`, keeping only `id` and the requested fields when the
/// query names some.
fn render<T: Serialize>(record: &T, params: &HashMap<String, String>) -> Value {
    let mut value = serde_json::to_value(record).unwrap_or(Value::Null);
    let Some(fields) = params.get("fields").filter(|f| f.as_str() != "all") else {
        return value;
    };
    if let Value::Object(map) = &mut value {
        let keep: Vec<&str> = fields.split(',').map(str::trim).collect();
        map.retain(|k, _| k == "id" || keep.contains(&k.as_str()));
    }
    value
}

fn render_all<T: Serialize>(records: &[&T], params: &HashMap<String, String>) -> Value {
    Value::Array(records.iter().map(|r| render(*r, params)).collect())
}

async fn get_member(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult {
    let me = authenticate(&db, &params)?;
    let member = resolve_member(&db, &id, me)?;
    Ok(Json(render(member, &params)))
}

async fn member_boards(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult {
    let me = authenticate(&db, &params)?;
    let member = resolve_member(&db, &id, me)?;
    let boards: Vec<&BoardRecord> = member
        .id_boards
        .iter()
        .filter_map(|board_id| db.boards.iter().find(|b| &b.id == board_id))
        .collect();
    Ok(Json(render_all(&boards, &params)))
}

async fn member_organizations(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult {
    let me = authenticate(&db, &params)?;
    let member = resolve_member(&db, &id, me)?;
    let orgs: Vec<&OrganizationRecord> = member
        .id_organizations
        .iter()
        .filter_map(|org_id| db.organizations.iter().find(|o| &o.id == org_id))
        .collect();
    Ok(Json(render_all(&orgs, &params)))
}

async fn get_board(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult {
    authenticate(&db, &params)?;
    let board = db
        .boards
        .iter()
        .find(|b| b.id == id)
        .ok_or((StatusCode::NOT_FOUND, NOT_FOUND))?;
    Ok(Json(render(board, &params)))
}

async fn board_members(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult {
    authenticate(&db, &params)?;
    if !db.boards.iter().any(|b| b.id == id) {
        return Err((StatusCode::NOT_FOUND, NOT_FOUND));
    }
    let members: Vec<&MemberRecord> = db
        .members
        .iter()
        .filter(|m| m.id_boards.contains(&id))
        .collect();
    Ok(Json(render_all(&members, &params)))
}

async fn get_card(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult {
    authenticate(&db, &params)?;
    let card = db
        .cards
        .iter()
        .find(|c| c.id == id)
        .ok_or((StatusCode::NOT_FOUND, NOT_FOUND))?;
    Ok(Json(render(card, &params)))
}

async fn card_members(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult {
    authenticate(&db, &params)?;
    let card = db
        .cards
        .iter()
        .find(|c| c.id == id)
        .ok_or((StatusCode::NOT_FOUND, NOT_FOUND))?;
    Ok(Json(render_all(&db.members_by_id(&card.id_members), &params)))
}

async fn get_organization(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult {
    authenticate(&db, &params)?;
    let org = db
        .organizations
        .iter()
        .find(|o| o.id == id || o.name == id)
        .ok_or((StatusCode::NOT_FOUND, NOT_FOUND))?;
    Ok(Json(render(org, &params)))
}

async fn organization_members(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult {
    authenticate(&db, &params)?;
    let org = db
        .organizations
        .iter()
        .find(|o| o.id == id || o.name == id)
        .ok_or((StatusCode::NOT_FOUND, NOT_FOUND))?;
    let members: Vec<&MemberRecord> = db
        .members
        .iter()
        .filter(|m| m.id_organizations.contains(&org.id))
        .collect();
    Ok(Json(render_all(&members, &params)))
}
