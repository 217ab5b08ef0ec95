//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every accessor
//! over real HTTP through the default ureq transport. Validates that URL
//! building, credential handling, decoding and client attachment work
//! together against an actual server.

use trello_core::{Arguments, Client, ClientConfig, Member};

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}/1")
}

fn client_for(base_url: &str, token: &str) -> Client {
    let mut config = ClientConfig::new(mock_server::TEST_KEY, token);
    config.base_url = base_url.to_string();
    config.timeout_secs = 5;
    Client::from_config(&config)
}

#[test]
fn browse_members_boards_cards_and_organizations() {
    let base_url = start_server();
    let client = client_for(&base_url, mock_server::TEST_TOKEN);
    let none = Arguments::new();

    // Step 1: who am I.
    let me = client.get_my_member(&none).unwrap();
    assert_eq!(me.id(), "m1");
    assert_eq!(me.username.as_deref(), Some("alice"));
    assert_eq!(me.email.as_deref(), Some("alice@example.com"));
    assert_eq!(me.client(), Some(&client));

    // Step 2: a member by id, with a hidden email.
    let bob = client.get_member("m2", &none).unwrap();
    assert_eq!(bob.full_name.as_deref(), Some("Bob Baker"));
    assert!(bob.email.is_none(), "hidden email decodes as absent");

    // Step 3: follow-up call from the member itself.
    let boards = me.get_boards(&none).unwrap();
    let board_ids: Vec<&str> = boards.iter().map(|b| b.id()).collect();
    assert_eq!(board_ids, vec!["board1", "board2"]);

    // Step 4: members of a board, in service order, all on the same client.
    let members = boards[0].get_members(&none).unwrap();
    let ids: Vec<&str> = members.iter().map(Member::id).collect();
    assert_eq!(ids, vec!["m1", "m2"]);
    assert!(members.iter().all(|m| m.client() == Some(&client)));

    // Step 5: members of a card.
    let card = client.get_card("card1", &none).unwrap();
    let ids: Vec<String> = card
        .get_members(&none)
        .unwrap()
        .iter()
        .map(|m| m.id().to_string())
        .collect();
    assert_eq!(ids, vec!["m2", "m1"]);

    // Step 6: an empty collection is an empty Vec.
    let empty_card = client.get_card("card2", &none).unwrap();
    assert!(empty_card.get_members(&none).unwrap().is_empty());

    // Step 7: organizations, from the member and by id.
    let orgs = me.get_organizations(&none).unwrap();
    assert_eq!(orgs.len(), 1);
    assert_eq!(orgs[0].display_name.as_deref(), Some("Acme Inc"));
    let org = client.get_organization("org1", &none).unwrap();
    assert_eq!(org.get_members(&none).unwrap().len(), 2);

    // Step 8: my boards shortcut matches the member's boards.
    let my_boards = client.get_my_boards(&none).unwrap();
    assert_eq!(my_boards.len(), boards.len());
}

#[test]
fn fields_argument_reaches_the_server() {
    let base_url = start_server();
    let client = client_for(&base_url, mock_server::TEST_TOKEN);

    let member = client
        .get_member("m1", &Arguments::from([("fields", "username")]))
        .unwrap();

    assert_eq!(member.id(), "m1");
    assert_eq!(member.username.as_deref(), Some("alice"));
    assert!(member.full_name.is_none());
    assert!(member.id_boards.is_none());
}

#[test]
fn errors_come_back_as_statuses() {
    let base_url = start_server();

    let client = client_for(&base_url, mock_server::TEST_TOKEN);
    let err = client.get_member("nobody", &Arguments::new()).unwrap_err();
    assert!(err.is_not_found());

    let stranger = client_for(&base_url, "not-a-token");
    let err = stranger.get_my_member(&Arguments::new()).unwrap_err();
    assert!(err.is_unauthorized());
}

#[test]
fn switching_clients_switches_identity() {
    let base_url = start_server();
    let alice = client_for(&base_url, mock_server::TEST_TOKEN);
    let bob = client_for(&base_url, mock_server::OTHER_TOKEN);

    let mut member = alice.get_member("m3", &Arguments::new()).unwrap();
    member.set_client(bob.clone());
    assert_eq!(member.client(), Some(&bob));

    // Carol's boards are visible through either token; the call now goes
    // out with Bob's credentials.
    let boards = member.get_boards(&Arguments::new()).unwrap();
    assert_eq!(boards.len(), 1);
    assert_eq!(boards[0].client(), Some(&bob));
}
