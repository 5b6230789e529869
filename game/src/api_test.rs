use super::*;
use std::cell::RefCell;

use futures::executor::block_on;
use serde_json::json;

struct Canned {
    body: Result<String, SyncError>,
    sent: RefCell<Vec<ApiRequest>>,
}

impl Canned {
    fn new(body: &str) -> Self {
        Self { body: Ok(body.to_owned()), sent: RefCell::new(Vec::new()) }
    }
}

#[async_trait(?Send)]
impl Transport for Canned {
    async fn send(&self, request: ApiRequest) -> Result<String, SyncError> {
        self.sent.borrow_mut().push(request);
        self.body.clone()
    }
}

#[test]
fn endpoint_paths_match_server_routes() {
    assert_eq!(create_game_path(GameType::Cards, Difficulty::Hard), "/api/game?type=cards&difficulty=hard");
    assert_eq!(create_game_path(GameType::Sequence, Difficulty::Easy), "/api/game?type=sequence&difficulty=easy");
    assert_eq!(game_path("g1"), "/api/game/g1");
    assert_eq!(flip_path("g1"), "/api/game/g1/flip");
    assert_eq!(check_pair_path("g1"), "/api/game/g1/check-pair");
    assert_eq!(check_answer_path("g1"), "/api/game/g1/check");
}

#[test]
fn create_game_posts_without_body() {
    let api = GameApi::new(Canned::new(r#"{"gameId":"g1","sequence":[1,2]}"#));
    let created = block_on(api.create_game(GameType::Sequence, Difficulty::Medium)).expect("created");
    assert_eq!(created.game_id, "g1");
    let sent = api.transport().sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, Method::Post);
    assert_eq!(sent[0].path, "/api/game?type=sequence&difficulty=medium");
    assert_eq!(sent[0].body, None);
}

#[test]
fn flip_and_pair_bodies_carry_card_ids() {
    let api = GameApi::new(Canned::new(r#"{"cards":[],"flippedCards":[]}"#));
    block_on(api.flip_card("g1", 7)).expect("flip");
    let api_pair = GameApi::new(Canned::new(r#"{"cards":[],"isPair":"false"}"#));
    block_on(api_pair.check_pair("g1", 1, 2)).expect("pair");
    assert_eq!(api.transport().sent.borrow()[0].body, Some(json!({"cardId": 7})));
    assert_eq!(
        api_pair.transport().sent.borrow()[0].body,
        Some(json!({"cardId1": 1, "cardId2": 2}))
    );
}

#[test]
fn check_answer_surfaces_server_rejection() {
    let api = GameApi::new(Canned::new(r#"{"error":"Game not found"}"#));
    let err = block_on(api.check_answer("g1", vec![1, 2])).expect_err("rejected");
    assert_eq!(err, SyncError::ServerRejected("Game not found".to_owned()));
    assert_eq!(api.transport().sent.borrow()[0].body, Some(json!({"answer": [1, 2]})));
}

#[test]
fn transport_failure_passes_through() {
    let api = GameApi::new(Canned {
        body: Err(SyncError::Network("HTTP 502".to_owned())),
        sent: RefCell::new(Vec::new()),
    });
    let err = block_on(api.fetch_game("g1")).expect_err("network");
    assert_eq!(err, SyncError::Network("HTTP 502".to_owned()));
    assert_eq!(api.transport().sent.borrow()[0].method, Method::Get);
}

#[test]
fn delete_accepts_status_body() {
    let api = GameApi::new(Canned::new(r#"{"status":"deleted"}"#));
    block_on(api.delete_game("g1")).expect("deleted");
    let sent = api.transport().sent.borrow();
    assert_eq!(sent[0].method, Method::Delete);
    assert_eq!(sent[0].path, "/api/game/g1");
}
