use super::*;
use std::collections::VecDeque;

use async_trait::async_trait;
use futures::executor::block_on;
use serde_json::json;

use crate::api::{ApiRequest, Method};
use crate::error::ValidationError;
use crate::phase::Phase;
use crate::timers::CountdownTick;

/// Replays scripted bodies in order and records every request.
#[derive(Default)]
struct Scripted {
    replies: RefCell<VecDeque<Result<String, SyncError>>>,
    sent: RefCell<Vec<ApiRequest>>,
}

impl Scripted {
    fn reply(self, body: &str) -> Self {
        self.replies.borrow_mut().push_back(Ok(body.to_owned()));
        self
    }

    fn fail(self, err: SyncError) -> Self {
        self.replies.borrow_mut().push_back(Err(err));
        self
    }
}

#[async_trait(?Send)]
impl Transport for Scripted {
    async fn send(&self, request: ApiRequest) -> Result<String, SyncError> {
        self.sent.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(SyncError::Network("no scripted reply".to_owned())))
    }
}

const CARDS_GAME: &str = r#"{"gameId":"c1","totalPairs":"2","cards":[
    {"id":0,"value":"A","flipped":false,"matched":false},
    {"id":1,"value":"B","flipped":false,"matched":false},
    {"id":2,"value":"A","flipped":false,"matched":false},
    {"id":3,"value":"B","flipped":false,"matched":false}]}"#;

const SEQUENCE_GAME: &str = r#"{"gameId":"s1","sequence":[3,1],"memorizationTime":"1000"}"#;

fn controller(transport: Scripted) -> Controller<RefCell<Session>, Scripted> {
    Controller::new(RefCell::new(Session::default()), transport)
}

fn sent(ctl: &Controller<RefCell<Session>, Scripted>) -> Vec<ApiRequest> {
    ctl.api().transport().sent.borrow().clone()
}

fn to_answer_entry(ctl: &Controller<RefCell<Session>, Scripted>, start: &GameStart) {
    let ticket = start.memorization.expect("countdown");
    while ctl.store().write(|s| s.tick_memorization(ticket)) != CountdownTick::Expired {}
}

#[test]
fn start_game_enters_grid() {
    let ctl = controller(Scripted::default().reply(CARDS_GAME));
    block_on(ctl.start_game(GameType::Cards, Difficulty::Easy, || 0.0)).expect("started");
    ctl.store().read(|s| {
        assert_eq!(s.phase, Phase::CardGrid);
        assert_eq!(s.cards.cards.len(), 4);
        assert_eq!(s.cards.total_pairs, Some(2));
    });
}

#[test]
fn start_time_is_read_after_the_game_is_created() {
    let ctl = controller(Scripted::default().reply(CARDS_GAME));
    let sent_before_clock = std::cell::Cell::new(0);
    block_on(ctl.start_game(GameType::Cards, Difficulty::Easy, || {
        sent_before_clock.set(ctl.api().transport().sent.borrow().len());
        5_000.0
    }))
    .expect("started");
    assert_eq!(sent_before_clock.get(), 1);
    ctl.store().read(|s| assert_eq!(s.game.as_ref().and_then(|g| g.started_at_ms), Some(5_000.0)));
}

#[test]
fn failed_start_never_reads_the_clock() {
    let ctl = controller(Scripted::default().fail(SyncError::Network("offline".to_owned())));
    let read = std::cell::Cell::new(false);
    let outcome = block_on(ctl.start_game(GameType::Cards, Difficulty::Easy, || {
        read.set(true);
        0.0
    }));
    assert!(outcome.is_err());
    assert!(!read.get());
}

#[test]
fn failed_start_stays_on_setup() {
    let ctl = controller(Scripted::default().reply(r#"{"error":"Invalid game type"}"#));
    let err = block_on(ctl.start_game(GameType::Cards, Difficulty::Easy, || 0.0)).expect_err("rejected");
    assert_eq!(err, SyncError::ServerRejected("Invalid game type".to_owned()));
    ctl.store().read(|s| assert_eq!(*s, Session::default()));
}

#[test]
fn guarded_flip_sends_nothing() {
    let ctl = controller(Scripted::default().reply(CARDS_GAME));
    block_on(ctl.start_game(GameType::Cards, Difficulty::Easy, || 0.0)).expect("started");
    ctl.store().write(|s| s.cards.flipped_ids = vec![0, 2]);
    assert_eq!(block_on(ctl.flip_card(1)), Ok(None));
    assert_eq!(sent(&ctl).len(), 1);
}

#[test]
fn two_flips_then_one_pair_check_with_both_ids() {
    let ctl = controller(
        Scripted::default()
            .reply(CARDS_GAME)
            .reply(r#"{"cards":[],"flippedCards":[0],"moves":"0"}"#)
            .reply(r#"{"cards":[],"flippedCards":[0,2],"moves":"1"}"#)
            .reply(r#"{"cards":[],"isPair":"true","pairsFound":"1","message":"Pair found!"}"#),
    );
    block_on(ctl.start_game(GameType::Cards, Difficulty::Easy, || 0.0)).expect("started");
    let first = block_on(ctl.flip_card(0)).expect("flip").expect("applied");
    assert_eq!(first.pair_check, None);
    let second = block_on(ctl.flip_card(2)).expect("flip").expect("applied");
    let ticket = second.pair_check.expect("armed");

    let applied = block_on(ctl.check_pair(ticket)).expect("pair").expect("live");
    assert!(applied.is_pair);
    assert_eq!(block_on(ctl.check_pair(ticket)), Ok(None));

    let requests = sent(&ctl);
    let pair_checks: Vec<_> = requests.iter().filter(|r| r.path.ends_with("/check-pair")).collect();
    assert_eq!(pair_checks.len(), 1);
    assert_eq!(pair_checks[0].body, Some(json!({"cardId1": 0, "cardId2": 2})));
    ctl.store().read(|s| {
        assert!(s.cards.flipped_ids.is_empty());
        assert_eq!(s.status_line.as_deref(), Some("Pair found!"));
    });
}

fn pair_check_count(ctl: &Controller<RefCell<Session>, Scripted>) -> usize {
    sent(ctl).iter().filter(|r| r.path.ends_with("/check-pair")).count()
}

#[test]
fn failed_pair_check_is_sent_once_until_user_retries() {
    let ctl = controller(
        Scripted::default()
            .reply(CARDS_GAME)
            .reply(r#"{"cards":[],"flippedCards":[0],"moves":"0"}"#)
            .reply(r#"{"cards":[],"flippedCards":[0,2],"moves":"1"}"#)
            .fail(SyncError::Network("HTTP 502".to_owned()))
            .reply(
                r#"{"gameId":"c1","moves":"1","pairsFound":"0","cards":[
                {"id":0,"value":"A","flipped":true,"matched":false},
                {"id":1,"value":"B","flipped":false,"matched":false},
                {"id":2,"value":"A","flipped":true,"matched":false},
                {"id":3,"value":"B","flipped":false,"matched":false}]}"#,
            )
            .reply(r#"{"cards":[],"isPair":true,"pairsFound":"1","message":"Pair found!"}"#),
    );
    block_on(ctl.start_game(GameType::Cards, Difficulty::Easy, || 0.0)).expect("started");
    block_on(ctl.flip_card(0)).expect("flip");
    let ticket = block_on(ctl.flip_card(2)).expect("flip").and_then(|a| a.pair_check).expect("armed");

    assert!(block_on(ctl.check_pair(ticket)).is_err());
    let applied = block_on(ctl.resync()).expect("fetched").expect("current");
    assert_eq!(applied.pair_check, None);
    assert_eq!(pair_check_count(&ctl), 1);
    ctl.store().read(|s| {
        assert_eq!(s.cards.flipped_ids, vec![0, 2]);
        assert!(s.pair_check_stalled());
        assert!(!s.timers.pair_check.is_armed());
    });

    let retried = block_on(ctl.retry_pair_check()).expect("pair").expect("stalled");
    assert!(retried.is_pair);
    assert_eq!(pair_check_count(&ctl), 2);
    assert_eq!(block_on(ctl.retry_pair_check()), Ok(None));
    assert_eq!(pair_check_count(&ctl), 2);
}

#[test]
fn flip_error_leaves_board_unchanged() {
    let ctl = controller(Scripted::default().reply(CARDS_GAME).fail(SyncError::Network("HTTP 500".to_owned())));
    block_on(ctl.start_game(GameType::Cards, Difficulty::Easy, || 0.0)).expect("started");
    let before = ctl.store().read(Clone::clone);
    assert!(block_on(ctl.flip_card(0)).is_err());
    ctl.store().read(|s| assert_eq!(*s, before));
}

#[test]
fn incomplete_answer_is_refused_locally() {
    let ctl = controller(Scripted::default().reply(SEQUENCE_GAME));
    let start = block_on(ctl.start_game(GameType::Sequence, Difficulty::Easy, || 0.0)).expect("started");
    to_answer_entry(&ctl, &start);
    ctl.store().write(|s| s.select_number(3));
    let err = block_on(ctl.submit_answer()).expect_err("incomplete");
    assert_eq!(err, SyncError::Validation(ValidationError::IncompleteAnswer));
    assert_eq!(sent(&ctl).len(), 1);
}

#[test]
fn answer_error_keeps_buffer_and_allows_retry() {
    let ctl = controller(
        Scripted::default()
            .reply(SEQUENCE_GAME)
            .fail(SyncError::Network("offline".to_owned()))
            .reply(r#"{"success":"true","message":"Correct!","score":"20"}"#),
    );
    let start = block_on(ctl.start_game(GameType::Sequence, Difficulty::Easy, || 0.0)).expect("started");
    to_answer_entry(&ctl, &start);
    ctl.store().write(|s| {
        s.select_number(3);
        s.select_number(1);
    });
    let before = ctl.store().read(Clone::clone);
    assert!(block_on(ctl.submit_answer()).is_err());
    ctl.store().read(|s| assert_eq!(*s, before));

    let result = block_on(ctl.submit_answer()).expect("checked").expect("current");
    assert!(result.success);
    assert_eq!(result.score, 20);
    let requests = sent(&ctl);
    assert_eq!(requests.last().map(|r| r.body.clone()), Some(Some(json!({"answer": [3, 1]}))));
    ctl.store().read(|s| assert_eq!(s.phase, Phase::Result));
}

#[test]
fn rejected_answer_keeps_answer_entry_score_and_clock() {
    let ctl = controller(Scripted::default().reply(SEQUENCE_GAME).reply(r#"{"error":"not found"}"#));
    let start = block_on(ctl.start_game(GameType::Sequence, Difficulty::Easy, || 0.0)).expect("started");
    to_answer_entry(&ctl, &start);
    ctl.store().write(|s| {
        s.select_number(3);
        s.select_number(1);
    });
    let err = block_on(ctl.submit_answer()).expect_err("rejected");
    assert_eq!(err, SyncError::ServerRejected("not found".to_owned()));
    ctl.store().read(|s| {
        assert_eq!(s.phase, Phase::AnswerEntry);
        assert_eq!(s.score_total, 0);
        assert_eq!(s.result, None);
        assert!(s.timers.clock.is_live(start.clock));
        assert!(!s.answer_pending);
    });
}

#[test]
fn resync_rebuilds_grid_from_snapshot() {
    let ctl = controller(Scripted::default().reply(CARDS_GAME).reply(
        r#"{"gameId":"c1","type":"cards","moves":"3","pairsFound":"1","isComplete":"false","cards":[
            {"id":0,"value":"A","flipped":true,"matched":true},
            {"id":1,"value":"B","flipped":true,"matched":false},
            {"id":2,"value":"A","flipped":true,"matched":true},
            {"id":3,"value":"B","flipped":false,"matched":false}]}"#,
    ));
    block_on(ctl.start_game(GameType::Cards, Difficulty::Easy, || 0.0)).expect("started");
    let applied = block_on(ctl.resync()).expect("fetched").expect("current");
    assert_eq!(applied.pair_check, None);
    assert_eq!(sent(&ctl)[1].method, Method::Get);
    ctl.store().read(|s| {
        assert_eq!(s.cards.moves, 3);
        assert_eq!(s.cards.pairs_found, 1);
        assert_eq!(s.cards.flipped_ids, vec![1]);
    });
}

#[test]
fn resync_without_game_is_a_no_op() {
    let ctl = controller(Scripted::default());
    assert_eq!(block_on(ctl.resync()), Ok(None));
    assert!(sent(&ctl).is_empty());
}

#[test]
fn reset_then_abandon_deletes_previous_game() {
    let ctl = controller(Scripted::default().reply(CARDS_GAME).reply(r#"{"status":"deleted"}"#));
    block_on(ctl.start_game(GameType::Cards, Difficulty::Easy, || 0.0)).expect("started");
    let game_id = ctl.reset().expect("had a game");
    assert_eq!(ctl.reset(), None);
    block_on(ctl.abandon(&game_id)).expect("deleted");
    let requests = sent(&ctl);
    assert_eq!(requests[1].method, Method::Delete);
    assert_eq!(requests[1].path, "/api/game/c1");
    ctl.store().read(|s| assert_eq!(s.phase, Phase::Setup));
}

#[test]
fn response_after_reset_is_dropped() {
    let ctl = controller(Scripted::default().reply(CARDS_GAME));
    block_on(ctl.start_game(GameType::Cards, Difficulty::Easy, || 0.0)).expect("started");
    let game_id = ctl.store().read(|s| s.prepare_flip(0)).expect("allowed");
    ctl.reset();
    let late: crate::wire::FlipResponse =
        crate::wire::parse_response(r#"{"cards":[],"flippedCards":[0,1],"moves":"1"}"#).expect("valid");
    assert_eq!(ctl.store().write(|s| s.apply_flip(&game_id, &late)), None);
    ctl.store().read(|s| {
        assert_eq!(s.phase, Phase::Setup);
        assert!(!s.timers.any_armed());
    });
}
