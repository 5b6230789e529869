use super::*;
use leptos::reactive::owner::Owner;

use game::wire::CreateGameResponse;
use game::{Difficulty, GameType, Phase};

fn actions_with(session: Session) -> (Actions, RwSignal<Session>) {
    let session = RwSignal::new(session);
    let setup = RwSignal::new(SetupState::default());
    (Actions::new(session, setup, ClientConfig::default()), session)
}

fn answering_session(sequence: &[u32]) -> Session {
    let mut session = Session::default();
    let created = CreateGameResponse {
        game_id: "s1".to_owned(),
        sequence: Some(sequence.to_vec()),
        memorization_time: Some(1000),
        cards: None,
        total_pairs: None,
    };
    let start = session
        .begin_game(GameType::Sequence, Difficulty::Easy, created, 0.0)
        .expect("begin");
    let ticket = start.memorization.expect("countdown");
    while session.tick_memorization(ticket) != CountdownTick::Expired {}
    session
}

#[test]
fn slot_and_number_clicks_fill_the_answer() {
    let owner = Owner::new();
    owner.set();
    let (actions, session) = actions_with(answering_session(&[3, 1, 4]));
    actions.select_slot(1);
    actions.select_number(9);
    let sequence = session.get_untracked().sequence;
    assert_eq!(sequence.answer, vec![0, 9, 0]);
    assert_eq!(sequence.active_slot, 2);
}

#[test]
fn reset_returns_to_setup_and_is_repeatable() {
    let owner = Owner::new();
    owner.set();
    let mut finished = answering_session(&[2]);
    finished.score_total = 30;
    let (actions, session) = actions_with(finished);
    actions.reset();
    assert_eq!(session.get_untracked().phase, Phase::Setup);
    assert_eq!(session.get_untracked().score_total, 0);
    actions.reset();
    assert_eq!(session.get_untracked().game, None);
    assert_eq!(session.get_untracked().phase, Phase::Setup);
}

#[test]
fn stop_timers_kills_running_tickets() {
    let owner = Owner::new();
    owner.set();
    let (actions, session) = actions_with(Session::default());
    let ticket = session.write().timers.clock.arm();
    actions.stop_timers();
    assert!(!session.write().tick_clock(ticket, 0.0));
}
