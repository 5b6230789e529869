use super::*;
use leptos::reactive::owner::Owner;

use game::Phase;

#[test]
fn writes_land_in_the_signal() {
    let owner = Owner::new();
    owner.set();
    let store = SessionSignal(RwSignal::new(Session::default()));
    store.write(|s| s.score_total = 40);
    assert_eq!(store.0.get_untracked().score_total, 40);
    assert_eq!(store.read(|s| s.score_total), 40);
}

#[test]
fn reset_through_store_returns_to_setup() {
    let owner = Owner::new();
    owner.set();
    let store = SessionSignal(RwSignal::new(Session::default()));
    store.write(|s| s.phase = Phase::Result);
    assert_eq!(store.write(Session::reset), None);
    assert_eq!(store.read(|s| s.phase), Phase::Setup);
}
