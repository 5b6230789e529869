//! Card matching board.
//!
//! The grid is rebuilt node-for-node from `CardsState` on every change.
//! Matched cards render revealed and take no clicks; every other card asks
//! for a flip and leaves refusal to the session's flip guard. A pair left
//! face up by a failed check gets a button to check it again.

use leptos::prelude::*;

use game::{Card, GameType, Session};

use crate::pages::trainer::Actions;
use crate::util::dom;

#[component]
pub fn CardGrid() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let actions = expect_context::<Actions>();

    let visible = Memo::new(move |_| session.with(|s| s.game_type() == Some(GameType::Cards)));
    let cards = Memo::new(move |_| session.with(|s| s.cards.cards.clone()));
    let moves = Memo::new(move |_| session.with(|s| s.cards.moves));
    let pairs = Memo::new(move |_| session.with(|s| dom::pairs_text(s.cards.pairs_found, s.cards.total_pairs)));
    let status = Memo::new(move |_| session.with(|s| s.status_line.clone()));
    let stalled = Memo::new(move |_| session.with(Session::pair_check_stalled));

    view! {
        <div id=dom::CARDS_GAME class="cards-game" style=move || dom::display_style(visible.get())>
            <div class="cards-game__stats">
                <span>"Moves: " <span id=dom::MOVES>{move || moves.get()}</span></span>
                <span>"Pairs: " <span id=dom::PAIRS_FOUND>{move || pairs.get()}</span></span>
            </div>
            <p class="cards-game__status">{move || status.get().unwrap_or_default()}</p>
            <button
                id=dom::CHECK_PAIR_BTN
                class="btn"
                style=move || dom::display_style(stalled.get())
                on:click=move |_| actions.retry_pair_check()
            >
                "Check pair"
            </button>
            <div id=dom::CARDS_GRID class="cards-grid">
                {move || cards.get().into_iter().map(|card| card_tile(card, actions)).collect_view()}
            </div>
            <button id=dom::RESET_GAME_BTN_2 class="btn" on:click=move |_| actions.reset()>
                "New game"
            </button>
        </div>
    }
}

fn card_tile(card: Card, actions: Actions) -> impl IntoView {
    let id = card.id;
    let clickable = card.is_clickable();
    let class = dom::card_class(&card);
    view! {
        <div
            class=class
            data-card-id=id.to_string()
            on:click=move |_| {
                if clickable {
                    actions.flip(id);
                }
            }
        >
            <div class="card-front">"?"</div>
            <div class="card-back">{card.value}</div>
        </div>
    }
}
