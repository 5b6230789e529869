//! Sequence recall board: memorization display, answer slots and the number
//! selector.

use leptos::prelude::*;

use game::{GameType, Phase, Session};

use crate::pages::trainer::Actions;
use crate::util::dom;

#[component]
pub fn SequenceBoard() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let actions = expect_context::<Actions>();

    let visible = Memo::new(move |_| session.with(|s| s.game_type() == Some(GameType::Sequence)));
    let phase = Memo::new(move |_| session.with(|s| s.phase));
    let remaining = Memo::new(move |_| session.with(|s| s.countdown.remaining));
    let shown = Memo::new(move |_| session.with(|s| s.sequence.visible_numbers().to_vec()));
    let slots = Memo::new(move |_| session.with(|s| (s.sequence.answer.clone(), s.sequence.active_slot)));
    let selector = Memo::new(move |_| {
        session.with(|s| {
            if s.sequence.answer.is_empty() {
                Vec::new()
            } else {
                s.sequence.selector_numbers().collect::<Vec<_>>()
            }
        })
    });
    let can_submit = Memo::new(move |_| session.with(|s| s.phase == Phase::AnswerEntry && !s.answer_pending));

    view! {
        <div id=dom::SEQUENCE_GAME class="sequence-game" style=move || dom::display_style(visible.get())>
            <div
                id=dom::MEMORIZATION_PHASE
                class="sequence-game__memorize"
                style=move || dom::display_style(phase.get() == Phase::Memorization)
            >
                <p>"Remember the sequence: " <span id=dom::MEMORIZATION_TIMER>{move || remaining.get()}</span></p>
                <div id=dom::SEQUENCE_DISPLAY class="sequence-display">
                    {move || {
                        shown.get().into_iter().map(|n| view! { <div class="number-card">{n}</div> }).collect_view()
                    }}
                </div>
            </div>
            <div
                id=dom::ANSWER_PHASE
                class="sequence-game__answer"
                style=move || dom::display_style(matches!(phase.get(), Phase::AnswerEntry | Phase::Result))
            >
                <div id=dom::ANSWER_INPUT>
                    <div class="answer-slots">
                        {move || {
                            let (answer, active) = slots.get();
                            answer
                                .into_iter()
                                .enumerate()
                                .map(|(index, value)| {
                                    view! {
                                        <div
                                            id=dom::slot_id(index)
                                            class=dom::slot_class(value, index == active)
                                            on:click=move |_| actions.select_slot(index)
                                        >
                                            {dom::slot_text(value)}
                                        </div>
                                    }
                                })
                                .collect_view()
                        }}
                    </div>
                    <div class="number-selector">
                        {move || {
                            selector
                                .get()
                                .into_iter()
                                .map(|n| {
                                    view! {
                                        <button class="number-btn" on:click=move |_| actions.select_number(n)>
                                            {n}
                                        </button>
                                    }
                                })
                                .collect_view()
                        }}
                    </div>
                </div>
                <button
                    id=dom::CHECK_ANSWER_BTN
                    class="btn btn--primary"
                    disabled=move || !can_submit.get()
                    on:click=move |_| actions.submit_answer()
                >
                    "Check answer"
                </button>
            </div>
            <button id=dom::RESET_GAME_BTN class="btn" on:click=move |_| actions.reset()>
                "New game"
            </button>
        </div>
    }
}
