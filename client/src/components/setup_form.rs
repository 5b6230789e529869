//! Game type and difficulty pickers with the start button.

use leptos::prelude::*;

use game::{Difficulty, GameType};

use crate::pages::trainer::Actions;
use crate::state::setup::SetupState;
use crate::util::dom;

#[component]
pub fn SetupForm() -> impl IntoView {
    let setup = expect_context::<RwSignal<SetupState>>();
    let actions = expect_context::<Actions>();

    let game_types = GameType::ALL
        .into_iter()
        .map(|game_type| {
            view! {
                <option value=game_type.as_str() selected=move || setup.get().game_type == game_type>
                    {game_type.label()}
                </option>
            }
        })
        .collect_view();
    let difficulties = Difficulty::ALL
        .into_iter()
        .map(|difficulty| {
            view! {
                <option value=difficulty.as_str() selected=move || setup.get().difficulty == difficulty>
                    {difficulty.label()}
                </option>
            }
        })
        .collect_view();

    view! {
        <div class="setup-form">
            <label class="setup-form__field">
                "Game"
                <select
                    id=dom::GAME_TYPE
                    on:change=move |ev| setup.update(|s| s.choose_game_type(&event_target_value(&ev)))
                >
                    {game_types}
                </select>
            </label>
            <label class="setup-form__field">
                "Difficulty"
                <select
                    id=dom::DIFFICULTY
                    on:change=move |ev| setup.update(|s| s.choose_difficulty(&event_target_value(&ev)))
                >
                    {difficulties}
                </select>
            </label>
            <button
                id=dom::START_GAME_BTN
                class="btn btn--primary"
                disabled=move || setup.get().starting
                on:click=move |_| actions.start()
            >
                {move || if setup.get().starting { "Starting..." } else { "Start game" }}
            </button>
        </div>
    }
}
