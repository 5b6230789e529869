//! Running score and elapsed time.

use leptos::prelude::*;

use game::Session;

use crate::util::dom;

#[component]
pub fn Scoreboard() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let score = Memo::new(move |_| session.with(|s| s.score_total));
    let elapsed = Memo::new(move |_| session.with(|s| s.elapsed_secs));

    view! {
        <div class="scoreboard">
            <span class="scoreboard__item">"Score: " <span id=dom::SCORE>{move || score.get()}</span></span>
            <span class="scoreboard__item">"Time: " <span id=dom::TIMER>{move || elapsed.get()}</span> "s"</span>
        </div>
    }
}
