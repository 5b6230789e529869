//! Outcome message for the finished game.

use leptos::prelude::*;

use game::Session;

use crate::util::dom;

#[component]
pub fn ResultBanner() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let result = Memo::new(move |_| session.with(|s| s.result.clone()));

    view! {
        <div
            id=dom::RESULT_MESSAGE
            class=move || result.get().map_or("result-message", |r| dom::result_class(r.success))
            style=move || dom::display_style(result.get().is_some())
        >
            {move || result.get().map(|r| r.display_text()).unwrap_or_default()}
        </div>
    }
}
