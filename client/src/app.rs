//! Root application component and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};

use game::Session;

use crate::config::ClientConfig;
use crate::pages::trainer::TrainerPage;
use crate::state::setup::SetupState;

/// Root application component.
///
/// Provides the page-wide session, the setup form and the client config,
/// then renders the single trainer page.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(Session::default());
    let setup = RwSignal::new(SetupState::default());

    provide_context(session);
    provide_context(setup);
    provide_context(ClientConfig::default());

    view! {
        <Title text="Memory Trainer"/>
        <TrainerPage/>
    }
}
