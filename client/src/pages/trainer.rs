//! Trainer page hosting setup, both games and the result banner.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the only route. It wires the page-wide `Session` signal to a
//! `game::Controller` and runs every deferred callback the games need: the
//! elapsed-time clock, the memorization countdown, the staggered reveal and
//! the debounced pair check.
//!
//! DESIGN
//! ======
//! Each deferred callback is a `spawn_local` loop around `gloo-timers` sleeps
//! holding a `Ticket`. Cancelling a timer kills its ticket in the session, so
//! the loop notices on its next wake-up and exits without touching state.
//! Nothing here keeps a handle to a running loop.
//!
//! ERROR HANDLING
//! ==============
//! Failures go through `util::notify`: logged, shown once, state unchanged.
//! A flip the server refuses or a failed pair check triggers a resync from
//! `GET /api/game/{id}` so the grid cannot drift from the server. Nothing is
//! retried on its own; a stalled pair waits for the "Check pair" button.

#[cfg(test)]
#[path = "trainer_test.rs"]
mod trainer_test;

use std::future::Future;
use std::time::Duration;

use leptos::logging::log;
use leptos::prelude::*;

use game::session::{FlipApplied, PairApplied};
use game::timers::CountdownTick;
use game::{Controller, GameResult, Operation, Session, SessionStore, SyncError, Ticket};

use crate::components::card_grid::CardGrid;
use crate::components::result_banner::ResultBanner;
use crate::components::scoreboard::Scoreboard;
use crate::components::sequence_board::SequenceBoard;
use crate::components::setup_form::SetupForm;
use crate::config::ClientConfig;
use crate::net::http::HttpTransport;
use crate::state::session::SessionSignal;
use crate::state::setup::SetupState;
use crate::util::clock::now_ms;
use crate::util::{dom, notify};

pub type TrainerController = Controller<SessionSignal, HttpTransport>;

/// Run `task` on the browser event loop. Host builds have no event loop and
/// drop it.
fn spawn(task: impl Future<Output = ()> + 'static) {
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(task);
    #[cfg(not(feature = "csr"))]
    drop(task);
}

async fn sleep(duration: Duration) {
    #[cfg(feature = "csr")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(feature = "csr"))]
    let _ = duration;
}

fn log_result(result: &GameResult) {
    log!("game finished (success: {}): {}", result.success, result.display_text());
}

/// User actions and the loops they start. `Copy`, so view closures capture
/// it freely.
#[derive(Clone, Copy)]
pub struct Actions {
    controller: StoredValue<TrainerController>,
    setup: RwSignal<SetupState>,
    config: StoredValue<ClientConfig>,
}

impl Actions {
    pub fn new(session: RwSignal<Session>, setup: RwSignal<SetupState>, config: ClientConfig) -> Self {
        let transport = HttpTransport::new(config.api_base.clone());
        Self {
            controller: StoredValue::new(Controller::new(SessionSignal(session), transport)),
            setup,
            config: StoredValue::new(config),
        }
    }

    fn controller(self) -> TrainerController {
        self.controller.get_value()
    }

    fn store(self) -> SessionSignal {
        self.controller.with_value(|c| *c.store())
    }

    /// Create a game from the setup form's choices.
    pub fn start(self) {
        let Some((game_type, difficulty)) = self.setup.write().begin_start() else {
            return;
        };
        spawn(async move {
            let outcome = self.controller().start_game(game_type, difficulty, now_ms).await;
            self.setup.write().finish_start();
            match outcome {
                Ok(start) => {
                    log!("started {game_type} game on {difficulty}");
                    self.run_clock(start.clock);
                    if let Some(ticket) = start.memorization {
                        self.run_reveal(ticket);
                        self.run_countdown(ticket);
                    }
                }
                Err(err) => notify::report(Operation::CreateGame, &err),
            }
        });
    }

    fn run_clock(self, ticket: Ticket) {
        let tick = self.config.with_value(ClientConfig::tick);
        let store = self.store();
        spawn(async move {
            loop {
                sleep(tick).await;
                if !store.write(|s| s.tick_clock(ticket, now_ms())) {
                    break;
                }
            }
        });
    }

    fn run_countdown(self, ticket: Ticket) {
        let tick = self.config.with_value(ClientConfig::tick);
        let store = self.store();
        spawn(async move {
            loop {
                sleep(tick).await;
                match store.write(|s| s.tick_memorization(ticket)) {
                    CountdownTick::Running(_) => {}
                    CountdownTick::Expired => {
                        log!("memorization over, answer entry open");
                        break;
                    }
                    CountdownTick::Stale => break,
                }
            }
        });
    }

    fn run_reveal(self, ticket: Ticket) {
        let stagger = self.config.with_value(ClientConfig::reveal_stagger);
        let store = self.store();
        spawn(async move {
            while store.write(|s| s.reveal_next(ticket)) {
                sleep(stagger).await;
            }
        });
    }

    pub fn select_slot(self, index: usize) {
        if !self.store().write(|s| s.select_slot(index)) {
            log!("slot {index} not selectable");
        }
    }

    pub fn select_number(self, number: u32) {
        if !self.store().write(|s| s.select_number(number)) {
            log!("number {number} not accepted");
        }
    }

    pub fn flip(self, card_id: u32) {
        spawn(async move {
            match self.controller().flip_card(card_id).await {
                Ok(Some(applied)) => self.follow_up(applied),
                Ok(None) => {}
                Err(err) => {
                    notify::report(Operation::FlipCard, &err);
                    if err.is_rejection() {
                        self.resync().await;
                    }
                }
            }
        });
    }

    fn follow_up(self, applied: FlipApplied) {
        if let Some(ticket) = applied.pair_check {
            self.schedule_pair_check(ticket);
        }
        if let Some(result) = &applied.result {
            log_result(result);
        }
    }

    /// Arm the debounced pair check. A later flip re-arms the slot, so the
    /// ticket held here goes stale and the request is never sent.
    fn schedule_pair_check(self, ticket: Ticket) {
        let delay = self.config.with_value(ClientConfig::pair_check_delay);
        spawn(async move {
            sleep(delay).await;
            let outcome = self.controller().check_pair(ticket).await;
            self.after_pair_check(outcome).await;
        });
    }

    /// Check a pair left face up by a failed check, on user request.
    pub fn retry_pair_check(self) {
        spawn(async move {
            let outcome = self.controller().retry_pair_check().await;
            self.after_pair_check(outcome).await;
        });
    }

    async fn after_pair_check(self, outcome: Result<Option<PairApplied>, SyncError>) {
        match outcome {
            Ok(Some(applied)) => {
                if let Some(result) = &applied.result {
                    log_result(result);
                }
            }
            Ok(None) => {}
            Err(err) => {
                notify::report(Operation::CheckPair, &err);
                self.resync().await;
            }
        }
    }

    async fn resync(self) {
        match self.controller().resync().await {
            Ok(Some(applied)) => self.follow_up(applied),
            Ok(None) => {}
            Err(err) => notify::report(Operation::Resync, &err),
        }
    }

    pub fn submit_answer(self) {
        spawn(async move {
            match self.controller().submit_answer().await {
                Ok(Some(result)) => log_result(&result),
                Ok(None) => {}
                Err(err) => notify::report(Operation::CheckAnswer, &err),
            }
        });
    }

    /// Back to setup, then tell the server the old game is over.
    pub fn reset(self) {
        let controller = self.controller();
        let Some(game_id) = controller.reset() else {
            return;
        };
        log!("reset, abandoning game {game_id}");
        spawn(async move {
            if let Err(err) = controller.abandon(&game_id).await {
                notify::quiet(Operation::AbandonGame, &err);
            }
        });
    }

    fn stop_timers(self) {
        self.store().write(|s| s.timers.cancel_all());
    }
}

/// Trainer page: setup form, scoreboard, both game boards and the result.
#[component]
pub fn TrainerPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let setup = expect_context::<RwSignal<SetupState>>();
    let config = expect_context::<ClientConfig>();

    let actions = Actions::new(session, setup, config);
    provide_context(actions);
    on_cleanup(move || actions.stop_timers());

    let phase = Memo::new(move |_| session.with(|s| s.phase));

    view! {
        <div class="trainer-page">
            <header class="trainer-page__header">
                <h1>"Memory Trainer"</h1>
                <Scoreboard/>
            </header>
            <section id=dom::GAME_SETUP class="game-setup" style=move || dom::display_style(phase.get().shows_setup())>
                <SetupForm/>
            </section>
            <section id=dom::GAME_AREA class="game-area" style=move || dom::display_style(phase.get().shows_game_area())>
                <SequenceBoard/>
                <CardGrid/>
                <ResultBanner/>
            </section>
        </div>
    }
}
