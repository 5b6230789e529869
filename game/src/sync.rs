//! Remote sync controller: request, await, reconcile.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each operation reads what it needs from the store, releases it, awaits the
//! transport, then writes the response back through a `Session::apply_*`
//! method. No borrow of the session is held across an await, so other UI
//! events keep dispatching while a call is outstanding.
//!
//! ERROR HANDLING
//! ==============
//! A failed call returns its `SyncError` and leaves the session exactly as it
//! was. Local refusals (flip guard, stale tickets) are `Ok(None)` and never
//! touch the transport.

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::api::{GameApi, Transport};
use crate::error::SyncError;
use crate::phase::GameType;
use crate::session::{Difficulty, FlipApplied, GameResult, GameStart, PairApplied, Session};
use crate::timers::Ticket;

/// Owner of the page-wide [`Session`].
///
/// Front-ends adapt their own reactive container (a `RefCell`, a Leptos
/// signal) to this trait so the controller can drive it.
pub trait SessionStore {
    fn read<R>(&self, f: impl FnOnce(&Session) -> R) -> R;
    fn write<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R;
}

impl SessionStore for RefCell<Session> {
    fn read<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        f(&self.borrow())
    }

    fn write<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

impl<S: SessionStore + ?Sized> SessionStore for Rc<S> {
    fn read<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        (**self).read(f)
    }

    fn write<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        (**self).write(f)
    }
}

/// Drives one session against the game API.
#[derive(Clone, Debug)]
pub struct Controller<S, T> {
    store: S,
    api: GameApi<T>,
}

impl<S: SessionStore, T: Transport> Controller<S, T> {
    pub fn new(store: S, transport: T) -> Self {
        Self { store, api: GameApi::new(transport) }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn api(&self) -> &GameApi<T> {
        &self.api
    }

    /// Create a game and enter its first playing phase. `now_ms` is read
    /// once the server has answered, so the clock starts with play.
    ///
    /// # Errors
    ///
    /// Any [`SyncError`]; the session stays in its previous phase.
    pub async fn start_game(
        &self,
        game_type: GameType,
        difficulty: Difficulty,
        now_ms: impl FnOnce() -> f64,
    ) -> Result<GameStart, SyncError> {
        let created = self.api.create_game(game_type, difficulty).await?;
        let started_at = now_ms();
        self.store.write(|s| s.begin_game(game_type, difficulty, created, started_at))
    }

    /// Flip a card unless the local guard refuses it.
    ///
    /// # Errors
    ///
    /// Any [`SyncError`] from the flip request.
    pub async fn flip_card(&self, card_id: u32) -> Result<Option<FlipApplied>, SyncError> {
        let Some(game_id) = self.store.read(|s| s.prepare_flip(card_id)) else {
            return Ok(None);
        };
        let response = self.api.flip_card(&game_id, card_id).await?;
        Ok(self.store.write(|s| s.apply_flip(&game_id, &response)))
    }

    /// Run the pair check scheduled under `ticket`, if it is still live.
    ///
    /// # Errors
    ///
    /// Any [`SyncError`] from the check-pair request.
    pub async fn check_pair(&self, ticket: Ticket) -> Result<Option<PairApplied>, SyncError> {
        let Some(check) = self.store.write(|s| s.claim_pair_check(ticket)) else {
            return Ok(None);
        };
        match self.api.check_pair(&check.game_id, check.first, check.second).await {
            Ok(response) => Ok(self.store.write(|s| s.apply_pair_check(&check.game_id, &response))),
            Err(err) => {
                self.store.write(Session::release_pair_check);
                Err(err)
            }
        }
    }

    /// Check a stalled pair right away on user request. `Ok(None)` when no
    /// pair is stalled.
    ///
    /// # Errors
    ///
    /// Any [`SyncError`] from the check-pair request.
    pub async fn retry_pair_check(&self) -> Result<Option<PairApplied>, SyncError> {
        let Some(ticket) = self.store.write(Session::arm_pair_retry) else {
            return Ok(None);
        };
        self.check_pair(ticket).await
    }

    /// Submit the answer buffer. `Ok(None)` when a submission is already in
    /// flight or the verdict arrived for a game that is no longer current.
    ///
    /// # Errors
    ///
    /// [`SyncError::Validation`] without any request when the buffer is
    /// incomplete, otherwise any error from the check request.
    pub async fn submit_answer(&self) -> Result<Option<GameResult>, SyncError> {
        let Some((game_id, answer)) = self.store.write(Session::claim_answer_submission)? else {
            return Ok(None);
        };
        match self.api.check_answer(&game_id, answer).await {
            Ok(response) => Ok(self.store.write(|s| s.apply_answer(&game_id, &response))),
            Err(err) => {
                self.store.write(Session::release_answer_submission);
                Err(err)
            }
        }
    }

    /// Replace the mirrored board with the server's snapshot. `Ok(None)`
    /// when no card game is on screen. Never sends a pair check.
    ///
    /// # Errors
    ///
    /// Any [`SyncError`] from the fetch.
    pub async fn resync(&self) -> Result<Option<FlipApplied>, SyncError> {
        let Some(game_id) = self.store.read(|s| s.game_id().map(str::to_owned)) else {
            return Ok(None);
        };
        let snapshot = self.api.fetch_game(&game_id).await?;
        Ok(self.store.write(|s| s.apply_snapshot(&game_id, snapshot)))
    }

    /// Return to setup. Returns the abandoned game id for
    /// [`Controller::abandon`].
    pub fn reset(&self) -> Option<String> {
        self.store.write(Session::reset)
    }

    /// Tell the server a game is no longer played.
    ///
    /// # Errors
    ///
    /// Any [`SyncError`] from the delete request.
    pub async fn abandon(&self, game_id: &str) -> Result<(), SyncError> {
        self.api.delete_game(game_id).await
    }
}
