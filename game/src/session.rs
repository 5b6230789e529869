//! The single session record and every transition applied to it.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `Session` lives for the whole page. Front-ends read it to render and
//! hand it to `sync::Controller` to mutate. Every `apply_*` method takes the
//! game id the request was issued for and ignores responses for any other
//! game, so a response that lands after a reset or a restart changes nothing.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fmt;
use std::str::FromStr;

use crate::cards::{CardsState, FlipGuard};
use crate::error::{SyncError, ValidationError};
use crate::phase::{GameType, Phase};
use crate::sequence::{MAX_SEQUENCE_VALUE, SequenceState};
use crate::timers::{Countdown, CountdownTick, TICK_MS, Ticket, Timers};
use crate::wire::{CheckAnswerResponse, CheckPairResponse, CreateGameResponse, FlipResponse, GameSnapshot};

/// Used when the server omits `memorizationTime`.
pub const DEFAULT_MEMORIZATION_MS: u64 = 3000;

const ALL_PAIRS_FOUND: &str = "Congratulations! All pairs found!";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Identity of the active game.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    pub game_id: String,
    pub game_type: GameType,
    pub difficulty: Difficulty,
    /// Milliseconds since the Unix epoch when play began.
    pub started_at_ms: Option<f64>,
}

/// Outcome shown in the result banner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameResult {
    pub success: bool,
    pub message: String,
    pub score: u32,
}

impl GameResult {
    #[must_use]
    pub fn display_text(&self) -> String {
        if self.score > 0 {
            format!("{} Score: {}", self.message, self.score)
        } else {
            self.message.clone()
        }
    }
}

/// Delays a front-end must start once a game begins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameStart {
    pub clock: Ticket,
    /// Present for sequence games only.
    pub memorization: Option<Ticket>,
}

/// What followed from a mirrored flip.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlipApplied {
    /// Armed when two cards are now face-up.
    pub pair_check: Option<Ticket>,
    pub result: Option<GameResult>,
}

/// What followed from a mirrored pair check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PairApplied {
    pub is_pair: bool,
    pub result: Option<GameResult>,
}

/// A pair check ready to send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PairCheck {
    pub game_id: String,
    pub first: u32,
    pub second: u32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub game: Option<GameSession>,
    pub phase: Phase,
    pub sequence: SequenceState,
    pub cards: CardsState,
    pub countdown: Countdown,
    pub timers: Timers,
    pub elapsed_secs: u64,
    /// Sum of scores won since the last reset.
    pub score_total: u32,
    pub result: Option<GameResult>,
    /// Transient feedback such as "Pair found!".
    pub status_line: Option<String>,
    /// An answer submission is awaiting its verdict.
    pub answer_pending: bool,
    /// A pair check request is awaiting its verdict.
    pub pair_check_pending: bool,
}

impl Session {
    #[must_use]
    pub fn game_id(&self) -> Option<&str> {
        self.game.as_ref().map(|g| g.game_id.as_str())
    }

    #[must_use]
    pub fn game_type(&self) -> Option<GameType> {
        self.game.as_ref().map(|g| g.game_type)
    }

    #[must_use]
    pub fn is_current(&self, game_id: &str) -> bool {
        self.game_id() == Some(game_id)
    }

    /// Enter play from a creation response.
    ///
    /// # Errors
    ///
    /// [`SyncError::ResponseParse`] when the payload lacks the data its mode
    /// needs. The session is left untouched in that case.
    pub fn begin_game(
        &mut self,
        game_type: GameType,
        difficulty: Difficulty,
        created: CreateGameResponse,
        now_ms: f64,
    ) -> Result<GameStart, SyncError> {
        let CreateGameResponse { game_id, sequence, memorization_time, cards, total_pairs } = created;
        let (sequence, cards) = match game_type {
            GameType::Sequence => match sequence {
                Some(seq) if seq.iter().any(|&n| n > MAX_SEQUENCE_VALUE) => {
                    return Err(SyncError::ResponseParse(format!("sequence value above {MAX_SEQUENCE_VALUE}")));
                }
                Some(seq) if !seq.is_empty() => (SequenceState::new(seq), CardsState::default()),
                _ => return Err(SyncError::ResponseParse("sequence missing from game payload".to_owned())),
            },
            GameType::Cards => match cards {
                Some(cards) if !cards.is_empty() => (SequenceState::default(), CardsState::new(cards, total_pairs)),
                _ => return Err(SyncError::ResponseParse("cards missing from game payload".to_owned())),
            },
        };

        self.timers.cancel_all();
        self.game = Some(GameSession { game_id, game_type, difficulty, started_at_ms: Some(now_ms) });
        self.phase = Phase::entry_for(game_type);
        self.sequence = sequence;
        self.cards = cards;
        self.countdown = Countdown::from_millis(memorization_time.unwrap_or(DEFAULT_MEMORIZATION_MS));
        self.elapsed_secs = 0;
        self.result = None;
        self.status_line = None;
        self.answer_pending = false;
        self.pair_check_pending = false;

        let clock = self.timers.clock.arm();
        let memorization = (game_type == GameType::Sequence).then(|| self.timers.memorization.arm());
        Ok(GameStart { clock, memorization })
    }

    /// Refresh the elapsed-time display. Returns `false` once the clock
    /// ticket is dead.
    pub fn tick_clock(&mut self, ticket: Ticket, now_ms: f64) -> bool {
        if !self.timers.clock.is_live(ticket) {
            return false;
        }
        if let Some(started) = self.game.as_ref().and_then(|g| g.started_at_ms) {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let secs = ((now_ms - started).max(0.0) / f64::from(TICK_MS)).floor() as u64;
            self.elapsed_secs = secs;
        }
        true
    }

    /// One second of memorization countdown. Expiry moves to answer entry.
    pub fn tick_memorization(&mut self, ticket: Ticket) -> CountdownTick {
        if !self.timers.memorization.is_live(ticket) {
            return CountdownTick::Stale;
        }
        if self.phase != Phase::Memorization {
            self.timers.memorization.cancel();
            return CountdownTick::Stale;
        }
        if self.countdown.tick() {
            self.timers.memorization.cancel();
            self.enter_answer_phase();
            return CountdownTick::Expired;
        }
        CountdownTick::Running(self.countdown.remaining)
    }

    /// Show the next sequence number. Returns `false` when the reveal is done
    /// or the ticket is dead.
    pub fn reveal_next(&mut self, ticket: Ticket) -> bool {
        if !self.timers.memorization.is_live(ticket) || self.phase != Phase::Memorization {
            return false;
        }
        self.sequence.reveal_next()
    }

    fn enter_answer_phase(&mut self) {
        self.sequence.begin_answer();
        self.phase = Phase::AnswerEntry;
    }

    pub fn select_slot(&mut self, index: usize) -> bool {
        self.phase == Phase::AnswerEntry && self.sequence.select_slot(index)
    }

    pub fn select_number(&mut self, number: u32) -> bool {
        self.phase == Phase::AnswerEntry && self.sequence.select_number(number)
    }

    /// Game id to flip against, or `None` when the click must not be sent.
    #[must_use]
    pub fn prepare_flip(&self, card_id: u32) -> Option<String> {
        if self.phase != Phase::CardGrid {
            return None;
        }
        match self.cards.check_flip(card_id) {
            FlipGuard::Allowed => self.game_id().map(str::to_owned),
            FlipGuard::PairPending | FlipGuard::AlreadyFlipped | FlipGuard::Matched => None,
        }
    }

    /// Mirror a flip response. `None` when it belongs to another game.
    pub fn apply_flip(&mut self, game_id: &str, response: &FlipResponse) -> Option<FlipApplied> {
        if !self.is_current(game_id) || self.phase != Phase::CardGrid {
            return None;
        }
        self.cards.apply_flip(response);
        self.status_line = None;
        let mut applied = FlipApplied::default();
        if response.is_complete {
            applied.result = Some(self.finish(true, ALL_PAIRS_FOUND.to_owned(), response.score));
            return Some(applied);
        }
        if self.cards.pending_pair().is_some() {
            applied.pair_check = Some(self.timers.pair_check.arm());
        }
        Some(applied)
    }

    /// Consume a pair-check ticket. Yields the request only for the live
    /// ticket while two cards are still pending.
    pub fn claim_pair_check(&mut self, ticket: Ticket) -> Option<PairCheck> {
        if !self.timers.pair_check.fire(ticket) || self.phase != Phase::CardGrid {
            return None;
        }
        let (first, second) = self.cards.pending_pair()?;
        let game_id = self.game_id()?.to_owned();
        self.pair_check_pending = true;
        Some(PairCheck { game_id, first, second })
    }

    /// Undo [`Session::claim_pair_check`] after a failed call. The pair stays
    /// face up until the user asks for another check.
    pub fn release_pair_check(&mut self) {
        self.pair_check_pending = false;
    }

    /// Two cards are face up with no check scheduled or in flight, so only
    /// an explicit retry can settle them.
    #[must_use]
    pub fn pair_check_stalled(&self) -> bool {
        self.phase == Phase::CardGrid
            && self.cards.pending_pair().is_some()
            && !self.timers.pair_check.is_armed()
            && !self.pair_check_pending
    }

    /// Arm a pair check on user request. `None` unless the pair is stalled.
    pub fn arm_pair_retry(&mut self) -> Option<Ticket> {
        self.pair_check_stalled().then(|| self.timers.pair_check.arm())
    }

    pub fn apply_pair_check(&mut self, game_id: &str, response: &CheckPairResponse) -> Option<PairApplied> {
        if !self.is_current(game_id) || self.phase != Phase::CardGrid {
            return None;
        }
        self.pair_check_pending = false;
        self.cards.apply_pair_check(response);
        if response.is_complete {
            let message = response.message.clone().unwrap_or_else(|| ALL_PAIRS_FOUND.to_owned());
            let result = self.finish(true, message, response.score);
            return Some(PairApplied { is_pair: response.is_pair, result: Some(result) });
        }
        self.status_line.clone_from(&response.message);
        Some(PairApplied { is_pair: response.is_pair, result: None })
    }

    /// Game id and answer ready to submit.
    ///
    /// # Errors
    ///
    /// [`ValidationError::NoActiveGame`] outside answer entry and
    /// [`ValidationError::IncompleteAnswer`] while a slot is empty.
    pub fn prepare_answer(&self) -> Result<(String, Vec<u32>), ValidationError> {
        let game_id = match (&self.game, self.phase) {
            (Some(game), Phase::AnswerEntry) => game.game_id.clone(),
            _ => return Err(ValidationError::NoActiveGame),
        };
        let answer = self.sequence.submission()?;
        Ok((game_id, answer))
    }

    /// Like [`Session::prepare_answer`], but marks the submission in flight.
    /// Yields `None` while an earlier submission is still pending.
    ///
    /// # Errors
    ///
    /// Same as [`Session::prepare_answer`].
    pub fn claim_answer_submission(&mut self) -> Result<Option<(String, Vec<u32>)>, ValidationError> {
        if self.answer_pending {
            return Ok(None);
        }
        let prepared = self.prepare_answer()?;
        self.answer_pending = true;
        Ok(Some(prepared))
    }

    /// Undo [`Session::claim_answer_submission`] after a failed call.
    pub fn release_answer_submission(&mut self) {
        self.answer_pending = false;
    }

    /// Mirror the verdict on a submitted answer. The clock stops win or lose.
    pub fn apply_answer(&mut self, game_id: &str, response: &CheckAnswerResponse) -> Option<GameResult> {
        if !self.is_current(game_id) || self.phase != Phase::AnswerEntry {
            return None;
        }
        self.answer_pending = false;
        let score = if response.success { response.score } else { 0 };
        Some(self.finish(response.success, response.message.clone(), score))
    }

    /// Replace the mirrored board with an authoritative snapshot.
    ///
    /// Never schedules a pair check. Two face-up cards left by a failed call
    /// wait for [`Session::arm_pair_retry`].
    pub fn apply_snapshot(&mut self, game_id: &str, snapshot: GameSnapshot) -> Option<FlipApplied> {
        if !self.is_current(game_id) || self.phase != Phase::CardGrid {
            return None;
        }
        let cards = snapshot.cards?;
        self.cards.apply_snapshot(cards, snapshot.moves, snapshot.pairs_found);
        let mut applied = FlipApplied::default();
        if snapshot.is_complete {
            applied.result = Some(self.finish(true, ALL_PAIRS_FOUND.to_owned(), 0));
        } else {
            self.timers.pair_check.cancel();
        }
        Some(applied)
    }

    fn finish(&mut self, success: bool, message: String, score: u32) -> GameResult {
        self.timers.cancel_all();
        self.score_total = self.score_total.saturating_add(score);
        self.phase = Phase::Result;
        let result = GameResult { success, message, score };
        self.result = Some(result.clone());
        result
    }

    /// Back to setup. Cancels every timer, clears the score, and returns the
    /// id of the abandoned game, if any. Safe to call repeatedly.
    pub fn reset(&mut self) -> Option<String> {
        let mut timers = std::mem::take(&mut self.timers);
        timers.cancel_all();
        let abandoned = self.game.take().map(|g| g.game_id);
        *self = Self { timers, ..Self::default() };
        abandoned
    }
}
