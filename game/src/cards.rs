//! Card-matching board mirror.
//!
//! The server owns shuffling, matching and scoring. This model only mirrors
//! the last board it returned plus the ids flipped since the last pair check,
//! and decides locally whether a click may be sent at all.

#[cfg(test)]
#[path = "cards_test.rs"]
mod cards_test;

use serde::{Deserialize, Serialize};

use crate::wire::{CheckPairResponse, FlipResponse};

/// Cards that may be face-up and unresolved at the same time.
pub const MAX_FLIPPED: usize = 2;

/// One card as the server reports it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    #[serde(deserialize_with = "crate::wire::deserialize_card_id")]
    pub id: u32,
    /// Displayed symbol; equal values form a pair.
    #[serde(deserialize_with = "crate::wire::deserialize_symbol")]
    pub value: String,
    #[serde(default, deserialize_with = "crate::wire::deserialize_flag")]
    pub flipped: bool,
    #[serde(default, deserialize_with = "crate::wire::deserialize_flag")]
    pub matched: bool,
}

impl Card {
    /// Face-up on screen. Matched cards stay revealed even if the server
    /// clears their `flipped` flag.
    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.flipped || self.matched
    }

    /// Whether the renderer attaches a flip handler.
    #[must_use]
    pub fn is_clickable(&self) -> bool {
        !self.matched
    }
}

/// Local verdict on a flip request before anything is sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipGuard {
    Allowed,
    /// Two cards are already waiting for the pair check.
    PairPending,
    /// The card is already in the flipped set.
    AlreadyFlipped,
    /// The card was matched earlier and is permanently disabled.
    Matched,
}

/// Mirror of the card board for the active game.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CardsState {
    pub cards: Vec<Card>,
    /// Ids flipped since the last pair check, in flip order. Never more than
    /// [`MAX_FLIPPED`] entries.
    pub flipped_ids: Vec<u32>,
    pub moves: u32,
    pub pairs_found: u32,
    pub total_pairs: Option<u32>,
}

impl CardsState {
    #[must_use]
    pub fn new(cards: Vec<Card>, total_pairs: Option<u32>) -> Self {
        let mut state = Self { cards, total_pairs, ..Self::default() };
        state.flipped_ids = state.face_up_unmatched();
        state
    }

    #[must_use]
    pub fn check_flip(&self, card_id: u32) -> FlipGuard {
        if self.flipped_ids.len() >= MAX_FLIPPED {
            return FlipGuard::PairPending;
        }
        if self.flipped_ids.contains(&card_id) {
            return FlipGuard::AlreadyFlipped;
        }
        if self.cards.iter().any(|c| c.id == card_id && c.matched) {
            return FlipGuard::Matched;
        }
        FlipGuard::Allowed
    }

    /// The two ids awaiting a pair check, in flip order.
    #[must_use]
    pub fn pending_pair(&self) -> Option<(u32, u32)> {
        match self.flipped_ids.as_slice() {
            [first, second] => Some((*first, *second)),
            _ => None,
        }
    }

    pub fn apply_flip(&mut self, response: &FlipResponse) {
        self.cards.clone_from(&response.cards);
        self.flipped_ids = bounded_unique(&response.flipped_cards);
        self.moves = response.moves;
        self.pairs_found = response.pairs_found;
    }

    /// The server has already turned a non-matching pair face down, so the
    /// flipped set clears whatever the outcome.
    pub fn apply_pair_check(&mut self, response: &CheckPairResponse) {
        self.cards.clone_from(&response.cards);
        self.flipped_ids.clear();
        self.moves = response.moves;
        self.pairs_found = response.pairs_found;
    }

    pub fn apply_snapshot(&mut self, cards: Vec<Card>, moves: u32, pairs_found: u32) {
        self.cards = cards;
        self.moves = moves;
        self.pairs_found = pairs_found;
        self.flipped_ids = self.face_up_unmatched();
    }

    #[must_use]
    pub fn is_board_matched(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(|c| c.matched)
    }

    fn face_up_unmatched(&self) -> Vec<u32> {
        let ids: Vec<u32> = self
            .cards
            .iter()
            .filter(|c| c.flipped && !c.matched)
            .map(|c| c.id)
            .collect();
        bounded_unique(&ids)
    }
}

fn bounded_unique(ids: &[u32]) -> Vec<u32> {
    let mut out = Vec::with_capacity(MAX_FLIPPED);
    for id in ids {
        if out.len() == MAX_FLIPPED {
            break;
        }
        if !out.contains(id) {
            out.push(*id);
        }
    }
    out
}
