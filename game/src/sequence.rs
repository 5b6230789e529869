//! Sequence-recall buffers: the server's sequence and the user's answer.

#[cfg(test)]
#[path = "sequence_test.rs"]
mod sequence_test;

use std::ops::RangeInclusive;

use crate::error::ValidationError;

/// Answer slot value meaning "nothing entered yet". Never selectable.
pub const EMPTY_SLOT: u32 = 0;

/// Selector numbers offered above the largest sequence value.
pub const DISTRACTOR_MARGIN: u32 = 2;

/// Largest sequence value accepted from the server. Keeps the selector to a
/// renderable number of buttons.
pub const MAX_SEQUENCE_VALUE: u32 = 999;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SequenceState {
    /// Target sequence as given by the server; not mutated after creation.
    pub sequence: Vec<u32>,
    /// User answer. Empty until the answer phase, then exactly
    /// `sequence.len()` slots.
    pub answer: Vec<u32>,
    pub active_slot: usize,
    /// Leading sequence numbers shown so far during memorization.
    pub revealed: usize,
}

impl SequenceState {
    #[must_use]
    pub fn new(sequence: Vec<u32>) -> Self {
        Self { sequence, ..Self::default() }
    }

    /// Size the answer buffer to the sequence and clear it to the sentinel.
    pub fn begin_answer(&mut self) {
        self.answer = vec![EMPTY_SLOT; self.sequence.len()];
        self.active_slot = 0;
    }

    /// Largest number the selector offers.
    #[must_use]
    pub fn selector_max(&self) -> u32 {
        self.sequence.iter().copied().max().unwrap_or(0).saturating_add(DISTRACTOR_MARGIN)
    }

    #[must_use]
    pub fn selector_numbers(&self) -> RangeInclusive<u32> {
        1..=self.selector_max()
    }

    /// Make `index` the active slot. Out-of-range indexes are ignored.
    pub fn select_slot(&mut self, index: usize) -> bool {
        if index >= self.answer.len() {
            return false;
        }
        self.active_slot = index;
        true
    }

    /// Write `number` into the active slot and advance cyclically. The
    /// sentinel itself is never accepted.
    pub fn select_number(&mut self, number: u32) -> bool {
        if self.answer.is_empty() || number == EMPTY_SLOT {
            return false;
        }
        let slot = self.active_slot.min(self.answer.len() - 1);
        self.answer[slot] = number;
        self.active_slot = (slot + 1) % self.answer.len();
        true
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.answer.is_empty() && self.answer.iter().all(|&n| n != EMPTY_SLOT)
    }

    /// The answer ready to send.
    ///
    /// # Errors
    ///
    /// [`ValidationError::IncompleteAnswer`] while any slot is empty.
    pub fn submission(&self) -> Result<Vec<u32>, ValidationError> {
        if !self.is_complete() {
            return Err(ValidationError::IncompleteAnswer);
        }
        Ok(self.answer.clone())
    }

    /// Show one more number during memorization. Returns `false` once the
    /// whole sequence is visible.
    pub fn reveal_next(&mut self) -> bool {
        if self.revealed >= self.sequence.len() {
            return false;
        }
        self.revealed += 1;
        self.revealed < self.sequence.len()
    }

    #[must_use]
    pub fn visible_numbers(&self) -> &[u32] {
        &self.sequence[..self.revealed.min(self.sequence.len())]
    }
}
