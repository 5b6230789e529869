//! Fixed element ids and class names the page exposes.
//!
//! Stylesheets and end-to-end scripts address the page through these, so they
//! are kept in one place and never built ad hoc in components.

#[cfg(test)]
#[path = "dom_test.rs"]
mod dom_test;

use game::Card;
use game::sequence::EMPTY_SLOT;

pub const GAME_SETUP: &str = "gameSetup";
pub const GAME_TYPE: &str = "gameType";
pub const DIFFICULTY: &str = "difficulty";
pub const START_GAME_BTN: &str = "startGameBtn";
pub const GAME_AREA: &str = "gameArea";
pub const SCORE: &str = "score";
pub const TIMER: &str = "timer";
pub const SEQUENCE_GAME: &str = "sequenceGame";
pub const CARDS_GAME: &str = "cardsGame";
pub const MEMORIZATION_PHASE: &str = "memorizationPhase";
pub const MEMORIZATION_TIMER: &str = "memorizationTimer";
pub const SEQUENCE_DISPLAY: &str = "sequenceDisplay";
pub const ANSWER_PHASE: &str = "answerPhase";
pub const ANSWER_INPUT: &str = "answerInput";
pub const CHECK_ANSWER_BTN: &str = "checkAnswerBtn";
pub const RESET_GAME_BTN: &str = "resetGameBtn";
pub const RESET_GAME_BTN_2: &str = "resetGameBtn2";
pub const RESULT_MESSAGE: &str = "resultMessage";
pub const CARDS_GRID: &str = "cardsGrid";
pub const MOVES: &str = "moves";
pub const PAIRS_FOUND: &str = "pairsFound";
pub const CHECK_PAIR_BTN: &str = "checkPairBtn";

/// Id of the `index`-th answer slot.
pub fn slot_id(index: usize) -> String {
    format!("slot-{index}")
}

/// Inline style toggling a region on or off.
pub fn display_style(visible: bool) -> &'static str {
    if visible { "display: block" } else { "display: none" }
}

/// Classes for one card tile. Matched cards always read as flipped.
pub fn card_class(card: &Card) -> String {
    let mut class = String::from("card");
    if card.is_revealed() {
        class.push_str(" flipped");
    }
    if card.matched {
        class.push_str(" matched");
    }
    class
}

pub fn slot_class(value: u32, active: bool) -> String {
    let mut class = String::from("answer-slot");
    if value != EMPTY_SLOT {
        class.push_str(" filled");
    }
    if active {
        class.push_str(" active");
    }
    class
}

/// Slot label; the empty sentinel renders blank.
pub fn slot_text(value: u32) -> String {
    if value == EMPTY_SLOT { String::new() } else { value.to_string() }
}

pub fn result_class(success: bool) -> &'static str {
    if success { "result-message success" } else { "result-message error" }
}

/// `pairsFound` label, with the total when the server sent one.
pub fn pairs_text(found: u32, total: Option<u32>) -> String {
    match total {
        Some(total) => format!("{found} / {total}"),
        None => found.to_string(),
    }
}
