//! Setup form state.

#[cfg(test)]
#[path = "setup_test.rs"]
mod setup_test;

use game::{Difficulty, GameType};

/// Choices on the setup form plus an in-flight flag for game creation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SetupState {
    pub game_type: GameType,
    pub difficulty: Difficulty,
    /// A create-game request is awaiting its response.
    pub starting: bool,
}

impl SetupState {
    /// Apply a `<select>` value. Unknown values are ignored.
    pub fn choose_game_type(&mut self, value: &str) {
        if let Ok(game_type) = value.parse() {
            self.game_type = game_type;
        }
    }

    /// Apply a `<select>` value. Unknown values fall back to medium, the way
    /// the server treats them.
    pub fn choose_difficulty(&mut self, value: &str) {
        self.difficulty = value.parse().unwrap_or_default();
    }

    /// Mark a start in flight and return its choices, or `None` while an
    /// earlier start is still pending.
    pub fn begin_start(&mut self) -> Option<(GameType, Difficulty)> {
        if self.starting {
            return None;
        }
        self.starting = true;
        Some((self.game_type, self.difficulty))
    }

    pub fn finish_start(&mut self) {
        self.starting = false;
    }
}
