//! Game modes and the visible-phase machine.
//!
//! Transitions are driven by `Session`; this module only names the states and
//! answers which UI regions each one shows.

#[cfg(test)]
#[path = "phase_test.rs"]
mod phase_test;

use std::fmt;
use std::str::FromStr;

/// Minigame mode, as named in the `type` query parameter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GameType {
    #[default]
    Sequence,
    Cards,
}

impl GameType {
    pub const ALL: [Self; 2] = [Self::Sequence, Self::Cards];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sequence => "sequence",
            Self::Cards => "cards",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Sequence => "Number sequence",
            Self::Cards => "Card pairs",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sequence" => Ok(Self::Sequence),
            "cards" => Ok(Self::Cards),
            other => Err(format!("unknown game type: {other}")),
        }
    }
}

/// Which part of the page is active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Setup,
    /// Sequence shown, countdown running.
    Memorization,
    /// Slots and number selector shown.
    AnswerEntry,
    CardGrid,
    /// Outcome shown; the board of the finished game stays visible.
    Result,
}

impl Phase {
    #[must_use]
    pub fn is_playing(self) -> bool {
        matches!(self, Self::Memorization | Self::AnswerEntry | Self::CardGrid)
    }

    #[must_use]
    pub fn shows_setup(self) -> bool {
        self == Self::Setup
    }

    #[must_use]
    pub fn shows_game_area(self) -> bool {
        self != Self::Setup
    }

    /// First playing phase for a freshly created game.
    #[must_use]
    pub fn entry_for(game_type: GameType) -> Self {
        match game_type {
            GameType::Sequence => Self::Memorization,
            GameType::Cards => Self::CardGrid,
        }
    }
}
