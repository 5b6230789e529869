//! Client tunables.
//!
//! Defaults mirror the game's fixed delays. The API base is empty so requests
//! stay same-origin with the page that served the WASM bundle.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use game::timers::{PAIR_CHECK_DELAY_MS, REVEAL_STAGGER_MS, TICK_MS};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix for every API path, without a trailing slash.
    pub api_base: String,
    pub pair_check_delay_ms: u32,
    pub reveal_stagger_ms: u32,
    pub tick_ms: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            pair_check_delay_ms: PAIR_CHECK_DELAY_MS,
            reveal_stagger_ms: REVEAL_STAGGER_MS,
            tick_ms: TICK_MS,
        }
    }
}

impl ClientConfig {
    /// Same config against another API origin. Trailing slashes are dropped.
    #[must_use]
    pub fn with_api_base(mut self, base: &str) -> Self {
        self.api_base = base.trim_end_matches('/').to_owned();
        self
    }

    pub fn pair_check_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.pair_check_delay_ms))
    }

    pub fn reveal_stagger(&self) -> Duration {
        Duration::from_millis(u64::from(self.reveal_stagger_ms))
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(u64::from(self.tick_ms))
    }
}
