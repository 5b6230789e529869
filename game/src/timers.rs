//! Single-slot timer bookkeeping shared by every front-end.
//!
//! DESIGN
//! ======
//! Front-ends run the actual delays (`gloo-timers` in the browser, `tokio` in
//! the CLI). Each delay carries a [`Ticket`] taken from a [`TimerSlot`]; when
//! it wakes it asks the slot whether the ticket is still live. Arming a slot
//! supersedes every earlier ticket, and cancelling only bumps the generation,
//! so cancelling twice or cancelling an idle slot is a no-op.

#[cfg(test)]
#[path = "timers_test.rs"]
mod timers_test;

/// Delay between the second flip and the pair check.
pub const PAIR_CHECK_DELAY_MS: u32 = 1000;
/// Memorization countdown and elapsed-time clock resolution.
pub const TICK_MS: u32 = 1000;
/// Delay between successive numbers appearing during memorization.
pub const REVEAL_STAGGER_MS: u32 = 200;

/// Handle for one scheduled callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

/// A slot holding at most one live scheduled callback.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TimerSlot {
    generation: u64,
    armed: bool,
}

impl TimerSlot {
    /// Schedule a new callback, invalidating any earlier one.
    pub fn arm(&mut self) -> Ticket {
        self.generation += 1;
        self.armed = true;
        Ticket(self.generation)
    }

    pub fn cancel(&mut self) {
        if self.armed {
            self.generation += 1;
            self.armed = false;
        }
    }

    #[must_use]
    pub fn is_live(&self, ticket: Ticket) -> bool {
        self.armed && ticket.0 == self.generation
    }

    /// Consume a single-shot ticket. Returns `true` exactly once per live
    /// ticket.
    pub fn fire(&mut self, ticket: Ticket) -> bool {
        if !self.is_live(ticket) {
            return false;
        }
        self.armed = false;
        true
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

/// All timers owned by one session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Timers {
    /// Repeating elapsed-time display.
    pub clock: TimerSlot,
    /// Repeating memorization countdown plus the staggered reveal.
    pub memorization: TimerSlot,
    /// Single-shot debounced pair check.
    pub pair_check: TimerSlot,
}

impl Timers {
    pub fn cancel_all(&mut self) {
        self.clock.cancel();
        self.memorization.cancel();
        self.pair_check.cancel();
    }

    #[must_use]
    pub fn any_armed(&self) -> bool {
        self.clock.is_armed() || self.memorization.is_armed() || self.pair_check.is_armed()
    }
}

/// Result of one countdown tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownTick {
    /// The ticket no longer belongs to the live countdown.
    Stale,
    Running(u32),
    Expired,
}

/// Whole seconds left in the memorization phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Countdown {
    pub remaining: u32,
}

impl Countdown {
    /// Rounds up so a 2500 ms window shows "3".
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        let secs = millis.div_ceil(u64::from(TICK_MS));
        Self { remaining: u32::try_from(secs).unwrap_or(u32::MAX) }
    }

    /// Count down one second. Returns `true` when time is up.
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining == 0
    }
}
