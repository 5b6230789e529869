//! Signal-backed session store.
//!
//! `SessionSignal` lets `game::Controller` drive the page-wide
//! `RwSignal<Session>` directly. Reads are untracked so the controller never
//! subscribes to the state it is mutating; writes go through the signal's
//! write guard and notify subscribers when the guard drops.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use leptos::prelude::*;

use game::{Session, SessionStore};

#[derive(Clone, Copy, Debug)]
pub struct SessionSignal(pub RwSignal<Session>);

impl SessionStore for SessionSignal {
    fn read<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        self.0.with_untracked(f)
    }

    fn write<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut guard = self.0.write();
        f(&mut *guard)
    }
}
