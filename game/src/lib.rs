//! Client-side state synchronization for the memory trainer game API.
//!
//! This crate owns everything a front-end needs to mirror server-authoritative
//! game state: the wire schema, the session model, the phase machine, timer
//! slots and the async sync controller. It has no browser or runtime
//! dependencies so both the `client` (Leptos/WASM) and `cli` (tokio) front-ends
//! share one implementation.
//!
//! ARCHITECTURE
//! ============
//! `session` holds pure state transitions. `sync` sequences them around awaited
//! transport calls without holding a borrow across an await point. Rendering
//! layers only read `Session`; they never mutate it directly.

pub mod api;
pub mod cards;
pub mod error;
pub mod phase;
pub mod sequence;
pub mod session;
pub mod sync;
pub mod timers;
pub mod wire;

pub use api::{ApiRequest, GameApi, Method, Transport};
pub use cards::{Card, CardsState};
pub use error::{Operation, SyncError, ValidationError};
pub use phase::{GameType, Phase};
pub use sequence::SequenceState;
pub use session::{Difficulty, GameResult, GameSession, Session};
pub use sync::{Controller, SessionStore};
pub use timers::{Countdown, Ticket, TimerSlot, Timers};
