//! Reactive application state.
//!
//! DESIGN
//! ======
//! The game session itself is `game::Session` in an `RwSignal`; this module
//! adds the adapter the sync controller writes through plus the small amount
//! of form state that never leaves the browser.

pub mod session;
pub mod setup;
