//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser concerns (clock, alerts) and the fixed DOM
//! vocabulary from page and component logic.

pub mod clock;
pub mod dom;
pub mod notify;
