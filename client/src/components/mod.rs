//! Reusable UI components.
//!
//! ARCHITECTURE
//! ============
//! Components read the `Session` signal and call `Actions`; they never mutate
//! session state directly.

pub mod card_grid;
pub mod result_banner;
pub mod scoreboard;
pub mod sequence_board;
pub mod setup_form;
