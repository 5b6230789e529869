//! Page modules.
//!
//! ARCHITECTURE
//! ============
//! The trainer page owns async orchestration (requests, timer loops) and
//! delegates rendering to `components`.

pub mod trainer;
