//! Networking for the game API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` adapts `gloo-net` to the `game::Transport` seam; request shapes and
//! response decoding live in the `game` crate.

pub mod http;
