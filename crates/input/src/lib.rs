//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events into [`crate::types::GameAction`]s. Every action is a single key
//! press, so there is no repeat handling.

pub mod map;

pub use tui_match3_types as types;

pub use map::{handle_key_event, should_quit};
