//! TUI match-3 (workspace facade crate).
//!
//! This package exposes `tui_match3::{core,engine,input,term,types}` while
//! the implementation lives in dedicated crates under `crates/`. Settings
//! loading for the binary lives in [`config`].

pub mod config;

pub use tui_match3_core as core;
pub use tui_match3_engine as engine;
pub use tui_match3_input as input;
pub use tui_match3_term as term;
pub use tui_match3_types as types;
