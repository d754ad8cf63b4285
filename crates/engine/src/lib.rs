//! Player-facing orchestration on top of the rules crate.
//!
//! - [`pacing`]: immediate or staged cascade playback driven by elapsed time
//! - [`game`]: the `Game` controller that maps actions to session calls

pub mod game;
pub mod pacing;

pub use tui_match3_core as core;
pub use tui_match3_types as types;

pub use game::Game;
pub use pacing::{Pacing, StageDelays, StagedDriver};
