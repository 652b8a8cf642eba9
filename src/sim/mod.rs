//! Round simulation
//!
//! All gameplay rules live here. This module has no rendering or platform
//! dependencies:
//! - Time comes in as host timestamps, never read from a clock
//! - Randomness comes in through an injected RNG
//! - Items are resolved in spawn order

pub mod difficulty;
pub mod events;
pub mod item;
pub mod spawn;
pub mod state;
pub mod tick;

pub use difficulty::{level_for_elapsed, spawn_interval_ms};
pub use events::{Cue, EndReason, GameEvent, StatusUpdate};
pub use item::{FallingItem, ITEM_TYPES, ItemKind, ItemTypeSpec, Lane};
pub use spawn::{SPAWN_TABLE, SpawnTable, spawn_item};
pub use state::{GamePhase, GameState, Playfield};
pub use tick::{status, tick};
