//! Sky Fruits - a pose-controlled "catch the falling fruit" arcade game
//!
//! Core modules:
//! - `sim`: Frame simulation (spawning, falling, catching, game rules)
//! - `engine`: Lifecycle wrapper with callback hooks around `sim`
//! - `input`: Pose prediction smoothing
//! - `renderer`: Read-only render view and the 2D canvas painter
//! - `settings`: Player preferences persisted in LocalStorage

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod engine;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use engine::GameEngine;
pub use input::{Prediction, PredictionStabilizer};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default playfield size (canvas pixels)
    pub const DEFAULT_WIDTH: f32 = 400.0;
    pub const DEFAULT_HEIGHT: f32 = 400.0;

    /// Lane x-positions as fractions of the playfield width
    pub const LANE_FRACTIONS: [f32; 3] = [0.2, 0.5, 0.8];

    /// Round length in seconds
    pub const ROUND_SECONDS: f32 = 60.0;
    /// Lives at the start of a round (a bomb takes all of them)
    pub const START_LIVES: u8 = 3;
    /// Missed fruits that end the round
    pub const MAX_MISSES: u32 = 2;

    /// Items appear above the visible playfield
    pub const SPAWN_Y: f32 = -50.0;
    /// Catch zone is the band (floor - TOP, floor - BOTTOM)
    pub const CATCH_ZONE_TOP: f32 = 60.0;
    pub const CATCH_ZONE_BOTTOM: f32 = 10.0;

    /// Spawn attempts per cycle before giving up
    pub const MAX_SPAWN_ATTEMPTS: u32 = 5;
    /// Minimum gap between projected landings (seconds)
    pub const MIN_LANDING_GAP: f32 = 0.6;
    /// Fall speed bonus per level above 1
    pub const SPEED_STEP_PER_LEVEL: f32 = 0.3;
    /// Extra bomb weight per level above 1
    pub const BOMB_WEIGHT_STEP_PER_LEVEL: f32 = 0.05;

    /// Basket geometry (relative to the floor)
    pub const BASKET_OFFSET: f32 = 40.0;
    pub const BASKET_RADIUS: f32 = 30.0;
}
