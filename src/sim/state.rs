//! Game state and playfield geometry
//!
//! Everything the frame step reads or writes lives in `GameState`.

use serde::{Deserialize, Serialize};

use super::difficulty::spawn_interval_ms;
use super::item::{FallingItem, Lane};
use crate::consts::*;

/// Lifecycle of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Never started, or stopped from outside
    #[default]
    Inactive,
    /// Round in progress
    Active,
    /// Round ended naturally (see `EndReason`)
    Terminated,
}

/// Playfield size and lane positions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
    /// Lane centers, indexed by `Lane::index`
    pub lane_x: [f32; 3],
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            lane_x: LANE_FRACTIONS.map(|f| width * f),
        }
    }

    /// Floor line; items are gone once they reach it
    #[inline]
    pub fn floor(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn lane_x(&self, lane: Lane) -> f32 {
        self.lane_x[lane.index()]
    }

    /// True if `y` lies strictly inside the catch band above the floor
    #[inline]
    pub fn in_catch_zone(&self, y: f32) -> bool {
        y > self.floor() - CATCH_ZONE_TOP && y < self.floor() - CATCH_ZONE_BOTTOM
    }
}

/// Complete round state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub score: u32,
    pub lives: u8,
    /// Seconds remaining
    pub time_left: f32,
    /// Fruits that hit the floor (bombs never count)
    pub missed_count: u32,
    pub level: u8,
    pub player_lane: Lane,
    pub phase: GamePhase,
    /// Falling items in spawn order
    pub items: Vec<FallingItem>,
    /// Milliseconds accumulated toward the next spawn
    pub spawn_timer_ms: f32,
    pub spawn_interval_ms: f32,
    /// Timestamp of the previous frame; None until the first frame after start
    pub last_frame_time: Option<f64>,
    pub playfield: Playfield,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Playfield::default())
    }
}

impl GameState {
    /// Fresh, inactive state on the given playfield
    pub fn new(playfield: Playfield) -> Self {
        Self {
            score: 0,
            lives: START_LIVES,
            time_left: ROUND_SECONDS,
            missed_count: 0,
            level: 1,
            player_lane: Lane::default(),
            phase: GamePhase::Inactive,
            items: Vec::new(),
            spawn_timer_ms: 0.0,
            spawn_interval_ms: spawn_interval_ms(1),
            last_frame_time: None,
            playfield,
        }
    }

    /// Reset every counter and enter the Active phase.
    /// The player's lane is kept; it tracks the body, not the round.
    pub fn reset(&mut self) {
        let lane = self.player_lane;
        *self = Self::new(self.playfield);
        self.player_lane = lane;
        self.phase = GamePhase::Active;
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Active
    }

    /// Seconds since the round started
    #[inline]
    pub fn elapsed(&self) -> f32 {
        ROUND_SECONDS - self.time_left
    }

    /// Remaining time rounded up for display
    pub fn time_left_ceil(&self) -> i32 {
        self.time_left.ceil() as i32
    }
}
