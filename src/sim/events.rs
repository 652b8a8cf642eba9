//! Events produced by the frame step
//!
//! `tick` records what happened in order; the engine forwards each event to
//! whichever hook is registered for it.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::item::ItemKind;
use crate::consts::MAX_MISSES;

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    TimeOver,
    BombTouched,
    MissedFruits,
}

impl EndReason {
    /// Player-facing message
    pub fn as_str(&self) -> &'static str {
        match self {
            EndReason::TimeOver => "Time Over!",
            EndReason::BombTouched => "Bomb Touched!",
            EndReason::MissedFruits => "Missed 2 Fruits!",
        }
    }
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scoreboard snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub score: u32,
    /// Remaining seconds, rounded up
    pub time_left: i32,
    pub missed: u32,
    pub max_misses: u32,
}

impl StatusUpdate {
    pub fn new(score: u32, time_left: i32, missed: u32) -> Self {
        Self {
            score,
            time_left,
            missed,
            max_misses: MAX_MISSES,
        }
    }
}

/// Fire-and-forget feedback for the sound collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    Caught,
    Missed,
    Bomb,
    GameOver,
}

impl Cue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cue::Caught => "caught",
            Cue::Missed => "missed",
            Cue::Bomb => "bomb",
            Cue::GameOver => "gameover",
        }
    }
}

/// Something observable that happened during a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Status(StatusUpdate),
    Cue(Cue),
    /// A fruit was caught for `points`
    Caught { kind: ItemKind, points: u32 },
    /// A fruit reached the floor
    Missed { kind: ItemKind },
    /// Terminal transition, emitted once per round
    GameOver { final_score: u32, reason: EndReason },
}
