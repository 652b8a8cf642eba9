//! Item spawning
//!
//! Picks a lane and item type at random, then rejects candidates that would
//! land too close in time to an item already in flight. Two fruits landing
//! together in different lanes cannot both be caught.

use std::sync::LazyLock;

use rand::Rng;

use super::difficulty::{bomb_weight_bonus, speed_multiplier};
use super::item::{FallingItem, ITEM_TYPES, ItemKind, ItemTypeSpec, Lane};
use super::state::GameState;
use crate::consts::{MAX_SPAWN_ATTEMPTS, MIN_LANDING_GAP, SPAWN_Y};

/// Cumulative weight table for the item type draw
#[derive(Debug, Clone)]
pub struct SpawnTable {
    /// (kind, cumulative base weight) in table order
    entries: Vec<(ItemKind, f32)>,
}

/// Built once from `ITEM_TYPES`
pub static SPAWN_TABLE: LazyLock<SpawnTable> = LazyLock::new(|| SpawnTable::new(&ITEM_TYPES));

impl SpawnTable {
    pub fn new(types: &[ItemTypeSpec]) -> Self {
        let mut total = 0.0;
        let entries = types
            .iter()
            .map(|spec| {
                total += spec.weight;
                (spec.kind, total)
            })
            .collect();
        Self { entries }
    }

    /// Select a type for the uniform draw `r` in [0, 1).
    ///
    /// `bomb_bonus` is added to the bomb's weight without renormalizing, so
    /// it shifts every bucket from the bomb onward. Falls back to the first
    /// type if rounding leaves `r` above every bucket.
    pub fn pick(&self, r: f32, bomb_bonus: f32) -> ItemKind {
        let mut bonus = 0.0;
        for &(kind, cumulative) in &self.entries {
            if kind.is_bomb() {
                bonus = bomb_bonus;
            }
            if r <= cumulative + bonus {
                return kind;
            }
        }
        self.entries
            .first()
            .map(|&(kind, _)| kind)
            .unwrap_or(ItemKind::Apple)
    }
}

/// True if a candidate landing in `landing` seconds would come down within
/// `MIN_LANDING_GAP` of any item still above the floor
pub fn landing_conflict(items: &[FallingItem], floor: f32, landing: f32) -> bool {
    items.iter().any(|item| {
        item.landing_time(floor)
            .is_some_and(|existing| (existing - landing).abs() < MIN_LANDING_GAP)
    })
}

/// Run one spawn cycle. Returns the spawned item's kind, or None if every
/// attempt conflicted.
pub fn spawn_item<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) -> Option<ItemKind> {
    let multiplier = speed_multiplier(state.level);
    let bomb_bonus = bomb_weight_bonus(state.level);
    let floor = state.playfield.floor();

    for attempt in 1..=MAX_SPAWN_ATTEMPTS {
        let lane = Lane::ALL[rng.random_range(0..Lane::ALL.len())];
        let kind = SPAWN_TABLE.pick(rng.random::<f32>(), bomb_bonus);

        let speed = kind.spec().speed * multiplier;
        let landing = floor / speed;

        if landing_conflict(&state.items, floor, landing) {
            log::trace!("Spawn attempt {attempt} rejected: {kind:?} lands in {landing:.2}s");
            continue;
        }

        let x = state.playfield.lane_x(lane);
        state
            .items
            .push(FallingItem::new(kind, lane, x, SPAWN_Y, speed));
        log::debug!(
            "Spawned {:?} in {} lane at {:.0} u/s (level {})",
            kind,
            lane.as_str(),
            speed,
            state.level
        );
        return Some(kind);
    }

    log::debug!(
        "Spawn skipped: {} attempts conflicted with {} items in flight",
        MAX_SPAWN_ATTEMPTS,
        state.items.len()
    );
    None
}
