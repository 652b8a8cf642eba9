//! Per-frame simulation step
//!
//! The host calls `tick` once per animation frame with a monotonic timestamp
//! in milliseconds. Elapsed time drives the clock, difficulty, spawning and
//! item movement; catches and misses are resolved in spawn order.

use std::ops::ControlFlow;

use rand::Rng;

use super::difficulty::{level_for_elapsed, spawn_interval_ms};
use super::events::{Cue, EndReason, GameEvent, StatusUpdate};
use super::item::FallingItem;
use super::spawn::spawn_item;
use super::state::{GamePhase, GameState};
use crate::consts::MAX_MISSES;

/// Advance the round to `now_ms`, appending what happened to `events`.
///
/// Does nothing unless the round is active. A frame that ends the round stops
/// right there: later items are left untouched and no status is emitted.
pub fn tick<R: Rng + ?Sized>(
    state: &mut GameState,
    rng: &mut R,
    now_ms: f64,
    events: &mut Vec<GameEvent>,
) {
    if !state.is_active() {
        return;
    }

    // First frame after start measures from itself
    let last = state.last_frame_time.unwrap_or(now_ms);
    let dt = ((now_ms - last) / 1000.0).max(0.0) as f32;
    state.last_frame_time = Some(now_ms.max(last));

    // Clock
    state.time_left -= dt;
    if state.time_left <= 0.0 {
        state.time_left = 0.0;
        game_over(state, EndReason::TimeOver, events);
        return;
    }

    // Difficulty
    state.level = level_for_elapsed(state.elapsed());
    state.spawn_interval_ms = spawn_interval_ms(state.level);

    // Spawning
    state.spawn_timer_ms += dt * 1000.0;
    if state.spawn_timer_ms > state.spawn_interval_ms {
        spawn_item(state, rng);
        state.spawn_timer_ms = 0.0;
    }

    if advance_items(state, dt, events).is_break() {
        return;
    }

    events.push(GameEvent::Status(status(state)));
}

/// Current scoreboard values
pub fn status(state: &GameState) -> StatusUpdate {
    StatusUpdate::new(state.score, state.time_left_ceil(), state.missed_count)
}

/// Move every item, then resolve floor hits and catches in spawn order
fn advance_items(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) -> ControlFlow<()> {
    let floor = state.playfield.floor();
    let mut i = 0;

    while i < state.items.len() {
        let item = &mut state.items[i];
        item.y += item.speed * dt;
        let (y, lane) = (item.y, item.lane);

        if y >= floor {
            let item = state.items.remove(i);
            // Bombs that reach the floor are harmless
            if !item.kind.is_bomb() {
                handle_miss(state, &item, events)?;
            }
        } else if state.playfield.in_catch_zone(y) && lane == state.player_lane {
            let item = state.items.remove(i);
            handle_catch(state, &item, events)?;
        } else {
            i += 1;
        }
    }

    ControlFlow::Continue(())
}

fn handle_catch(
    state: &mut GameState,
    item: &FallingItem,
    events: &mut Vec<GameEvent>,
) -> ControlFlow<()> {
    if item.kind.is_bomb() {
        state.lives = 0;
        events.push(GameEvent::Status(status(state)));
        events.push(GameEvent::Cue(Cue::Bomb));
        game_over(state, EndReason::BombTouched, events);
        return ControlFlow::Break(());
    }

    state.score += item.score_value;
    log::debug!("Caught {:?} for {} (score {})", item.kind, item.score_value, state.score);
    events.push(GameEvent::Caught {
        kind: item.kind,
        points: item.score_value,
    });
    events.push(GameEvent::Cue(Cue::Caught));
    ControlFlow::Continue(())
}

fn handle_miss(
    state: &mut GameState,
    item: &FallingItem,
    events: &mut Vec<GameEvent>,
) -> ControlFlow<()> {
    state.missed_count += 1;
    log::debug!("Missed {:?} ({}/{})", item.kind, state.missed_count, MAX_MISSES);
    events.push(GameEvent::Missed { kind: item.kind });
    events.push(GameEvent::Cue(Cue::Missed));

    if state.missed_count >= MAX_MISSES {
        events.push(GameEvent::Cue(Cue::GameOver));
        game_over(state, EndReason::MissedFruits, events);
        return ControlFlow::Break(());
    }
    ControlFlow::Continue(())
}

/// Terminal transition. Only an active round can end.
fn game_over(state: &mut GameState, reason: EndReason, events: &mut Vec<GameEvent>) {
    if !state.is_active() {
        return;
    }
    state.phase = GamePhase::Terminated;
    log::info!("Game over: {} (score {})", reason, state.score);
    events.push(GameEvent::GameOver {
        final_score: state.score,
        reason,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::item::{ItemKind, Lane};
    use crate::sim::state::Playfield;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn active_state() -> GameState {
        let mut state = GameState::new(Playfield::new(400.0, 400.0));
        state.reset();
        state
    }

    fn item_at(kind: ItemKind, lane: Lane, y: f32) -> FallingItem {
        let x = Playfield::new(400.0, 400.0).lane_x(lane);
        FallingItem::new(kind, lane, x, y, kind.spec().speed)
    }

    fn game_overs(events: &[GameEvent]) -> Vec<EndReason> {
        events
            .iter()
            .filter_map(|e| match e {
                GameEvent::GameOver { reason, .. } => Some(*reason),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_inactive_tick_is_noop() {
        let mut state = GameState::new(Playfield::default());
        let mut rng = Pcg32::seed_from_u64(1);
        let mut events = Vec::new();

        tick(&mut state, &mut rng, 1000.0, &mut events);

        assert!(events.is_empty());
        assert_eq!(state.time_left, 60.0);
        assert!(state.last_frame_time.is_none());
    }

    #[test]
    fn test_first_frame_has_zero_delta() {
        let mut state = active_state();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut events = Vec::new();

        tick(&mut state, &mut rng, 123_456.0, &mut events);

        assert_eq!(state.time_left, 60.0);
        assert_eq!(state.last_frame_time, Some(123_456.0));
        assert_eq!(
            events,
            vec![GameEvent::Status(StatusUpdate::new(0, 60, 0))]
        );
    }

    #[test]
    fn test_clock_runs_out() {
        let mut state = active_state();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut events = Vec::new();

        tick(&mut state, &mut rng, 0.0, &mut events);
        events.clear();
        tick(&mut state, &mut rng, 60_000.0, &mut events);

        assert_eq!(state.phase, GamePhase::Terminated);
        assert_eq!(game_overs(&events), vec![EndReason::TimeOver]);
        // No status after termination
        assert!(!events.iter().any(|e| matches!(e, GameEvent::Status(_))));
    }

    #[test]
    fn test_backwards_timestamp_is_clamped() {
        let mut state = active_state();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut events = Vec::new();

        tick(&mut state, &mut rng, 5000.0, &mut events);
        tick(&mut state, &mut rng, 4000.0, &mut events);

        assert_eq!(state.time_left, 60.0);
        assert_eq!(state.last_frame_time, Some(5000.0));
    }

    #[test]
    fn test_level_follows_elapsed_time() {
        let mut state = active_state();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut events = Vec::new();

        tick(&mut state, &mut rng, 0.0, &mut events);
        state.time_left = 35.0; // 25s elapsed
        tick(&mut state, &mut rng, 0.0, &mut events);
        assert_eq!(state.level, 2);
        assert_eq!(state.spawn_interval_ms, 1000.0);

        state.time_left = 15.0;
        tick(&mut state, &mut rng, 0.0, &mut events);
        assert_eq!(state.level, 3);
        assert_eq!(state.spawn_interval_ms, 600.0);
    }

    #[test]
    fn test_spawn_timer_fires_after_interval() {
        let mut state = active_state();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut events = Vec::new();

        tick(&mut state, &mut rng, 0.0, &mut events);
        tick(&mut state, &mut rng, 1500.0, &mut events);
        // Exactly the interval is not enough
        assert!(state.items.is_empty());
        assert_eq!(state.spawn_timer_ms, 1500.0);

        tick(&mut state, &mut rng, 1510.0, &mut events);
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.spawn_timer_ms, 0.0);
    }

    #[test]
    fn test_catch_requires_matching_lane() {
        let mut state = active_state();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut events = Vec::new();
        state.player_lane = Lane::Left;
        state.items.push(item_at(ItemKind::Grape, Lane::Center, 370.0));

        tick(&mut state, &mut rng, 0.0, &mut events);
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.score, 0);

        state.player_lane = Lane::Center;
        tick(&mut state, &mut rng, 0.0, &mut events);
        assert!(state.items.is_empty());
        assert_eq!(state.score, 200);
        assert!(events.contains(&GameEvent::Cue(Cue::Caught)));
    }

    #[test]
    fn test_bomb_on_floor_is_inert() {
        let mut state = active_state();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut events = Vec::new();
        state.player_lane = Lane::Left;
        state.items.push(item_at(ItemKind::Bomb, Lane::Right, 399.0));

        tick(&mut state, &mut rng, 0.0, &mut events);
        tick(&mut state, &mut rng, 100.0, &mut events);

        assert!(state.items.is_empty());
        assert_eq!(state.missed_count, 0);
        assert!(state.is_active());
        assert!(!events.contains(&GameEvent::Cue(Cue::Missed)));
    }

    #[test]
    fn test_bomb_catch_ends_round() {
        let mut state = active_state();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut events = Vec::new();
        state.score = 700;
        state.player_lane = Lane::Right;
        state.items.push(item_at(ItemKind::Bomb, Lane::Right, 360.0));

        tick(&mut state, &mut rng, 0.0, &mut events);

        assert_eq!(state.lives, 0);
        assert_eq!(state.score, 700);
        assert_eq!(
            events,
            vec![
                GameEvent::Status(StatusUpdate::new(700, 60, 0)),
                GameEvent::Cue(Cue::Bomb),
                GameEvent::GameOver {
                    final_score: 700,
                    reason: EndReason::BombTouched
                },
            ]
        );
    }

    #[test]
    fn test_termination_stops_the_frame() {
        let mut state = active_state();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut events = Vec::new();
        state.player_lane = Lane::Left;
        state.missed_count = 1;
        state.items.push(item_at(ItemKind::Apple, Lane::Center, 399.0));
        state.items.push(item_at(ItemKind::Orange, Lane::Right, 399.0));

        tick(&mut state, &mut rng, 0.0, &mut events);
        tick(&mut state, &mut rng, 100.0, &mut events);

        assert_eq!(state.missed_count, 2);
        assert_eq!(game_overs(&events), vec![EndReason::MissedFruits]);
        // The orange was never resolved
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].kind, ItemKind::Orange);
    }

    #[test]
    fn test_resident_items_stay_above_floor() {
        let mut state = active_state();
        let mut rng = Pcg32::seed_from_u64(99);
        let mut events = Vec::new();
        let mut now = 0.0;

        while state.is_active() && now < 60_000.0 {
            tick(&mut state, &mut rng, now, &mut events);
            for item in &state.items {
                assert!(item.y < state.playfield.floor());
            }
            now += 16.0;
        }
    }
}
