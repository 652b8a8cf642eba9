//! Time-based difficulty curve
//!
//! The round gets harder in three fixed tiers. Everything here is a pure
//! function of elapsed time or level.

use crate::consts::{BOMB_WEIGHT_STEP_PER_LEVEL, SPEED_STEP_PER_LEVEL};

/// Level for a given number of elapsed seconds
pub fn level_for_elapsed(elapsed: f32) -> u8 {
    if elapsed > 40.0 {
        3
    } else if elapsed > 20.0 {
        2
    } else {
        1
    }
}

/// Milliseconds between spawn cycles
pub fn spawn_interval_ms(level: u8) -> f32 {
    match level {
        0 | 1 => 1500.0,
        2 => 1000.0,
        _ => 600.0,
    }
}

/// Fall speed multiplier (1.0, 1.3, 1.6)
pub fn speed_multiplier(level: u8) -> f32 {
    1.0 + level.saturating_sub(1) as f32 * SPEED_STEP_PER_LEVEL
}

/// Weight added to the bomb entry of the type table
pub fn bomb_weight_bonus(level: u8) -> f32 {
    level.saturating_sub(1) as f32 * BOMB_WEIGHT_STEP_PER_LEVEL
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(level_for_elapsed(0.0), 1);
        assert_eq!(level_for_elapsed(20.0), 1);
        assert_eq!(level_for_elapsed(20.001), 2);
        assert_eq!(level_for_elapsed(40.0), 2);
        assert_eq!(level_for_elapsed(40.001), 3);
        assert_eq!(level_for_elapsed(59.9), 3);
    }

    #[test]
    fn test_speed_and_bomb_scaling() {
        assert_eq!(speed_multiplier(1), 1.0);
        assert!((speed_multiplier(2) - 1.3).abs() < 1e-6);
        assert!((speed_multiplier(3) - 1.6).abs() < 1e-6);
        assert_eq!(bomb_weight_bonus(1), 0.0);
        assert!((bomb_weight_bonus(3) - 0.1).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_level_matches_curve(t in 0.0f32..60.0) {
            let level = level_for_elapsed(t);
            let expected = if t <= 20.0 { 1 } else if t <= 40.0 { 2 } else { 3 };
            prop_assert_eq!(level, expected);

            let interval = spawn_interval_ms(level);
            let expected_interval = match expected { 1 => 1500.0, 2 => 1000.0, _ => 600.0 };
            prop_assert_eq!(interval, expected_interval);
        }

        #[test]
        fn prop_level_never_decreases(a in 0.0f32..60.0, b in 0.0f32..60.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(level_for_elapsed(lo) <= level_for_elapsed(hi));
        }
    }
}
