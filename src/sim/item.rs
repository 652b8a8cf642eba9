//! Falling items, their type table, and the three player lanes

use serde::{Deserialize, Serialize};

/// One of the three horizontal player positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Lane {
    Left,
    #[default]
    Center,
    Right,
}

impl Lane {
    pub const ALL: [Lane; 3] = [Lane::Left, Lane::Center, Lane::Right];

    pub fn as_str(&self) -> &'static str {
        match self {
            Lane::Left => "Left",
            Lane::Center => "Center",
            Lane::Right => "Right",
        }
    }

    /// Parse a pose label. Labels are matched exactly, as the classifier emits them.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Left" => Some(Lane::Left),
            "Center" => Some(Lane::Center),
            "Right" => Some(Lane::Right),
            _ => None,
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        match self {
            Lane::Left => 0,
            Lane::Center => 1,
            Lane::Right => 2,
        }
    }
}

/// Item types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Apple,
    Grape,
    Orange,
    Bomb,
}

/// Static tuning for one item type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemTypeSpec {
    pub kind: ItemKind,
    pub score: u32,
    /// Base fall speed (units/sec) at level 1
    pub speed: f32,
    /// Base spawn probability
    pub weight: f32,
    pub radius: f32,
    pub color: &'static str,
    pub icon: &'static str,
}

/// Type table in draw order. Base weights sum to 1.0.
pub const ITEM_TYPES: [ItemTypeSpec; 4] = [
    ItemTypeSpec {
        kind: ItemKind::Apple,
        score: 100,
        speed: 150.0,
        weight: 0.5,
        radius: 20.0,
        color: "red",
        icon: "🍎",
    },
    ItemTypeSpec {
        kind: ItemKind::Grape,
        score: 200,
        speed: 200.0,
        weight: 0.3,
        radius: 20.0,
        color: "purple",
        icon: "🍇",
    },
    // Small and fast
    ItemTypeSpec {
        kind: ItemKind::Orange,
        score: 300,
        speed: 300.0,
        weight: 0.1,
        radius: 15.0,
        color: "orange",
        icon: "🍊",
    },
    ItemTypeSpec {
        kind: ItemKind::Bomb,
        score: 0,
        speed: 180.0,
        weight: 0.1,
        radius: 25.0,
        color: "black",
        icon: "💣",
    },
];

impl ItemKind {
    pub fn spec(&self) -> &'static ItemTypeSpec {
        match self {
            ItemKind::Apple => &ITEM_TYPES[0],
            ItemKind::Grape => &ITEM_TYPES[1],
            ItemKind::Orange => &ITEM_TYPES[2],
            ItemKind::Bomb => &ITEM_TYPES[3],
        }
    }

    #[inline]
    pub fn is_bomb(&self) -> bool {
        *self == ItemKind::Bomb
    }

    pub fn icon(&self) -> &'static str {
        self.spec().icon
    }

    pub fn color(&self) -> &'static str {
        self.spec().color
    }
}

/// A fruit or bomb on its way down
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingItem {
    pub kind: ItemKind,
    pub score_value: u32,
    /// Fall speed including the level multiplier (units/sec)
    pub speed: f32,
    pub radius: f32,
    pub lane: Lane,
    /// Horizontal center, fixed at spawn
    pub x: f32,
    /// Vertical position, grows toward the floor
    pub y: f32,
}

impl FallingItem {
    pub fn new(kind: ItemKind, lane: Lane, x: f32, y: f32, speed: f32) -> Self {
        let spec = kind.spec();
        Self {
            kind,
            score_value: spec.score,
            speed,
            radius: spec.radius,
            lane,
            x,
            y,
        }
    }

    /// Seconds until this item reaches `floor`, or None if it already has
    pub fn landing_time(&self, floor: f32) -> Option<f32> {
        let remaining = floor - self.y;
        if remaining <= 0.0 {
            return None;
        }
        Some(remaining / self.speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_weights_sum_to_one() {
        let total: f32 = ITEM_TYPES.iter().map(|t| t.weight).sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_spec_lookup_matches_table() {
        for spec in &ITEM_TYPES {
            assert_eq!(spec.kind.spec(), spec);
        }
        assert_eq!(ItemKind::Orange.spec().score, 300);
        assert_eq!(ItemKind::Bomb.icon(), "💣");
    }

    #[test]
    fn test_lane_labels() {
        for lane in Lane::ALL {
            assert_eq!(Lane::from_label(lane.as_str()), Some(lane));
        }
        assert_eq!(Lane::from_label("left"), None);
        assert_eq!(Lane::from_label("Jump"), None);
        assert_eq!(Lane::from_label(""), None);
    }

    #[test]
    fn test_landing_time() {
        let item = FallingItem::new(ItemKind::Apple, Lane::Left, 80.0, 100.0, 150.0);
        assert_eq!(item.landing_time(400.0), Some(2.0));
        assert_eq!(item.landing_time(100.0), None);
        assert_eq!(item.score_value, 100);
        assert_eq!(item.radius, 20.0);
    }
}
