//! Read-only render view
//!
//! Reading state here never mutates it, so a frame can be built at any time,
//! including after the round has ended.

use glam::Vec2;
use serde::Serialize;

use crate::consts::{BASKET_OFFSET, BASKET_RADIUS};
use crate::sim::{GameState, ItemKind, Lane};

/// The player's basket
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BasketSprite {
    pub lane: Lane,
    /// Center of the half-disc
    pub pos: Vec2,
    pub radius: f32,
}

/// One falling item
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ItemSprite {
    pub kind: ItemKind,
    pub pos: Vec2,
    pub radius: f32,
    pub color: &'static str,
    pub icon: &'static str,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    pub width: f32,
    pub height: f32,
    pub basket: BasketSprite,
    /// In spawn order (later items draw on top)
    pub items: Vec<ItemSprite>,
}

impl RenderFrame {
    pub fn from_state(state: &GameState) -> Self {
        let field = &state.playfield;
        let lane = state.player_lane;

        let basket = BasketSprite {
            lane,
            pos: Vec2::new(field.lane_x(lane), field.floor() - BASKET_OFFSET),
            radius: BASKET_RADIUS,
        };

        let items = state
            .items
            .iter()
            .map(|item| ItemSprite {
                kind: item.kind,
                pos: Vec2::new(item.x, item.y),
                radius: item.radius,
                color: item.kind.color(),
                icon: item.kind.icon(),
            })
            .collect();

        Self {
            width: field.width,
            height: field.height,
            basket,
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{FallingItem, Playfield};

    #[test]
    fn test_basket_follows_lane() {
        let mut state = GameState::new(Playfield::new(400.0, 400.0));
        state.player_lane = Lane::Left;

        let frame = RenderFrame::from_state(&state);
        assert_eq!(frame.basket.pos, Vec2::new(80.0, 360.0));
        assert_eq!(frame.basket.radius, 30.0);
        assert!(frame.items.is_empty());
    }

    #[test]
    fn test_item_sprites_carry_icons() {
        let mut state = GameState::new(Playfield::new(400.0, 400.0));
        state
            .items
            .push(FallingItem::new(ItemKind::Grape, Lane::Right, 320.0, 42.0, 200.0));
        state
            .items
            .push(FallingItem::new(ItemKind::Bomb, Lane::Left, 80.0, -50.0, 180.0));

        let before = state.clone();
        let frame = RenderFrame::from_state(&state);

        assert_eq!(frame.items.len(), 2);
        assert_eq!(frame.items[0].pos, Vec2::new(320.0, 42.0));
        assert_eq!(frame.items[0].icon, "🍇");
        assert_eq!(frame.items[0].color, "purple");
        assert_eq!(frame.items[1].icon, "💣");
        assert_eq!(frame.items[1].radius, 25.0);
        assert_eq!(state.items, before.items);
    }
}
