//! Rendering
//!
//! `frame` turns game state into a flat list of sprites; `canvas` paints them
//! with the browser's 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod frame;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use frame::{BasketSprite, ItemSprite, RenderFrame};
