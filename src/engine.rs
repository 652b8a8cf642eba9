//! Game engine facade
//!
//! Owns the round state and RNG, exposes the lifecycle entry points used by
//! the host page, and forwards simulation events to registered hooks. Hooks
//! are optional; an unset hook swallows its events.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::renderer::RenderFrame;
use crate::sim::difficulty::speed_multiplier;
use crate::sim::{
    Cue, FallingItem, GameEvent, GamePhase, GameState, ItemKind, Lane, Playfield, StatusUpdate,
    status, tick,
};

type StatusHook = Box<dyn FnMut(&StatusUpdate)>;
type GameOverHook = Box<dyn FnMut(u32, &str)>;
type CueHook = Box<dyn FnMut(Cue)>;

/// The game simulation engine
pub struct GameEngine {
    state: GameState,
    rng: Pcg32,
    /// Events from the most recent `update`
    events: Vec<GameEvent>,
    on_status: Option<StatusHook>,
    on_game_over: Option<GameOverHook>,
    on_cue: Option<CueHook>,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(0)
    }
}

impl GameEngine {
    /// Create an inactive engine on the default 400x400 playfield
    pub fn new(seed: u64) -> Self {
        Self {
            state: GameState::default(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            on_status: None,
            on_game_over: None,
            on_cue: None,
        }
    }

    /// Register the scoreboard hook
    pub fn on_status(&mut self, hook: impl FnMut(&StatusUpdate) + 'static) {
        self.on_status = Some(Box::new(hook));
    }

    /// Register the game over hook, called with the final score and reason
    pub fn on_game_over(&mut self, hook: impl FnMut(u32, &str) + 'static) {
        self.on_game_over = Some(Box::new(hook));
    }

    /// Register the sound cue tap
    pub fn on_cue(&mut self, hook: impl FnMut(Cue) + 'static) {
        self.on_cue = Some(Box::new(hook));
    }

    /// Configure the playfield. Lanes sit at 20%, 50% and 80% of the width.
    pub fn init(&mut self, width: f32, height: f32) {
        self.state.playfield = Playfield::new(width, height);
        log::info!("Playfield set to {}x{}", width, height);
    }

    /// Replace the RNG seed (takes effect on the next spawn)
    pub fn reseed(&mut self, seed: u64) {
        self.rng = Pcg32::seed_from_u64(seed);
    }

    /// Reset all counters and begin a new round
    pub fn start(&mut self) {
        self.state.reset();
        self.events.clear();
        log::info!("Round started");
        let update = status(&self.state);
        if let Some(hook) = self.on_status.as_mut() {
            hook(&update);
        }
    }

    /// Deactivate without reporting a game over
    pub fn stop(&mut self) {
        if self.state.phase == GamePhase::Active {
            self.state.phase = GamePhase::Inactive;
            log::info!("Round stopped");
        }
    }

    /// Apply a pose label. Anything other than Left/Center/Right is ignored.
    pub fn set_player_pose(&mut self, label: &str) {
        match Lane::from_label(label) {
            Some(lane) => self.state.player_lane = lane,
            None => log::trace!("Ignoring pose label {:?}", label),
        }
    }

    /// Advance the simulation to `now_ms` and dispatch the resulting events
    pub fn update(&mut self, now_ms: f64) {
        self.events.clear();
        tick(&mut self.state, &mut self.rng, now_ms, &mut self.events);

        for event in &self.events {
            match event {
                GameEvent::Status(update) => {
                    if let Some(hook) = self.on_status.as_mut() {
                        hook(update);
                    }
                }
                GameEvent::Cue(cue) => {
                    if let Some(hook) = self.on_cue.as_mut() {
                        hook(*cue);
                    }
                }
                GameEvent::GameOver {
                    final_score,
                    reason,
                } => {
                    if let Some(hook) = self.on_game_over.as_mut() {
                        hook(*final_score, reason.as_str());
                    }
                }
                GameEvent::Caught { .. } | GameEvent::Missed { .. } => {}
            }
        }
    }

    /// Drop an item into the field at height `y` (for hosts scripting a scene)
    pub fn inject_item(&mut self, kind: ItemKind, lane: Lane, y: f32) {
        let speed = kind.spec().speed * speed_multiplier(self.state.level);
        let x = self.state.playfield.lane_x(lane);
        self.state
            .items
            .push(FallingItem::new(kind, lane, x, y, speed));
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn player_lane(&self) -> Lane {
        self.state.player_lane
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Events recorded by the most recent `update`
    pub fn last_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Drawable snapshot of the current state
    pub fn render_frame(&self) -> RenderFrame {
        RenderFrame::from_state(&self.state)
    }
}
