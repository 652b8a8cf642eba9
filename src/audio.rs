//! Audio system using Web Audio API
//!
//! Procedurally generated cue sounds - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::Cue;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx, volume: 0.8 }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Set effective volume (0.0 - 1.0), see `Settings::effective_volume`
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
    }

    /// Play the sound for a cue
    pub fn play(&self, cue: Cue) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match cue {
            Cue::Caught => self.play_catch(ctx, vol),
            Cue::Missed => self.play_miss(ctx, vol),
            Cue::Bomb => self.play_bomb(ctx, vol),
            Cue::GameOver => self.play_game_over(ctx, vol),
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Catch - bright ding, A5 sliding down an octave
    fn play_catch(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 880.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(880.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(440.0, t + 0.1)
            .ok();
        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.1)
            .ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + 0.1).ok();
    }

    /// Miss - low buzz
    fn play_miss(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 150.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(150.0, t).ok();
        osc.frequency()
            .linear_ramp_to_value_at_time(100.0, t + 0.3)
            .ok();
        gain.gain().set_value_at_time(vol * 0.2, t).ok();
        gain.gain()
            .linear_ramp_to_value_at_time(0.01, t + 0.3)
            .ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + 0.3).ok();
    }

    /// Bomb - square wave dropping to a rumble
    fn play_bomb(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 100.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(100.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(10.0, t + 0.5)
            .ok();
        gain.gain().set_value_at_time(vol * 0.5, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.5)
            .ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + 0.5).ok();
    }

    /// Game over - three falling notes
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        for (freq, delay, duration) in [(660.0, 0.0, 0.2), (550.0, 0.2, 0.2), (440.0, 0.4, 0.4)] {
            if let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .linear_ramp_to_value_at_time(0.01, t + duration)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + duration).ok();
            }
        }
    }
}
