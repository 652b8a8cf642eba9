//! Player preferences
//!
//! Persisted in LocalStorage. Gameplay rules are fixed and live in `consts`.

use serde::{Deserialize, Serialize};

use crate::input::PredictionStabilizer;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Pose input ===
    /// Minimum classifier confidence for a pose to count
    pub pose_threshold: f32,
    /// Frames in the smoothing window
    pub smoothing_frames: usize,

    // === Display ===
    /// Draw the webcam feed under the playfield
    pub show_webcam: bool,
    /// Webcam opacity (0.0 - 1.0)
    pub webcam_alpha: f32,
    /// Show raw classifier scores next to the canvas
    pub show_labels: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            pose_threshold: 0.85,
            smoothing_frames: 5,

            show_webcam: true,
            webcam_alpha: 0.5,
            show_labels: true,
        }
    }
}

impl Settings {
    /// Effective volume for sound effects
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Build a stabilizer with the configured threshold and window
    pub fn stabilizer(&self) -> PredictionStabilizer {
        PredictionStabilizer::new(self.pose_threshold, self.smoothing_frames)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "sky_fruits_settings";

    /// Parse settings JSON, missing fields take defaults
    pub fn from_json(json: &str) -> Option<Self> {
        serde_json::from_str(json).ok()
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"muted": true, "smoothing_frames": 3}"#).unwrap();
        assert!(settings.muted);
        assert_eq!(settings.smoothing_frames, 3);
        assert_eq!(settings.pose_threshold, 0.85);
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_bad_json_is_rejected() {
        assert_eq!(Settings::from_json("not json"), None);
    }

    #[test]
    fn test_effective_volume() {
        let settings = Settings::default();
        assert!((settings.effective_volume() - 0.8).abs() < 1e-6);
    }
}
