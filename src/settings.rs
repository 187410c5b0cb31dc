//! Presentation settings and preferences
//!
//! Persisted separately from game configuration in LocalStorage. Nothing in
//! here affects the simulation.

use serde::{Deserialize, Serialize};

use crate::shell::Cue;

/// Presentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Relative volume of the point-scored cue
    pub score_cue_volume: f32,
    /// Relative volume of the collision cue
    pub crash_cue_volume: f32,
    /// Silence everything
    pub muted: bool,

    // === Timing ===
    /// Frame-rate cap for the render loop
    pub fps_cap: u32,

    // === Game over ===
    /// How long the game-over screen is shown (seconds)
    pub game_over_secs: f32,
    /// Time between game-over text color changes (seconds)
    pub game_over_color_secs: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 0.5,
            score_cue_volume: 0.75,
            crash_cue_volume: 1.0,
            muted: false,

            fps_cap: 60,

            game_over_secs: 4.0,
            game_over_color_secs: 0.2,
        }
    }
}

impl Settings {
    /// Effective volume for a sound cue (0 when muted)
    pub fn cue_volume(&self, cue: Cue) -> f32 {
        if self.muted {
            return 0.0;
        }
        let relative = match cue {
            Cue::Boing => self.score_cue_volume,
            Cue::Arrgh => self.crash_cue_volume,
        };
        (self.master_volume * self.sfx_volume * relative).clamp(0.0, 1.0)
    }

    /// Effective background music volume (0 when muted)
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        }
    }

    /// Seconds per rendered frame at the configured cap
    pub fn frame_secs(&self) -> f32 {
        1.0 / self.fps_cap.max(1) as f32
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "dodger_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
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

    /// Native builds always start from defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cue_volumes() {
        let settings = Settings::default();
        assert!((settings.cue_volume(Cue::Boing) - 0.75).abs() < 1e-6);
        assert!((settings.cue_volume(Cue::Arrgh) - 1.0).abs() < 1e-6);
        assert!((settings.effective_music_volume() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_mute_silences_everything() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        assert_eq!(settings.cue_volume(Cue::Boing), 0.0);
        assert_eq!(settings.cue_volume(Cue::Arrgh), 0.0);
        assert_eq!(settings.effective_music_volume(), 0.0);
    }

    #[test]
    fn test_master_scales_and_clamps() {
        let settings = Settings {
            master_volume: 0.5,
            crash_cue_volume: 4.0,
            ..Default::default()
        };
        assert!((settings.cue_volume(Cue::Boing) - 0.375).abs() < 1e-6);
        assert_eq!(settings.cue_volume(Cue::Arrgh), 1.0);
    }

    #[test]
    fn test_frame_secs() {
        assert!((Settings::default().frame_secs() - 1.0 / 60.0).abs() < 1e-6);
        let zero = Settings {
            fps_cap: 0,
            ..Default::default()
        };
        assert_eq!(zero.frame_secs(), 1.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"muted": true}"#).unwrap();
        assert!(settings.muted);
        assert_eq!(settings.fps_cap, 60);
    }
}
