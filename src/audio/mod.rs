//! Audio cue backends
//!
//! The web build synthesizes its sounds with the Web Audio API; everywhere
//! else cues are only logged.

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

use crate::settings::Settings;
use crate::shell::{AudioCue, Cue, Track};

/// Drone level at full music volume
const DRONE_LEVEL: f32 = 0.3;

/// Base gain and swell depth of the background drone. Both are zero when muted.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) fn drone_gains(settings: &Settings) -> (f32, f32) {
    let level = settings.effective_music_volume() * DRONE_LEVEL;
    (level, level * 0.5)
}

/// Backend that logs cues instead of playing them (headless runs)
#[derive(Debug, Default)]
pub struct LogAudio {
    music: Option<Track>,
    played: u64,
}

impl LogAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track currently looping, if any
    pub fn music(&self) -> Option<Track> {
        self.music
    }

    /// Cues played so far
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl AudioCue for LogAudio {
    fn play(&mut self, cue: Cue) {
        self.played += 1;
        log::debug!("cue: {}", cue.name());
    }

    fn loop_music(&mut self, track: Track) {
        log::debug!("music: looping {:?}", track);
        self.music = Some(track);
    }

    fn stop_music(&mut self) {
        if let Some(track) = self.music.take() {
            log::debug!("music: stopped {:?}", track);
        }
    }
}
