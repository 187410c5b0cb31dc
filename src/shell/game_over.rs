//! Game-over screen: centered text cycling through colors for a few seconds

use glam::Vec2;

use super::scene::{Color, colors};
use super::{Renderer, TextAnchor};
use crate::settings::Settings;
use crate::sim::Rect;

pub const GAME_OVER_TEXT: &str = "GAME OVER!";
pub const GAME_OVER_FONT_SIZE: f32 = 100.0;

/// Minimum color step, keeps the cycle index finite
const MIN_COLOR_SECS: f32 = 0.01;

/// Timed game-over animation
#[derive(Debug, Clone, PartialEq)]
pub struct GameOverSequence {
    elapsed: f32,
    duration: f32,
    color_secs: f32,
}

impl GameOverSequence {
    pub fn new(settings: &Settings) -> Self {
        Self {
            elapsed: 0.0,
            duration: settings.game_over_secs.max(0.0),
            color_secs: settings.game_over_color_secs.max(MIN_COLOR_SECS),
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Seconds left on screen
    pub fn remaining(&self) -> f32 {
        (self.duration - self.elapsed).max(0.0)
    }

    pub fn color_index(&self) -> usize {
        (self.elapsed / self.color_secs) as usize % colors::GAME_OVER_CYCLE.len()
    }

    pub fn color(&self) -> Color {
        colors::GAME_OVER_CYCLE[self.color_index()]
    }

    /// Clear to the background and draw the centered text
    pub fn draw(&self, renderer: &mut impl Renderer, width: i32, height: i32) {
        renderer.draw_rect(Rect::new(0, 0, width, height), colors::BACKGROUND);
        renderer.draw_text(
            GAME_OVER_TEXT,
            Vec2::new(width as f32 / 2.0, height as f32 / 2.0),
            TextAnchor::Center,
            self.color(),
            GAME_OVER_FONT_SIZE,
        );
    }
}
