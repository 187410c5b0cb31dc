//! Presentation shell
//!
//! Everything between the simulation and the platform: drawing a snapshot,
//! firing audio cues for score and collision, the game-over sequence and
//! fixed-step timing. Platform backends plug in through [`Renderer`] and
//! [`AudioCue`].

pub mod clock;
pub mod game_over;
pub mod input;
pub mod scene;

use glam::Vec2;

use crate::config::{ConfigError, GameConfig};
use crate::settings::Settings;
use crate::sim::{FrameResult, GameSession, Rect, TickInput};

pub use clock::FixedStep;
pub use game_over::GameOverSequence;
pub use input::KeyState;
pub use scene::{Color, colors, draw_scene};

/// Where a text position sits relative to the rendered string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    TopLeft,
    Center,
}

/// Drawing backend
pub trait Renderer {
    fn draw_rect(&mut self, rect: Rect, color: Color);
    fn draw_text(&mut self, text: &str, pos: Vec2, anchor: TextAnchor, color: Color, font_size: f32);
}

/// One-shot sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// An obstacle made it off-screen
    Boing,
    /// The player was hit
    Arrgh,
}

impl Cue {
    pub fn name(&self) -> &'static str {
        match self {
            Cue::Boing => "boing",
            Cue::Arrgh => "arrgh",
        }
    }
}

/// Looping music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Track {
    Background,
}

/// Audio backend
pub trait AudioCue {
    fn play(&mut self, cue: Cue);
    fn loop_music(&mut self, track: Track);
    fn stop_music(&mut self);
}

/// What the shell is showing after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellStatus {
    Playing,
    GameOver,
    /// The game-over sequence has run its course
    Finished,
}

/// Drives one session and presents it through a renderer and audio backend
pub struct Shell<R: Renderer, A: AudioCue> {
    pub session: GameSession,
    pub renderer: R,
    pub audio: A,
    pub settings: Settings,
    game_over: Option<GameOverSequence>,
}

impl<R: Renderer, A: AudioCue> Shell<R, A> {
    /// Wrap `session` and start the background music
    pub fn new(session: GameSession, renderer: R, mut audio: A, settings: Settings) -> Self {
        audio.loop_music(Track::Background);
        Self {
            session,
            renderer,
            audio,
            settings,
            game_over: None,
        }
    }

    /// Run one simulation tick and fire the matching audio cues
    pub fn step(&mut self, input: &TickInput) -> FrameResult {
        if self.game_over.is_some() {
            return FrameResult::default();
        }

        let result = self.session.update(input);
        for _ in 0..result.score_delta {
            self.audio.play(Cue::Boing);
        }
        if result.collided {
            self.audio.play(Cue::Arrgh);
            self.audio.stop_music();
            self.game_over = Some(GameOverSequence::new(&self.settings));
        }
        result
    }

    /// Draw the current frame. `dt` drives the game-over animation.
    pub fn draw(&mut self, dt: f32) -> ShellStatus {
        let (width, height) = (self.session.config.width, self.session.config.height);
        match &mut self.game_over {
            Some(sequence) => {
                sequence.advance(dt);
                sequence.draw(&mut self.renderer, width, height);
                if sequence.is_finished() {
                    ShellStatus::Finished
                } else {
                    ShellStatus::GameOver
                }
            }
            None => {
                draw_scene(&mut self.renderer, &self.session.render_state(), width, height);
                ShellStatus::Playing
            }
        }
    }

    /// Current status without drawing
    pub fn status(&self) -> ShellStatus {
        match &self.game_over {
            Some(sequence) if sequence.is_finished() => ShellStatus::Finished,
            Some(_) => ShellStatus::GameOver,
            None => ShellStatus::Playing,
        }
    }

    /// Throw the current session away and start a fresh one
    pub fn restart(&mut self, config: GameConfig) -> Result<(), ConfigError> {
        self.session = GameSession::new(config)?;
        self.game_over = None;
        self.audio.stop_music();
        self.audio.loop_music(Track::Background);
        Ok(())
    }
}
