//! Session state for one play-through
//!
//! A [`GameSession`] owns the player, the obstacle field, the score and the
//! RNG. Nothing outlives it: playing again means building a new session.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::obstacles::ObstacleField;
use super::player::Player;
use super::rect::Rect;
use crate::config::{ConfigError, GameConfig};

/// Lifecycle of a session. `Ended` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Running,
    Ended,
}

/// Read-only view of everything the shell needs to draw a frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub player: Rect,
    /// Obstacle rectangles in spawn order
    pub obstacles: Vec<Rect>,
    pub score: u64,
    pub state: SessionState,
}

/// Complete state of one play-through
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Validated configuration this session was built from
    pub config: GameConfig,
    pub player: Player,
    pub obstacles: ObstacleField,
    pub(crate) score: u64,
    pub(crate) state: SessionState,
    /// Simulation tick counter
    pub(crate) time_ticks: u64,
    /// Wall-clock seconds reported by the shell; informational only
    pub(crate) elapsed: f32,
    pub(crate) rng: Pcg32,
}

impl GameSession {
    /// Build a session from `config`, seeding the RNG from `config.seed` or at random
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let seed = config.seed.unwrap_or_else(rand::random);
        let session = Self::with_rng(config, Pcg32::seed_from_u64(seed))?;
        log::info!(
            "New session: {}x{} screen, seed {}",
            session.config.width,
            session.config.height,
            seed
        );
        Ok(session)
    }

    /// Build a session that draws obstacle positions from `rng`
    pub fn with_rng(config: GameConfig, rng: Pcg32) -> Result<Self, ConfigError> {
        config.validate()?;

        let (x, y) = config.player_origin();
        let player = Player::new(
            Rect::new(x, y, config.player_width, config.player_height),
            config.player_speed,
        );

        Ok(Self {
            config,
            player,
            obstacles: ObstacleField::new(),
            score: 0,
            state: SessionState::Running,
            time_ticks: 0,
            elapsed: 0.0,
            rng,
        })
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    /// Ticks simulated so far
    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Total elapsed seconds reported through tick inputs
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Snapshot for rendering. Calling this never changes the session.
    pub fn render_state(&self) -> RenderSnapshot {
        RenderSnapshot {
            player: self.player.rect(),
            obstacles: self.obstacles.rects().collect(),
            score: self.score,
            state: self.state,
        }
    }
}
