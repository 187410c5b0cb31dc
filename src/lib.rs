//! Dodger - a falling-obstacle arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, obstacles, scoring)
//! - `config`: Validated game configuration
//! - `shell`: Presentation glue driven by the simulation (scene, audio cues, game over)
//! - `renderer`: WebGPU rectangle pipeline
//! - `audio`: Audio cue backends
//! - `settings`: Presentation preferences

pub mod audio;
pub mod config;
pub mod renderer;
pub mod settings;
pub mod shell;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate; all speeds are pixels per tick at this rate
    pub const TICK_RATE_HZ: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_RATE_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Screen dimensions
    pub const SCREEN_WIDTH: i32 = 800;
    pub const SCREEN_HEIGHT: i32 = 600;
    /// Upper bound for screen dimensions, speeds and the spawn gap.
    /// Keeps every per-tick coordinate sum well inside `i32`.
    pub const MAX_DIMENSION: i32 = 1 << 20;

    /// Player defaults
    pub const PLAYER_WIDTH: i32 = 50;
    pub const PLAYER_HEIGHT: i32 = 50;
    /// Space left between the player and the bottom edge
    pub const PLAYER_MARGIN: i32 = 10;
    pub const PLAYER_SPEED: i32 = 5;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: i32 = 50;
    pub const OBSTACLE_HEIGHT: i32 = 50;
    pub const OBSTACLE_SPEED: i32 = 5;
    /// The last obstacle must fall below this y before another spawns
    pub const OBSTACLE_GAP: i32 = 200;
}
