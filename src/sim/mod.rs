//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (speeds are pixels per tick)
//! - Seeded RNG only
//! - Stable iteration order (obstacles in spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod obstacles;
pub mod player;
pub mod rect;
pub mod state;
pub mod tick;

pub use obstacles::{Obstacle, ObstacleField};
pub use player::{Direction, Player};
pub use rect::Rect;
pub use state::{GameSession, RenderSnapshot, SessionState};
pub use tick::{FrameResult, TickInput};
