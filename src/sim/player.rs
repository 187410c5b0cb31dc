//! Player paddle

use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Horizontal movement requested for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    #[default]
    None,
}

impl Direction {
    /// Map held keys to a direction. Both or neither held cancel out.
    pub fn from_keys(left: bool, right: bool) -> Self {
        match (left, right) {
            (true, false) => Direction::Left,
            (false, true) => Direction::Right,
            _ => Direction::None,
        }
    }

    #[inline]
    fn sign(self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
            Direction::None => 0,
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Pixels per tick
    pub speed: i32,
}

impl Player {
    pub fn new(rect: Rect, speed: i32) -> Self {
        Self { rect, speed }
    }

    /// Move one tick in `direction`, clamped to `[0, bounds - width]`.
    /// Pushing against an edge leaves the player flush with it.
    pub fn step(&mut self, direction: Direction, bounds: i32) {
        let max_x = (bounds - self.rect.width).max(0);
        self.rect.x = (self.rect.x + direction.sign() * self.speed).clamp(0, max_x);
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }
}
