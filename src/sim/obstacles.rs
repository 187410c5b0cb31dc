//! Falling obstacles: spawn policy, motion, pruning and collision
//!
//! Spawning is paced by position rather than by a timer: a new obstacle
//! appears only once the most recently spawned one has fallen past `gap`.
//! That keeps the vertical spacing constant whatever the fall speed.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// A single falling obstacle. Obstacles carry no identity beyond position.
/// Fall speed is shared by the whole field and passed to [`ObstacleField::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    pub rect: Rect,
}

/// Active obstacles in spawn order (oldest first)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    /// Obstacle rectangles in spawn order
    pub fn rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.obstacles.iter().map(|o| o.rect)
    }

    /// Most recently spawned obstacle
    pub fn last(&self) -> Option<&Obstacle> {
        self.obstacles.last()
    }

    /// Append an obstacle as the most recent spawn
    pub fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// True if the field is empty or the last spawn has fallen below `gap`
    pub fn should_spawn(&self, gap: i32) -> bool {
        self.obstacles.last().is_none_or(|last| last.rect.y > gap)
    }

    /// Spawn a `width`x`height` obstacle just above the screen if the gap allows it.
    /// Its x is uniform over `[0, screen_width - width]`.
    pub fn maybe_spawn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        screen_width: i32,
        width: i32,
        height: i32,
        gap: i32,
    ) -> Option<Obstacle> {
        if !self.should_spawn(gap) {
            return None;
        }

        let max_x = (screen_width - width).max(0);
        let obstacle = Obstacle {
            rect: Rect::new(rng.random_range(0..=max_x), -height, width, height),
        };
        self.obstacles.push(obstacle);
        log::trace!("Spawned obstacle at x={}", obstacle.rect.x);

        Some(obstacle)
    }

    /// Move every obstacle down by `speed`
    pub fn advance(&mut self, speed: i32) {
        for obstacle in &mut self.obstacles {
            obstacle.rect.y = obstacle.rect.y.saturating_add(speed);
        }
    }

    /// True if any obstacle intersects `target`
    pub fn collides_with(&self, target: &Rect) -> bool {
        self.obstacles.iter().any(|o| o.rect.intersects(target))
    }

    /// Drop obstacles whose top edge is below `screen_height`, keeping the
    /// survivors in order. Returns how many were removed.
    pub fn prune_offscreen(&mut self, screen_height: i32) -> u32 {
        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.rect.y <= screen_height);
        let removed = (before - self.obstacles.len()) as u32;
        if removed > 0 {
            log::debug!("Pruned {} obstacle(s)", removed);
        }
        removed
    }
}
