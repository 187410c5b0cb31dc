//! Keyboard state to per-tick direction
//!
//! Keys are named the way browsers report `KeyboardEvent.key`.

use crate::sim::Direction;

/// Held movement keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

fn side(key: &str) -> Option<Side> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(Side::Left),
        "ArrowRight" | "d" | "D" => Some(Side::Right),
        _ => None,
    }
}

impl KeyState {
    /// Record a key press. Returns false for keys that do not steer.
    pub fn key_down(&mut self, key: &str) -> bool {
        self.set(key, true)
    }

    /// Record a key release. Returns false for keys that do not steer.
    pub fn key_up(&mut self, key: &str) -> bool {
        self.set(key, false)
    }

    fn set(&mut self, key: &str, pressed: bool) -> bool {
        match side(key) {
            Some(Side::Left) => self.left = pressed,
            Some(Side::Right) => self.right = pressed,
            None => return false,
        }
        true
    }

    /// Release everything (window lost focus)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn direction(&self) -> Direction {
        Direction::from_keys(self.left, self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys() {
        let mut keys = KeyState::default();
        assert!(keys.key_down("ArrowLeft"));
        assert_eq!(keys.direction(), Direction::Left);

        assert!(keys.key_down("ArrowRight"));
        assert_eq!(keys.direction(), Direction::None);

        assert!(keys.key_up("ArrowLeft"));
        assert_eq!(keys.direction(), Direction::Right);
    }

    #[test]
    fn test_letter_keys_and_unknown() {
        let mut keys = KeyState::default();
        assert!(keys.key_down("a"));
        assert_eq!(keys.direction(), Direction::Left);
        assert!(!keys.key_down("Enter"));
        assert!(keys.key_up("A"));
        assert_eq!(keys.direction(), Direction::None);
    }

    #[test]
    fn test_clear() {
        let mut keys = KeyState {
            left: true,
            right: false,
        };
        keys.clear();
        assert_eq!(keys, KeyState::default());
    }
}
