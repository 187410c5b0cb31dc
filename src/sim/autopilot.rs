//! Demo autopilot
//!
//! Steers the player out of the column of the nearest obstacle that is still
//! above it. Used by the headless runner and the idle/demo mode of the web
//! build. Deliberately simple: it never plans around more than one obstacle.

use super::player::Direction;
use super::rect::Rect;
use super::state::GameSession;

/// How far above the player (in pixels) an obstacle starts to matter
const LOOKAHEAD: i32 = 250;

/// Pick a direction for the next tick
pub fn steer(session: &GameSession) -> Direction {
    let player = session.player.rect();
    let margin = session.player.speed;

    let threat = session
        .obstacles
        .rects()
        .filter(|o| is_threat(o, &player, margin))
        .max_by_key(|o| o.y);

    let Some(threat) = threat else {
        return Direction::None;
    };

    let max_x = session.config.width - player.width;
    let threat_center = threat.x * 2 + threat.width;
    let player_center = player.x * 2 + player.width;

    // Dodge away from the obstacle's center unless pinned against a wall
    if threat_center > player_center {
        if player.x > 0 {
            Direction::Left
        } else {
            Direction::Right
        }
    } else if player.x < max_x {
        Direction::Right
    } else {
        Direction::Left
    }
}

/// Obstacle is above the player's bottom, close enough to land, and within
/// `margin` pixels of the player's column
fn is_threat(obstacle: &Rect, player: &Rect, margin: i32) -> bool {
    obstacle.y < player.bottom()
        && obstacle.bottom() > player.y - LOOKAHEAD
        && obstacle.x < player.right() + margin
        && player.x - margin < obstacle.right()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::obstacles::Obstacle;
    use crate::sim::tick::TickInput;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn session_with(obstacles: &[Rect], player_x: i32) -> GameSession {
        let mut session = GameSession::with_rng(GameConfig::default(), Pcg32::seed_from_u64(0)).unwrap();
        session.player.rect.x = player_x;
        for &rect in obstacles {
            session.obstacles.push(Obstacle { rect });
        }
        session
    }

    #[test]
    fn test_idle_without_threats() {
        let session = session_with(&[], 375);
        assert_eq!(steer(&session), Direction::None);

        // Far above and off to the side
        let session = session_with(&[Rect::new(0, 0, 50, 50)], 375);
        assert_eq!(steer(&session), Direction::None);
    }

    #[test]
    fn test_dodges_away_from_center() {
        let session = session_with(&[Rect::new(390, 400, 50, 50)], 375);
        assert_eq!(steer(&session), Direction::Left);

        let session = session_with(&[Rect::new(360, 400, 50, 50)], 375);
        assert_eq!(steer(&session), Direction::Right);
    }

    #[test]
    fn test_pinned_against_wall() {
        let session = session_with(&[Rect::new(10, 400, 50, 50)], 0);
        assert_eq!(steer(&session), Direction::Right);

        let session = session_with(&[Rect::new(740, 400, 50, 50)], 750);
        assert_eq!(steer(&session), Direction::Left);
    }

    #[test]
    fn test_ignores_obstacles_already_past() {
        let session = session_with(&[Rect::new(375, 595, 50, 50)], 375);
        assert_eq!(steer(&session), Direction::None);
    }

    #[test]
    fn test_nearest_threat_wins() {
        let session = session_with(&[Rect::new(330, 450, 50, 50), Rect::new(400, 300, 50, 50)], 375);
        assert_eq!(steer(&session), Direction::Right);
    }

    #[test]
    fn test_autopilot_survives_to_score() {
        let config = GameConfig {
            seed: Some(2024),
            ..Default::default()
        };
        let mut piloted = GameSession::new(config).unwrap();
        for _ in 0..3000 {
            let direction = steer(&piloted);
            if piloted.update(&TickInput { direction, elapsed: 0.0 }).collided {
                break;
            }
        }
        // Survives long enough to see several obstacles off
        assert!(piloted.score() >= 2, "score {}", piloted.score());
    }
}
