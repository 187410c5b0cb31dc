//! Fixed-step simulation tick
//!
//! One call to [`GameSession::update`] is one frame. The order inside a tick
//! is observable: move, spawn, advance, collide, then prune and score. A
//! collision ends the tick before pruning, so obstacles leaving the screen on
//! that same tick earn nothing.

use serde::{Deserialize, Serialize};

use super::player::Direction;
use super::state::{GameSession, SessionState};

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    pub direction: Direction,
    /// Seconds since the previous tick. Motion is per tick, so this is only recorded.
    pub elapsed: f32,
}

/// Outcome of a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameResult {
    /// The player was hit and the session has ended
    pub collided: bool,
    /// Obstacles that fell off-screen this tick
    pub score_delta: u32,
}

impl GameSession {
    /// Advance the session by one tick.
    ///
    /// Once the session has ended this does nothing and returns an empty
    /// result.
    pub fn update(&mut self, input: &TickInput) -> FrameResult {
        if self.state == SessionState::Ended {
            log::debug!("update() after game over ignored");
            return FrameResult::default();
        }

        self.time_ticks += 1;
        self.elapsed += input.elapsed;

        self.player.step(input.direction, self.config.width);

        self.obstacles.maybe_spawn(
            &mut self.rng,
            self.config.width,
            self.config.obstacle_width,
            self.config.obstacle_height,
            self.config.obstacle_gap,
        );

        self.obstacles.advance(self.config.obstacle_speed);

        if self.obstacles.collides_with(&self.player.rect()) {
            self.state = SessionState::Ended;
            log::info!(
                "Game over after {} ticks, score {}",
                self.time_ticks,
                self.score
            );
            return FrameResult {
                collided: true,
                score_delta: 0,
            };
        }

        let score_delta = self.obstacles.prune_offscreen(self.config.height);
        self.score += u64::from(score_delta);

        FrameResult {
            collided: false,
            score_delta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::obstacles::Obstacle;
    use crate::sim::rect::Rect;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const IDLE: TickInput = TickInput {
        direction: Direction::None,
        elapsed: 1.0 / 60.0,
    };

    /// Session whose gap is taller than the screen, so a pre-placed obstacle
    /// is the only one until it leaves.
    fn lone_obstacle_session(x: i32) -> GameSession {
        let config = GameConfig {
            obstacle_gap: 10_000,
            ..Default::default()
        };
        let mut session = GameSession::with_rng(config, Pcg32::seed_from_u64(7)).unwrap();
        session.obstacles.push(Obstacle {
            rect: Rect::new(x, -50, 50, 50),
        });
        session
    }

    #[test]
    fn test_first_tick_spawns_above_screen() {
        let mut session = GameSession::with_rng(GameConfig::default(), Pcg32::seed_from_u64(1)).unwrap();
        let result = session.update(&IDLE);

        assert_eq!(result, FrameResult::default());
        assert_eq!(session.obstacles.len(), 1);
        // Spawned at -height, then advanced once
        assert_eq!(session.obstacles.last().unwrap().rect.y, -45);
    }

    #[test]
    fn test_obstacle_falls_off_and_scores() {
        let mut session = lone_obstacle_session(0);

        for tick in 1..131 {
            let result = session.update(&IDLE);
            assert!(!result.collided, "unexpected collision at tick {tick}");
            assert_eq!(result.score_delta, 0);
        }
        assert_eq!(session.obstacles.last().unwrap().rect.y, 600);

        let result = session.update(&IDLE);
        assert_eq!(
            result,
            FrameResult {
                collided: false,
                score_delta: 1
            }
        );
        assert_eq!(session.score(), 1);
        assert!(session.obstacles.is_empty());
        assert_eq!(session.time_ticks(), 131);
    }

    #[test]
    fn test_collision_ends_session() {
        let mut session = lone_obstacle_session(375);

        // The obstacle's bottom edge reaches the player's top (540) at y=490;
        // overlap starts one tick later at y=495.
        for _ in 0..108 {
            assert!(!session.update(&IDLE).collided);
        }
        assert_eq!(session.obstacles.last().unwrap().rect.y, 490);
        assert!(session.is_running());

        let result = session.update(&IDLE);
        assert!(result.collided);
        assert_eq!(result.score_delta, 0);
        assert_eq!(session.state(), SessionState::Ended);
        assert_eq!(session.render_state().state, SessionState::Ended);
    }

    #[test]
    fn test_collision_takes_precedence_over_scoring() {
        let mut session = lone_obstacle_session(375);
        session.obstacles = Default::default();
        // Leaves the screen this tick
        session.obstacles.push(Obstacle {
            rect: Rect::new(0, 598, 50, 50),
        });
        // Hits the player this tick
        session.obstacles.push(Obstacle {
            rect: Rect::new(375, 490, 50, 50),
        });

        let result = session.update(&IDLE);
        assert!(result.collided);
        assert_eq!(result.score_delta, 0);
        assert_eq!(session.score(), 0);
        // Nothing was pruned
        assert_eq!(session.obstacles.len(), 2);
    }

    #[test]
    fn test_update_after_end_is_noop() {
        let mut session = lone_obstacle_session(375);
        while !session.update(&IDLE).collided {}

        let before = session.render_state();
        let ticks = session.time_ticks();
        let result = session.update(&TickInput {
            direction: Direction::Left,
            elapsed: 1.0,
        });

        assert_eq!(result, FrameResult::default());
        assert_eq!(session.render_state(), before);
        assert_eq!(session.time_ticks(), ticks);
    }

    #[test]
    fn test_player_can_dodge() {
        let mut session = lone_obstacle_session(375);
        let left = TickInput {
            direction: Direction::Left,
            elapsed: 1.0 / 60.0,
        };

        // Ten steps left clears the obstacle's column
        for _ in 0..10 {
            session.update(&left);
        }
        assert_eq!(session.player.rect.x, 325);
        for _ in 0..121 {
            assert!(!session.update(&IDLE).collided);
        }
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn test_render_state_is_idempotent() {
        let mut session = GameSession::with_rng(GameConfig::default(), Pcg32::seed_from_u64(9)).unwrap();
        for _ in 0..50 {
            session.update(&IDLE);
        }
        assert_eq!(session.render_state(), session.render_state());
    }

    #[test]
    fn test_elapsed_is_recorded_not_used() {
        let mut a = GameSession::with_rng(GameConfig::default(), Pcg32::seed_from_u64(3)).unwrap();
        let mut b = a.clone();
        a.update(&TickInput {
            direction: Direction::Right,
            elapsed: 0.5,
        });
        b.update(&TickInput {
            direction: Direction::Right,
            elapsed: 0.001,
        });
        assert_eq!(a.render_state(), b.render_state());
        assert!((a.elapsed() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_determinism() {
        let config = GameConfig {
            seed: Some(99_999),
            ..Default::default()
        };
        let mut a = GameSession::new(config.clone()).unwrap();
        let mut b = GameSession::new(config).unwrap();

        let inputs = [Direction::Left, Direction::Right, Direction::None];
        for i in 0..400 {
            let input = TickInput {
                direction: inputs[i % inputs.len()],
                elapsed: 1.0 / 60.0,
            };
            assert_eq!(a.update(&input), b.update(&input));
            assert_eq!(a.render_state(), b.render_state());
        }
    }

    fn direction() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Left),
            Just(Direction::Right),
            Just(Direction::None)
        ]
    }

    proptest! {
        #[test]
        fn prop_player_stays_on_screen(
            seed in any::<u64>(),
            moves in proptest::collection::vec(direction(), 1..300),
        ) {
            let mut session = GameSession::with_rng(GameConfig::default(), Pcg32::seed_from_u64(seed)).unwrap();
            let max_x = session.config.width - session.config.player_width;
            for direction in moves {
                session.update(&TickInput { direction, elapsed: 0.0 });
                let x = session.player.rect.x;
                prop_assert!((0..=max_x).contains(&x));
            }
        }

        #[test]
        fn prop_score_counts_obstacles_leaving_screen(
            seed in any::<u64>(),
            moves in proptest::collection::vec(direction(), 1..600),
        ) {
            let mut session = GameSession::with_rng(GameConfig::default(), Pcg32::seed_from_u64(seed)).unwrap();
            let height = session.config.height;
            let speed = session.config.obstacle_speed;

            for direction in moves {
                let score_before = session.score();
                let crossing = session
                    .obstacles
                    .rects()
                    .filter(|r| r.y <= height && r.y + speed > height)
                    .count() as u32;

                let result = session.update(&TickInput { direction, elapsed: 0.0 });
                if result.collided {
                    prop_assert_eq!(session.score(), score_before);
                    break;
                }
                prop_assert_eq!(result.score_delta, crossing);
                prop_assert_eq!(session.score(), score_before + u64::from(crossing));
            }
        }

        #[test]
        fn prop_spawns_respect_gap(seed in any::<u64>(), ticks in 1usize..400) {
            let mut session = GameSession::with_rng(GameConfig::default(), Pcg32::seed_from_u64(seed)).unwrap();
            let gap = session.config.obstacle_gap;

            for _ in 0..ticks {
                let last_y = session.obstacles.last().map(|o| o.rect.y);
                let count_before = session.obstacles.len();
                let result = session.update(&TickInput::default());
                if result.collided {
                    break;
                }
                let spawned = session.obstacles.len() + result.score_delta as usize > count_before;
                prop_assert_eq!(spawned, last_y.is_none_or(|y| y > gap));

                // Consecutive spawns are always at least `gap` apart
                let ys: Vec<i32> = session.obstacles.rects().map(|r| r.y).collect();
                for pair in ys.windows(2) {
                    prop_assert!(pair[0] - pair[1] > gap);
                }
            }
        }
    }
}
