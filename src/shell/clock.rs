//! Fixed-step accumulator
//!
//! Converts variable frame times into a whole number of simulation ticks.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame time accepted before clamping (tab switches, debugger pauses)
const MAX_FRAME_DT: f32 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct FixedStep {
    step: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedStep {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
        }
    }

    /// Seconds per tick
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Add a frame's elapsed time and return how many ticks to run now.
    /// Time beyond the substep cap stays in the accumulator.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_substeps {
            self.accumulator -= self.step;
            ticks += 1;
        }
        ticks
    }

    /// Drop any banked time, e.g. after a restart
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_partial_frames() {
        let mut clock = FixedStep::new(0.01, 8);
        assert_eq!(clock.advance(0.006), 0);
        assert_eq!(clock.advance(0.006), 1);
        assert_eq!(clock.advance(0.025), 2);
    }

    #[test]
    fn test_substep_cap() {
        let mut clock = FixedStep::new(0.01, 4);
        assert_eq!(clock.advance(0.1), 4);
        // Banked time drains on later frames
        assert_eq!(clock.advance(0.0), 4);
        assert!(clock.advance(0.0) <= 2);
    }

    #[test]
    fn test_long_frames_are_clamped() {
        let mut clock = FixedStep::new(0.01, 100);
        let ticks = clock.advance(5.0);
        assert!((9..=10).contains(&ticks), "ticks {ticks}");
    }

    #[test]
    fn test_negative_dt_ignored_and_reset() {
        let mut clock = FixedStep::default();
        assert_eq!(clock.advance(-1.0), 0);
        clock.advance(clock.step() * 0.5);
        clock.reset();
        assert_eq!(clock.advance(clock.step() * 0.6), 0);
    }
}
