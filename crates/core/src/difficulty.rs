//! Difficulty curves as pure functions of the level counter.
//! Nothing here is cached; callers recompute from `DifficultyContext` whenever they need a
//! value, so a level change can never leave a stale parameter behind.

use crate::config::{ClimbTuning, MazeTuning};

/// Levels at or below this use the gentlest band.
const EASY_BAND_MAX: u32 = 2;
/// Levels at or below this (and above the easy band) use the middle band.
const MIDDLE_BAND_MAX: u32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DifficultyContext {
    level: u32,
}

impl DifficultyContext {
    /// Levels start at 1; zero is treated as 1.
    pub fn new(level: u32) -> Self {
        Self { level: level.max(1) }
    }

    pub fn level(self) -> u32 {
        self.level
    }

    pub fn next(self) -> Self {
        Self::new(self.level.saturating_add(1))
    }

    fn band(self) -> usize {
        if self.level <= EASY_BAND_MAX {
            0
        } else if self.level <= MIDDLE_BAND_MAX {
            1
        } else {
            2
        }
    }

    fn steps_past_first(self) -> f32 {
        (self.level - 1) as f32
    }

    /// Seconds between obstacle spawns, decreasing linearly to a floor.
    pub fn spawn_interval(self, tuning: &ClimbTuning) -> f32 {
        (tuning.base_spawn_interval
            - tuning.spawn_interval_decrease_per_level * self.steps_past_first())
        .max(tuning.min_spawn_interval)
    }

    /// Chance in percent that a spawned obstacle rolls rather than falls.
    pub fn roller_percent(self) -> u32 {
        [80, 70, 60][self.band()]
    }

    /// Chance in percent that a rolling obstacle drops through a ladder opening.
    pub fn drop_through_percent(self) -> u32 {
        [0, 15, 30][self.band()]
    }

    pub fn active_spawn_points(self, available: usize) -> usize {
        let wanted = [2, 3, available][self.band()];
        wanted.min(available)
    }

    /// Seconds per pursuer step, decreasing linearly to a floor.
    pub fn enemy_step_seconds(self, tuning: &MazeTuning) -> f32 {
        (tuning.enemy_base_step_seconds
            - tuning.enemy_step_decrease_per_level * self.steps_past_first())
        .max(tuning.enemy_min_step_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn documented_values_at_band_edges() {
        let climb = ClimbTuning::default();
        let maze = MazeTuning::default();
        let first = DifficultyContext::new(1);
        assert_eq!(first.spawn_interval(&climb), 2.5);
        assert_eq!(first.roller_percent(), 80);
        assert_eq!(first.drop_through_percent(), 0);
        assert_eq!(first.active_spawn_points(4), 2);
        assert_eq!(first.enemy_step_seconds(&maze), 0.20);

        let third = DifficultyContext::new(3);
        assert_eq!(third.roller_percent(), 70);
        assert_eq!(third.drop_through_percent(), 15);
        assert_eq!(third.active_spawn_points(4), 3);

        let late = DifficultyContext::new(20);
        assert_eq!(late.spawn_interval(&climb), 1.0);
        assert_eq!(late.roller_percent(), 60);
        assert_eq!(late.drop_through_percent(), 30);
        assert_eq!(late.active_spawn_points(4), 4);
        assert_eq!(late.enemy_step_seconds(&maze), 0.10);
    }

    #[test]
    fn active_spawn_points_never_exceed_what_the_level_has() {
        assert_eq!(DifficultyContext::new(1).active_spawn_points(1), 1);
        assert_eq!(DifficultyContext::new(4).active_spawn_points(2), 2);
    }

    #[test]
    fn zero_level_is_clamped_to_one() {
        assert_eq!(DifficultyContext::new(0).level(), 1);
    }

    proptest! {
        #[test]
        fn curves_never_get_easier(l1 in 1u32..200, gap in 0u32..50) {
            let climb = ClimbTuning::default();
            let maze = MazeTuning::default();
            let low = DifficultyContext::new(l1);
            let high = DifficultyContext::new(l1 + gap);
            prop_assert!(high.spawn_interval(&climb) <= low.spawn_interval(&climb));
            prop_assert!(high.spawn_interval(&climb) >= climb.min_spawn_interval);
            prop_assert!(high.enemy_step_seconds(&maze) <= low.enemy_step_seconds(&maze));
            prop_assert!(high.enemy_step_seconds(&maze) >= maze.enemy_min_step_seconds);
            prop_assert!(high.roller_percent() <= low.roller_percent());
            prop_assert!(high.drop_through_percent() >= low.drop_through_percent());
            prop_assert!(high.active_spawn_points(6) >= low.active_spawn_points(6));
        }
    }
}
