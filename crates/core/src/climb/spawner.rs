//! Obstacle spawning on the level's spawn cooldown.

use super::*;
use crate::obstacle::{ObstacleKind, random_heading};
use crate::rng::pick;

impl ClimbGame {
    /// Counts down to the next spawn and tries one when it fires. The cooldown restarts whether
    /// or not the attempt placed anything.
    pub(super) fn tick_spawner(&mut self, dt: f32) {
        if !self.spawn_cooldown.tick(dt) {
            return;
        }
        self.try_spawn();
        self.spawn_cooldown.start(self.difficulty.spawn_interval(&self.tuning));
    }

    fn try_spawn(&mut self) {
        if self.obstacles.len() >= self.tuning.max_obstacles {
            return;
        }
        let spawns = self.map.spawns();
        let active = self.difficulty.active_spawn_points(spawns.len());
        let Some(cell) = pick(&mut self.rng, &spawns[..active]) else {
            return;
        };
        if manhattan(cell, self.climber.cell()) <= self.tuning.spawn_safety_buffer {
            return;
        }
        let kind = ObstacleKind::roll(&mut self.rng, self.difficulty.roller_percent());
        let heading = random_heading(&mut self.rng);
        let animation_seconds = self.tuning.obstacle_animation_seconds;
        let id = self.obstacles.insert_with_key(|id| {
            ObstacleRecord::new(id, kind, cell, heading, animation_seconds)
        });
        let rolling = kind == ObstacleKind::Rolling;
        self.log.push(LogEvent::ObstacleSpawned { obstacle: id, cell, rolling });
    }

    /// Removes every obstacle within `radius` of `center`, logging each removal.
    pub(super) fn clear_obstacles_near(&mut self, center: GridCell, radius: u32) {
        let doomed: Vec<ObstacleId> = self
            .obstacles
            .iter()
            .filter(|(_, obstacle)| manhattan(obstacle.cell(), center) <= radius)
            .map(|(id, _)| id)
            .collect();
        for id in doomed {
            self.obstacles.remove(id);
            self.log.push(LogEvent::ObstacleDespawned { obstacle: id });
        }
    }
}
