//! Stable snapshot hashing for deterministic verification of climb runs.

use std::hash::Hasher;

use super::*;
use crate::obstacle::ObstacleKind;
use xxhash_rust::xxh3::Xxh3;

impl ClimbGame {
    pub(super) fn hash_state(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.tick);
        hasher.write_u64(self.score.score());
        hasher.write_u32(self.score.streak());
        hasher.write_u8(self.lives);
        hasher.write_u32(self.difficulty.level());
        hasher.write_usize(self.layout_index);
        hasher.write_usize(self.variant_index);
        hasher.write_u32(self.level_elapsed.to_bits());
        hasher.write_u32(self.spawn_cooldown.remaining().to_bits());
        hasher.write_u32(self.obstacle_clock.accumulated().to_bits());
        write_cell(&mut hasher, self.climber.cell());
        hasher.write_u8(self.climber.state().log_state() as u8);
        hasher.write_u32(self.climber.motion.progress().to_bits());
        hasher.write_u32(self.climber.invincibility_remaining().to_bits());
        for obstacle in self.obstacles.values() {
            write_cell(&mut hasher, obstacle.cell());
            hasher.write_u8(u8::from(obstacle.kind == ObstacleKind::Rolling));
            hasher.write_u8(obstacle.heading() as u8);
            hasher.write_u32(obstacle.motion.progress().to_bits());
        }
        hasher.write_usize(self.rivets.len());
        for cell in self.rivets.values() {
            write_cell(&mut hasher, *cell);
        }
        hasher.finish()
    }
}
