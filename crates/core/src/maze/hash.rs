//! Stable snapshot hashing for deterministic verification of maze runs.

use std::hash::Hasher;

use super::*;
use xxhash_rust::xxh3::Xxh3;

impl MazeGame {
    pub(super) fn hash_state(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.tick);
        hasher.write_u64(self.score.score());
        hasher.write_u32(self.score.combo());
        hasher.write_u8(self.lives);
        hasher.write_u32(self.difficulty.level());
        hasher.write_u8(u8::from(self.extra_life_awarded));
        hasher.write_u32(self.power.remaining().to_bits());
        hasher.write_u32(self.phase.remaining().to_bits());
        write_cell(&mut hasher, self.runner.cell());
        hasher.write_u32(self.runner.progress().to_bits());
        for enemy in self.enemies.values() {
            write_cell(&mut hasher, enemy.cell());
            hasher.write_u8(enemy.mode().code());
            hasher.write_u32(enemy.motion.progress().to_bits());
        }
        hasher.write_usize(self.glyphs.len());
        for glyph in self.glyphs.values() {
            write_cell(&mut hasher, glyph.cell);
        }
        hasher.finish()
    }
}
