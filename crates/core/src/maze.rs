//! Glyph Runner: a maze chase where a runner clears glyphs while four pursuers hunt it.
//! This module owns the maze scene state and its public surface. Tick logic lives in
//! `advance`, snapshot hashing in `hash`.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use slotmap::SlotMap;

use crate::clock::Countdown;
use crate::collision::PickupKind;
use crate::config::MazeTuning;
use crate::difficulty::DifficultyContext;
use crate::enemy::{EnemyRecord, PhaseSchedule, ReleaseSchedule};
use crate::events::{EventSink, LogEvent};
use crate::grid::catalog::GLYPH_MAZE;
use crate::grid::{GridMap, Legend};
use crate::motion::{Easing, MotionState};
use crate::score::ScoreContext;
use crate::sim::Simulation;
use crate::types::*;

mod advance;
mod hash;


#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub cell: GridCell,
    pub kind: PickupKind,
}

pub struct MazeGame {
    seed: u64,
    tick: u64,
    rng: ChaCha8Rng,
    tuning: MazeTuning,
    map: GridMap,
    difficulty: DifficultyContext,
    runner: MotionState,
    /// Last direction the runner actually moved in; cleared when it stops against a wall.
    heading: Option<Direction>,
    enemies: SlotMap<EnemyId, EnemyRecord>,
    glyphs: SlotMap<PickupId, Glyph>,
    score: ScoreContext,
    lives: u8,
    extra_life_awarded: bool,
    phase: PhaseSchedule,
    release: ReleaseSchedule,
    power: Countdown,
    level_transition: Countdown,
    death_pause: Countdown,
    finished: Option<RunOutcome>,
    log: Vec<LogEvent>,
    pause_requested: bool,
}

impl MazeGame {
    pub fn new(seed: u64, best_score: u64, tuning: MazeTuning) -> Self {
        let map = GridMap::from_rows(&GLYPH_MAZE, Legend::Maze);
        let difficulty = DifficultyContext::new(1);
        let runner = MotionState::new(map.start(), tuning.runner_step_seconds, Easing::EaseOut);
        let phase = PhaseSchedule::new(tuning.scatter_seconds, tuning.chase_seconds);
        let release =
            ReleaseSchedule::new(tuning.first_release_seconds, tuning.release_interval_seconds);
        let lives = tuning.starting_lives;
        let mut game = Self {
            seed,
            tick: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            tuning,
            map,
            difficulty,
            runner,
            heading: None,
            enemies: SlotMap::with_key(),
            glyphs: SlotMap::with_key(),
            score: ScoreContext::new(best_score),
            lives,
            extra_life_awarded: false,
            phase,
            release,
            power: Countdown::idle(),
            level_transition: Countdown::idle(),
            death_pause: Countdown::idle(),
            finished: None,
            log: Vec::new(),
            pause_requested: false,
        };
        game.populate_level();
        game
    }

    /// Places glyphs and pursuers for the current map and difficulty.
    fn populate_level(&mut self) {
        self.glyphs.clear();
        for cell in self.map.pickups() {
            self.glyphs.insert(Glyph { cell: *cell, kind: PickupKind::Glyph });
        }
        for cell in self.map.power_pickups() {
            self.glyphs.insert(Glyph { cell: *cell, kind: PickupKind::PowerGlyph });
        }

        self.enemies.clear();
        let step_seconds = self.difficulty.enemy_step_seconds(&self.tuning);
        for slot in 0..self.tuning.enemy_count {
            let multiplier = self.tuning.eaten_speed_multiplier;
            self.enemies.insert_with_key(|id| {
                EnemyRecord::new(&self.map, id, slot, step_seconds, multiplier)
            });
        }
        self.reset_board();
    }

    /// Runner back to the start, pursuers back in the pen, all round timers restarted.
    fn reset_board(&mut self) {
        self.runner.place(self.map.start());
        self.heading = None;
        for enemy in self.enemies.values_mut() {
            enemy.reset_in_pen();
        }
        self.power.cancel();
        self.score.reset_combo();
        self.phase = PhaseSchedule::new(self.tuning.scatter_seconds, self.tuning.chase_seconds);
        self.release = ReleaseSchedule::new(
            self.tuning.first_release_seconds,
            self.tuning.release_interval_seconds,
        );
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }

    pub fn runner(&self) -> &MotionState {
        &self.runner
    }

    pub fn enemies(&self) -> impl Iterator<Item = &EnemyRecord> {
        self.enemies.values()
    }

    pub fn glyphs(&self) -> impl Iterator<Item = &Glyph> {
        self.glyphs.values()
    }

    pub fn glyphs_left(&self) -> usize {
        self.glyphs.len()
    }

    pub fn streak(&self) -> u32 {
        self.score.streak()
    }

    pub fn best_score(&self) -> u64 {
        self.score.best()
    }

    pub fn power_remaining(&self) -> f32 {
        self.power.remaining()
    }

    pub fn is_transitioning(&self) -> bool {
        self.level_transition.is_running() || self.death_pause.is_running()
    }

    pub fn outcome(&self) -> Option<RunOutcome> {
        self.finished
    }
}

impl Simulation for MazeGame {
    fn game_id(&self) -> GameId {
        GameId::GlyphRunner
    }

    fn apply_intent(&mut self, intent: Intent) -> Result<(), GameError> {
        if self.finished.is_some() {
            return Err(GameError::RunFinished);
        }
        match intent {
            Intent::Move(direction) => self.runner.queue(direction),
            Intent::Tap(TapZone::LeftHalf) => self.runner.queue(Direction::Left),
            Intent::Tap(TapZone::RightHalf) => self.runner.queue(Direction::Right),
            Intent::Pause => self.pause_requested = true,
        }
        Ok(())
    }

    fn advance(&mut self, max_ticks: u32, sink: &mut dyn EventSink) -> AdvanceResult {
        self.advance_ticks(max_ticks, sink)
    }

    fn request_pause(&mut self) {
        self.pause_requested = true;
    }

    fn score(&self) -> u64 {
        self.score.score()
    }

    fn lives(&self) -> u8 {
        self.lives
    }

    fn level(&self) -> u32 {
        self.difficulty.level()
    }

    fn current_tick(&self) -> u64 {
        self.tick
    }

    fn snapshot_hash(&self) -> u64 {
        self.hash_state()
    }

    fn log(&self) -> &[LogEvent] {
        &self.log
    }
}
