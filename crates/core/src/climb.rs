//! Rivet Climb: a girder climber dodging rolling and falling obstacles on its way to the goal.
//! This module owns the climb scene state and its public surface. Tick logic lives in
//! `advance`, obstacle spawning in `spawner`, snapshot hashing in `hash`.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use slotmap::SlotMap;

use crate::climber::{ClimbAction, Climber, StepTimings};
use crate::clock::{Cadence, Countdown};
use crate::config::ClimbTuning;
use crate::difficulty::DifficultyContext;
use crate::events::{EventSink, LogEvent};
use crate::grid::catalog::CLIMB_LEVELS;
use crate::grid::{GridMap, Legend};
use crate::obstacle::ObstacleRecord;
use crate::rng::roll_below;
use crate::score::ScoreContext;
use crate::sim::Simulation;
use crate::types::*;

mod advance;
mod hash;
mod spawner;


pub struct ClimbGame {
    seed: u64,
    tick: u64,
    rng: ChaCha8Rng,
    tuning: ClimbTuning,
    difficulty: DifficultyContext,
    layout_index: usize,
    variant_index: usize,
    map: GridMap,
    climber: Climber,
    rivets: SlotMap<PickupId, GridCell>,
    obstacles: SlotMap<ObstacleId, ObstacleRecord>,
    spawn_cooldown: Countdown,
    obstacle_clock: Cadence,
    level_elapsed: f32,
    score: ScoreContext,
    lives: u8,
    level_transition: Countdown,
    finished: Option<RunOutcome>,
    log: Vec<LogEvent>,
    pause_requested: bool,
}

impl ClimbGame {
    pub fn new(seed: u64, best_score: u64, tuning: ClimbTuning) -> Self {
        let difficulty = DifficultyContext::new(1);
        let map = GridMap::from_rows(&CLIMB_LEVELS[0].rows, Legend::Climb);
        let timings = StepTimings {
            walk_seconds: tuning.walk_step_seconds,
            climb_seconds: tuning.climb_step_seconds,
            fall_seconds: tuning.fall_step_seconds,
        };
        let climber = Climber::new(map.start(), timings);
        let obstacle_clock = Cadence::new(tuning.obstacle_step_seconds);
        let lives = tuning.starting_lives;
        let mut game = Self {
            seed,
            tick: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            tuning,
            difficulty,
            layout_index: 0,
            variant_index: 0,
            map,
            climber,
            rivets: SlotMap::with_key(),
            obstacles: SlotMap::with_key(),
            spawn_cooldown: Countdown::idle(),
            obstacle_clock,
            level_elapsed: 0.0,
            score: ScoreContext::new(best_score),
            lives,
            level_transition: Countdown::idle(),
            finished: None,
            log: Vec::new(),
            pause_requested: false,
        };
        game.load_level();
        game
    }

    /// Loads the catalog layout for the current level with a random rivet variant.
    fn load_level(&mut self) {
        let level = self.difficulty.level();
        self.layout_index = (level as usize - 1) % CLIMB_LEVELS.len();
        let layout = CLIMB_LEVELS[self.layout_index];
        self.variant_index =
            roll_below(&mut self.rng, layout.rivet_variants.len() as u32) as usize;
        self.map = GridMap::from_rows(&layout.rows, Legend::Climb);

        self.rivets.clear();
        for cell in layout.rivet_variants[self.variant_index] {
            self.rivets.insert(cell);
        }
        self.obstacles.clear();
        self.obstacle_clock.reset();
        self.spawn_cooldown.start(self.difficulty.spawn_interval(&self.tuning));
        self.level_elapsed = 0.0;
        self.climber.respawn(self.map.start());
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }

    pub fn climber(&self) -> &Climber {
        &self.climber
    }

    pub fn obstacles(&self) -> impl Iterator<Item = &ObstacleRecord> {
        self.obstacles.values()
    }

    pub fn rivets(&self) -> impl Iterator<Item = GridCell> + '_ {
        self.rivets.values().copied()
    }

    pub fn streak(&self) -> u32 {
        self.score.streak()
    }

    pub fn best_score(&self) -> u64 {
        self.score.best()
    }

    pub fn layout_index(&self) -> usize {
        self.layout_index
    }

    /// Whole seconds left on the level clock, as counted for the time bonus.
    pub fn seconds_left(&self) -> u64 {
        (self.tuning.time_limit_seconds - self.level_elapsed).max(0.0).floor() as u64
    }

    pub fn is_transitioning(&self) -> bool {
        self.level_transition.is_running()
    }

    pub fn outcome(&self) -> Option<RunOutcome> {
        self.finished
    }
}

impl Simulation for ClimbGame {
    fn game_id(&self) -> GameId {
        GameId::RivetClimb
    }

    fn apply_intent(&mut self, intent: Intent) -> Result<(), GameError> {
        if self.finished.is_some() {
            return Err(GameError::RunFinished);
        }
        match ClimbAction::from_intent(intent) {
            Some(action) => {
                self.climber.apply_action(action);
            }
            None => self.pause_requested = true,
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
