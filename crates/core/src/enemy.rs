//! Pursuer records, their mode state machine, and the maze-wide schedules that drive it.
//! This module exists so every mode change goes through one guarded transition table.
//! It does not own collision or scoring; the maze game reads modes and calls transitions.

use std::mem;

use rand_chacha::rand_core::Rng;

use crate::ai::{
    self, PatrolRoute, Personality, TargetContext, TargetMode, choose_direction, choose_target,
};
use crate::clock::Countdown;
use crate::grid::{GridMap, MoveRule};
use crate::motion::{Easing, MotionState, StepStatus};
use crate::types::{Direction, EnemyId, GridCell};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyMode {
    Home,
    Exiting,
    Scatter,
    Chase,
    Frightened,
    Eaten,
}

impl EnemyMode {
    pub fn can_transition_to(self, next: EnemyMode) -> bool {
        use EnemyMode::*;
        matches!(
            (self, next),
            (Home, Exiting)
                | (Exiting, Scatter)
                | (Exiting, Chase)
                | (Scatter, Chase)
                | (Chase, Scatter)
                | (Scatter, Frightened)
                | (Chase, Frightened)
                | (Frightened, Scatter)
                | (Frightened, Eaten)
                | (Eaten, Home)
        )
    }

    /// Touching the protagonist in this mode gets the pursuer eaten.
    pub fn is_vulnerable(self) -> bool {
        self == Self::Frightened
    }

    /// Touching the protagonist in this mode costs a life.
    pub fn is_harmful(self) -> bool {
        !matches!(self, Self::Frightened | Self::Eaten)
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Scatter,
    Chase,
}

impl Phase {
    pub fn mode(self) -> EnemyMode {
        match self {
            Self::Scatter => EnemyMode::Scatter,
            Self::Chase => EnemyMode::Chase,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyTick {
    Idle,
    Moving,
    /// A step finished and the next one (if any) was chosen.
    Stepped,
    LeftHome,
    ReachedHome,
}

#[derive(Clone, Debug)]
pub struct EnemyRecord {
    pub id: EnemyId,
    pub slot: usize,
    pub personality: Personality,
    mode: EnemyMode,
    pub motion: MotionState,
    home_cell: GridCell,
    patrol: PatrolRoute,
    target: GridCell,
    reverse_pending: bool,
    flashing: bool,
    step_seconds: f32,
    eaten_multiplier: f32,
}

impl EnemyRecord {
    pub fn new(
        map: &GridMap,
        id: EnemyId,
        slot: usize,
        step_seconds: f32,
        eaten_multiplier: f32,
    ) -> Self {
        let homes = map.homes();
        let home_cell = homes.get(slot % homes.len().max(1)).copied().unwrap_or(map.door());
        let patrol = PatrolRoute::new(map, ai::scatter_corner(map, slot));
        Self {
            id,
            slot,
            personality: Personality::for_index(slot),
            mode: EnemyMode::Home,
            motion: MotionState::new(home_cell, step_seconds, Easing::EaseInOut),
            home_cell,
            patrol,
            target: home_cell,
            reverse_pending: false,
            flashing: false,
            step_seconds,
            eaten_multiplier,
        }
    }

    pub fn mode(&self) -> EnemyMode {
        self.mode
    }

    pub fn cell(&self) -> GridCell {
        self.motion.cell()
    }

    pub fn home_cell(&self) -> GridCell {
        self.home_cell
    }

    /// Target cached at the last completed step.
    pub fn target(&self) -> GridCell {
        self.target
    }

    pub fn patrol(&self) -> &PatrolRoute {
        &self.patrol
    }

    pub fn is_flashing(&self) -> bool {
        self.flashing
    }

    pub fn reverse_pending(&self) -> bool {
        self.reverse_pending
    }

    fn transition(&mut self, next: EnemyMode) -> bool {
        if !self.mode.can_transition_to(next) {
            return false;
        }
        self.mode = next;
        true
    }

    pub fn release(&mut self) -> bool {
        if !self.transition(EnemyMode::Exiting) {
            return false;
        }
        self.motion.face(Direction::Up);
        true
    }

    pub fn leave_home(&mut self, phase: Phase) -> bool {
        self.transition(phase.mode())
    }

    /// Handles a scatter/chase toggle. Every roaming pursuer turns around on a toggle, even
    /// one already in the new mode; the turnaround waits for the current step to land.
    pub fn apply_phase(&mut self, phase: Phase) -> bool {
        if !matches!(self.mode, EnemyMode::Scatter | EnemyMode::Chase) {
            return false;
        }
        self.mode = phase.mode();
        self.reverse_pending = true;
        true
    }

    pub fn frighten(&mut self) -> bool {
        if !self.transition(EnemyMode::Frightened) {
            return false;
        }
        self.reverse_pending = true;
        true
    }

    /// Power ran out: back to scatter, then straight on into the scene's current phase.
    /// No turnaround.
    pub fn end_frighten(&mut self, phase: Phase) -> bool {
        if !self.transition(EnemyMode::Scatter) {
            return false;
        }
        if phase == Phase::Chase {
            self.transition(EnemyMode::Chase);
        }
        self.flashing = false;
        true
    }

    pub fn capture(&mut self) -> bool {
        if !self.transition(EnemyMode::Eaten) {
            return false;
        }
        self.flashing = false;
        self.reverse_pending = false;
        self.motion.set_step_seconds(self.step_seconds / self.eaten_multiplier.max(f32::EPSILON));
        true
    }

    /// Back in the pen: mode, motion, speed, and patrol all start over.
    pub fn arrive_home(&mut self) -> bool {
        if !self.transition(EnemyMode::Home) {
            return false;
        }
        self.reset_in_pen();
        true
    }

    /// Unconditional reset used when the whole board restarts after a lost life.
    pub fn reset_in_pen(&mut self) {
        self.mode = EnemyMode::Home;
        self.motion.place(self.home_cell);
        self.motion.set_step_seconds(self.step_seconds);
        self.target = self.home_cell;
        self.patrol.reset();
        self.reverse_pending = false;
        self.flashing = false;
    }

    #[cfg(test)]
    pub(crate) fn force_mode(&mut self, mode: EnemyMode) {
        self.mode = mode;
    }

    pub fn set_step_seconds(&mut self, step_seconds: f32) {
        self.step_seconds = step_seconds;
        if self.mode != EnemyMode::Eaten {
            self.motion.set_step_seconds(step_seconds);
        }
    }

    /// Raises the flash flag once the power window is inside `warning`. Returns true on the
    /// tick flashing starts.
    pub fn update_flash(&mut self, power_remaining: f32, warning: f32) -> bool {
        let should_flash = self.mode == EnemyMode::Frightened && power_remaining <= warning;
        let started = should_flash && !self.flashing;
        self.flashing = should_flash;
        started
    }

    pub fn update<R: Rng + ?Sized>(
        &mut self,
        map: &GridMap,
        dt: f32,
        phase: Phase,
        context: TargetContext,
        rng: &mut R,
    ) -> EnemyTick {
        if self.mode == EnemyMode::Home {
            return EnemyTick::Idle;
        }
        let status = self.motion.advance(dt);
        if status == StepStatus::InFlight {
            return EnemyTick::Moving;
        }

        let cell = self.motion.cell();
        if self.mode == EnemyMode::Eaten && map.is_home_region(cell) {
            self.arrive_home();
            return EnemyTick::ReachedHome;
        }
        let mut outcome =
            if status == StepStatus::Completed { EnemyTick::Stepped } else { EnemyTick::Idle };
        if self.mode == EnemyMode::Exiting && !map.is_home_region(cell) && self.leave_home(phase) {
            outcome = EnemyTick::LeftHome;
        }

        if let Some(direction) = self.decide(map, context, rng) {
            self.motion.request_step(map, direction, MoveRule::Open);
        }
        outcome
    }

    fn decide<R: Rng + ?Sized>(
        &mut self,
        map: &GridMap,
        context: TargetContext,
        rng: &mut R,
    ) -> Option<Direction> {
        let cell = self.motion.cell();
        let facing = self.motion.direction();
        if mem::take(&mut self.reverse_pending)
            && let Some(back) = facing.map(Direction::opposite)
            && map.can_move_from(cell, back, MoveRule::Open)
        {
            return Some(back);
        }
        let mode = match self.mode {
            EnemyMode::Home => return None,
            EnemyMode::Exiting => return ai::exit_direction(map, cell),
            EnemyMode::Eaten => {
                self.target = self.home_cell;
                return ai::return_direction(map, cell, self.home_cell);
            }
            EnemyMode::Scatter => TargetMode::Scatter,
            EnemyMode::Chase => TargetMode::Chase,
            EnemyMode::Frightened => TargetMode::Frightened,
        };
        self.target =
            choose_target(map, self.personality, mode, cell, &mut self.patrol, context, rng);
        let randomize =
            self.personality == Personality::Wanderer && mode != TargetMode::Frightened;
        choose_direction(map, cell, facing, self.target, randomize, rng)
    }
}

/// Alternating scatter/chase windows, owned by the maze scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseSchedule {
    phase: Phase,
    remaining: Countdown,
    scatter_seconds: f32,
    chase_seconds: f32,
}

impl PhaseSchedule {
    pub fn new(scatter_seconds: f32, chase_seconds: f32) -> Self {
        Self {
            phase: Phase::Scatter,
            remaining: Countdown::new(scatter_seconds),
            scatter_seconds,
            chase_seconds,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining(&self) -> f32 {
        self.remaining.remaining()
    }

    /// Returns the new phase on the tick the window flips.
    pub fn tick(&mut self, dt: f32) -> Option<Phase> {
        if !self.remaining.tick(dt) {
            return None;
        }
        let (next, seconds) = match self.phase {
            Phase::Scatter => (Phase::Chase, self.chase_seconds),
            Phase::Chase => (Phase::Scatter, self.scatter_seconds),
        };
        self.phase = next;
        self.remaining.start(seconds);
        Some(next)
    }
}

/// Lets pursuers out of the pen one at a time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReleaseSchedule {
    countdown: Countdown,
    interval: f32,
}

impl ReleaseSchedule {
    pub fn new(first_seconds: f32, interval: f32) -> Self {
        Self { countdown: Countdown::new(first_seconds), interval }
    }

    pub fn remaining(&self) -> f32 {
        self.countdown.remaining()
    }

    /// True when the next pursuer should leave the pen.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.countdown.tick(dt) {
            self.countdown.start(self.interval);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Legend;
    use crate::grid::catalog::GLYPH_MAZE;
    use crate::test_support::*;
    use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};

    const ALL_MODES: [EnemyMode; 6] = [
        EnemyMode::Home,
        EnemyMode::Exiting,
        EnemyMode::Scatter,
        EnemyMode::Chase,
        EnemyMode::Frightened,
        EnemyMode::Eaten,
    ];

    fn maze() -> GridMap {
        GridMap::from_rows(&GLYPH_MAZE, Legend::Maze)
    }

    fn context() -> TargetContext {
        TargetContext { opponent: GridCell::new(7, 1), opponent_facing: Some(Direction::Left) }
    }

    #[test]
    fn frightened_and_eaten_have_narrow_exits() {
        let from_frightened: Vec<EnemyMode> = ALL_MODES
            .into_iter()
            .filter(|next| EnemyMode::Frightened.can_transition_to(*next))
            .collect();
        assert_eq!(from_frightened, vec![EnemyMode::Scatter, EnemyMode::Eaten]);
        let from_eaten: Vec<EnemyMode> = ALL_MODES
            .into_iter()
            .filter(|next| EnemyMode::Eaten.can_transition_to(*next))
            .collect();
        assert_eq!(from_eaten, vec![EnemyMode::Home]);
    }

    #[test]
    fn illegal_requests_are_ignored() {
        let map = maze();
        let mut enemy = enemy_at_slot(&map, 0);
        assert!(!enemy.frighten(), "a penned pursuer cannot be frightened");
        assert!(!enemy.capture());
        assert_eq!(enemy.mode(), EnemyMode::Home);
        assert!(enemy.release());
        assert!(!enemy.release());
        assert_eq!(enemy.mode(), EnemyMode::Exiting);
    }

    #[test]
    fn released_pursuer_walks_out_and_takes_the_phase_mode() {
        let map = maze();
        let mut enemy = enemy_at_slot(&map, 0);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        enemy.release();
        let mut left = false;
        for _ in 0..600 {
            if enemy.update(&map, 1.0 / 60.0, Phase::Chase, context(), &mut rng)
                == EnemyTick::LeftHome
            {
                left = true;
                break;
            }
        }
        assert!(left, "pursuer never left the pen");
        assert_eq!(enemy.mode(), EnemyMode::Chase);
        assert!(!map.is_home_region(enemy.cell()));
    }

    #[test]
    fn capture_doubles_speed_and_arrival_restores_everything() {
        let map = maze();
        let mut enemy = enemy_at_slot(&map, 1);
        let base_speed = enemy.motion.speed();
        enemy.release();
        enemy.leave_home(Phase::Scatter);
        enemy.frighten();
        assert!(enemy.capture());
        assert!((enemy.motion.speed() - base_speed * 2.0).abs() < 1e-3);

        enemy.motion.place(GridCell::new(7, 12));
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut arrived = false;
        for _ in 0..600 {
            if enemy.update(&map, 1.0 / 60.0, Phase::Scatter, context(), &mut rng)
                == EnemyTick::ReachedHome
            {
                arrived = true;
                break;
            }
        }
        assert!(arrived);
        assert_eq!(enemy.mode(), EnemyMode::Home);
        assert_eq!(enemy.cell(), enemy.home_cell());
        assert!((enemy.motion.speed() - base_speed).abs() < 1e-3);
        assert!(!enemy.motion.is_moving());
    }

    #[test]
    fn phase_toggle_reversal_waits_for_the_step_in_flight() {
        let map = open_maze_fixture();
        let mut enemy = free_enemy(&map, GridCell::new(1, 2), EnemyMode::Scatter);
        assert!(enemy.motion.request_step(&map, Direction::Right, MoveRule::Open));
        let committed = enemy.cell();
        assert!(enemy.apply_phase(Phase::Chase));
        assert_eq!(enemy.cell(), committed);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut ticks = 0;
        while enemy.update(&map, 1.0 / 60.0, Phase::Chase, context(), &mut rng)
            == EnemyTick::Moving
        {
            ticks += 1;
            assert_eq!(enemy.cell(), committed);
        }
        assert!(ticks > 0);
        assert_eq!(enemy.motion.direction(), Some(Direction::Left));
        assert_eq!(enemy.cell(), GridCell::new(1, 2));
        assert!(!enemy.reverse_pending());
    }

    #[test]
    fn flash_starts_inside_warning_window_only() {
        let map = open_maze_fixture();
        let mut enemy = free_enemy(&map, GridCell::new(2, 2), EnemyMode::Scatter);
        enemy.frighten();
        assert!(!enemy.update_flash(5.0, 2.0));
        assert!(enemy.update_flash(2.0, 2.0));
        assert!(!enemy.update_flash(1.5, 2.0), "start is reported once");
        assert!(enemy.is_flashing());
        enemy.end_frighten(Phase::Scatter);
        assert!(!enemy.is_flashing());
        assert_eq!(enemy.mode(), EnemyMode::Scatter);
    }

    #[test]
    fn fright_ends_in_the_current_phase_without_turning() {
        let map = open_maze_fixture();
        let mut enemy = free_enemy(&map, GridCell::new(2, 2), EnemyMode::Chase);
        enemy.frighten();
        enemy.update_flash(1.0, 2.0);
        enemy.reverse_pending = false;
        assert!(enemy.end_frighten(Phase::Chase));
        assert_eq!(enemy.mode(), EnemyMode::Chase);
        assert!(!enemy.is_flashing());
        assert!(!enemy.reverse_pending());
        assert!(!enemy.end_frighten(Phase::Scatter), "only a frightened pursuer can recover");
    }

    #[test]
    fn toggle_turns_around_pursuers_already_in_the_new_mode() {
        let map = open_maze_fixture();
        let mut scatter = free_enemy(&map, GridCell::new(1, 2), EnemyMode::Scatter);
        let mut penned = enemy_at_slot(&map, 1);
        assert!(scatter.apply_phase(Phase::Scatter));
        assert_eq!(scatter.mode(), EnemyMode::Scatter);
        assert!(scatter.reverse_pending());
        assert!(!penned.apply_phase(Phase::Chase));
        assert_eq!(penned.mode(), EnemyMode::Home);
        assert!(!penned.reverse_pending());
    }

    #[test]
    fn phase_schedule_alternates_windows() {
        let mut schedule = PhaseSchedule::new(1.0, 2.0);
        let mut flips = Vec::new();
        for _ in 0..300 {
            if let Some(phase) = schedule.tick(1.0 / 60.0) {
                flips.push(phase);
            }
        }
        assert_eq!(flips, vec![Phase::Chase, Phase::Scatter, Phase::Chase]);
    }

    #[test]
    fn release_schedule_fires_first_then_every_interval() {
        let mut schedule = ReleaseSchedule::new(2.0, 3.0);
        let fired = (1..=600).filter(|_| schedule.tick(1.0 / 60.0)).count();
        assert_eq!(fired, 3, "releases at ~2s, ~5s, ~8s within 10s");
    }
}
