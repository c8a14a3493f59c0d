//! The climber: grounded/climbing/falling state machine plus its step timing.
//! Transitions are planned by a pure function of (map, state, action) so they can be tested
//! without any timing; `Climber` wraps that plan with motion, queueing, and invincibility.

use crate::clock::Countdown;
use crate::events::ClimberLogState;
use crate::grid::GridMap;
use crate::motion::{Easing, MotionState, StepStatus};
use crate::types::{Direction, GridCell, Intent, TapZone};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClimbAction {
    WalkLeft,
    WalkRight,
    ClimbUp,
    ClimbDown,
}

impl ClimbAction {
    pub fn from_intent(intent: Intent) -> Option<Self> {
        match intent {
            Intent::Move(direction) => Some(Self::from_direction(direction)),
            Intent::Tap(TapZone::LeftHalf) => Some(Self::WalkLeft),
            Intent::Tap(TapZone::RightHalf) => Some(Self::WalkRight),
            Intent::Pause => None,
        }
    }

    pub fn from_direction(direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::ClimbUp,
            Direction::Down => Self::ClimbDown,
            Direction::Left => Self::WalkLeft,
            Direction::Right => Self::WalkRight,
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            Self::WalkLeft => Direction::Left,
            Self::WalkRight => Direction::Right,
            Self::ClimbUp => Direction::Up,
            Self::ClimbDown => Direction::Down,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClimberState {
    Grounded(GridCell),
    Climbing(GridCell),
    Falling(GridCell),
}

impl ClimberState {
    pub fn cell(self) -> GridCell {
        match self {
            Self::Grounded(cell) | Self::Climbing(cell) | Self::Falling(cell) => cell,
        }
    }

    pub fn log_state(self) -> ClimberLogState {
        match self {
            Self::Grounded(_) => ClimberLogState::Grounded,
            Self::Climbing(_) => ClimberLogState::Climbing,
            Self::Falling(_) => ClimberLogState::Falling,
        }
    }

    fn same_kind(self, other: ClimberState) -> bool {
        self.log_state() == other.log_state()
    }
}

/// Where `action` takes the climber from `state`, or `None` when the action does nothing.
pub fn plan_action(
    map: &GridMap,
    state: ClimberState,
    action: ClimbAction,
) -> Option<ClimberState> {
    let direction = action.direction();
    match state {
        ClimberState::Falling(_) => None,
        ClimberState::Grounded(cell) => {
            let target = cell.offset(direction);
            match action {
                ClimbAction::WalkLeft | ClimbAction::WalkRight => {
                    if !map.in_bounds(target) {
                        None
                    } else if map.is_walkable(target) {
                        Some(ClimberState::Grounded(target))
                    } else {
                        Some(ClimberState::Falling(target))
                    }
                }
                ClimbAction::ClimbUp => {
                    if map.is_climbable(target) {
                        Some(ClimberState::Climbing(target))
                    } else if map.is_climbable(cell) && map.is_walkable(target) {
                        Some(ClimberState::Grounded(target))
                    } else {
                        None
                    }
                }
                ClimbAction::ClimbDown => (map.is_climbable(cell) && map.is_climbable(target))
                    .then_some(ClimberState::Climbing(target)),
            }
        }
        ClimberState::Climbing(cell) => {
            let target = cell.offset(direction);
            match action {
                ClimbAction::ClimbUp | ClimbAction::ClimbDown => {
                    if map.is_climbable(target) {
                        Some(ClimberState::Climbing(target))
                    } else if map.is_walkable(target) {
                        Some(ClimberState::Grounded(target))
                    } else if action == ClimbAction::ClimbDown && map.is_walkable(cell) {
                        Some(ClimberState::Grounded(cell))
                    } else {
                        None
                    }
                }
                ClimbAction::WalkLeft | ClimbAction::WalkRight => {
                    map.is_walkable(target).then_some(ClimberState::Grounded(target))
                }
            }
        }
    }
}

/// Result of one fall step from `cell`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallStep {
    Continue(ClimberState),
    FellOff,
}

pub fn plan_fall(map: &GridMap, cell: GridCell) -> FallStep {
    if cell.row <= 0 {
        return FallStep::FellOff;
    }
    let below = cell.offset(Direction::Down);
    if map.is_walkable(below) {
        FallStep::Continue(ClimberState::Grounded(below))
    } else {
        FallStep::Continue(ClimberState::Falling(below))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClimberTick {
    Idle,
    Moving,
    Stepped,
    StateChanged(ClimberState),
    FellOff(GridCell),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepTimings {
    pub walk_seconds: f32,
    pub climb_seconds: f32,
    pub fall_seconds: f32,
}

#[derive(Clone, Debug)]
pub struct Climber {
    state: ClimberState,
    pub motion: MotionState,
    invincibility: Countdown,
    timings: StepTimings,
}

impl Climber {
    pub fn new(start: GridCell, timings: StepTimings) -> Self {
        Self {
            state: ClimberState::Grounded(start),
            motion: MotionState::new(start, timings.walk_seconds, Easing::EaseOut),
            invincibility: Countdown::idle(),
            timings,
        }
    }

    pub fn state(&self) -> ClimberState {
        self.state
    }

    pub fn cell(&self) -> GridCell {
        self.motion.cell()
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility.is_running()
    }

    pub fn invincibility_remaining(&self) -> f32 {
        self.invincibility.remaining()
    }

    pub fn grant_invincibility(&mut self, seconds: f32) {
        self.invincibility.start(seconds);
    }

    /// Queues an action, overwriting any unapplied one. Ignored while falling.
    pub fn apply_action(&mut self, action: ClimbAction) -> bool {
        if matches!(self.state, ClimberState::Falling(_)) {
            return false;
        }
        self.motion.queue(action.direction());
        true
    }

    pub fn respawn(&mut self, cell: GridCell) {
        self.state = ClimberState::Grounded(cell);
        self.motion.place(cell);
    }

    pub fn update(&mut self, map: &GridMap, dt: f32) -> ClimberTick {
        self.invincibility.tick(dt);
        let status = self.motion.advance(dt);
        if status == StepStatus::InFlight {
            return ClimberTick::Moving;
        }
        let settled =
            if status == StepStatus::Completed { ClimberTick::Stepped } else { ClimberTick::Idle };

        if let ClimberState::Falling(cell) = self.state {
            self.motion.clear_queue();
            return match plan_fall(map, cell) {
                FallStep::FellOff => ClimberTick::FellOff(cell),
                FallStep::Continue(next) => {
                    self.motion.set_step_seconds(self.timings.fall_seconds);
                    self.motion.begin_step(Direction::Down);
                    self.enter(next, settled)
                }
            };
        }

        let Some(direction) = self.motion.take_queued() else {
            return settled;
        };
        let action = ClimbAction::from_direction(direction);
        let Some(next) = plan_action(map, self.state, action) else {
            return settled;
        };
        if next.cell() != self.state.cell() {
            let seconds = if direction.is_horizontal() {
                self.timings.walk_seconds
            } else {
                self.timings.climb_seconds
            };
            self.motion.set_step_seconds(seconds);
            self.motion.begin_step(direction);
        }
        self.enter(next, settled)
    }

    fn enter(&mut self, next: ClimberState, settled: ClimberTick) -> ClimberTick {
        let previous = self.state;
        self.state = next;
        if previous.same_kind(next) { settled } else { ClimberTick::StateChanged(next) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    const DT: f32 = 1.0 / 60.0;

    fn run_until_settled(climber: &mut Climber, map: &GridMap) -> Vec<ClimberTick> {
        let mut ticks = Vec::new();
        for _ in 0..240 {
            let tick = climber.update(map, DT);
            if tick != ClimberTick::Moving {
                ticks.push(tick);
            }
            if matches!(tick, ClimberTick::FellOff(_)) {
                break;
            }
            let falling = matches!(climber.state(), ClimberState::Falling(_));
            if !climber.motion.is_moving() && !falling {
                break;
            }
        }
        ticks
    }

    #[test]
    fn walking_off_a_ledge_falls_immediately() {
        let map = ledge_fixture();
        let state = ClimberState::Grounded(GridCell::new(2, 2));
        assert_eq!(
            plan_action(&map, state, ClimbAction::WalkRight),
            Some(ClimberState::Falling(GridCell::new(3, 2)))
        );
    }

    #[test]
    fn walking_into_the_side_of_the_level_is_ignored() {
        let map = ledge_fixture();
        let state = ClimberState::Grounded(GridCell::new(0, 2));
        assert_eq!(plan_action(&map, state, ClimbAction::WalkLeft), None);
    }

    #[test]
    fn mounting_climbing_and_stepping_off_a_ladder() {
        let map = ladder_fixture();
        let foot = ClimberState::Grounded(GridCell::new(1, 0));
        let on_ladder = plan_action(&map, foot, ClimbAction::ClimbUp);
        assert_eq!(on_ladder, Some(ClimberState::Climbing(GridCell::new(1, 1))));
        assert_eq!(
            plan_action(&map, ClimberState::Climbing(GridCell::new(1, 1)), ClimbAction::WalkLeft),
            None,
            "no girder beside the ladder"
        );
        assert_eq!(
            plan_action(&map, ClimberState::Climbing(GridCell::new(1, 1)), ClimbAction::ClimbDown),
            Some(ClimberState::Climbing(GridCell::new(1, 0)))
        );
        assert_eq!(
            plan_action(&map, ClimberState::Climbing(GridCell::new(1, 0)), ClimbAction::WalkRight),
            Some(ClimberState::Grounded(GridCell::new(2, 0)))
        );
        assert_eq!(
            plan_action(&map, ClimberState::Climbing(GridCell::new(1, 0)), ClimbAction::ClimbDown),
            Some(ClimberState::Grounded(GridCell::new(1, 0)))
        );
    }

    #[test]
    fn grounded_climber_cannot_descend_without_a_ladder_below() {
        let map = ladder_fixture();
        let state = ClimberState::Grounded(GridCell::new(0, 0));
        assert_eq!(plan_action(&map, state, ClimbAction::ClimbDown), None);
        assert_eq!(plan_action(&map, state, ClimbAction::ClimbUp), None);
    }

    #[test]
    fn fall_lands_on_the_first_walkable_cell_below() {
        let map = ledge_fixture();
        let mut climber = Climber::new(GridCell::new(2, 2), default_timings());
        climber.apply_action(ClimbAction::WalkRight);
        let first = climber.update(&map, DT);
        assert_eq!(first, ClimberTick::StateChanged(ClimberState::Falling(GridCell::new(3, 2))));
        assert!(!climber.apply_action(ClimbAction::WalkLeft), "actions are ignored mid-fall");
        let ticks = run_until_settled(&mut climber, &map);
        let landed = ClimberState::Grounded(GridCell::new(3, 0));
        assert!(ticks.contains(&ClimberTick::StateChanged(landed)));
        assert_eq!(climber.state(), ClimberState::Grounded(GridCell::new(3, 0)));
    }

    #[test]
    fn falling_past_the_bottom_row_is_reported() {
        let map = pit_fixture();
        let mut climber = Climber::new(GridCell::new(0, 1), default_timings());
        climber.apply_action(ClimbAction::WalkRight);
        climber.update(&map, DT);
        let ticks = run_until_settled(&mut climber, &map);
        assert_eq!(ticks.last(), Some(&ClimberTick::FellOff(GridCell::new(1, 0))));
    }

    #[test]
    fn steps_use_their_own_durations() {
        let map = ladder_fixture();
        let timings = default_timings();
        let mut climber = Climber::new(GridCell::new(0, 0), timings);
        climber.apply_action(ClimbAction::WalkRight);
        climber.update(&map, DT);
        assert!((climber.motion.speed() - 1.0 / timings.walk_seconds).abs() < 1e-3);
        run_until_settled(&mut climber, &map);
        climber.apply_action(ClimbAction::ClimbUp);
        climber.update(&map, DT);
        assert_eq!(climber.state(), ClimberState::Climbing(GridCell::new(1, 1)));
        assert!((climber.motion.speed() - 1.0 / timings.climb_seconds).abs() < 1e-3);
    }

    #[test]
    fn invincibility_counts_down() {
        let map = ladder_fixture();
        let mut climber = Climber::new(GridCell::new(0, 0), default_timings());
        climber.grant_invincibility(0.1);
        assert!(climber.is_invincible());
        for _ in 0..7 {
            climber.update(&map, DT);
        }
        assert!(!climber.is_invincible());
    }
}
