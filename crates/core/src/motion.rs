//! Per-entity discrete-step motion with eased interpolation.
//! This module exists so every mover shares one notion of "logical cell" versus "drawn position".
//! It does not decide where an entity wants to go; owners pick directions and react to
//! `StepStatus::Completed` by chaining the next step in the same tick.

use crate::grid::{GridMap, MoveRule, TileLayout, WorldPoint};
use crate::types::{Direction, GridCell};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Easing {
    Linear,
    /// Quadratic ease-out, used for the player.
    EaseOut,
    /// Quadratic ease-in-out, used for pursuers.
    EaseInOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOut => t * (2.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepStatus {
    Idle,
    InFlight,
    Completed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MotionState {
    /// Logical cell. Becomes the destination the instant a step begins.
    cell: GridCell,
    from: GridCell,
    progress: f32,
    moving: bool,
    direction: Option<Direction>,
    queued: Option<Direction>,
    /// Steps per second.
    speed: f32,
    easing: Easing,
}

impl MotionState {
    pub fn new(cell: GridCell, step_seconds: f32, easing: Easing) -> Self {
        Self {
            cell,
            from: cell,
            progress: 0.0,
            moving: false,
            direction: None,
            queued: None,
            speed: speed_for(step_seconds),
            easing,
        }
    }

    pub fn cell(&self) -> GridCell {
        self.cell
    }

    pub fn from_cell(&self) -> GridCell {
        self.from
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn queued(&self) -> Option<Direction> {
        self.queued
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, steps_per_second: f32) {
        self.speed = steps_per_second.max(0.0);
    }

    pub fn set_step_seconds(&mut self, step_seconds: f32) {
        self.speed = speed_for(step_seconds);
    }

    /// Overwrites any not-yet-applied queued direction. Never touches a step in flight.
    pub fn queue(&mut self, direction: Direction) {
        self.queued = Some(direction);
    }

    pub fn take_queued(&mut self) -> Option<Direction> {
        self.queued.take()
    }

    pub fn clear_queue(&mut self) {
        self.queued = None;
    }

    /// Sets the facing without moving, e.g. when a pursuer is told to turn around.
    pub fn face(&mut self, direction: Direction) {
        self.direction = Some(direction);
    }

    /// Starts a step if the map approves it and nothing is in flight.
    pub fn request_step(&mut self, map: &GridMap, direction: Direction, rule: MoveRule) -> bool {
        if self.moving || !map.can_move_from(self.cell, direction, rule) {
            return false;
        }
        self.begin_step(direction);
        true
    }

    /// Starts a step the owner already validated against its own rules.
    pub fn begin_step(&mut self, direction: Direction) {
        self.from = self.cell;
        self.cell = self.cell.offset(direction);
        self.direction = Some(direction);
        self.progress = 0.0;
        self.moving = true;
    }

    pub fn advance(&mut self, dt: f32) -> StepStatus {
        if !self.moving {
            return StepStatus::Idle;
        }
        self.progress += dt * self.speed;
        if self.progress >= 1.0 {
            self.from = self.cell;
            self.progress = 0.0;
            self.moving = false;
            return StepStatus::Completed;
        }
        StepStatus::InFlight
    }

    /// Teleports and stops, dropping any queued direction.
    pub fn place(&mut self, cell: GridCell) {
        self.cell = cell;
        self.from = cell;
        self.progress = 0.0;
        self.moving = false;
        self.direction = None;
        self.queued = None;
    }

    pub fn interpolated_world(&self, layout: &TileLayout) -> WorldPoint {
        let from = layout.world_position(self.from);
        let to = layout.world_position(self.cell);
        from.lerp(to, self.easing.apply(self.progress))
    }
}

fn speed_for(step_seconds: f32) -> f32 {
    if step_seconds <= 0.0 { f32::MAX } else { 1.0 / step_seconds }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[test]
    fn logical_cell_jumps_to_destination_when_step_begins() {
        let map = open_maze_fixture();
        let mut motion = MotionState::new(GridCell::new(2, 2), 0.2, Easing::Linear);
        assert!(motion.request_step(&map, Direction::Up, MoveRule::Open));
        assert_eq!(motion.cell(), GridCell::new(2, 3));
        assert_eq!(motion.from_cell(), GridCell::new(2, 2));
        assert!(motion.is_moving());
    }

    #[test]
    fn blocked_request_is_a_no_op() {
        let map = open_maze_fixture();
        let mut motion = MotionState::new(GridCell::new(1, 1), 0.2, Easing::Linear);
        assert!(!motion.request_step(&map, Direction::Left, MoveRule::Open));
        assert_eq!(motion.cell(), GridCell::new(1, 1));
        assert!(!motion.is_moving());
    }

    #[test]
    fn queueing_never_preempts_a_step_in_flight() {
        let map = open_maze_fixture();
        let mut motion = MotionState::new(GridCell::new(2, 2), 0.2, Easing::Linear);
        motion.request_step(&map, Direction::Up, MoveRule::Open);
        motion.queue(Direction::Left);
        motion.queue(Direction::Right);
        assert!(!motion.request_step(&map, Direction::Right, MoveRule::Open));
        assert_eq!(motion.cell(), GridCell::new(2, 3));
        assert_eq!(motion.queued(), Some(Direction::Right));
    }

    #[test]
    fn completion_snaps_and_resets_progress() {
        let map = open_maze_fixture();
        let mut motion = MotionState::new(GridCell::new(2, 2), 0.2, Easing::EaseInOut);
        motion.request_step(&map, Direction::Right, MoveRule::Open);
        assert_eq!(motion.advance(0.1), StepStatus::InFlight);
        assert!((motion.progress() - 0.5).abs() < 1e-5);
        assert_eq!(motion.advance(0.1), StepStatus::Completed);
        assert_eq!(motion.progress(), 0.0);
        assert!(!motion.is_moving());
        assert_eq!(motion.from_cell(), motion.cell());
        assert_eq!(motion.advance(0.1), StepStatus::Idle);
    }

    #[test]
    fn eased_position_stays_between_endpoints() {
        let map = open_maze_fixture();
        let layout = TileLayout::UNIT;
        for easing in [Easing::Linear, Easing::EaseOut, Easing::EaseInOut] {
            let mut motion = MotionState::new(GridCell::new(1, 2), 0.5, easing);
            motion.request_step(&map, Direction::Right, MoveRule::Open);
            let mut last = layout.world_position(GridCell::new(1, 2)).x;
            while motion.advance(0.05) == StepStatus::InFlight {
                let x = motion.interpolated_world(&layout).x;
                assert!(x >= last && x <= 2.5, "{easing:?} overshot: {x}");
                last = x;
            }
        }
    }

    #[test]
    fn easing_curves_hit_their_endpoints() {
        for easing in [Easing::Linear, Easing::EaseOut, Easing::EaseInOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6);
        }
        assert!(Easing::EaseOut.apply(0.25) > 0.25);
        assert!(Easing::EaseInOut.apply(0.25) < 0.25);
    }
}
