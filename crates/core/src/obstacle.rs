//! Rolling and falling hazards for the climber game.
//! Obstacles advance on the game's fixed obstacle cadence rather than every tick, and animate
//! linearly between cells in the meantime.

use rand_chacha::rand_core::Rng;

use crate::grid::GridMap;
use crate::motion::{Easing, MotionState};
use crate::rng::{coin_flip, roll_percent};
use crate::types::{Direction, GridCell, ObstacleId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    Rolling,
    Falling,
}

impl ObstacleKind {
    pub fn roll<R: Rng + ?Sized>(rng: &mut R, roller_percent: u32) -> Self {
        if roll_percent(rng, roller_percent) { Self::Rolling } else { Self::Falling }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObstacleStep {
    Stayed,
    Moved,
    Despawn,
}

pub fn random_heading<R: Rng + ?Sized>(rng: &mut R) -> Direction {
    if coin_flip(rng) { Direction::Right } else { Direction::Left }
}

#[derive(Clone, Debug)]
pub struct ObstacleRecord {
    pub id: ObstacleId,
    pub kind: ObstacleKind,
    heading: Direction,
    pub motion: MotionState,
}

impl ObstacleRecord {
    pub fn new(
        id: ObstacleId,
        kind: ObstacleKind,
        cell: GridCell,
        heading: Direction,
        animation_seconds: f32,
    ) -> Self {
        let motion = MotionState::new(cell, animation_seconds, Easing::Linear);
        Self { id, kind, heading, motion }
    }

    pub fn cell(&self) -> GridCell {
        self.motion.cell()
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// One obstacle-cadence step. An obstacle still animating skips its turn.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        map: &GridMap,
        drop_through_percent: u32,
        rng: &mut R,
    ) -> ObstacleStep {
        if self.motion.is_moving() {
            return ObstacleStep::Stayed;
        }
        let direction = match self.kind {
            ObstacleKind::Falling => Direction::Down,
            ObstacleKind::Rolling => self.rolling_direction(map, drop_through_percent, rng),
        };
        self.motion.begin_step(direction);
        if self.is_off_grid(map) { ObstacleStep::Despawn } else { ObstacleStep::Moved }
    }

    fn rolling_direction<R: Rng + ?Sized>(
        &mut self,
        map: &GridMap,
        drop_through_percent: u32,
        rng: &mut R,
    ) -> Direction {
        let cell = self.cell();
        let ahead = cell.offset(self.heading);
        let below = cell.offset(Direction::Down);
        if !map.in_bounds(ahead) || !map.is_walkable(cell) {
            self.drop_onto(map, below, rng);
            return Direction::Down;
        }
        if map.is_climbable(cell) && roll_percent(rng, drop_through_percent) {
            return Direction::Down;
        }
        if map.is_walkable(ahead) {
            return self.heading;
        }
        self.drop_onto(map, below, rng);
        Direction::Down
    }

    fn drop_onto<R: Rng + ?Sized>(&mut self, map: &GridMap, landing: GridCell, rng: &mut R) {
        if map.is_walkable(landing) {
            self.heading = random_heading(rng);
        }
    }

    pub fn animate(&mut self, dt: f32) {
        self.motion.advance(dt);
    }

    pub fn is_off_grid(&self, map: &GridMap) -> bool {
        let row = self.cell().row;
        row < 0 || row >= map.rows()
    }
}
