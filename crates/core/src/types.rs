use std::hash::Hasher;

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct EnemyId;
    pub struct ObstacleId;
    pub struct PickupId;
}

/// A discrete grid coordinate. Row 0 is the bottom row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub col: i32,
    pub row: i32,
}

impl GridCell {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    pub fn offset(self, direction: Direction) -> Self {
        self.offset_by(direction, 1)
    }

    pub fn offset_by(self, direction: Direction, steps: i32) -> Self {
        let (dc, dr) = direction.delta();
        Self { col: self.col + dc * steps, row: self.row + dr * steps }
    }
}

pub fn manhattan(a: GridCell, b: GridCell) -> u32 {
    a.col.abs_diff(b.col) + a.row.abs_diff(b.row)
}

pub(crate) fn write_cell<H: Hasher>(hasher: &mut H, cell: GridCell) {
    hasher.write_i32(cell.col);
    hasher.write_i32(cell.row);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Enumeration order; every deterministic tie-break walks this array.
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, 1),
            Self::Down => (0, -1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    pub fn is_vertical(self) -> bool {
        !self.is_horizontal()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TapZone {
    LeftHalf,
    RightHalf,
}

/// A decoded player intent. Raw touches and keys never reach the core.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    Move(Direction),
    Tap(TapZone),
    Pause,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameId {
    GlyphRunner,
    RivetClimb,
}

impl GameId {
    pub const ALL: [GameId; 2] = [GameId::GlyphRunner, GameId::RivetClimb];

    /// Stable key used by best-score persistence.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GlyphRunner => "glyphRunner",
            Self::RivetClimb => "rivetClimb",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == key)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    LivesExhausted { final_score: u64 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdvanceStopReason {
    PausedAtBoundary { tick: u64 },
    Finished(RunOutcome),
    BudgetExhausted,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdvanceResult {
    pub simulated_ticks: u32,
    pub stop_reason: AdvanceStopReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    RunFinished,
}
