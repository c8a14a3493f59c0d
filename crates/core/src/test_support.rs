//! Shared fixtures for the unit test suites.
//! Layouts are written top row first, exactly as the level catalog is.

use slotmap::SlotMap;

use crate::climber::StepTimings;
use crate::enemy::{EnemyMode, EnemyRecord};
use crate::grid::{GridMap, Legend};
use crate::types::{EnemyId, GridCell};

/// 5×5 room with a wall border and an open 3×3 interior.
pub(crate) fn open_maze_fixture() -> GridMap {
    GridMap::from_rows(&["#####", "#...#", "#...#", "#...#", "#####"], Legend::Maze)
}

/// Like the open room, with a pillar in the middle.
pub(crate) fn pillar_maze_fixture() -> GridMap {
    GridMap::from_rows(&["#####", "#...#", "#.#.#", "#...#", "#####"], Legend::Maze)
}

/// A corridor running up from the middle of a short horizontal hall at row 2.
pub(crate) fn elbow_fixture() -> GridMap {
    GridMap::from_rows(
        &["#####", "##.##", "##.##", "##.##", "#...#", "#####", "#####"],
        Legend::Maze,
    )
}

pub(crate) fn dead_end_fixture() -> GridMap {
    GridMap::from_rows(&["#####", "#...#", "#####"], Legend::Maze)
}

/// Ladder rising from a girder+ladder cell at (1, 0).
pub(crate) fn ladder_fixture() -> GridMap {
    GridMap::from_rows(&[".H.", "=+="], Legend::Climb)
}

/// Top girder ends at column 2; the floor girder spans the whole width.
pub(crate) fn ledge_fixture() -> GridMap {
    GridMap::from_rows(&["===.", "....", "===="], Legend::Climb)
}

/// Nothing under the right column at all.
pub(crate) fn pit_fixture() -> GridMap {
    GridMap::from_rows(&["=.", "=."], Legend::Climb)
}

/// A single girder across the top of an otherwise empty board.
pub(crate) fn girder_fixture() -> GridMap {
    GridMap::from_rows(&["====", "....", "...."], Legend::Climb)
}

pub(crate) fn default_timings() -> StepTimings {
    StepTimings { walk_seconds: 0.12, climb_seconds: 0.18, fall_seconds: 0.08 }
}

fn enemy_id() -> EnemyId {
    let mut ids: SlotMap<EnemyId, ()> = SlotMap::with_key();
    ids.insert(())
}

pub(crate) fn enemy_at_slot(map: &GridMap, slot: usize) -> EnemyRecord {
    EnemyRecord::new(map, enemy_id(), slot, 0.2, 2.0)
}

/// A pursuer already out of the pen, standing at `cell` in `mode`.
pub(crate) fn free_enemy(map: &GridMap, cell: GridCell, mode: EnemyMode) -> EnemyRecord {
    let mut enemy = enemy_at_slot(map, 0);
    enemy.force_mode(mode);
    enemy.motion.place(cell);
    enemy
}
