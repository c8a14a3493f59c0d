//! Deterministic shortest paths over walkable cells.

use std::collections::{BTreeMap, BTreeSet};

use crate::grid::{GridMap, MoveRule};
use crate::types::{Direction, GridCell, manhattan};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    h: u32,
    row: i32,
    col: i32,
}

/// Cells from `start` (exclusive) to `goal` (inclusive); ties settle on (f, h, row, col).
pub(crate) fn astar_path(map: &GridMap, start: GridCell, goal: GridCell) -> Option<Vec<GridCell>> {
    if !map.is_walkable(start) || !map.is_walkable(goal) {
        return None;
    }
    if start == goal {
        return Some(vec![]);
    }
    let mut open_set = BTreeSet::new();
    let mut g_score = BTreeMap::new();
    let mut came_from = BTreeMap::new();
    let h = manhattan(start, goal);
    open_set.insert(OpenNode { f: h, h, row: start.row, col: start.col });
    g_score.insert(start, 0_u32);
    while let Some(current) = open_set.pop_first() {
        let cell = GridCell::new(current.col, current.row);
        if cell == goal {
            return reconstruct_path(&came_from, start, goal);
        }
        let Some(&cur_g) = g_score.get(&cell) else {
            continue;
        };
        for direction in Direction::ALL {
            if !map.can_move_from(cell, direction, MoveRule::Open) {
                continue;
            }
            let next = cell.offset(direction);
            let tentative = cur_g + 1;
            if tentative < *g_score.get(&next).unwrap_or(&u32::MAX) {
                came_from.insert(next, cell);
                g_score.insert(next, tentative);
                let h = manhattan(next, goal);
                open_set.insert(OpenNode { f: tentative + h, h, row: next.row, col: next.col });
            }
        }
    }
    None
}

fn reconstruct_path(
    came: &BTreeMap<GridCell, GridCell>,
    start: GridCell,
    goal: GridCell,
) -> Option<Vec<GridCell>> {
    let mut cell = goal;
    let mut result = vec![cell];
    while cell != start {
        cell = *came.get(&cell)?;
        result.push(cell);
    }
    result.reverse();
    result.remove(0);
    Some(result)
}

/// Direction of the first step along the shortest path, if any.
pub(crate) fn first_step(map: &GridMap, start: GridCell, goal: GridCell) -> Option<Direction> {
    let next = *astar_path(map, start, goal)?.first()?;
    Direction::ALL.into_iter().find(|direction| start.offset(*direction) == next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[test]
    fn path_goes_around_a_wall() {
        let map = pillar_maze_fixture();
        let path = astar_path(&map, GridCell::new(1, 2), GridCell::new(3, 2)).expect("path");
        assert_eq!(path.len(), 4);
        assert_eq!(path.last(), Some(&GridCell::new(3, 2)));
        assert!(path.iter().all(|cell| map.is_walkable(*cell)));
    }

    #[test]
    fn unreachable_goal_yields_none() {
        let map = open_maze_fixture();
        assert!(astar_path(&map, GridCell::new(1, 1), GridCell::new(0, 0)).is_none());
        assert_eq!(first_step(&map, GridCell::new(1, 1), GridCell::new(1, 1)), None);
    }

    #[test]
    fn ties_resolve_the_same_way_every_time() {
        let map = open_maze_fixture();
        let first = first_step(&map, GridCell::new(1, 1), GridCell::new(3, 3));
        for _ in 0..5 {
            assert_eq!(first_step(&map, GridCell::new(1, 1), GridCell::new(3, 3)), first);
        }
        assert!(matches!(first, Some(Direction::Up | Direction::Right)));
    }
}
