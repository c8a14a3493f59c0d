//! Hand-authored level layouts. The first line of each layout is the top row.

use crate::types::GridCell;

/// Every path cell is reachable from the start and has at least two open neighbors.
pub const GLYPH_MAZE: [&str; 21] = [
    "###############",
    "#O...........O#",
    "#.###.###.###.#",
    "#.............#",
    "#.##.#####.##.#",
    "#....#...#....#",
    "###.##.#.##.###",
    "#......#......#",
    "#.#.#.....#.#.#",
    "#.#.###D###.#.#",
    "#.#.#HHHHH#.#.#",
    "#...#HHHHH#...#",
    "###.#HHHHH#.###",
    "#...#######...#",
    "#.#.........#.#",
    "#.###.###.###.#",
    "#.............#",
    "#.###.#.#.###.#",
    "#.#.........#.#",
    "#O.....P.....O#",
    "###############",
];

#[derive(Clone, Copy, Debug)]
pub struct ClimbLevel {
    pub rows: [&'static str; 13],
    /// Alternative rivet placements; variant 0 matches the `*` cells in `rows`.
    pub rivet_variants: [[GridCell; 3]; 3],
}

const fn cell(col: i32, row: i32) -> GridCell {
    GridCell::new(col, row)
}

pub const CLIMB_LEVELS: [ClimbLevel; 3] = [
    ClimbLevel {
        rows: [
            "S===G===S",
            ".......H.",
            "=*=====+=",
            ".H.......",
            "=+====*==",
            ".......H.",
            "S======+=",
            ".H.......",
            "=+=*=====",
            ".......H.",
            "=======+=",
            ".H.......",
            "=+==P====",
        ],
        rivet_variants: [
            [cell(1, 10), cell(6, 8), cell(3, 4)],
            [cell(2, 10), cell(5, 8), cell(6, 4)],
            [cell(5, 10), cell(2, 6), cell(1, 2)],
        ],
    },
    ClimbLevel {
        rows: [
            "S==.G.==S",
            ".H..H..H.",
            "=+==+==+=",
            ".H.....H.",
            "=+=*.*=+=",
            "...H...H.",
            "S==+=..+=",
            "...H...H.",
            "=*=+===+=",
            ".H.....H.",
            "=+==S==+=",
            ".H.....H.",
            "=+==P==+=",
        ],
        rivet_variants: [
            [cell(3, 8), cell(5, 8), cell(1, 4)],
            [cell(6, 10), cell(2, 4), cell(5, 4)],
            [cell(2, 10), cell(6, 8), cell(6, 2)],
        ],
    },
    ClimbLevel {
        rows: [
            "S..=G=..S",
            "...H.H...",
            "=+=+=+=+=",
            ".H.H.H.H.",
            "=+.*.*.+=",
            ".H.....H.",
            "S+=====+S",
            ".H.H.H.H.",
            "=+.+=+.+=",
            ".H.H.H.H.",
            "=+=+*+=+=",
            ".H.....H.",
            "=+==P==+=",
        ],
        rivet_variants: [
            [cell(3, 8), cell(5, 8), cell(4, 2)],
            [cell(0, 10), cell(8, 4), cell(2, 0)],
            [cell(4, 10), cell(3, 6), cell(6, 2)],
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GridMap, Legend, MoveRule};

    #[test]
    fn maze_layout_has_every_special_cell() {
        let map = GridMap::from_rows(&GLYPH_MAZE, Legend::Maze);
        assert_eq!((map.columns(), map.rows()), (15, 21));
        assert_eq!(map.start(), GridCell::new(7, 1));
        assert_eq!(map.door(), GridCell::new(7, 11));
        assert_eq!(map.homes().len(), 15);
        assert_eq!(map.power_pickups().len(), 4);
    }

    #[test]
    fn maze_paths_have_no_dead_ends() {
        let map = GridMap::from_rows(&GLYPH_MAZE, Legend::Maze);
        let paths =
            map.all_cells().filter(|cell| map.is_walkable(*cell) && !map.is_home_region(*cell));
        for cell in paths {
            let open = map.valid_directions(cell, MoveRule::Open, None);
            assert!(open.len() >= 2, "dead end at {cell:?}");
        }
        assert_eq!(map.pickups().len(), 144);
    }

    #[test]
    fn climb_layouts_are_rectangular() {
        for level in &CLIMB_LEVELS {
            for line in level.rows {
                assert_eq!(line.len(), 9, "ragged line {line:?}");
            }
        }
    }

    #[test]
    fn rivet_variants_sit_on_walkable_cells() {
        for (index, level) in CLIMB_LEVELS.iter().enumerate() {
            let map = GridMap::from_rows(&level.rows, Legend::Climb);
            let mut marked = map.pickups().to_vec();
            marked.sort();
            let mut first = level.rivet_variants[0].to_vec();
            first.sort();
            assert_eq!(marked, first, "layout {index} variant 0 must match its `*` cells");
            for variant in &level.rivet_variants {
                for rivet in variant {
                    assert!(map.is_walkable(*rivet), "layout {index} rivet {rivet:?}");
                }
            }
        }
    }

    #[test]
    fn climb_layouts_expose_spawns_start_and_goal() {
        for level in &CLIMB_LEVELS {
            let map = GridMap::from_rows(&level.rows, Legend::Climb);
            assert_eq!(map.start(), GridCell::new(4, 0));
            assert_eq!(map.goal(), GridCell::new(4, 12));
            assert!(map.spawns().len() >= 3);
        }
    }
}
