//! Static level topology and grid/world coordinate conversion.
//! This module exists so every entity reads one shared, immutable description of the level.
//! It does not own entity positions, pickups still on the board, or any per-tick state.

use crate::types::{Direction, GridCell, manhattan};

pub mod catalog;
mod layout;

pub use layout::{Fit, TileLayout, WorldPoint};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CellKind {
    Wall,
    Floor,
    Ladder,
    FloorLadder,
    Spawn,
    Start,
    Goal,
    Pickup,
    PowerPickup,
    Home,
    Door,
}

impl CellKind {
    pub fn is_walkable(self) -> bool {
        !matches!(self, Self::Wall | Self::Ladder)
    }

    pub fn is_climbable(self) -> bool {
        matches!(self, Self::Ladder | Self::FloorLadder)
    }

    pub fn is_home_region(self) -> bool {
        matches!(self, Self::Home | Self::Door)
    }
}

/// Per-game character set for ASCII layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Legend {
    Maze,
    Climb,
}

impl Legend {
    pub fn classify(self, ch: char) -> CellKind {
        match (self, ch) {
            (Self::Maze, '.') => CellKind::Pickup,
            (Self::Maze, ' ') => CellKind::Floor,
            (Self::Maze, 'O') => CellKind::PowerPickup,
            (Self::Maze, 'P') => CellKind::Start,
            (Self::Maze, 'H') => CellKind::Home,
            (Self::Maze, 'D') => CellKind::Door,
            (Self::Climb, '=') => CellKind::Floor,
            (Self::Climb, 'H') => CellKind::Ladder,
            (Self::Climb, '+') => CellKind::FloorLadder,
            (Self::Climb, 'S') => CellKind::Spawn,
            (Self::Climb, 'P') => CellKind::Start,
            (Self::Climb, 'G') => CellKind::Goal,
            (Self::Climb, '*') => CellKind::Pickup,
            _ => CellKind::Wall,
        }
    }
}

/// How a mover is allowed to enter a neighboring cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveRule {
    /// Any walkable neighbor (maze movers).
    Open,
    /// Horizontal moves onto walkable cells only.
    Walk,
    /// Vertical moves along a contiguous ladder.
    Climb,
}

#[derive(Clone, Debug)]
pub struct GridMap {
    columns: i32,
    rows: i32,
    cells: Vec<CellKind>,
    start: GridCell,
    goal: GridCell,
    door: GridCell,
    spawns: Vec<GridCell>,
    homes: Vec<GridCell>,
    pickups: Vec<GridCell>,
    power_pickups: Vec<GridCell>,
    layout: TileLayout,
    viewport: Option<(f32, f32, Fit)>,
}

impl GridMap {
    /// Parses a layout given as text, ignoring blank lines. The first line is the top row.
    pub fn parse(text: &str, legend: Legend) -> Self {
        let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
        Self::from_rows(&lines, legend)
    }

    pub fn from_rows(lines: &[&str], legend: Legend) -> Self {
        let rows = lines.len() as i32;
        let columns = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0) as i32;
        let mut cells = vec![CellKind::Wall; (columns * rows) as usize];
        for (line_index, line) in lines.iter().enumerate() {
            let row = rows - 1 - line_index as i32;
            for (col, ch) in line.chars().enumerate() {
                cells[(row * columns) as usize + col] = legend.classify(ch);
            }
        }

        let mut map = Self {
            columns,
            rows,
            cells,
            start: GridCell::new(0, 0),
            goal: GridCell::new(0, 0),
            door: GridCell::new(0, 0),
            spawns: Vec::new(),
            homes: Vec::new(),
            pickups: Vec::new(),
            power_pickups: Vec::new(),
            layout: TileLayout::UNIT,
            viewport: None,
        };
        map.index_special_cells();
        map
    }

    fn index_special_cells(&mut self) {
        let mut start = None;
        let mut goal = None;
        let mut door = None;
        // Top-down, left-to-right so the first spawn listed is the highest one.
        for row in (0..self.rows).rev() {
            for col in 0..self.columns {
                let cell = GridCell::new(col, row);
                match self.cell_at(cell) {
                    CellKind::Start => {
                        start.get_or_insert(cell);
                    }
                    CellKind::Goal => {
                        goal.get_or_insert(cell);
                    }
                    CellKind::Door => {
                        door.get_or_insert(cell);
                    }
                    CellKind::Spawn => self.spawns.push(cell),
                    CellKind::Pickup => self.pickups.push(cell),
                    CellKind::PowerPickup => self.power_pickups.push(cell),
                    _ => {}
                }
            }
        }
        // Homes are indexed bottom-up to match enemy slot assignment.
        for row in 0..self.rows {
            for col in 0..self.columns {
                let cell = GridCell::new(col, row);
                if self.cell_at(cell) == CellKind::Home {
                    self.homes.push(cell);
                }
            }
        }

        let bottom_center = GridCell::new(self.columns / 2, 0);
        let top_center = GridCell::new(self.columns / 2, self.rows - 1);
        let center = GridCell::new(self.columns / 2, self.rows / 2);
        self.start = start.unwrap_or_else(|| self.nearest_walkable(bottom_center));
        self.goal = goal.unwrap_or_else(|| self.nearest_walkable(top_center));
        if self.homes.is_empty() {
            let fallback = self.nearest_walkable(center);
            self.homes.push(fallback);
        }
        self.door = door.unwrap_or_else(|| self.door_fallback());
    }

    fn door_fallback(&self) -> GridCell {
        let top_row = self.homes.iter().map(|home| home.row).max().unwrap_or(0);
        let top_homes: Vec<GridCell> =
            self.homes.iter().copied().filter(|home| home.row == top_row).collect();
        let middle = top_homes.get(top_homes.len() / 2).copied().unwrap_or(self.start);
        middle.offset(Direction::Up)
    }

    /// Closest walkable cell to `desired`, ties broken by (row, col).
    pub fn nearest_walkable(&self, desired: GridCell) -> GridCell {
        if self.is_walkable(desired) {
            return desired;
        }
        self.all_cells()
            .filter(|cell| self.is_walkable(*cell))
            .min_by_key(|cell| (manhattan(*cell, desired), cell.row, cell.col))
            .unwrap_or(desired)
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn in_bounds(&self, cell: GridCell) -> bool {
        cell.col >= 0 && cell.row >= 0 && cell.col < self.columns && cell.row < self.rows
    }

    pub fn all_cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        let columns = self.columns;
        (0..self.rows).flat_map(move |row| (0..columns).map(move |col| GridCell::new(col, row)))
    }

    pub fn cell_at(&self, cell: GridCell) -> CellKind {
        if !self.in_bounds(cell) {
            return CellKind::Wall;
        }
        self.cells[(cell.row * self.columns + cell.col) as usize]
    }

    pub fn is_walkable(&self, cell: GridCell) -> bool {
        self.cell_at(cell).is_walkable()
    }

    pub fn is_climbable(&self, cell: GridCell) -> bool {
        self.cell_at(cell).is_climbable()
    }

    pub fn is_home_region(&self, cell: GridCell) -> bool {
        self.cell_at(cell).is_home_region()
    }

    pub fn can_move_from(&self, from: GridCell, direction: Direction, rule: MoveRule) -> bool {
        let target = from.offset(direction);
        if !self.in_bounds(target) {
            return false;
        }
        match rule {
            MoveRule::Open => self.is_walkable(target),
            MoveRule::Walk => direction.is_horizontal() && self.is_walkable(target),
            MoveRule::Climb => {
                direction.is_vertical()
                    && self.is_climbable(target)
                    && (direction == Direction::Down || self.is_climbable(from))
            }
        }
    }

    /// Directions that pass `can_move_from`, in enumeration order.
    pub fn valid_directions(
        &self,
        from: GridCell,
        rule: MoveRule,
        excluding: Option<Direction>,
    ) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|direction| Some(*direction) != excluding)
            .filter(|direction| self.can_move_from(from, *direction, rule))
            .collect()
    }

    pub fn is_intersection(&self, cell: GridCell) -> bool {
        self.valid_directions(cell, MoveRule::Open, None).len() > 2
    }

    pub fn start(&self) -> GridCell {
        self.start
    }

    pub fn goal(&self) -> GridCell {
        self.goal
    }

    pub fn door(&self) -> GridCell {
        self.door
    }

    pub fn spawns(&self) -> &[GridCell] {
        &self.spawns
    }

    pub fn homes(&self) -> &[GridCell] {
        &self.homes
    }

    pub fn pickups(&self) -> &[GridCell] {
        &self.pickups
    }

    pub fn power_pickups(&self) -> &[GridCell] {
        &self.power_pickups
    }

    /// Recomputes the cached tile layout only when the viewport actually changed.
    pub fn fit_viewport(&mut self, width: f32, height: f32, fit: Fit) {
        if self.viewport == Some((width, height, fit)) {
            return;
        }
        self.layout = TileLayout::fit(self.columns, self.rows, width, height, fit);
        self.viewport = Some((width, height, fit));
    }

    pub fn layout(&self) -> TileLayout {
        self.layout
    }

    pub fn world_position(&self, cell: GridCell) -> WorldPoint {
        self.layout.world_position(cell)
    }

    pub fn grid_position(&self, point: WorldPoint) -> GridCell {
        self.layout.grid_position(point, self.columns, self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[test]
    fn rows_are_indexed_bottom_to_top() {
        let map = GridMap::parse("#P#\n# #\n#O#", Legend::Maze);
        assert_eq!(map.rows(), 3);
        assert_eq!(map.cell_at(GridCell::new(1, 2)), CellKind::Start);
        assert_eq!(map.cell_at(GridCell::new(1, 0)), CellKind::PowerPickup);
        assert_eq!(map.start(), GridCell::new(1, 2));
    }

    #[test]
    fn unknown_characters_become_walls() {
        let map = GridMap::parse("=?=\n=x=", Legend::Climb);
        assert_eq!(map.cell_at(GridCell::new(1, 0)), CellKind::Wall);
        assert_eq!(map.cell_at(GridCell::new(1, 1)), CellKind::Wall);
        assert_eq!(map.cell_at(GridCell::new(0, 1)), CellKind::Floor);
    }

    #[test]
    fn out_of_bounds_reads_as_wall() {
        let map = open_maze_fixture();
        assert_eq!(map.cell_at(GridCell::new(-1, 0)), CellKind::Wall);
        assert_eq!(map.cell_at(GridCell::new(0, map.rows())), CellKind::Wall);
        assert!(!map.is_walkable(GridCell::new(map.columns(), 1)));
    }

    #[test]
    fn missing_start_and_goal_fall_back_to_nearest_walkable() {
        let map = GridMap::parse("...===...\n.........\n..====...", Legend::Climb);
        assert_eq!(map.start(), GridCell::new(4, 0));
        assert_eq!(map.goal(), GridCell::new(4, 2));
    }

    #[test]
    fn missing_door_sits_above_the_home_pen() {
        let map = GridMap::parse("#####\n#   #\n#HHH#\n#HHH#\n#####", Legend::Maze);
        assert_eq!(map.door(), GridCell::new(2, 3));
        assert_eq!(map.homes().len(), 6);
        assert_eq!(map.homes()[0], GridCell::new(1, 1));
    }

    #[test]
    fn spawns_are_listed_top_down() {
        let map = GridMap::parse("S.S\n===\nS==", Legend::Climb);
        assert_eq!(
            map.spawns(),
            &[GridCell::new(0, 2), GridCell::new(2, 2), GridCell::new(0, 0)]
        );
    }

    #[test]
    fn climb_rule_requires_contiguous_ladder_going_up() {
        let map = ladder_fixture();
        let foot = GridCell::new(1, 0);
        assert!(map.can_move_from(foot, Direction::Up, MoveRule::Climb));
        let beside = GridCell::new(0, 0);
        assert!(!map.can_move_from(beside, Direction::Up, MoveRule::Climb));
        assert!(!map.can_move_from(foot, Direction::Left, MoveRule::Climb));
        assert!(map.can_move_from(foot, Direction::Left, MoveRule::Walk));
        assert!(!map.can_move_from(foot, Direction::Up, MoveRule::Walk));
    }

    #[test]
    fn valid_directions_respect_exclusion_and_order() {
        let map = open_maze_fixture();
        let center = GridCell::new(2, 2);
        assert_eq!(
            map.valid_directions(center, MoveRule::Open, None),
            vec![Direction::Up, Direction::Down, Direction::Left, Direction::Right]
        );
        assert_eq!(
            map.valid_directions(center, MoveRule::Open, Some(Direction::Down)),
            vec![Direction::Up, Direction::Left, Direction::Right]
        );
        assert!(map.is_intersection(center));
    }

    #[test]
    fn valid_directions_never_leave_walkable_ground() {
        let map = GridMap::from_rows(&catalog::GLYPH_MAZE, Legend::Maze);
        for cell in map.all_cells().filter(|cell| map.is_walkable(*cell)) {
            for direction in map.valid_directions(cell, MoveRule::Open, None) {
                let target = cell.offset(direction);
                assert!(map.in_bounds(target), "{cell:?} -> {direction:?} left the grid");
                assert_ne!(map.cell_at(target), CellKind::Wall);
            }
        }
    }

    #[test]
    fn world_round_trip_holds_for_every_cell() {
        let mut map = GridMap::from_rows(&catalog::GLYPH_MAZE, Legend::Maze);
        map.fit_viewport(390.0, 844.0, Fit::Square);
        for cell in map.all_cells() {
            assert_eq!(map.grid_position(map.world_position(cell)), cell);
        }
        let mut climb = GridMap::from_rows(&catalog::CLIMB_LEVELS[0].rows, Legend::Climb);
        climb.fit_viewport(844.0, 390.0, Fit::Stretch);
        for cell in climb.all_cells() {
            assert_eq!(climb.grid_position(climb.world_position(cell)), cell);
        }
    }

    #[test]
    fn grid_position_clamps_points_outside_the_board() {
        let mut map = open_maze_fixture();
        map.fit_viewport(200.0, 300.0, Fit::Square);
        let far = WorldPoint { x: -500.0, y: 10_000.0 };
        assert_eq!(map.grid_position(far), GridCell::new(0, map.rows() - 1));
    }
}
