//! Target selection and direction choice for maze pursuers.
//! This module exists so every personality is a tag matched in one place rather than a type
//! hierarchy. It does not own enemy mode transitions; `enemy` decides which mode applies.

use rand_chacha::rand_core::Rng;

use crate::grid::{GridMap, MoveRule};
use crate::rng::roll_below;
use crate::types::{Direction, GridCell, manhattan};

mod pathing;

pub(crate) use pathing::first_step;

/// Cells ahead of the opponent an interceptor aims for.
pub const INTERCEPT_LEAD: i32 = 4;
/// A patroller flips to its other corner once closer than this.
pub const PATROL_SWITCH_DISTANCE: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Personality {
    Pursuer,
    Interceptor,
    Patroller,
    Wanderer,
}

impl Personality {
    pub const ROSTER: [Personality; 4] = [
        Personality::Pursuer,
        Personality::Interceptor,
        Personality::Patroller,
        Personality::Wanderer,
    ];

    pub fn for_index(index: usize) -> Self {
        Self::ROSTER[index % Self::ROSTER.len()]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetMode {
    Scatter,
    Chase,
    Frightened,
}

/// What a pursuer knows about the protagonist when it picks a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetContext {
    pub opponent: GridCell,
    pub opponent_facing: Option<Direction>,
}

/// Interior corner assigned to enemy slot `index`: top-left, top-right, bottom-left,
/// bottom-right.
pub fn scatter_corner(map: &GridMap, index: usize) -> GridCell {
    let last_col = (map.columns() - 2).max(0);
    let last_row = (map.rows() - 2).max(0);
    let corners = [
        GridCell::new(1, last_row),
        GridCell::new(last_col, last_row),
        GridCell::new(1, 1),
        GridCell::new(last_col, 1),
    ];
    corners[index % corners.len()]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PatrolRoute {
    corners: [GridCell; 2],
    leg: usize,
}

impl PatrolRoute {
    /// Pairs `primary` with its diagonal mirror.
    pub fn new(map: &GridMap, primary: GridCell) -> Self {
        let mirror = GridCell::new(map.columns() - 1 - primary.col, map.rows() - 1 - primary.row);
        Self { corners: [primary, mirror], leg: 0 }
    }

    pub fn primary(&self) -> GridCell {
        self.corners[0]
    }

    pub fn current(&self) -> GridCell {
        self.corners[self.leg]
    }

    pub fn leg(&self) -> usize {
        self.leg
    }

    pub fn reset(&mut self) {
        self.leg = 0;
    }

    fn advance_from(&mut self, cell: GridCell) -> GridCell {
        if manhattan(cell, self.current()) < PATROL_SWITCH_DISTANCE {
            self.leg = 1 - self.leg;
        }
        self.current()
    }
}

pub fn choose_target<R: Rng + ?Sized>(
    map: &GridMap,
    personality: Personality,
    mode: TargetMode,
    cell: GridCell,
    patrol: &mut PatrolRoute,
    context: TargetContext,
    rng: &mut R,
) -> GridCell {
    match mode {
        TargetMode::Frightened => GridCell::new(
            roll_below(rng, map.columns().max(0) as u32) as i32,
            roll_below(rng, map.rows().max(0) as u32) as i32,
        ),
        TargetMode::Scatter => patrol.primary(),
        TargetMode::Chase => match personality {
            Personality::Pursuer | Personality::Wanderer => context.opponent,
            Personality::Interceptor => match context.opponent_facing {
                Some(facing) => context.opponent.offset_by(facing, INTERCEPT_LEAD),
                None => context.opponent,
            },
            Personality::Patroller => patrol.advance_from(cell),
        },
    }
}

/// Next direction toward `target`. Reversal only when nothing else is open.
pub fn choose_direction<R: Rng + ?Sized>(
    map: &GridMap,
    cell: GridCell,
    facing: Option<Direction>,
    target: GridCell,
    randomize_at_intersections: bool,
    rng: &mut R,
) -> Option<Direction> {
    let reverse = facing.map(Direction::opposite);
    let candidates = map.valid_directions(cell, MoveRule::Open, reverse);
    if candidates.is_empty() {
        return reverse.filter(|back| map.can_move_from(cell, *back, MoveRule::Open));
    }
    if randomize_at_intersections && map.is_intersection(cell) {
        let index = roll_below(rng, candidates.len() as u32) as usize;
        return candidates.get(index).copied();
    }
    candidates.into_iter().min_by_key(|direction| manhattan(cell.offset(*direction), target))
}

/// Greedy step toward `target` with no reversal rule, used while leaving the pen.
pub fn direction_toward(map: &GridMap, cell: GridCell, target: GridCell) -> Option<Direction> {
    map.valid_directions(cell, MoveRule::Open, None)
        .into_iter()
        .min_by_key(|direction| manhattan(cell.offset(*direction), target))
}

pub fn exit_direction(map: &GridMap, cell: GridCell) -> Option<Direction> {
    if map.can_move_from(cell, Direction::Up, MoveRule::Open) {
        return Some(Direction::Up);
    }
    direction_toward(map, cell, map.door())
}

/// First step home for a captured pursuer; greedy when no path exists.
pub fn return_direction(map: &GridMap, cell: GridCell, home: GridCell) -> Option<Direction> {
    first_step(map, cell, home).or_else(|| direction_toward(map, cell, home))
}
