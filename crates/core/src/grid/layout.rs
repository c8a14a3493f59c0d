//! Tile sizing for a viewport and the grid/world conversions built on it.

use crate::types::GridCell;

const TOP_MARGIN: f32 = 80.0;
const BOTTOM_MARGIN: f32 = 40.0;
const SIDE_MARGIN: f32 = 10.0;
const MIN_TILE: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fit {
    /// Square tiles, board centered in the free area.
    Square,
    /// Tiles stretched to fill the free area on both axes.
    Stretch,
}

/// Continuous coordinate with y growing upward, like row indices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldPoint {
    pub x: f32,
    pub y: f32,
}

impl WorldPoint {
    pub fn lerp(self, to: WorldPoint, t: f32) -> WorldPoint {
        WorldPoint { x: self.x + (to.x - self.x) * t, y: self.y + (to.y - self.y) * t }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileLayout {
    pub tile_width: f32,
    pub tile_height: f32,
    pub origin: WorldPoint,
}

impl TileLayout {
    pub const UNIT: TileLayout =
        TileLayout { tile_width: 1.0, tile_height: 1.0, origin: WorldPoint { x: 0.0, y: 0.0 } };

    pub fn fit(columns: i32, rows: i32, width: f32, height: f32, fit: Fit) -> Self {
        let columns = columns.max(1) as f32;
        let rows = rows.max(1) as f32;
        let free_width = (width - SIDE_MARGIN * 2.0).max(0.0);
        let free_height = (height - TOP_MARGIN - BOTTOM_MARGIN).max(0.0);
        match fit {
            Fit::Square => {
                let tile = (free_width / columns).min(free_height / rows).max(MIN_TILE);
                let origin = WorldPoint {
                    x: (width - tile * columns) / 2.0,
                    y: BOTTOM_MARGIN + (free_height - tile * rows) / 2.0,
                };
                Self { tile_width: tile, tile_height: tile, origin }
            }
            Fit::Stretch => Self {
                tile_width: (free_width / columns).max(MIN_TILE),
                tile_height: (free_height / rows).max(MIN_TILE),
                origin: WorldPoint { x: SIDE_MARGIN, y: BOTTOM_MARGIN },
            },
        }
    }

    /// Center of `cell` in world space.
    pub fn world_position(&self, cell: GridCell) -> WorldPoint {
        WorldPoint {
            x: self.origin.x + (cell.col as f32 + 0.5) * self.tile_width,
            y: self.origin.y + (cell.row as f32 + 0.5) * self.tile_height,
        }
    }

    pub fn grid_position(&self, point: WorldPoint, columns: i32, rows: i32) -> GridCell {
        let col = ((point.x - self.origin.x) / self.tile_width).floor() as i32;
        let row = ((point.y - self.origin.y) / self.tile_height).floor() as i32;
        GridCell::new(col.clamp(0, (columns - 1).max(0)), row.clamp(0, (rows - 1).max(0)))
    }
}
