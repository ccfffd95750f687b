use serde::{Deserialize, Serialize};

use crate::direction::Direction;

/// Edge length of one grid square in pixels.
pub const TILE_SIZE: i32 = 20;
/// Smallest playable board side in pixels.
pub const MIN_SIDE: i32 = 300;

/// A grid square, addressed by the pixel position of its top-left corner.
///
/// Both coordinates are always exact multiples of the tile size and lie in
/// `[0, side)` of the grid that produced them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }
}

/// Square tile grid derived from the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    tile: i32,
    side: i32,
}

impl Grid {
    /// Largest square that fits the viewport, snapped down to whole tiles and
    /// never smaller than `min_side`.
    pub fn from_viewport(width: f32, height: f32, tile: i32, min_side: i32) -> Self {
        let tile = tile.max(1);
        let target = width.min(height).max(0.0) as i32;
        let snapped = (target / tile) * tile;
        let min_side = ((min_side + tile - 1) / tile) * tile;
        Grid {
            tile,
            side: snapped.max(min_side).max(tile),
        }
    }

    /// Grid with `dimension` tiles per side.
    pub fn with_dimension(dimension: i32, tile: i32) -> Self {
        let tile = tile.max(1);
        Grid {
            tile,
            side: dimension.max(1) * tile,
        }
    }

    pub fn tile(&self) -> i32 {
        self.tile
    }

    /// Board side in pixels.
    pub fn side(&self) -> i32 {
        self.side
    }

    /// Number of tiles along each side.
    pub fn dimension(&self) -> i32 {
        self.side / self.tile
    }

    pub fn cell_count(&self) -> usize {
        let d = self.dimension() as usize;
        d * d
    }

    pub fn cell_at(&self, col: i32, row: i32) -> Cell {
        Cell::new(col * self.tile, row * self.tile)
    }

    pub fn index_of(&self, cell: Cell) -> (i32, i32) {
        (cell.x / self.tile, cell.y / self.tile)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.side).contains(&cell.x)
            && (0..self.side).contains(&cell.y)
            && cell.x % self.tile == 0
            && cell.y % self.tile == 0
    }

    /// Tile nearest the middle of the board.
    pub fn center(&self) -> Cell {
        let mid = self.dimension() / 2;
        self.cell_at(mid, mid)
    }

    /// Neighbouring cell one tile away, re-entering from the opposite edge
    /// when the step leaves the board.
    pub fn step(&self, from: Cell, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta(self.tile);
        self.wrap(from.x + dx, from.y + dy)
    }

    pub fn wrap(&self, x: i32, y: i32) -> Cell {
        Cell::new(self.wrap_axis(x), self.wrap_axis(y))
    }

    fn wrap_axis(&self, v: i32) -> i32 {
        if v < 0 {
            self.side - self.tile
        } else if v >= self.side {
            0
        } else {
            v
        }
    }

    /// Every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let d = self.dimension();
        (0..d).flat_map(move |row| (0..d).map(move |col| self.cell_at(col, row)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_snaps_to_whole_tiles() {
        let grid = Grid::from_viewport(1024.0, 768.0, 20, 300);
        assert_eq!(grid.side(), 760);
        assert_eq!(grid.dimension(), 38);
    }

    #[test]
    fn tiny_viewport_uses_minimum_side() {
        let grid = Grid::from_viewport(120.0, 90.0, TILE_SIZE, MIN_SIDE);
        assert_eq!(grid.side(), 300);
        assert_eq!(grid.dimension(), 15);
    }

    #[test]
    fn index_and_pixel_agree() {
        let grid = Grid::with_dimension(20, 20);
        let cell = grid.cell_at(7, 13);
        assert_eq!(cell, Cell::new(140, 260));
        assert_eq!(grid.index_of(cell), (7, 13));
        assert!(grid.contains(cell));
        assert!(!grid.contains(Cell::new(400, 0)));
        assert!(!grid.contains(Cell::new(15, 0)));
    }

    #[test]
    fn stepping_off_any_edge_wraps() {
        let grid = Grid::with_dimension(20, 20);
        assert_eq!(grid.step(Cell::new(380, 200), Direction::Right), Cell::new(0, 200));
        assert_eq!(grid.step(Cell::new(0, 200), Direction::Left), Cell::new(380, 200));
        assert_eq!(grid.step(Cell::new(40, 0), Direction::Up), Cell::new(40, 380));
        assert_eq!(grid.step(Cell::new(40, 380), Direction::Down), Cell::new(40, 0));
    }

    #[test]
    fn every_step_stays_on_the_board() {
        let grid = Grid::with_dimension(15, 20);
        for cell in grid.cells() {
            for dir in Direction::ALL {
                assert!(grid.contains(grid.step(cell, dir)));
            }
        }
    }

    #[test]
    fn cells_cover_the_board_once() {
        let grid = Grid::with_dimension(4, 10);
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells.len(), grid.cell_count());
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[5], Cell::new(10, 10));
    }
}
