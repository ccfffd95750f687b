use serde::{Deserialize, Serialize};

#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Pixel offset of one step when tiles are `tile` pixels wide.
    pub fn delta(self, tile: i32) -> (i32, i32) {
        match self {
            Direction::Up => (0, -tile),
            Direction::Down => (0, tile),
            Direction::Left => (-tile, 0),
            Direction::Right => (tile, 0),
        }
    }
}
