use std::collections::VecDeque;

use crate::direction::Direction;
use crate::geometry::{Cell, Grid};

pub const INITIAL_LENGTH: usize = 3;

/// Result of pushing a new head onto the snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Move {
    Advanced(Cell),
    /// The wrapped head would land on this body cell; the snake is unchanged.
    Collided(Cell),
}

/// Segment sequence, head first. Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    segments: VecDeque<Cell>,
}

// Never empty: every constructor yields at least one segment.
#[allow(clippy::len_without_is_empty)]
impl Snake {
    /// Horizontal line of `INITIAL_LENGTH` tiles with the head on the centre
    /// cell and the tail trailing to the left.
    pub fn centered(grid: &Grid) -> Self {
        let head = grid.center();
        let segments = (0..INITIAL_LENGTH as i32)
            .map(|i| grid.wrap(head.x - i * grid.tile(), head.y))
            .collect();
        Snake { segments }
    }

    /// Builds a snake from explicit segments, head first. Returns `None` for
    /// an empty list.
    pub fn from_segments(segments: impl IntoIterator<Item = Cell>) -> Option<Self> {
        let segments: VecDeque<Cell> = segments.into_iter().collect();
        if segments.is_empty() {
            None
        } else {
            Some(Snake { segments })
        }
    }

    pub fn head(&self) -> Cell {
        self.segments[0]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.segments.contains(&cell)
    }

    pub fn segments(&self) -> impl Iterator<Item = Cell> + '_ {
        self.segments.iter().copied()
    }

    /// Moves the head one tile in `direction`, wrapping at the edges.
    ///
    /// The collision test runs against every current segment, tail included,
    /// because the tail is only dropped once the tick knows nothing was eaten.
    pub fn advance(&mut self, grid: &Grid, direction: Direction) -> Move {
        let head = grid.step(self.head(), direction);
        if self.segments.contains(&head) {
            return Move::Collided(head);
        }
        self.segments.push_front(head);
        Move::Advanced(head)
    }

    /// Drops the last segment unless that would leave the snake empty.
    pub fn trim_tail(&mut self) -> Option<Cell> {
        if self.segments.len() > 1 {
            self.segments.pop_back()
        } else {
            None
        }
    }
}
