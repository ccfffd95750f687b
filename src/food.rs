use std::time::Duration;

use log::{debug, warn};
use rand::seq::IteratorRandom;
use rand::Rng;

use crate::error::{GameError, Result};
use crate::geometry::{Cell, Grid};
use crate::timer::{Countdown, Millis};

pub const NORMAL_FOOD_SCORE: u32 = 10;
pub const BONUS_FOOD_SCORE: u32 = 20;
pub const BONUS_DURATION: Duration = Duration::from_millis(5_000);
/// Random draws before falling back to scanning every free cell.
pub const MAX_RANDOM_ATTEMPTS: usize = 1_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FoodKind {
    Normal,
    Bonus,
}

impl FoodKind {
    pub fn score(self) -> u32 {
        match self {
            FoodKind::Normal => NORMAL_FOOD_SCORE,
            FoodKind::Bonus => BONUS_FOOD_SCORE,
        }
    }
}

/// Picks free cells for food and owns the bonus food with its expiry
/// countdown.
#[derive(Debug)]
pub struct FoodSpawner<R> {
    rng: R,
    bonus: Option<Cell>,
    bonus_timer: Countdown,
    bonus_duration: Duration,
}

impl<R: Rng> FoodSpawner<R> {
    pub fn new(rng: R) -> Self {
        FoodSpawner {
            rng,
            bonus: None,
            bonus_timer: Countdown::idle(),
            bonus_duration: BONUS_DURATION,
        }
    }

    pub fn with_bonus_duration(mut self, duration: Duration) -> Self {
        self.bonus_duration = duration;
        self
    }

    /// Uniformly random cell for which `occupied` is false.
    ///
    /// Sampling is bounded; on a crowded board the remaining free cells are
    /// enumerated instead. Errors only when no free cell exists at all.
    pub fn place_food(&mut self, grid: &Grid, occupied: impl Fn(Cell) -> bool) -> Result<Cell> {
        let dim = grid.dimension();
        for _ in 0..MAX_RANDOM_ATTEMPTS {
            let cell = grid.cell_at(self.rng.gen_range(0..dim), self.rng.gen_range(0..dim));
            if !occupied(cell) {
                return Ok(cell);
            }
        }

        warn!(
            "food sampling missed {} times on a {}x{} grid, scanning free cells",
            MAX_RANDOM_ATTEMPTS, dim, dim
        );
        grid.cells()
            .filter(|&cell| !occupied(cell))
            .choose(&mut self.rng)
            .ok_or(GameError::GridFull(dim))
    }

    pub fn bonus(&self) -> Option<Cell> {
        self.bonus
    }

    pub fn bonus_timer(&self) -> &Countdown {
        &self.bonus_timer
    }

    /// Places bonus food and (re)arms its expiry. Any countdown still pending
    /// from an earlier bonus is cancelled first.
    pub fn spawn_bonus(
        &mut self,
        grid: &Grid,
        now: Millis,
        occupied: impl Fn(Cell) -> bool,
    ) -> Result<Cell> {
        self.bonus_timer.cancel();
        let current = self.bonus;
        let cell = self.place_food(grid, |c| occupied(c) || Some(c) == current)?;
        self.bonus = Some(cell);
        self.bonus_timer.start(now, self.bonus_duration);
        Ok(cell)
    }

    /// Removes the bonus food and cancels its countdown. Returns the cell that
    /// was cleared, if any.
    pub fn clear_bonus(&mut self) -> Option<Cell> {
        self.bonus_timer.cancel();
        self.bonus.take()
    }

    /// Clears the bonus food when its countdown has run out. Returns `true`
    /// exactly once per expiry.
    pub fn poll_bonus_expiry(&mut self, now: Millis) -> bool {
        if !self.bonus_timer.poll(now) {
            return false;
        }
        if let Some(cell) = self.bonus.take() {
            debug!("bonus food at ({}, {}) expired", cell.x, cell.y);
        }
        true
    }
}
