use crate::food::FoodKind;

pub const FIRST_THRESHOLD: u32 = 100;
pub const THRESHOLD_STEP: u32 = 100;

/// Running score and the next score that earns a bonus food.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreTracker {
    score: u32,
    threshold: u32,
}

impl Default for ScoreTracker {
    fn default() -> Self {
        ScoreTracker {
            score: 0,
            threshold: FIRST_THRESHOLD,
        }
    }
}

impl ScoreTracker {
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn reset(&mut self) {
        *self = ScoreTracker::default();
    }

    /// Credits one eaten food. Returns `true` when the threshold was reached,
    /// in which case it advances by a single step even if the score has
    /// already passed several steps.
    pub fn award(&mut self, kind: FoodKind) -> bool {
        self.score = self.score.saturating_add(kind.score());
        if self.score >= self.threshold {
            self.threshold += THRESHOLD_STEP;
            true
        } else {
            false
        }
    }
}
