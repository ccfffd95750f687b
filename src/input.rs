use log::debug;

use crate::direction::Direction;
use crate::game::Phase;

/// What a key press asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Restart,
}

impl Command {
    /// Maps a key identifier, case-insensitively. Arrow keys and WASD are
    /// synonyms; space restarts.
    pub fn from_key(key: &str) -> Option<Command> {
        let command = match key.to_ascii_lowercase().as_str() {
            "arrowup" | "up" | "w" => Command::Turn(Direction::Up),
            "arrowdown" | "down" | "s" => Command::Turn(Direction::Down),
            "arrowleft" | "left" | "a" => Command::Turn(Direction::Left),
            "arrowright" | "right" | "d" => Command::Turn(Direction::Right),
            " " | "space" => Command::Restart,
            _ => return None,
        };
        Some(command)
    }
}

/// Single-slot buffer for the next direction. Filled at most once between
/// ticks and drained at the start of the next one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PendingDirection {
    slot: Option<Direction>,
}

impl PendingDirection {
    /// Stores `direction` if the slot is empty.
    pub fn offer(&mut self, direction: Direction) -> bool {
        if self.slot.is_some() {
            return false;
        }
        self.slot = Some(direction);
        true
    }

    pub fn peek(&self) -> Option<Direction> {
        self.slot
    }

    pub fn take(&mut self) -> Option<Direction> {
        self.slot.take()
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    /// The turn was buffered for the next tick.
    Queued(Direction),
    Restart,
    Ignored,
}

/// Turns key presses into buffered direction changes or restart requests.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputMapper {
    pending: PendingDirection,
}

impl InputMapper {
    pub fn handle(
        &mut self,
        key: &str,
        phase: Phase,
        current: Direction,
        settings_open: bool,
    ) -> InputOutcome {
        if settings_open {
            return InputOutcome::Ignored;
        }
        let Some(command) = Command::from_key(key) else {
            return InputOutcome::Ignored;
        };

        match (phase, command) {
            (Phase::GameOver, Command::Restart) => InputOutcome::Restart,
            (Phase::GameOver, _) | (Phase::Running, Command::Restart) => InputOutcome::Ignored,
            (Phase::Running, Command::Turn(direction)) => {
                if direction == current.opposite() {
                    debug!("rejected reversal {:?} -> {:?}", current, direction);
                    return InputOutcome::Ignored;
                }
                if self.pending.offer(direction) {
                    InputOutcome::Queued(direction)
                } else {
                    debug!("dropped {:?}, a turn is already queued this tick", direction);
                    InputOutcome::Ignored
                }
            }
        }
    }

    /// Next direction of travel; drains the buffered turn.
    pub fn next_direction(&mut self, current: Direction) -> Direction {
        self.pending.take().unwrap_or(current)
    }

    pub fn pending(&self) -> Option<Direction> {
        self.pending.peek()
    }

    pub fn reset(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_case_insensitive_synonyms() {
        assert_eq!(Command::from_key("ArrowUp"), Some(Command::Turn(Direction::Up)));
        assert_eq!(Command::from_key("W"), Some(Command::Turn(Direction::Up)));
        assert_eq!(Command::from_key("a"), Some(Command::Turn(Direction::Left)));
        assert_eq!(Command::from_key("ARROWDOWN"), Some(Command::Turn(Direction::Down)));
        assert_eq!(Command::from_key("d"), Some(Command::Turn(Direction::Right)));
        assert_eq!(Command::from_key(" "), Some(Command::Restart));
        assert_eq!(Command::from_key("q"), None);
    }

    #[test]
    fn reversal_is_rejected_for_every_direction() {
        for current in Direction::ALL {
            let mut input = InputMapper::default();
            let key = match current.opposite() {
                Direction::Up => "w",
                Direction::Down => "s",
                Direction::Left => "a",
                Direction::Right => "d",
            };
            assert_eq!(input.handle(key, Phase::Running, current, false), InputOutcome::Ignored);
            assert_eq!(input.next_direction(current), current);
        }
    }

    #[test]
    fn perpendicular_turn_is_accepted() {
        let mut input = InputMapper::default();
        let outcome = input.handle("ArrowUp", Phase::Running, Direction::Right, false);
        assert_eq!(outcome, InputOutcome::Queued(Direction::Up));
        assert_eq!(input.next_direction(Direction::Right), Direction::Up);
        assert_eq!(input.pending(), None);
    }

    #[test]
    fn only_first_turn_per_tick_counts() {
        let mut input = InputMapper::default();
        input.handle("w", Phase::Running, Direction::Right, false);
        assert_eq!(
            input.handle("s", Phase::Running, Direction::Right, false),
            InputOutcome::Ignored
        );
        assert_eq!(input.next_direction(Direction::Right), Direction::Up);
        // The slot is free again after the tick consumed it.
        assert_eq!(
            input.handle("a", Phase::Running, Direction::Up, false),
            InputOutcome::Queued(Direction::Left)
        );
    }

    #[test]
    fn unknown_and_rejected_keys_leave_the_slot_free() {
        let mut input = InputMapper::default();
        input.handle("x", Phase::Running, Direction::Right, false);
        input.handle("a", Phase::Running, Direction::Right, false);
        assert_eq!(
            input.handle("s", Phase::Running, Direction::Right, false),
            InputOutcome::Queued(Direction::Down)
        );
    }

    #[test]
    fn game_over_only_accepts_restart() {
        let mut input = InputMapper::default();
        assert_eq!(input.handle("w", Phase::GameOver, Direction::Right, false), InputOutcome::Ignored);
        assert_eq!(input.handle(" ", Phase::GameOver, Direction::Right, false), InputOutcome::Restart);
        assert_eq!(input.handle(" ", Phase::Running, Direction::Right, false), InputOutcome::Ignored);
    }

    #[test]
    fn open_settings_swallow_everything() {
        let mut input = InputMapper::default();
        assert_eq!(input.handle("w", Phase::Running, Direction::Right, true), InputOutcome::Ignored);
        assert_eq!(input.handle(" ", Phase::GameOver, Direction::Right, true), InputOutcome::Ignored);
        assert_eq!(input.pending(), None);
    }
}
