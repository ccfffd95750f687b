use std::time::Duration;

use chrono::{DateTime, Local};
use log::{debug, info, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::direction::Direction;
use crate::error::{GameError, Result};
use crate::food::{FoodKind, FoodSpawner};
use crate::geometry::{Cell, Grid, MIN_SIDE, TILE_SIZE};
use crate::input::{InputMapper, InputOutcome};
use crate::render::{Colors, Scene};
use crate::score::ScoreTracker;
use crate::settings::Settings;
use crate::snake::{Move, Snake};
use crate::timer::{Millis, TickClock};

#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize)]
pub enum Phase {
    Running,
    GameOver,
}

/// Summary handed out once when a game ends.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameOverReport {
    pub score: u32,
    pub length: usize,
    pub ticks: u64,
    pub ended_at: DateTime<Local>,
}

/// Notifications for the front-end, drained with [`Game::drain_events`].
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    ScoreChanged(u32),
    GameOver(GameOverReport),
    Redraw,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game is over; nothing moved.
    Halted,
    Moved,
    Ate(FoodKind),
    Collided,
    /// Normal food was eaten with no free cell left for the next one.
    BoardFull,
}

/// Occupancy test shared by every food placement.
fn occupied_by(snake: &Snake, food: Option<Cell>, bonus: Option<Cell>) -> impl Fn(Cell) -> bool + '_ {
    move |cell| snake.contains(cell) || food == Some(cell) || bonus == Some(cell)
}

/// Owns the whole game state and advances it one tick at a time.
pub struct Game<R = StdRng> {
    grid: Grid,
    settings: Settings,
    snake: Snake,
    direction: Direction,
    food: Cell,
    spawner: FoodSpawner<R>,
    score: ScoreTracker,
    phase: Phase,
    input: InputMapper,
    settings_open: bool,
    clock: TickClock,
    now: Millis,
    carry: Duration,
    ticks: u64,
    events: Vec<GameEvent>,
}

impl Game<StdRng> {
    pub fn new(width: f32, height: f32, settings: Settings) -> Result<Self> {
        Self::with_rng(width, height, settings, StdRng::from_entropy())
    }

    pub fn with_seed(width: f32, height: f32, settings: Settings, seed: u64) -> Result<Self> {
        Self::with_rng(width, height, settings, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    pub fn with_rng(width: f32, height: f32, settings: Settings, rng: R) -> Result<Self> {
        settings.validate()?;
        let grid = Grid::from_viewport(width, height, TILE_SIZE, MIN_SIDE);
        let snake = Snake::centered(&grid);
        let mut game = Game {
            grid,
            clock: TickClock::new(settings.tick_interval()),
            settings,
            food: snake.head(),
            snake,
            direction: Direction::Right,
            spawner: FoodSpawner::new(rng),
            score: ScoreTracker::default(),
            phase: Phase::Running,
            input: InputMapper::default(),
            settings_open: false,
            now: 0,
            carry: Duration::ZERO,
            ticks: 0,
            events: Vec::new(),
        };
        game.reinitialize()?;
        Ok(game)
    }

    /// Resets every piece of per-game state on the current grid. Pending
    /// timers are cancelled before new ones are armed.
    fn reinitialize(&mut self) -> Result<()> {
        self.clock.stop();
        self.spawner.clear_bonus();
        self.input.reset();

        self.snake = Snake::centered(&self.grid);
        self.direction = Direction::Right;
        self.score.reset();
        self.phase = Phase::Running;
        self.ticks = 0;
        self.food = self
            .spawner
            .place_food(&self.grid, occupied_by(&self.snake, None, None))?;

        self.clock.restart(self.now, self.settings.tick_interval());
        info!(
            "new game on a {0}x{0} grid, ticking every {1} ms",
            self.grid.dimension(),
            self.settings.tick_interval_ms
        );
        self.events.push(GameEvent::ScoreChanged(0));
        self.events.push(GameEvent::Redraw);
        Ok(())
    }

    pub fn restart(&mut self) -> Result<()> {
        self.reinitialize()
    }

    /// Recomputes the grid for a new viewport and starts over.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<()> {
        self.grid = Grid::from_viewport(width, height, TILE_SIZE, MIN_SIDE);
        debug!("viewport {}x{} -> board side {}", width, height, self.grid.side());
        self.reinitialize()
    }

    /// Replaces speed and colours together, then starts over. Invalid
    /// settings are rejected and leave the game untouched.
    pub fn apply_settings(&mut self, settings: Settings) -> Result<()> {
        settings.validate()?;
        info!(
            "applying settings: {} ms, accent {}, body {}, food {}",
            settings.tick_interval_ms, settings.accent_color, settings.body_color, settings.food_color
        );
        self.settings = settings;
        self.reinitialize()
    }

    pub fn set_settings_open(&mut self, open: bool) {
        self.settings_open = open;
    }

    /// Feeds one key identifier through the input mapper. A restart request
    /// is carried out immediately.
    pub fn handle_key(&mut self, key: &str) -> Result<InputOutcome> {
        let outcome = self
            .input
            .handle(key, self.phase, self.direction, self.settings_open);
        if outcome == InputOutcome::Restart {
            self.restart()?;
        }
        Ok(outcome)
    }

    /// Advances the game by one step.
    pub fn tick(&mut self) -> Result<TickOutcome> {
        if self.phase == Phase::GameOver {
            return Ok(TickOutcome::Halted);
        }
        self.ticks += 1;
        self.direction = self.input.next_direction(self.direction);

        let head = match self.snake.advance(&self.grid, self.direction) {
            Move::Advanced(head) => head,
            Move::Collided(cell) => {
                debug!("head ran into its body at ({}, {})", cell.x, cell.y);
                self.end_game();
                return Ok(TickOutcome::Collided);
            }
        };
        trace!("tick {} head ({}, {}) {:?}", self.ticks, head.x, head.y, self.direction);

        let eaten = if self.spawner.bonus() == Some(head) {
            self.spawner.clear_bonus();
            Some(FoodKind::Bonus)
        } else if head == self.food {
            let next = self.spawner.place_food(
                &self.grid,
                occupied_by(&self.snake, Some(self.food), self.spawner.bonus()),
            );
            match next {
                Ok(cell) => self.food = cell,
                Err(GameError::GridFull(_)) => return Ok(self.fill_board()),
                Err(e) => return Err(e),
            }
            Some(FoodKind::Normal)
        } else {
            None
        };

        let outcome = match eaten {
            Some(kind) => {
                if self.score.award(kind) {
                    let bonus = self.spawner.spawn_bonus(
                        &self.grid,
                        self.now,
                        occupied_by(&self.snake, Some(self.food), None),
                    );
                    match bonus {
                        Ok(bonus) => info!(
                            "score {} reached, bonus food at ({}, {}), next at {}",
                            self.score.score(),
                            bonus.x,
                            bonus.y,
                            self.score.threshold()
                        ),
                        Err(GameError::GridFull(_)) => {
                            warn!("score {} reached, no room for bonus food", self.score.score())
                        }
                        Err(e) => return Err(e),
                    }
                }
                self.events.push(GameEvent::ScoreChanged(self.score.score()));
                TickOutcome::Ate(kind)
            }
            None => {
                self.snake.trim_tail();
                TickOutcome::Moved
            }
        };
        self.events.push(GameEvent::Redraw);
        Ok(outcome)
    }

    /// Scores the food under the head and ends the game: there is nowhere
    /// left to put the next one.
    fn fill_board(&mut self) -> TickOutcome {
        self.score.award(FoodKind::Normal);
        self.events.push(GameEvent::ScoreChanged(self.score.score()));
        info!("no free cell left for food at length {}", self.snake.len());
        self.end_game();
        TickOutcome::BoardFull
    }

    fn end_game(&mut self) {
        self.phase = Phase::GameOver;
        self.clock.stop();
        let report = GameOverReport {
            score: self.score.score(),
            length: self.snake.len(),
            ticks: self.ticks,
            ended_at: Local::now(),
        };
        info!("game over: score {} after {} ticks", report.score, report.ticks);
        self.events.push(GameEvent::GameOver(report));
    }

    /// Moves the game clock forward, running due ticks and bonus expiries in
    /// chronological order. An expiry due at the same instant as a tick runs
    /// first.
    ///
    /// At most one tick runs per call. Ticks missed during a long frame are
    /// dropped and the cadence resumes on its original phase.
    pub fn advance(&mut self, elapsed: Duration) -> Result<()> {
        let total = self.carry + elapsed;
        let whole = total.as_millis() as Millis;
        self.carry = total - Duration::from_millis(whole);
        let target = self.now + whole;

        loop {
            let tick_at = self.clock.next_at().filter(|&at| at <= target);
            let expiry_at = self.spawner.bonus_timer().deadline().filter(|&at| at <= target);
            match (tick_at, expiry_at) {
                (None, None) => break,
                (Some(t), Some(e)) if e <= t => self.expire_bonus(e),
                (None, Some(e)) => self.expire_bonus(e),
                (Some(t), _) => {
                    self.clock.take_due(t);
                    self.now = t;
                    self.tick()?;
                    let dropped = self.clock.skip_missed(target);
                    if dropped > 0 {
                        debug!("frame of {} ms overran, skipped {} ticks", whole, dropped);
                    }
                }
            }
        }
        self.now = target;
        Ok(())
    }

    fn expire_bonus(&mut self, at: Millis) {
        self.now = at;
        if self.spawner.poll_bonus_expiry(at) {
            self.events.push(GameEvent::Redraw);
        }
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn bonus_food(&self) -> Option<Cell> {
        self.spawner.bonus()
    }

    /// Time left before the bonus food disappears.
    pub fn bonus_remaining(&self) -> Option<Duration> {
        self.spawner.bonus_timer().remaining(self.now)
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    pub fn threshold(&self) -> u32 {
        self.score.threshold()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn scene(&self) -> Scene<'_> {
        Scene {
            side: self.grid.side(),
            tile: self.grid.tile(),
            snake: &self.snake,
            food: self.food,
            bonus: self.spawner.bonus(),
        }
    }

    pub fn colors(&self) -> Colors {
        Colors::from(&self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;
    use crate::food::BONUS_DURATION;

    fn cells(list: &[(i32, i32)]) -> Snake {
        Snake::from_segments(list.iter().map(|&(x, y)| Cell::new(x, y))).unwrap()
    }

    fn game() -> Game {
        Game::with_seed(400.0, 400.0, Settings::default(), 11).unwrap()
    }

    /// Ticks never come from the clock, only from explicit `tick()` calls.
    fn manual_game() -> Game {
        let settings = Settings {
            tick_interval_ms: 3_600_000,
            ..Settings::default()
        };
        Game::with_seed(400.0, 400.0, settings, 5).unwrap()
    }

    /// Feeds the clock in 1 ms frames.
    fn run_for(game: &mut Game, ms: u64) {
        for _ in 0..ms {
            game.advance(Duration::from_millis(1)).unwrap();
        }
    }

    /// Puts the normal food right in front of the head and ticks once.
    fn eat_next(game: &mut Game) -> TickOutcome {
        game.food = game.grid.step(game.snake.head(), game.direction);
        if game.spawner.bonus() == Some(game.food) {
            game.spawner.clear_bonus();
        }
        game.tick().unwrap()
    }

    #[test]
    fn starts_in_the_middle_heading_right() {
        let mut g = game();
        assert_eq!(g.grid().dimension(), 20);
        assert_eq!(g.snake().head(), Cell::new(200, 200));
        assert_eq!(g.snake().len(), 3);
        assert_eq!(g.direction(), Direction::Right);
        assert_eq!(g.score(), 0);
        assert_eq!(g.threshold(), 100);
        assert_eq!(g.phase(), Phase::Running);
        assert!(!g.snake().contains(g.food()));
        assert_eq!(g.drain_events(), vec![GameEvent::ScoreChanged(0), GameEvent::Redraw]);
    }

    #[test]
    fn eating_food_in_front_grows_and_scores() {
        let mut g = game();
        g.snake = cells(&[(200, 200), (180, 200), (160, 200)]);
        g.food = Cell::new(220, 200);
        g.drain_events();

        assert_eq!(g.tick().unwrap(), TickOutcome::Ate(FoodKind::Normal));
        assert_eq!(g.snake().head(), Cell::new(220, 200));
        assert_eq!(g.score(), 10);
        assert_eq!(g.snake().len(), 4);
        assert_ne!(g.food(), Cell::new(220, 200));
        assert!(!g.snake().contains(g.food()));
        assert_eq!(g.drain_events(), vec![GameEvent::ScoreChanged(10), GameEvent::Redraw]);
    }

    #[test]
    fn plain_move_keeps_length() {
        let mut g = game();
        g.food = Cell::new(0, 0);
        assert_eq!(g.tick().unwrap(), TickOutcome::Moved);
        assert_eq!(g.snake().len(), 3);
        assert_eq!(g.snake().head(), Cell::new(220, 200));
    }

    #[test]
    fn head_wraps_past_the_right_edge() {
        let mut g = game();
        g.snake = cells(&[(380, 40), (360, 40), (340, 40)]);
        g.food = Cell::new(0, 0);
        g.tick().unwrap();
        assert_eq!(g.snake().head(), Cell::new(0, 40));
    }

    #[test]
    fn turning_into_the_body_ends_the_game_once() {
        let mut g = game();
        g.snake = cells(&[(100, 100), (80, 100), (80, 120), (100, 120), (120, 120)]);
        g.food = Cell::new(0, 0);
        g.drain_events();

        g.handle_key("s").unwrap();
        assert_eq!(g.tick().unwrap(), TickOutcome::Collided);
        assert_eq!(g.phase(), Phase::GameOver);

        let events = g.drain_events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            GameEvent::GameOver(report) => {
                assert_eq!(report.score, 0);
                assert_eq!(report.length, 5);
            }
            other => panic!("unexpected event {other:?}"),
        }

        assert_eq!(g.tick().unwrap(), TickOutcome::Halted);
        let head = g.snake().head();
        g.advance(Duration::from_secs(10)).unwrap();
        assert_eq!(g.snake().head(), head);
        assert!(g.drain_events().is_empty());
    }

    #[test]
    fn reversal_key_does_not_change_course() {
        let mut g = game();
        g.food = Cell::new(0, 0);
        assert_eq!(g.handle_key("ArrowLeft").unwrap(), InputOutcome::Ignored);
        g.tick().unwrap();
        assert_eq!(g.direction(), Direction::Right);
        assert_eq!(g.phase(), Phase::Running);
    }

    #[test]
    fn second_turn_in_a_tick_is_dropped() {
        let mut g = game();
        g.food = Cell::new(0, 0);
        assert_eq!(g.handle_key("w").unwrap(), InputOutcome::Queued(Direction::Up));
        assert_eq!(g.handle_key("s").unwrap(), InputOutcome::Ignored);
        g.tick().unwrap();
        assert_eq!(g.snake().head(), Cell::new(200, 180));
        assert_eq!(g.handle_key("a").unwrap(), InputOutcome::Queued(Direction::Left));
    }

    #[test]
    fn settings_overlay_blocks_input() {
        let mut g = game();
        g.set_settings_open(true);
        assert_eq!(g.handle_key("w").unwrap(), InputOutcome::Ignored);
        g.set_settings_open(false);
        assert_eq!(g.handle_key("w").unwrap(), InputOutcome::Queued(Direction::Up));
    }

    #[test]
    fn reaching_one_hundred_spawns_bonus_food() {
        let mut g = manual_game();
        for _ in 0..9 {
            eat_next(&mut g);
            assert_eq!(g.bonus_food(), None);
        }
        assert_eq!(g.threshold(), 100);
        assert_eq!(eat_next(&mut g), TickOutcome::Ate(FoodKind::Normal));
        assert_eq!(g.score(), 100);
        assert_eq!(g.threshold(), 200);

        let bonus = g.bonus_food().expect("bonus food after 100 points");
        assert!(!g.snake().contains(bonus));
        assert_ne!(bonus, g.food());
        assert_eq!(g.bonus_remaining(), Some(BONUS_DURATION));
    }

    #[test]
    fn bonus_food_is_worth_twenty() {
        let mut g = manual_game();
        for _ in 0..10 {
            eat_next(&mut g);
        }
        let bonus = g.bonus_food().unwrap();
        let tile = g.grid.tile();
        g.snake = Snake::from_segments(
            (1..=3).map(|i| g.grid.wrap(bonus.x - i * tile, bonus.y)),
        )
        .unwrap();
        g.direction = Direction::Right;
        g.food = g.grid.wrap(bonus.x, bonus.y + 2 * tile);
        g.drain_events();

        assert_eq!(g.tick().unwrap(), TickOutcome::Ate(FoodKind::Bonus));
        assert_eq!(g.score(), 120);
        assert_eq!(g.snake().len(), 4);
        assert_eq!(g.bonus_food(), None);
        assert!(!g.spawner.bonus_timer().is_pending());
        assert_eq!(g.drain_events(), vec![GameEvent::ScoreChanged(120), GameEvent::Redraw]);
    }

    #[test]
    fn unclaimed_bonus_expires_after_five_seconds() {
        let mut g = manual_game();
        for _ in 0..10 {
            eat_next(&mut g);
        }
        assert!(g.bonus_food().is_some());
        g.drain_events();

        g.advance(Duration::from_millis(4_999)).unwrap();
        assert!(g.bonus_food().is_some());
        assert!(g.drain_events().is_empty());

        g.advance(Duration::from_millis(1)).unwrap();
        assert_eq!(g.bonus_food(), None);
        assert_eq!(g.drain_events(), vec![GameEvent::Redraw]);
    }

    #[test]
    fn restart_cancels_a_pending_bonus_expiry() {
        let mut g = manual_game();
        for _ in 0..10 {
            eat_next(&mut g);
        }
        g.advance(Duration::from_millis(3_000)).unwrap();
        g.restart().unwrap();
        assert_eq!(g.bonus_food(), None);
        assert!(!g.spawner.bonus_timer().is_pending());

        // A fresh bonus armed at t=3000 must survive the old t=5000 deadline.
        for _ in 0..10 {
            eat_next(&mut g);
        }
        let bonus = g.bonus_food().unwrap();
        g.advance(Duration::from_millis(2_500)).unwrap();
        assert_eq!(g.bonus_food(), Some(bonus));
        g.advance(Duration::from_millis(2_500)).unwrap();
        assert_eq!(g.bonus_food(), None);
    }

    #[test]
    fn space_restarts_only_after_game_over() {
        let mut g = game();
        g.food = Cell::new(0, 0);
        g.tick().unwrap();
        assert_eq!(g.handle_key(" ").unwrap(), InputOutcome::Ignored);
        assert_eq!(g.ticks(), 1);

        g.snake = cells(&[(100, 100), (80, 100), (80, 120), (100, 120), (120, 120)]);
        g.handle_key("s").unwrap();
        g.tick().unwrap();
        assert_eq!(g.phase(), Phase::GameOver);

        assert_eq!(g.handle_key("w").unwrap(), InputOutcome::Ignored);
        assert_eq!(g.handle_key(" ").unwrap(), InputOutcome::Restart);
        assert_eq!(g.phase(), Phase::Running);
        assert_eq!(g.snake().len(), 3);
        assert_eq!(g.ticks(), 0);
    }

    #[test]
    fn clock_drives_ticks_at_the_configured_interval() {
        let mut g = game();
        g.food = Cell::new(0, 0);
        run_for(&mut g, 449);
        assert_eq!(g.ticks(), 2);
        run_for(&mut g, 1);
        assert_eq!(g.ticks(), 3);
    }

    #[test]
    fn a_stalled_frame_runs_at_most_one_tick() {
        let mut g = game();
        g.food = Cell::new(0, 0);
        g.handle_key("s").unwrap();
        g.advance(Duration::from_secs(3)).unwrap();
        assert_eq!(g.ticks(), 1);
        assert_eq!(g.snake().head(), Cell::new(200, 220));

        // Missed ticks are gone; the next one lands on the old cadence.
        run_for(&mut g, 149);
        assert_eq!(g.ticks(), 1);
        run_for(&mut g, 1);
        assert_eq!(g.ticks(), 2);
    }

    #[test]
    fn a_stalled_frame_still_expires_the_bonus() {
        let mut g = manual_game();
        for _ in 0..10 {
            eat_next(&mut g);
        }
        assert!(g.bonus_food().is_some());
        g.advance(Duration::from_secs(60)).unwrap();
        assert_eq!(g.bonus_food(), None);
    }

    #[test]
    fn eating_the_last_free_cell_ends_the_game() {
        let mut g = Game::with_seed(300.0, 300.0, Settings::default(), 8).unwrap();
        let mut all: Vec<Cell> = g.grid.cells().collect();
        let last = all.pop().unwrap();
        all.reverse();
        g.snake = Snake::from_segments(all).unwrap();
        g.direction = Direction::Right;
        g.food = last;
        g.drain_events();

        assert_eq!(g.tick().unwrap(), TickOutcome::BoardFull);
        assert_eq!(g.phase(), Phase::GameOver);
        assert_eq!(g.score(), 10);
        assert_eq!(g.snake().len(), g.grid().cell_count());
        assert_eq!(g.snake().head(), last);

        let events = g.drain_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], GameEvent::ScoreChanged(10));
        match &events[1] {
            GameEvent::GameOver(report) => {
                assert_eq!(report.score, 10);
                assert_eq!(report.length, 225);
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(g.tick().unwrap(), TickOutcome::Halted);
        assert_eq!(g.handle_key(" ").unwrap(), InputOutcome::Restart);
        assert_eq!(g.snake().len(), 3);
    }

    #[test]
    fn no_room_for_the_bonus_keeps_the_game_running() {
        let mut g = Game::with_seed(300.0, 300.0, Settings::default(), 8).unwrap();
        for _ in 0..4 {
            g.score.award(FoodKind::Bonus);
        }
        g.score.award(FoodKind::Normal);
        // 90 points: the next normal food crosses 100.
        let mut all: Vec<Cell> = g.grid.cells().collect();
        let spare = all.pop().unwrap();
        let last = all.pop().unwrap();
        all.reverse();
        g.snake = Snake::from_segments(all).unwrap();
        g.direction = Direction::Right;
        g.food = last;

        assert_eq!(g.tick().unwrap(), TickOutcome::Ate(FoodKind::Normal));
        assert_eq!(g.score(), 100);
        assert_eq!(g.threshold(), 200);
        assert_eq!(g.food(), spare);
        assert_eq!(g.bonus_food(), None);
        assert_eq!(g.phase(), Phase::Running);
    }

    #[test]
    fn fractional_frames_accumulate() {
        let mut g = game();
        g.food = Cell::new(0, 0);
        let frame = Duration::from_micros(16_667);
        for _ in 0..9 {
            g.advance(frame).unwrap();
        }
        // 150.003 ms elapsed.
        assert_eq!(g.ticks(), 1);
    }

    #[test]
    fn resize_rebuilds_the_grid_and_restarts() {
        let mut g = game();
        g.tick().unwrap();
        g.resize(1024.0, 768.0).unwrap();
        assert_eq!(g.grid().side(), 760);
        assert_eq!(g.snake().head(), Cell::new(380, 380));
        assert_eq!(g.score(), 0);
        assert_eq!(g.ticks(), 0);
    }

    #[test]
    fn applied_settings_change_speed_and_colors() {
        let mut g = game();
        let settings = Settings::default()
            .with_speed(crate::settings::Speed::Fast)
            .with_palette(crate::settings::Palette::Ember);
        g.apply_settings(settings.clone()).unwrap();
        assert_eq!(g.settings(), &settings);
        assert_eq!(g.colors().accent, settings.accent_color);

        g.food = Cell::new(0, 0);
        run_for(&mut g, 300);
        assert_eq!(g.ticks(), 3);
    }

    #[test]
    fn invalid_settings_are_rejected_without_restart() {
        let mut g = game();
        g.food = Cell::new(0, 0);
        g.tick().unwrap();
        let bad = Settings {
            tick_interval_ms: 0,
            ..Settings::default()
        };
        assert!(matches!(g.apply_settings(bad), Err(GameError::InvalidSettings(_))));
        assert_eq!(g.ticks(), 1);
        assert_eq!(g.settings(), &Settings::default());
    }
}
