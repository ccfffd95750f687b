use std::path::PathBuf;

use ggez::event::EventHandler;
use ggez::graphics::{Canvas, Color, DrawMode, DrawParam, Mesh, Rect, Text};
use ggez::input::keyboard::{KeyCode, KeyInput};
use ggez::mint::Point2;
use ggez::{Context, GameResult};
use log::{error, info};

use snake_arcade::color::{Rgb, Rgba};
use snake_arcade::render::{self, Surface};
use snake_arcade::settings::{Palette, Speed};
use snake_arcade::{Cell, Game, GameEvent, GameOverReport, Phase, Settings};

const WINDOW_BACKGROUND: Color = Color::new(0.03, 0.04, 0.06, 1.0);
const MENU_ROWS: usize = 3;

fn to_color(rgb: Rgb) -> Color {
    Color::from_rgb(rgb.r, rgb.g, rgb.b)
}

fn to_color_alpha(rgba: Rgba) -> Color {
    let mut color = to_color(rgba.rgb);
    color.a = rgba.alpha;
    color
}

fn game_error(e: snake_arcade::GameError) -> ggez::GameError {
    ggez::GameError::CustomError(e.to_string())
}

/// Identifier the input mapper understands for a physical key.
fn key_name(keycode: KeyCode) -> Option<&'static str> {
    let name = match keycode {
        KeyCode::Up => "arrowup",
        KeyCode::Down => "arrowdown",
        KeyCode::Left => "arrowleft",
        KeyCode::Right => "arrowright",
        KeyCode::W => "w",
        KeyCode::A => "a",
        KeyCode::S => "s",
        KeyCode::D => "d",
        KeyCode::Space => " ",
        _ => return None,
    };
    Some(name)
}

/// ggez-backed drawing surface with the board offset inside the window.
struct CanvasSurface<'a> {
    ctx: &'a Context,
    canvas: &'a mut Canvas,
    origin: Point2<f32>,
}

impl Surface for CanvasSurface<'_> {
    type Error = ggez::GameError;

    fn fill_background(&mut self, side: i32, color: Rgb) -> GameResult {
        let rect = Rect::new(self.origin.x, self.origin.y, side as f32, side as f32);
        let mesh = Mesh::new_rectangle(self.ctx, DrawMode::fill(), rect, to_color(color))?;
        self.canvas.draw(&mesh, DrawParam::default());
        Ok(())
    }

    fn fill_cell(&mut self, cell: Cell, tile: i32, color: Rgb) -> GameResult {
        let rect = Rect::new(
            self.origin.x + cell.x as f32,
            self.origin.y + cell.y as f32,
            tile as f32,
            tile as f32,
        );
        let mesh = Mesh::new_rectangle(self.ctx, DrawMode::fill(), rect, to_color(color))?;
        self.canvas.draw(&mesh, DrawParam::default());
        Ok(())
    }

    fn fill_highlight(&mut self, cell: Cell, tile: i32, radius: f32, color: Rgba) -> GameResult {
        let half = tile as f32 / 2.0;
        let center = Point2 {
            x: self.origin.x + cell.x as f32 + half,
            y: self.origin.y + cell.y as f32 + half,
        };
        let mesh = Mesh::new_circle(
            self.ctx,
            DrawMode::fill(),
            center,
            radius,
            0.1,
            to_color_alpha(color),
        )?;
        self.canvas.draw(&mesh, DrawParam::default());
        Ok(())
    }
}

/// Modal speed/palette picker. While open the game ignores its keys.
struct SettingsMenu {
    open: bool,
    selection: usize,
    speed: Speed,
    palette: Palette,
}

impl SettingsMenu {
    fn new(settings: &Settings) -> Self {
        SettingsMenu {
            open: false,
            selection: 0,
            speed: Speed::from_interval(settings.tick_interval_ms).unwrap_or(Speed::Normal),
            palette: Palette::of(settings).unwrap_or(Palette::Neon),
        }
    }

    fn cycle(&mut self, forward: bool) {
        fn step<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
            let i = all.iter().position(|&v| v == current).unwrap_or(0);
            let n = all.len();
            all[if forward { (i + 1) % n } else { (i + n - 1) % n }]
        }
        match self.selection {
            0 => self.speed = step(&Speed::ALL, self.speed, forward),
            1 => self.palette = step(&Palette::ALL, self.palette, forward),
            _ => {}
        }
    }
}

pub struct App {
    game: Game,
    settings_path: PathBuf,
    score_label: String,
    game_over: Option<GameOverReport>,
    menu: SettingsMenu,
}

impl App {
    pub fn new(game: Game, settings_path: PathBuf) -> Self {
        let menu = SettingsMenu::new(game.settings());
        App {
            score_label: format!("SCORE: {}", game.score()),
            game,
            settings_path,
            game_over: None,
            menu,
        }
    }

    fn handle_events(&mut self) {
        for event in self.game.drain_events() {
            match event {
                GameEvent::ScoreChanged(score) => {
                    self.score_label = format!("SCORE: {}", score);
                }
                GameEvent::GameOver(report) => {
                    match serde_json::to_string(&report) {
                        Ok(json) => info!("final report {}", json),
                        Err(e) => error!("failed to encode report: {}", e),
                    }
                    self.menu.open = false;
                    self.game.set_settings_open(false);
                    self.game_over = Some(report);
                }
                GameEvent::Redraw => {}
            }
        }
    }

    fn apply_menu(&mut self) -> GameResult {
        let settings = self
            .game
            .settings()
            .clone()
            .with_speed(self.menu.speed)
            .with_palette(self.menu.palette);
        self.game.apply_settings(settings).map_err(game_error)?;
        if let Err(e) = self.game.settings().save(&self.settings_path) {
            error!("failed to save settings to {}: {}", self.settings_path.display(), e);
        }
        self.toggle_menu(false);
        Ok(())
    }

    fn toggle_menu(&mut self, open: bool) {
        self.menu.open = open;
        self.menu.selection = 0;
        self.game.set_settings_open(open);
    }

    fn draw_text(canvas: &mut Canvas, text: &str, scale: f32, at: Point2<f32>, color: Color) {
        let mut text = Text::new(text);
        text.set_scale(scale);
        canvas.draw(&text, DrawParam::default().dest(at).color(color));
    }

    fn draw_hud(&self, canvas: &mut Canvas, origin: Point2<f32>) {
        let accent = self.game.settings().accent_color;
        let shadow = to_color(accent.adjust(-50));
        Self::draw_text(
            canvas,
            &self.score_label,
            24.0,
            Point2 { x: origin.x + 12.0, y: origin.y + 10.0 },
            shadow,
        );
        Self::draw_text(
            canvas,
            &self.score_label,
            24.0,
            Point2 { x: origin.x + 10.0, y: origin.y + 8.0 },
            to_color(accent),
        );

        if let Some(left) = self.game.bonus_remaining() {
            Self::draw_text(
                canvas,
                &format!("BONUS {:.1}s", left.as_secs_f32()),
                18.0,
                Point2 { x: origin.x + 10.0, y: origin.y + 38.0 },
                to_color(render::BONUS_FOOD),
            );
        }
    }

    fn draw_game_over(&self, ctx: &Context, canvas: &mut Canvas, origin: Point2<f32>, report: &GameOverReport) -> GameResult {
        let side = self.game.grid().side() as f32;
        let veil = Mesh::new_rectangle(
            ctx,
            DrawMode::fill(),
            Rect::new(origin.x, origin.y, side, side),
            Color::new(0.0, 0.0, 0.0, 0.7),
        )?;
        canvas.draw(&veil, DrawParam::default());

        let accent = to_color(self.game.settings().accent_color);
        let x = origin.x + side / 2.0 - 110.0;
        let y = origin.y + side / 2.0 - 70.0;
        Self::draw_text(canvas, "GAME OVER", 40.0, Point2 { x, y }, accent);
        Self::draw_text(
            canvas,
            &format!("Score: {}", report.score),
            28.0,
            Point2 { x, y: y + 50.0 },
            Color::WHITE,
        );
        Self::draw_text(
            canvas,
            &format!("Ended {}", report.ended_at.format("%H:%M:%S")),
            18.0,
            Point2 { x, y: y + 85.0 },
            Color::new(0.7, 0.7, 0.7, 1.0),
        );
        Self::draw_text(
            canvas,
            "Press SPACE to restart",
            20.0,
            Point2 { x, y: y + 115.0 },
            Color::YELLOW,
        );
        Ok(())
    }

    fn draw_menu(&self, ctx: &Context, canvas: &mut Canvas, origin: Point2<f32>) -> GameResult {
        let side = self.game.grid().side() as f32;
        let accent = self.game.settings().accent_color;
        let panel = Rect::new(origin.x + side / 2.0 - 140.0, origin.y + side / 2.0 - 100.0, 280.0, 200.0);
        let fill = Mesh::new_rectangle(ctx, DrawMode::fill(), panel, Color::new(0.05, 0.07, 0.09, 0.95))?;
        let border = Mesh::new_rectangle(ctx, DrawMode::stroke(2.0), panel, to_color(accent))?;
        canvas.draw(&fill, DrawParam::default());
        canvas.draw(&border, DrawParam::default());

        Self::draw_text(
            canvas,
            "SETTINGS",
            28.0,
            Point2 { x: panel.x + 20.0, y: panel.y + 15.0 },
            to_color(accent),
        );

        let rows = [
            format!("Speed:   < {} >", self.menu.speed.label()),
            format!("Colors:  < {} >", self.menu.palette.label()),
            "Apply & restart".to_string(),
        ];
        for (i, row) in rows.iter().enumerate() {
            let color = if i == self.menu.selection {
                to_color(accent)
            } else {
                to_color(accent.adjust(-120))
            };
            Self::draw_text(
                canvas,
                row,
                22.0,
                Point2 { x: panel.x + 20.0, y: panel.y + 60.0 + i as f32 * 35.0 },
                color,
            );
        }
        Ok(())
    }
}

impl EventHandler for App {
    fn update(&mut self, ctx: &mut Context) -> GameResult {
        let dt = ctx.time.delta();
        self.game.advance(dt).map_err(game_error)?;
        self.handle_events();
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> GameResult {
        let mut canvas = Canvas::from_frame(ctx, WINDOW_BACKGROUND);
        let (width, height) = ctx.gfx.drawable_size();
        let side = self.game.grid().side() as f32;
        let origin = Point2 {
            x: ((width - side) / 2.0).max(0.0).floor(),
            y: ((height - side) / 2.0).max(0.0).floor(),
        };
        canvas.set_screen_coordinates(Rect::new(0.0, 0.0, width, height));

        {
            let mut surface = CanvasSurface {
                ctx: &*ctx,
                canvas: &mut canvas,
                origin,
            };
            render::render(&self.game.scene(), &self.game.colors(), &mut surface)?;
        }
        self.draw_hud(&mut canvas, origin);

        if let (Phase::GameOver, Some(report)) = (self.game.phase(), self.game_over.as_ref()) {
            self.draw_game_over(ctx, &mut canvas, origin, report)?;
        }
        if self.menu.open {
            self.draw_menu(ctx, &mut canvas, origin)?;
        }

        canvas.finish(ctx)?;
        Ok(())
    }

    fn key_down_event(&mut self, ctx: &mut Context, input: KeyInput, _repeat: bool) -> GameResult {
        let Some(keycode) = input.keycode else {
            return Ok(());
        };

        if self.menu.open {
            match keycode {
                KeyCode::Up => {
                    self.menu.selection = self.menu.selection.checked_sub(1).unwrap_or(MENU_ROWS - 1);
                }
                KeyCode::Down => {
                    self.menu.selection = (self.menu.selection + 1) % MENU_ROWS;
                }
                KeyCode::Left => self.menu.cycle(false),
                KeyCode::Right => self.menu.cycle(true),
                KeyCode::Return if self.menu.selection == MENU_ROWS - 1 => self.apply_menu()?,
                KeyCode::Return => self.menu.cycle(true),
                KeyCode::Tab | KeyCode::Escape => self.toggle_menu(false),
                _ => {}
            }
            return Ok(());
        }

        match keycode {
            KeyCode::Escape => ctx.request_quit(),
            KeyCode::Tab => {
                self.menu = SettingsMenu::new(self.game.settings());
                self.toggle_menu(true);
            }
            _ => {
                if let Some(name) = key_name(keycode) {
                    self.game.handle_key(name).map_err(game_error)?;
                    self.handle_events();
                }
            }
        }
        Ok(())
    }

    fn resize_event(&mut self, _ctx: &mut Context, width: f32, height: f32) -> GameResult {
        self.game.resize(width, height).map_err(game_error)?;
        self.handle_events();
        Ok(())
    }
}
