use std::path::PathBuf;

use clap::Parser;
use ggez::event;
use ggez::GameResult;
use log::info;

use snake_arcade::{Game, Settings};

mod app;

#[derive(Parser, Debug)]
#[command(name = "snake_arcade", about = "Wrap-around Snake with timed bonus food")]
struct Cli {
    /// JSON file holding speed and colours
    #[arg(long, default_value = "snake_settings.json")]
    settings: PathBuf,

    /// Tick interval in milliseconds, overrides the settings file
    #[arg(long)]
    speed: Option<u64>,

    #[arg(long, default_value_t = 600.0)]
    width: f32,

    #[arg(long, default_value_t = 600.0)]
    height: f32,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> GameResult {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut settings = Settings::load_or_default(&cli.settings);
    if let Some(ms) = cli.speed {
        settings.tick_interval_ms = ms;
    }

    let game = match cli.seed {
        Some(seed) => Game::with_seed(cli.width, cli.height, settings, seed),
        None => Game::new(cli.width, cli.height, settings),
    }
    .map_err(|e| ggez::GameError::CustomError(e.to_string()))?;
    info!("starting on a {0}x{0} board", game.grid().dimension());

    let window_setup = ggez::conf::WindowSetup::default()
        .title("Snake")
        .vsync(true);
    let window_mode = ggez::conf::WindowMode::default()
        .dimensions(cli.width, cli.height)
        .resizable(true);

    let (ctx, event_loop) = ggez::ContextBuilder::new("snake_arcade", "snake_arcade")
        .window_setup(window_setup)
        .window_mode(window_mode)
        .build()?;

    let app = app::App::new(game, cli.settings);
    event::run(ctx, event_loop, app)
}
