//! BLOCKFALL - a minimal falling-block puzzle game for the terminal

mod board;
mod collision;
mod game;
mod input;
mod piece;
mod randomizer;
mod score;
mod settings;
mod tetromino;
mod ui;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use game::{Action, Game};
use input::InputHandler;
use ratatui::{backend::CrosstermBackend, Terminal};
use settings::Settings;
use std::{
    io::{self, stdout},
    path::PathBuf,
    time::{Duration, Instant},
};
use tracing_subscriber::EnvFilter;

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// Get the blockfall temp directory, creating it if needed
fn blockfall_temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join("blockfall");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    let session_id: u32 = rand::random();

    // Log to a file so the terminal UI stays clean
    let log_dir = blockfall_temp_dir();
    let log_file = format!("{:08x}.log", session_id);
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("blockfall=debug")),
        )
        .with_ansi(false)
        .init();

    tracing::info!(
        "BLOCKFALL starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let settings = Settings::load();
    let input = InputHandler::from_settings(&settings);
    let mut game = Game::new().with_gravity_interval(settings.gameplay.gravity_interval());

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut game, &input, &settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    if let Err(e) = &result {
        tracing::error!("Terminal error: {}", e);
    }
    tracing::info!(
        points = game.score.points,
        lines = game.score.lines,
        "BLOCKFALL shutting down"
    );

    println!("\nThanks for playing BLOCKFALL!");
    println!("Final Score: {}", game.score.points);
    println!("Lines: {} | Pieces: {}", game.score.lines, game.score.pieces);

    result
}

/// Frame loop: gravity, render, then wait out the frame for input
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &mut Game,
    input: &InputHandler,
    settings: &Settings,
) -> io::Result<()> {
    let mut last_frame = Instant::now();

    loop {
        let now = Instant::now();
        game.update(now.duration_since(last_frame));
        last_frame = now;

        terminal.draw(|frame| ui::render_game(frame, game, settings))?;

        if game.is_game_over() {
            return wait_after_game_over(input, settings.gameplay.game_over_delay());
        }

        // Block until the frame is used up or a key arrives, then take
        // everything already queued in arrival order
        if event::poll(FRAME_DURATION.saturating_sub(now.elapsed()))? {
            loop {
                handle_event(game, input, event::read()?);
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        if game.quit_requested() {
            return Ok(());
        }
    }
}

/// Feed one terminal event to the game
fn handle_event(game: &mut Game, input: &InputHandler, event: Event) {
    if let Event::Key(key) = event {
        if let Some(action) = input.key_down(key) {
            game.process_action(action);
        }
    }
}

/// Keep the game over screen up for `delay`, or until the player quits
fn wait_after_game_over(input: &InputHandler, delay: Duration) -> io::Result<()> {
    let deadline = Instant::now() + delay;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() || !event::poll(remaining)? {
            return Ok(());
        }
        if let Event::Key(key) = event::read()? {
            if input.key_down(key) == Some(Action::Quit) {
                return Ok(());
            }
        }
    }
}
