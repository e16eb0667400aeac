//! Homebound - Entry Point
//!
//! Initializes the terminal, wires the front-end to the simulation
//! core, and runs the input loop.

use std::fs::OpenOptions;
use std::io;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use homebound::data::LevelTable;
use homebound::game::Game;
use homebound::grid::Bounds;
use homebound::ui::App;

const GRID_WIDTH: i32 = 14;
const GRID_HEIGHT: i32 = 14;

fn main() -> Result<()> {
    // Log to a file so output never interferes with the TUI
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("homebound.log")
        .unwrap_or_else(|_| OpenOptions::new().write(true).open("/dev/null").unwrap());

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    log::info!("Starting Homebound v{}", env!("CARGO_PKG_VERSION"));

    let levels = LevelTable::load();
    let mut game = Game::new(Bounds::new(GRID_WIDTH, GRID_HEIGHT), levels)?;
    let mut app = App::new();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app, &mut game);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        log::error!("Exited with error: {}", e);
        eprintln!("Error: {}", e);
    }

    log::info!("Homebound shut down cleanly");
    result
}

/// Blocking input loop; the game is turn-driven, so one redraw per event
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    game: &mut Game,
) -> Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame, game))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && app.handle_input(key, game)? {
                break;
            }
        }
    }
    Ok(())
}
