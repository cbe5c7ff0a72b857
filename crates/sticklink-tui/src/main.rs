mod animations;
mod app;
mod presets;
mod render;
mod theme;

use app::{App, AppAction};
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use sticklink_core::{Difficulty, Grid, Session};

/// Connect every target point into one component by placing sticks
/// between adjacent grid points.
#[derive(Parser)]
#[command(name = "sticklink", version, about)]
struct Args {
    /// Difficulty to start with
    #[arg(short, long, value_enum, default_value = "easy")]
    difficulty: ArgDifficulty,

    /// 1-based puzzle number within the difficulty
    #[arg(short, long, default_value_t = 1)]
    preset: usize,

    /// Points per side of the grid
    #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(u8).range(2..=11))]
    grid_size: u8,

    /// Path to a puzzle data file (JSON)
    #[arg(long)]
    presets: Option<PathBuf>,

    /// Color theme
    #[arg(long, value_enum, default_value = "dark")]
    theme: ArgTheme,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ArgDifficulty {
    Easy,
    Medium,
    Hard,
    Free,
}

impl From<ArgDifficulty> for Difficulty {
    fn from(d: ArgDifficulty) -> Self {
        match d {
            ArgDifficulty::Easy => Difficulty::Easy,
            ArgDifficulty::Medium => Difficulty::Medium,
            ArgDifficulty::Hard => Difficulty::Hard,
            ArgDifficulty::Free => Difficulty::Free,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ArgTheme {
    Dark,
    Light,
    HighContrast,
}

impl ArgTheme {
    fn index(self) -> usize {
        match self {
            ArgTheme::Dark => 0,
            ArgTheme::Light => 1,
            ArgTheme::HighContrast => 2,
        }
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Run the app
    let result = run_app(&mut stdout, &args);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app(stdout: &mut io::Stdout, args: &Args) -> io::Result<()> {
    let grid_size = args.grid_size as usize;
    let loaded = presets::load(args.presets.as_deref(), &Grid::new(grid_size));

    let mut session = Session::new(grid_size, loaded.table, args.difficulty.into());
    if args.preset > 1 {
        session.select_preset(args.preset);
    }

    let mut app = App::new(session, args.theme.index());
    if let Some(notice) = loaded.notice {
        app.show_message(&notice);
    }

    let mut last_tick = Instant::now();

    loop {
        let tick_rate = app.get_tick_rate();

        // Render
        render::render(stdout, &mut app)?;
        stdout.flush()?;

        // Handle input with timeout for animation updates
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout.min(Duration::from_millis(33)))? {
            match event::read()? {
                Event::Key(key) => {
                    // Handle Ctrl+C
                    if key.modifiers.contains(KeyModifiers::CONTROL)
                        && key.code == KeyCode::Char('c')
                    {
                        break;
                    }
                    match app.handle_key(key) {
                        AppAction::Continue => {}
                        AppAction::Quit => break,
                    }
                }
                Event::Mouse(mouse) => match app.handle_mouse(mouse) {
                    AppAction::Continue => {}
                    AppAction::Quit => break,
                },
                _ => {}
            }
        }

        // Tick animations and timers
        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
