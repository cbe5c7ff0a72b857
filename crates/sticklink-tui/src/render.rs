use crate::app::{App, ScreenState, X_STEP, Y_STEP};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use std::io;
use sticklink_core::{Difficulty, GridPoint};

const REMOVE_LABEL: &str = "[ hold: remove ]";

pub fn render(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    execute!(stdout, Hide, SetBackgroundColor(app.theme.bg))?;

    match app.screen_state {
        ScreenState::Win => render_win_screen(stdout, app, term_width, term_height)?,
        ScreenState::Playing => {
            execute!(stdout, Clear(ClearType::All))?;
            render_game_screen(stdout, app, term_width, term_height)?;
        }
    }

    execute!(stdout, Show)?;
    Ok(())
}

fn render_game_screen(
    stdout: &mut io::Stdout,
    app: &mut App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let size = app.session.grid().size() as u16;
    let grid_width = (size - 1) * X_STEP + 1;
    let grid_height = (size - 1) * Y_STEP + 1;

    let panel_width: u16 = 26;
    let total_width = grid_width + 3 + panel_width;
    let start_x = if term_width > total_width {
        (term_width - total_width) / 2
    } else {
        1
    };
    let start_y = if term_height > grid_height + 6 { 2 } else { 1 };

    // The mouse handler maps clicks back through this origin.
    app.board_origin = (start_x, start_y);

    render_board(stdout, app, start_x, start_y)?;

    let info_x = start_x + grid_width + 3;
    render_info_panel(stdout, app, info_x, start_y)?;

    let controls_y = start_y + grid_height + 1;
    render_controls(stdout, app, start_x, controls_y)?;

    if let Some(msg) = app.message.clone() {
        render_message(stdout, app, &msg, term_width, term_height)?;
    }

    Ok(())
}

fn render_board(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let session = &app.session;
    let size = session.grid().size() as u16;

    // Sticks first, so the point glyphs sit on top of their endpoints.
    execute!(stdout, SetForegroundColor(theme.stick))?;
    for stick in session.sticks().iter() {
        let (a, _) = stick.endpoints();
        let col = x + a.x as u16 * X_STEP;
        let row = y + a.y as u16 * Y_STEP;
        if stick.is_vertical() {
            execute!(stdout, MoveTo(col, row + 1), Print("┃"))?;
        } else {
            execute!(stdout, MoveTo(col + 1, row), Print("━━━"))?;
        }
    }

    let selected = session.selected();
    let highlighted = session.highlighted_neighbors();

    for gy in 0..size {
        for gx in 0..size {
            let point = GridPoint::new(gx as usize, gy as usize);
            let (glyph, color) = if selected == Some(point) {
                ("◎", theme.selected)
            } else if highlighted.contains(&point) {
                ("○", theme.highlight)
            } else if session.active_points().contains(point) {
                ("●", theme.target)
            } else {
                ("·", theme.lattice)
            };
            execute!(
                stdout,
                MoveTo(x + gx * X_STEP, y + gy * Y_STEP),
                SetForegroundColor(color),
                Print(glyph)
            )?;
        }
    }

    Ok(())
}

fn render_info_panel(stdout: &mut io::Stdout, app: &mut App, x: u16, y: u16) -> io::Result<()> {
    let theme = app.theme.clone();
    let session = &app.session;

    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.fg),
        Print("S T I C K L I N K")
    )?;

    let puzzle_line = if session.difficulty() == Difficulty::Free {
        "Puzzle: free play".to_string()
    } else {
        format!(
            "Puzzle: {}/{}",
            session.preset_index(),
            session.preset_count()
        )
    };

    let lines = [
        format!("Difficulty: {}", session.difficulty()),
        puzzle_line,
        format!("Mode: {}", session.mode()),
        format!("Targets: {}", session.active_points().len()),
        format!("Sticks: {}", session.sticks().len()),
    ];
    for (i, line) in lines.iter().enumerate() {
        execute!(
            stdout,
            MoveTo(x, y + 2 + i as u16),
            SetForegroundColor(theme.info),
            Print(line)
        )?;
    }

    // Budget gauge; free play is unbounded so no gauge is shown.
    let gauge_y = y + 2 + lines.len() as u16;
    if let Some(remaining) = session.budget_remaining() {
        let budget = session.sticks().budget().unwrap_or(0).max(1);
        let fraction = remaining as f64 / budget as f64;
        let filled = (fraction * 10.0).round() as usize;
        let bar: String = "█".repeat(filled) + &"░".repeat(10 - filled.min(10));
        let bar_color = if fraction < 0.3 {
            theme.error
        } else {
            theme.stick
        };
        execute!(
            stdout,
            MoveTo(x, gauge_y),
            SetForegroundColor(theme.info),
            Print(format!("Left: {:>2} ", remaining)),
            SetForegroundColor(bar_color),
            Print(bar)
        )?;
    }

    // The hold-to-remove control; its rectangle feeds mouse hit-testing.
    let button_y = gauge_y + 2;
    app.remove_button = (x, button_y, REMOVE_LABEL.len() as u16, 1);
    execute!(
        stdout,
        MoveTo(x, button_y),
        SetForegroundColor(theme.key),
        Print(REMOVE_LABEL)
    )?;

    if app.session.won() {
        execute!(
            stdout,
            MoveTo(x, button_y + 2),
            SetForegroundColor(theme.success),
            Print("All targets connected!")
        )?;
    }

    Ok(())
}

fn render_controls(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let lines = [
        "click place/toggle · right-click undo · esc deselect",
        "m mode · d difficulty · [ ] puzzle · r random",
        "c clear sticks · n reset · u undo · t theme · q quit",
    ];
    for (i, line) in lines.iter().enumerate() {
        execute!(
            stdout,
            MoveTo(x, y + i as u16),
            SetForegroundColor(theme.info),
            Print(line)
        )?;
    }
    Ok(())
}

fn render_message(
    stdout: &mut io::Stdout,
    app: &App,
    msg: &str,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let x = (term_width.saturating_sub(msg.len() as u16)) / 2;
    execute!(
        stdout,
        MoveTo(x, term_height.saturating_sub(2)),
        SetForegroundColor(app.theme.key),
        Print(msg)
    )?;
    Ok(())
}

fn render_win_screen(
    stdout: &mut io::Stdout,
    app: &mut App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    execute!(stdout, Clear(ClearType::All))?;

    if app.celebration.iter().next().is_none() {
        app.start_celebration(0, 0, term_width.max(1), term_height.saturating_sub(1).max(1));
    }

    for sparkle in app.celebration.iter() {
        if sparkle.x < term_width && sparkle.y < term_height {
            execute!(
                stdout,
                MoveTo(sparkle.x, sparkle.y),
                SetForegroundColor(sparkle.color),
                Print(sparkle.ch)
            )?;
        }
    }

    let theme = app.theme.clone();
    let session = &app.session;
    let banner = "★  ALL TARGETS CONNECTED  ★";
    let stats = format!(
        "{} · {} sticks used{}",
        session.difficulty(),
        session.sticks().len(),
        match session.budget_remaining() {
            Some(left) => format!(" · {left} left in budget"),
            None => String::new(),
        }
    );
    let keys = "enter replay · n next puzzle · esc board · q quit";

    let center_y = term_height / 2;
    for (offset, line, color) in [
        (0u16, banner, theme.success),
        (2, stats.as_str(), theme.fg),
        (4, keys, theme.info),
    ] {
        let x = (term_width.saturating_sub(line.chars().count() as u16)) / 2;
        execute!(
            stdout,
            MoveTo(x, center_y.saturating_sub(2) + offset),
            SetForegroundColor(color),
            Print(line)
        )?;
    }

    Ok(())
}
