use crate::animations::Celebration;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use rand::Rng;
use std::time::Duration;
use sticklink_core::{
    nearest_edge, nearest_point, ConnectOutcome, Difficulty, Grid, Mode, Session, StickToggle,
};

/// Result of handling an input event
pub enum AppAction {
    Continue,
    Quit,
}

/// Current screen state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    /// Normal gameplay
    Playing,
    /// Win celebration screen
    Win,
}

/// Logical units per grid cell in hit-testing space.
pub const CELL: f64 = 8.0;
/// Terminal columns per grid cell.
pub const X_STEP: u16 = 4;
/// Terminal rows per grid cell.
pub const Y_STEP: u16 = 2;
/// Ticks between hold-to-remove fires (one tick ≈ 100 ms while playing).
const REPEAT_INTERVAL: u32 = 3;

/// Press-and-hold bulk removal.
///
/// Armed by mouse-down on the remove control; fires once per interval on
/// the app tick until canceled (mouse-up or leaving the control) or until
/// the session reports nothing left to remove.
#[derive(Default)]
struct RepeatRemove {
    active: bool,
    countdown: u32,
}

impl RepeatRemove {
    fn arm(&mut self) {
        self.active = true;
        self.countdown = REPEAT_INTERVAL;
    }

    fn cancel(&mut self) {
        self.active = false;
    }

    /// Advance one tick; returns whether the timer fires now.
    fn tick(&mut self) -> bool {
        if !self.active {
            return false;
        }
        if self.countdown == 0 {
            self.countdown = REPEAT_INTERVAL;
            true
        } else {
            self.countdown -= 1;
            false
        }
    }
}

/// The main application state
pub struct App {
    pub session: Session,
    pub theme: Theme,
    theme_index: usize,
    pub screen_state: ScreenState,
    pub celebration: Celebration,
    /// Message to display
    pub message: Option<String>,
    /// Message timer
    message_timer: u32,
    repeat_remove: RepeatRemove,
    /// Terminal cell of the board's (0, 0) point; kept current by the
    /// renderer so mouse events can be mapped back through hit-testing.
    pub board_origin: (u16, u16),
    /// Remove control rectangle (x, y, width, height); set by the renderer.
    pub remove_button: (u16, u16, u16, u16),
    was_won: bool,
}

impl App {
    pub fn new(session: Session, theme_index: usize) -> Self {
        let themes = [Theme::dark(), Theme::light(), Theme::high_contrast()];
        let theme_index = theme_index % themes.len();
        Self {
            theme: themes[theme_index].clone(),
            theme_index,
            session,
            screen_state: ScreenState::Playing,
            celebration: Celebration::new(),
            message: None,
            message_timer: 0,
            repeat_remove: RepeatRemove::default(),
            board_origin: (0, 0),
            remove_button: (0, 0, 0, 0),
            was_won: false,
        }
    }

    /// Get the tick rate based on current screen
    pub fn get_tick_rate(&self) -> Duration {
        match self.screen_state {
            ScreenState::Win => Duration::from_millis(33),
            ScreenState::Playing => Duration::from_millis(100),
        }
    }

    /// Update animations and timers (called every tick)
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }

        if self.screen_state == ScreenState::Win {
            self.celebration.update();
        }

        if self.repeat_remove.tick() {
            if self.session.remove_most_recent().is_none() {
                self.repeat_remove.cancel();
            }
            self.after_mutation();
        }
    }

    /// Show a temporary message
    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = 30; // ~3 seconds at the playing tick rate
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match self.screen_state {
            ScreenState::Win => self.handle_win_key(key),
            ScreenState::Playing => self.handle_game_key(key),
        }
    }

    fn handle_game_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,

            KeyCode::Char('t') => self.cycle_theme(),

            // Mode toggle (Free difficulty only).
            KeyCode::Char('m') => {
                let next = match self.session.mode() {
                    Mode::PlacingPoints => Mode::PlacingSticks,
                    Mode::PlacingSticks => Mode::PlacingPoints,
                };
                match self.session.set_mode(next) {
                    Ok(()) => self.show_message(&format!("Mode: {next}")),
                    Err(error) => self.show_message(&error.to_string()),
                }
            }

            // Cycle difficulty.
            KeyCode::Char('d') => {
                let next = next_difficulty(self.session.difficulty());
                self.session.select_difficulty(next);
                self.after_mutation();
                self.show_message(&format!("Difficulty: {next}"));
            }

            // Preset stepping, clamped by the session. Free play has a
            // single open board, so stepping is disabled there.
            KeyCode::Char(']') if self.has_presets() => {
                self.session.select_preset(self.session.preset_index() + 1);
                self.after_mutation();
                self.announce_preset();
            }
            KeyCode::Char('[') if self.has_presets() => {
                let index = self.session.preset_index();
                self.session.select_preset(index.saturating_sub(1).max(1));
                self.after_mutation();
                self.announce_preset();
            }

            // Random preset.
            KeyCode::Char('r') if self.has_presets() => {
                let count = self.session.preset_count();
                let index = rand::thread_rng().gen_range(1..=count);
                self.session.select_preset(index);
                self.after_mutation();
                self.announce_preset();
            }

            // Replay the current board.
            KeyCode::Char('n') => {
                self.session.reset();
                self.after_mutation();
                self.show_message("Board reset");
            }

            // Remove most recent stick or point.
            KeyCode::Char('u') | KeyCode::Backspace | KeyCode::Delete => {
                if self.session.remove_most_recent().is_none() {
                    self.show_message("Nothing to remove");
                }
                self.after_mutation();
            }

            // Clear all sticks.
            KeyCode::Char('c') => {
                self.session.clear_sticks();
                self.after_mutation();
                self.show_message("Sticks cleared");
            }

            // Drop the pending selection.
            KeyCode::Esc => {
                if let Some(anchor) = self.session.selected() {
                    let _ = self.session.attempt_connect(anchor);
                }
            }

            _ => {}
        }
        AppAction::Continue
    }

    fn handle_win_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.session.reset();
                self.screen_state = ScreenState::Playing;
                self.was_won = self.session.won();
                self.show_message("Replay");
            }
            KeyCode::Char('n') => {
                let next = self.session.preset_index() % self.session.preset_count() + 1;
                self.session.select_preset(next);
                self.screen_state = ScreenState::Playing;
                self.was_won = self.session.won();
                self.announce_preset();
            }
            KeyCode::Esc => {
                // Back to the (solved) board.
                self.screen_state = ScreenState::Playing;
            }
            _ => {}
        }
        AppAction::Continue
    }

    /// Handle a mouse event
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> AppAction {
        if self.screen_state == ScreenState::Win {
            if let MouseEventKind::Down(_) = mouse.kind {
                self.screen_state = ScreenState::Playing;
            }
            return AppAction::Continue;
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.in_remove_button(mouse.column, mouse.row) {
                    // Fire once now, then repeat until released or empty.
                    if self.session.remove_most_recent().is_none() {
                        self.show_message("Nothing to remove");
                    } else {
                        self.repeat_remove.arm();
                    }
                    self.after_mutation();
                } else {
                    self.board_click(mouse.column, mouse.row);
                }
            }
            MouseEventKind::Down(MouseButton::Right) => {
                if self.session.remove_most_recent().is_none() {
                    self.show_message("Nothing to remove");
                }
                self.after_mutation();
            }
            MouseEventKind::Up(_) => self.repeat_remove.cancel(),
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                // Leaving the control cancels the hold.
                if !self.in_remove_button(mouse.column, mouse.row) {
                    self.repeat_remove.cancel();
                }
            }
            _ => {}
        }
        AppAction::Continue
    }

    fn in_remove_button(&self, column: u16, row: u16) -> bool {
        let (x, y, width, height) = self.remove_button;
        column >= x && column < x + width && row >= y && row < y + height
    }

    /// Resolve a board click through the core's hit-testing and apply it.
    fn board_click(&mut self, column: u16, row: u16) {
        let (ox, oy) = self.board_origin;
        let px = (column as f64 - ox as f64) / X_STEP as f64 * CELL;
        let py = (row as f64 - oy as f64) / Y_STEP as f64 * CELL;
        let grid: Grid = *self.session.grid();

        match self.session.mode() {
            Mode::PlacingPoints => {
                if let Some(point) = nearest_point(px, py, CELL, CELL * 0.5, &grid) {
                    match self.session.toggle_point_at(point) {
                        Ok(_) => self.after_mutation(),
                        Err(error) => self.show_message(&error.to_string()),
                    }
                }
            }
            Mode::PlacingSticks => {
                // An edge hit toggles the stick directly; otherwise fall
                // back to the select-two-points flow.
                if let Some((p1, p2)) = nearest_edge(px, py, CELL, &grid) {
                    match self.session.toggle_stick_between(p1, p2) {
                        Ok(StickToggle::Placed { .. }) | Ok(StickToggle::Removed { .. }) => {
                            self.after_mutation()
                        }
                        Err(error) => self.show_message(&error.to_string()),
                    }
                } else if let Some(point) = nearest_point(px, py, CELL, CELL * 0.5, &grid) {
                    match self.session.attempt_connect(point) {
                        Ok(ConnectOutcome::Placed { .. }) => self.after_mutation(),
                        Ok(_) => {}
                        Err(error) => self.show_message(&error.to_string()),
                    }
                }
            }
        }
    }

    /// Pick up a fresh win after any session mutation.
    fn after_mutation(&mut self) {
        let won = self.session.won();
        if won && !self.was_won {
            self.screen_state = ScreenState::Win;
            self.repeat_remove.cancel();
            // Emptied so the renderer reseeds it over the final layout.
            self.celebration = Celebration::new();
        }
        self.was_won = won;
    }

    /// Tell the renderer where the celebration should play.
    pub fn start_celebration(&mut self, x: u16, y: u16, width: u16, height: u16) {
        self.celebration.reset(x, y, width, height);
    }

    fn has_presets(&self) -> bool {
        self.session.difficulty() != Difficulty::Free
    }

    fn announce_preset(&mut self) {
        self.show_message(&format!(
            "Puzzle {}/{}",
            self.session.preset_index(),
            self.session.preset_count()
        ));
    }

    fn cycle_theme(&mut self) {
        self.theme_index = (self.theme_index + 1) % 3;
        self.theme = match self.theme_index {
            0 => Theme::dark(),
            1 => Theme::light(),
            _ => Theme::high_contrast(),
        };
    }
}

fn next_difficulty(current: Difficulty) -> Difficulty {
    match current {
        Difficulty::Easy => Difficulty::Medium,
        Difficulty::Medium => Difficulty::Hard,
        Difficulty::Hard => Difficulty::Free,
        Difficulty::Free => Difficulty::Easy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_cycle_covers_all_levels() {
        let mut level = Difficulty::Easy;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(level);
            level = next_difficulty(level);
        }
        assert_eq!(level, Difficulty::Easy);
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn repeat_remove_fires_on_the_interval() {
        let mut repeat = RepeatRemove::default();
        assert!(!repeat.tick());

        repeat.arm();
        let fires: Vec<bool> = (0..8).map(|_| repeat.tick()).collect();
        assert_eq!(fires.iter().filter(|f| **f).count(), 2);

        repeat.cancel();
        assert!(!repeat.tick());
    }
}
