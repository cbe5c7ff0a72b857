use crate::active::{ActivePoints, PointToggle};
use crate::connectivity::is_connected;
use crate::grid::{Grid, GridPoint};
use crate::preset::PresetTable;
use crate::stick::{Stick, StickRegistry};
use crate::types::{Difficulty, GameError, Mode};

/// What a selection-driven connect call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// No anchor was set; the point is now selected.
    Selected,
    /// The point was the anchor; the selection is cleared.
    Deselected,
    /// The point was not a valid partner for the anchor (not adjacent, or
    /// the stick already exists); it is the new anchor.
    Reselected,
    /// A stick was placed between the anchor and the point.
    Placed { stick: Stick, won: bool },
}

/// What a direct edge toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StickToggle {
    Placed { stick: Stick, won: bool },
    Removed { stick: Stick, won: bool },
}

/// A target-point toggle plus the re-run win check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleReport {
    pub change: PointToggle,
    pub won: bool,
}

/// The item popped by [`Session::remove_most_recent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removed {
    Stick(Stick),
    Point(GridPoint),
}

/// One puzzle in play: the registries, the current configuration, and the
/// pending point selection.
///
/// The session owns all mutable game state; input adapters translate
/// pointer events into the methods below and re-render from the read-only
/// snapshots. Every mutating method leaves the `won` flag current.
#[derive(Debug, Clone)]
pub struct Session {
    grid: Grid,
    presets: PresetTable,
    sticks: StickRegistry,
    active: ActivePoints,
    difficulty: Difficulty,
    preset_index: usize,
    mode: Mode,
    selected: Option<GridPoint>,
    won: bool,
}

impl Session {
    /// Start a session on a fresh grid, loading the first preset of
    /// `difficulty`.
    pub fn new(grid_size: usize, presets: PresetTable, difficulty: Difficulty) -> Self {
        let mut session = Self {
            grid: Grid::new(grid_size),
            presets,
            sticks: StickRegistry::new(),
            active: ActivePoints::new(),
            difficulty,
            preset_index: 1,
            mode: Mode::PlacingSticks,
            selected: None,
            won: false,
        };
        session.select_difficulty(difficulty);
        session
    }

    // --- snapshots -------------------------------------------------------

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// 1-based index of the loaded preset.
    pub fn preset_index(&self) -> usize {
        self.preset_index
    }

    /// Number of presets for the current difficulty (1 for `Free`, which
    /// has a single empty layout).
    pub fn preset_count(&self) -> usize {
        match self.presets.get(self.difficulty) {
            Some(data) => data.presets.len().max(1),
            None => 1,
        }
    }

    pub fn selected(&self) -> Option<GridPoint> {
        self.selected
    }

    pub fn sticks(&self) -> &StickRegistry {
        &self.sticks
    }

    pub fn active_points(&self) -> &ActivePoints {
        &self.active
    }

    /// Sticks left in the budget; `None` means unbounded (`Free`).
    pub fn budget_remaining(&self) -> Option<usize> {
        self.sticks
            .budget()
            .map(|budget| budget.saturating_sub(self.sticks.len()))
    }

    /// Whether the last mutation left all targets connected.
    pub fn won(&self) -> bool {
        self.won
    }

    /// The anchor's unconnected in-bounds neighbors, for highlighting.
    /// Empty when nothing is selected.
    pub fn highlighted_neighbors(&self) -> Vec<GridPoint> {
        match self.selected {
            Some(anchor) => self
                .grid
                .neighbors(anchor)
                .into_iter()
                .filter(|neighbor| !self.sticks.has(anchor, *neighbor))
                .collect(),
            None => Vec::new(),
        }
    }

    // --- lifecycle -------------------------------------------------------

    /// Switch difficulty: back to preset 1, mode forced by the difficulty,
    /// board cleared and reloaded.
    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.preset_index = 1;
        self.reset();
    }

    /// Load a preset by 1-based index, clamped into range (out-of-range
    /// input is corrected, not an error).
    pub fn select_preset(&mut self, index: usize) {
        self.preset_index = index.clamp(1, self.preset_count());
        self.reset();
    }

    /// Clear the board and reload the current preset. Budget and mode are
    /// re-derived from the difficulty.
    pub fn reset(&mut self) {
        self.sticks.clear();
        self.active.clear();
        self.selected = None;
        self.mode = if self.difficulty.is_constrained() {
            Mode::PlacingSticks
        } else {
            Mode::PlacingPoints
        };
        self.sticks
            .set_budget(self.presets.get(self.difficulty).map(|d| d.max_sticks));
        if let Some(data) = self.presets.get(self.difficulty) {
            if let Some(preset) = data.presets.get(self.preset_index - 1) {
                for point in preset {
                    // Validation happens at load time; skip strays anyway.
                    if self.grid.contains(*point) {
                        self.active.insert(*point);
                    }
                }
            }
        }
        self.refresh_won();
    }

    /// Change the input mode. Only `Free` may change modes; in a
    /// constrained difficulty re-asserting `PlacingSticks` is a no-op and
    /// anything else is rejected. Clears the pending selection.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), GameError> {
        if self.difficulty.is_constrained() && mode != self.mode {
            return Err(GameError::InvalidMode);
        }
        self.mode = mode;
        self.selected = None;
        Ok(())
    }

    // --- gameplay --------------------------------------------------------

    /// The selection-anchored connect flow, fed one tapped point per call.
    ///
    /// With no anchor the point becomes the anchor. Tapping the anchor
    /// deselects. Tapping an adjacent point with no stick between places
    /// one, clears the selection, and re-runs the win check. Anything else
    /// moves the anchor. A budget rejection reaches the caller as an error
    /// with the registries untouched.
    pub fn attempt_connect(&mut self, point: GridPoint) -> Result<ConnectOutcome, GameError> {
        if self.mode != Mode::PlacingSticks {
            return Err(GameError::InvalidMode);
        }
        if !self.grid.contains(point) {
            return Err(GameError::OutOfBounds);
        }
        let anchor = match self.selected {
            None => {
                self.selected = Some(point);
                return Ok(ConnectOutcome::Selected);
            }
            Some(anchor) if anchor == point => {
                self.selected = None;
                return Ok(ConnectOutcome::Deselected);
            }
            Some(anchor) => anchor,
        };

        if anchor.is_adjacent_to(point) && !self.sticks.has(anchor, point) {
            match self.sticks.try_add(anchor, point) {
                Ok(stick) => {
                    self.selected = None;
                    self.refresh_won();
                    Ok(ConnectOutcome::Placed {
                        stick,
                        won: self.won,
                    })
                }
                Err(error) => {
                    self.selected = None;
                    Err(error)
                }
            }
        } else {
            self.selected = Some(point);
            Ok(ConnectOutcome::Reselected)
        }
    }

    /// Direct edge toggle, as edge hit-testing produces: remove the stick
    /// if it exists, place it otherwise. Runs the win check either way.
    pub fn toggle_stick_between(
        &mut self,
        p1: GridPoint,
        p2: GridPoint,
    ) -> Result<StickToggle, GameError> {
        if self.mode != Mode::PlacingSticks {
            return Err(GameError::InvalidMode);
        }
        if !self.grid.contains(p1) || !self.grid.contains(p2) {
            return Err(GameError::OutOfBounds);
        }
        let stick = Stick::between(p1, p2).ok_or(GameError::NotAdjacent)?;
        if self.sticks.remove(stick.key()) {
            self.selected = None;
            self.refresh_won();
            Ok(StickToggle::Removed {
                stick,
                won: self.won,
            })
        } else {
            let placed = self.sticks.try_add(p1, p2)?;
            self.selected = None;
            self.refresh_won();
            Ok(StickToggle::Placed {
                stick: placed,
                won: self.won,
            })
        }
    }

    /// Toggle a target point (`Free` difficulty, point mode only), then
    /// re-run the win check; a toggle can complete a win when the sticks
    /// already span the remaining targets.
    pub fn toggle_point_at(&mut self, point: GridPoint) -> Result<ToggleReport, GameError> {
        if self.difficulty.is_constrained() || self.mode != Mode::PlacingPoints {
            return Err(GameError::InvalidMode);
        }
        if !self.grid.contains(point) {
            return Err(GameError::OutOfBounds);
        }
        let change = self.active.toggle(point);
        self.refresh_won();
        Ok(ToggleReport {
            change,
            won: self.won,
        })
    }

    /// Pop the most recent stick (stick mode) or target point (point
    /// mode). `None` when the relevant registry is empty.
    pub fn remove_most_recent(&mut self) -> Option<Removed> {
        let removed = match self.mode {
            Mode::PlacingSticks => self.sticks.remove_most_recent().map(Removed::Stick),
            Mode::PlacingPoints => self.active.remove_most_recent().map(Removed::Point),
        };
        if removed.is_some() {
            self.selected = None;
            self.refresh_won();
        }
        removed
    }

    /// Remove every placed stick (the "clear sticks" control).
    pub fn clear_sticks(&mut self) {
        self.sticks.clear();
        self.selected = None;
        self.refresh_won();
    }

    fn refresh_won(&mut self) {
        self.won = is_connected(&self.active, &self.sticks, &self.grid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: usize, y: usize) -> GridPoint {
        GridPoint::new(x, y)
    }

    fn free_session() -> Session {
        Session::new(10, PresetTable::builtin(), Difficulty::Free)
    }

    #[test]
    fn free_session_win_by_activating_then_connecting() {
        let mut session = free_session();
        assert_eq!(session.mode(), Mode::PlacingPoints);
        assert_eq!(session.budget_remaining(), None);

        session.toggle_point_at(p(1, 1)).unwrap();
        let report = session.toggle_point_at(p(1, 2)).unwrap();
        assert_eq!(report.change, PointToggle::Added);
        assert!(!report.won);

        session.set_mode(Mode::PlacingSticks).unwrap();
        assert_eq!(
            session.attempt_connect(p(1, 1)),
            Ok(ConnectOutcome::Selected)
        );
        match session.attempt_connect(p(1, 2)) {
            Ok(ConnectOutcome::Placed { won, .. }) => assert!(won),
            other => panic!("expected placement, got {other:?}"),
        }
        assert!(session.won());
        assert_eq!(session.selected(), None);
    }

    #[test]
    fn easy_budget_exhausts_without_a_win() {
        // Easy preset 1: targets (2,2) and (3,5), 8 sticks. Spend all 8
        // without bridging them.
        let mut session = Session::new(10, PresetTable::builtin(), Difficulty::Easy);
        assert_eq!(session.budget_remaining(), Some(8));
        assert_eq!(session.mode(), Mode::PlacingSticks);

        for x in 0..8 {
            session.toggle_stick_between(p(x, 0), p(x + 1, 0)).unwrap();
        }
        assert_eq!(session.budget_remaining(), Some(0));
        assert!(!session.won());
        assert_eq!(
            session.toggle_stick_between(p(0, 1), p(0, 2)),
            Err(GameError::BudgetExceeded)
        );
        assert_eq!(session.sticks().len(), 8);
    }

    #[test]
    fn easy_preset_is_solvable_within_budget() {
        // (2,2) -> (3,2) -> (3,3) -> (3,4) -> (3,5): 4 of 8 sticks.
        let mut session = Session::new(10, PresetTable::builtin(), Difficulty::Easy);
        session.toggle_stick_between(p(2, 2), p(3, 2)).unwrap();
        session.toggle_stick_between(p(3, 2), p(3, 3)).unwrap();
        session.toggle_stick_between(p(3, 3), p(3, 4)).unwrap();
        let last = session.toggle_stick_between(p(3, 4), p(3, 5)).unwrap();
        match last {
            StickToggle::Placed { won, .. } => assert!(won),
            other => panic!("expected placement, got {other:?}"),
        }
        assert_eq!(session.budget_remaining(), Some(4));

        // Toggling the last stick off un-wins.
        match session.toggle_stick_between(p(3, 4), p(3, 5)).unwrap() {
            StickToggle::Removed { won, .. } => assert!(!won),
            other => panic!("expected removal, got {other:?}"),
        }
    }

    #[test]
    fn selection_machine_anchors_deselects_and_reanchors() {
        let mut session = free_session();
        session.set_mode(Mode::PlacingSticks).unwrap();

        assert_eq!(
            session.attempt_connect(p(4, 4)),
            Ok(ConnectOutcome::Selected)
        );
        assert_eq!(session.selected(), Some(p(4, 4)));
        assert_eq!(
            session.highlighted_neighbors(),
            vec![p(3, 4), p(5, 4), p(4, 3), p(4, 5)]
        );

        // Tapping the anchor again clears it.
        assert_eq!(
            session.attempt_connect(p(4, 4)),
            Ok(ConnectOutcome::Deselected)
        );
        assert_eq!(session.selected(), None);

        // A far-away tap moves the anchor instead of connecting.
        session.attempt_connect(p(4, 4)).unwrap();
        assert_eq!(
            session.attempt_connect(p(8, 8)),
            Ok(ConnectOutcome::Reselected)
        );
        assert_eq!(session.selected(), Some(p(8, 8)));
    }

    #[test]
    fn connected_neighbors_drop_out_of_the_highlight() {
        let mut session = free_session();
        session.set_mode(Mode::PlacingSticks).unwrap();
        session.toggle_stick_between(p(4, 4), p(5, 4)).unwrap();

        session.attempt_connect(p(4, 4)).unwrap();
        assert_eq!(
            session.highlighted_neighbors(),
            vec![p(3, 4), p(4, 3), p(4, 5)]
        );

        // The already-connected neighbor re-anchors rather than stacking a
        // duplicate stick.
        assert_eq!(
            session.attempt_connect(p(5, 4)),
            Ok(ConnectOutcome::Reselected)
        );
        assert_eq!(session.sticks().len(), 1);
    }

    #[test]
    fn constrained_difficulties_lock_mode_and_points() {
        let mut session = Session::new(10, PresetTable::builtin(), Difficulty::Medium);
        assert_eq!(session.mode(), Mode::PlacingSticks);
        assert_eq!(
            session.set_mode(Mode::PlacingPoints),
            Err(GameError::InvalidMode)
        );
        // Re-asserting the forced mode is tolerated.
        assert_eq!(session.set_mode(Mode::PlacingSticks), Ok(()));
        assert_eq!(
            session.toggle_point_at(p(0, 0)),
            Err(GameError::InvalidMode)
        );
        // Preset targets arrived in order.
        let targets: Vec<_> = session.active_points().iter().collect();
        assert_eq!(targets, vec![p(1, 1), p(3, 3), p(5, 5)]);
    }

    #[test]
    fn preset_selection_clamps_and_reloads() {
        let mut session = Session::new(10, PresetTable::builtin(), Difficulty::Easy);
        session.toggle_stick_between(p(0, 0), p(1, 0)).unwrap();

        session.select_preset(2);
        assert_eq!(session.preset_index(), 2);
        assert!(session.sticks().is_empty());
        let targets: Vec<_> = session.active_points().iter().collect();
        assert_eq!(targets, vec![p(1, 1), p(4, 4)]);

        session.select_preset(99);
        assert_eq!(session.preset_index(), 3);
        session.select_preset(0);
        assert_eq!(session.preset_index(), 1);
    }

    #[test]
    fn difficulty_switch_resets_everything() {
        let mut session = Session::new(10, PresetTable::builtin(), Difficulty::Hard);
        session.toggle_stick_between(p(0, 0), p(1, 0)).unwrap();
        session.attempt_connect(p(5, 5)).unwrap();

        session.select_difficulty(Difficulty::Free);
        assert_eq!(session.mode(), Mode::PlacingPoints);
        assert_eq!(session.preset_index(), 1);
        assert!(session.sticks().is_empty());
        assert!(session.active_points().is_empty());
        assert_eq!(session.selected(), None);
        assert_eq!(session.budget_remaining(), None);
        assert!(!session.won());
    }

    #[test]
    fn remove_most_recent_follows_the_mode() {
        let mut session = free_session();
        session.toggle_point_at(p(1, 1)).unwrap();
        session.toggle_point_at(p(2, 2)).unwrap();
        assert_eq!(session.remove_most_recent(), Some(Removed::Point(p(2, 2))));

        session.set_mode(Mode::PlacingSticks).unwrap();
        let stick = match session.toggle_stick_between(p(0, 0), p(1, 0)).unwrap() {
            StickToggle::Placed { stick, .. } => stick,
            other => panic!("expected placement, got {other:?}"),
        };
        assert_eq!(session.remove_most_recent(), Some(Removed::Stick(stick)));
        assert_eq!(session.remove_most_recent(), None);
    }

    #[test]
    fn removal_can_break_a_win() {
        let mut session = free_session();
        session.toggle_point_at(p(1, 1)).unwrap();
        session.toggle_point_at(p(1, 2)).unwrap();
        session.set_mode(Mode::PlacingSticks).unwrap();
        session.toggle_stick_between(p(1, 1), p(1, 2)).unwrap();
        assert!(session.won());

        session.remove_most_recent();
        assert!(!session.won());
    }

    #[test]
    fn clear_sticks_empties_the_registry_only() {
        let mut session = Session::new(10, PresetTable::builtin(), Difficulty::Easy);
        session.toggle_stick_between(p(0, 0), p(1, 0)).unwrap();
        session.toggle_stick_between(p(1, 0), p(2, 0)).unwrap();

        session.clear_sticks();
        assert!(session.sticks().is_empty());
        assert_eq!(session.active_points().len(), 2);
        assert_eq!(session.budget_remaining(), Some(8));
    }

    #[test]
    fn out_of_bounds_taps_are_rejected() {
        let mut session = free_session();
        assert_eq!(
            session.toggle_point_at(p(10, 0)),
            Err(GameError::OutOfBounds)
        );
        session.set_mode(Mode::PlacingSticks).unwrap();
        assert_eq!(
            session.attempt_connect(p(0, 10)),
            Err(GameError::OutOfBounds)
        );
        assert_eq!(
            session.toggle_stick_between(p(9, 9), p(10, 9)),
            Err(GameError::OutOfBounds)
        );
    }

    #[test]
    fn point_toggle_alone_can_win_over_existing_sticks() {
        let mut session = free_session();
        session.toggle_point_at(p(1, 1)).unwrap();
        session.set_mode(Mode::PlacingSticks).unwrap();
        session.toggle_stick_between(p(1, 1), p(1, 2)).unwrap();
        session.set_mode(Mode::PlacingPoints).unwrap();

        let report = session.toggle_point_at(p(1, 2)).unwrap();
        assert!(report.won);
    }
}
