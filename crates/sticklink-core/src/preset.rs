use serde::{Deserialize, Serialize};

use crate::grid::{Grid, GridPoint};
use crate::types::Difficulty;

/// Budget and target layouts for one constrained difficulty.
///
/// The serde field names match the puzzle data files
/// (`{"maxSticks": 8, "presets": [[{"x":2,"y":2}, ...], ...]}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyPresets {
    #[serde(rename = "maxSticks")]
    pub max_sticks: usize,
    pub presets: Vec<Vec<GridPoint>>,
}

/// The full difficulty table. Read-only reference data; gameplay never
/// mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetTable {
    pub easy: DifficultyPresets,
    pub medium: DifficultyPresets,
    pub hard: DifficultyPresets,
}

/// Why a preset table was rejected at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetError {
    /// A constrained difficulty supplies no presets at all.
    NoPresets(Difficulty),
    /// A preset point lies outside the grid.
    OutOfBounds {
        difficulty: Difficulty,
        point: GridPoint,
    },
}

impl std::fmt::Display for PresetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PresetError::NoPresets(difficulty) => {
                write!(f, "no presets defined for {difficulty}")
            }
            PresetError::OutOfBounds { difficulty, point } => {
                write!(f, "{difficulty} preset point {point} is outside the grid")
            }
        }
    }
}

impl std::error::Error for PresetError {}

impl PresetTable {
    /// The presets for a difficulty; `None` for [`Difficulty::Free`],
    /// which has neither budget nor targets.
    pub fn get(&self, difficulty: Difficulty) -> Option<&DifficultyPresets> {
        match difficulty {
            Difficulty::Easy => Some(&self.easy),
            Difficulty::Medium => Some(&self.medium),
            Difficulty::Hard => Some(&self.hard),
            Difficulty::Free => None,
        }
    }

    /// Check that every constrained difficulty has at least one preset and
    /// that every preset point fits the grid. Loaders fall back to
    /// [`PresetTable::builtin`] when this fails.
    pub fn validate(&self, grid: &Grid) -> Result<(), PresetError> {
        let levels = [
            (Difficulty::Easy, &self.easy),
            (Difficulty::Medium, &self.medium),
            (Difficulty::Hard, &self.hard),
        ];
        for (difficulty, data) in levels {
            if data.presets.is_empty() {
                return Err(PresetError::NoPresets(difficulty));
            }
            for preset in &data.presets {
                for point in preset {
                    if !grid.contains(*point) {
                        return Err(PresetError::OutOfBounds {
                            difficulty,
                            point: *point,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// The hardcoded default table, used when no puzzle data file is found
    /// or the file fails validation.
    pub fn builtin() -> Self {
        fn layout(points: &[(usize, usize)]) -> Vec<GridPoint> {
            points.iter().map(|(x, y)| GridPoint::new(*x, *y)).collect()
        }

        Self {
            easy: DifficultyPresets {
                max_sticks: 8,
                presets: vec![
                    layout(&[(2, 2), (3, 5)]),
                    layout(&[(1, 1), (4, 4)]),
                    layout(&[(5, 2), (2, 6)]),
                ],
            },
            medium: DifficultyPresets {
                max_sticks: 12,
                presets: vec![
                    layout(&[(1, 1), (3, 3), (5, 5)]),
                    layout(&[(2, 2), (4, 4), (6, 6)]),
                    layout(&[(3, 1), (5, 3), (7, 5)]),
                ],
            },
            hard: DifficultyPresets {
                max_sticks: 15,
                presets: vec![
                    layout(&[(1, 4), (1, 1), (2, 7), (4, 3)]),
                    layout(&[(2, 2), (4, 4), (6, 6), (8, 8)]),
                    layout(&[(3, 1), (5, 3), (7, 5), (9, 7)]),
                ],
            },
        }
    }
}
