//! Puzzle data loading: an optional user preset file with fallback to the
//! built-in table.

use std::fs;
use std::path::{Path, PathBuf};

use sticklink_core::{Grid, PresetTable};

/// The loaded table plus an optional status line about how it was loaded
/// (surfaced in the TUI message bar).
pub struct LoadedPresets {
    pub table: PresetTable,
    pub notice: Option<String>,
}

/// Default location of the user preset file.
fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sticklink").join("presets.json"))
}

/// Load the preset table.
///
/// An explicit `--presets` path that is missing or invalid falls back to
/// the built-in table with a notice; the default path falls back silently
/// when absent (most players never create it).
pub fn load(explicit: Option<&Path>, grid: &Grid) -> LoadedPresets {
    let (path, announce_missing) = match explicit {
        Some(path) => (Some(path.to_path_buf()), true),
        None => (default_path(), false),
    };

    let Some(path) = path else {
        return LoadedPresets {
            table: PresetTable::builtin(),
            notice: None,
        };
    };

    match read_table(&path, grid) {
        Ok(table) => LoadedPresets {
            table,
            notice: None,
        },
        Err(reason) => {
            let notice = if announce_missing || path.exists() {
                Some(format!("Using built-in puzzles ({reason})"))
            } else {
                None
            };
            LoadedPresets {
                table: PresetTable::builtin(),
                notice,
            }
        }
    }
}

fn read_table(path: &Path, grid: &Grid) -> Result<PresetTable, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
    let table: PresetTable =
        serde_json::from_str(&text).map_err(|e| format!("{}: {e}", path.display()))?;
    table.validate(grid).map_err(|e| e.to_string())?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_explicit_file_falls_back_with_notice() {
        let grid = Grid::new(10);
        let loaded = load(Some(Path::new("/nonexistent/presets.json")), &grid);
        assert_eq!(loaded.table, PresetTable::builtin());
        assert!(loaded.notice.is_some());
    }

    #[test]
    fn valid_file_is_loaded() {
        let grid = Grid::new(10);
        let dir = std::env::temp_dir();
        let path = dir.join("sticklink-test-presets.json");
        let mut table = PresetTable::builtin();
        table.easy.max_sticks = 6;
        fs::write(&path, serde_json::to_string(&table).unwrap()).unwrap();

        let loaded = load(Some(&path), &grid);
        assert_eq!(loaded.table.easy.max_sticks, 6);
        assert!(loaded.notice.is_none());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn invalid_table_falls_back() {
        let grid = Grid::new(10);
        let dir = std::env::temp_dir();
        let path = dir.join("sticklink-test-bad-presets.json");
        // Out-of-bounds point on a 10-wide grid.
        fs::write(
            &path,
            r#"{
                "easy": {"maxSticks": 8, "presets": [[{"x": 40, "y": 2}]]},
                "medium": {"maxSticks": 12, "presets": [[{"x": 1, "y": 1}]]},
                "hard": {"maxSticks": 15, "presets": [[{"x": 2, "y": 2}]]}
            }"#,
        )
        .unwrap();

        let loaded = load(Some(&path), &grid);
        assert_eq!(loaded.table, PresetTable::builtin());
        assert!(loaded.notice.is_some());

        let _ = fs::remove_file(&path);
    }
}
