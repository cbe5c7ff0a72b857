//! Sticklink core engine.
//!
//! The puzzle: connect every target point on a square lattice into one
//! component by placing sticks between adjacent points, within the
//! difficulty's stick budget. This crate is the pure state machine:
//! grid geometry, the stick and target registries, the reachability win
//! check, the session orchestrator, and pointer hit-testing. Rendering,
//! audio, and input wiring live in adapter crates that call in and
//! re-render from the read-only snapshots.

mod active;
mod connectivity;
mod geometry;
mod grid;
mod preset;
mod session;
mod stick;
mod types;

pub use active::{ActivePoints, PointToggle};
pub use connectivity::is_connected;
pub use geometry::{nearest_edge, nearest_point};
pub use grid::{Grid, GridPoint};
pub use preset::{DifficultyPresets, PresetError, PresetTable};
pub use session::{ConnectOutcome, Removed, Session, StickToggle, ToggleReport};
pub use stick::{Stick, StickKey, StickRegistry};
pub use types::{Difficulty, GameError, Mode};
