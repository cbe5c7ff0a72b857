//! Pointer hit-testing: mapping a continuous input coordinate onto the
//! lattice. Consumed by input adapters, not by the win-condition logic.

use crate::grid::{Grid, GridPoint};

/// Edge probe order from the rounded coordinate: right, down, left, up.
/// First match wins, which makes exact-tie inputs deterministic.
const EDGE_PROBES: [(i64, i64); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// The lattice point nearest to a continuous coordinate, if it is in bounds
/// and within `tolerance` (Euclidean, in the same units as the input).
pub fn nearest_point(
    x: f64,
    y: f64,
    cell_size: f64,
    tolerance: f64,
    grid: &Grid,
) -> Option<GridPoint> {
    if cell_size <= 0.0 {
        return None;
    }
    let nx = (x / cell_size).round() as i64;
    let ny = (y / cell_size).round() as i64;
    if !grid.contains_signed(nx, ny) {
        return None;
    }
    let dx = x - nx as f64 * cell_size;
    let dy = y - ny as f64 * cell_size;
    if (dx * dx + dy * dy).sqrt() <= tolerance {
        Some(GridPoint::new(nx as usize, ny as usize))
    } else {
        None
    }
}

/// The grid edge whose midpoint is nearest to a continuous coordinate.
///
/// From the rounded nearest lattice position, the four axis directions are
/// probed in right, down, left, up order; the first edge whose midpoint is
/// within Manhattan distance `0.5 * cell_size` and whose endpoints are both
/// in bounds is returned, endpoint order (rounded point, probed neighbor).
pub fn nearest_edge(
    x: f64,
    y: f64,
    cell_size: f64,
    grid: &Grid,
) -> Option<(GridPoint, GridPoint)> {
    if cell_size <= 0.0 {
        return None;
    }
    let nx = (x / cell_size).round() as i64;
    let ny = (y / cell_size).round() as i64;
    if !grid.contains_signed(nx, ny) {
        return None;
    }
    let radius = cell_size * 0.5;

    for (dx, dy) in EDGE_PROBES {
        let ex = nx + dx;
        let ey = ny + dy;
        if !grid.contains_signed(ex, ey) {
            continue;
        }
        let mid_x = (nx + ex) as f64 * cell_size / 2.0;
        let mid_y = (ny + ey) as f64 * cell_size / 2.0;
        if (x - mid_x).abs() + (y - mid_y).abs() <= radius {
            return Some((
                GridPoint::new(nx as usize, ny as usize),
                GridPoint::new(ex as usize, ey as usize),
            ));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: usize, y: usize) -> GridPoint {
        GridPoint::new(x, y)
    }

    #[test]
    fn point_snaps_within_tolerance() {
        let grid = Grid::new(10);
        assert_eq!(
            nearest_point(101.0, 98.0, 50.0, 25.0, &grid),
            Some(p(2, 2))
        );
        // Same coordinate, tighter tolerance: the ~2.2-unit offset misses.
        assert_eq!(nearest_point(101.0, 98.0, 50.0, 2.0, &grid), None);
    }

    #[test]
    fn point_outside_the_lattice_is_rejected() {
        let grid = Grid::new(10);
        // Rounds to x = -1.
        assert_eq!(nearest_point(-30.0, 0.0, 50.0, 25.0, &grid), None);
        // Rounds to x = 10 on a 10-wide grid.
        assert_eq!(nearest_point(480.0, 0.0, 50.0, 25.0, &grid), None);
    }

    #[test]
    fn edge_resolves_near_its_midpoint() {
        let grid = Grid::new(10);
        // Just right of (1, 1): the horizontal edge to (2, 1).
        assert_eq!(
            nearest_edge(74.0, 50.0, 50.0, &grid),
            Some((p(1, 1), p(2, 1)))
        );
        // Just below (1, 1): the vertical edge to (1, 2).
        assert_eq!(
            nearest_edge(50.0, 74.0, 50.0, &grid),
            Some((p(1, 1), p(1, 2)))
        );
    }

    #[test]
    fn exact_tie_prefers_the_earlier_probe() {
        let grid = Grid::new(10);
        // Equidistant from the right and down edge midpoints of (1, 1):
        // right is probed first.
        assert_eq!(
            nearest_edge(62.5, 62.5, 50.0, &grid),
            Some((p(1, 1), p(2, 1)))
        );
    }

    #[test]
    fn edges_leaving_the_grid_are_skipped() {
        let grid = Grid::new(10);
        // At the far corner the right and down probes leave the grid; a
        // nudge toward the left edge resolves to it.
        assert_eq!(
            nearest_edge(9.0 * 50.0 - 24.0, 9.0 * 50.0, 50.0, &grid),
            Some((p(9, 9), p(8, 9)))
        );
        // Dead on the corner, every surviving midpoint is 25 away; left is
        // probed before up.
        assert_eq!(
            nearest_edge(450.0, 450.0, 50.0, &grid),
            Some((p(9, 9), p(8, 9)))
        );
    }

    #[test]
    fn cell_centers_resolve_against_the_rounded_point() {
        let grid = Grid::new(10);
        // The radius-0.5-cell diamonds around edge midpoints tile the
        // plane, so an interior input always lands on one of the rounded
        // point's edges. (75, 75) rounds to (2, 2); its right and down
        // midpoints are 75 Manhattan units away, left is exactly 25.
        assert_eq!(
            nearest_edge(75.0, 75.0, 50.0, &grid),
            Some((p(2, 2), p(1, 2)))
        );
    }

    #[test]
    fn inputs_rounding_off_the_lattice_miss() {
        let grid = Grid::new(10);
        assert_eq!(nearest_edge(-30.0, 0.0, 50.0, &grid), None);
        assert_eq!(nearest_edge(480.0, 450.0, 50.0, &grid), None);
    }
}
