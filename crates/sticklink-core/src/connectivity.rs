use std::collections::HashSet;

use crate::active::ActivePoints;
use crate::grid::{Grid, GridPoint};
use crate::stick::StickRegistry;

/// Whether every active point is reachable from the first one across the
/// placed sticks.
///
/// Fewer than 2 active points means no victory is possible and returns
/// `false`. Traversal crosses any placed stick, including those whose
/// endpoints were never activated; reachability only cares about the edges.
/// The frontier is an explicit stack (no call-stack recursion), visiting
/// neighbors in left, right, up, down order.
pub fn is_connected(active: &ActivePoints, sticks: &StickRegistry, grid: &Grid) -> bool {
    if active.len() < 2 {
        return false;
    }
    let start = match active.first() {
        Some(point) => point,
        None => return false,
    };

    let mut visited: HashSet<GridPoint> = HashSet::new();
    let mut frontier = vec![start];
    visited.insert(start);

    while let Some(point) = frontier.pop() {
        for neighbor in grid.neighbors(point) {
            if !visited.contains(&neighbor) && sticks.has(point, neighbor) {
                visited.insert(neighbor);
                frontier.push(neighbor);
            }
        }
    }

    active.iter().all(|point| visited.contains(&point))
}
