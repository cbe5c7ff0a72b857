use serde::{Deserialize, Serialize};

/// A lattice intersection, identified by its integer coordinates.
///
/// Points are pure values: any `(x, y)` pair inside the grid denotes a valid
/// point, and nothing is allocated per point. The serde shape (`{"x":..,
/// "y":..}`) doubles as the preset wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: usize,
    pub y: usize,
}

impl GridPoint {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Whether `other` is an orthogonal unit-distance neighbor.
    pub fn is_adjacent_to(&self, other: GridPoint) -> bool {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dx + dy == 1
    }
}

impl From<(usize, usize)> for GridPoint {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for GridPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four orthogonal directions in check order: left, right, up, down.
pub(crate) const DIRECTIONS: [(i64, i64); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// A square lattice of points, `size` per side.
///
/// The grid is pure geometry: it owns no game state and its size is fixed
/// for the life of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    size: usize,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    /// Number of points per side.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, point: GridPoint) -> bool {
        point.x < self.size && point.y < self.size
    }

    /// Bounds check for coordinates that may have been rounded below zero,
    /// as hit-testing produces.
    pub fn contains_signed(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.size && (y as usize) < self.size
    }

    /// The up-to-4 orthogonal neighbors of `point`, clipped at the edges,
    /// in left, right, up, down order.
    pub fn neighbors(&self, point: GridPoint) -> Vec<GridPoint> {
        let mut out = Vec::with_capacity(4);
        for (dx, dy) in DIRECTIONS {
            let nx = point.x as i64 + dx;
            let ny = point.y as i64 + dy;
            if self.contains_signed(nx, ny) {
                out.push(GridPoint::new(nx as usize, ny as usize));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacency_is_orthogonal_unit_distance() {
        let p = GridPoint::new(3, 3);
        assert!(p.is_adjacent_to(GridPoint::new(2, 3)));
        assert!(p.is_adjacent_to(GridPoint::new(3, 4)));
        assert!(!p.is_adjacent_to(GridPoint::new(4, 4)));
        assert!(!p.is_adjacent_to(GridPoint::new(3, 3)));
        assert!(!p.is_adjacent_to(GridPoint::new(5, 3)));
    }

    #[test]
    fn neighbors_in_order_clipped_at_corner() {
        let grid = Grid::new(10);
        // Interior point: left, right, up, down.
        assert_eq!(
            grid.neighbors(GridPoint::new(5, 5)),
            vec![
                GridPoint::new(4, 5),
                GridPoint::new(6, 5),
                GridPoint::new(5, 4),
                GridPoint::new(5, 6),
            ]
        );
        // Origin keeps only right and down.
        assert_eq!(
            grid.neighbors(GridPoint::new(0, 0)),
            vec![GridPoint::new(1, 0), GridPoint::new(0, 1)]
        );
        // Far corner keeps only left and up.
        assert_eq!(
            grid.neighbors(GridPoint::new(9, 9)),
            vec![GridPoint::new(8, 9), GridPoint::new(9, 8)]
        );
    }

    #[test]
    fn signed_bounds() {
        let grid = Grid::new(10);
        assert!(grid.contains_signed(0, 9));
        assert!(!grid.contains_signed(-1, 0));
        assert!(!grid.contains_signed(0, 10));
    }
}
