use crate::grid::GridPoint;

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointToggle {
    Added,
    Removed,
}

/// The target points the traversal must connect.
///
/// Membership is boolean per coordinate but insertion order is kept, so the
/// most recently added point can be popped. A plain vector is enough at
/// the grid sizes in play (around a hundred points).
#[derive(Debug, Clone, Default)]
pub struct ActivePoints {
    points: Vec<GridPoint>,
}

impl ActivePoints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip a point's membership. Toggling an active point removes it;
    /// a coordinate never appears twice.
    pub fn toggle(&mut self, point: GridPoint) -> PointToggle {
        if let Some(index) = self.points.iter().position(|p| *p == point) {
            self.points.remove(index);
            PointToggle::Removed
        } else {
            self.points.push(point);
            PointToggle::Added
        }
    }

    /// Add a point if absent (used for bulk preset loads, which must not
    /// cancel themselves on duplicate data).
    pub(crate) fn insert(&mut self, point: GridPoint) -> bool {
        if self.contains(point) {
            false
        } else {
            self.points.push(point);
            true
        }
    }

    pub fn contains(&self, point: GridPoint) -> bool {
        self.points.contains(&point)
    }

    /// The earliest still-active point, the traversal's start.
    pub fn first(&self) -> Option<GridPoint> {
        self.points.first().copied()
    }

    /// Pop the most recently added point.
    pub fn remove_most_recent(&mut self) -> Option<GridPoint> {
        self.points.pop()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The active points in insertion order. Restartable.
    pub fn iter(&self) -> impl Iterator<Item = GridPoint> + '_ {
        self.points.iter().copied()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: usize, y: usize) -> GridPoint {
        GridPoint::new(x, y)
    }

    #[test]
    fn toggle_round_trip_restores_order() {
        let mut active = ActivePoints::new();
        active.toggle(p(1, 1));
        active.toggle(p(2, 2));
        active.toggle(p(3, 3));

        assert_eq!(active.toggle(p(9, 9)), PointToggle::Added);
        assert_eq!(active.toggle(p(9, 9)), PointToggle::Removed);

        let points: Vec<_> = active.iter().collect();
        assert_eq!(points, vec![p(1, 1), p(2, 2), p(3, 3)]);
    }

    #[test]
    fn toggling_a_member_removes_it_from_the_middle() {
        let mut active = ActivePoints::new();
        active.toggle(p(1, 1));
        active.toggle(p(2, 2));
        active.toggle(p(3, 3));

        assert_eq!(active.toggle(p(2, 2)), PointToggle::Removed);
        let points: Vec<_> = active.iter().collect();
        assert_eq!(points, vec![p(1, 1), p(3, 3)]);
        assert_eq!(active.len(), 2);
    }

    #[test]
    fn most_recent_pops_in_lifo_order() {
        let mut active = ActivePoints::new();
        active.toggle(p(1, 1));
        active.toggle(p(2, 2));

        assert_eq!(active.remove_most_recent(), Some(p(2, 2)));
        assert_eq!(active.remove_most_recent(), Some(p(1, 1)));
        assert_eq!(active.remove_most_recent(), None);
    }

    #[test]
    fn insert_skips_duplicates() {
        let mut active = ActivePoints::new();
        assert!(active.insert(p(4, 4)));
        assert!(!active.insert(p(4, 4)));
        assert_eq!(active.len(), 1);
    }
}
