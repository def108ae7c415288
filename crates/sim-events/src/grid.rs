//! Grid Coordinates
//!
//! Discrete tile coordinates shared by the engine, the event log and snapshots.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// A discrete integer coordinate on the terrain grid.
///
/// `x` grows to the east, `y` grows to the north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared euclidean distance between two cells.
    pub fn sqr_distance(self, other: Cell) -> i32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Chebyshev (king-move) distance between two cells.
    pub fn chebyshev_distance(self, other: Cell) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// True when `other` is within one step on both axes.
    ///
    /// A cell counts as its own neighbour, so a creature standing on its
    /// target is also "next to" it.
    pub fn is_neighbour(self, other: Cell) -> bool {
        self.chebyshev_distance(other) <= 1
    }

    /// The cell one step further from `threat`, moving on each axis by the
    /// sign of the offset.
    pub fn step_away_from(self, threat: Cell) -> Cell {
        let offset = self - threat;
        Cell::new(self.x + offset.x.signum(), self.y + offset.y.signum())
    }

    /// The eight surrounding cells, in a fixed order.
    pub fn neighbours(self) -> [Cell; 8] {
        [
            Cell::new(self.x - 1, self.y - 1),
            Cell::new(self.x, self.y - 1),
            Cell::new(self.x + 1, self.y - 1),
            Cell::new(self.x - 1, self.y),
            Cell::new(self.x + 1, self.y),
            Cell::new(self.x - 1, self.y + 1),
            Cell::new(self.x, self.y + 1),
            Cell::new(self.x + 1, self.y + 1),
        ]
    }
}

impl Add for Cell {
    type Output = Cell;

    fn add(self, rhs: Cell) -> Cell {
        Cell::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Cell {
    type Output = Cell;

    fn sub(self, rhs: Cell) -> Cell {
        Cell::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Cell::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqr_distance() {
        assert_eq!(Cell::new(0, 0).sqr_distance(Cell::new(1, 1)), 2);
        assert_eq!(Cell::new(2, 3).sqr_distance(Cell::new(5, 7)), 25);
    }

    #[test]
    fn test_neighbours_include_diagonals_and_self() {
        let c = Cell::new(5, 5);
        assert!(c.is_neighbour(Cell::new(5, 6)));
        assert!(c.is_neighbour(Cell::new(6, 6)));
        assert!(c.is_neighbour(c));
        assert!(!c.is_neighbour(Cell::new(7, 5)));
        assert!(c.neighbours().iter().all(|n| c.is_neighbour(*n) && *n != c));
    }

    #[test]
    fn test_step_away_from() {
        let me = Cell::new(5, 5);
        assert_eq!(me.step_away_from(Cell::new(3, 5)), Cell::new(6, 5));
        assert_eq!(me.step_away_from(Cell::new(7, 8)), Cell::new(4, 4));
    }

    #[test]
    fn test_display() {
        assert_eq!(Cell::new(-1, 4).to_string(), "(-1, 4)");
    }
}
