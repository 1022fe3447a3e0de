//! # Hex Geometry
//!
//! Cells live on an unbounded offset hex grid ("odd-r" layout): rows are
//! horizontal and every odd row is shifted half a cell to the right. The
//! neighbors of a cell therefore depend on the parity of its row.
//!
//! ```text
//!   even row y          odd row y
//!   NW=(x-1,y-1)        NW=(x,y-1)
//!   NE=(x,  y-1)        NE=(x+1,y-1)
//!   W =(x-1,y)  E=(x+1,y)
//!   SW=(x-1,y+1)        SW=(x,y+1)
//!   SE=(x,  y+1)        SE=(x+1,y+1)
//! ```
//!
//! The "bump" of a row, `(y mod 2) * 2 - 1`, is the x-offset of the two
//! diagonal neighbors that do not share the cell's own column.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell on the offset hex grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

/// The six directions between adjacent cells, in clockwise order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    East,
    SouthEast,
    SouthWest,
    West,
    NorthWest,
    NorthEast,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::East,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
        Direction::NorthEast,
    ];

    /// The direction pointing the other way.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
            Direction::NorthEast => Direction::SouthWest,
        }
    }
}

impl Cell {
    pub const ORIGIN: Cell = Cell { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// x-offset of the off-column diagonal neighbors: -1 on even rows, +1 on odd rows.
    fn bump(&self) -> i32 {
        self.y.rem_euclid(2) * 2 - 1
    }

    /// All six neighbors.
    pub fn neighbors(&self) -> [Cell; 6] {
        let bump = self.bump();
        [
            Cell::new(self.x, self.y - 1),
            Cell::new(self.x, self.y + 1),
            Cell::new(self.x - 1, self.y),
            Cell::new(self.x + 1, self.y),
            Cell::new(self.x + bump, self.y - 1),
            Cell::new(self.x + bump, self.y + 1),
        ]
    }

    /// The adjacent cell one step away in `direction`.
    pub fn step(&self, direction: Direction) -> Cell {
        // Diagonals lean left on even rows and right on odd rows.
        let left = (self.bump() - 1) / 2;
        let right = (self.bump() + 1) / 2;
        match direction {
            Direction::East => Cell::new(self.x + 1, self.y),
            Direction::West => Cell::new(self.x - 1, self.y),
            Direction::NorthEast => Cell::new(self.x + right, self.y - 1),
            Direction::NorthWest => Cell::new(self.x + left, self.y - 1),
            Direction::SouthEast => Cell::new(self.x + right, self.y + 1),
            Direction::SouthWest => Cell::new(self.x + left, self.y + 1),
        }
    }

    pub fn is_adjacent(&self, other: &Cell) -> bool {
        self.neighbors().contains(other)
    }

    /// Classify the step from `self` to an adjacent cell, or `None` if they are not adjacent.
    pub fn try_direction(&self, to: &Cell) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| self.step(*d) == *to)
    }

    /// Classify the step from `self` to `to`.
    ///
    /// # Panics
    /// If the cells are not adjacent.
    pub fn direction(&self, to: &Cell) -> Direction {
        match self.try_direction(to) {
            Some(direction) => direction,
            None => panic!("no direction from {} to non-adjacent {}", self, to),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_depend_on_row_parity() {
        let even = Cell::new(0, 0).neighbors();
        assert!(even.contains(&Cell::new(-1, -1)));
        assert!(even.contains(&Cell::new(-1, 1)));
        assert!(!even.contains(&Cell::new(1, -1)));

        let odd = Cell::new(0, 1).neighbors();
        assert!(odd.contains(&Cell::new(1, 0)));
        assert!(odd.contains(&Cell::new(1, 2)));
        assert!(!odd.contains(&Cell::new(-1, 0)));
    }

    #[test]
    fn test_negative_rows_use_positive_parity() {
        // Row -1 is odd, so its diagonals lean right.
        let cell = Cell::new(0, -1);
        assert_eq!(cell.step(Direction::NorthEast), Cell::new(1, -2));
        assert_eq!(cell.step(Direction::SouthWest), Cell::new(0, 0));
    }

    #[test]
    fn test_steps_cover_neighbors() {
        for cell in [Cell::new(3, 4), Cell::new(-2, -7)] {
            let mut stepped: Vec<Cell> = Direction::ALL.iter().map(|d| cell.step(*d)).collect();
            let mut neighbors = cell.neighbors().to_vec();
            stepped.sort();
            neighbors.sort();
            assert_eq!(stepped, neighbors);
        }
    }

    #[test]
    fn test_direction_round_trip() {
        let cell = Cell::new(5, -3);
        for direction in Direction::ALL {
            let next = cell.step(direction);
            assert_eq!(cell.direction(&next), direction);
            assert_eq!(next.step(direction.opposite()), cell);
        }
    }

    #[test]
    #[should_panic(expected = "non-adjacent")]
    fn test_direction_rejects_far_cells() {
        Cell::ORIGIN.direction(&Cell::new(5, 5));
    }
}
