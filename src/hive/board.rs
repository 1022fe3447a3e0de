//! # Board Store and Connectivity
//!
//! The board is a sparse map from [`Cell`] to a stack of pieces, bottom to
//! top. Only the top piece of a stack is visible, movable or attacked.
//! The store itself does no rule checking.
//!
//! Legality checks never mutate the board. Instead they work on a
//! [`BoardView`], a read-only lens that can pretend the top piece of one
//! cell has been picked up. That keeps every query `&self`, so independent
//! checks on the same position can run side by side.

use super::coord::Cell;
use super::piece::Piece;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

/// The board: maps cells to stacks of pieces (bottom to top)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Stack>", into = "Vec<Stack>")]
pub struct Board {
    stacks: HashMap<Cell, Vec<Piece>>,
}

/// Serialized form of one occupied cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stack {
    pub cell: Cell,
    pub pieces: Vec<Piece>,
}

/// Heights are reassigned from stack order; the stored `z` is not trusted.
impl From<Vec<Stack>> for Board {
    fn from(stacks: Vec<Stack>) -> Self {
        let mut board = Board::new();
        for stack in stacks {
            for piece in stack.pieces {
                board.push(stack.cell, piece);
            }
        }
        board
    }
}

impl From<Board> for Vec<Stack> {
    fn from(board: Board) -> Self {
        let mut stacks: Vec<Stack> = board
            .stacks
            .into_iter()
            .map(|(cell, pieces)| Stack { cell, pieces })
            .collect();
        stacks.sort_by_key(|s| s.cell);
        stacks
    }
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the top piece at a cell (if any)
    pub fn top(&self, cell: &Cell) -> Option<&Piece> {
        self.stacks.get(cell).and_then(|stack| stack.last())
    }

    /// Get the full stack at a cell, bottom first
    pub fn all_at(&self, cell: &Cell) -> &[Piece] {
        self.stacks.get(cell).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn height(&self, cell: &Cell) -> usize {
        self.all_at(cell).len()
    }

    pub fn is_occupied(&self, cell: &Cell) -> bool {
        self.height(cell) > 0
    }

    /// Put a piece on top of the stack at `cell`, setting its height.
    pub fn push(&mut self, cell: Cell, mut piece: Piece) {
        let stack = self.stacks.entry(cell).or_default();
        piece.z = stack.len();
        stack.push(piece);
    }

    /// Remove and return the top piece at `cell`, dropping the cell once empty.
    pub fn pop(&mut self, cell: &Cell) -> Option<Piece> {
        let stack = self.stacks.get_mut(cell)?;
        let piece = stack.pop();
        if stack.is_empty() {
            self.stacks.remove(cell);
        }
        piece
    }

    /// All occupied cells, in no particular order
    pub fn occupied(&self) -> impl Iterator<Item = &Cell> {
        self.stacks.keys()
    }

    /// Every piece on the board with its cell, including buried ones
    pub fn pieces(&self) -> impl Iterator<Item = (Cell, &Piece)> {
        self.stacks
            .iter()
            .flat_map(|(cell, stack)| stack.iter().map(move |piece| (*cell, piece)))
    }

    pub fn piece_count(&self) -> usize {
        self.stacks.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    pub fn clear(&mut self) {
        self.stacks.clear();
    }

    /// The board exactly as it is.
    pub fn view(&self) -> BoardView<'_> {
        BoardView {
            board: self,
            lifted: None,
        }
    }

    /// The board as it would look with the top piece at `cell` picked up.
    ///
    /// # Panics
    /// If `cell` is empty; there is nothing to pick up.
    pub fn lift(&self, cell: Cell) -> BoardView<'_> {
        assert!(self.is_occupied(&cell), "cannot lift from empty cell {}", cell);
        BoardView {
            board: self,
            lifted: Some(cell),
        }
    }

    /// One-hive check: would picking up the top piece at `cell` split the hive?
    pub fn breaks_hive(&self, cell: Cell) -> bool {
        !self.lift(cell).is_connected()
    }

    /// True when every occupied cell belongs to one connected group.
    pub fn is_connected(&self) -> bool {
        self.view().is_connected()
    }
}

/// Read-only view of a [`Board`], optionally with one top piece picked up.
#[derive(Debug, Clone, Copy)]
pub struct BoardView<'a> {
    board: &'a Board,
    lifted: Option<Cell>,
}

impl<'a> BoardView<'a> {
    /// The cell whose top piece is picked up, if any.
    pub fn lifted(&self) -> Option<Cell> {
        self.lifted
    }

    pub fn height(&self, cell: &Cell) -> usize {
        let height = self.board.height(cell);
        if self.lifted == Some(*cell) {
            height - 1
        } else {
            height
        }
    }

    pub fn is_occupied(&self, cell: &Cell) -> bool {
        self.height(cell) > 0
    }

    pub fn top(&self, cell: &Cell) -> Option<&'a Piece> {
        let height = self.height(cell);
        if height == 0 {
            None
        } else {
            self.board.all_at(cell).get(height - 1)
        }
    }

    /// Occupied cells as seen through this view.
    pub fn occupied(&self) -> impl Iterator<Item = Cell> + '_ {
        self.board
            .occupied()
            .copied()
            .filter(move |cell| self.is_occupied(cell))
    }

    /// Breadth-first flood fill from an arbitrary occupied cell; connected
    /// when the fill reaches every occupied cell. An empty view counts as connected.
    pub fn is_connected(&self) -> bool {
        let occupied: HashSet<Cell> = self.occupied().collect();
        let Some(start) = occupied.iter().next().copied() else {
            return true;
        };

        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            for neighbor in current.neighbors() {
                if occupied.contains(&neighbor) && visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }

        visited.len() == occupied.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hive::piece::PieceKind;
    use crate::hive::player::PlayerId;

    fn piece(kind: PieceKind) -> Piece {
        Piece::new(kind, PlayerId(1))
    }

    #[test]
    fn test_push_assigns_height() {
        let mut board = Board::new();
        let cell = Cell::new(2, 3);
        board.push(cell, piece(PieceKind::Ant));
        board.push(cell, piece(PieceKind::Beetle));

        assert_eq!(board.height(&cell), 2);
        assert_eq!(board.top(&cell).map(|p| p.kind), Some(PieceKind::Beetle));
        assert_eq!(board.all_at(&cell)[0].z, 0);
        assert_eq!(board.all_at(&cell)[1].z, 1);
    }

    #[test]
    fn test_pop_removes_empty_cells() {
        let mut board = Board::new();
        let cell = Cell::ORIGIN;
        board.push(cell, piece(PieceKind::Queen));

        assert_eq!(board.pop(&cell).map(|p| p.kind), Some(PieceKind::Queen));
        assert!(board.is_empty());
        assert_eq!(board.pop(&cell), None);
    }

    #[test]
    fn test_lift_hides_only_the_top() {
        let mut board = Board::new();
        let cell = Cell::ORIGIN;
        board.push(cell, piece(PieceKind::Ant));
        board.push(cell, piece(PieceKind::Beetle));

        let view = board.lift(cell);
        assert_eq!(view.lifted(), Some(cell));
        assert_eq!(board.view().lifted(), None);
        assert_eq!(view.height(&cell), 1);
        assert_eq!(view.top(&cell).map(|p| p.kind), Some(PieceKind::Ant));
        assert_eq!(board.height(&cell), 2);
    }

    #[test]
    fn test_breaks_hive_in_a_line() {
        let mut board = Board::new();
        for x in -1..=1 {
            board.push(Cell::new(x, 0), piece(PieceKind::Ant));
        }
        assert!(board.breaks_hive(Cell::new(0, 0)));
        assert!(!board.breaks_hive(Cell::new(-1, 0)));
        assert!(!board.breaks_hive(Cell::new(1, 0)));
    }

    #[test]
    fn test_stacked_piece_never_breaks_hive() {
        let mut board = Board::new();
        for x in -1..=1 {
            board.push(Cell::new(x, 0), piece(PieceKind::Ant));
        }
        board.push(Cell::new(0, 0), piece(PieceKind::Beetle));
        assert!(!board.breaks_hive(Cell::new(0, 0)));
    }

    #[test]
    fn test_lone_piece_does_not_break_hive() {
        let mut board = Board::new();
        board.push(Cell::ORIGIN, piece(PieceKind::Spider));
        assert!(!board.breaks_hive(Cell::ORIGIN));
    }

    #[test]
    #[should_panic(expected = "empty cell")]
    fn test_lift_empty_cell_panics() {
        Board::new().lift(Cell::ORIGIN);
    }

    #[test]
    fn test_deserialize_reassigns_heights() {
        let json = r#"[{"cell":{"x":0,"y":0},"pieces":[
            {"kind":"Ant","owner":1,"z":4},
            {"kind":"Beetle","owner":2,"z":0}
        ]}]"#;
        let board: Board = serde_json::from_str(json).unwrap();
        let heights: Vec<usize> = board.all_at(&Cell::ORIGIN).iter().map(|p| p.z).collect();
        assert_eq!(heights, vec![0, 1]);
        assert_eq!(board.top(&Cell::ORIGIN).map(|p| p.kind), Some(PieceKind::Beetle));
    }
}
