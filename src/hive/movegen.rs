//! # Move Generation
//!
//! Every legal destination is drawn from the *candidate squares*: the union
//! of the neighbors of all occupied cells. Placement filters that set by
//! ownership; movement lifts the piece (virtually, through a
//! [`BoardView`]), refuses outright if the lift would split the hive, and
//! then applies the rule of the piece's kind.
//!
//! ## Movement rules
//! - **Queen**: one slide to an empty neighbor
//! - **Beetle**: one step to any neighbor, climbing onto stacks
//! - **Grasshopper**: jumps over a straight run of pieces to the first gap
//! - **Spider**: exactly three slides, never revisiting a cell
//! - **Ant**: any number of slides around the hive
//! - **Ladybug**: two steps across the top of the hive, then one down into a gap
//! - **Mosquito**: the union of the rules of the kinds it touches; a
//!   Mosquito sitting on a stack moves as a Beetle
//!
//! Slides are subject to the gate rule ([`allowed`]): a piece cannot squeeze
//! between two occupied cells.

use super::board::{Board, BoardView};
use super::coord::{Cell, Direction};
use super::piece::PieceKind;
use super::player::PlayerId;
use std::collections::BTreeSet;
use tracing::trace;

/// A set of destination cells, ordered so results are reproducible.
pub type Destinations = BTreeSet<Cell>;

/// Candidate squares for the given view: every neighbor of every occupied cell.
pub fn candidates(view: &BoardView) -> Destinations {
    view.occupied().flat_map(|cell| cell.neighbors()).collect()
}

/// Candidate squares for `board`, ignoring the contribution of `exclude`
/// when its stack is about to empty.
pub fn candidate_squares(board: &Board, exclude: Option<Cell>) -> Destinations {
    match exclude {
        Some(cell) if board.is_occupied(&cell) => candidates(&board.lift(cell)),
        _ => candidates(&board.view()),
    }
}

/// Gate rule: a slide from `from` to the adjacent `to` needs at least one
/// of the two cells flanking that edge to be empty.
///
/// # Panics
/// If the cells are not adjacent.
pub fn allowed(view: &BoardView, from: Cell, to: Cell) -> bool {
    let (left, right) = match from.direction(&to) {
        Direction::East => (Direction::NorthEast, Direction::SouthEast),
        Direction::SouthEast => (Direction::East, Direction::SouthWest),
        Direction::SouthWest => (Direction::SouthEast, Direction::West),
        Direction::West => (Direction::SouthWest, Direction::NorthWest),
        Direction::NorthWest => (Direction::West, Direction::NorthEast),
        Direction::NorthEast => (Direction::NorthWest, Direction::East),
    };
    !view.is_occupied(&from.step(left)) || !view.is_occupied(&from.step(right))
}

/// Legal destinations for a piece of `kind` owned by `owner`: placements when
/// `from` is `None`, otherwise movements of the top piece at `from`.
pub fn legal_moves(board: &Board, kind: PieceKind, owner: PlayerId, from: Option<Cell>) -> Destinations {
    match from {
        None => placements(board, owner),
        Some(from) => movements(board, kind, from),
    }
}

/// Cells where `owner` may put a new piece.
///
/// The first piece goes on the origin and the second anywhere next to it.
/// After that a new piece may only touch its owner's pieces.
pub fn placements(board: &Board, owner: PlayerId) -> Destinations {
    let view = board.view();
    let occupied: Vec<Cell> = view.occupied().collect();
    match occupied.as_slice() {
        [] => BTreeSet::from([Cell::ORIGIN]),
        [lone] => lone.neighbors().into_iter().collect(),
        _ => candidates(&view)
            .into_iter()
            .filter(|cell| !view.is_occupied(cell))
            .filter(|cell| {
                cell.neighbors()
                    .iter()
                    .all(|n| view.top(n).map_or(true, |piece| piece.owner == owner))
            })
            .collect(),
    }
}

/// Where the top piece at `from` may move if it moves as a `kind`.
///
/// # Panics
/// If `from` is empty.
pub fn movements(board: &Board, kind: PieceKind, from: Cell) -> Destinations {
    if board.breaks_hive(from) {
        trace!(%from, ?kind, "pinned by the one-hive rule");
        return Destinations::new();
    }

    let view = board.lift(from);
    let candidates = candidates(&view);
    let mut moves = destinations(&view, kind, from, &candidates);
    moves.remove(&from);
    trace!(%from, ?kind, count = moves.len(), "movement destinations");
    moves
}

fn destinations(view: &BoardView, kind: PieceKind, from: Cell, candidates: &Destinations) -> Destinations {
    match kind {
        PieceKind::Queen => slides(view, candidates, from).into_iter().collect(),
        PieceKind::Beetle => beetle_moves(from, candidates),
        PieceKind::Grasshopper => grasshopper_moves(view, from),
        PieceKind::Spider => spider_moves(view, from, candidates),
        PieceKind::Ant => ant_moves(view, from, candidates),
        PieceKind::Ladybug => ladybug_moves(view, from, candidates),
        PieceKind::Mosquito => mosquito_moves(view, from, candidates),
    }
}

/// Single slides from `cell`: empty, next to the hive, and through an open gate.
fn slides(view: &BoardView, candidates: &Destinations, cell: Cell) -> Vec<Cell> {
    cell.neighbors()
        .into_iter()
        .filter(|n| !view.is_occupied(n) && candidates.contains(n) && allowed(view, cell, *n))
        .collect()
}

fn beetle_moves(from: Cell, candidates: &Destinations) -> Destinations {
    from.neighbors()
        .into_iter()
        .filter(|n| candidates.contains(n))
        .collect()
}

fn grasshopper_moves(view: &BoardView, from: Cell) -> Destinations {
    Direction::ALL
        .into_iter()
        .filter_map(|direction| {
            let mut cell = from.step(direction);
            // Must jump over at least one piece
            if !view.is_occupied(&cell) {
                return None;
            }
            while view.is_occupied(&cell) {
                cell = cell.step(direction);
            }
            Some(cell)
        })
        .collect()
}

fn spider_moves(view: &BoardView, from: Cell, candidates: &Destinations) -> Destinations {
    let mut reached = BTreeSet::from([from]);
    let mut frontier = BTreeSet::from([from]);

    for _ in 0..3 {
        let next: Destinations = frontier
            .iter()
            .flat_map(|cell| slides(view, candidates, *cell))
            .filter(|cell| !reached.contains(cell))
            .collect();
        reached.extend(next.iter().copied());
        frontier = next;
    }

    frontier
}

fn ant_moves(view: &BoardView, from: Cell, candidates: &Destinations) -> Destinations {
    let mut reached = BTreeSet::from([from]);
    let mut pending = vec![from];

    while let Some(cell) = pending.pop() {
        for next in slides(view, candidates, cell) {
            if reached.insert(next) {
                pending.push(next);
            }
        }
    }

    reached.remove(&from);
    reached
}

fn ladybug_moves(view: &BoardView, from: Cell, candidates: &Destinations) -> Destinations {
    let climb = |cells: &Destinations| -> Destinations {
        cells
            .iter()
            .flat_map(|cell| cell.neighbors())
            .filter(|n| view.is_occupied(n))
            .collect()
    };

    let first = climb(&BTreeSet::from([from]));
    let second = climb(&first);
    second
        .iter()
        .flat_map(|cell| cell.neighbors())
        .filter(|n| !view.is_occupied(n) && candidates.contains(n))
        .collect()
}

fn mosquito_moves(view: &BoardView, from: Cell, candidates: &Destinations) -> Destinations {
    // Still on top of a stack after lifting: it is riding the hive.
    if view.is_occupied(&from) {
        return beetle_moves(from, candidates);
    }

    let touched: BTreeSet<PieceKind> = from
        .neighbors()
        .iter()
        .filter_map(|n| view.top(n))
        .map(|piece| piece.kind)
        .filter(|kind| *kind != PieceKind::Mosquito)
        .collect();

    touched
        .into_iter()
        .flat_map(|kind| destinations(view, kind, from, candidates))
        .collect()
}
