//! Actions a player can take, and their text notation.
//!
//! - `Q(0,0)` places a queen at (0,0)
//! - `A(0,0)->(1,1)` moves the ant at (0,0) to (1,1)
//! - `pass` passes the turn

use super::coord::Cell;
use super::error::ParseError;
use super::piece::PieceKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Represents a move in Hive
///
/// A move is either placing a new piece or moving an existing piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Place a new piece from the hand
    Place { kind: PieceKind, to: Cell },
    /// Move the top piece of `from`, which must be a `kind`
    Move { kind: PieceKind, from: Cell, to: Cell },
    /// Pass turn (only valid when no other action is available)
    Pass,
}

impl Action {
    pub fn kind(&self) -> Option<PieceKind> {
        match self {
            Action::Place { kind, .. } | Action::Move { kind, .. } => Some(*kind),
            Action::Pass => None,
        }
    }

    pub fn source(&self) -> Option<Cell> {
        match self {
            Action::Move { from, .. } => Some(*from),
            _ => None,
        }
    }

    pub fn destination(&self) -> Option<Cell> {
        match self {
            Action::Place { to, .. } | Action::Move { to, .. } => Some(*to),
            Action::Pass => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Place { kind, to } => write!(f, "{}{}", kind.char(), to),
            Action::Move { kind, from, to } => write!(f, "{}{}->{}", kind.char(), from, to),
            Action::Pass => write!(f, "pass"),
        }
    }
}

fn parse_cell(s: &str) -> Result<Cell, ParseError> {
    let bad = || ParseError::BadCell(s.to_string());
    let inner = s
        .trim()
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(bad)?;
    let (x, y) = inner.split_once(',').ok_or_else(bad)?;
    let x = x.trim().parse().map_err(|_| bad())?;
    let y = y.trim().parse().map_err(|_| bad())?;
    Ok(Cell::new(x, y))
}

impl FromStr for Action {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("pass") {
            return Ok(Action::Pass);
        }

        let open = s.find('(').ok_or_else(|| ParseError::BadAction(s.to_string()))?;
        let kind: PieceKind = s[..open].parse()?;
        let rest = &s[open..];

        match rest.split_once("->") {
            Some((from, to)) => Ok(Action::Move {
                kind,
                from: parse_cell(from)?,
                to: parse_cell(to)?,
            }),
            None => Ok(Action::Place {
                kind,
                to: parse_cell(rest)?,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse_agree() {
        let actions = [
            Action::Place { kind: PieceKind::Queen, to: Cell::new(0, 0) },
            Action::Move { kind: PieceKind::Ant, from: Cell::new(-3, 2), to: Cell::new(4, -1) },
            Action::Pass,
        ];
        for action in actions {
            assert_eq!(action.to_string().parse::<Action>(), Ok(action));
        }
    }

    #[test]
    fn test_parse_tolerates_spaces() {
        let action: Action = " b( 1 , -2 ) -> ( 1, -1 ) ".parse().unwrap();
        assert_eq!(
            action,
            Action::Move { kind: PieceKind::Beetle, from: Cell::new(1, -2), to: Cell::new(1, -1) }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("Z(0,0)".parse::<Action>(), Err(ParseError::UnknownPiece(_))));
        assert!(matches!("Q(0;0)".parse::<Action>(), Err(ParseError::BadCell(_))));
        assert!(matches!("queen".parse::<Action>(), Err(ParseError::BadAction(_))));
    }
}
