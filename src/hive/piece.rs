//! Piece kinds and placed pieces.

use super::error::ParseError;
use super::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Piece types in Hive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceKind {
    Queen,       // 1 per player - slides 1 space
    Spider,      // 2 per player - slides exactly 3 spaces
    Beetle,      // 2 per player - moves 1 space, can climb
    Grasshopper, // 3 per player - jumps in a straight line
    Ant,         // 3 per player - slides any distance
    Mosquito,    // 1 per player - copies what it touches
    Ladybug,     // 1 per player - 2 on top of the hive, 1 down
}

impl PieceKind {
    pub const COUNT: usize = 7;

    pub const ALL: [PieceKind; PieceKind::COUNT] = [
        PieceKind::Queen,
        PieceKind::Spider,
        PieceKind::Beetle,
        PieceKind::Grasshopper,
        PieceKind::Ant,
        PieceKind::Mosquito,
        PieceKind::Ladybug,
    ];

    /// Number of pieces of this kind each player starts with
    pub fn initial_supply(&self) -> u8 {
        match self {
            PieceKind::Queen => 1,
            PieceKind::Spider => 2,
            PieceKind::Beetle => 2,
            PieceKind::Grasshopper => 3,
            PieceKind::Ant => 3,
            PieceKind::Mosquito => 1,
            PieceKind::Ladybug => 1,
        }
    }

    /// Position in [`PieceKind::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Get a single-character representation of the piece
    pub fn char(&self) -> char {
        match self {
            PieceKind::Queen => 'Q',
            PieceKind::Spider => 'S',
            PieceKind::Beetle => 'B',
            PieceKind::Grasshopper => 'G',
            PieceKind::Ant => 'A',
            PieceKind::Mosquito => 'M',
            PieceKind::Ladybug => 'L',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PieceKind::Queen => "queen",
            PieceKind::Spider => "spider",
            PieceKind::Beetle => "beetle",
            PieceKind::Grasshopper => "grasshopper",
            PieceKind::Ant => "ant",
            PieceKind::Mosquito => "mosquito",
            PieceKind::Ladybug => "ladybug",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts either the single letter or the full name, case-insensitively.
impl FromStr for PieceKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        PieceKind::ALL
            .into_iter()
            .find(|kind| {
                wanted == kind.name() || wanted == kind.char().to_ascii_lowercase().to_string()
            })
            .ok_or_else(|| ParseError::UnknownPiece(s.to_string()))
    }
}

/// A piece on the board.
///
/// `z` is the piece's height in its cell's stack (0 on the ground) and is
/// assigned by [`Board::push`](super::Board::push).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub owner: PlayerId,
    pub z: usize,
}

impl Piece {
    pub fn new(kind: PieceKind, owner: PlayerId) -> Self {
        Self { kind, owner, z: 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supply_totals() {
        let total: u8 = PieceKind::ALL.iter().map(|k| k.initial_supply()).sum();
        assert_eq!(total, 13);
    }

    #[test]
    fn test_index_matches_all() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_parse_letters_and_names() {
        assert_eq!("G".parse::<PieceKind>(), Ok(PieceKind::Grasshopper));
        assert_eq!("ladybug".parse::<PieceKind>(), Ok(PieceKind::Ladybug));
        assert_eq!(" m ".parse::<PieceKind>(), Ok(PieceKind::Mosquito));
        assert!("X".parse::<PieceKind>().is_err());
    }
}
