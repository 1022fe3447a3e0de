//! # Player State
//!
//! Per-player bookkeeping: remaining pieces in hand and the number of own
//! turns taken, plus the turn rules that depend only on them.

use super::piece::PieceKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a seated player. Mapping to user names is the session layer's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Pieces remaining in a player's hand, indexed by [`PieceKind::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    counts: [u8; PieceKind::COUNT],
}

impl Hand {
    /// A full starting supply.
    pub fn full() -> Self {
        let mut counts = [0; PieceKind::COUNT];
        for kind in PieceKind::ALL {
            counts[kind.index()] = kind.initial_supply();
        }
        Self { counts }
    }

    pub fn remaining(&self, kind: PieceKind) -> u8 {
        self.counts[kind.index()]
    }

    /// Take one piece of `kind` out of the hand. Returns false if none are left.
    pub fn take(&mut self, kind: PieceKind) -> bool {
        let count = &mut self.counts[kind.index()];
        if *count == 0 {
            return false;
        }
        *count -= 1;
        true
    }

    /// (kind, remaining) pairs in [`PieceKind::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (PieceKind, u8)> + '_ {
        PieceKind::ALL.into_iter().map(|kind| (kind, self.remaining(kind)))
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self::full()
    }
}

/// A seated player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub hand: Hand,
    /// Own turns taken so far.
    pub turns: u32,
}

impl Player {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            hand: Hand::full(),
            turns: 0,
        }
    }

    pub fn can_place(&self, kind: PieceKind) -> bool {
        self.hand.remaining(kind) > 0
    }

    pub fn queen_placed(&self) -> bool {
        self.hand.remaining(PieceKind::Queen) == 0
    }

    /// True when the player has used up `deadline` turns without placing
    /// their queen, so anything but the queen is off limits.
    pub fn queen_restricted(&self, kind: PieceKind, deadline: u32) -> bool {
        self.turns >= deadline && kind != PieceKind::Queen && !self.queen_placed()
    }

    /// Back to a fresh hand for a rematch.
    pub fn reset(&mut self) {
        self.hand = Hand::full();
        self.turns = 0;
    }
}
