//! Error and rejection types for the Hive engine.

use super::piece::PieceKind;
use super::player::PlayerId;
use thiserror::Error;

/// Reasons an action was refused.
///
/// Rejections are ordinary game outcomes (an illegal move, acting out of
/// turn) and are reported through [`Outcome::Rejected`](super::Outcome),
/// never as a `Result` error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("the game is already over")]
    GameOver,
    #[error("it is not this player's turn")]
    NotYourTurn,
    #[error("player is not seated in this game")]
    UnknownPlayer,
    #[error("no {0} left to place")]
    NoneRemaining(PieceKind),
    #[error("the queen must be placed this turn")]
    QueenRequired,
    #[error("pieces cannot move before the queen is placed")]
    QueenNotPlaced,
    #[error("there is no piece on the source cell")]
    EmptySource,
    #[error("the piece on the source cell belongs to another player")]
    NotYourPiece,
    #[error("the piece on the source cell is not a {0}")]
    WrongPiece(PieceKind),
    #[error("not a legal move")]
    IllegalDestination,
    #[error("cannot pass while legal moves remain")]
    MovesAvailable,
}

/// Errors creating a game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("a game needs at least one player")]
    NoPlayers,
    #[error("player {0} is seated twice")]
    DuplicatePlayer(PlayerId),
    #[error("inconsistent snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Errors parsing piece letters and action notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown piece letter {0:?}")]
    UnknownPiece(String),
    #[error("malformed cell {0:?}, expected (x,y)")]
    BadCell(String),
    #[error("malformed action {0:?}")]
    BadAction(String),
}
