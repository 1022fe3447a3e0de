//! # Hive Rules Engine
//!
//! Hive is a two-player tile game with no board: pieces are laid next to
//! each other on an unbounded hex grid and the pieces themselves form the
//! playing surface. Each piece type has its own way of moving:
//! - **Queen Bee**: slides one space; must be placed by each player's 4th turn
//! - **Beetle**: moves one space; can climb on top of the hive
//! - **Spider**: slides exactly three spaces around the hive
//! - **Grasshopper**: jumps in a straight line over pieces
//! - **Ant**: slides any number of spaces around the hive
//! - **Mosquito**: moves like any piece it touches
//! - **Ladybug**: two steps over the top of the hive, then one down
//!
//! ## Rules
//! - The first piece goes on the origin; the second anywhere next to it
//! - After that, new pieces may only touch their owner's pieces
//! - The hive must remain connected at all times (one-hive rule)
//! - Sliding pieces cannot squeeze through a gap between two pieces
//! - A player loses when all six cells around their queen are occupied
//!
//! ## Layout
//! - [`coord`]: offset hex coordinates and directions
//! - [`board`]: stacked board storage and the connectivity check
//! - [`movegen`]: candidate squares and per-piece legal moves
//! - [`player`]: hands and turn rules
//! - [`game`]: the facade that validates and applies actions

pub mod action;
pub mod board;
pub mod coord;
pub mod error;
pub mod game;
pub mod movegen;
pub mod piece;
pub mod player;
pub mod render;

pub use action::Action;
pub use board::{Board, BoardView};
pub use coord::{Cell, Direction};
pub use error::{ParseError, Rejection, SetupError};
pub use game::{Game, GameConfig, Outcome, Phase, Verdict};
pub use movegen::Destinations;
pub use piece::{Piece, PieceKind};
pub use player::{Hand, Player, PlayerId};
