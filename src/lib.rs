//! # Hive Rules Engine
//!
//! Board, move generation and turn logic for the Hive tile game, exposed as a
//! synchronous API for session layers and search engines to call into.
//!
//! - [`hive`]: the engine itself (geometry, board, move generation, facade)
//! - [`game_controller`]: a session-side wrapper that keeps a move history
//! - [`GameState`]: the seam a tree search (MCTS, minimax) drives a game through

pub mod game_controller;
pub mod hive;

pub use game_controller::GameController;
pub use hive::{Action, Cell, Game, Outcome, PieceKind, PlayerId, Verdict};

/// The state of a game as seen by a search engine. Must be cloneable so a
/// search can explore copies; `Send` and `Sync` allow parallel search.
pub trait GameState: Clone + Send + Sync {
    /// The type of a move in the game.
    type Move: Clone + Eq + std::hash::Hash + std::fmt::Debug + Send + Sync;
    /// The identity of a player.
    type Player: Copy + Eq + std::fmt::Debug;

    /// Returns a vector of all possible moves from the current state.
    fn get_possible_moves(&self) -> Vec<Self::Move>;
    /// Applies a move to the state, modifying it.
    fn make_move(&mut self, mv: &Self::Move);
    /// Returns true if the game is over.
    fn is_terminal(&self) -> bool;
    /// Returns the winner of the game, if any.
    /// Should return `None` for a draw or if the game is not over.
    fn get_winner(&self) -> Option<Self::Player>;
    /// Returns the player whose turn it is to move.
    fn get_current_player(&self) -> Self::Player;
}
