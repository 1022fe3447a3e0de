//! # Game Controller Module - Session-Side Game Ownership
//!
//! A session layer holds one [`GameController`] per running game. The
//! controller owns the authoritative [`Game`], forwards every action to it,
//! and records the accepted ones in a move history.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       GameController                                │
//! │  ┌─────────────────────────────────────────────────────────────┐    │
//! │  │              Authoritative Game                             │    │
//! │  │  • Single source of truth                                   │    │
//! │  │  • All actions validated by the engine before application   │    │
//! │  │  • Move history maintained                                  │    │
//! │  └─────────────────────────────────────────────────────────────┘    │
//! │                           │                                         │
//! │              ┌────────────┼────────────┐                            │
//! │              ▼            ▼            ▼                            │
//! │  ┌───────────────┐ ┌───────────┐ ┌─────────────────┐                │
//! │  │ Search engine │ │ Renderer  │ │ Network handler │                │
//! │  │ (cloned game) │ │ (view)    │ │ (requests)      │                │
//! │  └───────────────┘ └───────────┘ └─────────────────┘                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::hive::{Action, Game, Outcome, PlayerId, Verdict};
use std::time::SystemTime;

/// A single entry in the move history
#[derive(Debug, Clone)]
pub struct MoveHistoryEntry {
    /// When the action was accepted
    pub timestamp: SystemTime,
    /// Player who acted
    pub player: PlayerId,
    /// The accepted action
    pub action: Action,
    /// Move number (1-indexed)
    pub move_number: usize,
}

impl MoveHistoryEntry {
    /// Create a new move history entry
    pub fn new(player: PlayerId, action: Action, move_number: usize) -> Self {
        Self {
            timestamp: SystemTime::now(),
            player,
            action,
            move_number,
        }
    }
}

/// The controller that owns the authoritative game
///
/// # Usage
/// ```rust
/// use hive::{Action, Cell, Game, GameController, Outcome, PieceKind, PlayerId};
///
/// let game = Game::new([PlayerId(1), PlayerId(2)]).unwrap();
/// let mut controller = GameController::new(game);
///
/// let opening = Action::Place { kind: PieceKind::Spider, to: Cell::ORIGIN };
/// assert_eq!(controller.try_action(PlayerId(1), opening), Outcome::Placed);
/// assert_eq!(controller.move_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct GameController {
    /// The authoritative game
    game: Game,
    /// Complete history of accepted actions
    move_history: Vec<MoveHistoryEntry>,
}

impl GameController {
    /// Create a new game controller around a game
    pub fn new(game: Game) -> Self {
        Self {
            game,
            move_history: Vec::new(),
        }
    }

    /// Attempt an action on behalf of `player`
    ///
    /// Accepted actions that change the game are appended to the history.
    pub fn try_action(&mut self, player: PlayerId, action: Action) -> Outcome {
        let outcome = self.game.play(player, action);
        if matches!(outcome, Outcome::Placed | Outcome::Moved | Outcome::Passed) {
            let move_number = self.move_history.len() + 1;
            self.move_history.push(MoveHistoryEntry::new(player, action, move_number));
        }
        outcome
    }

    /// Get a clone of the game for a search engine to explore
    pub fn get_state_for_search(&self) -> Game {
        self.game.clone()
    }

    /// The authoritative game, read-only
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Replace the game wholesale, e.g. after loading a snapshot. History is cleared.
    pub fn load(&mut self, game: Game) {
        self.game = game;
        self.move_history.clear();
    }

    /// Get the complete move history
    pub fn get_move_history(&self) -> &[MoveHistoryEntry] {
        &self.move_history
    }

    /// Get the number of recorded actions
    pub fn move_count(&self) -> usize {
        self.move_history.len()
    }

    /// Get the last action, if any
    pub fn get_last_move(&self) -> Option<&MoveHistoryEntry> {
        self.move_history.last()
    }

    /// Start a rematch, optionally flipping the seating order
    pub fn reset(&mut self, reverse_order: bool) {
        self.game.reset(reverse_order);
        self.move_history.clear();
    }

    /// Format move history as plain text
    pub fn format_history(&self) -> String {
        if self.move_history.is_empty() {
            return String::from("No moves made yet.");
        }

        let mut output = String::from("=== Hive Game History ===\n\n");
        for entry in &self.move_history {
            output.push_str(&format!(
                "{}. {} - {}\n",
                entry.move_number, entry.player, entry.action
            ));
        }

        match self.game.verdict() {
            Some(Verdict::Decided { winner: Some(winner), .. }) => {
                output.push_str(&format!("\nResult: {} wins!\n", winner));
            }
            Some(Verdict::Decided { winner: None, loser }) => {
                output.push_str(&format!("\nResult: {} loses\n", loser));
            }
            Some(Verdict::Draw) => {
                output.push_str("\nResult: Draw\n");
            }
            None => {
                output.push_str(&format!(
                    "\n(Game in progress - {} to move)\n",
                    self.game.current_player()
                ));
            }
        }

        output
    }
}
