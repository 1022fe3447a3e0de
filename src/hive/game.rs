//! # Game Facade
//!
//! [`Game`] owns one board and its seated players and is the only thing
//! outside callers (a session layer, a search engine) talk to. Each
//! accepted action runs validate → apply → advance turn → detect verdict as
//! a single `&mut self` call, so the borrow checker enforces the
//! single-writer discipline. Independent games share nothing and can live
//! on different threads.
//!
//! ## Lifecycle
//! ```text
//! Setup ──first action──► InProgress ──queen surrounded──► Finished
//!   ▲                                                        │
//!   └──────────────────────── reset ─────────────────────────┘
//! ```
//!
//! Illegal input is never an error: every action returns an [`Outcome`],
//! and refusals carry a [`Rejection`] explaining why.

use super::action::Action;
use super::board::Board;
use super::coord::Cell;
use super::error::{Rejection, SetupError};
use super::movegen::{self, Destinations};
use super::piece::{Piece, PieceKind};
use super::player::{Hand, Player, PlayerId};
use crate::GameState;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Rule options for a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Own turns a player may take before an unplaced queen becomes mandatory.
    pub queen_deadline: u32,
    /// Forbid moving pieces until the mover's queen is on the board.
    pub movement_requires_queen: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            queen_deadline: 3,
            movement_requires_queen: false,
        }
    }
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// One queen was surrounded. `winner` is only known in two-player games.
    Decided {
        winner: Option<PlayerId>,
        loser: PlayerId,
    },
    /// Several queens were surrounded by the same action.
    Draw,
}

/// Result of attempting an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Placed,
    Moved,
    /// A piece was put back on its own cell; nothing changed and no turn was used.
    Replaced,
    Passed,
    Rejected(Rejection),
}

impl Outcome {
    /// True for every outcome except [`Outcome::Rejected`].
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Outcome::Rejected(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Setup,
    InProgress,
    Finished,
}

/// Represents the complete state of a Hive game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GameSnapshot")]
pub struct Game {
    board: Board,
    /// Seats in turn order
    players: Vec<Player>,
    /// Index into `players` of whoever acts next
    current: usize,
    /// Accepted turns so far, across all players
    move_count: u32,
    verdict: Option<Verdict>,
    config: GameConfig,
}

/// Unchecked wire form of a [`Game`]; becomes one only through `TryFrom`.
#[derive(Deserialize)]
struct GameSnapshot {
    board: Board,
    players: Vec<Player>,
    current: usize,
    move_count: u32,
    verdict: Option<Verdict>,
    config: GameConfig,
}

impl TryFrom<GameSnapshot> for Game {
    type Error = SetupError;

    fn try_from(snapshot: GameSnapshot) -> Result<Self, Self::Error> {
        let GameSnapshot { board, players, current, move_count, verdict, config } = snapshot;

        let mut seen = HashSet::new();
        for player in &players {
            if !seen.insert(player.id) {
                return Err(SetupError::DuplicatePlayer(player.id));
            }
        }
        if players.is_empty() {
            return Err(SetupError::NoPlayers);
        }
        if current >= players.len() {
            return Err(SetupError::InvalidSnapshot(format!(
                "seat {} to move, but only {} seated",
                current,
                players.len()
            )));
        }
        if let Some((_, piece)) = board.pieces().find(|(_, piece)| !seen.contains(&piece.owner)) {
            return Err(SetupError::InvalidSnapshot(format!(
                "{} on the board belongs to unseated {}",
                piece.kind, piece.owner
            )));
        }

        let game = Self { board, players, current, move_count, verdict, config };
        for player in &game.players {
            for kind in PieceKind::ALL {
                let accounted = player.hand.remaining(kind) as usize + game.placed_count(player.id, kind);
                if accounted > kind.initial_supply() as usize {
                    return Err(SetupError::InvalidSnapshot(format!(
                        "{} has {} {} but the supply is {}",
                        player.id,
                        accounted,
                        kind,
                        kind.initial_supply()
                    )));
                }
            }
        }
        Ok(game)
    }
}

impl Game {
    /// Create a new game with the default rules. Turn order follows `players`.
    pub fn new(players: impl IntoIterator<Item = PlayerId>) -> Result<Self, SetupError> {
        Self::with_config(players, GameConfig::default())
    }

    pub fn with_config(
        players: impl IntoIterator<Item = PlayerId>,
        config: GameConfig,
    ) -> Result<Self, SetupError> {
        let mut seen = HashSet::new();
        let mut seats = Vec::new();
        for id in players {
            if !seen.insert(id) {
                return Err(SetupError::DuplicatePlayer(id));
            }
            seats.push(Player::new(id));
        }
        if seats.is_empty() {
            return Err(SetupError::NoPlayers);
        }

        Ok(Self {
            board: Board::new(),
            players: seats,
            current: 0,
            move_count: 0,
            verdict: None,
            config,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Remaining pieces of a seated player.
    pub fn hand(&self, id: PlayerId) -> Option<&Hand> {
        self.player(id).map(|p| &p.hand)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_player(&self) -> PlayerId {
        self.players[self.current].id
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// The terminal check: `Some` once a queen has been surrounded.
    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    pub fn phase(&self) -> Phase {
        if self.verdict.is_some() {
            Phase::Finished
        } else if self.move_count == 0 && self.board.is_empty() {
            Phase::Setup
        } else {
            Phase::InProgress
        }
    }

    /// Pieces of `kind` that `id` has on the board, buried ones included.
    pub fn placed_count(&self, id: PlayerId, kind: PieceKind) -> usize {
        self.board
            .pieces()
            .filter(|(_, piece)| piece.owner == id && piece.kind == kind)
            .count()
    }

    fn seat(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    /// Legal destinations for a piece of `kind`, placed new when `from` is
    /// `None` or picked up from `from` otherwise. `owner` defaults to the
    /// player to move. Any refusal yields an empty set.
    pub fn legal_moves(&self, kind: PieceKind, owner: Option<PlayerId>, from: Option<Cell>) -> Destinations {
        if self.verdict.is_some() {
            return Destinations::new();
        }
        let seat = match owner {
            Some(id) => self.seat(id),
            None => Some(self.current),
        };
        seat.and_then(|seat| self.destinations_for(seat, kind, from).ok())
            .unwrap_or_default()
    }

    /// Whether `id` may pick up the top piece at `cell`: it is theirs and has somewhere to go.
    pub fn can_pick_up(&self, id: PlayerId, cell: Cell) -> bool {
        match self.board.top(&cell) {
            Some(piece) if piece.owner == id => !self.legal_moves(piece.kind, Some(id), Some(cell)).is_empty(),
            _ => false,
        }
    }

    fn destinations_for(&self, seat: usize, kind: PieceKind, from: Option<Cell>) -> Result<Destinations, Rejection> {
        let player = &self.players[seat];
        if player.queen_restricted(kind, self.config.queen_deadline) {
            return Err(Rejection::QueenRequired);
        }

        match from {
            None => {
                if !player.can_place(kind) {
                    return Err(Rejection::NoneRemaining(kind));
                }
                Ok(movegen::placements(&self.board, player.id))
            }
            Some(from) => {
                if self.config.movement_requires_queen && !player.queen_placed() {
                    return Err(Rejection::QueenNotPlaced);
                }
                let top = self.board.top(&from).ok_or(Rejection::EmptySource)?;
                if top.owner != player.id {
                    return Err(Rejection::NotYourPiece);
                }
                if top.kind != kind {
                    return Err(Rejection::WrongPiece(kind));
                }
                Ok(movegen::movements(&self.board, kind, from))
            }
        }
    }

    /// Every legal action for `id`, or just [`Action::Pass`] when there is none.
    /// Empty once the game is over.
    pub fn actions(&self, id: PlayerId) -> Vec<Action> {
        let Some(seat) = self.seat(id) else {
            return Vec::new();
        };
        if self.verdict.is_some() {
            return Vec::new();
        }

        let player = &self.players[seat];
        let deadline = self.config.queen_deadline;
        let mut actions = Vec::new();

        let placeable: Vec<PieceKind> = PieceKind::ALL
            .into_iter()
            .filter(|kind| player.can_place(*kind) && !player.queen_restricted(*kind, deadline))
            .collect();
        if !placeable.is_empty() {
            let spots = movegen::placements(&self.board, id);
            for kind in placeable {
                actions.extend(spots.iter().map(|to| Action::Place { kind, to: *to }));
            }
        }

        if !self.config.movement_requires_queen || player.queen_placed() {
            let mut sources: Vec<(Cell, PieceKind)> = self
                .board
                .occupied()
                .filter_map(|cell| self.board.top(cell).map(|piece| (*cell, *piece)))
                .filter(|(_, piece)| piece.owner == id && !player.queen_restricted(piece.kind, deadline))
                .map(|(cell, piece)| (cell, piece.kind))
                .collect();
            sources.sort();
            for (from, kind) in sources {
                let moves = movegen::movements(&self.board, kind, from);
                actions.extend(moves.into_iter().map(|to| Action::Move { kind, from, to }));
            }
        }

        if actions.is_empty() {
            actions.push(Action::Pass);
        }
        actions
    }

    /// Validate and apply one placement (`from` is `None`) or movement.
    pub fn apply(&mut self, id: PlayerId, kind: PieceKind, from: Option<Cell>, to: Cell) -> Outcome {
        if self.verdict.is_some() {
            return self.reject(id, Rejection::GameOver);
        }
        if from == Some(to) {
            debug!(player = %id, cell = %to, "piece put back in place");
            return Outcome::Replaced;
        }
        let seat = match self.turn_seat(id) {
            Ok(seat) => seat,
            Err(reason) => return self.reject(id, reason),
        };

        let destinations = match self.destinations_for(seat, kind, from) {
            Ok(destinations) => destinations,
            Err(reason) => return self.reject(id, reason),
        };
        if !destinations.contains(&to) {
            return self.reject(id, Rejection::IllegalDestination);
        }

        let outcome = match from {
            Some(from) => {
                if let Some(piece) = self.board.pop(&from) {
                    self.board.push(to, piece);
                }
                Outcome::Moved
            }
            None => {
                self.players[seat].hand.take(kind);
                self.board.push(to, Piece::new(kind, id));
                Outcome::Placed
            }
        };
        debug!(player = %id, ?kind, ?from, %to, ?outcome, "action accepted");

        self.finish_turn(seat);
        outcome
    }

    /// Apply an [`Action`] on behalf of `id`.
    pub fn play(&mut self, id: PlayerId, action: Action) -> Outcome {
        match action {
            Action::Place { kind, to } => self.apply(id, kind, None, to),
            Action::Move { kind, from, to } => self.apply(id, kind, Some(from), to),
            Action::Pass => self.pass(id),
        }
    }

    /// Skip the turn of a player who has nothing legal to do.
    pub fn pass(&mut self, id: PlayerId) -> Outcome {
        if self.verdict.is_some() {
            return self.reject(id, Rejection::GameOver);
        }
        let seat = match self.turn_seat(id) {
            Ok(seat) => seat,
            Err(reason) => return self.reject(id, reason),
        };
        if self.actions(id) != [Action::Pass] {
            return self.reject(id, Rejection::MovesAvailable);
        }

        debug!(player = %id, "turn passed");
        self.finish_turn(seat);
        Outcome::Passed
    }

    /// Clear the board and hands for a rematch, keeping the seated players.
    /// With `reverse_order` the seating order is flipped so someone else opens.
    pub fn reset(&mut self, reverse_order: bool) {
        self.board.clear();
        for player in &mut self.players {
            player.reset();
        }
        if reverse_order {
            self.players.reverse();
        }
        self.current = 0;
        self.move_count = 0;
        self.verdict = None;
        info!(first = %self.current_player(), "game reset");
    }

    fn turn_seat(&self, id: PlayerId) -> Result<usize, Rejection> {
        match self.seat(id) {
            None => Err(Rejection::UnknownPlayer),
            Some(seat) if seat != self.current => Err(Rejection::NotYourTurn),
            Some(seat) => Ok(seat),
        }
    }

    fn reject(&self, id: PlayerId, reason: Rejection) -> Outcome {
        debug!(player = %id, %reason, "action rejected");
        Outcome::Rejected(reason)
    }

    fn finish_turn(&mut self, seat: usize) {
        self.current = (self.current + 1) % self.players.len();
        self.move_count += 1;
        self.players[seat].turns += 1;

        self.verdict = self.detect_verdict();
        if let Some(verdict) = self.verdict {
            info!(?verdict, moves = self.move_count, "game finished");
        }
    }

    /// A queen loses when all six of its neighbors are occupied.
    fn detect_verdict(&self) -> Option<Verdict> {
        let losers: Vec<PlayerId> = self
            .board
            .pieces()
            .filter(|(_, piece)| piece.kind == PieceKind::Queen)
            .filter(|(cell, _)| cell.neighbors().iter().all(|n| self.board.is_occupied(n)))
            .map(|(_, piece)| piece.owner)
            .collect();

        match losers.as_slice() {
            [] => None,
            [loser] => {
                let winner = if self.players.len() == 2 {
                    self.players.iter().map(|p| p.id).find(|id| id != loser)
                } else {
                    None
                };
                Some(Verdict::Decided { winner, loser: *loser })
            }
            _ => Some(Verdict::Draw),
        }
    }
}

impl GameState for Game {
    type Move = Action;
    type Player = PlayerId;

    fn get_possible_moves(&self) -> Vec<Action> {
        self.actions(self.current_player())
    }

    fn make_move(&mut self, mv: &Action) {
        let player = self.current_player();
        let outcome = self.play(player, *mv);
        if let Outcome::Rejected(reason) = outcome {
            warn!(%player, action = %mv, %reason, "search engine played an illegal action");
        }
        debug_assert!(outcome.is_accepted(), "illegal action {} for {}", mv, player);
    }

    fn is_terminal(&self) -> bool {
        self.verdict.is_some()
    }

    fn get_winner(&self) -> Option<PlayerId> {
        match self.verdict {
            Some(Verdict::Decided { winner, .. }) => winner,
            _ => None,
        }
    }

    fn get_current_player(&self) -> PlayerId {
        self.current_player()
    }
}
