//! Text rendering of a game for terminals.
//!
//! Each cell is four columns wide and odd rows are indented by half a cell,
//! matching the offset layout. A cell shows its top piece's letter, the
//! seat number of its owner, and `^` when the stack is taller than one.

use super::coord::Cell;
use super::game::{Game, Verdict};
use colored::{Color, Colorize};
use std::fmt::Write;

const SEAT_COLORS: [Color; 4] = [Color::Yellow, Color::Cyan, Color::Magenta, Color::Green];

/// Render the board with a one-line status header.
pub fn render(game: &Game, use_color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", status_line(game));

    let board = game.board();
    let cells: Vec<Cell> = board.occupied().copied().collect();
    if cells.is_empty() {
        let _ = writeln!(out, "(empty board)");
        return out;
    }

    // Find bounds, with a ring of padding
    let min_x = cells.iter().map(|c| c.x).min().unwrap_or(0) - 1;
    let max_x = cells.iter().map(|c| c.x).max().unwrap_or(0) + 1;
    let min_y = cells.iter().map(|c| c.y).min().unwrap_or(0) - 1;
    let max_y = cells.iter().map(|c| c.y).max().unwrap_or(0) + 1;

    for y in min_y..=max_y {
        let _ = write!(out, "{:>4} ", y);
        if y.rem_euclid(2) == 1 {
            out.push_str("  ");
        }
        for x in min_x..=max_x {
            let cell = Cell::new(x, y);
            match board.top(&cell) {
                Some(piece) => {
                    let seat = game
                        .players()
                        .iter()
                        .position(|p| p.id == piece.owner)
                        .unwrap_or(0);
                    let marker = if board.height(&cell) > 1 { '^' } else { ' ' };
                    let text = format!("{}{}{}", piece.kind.char(), seat + 1, marker);
                    if use_color {
                        let color = SEAT_COLORS[seat % SEAT_COLORS.len()];
                        let _ = write!(out, "{} ", text.color(color).bold());
                    } else {
                        let _ = write!(out, "{} ", text);
                    }
                }
                None => out.push_str(" .  "),
            }
        }
        out.push('\n');
    }
    let _ = writeln!(out, "     x from {} to {}", min_x, max_x);
    out
}

fn status_line(game: &Game) -> String {
    match game.verdict() {
        Some(Verdict::Decided { winner: Some(winner), loser }) => {
            format!("Game over after {} moves: {} wins, {} loses", game.move_count(), winner, loser)
        }
        Some(Verdict::Decided { winner: None, loser }) => {
            format!("Game over after {} moves: {} loses", game.move_count(), loser)
        }
        Some(Verdict::Draw) => format!("Game over after {} moves: draw", game.move_count()),
        None => format!("Move {}, {} to play", game.move_count() + 1, game.current_player()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hive::piece::PieceKind;
    use crate::hive::player::PlayerId;

    #[test]
    fn test_render_plain() {
        let mut game = Game::new([PlayerId(1), PlayerId(2)]).unwrap();
        game.apply(PlayerId(1), PieceKind::Queen, None, Cell::ORIGIN);
        game.apply(PlayerId(2), PieceKind::Ant, None, Cell::new(1, 0));

        let text = render(&game, false);
        assert!(text.starts_with("Move 3, P1 to play"));
        assert!(text.contains("Q1 "));
        assert!(text.contains("A2 "));
    }

    #[test]
    fn test_render_empty() {
        let game = Game::new([PlayerId(1)]).unwrap();
        assert!(render(&game, false).contains("(empty board)"));
    }
}
