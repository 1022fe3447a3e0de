//! # Hive - Hot-Seat Terminal Driver
//!
//! Reads commands from stdin and plays them for whoever is to move, printing
//! the board after every accepted action. Useful for poking at the rules
//! engine by hand.
//!
//! ## Commands
//! - `Q(0,0)` / `A(0,0)->(1,1)` / `pass`: play an action
//! - `moves <piece> [x y]`: legal destinations for a placement or a move
//! - `board`, `hand`, `history`: show state
//! - `save <file>` / `load <file>`: JSON snapshots
//! - `reset [reverse]`: start a rematch
//! - `quit`
//!
//! Set `RUST_LOG=debug` to see the engine's accept/reject log.

use clap::Parser;
use colored::Colorize;
use hive::hive::render::render;
use hive::hive::GameConfig;
use hive::{Action, Cell, Game, GameController, Outcome, PieceKind, PlayerId};
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play Hive in the terminal, one seat after another", long_about = None)]
struct Args {
    /// Number of seats at the table
    #[clap(short, long, default_value_t = 2)]
    players: u32,

    /// Own turns a player may take before placing the queen becomes mandatory
    #[clap(long, default_value_t = 3)]
    queen_deadline: u32,

    /// Forbid moving pieces until the mover's queen is on the board
    #[clap(long, action = clap::ArgAction::SetTrue)]
    movement_requires_queen: bool,

    /// Disable colored board output
    #[clap(long, action = clap::ArgAction::SetTrue)]
    no_color: bool,
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = GameConfig {
        queen_deadline: args.queen_deadline,
        movement_requires_queen: args.movement_requires_queen,
    };
    let game = match Game::with_config((1..=args.players).map(PlayerId), config) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    let mut controller = GameController::new(game);
    let use_color = !args.no_color;
    println!("{}", render(controller.game(), use_color));

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("{}> ", controller.game().current_player());
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => {}
            ["quit"] | ["exit"] => break,
            ["help"] => print_help(),
            ["board"] => println!("{}", render(controller.game(), use_color)),
            ["hand"] => print_hand(controller.game()),
            ["history"] => println!("{}", controller.format_history()),
            ["moves", piece, rest @ ..] => show_moves(controller.game(), piece, rest),
            ["save", path] => match serde_json::to_string_pretty(controller.game()) {
                Ok(json) => match std::fs::write(path, json) {
                    Ok(()) => println!("saved to {}", path),
                    Err(e) => println!("{} {}", "error:".red(), e),
                },
                Err(e) => println!("{} {}", "error:".red(), e),
            },
            ["load", path] => match std::fs::read_to_string(path)
                .map_err(|e| e.to_string())
                .and_then(|json| serde_json::from_str::<Game>(&json).map_err(|e| e.to_string()))
            {
                Ok(game) => {
                    controller.load(game);
                    println!("{}", render(controller.game(), use_color));
                }
                Err(e) => println!("{} {}", "error:".red(), e),
            },
            ["reset"] => {
                controller.reset(false);
                println!("{}", render(controller.game(), use_color));
            }
            ["reset", "reverse"] => {
                controller.reset(true);
                println!("{}", render(controller.game(), use_color));
            }
            _ => match line.parse::<Action>() {
                Ok(action) => {
                    let player = controller.game().current_player();
                    match controller.try_action(player, action) {
                        Outcome::Rejected(reason) => println!("{} {}", "rejected:".red(), reason),
                        Outcome::Replaced => println!("piece put back, still {} to move", player),
                        _ => println!("{}", render(controller.game(), use_color)),
                    }
                }
                Err(e) => println!("{} {} (try `help`)", "error:".red(), e),
            },
        }
    }

    Ok(())
}

fn print_help() {
    println!("actions:  Q(0,0)  A(0,0)->(1,1)  pass");
    println!("queries:  moves <piece> [x y] | board | hand | history");
    println!("session:  save <file> | load <file> | reset [reverse] | quit");
}

fn print_hand(game: &Game) {
    let player = game.current_player();
    if let Some(hand) = game.hand(player) {
        let counts: Vec<String> = hand
            .iter()
            .map(|(kind, count)| format!("{} x{}", kind, count))
            .collect();
        println!("{}: {}", player, counts.join(", "));
    }
}

fn show_moves(game: &Game, piece: &str, rest: &[&str]) {
    let kind = match piece.parse::<PieceKind>() {
        Ok(kind) => kind,
        Err(e) => {
            println!("{} {}", "error:".red(), e);
            return;
        }
    };
    let from = match rest {
        [] => None,
        [x, y] => match (x.parse(), y.parse()) {
            (Ok(x), Ok(y)) => Some(Cell::new(x, y)),
            _ => {
                println!("{} expected integer coordinates", "error:".red());
                return;
            }
        },
        _ => {
            println!("{} usage: moves <piece> [x y]", "error:".red());
            return;
        }
    };

    let moves = game.legal_moves(kind, None, from);
    if moves.is_empty() {
        println!("no legal destinations");
    } else {
        let cells: Vec<String> = moves.iter().map(Cell::to_string).collect();
        println!("{}", cells.join(" "));
    }
}
