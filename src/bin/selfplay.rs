use clap::Parser;
use colored::Colorize;
use hive::hive::PieceKind;
use hive::{Game, GameState, PlayerId, Verdict};
use parking_lot::Mutex;
use rand_xoshiro::rand_core::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Random self-play that checks the engine's invariants after every action", long_about = None)]
struct Args {
    /// Number of games to play (default: 200)
    #[arg(long, default_value_t = 200)]
    games: u64,

    /// Abandon a game after this many actions (default: 300)
    #[arg(long, default_value_t = 300)]
    max_moves: u32,

    /// Seed of the first game; game i uses seed + i
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Worker threads (default: number of CPUs)
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Debug, Default)]
struct Summary {
    decided: u64,
    draws: u64,
    abandoned: u64,
    actions: u64,
    /// (seed, description) of every invariant violation
    violations: Vec<(u64, String)>,
}

/// What one game ended as.
enum Finish {
    Verdict(Verdict),
    Abandoned,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();
    let threads = args.threads.unwrap_or_else(num_cpus::get);

    println!("Hive Rules Engine - Self-Play");
    println!("=============================");
    println!("Games: {}", args.games);
    println!("Max Moves: {}", args.max_moves);
    println!("Seed: {}", args.seed);
    println!("Threads: {}", threads);
    println!("-----------------------------");

    let pool = match ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("failed to build thread pool: {}", e);
            std::process::exit(1);
        }
    };

    let summary = Mutex::new(Summary::default());
    let start = Instant::now();

    pool.install(|| {
        (0..args.games).into_par_iter().for_each(|i| {
            let seed = args.seed.wrapping_add(i);
            let mut violations = Vec::new();
            let (finish, actions) = play_one(seed, args.max_moves, &mut violations);

            let mut summary = summary.lock();
            summary.actions += u64::from(actions);
            match finish {
                Finish::Verdict(Verdict::Draw) => summary.draws += 1,
                Finish::Verdict(Verdict::Decided { .. }) => summary.decided += 1,
                Finish::Abandoned => summary.abandoned += 1,
            }
            summary.violations.extend(violations.into_iter().map(|v| (seed, v)));
        });
    });

    let elapsed = start.elapsed().as_secs_f64();
    let summary = summary.into_inner();
    print_summary(&summary, elapsed);

    if !summary.violations.is_empty() {
        std::process::exit(1);
    }
}

/// Play one random game, recording invariant violations. Returns how it
/// ended and how many actions were played.
fn play_one(seed: u64, max_moves: u32, violations: &mut Vec<String>) -> (Finish, u32) {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut game = match Game::new([PlayerId(1), PlayerId(2)]) {
        Ok(game) => game,
        Err(e) => {
            violations.push(format!("setup failed: {}", e));
            return (Finish::Abandoned, 0);
        }
    };

    for played in 0..max_moves {
        if let Some(verdict) = game.verdict() {
            info!(seed, ?verdict, played, "game decided");
            return (Finish::Verdict(verdict), played);
        }

        let moves = game.get_possible_moves();
        let mv = moves[(rng.next_u64() % moves.len() as u64) as usize];
        let before = game.current_index();
        game.make_move(&mv);

        if let Some(problem) = check_invariants(&game, before) {
            warn!(seed, action = %mv, %problem, "invariant violated");
            violations.push(format!("after {}: {}", mv, problem));
            return (Finish::Abandoned, played + 1);
        }
    }

    match game.verdict() {
        Some(verdict) => (Finish::Verdict(verdict), max_moves),
        None => (Finish::Abandoned, max_moves),
    }
}

fn check_invariants(game: &Game, previous_index: usize) -> Option<String> {
    if !game.board().is_connected() {
        return Some("hive split into several groups".to_string());
    }

    for player in game.players() {
        for kind in PieceKind::ALL {
            let accounted = player.hand.remaining(kind) as usize + game.placed_count(player.id, kind);
            if accounted != kind.initial_supply() as usize {
                return Some(format!("{} has {} {} accounted for", player.id, accounted, kind));
            }
        }
    }

    let expected = (previous_index + 1) % game.players().len();
    if game.current_index() != expected {
        return Some(format!("turn went to seat {} instead of {}", game.current_index(), expected));
    }

    None
}

fn print_summary(summary: &Summary, secs: f64) {
    let games = summary.decided + summary.draws + summary.abandoned;
    println!("Results:");
    println!("  Games: {}", games);
    println!("  Decided: {}", summary.decided);
    println!("  Draws: {}", summary.draws);
    println!("  Abandoned: {}", summary.abandoned);
    println!("  Actions: {}", summary.actions);
    println!("  Time: {:.3}s", secs);
    println!("  APS: {:.0} actions/sec", summary.actions as f64 / secs);

    if summary.violations.is_empty() {
        println!("{}", "All invariants held.".green());
    } else {
        println!("{}", format!("{} invariant violations:", summary.violations.len()).red());
        for (seed, violation) in &summary.violations {
            println!("  seed {}: {}", seed, violation);
        }
    }
}
