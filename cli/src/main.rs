//! REPL and single-shot front end for the Monte Carlo equity calculator.
//!
//! Two usage modes: `pokercalc go "2P 3d"` parses its subcommand directly
//! from process arguments via `clap`; with no arguments, `pokercalc` drops
//! into an interactive loop reading `go` / `bench` / `quit` lines from
//! stdin, matching the REPL described for the reference tool.

mod bench;

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};
use log::debug;
use pokercalc_core::pool;
use pokercalc_core::spot::Spot;

const DEFAULT_GAMES: u64 = 200_000;
const DEFAULT_THREADS: usize = 4;

#[derive(Parser)]
#[command(name = "pokercalc")]
#[command(about = "Monte Carlo equity calculator for Texas Hold'em")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one spot and print per-player equity.
    Go {
        /// Spot string, e.g. "2P AcKd 7h7s"
        spot: String,
        /// Number of simulated games
        games: Option<u64>,
        /// Number of worker threads
        threads: Option<usize>,
    },
    /// Run the built-in bench spot list and print a checksum signature.
    Bench {
        /// Number of worker threads
        threads: Option<usize>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Go { spot, games, threads }) => {
            run_go(&spot, games.unwrap_or(DEFAULT_GAMES), threads.unwrap_or(DEFAULT_THREADS));
        }
        Some(Commands::Bench { threads }) => {
            bench::run_bench(threads.unwrap_or(DEFAULT_THREADS));
        }
        None => repl(),
    }
}

fn repl() {
    let stdin = io::stdin();
    print!("> ");
    let _ = io::stdout().flush();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let line = line.trim();
        if line.is_empty() {
            print!("> ");
            let _ = io::stdout().flush();
            continue;
        }
        if !dispatch_line(line) {
            break;
        }
        print!("> ");
        let _ = io::stdout().flush();
    }
}

/// Parse and run one REPL line. Returns `false` when the REPL should exit.
fn dispatch_line(line: &str) -> bool {
    let mut parts = line.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("");
    let rest = parts.next().unwrap_or("").trim();

    match cmd {
        "quit" | "exit" => return false,
        "go" => {
            let mut tokens: Vec<&str> = rest.split_whitespace().collect();
            let (games, threads) = pop_trailing_numbers(&mut tokens);
            let spot_str = tokens.join(" ");
            run_go(&spot_str, games.unwrap_or(DEFAULT_GAMES), threads.unwrap_or(DEFAULT_THREADS));
        }
        "bench" => {
            let threads: usize = rest.trim().parse().unwrap_or(DEFAULT_THREADS);
            bench::run_bench(threads);
        }
        _ => {
            eprintln!("unrecognized command: {cmd:?} (expected go/bench/quit)");
        }
    }
    true
}

/// The spot grammar and the `[games] [threads]` suffix both consist of
/// whitespace-separated tokens; peel up to two trailing all-digit tokens
/// off the back before handing the rest to the spot parser. A single
/// trailing number binds to `games` (matching `go <SPOT> [games]
/// [threads]`); only a second one, once `games` is already claimed, binds
/// to `threads`.
fn pop_trailing_numbers(tokens: &mut Vec<&str>) -> (Option<u64>, Option<usize>) {
    let is_number = |t: &&str| t.chars().all(|c| c.is_ascii_digit());
    let mut second = None;
    if matches!(tokens.last(), Some(t) if is_number(t)) {
        second = tokens.pop();
    }
    let mut first = None;
    if matches!(tokens.last(), Some(t) if is_number(t)) {
        first = tokens.pop();
    }

    match (first, second) {
        (Some(g), Some(t)) => (g.parse().ok(), t.parse().ok()),
        (None, Some(g)) => (g.parse().ok(), None),
        _ => (None, None),
    }
}

fn run_go(spot_str: &str, games: u64, threads: usize) {
    debug!("go {spot_str:?} games={games} threads={threads}");
    let spot = match Spot::parse(spot_str) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return;
        }
    };
    if !spot.ready {
        eprintln!("error: spot is not well-formed");
        return;
    }

    debug!("dispatching {games} games across {threads} workers");
    let result = pool::run(&spot, games, threads);

    for p in 0..spot.num_players {
        let r = &result.players[p];
        println!(
            "player {p}: win {:.2}%  tie {:.2}%  (wins={} tie_units={})",
            r.win_fraction(result.games_run) * 100.0,
            r.tie_fraction(result.games_run) * 100.0,
            r.wins,
            r.tie_units,
        );
    }
}
