//! The worker pool: splits a fixed game budget across OS threads, each
//! seeded deterministically from its own index, and reduces their per-thread
//! tallies once at join.
//!
//! Short-lived scoped threads per call, rather than a long-lived pool with
//! park/signal bookkeeping, at the cost of spawn overhead that is negligible
//! against million-game runs.

use crate::result::RunResult;
use crate::rng::{seed_for_worker, CardSampler};
use crate::simulate::{simulate_once, Scratch};
use crate::spot::Spot;

/// Run `games_total` simulations of `spot` split across `threads` workers and
/// return the elementwise-summed per-player result.
///
/// Worker `i` seeds its RNG deterministically from `i` (never from wall
/// clock), so a given `(spot, games_total, threads)` triple reproduces
/// bit-identical `(wins, tie_units)` on every run and every platform.
pub fn run(spot: &Spot, games_total: u64, threads: usize) -> RunResult {
    let threads = threads.max(1);
    let per_thread = if games_total < threads as u64 {
        1
    } else {
        games_total / threads as u64
    };

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|i| scope.spawn(move || run_worker(spot, i as u64, per_thread)))
            .collect();

        let mut total = RunResult::zeroed(spot.num_players);
        for handle in handles {
            let worker_result = handle.join().expect("simulation worker panicked");
            total.add_assign(&worker_result);
        }
        total
    })
}

fn run_worker(spot: &Spot, worker_index: u64, games: u64) -> RunResult {
    let mut sampler = CardSampler::new(seed_for_worker(worker_index));
    let mut scratch = Scratch::new(spot.num_players);
    let mut result = RunResult::zeroed(spot.num_players);
    for _ in 0..games {
        let scores = simulate_once(spot, &mut sampler, &mut scratch);
        result.record(scores);
    }
    result
}
