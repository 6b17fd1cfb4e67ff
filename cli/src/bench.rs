//! The `bench` subcommand: runs a fixed list of built-in spots and folds
//! every per-player tally into one 64-bit checksum, so a full pipeline
//! (parsing, evaluation, RNG, reduction) can be verified against a single
//! published number instead of eyeballing floating-point equities.

use std::time::Instant;

use log::info;
use pokercalc_core::pool;
use pokercalc_core::spot::Spot;

pub const GAMES_PER_SPOT: u64 = 1_500_000;

/// Verbatim from the reference scenario list; interpreted per the spot
/// construction grammar in `pokercalc_core::spot`.
pub const DEFAULT_SPOTS: [&str; 10] = [
    "2P 3d",
    "3P KhKs - Ac Ad 7c Ts Qs",
    "4P AcTc TdTh - 5h 6h 9c",
    "5P 2c3d KsTc AhTd - 4d 5d 9c 9d",
    "6P Ac Ad KsKd 3c - 2c 2h 7c 7h 8c",
    "7P Ad Kc QhJh 3s4s - 2c 2h 7c 5h 8c",
    "8P - Ac Ah 3d 7h 8c",
    "9P",
    "4P AhAd AcTh 7c6s 2h3h - 2c 3c 4c",
    "4P AhAd AcTh 7c6s 2h3h",
];

/// 64-bit mix over every per-player `(wins + tie_units)` tally, one update
/// per `(spot, player)` pair in spot-list order.
pub struct MixHash {
    h: u64,
}

impl MixHash {
    pub fn new() -> Self {
        MixHash { h: 0 }
    }

    #[inline(always)]
    pub fn update(&mut self, v: u64) {
        self.h = self
            .h
            .wrapping_add(v.wrapping_mul(2654435789))
            ^ (self.h >> 23);
    }

    pub fn finish(self) -> u64 {
        self.h ^ (self.h << 37)
    }
}

impl Default for MixHash {
    fn default() -> Self {
        Self::new()
    }
}

pub fn run_bench(threads: usize) {
    let mut mix = MixHash::new();
    let mut total_elapsed = std::time::Duration::ZERO;

    for (i, spot_str) in DEFAULT_SPOTS.iter().enumerate() {
        let spot = match Spot::parse(spot_str) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("bench spot {i} {spot_str:?} failed to parse: {e}");
                continue;
            }
        };
        info!("bench: running spot {i} {spot_str:?} for {GAMES_PER_SPOT} games on {threads} threads");

        let start = Instant::now();
        let result = pool::run(&spot, GAMES_PER_SPOT, threads);
        let elapsed = start.elapsed();
        total_elapsed += elapsed;

        println!(
            "[{i}] {spot_str:<45} {:>9.3}s  {:>10.0} games/s",
            elapsed.as_secs_f64(),
            GAMES_PER_SPOT as f64 / elapsed.as_secs_f64()
        );

        for player in &result.players {
            mix.update(player.wins.wrapping_add(player.tie_units));
        }
    }

    println!("total: {:.3}s", total_elapsed.as_secs_f64());
    println!("signature: {}", mix.finish());
}
