//! The per-spot Monte Carlo simulator: one completed, scored, tallied
//! showdown per call to [`simulate_once`].

use crate::hand::Hand;
use crate::rng::CardSampler;
use crate::spot::{FillSlot, Spot};

/// Scratch buffers reused across iterations so the hot loop performs no heap
/// allocation; one instance lives on each worker's stack for the duration of
/// its `per_thread` loop.
pub struct Scratch {
    board: Hand,
    holes: Vec<Hand>,
    scores: Vec<u64>,
}

impl Scratch {
    pub fn new(num_players: usize) -> Self {
        Scratch {
            board: Hand::new(),
            holes: vec![Hand::new(); num_players],
            scores: vec![0u64; num_players],
        }
    }
}

/// Run one simulated showdown for `spot`, drawing missing cards from
/// `sampler`, and return each player's final `score` in seat order.
///
/// The board is completed first (so every player's `merge` sees the final
/// board), then each player's holes are completed and merged with the
/// board.
pub fn simulate_once(spot: &Spot, sampler: &mut CardSampler, scratch: &mut Scratch) -> &[u64] {
    scratch.board = spot.given_common;
    for (p, hole) in scratch.holes.iter_mut().enumerate() {
        *hole = spot.given_holes[p];
    }

    let mut dealt = spot.all_mask.0;
    for slot in &spot.fill_plan {
        let card = sampler.draw(&mut dealt);
        match *slot {
            FillSlot::Board => {
                let ok = scratch.board.add(card, 0);
                debug_assert!(ok, "sampler drew a card already dealt");
            }
            FillSlot::Hole(p) => {
                let ok = scratch.holes[p].add(card, 0);
                debug_assert!(ok, "sampler drew a card already dealt");
            }
        }
    }

    for (p, hole) in scratch.holes.iter_mut().enumerate() {
        hole.merge(&scratch.board);
        hole.finalize();
        scratch.scores[p] = hole.score;
    }

    &scratch.scores
}
