//! Exact equity via exhaustive board enumeration.
//!
//! Narrowed to the one case that stays tractable for a general `N`-player
//! spot: every player's hole cards are fully given and only the board has
//! missing slots. Enumerating unknown hole combinations too blows up
//! combinatorially past two players and is not exposed here.
//!
//! Not reachable from the CLI's `go`/`bench` surface, the default path is
//! always Monte Carlo. Library callers who need an exact number for a
//! fully-determined-holes spot can reach for [`equity_exact`] directly.

use crate::result::RunResult;
use crate::spot::{FillSlot, Spot};

/// Enumerate every completion of `spot`'s missing board cards and return the
/// exact per-player `(wins, tie_units)` tally, with `games_run` equal to the
/// number of distinct board combinations considered.
///
/// Returns `None` if any player has a missing hole card; this routine only
/// handles the fully-determined-holes case.
pub fn equity_exact(spot: &Spot) -> Option<RunResult> {
    if spot.fill_plan.iter().any(|s| matches!(s, FillSlot::Hole(_))) {
        return None;
    }

    let missing_board = spot.fill_plan.len();
    let mut remaining = Vec::with_capacity(64 - spot.all_mask.popcount() as usize);
    for card in crate::card::Card::all() {
        if !spot.all_mask.contains(card) {
            remaining.push(card);
        }
    }

    let mut result = RunResult::zeroed(spot.num_players);
    let mut scores = vec![0u64; spot.num_players];
    let mut combo = Vec::with_capacity(missing_board);

    enumerate_combinations(&remaining, missing_board, &mut combo, &mut |cards| {
        let mut board = spot.given_common;
        for &c in cards {
            board.add(c, 0);
        }
        for (p, hole) in spot.given_holes.iter().enumerate() {
            let mut h = *hole;
            h.merge(&board);
            h.finalize();
            scores[p] = h.score;
        }
        result.record(&scores);
    });

    Some(result)
}

/// Call `f` once per `k`-combination of `items`, in lexicographic order.
fn enumerate_combinations(
    items: &[crate::card::Card],
    k: usize,
    combo: &mut Vec<crate::card::Card>,
    f: &mut impl FnMut(&[crate::card::Card]),
) {
    if k == 0 {
        f(combo);
        return;
    }
    if items.len() < k {
        return;
    }
    for i in 0..=(items.len() - k) {
        combo.push(items[i]);
        enumerate_combinations(&items[i + 1..], k - 1, combo, f);
        combo.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_board_is_exactly_one_combination() {
        let spot = Spot::parse("2P AcKd 7h7s - 2c 3c 4c 5c 9d").unwrap();
        let result = equity_exact(&spot).unwrap();
        assert_eq!(result.games_run, 1);
    }

    #[test]
    fn returns_none_when_holes_missing() {
        let spot = Spot::parse("2P AcKd - 2c 3c 4c").unwrap();
        assert!(equity_exact(&spot).is_none());
    }

    #[test]
    fn heads_up_turn_enumeration_matches_remaining_card_count() {
        // 8 cards used (2 holes x2 players + 4 board), 44 remain for the river.
        let spot = Spot::parse("2P AcKd 7h7s - 2c 3c 4c 5c").unwrap();
        let result = equity_exact(&spot).unwrap();
        assert_eq!(result.games_run, 44);
    }
}
