//! The evaluator's working bit-state and the 7-card scoring function.
//!
//! `values` and `colors` are both 64-bit words laid out as four 16-bit rows
//! (row stride 16, one column per rank 0..12):
//!
//! - `values` row `m` (0..3): bit `r` set iff rank `r` has been added at least
//!   `m + 1` times. Multiplicity `k` therefore lights the bottom `k` rows of
//!   column `r`, never a gap.
//! - `colors` row `s` (0..3): bit `r` set iff the hand holds rank `r` of suit
//!   `s`. A set bit here corresponds to exactly one physical card, and its bit
//!   position equals that [`crate::card::Card`]'s own id: the deck-space
//!   encoding and the bitboard encoding are the same 64 slots.
//!
//! `score` is a 64-bit totally-ordered comparison key built by [`Hand::finalize`];
//! see the module-level layout comment there.

use crate::mask;

const ROW_BITS: u32 = 16;
const RANK_MASK: u16 = 0x1FFF; // ranks 0..12

#[inline(always)]
fn get_row(word: u64, row: u32) -> u16 {
    ((word >> (ROW_BITS * row)) & 0xFFFF) as u16
}

/// Flags summarizing which hand categories were detected. Informational; the
/// ordering key is `score`, not `flags`.
#[derive(Copy, Clone, Eq, PartialEq, Default, Debug)]
pub struct Flags(pub u16);

impl Flags {
    pub const PAIR: u16 = 1 << 0;
    pub const TWO_PAIR: u16 = 1 << 1;
    pub const SET: u16 = 1 << 2;
    pub const STRAIGHT: u16 = 1 << 3;
    pub const FLUSH: u16 = 1 << 4;
    pub const FULL_HOUSE: u16 = 1 << 5;
    pub const QUADS: u16 = 1 << 6;
    pub const STRAIGHT_FLUSH: u16 = 1 << 7;

    #[inline(always)]
    pub fn has(self, bit: u16) -> bool {
        self.0 & bit != 0
    }
}

// Dedicated flag bits inside `score`, outranking any natural bit in their row.
const STRAIGHT_S: u64 = 1 << 45;
const FLUSH_S: u64 = 1 << 46;
const FULL_H_S: u64 = 1 << 47;
const S_FLUSH_S: u64 = 1 << 63;

/// The evaluator's working state for one player's known cards.
#[derive(Copy, Clone, Eq, PartialEq, Default, Debug)]
pub struct Hand {
    pub values: u64,
    pub colors: u64,
    pub score: u64,
    pub flags: Flags,
}

impl Hand {
    pub const fn new() -> Self {
        Hand {
            values: 0,
            colors: 0,
            score: 0,
            flags: Flags(0),
        }
    }

    /// Add one card, rejecting sentinel ranks and cards already dealt.
    ///
    /// `dealt_mask` is the union of every card already placed anywhere in the
    /// current simulation iteration (other hands, the board); a card already
    /// present in `self.colors` is also rejected since `colors`' bit layout is
    /// the same deck-space id as [`crate::card::Card64`].
    pub fn add(&mut self, card: crate::card::Card, dealt_mask: u64) -> bool {
        if card.rank() >= crate::card::RANK_SENTINEL {
            return false;
        }
        let bit = card.bit();
        if (self.colors | dealt_mask) & bit != 0 {
            return false;
        }
        self.colors |= bit;

        let rank = card.rank() as u32;
        let mut n = 1u64 << rank;
        while self.values & n != 0 {
            n <<= ROW_BITS;
        }
        self.values |= n;
        true
    }

    /// Cards present in this hand, as deck-space ids (bit positions of `colors`).
    fn cards(&self) -> impl Iterator<Item = crate::card::Card> + '_ {
        let colors = self.colors;
        (0u8..64).filter_map(move |id| {
            if colors & (1u64 << id) != 0 {
                Some(crate::card::Card(id))
            } else {
                None
            }
        })
    }

    /// Merge `other`'s cards into `self`. Fast path: a disjoint OR of both
    /// words when no rank overlaps; otherwise re-adds each of `other`'s cards
    /// so multiplicity promotion still happens correctly.
    pub fn merge(&mut self, other: &Hand) {
        if self.values & other.values == 0 {
            self.values |= other.values;
            self.colors |= other.colors;
            return;
        }
        for card in other.cards() {
            self.add(card, 0);
        }
    }

    /// Detect a 5+ card flush. On success, returns the suit's 13-bit rank mask
    /// and (as a side effect) rewrites `self.values` to hold *only* that row,
    /// which both reduces straight detection to a single-suit window and
    /// forbids any pair/trip/quad detection downstream, since each rank can
    /// appear at most once within one suit.
    fn apply_flush(&mut self) -> Option<u16> {
        for suit_row in 0..4 {
            let row = get_row(self.colors, suit_row) & RANK_MASK;
            if row.count_ones() >= 5 {
                self.values = row as u64;
                return Some(row);
            }
        }
        None
    }

    /// Finalize `score`/`flags` from a fully-populated (7-card) hand.
    ///
    /// Quads, full house, and straight are mutually exclusive with a straight
    /// in a 7-card hand by a simple counting argument (a straight needs 5
    /// distinct ranks; quads/full-house consume 4-5 cards across only 1-2
    /// ranks, leaving too few cards to also cover 5 distinct ranks). So once a
    /// straight is detected we skip quad/trip/pair detection entirely and
    /// encode only the straight's high rank as the tiebreaker.
    pub fn finalize(&mut self) {
        let mut score: u64 = 0;
        let mut flags: u16 = 0;

        let flush_row = self.apply_flush();
        if flush_row.is_some() {
            flags |= Flags::FLUSH;
            score |= FLUSH_S;
        }

        let row0 = get_row(self.values, 0) & RANK_MASK;
        if let Some(high) = mask::straight_high(row0) {
            flags |= Flags::STRAIGHT;
            score |= STRAIGHT_S;
            if flush_row.is_some() {
                flags |= Flags::STRAIGHT_FLUSH;
                score |= S_FLUSH_S;
            }
            score |= 1u64 << high;
            self.score = score;
            self.flags = Flags(flags);
            return;
        }

        let top = highest_set_bit(self.values);
        let (cnt, consumed) = match top {
            None => (5u32, 0u64),
            Some(top_bit) => {
                let top_row = top_bit / ROW_BITS;
                let top_rank = (top_bit % ROW_BITS) as u16;
                match top_row {
                    3 => {
                        // Quads.
                        flags |= Flags::QUADS;
                        score |= (1u64 << top_rank) << (ROW_BITS * 3);
                        (1, column_mask(top_rank))
                    }
                    2 => {
                        let column = column_mask(top_rank);
                        let remaining = self.values & !column;
                        let second = highest_set_bit(remaining);
                        match second.map(|b| (b / ROW_BITS, (b % ROW_BITS) as u16)) {
                            Some((2, other_rank)) => {
                                // Two trips: higher is the set, lower's top card is the pair.
                                flags |= Flags::FULL_HOUSE | Flags::SET | Flags::PAIR;
                                score |= FULL_H_S;
                                score |= (1u64 << top_rank) << (ROW_BITS * 2);
                                score |= (1u64 << other_rank) << ROW_BITS;
                                (0, column | column_mask(other_rank))
                            }
                            Some((1, pair_rank)) => {
                                flags |= Flags::FULL_HOUSE | Flags::SET | Flags::PAIR;
                                score |= FULL_H_S;
                                score |= (1u64 << top_rank) << (ROW_BITS * 2);
                                score |= (1u64 << pair_rank) << ROW_BITS;
                                (0, column | column_mask(pair_rank))
                            }
                            _ => {
                                flags |= Flags::SET;
                                score |= (1u64 << top_rank) << (ROW_BITS * 2);
                                (2, column)
                            }
                        }
                    }
                    1 => {
                        let column = column_mask(top_rank);
                        let remaining = self.values & !column;
                        let second = highest_set_bit(remaining);
                        match second.map(|b| (b / ROW_BITS, (b % ROW_BITS) as u16)) {
                            Some((1, pair2_rank)) => {
                                flags |= Flags::TWO_PAIR | Flags::PAIR;
                                score |= (1u64 << top_rank) << ROW_BITS;
                                score |= (1u64 << pair2_rank) << ROW_BITS;
                                let consumed_cols = column | column_mask(pair2_rank);
                                // A third pair (e.g. AA KK 22) never competes
                                // for the kicker slot against a loose single:
                                // its own rank is the kicker, full stop.
                                let third_pair_rank = highest_set_bit(self.values & !consumed_cols)
                                    .filter(|&b| b / ROW_BITS == 1)
                                    .map(|b| (b % ROW_BITS) as u16);
                                match third_pair_rank {
                                    Some(rank) => {
                                        score |= 1u64 << rank;
                                        (0, consumed_cols | column_mask(rank))
                                    }
                                    None => (1, consumed_cols),
                                }
                            }
                            _ => {
                                flags |= Flags::PAIR;
                                score |= (1u64 << top_rank) << ROW_BITS;
                                (3, column)
                            }
                        }
                    }
                    _ => (5, 0),
                }
            }
        };

        let kickers = mask::top_n(row0 & !(consumed as u16), cnt);
        score |= kickers as u64;

        self.score = score;
        self.flags = Flags(flags);
    }
}

/// Mask of all four rows' bits for one rank column (used to drop a rank from
/// further consideration once it has been consumed by quads/set/pair).
#[inline(always)]
fn column_mask(rank: u16) -> u64 {
    let bit = rank as u64;
    (1u64 << bit) | (1u64 << (bit + 16)) | (1u64 << (bit + 32)) | (1u64 << (bit + 48))
}

#[inline(always)]
fn highest_set_bit(word: u64) -> Option<u32> {
    if word == 0 {
        None
    } else {
        Some(63 - word.leading_zeros())
    }
}
