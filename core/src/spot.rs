//! Spot construction grammar: parsing a scenario string into a validated,
//! read-only [`Spot`] ready to be handed to the simulator.

use crate::card::{Card, Card64};
use crate::error::SpotError;
use crate::hand::Hand;
use log::debug;

/// Where one successive random draw gets placed during simulation.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum FillSlot {
    Board,
    Hole(usize),
}

/// A fully-parsed, read-only scenario. Built once per problem; each
/// simulation thread clones the per-iteration working `Hand`s, never `Spot`
/// itself (it holds no mutable hot-path state).
#[derive(Clone, Debug)]
pub struct Spot {
    pub num_players: usize,
    pub given_holes: Vec<Hand>,
    pub given_common: Hand,
    pub all_mask: Card64,
    pub missing: usize,
    pub fill_plan: Vec<FillSlot>,
    pub ready: bool,
}

impl Spot {
    /// Parse a spot string of the form
    /// `NP [hole1] [hole2] ... [holeN] [- b1 b2 b3 b4 b5]`.
    pub fn parse(input: &str) -> Result<Spot, SpotError> {
        let mut tokens = input.split_whitespace();

        let header = tokens.next().ok_or_else(|| SpotError::MalformedToken(input.to_string()))?;
        let num_players = parse_player_count(header)?;
        if !(2..=9).contains(&num_players) {
            return Err(SpotError::BadPlayerCount(num_players));
        }

        let mut player_tokens: Vec<&str> = Vec::with_capacity(num_players);
        let mut board_tokens: Vec<&str> = Vec::new();
        let mut saw_separator = false;
        for tok in tokens {
            if tok == "-" {
                saw_separator = true;
                continue;
            }
            if saw_separator {
                board_tokens.push(tok);
            } else {
                player_tokens.push(tok);
            }
        }
        if player_tokens.len() > num_players {
            return Err(SpotError::MalformedToken(player_tokens[num_players].to_string()));
        }

        if !matches!(board_tokens.len(), 0 | 3 | 4 | 5) {
            return Err(SpotError::BadBoardSize(board_tokens.len()));
        }

        let mut all_mask = Card64::empty();
        let mut given_holes = Vec::with_capacity(num_players);
        for i in 0..num_players {
            let hand = match player_tokens.get(i) {
                None | Some(&"--") => Hand::new(),
                Some(tok) => parse_hole_token(tok, &mut all_mask)?,
            };
            given_holes.push(hand);
        }

        let mut given_common = Hand::new();
        for tok in &board_tokens {
            if let Some(card) = Card::parse(tok)? {
                add_unique(&mut given_common, &mut all_mask, card, tok)?;
            }
        }

        let given_hole_count: usize = given_holes.iter().map(hand_card_count).sum();
        let given_board_count = hand_card_count(&given_common);
        let total_slots = 2 * num_players + 5;
        let given_total = given_hole_count + given_board_count;
        let missing = total_slots
            .checked_sub(given_total)
            .ok_or_else(|| SpotError::Overflow(given_total as i32 - total_slots as i32))?;

        let missing_board = 5 - given_board_count;
        let mut fill_plan = Vec::with_capacity(missing);
        fill_plan.extend(std::iter::repeat(FillSlot::Board).take(missing_board));
        for (p, hand) in given_holes.iter().enumerate() {
            let missing_hole = 2 - hand_card_count(hand);
            fill_plan.extend(std::iter::repeat(FillSlot::Hole(p)).take(missing_hole));
        }
        debug_assert_eq!(fill_plan.len(), missing);

        let ready = (2..=9).contains(&num_players)
            && matches!(board_tokens.len(), 0 | 3 | 4 | 5)
            && missing == fill_plan.len();

        debug!(
            "parsed spot {input:?}: players={num_players} missing={missing} ready={ready}"
        );

        Ok(Spot {
            num_players,
            given_holes,
            given_common,
            all_mask,
            missing,
            fill_plan,
            ready,
        })
    }
}

fn hand_card_count(hand: &Hand) -> usize {
    hand.colors.count_ones() as usize
}

fn parse_player_count(header: &str) -> Result<usize, SpotError> {
    let bytes = header.as_bytes();
    if bytes.is_empty() || bytes[bytes.len() - 1].to_ascii_uppercase() != b'P' {
        return Err(SpotError::MalformedToken(header.to_string()));
    }
    let digits = &header[..header.len() - 1];
    digits
        .parse::<usize>()
        .map_err(|_| SpotError::MalformedToken(header.to_string()))
}

fn add_unique(
    hand: &mut Hand,
    all_mask: &mut Card64,
    card: Card,
    token: &str,
) -> Result<(), SpotError> {
    if all_mask.contains(card) {
        return Err(SpotError::DuplicateCard(token.to_string()));
    }
    all_mask.insert(card);
    hand.add(card, 0);
    Ok(())
}

/// A player token is `--` (handled by the caller before reaching here), a
/// 2-character single known card, or a 4-character pair of card tokens.
fn parse_hole_token(tok: &str, all_mask: &mut Card64) -> Result<Hand, SpotError> {
    let mut hand = Hand::new();
    match tok.len() {
        2 => {
            if let Some(card) = Card::parse(tok)? {
                add_unique(&mut hand, all_mask, card, tok)?;
            }
        }
        4 => {
            for chunk in [&tok[0..2], &tok[2..4]] {
                if let Some(card) = Card::parse(chunk)? {
                    add_unique(&mut hand, all_mask, card, chunk)?;
                }
            }
        }
        _ => return Err(SpotError::MalformedToken(tok.to_string())),
    }
    Ok(hand)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fully_unknown_spot() {
        let spot = Spot::parse("2P").unwrap();
        assert!(spot.ready);
        assert_eq!(spot.num_players, 2);
        assert_eq!(spot.missing, 9); // 4 hole + 5 board
        assert_eq!(spot.fill_plan.len(), 9);
    }

    #[test]
    fn one_card_known_per_player() {
        let spot = Spot::parse("2P AcKd 7h7s").unwrap();
        assert!(spot.ready);
        assert_eq!(spot.missing, 5); // fully determined holes, 5 board
        assert_eq!(spot.given_holes[0].colors.count_ones(), 2);
        assert_eq!(spot.given_holes[1].colors.count_ones(), 2);
    }

    #[test]
    fn single_hole_card_leaves_one_missing() {
        let spot = Spot::parse("2P 3d").unwrap();
        assert!(spot.ready);
        assert_eq!(spot.given_holes[0].colors.count_ones(), 1);
        assert_eq!(spot.given_holes[1].colors.count_ones(), 0);
        // 1 missing hole for p0, 2 for p1, 5 board = 8
        assert_eq!(spot.missing, 8);
    }

    #[test]
    fn partial_board_with_fully_determined_holes() {
        let spot = Spot::parse("3P KhKs - 8c 4d 7c Ts Qs").unwrap();
        assert!(spot.ready);
        assert_eq!(spot.missing, 4 + 4); // players 2,3 fully unknown (2 each), board done
        assert_eq!(spot.given_common.colors.count_ones(), 5);
    }

    #[test]
    fn rejects_duplicate_card() {
        let err = Spot::parse("2P AcAc").unwrap_err();
        assert!(matches!(err, SpotError::DuplicateCard(_)));
    }

    #[test]
    fn rejects_bad_player_count() {
        let err = Spot::parse("1P").unwrap_err();
        assert!(matches!(err, SpotError::BadPlayerCount(1)));
        let err = Spot::parse("10P").unwrap_err();
        assert!(matches!(err, SpotError::BadPlayerCount(10)));
    }

    #[test]
    fn rejects_bad_board_size() {
        let err = Spot::parse("2P - 2c 3c").unwrap_err();
        assert!(matches!(err, SpotError::BadBoardSize(2)));
    }

    #[test]
    fn unknown_markers_are_accepted_everywhere() {
        let spot = Spot::parse("2P -- - 2c -- 4c").unwrap();
        assert!(spot.ready);
        assert_eq!(spot.given_common.colors.count_ones(), 2);
    }

    #[test]
    fn fill_plan_orders_board_before_holes() {
        let spot = Spot::parse("2P 3d").unwrap();
        let board_count = spot
            .fill_plan
            .iter()
            .take_while(|s| matches!(s, FillSlot::Board))
            .count();
        assert_eq!(board_count, 5);
    }
}
