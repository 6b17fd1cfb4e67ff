//! Errors reported while parsing and validating a [`crate::spot::Spot`].
//!
//! All of these are raised at parse/validate time, never during simulation; the
//! hot loop's only runtime predicate (uniqueness inside `Hand::add`) is expected
//! to always succeed given a correctly-constructed draw, and its failure is a bug,
//! not a reportable error (see `debug_assert!` call sites in `simulate.rs`).
use thiserror::Error;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum SpotError {
    #[error("malformed card token: {0:?}")]
    MalformedToken(String),

    #[error("duplicate card in spot: {0}")]
    DuplicateCard(String),

    #[error("player count {0} outside [2, 9]")]
    BadPlayerCount(usize),

    #[error("board has {0} given cards, must be 0, 3, 4, or 5")]
    BadBoardSize(usize),

    #[error("derived missing-card count {0} is out of range")]
    Overflow(i32),
}
