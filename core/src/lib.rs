//! Monte Carlo equity calculator core: card encoding, the 7-card hand
//! evaluator, spot construction, the simulator, and the worker pool.
//!
//! ```
//! use pokercalc_core::spot::Spot;
//! use pokercalc_core::pool;
//!
//! let spot = Spot::parse("2P AcKd 7h7s").unwrap();
//! let result = pool::run(&spot, 20_000, 2);
//! assert_eq!(result.games_run, 20_000);
//! ```

pub mod batch;
pub mod card;
pub mod error;
pub mod exact;
pub mod hand;
pub mod mask;
pub mod pool;
pub mod result;
pub mod rng;
pub mod simulate;
pub mod spot;

pub use error::SpotError;
pub use hand::Hand;
pub use result::{PlayerResult, RunResult, TIE_UNIT};
pub use spot::Spot;
