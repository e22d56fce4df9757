//! Kelly criterion stake sizing for exchange betting.
//!
//! Given decimal odds, a fair probability, and the exposures already held
//! across the mutually-exclusive outcomes of a market, computes the stake on
//! one target outcome that maximises the expected logarithm of terminal
//! wealth, optionally scaled by a fractional-Kelly multiplier.
//!
//! Works for both back bets (profit `(price − 1) × stake` if the outcome
//! occurs) and lay bets (win `stake` if it does not, owe
//! `(price − 1) × stake` if it does). The returned value is always the stake
//! the bettor would enter, never the lay liability.
//!
//! ```
//! use kelly_staking::{calculate_kelly_stake, Side, StakeRequest};
//!
//! let mut request = StakeRequest::new(2.8, Side::Back, 0.4, 1000.0);
//! request.other_probabilities = vec![0.6];
//! request.other_positions = vec![0.0];
//!
//! let stake = calculate_kelly_stake(&request).unwrap();
//! assert!(stake > 0.0 && stake <= 1000.0);
//! ```

pub mod error;
pub mod staking;

pub use error::StakeError;
pub use staking::request::{Side, StakeRequest};
pub use staking::solver::{calculate_kelly_stake, calculate_stake_breakdown, StakeBreakdown};
