use thiserror::Error;

/// Errors surfaced by the stake calculator.
///
/// Degenerate numeric input (zero bankroll, negative edge, oversized
/// liability, NaN) is never an error — it resolves to a stake of zero.  The
/// one hard precondition is that the per-outcome lists line up, because a
/// mismatch would silently attribute an exposure to the wrong outcome.
#[derive(Debug, Error)]
pub enum StakeError {
    #[error("other_probabilities has {probabilities} entries but other_positions has {positions}")]
    OutcomeLengthMismatch {
        probabilities: usize,
        positions: usize,
    },

    #[error("stake optimisation failed: {0}")]
    Solver(String),
}
