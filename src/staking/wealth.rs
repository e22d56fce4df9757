use argmin::core::{CostFunction, Error};

use super::request::{Side, StakeRequest};

/// Expected logarithm of terminal wealth after adding `stake` to the existing
/// book.
///
/// Each outcome contributes `probability × ln(terminal wealth)`, where the
/// terminal wealth folds together the bankroll, the exposure already held on
/// that outcome, and the cash flow of the new stake:
///
/// - back: `B + position + stake·(price − 1)` if the target occurs,
///   `B + other_posᵢ − stake` if outcome i occurs instead;
/// - lay: `B + position − stake·(price − 1)` if the target occurs,
///   `B + other_posᵢ + stake` otherwise.
///
/// Outcomes with non-positive probability are skipped; a non-positive wealth
/// under an outcome that can actually occur returns `NEG_INFINITY` (the stake
/// risks ruin and is never optimal).  Skipping first keeps non-normalised
/// probability sets from producing `0 × ln(≤0) = NaN`.
pub fn log_expected_wealth(stake: f64, request: &StakeRequest) -> f64 {
    let (target_wealth, settle_flow) = match request.side {
        Side::Back => (
            request.bankroll + request.position + stake * (request.price - 1.0),
            -stake,
        ),
        Side::Lay => (
            request.bankroll + request.position - stake * (request.price - 1.0),
            stake,
        ),
    };

    let mut expected = 0.0;
    if request.probability > 0.0 {
        if target_wealth <= 0.0 {
            return f64::NEG_INFINITY;
        }
        expected += request.probability * target_wealth.ln();
    }
    for (other_probability, other_position) in request
        .other_probabilities
        .iter()
        .zip(request.other_positions.iter())
    {
        if *other_probability <= 0.0 {
            continue;
        }
        let wealth = request.bankroll + other_position + settle_flow;
        if wealth <= 0.0 {
            return f64::NEG_INFINITY;
        }
        expected += other_probability * wealth.ln();
    }
    expected
}

/// Minimisation objective for the solver: negated expected log wealth.
pub(crate) struct LogWealthObjective {
    pub(crate) request: StakeRequest,
}

impl CostFunction for LogWealthObjective {
    type Param = f64;
    type Output = f64;

    fn cost(&self, stake: &Self::Param) -> Result<Self::Output, Error> {
        Ok(-log_expected_wealth(*stake, &self.request))
    }
}
