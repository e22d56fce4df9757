use argmin::core::Executor;
use argmin::solver::goldensectionsearch::GoldenSectionSearch;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::StakeError;

use super::kelly;
use super::request::{Side, StakeRequest};
use super::wealth::LogWealthObjective;

/// Relative width at which the golden-section bracket is considered
/// converged.
const TOLERANCE: f64 = 1e-6;
const MAX_ITERS: u64 = 500;

/// Solved stake plus the intermediate quantities behind it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StakeBreakdown {
    /// Expected return per unit risked on the target quote.
    pub edge: f64,
    /// Bankroll left after reserving for the worst existing exposure.
    pub effective_bankroll: f64,
    /// Log-wealth optimum before fractional-Kelly scaling.
    pub full_kelly_stake: f64,
    /// Recommended stake.
    pub stake: f64,
    /// Worst-case loss if the recommendation is taken (equals the stake for
    /// a back bet, `stake × (price − 1)` for a lay).
    pub liability: f64,
}

/// Calculate the optimal fractional-Kelly stake for one bet on a market with
/// mutually-exclusive outcomes, accounting for exposure already held.
///
/// Returns a non-negative, finite stake.  Degenerate input (no edge, zero or
/// exhausted bankroll, price ≤ 1, NaN) yields `Ok(0.0)`; the only error is a
/// length mismatch between the other-outcome lists.
pub fn calculate_kelly_stake(request: &StakeRequest) -> Result<f64, StakeError> {
    Ok(calculate_stake_breakdown(request)?.stake)
}

/// As [`calculate_kelly_stake`], but returning the intermediate quantities
/// alongside the stake.
pub fn calculate_stake_breakdown(request: &StakeRequest) -> Result<StakeBreakdown, StakeError> {
    if request.other_probabilities.len() != request.other_positions.len() {
        return Err(StakeError::OutcomeLengthMismatch {
            probabilities: request.other_probabilities.len(),
            positions: request.other_positions.len(),
        });
    }

    let edge = kelly::edge(request.probability, request.price, request.side);
    let effective_bankroll = effective_bankroll(request);

    if request.price <= 1.0 || effective_bankroll <= 0.0 {
        debug!(
            "no stake: price={} effective_bankroll={:.4}",
            request.price, effective_bankroll
        );
        if request.verbose {
            info!(
                "staking nothing: price {} / effective bankroll {:.4}",
                request.price, effective_bankroll
            );
        }
        return Ok(suppressed(edge, effective_bankroll));
    }

    // The objective is a probability-weighted sum of logs of affine functions
    // of the stake, hence concave: a non-positive slope at zero means the
    // optimum on [0, ∞) is exactly zero.  NaN input lands here too.
    let growth = growth_rate_at_zero(request);
    if !(growth > 0.0) {
        debug!("no stake: log-growth slope at zero stake is {:.6}", growth);
        if request.verbose {
            info!(
                "staking nothing: edge {:.6}, log-growth slope {:.6}",
                edge, growth
            );
        }
        return Ok(suppressed(edge, effective_bankroll));
    }

    // Cap the new stake's own worst-case loss at the effective bankroll.  For
    // a lay that loss is the liability, so the bound lives in stake units.
    let upper_bound = match request.side {
        Side::Back => effective_bankroll,
        Side::Lay => effective_bankroll / (request.price - 1.0),
    };

    debug!(
        "stake search: side={:?} edge={:.6} slope={:.6} effective_bankroll={:.2} upper_bound={:.2}",
        request.side, edge, growth, effective_bankroll, upper_bound
    );

    let solver = GoldenSectionSearch::new(0.0, upper_bound)
        .and_then(|solver| solver.with_tolerance(TOLERANCE))
        .map_err(|e| StakeError::Solver(e.to_string()))?;

    let objective = LogWealthObjective {
        request: request.clone(),
    };

    let result = Executor::new(objective, solver)
        .configure(|state| state.param(upper_bound / 100.0).max_iters(MAX_ITERS))
        .run()
        .map_err(|e| StakeError::Solver(e.to_string()))?;

    let full_kelly_stake = result.state().best_param.unwrap_or(0.0).max(0.0);
    let mut stake = (full_kelly_stake * request.kelly_fraction).max(0.0);
    if !stake.is_finite() {
        stake = 0.0;
    }
    let liability = match request.side {
        Side::Back => stake,
        Side::Lay => stake * (request.price - 1.0),
    };

    if request.verbose {
        info!(
            "optimal stake {:.4} (full Kelly {:.4}, liability {:.4}) after {} iterations",
            stake,
            full_kelly_stake,
            liability,
            result.state().iter
        );
    }

    Ok(StakeBreakdown {
        edge,
        effective_bankroll,
        full_kelly_stake,
        stake,
        liability,
    })
}

fn suppressed(edge: f64, effective_bankroll: f64) -> StakeBreakdown {
    StakeBreakdown {
        edge,
        effective_bankroll,
        full_kelly_stake: 0.0,
        stake: 0.0,
        liability: 0.0,
    }
}

/// Bankroll available for a new stake: capital already covering the worst
/// single existing exposure cannot be risked again.
fn effective_bankroll(request: &StakeRequest) -> f64 {
    let mut worst = request.position.min(0.0);
    for other_position in &request.other_positions {
        worst = worst.min(*other_position);
    }
    request.bankroll + worst
}

/// Derivative of expected log wealth with respect to the stake, at zero
/// stake.  Every denominator is positive once the effective-bankroll guard
/// has passed.
fn growth_rate_at_zero(request: &StakeRequest) -> f64 {
    let (target_flow, settle_flow) = match request.side {
        Side::Back => (request.price - 1.0, -1.0),
        Side::Lay => (-(request.price - 1.0), 1.0),
    };

    let mut slope = 0.0;
    if request.probability > 0.0 {
        slope += request.probability * target_flow / (request.bankroll + request.position);
    }
    for (other_probability, other_position) in request
        .other_probabilities
        .iter()
        .zip(request.other_positions.iter())
    {
        if *other_probability <= 0.0 {
            continue;
        }
        slope += other_probability * settle_flow / (request.bankroll + other_position);
    }
    slope
}
