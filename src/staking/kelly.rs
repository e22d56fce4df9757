//! Closed-form Kelly helpers for a single isolated bet.
//!
//! Standard formula:
//!   f* = (b·p − q) / b
//! where
//!   b  = net odds received on the bet (profit per unit risked)
//!   p  = probability the bet succeeds
//!   q  = 1 − p
//!
//! For a back bet at decimal odds `price`, b = price − 1 and p is the
//! outcome probability.  For a lay bet the unit risked is one unit of
//! liability: the bet succeeds with probability 1 − p and returns
//! 1 / (price − 1) per unit of liability.
//!
//! These closed forms assume no existing exposure and probabilities that sum
//! to 1 across the market; the solver in [`super::solver`] handles the
//! general case numerically and reduces to these values when the assumptions
//! hold.

use super::request::Side;

/// Expected return per unit risked.
///
/// # Arguments
/// * `probability` – Fair probability of the target outcome (0.0–1.0).
/// * `price`       – Decimal odds for the target outcome (> 1).
/// * `side`        – Back or lay.
///
/// Back: `p·price − 1`.  Lay: `(1 − p)·price / (price − 1) − 1`, the return
/// per unit of liability.  Returns `0.0` when price ≤ 1 (unbettable quote).
pub fn edge(probability: f64, price: f64, side: Side) -> f64 {
    if price <= 1.0 {
        return 0.0;
    }
    match side {
        Side::Back => probability * price - 1.0,
        Side::Lay => (1.0 - probability) * price / (price - 1.0) - 1.0,
    }
}

/// Full-Kelly optimal fraction of bankroll to risk on an isolated bet.
///
/// Back: fraction staked, `(p·price − 1) / (price − 1)`.
/// Lay: fraction risked as liability, `(1 − p) − p·(price − 1)`.
///
/// Returns `0.0` when the edge is non-positive (no bet) or price ≤ 1.
pub fn kelly_fraction(probability: f64, price: f64, side: Side) -> f64 {
    if price <= 1.0 {
        return 0.0;
    }
    let f = match side {
        Side::Back => (probability * price - 1.0) / (price - 1.0),
        Side::Lay => (1.0 - probability) - probability * (price - 1.0),
    };
    f.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_back_edge_positive() {
        // 0.4 × 2.8 = 1.12 → 12% edge
        assert_relative_eq!(edge(0.4, 2.8, Side::Back), 0.12, epsilon = 1e-9);
    }

    #[test]
    fn test_back_edge_fair_price() {
        assert_relative_eq!(edge(0.5, 2.0, Side::Back), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_lay_edge_fair_price() {
        // Laying at exactly fair odds has zero edge.
        assert_relative_eq!(edge(0.01, 100.0, Side::Lay), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_lay_edge_positive_when_overpriced() {
        // Market says 1/3, we think 1/4 → laying is value.
        assert!(edge(0.25, 3.0, Side::Lay) > 0.0);
    }

    #[test]
    fn test_edge_unbettable_price() {
        assert_relative_eq!(edge(0.5, 1.0, Side::Back), 0.0, epsilon = 1e-9);
        assert_relative_eq!(edge(0.5, 0.5, Side::Lay), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_back_fraction_positive_edge() {
        // f = (0.4·2.8 − 1) / 1.8 = 0.0667
        assert_relative_eq!(
            kelly_fraction(0.4, 2.8, Side::Back),
            0.12 / 1.8,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_back_fraction_negative_edge_clips_to_zero() {
        assert_relative_eq!(kelly_fraction(0.3, 3.0, Side::Back), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_lay_fraction_fair_price_is_zero() {
        assert_relative_eq!(kelly_fraction(0.01, 100.0, Side::Lay), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_lay_fraction_near_certain_win() {
        // Win prob 0.995, liability pays 1/99 per unit:
        // f = 0.995 − 0.005·99 = 0.5 of bankroll as liability.
        assert_relative_eq!(kelly_fraction(0.005, 100.0, Side::Lay), 0.5, epsilon = 1e-9);
    }
}
