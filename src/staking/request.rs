use serde::{Deserialize, Serialize};

/// Which way the wager is structured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Profit `(price − 1) × stake` if the outcome occurs, lose the stake
    /// otherwise.
    Back,
    /// Win the stake if the outcome does NOT occur, owe
    /// `(price − 1) × stake` if it does.
    Lay,
}

/// One stake-sizing request: the target outcome being priced plus the current
/// exposure held across every other outcome of the market.
///
/// `other_probabilities` and `other_positions` are index-aligned, one entry
/// per remaining outcome.  The probabilities across the whole market should
/// sum to 1; that is the caller's responsibility and is deliberately not
/// enforced here.
///
/// Positions are expressed in profit-if-occurs units: a positive value is how
/// much the bettor stands to win if that outcome happens, a negative value
/// how much they stand to lose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakeRequest {
    /// Decimal odds for the target outcome (> 1).
    pub price: f64,
    pub side: Side,
    /// Fair probability of the target outcome (0.0–1.0).
    pub probability: f64,
    /// Fair probabilities of the remaining outcomes.
    pub other_probabilities: Vec<f64>,
    /// Current exposure on the target outcome.
    pub position: f64,
    /// Current exposure on each remaining outcome.
    pub other_positions: Vec<f64>,
    /// Notional Kelly bankroll (≥ 0).
    pub bankroll: f64,
    /// Fractional-Kelly multiplier applied to the optimum (0.0–1.0].
    #[serde(default = "default_kelly_fraction")]
    pub kelly_fraction: f64,
    /// Emit an info-level summary of the solved stake.
    #[serde(default)]
    pub verbose: bool,
}

fn default_kelly_fraction() -> f64 {
    1.0
}

impl StakeRequest {
    /// Build a request for a market with no other outcomes listed and no
    /// existing exposure, at full Kelly.  Fill in the remaining fields
    /// directly.
    pub fn new(price: f64, side: Side, probability: f64, bankroll: f64) -> Self {
        StakeRequest {
            price,
            side,
            probability,
            other_probabilities: Vec::new(),
            position: 0.0,
            other_positions: Vec::new(),
            bankroll,
            kelly_fraction: default_kelly_fraction(),
            verbose: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_defaults() {
        let request = StakeRequest::new(2.8, Side::Back, 0.4, 1000.0);
        assert_relative_eq!(request.kelly_fraction, 1.0, epsilon = 1e-12);
        assert!(!request.verbose);
        assert!(request.other_probabilities.is_empty());
        assert!(request.other_positions.is_empty());
        assert_relative_eq!(request.position, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let json = r#"{
            "price": 2.8,
            "side": "back",
            "probability": 0.4,
            "other_probabilities": [0.6],
            "position": 0.0,
            "other_positions": [0.0],
            "bankroll": 1000.0
        }"#;
        let request: StakeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.side, Side::Back);
        assert_relative_eq!(request.kelly_fraction, 1.0, epsilon = 1e-12);
        assert!(!request.verbose);
    }

    #[test]
    fn test_side_deserializes_lowercase() {
        let request: StakeRequest = serde_json::from_str(
            r#"{
                "price": 3.0,
                "side": "lay",
                "probability": 0.3,
                "other_probabilities": [],
                "position": 0.0,
                "other_positions": [],
                "bankroll": 100.0
            }"#,
        )
        .unwrap();
        assert_eq!(request.side, Side::Lay);
    }
}
