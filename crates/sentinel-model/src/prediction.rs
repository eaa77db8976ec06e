use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification returned for one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Fraud,
    Legitimate,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fraud => f.write_str("Fraud"),
            Self::Legitimate => f.write_str("Legitimate"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub prediction: Verdict,
    pub probability: f64,
    pub reasoning: String,
}

impl Prediction {
    pub fn is_fraud(&self) -> bool {
        self.prediction == Verdict::Fraud
    }
}
