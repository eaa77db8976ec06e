//! Training configuration chosen on the Train stage.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Smallest accepted test split.
pub const MIN_TEST_SIZE: f64 = 0.1;
/// Largest accepted test split.
pub const MAX_TEST_SIZE: f64 = 0.4;

/// Algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Algorithm {
    #[default]
    #[serde(rename = "XGBoost")]
    XgBoost,
    RandomForest,
    LogisticRegression,
    NeuralNetwork,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::XgBoost,
        Algorithm::RandomForest,
        Algorithm::LogisticRegression,
        Algorithm::NeuralNetwork,
    ];

    /// Identifier sent to the gateway.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::XgBoost => "XGBoost",
            Self::RandomForest => "RandomForest",
            Self::LogisticRegression => "LogisticRegression",
            Self::NeuralNetwork => "NeuralNetwork",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::XgBoost => "XGBoost (Gradient Boosting)",
            Self::RandomForest => "Random Forest Ensemble",
            Self::LogisticRegression => "Logistic Regression",
            Self::NeuralNetwork => "Deep Neural Network",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for Algorithm {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.wire_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ModelError::InvalidConfig {
                field: "algorithm",
                reason: format!("unknown algorithm '{s}'"),
            })
    }
}

/// User-selected training parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    pub algorithm: Algorithm,
    pub test_size: f64,
    pub learning_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epochs: Option<u32>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::XgBoost,
            test_size: 0.2,
            learning_rate: 0.01,
            epochs: Some(100),
        }
    }
}

impl ModelConfig {
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    #[must_use]
    pub fn with_test_size(mut self, test_size: f64) -> Self {
        self.test_size = test_size;
        self
    }

    #[must_use]
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    #[must_use]
    pub fn with_epochs(mut self, epochs: Option<u32>) -> Self {
        self.epochs = epochs;
        self
    }

    /// Checks the ranges the Train stage offers.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_TEST_SIZE..=MAX_TEST_SIZE).contains(&self.test_size) {
            return Err(ModelError::InvalidConfig {
                field: "test size",
                reason: format!(
                    "{} is outside {MIN_TEST_SIZE}..={MAX_TEST_SIZE}",
                    self.test_size
                ),
            });
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(ModelError::InvalidConfig {
                field: "learning rate",
                reason: format!("{} must be a positive number", self.learning_rate),
            });
        }
        if self.epochs == Some(0) {
            return Err(ModelError::InvalidConfig {
                field: "epochs",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ModelConfig::default();
        assert_eq!(config.algorithm, Algorithm::XgBoost);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(ModelConfig::default().with_test_size(0.5).validate().is_err());
        assert!(ModelConfig::default().with_learning_rate(0.0).validate().is_err());
        assert!(ModelConfig::default().with_learning_rate(f64::NAN).validate().is_err());
        assert!(ModelConfig::default().with_epochs(Some(0)).validate().is_err());
        assert!(ModelConfig::default().with_epochs(None).validate().is_ok());
    }

    #[test]
    fn parses_algorithm_names() {
        assert_eq!("xgboost".parse::<Algorithm>().unwrap(), Algorithm::XgBoost);
        assert_eq!(
            "RandomForest".parse::<Algorithm>().unwrap(),
            Algorithm::RandomForest
        );
        assert!("svm".parse::<Algorithm>().is_err());
    }

    #[test]
    fn serializes_wire_names() {
        let json = serde_json::to_value(ModelConfig::default()).unwrap();
        assert_eq!(json["algorithm"], "XGBoost");
        assert_eq!(json["testSize"], 0.2);
        assert_eq!(json["epochs"], 100);
    }
}
