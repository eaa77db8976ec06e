//! Evaluation metrics as reported by the training simulation.
//!
//! The values are accepted as returned. [`ModelMetrics::consistency_issues`]
//! compares them against the confusion matrix so callers can log doubtful
//! responses, but it never rejects anything.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classifier outcome counts.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    #[serde(rename = "tp")]
    pub true_positives: f64,
    #[serde(rename = "fp")]
    pub false_positives: f64,
    #[serde(rename = "tn")]
    pub true_negatives: f64,
    #[serde(rename = "fn")]
    pub false_negatives: f64,
}

impl ConfusionMatrix {
    #[must_use]
    pub fn total(&self) -> f64 {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }

    /// `tp / (tp + fp)`, or `None` when nothing was predicted positive.
    #[must_use]
    pub fn derived_precision(&self) -> Option<f64> {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    /// `tp / (tp + fn)`, or `None` when there were no actual positives.
    #[must_use]
    pub fn derived_recall(&self) -> Option<f64> {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }

    #[must_use]
    pub fn derived_accuracy(&self) -> Option<f64> {
        ratio(self.true_positives + self.true_negatives, self.total())
    }
}

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    (denominator > 0.0).then(|| numerator / denominator)
}

/// Full metrics payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub auc: f64,
    pub confusion_matrix: ConfusionMatrix,
}

/// A disagreement found by [`ModelMetrics::consistency_issues`].
#[derive(Debug, Clone, PartialEq)]
pub enum MetricsIssue {
    /// A score that should be a probability lies outside `[0, 1]`.
    OutOfRange { metric: &'static str, value: f64 },
    /// A confusion-matrix count is negative.
    NegativeCount { cell: &'static str, value: f64 },
    /// A reported score differs from the one derived from the matrix.
    Mismatch {
        metric: &'static str,
        reported: f64,
        derived: f64,
    },
}

impl fmt::Display for MetricsIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { metric, value } => {
                write!(f, "{metric} {value} is outside [0, 1]")
            }
            Self::NegativeCount { cell, value } => {
                write!(f, "confusion matrix {cell} is negative ({value})")
            }
            Self::Mismatch {
                metric,
                reported,
                derived,
            } => write!(
                f,
                "{metric} reported as {reported:.4} but confusion matrix gives {derived:.4}"
            ),
        }
    }
}

impl ModelMetrics {
    /// Default tolerance for [`Self::consistency_issues`].
    pub const DEFAULT_TOLERANCE: f64 = 0.02;

    /// Reports scores out of range and scores that disagree with the
    /// confusion matrix by more than `tolerance`.
    #[must_use]
    pub fn consistency_issues(&self, tolerance: f64) -> Vec<MetricsIssue> {
        let mut issues = Vec::new();
        for (metric, value) in [
            ("accuracy", self.accuracy),
            ("precision", self.precision),
            ("recall", self.recall),
            ("f1Score", self.f1_score),
            ("auc", self.auc),
        ] {
            if !(0.0..=1.0).contains(&value) {
                issues.push(MetricsIssue::OutOfRange { metric, value });
            }
        }

        let matrix = &self.confusion_matrix;
        for (cell, value) in [
            ("tp", matrix.true_positives),
            ("fp", matrix.false_positives),
            ("tn", matrix.true_negatives),
            ("fn", matrix.false_negatives),
        ] {
            if value < 0.0 {
                issues.push(MetricsIssue::NegativeCount { cell, value });
            }
        }

        for (metric, reported, derived) in [
            ("precision", self.precision, matrix.derived_precision()),
            ("recall", self.recall, matrix.derived_recall()),
            ("accuracy", self.accuracy, matrix.derived_accuracy()),
        ] {
            if let Some(derived) = derived
                && (reported - derived).abs() > tolerance
            {
                issues.push(MetricsIssue::Mismatch {
                    metric,
                    reported,
                    derived,
                });
            }
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn consistent() -> ModelMetrics {
        ModelMetrics {
            accuracy: 0.95,
            precision: 0.8,
            recall: 0.8,
            f1_score: 0.8,
            auc: 0.97,
            confusion_matrix: ConfusionMatrix {
                true_positives: 80.0,
                false_positives: 20.0,
                true_negatives: 870.0,
                false_negatives: 20.0,
            },
        }
    }

    #[test]
    fn consistent_metrics_have_no_issues() {
        let metrics = ModelMetrics {
            accuracy: 950.0 / 990.0,
            ..consistent()
        };
        assert!(metrics.consistency_issues(0.001).is_empty());
    }

    #[test]
    fn flags_precision_mismatch() {
        let metrics = ModelMetrics {
            precision: 0.99,
            ..consistent()
        };
        let issues = metrics.consistency_issues(ModelMetrics::DEFAULT_TOLERANCE);
        assert!(issues.iter().any(|issue| matches!(
            issue,
            MetricsIssue::Mismatch {
                metric: "precision",
                ..
            }
        )));
    }

    #[test]
    fn flags_out_of_range_and_negative_counts() {
        let mut metrics = consistent();
        metrics.auc = 1.4;
        metrics.confusion_matrix.false_negatives = -1.0;
        let issues = metrics.consistency_issues(1.0);
        assert!(issues.contains(&MetricsIssue::OutOfRange {
            metric: "auc",
            value: 1.4
        }));
        assert!(issues.contains(&MetricsIssue::NegativeCount {
            cell: "fn",
            value: -1.0
        }));
    }

    #[test]
    fn deserializes_wire_names() {
        let json = r#"{
            "accuracy": 0.99, "precision": 0.9, "recall": 0.85, "f1Score": 0.87, "auc": 0.98,
            "confusionMatrix": {"tp": 85, "fp": 9, "tn": 9800, "fn": 15}
        }"#;
        let metrics: ModelMetrics = serde_json::from_str(json).unwrap();
        assert_eq!(metrics.f1_score, 0.87);
        assert_eq!(metrics.confusion_matrix.false_negatives, 15.0);
        assert_eq!(metrics.confusion_matrix.total(), 9909.0);
    }
}
