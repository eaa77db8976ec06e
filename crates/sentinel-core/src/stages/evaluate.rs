//! Evaluate stage: formatted view of the returned metrics.

use std::fmt;

use sentinel_model::ModelMetrics;

/// A labelled, already-formatted value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub label: &'static str,
    pub value: String,
}

impl ReportLine {
    fn new(label: &'static str, value: String) -> Self {
        Self { label, value }
    }
}

/// Scores as percentages with one decimal, AUC with three, and the raw
/// confusion-matrix counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationReport {
    pub scores: Vec<ReportLine>,
    pub confusion: Vec<ReportLine>,
}

impl EvaluationReport {
    pub fn from_metrics(metrics: &ModelMetrics) -> Self {
        let matrix = &metrics.confusion_matrix;
        Self {
            scores: vec![
                ReportLine::new("Accuracy", percent(metrics.accuracy)),
                ReportLine::new("Precision", percent(metrics.precision)),
                ReportLine::new("Recall", percent(metrics.recall)),
                ReportLine::new("F1 Score", percent(metrics.f1_score)),
                ReportLine::new("AUC-ROC", format!("{:.3}", metrics.auc)),
            ],
            confusion: vec![
                ReportLine::new("True Positives", matrix.true_positives.to_string()),
                ReportLine::new("False Positives", matrix.false_positives.to_string()),
                ReportLine::new("True Negatives", matrix.true_negatives.to_string()),
                ReportLine::new("False Negatives", matrix.false_negatives.to_string()),
            ],
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &ReportLine> {
        self.scores.iter().chain(&self.confusion)
    }
}

fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, line) in self.lines().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{:<16} {}", line.label, line.value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use sentinel_model::ConfusionMatrix;

    #[test]
    fn formats_scores_and_counts() {
        let metrics = ModelMetrics {
            accuracy: 0.992,
            precision: 0.915,
            recall: 0.82,
            f1_score: 0.865,
            auc: 0.9744,
            confusion_matrix: ConfusionMatrix {
                true_positives: 82.0,
                false_positives: 8.0,
                true_negatives: 56850.0,
                false_negatives: 18.0,
            },
        };
        assert_snapshot!(EvaluationReport::from_metrics(&metrics).to_string(), @r"
        Accuracy         99.2%
        Precision        91.5%
        Recall           82.0%
        F1 Score         86.5%
        AUC-ROC          0.974
        True Positives   82
        False Positives  8
        True Negatives   56850
        False Negatives  18
        ");
    }

    #[test]
    fn fractional_counts_are_kept() {
        let metrics = ModelMetrics {
            accuracy: 1.0,
            precision: 1.0,
            recall: 1.0,
            f1_score: 1.0,
            auc: 1.0,
            confusion_matrix: ConfusionMatrix {
                true_positives: 12.5,
                ..ConfusionMatrix::default()
            },
        };
        let report = EvaluationReport::from_metrics(&metrics);
        assert_eq!(report.confusion[0].value, "12.5");
        assert_eq!(report.scores[0].value, "100.0%");
    }
}
