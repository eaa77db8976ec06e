//! Full response envelopes through text extraction and decoding.

use sentinel_gateway::{GatewayError, GenerateResponse, Operation, decode_structured};
use sentinel_model::{ModelMetrics, SchemaAnalysis};
use serde_json::json;

fn envelope(text: &str) -> GenerateResponse {
    serde_json::from_value(json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    }))
    .expect("envelope")
}

#[test]
fn schema_analysis_from_envelope() {
    let response = envelope(
        r#"{
            "features": ["Time", "V1", "Amount"],
            "targetVariable": "Class",
            "dataIssues": ["Severe class imbalance"],
            "summary": "Anonymized card transactions."
        }"#,
    );
    let text = response.text().expect("text");
    let analysis: SchemaAnalysis = decode_structured(Operation::AnalyzeSchema, &text).unwrap();
    assert_eq!(analysis.target_variable, "Class");
    assert_eq!(analysis.features.len(), 3);
}

#[test]
fn metrics_missing_matrix_cell() {
    let response = envelope(
        r#"{
            "accuracy": 0.999, "precision": 0.91, "recall": 0.82, "f1Score": 0.86, "auc": 0.97,
            "confusionMatrix": { "tp": 82, "fp": 8, "tn": 56850 }
        }"#,
    );
    let text = response.text().expect("text");
    let err = decode_structured::<ModelMetrics>(Operation::SimulateTraining, &text).unwrap_err();
    match err {
        GatewayError::ProtocolViolation { operation, reason } => {
            assert_eq!(operation, Operation::SimulateTraining);
            assert!(reason.contains("confusionMatrix.fn"), "{reason}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn extra_fields_are_tolerated() {
    let metrics: ModelMetrics = decode_structured(
        Operation::SimulateTraining,
        r#"{
            "accuracy": 0.99, "precision": 0.9, "recall": 0.8, "f1Score": 0.85, "auc": 0.95,
            "confusionMatrix": { "tp": 80, "fp": 9, "tn": 900, "fn": 20 },
            "notes": "simulated"
        }"#,
    )
    .unwrap();
    assert_eq!(metrics.confusion_matrix.true_positives, 80.0);
}

#[test]
fn empty_candidate_list_has_no_text() {
    let response: GenerateResponse = serde_json::from_value(json!({})).unwrap();
    assert!(response.text().is_none());
}
