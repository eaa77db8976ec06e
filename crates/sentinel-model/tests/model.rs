//! Tests for sentinel-model wire types.

use chrono::{TimeZone, Utc};
use sentinel_model::{Deployment, DeploymentStatus, Prediction, SchemaAnalysis, Verdict};

#[test]
fn deployment_serializes_camel_case() {
    let created_at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let deployment = Deployment::new(created_at);
    assert_eq!(deployment.status, DeploymentStatus::Deploying);
    insta::assert_json_snapshot!(deployment, @r#"
    {
      "endpoint": "https://api.sentinel-fraud.ai/v1/predict",
      "status": "deploying",
      "createdAt": "2026-01-01T00:00:00Z",
      "version": "SENTINEL-1.0-STABLE"
    }
    "#);
}

#[test]
fn prediction_rejects_unknown_verdict() {
    let ok: Prediction = serde_json::from_str(
        r#"{"prediction": "Fraud", "probability": 0.93, "reasoning": "V1 far below mean"}"#,
    )
    .expect("valid prediction");
    assert_eq!(ok.prediction, Verdict::Fraud);
    assert!(ok.is_fraud());

    let bad = serde_json::from_str::<Prediction>(
        r#"{"prediction": "Suspicious", "probability": 0.5, "reasoning": ""}"#,
    );
    assert!(bad.is_err());
}

#[test]
fn schema_analysis_requires_every_field() {
    let missing = serde_json::from_str::<SchemaAnalysis>(
        r#"{"features": ["V1"], "targetVariable": "Class", "summary": "ok"}"#,
    );
    assert!(missing.is_err());

    let analysis: SchemaAnalysis = serde_json::from_str(
        r#"{"features": ["V1", "Amount"], "targetVariable": "Class", "dataIssues": [], "summary": "ok"}"#,
    )
    .expect("complete analysis");
    assert_eq!(analysis.target_variable, "Class");
    assert_eq!(analysis.features.len(), 2);
}
