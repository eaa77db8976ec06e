//! The five inference operations and their declared response schemas.

use std::fmt;

use serde_json::{Value, json};

/// One call the wizard can make against the inference service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    AnalyzeSchema,
    SimulateTraining,
    PredictOne,
    Converse,
    AcknowledgeFeedback,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::AnalyzeSchema,
        Operation::SimulateTraining,
        Operation::PredictOne,
        Operation::Converse,
        Operation::AcknowledgeFeedback,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::AnalyzeSchema => "analyzeSchema",
            Self::SimulateTraining => "simulateTraining",
            Self::PredictOne => "predictOne",
            Self::Converse => "converse",
            Self::AcknowledgeFeedback => "acknowledgeFeedback",
        }
    }

    /// Structured response schema sent with the request.
    ///
    /// `None` for free-text operations.
    pub fn response_schema(self) -> Option<Value> {
        match self {
            Self::AnalyzeSchema => Some(json!({
                "type": "OBJECT",
                "properties": {
                    "features": { "type": "ARRAY", "items": { "type": "STRING" } },
                    "targetVariable": { "type": "STRING" },
                    "dataIssues": { "type": "ARRAY", "items": { "type": "STRING" } },
                    "summary": { "type": "STRING" }
                },
                "required": ["features", "targetVariable", "dataIssues", "summary"]
            })),
            Self::SimulateTraining => Some(json!({
                "type": "OBJECT",
                "properties": {
                    "accuracy": { "type": "NUMBER" },
                    "precision": { "type": "NUMBER" },
                    "recall": { "type": "NUMBER" },
                    "f1Score": { "type": "NUMBER" },
                    "auc": { "type": "NUMBER" },
                    "confusionMatrix": {
                        "type": "OBJECT",
                        "properties": {
                            "tp": { "type": "NUMBER" },
                            "fp": { "type": "NUMBER" },
                            "tn": { "type": "NUMBER" },
                            "fn": { "type": "NUMBER" }
                        },
                        "required": ["tp", "fp", "tn", "fn"]
                    }
                },
                "required": ["accuracy", "precision", "recall", "f1Score", "auc", "confusionMatrix"]
            })),
            Self::PredictOne => Some(json!({
                "type": "OBJECT",
                "properties": {
                    "prediction": { "type": "STRING", "enum": ["Fraud", "Legitimate"] },
                    "probability": { "type": "NUMBER" },
                    "reasoning": { "type": "STRING" }
                },
                "required": ["prediction", "probability", "reasoning"]
            })),
            Self::AcknowledgeFeedback => Some(json!({
                "type": "OBJECT",
                "properties": {
                    "acknowledgment": { "type": "STRING" }
                },
                "required": ["acknowledgment"]
            })),
            Self::Converse => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lists required fields absent (or null) in `value`, as dotted paths.
pub fn missing_required(schema: &Value, value: &Value) -> Vec<String> {
    let mut missing = Vec::new();
    collect_missing(schema, value, "", &mut missing);
    missing
}

fn collect_missing(schema: &Value, value: &Value, prefix: &str, missing: &mut Vec<String>) {
    let Some(required) = schema.get("required").and_then(Value::as_array) else {
        return;
    };
    let properties = schema.get("properties");
    for field in required.iter().filter_map(Value::as_str) {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match value.get(field) {
            None | Some(Value::Null) => missing.push(path),
            Some(child) => {
                if let Some(child_schema) = properties.and_then(|props| props.get(field)) {
                    collect_missing(child_schema, child, &path, missing);
                }
            }
        }
    }
}
