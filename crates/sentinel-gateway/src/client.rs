//! HTTP client for the Gemini `generateContent` API.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, debug_span};

use sentinel_model::{
    ChatTurn, Feedback, FeedbackAck, ModelConfig, ModelMetrics, Prediction, SchemaAnalysis,
};

use crate::InferenceGateway;
use crate::config::GatewayConfig;
use crate::error::{GatewayError, Result};
use crate::operation::{Operation, missing_required};
use crate::prompt;
use crate::wire::{GenerateRequest, GenerateResponse};

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("sentinel/", env!("CARGO_PKG_VERSION"));

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Blocking client for the inference service.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::blocking::Client,
    config: GatewayConfig,
}

impl GeminiClient {
    /// Creates a client. A missing API key is reported by each call, not here.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    fn generate(&self, operation: Operation, request: &GenerateRequest) -> Result<GenerateResponse> {
        let span = debug_span!("gateway", operation = %operation, model = %self.config.model);
        let _guard = span.enter();

        let api_key = self.config.api_key().ok_or(GatewayError::MissingCredential)?;
        let mut key = HeaderValue::from_str(api_key).map_err(|_| GatewayError::MissingCredential)?;
        key.set_sensitive(true);

        let url = self.config.endpoint();
        debug!(turns = request.contents.len(), "sending request");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, key)
            .json(request)
            .send()?;
        let status = response.status();
        let body = response.text()?;
        debug!(status = status.as_u16(), bytes = body.len(), "received response");

        if !status.is_success() {
            return Err(GatewayError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| GatewayError::protocol(operation, format!("malformed envelope: {e}")))
    }

    fn structured<T: DeserializeOwned>(&self, operation: Operation, prompt: String) -> Result<T> {
        let schema = operation
            .response_schema()
            .ok_or_else(|| GatewayError::protocol(operation, "operation has no response schema"))?;
        let request = GenerateRequest::structured(prompt, schema);
        let response = self.generate(operation, &request)?;
        let text = response.text().ok_or_else(|| {
            if let Some(reason) = response.block_reason() {
                debug!(reason, "prompt was blocked");
            }
            GatewayError::EmptyResponse { operation }
        })?;
        decode_structured(operation, &text)
    }
}

/// Decodes a structured response, enforcing the operation's required fields.
pub fn decode_structured<T: DeserializeOwned>(operation: Operation, text: &str) -> Result<T> {
    let value: Value = serde_json::from_str(text.trim())
        .map_err(|e| GatewayError::protocol(operation, format!("response is not JSON: {e}")))?;

    if let Some(schema) = operation.response_schema() {
        let missing = missing_required(&schema, &value);
        if !missing.is_empty() {
            return Err(GatewayError::protocol(
                operation,
                format!("missing required fields: {}", missing.join(", ")),
            ));
        }
    }

    serde_json::from_value(value).map_err(|e| GatewayError::protocol(operation, e.to_string()))
}

impl InferenceGateway for GeminiClient {
    fn analyze_schema(&self, sample: &str) -> Result<SchemaAnalysis> {
        self.structured(Operation::AnalyzeSchema, prompt::analyze_schema(sample))
    }

    fn simulate_training(
        &self,
        config: &ModelConfig,
        analysis: &SchemaAnalysis,
    ) -> Result<ModelMetrics> {
        self.structured(
            Operation::SimulateTraining,
            prompt::simulate_training(config, analysis),
        )
    }

    fn predict_one(&self, transaction: &Value, metrics: &ModelMetrics) -> Result<Prediction> {
        self.structured(
            Operation::PredictOne,
            prompt::predict_one(transaction, metrics),
        )
    }

    fn converse(&self, message: &str, history: &[ChatTurn]) -> Result<String> {
        let request =
            GenerateRequest::conversation(prompt::ASSISTANT_INSTRUCTION, history, message);
        let response = self.generate(Operation::Converse, &request)?;
        Ok(response.text().unwrap_or_default())
    }

    fn acknowledge_feedback(&self, feedback: &Feedback) -> Result<FeedbackAck> {
        self.structured(
            Operation::AcknowledgeFeedback,
            prompt::acknowledge_feedback(feedback),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_model::Verdict;

    #[test]
    fn missing_key_fails_each_call() {
        let client = GeminiClient::new(GatewayConfig::default()).unwrap();
        let err = client.analyze_schema("A,B\n1,2").unwrap_err();
        assert!(matches!(err, GatewayError::MissingCredential));
        let err = client.converse("hello", &[]).unwrap_err();
        assert!(matches!(err, GatewayError::MissingCredential));
    }

    #[test]
    fn new_with_key() {
        let client = GeminiClient::new(GatewayConfig::default().with_api_key("k")).unwrap();
        assert_eq!(client.config().api_key(), Some("k"));
    }

    #[test]
    fn decodes_prediction() {
        let prediction: Prediction = decode_structured(
            Operation::PredictOne,
            r#"{"prediction": "Fraud", "probability": 0.93, "reasoning": "Large amount."}"#,
        )
        .unwrap();
        assert_eq!(prediction.prediction, Verdict::Fraud);
    }

    #[test]
    fn non_json_is_protocol_violation() {
        let err = decode_structured::<FeedbackAck>(Operation::AcknowledgeFeedback, "Thanks!")
            .unwrap_err();
        assert!(matches!(err, GatewayError::ProtocolViolation { .. }));
    }

    #[test]
    fn missing_field_is_protocol_violation() {
        let err = decode_structured::<SchemaAnalysis>(
            Operation::AnalyzeSchema,
            r#"{"features": ["V1"], "dataIssues": [], "summary": "ok"}"#,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "analyzeSchema protocol violation: missing required fields: targetVariable"
        );
    }

    #[test]
    fn verdict_outside_enum_is_protocol_violation() {
        let err = decode_structured::<Prediction>(
            Operation::PredictOne,
            r#"{"prediction": "Suspicious", "probability": 0.5, "reasoning": "?"}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            GatewayError::ProtocolViolation {
                operation: Operation::PredictOne,
                ..
            }
        ));
    }
}
