//! Inference gateway for the Sentinel wizard.
//!
//! Everything that looks like machine learning in the wizard is delegated to a
//! generative text service. This crate defines the narrow [`InferenceGateway`]
//! trait the pipeline depends on and a blocking [`GeminiClient`] implementing
//! it.
//!
//! Only the presence of required response fields (and declared enum values) is
//! checked here. Anything else is accepted as returned.

mod client;
mod config;
mod error;
mod operation;
mod prompt;
mod wire;

use serde_json::Value;

use sentinel_model::{
    ChatTurn, Feedback, FeedbackAck, ModelConfig, ModelMetrics, Prediction, SchemaAnalysis,
};

pub use client::{GeminiClient, decode_structured};
pub use config::{
    API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL, FALLBACK_API_KEY_ENV, MODEL_ENV,
    GatewayConfig,
};
pub use error::{GatewayError, Result};
pub use operation::{Operation, missing_required};
pub use prompt::ASSISTANT_INSTRUCTION;
pub use wire::{GenerateRequest, GenerateResponse};

/// The external collaborator, one method per operation.
///
/// Each call is a single request and response with no retry.
pub trait InferenceGateway {
    /// Describes the dataset from its raw text sample.
    fn analyze_schema(&self, sample: &str) -> Result<SchemaAnalysis>;

    /// Produces simulated evaluation metrics for a training configuration.
    fn simulate_training(
        &self,
        config: &ModelConfig,
        analysis: &SchemaAnalysis,
    ) -> Result<ModelMetrics>;

    /// Classifies one transaction payload.
    fn predict_one(&self, transaction: &Value, metrics: &ModelMetrics) -> Result<Prediction>;

    /// Replies to a chat message given the prior turns. May return empty text.
    fn converse(&self, message: &str, history: &[ChatTurn]) -> Result<String>;

    fn acknowledge_feedback(&self, feedback: &Feedback) -> Result<FeedbackAck>;
}

impl<G: InferenceGateway + ?Sized> InferenceGateway for &G {
    fn analyze_schema(&self, sample: &str) -> Result<SchemaAnalysis> {
        (**self).analyze_schema(sample)
    }

    fn simulate_training(
        &self,
        config: &ModelConfig,
        analysis: &SchemaAnalysis,
    ) -> Result<ModelMetrics> {
        (**self).simulate_training(config, analysis)
    }

    fn predict_one(&self, transaction: &Value, metrics: &ModelMetrics) -> Result<Prediction> {
        (**self).predict_one(transaction, metrics)
    }

    fn converse(&self, message: &str, history: &[ChatTurn]) -> Result<String> {
        (**self).converse(message, history)
    }

    fn acknowledge_feedback(&self, feedback: &Feedback) -> Result<FeedbackAck> {
        (**self).acknowledge_feedback(feedback)
    }
}
