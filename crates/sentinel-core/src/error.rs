//! Error types for the wizard pipeline.

use thiserror::Error;

use sentinel_gateway::GatewayError;
use sentinel_ingest::IngestError;
use sentinel_model::{ModelError, Stage};

/// Errors raised while driving the wizard.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Navigation to a stage whose prerequisites are missing.
    #[error("stage {target} is locked")]
    StageLocked { target: Stage },

    /// A stage driver ran before an earlier stage produced its artifact.
    #[error("{stage} requires {artifact}")]
    MissingArtifact {
        stage: Stage,
        artifact: &'static str,
    },

    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// The upload parsed but kept no records.
    #[error("upload has no records ({dropped_rows} rows dropped)")]
    EmptyDataset { dropped_rows: usize },

    #[error(transparent)]
    InvalidConfig(#[from] ModelError),

    #[error("{stage} failed: {source}")]
    Gateway {
        stage: Stage,
        #[source]
        source: GatewayError,
    },

    /// The run was cancelled during a cosmetic delay.
    #[error("cancelled")]
    Cancelled,
}

impl PipelineError {
    /// Returns a short message suitable for inline display.
    pub fn user_message(&self) -> String {
        match self {
            Self::StageLocked { target } => {
                format!("{} is not available yet.", target.label())
            }
            Self::MissingArtifact { stage, artifact } => {
                format!("{} needs {artifact} first.", stage.label())
            }
            Self::Ingest(err) => err.user_message().to_string(),
            Self::EmptyDataset { .. } => {
                "The file contains no records matching its header.".to_string()
            }
            Self::InvalidConfig(err) => err.to_string(),
            Self::Gateway { stage, source } => {
                format!("{} failed. {}", stage.label(), source.user_message())
            }
            Self::Cancelled => "Cancelled.".to_string(),
        }
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors from the prediction playground.
#[derive(Debug, Error)]
pub enum PlaygroundError {
    #[error("Model is not active. Please wait for deployment to complete.")]
    NotActive,

    /// The playground only answers while the wizard is on Deploy.
    #[error("Open the Deployment stage to use the playground.")]
    NotDeployed,

    #[error("Payload cannot be empty")]
    EmptyPayload,

    /// Carries the JSON parser's message.
    #[error("{0}")]
    InvalidPayload(String),

    #[error("prediction failed: {0}")]
    Gateway(#[from] GatewayError),
}

impl PlaygroundError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Gateway(err) => err.user_message().to_string(),
            other => other.to_string(),
        }
    }
}

/// Errors from feedback submission.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FeedbackError {
    #[error("Feedback message cannot be empty")]
    EmptyMessage,
}
