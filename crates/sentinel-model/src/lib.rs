//! Data model for the Sentinel fraud pipeline wizard.
//!
//! Everything here is an in-memory session value: nothing is persisted, and
//! every type that crosses the inference gateway round-trips through serde with
//! the collaborator's camelCase field names.

pub mod analysis;
pub mod chat;
pub mod dataset;
pub mod deployment;
pub mod error;
pub mod feedback;
pub mod metrics;
pub mod prediction;
pub mod stage;
pub mod training;

pub use analysis::SchemaAnalysis;
pub use chat::{ChatRole, ChatTurn};
pub use dataset::{CellValue, Dataset, Record};
pub use deployment::{DEFAULT_ENDPOINT, DEFAULT_VERSION, Deployment, DeploymentStatus};
pub use error::{ModelError, Result};
pub use feedback::{Feedback, FeedbackAck, FeedbackCategory};
pub use metrics::{ConfusionMatrix, MetricsIssue, ModelMetrics};
pub use prediction::{Prediction, Verdict};
pub use stage::Stage;
pub use training::{Algorithm, ModelConfig};
