//! Wizard state machine and stage drivers for the Sentinel pipeline.
//!
//! [`PipelineContext`] holds the current stage and every artifact produced so
//! far; [`can_navigate`] is the pure reachability guard over it. [`Wizard`]
//! binds a context to an [`InferenceGateway`](sentinel_gateway::InferenceGateway)
//! and runs the per-stage drivers in [`stages`].
//!
//! The assistant and feedback helpers share the same gateway but never
//! touch wizard state.

pub mod assistant;
pub mod error;
pub mod feedback;
pub mod pipeline;
pub mod pipeline_context;
pub mod stages;
pub mod timer;
pub mod timings;

pub use assistant::Assistant;
pub use error::{FeedbackError, PipelineError, PlaygroundError, Result};
pub use feedback::{FALLBACK_ACKNOWLEDGMENT, submit_feedback};
pub use pipeline::{UploadSummary, Wizard};
pub use pipeline_context::{PipelineContext, can_navigate};
pub use stages::{NoopObserver, StageObserver};
pub use timer::CancellationToken;
pub use timings::StageTimings;
