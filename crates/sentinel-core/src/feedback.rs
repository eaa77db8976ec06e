//! Feedback submission with a canned acknowledgment fallback.

use tracing::{info, warn};

use sentinel_gateway::InferenceGateway;
use sentinel_model::{Feedback, FeedbackAck};

use crate::error::FeedbackError;

/// Acknowledgment used when the gateway cannot produce one.
pub const FALLBACK_ACKNOWLEDGMENT: &str =
    "Thank you for your feedback. We have received it and will look into it.";

/// Submits feedback. Fails only on an empty message; gateway failures fall
/// back to [`FALLBACK_ACKNOWLEDGMENT`].
pub fn submit_feedback<G: InferenceGateway + ?Sized>(
    gateway: &G,
    feedback: &Feedback,
) -> Result<FeedbackAck, FeedbackError> {
    if feedback.message.trim().is_empty() {
        return Err(FeedbackError::EmptyMessage);
    }
    info!(
        category = %feedback.category,
        has_email = feedback.email.is_some(),
        "submitting feedback"
    );

    let ack = match gateway.acknowledge_feedback(feedback) {
        Ok(ack) if !ack.acknowledgment.trim().is_empty() => ack,
        Ok(_) => {
            warn!("feedback acknowledgment was empty");
            fallback()
        }
        Err(err) => {
            warn!(error = %err, "feedback acknowledgment failed");
            fallback()
        }
    };
    Ok(ack)
}

fn fallback() -> FeedbackAck {
    FeedbackAck {
        acknowledgment: FALLBACK_ACKNOWLEDGMENT.to_string(),
    }
}
