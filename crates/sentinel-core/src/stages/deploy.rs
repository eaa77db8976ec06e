//! Deploy stage: simulated activation and the prediction playground.

use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::{debug, info, warn};

use sentinel_gateway::InferenceGateway;
use sentinel_model::{Deployment, DeploymentStatus, ModelMetrics, Prediction};

use crate::error::PlaygroundError;

/// Payload prefilled in the playground.
pub const DEFAULT_PAYLOAD: &str = r#"{"V1": -1.35, "V2": 0.5, "Amount": 499.0}"#;

const READY_LINE: &str = "READY | HTTP/2 Server active at port 443";
const WAIT_LINE: &str = "WAIT | Waiting for readiness probe...";

/// Time-based status of a fresh deployment.
///
/// `deploying` until the activation delay has passed, then `active` for good.
#[derive(Debug, Clone, Copy)]
pub struct DeploymentMonitor {
    started: Instant,
    activation: Duration,
    active: bool,
}

impl DeploymentMonitor {
    pub fn start(activation: Duration) -> Self {
        Self::started_at(Instant::now(), activation)
    }

    pub fn started_at(started: Instant, activation: Duration) -> Self {
        Self {
            started,
            activation,
            active: false,
        }
    }

    /// Status at `now`. Once active, stays active whatever `now` is.
    pub fn status_at(&mut self, now: Instant) -> DeploymentStatus {
        if !self.active && now.saturating_duration_since(self.started) >= self.activation {
            self.active = true;
            info!("deployment active");
        }
        if self.active {
            DeploymentStatus::Active
        } else {
            DeploymentStatus::Deploying
        }
    }

    /// Time left until activation, zero once active.
    pub fn remaining(&self, now: Instant) -> Duration {
        if self.active {
            Duration::ZERO
        } else {
            self.activation
                .saturating_sub(now.saturating_duration_since(self.started))
        }
    }
}

pub fn readiness_line(status: DeploymentStatus) -> &'static str {
    if status == DeploymentStatus::Active {
        READY_LINE
    } else {
        WAIT_LINE
    }
}

/// Integration example for the endpoint with the current payload.
pub fn curl_snippet(endpoint: &str, payload: &str) -> String {
    format!(
        "curl -X POST {endpoint} \\\n  -H \"Authorization: Bearer YOUR_API_KEY\" \\\n  -H \"Content-Type: application/json\" \\\n  -d '{payload}'"
    )
}

/// Parses a playground payload.
pub fn parse_payload(text: &str) -> Result<Value, PlaygroundError> {
    if text.trim().is_empty() {
        return Err(PlaygroundError::EmptyPayload);
    }
    serde_json::from_str(text).map_err(|err| PlaygroundError::InvalidPayload(err.to_string()))
}

/// Sends one transaction to the gateway, only if the deployment is active.
pub fn invoke_playground<G: InferenceGateway + ?Sized>(
    gateway: &G,
    deployment: &Deployment,
    metrics: &ModelMetrics,
    payload: &str,
) -> Result<Prediction, PlaygroundError> {
    if !deployment.is_active() {
        warn!(status = %deployment.status, "prediction requested before activation");
        return Err(PlaygroundError::NotActive);
    }
    let transaction = parse_payload(payload)?;
    debug!(bytes = payload.len(), "prediction requested");
    let prediction = gateway.predict_one(&transaction, metrics)?;
    info!(
        verdict = %prediction.prediction,
        probability = prediction.probability,
        "prediction received"
    );
    Ok(prediction)
}
