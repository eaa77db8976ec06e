//! Train stage: the simulated loss curve and the metrics request.

use tracing::{debug, info, warn};

use sentinel_gateway::InferenceGateway;
use sentinel_model::{ModelConfig, ModelMetrics, SchemaAnalysis, Stage};

use super::StageObserver;
use crate::error::{PipelineError, Result};
use crate::timer::{CancellationToken, Ticker, pause};
use crate::timings::StageTimings;

/// Progress gained per tick.
pub const PROGRESS_STEP: u32 = 2;
/// Epoch count used for the curve when the config leaves it unset.
pub const DEFAULT_CURVE_EPOCHS: u32 = 10;

/// One point of the simulated training curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingPoint {
    /// Percent complete when the point was emitted.
    pub progress: u32,
    pub epoch: u32,
    pub loss: f64,
    pub val_loss: f64,
}

impl TrainingPoint {
    fn at(progress: u32, epochs: u32) -> Self {
        let per_epoch = 100.0 / f64::from(epochs);
        let epoch = (f64::from(progress) / per_epoch).floor() as u32;
        let exponent = i32::try_from(epoch).unwrap_or(i32::MAX);
        Self {
            progress,
            epoch,
            loss: (0.9 * 0.95_f64.powi(exponent)).max(0.1),
            val_loss: (0.95 * 0.96_f64.powi(exponent)).max(0.12),
        }
    }
}

/// The whole curve: one point per tick while progress runs from 0 to 98.
pub fn training_curve(epochs: Option<u32>) -> Vec<TrainingPoint> {
    let epochs = epochs.filter(|e| *e > 0).unwrap_or(DEFAULT_CURVE_EPOCHS);
    (0..100)
        .step_by(PROGRESS_STEP as usize)
        .map(|progress| TrainingPoint::at(progress, epochs))
        .collect()
}

/// Requests metrics for `config`, then plays the curve.
///
/// The returned metrics are not checked against each other; disagreements
/// with the confusion matrix are only logged.
pub fn run_training<G: InferenceGateway + ?Sized>(
    gateway: &G,
    config: &ModelConfig,
    analysis: &SchemaAnalysis,
    timings: &StageTimings,
    cancel: &CancellationToken,
    observer: &mut dyn StageObserver,
) -> Result<ModelMetrics> {
    config.validate()?;
    info!(
        algorithm = %config.algorithm,
        test_size = config.test_size,
        learning_rate = config.learning_rate,
        epochs = ?config.epochs,
        "training started"
    );

    observer.awaiting_gateway(Stage::Train);
    let metrics = gateway
        .simulate_training(config, analysis)
        .map_err(|source| {
            warn!(error = %source, "training simulation failed");
            PipelineError::Gateway {
                stage: Stage::Train,
                source,
            }
        })?;

    for issue in metrics.consistency_issues(ModelMetrics::DEFAULT_TOLERANCE) {
        warn!(%issue, "inconsistent metrics");
    }

    let curve = training_curve(config.epochs);
    for tick in Ticker::new(timings.training_tick, curve.len(), cancel) {
        let point = &curve[tick];
        debug!(progress = point.progress, epoch = point.epoch, "training tick");
        observer.training_point(point);
    }
    if cancel.is_cancelled() || !pause(timings.training_settle, cancel) {
        return Err(PipelineError::Cancelled);
    }

    info!(
        accuracy = metrics.accuracy,
        auc = metrics.auc,
        "training complete"
    );
    Ok(metrics)
}
