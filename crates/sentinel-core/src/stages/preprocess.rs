//! Preprocess stage: schema analysis followed by the cosmetic cleaning steps.

use tracing::{info, warn};

use sentinel_gateway::InferenceGateway;
use sentinel_model::{SchemaAnalysis, Stage};

use super::StageObserver;
use crate::error::{PipelineError, Result};
use crate::timer::{CancellationToken, pause};
use crate::timings::StageTimings;

/// Steps shown as completing one by one once the analysis is back.
pub const PREPROCESS_STEPS: [&str; 4] = [
    "Schema Discovery",
    "Missing Value Imputation",
    "Feature Scaling (StandardScaler)",
    "Synthetic Minority Over-sampling (SMOTE)",
];

/// Sends the sample for analysis, then walks the preprocessing steps.
pub fn run_preprocess<G: InferenceGateway + ?Sized>(
    gateway: &G,
    sample: &str,
    timings: &StageTimings,
    cancel: &CancellationToken,
    observer: &mut dyn StageObserver,
) -> Result<SchemaAnalysis> {
    observer.awaiting_gateway(Stage::Preprocess);
    let analysis = gateway.analyze_schema(sample).map_err(|source| {
        warn!(error = %source, "schema analysis failed");
        PipelineError::Gateway {
            stage: Stage::Preprocess,
            source,
        }
    })?;
    info!(
        features = analysis.features.len(),
        target = %analysis.target_variable,
        issues = analysis.data_issues.len(),
        "schema analysis received"
    );
    observer.analysis_ready(&analysis);

    for (index, name) in PREPROCESS_STEPS.iter().enumerate() {
        if !pause(timings.preprocess_step, cancel) {
            return Err(PipelineError::Cancelled);
        }
        observer.preprocess_step(index, name);
    }
    Ok(analysis)
}
