//! Wizard driver: runs stage drivers against a [`PipelineContext`].

use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{info, info_span};

use sentinel_gateway::InferenceGateway;
use sentinel_ingest::{Upload, ingest_upload};
use sentinel_model::{
    DeploymentStatus, ModelConfig, ModelMetrics, Prediction, SchemaAnalysis, Stage,
};

use crate::error::{PipelineError, PlaygroundError, Result};
use crate::pipeline_context::PipelineContext;
use crate::stages::StageObserver;
use crate::stages::deploy::{DeploymentMonitor, invoke_playground};
use crate::stages::evaluate::EvaluationReport;
use crate::stages::preprocess::run_preprocess;
use crate::stages::train::run_training;
use crate::timer::{CancellationToken, pause};
use crate::timings::StageTimings;

/// Outcome of the Upload stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadSummary {
    pub records: usize,
    pub columns: usize,
    pub dropped_rows: usize,
}

/// One wizard session bound to a gateway.
#[derive(Debug)]
pub struct Wizard<G> {
    gateway: G,
    context: PipelineContext,
    timings: StageTimings,
    cancel: CancellationToken,
    monitor: Option<DeploymentMonitor>,
}

impl<G: InferenceGateway> Wizard<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            context: PipelineContext::new(),
            timings: StageTimings::default(),
            cancel: CancellationToken::new(),
            monitor: None,
        }
    }

    #[must_use]
    pub fn with_timings(mut self, timings: StageTimings) -> Self {
        self.timings = timings;
        self
    }

    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn context(&self) -> &PipelineContext {
        &self.context
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Moves to `target` through the guard. Entering Deploy starts a fresh
    /// deployment and its activation clock.
    pub fn navigate(&mut self, target: Stage) -> Result<()> {
        let entering_deploy = target == Stage::Deploy && self.context.stage() != Stage::Deploy;
        self.context.navigate(target)?;
        if entering_deploy {
            self.start_monitor();
        }
        Ok(())
    }

    /// Dashboard → Upload.
    pub fn start(&mut self) {
        self.context.start();
    }

    /// Reads and parses an upload, then moves to Preprocess. An upload with no
    /// records stays on Upload.
    pub fn upload(
        &mut self,
        upload: &Upload,
        observer: &mut dyn StageObserver,
    ) -> Result<UploadSummary> {
        self.context.navigate(Stage::Upload)?;
        if !pause(self.timings.file_read, &self.cancel) {
            return Err(PipelineError::Cancelled);
        }
        let ingested = ingest_upload(upload)?;
        observer.file_read(&upload.file_name);

        let summary = UploadSummary {
            records: ingested.dataset.len(),
            columns: ingested.dataset.columns().len(),
            dropped_rows: ingested.dropped_rows,
        };
        self.context.complete_upload(ingested)?;
        Ok(summary)
    }

    /// Analyzes the sample and walks the preprocessing steps, then moves to Train.
    pub fn preprocess(&mut self, observer: &mut dyn StageObserver) -> Result<&SchemaAnalysis> {
        self.context.navigate(Stage::Preprocess)?;
        let span = info_span!("preprocess", records = self.context.dataset.len());
        let _guard = span.enter();
        let analysis = run_preprocess(
            &self.gateway,
            &self.context.sample,
            &self.timings,
            &self.cancel,
            observer,
        )?;
        self.context.complete_preprocess(analysis);
        self.context
            .analysis
            .as_ref()
            .ok_or(PipelineError::MissingArtifact {
                stage: Stage::Train,
                artifact: "schema analysis",
            })
    }

    /// Requests metrics for `config` and plays the curve, then moves to Evaluate.
    pub fn train(
        &mut self,
        config: ModelConfig,
        observer: &mut dyn StageObserver,
    ) -> Result<&ModelMetrics> {
        self.context.navigate(Stage::Train)?;
        let analysis = self
            .context
            .analysis
            .as_ref()
            .ok_or(PipelineError::MissingArtifact {
                stage: Stage::Train,
                artifact: "schema analysis",
            })?;
        let span = info_span!("train", algorithm = %config.algorithm);
        let _guard = span.enter();
        let metrics = run_training(
            &self.gateway,
            &config,
            analysis,
            &self.timings,
            &self.cancel,
            observer,
        )?;
        self.context.complete_training(config, metrics);
        self.metrics()
    }

    /// Formatted metrics for the Evaluate stage.
    pub fn evaluate(&mut self) -> Result<EvaluationReport> {
        self.context.navigate(Stage::Evaluate)?;
        Ok(EvaluationReport::from_metrics(self.metrics()?))
    }

    /// Evaluate → Deploy with a fresh deployment in the `deploying` state.
    pub fn deploy(&mut self, created_at: DateTime<Utc>) -> Result<()> {
        self.context.promote_to_deploy(created_at)?;
        self.start_monitor();
        Ok(())
    }

    /// Current deployment status, refreshed from the activation clock.
    pub fn deployment_status(&mut self) -> DeploymentStatus {
        self.refresh_deployment(Instant::now())
    }

    /// Blocks until the deployment is active.
    pub fn wait_for_activation(&mut self, observer: &mut dyn StageObserver) -> Result<()> {
        let monitor = self.monitor.ok_or(PipelineError::MissingArtifact {
            stage: Stage::Deploy,
            artifact: "a deployment",
        })?;
        observer.deployment_status(self.deployment_status());
        if !pause(monitor.remaining(Instant::now()), &self.cancel) {
            return Err(PipelineError::Cancelled);
        }
        let status = self.deployment_status();
        observer.deployment_status(status);
        Ok(())
    }

    /// Runs one playground prediction against the active deployment.
    pub fn predict(&mut self, payload: &str) -> std::result::Result<Prediction, PlaygroundError> {
        if self.context.stage() != Stage::Deploy {
            return Err(PlaygroundError::NotDeployed);
        }
        self.deployment_status();
        let (Some(deployment), Some(metrics)) = (&self.context.deployment, &self.context.metrics)
        else {
            return Err(PlaygroundError::NotActive);
        };
        invoke_playground(&self.gateway, deployment, metrics, payload)
    }

    fn start_monitor(&mut self) {
        if let Some(deployment) = &self.context.deployment {
            info!(endpoint = %deployment.endpoint, version = %deployment.version, "deploying");
        }
        self.monitor = Some(DeploymentMonitor::start(self.timings.activation));
    }

    fn refresh_deployment(&mut self, now: Instant) -> DeploymentStatus {
        let Some(deployment) = self.context.deployment.as_mut() else {
            return DeploymentStatus::Inactive;
        };
        if let Some(monitor) = self.monitor.as_mut() {
            deployment.status = monitor.status_at(now);
        }
        deployment.status
    }

    fn metrics(&self) -> Result<&ModelMetrics> {
        self.context
            .metrics
            .as_ref()
            .ok_or(PipelineError::MissingArtifact {
                stage: Stage::Evaluate,
                artifact: "trained metrics",
            })
    }
}
