//! Wizard state: the current stage plus every artifact produced so far.
//!
//! # Reachability
//!
//! Whether a stage can be entered depends only on which artifacts exist:
//!
//! | Target     | Reachable when          |
//! |------------|-------------------------|
//! | Dashboard  | always                  |
//! | Upload     | always                  |
//! | Preprocess | dataset non-empty       |
//! | Train      | schema analysis present |
//! | Evaluate   | metrics present         |
//! | Deploy     | metrics present         |
//!
//! Moving backwards never clears later artifacts; completing a stage again
//! overwrites them. Every entry into Deploy from another stage starts a fresh
//! deployment.

use chrono::{DateTime, Utc};
use tracing::info;

use sentinel_ingest::IngestedUpload;
use sentinel_model::{Dataset, Deployment, ModelConfig, ModelMetrics, SchemaAnalysis, Stage};

use crate::error::{PipelineError, Result};

/// Decides whether `target` can be entered given the artifacts in `context`.
pub fn can_navigate(target: Stage, context: &PipelineContext) -> bool {
    match target {
        Stage::Dashboard | Stage::Upload => true,
        Stage::Preprocess => !context.dataset.is_empty(),
        Stage::Train => context.analysis.is_some(),
        Stage::Evaluate | Stage::Deploy => context.metrics.is_some(),
    }
}

/// In-memory state for one wizard session.
#[derive(Debug, Clone, Default)]
pub struct PipelineContext {
    stage: Stage,
    /// Parsed records from the last upload.
    pub dataset: Dataset,
    /// First lines of the raw upload.
    pub sample: String,
    pub analysis: Option<SchemaAnalysis>,
    pub metrics: Option<ModelMetrics>,
    /// Configuration that produced `metrics`.
    pub config: Option<ModelConfig>,
    pub deployment: Option<Deployment>,
}

impl PipelineContext {
    /// A fresh session on the Dashboard.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn can_navigate(&self, target: Stage) -> bool {
        can_navigate(target, self)
    }

    /// Stages that can currently be entered, in progression order.
    pub fn reachable_stages(&self) -> Vec<Stage> {
        Stage::ALL
            .into_iter()
            .filter(|stage| self.can_navigate(*stage))
            .collect()
    }

    /// Moves to `target` if it is reachable. Otherwise the stage is unchanged.
    pub fn navigate(&mut self, target: Stage) -> Result<()> {
        if !self.can_navigate(target) {
            return Err(PipelineError::StageLocked { target });
        }
        if target == Stage::Deploy && self.stage != Stage::Deploy {
            self.promote_to_deploy(Utc::now())?;
        } else {
            self.enter(target);
        }
        Ok(())
    }


    /// Dashboard → Upload.
    pub fn start(&mut self) {
        self.enter(Stage::Upload);
    }

    /// Upload → Preprocess, storing the dataset and sample.
    ///
    /// An upload without records is rejected and leaves the previous dataset
    /// and the stage untouched.
    pub fn complete_upload(&mut self, upload: IngestedUpload) -> Result<()> {
        if upload.dataset.is_empty() {
            return Err(PipelineError::EmptyDataset {
                dropped_rows: upload.dropped_rows,
            });
        }
        self.dataset = upload.dataset;
        self.sample = upload.sample;
        self.enter(Stage::Preprocess);
        Ok(())
    }

    /// Preprocess → Train, storing the analysis.
    pub fn complete_preprocess(&mut self, analysis: SchemaAnalysis) {
        self.analysis = Some(analysis);
        self.enter(Stage::Train);
    }

    /// Train → Evaluate, storing metrics and the config that produced them.
    pub fn complete_training(&mut self, config: ModelConfig, metrics: ModelMetrics) {
        self.config = Some(config);
        self.metrics = Some(metrics);
        self.enter(Stage::Evaluate);
    }

    /// Evaluate → Deploy. Starts a fresh deployment; metrics are untouched.
    pub fn promote_to_deploy(&mut self, created_at: DateTime<Utc>) -> Result<&Deployment> {
        if self.metrics.is_none() {
            return Err(PipelineError::MissingArtifact {
                stage: Stage::Deploy,
                artifact: "trained metrics",
            });
        }
        self.enter(Stage::Deploy);
        Ok(&*self.deployment.insert(Deployment::new(created_at)))
    }

    fn enter(&mut self, stage: Stage) {
        if self.stage != stage {
            info!(from = %self.stage, to = %stage, "stage transition");
        }
        self.stage = stage;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_ingest::parse_transactions;
    use sentinel_model::{ConfusionMatrix, DeploymentStatus};

    fn analysis() -> SchemaAnalysis {
        SchemaAnalysis {
            features: vec!["V1".into()],
            target_variable: "Class".into(),
            data_issues: vec![],
            summary: "ok".into(),
        }
    }

    fn metrics() -> ModelMetrics {
        ModelMetrics {
            accuracy: 0.99,
            precision: 0.9,
            recall: 0.8,
            f1_score: 0.85,
            auc: 0.95,
            confusion_matrix: ConfusionMatrix {
                true_positives: 8.0,
                false_positives: 1.0,
                true_negatives: 89.0,
                false_negatives: 2.0,
            },
        }
    }

    #[test]
    fn starts_on_dashboard() {
        let context = PipelineContext::new();
        assert_eq!(context.stage(), Stage::Dashboard);
        assert_eq!(
            context.reachable_stages(),
            vec![Stage::Dashboard, Stage::Upload]
        );
    }

    #[test]
    fn guard_table() {
        let mut context = PipelineContext::new();
        for stage in [Stage::Preprocess, Stage::Train, Stage::Evaluate, Stage::Deploy] {
            assert!(!context.can_navigate(stage), "{stage} should be locked");
        }

        context.dataset = parse_transactions("A,B\n1,2\n").unwrap().dataset;
        assert!(context.can_navigate(Stage::Preprocess));
        assert!(!context.can_navigate(Stage::Train));

        context.analysis = Some(analysis());
        assert!(context.can_navigate(Stage::Train));
        assert!(!context.can_navigate(Stage::Evaluate));
        assert!(!context.can_navigate(Stage::Deploy));

        context.metrics = Some(metrics());
        assert!(context.can_navigate(Stage::Evaluate));
        assert!(context.can_navigate(Stage::Deploy));
    }

    #[test]
    fn locked_navigation_keeps_stage() {
        let mut context = PipelineContext::new();
        context.start();
        let err = context.navigate(Stage::Train).unwrap_err();
        assert!(matches!(err, PipelineError::StageLocked { target: Stage::Train }));
        assert_eq!(context.stage(), Stage::Upload);
    }

    #[test]
    fn backward_navigation_keeps_artifacts() {
        let mut context = PipelineContext::new();
        context
            .complete_upload(parse_transactions("A,B\n1,2\n").unwrap())
            .unwrap();
        context.complete_preprocess(analysis());
        context.complete_training(ModelConfig::default(), metrics());

        context.navigate(Stage::Upload).unwrap();
        assert!(context.analysis.is_some());
        assert!(context.metrics.is_some());
        context.navigate(Stage::Evaluate).unwrap();
        assert_eq!(context.stage(), Stage::Evaluate);
    }

    #[test]
    fn deploy_requires_metrics() {
        let mut context = PipelineContext::new();
        assert!(context.promote_to_deploy(Utc::now()).is_err());
        assert_eq!(context.stage(), Stage::Dashboard);

        context.complete_training(ModelConfig::default(), metrics());
        let deployment = context.promote_to_deploy(Utc::now()).unwrap();
        assert!(!deployment.is_active());
        assert_eq!(context.stage(), Stage::Deploy);
        assert_eq!(context.metrics, Some(metrics()));
    }

    #[test]
    fn empty_upload_stays_on_upload() {
        let mut context = PipelineContext::new();
        context.start();
        let err = context
            .complete_upload(parse_transactions("A,B\n1\n").unwrap())
            .unwrap_err();
        assert!(matches!(err, PipelineError::EmptyDataset { dropped_rows: 1 }));
        assert_eq!(context.stage(), Stage::Upload);
        assert!(context.can_navigate(context.stage()));
        assert!(context.dataset.is_empty());
    }

    #[test]
    fn navigating_into_deploy_starts_a_deployment() {
        let mut context = PipelineContext::new();
        context.complete_training(ModelConfig::default(), metrics());
        assert!(context.deployment.is_none());

        context.navigate(Stage::Deploy).unwrap();
        assert_eq!(context.stage(), Stage::Deploy);
        let first = context.deployment.clone().unwrap();
        assert_eq!(first.status, DeploymentStatus::Deploying);

        context.deployment.as_mut().unwrap().status = DeploymentStatus::Active;
        context.navigate(Stage::Deploy).unwrap();
        assert!(context.deployment.as_ref().unwrap().is_active());

        context.navigate(Stage::Upload).unwrap();
        context.navigate(Stage::Deploy).unwrap();
        assert_eq!(
            context.deployment.as_ref().unwrap().status,
            DeploymentStatus::Deploying
        );
    }
}
