//! Per-stage drivers.
//!
//! Each driver does the work of one wizard stage and reports cosmetic
//! progress through a [`StageObserver`]. They do not touch
//! [`PipelineContext`](crate::PipelineContext); the [`Wizard`](crate::Wizard)
//! stores their results.

pub mod deploy;
pub mod evaluate;
pub mod preprocess;
pub mod train;

use sentinel_model::{DeploymentStatus, SchemaAnalysis, Stage};

use train::TrainingPoint;

/// Receives progress from the stage drivers. Every method defaults to a no-op.
pub trait StageObserver {
    fn file_read(&mut self, _file_name: &str) {}

    /// A gateway request for `stage` is about to block.
    fn awaiting_gateway(&mut self, _stage: Stage) {}

    fn analysis_ready(&mut self, _analysis: &SchemaAnalysis) {}

    /// Step `index` of [`preprocess::PREPROCESS_STEPS`] is complete.
    fn preprocess_step(&mut self, _index: usize, _name: &str) {}

    fn training_point(&mut self, _point: &TrainingPoint) {}

    fn deployment_status(&mut self, _status: DeploymentStatus) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl StageObserver for NoopObserver {}
