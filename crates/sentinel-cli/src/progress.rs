//! Terminal progress display for the stage drivers.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use sentinel_core::StageObserver;
use sentinel_core::stages::deploy::readiness_line;
use sentinel_core::stages::preprocess::PREPROCESS_STEPS;
use sentinel_core::stages::train::{PROGRESS_STEP, TrainingPoint};
use sentinel_model::{DeploymentStatus, SchemaAnalysis, Stage};

const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg}";
const BAR_TEMPLATE: &str = "{prefix:>10.bold} [{bar:32.cyan/blue}] {pos:>3}% {msg}";

/// Renders stage progress to stderr with `indicatif`.
pub struct ConsoleObserver {
    hidden: bool,
    spinner: Option<ProgressBar>,
    bar: Option<ProgressBar>,
}

impl ConsoleObserver {
    pub fn new(hidden: bool) -> Self {
        Self {
            hidden,
            spinner: None,
            bar: None,
        }
    }

    /// Shows a spinner while `work` blocks, then clears it.
    pub fn spin<T>(&self, message: &'static str, work: impl FnOnce() -> T) -> T {
        let spinner = self.spinner_bar(message);
        let result = work();
        spinner.finish_and_clear();
        result
    }

    /// Removes any spinner or bar left by an interrupted stage.
    pub fn clear(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
        if let Some(bar) = self.bar.take() {
            bar.abandon();
        }
    }

    fn spinner_bar(&self, message: &'static str) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        if self.hidden {
            spinner.set_draw_target(ProgressDrawTarget::hidden());
        }
        if let Ok(style) = ProgressStyle::with_template(SPINNER_TEMPLATE) {
            spinner.set_style(style);
        }
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }

    fn training_bar(&mut self) -> &ProgressBar {
        let hidden = self.hidden;
        self.bar.get_or_insert_with(|| {
            let bar = ProgressBar::new(100);
            if hidden {
                bar.set_draw_target(ProgressDrawTarget::hidden());
            }
            if let Ok(style) = ProgressStyle::with_template(BAR_TEMPLATE) {
                bar.set_style(style.progress_chars("=> "));
            }
            bar.set_prefix("Training");
            bar
        })
    }

    fn note(&mut self, line: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
        if !self.hidden {
            eprintln!("{line}");
        }
    }
}

impl StageObserver for ConsoleObserver {
    fn file_read(&mut self, file_name: &str) {
        self.note(&format!("Read {file_name}"));
    }

    fn awaiting_gateway(&mut self, stage: Stage) {
        let message = match stage {
            Stage::Preprocess => "Analyzing schema...",
            Stage::Train => "Training model...",
            _ => "Waiting for the inference service...",
        };
        self.spinner = Some(self.spinner_bar(message));
    }

    fn analysis_ready(&mut self, analysis: &SchemaAnalysis) {
        self.note(&format!(
            "Schema analysis: {} features, target {}",
            analysis.features.len(),
            analysis.target_variable
        ));
    }

    fn preprocess_step(&mut self, index: usize, name: &str) {
        let total = PREPROCESS_STEPS.len();
        self.note(&format!("  [{}/{total}] {name}", index + 1));
    }

    fn training_point(&mut self, point: &TrainingPoint) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
        let last = point.progress + PROGRESS_STEP >= 100;
        let bar = self.training_bar();
        bar.set_position(u64::from(point.progress));
        bar.set_message(format!(
            "epoch {} loss {:.3} val {:.3}",
            point.epoch, point.loss, point.val_loss
        ));
        if last {
            bar.set_position(100);
            bar.finish_with_message("complete");
            self.bar = None;
        }
    }

    fn deployment_status(&mut self, status: DeploymentStatus) {
        self.note(readiness_line(status));
    }
}
