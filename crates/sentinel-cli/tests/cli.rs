//! Integration tests for argument parsing and table output.

use chrono::{TimeZone, Utc};
use clap::Parser;
use insta::assert_snapshot;

use sentinel_cli::cli::{Cli, Command};
use sentinel_cli::logging::LogFormat;
use sentinel_cli::progress::ConsoleObserver;
use sentinel_cli::summary::{
    deployment_table, evaluation_table, prediction_table, profile_table, stages_table,
};
use sentinel_core::stages::evaluate::EvaluationReport;
use sentinel_core::stages::train::training_curve;
use sentinel_core::{PipelineContext, StageObserver};
use sentinel_ingest::{parse_transactions, profile_columns};
use sentinel_model::{
    Algorithm, ConfusionMatrix, Deployment, FeedbackCategory, ModelMetrics, Prediction, Verdict,
};

fn metrics() -> ModelMetrics {
    ModelMetrics {
        accuracy: 0.9991,
        precision: 0.9,
        recall: 0.8,
        f1_score: 0.847,
        auc: 0.972,
        confusion_matrix: ConfusionMatrix {
            true_positives: 80.0,
            false_positives: 9.0,
            true_negatives: 99891.0,
            false_negatives: 20.0,
        },
    }
}

#[test]
fn run_defaults_match_the_wizard_defaults() {
    let cli = Cli::try_parse_from(["sentinel", "run", "tx.csv"]).unwrap();
    let Command::Run(args) = cli.command else {
        panic!("expected run command");
    };
    let config = args.model_config();
    assert_eq!(config.algorithm, Algorithm::XgBoost);
    assert!((config.test_size - 0.2).abs() < f64::EPSILON);
    assert!((config.learning_rate - 0.01).abs() < f64::EPSILON);
    assert_eq!(config.epochs, Some(100));
    assert!(args.predict.is_none());
    assert!(!args.no_animation);
    assert!(args.gateway.timeout_secs.is_none());
}

#[test]
fn run_accepts_training_and_gateway_overrides() {
    let cli = Cli::try_parse_from([
        "sentinel",
        "--log-level",
        "debug",
        "run",
        "tx.csv",
        "--algorithm",
        "random-forest",
        "--test-size",
        "0.3",
        "--epochs",
        "25",
        "--no-animation",
        "--model",
        "custom-model",
        "--timeout",
        "30",
    ])
    .unwrap();
    assert!(cli.log_level.is_some());
    let Command::Run(args) = cli.command else {
        panic!("expected run command");
    };
    let config = args.model_config();
    assert_eq!(config.algorithm, Algorithm::RandomForest);
    assert_eq!(config.epochs, Some(25));
    assert!(args.no_animation);
    assert_eq!(args.gateway.model.as_deref(), Some("custom-model"));
    assert_eq!(args.gateway.timeout_secs, Some(30));
}

#[test]
fn feedback_requires_a_message() {
    assert!(Cli::try_parse_from(["sentinel", "feedback"]).is_err());

    let cli = Cli::try_parse_from([
        "sentinel",
        "feedback",
        "--category",
        "bug-report",
        "--message",
        "Chart overlaps",
    ])
    .unwrap();
    let Command::Feedback(args) = cli.command else {
        panic!("expected feedback command");
    };
    assert_eq!(FeedbackCategory::from(args.category), FeedbackCategory::BugReport);
    assert_eq!(args.message, "Chart overlaps");
    assert!(args.email.is_none());
}

#[test]
fn unknown_algorithm_is_rejected() {
    assert!(Cli::try_parse_from(["sentinel", "run", "tx.csv", "--algorithm", "svm"]).is_err());
}

#[test]
fn log_flags_reach_the_logging_config() {
    let cli = Cli::try_parse_from([
        "sentinel",
        "--color",
        "never",
        "--log-timestamps",
        "--log-target",
        "--log-data",
        "--log-format",
        "compact",
        "stages",
    ])
    .unwrap();
    let config = cli.log_config();
    assert!(config.with_timestamps);
    assert!(config.with_target);
    assert!(config.log_data);
    assert!(!config.with_ansi);
    assert!(config.use_env_filter);
    assert_eq!(config.format, LogFormat::Compact);

    let cli = Cli::try_parse_from(["sentinel", "-v", "stages"]).unwrap();
    let config = cli.log_config();
    assert!(!config.use_env_filter);
    assert!(!config.with_timestamps);
    assert!(!config.with_target);
}

#[test]
fn stages_table_marks_only_dashboard_and_upload_reachable() {
    let mut table = stages_table(&PipelineContext::new());
    table.force_no_tty();
    assert_snapshot!(table.to_string(), @r"
    ╭───┬────────────┬────────────────┬────────────────┬───────────╮
    │ # ┆ Stage      ┆ Label          ┆ Next           ┆ Available │
    ╞═══╪════════════╪════════════════╪════════════════╪═══════════╡
    │ 1 ┆ Dashboard  ┆ Dashboard      ┆ Data Ingestion ┆    yes    │
    │ 2 ┆ Upload     ┆ Data Ingestion ┆ Preprocessing  ┆    yes    │
    │ 3 ┆ Preprocess ┆ Preprocessing  ┆ Model Training ┆   locked  │
    │ 4 ┆ Train      ┆ Model Training ┆ Evaluation     ┆   locked  │
    │ 5 ┆ Evaluate   ┆ Evaluation     ┆ Deployment     ┆   locked  │
    │ 6 ┆ Deploy     ┆ Deployment     ┆ -              ┆   locked  │
    ╰───┴────────────┴────────────────┴────────────────┴───────────╯
    ");
}

#[test]
fn profile_table_lists_every_column() {
    let ingested = parse_transactions("Time,Amount,Note\n0,1.5,\n1,2.0,late\n").unwrap();
    let rendered = profile_table(&profile_columns(&ingested.dataset)).to_string();
    for column in ["Time", "Amount", "Note"] {
        assert!(rendered.contains(column), "missing {column}");
    }
    assert!(rendered.contains("numeric"));
    assert!(rendered.contains("text"));
}

#[test]
fn evaluation_table_shows_scores_and_confusion_counts() {
    let mut table = evaluation_table(&EvaluationReport::from_metrics(&metrics()));
    table.force_no_tty();
    assert_snapshot!(table.to_string(), @r"
    ╭───────────┬───────┬─────────────────┬───────╮
    │ Metric    ┆ Value ┆ Outcome         ┆ Count │
    ╞═══════════╪═══════╪═════════════════╪═══════╡
    │ Accuracy  ┆ 99.9% ┆ True Positives  ┆    80 │
    │ Precision ┆ 90.0% ┆ False Positives ┆     9 │
    │ Recall    ┆ 80.0% ┆ True Negatives  ┆ 99891 │
    │ F1 Score  ┆ 84.7% ┆ False Negatives ┆    20 │
    │ AUC-ROC   ┆ 0.972 ┆                 ┆       │
    ╰───────────┴───────┴─────────────────┴───────╯
    ");
}

#[test]
fn deployment_table_lists_endpoint_and_version() {
    let created = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
    let mut table = deployment_table(&Deployment::new(created));
    table.force_no_tty();
    assert_snapshot!(table.to_string(), @r"
    ╭──────────┬──────────────────────────────────────────╮
    │ Endpoint ┆ https://api.sentinel-fraud.ai/v1/predict │
    │ Status   ┆ Deploying                                │
    │ Version  ┆ SENTINEL-1.0-STABLE                      │
    │ Created  ┆ 2026-01-02T03:04:05+00:00                │
    ╰──────────┴──────────────────────────────────────────╯
    ");
}

#[test]
fn prediction_table_shows_verdict_and_probability() {
    let prediction = Prediction {
        prediction: Verdict::Fraud,
        probability: 0.875,
        reasoning: "Amount spike".into(),
    };
    let rendered = prediction_table(&prediction).to_string();
    assert!(rendered.contains("Fraud"));
    assert!(rendered.contains("87.5%"));
    assert!(rendered.contains("Amount spike"));
}

#[test]
fn hidden_observer_consumes_a_full_training_curve() {
    let mut observer = ConsoleObserver::new(true);
    for point in training_curve(Some(10)) {
        observer.training_point(&point);
    }
    observer.clear();
}
