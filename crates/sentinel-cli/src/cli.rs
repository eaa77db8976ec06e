//! CLI argument definitions for the Sentinel wizard.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{Args, ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use crate::logging::{LogConfig, LogFormat};

use sentinel_model::{Algorithm, FeedbackCategory, ModelConfig};

#[derive(Parser)]
#[command(
    name = "sentinel",
    version,
    about = "Sentinel - guided fraud detection pipeline demo",
    long_about = "Walk a transaction CSV through a simulated fraud detection pipeline.\n\n\
                  Upload, preprocessing, training, evaluation and deployment are narrated\n\
                  by a generative inference service configured through GEMINI_API_KEY."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include transaction payloads and feedback text in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Prefix log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Show the module path of each log event.
    #[arg(long = "log-target", global = true)]
    pub log_target: bool,
}

impl Cli {
    /// Build logging configuration from CLI flags with consistent precedence.
    pub fn log_config(&self) -> LogConfig {
        let mut config = LogConfig {
            level_filter: self.verbosity.tracing_level_filter(),
            ..LogConfig::default()
        };
        config.use_env_filter = !(self.verbosity.is_present() || self.log_level.is_some());
        if let Some(level) = self.log_level {
            config.level_filter = match level {
                LogLevelArg::Error => LevelFilter::ERROR,
                LogLevelArg::Warn => LevelFilter::WARN,
                LogLevelArg::Info => LevelFilter::INFO,
                LogLevelArg::Debug => LevelFilter::DEBUG,
                LogLevelArg::Trace => LevelFilter::TRACE,
            };
        }
        config.format = match self.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        };
        config.log_file = self.log_file.clone();
        config.log_data = self.log_data;
        config.with_timestamps = self.log_timestamps;
        config.with_target = self.log_target;
        config.with_ansi = match self.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.log_file.is_none() && io::stderr().is_terminal(),
        };
        config
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// List the wizard stages in order.
    Stages,

    /// Parse a CSV locally and show its column profile.
    Inspect(InspectArgs),

    /// Run the whole wizard on a CSV file.
    Run(RunArgs),

    /// Chat with the pipeline assistant (reads lines from stdin).
    Chat(GatewayArgs),

    /// Send product feedback.
    Feedback(FeedbackArgs),
}

#[derive(Args)]
pub struct InspectArgs {
    /// Transaction CSV file.
    #[arg(value_name = "CSV")]
    pub path: PathBuf,
}

#[derive(Args)]
pub struct RunArgs {
    /// Transaction CSV file.
    #[arg(value_name = "CSV")]
    pub path: PathBuf,

    /// Algorithm to simulate.
    #[arg(long, value_enum, default_value = "xgboost")]
    pub algorithm: AlgorithmArg,

    /// Fraction of rows held out for testing (0.1 to 0.4).
    #[arg(long = "test-size", default_value_t = 0.2)]
    pub test_size: f64,

    #[arg(long = "learning-rate", default_value_t = 0.01)]
    pub learning_rate: f64,

    /// Training epochs (defaults to 100).
    #[arg(long)]
    pub epochs: Option<u32>,

    /// JSON transaction to send to the deployed endpoint.
    #[arg(long, value_name = "JSON")]
    pub predict: Option<String>,

    /// Skip the cosmetic stage delays.
    #[arg(long = "no-animation")]
    pub no_animation: bool,

    #[command(flatten)]
    pub gateway: GatewayArgs,
}

impl RunArgs {
    pub fn model_config(&self) -> ModelConfig {
        let config = ModelConfig::default()
            .with_algorithm(self.algorithm.into())
            .with_test_size(self.test_size)
            .with_learning_rate(self.learning_rate);
        match self.epochs {
            Some(epochs) => config.with_epochs(Some(epochs)),
            None => config,
        }
    }
}

/// Overrides for the inference service settings read from the environment.
#[derive(Args, Default)]
pub struct GatewayArgs {
    /// Model name (defaults to $SENTINEL_MODEL or the built-in default).
    #[arg(long, value_name = "NAME")]
    pub model: Option<String>,

    /// Service base URL (defaults to $SENTINEL_GATEWAY_URL or the public endpoint).
    #[arg(long = "gateway-url", value_name = "URL")]
    pub gateway_url: Option<String>,

    /// Per-request timeout in seconds. Requests wait indefinitely when unset.
    #[arg(long = "timeout", value_name = "SECONDS")]
    pub timeout_secs: Option<u64>,
}

#[derive(Args)]
pub struct FeedbackArgs {
    #[arg(long, value_enum, default_value = "general")]
    pub category: CategoryArg,

    #[arg(long)]
    pub message: String,

    /// Optional contact address.
    #[arg(long)]
    pub email: Option<String>,

    #[command(flatten)]
    pub gateway: GatewayArgs,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum AlgorithmArg {
    #[value(name = "xgboost")]
    XgBoost,
    RandomForest,
    LogisticRegression,
    NeuralNetwork,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::XgBoost => Algorithm::XgBoost,
            AlgorithmArg::RandomForest => Algorithm::RandomForest,
            AlgorithmArg::LogisticRegression => Algorithm::LogisticRegression,
            AlgorithmArg::NeuralNetwork => Algorithm::NeuralNetwork,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum CategoryArg {
    General,
    BugReport,
    FeatureRequest,
}

impl From<CategoryArg> for FeedbackCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::General => FeedbackCategory::General,
            CategoryArg::BugReport => FeedbackCategory::BugReport,
            CategoryArg::FeatureRequest => FeedbackCategory::FeatureRequest,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
