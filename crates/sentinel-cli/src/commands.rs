use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use chrono::Utc;
use tracing::{debug, info, info_span, warn};

use sentinel_core::assistant::GREETING;
use sentinel_core::stages::deploy::{DEFAULT_PAYLOAD, curl_snippet, readiness_line};
use sentinel_core::{
    Assistant, PipelineContext, PipelineError, StageTimings, Wizard, submit_feedback,
};
use sentinel_gateway::{GatewayConfig, GeminiClient};
use sentinel_ingest::{Upload, ingest_upload, profile_columns};
use sentinel_model::{Feedback, Stage};

use sentinel_cli::cli::{FeedbackArgs, GatewayArgs, InspectArgs, RunArgs};
use sentinel_cli::logging::redact_value;
use sentinel_cli::progress::ConsoleObserver;
use sentinel_cli::summary::{
    analysis_table, deployment_table, evaluation_table, prediction_table, profile_table,
    stages_table,
};

pub fn run_stages() -> Result<()> {
    println!("{}", stages_table(&PipelineContext::new()));
    Ok(())
}

pub fn run_inspect(args: &InspectArgs) -> Result<()> {
    let upload = Upload::from_path(&args.path)
        .with_context(|| format!("read {}", args.path.display()))?;
    let ingested = ingest_upload(&upload).map_err(|err| anyhow!(err.user_message()))?;

    println!("File: {}", upload.file_name);
    println!("Records: {}", ingested.dataset.len());
    println!("Dropped rows: {}", ingested.dropped_rows);
    println!("{}", profile_table(&profile_columns(&ingested.dataset)));
    Ok(())
}

pub fn run_pipeline(args: &RunArgs) -> Result<()> {
    let config = gateway_config(&args.gateway);
    if config.api_key().is_none() {
        bail!(
            "no inference service credential; set {} (or {})",
            sentinel_gateway::API_KEY_ENV,
            sentinel_gateway::FALLBACK_API_KEY_ENV
        );
    }
    let client = GeminiClient::new(config).context("create inference client")?;
    let timings = if args.no_animation {
        StageTimings::instant()
    } else {
        StageTimings::default()
    };
    let model_config = args.model_config();
    model_config
        .validate()
        .map_err(|err| anyhow!("invalid training configuration: {err}"))?;

    let span = info_span!("run", file = %args.path.display());
    let _guard = span.enter();

    let mut wizard = Wizard::new(client).with_timings(timings);
    let mut observer = ConsoleObserver::new(false);
    wizard.start();

    let upload = Upload::from_path(&args.path)
        .with_context(|| format!("read {}", args.path.display()))?;
    let uploaded = wizard.upload(&upload, &mut observer);
    let summary = stage(&mut observer, uploaded)?;
    println!(
        "Ingested {} records across {} columns ({} rows dropped)",
        summary.records, summary.columns, summary.dropped_rows
    );

    let analysis = wizard.preprocess(&mut observer).cloned();
    println!("{}", analysis_table(&stage(&mut observer, analysis)?));

    let trained = wizard.train(model_config, &mut observer).map(|_| ());
    stage(&mut observer, trained)?;
    let evaluated = wizard.evaluate();
    let report = stage(&mut observer, evaluated)?;
    println!("{}", evaluation_table(&report));

    let deployed = wizard.deploy(Utc::now());
    stage(&mut observer, deployed)?;
    let activated = wizard.wait_for_activation(&mut observer);
    stage(&mut observer, activated)?;
    let status = wizard.deployment_status();
    let deployment = wizard
        .context()
        .deployment
        .as_ref()
        .ok_or_else(|| anyhow!("deployment missing after activation"))?;
    println!("{}", deployment_table(deployment));
    println!("{}", readiness_line(status));

    let payload = args.predict.as_deref().unwrap_or(DEFAULT_PAYLOAD);
    println!("\n{}\n", curl_snippet(&deployment.endpoint, payload));

    if args.predict.is_some() {
        debug!(payload = %redact_value(payload), "playground payload");
        match observer.spin("Running inference...", || wizard.predict(payload)) {
            Ok(prediction) => println!("{}", prediction_table(&prediction)),
            Err(err) => {
                warn!(error = %err, "prediction failed");
                eprintln!("error: {}", err.user_message());
            }
        }
    }
    info!(stage = %wizard.context().stage(), "run complete");
    Ok(())
}

pub fn run_chat(args: &GatewayArgs) -> Result<()> {
    let client = GeminiClient::new(gateway_config(args)).context("create inference client")?;
    let observer = ConsoleObserver::new(false);
    let mut assistant = Assistant::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("{GREETING}");
    println!("(type 'exit' to leave)");
    loop {
        print!("> ");
        stdout.flush().context("flush stdout")?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line).context("read stdin")? == 0 {
            break;
        }
        let message = line.trim();
        if matches!(message, "exit" | "quit") {
            break;
        }
        let reply = observer.spin("Thinking...", || {
            assistant.send(&client, message).map(str::to_owned)
        });
        if let Some(reply) = reply {
            println!("{reply}");
        }
    }
    Ok(())
}

pub fn run_feedback(args: &FeedbackArgs) -> Result<()> {
    let client = GeminiClient::new(gateway_config(&args.gateway))
        .context("create inference client")?;
    let feedback = Feedback {
        category: args.category.into(),
        message: args.message.clone(),
        email: args.email.clone(),
    };
    debug!(
        message = %redact_value(&feedback.message),
        email = %redact_value(feedback.email.as_deref().unwrap_or_default()),
        "feedback"
    );
    let observer = ConsoleObserver::new(false);
    let ack = observer
        .spin("Sending feedback...", || submit_feedback(&client, &feedback))
        .map_err(|err| anyhow!(err))?;
    println!("{}", ack.acknowledgment);
    Ok(())
}

/// Environment settings with command-line overrides applied.
fn gateway_config(args: &GatewayArgs) -> GatewayConfig {
    let mut config = GatewayConfig::from_env();
    if let Some(model) = &args.model {
        config = config.with_model(model.clone());
    }
    if let Some(url) = &args.gateway_url {
        config = config.with_base_url(url.clone());
    }
    if let Some(secs) = args.timeout_secs {
        config = config.with_timeout(Some(Duration::from_secs(secs)));
    }
    config
}

/// Clears progress output and converts a stage failure into its inline message.
fn stage<T>(observer: &mut ConsoleObserver, result: Result<T, PipelineError>) -> Result<T> {
    observer.clear();
    result.map_err(|err| {
        warn!(error = %err, "stage failed");
        match &err {
            PipelineError::Cancelled => anyhow!("cancelled"),
            _ => anyhow!(err.user_message()).context(stage_name(&err)),
        }
    })
}

fn stage_name(err: &PipelineError) -> &'static str {
    match err {
        PipelineError::StageLocked { target } => target.label(),
        PipelineError::MissingArtifact { stage, .. } | PipelineError::Gateway { stage, .. } => {
            stage.label()
        }
        PipelineError::Ingest(_) | PipelineError::EmptyDataset { .. } => Stage::Upload.label(),
        PipelineError::InvalidConfig(_) => Stage::Train.label(),
        PipelineError::Cancelled => "run",
    }
}
