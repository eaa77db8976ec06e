//! Sentinel fraud pipeline CLI.

use clap::Parser;
use sentinel_cli::cli::{Cli, Command};
use sentinel_cli::logging::init_logging;

mod commands;

use crate::commands::{run_chat, run_feedback, run_inspect, run_pipeline, run_stages};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = cli.log_config();
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match &cli.command {
        Command::Stages => run_stages(),
        Command::Inspect(args) => run_inspect(args),
        Command::Run(args) => run_pipeline(args),
        Command::Chat(args) => run_chat(args),
        Command::Feedback(args) => run_feedback(args),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}
