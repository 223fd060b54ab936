use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod dataset;
mod output;
mod prompt;
mod record;
mod schema;
mod staging;
mod util;
mod validate;
mod workflow;

fn main() -> Result<ExitCode> {
    let args = cli::RootArgs::parse();
    init_tracing(args.verbose);
    let settings = cli::Settings::from_args(args);
    output::configure(settings.color);
    workflow::run_add(&settings)
}

/// Logs go to stderr so prompts on stdout stay clean; `RUST_LOG` wins.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
