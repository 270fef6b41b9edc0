//! Marvin CLI - develop and scaffold Marvin machine-learning engines
//!
//! This is the main entry point for the Marvin command-line interface.

mod cli;
mod commands;
mod output;
mod version;

use anyhow::Result;
use clap::Parser;
use marvin_core::MarvinEnv;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbosity(), cli.quiet);

    let env = MarvinEnv::from_env();

    match cli.command {
        Commands::DockerDevelop(args) => commands::docker::develop(args, &env).await,
        Commands::DockerStop(args) => commands::docker::stop(args).await,
        Commands::DockerBenchmark(args) => commands::docker::benchmark(args, &env).await,
        Commands::EngineGenerate(args) => commands::engine::generate(args, &env).await,
        Commands::Version(args) => commands::version::run(args),
    }
}

/// Initialize tracing with appropriate verbosity
///
/// `RUST_LOG`, when set, takes precedence over the flags.
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if quiet {
            EnvFilter::new("error")
        } else {
            match verbose {
                0 => EnvFilter::new("info"),
                1 => EnvFilter::new("debug"),
                _ => EnvFilter::new("trace"),
            }
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
