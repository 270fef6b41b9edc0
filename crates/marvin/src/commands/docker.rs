//! Engine container commands

use anyhow::{Context, Result};
use camino::Utf8Path;
use marvin_core::MarvinEnv;
use marvin_docker::{
    engine_name_from_path, stop_engine, DockerRuntime, EngineCommand, EngineRunner,
    RunDescriptor, RunOutcome,
};
use tracing::warn;

use crate::cli::{DockerBenchmarkArgs, DockerDevelopArgs, DockerStopArgs};
use crate::output;

/// `marvin docker-develop`
pub async fn develop(args: DockerDevelopArgs, env: &MarvinEnv) -> Result<()> {
    let home = env.require_home()?;

    let descriptor = RunDescriptor {
        engine_name: args.engine,
        memory_limit: args.memory,
        cpu_set: args.cpu,
        command: args.command.to_engine_command(),
        benchmark: false,
    };

    run_engine(&descriptor, home).await
}

/// `marvin docker-benchmark`
pub async fn benchmark(args: DockerBenchmarkArgs, env: &MarvinEnv) -> Result<()> {
    let home = env.require_home()?;
    let engine = engine_name_from_path(args.engine.as_std_path())?;

    let descriptor = RunDescriptor {
        engine_name: engine,
        memory_limit: args.memory,
        cpu_set: args.cpu,
        command: EngineCommand::Dryrun,
        benchmark: true,
    };

    run_engine(&descriptor, home).await
}

/// `marvin docker-stop`
pub async fn stop(args: DockerStopArgs) -> Result<()> {
    let runtime = connect().await?;

    stop_engine(&runtime, &args.engine)
        .await
        .with_context(|| format!("Failed to stop engine {}", args.engine))?;

    output::success(&format!("Stopped engine {}", args.engine));
    Ok(())
}

async fn run_engine(descriptor: &RunDescriptor, home: &Utf8Path) -> Result<()> {
    output::header(&format!("Engine {}", descriptor.engine_name));
    output::kv("Command", descriptor.command.shell_command());
    output::kv("Memory", &descriptor.memory_limit);
    output::kv("CPUs", &descriptor.cpu_set);
    output::kv("Marvin home", home.as_str());
    if descriptor.benchmark {
        output::kv("Mode", "benchmark");
    }
    println!();

    let runtime = connect().await?;
    let runner = EngineRunner::new(runtime, home.as_std_path());

    let mut stdout = std::io::stdout();
    let outcome = runner
        .run(descriptor, interrupted(), &mut stdout)
        .await
        .with_context(|| format!("Failed to run engine {}", descriptor.engine_name))?;

    println!();
    match outcome {
        RunOutcome::Completed => {
            output::success(&format!("Engine {} finished", descriptor.engine_name))
        }
        RunOutcome::Interrupted => output::info(&format!(
            "Interrupted; removed container {}",
            descriptor.container_name()
        )),
    }
    Ok(())
}

async fn connect() -> Result<DockerRuntime> {
    let spinner = output::spinner("Connecting to Docker...");
    let runtime = DockerRuntime::connect().await;
    spinner.finish_and_clear();
    Ok(runtime?)
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Unable to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
