//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand, ValueEnum};
use marvin_docker::EngineCommand;

/// Marvin - develop, benchmark and scaffold machine-learning engines
#[derive(Parser, Debug)]
#[command(name = "marvin")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Effective verbosity; `--debug` counts as `-v`
    pub fn verbosity(&self) -> u8 {
        if self.debug {
            self.verbose.max(1)
        } else {
            self.verbose
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build an engine image and run it in a development container
    DockerDevelop(DockerDevelopArgs),

    /// Stop and remove an engine's development container
    DockerStop(DockerStopArgs),

    /// Dry-run an engine in a container while showing resource usage
    DockerBenchmark(DockerBenchmarkArgs),

    /// Generate a new Marvin engine project
    EngineGenerate(EngineGenerateArgs),

    /// Show version information
    Version(VersionArgs),
}

// Docker commands
#[derive(Args, Debug)]
pub struct DockerDevelopArgs {
    /// Memory quota (e.g. 512m, 2g)
    #[arg(short, long, default_value = "2g")]
    pub memory: String,

    /// CPUs the container may use (e.g. 0-2)
    #[arg(short, long, default_value = "0-2")]
    pub cpu: String,

    /// Engine name
    #[arg(short, long)]
    pub engine: String,

    /// Command the container starts with
    #[arg(long, value_enum, default_value_t = CommandChoice::Notebook)]
    pub command: CommandChoice,
}

#[derive(Args, Debug)]
pub struct DockerStopArgs {
    /// Engine whose container is stopped
    #[arg(short, long)]
    pub engine: String,
}

#[derive(Args, Debug)]
pub struct DockerBenchmarkArgs {
    /// Memory quota (e.g. 512m, 2g)
    #[arg(short, long, default_value = "2g")]
    pub memory: String,

    /// CPUs the container may use (e.g. 0-2)
    #[arg(short, long, default_value = "0-2")]
    pub cpu: String,

    /// Engine directory; its name is the engine name
    #[arg(short, long)]
    pub engine: Utf8PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CommandChoice {
    /// Jupyter notebook on port 8888
    Notebook,
    /// Run the whole engine pipeline once
    Dryrun,
    /// Run the engine tests
    Test,
    /// Serve the engine on port 8000
    Httpserver,
}

impl CommandChoice {
    /// Convert the CLI choice to the library command
    pub fn to_engine_command(self) -> EngineCommand {
        match self {
            Self::Notebook => EngineCommand::Notebook,
            Self::Dryrun => EngineCommand::Dryrun,
            Self::Test => EngineCommand::Test,
            Self::Httpserver => EngineCommand::Httpserver,
        }
    }
}

// Engine commands
#[derive(Args, Debug)]
pub struct EngineGenerateArgs {
    /// Project name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Short description [default: Marvin engine]
    #[arg(short, long)]
    pub description: Option<String>,

    /// Maintainer name [default: Marvin AI Community]
    #[arg(short, long = "mantainer", alias = "maintainer")]
    pub mantainer: Option<String>,

    /// Maintainer email [default: dev@marvin.apache.org]
    #[arg(short, long)]
    pub email: Option<String>,

    /// Package name (derived from the project name when empty)
    #[arg(short, long, default_value = "")]
    pub package: String,

    /// Root folder the project is created in
    #[arg(long, env = "MARVIN_HOME")]
    pub dest: Option<Utf8PathBuf>,

    /// Don't initialize a git repository
    #[arg(long)]
    pub no_git: bool,

    /// Use AutoML [default: n]
    #[arg(long, value_enum)]
    pub automl: Option<AutoMl>,

    /// Python interpreter for the engine environment
    #[arg(long, default_value = "python")]
    pub python: String,

    /// Directory with template sets to use instead of the built-in ones
    #[arg(long)]
    pub templates_dir: Option<Utf8PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AutoMl {
    Y,
    N,
}

impl AutoMl {
    pub fn enabled(self) -> bool {
        self == Self::Y
    }
}

// Version command
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
