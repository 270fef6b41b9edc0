//! Engine container lifecycle
//!
//! [`EngineRunner::run`] performs one full cycle for an engine:
//! remove stale image → build → run → stream → stop → remove. Teardown always
//! runs, including after an interrupt or a stream failure.

use crate::context;
use crate::error::{Error, Result};
use crate::traits::{BuildRequest, ContainerRuntime, ContainerSpec};
use crate::utils::parse_memory;
use futures::StreamExt;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Where the Marvin home is mounted inside engine containers
pub const MOUNT_POINT: &str = "/opt/marvin";

/// Ports published by engine containers (notebook, HTTP server)
pub const PUBLISHED_PORTS: [u16; 2] = [8888, 8000];

/// Commands an engine container can be started with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineCommand {
    /// Jupyter notebook server
    Notebook,
    /// Full engine dry run
    Dryrun,
    /// Engine test suite
    Test,
    /// Engine HTTP server
    Httpserver,
}

impl EngineCommand {
    /// Command key as given on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Notebook => "notebook",
            Self::Dryrun => "dryrun",
            Self::Test => "test",
            Self::Httpserver => "httpserver",
        }
    }

    /// Shell command the container runs for this key
    pub fn shell_command(&self) -> &'static str {
        match self {
            Self::Notebook => "notebook --allow-root",
            Self::Dryrun => "engine-dryrun",
            Self::Test => "test",
            Self::Httpserver => {
                "engine-httpserver -h 0.0.0.0 -p 8000 --executor-path /opt/marvin/data/marvin-engine-executor-assembly-0.0.5.jar"
            }
        }
    }
}

impl fmt::Display for EngineCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Name of the container that runs an engine
pub fn container_name(engine: &str) -> String {
    format!("{}-run", engine)
}

/// Engine name for an engine directory: its final path component
///
/// The directory must exist; relative paths such as `.` are resolved first.
pub fn engine_name_from_path(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::engine_path_not_found(path.display().to_string()));
    }

    let resolved = path.canonicalize()?;
    resolved
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| Error::engine_path_not_found(resolved.display().to_string()))
}

/// Stop and remove an engine's container
///
/// Needs no Marvin home: only the container name is involved.
pub async fn stop_engine<R: ContainerRuntime + ?Sized>(runtime: &R, engine: &str) -> Result<()> {
    let container = container_name(engine);

    runtime.stop_container(&container).await?;
    runtime.remove_container(&container).await?;

    info!("Stopped and removed container {}", container);
    Ok(())
}

/// One build + run + teardown cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunDescriptor {
    /// Engine name, also used as the image tag
    pub engine_name: String,
    /// Memory quota (e.g. "2g")
    pub memory_limit: String,
    /// CPU set (e.g. "0-2")
    pub cpu_set: String,
    /// Command the container starts with
    pub command: EngineCommand,
    /// Show resource usage instead of container output
    pub benchmark: bool,
}

impl RunDescriptor {
    /// Container name for this run
    pub fn container_name(&self) -> String {
        container_name(&self.engine_name)
    }
}

/// How the streaming phase ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The container (or the stats display) finished on its own
    Completed,
    /// The caller interrupted streaming
    Interrupted,
}

/// Drives engine containers through a [`ContainerRuntime`]
pub struct EngineRunner<R> {
    runtime: R,
    home: PathBuf,
}

impl<R: ContainerRuntime> EngineRunner<R> {
    /// Create a runner that mounts `home` into every engine container
    pub fn new(runtime: R, home: impl Into<PathBuf>) -> Self {
        Self {
            runtime,
            home: home.into(),
        }
    }

    /// Host directory mounted at [`MOUNT_POINT`]
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Build, run and stream an engine container, then tear it down
    ///
    /// Container output is written to `out`. Streaming stops when the
    /// container exits or `interrupt` resolves; either way the container is
    /// stopped and removed before this returns.
    pub async fn run<F, W>(
        &self,
        descriptor: &RunDescriptor,
        interrupt: F,
        out: &mut W,
    ) -> Result<RunOutcome>
    where
        F: Future<Output = ()>,
        W: Write,
    {
        let engine = descriptor.engine_name.as_str();
        let container = descriptor.container_name();
        let memory_bytes = parse_memory(&descriptor.memory_limit)?;

        match self.runtime.remove_image(engine).await {
            Ok(()) => info!("Removed previous image for engine {}", engine),
            Err(Error::ImageNotFound { .. }) => debug!("No previous image for engine {}", engine),
            Err(e) => return Err(e),
        }

        info!("Building image for engine {}...", engine);
        self.runtime
            .build_image(self.build_request(descriptor)?)
            .await?;

        info!("Creating container for engine {}...", engine);
        let spec = ContainerSpec {
            name: container.clone(),
            image: engine.to_string(),
            memory_bytes,
            cpuset: descriptor.cpu_set.clone(),
            binds: vec![format!("{}:{}:rw", self.home.display(), MOUNT_POINT)],
            ports: PUBLISHED_PORTS.to_vec(),
        };
        self.runtime.run_container(&spec).await?;

        let streamed = if descriptor.benchmark {
            self.watch_stats(&container, interrupt).await
        } else {
            self.stream_logs(&container, interrupt, out).await
        };

        let teardown = stop_engine(&self.runtime, engine).await;

        match (streamed, teardown) {
            (Ok(outcome), Ok(())) => Ok(outcome),
            (Err(e), Ok(())) => Err(e),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Err(teardown)) => {
                warn!("Failed to tear down {}: {}", container, teardown);
                Err(e)
            }
        }
    }

    fn build_request(&self, descriptor: &RunDescriptor) -> Result<BuildRequest> {
        let build_args = HashMap::from([
            ("ENGINE_NAME".to_string(), descriptor.engine_name.clone()),
            (
                "COMMAND".to_string(),
                descriptor.command.shell_command().to_string(),
            ),
        ]);

        Ok(BuildRequest {
            tag: descriptor.engine_name.clone(),
            context: context::archive()?,
            build_args,
            no_cache: true,
            force_rm: true,
        })
    }

    async fn stream_logs<F, W>(&self, container: &str, interrupt: F, out: &mut W) -> Result<RunOutcome>
    where
        F: Future<Output = ()>,
        W: Write,
    {
        let mut logs = self.runtime.logs(container);
        tokio::pin!(interrupt);

        loop {
            tokio::select! {
                biased;
                _ = &mut interrupt => {
                    info!("Interrupted, stopping {}", container);
                    return Ok(RunOutcome::Interrupted);
                }
                chunk = logs.next() => match chunk {
                    Some(Ok(bytes)) => {
                        out.write_all(&bytes)?;
                        out.flush()?;
                    }
                    Some(Err(e)) => return Err(e),
                    None => return Ok(RunOutcome::Completed),
                },
            }
        }
    }

    async fn watch_stats<F>(&self, container: &str, interrupt: F) -> Result<RunOutcome>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            _ = interrupt => {
                info!("Interrupted, stopping {}", container);
                Ok(RunOutcome::Interrupted)
            }
            result = self.runtime.show_stats(container) => result.map(|()| RunOutcome::Completed),
        }
    }
}
