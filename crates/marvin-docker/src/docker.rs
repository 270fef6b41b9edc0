//! Docker Engine API runtime

use crate::error::{Error, Result};
use crate::traits::{BuildRequest, ContainerRuntime, ContainerSpec};
use crate::utils::command_exists;
use async_trait::async_trait;
use bollard::container::{
    Config, CreateContainerOptions, LogOutput, LogsOptions, RemoveContainerOptions,
    StartContainerOptions, StopContainerOptions,
};
use bollard::errors::Error as BollardError;
use bollard::image::{BuildImageOptions, RemoveImageOptions};
use bollard::models::{HostConfig, PortBinding};
use bollard::Docker;
use futures::stream::BoxStream;
use futures::StreamExt;
use std::collections::HashMap;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Seconds the daemon waits for a graceful stop before killing
const STOP_TIMEOUT_SECS: i64 = 10;

/// Container runtime backed by the local Docker daemon
pub struct DockerRuntime {
    docker: Docker,
}

impl DockerRuntime {
    /// Connect to the local daemon and verify it answers
    pub async fn connect() -> Result<Self> {
        let docker = Docker::connect_with_local_defaults()
            .map_err(|e| Error::DaemonUnavailable(e.to_string()))?;

        docker
            .ping()
            .await
            .map_err(|e| Error::DaemonUnavailable(e.to_string()))?;

        debug!("Connected to Docker daemon");
        Ok(Self { docker })
    }
}

/// HTTP status carried by a daemon error response
fn status_code(err: &BollardError) -> Option<u16> {
    match err {
        BollardError::DockerResponseServerError { status_code, .. } => Some(*status_code),
        _ => None,
    }
}

/// Raw bytes of one log frame, whichever stream it came from
fn log_bytes(output: LogOutput) -> Vec<u8> {
    match output {
        LogOutput::StdOut { message }
        | LogOutput::StdErr { message }
        | LogOutput::StdIn { message }
        | LogOutput::Console { message } => message.to_vec(),
    }
}

/// `"<port>/tcp"` key used by the Engine API
fn tcp_port(port: u16) -> String {
    format!("{}/tcp", port)
}

#[async_trait]
impl ContainerRuntime for DockerRuntime {
    async fn remove_image(&self, tag: &str) -> Result<()> {
        let options = RemoveImageOptions {
            force: false,
            noprune: false,
        };

        match self.docker.remove_image(tag, Some(options), None).await {
            Ok(deleted) => {
                debug!("Removed image {} ({} layers)", tag, deleted.len());
                Ok(())
            }
            Err(e) if status_code(&e) == Some(404) => Err(Error::image_not_found(tag)),
            Err(e) => Err(e.into()),
        }
    }

    async fn build_image(&self, request: BuildRequest) -> Result<()> {
        let BuildRequest {
            tag,
            context,
            build_args,
            no_cache,
            force_rm,
        } = request;

        let options = BuildImageOptions {
            dockerfile: "Dockerfile".to_string(),
            t: tag.clone(),
            nocache: no_cache,
            forcerm: force_rm,
            rm: true,
            buildargs: build_args,
            ..Default::default()
        };

        let mut stream = self.docker.build_image(options, None, Some(context.into()));

        while let Some(item) = stream.next().await {
            let info = item.map_err(|e| Error::build_failed(&tag, e.to_string()))?;

            if let Some(message) = info.error {
                return Err(Error::build_failed(&tag, message));
            }
            if let Some(line) = info.stream {
                let line = line.trim_end();
                if !line.is_empty() {
                    debug!("{}", line);
                }
            }
        }

        info!("Built image {}", tag);
        Ok(())
    }

    async fn run_container(&self, spec: &ContainerSpec) -> Result<String> {
        let exposed_ports: HashMap<String, HashMap<(), ()>> = spec
            .ports
            .iter()
            .map(|port| (tcp_port(*port), HashMap::new()))
            .collect();

        let port_bindings: HashMap<String, Option<Vec<PortBinding>>> = spec
            .ports
            .iter()
            .map(|port| {
                let binding = PortBinding {
                    host_ip: None,
                    host_port: Some(port.to_string()),
                };
                (tcp_port(*port), Some(vec![binding]))
            })
            .collect();

        let host_config = HostConfig {
            memory: Some(spec.memory_bytes),
            cpuset_cpus: Some(spec.cpuset.clone()),
            binds: Some(spec.binds.clone()),
            port_bindings: Some(port_bindings),
            ..Default::default()
        };

        let config = Config {
            image: Some(spec.image.clone()),
            tty: Some(true),
            attach_stdout: Some(true),
            attach_stderr: Some(true),
            exposed_ports: Some(exposed_ports),
            host_config: Some(host_config),
            ..Default::default()
        };

        let options = CreateContainerOptions {
            name: spec.name.clone(),
            platform: None,
        };

        let created = match self.docker.create_container(Some(options), config).await {
            Ok(created) => created,
            Err(e) if status_code(&e) == Some(409) => {
                let engine = spec.name.trim_end_matches("-run").to_string();
                return Err(Error::container_conflict(&spec.name, engine));
            }
            Err(e) => return Err(e.into()),
        };

        for warning in &created.warnings {
            warn!("{}", warning);
        }

        if let Err(e) = self
            .docker
            .start_container(&created.id, None::<StartContainerOptions<String>>)
            .await
        {
            // A created-but-never-started container would block the next run
            let options = RemoveContainerOptions {
                force: true,
                ..Default::default()
            };
            if let Err(cleanup) = self.docker.remove_container(&created.id, Some(options)).await {
                warn!("Failed to remove container {}: {}", spec.name, cleanup);
            }
            return Err(e.into());
        }

        debug!("Started container {} ({})", spec.name, created.id);
        Ok(created.id)
    }

    fn logs<'a>(&'a self, name: &'a str) -> BoxStream<'a, Result<Vec<u8>>> {
        let options = LogsOptions::<String> {
            follow: true,
            stdout: true,
            stderr: true,
            ..Default::default()
        };

        self.docker
            .logs(name, Some(options))
            .map(|chunk| chunk.map(log_bytes).map_err(Error::from))
            .boxed()
    }

    async fn show_stats(&self, name: &str) -> Result<()> {
        if !command_exists("docker") {
            return Err(Error::command_not_found("docker"));
        }

        debug!("Running: docker stats {}", name);
        let status = Command::new("docker")
            .args(["stats", name])
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .status()
            .await?;

        if !status.success() {
            warn!("docker stats exited with {}", status);
        }

        Ok(())
    }

    async fn stop_container(&self, name: &str) -> Result<()> {
        let options = StopContainerOptions {
            t: STOP_TIMEOUT_SECS,
        };

        match self.docker.stop_container(name, Some(options)).await {
            Ok(()) => Ok(()),
            Err(e) if status_code(&e) == Some(404) => Err(Error::container_not_found(name)),
            Err(e) => Err(e.into()),
        }
    }

    async fn remove_container(&self, name: &str) -> Result<()> {
        let options = RemoveContainerOptions {
            force: false,
            ..Default::default()
        };

        match self.docker.remove_container(name, Some(options)).await {
            Ok(()) => Ok(()),
            Err(e) if status_code(&e) == Some(404) => Err(Error::container_not_found(name)),
            Err(e) => Err(e.into()),
        }
    }
}
