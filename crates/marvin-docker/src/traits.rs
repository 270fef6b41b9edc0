//! Container runtime trait definitions

use crate::error::Result;
use async_trait::async_trait;
use futures::stream::BoxStream;
use std::collections::HashMap;

/// Image build parameters
#[derive(Debug, Clone)]
pub struct BuildRequest {
    /// Tag for the resulting image
    pub tag: String,
    /// Build context as an uncompressed tar archive
    pub context: Vec<u8>,
    /// `--build-arg` values
    pub build_args: HashMap<String, String>,
    /// Ignore the layer cache
    pub no_cache: bool,
    /// Always remove intermediate containers
    pub force_rm: bool,
}

/// Container creation parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSpec {
    /// Container name
    pub name: String,
    /// Image to run
    pub image: String,
    /// Memory limit in bytes
    pub memory_bytes: i64,
    /// CPUs the container may use (e.g. "0-2")
    pub cpuset: String,
    /// Bind mounts in `host:container:mode` form
    pub binds: Vec<String>,
    /// TCP ports published on the same host port
    pub ports: Vec<u16>,
}

/// Operations the engine lifecycle needs from a container daemon
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Remove an image by tag
    ///
    /// Returns [`crate::Error::ImageNotFound`] when no such image exists.
    async fn remove_image(&self, tag: &str) -> Result<()>;

    /// Build an image, waiting for the build to finish
    async fn build_image(&self, request: BuildRequest) -> Result<()>;

    /// Create and start a detached container, returning its ID
    async fn run_container(&self, spec: &ContainerSpec) -> Result<String>;

    /// Follow a container's combined output until it exits
    fn logs<'a>(&'a self, name: &'a str) -> BoxStream<'a, Result<Vec<u8>>>;

    /// Display live resource usage for a container until the display exits
    async fn show_stats(&self, name: &str) -> Result<()>;

    /// Stop a container
    ///
    /// Returns [`crate::Error::ContainerNotFound`] when no such container
    /// exists. Stopping an already-stopped container succeeds.
    async fn stop_container(&self, name: &str) -> Result<()>;

    /// Remove a stopped container
    async fn remove_container(&self, name: &str) -> Result<()>;
}
