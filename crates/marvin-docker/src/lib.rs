//! Container lifecycle for Marvin engines
//!
//! This crate drives one build → run → stream → teardown cycle for an
//! engine container:
//!
//! - Remove any stale image tagged with the engine name
//! - Build a fresh image from the bundled `engine-commands` context
//! - Run `<engine>-run` with memory/CPU limits, the Marvin home mounted at
//!   `/opt/marvin` and ports 8888/8000 published
//! - Stream container output (or `docker stats` in benchmark mode) until the
//!   container exits or the user interrupts
//! - Stop and remove the container
//!
//! The daemon is reached through [`ContainerRuntime`]; [`DockerRuntime`] is
//! the Docker Engine API implementation.

pub mod context;
pub mod docker;
pub mod engine;
pub mod error;
pub mod traits;
mod utils;

pub use docker::DockerRuntime;
pub use engine::{
    container_name, engine_name_from_path, stop_engine, EngineCommand, EngineRunner,
    RunDescriptor, RunOutcome, MOUNT_POINT, PUBLISHED_PORTS,
};
pub use error::{Error, Result};
pub use traits::{BuildRequest, ContainerRuntime, ContainerSpec};
pub use utils::{command_exists, parse_memory};
