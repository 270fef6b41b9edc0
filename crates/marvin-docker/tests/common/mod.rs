//! Common test helpers for marvin-docker integration tests
//!
//! Provides an in-memory [`ContainerRuntime`] that records every call and
//! tracks which images and containers exist, so lifecycle tests can assert
//! on what was left behind.

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use marvin_docker::{BuildRequest, ContainerRuntime, ContainerSpec, Error, Result};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// One recorded runtime call
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(dead_code)]
pub enum Call {
    RemoveImage(String),
    BuildImage(String),
    RunContainer(String),
    Logs(String),
    ShowStats(String),
    StopContainer(String),
    RemoveContainer(String),
}

/// How the fake answers log and stats requests
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum Output {
    /// Emit these chunks, then end as if the container exited
    Finite(Vec<String>),
    /// Emit these chunks, then block forever
    Endless(Vec<String>),
    /// Emit these chunks, then fail
    Failing(Vec<String>),
}

#[derive(Debug, Default)]
struct State {
    calls: Vec<Call>,
    images: HashSet<String>,
    containers: HashSet<String>,
    builds: Vec<BuildRequest>,
    specs: Vec<ContainerSpec>,
}

/// In-memory container runtime
#[derive(Debug, Clone)]
pub struct FakeRuntime {
    state: Arc<Mutex<State>>,
    output: Output,
    fail_image_removal: bool,
    fail_build: bool,
}

#[allow(dead_code)]
impl FakeRuntime {
    pub fn new(output: Output) -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
            output,
            fail_image_removal: false,
            fail_build: false,
        }
    }

    /// Pretend an image with this tag already exists
    pub fn with_image(self, tag: &str) -> Self {
        self.state.lock().unwrap().images.insert(tag.to_string());
        self
    }

    /// Pretend a container with this name already exists
    pub fn with_container(self, name: &str) -> Self {
        self.state.lock().unwrap().containers.insert(name.to_string());
        self
    }

    /// Make image removal fail with something other than not-found
    pub fn failing_image_removal(mut self) -> Self {
        self.fail_image_removal = true;
        self
    }

    /// Make the image build fail
    pub fn failing_build(mut self) -> Self {
        self.fail_build = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn containers(&self) -> HashSet<String> {
        self.state.lock().unwrap().containers.clone()
    }

    pub fn images(&self) -> HashSet<String> {
        self.state.lock().unwrap().images.clone()
    }

    pub fn builds(&self) -> Vec<BuildRequest> {
        self.state.lock().unwrap().builds.clone()
    }

    pub fn specs(&self) -> Vec<ContainerSpec> {
        self.state.lock().unwrap().specs.clone()
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }

    fn chunks(chunks: &[String]) -> Vec<Result<Vec<u8>>> {
        chunks.iter().map(|c| Ok(c.as_bytes().to_vec())).collect()
    }
}

#[async_trait]
impl ContainerRuntime for FakeRuntime {
    async fn remove_image(&self, tag: &str) -> Result<()> {
        self.record(Call::RemoveImage(tag.to_string()));
        if self.fail_image_removal {
            return Err(Error::Io(std::io::Error::other("image is in use")));
        }
        if self.state.lock().unwrap().images.remove(tag) {
            Ok(())
        } else {
            Err(Error::image_not_found(tag))
        }
    }

    async fn build_image(&self, request: BuildRequest) -> Result<()> {
        self.record(Call::BuildImage(request.tag.clone()));
        if self.fail_build {
            return Err(Error::build_failed(&request.tag, "pip install failed"));
        }
        let mut state = self.state.lock().unwrap();
        state.images.insert(request.tag.clone());
        state.builds.push(request);
        Ok(())
    }

    async fn run_container(&self, spec: &ContainerSpec) -> Result<String> {
        self.record(Call::RunContainer(spec.name.clone()));
        let mut state = self.state.lock().unwrap();
        if !state.containers.insert(spec.name.clone()) {
            let engine = spec.name.trim_end_matches("-run").to_string();
            return Err(Error::container_conflict(&spec.name, engine));
        }
        state.specs.push(spec.clone());
        Ok(format!("{}-id", spec.name))
    }

    fn logs<'a>(&'a self, name: &'a str) -> BoxStream<'a, Result<Vec<u8>>> {
        self.record(Call::Logs(name.to_string()));
        match &self.output {
            Output::Finite(chunks) => stream::iter(Self::chunks(chunks)).boxed(),
            Output::Endless(chunks) => stream::iter(Self::chunks(chunks))
                .chain(stream::pending())
                .boxed(),
            Output::Failing(chunks) => stream::iter(Self::chunks(chunks))
                .chain(stream::once(async {
                    Err(Error::Io(std::io::Error::other("connection reset")))
                }))
                .boxed(),
        }
    }

    async fn show_stats(&self, name: &str) -> Result<()> {
        self.record(Call::ShowStats(name.to_string()));
        match &self.output {
            Output::Endless(_) => {
                futures::future::pending::<()>().await;
                Ok(())
            }
            Output::Finite(_) => Ok(()),
            Output::Failing(_) => Err(Error::command_not_found("docker")),
        }
    }

    async fn stop_container(&self, name: &str) -> Result<()> {
        self.record(Call::StopContainer(name.to_string()));
        if self.state.lock().unwrap().containers.contains(name) {
            Ok(())
        } else {
            Err(Error::container_not_found(name))
        }
    }

    async fn remove_container(&self, name: &str) -> Result<()> {
        self.record(Call::RemoveContainer(name.to_string()));
        if self.state.lock().unwrap().containers.remove(name) {
            Ok(())
        } else {
            Err(Error::container_not_found(name))
        }
    }
}
