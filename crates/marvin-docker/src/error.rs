//! Error types for marvin-docker

use thiserror::Error;

/// Result type alias using marvin-docker's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Container lifecycle error types
#[derive(Error, Debug)]
pub enum Error {
    /// Docker daemon cannot be reached
    #[error("Docker daemon is not available: {0}. Is Docker running?")]
    DaemonUnavailable(String),

    /// Image does not exist
    #[error("Image not found: {image}")]
    ImageNotFound { image: String },

    /// Container does not exist
    #[error("Container not found: {name}")]
    ContainerNotFound { name: String },

    /// Container name already taken
    #[error("Container {name} already exists. Stop it first with: marvin docker-stop --engine {engine}")]
    ContainerConflict { name: String, engine: String },

    /// Image build failed
    #[error("Failed to build image {image}: {message}")]
    BuildFailed { image: String, message: String },

    /// Memory quota cannot be parsed
    #[error("Invalid memory quota: {value}. Expected a number with an optional b, k, m or g suffix")]
    InvalidMemory { value: String },

    /// Required command not found
    #[error("Required command not found: {command}")]
    CommandNotFound { command: String },

    /// Engine path does not exist
    #[error("Engine path does not exist: {path}")]
    EnginePathNotFound { path: String },

    /// Docker API error
    #[error("Docker API error: {0}")]
    Docker(#[from] bollard::errors::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an image not found error
    pub fn image_not_found(image: impl Into<String>) -> Self {
        Self::ImageNotFound {
            image: image.into(),
        }
    }

    /// Create a container not found error
    pub fn container_not_found(name: impl Into<String>) -> Self {
        Self::ContainerNotFound { name: name.into() }
    }

    /// Create a container conflict error
    pub fn container_conflict(name: impl Into<String>, engine: impl Into<String>) -> Self {
        Self::ContainerConflict {
            name: name.into(),
            engine: engine.into(),
        }
    }

    /// Create a build failed error
    pub fn build_failed(image: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BuildFailed {
            image: image.into(),
            message: message.into(),
        }
    }

    /// Create an invalid memory error
    pub fn invalid_memory(value: impl Into<String>) -> Self {
        Self::InvalidMemory {
            value: value.into(),
        }
    }

    /// Create a command not found error
    pub fn command_not_found(command: impl Into<String>) -> Self {
        Self::CommandNotFound {
            command: command.into(),
        }
    }

    /// Create an engine path not found error
    pub fn engine_path_not_found(path: impl Into<String>) -> Self {
        Self::EnginePathNotFound { path: path.into() }
    }

    /// True for the not-found variants
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ImageNotFound { .. } | Self::ContainerNotFound { .. }
        )
    }
}
