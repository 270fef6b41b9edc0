//! Environment configuration
//!
//! The Marvin tool reads three variables from the process environment. They
//! are captured into a [`MarvinEnv`] exactly once at startup and handed to
//! the commands as explicit values. Each command validates the values it
//! needs before touching the filesystem or the Docker daemon.

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

/// Marvin home directory, mounted into engine containers
pub const HOME_VAR: &str = "MARVIN_HOME";

/// Shared data directory, linked into generated projects
pub const DATA_PATH_VAR: &str = "MARVIN_DATA_PATH";

/// Toolbox version templated into generated project metadata
pub const TOOLBOX_VERSION_VAR: &str = "TOOLBOX_VERSION";

/// Snapshot of the environment the CLI runs in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarvinEnv {
    home: Option<Utf8PathBuf>,
    data_path: Option<Utf8PathBuf>,
    toolbox_version: Option<String>,
}

impl MarvinEnv {
    /// Capture the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let env = Self {
            home: read(HOME_VAR).map(Utf8PathBuf::from),
            data_path: read(DATA_PATH_VAR).map(Utf8PathBuf::from),
            toolbox_version: read(TOOLBOX_VERSION_VAR),
        };
        debug!(
            home = ?env.home,
            data_path = ?env.data_path,
            toolbox_version = ?env.toolbox_version,
            "Loaded Marvin environment"
        );
        env
    }

    /// Marvin home, if set
    pub fn home(&self) -> Option<&Utf8Path> {
        self.home.as_deref()
    }

    /// Data directory, if set
    pub fn data_path(&self) -> Option<&Utf8Path> {
        self.data_path.as_deref()
    }

    /// Toolbox version, if set
    pub fn toolbox_version(&self) -> Option<&str> {
        self.toolbox_version.as_deref()
    }

    /// Marvin home, failing when it is not configured or not a directory
    pub fn require_home(&self) -> Result<&Utf8Path> {
        let home = self.home().ok_or_else(|| {
            Error::missing_env(
                HOME_VAR,
                "Point it at the directory that holds your Marvin engines.",
            )
        })?;
        if !home.is_dir() {
            return Err(Error::invalid_env(
                HOME_VAR,
                format!("{} is not a directory", home),
            ));
        }
        Ok(home)
    }

    /// Data directory, failing when it is not configured
    ///
    /// The path itself is not checked: a dangling data link is allowed.
    pub fn require_data_path(&self) -> Result<&Utf8Path> {
        self.data_path().ok_or_else(|| {
            Error::missing_env(
                DATA_PATH_VAR,
                "Point it at the directory that holds your engine datasets.",
            )
        })
    }
}
