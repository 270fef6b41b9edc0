//! Repository initialization

use crate::error::{Error, Result};
use camino::Utf8Path;
use tokio::process::Command;
use tracing::{debug, info};

/// Initialize a git repository in an existing directory
///
/// An existing repository is left alone.
///
/// # Errors
/// Returns error if:
/// - Directory doesn't exist
/// - Git is not installed
/// - Git init fails
pub async fn init_repository(path: &Utf8Path) -> Result<()> {
    info!("Initializing git repository at: {}", path);

    check_git_available().await?;

    if !path.is_dir() {
        return Err(Error::RepoNotFound {
            path: path.to_string(),
        });
    }

    if path.join(".git").exists() {
        debug!("Git repository already exists at: {}", path);
        return Ok(());
    }

    debug!("Running: git init");
    let output = Command::new("git")
        .current_dir(path)
        .arg("init")
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::git_operation(format!("git init failed: {}", stderr.trim())));
    }

    info!("Repository initialized successfully");
    Ok(())
}

/// Check if git is available in PATH
pub async fn check_git_available() -> Result<()> {
    let output = Command::new("git")
        .arg("--version")
        .output()
        .await
        .map_err(|_| Error::GitNotFound)?;

    if !output.status.success() {
        return Err(Error::GitNotFound);
    }

    Ok(())
}
