//! Version information for the marvin CLI

use serde::{Deserialize, Serialize};

const BANNER: &str = r"
  __  __    _    ______     _____ _   _
 |  \/  |  / \  |  _ \ \   / /_ _| \ | |
 | |\/| | / _ \ | |_) \ \ / / | ||  \| |
 | |  | |/ ___ \|  _ < \ V /  | || |\  |
 |_|  |_/_/   \_\_| \_\ \_/  |___|_| \_|
";

/// Version information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Semantic version
    pub version: String,

    /// Git commit SHA (short)
    pub commit: Option<String>,

    /// Target triple
    pub target: Option<String>,
}

impl VersionInfo {
    /// Create version info for current build
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            commit: option_env!("GIT_SHA").map(String::from),
            target: option_env!("TARGET").map(String::from),
        }
    }

    /// Format as display string
    pub fn display(&self) -> String {
        let mut parts = vec![format!("marvin {}", self.version)];

        if let Some(commit) = &self.commit {
            parts.push(format!("({})", commit));
        }

        if let Some(target) = &self.target {
            parts.push(target.clone());
        }

        parts.join(" ")
    }

    /// ASCII banner followed by the version line
    pub fn banner(&self) -> String {
        format!("{}\n{}", BANNER.trim_start_matches('\n'), self.display())
    }
}

impl std::fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}
