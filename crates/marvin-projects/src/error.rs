//! Error types for marvin-projects

use thiserror::Error;

/// Result type alias using marvin-projects's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Scaffolding error types
#[derive(Error, Debug)]
pub enum Error {
    /// Destination directory already exists
    #[error("Project already exists at: {path}")]
    ProjectExists { path: String },

    /// No template set for a project type
    #[error("Could not find template files for \"{project_type}\". Available template sets: {available}")]
    UnknownTemplate {
        project_type: String,
        available: String,
    },

    /// Template set missing from the template source
    #[error("Template set not found: {template} (looked in {location})")]
    TemplateSetNotFound { template: String, location: String },

    /// Template rendering error
    #[error("Failed to render {path}: {message}")]
    TemplateRenderError { path: String, message: String },

    /// Data directory link could not be created
    #[error("Failed to link data directory {target} at {link}: {source}")]
    DataLink {
        target: String,
        link: String,
        #[source]
        source: std::io::Error,
    },

    /// Git operation failed
    #[error("Git operation failed: {message}")]
    GitOperation { message: String },

    /// Git command not found
    #[error("Git command not found. Please ensure git is installed and in PATH")]
    GitNotFound,

    /// Repository directory not found
    #[error("Repository not found at: {path}")]
    RepoNotFound { path: String },

    /// Non UTF-8 path
    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    /// Directory walk error
    #[error("Failed to read template directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a project exists error
    pub fn project_exists(path: impl Into<String>) -> Self {
        Self::ProjectExists { path: path.into() }
    }

    /// Create an unknown template error
    pub fn unknown_template(project_type: impl Into<String>, available: impl Into<String>) -> Self {
        Self::UnknownTemplate {
            project_type: project_type.into(),
            available: available.into(),
        }
    }

    /// Create a template set not found error
    pub fn template_set_not_found(
        template: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self::TemplateSetNotFound {
            template: template.into(),
            location: location.into(),
        }
    }

    /// Create a template render error
    pub fn template_render_error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TemplateRenderError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a git operation error
    pub fn git_operation(message: impl Into<String>) -> Self {
        Self::GitOperation {
            message: message.into(),
        }
    }

    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath { path: path.into() }
    }
}
