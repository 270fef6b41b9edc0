//! Core types for engine project generation

use crate::naming;
use camino::Utf8PathBuf;
use serde::Serialize;
use std::fmt;

/// Kind of project being generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    /// Python engine
    PythonEngine,
    /// Python engine with AutoML
    AutomlEngine,
    /// Shared library (no template set ships for it)
    Lib,
}

impl ProjectType {
    /// Get all project types
    pub fn all() -> Vec<Self> {
        vec![Self::PythonEngine, Self::AutomlEngine, Self::Lib]
    }

    /// Engine type for the AutoML choice
    pub fn engine(automl: bool) -> Self {
        if automl {
            Self::AutomlEngine
        } else {
            Self::PythonEngine
        }
    }

    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PythonEngine => "python-engine",
            Self::AutomlEngine => "automl-engine",
            Self::Lib => "lib",
        }
    }

    /// Name of the template set this type is generated from
    ///
    /// Both engine types share the `python-engine` set.
    pub fn template_set(&self) -> Option<&'static str> {
        match self {
            Self::PythonEngine | Self::AutomlEngine => Some("python-engine"),
            Self::Lib => None,
        }
    }

    /// Types that have a template set, comma separated
    pub fn available() -> String {
        Self::all()
            .into_iter()
            .filter(|t| t.template_set().is_some())
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Project maintainer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Maintainer {
    pub name: String,
    pub email: String,
}

/// Everything `engine-generate` was asked for
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Project name as typed by the user
    pub name: String,
    /// Short description
    pub description: String,
    /// Maintainer
    pub maintainer: Maintainer,
    /// Package name; empty means derive it from the name
    pub package: String,
    /// Directory the project directory is created in
    pub dest_root: Utf8PathBuf,
    /// Kind of project
    pub project_type: ProjectType,
    /// Directory linked as `notebooks/data`
    pub data_path: Utf8PathBuf,
    /// Toolbox version made available to templates
    pub toolbox_version: Option<String>,
    /// Python interpreter for the engine environment
    pub interpreter: String,
    /// Skip `git init`
    pub skip_git: bool,
}

/// Values the templates are rendered with, exposed as `project`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDescriptor {
    /// Slugified project name
    pub name: String,
    pub description: String,
    /// Python package name
    pub package: String,
    pub toolbox_version: Option<String>,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    /// Exposed to templates separately as `maintainer`
    #[serde(skip)]
    pub maintainer: Maintainer,
}

impl ProjectDescriptor {
    /// Derive the descriptor for a request
    pub fn from_request(request: &GenerateRequest) -> Self {
        Self {
            name: naming::slugify(&request.name),
            description: request.description.clone(),
            package: naming::package_name(
                &request.name,
                &request.package,
                request.project_type,
            ),
            toolbox_version: request.toolbox_version.clone(),
            project_type: request.project_type,
            maintainer: request.maintainer.clone(),
        }
    }

    /// Name of the project directory
    pub fn dir_name(&self) -> String {
        naming::dir_name(&self.package, self.project_type)
    }
}
