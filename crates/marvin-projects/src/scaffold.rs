//! Engine project generation
//!
//! [`Scaffolder::generate`] walks a project through these stages:
//!
//! ```text
//! Start → StructureCreated → FilesRendered → DirsRenamed → DataLinked → [GitInitialized] → Done
//! ```
//!
//! If anything fails before `DataLinked`, a destination directory created by
//! this run is removed again and the failure is returned as
//! [`GenerateOutcome::Failed`] rather than an error. A destination that
//! already existed is never touched. `git init` failures are only reported.

use crate::error::{Error, Result};
use crate::git;
use crate::templates::renderer::project_context;
use crate::templates::{
    is_trash, is_verbatim, EntryKind, TemplateEntry, TemplateRenderer, TemplateSource, RENAME_DIRS,
};
use crate::types::{GenerateRequest, ProjectDescriptor, ProjectType};
use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;
use std::fs;
use std::io;
use tracing::{debug, info, warn};

/// Progress of one generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaffoldStage {
    Start,
    StructureCreated,
    FilesRendered,
    DirsRenamed,
    DataLinked,
    GitInitialized,
    Done,
}

impl fmt::Display for ScaffoldStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::StructureCreated => "structure created",
            Self::FilesRendered => "files rendered",
            Self::DirsRenamed => "directories renamed",
            Self::DataLinked => "data linked",
            Self::GitInitialized => "git initialized",
            Self::Done => "done",
        };
        write!(f, "{}", name)
    }
}

/// What happened to the git repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitStatus {
    Initialized,
    Skipped,
    /// `git init` failed; the project is still usable
    Failed(String),
}

/// Result of a generation that got past pre-flight checks
#[derive(Debug)]
pub enum GenerateOutcome {
    /// Project created
    Created {
        path: Utf8PathBuf,
        package: String,
        git: GitStatus,
    },
    /// Generation failed at `stage`
    Failed {
        path: Utf8PathBuf,
        stage: ScaffoldStage,
        error: Error,
        /// A destination created by this run was removed again
        removed: bool,
    },
}

/// Generates engine projects from a template source
#[derive(Debug, Clone, Default)]
pub struct Scaffolder {
    source: TemplateSource,
}

struct Progress {
    stage: ScaffoldStage,
    created: bool,
}

impl Scaffolder {
    pub fn new(source: TemplateSource) -> Self {
        Self { source }
    }

    /// Destination a request would generate into
    pub fn destination(request: &GenerateRequest) -> Utf8PathBuf {
        let descriptor = ProjectDescriptor::from_request(request);
        request.dest_root.join(descriptor.dir_name())
    }

    /// Generate a project
    ///
    /// Returns `Err` only when nothing was written: the project type has no
    /// template set, or the set cannot be read. Failures after that are
    /// reported through [`GenerateOutcome::Failed`].
    pub async fn generate(&self, request: &GenerateRequest) -> Result<GenerateOutcome> {
        let descriptor = ProjectDescriptor::from_request(request);
        let dest = request.dest_root.join(descriptor.dir_name());

        let set = request.project_type.template_set().ok_or_else(|| {
            Error::unknown_template(request.project_type.as_str(), ProjectType::available())
        })?;
        let entries = self.source.entries(set)?;

        info!(
            "Generating {} {} at {} (interpreter: {})",
            request.project_type, descriptor.package, dest, request.interpreter
        );

        let mut progress = Progress {
            stage: ScaffoldStage::Start,
            created: false,
        };

        let scaffolded = scaffold(
            &descriptor,
            &entries,
            &dest,
            &request.data_path,
            &mut progress,
        );
        if let Err(error) = scaffolded {
            warn!("Generation failed after stage '{}': {}", progress.stage, error);
            let removed = progress.created && rollback(&dest);
            return Ok(GenerateOutcome::Failed {
                path: dest,
                stage: progress.stage,
                error,
                removed,
            });
        }

        let git = if request.skip_git {
            GitStatus::Skipped
        } else {
            match git::init_repository(&dest).await {
                Ok(()) => {
                    progress.stage = ScaffoldStage::GitInitialized;
                    GitStatus::Initialized
                }
                Err(e) => {
                    warn!("Could not initialize repository: {}", e);
                    GitStatus::Failed(e.to_string())
                }
            }
        };

        progress.stage = ScaffoldStage::Done;
        debug!("Reached stage '{}'", progress.stage);
        info!("Project {} generated at {}", descriptor.package, dest);

        Ok(GenerateOutcome::Created {
            path: dest,
            package: descriptor.package,
            git,
        })
    }
}

fn scaffold(
    descriptor: &ProjectDescriptor,
    entries: &[TemplateEntry],
    dest: &Utf8Path,
    data_path: &Utf8Path,
    progress: &mut Progress,
) -> Result<()> {
    create_structure(entries, dest, progress)?;
    progress.stage = ScaffoldStage::StructureCreated;

    let context = project_context(descriptor);
    let written = write_files(entries, dest, &context)?;
    debug!("Wrote {} files", written);
    progress.stage = ScaffoldStage::FilesRendered;

    rename_dirs(dest, &context)?;
    progress.stage = ScaffoldStage::DirsRenamed;

    link_data(dest, data_path)?;
    progress.stage = ScaffoldStage::DataLinked;

    Ok(())
}

fn create_structure(
    entries: &[TemplateEntry],
    dest: &Utf8Path,
    progress: &mut Progress,
) -> Result<()> {
    fs::create_dir(dest).map_err(|e| match e.kind() {
        io::ErrorKind::AlreadyExists => Error::project_exists(dest.as_str()),
        _ => Error::Io(e),
    })?;
    progress.created = true;

    for entry in entries.iter().filter(|e| e.is_dir()) {
        fs::create_dir_all(dest.join(&entry.path))?;
    }
    Ok(())
}

fn write_files(
    entries: &[TemplateEntry],
    dest: &Utf8Path,
    context: &tera::Context,
) -> Result<usize> {
    let renderer = TemplateRenderer::from_entries(entries)?;
    let mut written = 0;

    for entry in entries {
        let EntryKind::File(data) = &entry.kind else {
            continue;
        };
        if is_trash(&entry.path) {
            debug!("Skipping {}", entry.path);
            continue;
        }

        let target = dest.join(&entry.path);
        if is_verbatim(&entry.path) {
            debug!("Copying {} to {}", entry.path, target);
            fs::write(&target, data)?;
        } else {
            debug!("Rendering {} to {}", entry.path, target);
            fs::write(&target, renderer.render(entry.path.as_str(), context)?)?;
        }
        written += 1;
    }

    Ok(written)
}

fn rename_dirs(dest: &Utf8Path, context: &tera::Context) -> Result<()> {
    for (placeholder, template) in RENAME_DIRS {
        let from = dest.join(placeholder);
        let to = dest.join(TemplateRenderer::render_str(template, context)?);
        fs::rename(&from, &to)?;
        debug!("Renamed {} to {}", from, to);
    }
    Ok(())
}

fn link_data(dest: &Utf8Path, data_path: &Utf8Path) -> Result<()> {
    let link = dest.join("notebooks").join("data");
    symlink_dir(data_path, &link).map_err(|source| Error::DataLink {
        target: data_path.to_string(),
        link: link.to_string(),
        source,
    })?;
    debug!("Linked {} to {}", link, data_path);
    Ok(())
}

#[cfg(unix)]
fn symlink_dir(target: &Utf8Path, link: &Utf8Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink_dir(target: &Utf8Path, link: &Utf8Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}

/// Remove a partially generated project, reporting whether it is gone
fn rollback(dest: &Utf8Path) -> bool {
    match fs::remove_dir_all(dest) {
        Ok(()) => {
            info!("Removed {}", dest);
            true
        }
        Err(e) => {
            warn!("Failed to remove {}: {}", dest, e);
            false
        }
    }
}
