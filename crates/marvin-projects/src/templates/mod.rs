//! Project template sets
//!
//! A template set is a directory tree. Its files are either rendered with
//! Tera or, when they sit under a `templates` directory, copied as they are
//! (those are the engine's own runtime templates). Sets come from the copy
//! embedded in the binary or from a directory on disk.
//!
//! - `source`: list the entries of a template set
//! - `renderer`: render entries with the project context

pub mod renderer;
pub mod source;

pub use renderer::TemplateRenderer;
pub use source::{EntryKind, TemplateEntry, TemplateSource};

use camino::Utf8Path;

/// Directory holding files that are copied without rendering
pub const VERBATIM_DIR: &str = "templates";

/// Placeholder directories renamed after rendering: (placeholder, new name template)
pub const RENAME_DIRS: &[(&str, &str)] = &[("project_package", "{{ project.package }}")];

/// True for editor and interpreter leftovers that are never copied
pub fn is_trash(path: &Utf8Path) -> bool {
    match path.file_name() {
        Some(".DS_Store") => true,
        Some(_) => matches!(path.extension(), Some("pyc") | Some("pyo")),
        None => false,
    }
}

/// True for files inside a `templates` subtree
pub fn is_verbatim(path: &Utf8Path) -> bool {
    path.parent()
        .map(|parent| parent.components().any(|c| c.as_str() == VERBATIM_DIR))
        .unwrap_or(false)
}
