//! Template set sources

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use std::collections::BTreeSet;
use tracing::debug;
use walkdir::WalkDir;

/// Template sets shipped with the binary
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/templates/"]
struct EmbeddedTemplates;

/// What a template entry is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// Directory to recreate
    Dir,
    /// File and its raw contents
    File(Vec<u8>),
}

/// One path of a template set, relative to the set root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    pub path: Utf8PathBuf,
    pub kind: EntryKind,
}

impl TemplateEntry {
    pub fn is_dir(&self) -> bool {
        matches!(self.kind, EntryKind::Dir)
    }
}

/// Where template sets are read from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TemplateSource {
    /// Sets compiled into the binary
    #[default]
    Embedded,
    /// Directory containing one sub-directory per set
    Directory(Utf8PathBuf),
}

impl TemplateSource {
    /// List every directory and file of a template set
    ///
    /// Directories come before the files they contain.
    pub fn entries(&self, set: &str) -> Result<Vec<TemplateEntry>> {
        let entries = match self {
            Self::Embedded => embedded_entries(set)?,
            Self::Directory(root) => directory_entries(root, set)?,
        };
        debug!("Template set {} has {} entries", set, entries.len());
        Ok(entries)
    }

    fn location(&self) -> String {
        match self {
            Self::Embedded => "embedded templates".to_string(),
            Self::Directory(root) => root.to_string(),
        }
    }
}

fn embedded_entries(set: &str) -> Result<Vec<TemplateEntry>> {
    let prefix = format!("{}/", set);
    let mut dirs = BTreeSet::new();
    let mut files = Vec::new();

    for name in EmbeddedTemplates::iter() {
        let Some(relative) = name.strip_prefix(&prefix) else {
            continue;
        };
        let Some(file) = EmbeddedTemplates::get(&name) else {
            continue;
        };

        let path = Utf8PathBuf::from(relative);
        // rust-embed only stores files; directories are implied by their paths
        for ancestor in path.ancestors().skip(1) {
            if !ancestor.as_str().is_empty() {
                dirs.insert(ancestor.to_path_buf());
            }
        }
        files.push(TemplateEntry {
            path,
            kind: EntryKind::File(file.data.into_owned()),
        });
    }

    if files.is_empty() {
        return Err(Error::template_set_not_found(
            set,
            TemplateSource::Embedded.location(),
        ));
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    let mut entries: Vec<TemplateEntry> = dirs
        .into_iter()
        .map(|path| TemplateEntry {
            path,
            kind: EntryKind::Dir,
        })
        .collect();
    entries.extend(files);
    Ok(entries)
}

fn directory_entries(root: &Utf8Path, set: &str) -> Result<Vec<TemplateEntry>> {
    let set_root = root.join(set);
    if !set_root.is_dir() {
        return Err(Error::template_set_not_found(set, root.as_str()));
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(&set_root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
    {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(&set_root)
            .map_err(|_| Error::invalid_path(entry.path().display().to_string()))?;
        let path = Utf8PathBuf::from_path_buf(relative.to_path_buf())
            .map_err(|p| Error::invalid_path(p.display().to_string()))?;

        let kind = if entry.file_type().is_dir() {
            EntryKind::Dir
        } else {
            EntryKind::File(std::fs::read(entry.path())?)
        };
        entries.push(TemplateEntry { path, kind });
    }

    Ok(entries)
}
