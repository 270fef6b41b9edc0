//! Naming rules for generated projects
//!
//! A project name becomes three things: a slug (`project.name`), a Python
//! package (`marvin_<slug>_engine`) and a directory (`<slug>-engine`).

use crate::types::ProjectType;
use deunicode::deunicode;

/// Characters that separate slug words, in addition to whitespace
const SEPARATORS: &str = "\t !\"#$%&'()*-/<=>?@[\\]^_`{|},.";

const PACKAGE_PREFIX: &str = "marvin";

/// Turn arbitrary text into a lowercase ASCII identifier joined with `_`
///
/// Applying it twice gives the same result as applying it once.
pub fn slugify(text: &str) -> String {
    deunicode(text)
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || SEPARATORS.contains(c))
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Derive the Python package name
///
/// `package` wins over `name` unless it is empty.
pub fn package_name(name: &str, package: &str, project_type: ProjectType) -> String {
    let source = if package.is_empty() { name } else { package };
    let mut package = slugify(source);

    if !package.starts_with(PACKAGE_PREFIX) {
        package = format!("{}_{}", PACKAGE_PREFIX, package);
    }

    if project_type == ProjectType::Lib {
        if let Some(stripped) = package.strip_suffix("lib") {
            package = stripped.to_string();
        }
    }

    let mut package = package.trim_matches('_').to_string();

    if project_type.template_set().is_some() && !package.ends_with("engine") {
        package.push_str("_engine");
    }

    package
}

/// Derive the project directory name from a package name
pub fn dir_name(package: &str, project_type: ProjectType) -> String {
    let dir = package.replace('_', "-");
    let dir = dir.strip_prefix(PACKAGE_PREFIX).unwrap_or(&dir);
    let mut dir = dir.trim_matches('-').to_string();

    if project_type == ProjectType::Lib && !dir.ends_with("lib") {
        dir.push_str("-lib");
    }

    dir
}
