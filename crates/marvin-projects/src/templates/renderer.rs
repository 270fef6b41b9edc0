//! Template rendering with Tera

use super::{is_trash, is_verbatim, EntryKind, TemplateEntry};
use crate::error::{Error, Result};
use crate::types::ProjectDescriptor;
use std::error::Error as StdError;
use tera::{Context, Tera};
use tracing::debug;

/// Renders the files of one template set
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Parse every renderable file of a template set
    ///
    /// Trash and files under a `templates` directory are not parsed.
    pub fn from_entries(entries: &[TemplateEntry]) -> Result<Self> {
        let mut templates = Vec::new();

        for entry in entries {
            let EntryKind::File(data) = &entry.kind else {
                continue;
            };
            if is_trash(&entry.path) || is_verbatim(&entry.path) {
                continue;
            }

            let content = std::str::from_utf8(data).map_err(|e| {
                Error::template_render_error(entry.path.as_str(), format!("invalid UTF-8: {}", e))
            })?;
            templates.push((entry.path.as_str(), content));
        }

        let mut tera = Tera::default();
        // Engine sources are not HTML; keep output exactly as written
        tera.autoescape_on(vec![]);
        tera.add_raw_templates(templates)
            .map_err(|e| Error::template_render_error("template set", describe(&e)))?;

        Ok(Self { tera })
    }

    /// Render a template file by its path in the set
    pub fn render(&self, path: &str, context: &Context) -> Result<String> {
        debug!("Rendering template: {}", path);
        self.tera
            .render(path, context)
            .map_err(|e| Error::template_render_error(path, describe(&e)))
    }

    /// Render a one-off template string, such as a directory name
    pub fn render_str(template: &str, context: &Context) -> Result<String> {
        Tera::one_off(template, context, false)
            .map_err(|e| Error::template_render_error(template, describe(&e)))
    }
}

/// Build the `{project, maintainer}` rendering context
pub fn project_context(descriptor: &ProjectDescriptor) -> Context {
    let mut context = Context::new();
    context.insert("project", descriptor);
    context.insert("maintainer", &descriptor.maintainer);
    context
}

/// Tera errors keep the useful part in their source chain
fn describe(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
