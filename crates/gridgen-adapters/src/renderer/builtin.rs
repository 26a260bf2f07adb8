//! Renderer for the grid component templates that ship with gridgen.
//!
//! Template bodies are embedded at compile time. A directory of overrides
//! can replace any of them; files are looked up by these names:
//!
//! ```text
//! templates/
//! ├── component.ts.template
//! ├── component.html.template
//! ├── component.css.template     ← every style except sass
//! ├── component.sass.template
//! └── component.spec.ts.template
//! ```
//!
//! Missing override files fall back to the embedded body.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use gridgen_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::{RenderContext, TemplateKind},
    error::GridgenResult,
};

const COMPONENT: &str = include_str!("../../templates/component.ts.template");
const MARKUP: &str = include_str!("../../templates/component.html.template");
const STYLESHEET: &str = include_str!("../../templates/component.css.template");
const STYLESHEET_SASS: &str = include_str!("../../templates/component.sass.template");
const TEST: &str = include_str!("../../templates/component.spec.ts.template");

/// Renders the embedded templates with `{{VARIABLE}}` substitution.
#[derive(Debug, Clone, Default)]
pub struct BuiltinRenderer {
    overrides: Option<PathBuf>,
}

impl BuiltinRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefer template files found in `dir` over the embedded ones.
    pub fn with_overrides(dir: impl Into<PathBuf>) -> Self {
        Self {
            overrides: Some(dir.into()),
        }
    }

    pub fn overrides(&self) -> Option<&Path> {
        self.overrides.as_deref()
    }

    fn source(kind: TemplateKind, context: &RenderContext) -> (&'static str, &'static str) {
        match kind {
            TemplateKind::Component => ("component.ts.template", COMPONENT),
            TemplateKind::Markup => ("component.html.template", MARKUP),
            TemplateKind::Stylesheet if context.get("STYLE_EXT") == Some("sass") => {
                ("component.sass.template", STYLESHEET_SASS)
            }
            TemplateKind::Stylesheet => ("component.css.template", STYLESHEET),
            TemplateKind::Test => ("component.spec.ts.template", TEST),
        }
    }
}

impl TemplateRenderer for BuiltinRenderer {
    #[instrument(skip_all, fields(kind = %kind))]
    fn render(&self, kind: TemplateKind, context: &RenderContext) -> GridgenResult<String> {
        let (file_name, embedded) = Self::source(kind, context);

        let body = match self.overrides.as_deref().map(|dir| dir.join(file_name)) {
            Some(path) if path.is_file() => {
                debug!(path = %path.display(), "Using template override");
                std::fs::read_to_string(&path).map_err(|e| ApplicationError::RenderingFailed {
                    template: path.display().to_string(),
                    reason: e.to_string(),
                })?
            }
            _ => embedded.to_string(),
        };

        Ok(context.render(&body))
    }
}
