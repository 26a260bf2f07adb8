//! Option records and the three default layers they are merged with.
//!
//! ```text
//! GenerateOptions   (explicit, from the caller)
//!        │ falls back to
//! AmbientDefaults   (workspace manifest, per project)
//!        │ falls back to
//! LibraryDefaults   (built in, overridable by CLI config)
//!        ▼
//! ValidatedOptions  (immutable, fully resolved)
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::common::RelativePath,
    value_objects::{ComponentName, Style},
};

/// Raw options for one `generate` invocation.
///
/// Every field is optional at this level; required-ness is checked by
/// [`crate::domain::DomainValidator`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateOptions {
    pub name: Option<String>,
    pub project: Option<String>,
    pub path: Option<String>,
    pub module: Option<String>,
    pub style: Option<Style>,
    pub inline_style: Option<bool>,
    pub inline_template: Option<bool>,
    pub skip_tests: Option<bool>,
    pub flat: Option<bool>,
    pub prefix: Option<String>,
    pub selector: Option<String>,
    pub export: Option<bool>,
    pub skip_import: Option<bool>,
}

impl GenerateOptions {
    /// Options with only `name` and `project` set.
    pub fn new(name: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            project: Some(project.into()),
            ..Self::default()
        }
    }
}

/// Defaults supplied by the host workspace for one project.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AmbientDefaults {
    /// Project used when the caller names none (`defaultProject`).
    pub project: Option<String>,
    /// Base directory for new components (`<sourceRoot>/app`).
    pub path: Option<RelativePath>,
    pub prefix: Option<String>,
    pub style: Option<Style>,
    pub inline_style: Option<bool>,
    pub inline_template: Option<bool>,
    pub skip_tests: Option<bool>,
    pub flat: Option<bool>,
}

/// The grid library a generated component needs registered in its module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryRegistration {
    /// Symbol added to `@NgModule.imports`.
    pub module_symbol: String,
    /// Import specifier the symbol comes from.
    pub import_specifier: String,
}

impl Default for LibraryRegistration {
    fn default() -> Self {
        Self {
            module_symbol: "PblNgridModule".into(),
            import_specifier: "@pebula/ngrid".into(),
        }
    }
}

/// Last-resort defaults owned by this library.
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryDefaults {
    pub path: RelativePath,
    pub prefix: String,
    pub style: Style,
    pub inline_style: bool,
    pub inline_template: bool,
    pub skip_tests: bool,
    pub flat: bool,
    pub registration: LibraryRegistration,
}

impl Default for LibraryDefaults {
    fn default() -> Self {
        Self {
            path: RelativePath::root()
                .join("src/app")
                .unwrap_or_else(|_| RelativePath::root()),
            prefix: "app".into(),
            style: Style::Css,
            inline_style: false,
            inline_template: false,
            skip_tests: false,
            flat: false,
            registration: LibraryRegistration::default(),
        }
    }
}

/// Fully-resolved options. Produced only by the validator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedOptions {
    pub name: ComponentName,
    pub project: String,
    /// Base directory; the component folder is created inside it unless `flat`.
    pub path: RelativePath,
    pub module: Option<String>,
    pub style: Style,
    pub inline_style: bool,
    pub inline_template: bool,
    pub skip_tests: bool,
    pub flat: bool,
    pub selector: String,
    pub export: bool,
    pub skip_import: bool,
}

impl ValidatedOptions {
    /// Folder that will hold the generated files.
    pub fn component_dir(&self) -> RelativePath {
        if self.flat {
            self.path.clone()
        } else {
            // dasherized names never contain separators or dots
            self.path
                .join(self.name.dasherized())
                .unwrap_or_else(|_| self.path.clone())
        }
    }

    /// Whether the component gets a stylesheet file of its own.
    pub fn has_style_file(&self) -> bool {
        !self.inline_style && self.style.extension().is_some()
    }
}
