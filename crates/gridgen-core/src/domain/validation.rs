use crate::domain::{
    entities::{
        common::RelativePath,
        mutation::MutationPlan,
        options::{AmbientDefaults, GenerateOptions, LibraryDefaults, ValidatedOptions},
    },
    error::DomainError,
    value_objects::ComponentName,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    /// Fail fast when `name` is absent or blank.
    pub fn require_name(raw: &GenerateOptions) -> Result<&str, DomainError> {
        match raw.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(DomainError::MissingRequiredOption { option: "name" }),
        }
    }

    /// Explicit project, else the workspace default project.
    pub fn resolve_project<'a>(
        raw: &'a GenerateOptions,
        default_project: Option<&'a str>,
    ) -> Result<&'a str, DomainError> {
        raw.project
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .or(default_project)
            .ok_or(DomainError::MissingRequiredOption { option: "project" })
    }

    /// Merge the three option layers and validate the result.
    ///
    /// Every field falls back explicit → ambient → library.
    pub fn validate_options(
        raw: &GenerateOptions,
        ambient: &AmbientDefaults,
        library: &LibraryDefaults,
    ) -> Result<ValidatedOptions, DomainError> {
        let full_name = Self::require_name(raw)?;
        let project = Self::resolve_project(raw, ambient.project.as_deref())?.to_string();

        // `admin/users` → base path gains `admin`, component is `users`
        let (name_dir, leaf) = match full_name.rsplit_once('/') {
            Some((dir, leaf)) => (Some(dir), leaf),
            None => (None, full_name),
        };
        let name = ComponentName::parse(leaf)?;

        let base = match raw.path.as_deref() {
            Some(path) => RelativePath::try_new(path).map_err(|e| DomainError::InvalidOption {
                option: "path",
                reason: e.to_string(),
            })?,
            None => ambient.path.clone().unwrap_or_else(|| library.path.clone()),
        };
        let path = match name_dir {
            Some(dir) => base.join(dir).map_err(|e| DomainError::InvalidOption {
                option: "name",
                reason: e.to_string(),
            })?,
            None => base,
        };

        let prefix = raw
            .prefix
            .clone()
            .or_else(|| ambient.prefix.clone())
            .unwrap_or_else(|| library.prefix.clone());

        let selector = match raw.selector.as_deref().map(str::trim) {
            Some(selector) if !selector.is_empty() => selector.to_string(),
            _ if prefix.trim().is_empty() => name.dasherized(),
            _ => format!("{}-{}", prefix.trim(), name.dasherized()),
        };

        Ok(ValidatedOptions {
            name,
            project,
            path,
            module: raw.module.clone().filter(|m| !m.trim().is_empty()),
            style: raw.style.or(ambient.style).unwrap_or(library.style),
            inline_style: raw
                .inline_style
                .or(ambient.inline_style)
                .unwrap_or(library.inline_style),
            inline_template: raw
                .inline_template
                .or(ambient.inline_template)
                .unwrap_or(library.inline_template),
            skip_tests: raw
                .skip_tests
                .or(ambient.skip_tests)
                .unwrap_or(library.skip_tests),
            flat: raw.flat.or(ambient.flat).unwrap_or(library.flat),
            selector,
            export: raw.export.unwrap_or(false),
            skip_import: raw.skip_import.unwrap_or(false),
        })
    }

    pub fn validate_plan(plan: &MutationPlan) -> Result<(), DomainError> {
        plan.validate()
    }
}
