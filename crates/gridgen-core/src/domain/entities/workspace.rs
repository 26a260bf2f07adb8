use std::collections::BTreeMap;

use crate::domain::{
    entities::{common::RelativePath, options::AmbientDefaults},
    value_objects::Style,
};

/// Whether a workspace project is an application or a library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectType {
    #[default]
    Application,
    Library,
}

/// Component-generation defaults declared in the workspace manifest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentDefaults {
    pub style: Option<Style>,
    pub inline_style: Option<bool>,
    pub inline_template: Option<bool>,
    pub skip_tests: Option<bool>,
    pub flat: Option<bool>,
    pub prefix: Option<String>,
}

impl ComponentDefaults {
    /// Fill every unset field from `fallback`.
    pub fn or(self, fallback: &ComponentDefaults) -> Self {
        Self {
            style: self.style.or(fallback.style),
            inline_style: self.inline_style.or(fallback.inline_style),
            inline_template: self.inline_template.or(fallback.inline_template),
            skip_tests: self.skip_tests.or(fallback.skip_tests),
            flat: self.flat.or(fallback.flat),
            prefix: self.prefix.or_else(|| fallback.prefix.clone()),
        }
    }
}

/// One project of the host workspace.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDefinition {
    pub name: String,
    pub root: RelativePath,
    pub source_root: Option<RelativePath>,
    pub project_type: ProjectType,
    pub prefix: Option<String>,
    pub component_defaults: ComponentDefaults,
}

impl ProjectDefinition {
    /// Directory new components land in when no `path` is given.
    pub fn default_component_path(&self) -> RelativePath {
        let source_root = self
            .source_root
            .clone()
            .unwrap_or_else(|| self.root.join("src").unwrap_or_else(|_| self.root.clone()));
        let leaf = match self.project_type {
            ProjectType::Application => "app",
            ProjectType::Library => "lib",
        };
        source_root.join(leaf).unwrap_or(source_root)
    }

    /// The ambient layer this project contributes to option merging.
    pub fn ambient_defaults(&self) -> AmbientDefaults {
        let defaults = &self.component_defaults;
        AmbientDefaults {
            project: Some(self.name.clone()),
            path: Some(self.default_component_path()),
            prefix: defaults.prefix.clone().or_else(|| self.prefix.clone()),
            style: defaults.style,
            inline_style: defaults.inline_style,
            inline_template: defaults.inline_template,
            skip_tests: defaults.skip_tests,
            flat: defaults.flat,
        }
    }
}

/// Domain view of the workspace manifest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workspace {
    pub default_project: Option<String>,
    pub projects: BTreeMap<String, ProjectDefinition>,
}

impl Workspace {
    pub fn project(&self, name: &str) -> Option<&ProjectDefinition> {
        self.projects.get(name)
    }

    pub fn project_names(&self) -> impl Iterator<Item = &str> {
        self.projects.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(source_root: Option<&str>, project_type: ProjectType) -> ProjectDefinition {
        ProjectDefinition {
            name: "material".into(),
            root: RelativePath::try_new("projects/material").unwrap(),
            source_root: source_root.map(|s| RelativePath::try_new(s).unwrap()),
            project_type,
            prefix: Some("mat".into()),
            component_defaults: ComponentDefaults::default(),
        }
    }

    #[test]
    fn application_components_go_under_app() {
        let p = project(Some("projects/material/src"), ProjectType::Application);
        assert_eq!(p.default_component_path().to_string(), "projects/material/src/app");
    }

    #[test]
    fn library_components_go_under_lib() {
        let p = project(Some("projects/material/src"), ProjectType::Library);
        assert_eq!(p.default_component_path().to_string(), "projects/material/src/lib");
    }

    #[test]
    fn missing_source_root_uses_root_src() {
        let p = project(None, ProjectType::Application);
        assert_eq!(p.default_component_path().to_string(), "projects/material/src/app");
    }

    #[test]
    fn component_prefix_beats_project_prefix() {
        let mut p = project(None, ProjectType::Application);
        assert_eq!(p.ambient_defaults().prefix.as_deref(), Some("mat"));

        p.component_defaults.prefix = Some("grid".into());
        assert_eq!(p.ambient_defaults().prefix.as_deref(), Some("grid"));
    }

    #[test]
    fn project_level_defaults_override_workspace_level() {
        let project_level = ComponentDefaults {
            style: Some(Style::Scss),
            ..ComponentDefaults::default()
        };
        let workspace_level = ComponentDefaults {
            style: Some(Style::Less),
            skip_tests: Some(true),
            ..ComponentDefaults::default()
        };

        let merged = project_level.or(&workspace_level);
        assert_eq!(merged.style, Some(Style::Scss));
        assert_eq!(merged.skip_tests, Some(true));
    }
}
