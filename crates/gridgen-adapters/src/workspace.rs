//! Angular workspace manifest reader.
//!
//! Parses `angular.json` (or an Nx-style `workspace.json`) into the domain
//! [`Workspace`]. Only the parts that influence component generation are
//! read:
//!
//! ```json
//! {
//!   "defaultProject": "material",
//!   "schematics": { "@schematics/angular:component": { "style": "scss" } },
//!   "projects": {
//!     "material": {
//!       "root": "projects/material",
//!       "sourceRoot": "projects/material/src",
//!       "projectType": "application",
//!       "prefix": "app",
//!       "schematics": {
//!         "@schematics/angular:component": { "inlineStyle": true }
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! Project-level component options win over workspace-level ones. The
//! legacy spellings `styleext` and `spec: false` are understood.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use gridgen_core::{
    application::{ApplicationError, ports::WorkspaceReader},
    domain::{
        ComponentDefaults, ProjectDefinition, ProjectType, RelativePath, Style, Workspace,
    },
    error::GridgenResult,
};

/// Schematic key whose options become component defaults.
pub const COMPONENT_SCHEMATIC: &str = "@schematics/angular:component";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Manifest {
    #[serde(default)]
    default_project: Option<String>,
    projects: BTreeMap<String, ProjectValue>,
    #[serde(default)]
    schematics: Map<String, Value>,
}

/// Nx lets a project be a bare path to its own `project.json`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProjectValue {
    Path(String),
    Entry(ProjectEntry),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectEntry {
    #[serde(default)]
    root: String,
    source_root: Option<String>,
    project_type: Option<String>,
    prefix: Option<String>,
    #[serde(default)]
    schematics: Map<String, Value>,
}

/// Reads Angular CLI and Nx workspace manifests.
#[derive(Debug, Clone, Copy, Default)]
pub struct AngularWorkspaceReader;

impl AngularWorkspaceReader {
    pub fn new() -> Self {
        Self
    }
}

impl WorkspaceReader for AngularWorkspaceReader {
    fn manifest_names(&self) -> Vec<String> {
        vec!["angular.json".into(), "workspace.json".into()]
    }

    #[instrument(skip_all, fields(manifest = %path))]
    fn parse(&self, path: &RelativePath, content: &str) -> GridgenResult<Workspace> {
        let invalid = |reason: String| ApplicationError::InvalidWorkspace {
            path: path.to_string(),
            reason,
        };

        let manifest: Manifest =
            serde_json::from_str(content).map_err(|e| invalid(e.to_string()))?;
        let workspace_defaults =
            component_defaults(&manifest.schematics).map_err(invalid)?;

        let mut projects = BTreeMap::new();
        for (name, value) in manifest.projects {
            let entry = match value {
                ProjectValue::Entry(entry) => entry,
                ProjectValue::Path(root) => ProjectEntry {
                    root,
                    ..ProjectEntry::default()
                },
            };

            let relative = |raw: &str| {
                RelativePath::try_new(raw)
                    .map_err(|e| invalid(format!("project '{name}': {e}")))
            };
            let root = relative(&entry.root)?;
            let source_root = entry.source_root.as_deref().map(relative).transpose()?;
            let project_type = match entry.project_type.as_deref() {
                Some("library") => ProjectType::Library,
                _ => ProjectType::Application,
            };
            let defaults = component_defaults(&entry.schematics)
                .map_err(|e| invalid(format!("project '{name}': {e}")))?
                .or(&workspace_defaults);

            debug!(project = %name, root = %root, "Project found");
            projects.insert(
                name.clone(),
                ProjectDefinition {
                    name,
                    root,
                    source_root,
                    project_type,
                    prefix: entry.prefix,
                    component_defaults: defaults,
                },
            );
        }

        // a single-project workspace needs no defaultProject
        let default_project = manifest.default_project.or_else(|| match projects.len() {
            1 => projects.keys().next().cloned(),
            _ => None,
        });

        Ok(Workspace {
            default_project,
            projects,
        })
    }
}

fn component_defaults(schematics: &Map<String, Value>) -> Result<ComponentDefaults, String> {
    let Some(options) = schematics.get(COMPONENT_SCHEMATIC).and_then(Value::as_object) else {
        return Ok(ComponentDefaults::default());
    };
    let flag = |key: &str| options.get(key).and_then(Value::as_bool);

    let style = options
        .get("style")
        .or_else(|| options.get("styleext"))
        .and_then(Value::as_str)
        .map(Style::from_str)
        .transpose()
        .map_err(|e| e.to_string())?;

    Ok(ComponentDefaults {
        style,
        inline_style: flag("inlineStyle"),
        inline_template: flag("inlineTemplate"),
        skip_tests: flag("skipTests").or_else(|| flag("spec").map(|spec| !spec)),
        flat: flag("flat"),
        prefix: options
            .get("prefix")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridgen_core::error::GridgenError;

    fn parse(json: &str) -> GridgenResult<Workspace> {
        AngularWorkspaceReader.parse(&RelativePath::try_new("angular.json").unwrap(), json)
    }

    #[test]
    fn reads_projects_and_default_project() {
        let ws = parse(
            r#"{
              "version": 1,
              "defaultProject": "material",
              "projects": {
                "material": {
                  "root": "projects/material",
                  "sourceRoot": "projects/material/src",
                  "projectType": "application",
                  "prefix": "app"
                },
                "grid-lib": { "root": "projects/grid-lib", "projectType": "library" }
              }
            }"#,
        )
        .unwrap();

        assert_eq!(ws.default_project.as_deref(), Some("material"));
        let material = ws.project("material").unwrap();
        assert_eq!(material.default_component_path().to_string(), "projects/material/src/app");
        assert_eq!(material.prefix.as_deref(), Some("app"));
        assert_eq!(
            ws.project("grid-lib").unwrap().default_component_path().to_string(),
            "projects/grid-lib/src/lib"
        );
    }

    #[test]
    fn project_schematics_override_workspace_schematics() {
        let ws = parse(
            r#"{
              "schematics": { "@schematics/angular:component": { "style": "less", "skipTests": true } },
              "projects": {
                "material": {
                  "root": "",
                  "schematics": { "@schematics/angular:component": { "style": "scss" } }
                }
              }
            }"#,
        )
        .unwrap();

        let defaults = &ws.project("material").unwrap().component_defaults;
        assert_eq!(defaults.style, Some(Style::Scss));
        assert_eq!(defaults.skip_tests, Some(true));
    }

    #[test]
    fn legacy_styleext_and_spec_are_understood() {
        let ws = parse(
            r#"{ "projects": { "app": { "root": "",
                 "schematics": { "@schematics/angular:component": { "styleext": "sass", "spec": false } } } } }"#,
        )
        .unwrap();

        let defaults = &ws.project("app").unwrap().component_defaults;
        assert_eq!(defaults.style, Some(Style::Sass));
        assert_eq!(defaults.skip_tests, Some(true));
    }

    #[test]
    fn single_project_becomes_default() {
        let ws = parse(r#"{ "projects": { "only": { "root": "" } } }"#).unwrap();
        assert_eq!(ws.default_project.as_deref(), Some("only"));
    }

    #[test]
    fn nx_path_projects_are_accepted() {
        let ws = parse(r#"{ "projects": { "shop": "apps/shop", "admin": "apps/admin" } }"#).unwrap();
        assert_eq!(ws.project("shop").unwrap().root.to_string(), "apps/shop");
        assert_eq!(ws.default_project, None);
    }

    #[test]
    fn invalid_json_is_invalid_workspace() {
        assert!(matches!(
            parse("{ not json"),
            Err(GridgenError::Application(ApplicationError::InvalidWorkspace { .. }))
        ));
    }

    #[test]
    fn missing_projects_is_invalid_workspace() {
        assert!(matches!(
            parse(r#"{ "version": 1 }"#),
            Err(GridgenError::Application(ApplicationError::InvalidWorkspace { .. }))
        ));
    }

    #[test]
    fn unknown_style_is_invalid_workspace() {
        let result = parse(
            r#"{ "projects": { "app": { "root": "",
                 "schematics": { "@schematics/angular:component": { "style": "stylus2" } } } } }"#,
        );
        assert!(matches!(
            result,
            Err(GridgenError::Application(ApplicationError::InvalidWorkspace { .. }))
        ));
    }
}
