//! Core domain layer for gridgen.
//!
//! Pure planning logic: option validation, template selection, path
//! resolution and module registration. Nothing in here touches a file tree;
//! reading the workspace and applying a plan happen behind the ports defined
//! in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No I/O**: every input arrives as a value, every output is a value
//! - **Deterministic**: the same inputs always produce the same plan
//! - **Few external crates**: thiserror, serde and uuid only
pub mod entities;
pub mod error;
pub mod value_objects;

mod module_rewriter;
mod paths;
mod selection;
mod validation;

pub use entities::{
    common::RelativePath,
    mutation::{FileMutation, MutationPlan, apply_insertions},
    options::{
        AmbientDefaults, GenerateOptions, LibraryDefaults, LibraryRegistration, ValidatedOptions,
    },
    template::{RenderContext, TemplateDescriptor, TemplateKind},
    workspace::{ComponentDefaults, ProjectDefinition, ProjectType, Workspace},
};
pub use error::{DomainError, ErrorCategory};
pub use module_rewriter::{ModuleRewriter, RegistrationRequest};
pub use paths::{ResolvedPaths, ResolvedTemplate, resolve_paths};
pub use selection::select_templates;
pub use validation::DomainValidator;
pub use value_objects::{ComponentName, Style};

#[cfg(test)]
mod tests {
    use super::*;

    fn validated(raw: GenerateOptions) -> ValidatedOptions {
        let ambient = AmbientDefaults {
            project: Some("material".into()),
            path: Some(RelativePath::try_new("projects/material/src/app").unwrap()),
            ..AmbientDefaults::default()
        };
        DomainValidator::validate_options(&raw, &ambient, &LibraryDefaults::default()).unwrap()
    }

    #[test]
    fn selection_and_resolution_agree() {
        let options = validated(GenerateOptions::new("foo", "material"));
        let templates = select_templates(&options);
        let paths = resolve_paths(&options, &templates).unwrap();

        assert_eq!(paths.entries.len(), templates.len());
        assert_eq!(
            paths.path_of(&TemplateDescriptor::COMPONENT).map(ToString::to_string),
            Some("projects/material/src/app/foo/foo.component.ts".to_string())
        );
    }

    #[test]
    fn resolved_component_registers_with_relative_specifier() {
        let options = validated(GenerateOptions::new("foo", "material"));
        let paths = resolve_paths(&options, &select_templates(&options)).unwrap();
        let component = paths.path_of(&TemplateDescriptor::COMPONENT).unwrap().clone();

        let module = "import { NgModule } from '@angular/core';\n\n@NgModule({\n  declarations: [\n    AppComponent\n  ]\n})\nexport class AppModule {}\n";
        let edits = ModuleRewriter::plan(
            &RelativePath::try_new("projects/material/src/app/app.module.ts").unwrap(),
            module,
            &RegistrationRequest {
                component_class: options.name.component_class(),
                component_path: component,
                export: false,
                library: None,
            },
        )
        .unwrap();

        let texts: Vec<_> = edits
            .iter()
            .filter_map(|m| match m {
                FileMutation::Insert { text, .. } => Some(text.as_str()),
                FileMutation::Create { .. } => None,
            })
            .collect();
        assert!(texts.contains(&"import { FooComponent } from './foo/foo.component';\n"));
    }

    #[test]
    fn render_context_carries_selector() {
        let options = validated(GenerateOptions::new("orderList", "material"));
        let ctx = RenderContext::new(&options);
        assert_eq!(ctx.get("SELECTOR"), Some("app-order-list"));
        assert_eq!(ctx.get("COMPONENT_CLASS"), Some("OrderListComponent"));
    }
}
