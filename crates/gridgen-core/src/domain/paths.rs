use crate::domain::{
    entities::{common::RelativePath, options::ValidatedOptions, template::TemplateDescriptor},
    error::DomainError,
};

/// A selected template and the file it becomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTemplate {
    pub descriptor: TemplateDescriptor,
    pub path: RelativePath,
}

/// Target paths for one invocation, in template order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub directory: RelativePath,
    pub entries: Vec<ResolvedTemplate>,
}

impl ResolvedPaths {
    pub fn path_of(&self, descriptor: &TemplateDescriptor) -> Option<&RelativePath> {
        self.entries
            .iter()
            .find(|e| e.descriptor == *descriptor)
            .map(|e| &e.path)
    }
}

/// Compute where every selected template is written.
///
/// Deterministic in its inputs; never touches a file tree.
pub fn resolve_paths(
    options: &ValidatedOptions,
    templates: &[TemplateDescriptor],
) -> Result<ResolvedPaths, DomainError> {
    let directory = options.component_dir();

    let entries = templates
        .iter()
        .map(|descriptor| {
            Ok(ResolvedTemplate {
                descriptor: *descriptor,
                path: directory.join(descriptor.file_name(options))?,
            })
        })
        .collect::<Result<Vec<_>, DomainError>>()?;

    Ok(ResolvedPaths { directory, entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        DomainValidator, select_templates,
        entities::options::{AmbientDefaults, GenerateOptions, LibraryDefaults},
        value_objects::Style,
    };

    fn resolve(raw: GenerateOptions) -> Vec<String> {
        let ambient = AmbientDefaults {
            path: Some(RelativePath::try_new("projects/material/src/app").unwrap()),
            ..AmbientDefaults::default()
        };
        let options =
            DomainValidator::validate_options(&raw, &ambient, &LibraryDefaults::default()).unwrap();
        let templates = select_templates(&options);
        resolve_paths(&options, &templates)
            .unwrap()
            .entries
            .into_iter()
            .map(|e| e.path.to_string())
            .collect()
    }

    #[test]
    fn default_layout() {
        assert_eq!(
            resolve(GenerateOptions::new("foo", "material")),
            vec![
                "projects/material/src/app/foo/foo.component.ts",
                "projects/material/src/app/foo/foo.component.html",
                "projects/material/src/app/foo/foo.component.css",
                "projects/material/src/app/foo/foo.component.spec.ts",
            ]
        );
    }

    #[test]
    fn stylesheet_uses_resolved_extension() {
        let raw = GenerateOptions {
            style: Some(Style::Scss),
            ..GenerateOptions::new("fooBar", "material")
        };
        assert!(
            resolve(raw).contains(&"projects/material/src/app/foo-bar/foo-bar.component.scss".to_string())
        );
    }

    #[test]
    fn explicit_path_is_used_verbatim() {
        let raw = GenerateOptions {
            path: Some("libs/grids/src".into()),
            flat: Some(true),
            skip_tests: Some(true),
            inline_template: Some(true),
            inline_style: Some(true),
            ..GenerateOptions::new("orders", "material")
        };
        assert_eq!(resolve(raw), vec!["libs/grids/src/orders.component.ts"]);
    }

    #[test]
    fn same_inputs_same_paths() {
        let a = resolve(GenerateOptions::new("foo", "material"));
        let b = resolve(GenerateOptions::new("foo", "material"));
        assert_eq!(a, b);
    }
}
