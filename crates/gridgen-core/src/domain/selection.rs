use tracing::debug;

use crate::domain::entities::{
    options::ValidatedOptions,
    template::{TemplateDescriptor, TemplateKind},
};

/// Filter the template catalog for one invocation.
///
/// The component definition is always included; the others drop out when
/// their content is inlined, disabled, or skipped.
pub fn select_templates(options: &ValidatedOptions) -> Vec<TemplateDescriptor> {
    let selected: Vec<TemplateDescriptor> = TemplateDescriptor::CATALOG
        .into_iter()
        .filter(|descriptor| match descriptor.kind {
            TemplateKind::Component => true,
            TemplateKind::Markup => !options.inline_template,
            TemplateKind::Stylesheet => options.has_style_file(),
            TemplateKind::Test => !options.skip_tests,
        })
        .collect();
    debug!(
        selected = ?selected.iter().map(|d| d.kind).collect::<Vec<_>>(),
        "Templates selected"
    );
    selected
}
