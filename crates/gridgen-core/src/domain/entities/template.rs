//! Template catalog and rendering context.
//!
//! A grid component is made of up to four files. The catalog below is the
//! static list of those files; [`crate::domain::select_templates`] filters it
//! per invocation and [`RenderContext`] carries the variables the template
//! bodies are rendered with.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::domain::entities::options::ValidatedOptions;

/// The four kinds of generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    /// The `@Component` class (always generated).
    Component,
    /// External HTML template.
    Markup,
    /// External stylesheet.
    Stylesheet,
    /// Unit test.
    Test,
}

impl TemplateKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::Markup => "markup",
            Self::Stylesheet => "stylesheet",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the template catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TemplateDescriptor {
    pub kind: TemplateKind,
    /// File suffix after the dasherized component name. The stylesheet's
    /// suffix stops at `.component.`; its extension comes from the style.
    pub suffix: &'static str,
}

impl TemplateDescriptor {
    pub const COMPONENT: Self = Self {
        kind: TemplateKind::Component,
        suffix: ".component.ts",
    };
    pub const MARKUP: Self = Self {
        kind: TemplateKind::Markup,
        suffix: ".component.html",
    };
    pub const STYLESHEET: Self = Self {
        kind: TemplateKind::Stylesheet,
        suffix: ".component.",
    };
    pub const TEST: Self = Self {
        kind: TemplateKind::Test,
        suffix: ".component.spec.ts",
    };

    /// The full catalog, in generation order.
    pub const CATALOG: [Self; 4] = [Self::COMPONENT, Self::MARKUP, Self::STYLESHEET, Self::TEST];

    /// File name for a component, e.g. `foo.component.scss`.
    pub fn file_name(&self, options: &ValidatedOptions) -> String {
        let base = options.name.dasherized();
        match self.kind {
            TemplateKind::Stylesheet => format!(
                "{base}{}{}",
                self.suffix,
                options.style.extension().unwrap_or("css")
            ),
            _ => format!("{base}{}", self.suffix),
        }
    }
}

/// Variables available to template bodies as `{{NAME}}` placeholders.
///
/// | Variable          | Example                  |
/// |-------------------|--------------------------|
/// | `NAME`            | `orderHistory`           |
/// | `NAME_DASHERIZED` | `order-history`          |
/// | `NAME_CLASSIFIED` | `OrderHistory`           |
/// | `NAME_CAMELIZED`  | `orderHistory`           |
/// | `COMPONENT_CLASS` | `OrderHistoryComponent`  |
/// | `SELECTOR`        | `app-order-history`      |
/// | `STYLE_EXT`       | `scss` (empty for none)  |
#[derive(Debug, Clone)]
pub struct RenderContext {
    variables: HashMap<String, String>,
}

impl RenderContext {
    pub fn new(options: &ValidatedOptions) -> Self {
        let name = &options.name;
        let mut vars = HashMap::new();

        vars.insert("NAME".to_string(), name.as_str().to_string());
        vars.insert("NAME_DASHERIZED".to_string(), name.dasherized());
        vars.insert("NAME_CLASSIFIED".to_string(), name.classified());
        vars.insert("NAME_CAMELIZED".to_string(), name.camelized());
        vars.insert("COMPONENT_CLASS".to_string(), name.component_class());
        vars.insert("SELECTOR".to_string(), options.selector.clone());
        vars.insert(
            "STYLE_EXT".to_string(),
            options.style.extension().unwrap_or_default().to_string(),
        );

        Self { variables: vars }
    }

    /// Add or override a variable.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// Add `TEMPLATE_BINDING` and `STYLES_BINDING`, the `@Component`
    /// metadata lines that point at (or inline) markup and styles.
    ///
    /// `inline_markup` is embedded only when the template is inlined.
    pub fn with_component_bindings(self, options: &ValidatedOptions, inline_markup: &str) -> Self {
        let base = options.name.dasherized();

        let template = if options.inline_template {
            let body: String = inline_markup
                .lines()
                .map(|line| match line {
                    "" => "\n".to_string(),
                    _ => format!("    {line}\n"),
                })
                .collect();
            format!("template: `\n{body}  `")
        } else {
            format!("templateUrl: './{base}{}'", TemplateDescriptor::MARKUP.suffix)
        };

        let styles = if options.inline_style {
            "\n  styles: [],".to_string()
        } else if let Some(ext) = options.style.extension() {
            format!(
                "\n  styleUrls: ['./{base}{}{ext}'],",
                TemplateDescriptor::STYLESHEET.suffix
            )
        } else {
            String::new()
        };

        self.with_variable("TEMPLATE_BINDING", template)
            .with_variable("STYLES_BINDING", styles)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(|s| s.as_str())
    }

    /// Replace every `{{VARIABLE}}` placeholder in one left-to-right pass.
    ///
    /// Unknown placeholders are left untouched, and substituted values are
    /// never scanned again.
    pub fn render(&self, template: &str) -> String {
        let mut result = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            result.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let known = after
                .find("}}")
                .and_then(|end| self.variables.get(&after[..end]).map(|value| (end, value)));
            match known {
                Some((end, value)) => {
                    result.push_str(value);
                    rest = &after[end + 2..];
                }
                None => {
                    result.push_str("{{");
                    rest = after;
                }
            }
        }
        result.push_str(rest);
        result
    }
}
