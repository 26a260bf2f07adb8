//! Domain value objects: Style, ComponentName.
//!
//! # Design
//!
//! These are pure value types: equality-by-value, no identity, validated on
//! construction. Casing derivations live with `ComponentName` because every
//! generated file name, class name, and selector is derived from it.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Style ────────────────────────────────────────────────────────────────────

/// Stylesheet flavour of the generated component.
///
/// `None` means the component gets no stylesheet at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Css,
    Scss,
    Sass,
    Less,
    Styl,
    None,
}

impl Style {
    pub const ALL: [Style; 6] = [
        Self::Css,
        Self::Scss,
        Self::Sass,
        Self::Less,
        Self::Styl,
        Self::None,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Scss => "scss",
            Self::Sass => "sass",
            Self::Less => "less",
            Self::Styl => "styl",
            Self::None => "none",
        }
    }

    /// File extension of the stylesheet, `None` when no stylesheet exists.
    pub const fn extension(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            other => Some(other.as_str()),
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "css" => Ok(Self::Css),
            "scss" => Ok(Self::Scss),
            "sass" => Ok(Self::Sass),
            "less" => Ok(Self::Less),
            "styl" | "stylus" => Ok(Self::Styl),
            "none" => Ok(Self::None),
            other => Err(DomainError::InvalidOption {
                option: "style",
                reason: format!("unknown style '{other}' (expected css, scss, sass, less, styl or none)"),
            }),
        }
    }
}

// ── ComponentName ────────────────────────────────────────────────────────────

/// The last segment of the requested component name.
///
/// Invariant: non-empty, starts with an ASCII letter, and only contains
/// ASCII letters, digits, `-` and `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ComponentName(String);

impl ComponentName {
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        let trimmed = raw.trim();

        let Some(first) = trimmed.chars().next() else {
            return Err(DomainError::MissingRequiredOption { option: "name" });
        };

        if !first.is_ascii_alphabetic() {
            return Err(DomainError::InvalidOption {
                option: "name",
                reason: format!("'{trimmed}' must start with a letter"),
            });
        }

        if let Some(bad) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(DomainError::InvalidOption {
                option: "name",
                reason: format!("'{trimmed}' contains the character '{bad}'"),
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `FooBar` → `foo-bar`. Used for file and folder names.
    pub fn dasherized(&self) -> String {
        split_words(&self.0).join("-")
    }

    /// `foo-bar` → `FooBar`. Used for class names.
    pub fn classified(&self) -> String {
        split_words(&self.0).iter().map(|w| capitalize(w)).collect()
    }

    /// `foo-bar` → `fooBar`.
    pub fn camelized(&self) -> String {
        let mut words = split_words(&self.0).into_iter();
        let mut out = words.next().unwrap_or_default();
        for word in words {
            out.push_str(&capitalize(&word));
        }
        out
    }

    /// `foo` → `FooComponent`.
    pub fn component_class(&self) -> String {
        format!("{}Component", self.classified())
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ComponentName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ComponentName> for String {
    fn from(name: ComponentName) -> Self {
        name.0
    }
}

// ============================================================================
// String Case Conversion Helpers
// ============================================================================

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(word.len());
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// Split an identifier into lowercase words.
///
/// 1. `_`, `-` and whitespace always split
/// 2. `aB` splits between `a` and `B`
/// 3. `HTTPRequest` splits between `P` and `R`
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(next) = chars.peek() {
            if c.is_lowercase() && next.is_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }

            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_lowercase())
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_parses_case_insensitively() {
        assert_eq!(Style::from_str("SCSS").unwrap(), Style::Scss);
        assert_eq!(Style::from_str("stylus").unwrap(), Style::Styl);
        assert!(Style::from_str("sss").is_err());
    }

    #[test]
    fn style_none_has_no_extension() {
        assert_eq!(Style::None.extension(), None);
        assert_eq!(Style::Less.extension(), Some("less"));
    }

    #[test]
    fn component_name_casings() {
        let name = ComponentName::parse("userList").unwrap();
        assert_eq!(name.dasherized(), "user-list");
        assert_eq!(name.classified(), "UserList");
        assert_eq!(name.camelized(), "userList");
        assert_eq!(name.component_class(), "UserListComponent");
    }

    #[test]
    fn dashed_name_classifies() {
        let name = ComponentName::parse("order-history_grid").unwrap();
        assert_eq!(name.dasherized(), "order-history-grid");
        assert_eq!(name.classified(), "OrderHistoryGrid");
    }

    #[test]
    fn acronyms_split_before_next_word() {
        let name = ComponentName::parse("HTMLTable").unwrap();
        assert_eq!(name.dasherized(), "html-table");
    }

    #[test]
    fn blank_name_is_missing() {
        assert_eq!(
            ComponentName::parse("   "),
            Err(DomainError::MissingRequiredOption { option: "name" })
        );
    }

    #[test]
    fn name_must_start_with_letter() {
        assert!(matches!(
            ComponentName::parse("1grid"),
            Err(DomainError::InvalidOption { option: "name", .. })
        ));
    }

    #[test]
    fn name_rejects_punctuation() {
        assert!(ComponentName::parse("my.grid").is_err());
        assert!(ComponentName::parse("my grid").is_err());
    }
}
