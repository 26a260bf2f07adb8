//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the [`LibraryDefaults`]
//! derived from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `GRIDGEN_<SECTION>__<KEY>`, e.g.
//!    `GRIDGEN_DEFAULTS__STYLE=scss`
//! 3. The file given with `--config`
//! 4. `.gridgen.toml` in the current directory
//! 5. `config.toml` in the user configuration directory
//! 6. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use gridgen_core::domain::{LibraryDefaults, LibraryRegistration, Style};

use crate::cli::OutputFormat;

/// Name of the per-directory configuration file.
pub const LOCAL_CONFIG_FILE: &str = ".gridgen.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Last-resort component options, used when neither the command line
    /// nor the workspace manifest sets them.
    pub defaults: Defaults,
    /// Grid library registered in the target module.
    pub library: LibraryConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// Template settings.
    pub templates: TemplateConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub style: Style,
    pub prefix: String,
    pub skip_tests: bool,
    pub inline_style: bool,
    pub inline_template: bool,
    pub flat: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        let library = LibraryDefaults::default();
        Self {
            style: library.style,
            prefix: library.prefix,
            skip_tests: library.skip_tests,
            inline_style: library.inline_style,
            inline_template: library.inline_template,
            flat: library.flat,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    pub module_symbol: String,
    pub import_specifier: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        let registration = LibraryRegistration::default();
        Self {
            module_symbol: registration.module_symbol,
            import_specifier: registration.import_specifier,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// Used when `--output-format` is left at `auto`.
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory of `*.template` files overriding the embedded ones.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration, layering files and environment over the
    /// built-in defaults.
    ///
    /// `config_file` is the path passed via `--config`; unlike the implicit
    /// locations it must exist.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let mut builder = Config::builder()
            .add_source(toml_file(&Self::config_path()).required(false))
            .add_source(toml_file(Path::new(LOCAL_CONFIG_FILE)).required(false));

        if let Some(path) = config_file {
            builder = builder.add_source(toml_file(path).required(true));
        }

        let config: Self = builder
            .add_source(
                Environment::with_prefix("GRIDGEN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Path to the user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.gridgen.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "gridgen", "gridgen")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// The option layer handed to the core service.
    pub fn library_defaults(&self) -> LibraryDefaults {
        LibraryDefaults {
            style: self.defaults.style,
            prefix: self.defaults.prefix.clone(),
            skip_tests: self.defaults.skip_tests,
            inline_style: self.defaults.inline_style,
            inline_template: self.defaults.inline_template,
            flat: self.defaults.flat,
            registration: LibraryRegistration {
                module_symbol: self.library.module_symbol.clone(),
                import_specifier: self.library.import_specifier.clone(),
            },
            ..LibraryDefaults::default()
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        let symbol = &self.library.module_symbol;
        let is_identifier = symbol
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
            && symbol
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
        if !is_identifier {
            bail!("library.module_symbol '{symbol}' is not a valid identifier");
        }
        if self.library.import_specifier.trim().is_empty() {
            bail!("library.import_specifier must not be empty");
        }
        if self.defaults.prefix.trim().is_empty() {
            bail!("defaults.prefix must not be empty");
        }
        Ok(())
    }
}

fn toml_file(path: &Path) -> File<config::FileSourceFile, FileFormat> {
    File::from(path).format(FileFormat::Toml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("gridgen.toml");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn defaults_mirror_library_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.library_defaults(), LibraryDefaults::default());
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
[defaults]
style = "scss"
skip_tests = true

[library]
module_symbol = "MyGridModule"
import_specifier = "@acme/grid"

[templates]
dir = "my-templates"
"#,
        );

        let cfg = AppConfig::load(Some(&path)).unwrap();
        let library = cfg.library_defaults();

        assert_eq!(library.style, Style::Scss);
        assert!(library.skip_tests);
        assert_eq!(library.prefix, "app");
        assert_eq!(library.registration.module_symbol, "MyGridModule");
        assert_eq!(library.registration.import_specifier, "@acme/grid");
        assert_eq!(cfg.templates.dir, Some(PathBuf::from("my-templates")));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn invalid_module_symbol_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[library]\nmodule_symbol = \"not valid\"\n");
        let err = AppConfig::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("module_symbol"));
    }

    #[test]
    fn unknown_style_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[defaults]\nstyle = \"sss\"\n");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn defaults_round_trip_through_toml() {
        let written = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let read: AppConfig = toml::from_str(&written).unwrap();
        assert_eq!(read, AppConfig::default());
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
