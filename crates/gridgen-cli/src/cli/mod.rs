//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use gridgen_core::domain::{GenerateOptions, Style};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "gridgen",
    bin_name = "gridgen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Scaffold data-grid components into Angular workspaces",
    long_about = "gridgen creates a grid component (class, template, stylesheet, \
                  spec) inside an Angular workspace project and registers it in \
                  the nearest NgModule together with the grid library module.",
    after_help = "EXAMPLES:\n\
        \x20 gridgen generate users\n\
        \x20 gridgen g admin/orders --project shop --style scss --export\n\
        \x20 gridgen g reports --dry-run --output-format json\n\
        \x20 gridgen completions bash > /usr/share/bash-completion/completions/gridgen",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a grid component and register it in its module.
    #[command(
        visible_aliases = ["g", "grid"],
        about = "Generate a grid component",
        after_help = "EXAMPLES:\n\
            \x20 gridgen generate users\n\
            \x20 gridgen generate users --inline-template --inline-style\n\
            \x20 gridgen generate orders --module shared/shared.module.ts --export\n\
            \x20 gridgen generate orders --style=none --skip-tests=false"
    )]
    Generate(GenerateArgs),

    /// Initialise a gridgen configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 gridgen init           # user config directory\n\
            \x20 gridgen init --local   # .gridgen.toml in the current directory"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 gridgen completions bash > ~/.local/share/bash-completion/completions/gridgen\n\
            \x20 gridgen completions zsh  > ~/.zfunc/_gridgen\n\
            \x20 gridgen completions fish > ~/.config/fish/completions/gridgen.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the gridgen configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 gridgen config get defaults.style\n\
            \x20 gridgen config list\n\
            \x20 gridgen config path"
    )]
    Config(ConfigCommands),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `gridgen generate`.
///
/// Boolean options are tri-state: absent means "use the workspace or
/// configured default", `--flag` means true and `--flag=false` forces false.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Component name; may contain `/` to nest it below the base path.
    #[arg(value_name = "NAME", help = "Component name, e.g. users or admin/users")]
    pub name: String,

    /// Workspace project to generate into.
    #[arg(long, value_name = "PROJECT", help = "Workspace project (default: defaultProject)")]
    pub project: Option<String>,

    /// Base directory, relative to the workspace root.
    #[arg(long, value_name = "DIR", help = "Base directory (default: <sourceRoot>/app)")]
    pub path: Option<String>,

    /// Module to register the component in.
    #[arg(
        short = 'm',
        long,
        value_name = "MODULE",
        help = "Module file to register in (default: nearest *.module.ts)"
    )]
    pub module: Option<String>,

    /// Stylesheet flavour.
    #[arg(long, value_enum, value_name = "STYLE", help = "Stylesheet flavour")]
    pub style: Option<StyleArg>,

    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        help = "Put styles inside the component class"
    )]
    pub inline_style: Option<bool>,

    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        help = "Put the grid markup inside the component class"
    )]
    pub inline_template: Option<bool>,

    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        help = "Do not create a spec file"
    )]
    pub skip_tests: Option<bool>,

    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        help = "Create files directly in the base directory"
    )]
    pub flat: Option<bool>,

    /// Selector prefix.
    #[arg(short = 'p', long, value_name = "PREFIX", help = "Selector prefix")]
    pub prefix: Option<String>,

    /// Explicit selector, bypassing the prefix.
    #[arg(long, value_name = "SELECTOR", help = "Component selector")]
    pub selector: Option<String>,

    #[arg(long, help = "Also add the component to the module's exports")]
    pub export: bool,

    #[arg(long, help = "Do not register the component in any module")]
    pub skip_import: bool,

    /// Preview what would be written without touching the workspace.
    #[arg(short = 'd', long = "dry-run", help = "Show the plan without writing")]
    pub dry_run: bool,

    /// Overwrite files that already exist (destructive).
    #[arg(long, help = "Overwrite existing component files")]
    pub force: bool,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Skip confirmation")]
    pub yes: bool,

    /// Workspace root.
    #[arg(long, value_name = "DIR", help = "Workspace root (default: current directory)")]
    pub root: Option<PathBuf>,
}

impl GenerateArgs {
    /// Raw option record for the core service.
    pub fn to_options(&self) -> GenerateOptions {
        GenerateOptions {
            name: Some(self.name.clone()),
            project: self.project.clone(),
            path: self.path.clone(),
            module: self.module.clone(),
            style: self.style.map(Style::from),
            inline_style: self.inline_style,
            inline_template: self.inline_template,
            skip_tests: self.skip_tests,
            flat: self.flat,
            prefix: self.prefix.clone(),
            selector: self.selector.clone(),
            export: self.export.then_some(true),
            skip_import: self.skip_import.then_some(true),
        }
    }
}

/// Stylesheet flavours accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum StyleArg {
    Css,
    Scss,
    Sass,
    Less,
    /// Also accepted as `stylus`.
    #[value(alias = "stylus")]
    Styl,
    /// No stylesheet at all.
    None,
}

impl From<StyleArg> for Style {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Css => Style::Css,
            StyleArg::Scss => Style::Scss,
            StyleArg::Sass => Style::Sass,
            StyleArg::Less => Style::Less,
            StyleArg::Styl => Style::Styl,
            StyleArg::None => Style::None,
        }
    }
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `gridgen init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.gridgen.toml` in the current directory.
    #[arg(long = "local", help = "Create local configuration in current directory")]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `gridgen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `gridgen config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.style`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the user configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
