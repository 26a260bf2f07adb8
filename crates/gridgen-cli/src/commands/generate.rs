//! Implementation of the `gridgen generate` command.
//!
//! Responsibility: translate CLI arguments into core options, wire the
//! adapters, run plan and apply, and display results. No generation logic
//! lives here.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use gridgen_adapters::{AngularWorkspaceReader, BuiltinRenderer, LocalTree};
use gridgen_core::{
    application::{ApplyMode, ApplySummary, GenerateService},
    domain::{FileMutation, MutationPlan},
};

use crate::{
    cli::{GenerateArgs, GlobalArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::{FileAction, OutputManager},
};

/// JSON document printed for `--dry-run --output-format json`.
#[derive(Debug, Serialize)]
struct DryRunReport<'a> {
    dry_run: bool,
    plan: &'a MutationPlan,
}

/// JSON document printed after a successful apply.
#[derive(Debug, Serialize)]
struct AppliedReport<'a> {
    plan_id: String,
    #[serde(flatten)]
    summary: &'a ApplySummary,
}

/// Execute the `gridgen generate` command.
///
/// Dispatch sequence:
/// 1. Resolve the workspace root
/// 2. Build the service from the local tree and configured defaults
/// 3. Plan (nothing is written if this fails)
/// 4. Early-exit with a report if `--dry-run`
/// 5. Confirm overwrites when `--force` would replace files
/// 6. Apply and report
#[instrument(skip_all, fields(name = %args.name))]
pub fn execute(
    args: GenerateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let root = resolve_root(args.root.as_deref())?;
    debug!(root = %root.display(), "Workspace root resolved");

    let service = build_service(&root, &config, &output)?;
    let plan = service.plan(&args.to_options())?;
    debug!(plan_id = %plan.id, mutations = plan.len(), "Plan ready");

    if args.dry_run {
        return report_plan(&plan, &output);
    }

    let mode = if args.force {
        ApplyMode::Overwrite
    } else {
        ApplyMode::FailIfExists
    };

    if mode == ApplyMode::Overwrite && !args.yes && !global.quiet {
        let existing = existing_targets(&root, &plan);
        if !existing.is_empty() && !confirm_overwrite(&existing, &output)? {
            return Err(CliError::Cancelled);
        }
    }

    let summary = service.apply(&plan, mode)?;
    info!(
        created = summary.created.len(),
        modified = summary.modified.len(),
        "Component generated"
    );

    report_summary(&args.name, &plan, &summary, &output)
}

// ── Wiring ────────────────────────────────────────────────────────────────────

fn resolve_root(root: Option<&Path>) -> CliResult<PathBuf> {
    let root = match root {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()
            .with_cli_context(|| "failed to read the current directory")?,
    };
    if !root.is_dir() {
        return Err(CliError::RootNotFound { path: root });
    }
    Ok(root)
}

fn build_service(
    root: &Path,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<GenerateService> {
    let renderer = match &config.templates.dir {
        Some(dir) => {
            if !dir.is_dir() {
                output.warning(&format!(
                    "Template directory {} does not exist; using built-in templates",
                    dir.display()
                ))?;
            }
            BuiltinRenderer::with_overrides(dir)
        }
        None => BuiltinRenderer::new(),
    };

    Ok(GenerateService::new(
        Box::new(LocalTree::new(root)),
        Box::new(AngularWorkspaceReader::new()),
        Box::new(renderer),
    )
    .with_library_defaults(config.library_defaults()))
}

/// Files the plan creates that are already on disk.
fn existing_targets(root: &Path, plan: &MutationPlan) -> Vec<String> {
    plan.creations()
        .filter(|(path, _)| root.join(path.as_path_buf()).exists())
        .map(|(path, _)| path.to_string())
        .collect()
}

#[cfg(feature = "interactive")]
fn confirm_overwrite(existing: &[String], output: &OutputManager) -> CliResult<bool> {
    use std::io::IsTerminal;

    if !std::io::stdin().is_terminal() || output.format() == OutputFormat::Json {
        return Ok(true);
    }
    for path in existing {
        output.warning(&format!("{path} will be overwritten"))?;
    }

    dialoguer::Confirm::new()
        .with_prompt(format!("Overwrite {} existing file(s)?", existing.len()))
        .default(false)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: std::io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm_overwrite(existing: &[String], output: &OutputManager) -> CliResult<bool> {
    for path in existing {
        output.warning(&format!("Overwriting {path}"))?;
    }
    Ok(true)
}

// ── Reporting ─────────────────────────────────────────────────────────────────

fn report_plan(plan: &MutationPlan, output: &OutputManager) -> CliResult<()> {
    if output.format() == OutputFormat::Json {
        output.json(&DryRunReport {
            dry_run: true,
            plan,
        })?;
        return Ok(());
    }

    for (path, content) in plan.creations() {
        output.file(
            FileAction::Create,
            &path.to_string(),
            &format!("({} bytes)", content.len()),
        )?;
    }

    for (path, insertions) in insertions_by_file(plan) {
        output.file(FileAction::Update, &path, "")?;
        for (anchor, text) in insertions {
            output.print(&format!("    {anchor}: {}", text.trim()))?;
        }
    }

    output.print("")?;
    output.info("Dry run: no files were written.")?;
    Ok(())
}

fn report_summary(
    name: &str,
    plan: &MutationPlan,
    summary: &ApplySummary,
    output: &OutputManager,
) -> CliResult<()> {
    if output.format() == OutputFormat::Json {
        output.json(&AppliedReport {
            plan_id: plan.id.to_string(),
            summary,
        })?;
        return Ok(());
    }

    for (path, content) in plan.creations() {
        output.file(
            FileAction::Create,
            &path.to_string(),
            &format!("({} bytes)", content.len()),
        )?;
    }
    for path in &summary.modified {
        output.file(FileAction::Update, &path.to_string(), "")?;
    }
    if summary.modified.is_empty() {
        output.info("No module was changed.")?;
    }

    output.success(&format!("Grid component '{name}' generated"))?;
    Ok(())
}

/// `path -> [(anchor, text)]` for every insertion, files sorted by path.
fn insertions_by_file(plan: &MutationPlan) -> BTreeMap<String, Vec<(&str, &str)>> {
    let mut grouped: BTreeMap<String, Vec<(&str, &str)>> = BTreeMap::new();
    for mutation in plan.insertions() {
        if let FileMutation::Insert {
            path, anchor, text, ..
        } = mutation
        {
            grouped
                .entry(path.to_string())
                .or_default()
                .push((anchor.as_str(), text.as_str()));
        }
    }
    grouped
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use gridgen_core::domain::RelativePath;
    use tempfile::TempDir;

    fn path(s: &str) -> RelativePath {
        RelativePath::try_new(s).unwrap()
    }

    #[test]
    fn missing_root_is_root_not_found() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            resolve_root(Some(&missing)),
            Err(CliError::RootNotFound { .. })
        ));
    }

    #[test]
    fn explicit_root_is_kept() {
        let dir = TempDir::new().unwrap();
        assert_eq!(resolve_root(Some(dir.path())).unwrap(), dir.path());
    }

    #[test]
    fn existing_targets_lists_files_already_on_disk() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("src/app/foo")).unwrap();
        std::fs::write(dir.path().join("src/app/foo/foo.component.ts"), "").unwrap();

        let plan = MutationPlan::new()
            .with(FileMutation::Create {
                path: path("src/app/foo/foo.component.ts"),
                content: String::new(),
            })
            .with(FileMutation::Create {
                path: path("src/app/foo/foo.component.html"),
                content: String::new(),
            });

        assert_eq!(
            existing_targets(dir.path(), &plan),
            vec!["src/app/foo/foo.component.ts"]
        );
    }

    #[test]
    fn insertions_are_grouped_per_file() {
        let insert = |file: &str, anchor: &str| FileMutation::Insert {
            path: path(file),
            position: 0,
            anchor: anchor.into(),
            text: "X".into(),
        };
        let plan = MutationPlan::new()
            .with(insert("src/app/app.module.ts", "import"))
            .with(insert("src/app/app.module.ts", "NgModule.declarations"))
            .with(insert("src/app/shared.module.ts", "NgModule.exports"));

        let grouped = insertions_by_file(&plan);
        assert_eq!(grouped.len(), 2);
        assert_eq!(
            grouped["src/app/app.module.ts"]
                .iter()
                .map(|(anchor, _)| *anchor)
                .collect::<Vec<_>>(),
            vec!["import", "NgModule.declarations"]
        );
    }
}
