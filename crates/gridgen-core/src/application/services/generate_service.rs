//! Generate Service - main application orchestrator.
//!
//! This service coordinates the whole generation workflow:
//! 1. Validate the raw options and read the workspace
//! 2. Merge options, select templates, resolve paths
//! 3. Render the selected templates
//! 4. Locate the registration module and plan its edits
//! 5. Apply the plan to the tree, rolling back on failure
//!
//! Steps 1-4 produce a [`MutationPlan`] without writing anything; step 5 is
//! a separate call so callers can print a dry run.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{TemplateRenderer, Tree, WorkspaceReader},
    },
    domain::{
        DomainValidator as validator, FileMutation, GenerateOptions, LibraryDefaults,
        ModuleRewriter, MutationPlan, ProjectDefinition, RegistrationRequest, RelativePath,
        RenderContext, TemplateDescriptor, TemplateKind, ValidatedOptions, Workspace,
        apply_insertions, resolve_paths, select_templates,
    },
    error::{GridgenError, GridgenResult},
};

/// What to do when a created file already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApplyMode {
    /// Abort before touching anything.
    #[default]
    FailIfExists,
    /// Replace existing files.
    Overwrite,
}

/// Files touched by an applied plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplySummary {
    pub created: Vec<RelativePath>,
    pub modified: Vec<RelativePath>,
}

/// Main generation service.
pub struct GenerateService {
    tree: Box<dyn Tree>,
    reader: Box<dyn WorkspaceReader>,
    renderer: Box<dyn TemplateRenderer>,
    library: LibraryDefaults,
}

impl GenerateService {
    /// Create a new generate service with the given adapters and the
    /// built-in library defaults.
    pub fn new(
        tree: Box<dyn Tree>,
        reader: Box<dyn WorkspaceReader>,
        renderer: Box<dyn TemplateRenderer>,
    ) -> Self {
        Self {
            tree,
            reader,
            renderer,
            library: LibraryDefaults::default(),
        }
    }

    /// Replace the last-resort option layer.
    pub fn with_library_defaults(mut self, library: LibraryDefaults) -> Self {
        self.library = library;
        self
    }

    /// Plan, then apply.
    pub fn generate(
        &self,
        raw: &GenerateOptions,
        mode: ApplyMode,
    ) -> GridgenResult<(MutationPlan, ApplySummary)> {
        let plan = self.plan(raw)?;
        let summary = self.apply(&plan, mode)?;
        Ok((plan, summary))
    }

    /// Compute every change one invocation makes, without writing.
    #[instrument(skip_all, fields(name = ?raw.name, project = ?raw.project))]
    pub fn plan(&self, raw: &GenerateOptions) -> GridgenResult<MutationPlan> {
        // fail on a missing name before any I/O
        validator::require_name(raw)?;

        let (_, workspace) = self.load_workspace()?;
        let project = self.select_project(raw, &workspace)?;
        let mut ambient = project.ambient_defaults();
        ambient.project = Some(project.name.clone());

        let options = validator::validate_options(raw, &ambient, &self.library)?;
        info!(
            component = %options.name.component_class(),
            project = %options.project,
            "Planning grid component"
        );

        let templates = select_templates(&options);
        let paths = resolve_paths(&options, &templates)?;
        debug!(directory = %paths.directory, files = paths.entries.len(), "Paths resolved");

        let context = self.render_context(&options)?;
        let mut plan = MutationPlan::new();
        for entry in &paths.entries {
            let content = self.renderer.render(entry.descriptor.kind, &context)?;
            plan.push(FileMutation::Create {
                path: entry.path.clone(),
                content,
            });
        }

        if options.skip_import {
            debug!("Module registration skipped");
        } else {
            let module_path = self.find_module(&options)?;
            let content = self.tree.read_to_string(&module_path)?;
            let component_path = paths
                .path_of(&TemplateDescriptor::COMPONENT)
                .cloned()
                .ok_or_else(|| GridgenError::Internal {
                    message: "component template was not selected".into(),
                })?;

            let edits = ModuleRewriter::plan(
                &module_path,
                &content,
                &RegistrationRequest {
                    component_class: options.name.component_class(),
                    component_path,
                    export: options.export,
                    library: Some(&self.library.registration),
                },
            )?;
            info!(module = %module_path, edits = edits.len(), "Module registration planned");
            if !edits.is_empty() {
                plan.record_baseline(module_path, content);
            }
            plan.extend(edits);
        }

        validator::validate_plan(&plan)?;
        Ok(plan)
    }

    /// Apply a plan to the tree.
    ///
    /// Existence checks and module reads happen before the first write. A
    /// module whose content no longer matches the one planned against fails
    /// with [`ApplicationError::StalePlan`]. If a write fails, files created
    /// so far are removed and modified modules are restored.
    #[instrument(skip_all, fields(plan_id = %plan.id, mutations = plan.len()))]
    pub fn apply(&self, plan: &MutationPlan, mode: ApplyMode) -> GridgenResult<ApplySummary> {
        validator::validate_plan(plan)?;

        let mut creations = Vec::new();
        for (path, content) in plan.creations() {
            let existed = self.tree.exists(path);
            if existed && mode == ApplyMode::FailIfExists {
                return Err(ApplicationError::FileAlreadyExists {
                    path: path.to_string(),
                }
                .into());
            }
            creations.push((path, content, existed));
        }

        // group insertions per file, keeping plan order within a file
        let mut insertions: BTreeMap<&RelativePath, Vec<(usize, &str)>> = BTreeMap::new();
        for mutation in plan.insertions() {
            if let FileMutation::Insert {
                path,
                position,
                text,
                ..
            } = mutation
            {
                insertions
                    .entry(path)
                    .or_default()
                    .push((*position, text.as_str()));
            }
        }
        let mut modifications = Vec::new();
        for (path, edits) in insertions {
            let original = self.tree.read_to_string(path)?;
            let stale = || ApplicationError::StalePlan {
                path: path.to_string(),
            };
            if plan.baseline(path).is_some_and(|planned| planned != original) {
                return Err(stale().into());
            }
            let updated = apply_insertions(&original, edits).map_err(|e| {
                debug!(error = %e, path = %path, "Planned offsets do not fit the file");
                stale()
            })?;
            modifications.push((path, original, updated));
        }

        let mut summary = ApplySummary::default();
        let result = self.write_all(&creations, &modifications, &mut summary);

        match result {
            Ok(()) => {
                info!(
                    created = summary.created.len(),
                    modified = summary.modified.len(),
                    "Plan applied"
                );
                Ok(summary)
            }
            Err(e) => {
                warn!(error = %e, "Write failed, attempting rollback");
                self.rollback(&creations, &modifications, &summary);
                Err(e)
            }
        }
    }

    /// Read the workspace manifest from the tree root.
    pub fn load_workspace(&self) -> GridgenResult<(RelativePath, Workspace)> {
        let names = self.reader.manifest_names();
        for name in &names {
            let path = RelativePath::try_new(name)?;
            if self.tree.exists(&path) {
                let content = self.tree.read_to_string(&path)?;
                let workspace = self.reader.parse(&path, &content)?;
                debug!(manifest = %path, projects = workspace.projects.len(), "Workspace loaded");
                return Ok((path, workspace));
            }
        }
        Err(ApplicationError::WorkspaceNotFound {
            looked_for: names.join(", "),
        }
        .into())
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn select_project<'w>(
        &self,
        raw: &GenerateOptions,
        workspace: &'w Workspace,
    ) -> GridgenResult<&'w ProjectDefinition> {
        let name = validator::resolve_project(raw, workspace.default_project.as_deref())?;
        workspace.project(name).ok_or_else(|| {
            ApplicationError::ProjectNotFound {
                name: name.to_string(),
                available: workspace.project_names().map(str::to_string).collect(),
            }
            .into()
        })
    }

    fn render_context(&self, options: &ValidatedOptions) -> GridgenResult<RenderContext> {
        let registration = &self.library.registration;
        let context = RenderContext::new(options)
            .with_variable("LIBRARY_MODULE", registration.module_symbol.as_str())
            .with_variable("LIBRARY_SPECIFIER", registration.import_specifier.as_str());
        let inline_markup = if options.inline_template {
            self.renderer.render(TemplateKind::Markup, &context)?
        } else {
            String::new()
        };
        Ok(context.with_component_bindings(options, &inline_markup))
    }

    /// The module the component is registered in.
    ///
    /// An explicit module is looked up relative to the base path, then the
    /// workspace root, as `<m>`, `<m>.ts`, `<m>.module.ts` and finally
    /// `<m>/<leaf>.module.ts` where `<leaf>` is the last segment of `<m>`.
    /// Otherwise the nearest directory above the component holding exactly
    /// one non-routing `*.module.ts` wins.
    fn find_module(&self, options: &ValidatedOptions) -> GridgenResult<RelativePath> {
        if let Some(module) = options.module.as_deref() {
            let module = module.trim_start_matches('/');
            let leaf = module.rsplit('/').next().unwrap_or(module);
            for base in [options.path.clone(), RelativePath::root()] {
                for candidate in [
                    module.to_string(),
                    format!("{module}.ts"),
                    format!("{module}.module.ts"),
                    format!("{module}/{leaf}.module.ts"),
                ] {
                    let Ok(path) = base.join(&candidate) else {
                        continue;
                    };
                    if path.file_name().is_some_and(|f| f.ends_with(".ts")) && self.tree.exists(&path)
                    {
                        return Ok(path);
                    }
                }
            }
            return Err(ApplicationError::ModuleMissing {
                module: module.to_string(),
            }
            .into());
        }

        let start = options.component_dir();
        let mut dir = Some(start.clone());
        while let Some(current) = dir {
            let candidates: Vec<String> = self
                .tree
                .list_files(&current)?
                .into_iter()
                .filter(|f| f.ends_with(".module.ts") && !f.ends_with("-routing.module.ts"))
                .collect();

            match candidates.as_slice() {
                [] => dir = current.parent(),
                [only] => return Ok(current.join(only)?),
                _ => {
                    return Err(ApplicationError::AmbiguousModule {
                        directory: current.to_string(),
                        candidates,
                    }
                    .into());
                }
            }
        }

        Err(ApplicationError::ModuleNotFound {
            searched_from: start.to_string(),
        }
        .into())
    }

    fn write_all(
        &self,
        creations: &[(&RelativePath, &str, bool)],
        modifications: &[(&RelativePath, String, String)],
        summary: &mut ApplySummary,
    ) -> GridgenResult<()> {
        for (path, content, _) in creations {
            if let Some(parent) = path.parent() {
                self.tree.create_dir_all(&parent)?;
            }
            self.tree.write_file(path, content)?;
            summary.created.push((*path).clone());
        }
        for (path, _, updated) in modifications {
            self.tree.write_file(path, updated)?;
            summary.modified.push((*path).clone());
        }
        Ok(())
    }

    /// Best-effort rollback on failure.
    fn rollback(
        &self,
        creations: &[(&RelativePath, &str, bool)],
        modifications: &[(&RelativePath, String, String)],
        summary: &ApplySummary,
    ) {
        for path in &summary.created {
            let existed = creations
                .iter()
                .any(|(p, _, existed)| *p == path && *existed);
            // overwritten files cannot be restored; leave them
            if existed {
                continue;
            }
            if let Err(e) = self.tree.remove_file(path) {
                warn!(error = %e, path = %path, "Rollback failed");
            }
        }
        for path in &summary.modified {
            if let Some((_, original, _)) = modifications.iter().find(|(p, ..)| *p == path) {
                if let Err(e) = self.tree.write_file(path, original) {
                    warn!(error = %e, path = %path, "Rollback failed");
                }
            }
        }
        info!("Rollback finished");
    }
}
