//! Generation runs.
//! A run applies an ordered list of steps to one project, optionally wrapped by
//! `git init` and a final commit. Steps share the project configuration and file tree;
//! the first failing step ends the run and files already written stay on disk.

use crate::config::{BASE_NAME, PACKAGE_NAME, PRETTIER_DEFAULT_INDENT, PROJECT_NAME};
use crate::error::{Error, Result};
use crate::git;
use crate::materializer::{Materializer, PROJECT_ROOT};
use crate::npm::NpmManifest;
use crate::project::Project;
use crate::versions::PinnedVersions;
use log::info;

/// Read-only collaborators handed to every step.
pub struct Context<'a> {
    pub files: &'a Materializer<'a>,
    pub versions: &'a PinnedVersions,
}

impl<'a> Context<'a> {
    pub fn new(files: &'a Materializer<'a>, versions: &'a PinnedVersions) -> Self {
        Self { files, versions }
    }

    pub fn npm(&self) -> NpmManifest<'a> {
        NpmManifest::new(self.files, self.versions)
    }
}

/// One independent unit of generation.
pub trait GeneratorStep {
    fn name(&self) -> &str;

    fn apply(&self, ctx: &Context<'_>, project: &mut Project) -> Result<()>;
}

/// Ordered steps plus the optional git bookends.
pub struct Pipeline {
    steps: Vec<Box<dyn GeneratorStep>>,
    git_init: bool,
    commit_message: Option<String>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self { steps: Vec::new(), git_init: false, commit_message: None }
    }

    pub fn step<S: GeneratorStep + 'static>(mut self, step: S) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn boxed_step(mut self, step: Box<dyn GeneratorStep>) -> Self {
        self.steps.push(step);
        self
    }

    /// Runs `git init` before the first step.
    pub fn git_init(mut self, enabled: bool) -> Self {
        self.git_init = enabled;
        self
    }

    /// Commits everything after the last step.
    pub fn commit<S: Into<String>>(mut self, message: S) -> Self {
        self.commit_message = Some(message.into());
        self
    }

    /// Runs every step in order against `project`.
    ///
    /// # Errors
    /// Returns the first error raised by git or by a step; nothing is rolled back.
    pub fn run(&self, ctx: &Context<'_>, project: &mut Project) -> Result<()> {
        ctx.files.create(project)?;
        if self.git_init {
            git::init(project)?;
        }

        for step in &self.steps {
            info!("Applying step '{}'", step.name());
            step.apply(ctx, project)?;
        }

        if let Some(message) = &self.commit_message {
            git::add_and_commit(project, message)?;
        }

        info!("Generation completed in {}", project.folder().display());
        Ok(())
    }
}

/// Base project files: README, ignore and editor settings, and a `package.json` with its
/// needles.
pub struct InitStep;

impl GeneratorStep for InitStep {
    fn name(&self) -> &str {
        "init"
    }

    fn apply(&self, ctx: &Context<'_>, project: &mut Project) -> Result<()> {
        for key in [BASE_NAME, PROJECT_NAME, PACKAGE_NAME, PRETTIER_DEFAULT_INDENT] {
            project.add_default_config(key);
        }

        ctx.files.template(project, "init", "README.md")?;
        ctx.files.add_as(project, "init", "gitignore", PROJECT_ROOT, ".gitignore")?;
        ctx.files.template(project, "init", ".editorconfig")?;
        ctx.files.template(project, "init", "package.json")
    }
}

/// Prettier setup on top of [`InitStep`].
pub struct PrettierStep;

impl GeneratorStep for PrettierStep {
    fn name(&self) -> &str {
        "prettier"
    }

    fn apply(&self, ctx: &Context<'_>, project: &mut Project) -> Result<()> {
        project.add_default_config(PRETTIER_DEFAULT_INDENT);

        ctx.files.template(project, "prettier", ".prettierrc")?;
        ctx.files.add(project, "prettier", ".prettierignore")?;

        let npm = ctx.npm();
        for dependency in ["prettier", "prettier-plugin-packagejson"] {
            npm.add_pinned_dev_dependency(project, dependency)?;
        }
        npm.add_script(project, "prettier:check", "prettier --check .")?;
        npm.add_script(project, "prettier:format", "prettier --write .")
    }
}

/// Looks a built-in step up by name.
///
/// # Errors
/// * `Error::UnauthorizedValue` if no step has that name
pub fn step_by_name(name: &str) -> Result<Box<dyn GeneratorStep>> {
    match name {
        "init" => Ok(Box::new(InitStep)),
        "prettier" => Ok(Box::new(PrettierStep)),
        other => Err(Error::unauthorized("step", format!("unknown step '{other}'"))),
    }
}
