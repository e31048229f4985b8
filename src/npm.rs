//! npm manifest handling.
//! Adds dependencies and scripts to a generated `package.json` through its needles, reads
//! back its name and description, and runs npm in the project folder.

use crate::constants::{NEEDLE_DEPENDENCIES, NEEDLE_DEV_DEPENDENCIES, NEEDLE_SCRIPTS, PACKAGE_JSON};
use crate::error::{require_not_blank, Error, Result};
use crate::materializer::{Materializer, PROJECT_ROOT};
use crate::needle::NeedlePatcher;
use crate::project::Project;
use crate::versions::PinnedVersions;
use log::{debug, info};
use std::path::Path;
use std::process::{Command, Stdio};

/// Mutates the `package.json` at the project root.
pub struct NpmManifest<'a> {
    needles: NeedlePatcher<'a>,
    versions: &'a PinnedVersions,
}

impl<'a> NpmManifest<'a> {
    pub fn new(files: &'a Materializer<'a>, versions: &'a PinnedVersions) -> Self {
        Self { needles: NeedlePatcher::new(files), versions }
    }

    /// Adds `"name": "version"` to the `dependencies` of the manifest.
    ///
    /// Adding an entry that is already there leaves the manifest untouched.
    ///
    /// # Arguments
    /// * `project` - Project whose root holds the `package.json`
    /// * `name` - Package name
    /// * `version` - Version or range written as is
    ///
    /// # Errors
    /// * `Error::MissingMandatoryValue` if `name` is blank
    /// * `Error::NeedleNotFound` if the manifest has no dependencies needle
    /// * `Error::GenerationError` if the manifest can't be read or rewritten
    pub fn add_dependency(&self, project: &Project, name: &str, version: &str) -> Result<()> {
        self.add_entry(project, NEEDLE_DEPENDENCIES, name, version)
    }

    /// Same as [`NpmManifest::add_dependency`] for `devDependencies`.
    pub fn add_dev_dependency(&self, project: &Project, name: &str, version: &str) -> Result<()> {
        self.add_entry(project, NEEDLE_DEV_DEPENDENCIES, name, version)
    }

    /// Adds `name` at its pinned version.
    ///
    /// # Errors
    /// * `Error::GenerationError` if `name` has no pinned version
    pub fn add_pinned_dependency(&self, project: &Project, name: &str) -> Result<()> {
        let version = self.pinned(name)?;
        self.add_dependency(project, name, &version)
    }

    /// Adds `name` to `devDependencies` at its pinned version.
    pub fn add_pinned_dev_dependency(&self, project: &Project, name: &str) -> Result<()> {
        let version = self.pinned(name)?;
        self.add_dev_dependency(project, name, &version)
    }

    /// Adds the `name` script running `cmd`.
    ///
    /// # Errors
    /// * `Error::NeedleNotFound` if the manifest has no scripts needle
    pub fn add_script(&self, project: &Project, name: &str, cmd: &str) -> Result<()> {
        self.add_entry(project, NEEDLE_SCRIPTS, name, cmd)
    }

    /// Pinned version of `name`, if the table has one.
    ///
    /// # Errors
    /// * `Error::MissingMandatoryValue` if `name` is blank
    pub fn get_version_in_common(&self, name: &str) -> Result<Option<String>> {
        self.versions.get(name)
    }

    fn pinned(&self, name: &str) -> Result<String> {
        self.versions
            .get(name)?
            .ok_or_else(|| Error::generation(format!("Dependency not found: {name}")))
    }

    fn add_entry(&self, project: &Project, needle: &str, key: &str, value: &str) -> Result<()> {
        require_not_blank("name", key)?;
        let entry = format!("{}: {},", json_string(key)?, json_string(value)?);
        let inserted =
            self.needles.insert_before(project, PROJECT_ROOT, PACKAGE_JSON, needle, &entry)?;
        if !inserted {
            debug!("'{key}' already present in {PACKAGE_JSON}");
        }
        Ok(())
    }
}

fn json_string(value: &str) -> Result<String> {
    serde_json::to_string(value)
        .map_err(|e| Error::generation_caused_by(format!("'{value}' can't be encoded"), e))
}

/// Reads the `name` of the manifest in `folder`, if there is a manifest.
///
/// # Errors
/// * `Error::MissingMandatoryValue` if `folder` is blank
/// * `Error::GenerationError` if the manifest exists but is not valid JSON
pub fn get_name(folder: &str) -> Result<Option<String>> {
    manifest_field(folder, "name")
}

/// Reads the `description` of the manifest in `folder`, if there is a manifest.
pub fn get_description(folder: &str) -> Result<Option<String>> {
    manifest_field(folder, "description")
}

fn manifest_field(folder: &str, field: &str) -> Result<Option<String>> {
    require_not_blank("folder", folder)?;
    let path = Path::new(folder).join(PACKAGE_JSON);
    if !path.is_file() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path).map_err(|e| {
        Error::generation_caused_by(format!("Error when reading '{}'", path.display()), e)
    })?;
    let manifest: serde_json::Value = serde_json::from_str(&content).map_err(|e| {
        Error::generation_caused_by(format!("'{}' is not a valid manifest", path.display()), e)
    })?;

    Ok(manifest.get(field).and_then(|value| value.as_str()).map(str::to_string))
}

/// Runs npm commands inside the project folder.
#[derive(Debug, Clone)]
pub struct NpmCommand {
    program: String,
}

impl Default for NpmCommand {
    fn default() -> Self {
        Self::new("npm")
    }
}

impl NpmCommand {
    pub fn new<S: Into<String>>(program: S) -> Self {
        Self { program: program.into() }
    }

    /// Runs `npm install` in the project folder.
    ///
    /// # Errors
    /// * `Error::GenerationError` if npm can't be started or exits with a failure status
    pub fn install(&self, project: &Project) -> Result<()> {
        self.run(project, &["install"])
    }

    /// Runs `npm run prettier:format` in the project folder.
    pub fn prettify(&self, project: &Project) -> Result<()> {
        self.run(project, &["run", "prettier:format"])
    }

    fn run(&self, project: &Project, args: &[&str]) -> Result<()> {
        let command_line = format!("{} {}", self.program, args.join(" "));
        info!("Running '{command_line}' in {}", project.folder().display());

        let status = Command::new(&self.program)
            .args(args)
            .current_dir(project.folder())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| {
                Error::generation_caused_by(format!("Error when running '{command_line}'"), e)
            })?;

        if !status.success() {
            return Err(Error::generation(format!(
                "'{command_line}' failed with status: {status}"
            )));
        }
        Ok(())
    }
}
