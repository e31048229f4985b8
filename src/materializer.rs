//! File materialization for kiln.
//! Copies, renders and writes template artifacts into a project folder, and rewrites
//! already materialized files in place.

use crate::error::{Cause, Error, Result};
use crate::loader::{is_template, with_template_suffix, without_template_suffix, TemplateRoot};
use crate::project::Project;
use crate::renderer::TemplateRenderer;
use log::{debug, info};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Destination directory meaning "the project root".
pub const PROJECT_ROOT: &str = ".";

/// Resolves `dir/filename` inside the project folder.
///
/// # Errors
/// * `Error::UnauthorizedValue` if `dir` or `filename` is absolute or has a `..` segment
pub fn destination(project: &Project, dir: &str, filename: &str) -> Result<PathBuf> {
    ensure_relative("dir", dir)?;
    ensure_relative("filename", filename)?;
    let base = match dir.trim() {
        "" | PROJECT_ROOT => project.folder().to_path_buf(),
        dir => project.folder().join(dir),
    };
    Ok(base.join(filename))
}

fn ensure_relative(field: &str, path: &str) -> Result<()> {
    let escapes = Path::new(path)
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));
    if escapes {
        return Err(Error::unauthorized(
            field,
            format!("'{path}' must stay inside the project folder"),
        ));
    }
    Ok(())
}

fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) => fs::create_dir_all(parent),
        None => Ok(()),
    }
}

/// Produces files on disk from the template root and from raw text.
///
/// Holds only shared references to read-only state, so one materializer can serve runs on
/// different folders from several threads.
pub struct Materializer<'a> {
    templates: &'a TemplateRoot,
    renderer: &'a dyn TemplateRenderer,
}

impl<'a> Materializer<'a> {
    pub fn new(templates: &'a TemplateRoot, renderer: &'a dyn TemplateRenderer) -> Self {
        Self { templates, renderer }
    }

    pub fn templates(&self) -> &TemplateRoot {
        self.templates
    }

    /// Creates the project folder and any missing parents.
    pub fn create(&self, project: &Project) -> Result<()> {
        let folder = project.folder();
        debug!("Creating project folder {}", folder.display());
        fs::create_dir_all(folder).map_err(|e| {
            Error::generation_caused_by(
                format!("The folder '{}' can't be created", folder.display()),
                e,
            )
        })
    }

    /// Copies `source/filename` to the project root.
    pub fn add(&self, project: &Project, source: &str, filename: &str) -> Result<()> {
        self.add_as(project, source, filename, PROJECT_ROOT, filename)
    }

    /// Copies `source/filename` to `dest_dir`, keeping its name.
    pub fn add_to(
        &self,
        project: &Project,
        source: &str,
        filename: &str,
        dest_dir: &str,
    ) -> Result<()> {
        self.add_as(project, source, filename, dest_dir, filename)
    }

    /// Copies `source/filename` byte for byte to `dest_dir/dest_filename`, replacing any
    /// existing file.
    ///
    /// # Errors
    /// * `Error::GenerationError` naming the destination file, whatever went wrong,
    ///   including a missing template
    pub fn add_as(
        &self,
        project: &Project,
        source: &str,
        filename: &str,
        dest_dir: &str,
        dest_filename: &str,
    ) -> Result<()> {
        info!("Adding file '{dest_filename}'");
        let target = destination(project, dest_dir, dest_filename)?;
        let cant_add = |cause: Cause| {
            Error::generation_caused_by(
                format!("The file '{}' can't be added", target.display()),
                cause,
            )
        };

        let bytes = self.templates.read(source, filename).map_err(|e| cant_add(e.into()))?;
        ensure_parent(&target).map_err(|e| cant_add(e.into()))?;
        fs::write(&target, bytes).map_err(|e| cant_add(e.into()))
    }

    /// Renders `source/filename` to the project root, dropping the template suffix.
    pub fn template(&self, project: &Project, source: &str, filename: &str) -> Result<()> {
        self.template_to(project, source, filename, PROJECT_ROOT)
    }

    /// Renders `source/filename` to `dest_dir`, dropping the template suffix.
    pub fn template_to(
        &self,
        project: &Project,
        source: &str,
        filename: &str,
        dest_dir: &str,
    ) -> Result<()> {
        let dest_filename = without_template_suffix(filename);
        self.template_as(project, source, filename, dest_dir, &dest_filename)
    }

    /// Renders `source/filename` against the project configuration and writes the result
    /// to `dest_dir/dest_filename`.
    ///
    /// `filename` may be given with or without the template suffix.
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` if the template does not exist
    /// * `Error::GenerationError` if rendering or writing fails
    pub fn template_as(
        &self,
        project: &Project,
        source: &str,
        filename: &str,
        dest_dir: &str,
        dest_filename: &str,
    ) -> Result<()> {
        info!("Adding file '{dest_filename}'");
        let filename = with_template_suffix(filename);
        let text = self.templates.read_to_string(source, &filename)?;
        let rendered =
            self.renderer.render(&format!("{source}/{filename}"), &text, &project.context())?;
        self.write(project, &rendered, dest_dir, dest_filename)
    }

    /// Writes `text` to `dest_dir/dest_filename`, replacing any previous content.
    ///
    /// # Errors
    /// * `Error::GenerationError` if the directory can't be created, for instance when a
    ///   path segment is an existing file, or the file can't be written
    pub fn write(
        &self,
        project: &Project,
        text: &str,
        dest_dir: &str,
        dest_filename: &str,
    ) -> Result<()> {
        let target = destination(project, dest_dir, dest_filename)?;
        debug!("Writing file: {}", target.display());

        ensure_parent(&target)
            .and_then(|_| fs::write(&target, text.as_bytes()))
            .map_err(|e| {
                Error::generation_caused_by(
                    format!("Error when writing text to '{}'", target.display()),
                    e,
                )
            })
    }

    /// Reads a materialized file.
    pub fn read(&self, project: &Project, dir: &str, filename: &str) -> Result<String> {
        let target = destination(project, dir, filename)?;
        fs::read_to_string(&target).map_err(|e| {
            Error::generation_caused_by(
                format!("Error when reading text from '{}'", target.display()),
                e,
            )
        })
    }

    /// Replaces the first occurrence of `old_text` in `dir/filename` and rewrites the file.
    ///
    /// Callers use it to fill needles left by earlier steps. Once replaced the needle is
    /// gone, so running the same replacement twice fails.
    ///
    /// # Errors
    /// * `Error::NeedleNotFound` if `old_text` does not occur in the file
    /// * `Error::GenerationError` if the file is missing or can't be rewritten
    pub fn replace_text(
        &self,
        project: &Project,
        dir: &str,
        filename: &str,
        old_text: &str,
        new_text: &str,
    ) -> Result<()> {
        let current = self.read(project, dir, filename)?;
        if !current.contains(old_text) {
            return Err(Error::NeedleNotFound {
                needle: old_text.to_string(),
                file: destination(project, dir, filename)?,
            });
        }
        let updated = current.replacen(old_text, new_text, 1);
        self.write(project, &updated, dir, filename)
    }

    /// Materializes every file of a template namespace under `dest_dir`.
    ///
    /// Files carrying the template suffix are rendered and lose the suffix; the others are
    /// copied as they are. Returns the written paths in a stable order.
    pub fn add_namespace(
        &self,
        project: &Project,
        namespace: &str,
        dest_dir: &str,
    ) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for relative in self.templates.files(namespace)? {
            let name = relative.to_str().ok_or_else(|| {
                Error::generation(format!(
                    "Invalid template path '{}' in '{namespace}'",
                    relative.display()
                ))
            })?;
            // Template lookups are '/'-separated whatever the platform.
            let name = name.replace('\\', "/");

            if is_template(&name) {
                let dest_filename = without_template_suffix(&name);
                self.template_as(project, namespace, &name, dest_dir, &dest_filename)?;
                written.push(destination(project, dest_dir, &dest_filename)?);
            } else {
                self.add_as(project, namespace, &name, dest_dir, &name)?;
                written.push(destination(project, dest_dir, &name)?);
            }
        }
        Ok(written)
    }
}
