//! Template root resolution for kiln.
//! Templates are addressed by a `(namespace, filename)` pair under a read-only root
//! directory shared by every run of the process.

use crate::constants::{PINNED_VERSIONS_FILE, PINNED_VERSIONS_NAMESPACE, TEMPLATE_SUFFIX};
use crate::error::{Error, Result};
use crate::versions::PinnedVersions;
use log::debug;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Read-only template catalogue rooted at a directory.
#[derive(Debug, Clone)]
pub struct TemplateRoot {
    root: PathBuf,
}

impl TemplateRoot {
    /// Opens the template root.
    ///
    /// # Errors
    /// * `Error::GenerationError` if `root` is not a directory
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(Error::generation(format!(
                "Template root '{}' is not a directory",
                root.display()
            )));
        }
        debug!("Using template root {}", root.display());
        Ok(Self { root: root.to_path_buf() })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a template, whether it exists or not.
    pub fn path(&self, namespace: &str, filename: &str) -> PathBuf {
        self.root.join(namespace).join(filename)
    }

    /// Reads the raw bytes of a template.
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` if no such file exists
    /// * `Error::GenerationError` for any other I/O failure
    pub fn read(&self, namespace: &str, filename: &str) -> Result<Vec<u8>> {
        let path = self.path(namespace, filename);
        std::fs::read(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::TemplateNotFound {
                namespace: namespace.to_string(),
                filename: filename.to_string(),
            },
            _ => Error::generation_caused_by(
                format!("Template '{}' can't be read", path.display()),
                e,
            ),
        })
    }

    /// Reads a template as UTF-8 text.
    pub fn read_to_string(&self, namespace: &str, filename: &str) -> Result<String> {
        let bytes = self.read(namespace, filename)?;
        String::from_utf8(bytes).map_err(|e| {
            Error::generation_caused_by(
                format!("Template '{namespace}/{filename}' is not valid UTF-8"),
                e,
            )
        })
    }

    /// Lists every file of a namespace, relative to the namespace directory, sorted.
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` if the namespace directory does not exist
    pub fn files(&self, namespace: &str) -> Result<Vec<PathBuf>> {
        let base = self.root.join(namespace);
        if !base.is_dir() {
            return Err(Error::TemplateNotFound {
                namespace: namespace.to_string(),
                filename: String::new(),
            });
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&base).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                Error::generation_caused_by(
                    format!("Template namespace '{namespace}' can't be listed"),
                    e,
                )
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(&base).map_err(|e| {
                Error::generation_caused_by(format!("Invalid template path in '{namespace}'"), e)
            })?;
            files.push(relative.to_path_buf());
        }
        Ok(files)
    }

    /// Loads the pinned dependency versions shipped with the catalogue.
    pub fn pinned_versions(&self) -> Result<PinnedVersions> {
        let text = self.read_to_string(PINNED_VERSIONS_NAMESPACE, PINNED_VERSIONS_FILE)?;
        Ok(PinnedVersions::from_text(text))
    }
}

/// Checks whether a filename carries the template suffix.
pub fn is_template(filename: &str) -> bool {
    filename.len() > TEMPLATE_SUFFIX.len() && filename.ends_with(TEMPLATE_SUFFIX)
}

/// `README.md` becomes `README.md.j2`; names already suffixed are kept.
pub fn with_template_suffix(filename: &str) -> String {
    if is_template(filename) {
        filename.to_string()
    } else {
        format!("{filename}{TEMPLATE_SUFFIX}")
    }
}

/// `README.md.j2` becomes `README.md`; other names are kept.
pub fn without_template_suffix(filename: &str) -> String {
    filename.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(filename).to_string()
}
