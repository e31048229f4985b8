//! Git integration for generated projects.
//! Initializes a repository in the project folder, commits the materialized tree and
//! applies unified diff patches to the working tree.

use crate::constants::{DEFAULT_COMMITTER_EMAIL, DEFAULT_COMMITTER_NAME};
use crate::error::{Error, Result};
use crate::project::Project;
use git2::{ApplyLocation, Commit, Diff, ErrorCode, IndexAddOption, Oid, Repository, Signature};
use log::{debug, info, warn};
use std::path::Path;

/// Initializes a repository rooted at the project folder.
///
/// Re-initializing an existing repository is harmless.
pub fn init(project: &Project) -> Result<()> {
    info!("Initializing git repository in {}", project.folder().display());
    Repository::init(project.folder())
        .map(|_| ())
        .map_err(|e| Error::generation_caused_by("Error when git init", e))
}

/// Stages every change of the working tree and commits it with `message`.
///
/// # Returns
/// * `Ok(None)` when the tree matches `HEAD` and there is nothing to commit
/// * `Ok(Some(oid))` with the new commit otherwise
///
/// # Errors
/// * `Error::GenerationError` if the folder is not a repository or git fails
pub fn add_and_commit(project: &Project, message: &str) -> Result<Option<Oid>> {
    commit_all(project.folder(), message)
        .map_err(|e| Error::generation_caused_by("Error when git add and commit", e))
}

fn commit_all(folder: &Path, message: &str) -> std::result::Result<Option<Oid>, git2::Error> {
    let repo = Repository::open(folder)?;

    let mut index = repo.index()?;
    index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
    index.update_all(["*"].iter(), None)?;
    index.write()?;
    let tree_id = index.write_tree()?;
    let tree = repo.find_tree(tree_id)?;

    let parent = head_commit(&repo)?;
    if let Some(parent) = &parent {
        if parent.tree_id() == tree_id {
            warn!("Nothing to commit in {}", folder.display());
            return Ok(None);
        }
    }

    let signature = repo
        .signature()
        .or_else(|_| Signature::now(DEFAULT_COMMITTER_NAME, DEFAULT_COMMITTER_EMAIL))?;
    let parents: Vec<&Commit> = parent.iter().collect();
    let oid = repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;

    debug!("Created commit {oid}");
    Ok(Some(oid))
}

fn head_commit(repo: &Repository) -> std::result::Result<Option<Commit<'_>>, git2::Error> {
    match repo.head() {
        Ok(head) => head.peel_to_commit().map(Some),
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Applies the unified diff at `patch_path` to the project's working tree.
///
/// # Errors
/// * `Error::GenerationError` if the patch can't be read, parsed or applied
pub fn apply_patch<P: AsRef<Path>>(project: &Project, patch_path: P) -> Result<()> {
    let patch_path = patch_path.as_ref();
    info!("Applying patch '{}'", patch_path.display());

    let patch = std::fs::read(patch_path).map_err(|e| {
        Error::generation_caused_by(
            format!("Error when reading patch '{}'", patch_path.display()),
            e,
        )
    })?;

    let apply = || -> std::result::Result<(), git2::Error> {
        let repo = Repository::open(project.folder())?;
        let diff = Diff::from_buffer(&patch)?;
        repo.apply(&diff, ApplyLocation::WorkDir, None)
    };
    apply().map_err(|e| {
        Error::generation_caused_by(
            format!("Error when git apply patch '{}'", patch_path.display()),
            e,
        )
    })
}
