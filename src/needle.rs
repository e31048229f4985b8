//! Needle based text insertion.
//!
//! A needle is a literal marker written by one generation step so that later steps can
//! inject content at that spot without knowing the grammar of the file. `consume` fills a
//! one-shot needle; `insert_before` adds a line ahead of a needle that stays in place for
//! the next insertion.

use crate::error::{Error, Result};
use crate::materializer::{destination, Materializer};
use crate::project::Project;
use log::{debug, info};

pub struct NeedlePatcher<'a> {
    files: &'a Materializer<'a>,
}

impl<'a> NeedlePatcher<'a> {
    pub fn new(files: &'a Materializer<'a>) -> Self {
        Self { files }
    }

    /// Replaces `needle` with `text`; the needle no longer exists afterwards.
    ///
    /// # Errors
    /// * `Error::NeedleNotFound` if the needle was never written or was already consumed
    pub fn consume(
        &self,
        project: &Project,
        dir: &str,
        filename: &str,
        needle: &str,
        text: &str,
    ) -> Result<()> {
        info!("Filling needle '{needle}' in '{filename}'");
        self.files.replace_text(project, dir, filename, needle, text)
    }

    /// Inserts `text` on its own line(s) right before `needle`, at the needle's
    /// indentation.
    ///
    /// Returns `false` without touching the file when `text` is already present, so
    /// re-running a step does not duplicate its entries.
    ///
    /// # Errors
    /// * `Error::NeedleNotFound` if the file has no such needle
    /// * `Error::GenerationError` if the file can't be read or rewritten
    pub fn insert_before(
        &self,
        project: &Project,
        dir: &str,
        filename: &str,
        needle: &str,
        text: &str,
    ) -> Result<bool> {
        let current = self.files.read(project, dir, filename)?;
        let Some(position) = current.find(needle) else {
            return Err(Error::NeedleNotFound {
                needle: needle.to_string(),
                file: destination(project, dir, filename)?,
            });
        };

        let indent = indentation_at(&current, position);
        let block = indent_lines(text, indent);
        if contains_block(&current, &block) {
            debug!("'{filename}' already contains the entry, skipping insertion");
            return Ok(false);
        }

        info!("Inserting entry before needle '{needle}' in '{filename}'");
        let replacement = format!("{}\n{indent}{needle}", block.trim_start());
        self.files.replace_text(project, dir, filename, needle, &replacement)?;
        Ok(true)
    }
}

/// Leading whitespace of the line holding byte `position`.
fn indentation_at(text: &str, position: usize) -> &str {
    let line_start = text[..position].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let prefix = &text[line_start..position];
    let trimmed = prefix.trim_start();
    &prefix[..prefix.len() - trimmed.len()]
}

fn indent_lines(text: &str, indent: &str) -> String {
    text.lines().map(|line| format!("{indent}{line}")).collect::<Vec<_>>().join("\n")
}

/// Whether `block` appears as whole lines of `haystack`.
fn contains_block(haystack: &str, block: &str) -> bool {
    if !block.contains('\n') {
        return haystack.lines().any(|line| line == block);
    }
    haystack == block
        || haystack.starts_with(&format!("{block}\n"))
        || haystack.contains(&format!("\n{block}\n"))
        || haystack.ends_with(&format!("\n{block}"))
}
