//! Pinned dependency versions.
//!
//! The table is a `package.json`-shaped text resource loaded once per process. Lookups scan
//! it line by line instead of parsing it, so only `"name": "version"` lines count and the
//! manifest's own metadata never answers a lookup.

use crate::error::{require_not_blank, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Keys describing the table itself rather than a dependency.
const METADATA_KEYS: [&str; 6] = ["name", "description", "version", "private", "license", "type"];

static ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*"([^"]+)"\s*:\s*"([^"]*)"\s*,?\s*$"#).expect("valid entry pattern")
});

#[derive(Debug, Clone)]
pub struct PinnedVersions {
    text: String,
}

impl PinnedVersions {
    pub fn from_text<S: Into<String>>(text: S) -> Self {
        Self { text: text.into() }
    }

    /// Returns the pinned version of `name`.
    ///
    /// # Errors
    /// * `Error::MissingMandatoryValue` if `name` is blank
    pub fn get(&self, name: &str) -> Result<Option<String>> {
        require_not_blank("name", name)?;
        if METADATA_KEYS.contains(&name) {
            return Ok(None);
        }

        for line in self.text.lines() {
            let Some(captures) = ENTRY_RE.captures(line) else {
                continue;
            };
            if &captures[1] == name && !captures[2].is_empty() {
                return Ok(Some(captures[2].to_string()));
            }
        }
        Ok(None)
    }
}
