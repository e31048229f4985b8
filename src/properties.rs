//! Spring style `.properties` files filled through their needles.

use crate::constants::{
    APPLICATION_FAST_PROPERTIES, APPLICATION_PROPERTIES, MAIN_RESOURCES_CONFIG,
    NEEDLE_APPLICATION_FAST_PROPERTIES, NEEDLE_APPLICATION_PROPERTIES,
    NEEDLE_APPLICATION_TEST_PROPERTIES, TEST_RESOURCES_CONFIG,
};
use crate::error::{require_not_blank, Result};
use crate::materializer::Materializer;
use crate::needle::NeedlePatcher;
use crate::project::Project;
use std::fmt::Display;

/// Adds `key=value` lines before the needles of the main, fast and test properties files.
pub struct PropertiesPatcher<'a> {
    needles: NeedlePatcher<'a>,
}

impl<'a> PropertiesPatcher<'a> {
    pub fn new(files: &'a Materializer<'a>) -> Self {
        Self { needles: NeedlePatcher::new(files) }
    }

    /// Adds `key=value` to `src/main/resources/config/application.properties`.
    ///
    /// A line that is already present is not added twice.
    ///
    /// # Arguments
    /// * `project` - Project holding the properties file
    /// * `key` - Property key
    /// * `value` - Property value, written with its `Display` form
    ///
    /// # Errors
    /// * `Error::MissingMandatoryValue` if `key` is blank
    /// * `Error::NeedleNotFound` if the file has no properties needle
    /// * `Error::GenerationError` if the file is missing or can't be rewritten
    pub fn add_property<V: Display>(&self, project: &Project, key: &str, value: V) -> Result<()> {
        self.add(
            project,
            MAIN_RESOURCES_CONFIG,
            APPLICATION_PROPERTIES,
            NEEDLE_APPLICATION_PROPERTIES,
            key,
            value,
        )
    }

    /// Adds `key=value` to `src/main/resources/config/application-fast.properties`.
    pub fn add_fast_property<V: Display>(
        &self,
        project: &Project,
        key: &str,
        value: V,
    ) -> Result<()> {
        self.add(
            project,
            MAIN_RESOURCES_CONFIG,
            APPLICATION_FAST_PROPERTIES,
            NEEDLE_APPLICATION_FAST_PROPERTIES,
            key,
            value,
        )
    }

    /// Adds `key=value` to `src/test/resources/config/application.properties`.
    pub fn add_test_property<V: Display>(
        &self,
        project: &Project,
        key: &str,
        value: V,
    ) -> Result<()> {
        self.add(
            project,
            TEST_RESOURCES_CONFIG,
            APPLICATION_PROPERTIES,
            NEEDLE_APPLICATION_TEST_PROPERTIES,
            key,
            value,
        )
    }

    fn add<V: Display>(
        &self,
        project: &Project,
        dir: &str,
        filename: &str,
        needle: &str,
        key: &str,
        value: V,
    ) -> Result<()> {
        require_not_blank("key", key)?;
        let line = format!("{key}={value}");
        self.needles.insert_before(project, dir, filename, needle, &line)?;
        Ok(())
    }
}
