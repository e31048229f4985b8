//! The project being generated: an immutable target folder plus a write-once
//! configuration map shared by every generation step of a run.

use crate::config::{self, ConfigMap};
use crate::config::{
    BuildToolType, CacheType, ClientFrameworkType, DatabaseMigrationType, DatabaseType,
    LanguageType, SecurityType, ServerFrameworkType,
};
use crate::constants::{BUILD_GRADLE, POM_XML};
use crate::error::{require_not_blank, Error, Result};
use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Project {
    folder: PathBuf,
    config: ConfigMap,
}

impl Project {
    /// Builds a project rooted at `folder`.
    ///
    /// A relative folder is resolved against the current directory. Initial entries go
    /// through the same validation as [`Project::add_config`].
    ///
    /// # Errors
    /// * `Error::MissingMandatoryValue` if `folder` is blank
    /// * `Error::UnauthorizedValue` if an initial entry fails validation
    pub fn build<S: AsRef<str>>(folder: S, config: Option<ConfigMap>) -> Result<Self> {
        let folder = folder.as_ref();
        require_not_blank("folder", folder)?;

        let folder = PathBuf::from(folder);
        let folder = if folder.is_absolute() {
            folder
        } else {
            std::env::current_dir()
                .map_err(|e| Error::generation_caused_by("Current directory is unavailable", e))?
                .join(folder)
        };

        let config = config.unwrap_or_default();
        for (key, value) in &config {
            config::validate(key, value)?;
        }

        Ok(Self { folder, config })
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn config(&self) -> &ConfigMap {
        &self.config
    }

    /// The configuration as a rendering context.
    pub fn context(&self) -> Value {
        Value::Object(self.config.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
    }

    pub fn get_config(&self, key: &str) -> Option<&Value> {
        self.config.get(key)
    }

    /// Adds `value` under `key` unless the key is already set.
    ///
    /// # Errors
    /// * `Error::UnauthorizedValue` if the value fails key specific validation; the
    ///   configuration is left untouched
    pub fn add_config<V: Into<Value>>(&mut self, key: &str, value: V) -> Result<()> {
        let value = value.into();
        config::validate(key, &value)?;

        if self.config.contains_key(key) {
            debug!("Config '{key}' already set, keeping the existing value");
            return Ok(());
        }
        self.config.insert(key.to_string(), value);
        Ok(())
    }

    /// Adds the default value of a well-known key unless the key is already set.
    pub fn add_default_config(&mut self, key: &str) {
        if self.config.contains_key(key) {
            return;
        }
        if let Some(value) = config::default_value(key) {
            self.config.insert(key.to_string(), value);
        }
    }

    /// Reads the string stored under `key`.
    ///
    /// # Returns
    /// * `Ok(None)` when the key is unset
    ///
    /// # Errors
    /// * `Error::UnauthorizedValue` if the stored value is not a string
    pub fn get_string_config(&self, key: &str) -> Result<Option<String>> {
        match self.config.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(Error::unauthorized(key, format!("{other} is not a string"))),
        }
    }

    /// Reads the integer stored under `key`.
    ///
    /// # Errors
    /// * `Error::UnauthorizedValue` if the stored value is not an integer
    pub fn get_integer_config(&self, key: &str) -> Result<Option<i64>> {
        match self.config.get(key) {
            None => Ok(None),
            Some(Value::Number(n)) if n.is_i64() => Ok(n.as_i64()),
            Some(other) => Err(Error::unauthorized(key, format!("{other} is not an integer"))),
        }
    }

    /// Reads an enum tag stored under `key`.
    ///
    /// # Errors
    /// * `Error::UnauthorizedValue` if the stored value is not a known tag of `T`
    pub fn get_enum_config<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.config.get(key) {
            None => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| Error::unauthorized(key, e.to_string())),
        }
    }

    pub fn get_base_name(&self) -> Result<Option<String>> {
        self.get_string_config(config::BASE_NAME)
    }

    pub fn get_project_name(&self) -> Result<Option<String>> {
        self.get_string_config(config::PROJECT_NAME)
    }

    pub fn get_package_name(&self) -> Result<Option<String>> {
        self.get_string_config(config::PACKAGE_NAME)
    }

    /// `com.acme.app` becomes `com/acme/app`.
    pub fn get_package_name_path(&self) -> Result<Option<PathBuf>> {
        Ok(self
            .get_package_name()?
            .map(|name| name.split('.').collect::<PathBuf>()))
    }

    // Typed settings below fail with `UnauthorizedValue` on an unknown tag.

    pub fn get_language(&self) -> Result<Option<LanguageType>> {
        self.get_enum_config(config::LANGUAGE)
    }

    pub fn get_build_tool(&self) -> Result<Option<BuildToolType>> {
        self.get_enum_config(config::BUILD_TOOL)
    }

    pub fn get_server(&self) -> Result<Option<ServerFrameworkType>> {
        self.get_enum_config(config::SERVER)
    }

    pub fn get_client(&self) -> Result<Option<ClientFrameworkType>> {
        self.get_enum_config(config::CLIENT)
    }

    pub fn get_database(&self) -> Result<Option<DatabaseType>> {
        self.get_enum_config(config::DATABASE)
    }

    pub fn get_database_migration(&self) -> Result<Option<DatabaseMigrationType>> {
        self.get_enum_config(config::DATABASE_MIGRATION)
    }

    pub fn get_cache(&self) -> Result<Option<CacheType>> {
        self.get_enum_config(config::CACHE)
    }

    pub fn get_security(&self) -> Result<Option<SecurityType>> {
        self.get_enum_config(config::SECURITY)
    }

    // Probed on every call: the folder changes while steps run.
    pub fn is_maven_project(&self) -> bool {
        self.folder.join(POM_XML).is_file()
    }

    pub fn is_gradle_project(&self) -> bool {
        self.folder.join(BUILD_GRADLE).is_file()
    }

    /// Precondition for build tool specific steps.
    pub fn check_build_tool(&self) -> Result<()> {
        if !self.is_maven_project() && !self.is_gradle_project() {
            return Err(Error::generation(format!(
                "No build tool found in '{}'",
                self.folder.display()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolves_relative_folders() {
        let project = Project::build("relative/target", None).unwrap();
        assert!(project.folder().is_absolute());
        assert!(project.folder().ends_with("relative/target"));
    }

    #[test]
    fn rejects_invalid_initial_config() {
        let mut config = ConfigMap::new();
        config.insert(config::BASE_NAME.to_string(), json!("bad name"));
        let err = Project::build("/tmp/kiln", Some(config)).unwrap_err();
        assert!(err.to_string().contains(config::BASE_NAME));
    }

    #[test]
    fn context_mirrors_config() {
        let mut project = Project::build("/tmp/kiln", None).unwrap();
        project.add_config("projectName", "Demo").unwrap();
        assert_eq!(project.context(), json!({"projectName": "Demo"}));
    }
}
