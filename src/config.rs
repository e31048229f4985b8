//! Project configuration for kiln.
//! Holds the well-known configuration keys, their defaults and validation rules, the enum
//! tags stored in the configuration, and the loader for project description files.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::sync::LazyLock;

/// Flat project configuration: key to JSON-like value.
pub type ConfigMap = IndexMap<String, Value>;

pub const BASE_NAME: &str = "baseName";
pub const PROJECT_NAME: &str = "projectName";
pub const PACKAGE_NAME: &str = "packageName";
pub const SERVER_PORT: &str = "serverPort";
pub const PRETTIER_DEFAULT_INDENT: &str = "prettierDefaultIndent";

pub const LANGUAGE: &str = "language";
pub const BUILD_TOOL: &str = "buildTool";
pub const SERVER: &str = "server";
pub const CLIENT: &str = "client";
pub const DATABASE: &str = "database";
pub const DATABASE_MIGRATION: &str = "databaseMigration";
pub const CACHE: &str = "cache";
pub const SECURITY: &str = "security";

static BASE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").expect("valid baseName pattern"));
static PACKAGE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9_]+(\.[a-z0-9_]+)*$").expect("valid packageName pattern")
});

/// Returns the default value for a well-known key, if it has one.
pub fn default_value(key: &str) -> Option<Value> {
    match key {
        BASE_NAME => Some(Value::from("myapp")),
        PROJECT_NAME => Some(Value::from("Kiln Project")),
        PACKAGE_NAME => Some(Value::from("com.mycompany.myapp")),
        SERVER_PORT => Some(Value::from(8080)),
        PRETTIER_DEFAULT_INDENT => Some(Value::from(2)),
        _ => None,
    }
}

/// Checks key specific constraints before a value enters the configuration.
///
/// # Errors
/// * `Error::UnauthorizedValue` if an identifier-like key holds something other than a
///   string matching its name pattern
pub fn validate(key: &str, value: &Value) -> Result<()> {
    let re: &Regex = match key {
        BASE_NAME => &BASE_NAME_RE,
        PACKAGE_NAME => &PACKAGE_NAME_RE,
        _ => return Ok(()),
    };

    let Some(text) = value.as_str() else {
        return Err(Error::unauthorized(key, "expected a string"));
    };

    if !re.is_match(text) {
        let reason = format!("'{text}' does not match {}", re.as_str());
        return Err(Error::unauthorized(key, reason));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageType {
    Java,
    Kotlin,
    TypeScript,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildToolType {
    Maven,
    Gradle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerFrameworkType {
    Spring,
    Quarkus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientFrameworkType {
    Angular,
    React,
    Vue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseType {
    Postgresql,
    Mysql,
    Mariadb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseMigrationType {
    Liquibase,
    Flyway,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheType {
    Ehcache,
    Caffeine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityType {
    Jwt,
    Oauth2,
}

/// Loads a project description file into a configuration map.
///
/// JSON is tried first and YAML second, so `.json`, `.yml` and `.yaml` files are all
/// accepted whatever their extension.
///
/// # Errors
/// * `Error::GenerationError` if the file can't be read or is neither JSON nor YAML
pub fn load_description<P: AsRef<Path>>(path: P) -> Result<ConfigMap> {
    let path = path.as_ref();
    debug!("Loading project description from {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::generation_caused_by(
            format!("Project description '{}' can't be read", path.display()),
            e,
        )
    })?;

    parse_description(&content).map_err(|e| {
        Error::generation_caused_by(
            format!("Project description '{}' is invalid", path.display()),
            e,
        )
    })
}

/// Parses a description body, JSON first, YAML as fallback.
pub fn parse_description(content: &str) -> std::result::Result<ConfigMap, serde_yaml::Error> {
    if content.trim().is_empty() {
        return Ok(ConfigMap::new());
    }
    match serde_json::from_str::<ConfigMap>(content) {
        Ok(config) => Ok(config),
        Err(_) => serde_yaml::from_str::<ConfigMap>(content),
    }
}
