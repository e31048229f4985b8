//! Common constants used throughout kiln.

/// Suffix carried by template sources that must be rendered.
pub const TEMPLATE_SUFFIX: &str = ".j2";

/// Maven marker file probed at the project root.
pub const POM_XML: &str = "pom.xml";

/// Gradle marker file probed at the project root.
pub const BUILD_GRADLE: &str = "build.gradle";

/// Generated npm manifest.
pub const PACKAGE_JSON: &str = "package.json";

/// Pinned dependency versions, relative to the template root.
pub const PINNED_VERSIONS_NAMESPACE: &str = "dependencies";
pub const PINNED_VERSIONS_FILE: &str = "package.json";

pub const NEEDLE_DEPENDENCIES: &str = "\"kiln-needle-dependencies\"";
pub const NEEDLE_DEV_DEPENDENCIES: &str = "\"kiln-needle-devDependencies\"";
pub const NEEDLE_SCRIPTS: &str = "\"kiln-needle-scripts\"";

pub const MAIN_RESOURCES_CONFIG: &str = "src/main/resources/config";
pub const TEST_RESOURCES_CONFIG: &str = "src/test/resources/config";
pub const APPLICATION_PROPERTIES: &str = "application.properties";
pub const APPLICATION_FAST_PROPERTIES: &str = "application-fast.properties";

pub const NEEDLE_APPLICATION_PROPERTIES: &str = "# kiln-needle-application-properties";
pub const NEEDLE_APPLICATION_FAST_PROPERTIES: &str =
    "# kiln-needle-application-fast-properties";
pub const NEEDLE_APPLICATION_TEST_PROPERTIES: &str =
    "# kiln-needle-application-test-properties";

/// Signature used for commits when git has no user configured.
pub const DEFAULT_COMMITTER_NAME: &str = "kiln";
pub const DEFAULT_COMMITTER_EMAIL: &str = "kiln@localhost";
