#![allow(dead_code)]

use kiln::loader::TemplateRoot;
use kiln::project::Project;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const README_TXT: &str = "Read me, byte for byte.\n";

pub const EXAMPLE_PATCH: &str = "diff --git a/example.md b/example.md
new file mode 100644
index 0000000..c4357c4
--- /dev/null
+++ b/example.md
@@ -0,0 +1,3 @@
+# Example
+
+Applied from a patch.
";

/// Modifies a file that does not exist in the target tree.
pub const BROKEN_PATCH: &str = "diff --git a/missing.md b/missing.md
--- a/missing.md
+++ b/missing.md
@@ -1 +1 @@
-missing line
+replacement
";

pub fn folder_of(dir: &TempDir) -> String {
    dir.path().join("project").to_str().unwrap().to_string()
}

/// Project in a fresh, not yet created, folder under `dir`.
pub fn tmp_project(dir: &TempDir) -> Project {
    Project::build(folder_of(dir), None).unwrap()
}

pub fn builtin_templates() -> TemplateRoot {
    TemplateRoot::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("templates")).unwrap()
}

fn put(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Small template root used by the materializer tests.
pub fn fixture_templates(dir: &TempDir) -> (TemplateRoot, PathBuf) {
    let root = dir.path().join("templates");
    put(&root, "pkg/README.txt", README_TXT);
    put(&root, "pkg/docs/guide.txt", "Guide\n");
    put(&root, "mustache/README.md.j2", "# {{projectName}}");
    put(&root, "mustache/config/app.yml.j2", "name: {{ baseName }}\nport: {{ serverPort }}\n");
    put(&root, "mustache/LICENSE", "MIT\n");
    put(&root, "broken/file.txt.j2", "{% if %}");
    put(&root, "utils/example.patch", EXAMPLE_PATCH);
    put(&root, "utils/broken.patch", BROKEN_PATCH);
    (TemplateRoot::new(&root).unwrap(), root)
}

pub fn read(project: &Project, relative: &str) -> String {
    fs::read_to_string(project.folder().join(relative)).unwrap()
}

pub fn assert_file_exist(project: &Project, relative: &str) {
    let path = project.folder().join(relative);
    assert!(path.exists(), "expected {} to exist", path.display());
}
