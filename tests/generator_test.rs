use kiln::config::{BASE_NAME, PROJECT_NAME};
use kiln::error::{ErrorKind, Result};
use kiln::generator::{step_by_name, Context, GeneratorStep, InitStep, Pipeline, PrettierStep};
use kiln::materializer::Materializer;
use kiln::project::Project;
use kiln::renderer::MiniJinjaRenderer;
use serde_json::json;
use tempfile::TempDir;

mod common;
use common::{assert_file_exist, builtin_templates, read, tmp_project};

struct NameStep(&'static str);

impl GeneratorStep for NameStep {
    fn name(&self) -> &str {
        "name"
    }

    fn apply(&self, _ctx: &Context<'_>, project: &mut Project) -> Result<()> {
        project.add_config(PROJECT_NAME, self.0)
    }
}

struct FailingStep;

impl GeneratorStep for FailingStep {
    fn name(&self) -> &str {
        "failing"
    }

    fn apply(&self, ctx: &Context<'_>, project: &mut Project) -> Result<()> {
        ctx.files.template(project, "nothing", "here.txt")
    }
}

#[test_log::test]
fn test_init_and_prettier() {
    let dir = TempDir::new().unwrap();
    let templates = builtin_templates();
    let renderer = MiniJinjaRenderer::new();
    let files = Materializer::new(&templates, &renderer);
    let versions = templates.pinned_versions().unwrap();
    let ctx = Context::new(&files, &versions);
    let mut project = tmp_project(&dir);
    project.add_config(BASE_NAME, "kilnDemo").unwrap();

    Pipeline::new().step(InitStep).step(PrettierStep).run(&ctx, &mut project).unwrap();

    assert_file_exist(&project, "README.md");
    assert_file_exist(&project, ".gitignore");
    assert_file_exist(&project, ".editorconfig");
    assert_file_exist(&project, ".prettierrc");
    assert_file_exist(&project, ".prettierignore");
    assert!(read(&project, "README.md").starts_with("# Kiln Project\n"));
    assert!(read(&project, ".prettierrc").contains("tabWidth: 2"));

    let manifest: serde_json::Value = serde_json::from_str(&read(&project, "package.json")).unwrap();
    assert_eq!(manifest["name"], "kiln-demo");
    assert_eq!(manifest["devDependencies"]["prettier"], "2.5.1");
    assert_eq!(manifest["devDependencies"]["prettier-plugin-packagejson"], "2.2.15");
    assert_eq!(manifest["scripts"]["prettier:format"], "prettier --write .");
    assert_eq!(project.get_config(BASE_NAME), Some(&json!("kilnDemo")));
}

#[test]
fn test_rerun_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let templates = builtin_templates();
    let renderer = MiniJinjaRenderer::new();
    let files = Materializer::new(&templates, &renderer);
    let versions = templates.pinned_versions().unwrap();
    let ctx = Context::new(&files, &versions);
    let pipeline = Pipeline::new().step(InitStep).step(PrettierStep);

    let mut project = tmp_project(&dir);
    pipeline.run(&ctx, &mut project).unwrap();
    let first = read(&project, "package.json");

    let mut project = tmp_project(&dir);
    pipeline.run(&ctx, &mut project).unwrap();
    assert_eq!(read(&project, "package.json"), first);
}

#[test]
fn test_first_writer_wins_across_steps() {
    let dir = TempDir::new().unwrap();
    let templates = builtin_templates();
    let renderer = MiniJinjaRenderer::new();
    let files = Materializer::new(&templates, &renderer);
    let versions = templates.pinned_versions().unwrap();
    let ctx = Context::new(&files, &versions);
    let mut project = tmp_project(&dir);

    Pipeline::new()
        .step(NameStep("Forge"))
        .step(InitStep)
        .step(NameStep("Anvil"))
        .run(&ctx, &mut project)
        .unwrap();

    assert_eq!(project.get_config(PROJECT_NAME), Some(&json!("Forge")));
    assert!(read(&project, "README.md").starts_with("# Forge\n"));
}

#[test]
fn test_failing_step_stops_the_run() {
    let dir = TempDir::new().unwrap();
    let templates = builtin_templates();
    let renderer = MiniJinjaRenderer::new();
    let files = Materializer::new(&templates, &renderer);
    let versions = templates.pinned_versions().unwrap();
    let ctx = Context::new(&files, &versions);
    let mut project = tmp_project(&dir);

    let err = Pipeline::new()
        .step(InitStep)
        .step(FailingStep)
        .step(PrettierStep)
        .run(&ctx, &mut project)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TemplateNotFound);
    assert_file_exist(&project, "README.md");
    assert!(!project.folder().join(".prettierrc").exists());
}

#[test]
fn test_prettier_needs_a_manifest() {
    let dir = TempDir::new().unwrap();
    let templates = builtin_templates();
    let renderer = MiniJinjaRenderer::new();
    let files = Materializer::new(&templates, &renderer);
    let versions = templates.pinned_versions().unwrap();
    let ctx = Context::new(&files, &versions);
    let mut project = tmp_project(&dir);

    let err = Pipeline::new().step(PrettierStep).run(&ctx, &mut project).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Generation);
}

#[test_log::test]
fn test_run_with_git() {
    let dir = TempDir::new().unwrap();
    let templates = builtin_templates();
    let renderer = MiniJinjaRenderer::new();
    let files = Materializer::new(&templates, &renderer);
    let versions = templates.pinned_versions().unwrap();
    let ctx = Context::new(&files, &versions);
    let mut project = tmp_project(&dir);

    Pipeline::new()
        .git_init(true)
        .step(InitStep)
        .commit("Init project")
        .run(&ctx, &mut project)
        .unwrap();

    let repo = git2::Repository::open(project.folder()).unwrap();
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    assert_eq!(head.message(), Some("Init project"));
    assert!(head.tree().unwrap().get_name("package.json").is_some());
    assert!(head.tree().unwrap().get_name(".gitignore").is_some());
}

#[test]
fn test_step_by_name() {
    assert_eq!(step_by_name("init").unwrap().name(), "init");
    assert_eq!(step_by_name("prettier").unwrap().name(), "prettier");

    let err = step_by_name("angular").err().unwrap();
    assert_eq!(err.kind(), ErrorKind::UnauthorizedValue);
    assert!(err.to_string().contains("angular"));
}
