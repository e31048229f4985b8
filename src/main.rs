//! kiln's application entry point.
//! Parses the command line, loads the project description and runs the requested
//! generation steps against the output directory.

use anyhow::Context as _;
use kiln::{
    cli::{get_args, Args},
    config::load_description,
    error::default_error_handler,
    generator::{step_by_name, Context, Pipeline},
    loader::TemplateRoot,
    materializer::Materializer,
    project::Project,
    renderer::MiniJinjaRenderer,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    if let Err(err) = run(args) {
        match err.downcast::<kiln::error::Error>() {
            Ok(err) => default_error_handler(err),
            Err(err) => {
                eprintln!("{err:#}");
                std::process::exit(1);
            }
        }
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads the project description into the configuration
/// 2. Opens the template root and the pinned versions it ships
/// 3. Builds the pipeline from the requested steps
/// 4. Runs it, wrapped by git init and commit when requested
fn run(args: Args) -> anyhow::Result<()> {
    let config = load_description(&args.description)?;
    let output_dir = args
        .output_dir
        .to_str()
        .context("Output directory is not valid UTF-8")?;
    let mut project = Project::build(output_dir, Some(config))?;

    let templates = TemplateRoot::new(&args.templates)?;
    let versions = templates.pinned_versions()?;
    let renderer = MiniJinjaRenderer::new();
    let files = Materializer::new(&templates, &renderer);
    let ctx = Context::new(&files, &versions);

    let mut pipeline = Pipeline::new().git_init(args.git);
    for name in &args.steps {
        pipeline = pipeline.boxed_step(step_by_name(name)?);
    }
    if args.git {
        pipeline = pipeline.commit(args.message.as_str());
    }

    pipeline.run(&ctx, &mut project)?;

    println!("Project generated successfully in {}.", project.folder().display());
    Ok(())
}
