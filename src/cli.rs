//! Command-line interface implementation for kiln.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

/// Command-line arguments structure for kiln.
#[derive(Parser, Debug)]
#[command(author, version, about = "kiln: configuration-driven project generation", long_about = None)]
pub struct Args {
    /// Project description file (JSON or YAML)
    #[arg(value_name = "DESCRIPTION")]
    pub description: PathBuf,

    /// Directory where the project is generated
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Template root directory
    #[arg(short, long, value_name = "DIR", default_value = "templates")]
    pub templates: PathBuf,

    /// Generation steps to apply, in order
    #[arg(short, long = "step", value_name = "NAME", default_values_t = [String::from("init")])]
    pub steps: Vec<String>,

    /// Initialize a git repository and commit the generated files
    #[arg(short, long)]
    pub git: bool,

    /// Commit message used with --git
    #[arg(short, long, value_name = "MSG", default_value = "Initial commit")]
    pub message: String,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
