//! Command-line interface implementation for escape-fix.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

/// Command-line arguments structure for escape-fix.
#[derive(Parser, Debug)]
#[command(author, version, about = "escape-fix: escapes template-conflict syntax in fenced code blocks", long_about = None)]
pub struct Args {
    /// Root directory of the documentation corpus to process
    #[arg(value_name = "ROOT_DIR")]
    pub root_dir: PathBuf,

    /// Report which files and regions would change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Run the configured build command after the pass and report its status
    #[arg(long)]
    pub validate_build: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to an explicit configuration file.
    /// By default the tool looks for escapefix.json, escapefix.yml or
    /// escapefix.yaml at the corpus root and falls back to built-in defaults.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Returns
/// * `Args` - Parsed command line arguments
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help()
                    .unwrap();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
