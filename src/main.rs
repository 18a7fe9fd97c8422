//! escape-fix's main application entry point and orchestration logic.
//! Handles command-line argument parsing, the corpus processing pass,
//! the run summary and exit codes, and optional build validation.

use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use escape_fix::{
    cli::{get_args, Args},
    config::get_config,
    error::{default_error_handler, Error, Result},
    processor::{Processor, ProcessingResult},
    validator::{validate_build, BuildStatus},
    walker::collect_files,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Off
        })
        .init();

    match run(args) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(err) => default_error_handler(err),
    }
}

/// Main application logic execution.
///
/// # Arguments
/// * `args` - Parsed command line arguments
///
/// # Returns
/// * `Result<i32>` - Exit code for the process: 0 for a clean run, 1 when
///   one or more files had unterminated fences, 2 when build validation
///   failed after fixes were applied
///
/// # Flow
/// 1. Loads the corpus configuration (or defaults)
/// 2. Collects candidate files under the root
/// 3. Runs the per-file pass on a worker pool
/// 4. Prints the run summary, backups included
/// 5. Optionally validates the downstream build
fn run(args: Args) -> Result<i32> {
    if !args.root_dir.is_dir() {
        return Err(Error::ConfigError(format!(
            "Root directory does not exist: {}",
            args.root_dir.display()
        )));
    }

    let config = get_config(&args.root_dir, args.config.as_deref())?;
    if args.validate_build && config.build_command.is_none() {
        return Err(Error::ConfigError(
            "--validate-build requires a 'build_command' in the configuration".to_string(),
        ));
    }

    let files = collect_files(&args.root_dir, &config)?;
    let processor = Processor::new(&config, args.dry_run);

    // The pass is abortable between files; the CLI itself never sets the
    // flag, embedding callers can.
    let cancel = AtomicBool::new(false);
    let results = processor.run_pass(&files, &cancel);

    let mut changed: Vec<&ProcessingResult> = Vec::new();
    let mut fence_errors = 0usize;
    let mut io_errors = 0usize;

    for (path, result) in &results {
        match result {
            Ok(outcome) => {
                if outcome.changed {
                    let action = if args.dry_run { "Would escape" } else { "Escaped" };
                    println!(
                        "{} {} region(s) in '{}'",
                        action,
                        outcome.regions_changed,
                        outcome.path.display()
                    );
                    changed.push(outcome);
                }
            }
            Err(e @ Error::UnterminatedFence { .. }) => {
                eprintln!("{}", e);
                fence_errors += 1;
            }
            Err(e) => {
                // Per-file failures never abort the corpus run
                log::error!("Skipping '{}': {}", path.display(), e);
                io_errors += 1;
            }
        }
    }

    print_summary(&files, &changed, fence_errors, io_errors, args.dry_run);

    if args.validate_build {
        // Checked above; the command is present.
        if let Some(command) = config.build_command.as_deref() {
            let timeout = Duration::from_secs(config.build_timeout_secs);
            match validate_build(command, &args.root_dir, timeout)? {
                BuildStatus::Pass => println!("Build validation passed."),
                BuildStatus::Fail { details } => {
                    eprintln!("Build validation failed:\n{}", details);
                    if fence_errors == 0 {
                        return Ok(2);
                    }
                }
            }
        }
    }

    if fence_errors == 0 {
        Ok(0)
    } else {
        Ok(1)
    }
}

fn print_summary(
    files: &[PathBuf],
    changed: &[&ProcessingResult],
    fence_errors: usize,
    io_errors: usize,
    dry_run: bool,
) {
    println!(
        "Processed {} file(s): {} changed, {} unterminated-fence error(s), {} IO error(s).",
        files.len(),
        changed.len(),
        fence_errors,
        io_errors
    );

    if dry_run {
        println!("Dry run: no files were written.");
        return;
    }

    let backups: Vec<&PathBuf> =
        changed.iter().filter_map(|outcome| outcome.backup_path.as_ref()).collect();
    if !backups.is_empty() {
        println!("Backups written (cleanup is yours to schedule):");
        for backup in backups {
            println!("  {}", backup.display());
        }
    }
}
