//! Error handling for the escape-fix application.
//! Defines custom error types and results used throughout the application.

use std::io;
use thiserror::Error;

/// Custom error types for escape-fix operations.
///
/// This enum represents all possible errors that can occur while processing
/// a documentation corpus. It implements the standard Error trait through
/// thiserror's derive macro.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// A fenced code block that never closes before end of file.
    /// The file is skipped entirely; no partial mutation is performed.
    #[error("Unterminated fence in '{path}' (opened at line {line}).")]
    UnterminatedFence { path: String, line: usize },

    /// Represents errors that occur during configuration parsing or processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// The build validation command could not be spawned at all
    #[error("Build command error: {0}.")]
    BuildCommandError(String),

    /// Represents errors that occur during directory traversal
    #[error("Walk error: {0}.")]
    WalkError(String),
}

/// Convenience type alias for Results with escape-fix's Error as the error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) -> ! {
    eprintln!("{}", err);
    std::process::exit(1);
}
