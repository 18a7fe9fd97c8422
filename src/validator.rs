//! Downstream build validation.
//! Runs the configured build command once at the end of a corpus pass and
//! reports whether the site still fails to build. A failure never rolls
//! back already-written fixes; it tells the operator that further passes
//! or manual follow-up are needed.

use crate::error::{Error, Result};
use log::debug;
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Outcome of a build validation run.
#[derive(Debug)]
pub enum BuildStatus {
    Pass,
    Fail { details: String },
}

impl BuildStatus {
    pub fn is_pass(&self) -> bool {
        matches!(self, BuildStatus::Pass)
    }
}

/// Invokes the build command through the shell and reports its status.
///
/// The child's output is drained on reader threads so a chatty build
/// cannot deadlock on a full pipe while we poll for exit. A child still
/// running at the deadline is killed and reported as a timeout failure.
///
/// # Arguments
/// * `command` - Shell command line, run with the corpus root as cwd
/// * `root_dir` - Corpus root directory
/// * `timeout` - Wall-clock budget for the build
///
/// # Errors
/// * `Error::BuildCommandError` if the shell cannot be spawned at all
pub fn validate_build(command: &str, root_dir: &Path, timeout: Duration) -> Result<BuildStatus> {
    debug!("Running build command: {}", command);
    let mut child = Command::new("sh")
        .arg("-c")
        .arg(command)
        .current_dir(root_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| Error::BuildCommandError(format!("Failed to spawn '{}': {}", command, e)))?;

    let stdout_pipe = child.stdout.take();
    let stderr_pipe = child.stderr.take();
    let stdout_reader = thread::spawn(move || read_all(stdout_pipe));
    let stderr_reader = thread::spawn(move || read_all(stderr_pipe));

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait()? {
            Some(status) => break Some(status),
            None if Instant::now() >= deadline => {
                child.kill().ok();
                child.wait().ok();
                break None;
            }
            None => thread::sleep(Duration::from_millis(100)),
        }
    };

    let stdout = stdout_reader.join().unwrap_or_default();
    let stderr = stderr_reader.join().unwrap_or_default();

    match status {
        None => Ok(BuildStatus::Fail {
            details: format!("Build timed out after {} seconds.", timeout.as_secs()),
        }),
        Some(status) if status.success() => Ok(BuildStatus::Pass),
        Some(status) => Ok(BuildStatus::Fail {
            details: format!("Build failed with {}.\n{}{}", status, stdout, stderr),
        }),
    }
}

fn read_all<R: Read>(pipe: Option<R>) -> String {
    let mut output = String::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_string(&mut output).ok();
    }
    output
}
