//! Single-command execution for update steps.

use crate::{Result as UpdateErrorResult, UpdateError};

use gw_core::UpdateStep;

use std::panic::Location;
use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};

use error_location::ErrorLocation;
use tokio::process::Command;

/// Characters of stdout/stderr kept per step
pub const OUTPUT_TAIL_CHARS: usize = 4000;

/// A finished (or timed out) step
#[derive(Debug, Clone)]
pub struct StepRun {
    pub step: UpdateStep,
    /// Full stdout, used to read values like `git rev-parse HEAD`
    pub stdout: String,
    pub timed_out: bool,
}

impl StepRun {
    pub fn succeeded(&self) -> bool {
        !self.timed_out && self.step.exit_code == Some(0)
    }
}

/// Run `program args...` in `cwd`, killing it if `timeout` elapses.
///
/// Spawn failures are errors; non-zero exits and timeouts are not, they are
/// reported through the returned step.
pub async fn run_step(
    name: &str,
    program: &str,
    args: &[&str],
    cwd: &Path,
    envs: &[(&str, &str)],
    timeout: Duration,
) -> UpdateErrorResult<StepRun> {
    let display = display_command(program, args);
    let started = Instant::now();

    let mut command = Command::new(program);
    command
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    for (key, value) in envs {
        command.env(key, value);
    }

    let child = command.spawn().map_err(|e| UpdateError::Spawn {
        command: display.clone(),
        source: e,
        location: ErrorLocation::from(Location::caller()),
    })?;

    log::debug!("update step `{}` started: {}", name, display);

    let (output, timed_out) = match tokio::time::timeout(timeout, child.wait_with_output()).await
    {
        Ok(result) => {
            let output = result.map_err(|e| UpdateError::Io {
                path: cwd.to_path_buf(),
                source: e,
                location: ErrorLocation::from(Location::caller()),
            })?;
            (Some(output), false)
        }
        // Dropping the wait future drops the child, which kills it
        Err(_) => (None, true),
    };

    let duration_ms = started.elapsed().as_millis() as u64;

    let (stdout, stderr, exit_code) = match output {
        Some(output) => (
            String::from_utf8_lossy(&output.stdout).into_owned(),
            String::from_utf8_lossy(&output.stderr).into_owned(),
            output.status.code(),
        ),
        None => (String::new(), String::new(), None),
    };

    if timed_out {
        log::warn!("update step `{}` timed out after {}ms", name, duration_ms);
    } else {
        log::debug!(
            "update step `{}` finished exit={:?} in {}ms",
            name,
            exit_code,
            duration_ms
        );
    }

    Ok(StepRun {
        step: UpdateStep {
            name: name.to_string(),
            command: display,
            cwd: cwd.display().to_string(),
            duration_ms,
            stdout_tail: tail(&stdout, OUTPUT_TAIL_CHARS),
            stderr_tail: tail(&stderr, OUTPUT_TAIL_CHARS),
            exit_code,
        },
        stdout,
        timed_out,
    })
}

/// Last `max_chars` characters of `text`, or `None` when there is no output.
pub fn tail(text: &str, max_chars: usize) -> Option<String> {
    let trimmed = text.trim_end();
    if trimmed.is_empty() {
        return None;
    }

    let count = trimmed.chars().count();
    if count <= max_chars {
        Some(trimmed.to_string())
    } else {
        Some(trimmed.chars().skip(count - max_chars).collect())
    }
}

fn display_command(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}
