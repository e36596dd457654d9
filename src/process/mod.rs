//! External process session runner.
//!
//! Two modes: batch (spawn, wait for natural exit, capture everything) and
//! scripted session (spawn, feed a predetermined command sequence to the
//! child's stdin, close it, then accumulate stdout until the process ends).
//!
//! A non-zero exit status is not an error at this layer. Debuggers routinely
//! exit non-zero after the target program ends while still having printed a
//! complete, usable transcript; callers inspect the captured output first.

use std::path::Path;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::TraceError;

/// Captured output of one child process session.
#[derive(Debug)]
pub struct SessionOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

/// Spawn a process, wait for it to exit on its own, and capture its output.
pub async fn run_batch(
    program: &str,
    args: &[&str],
    cwd: Option<&Path>,
) -> Result<SessionOutput, TraceError> {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let output = cmd.output().await.map_err(|e| launch_error(program, e))?;
    Ok(SessionOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        success: output.status.success(),
    })
}

/// Spawn a process, write `input_script` to its stdin, close the channel,
/// then wait for exit and return the accumulated output.
///
/// The script must end with whatever terminating command the protocol
/// requires (e.g. `quit`); closing stdin alone is not relied on to stop
/// the child.
pub async fn run_scripted(
    program: &str,
    args: &[&str],
    cwd: Option<&Path>,
    input_script: &str,
) -> Result<SessionOutput, TraceError> {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let mut child = cmd.spawn().map_err(|e| launch_error(program, e))?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| TraceError::ProcessLaunchError {
            program: program.to_string(),
            detail: "no stdin handle".to_string(),
        })?;
    stdin
        .write_all(input_script.as_bytes())
        .await
        .map_err(|e| launch_error(program, e))?;
    stdin.shutdown().await.map_err(|e| launch_error(program, e))?;
    drop(stdin);

    let output = child
        .wait_with_output()
        .await
        .map_err(|e| launch_error(program, e))?;
    Ok(SessionOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        success: output.status.success(),
    })
}

fn launch_error(program: &str, err: std::io::Error) -> TraceError {
    TraceError::ProcessLaunchError {
        program: program.to_string(),
        detail: err.to_string(),
    }
}
