//! External command execution with bounded timeouts.
//!
//! Runs a configured command, optionally feeding a payload to its stdin,
//! and captures stdout. Exit codes and stderr are always checked; a child
//! that outlives its deadline is killed rather than left to hang the run.

use std::{
    ffi::OsString,
    io::{Read, Write},
    process::{Child, Command, Stdio},
    thread,
    time::{Duration, Instant},
};
use thiserror::Error;

/// Poll interval while waiting for a child process to exit.
const WAIT_POLL: Duration = Duration::from_millis(10);

/// Errors from running an external command.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("command is empty")]
    EmptyCommand,

    #[error("failed to execute `{name}`: {source}")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{name}` did not finish within {}s", timeout.as_secs())]
    Timeout { name: String, timeout: Duration },

    #[error("`{name}` failed with {status}{}", fmt_stderr(stderr))]
    Failed {
        name: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("`{name}` produced invalid UTF-8 output")]
    NonUtf8 { name: String },
}

fn fmt_stderr(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// Run `command` with `args` appended, returning its stdout as a string.
///
/// `command` is the configured command vector: the first element is the
/// program, remaining elements are leading arguments. When `stdin` is
/// `Some`, the payload is piped to the child's standard input.
pub fn run(
    command: &[String],
    args: &[OsString],
    stdin: Option<&str>,
    timeout: Duration,
) -> Result<String, ExecError> {
    let name = command.first().ok_or(ExecError::EmptyCommand)?.clone();

    let mut cmd = Command::new(&command[0]);
    cmd.args(&command[1..])
        .args(args)
        .stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|source| ExecError::Spawn {
        name: name.clone(),
        source,
    })?;

    // Drain stdout/stderr on separate threads before touching stdin, so a
    // child filling its output pipe can never deadlock against our write.
    let stdout_handle = spawn_reader(child.stdout.take());
    let stderr_handle = spawn_reader(child.stderr.take());

    if let Some(payload) = stdin
        && let Some(mut pipe) = child.stdin.take()
    {
        // Ignore broken pipes: the child may legitimately exit early.
        pipe.write_all(payload.as_bytes()).ok();
    }

    let status = wait_with_deadline(&mut child, &name, timeout)?;

    let stdout = stdout_handle.join().unwrap_or_default();
    let stderr = stderr_handle.join().unwrap_or_default();

    if !status.success() {
        return Err(ExecError::Failed {
            name,
            status,
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
        });
    }

    String::from_utf8(stdout).map_err(|_| ExecError::NonUtf8 { name })
}

/// Collect a child output pipe on a background thread.
fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buf).ok();
        }
        buf
    })
}

/// Poll the child until it exits or the deadline passes.
///
/// On expiry the child is killed and reaped before the error returns, so no
/// zombie process survives the failed invocation.
fn wait_with_deadline(
    child: &mut Child,
    name: &str,
    timeout: Duration,
) -> Result<std::process::ExitStatus, ExecError> {
    let deadline = Instant::now() + timeout;

    loop {
        let status = child.try_wait().map_err(|source| ExecError::Spawn {
            name: name.to_owned(),
            source,
        })?;

        if let Some(status) = status {
            return Ok(status);
        }

        if Instant::now() >= deadline {
            child.kill().ok();
            child.wait().ok();
            return Err(ExecError::Timeout {
                name: name.to_owned(),
                timeout,
            });
        }

        thread::sleep(WAIT_POLL);
    }
}
