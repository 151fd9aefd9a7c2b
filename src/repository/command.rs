//! Child-process helper with an optional wall-clock limit.

use std::io;
use std::process::{Command, ExitStatus, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(5);

#[derive(Debug)]
pub(super) struct CommandOutput {
    pub(super) status: ExitStatus,
    pub(super) stdout: String,
    pub(super) stderr: String,
}

impl From<Output> for CommandOutput {
    fn from(output: Output) -> Self {
        Self {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

#[derive(Debug)]
pub(super) enum RunError {
    Spawn(io::Error),
    Io(io::Error),
    TimedOut,
}

/// Run `command` to completion, killing it once `timeout` elapses.
///
/// Output is collected after exit, so this suits commands that print little
/// (a full pipe would stall the child until the deadline).
pub(super) fn run(mut command: Command, timeout: Option<Duration>) -> Result<CommandOutput, RunError> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = command.spawn().map_err(RunError::Spawn)?;
    let Some(timeout) = timeout else {
        return child
            .wait_with_output()
            .map(CommandOutput::from)
            .map_err(RunError::Io);
    };
    let deadline = Instant::now() + timeout;
    loop {
        if child.try_wait().map_err(RunError::Io)?.is_some() {
            return child
                .wait_with_output()
                .map(CommandOutput::from)
                .map_err(RunError::Io);
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Err(RunError::TimedOut);
        }
        thread::sleep(POLL_INTERVAL);
    }
}
