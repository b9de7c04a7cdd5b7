//! Async command execution with output capture
//!
//! Spawns a program directly (no shell), drains stdout and stderr
//! concurrently while waiting for exit, then turns the capture into a single
//! outcome:
//! - non-zero exit code with something on stderr fails with the stderr text
//! - anything else succeeds with the stdout text
//!
//! A program that cannot be launched at all lands on the same failure path:
//! its diagnostic is written into the stderr accumulator and the exit report
//! carries a non-zero code.
//!
//! The outcome settles when the child exits. Pipes inherited by processes the
//! child left running are not waited on: after exit, each stream gets a short
//! grace period to hand over what is already buffered.

use std::io::ErrorKind;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::sync::watch;
use tokio::time::{timeout_at, Instant};

use super::accumulator::{Accumulator, DecodePolicy, Stream};
use super::invocation::Invocation;
use crate::error::ExecError;

/// Size of the read buffer used for each stream
const READ_CHUNK_SIZE: usize = 8 * 1024;

/// How long a stream keeps draining after the child has exited
const DRAIN_GRACE: Duration = Duration::from_millis(100);

/// Exit code reported when a launch or wait error carries no OS error number
const UNKNOWN_FAILURE_CODE: i32 = -1;

/// Options for running a command
#[derive(Debug, Clone, Default)]
pub struct ExecOptions {
    /// How to decode captured output
    pub decode: DecodePolicy,
}

impl ExecOptions {
    /// Set the decode policy
    pub fn with_decode(mut self, decode: DecodePolicy) -> Self {
        self.decode = decode;
        self
    }
}

/// How the child process ended
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExitReport {
    /// Exit code; `None` when the process was killed by a signal
    pub code: Option<i32>,
    /// Name of the terminating signal (e.g. `SIGKILL`), Unix only
    pub signal: Option<String>,
}

impl ExitReport {
    pub fn from_status(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
            signal: terminating_signal(&status),
        }
    }

    /// Report for a process that never ran, or whose exit could not be observed
    fn from_io_error(err: &std::io::Error) -> Self {
        let code = err
            .raw_os_error()
            .filter(|n| *n != 0)
            .map(|n| -n)
            .unwrap_or(UNKNOWN_FAILURE_CODE);
        Self {
            code: Some(code),
            signal: None,
        }
    }

    /// True only for a present, non-zero exit code. An absent code is not a failure.
    pub fn is_failure_code(&self) -> bool {
        matches!(self.code, Some(code) if code != 0)
    }
}

#[cfg(unix)]
fn terminating_signal(status: &ExitStatus) -> Option<String> {
    use nix::sys::signal::Signal;
    use std::os::unix::process::ExitStatusExt;

    status.signal().map(|n| match Signal::try_from(n) {
        Ok(sig) => sig.as_str().to_string(),
        Err(_) => format!("SIG{}", n),
    })
}

#[cfg(not(unix))]
fn terminating_signal(_status: &ExitStatus) -> Option<String> {
    None
}

/// Everything captured from one finished invocation
#[derive(Debug)]
pub struct Capture {
    /// Rendered command line, for error context
    pub command: String,
    pub exit: ExitReport,
    pub stdout: Accumulator,
    pub stderr: Accumulator,
    /// Set when the program could not be started
    pub launch_error: Option<String>,
}

impl Capture {
    fn launch_failure(command: String, program: &str, err: &std::io::Error) -> Self {
        let description = format!("failed to launch '{}': {} ({:?})", program, err, err.kind());
        tracing::debug!("{}", description);

        let mut stderr = Accumulator::new();
        stderr.push(description.as_bytes());

        Self {
            command,
            exit: ExitReport::from_io_error(err),
            stdout: Accumulator::new(),
            stderr,
            launch_error: Some(description),
        }
    }

    /// Apply the outcome policy and decode the surfaced stream
    pub fn into_outcome(self, policy: DecodePolicy) -> Result<String, ExecError> {
        let Capture {
            command,
            exit,
            stdout,
            stderr,
            launch_error,
        } = self;

        if exit.is_failure_code() && !stderr.is_empty() {
            let description = match stderr.decode(policy) {
                Ok(text) => text,
                Err(_) => {
                    return Err(ExecError::InvalidUtf8 {
                        command,
                        stream: Stream::Stderr,
                    })
                }
            };

            return Err(if launch_error.is_some() {
                ExecError::LaunchFailed {
                    command,
                    description,
                }
            } else {
                ExecError::CommandFailed {
                    command,
                    exit_code: exit.code,
                    signal: exit.signal,
                    description,
                }
            });
        }

        stdout.decode(policy).map_err(|_| ExecError::InvalidUtf8 {
            command,
            stream: Stream::Stdout,
        })
    }
}

/// Run a program and capture its output and exit
///
/// Never fails: launch errors are folded into the returned capture. The
/// future completes once the child has exited and both streams have been
/// drained of what was written before exit.
pub async fn capture(invocation: &Invocation) -> Capture {
    let command = invocation.to_string();

    let mut cmd = Command::new(invocation.program());
    cmd.args(invocation.arguments());
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    tracing::debug!("Executing: {}", command);

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => return Capture::launch_failure(command, invocation.program(), &e),
    };

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let (exited_tx, exited_rx) = watch::channel(false);
    let wait = async {
        let status = child.wait().await;
        exited_tx.send_replace(true);
        status
    };

    let (stdout, mut stderr, status) = tokio::join!(
        read_stream(stdout, Stream::Stdout, exited_rx.clone()),
        read_stream(stderr, Stream::Stderr, exited_rx),
        wait,
    );

    let exit = match status {
        Ok(status) => ExitReport::from_status(status),
        Err(e) => {
            tracing::warn!("Failed to wait for '{}': {}", command, e);
            stderr.push(format!("failed to wait for '{}': {}", invocation.program(), e).as_bytes());
            ExitReport::from_io_error(&e)
        }
    };

    tracing::debug!(
        code = ?exit.code,
        signal = ?exit.signal,
        stdout_bytes = stdout.len(),
        stdout_chunks = stdout.chunk_count(),
        stderr_bytes = stderr.len(),
        stderr_chunks = stderr.chunk_count(),
        "Exited: {}",
        command
    );

    Capture {
        command,
        exit,
        stdout,
        stderr,
        launch_error: None,
    }
}

/// Drain a child stream into an accumulator, chunk by chunk
///
/// Reads until EOF, or until `DRAIN_GRACE` has passed since `exited` flipped
/// to true, whichever comes first.
async fn read_stream<R: AsyncRead + Unpin>(
    reader: Option<R>,
    stream: Stream,
    mut exited: watch::Receiver<bool>,
) -> Accumulator {
    let mut acc = Accumulator::new();
    let Some(mut reader) = reader else {
        return acc;
    };

    let mut buf = vec![0u8; READ_CHUNK_SIZE];
    let mut deadline: Option<Instant> = None;
    loop {
        if deadline.is_none() && *exited.borrow() {
            deadline = Some(Instant::now() + DRAIN_GRACE);
        }

        let read = match deadline {
            Some(deadline) => match timeout_at(deadline, reader.read(&mut buf)).await {
                Ok(read) => read,
                Err(_) => {
                    tracing::debug!("{} still open after exit, stopping capture", stream);
                    break;
                }
            },
            // `read` is cancel-safe, so losing the race to exit drops no bytes
            None => tokio::select! {
                read = reader.read(&mut buf) => read,
                changed = exited.changed() => {
                    // a dropped sender means nobody is waiting on the child anymore
                    if changed.is_err() {
                        deadline = Some(Instant::now() + DRAIN_GRACE);
                    }
                    continue;
                }
            },
        };

        match read {
            Ok(0) => break, // EOF
            Ok(n) => acc.push(&buf[..n]),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::warn!("Error reading {}: {}", stream, e);
                break;
            }
        }
    }

    acc
}

/// Run an invocation and resolve to its stdout text, or fail with its stderr text
///
/// # Errors
/// * `ExecError::LaunchFailed` - the program could not be started
/// * `ExecError::CommandFailed` - non-zero exit with output on stderr
/// * `ExecError::InvalidUtf8` - strict decoding rejected the surfaced stream
pub async fn run_command(invocation: &Invocation, options: &ExecOptions) -> Result<String, ExecError> {
    capture(invocation).await.into_outcome(options.decode)
}

/// Run `program` with `args` using default options
pub async fn exec_p<I, S>(program: &str, args: I) -> Result<String, ExecError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let invocation = Invocation::new(program).args(args);
    run_command(&invocation, &ExecOptions::default()).await
}

/// Execute a command synchronously (convenience wrapper for sync contexts)
///
/// This is a blocking wrapper around `run_command` for use in non-async code.
/// Must not be called from inside a Tokio runtime.
///
/// Fails with `ExecError::Runtime` if the runtime cannot be built, otherwise
/// exactly as `run_command`.
pub fn run_command_blocking(invocation: &Invocation, options: &ExecOptions) -> Result<String, ExecError> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| ExecError::Runtime {
            command: invocation.to_string(),
            message: e.to_string(),
        })?;

    rt.block_on(run_command(invocation, options))
}
