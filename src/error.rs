//! Error types for execp
//!
//! A failed invocation displays exactly the diagnostic text it produced, so
//! callers can surface `err.to_string()` as-is. The structured fields carry
//! the surrounding context.

use serde::Serialize;
use thiserror::Error;

use crate::executor::Stream;

/// Failure outcome of running a command
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecError {
    /// The OS could not start the program
    #[error("{description}")]
    LaunchFailed {
        command: String,
        description: String,
    },

    /// The program exited non-zero and wrote to stderr
    #[error("{description}")]
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
        signal: Option<String>,
        description: String,
    },

    /// Captured output was not valid UTF-8 under strict decoding
    #[error("{stream} of '{command}' is not valid UTF-8")]
    InvalidUtf8 { command: String, stream: Stream },

    /// The blocking wrapper could not build its runtime; nothing was launched
    #[error("failed to create runtime for '{command}': {message}")]
    Runtime { command: String, message: String },
}

impl ExecError {
    /// Rendered command line of the failed invocation
    pub fn command(&self) -> &str {
        match self {
            ExecError::LaunchFailed { command, .. }
            | ExecError::CommandFailed { command, .. }
            | ExecError::InvalidUtf8 { command, .. }
            | ExecError::Runtime { command, .. } => command,
        }
    }

    /// Exit code, when the failure came from a process that ran
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ExecError::CommandFailed { exit_code, .. } => *exit_code,
            _ => None,
        }
    }
}

/// Serializable error info for JSON output
#[derive(Debug, Serialize, Clone)]
pub struct ErrorInfo {
    pub message: String,
    pub error_type: String,
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal: Option<String>,
}

impl From<&ExecError> for ErrorInfo {
    fn from(err: &ExecError) -> Self {
        match err {
            ExecError::LaunchFailed {
                command,
                description,
            } => ErrorInfo {
                message: description.clone(),
                error_type: "launch_failed".to_string(),
                command: command.clone(),
                suggestion: suggest_fix(command, description),
                exit_code: None,
                signal: None,
            },
            ExecError::CommandFailed {
                command,
                exit_code,
                signal,
                description,
            } => ErrorInfo {
                message: description.clone(),
                error_type: "command_failed".to_string(),
                command: command.clone(),
                suggestion: suggest_fix(command, description),
                exit_code: *exit_code,
                signal: signal.clone(),
            },
            ExecError::InvalidUtf8 { command, stream } => ErrorInfo {
                message: err.to_string(),
                error_type: "invalid_utf8".to_string(),
                command: command.clone(),
                suggestion: Some(format!(
                    "Use lossy decoding (--decode lossy) to read {} with replacement characters",
                    stream
                )),
                exit_code: None,
                signal: None,
            },
            ExecError::Runtime { command, .. } => ErrorInfo {
                message: err.to_string(),
                error_type: "runtime".to_string(),
                command: command.clone(),
                suggestion: None,
                exit_code: None,
                signal: None,
            },
        }
    }
}

/// Suggest fixes for common error patterns
pub fn suggest_fix(command: &str, stderr: &str) -> Option<String> {
    let program = command.split_whitespace().next().unwrap_or(command);

    if stderr.contains("Permission denied") || stderr.contains("PermissionDenied") {
        return Some(format!(
            "Permission denied. Check that '{}' is executable by the current user.",
            program
        ));
    }

    if stderr.contains("NotFound") || stderr.contains("command not found") {
        return Some(format!(
            "'{}' was not found. Check PATH or pass an absolute path.",
            program
        ));
    }

    if stderr.contains("No such file") {
        return Some("File not found. Check the arguments and working directory.".to_string());
    }

    None
}
