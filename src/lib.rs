//! execp - run a program and capture its output
//!
//! Launches a program directly (no shell), captures stdout and stderr, and
//! resolves to a single outcome:
//!
//! - **Success** with the stdout text, unless the next rule applies
//! - **Failure** with the stderr text when the exit code is non-zero and
//!   stderr is non-empty
//!
//! A program that cannot be launched fails through the same path, with the
//! launch diagnostic as its description.
//!
//! ```no_run
//! # async fn demo() -> Result<(), execp::ExecError> {
//! let head = execp::exec_p("git", ["rev-parse", "HEAD"]).await?;
//! println!("{}", head.trim());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod logging;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use error::{ErrorInfo, ExecError};
pub use executor::{
    capture, exec_p, run_command, run_command_blocking, Accumulator, Capture, DecodePolicy,
    ExecOptions, ExitReport, Invocation, Stream,
};
