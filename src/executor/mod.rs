//! Command execution module
//!
//! Provides async command execution with:
//! - Direct program launch (no shell), arguments passed verbatim
//! - Concurrent stdout/stderr capture
//! - Exit code and signal reporting
//! - A single success-or-failure outcome per invocation

pub mod accumulator;
pub mod invocation;
pub mod runner;

pub use accumulator::{Accumulator, DecodePolicy, Stream};
pub use invocation::Invocation;
pub use runner::*;
