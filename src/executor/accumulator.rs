//! Per-stream output accumulation
//!
//! Each captured stream owns one `Accumulator`. Chunks are appended in the
//! order they arrive and decoded once, after the child has exited.

use std::fmt;
use std::string::FromUtf8Error;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which child stream an accumulator belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stream::Stdout => f.write_str("stdout"),
            Stream::Stderr => f.write_str("stderr"),
        }
    }
}

/// How captured bytes that are not valid UTF-8 are handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DecodePolicy {
    /// Replace invalid sequences with U+FFFD
    #[default]
    Lossy,
    /// Reject output that is not valid UTF-8
    Strict,
}

/// Append-only byte buffer for one stream
#[derive(Debug, Default, Clone)]
pub struct Accumulator {
    bytes: Vec<u8>,
    chunks: usize,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one chunk after everything received so far
    pub fn push(&mut self, chunk: &[u8]) {
        if chunk.is_empty() {
            return;
        }
        self.bytes.extend_from_slice(chunk);
        self.chunks += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Number of non-empty chunks appended
    pub fn chunk_count(&self) -> usize {
        self.chunks
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the accumulator and decode its contents as UTF-8
    pub fn decode(self, policy: DecodePolicy) -> Result<String, FromUtf8Error> {
        match policy {
            DecodePolicy::Strict => String::from_utf8(self.bytes),
            DecodePolicy::Lossy => Ok(match String::from_utf8(self.bytes) {
                Ok(text) => text,
                Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
            }),
        }
    }
}
