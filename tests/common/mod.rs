//! Common test utilities for execp tests

#![allow(dead_code)]

use std::path::PathBuf;
use tempfile::TempDir;

/// Creates a temporary directory containing an executable script
#[cfg(unix)]
pub fn create_script(name: &str, content: &str) -> (TempDir, PathBuf) {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let script_path = dir.path().join(name);
    std::fs::write(&script_path, content).expect("Failed to write script");

    let mut perms = std::fs::metadata(&script_path)
        .expect("Failed to get metadata")
        .permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&script_path, perms).expect("Failed to set permissions");

    (dir, script_path)
}

/// Creates a temporary directory containing a file that is not executable
pub fn create_plain_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write file");
    (dir, path)
}

/// Creates a temporary config file
pub fn create_config(content: &str) -> (TempDir, PathBuf) {
    create_plain_file("config.toml", content)
}

/// Writes to stdout in several separate writes with pauses between them
pub const CHUNKED_STDOUT_SCRIPT: &str = r#"#!/bin/sh
printf 'first '
sleep 0.05
printf 'second '
sleep 0.05
printf 'third'
"#;

/// Interleaves both streams, then fails with diagnostics on stderr
pub const INTERLEAVED_FAILURE_SCRIPT: &str = r#"#!/bin/sh
printf 'out-1\n'
printf 'err-1\n' >&2
sleep 0.05
printf 'out-2\n'
printf 'err-2\n' >&2
exit 7
"#;

/// Echoes each argument on its own line, wrapped in brackets
pub const ECHO_ARGS_SCRIPT: &str = r#"#!/bin/sh
for arg in "$@"; do
    printf '[%s]\n' "$arg"
done
"#;
