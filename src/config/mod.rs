//! Configuration module for execp
//!
//! Provides XDG-compliant layered configuration loading with
//! environment variable overrides.

pub mod loader;
pub mod model;

pub use loader::{config_paths, load_config, Loaded};
pub use model::*;
