//! Layered configuration loading
//!
//! Lowest to highest priority: built-in defaults, `/etc/execp/config.toml`,
//! `$XDG_CONFIG_HOME/execp/config.toml`, `~/.execp.toml`, `./.execp.toml`,
//! the `--config` file, then `EXECP_<SECTION>__<KEY>` variables.
//!
//! Loading runs before the subscriber is installed, so nothing here is
//! logged. What was merged and what was missing comes back in [`Loaded`] for
//! the caller to report.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use super::model::Config;

const APP_NAME: &str = "execp";

const ENV_PREFIX: &str = "EXECP_";

/// Result of resolving every configuration layer
#[derive(Debug)]
pub struct Loaded {
    pub config: Config,
    /// Files merged, lowest priority first
    pub files: Vec<PathBuf>,
    /// `--config` path that did not exist and was skipped
    pub missing_override: Option<PathBuf>,
}

/// Well-known config file locations, lowest priority first
pub fn config_paths() -> Vec<PathBuf> {
    let system = PathBuf::from("/etc").join(APP_NAME).join("config.toml");
    let xdg = dirs::config_dir().map(|dir| dir.join(APP_NAME).join("config.toml"));
    let home = dirs::home_dir().map(|dir| dir.join(format!(".{}.toml", APP_NAME)));
    let local = PathBuf::from(format!(".{}.toml", APP_NAME));

    std::iter::once(system)
        .chain(xdg)
        .chain(home)
        .chain(std::iter::once(local))
        .collect()
}

/// Resolve configuration from the well-known locations plus an optional
/// explicit file
///
/// A missing explicit file is not an error; it is reported through
/// [`Loaded::missing_override`]. A file that exists but does not parse, or a
/// value of the wrong type anywhere, fails the whole load.
pub fn load_config(override_path: Option<&Path>) -> Result<Loaded> {
    let (files, missing_override) = select_files(config_paths(), override_path);

    let config = files
        .iter()
        .fold(
            Figment::new().merge(Serialized::defaults(Config::default())),
            |figment, path| figment.merge(Toml::file(path)),
        )
        // EXECP_EXEC__DECODE=strict -> exec.decode = "strict"
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .context("Failed to load configuration")?;

    Ok(Loaded {
        config,
        files,
        missing_override,
    })
}

fn select_files(
    candidates: Vec<PathBuf>,
    override_path: Option<&Path>,
) -> (Vec<PathBuf>, Option<PathBuf>) {
    let mut files: Vec<PathBuf> = candidates.into_iter().filter(|p| p.is_file()).collect();

    let missing_override = match override_path {
        Some(path) if path.is_file() => {
            files.push(path.to_path_buf());
            None
        }
        Some(path) => Some(path.to_path_buf()),
        None => None,
    };

    (files, missing_override)
}
