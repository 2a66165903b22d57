//! `fvm_home` — Bootstrap of the fvm home directory.
//!
//! Provides:
//! - `home` — Validate or create the home (guarded by a `.fvmhome` magic file) and derived dirs
//! - `config` — Load `config.yaml` into a key/value store with explicit persistence
//! - `store` — YAML mapping read and atomic write
//! - `resolver` — One-time bootstrap, either owned (`Resolved`) or process-wide
//! - `logging` — `tracing` subscriber setup for binaries

use std::ffi::OsStr;
use std::path::PathBuf;

pub mod config;
pub mod error;
pub mod home;
pub mod logging;
pub mod resolver;
pub mod store;

pub use config::ConfigStore;
pub use error::{ErrorKind, HomeError, Result};
pub use home::{working_dir, HomeState};
pub use resolver::{fvm_home, resolve, temp_dir, versions_dir, Resolved};

/// Environment variable overriding the home location. Also the config key
/// under which the resolved home is exposed.
pub const HOME_ENV: &str = "FVM_HOME";

/// Home directory name under the platform config directory.
const FVM_DIR_NAME: &str = "fvm";

/// Sentinel file marking a directory as an fvm home.
pub const MAGIC_FILE_NAME: &str = ".fvmhome";

/// Config file name inside the home.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

pub const VERSIONS_DIR_NAME: &str = "versions";
pub const TEMP_DIR_NAME: &str = "temp";

/// Get the candidate fvm home path.
/// Respects `FVM_HOME` if set and non-empty, otherwise `<user config dir>/fvm`.
pub fn candidate_home() -> Result<PathBuf> {
    candidate_home_from(std::env::var_os(HOME_ENV).as_deref(), dirs::config_dir())
}

/// Pick the home path from an explicit env value and platform config dir.
pub fn candidate_home_from(
    env_value: Option<&OsStr>,
    config_dir: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(value) = env_value.filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(value));
    }
    config_dir
        .map(|dir| dir.join(FVM_DIR_NAME))
        .ok_or(HomeError::NoConfigDir)
}
