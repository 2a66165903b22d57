//! Errors raised while bootstrapping the fvm home directory.
//!
//! Every failure is returned to the caller as a [`HomeError`]. Deciding to
//! terminate the process is left to the top-level binary.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of a [`HomeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The platform user-config directory can't be determined.
    Environment,
    /// The home directory can't be created.
    HomeCreation,
    /// An existing path at the home location is not a valid fvm home.
    HomeValidation,
    /// The magic marker file can't be created.
    MagicFile,
    /// The config file has the wrong type or can't be created/written.
    ConfigFile,
    /// The config file exists but can't be parsed.
    ConfigParse,
    /// A derived directory is not a directory or can't be created.
    DerivedDir,
    /// The current working directory can't be queried.
    WorkingDir,
    /// A previous bootstrap attempt in this process failed.
    Bootstrap,
}

/// Errors that can occur while resolving the fvm home and its derived paths.
#[derive(Debug, Error)]
pub enum HomeError {
    #[error("can't get user config dir, set FVM_HOME instead")]
    NoConfigDir,

    #[error("can't create fvm home directory {}: {source}", path.display())]
    HomeCreation { path: PathBuf, source: io::Error },

    #[error("invalid fvm home, {} is not a directory", path.display())]
    HomeNotDirectory { path: PathBuf },

    #[error("invalid fvm home {}, magic file \".fvmhome\" not present", path.display())]
    MagicFileMissing { path: PathBuf },

    #[error("can't inspect fvm home {}: {source}", path.display())]
    HomeUnreadable { path: PathBuf, source: io::Error },

    #[error("can't create magic file {}: {source}", path.display())]
    MagicFile { path: PathBuf, source: io::Error },

    #[error("invalid config file, {} is a {what}", path.display())]
    ConfigNotFile { path: PathBuf, what: &'static str },

    #[error("can't create the fvm config file {}: {source}", path.display())]
    ConfigCreate { path: PathBuf, source: io::Error },

    #[error("can't read the fvm config file {}: {source}", path.display())]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("can't write the fvm config file {}: {source}", path.display())]
    ConfigWrite { path: PathBuf, source: io::Error },

    #[error("can't load fvm config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: serde_yml::Error,
    },

    #[error("can't load fvm config file {}: top level is not a mapping", path.display())]
    ConfigNotMapping { path: PathBuf },

    #[error("can't serialize fvm config: {0}")]
    ConfigSerialize(#[source] serde_yml::Error),

    #[error("invalid {name} path, {} is not a directory", path.display())]
    DerivedNotDirectory { name: String, path: PathBuf },

    #[error("can't create {name} dir {}: {source}", path.display())]
    DerivedCreation {
        name: String,
        path: PathBuf,
        source: io::Error,
    },

    #[error("invalid derived directory name {0:?}")]
    DerivedName(String),

    #[error("can't get working directory: {0}")]
    WorkingDir(#[source] io::Error),

    #[error("fvm home bootstrap already failed in this process")]
    BootstrapFailed,
}

impl HomeError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            HomeError::NoConfigDir => ErrorKind::Environment,
            HomeError::HomeCreation { .. } => ErrorKind::HomeCreation,
            HomeError::HomeNotDirectory { .. }
            | HomeError::MagicFileMissing { .. }
            | HomeError::HomeUnreadable { .. } => ErrorKind::HomeValidation,
            HomeError::MagicFile { .. } => ErrorKind::MagicFile,
            HomeError::ConfigNotFile { .. }
            | HomeError::ConfigCreate { .. }
            | HomeError::ConfigRead { .. }
            | HomeError::ConfigWrite { .. }
            | HomeError::ConfigSerialize(_) => ErrorKind::ConfigFile,
            HomeError::ConfigParse { .. } | HomeError::ConfigNotMapping { .. } => {
                ErrorKind::ConfigParse
            }
            HomeError::DerivedNotDirectory { .. }
            | HomeError::DerivedCreation { .. }
            | HomeError::DerivedName(_) => ErrorKind::DerivedDir,
            HomeError::WorkingDir(_) => ErrorKind::WorkingDir,
            HomeError::BootstrapFailed => ErrorKind::Bootstrap,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HomeError>;
