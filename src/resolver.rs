//! One-time bootstrap of the fvm home and its config.
//!
//! [`Resolved::bootstrap`] runs the whole sequence for an explicit path and
//! hands back a value the caller owns. The free functions here wrap a
//! process-wide instance that is bootstrapped on first use.

use crate::config::{confirm_config_file, ConfigStore};
use crate::error::{HomeError, Result};
use crate::home::{ensure_derived_dir, ensure_home, HomeState};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;
use tracing::debug;

/// A validated fvm home together with its loaded config.
#[derive(Debug, Clone)]
pub struct Resolved {
    home: PathBuf,
    state: HomeState,
    config: ConfigStore,
}

impl Resolved {
    /// Validate or create `home`, confirm and load `config.yaml`, and inject
    /// the home path as the `FVM_HOME` override.
    pub fn bootstrap(home: PathBuf) -> Result<Self> {
        let state = ensure_home(&home)?;

        let config_path = home.join(crate::CONFIG_FILE_NAME);
        confirm_config_file(&config_path)?;
        let mut config = ConfigStore::load(&config_path)?;
        config.set_override(crate::HOME_ENV, home.to_string_lossy().into_owned());

        debug!(home = %home.display(), ?state, "fvm home resolved");
        Ok(Self {
            home,
            state,
            config,
        })
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// What bootstrap found at the home path.
    pub fn state(&self) -> HomeState {
        self.state
    }

    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ConfigStore {
        &mut self.config
    }

    /// `<home>/<name>`, created if missing.
    pub fn derived_dir(&self, name: &str) -> Result<PathBuf> {
        ensure_derived_dir(&self.home, name)
    }

    /// `<home>/versions`, created if missing.
    pub fn versions_dir(&self) -> Result<PathBuf> {
        self.derived_dir(crate::VERSIONS_DIR_NAME)
    }

    /// `<home>/temp`, created if missing.
    pub fn temp_dir(&self) -> Result<PathBuf> {
        self.derived_dir(crate::TEMP_DIR_NAME)
    }
}

static STARTED: AtomicBool = AtomicBool::new(false);
static RESOLVED: OnceLock<Resolved> = OnceLock::new();

/// Bootstrap the process-wide fvm home on first call, then return it.
///
/// The started flag is set before any fallible work. If the first attempt
/// fails, later calls return [`HomeError::BootstrapFailed`] without touching
/// the filesystem again. Assumes a single bootstrapping thread.
pub fn resolve() -> Result<&'static Resolved> {
    if let Some(resolved) = RESOLVED.get() {
        return Ok(resolved);
    }
    if STARTED.swap(true, Ordering::SeqCst) {
        return Err(HomeError::BootstrapFailed);
    }

    let resolved = Resolved::bootstrap(crate::candidate_home()?)?;
    Ok(RESOLVED.get_or_init(|| resolved))
}

/// The process-wide fvm home path.
pub fn fvm_home() -> Result<&'static Path> {
    Ok(resolve()?.home())
}

/// The process-wide versions directory, created if missing.
pub fn versions_dir() -> Result<PathBuf> {
    resolve()?.versions_dir()
}

/// The process-wide temp directory, created if missing.
pub fn temp_dir() -> Result<PathBuf> {
    resolve()?.temp_dir()
}
