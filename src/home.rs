//! fvm home directory validation and derived directory management.
//!
//! A valid home is a directory that either contains the `.fvmhome` magic
//! file or was empty (or missing) when first adopted. Derived directories
//! such as `versions/` and `temp/` live directly under the home and are
//! created on demand.

use crate::error::{HomeError, Result};
use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

/// What [`ensure_home`] found (and did) at the home path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeState {
    /// Path did not exist; directory and magic file were created.
    Created,
    /// Path was an empty directory; magic file was created.
    Adopted,
    /// Path was a directory already carrying the magic file.
    Existing,
}

/// Validate `home` as an fvm home directory, creating it if needed.
///
/// Symbolic links are never followed: a link at `home` is rejected even if
/// it points at a valid home. A non-empty directory without the magic file
/// is rejected untouched. Only a missing path is created; any other failure
/// to inspect it (such as a parent that is a regular file) is
/// [`HomeError::HomeUnreadable`].
pub fn ensure_home(home: &Path) -> Result<HomeState> {
    let magic = home.join(crate::MAGIC_FILE_NAME);

    let meta = match fs::symlink_metadata(home) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(home).map_err(|source| HomeError::HomeCreation {
                path: home.to_path_buf(),
                source,
            })?;
            info!(home = %home.display(), "created fvm home directory");
            create_magic_file(&magic)?;
            return Ok(HomeState::Created);
        }
        Err(source) => {
            return Err(HomeError::HomeUnreadable {
                path: home.to_path_buf(),
                source,
            })
        }
    };

    if !meta.is_dir() {
        return Err(HomeError::HomeNotDirectory {
            path: home.to_path_buf(),
        });
    }

    if is_empty_dir(home)? {
        create_magic_file(&magic)?;
        return Ok(HomeState::Adopted);
    }

    if !magic.is_file() {
        return Err(HomeError::MagicFileMissing {
            path: home.to_path_buf(),
        });
    }

    debug!(home = %home.display(), "fvm home is valid");
    Ok(HomeState::Existing)
}

/// Create the zero-byte magic marker file.
fn create_magic_file(magic: &Path) -> Result<()> {
    // Dropping the handle closes it; sync_all surfaces close-time errors.
    File::create(magic)
        .and_then(|f| f.sync_all())
        .map_err(|source| HomeError::MagicFile {
            path: magic.to_path_buf(),
            source,
        })?;
    info!(path = %magic.display(), "created fvm magic file");
    Ok(())
}

fn is_empty_dir(dir: &Path) -> Result<bool> {
    let mut entries = fs::read_dir(dir).map_err(|source| HomeError::HomeUnreadable {
        path: dir.to_path_buf(),
        source,
    })?;
    Ok(entries.next().is_none())
}

/// Get the path for a derived subdirectory: `<home>/<name>/`.
/// Creates the directory if it doesn't exist.
///
/// Not cached: every call re-checks the path, so a directory removed or
/// replaced between calls is noticed.
pub fn ensure_derived_dir(home: &Path, name: &str) -> Result<PathBuf> {
    let mut components = Path::new(name).components();
    if !matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) {
        return Err(HomeError::DerivedName(name.to_string()));
    }

    let dir = home.join(name);
    match fs::metadata(&dir) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(HomeError::DerivedNotDirectory {
                name: name.to_string(),
                path: dir,
            })
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(&dir).map_err(|source| HomeError::DerivedCreation {
                name: name.to_string(),
                path: dir.clone(),
                source,
            })?;
            info!(kind = name, path = %dir.display(), "created derived directory");
        }
        Err(source) => {
            return Err(HomeError::DerivedCreation {
                name: name.to_string(),
                path: dir,
                source,
            })
        }
    }
    Ok(dir)
}

/// Current working directory of the process.
pub fn working_dir() -> Result<PathBuf> {
    std::env::current_dir().map_err(HomeError::WorkingDir)
}
