//! YAML mapping read/write for the fvm config file.
//!
//! Writes are atomic: the document goes to a `.tmp` sibling first and is
//! then renamed over the target, so readers never see a partial file.

use crate::error::{HomeError, Result};
use serde_yml::{Mapping, Value};
use std::path::Path;

/// Read a YAML mapping from `path`.
///
/// An empty, whitespace-only, or comment-only document is an empty mapping.
/// Any other non-mapping top level is an error.
pub fn read_mapping(path: &Path) -> Result<Mapping> {
    let bytes = std::fs::read(path).map_err(|source| HomeError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    // Non-UTF-8 input falls through to the YAML loader, which rejects it.
    let blank = std::str::from_utf8(&bytes).is_ok_and(|content| {
        content
            .lines()
            .map(str::trim)
            .all(|line| line.is_empty() || line.starts_with('#'))
    });
    if blank {
        return Ok(Mapping::new());
    }

    let value: Value = serde_yml::from_slice(&bytes).map_err(|source| HomeError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(map) => Ok(map),
        _ => Err(HomeError::ConfigNotMapping {
            path: path.to_path_buf(),
        }),
    }
}

/// Write a YAML mapping to `path` atomically.
pub fn write_atomic(path: &Path, data: &Mapping) -> Result<()> {
    let tmp_path = path.with_extension("tmp");

    let yaml = if data.is_empty() {
        String::new()
    } else {
        serde_yml::to_string(data).map_err(HomeError::ConfigSerialize)?
    };

    let write_err = |source: std::io::Error| HomeError::ConfigWrite {
        path: path.to_path_buf(),
        source,
    };
    std::fs::write(&tmp_path, yaml).map_err(write_err)?;
    if let Err(source) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(write_err(source));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_read_empty_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "").unwrap();

        assert!(read_mapping(&path).unwrap().is_empty());
    }

    #[test]
    fn test_read_comment_only_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "# nothing configured yet\n").unwrap();

        assert!(read_mapping(&path).unwrap().is_empty());
    }

    #[test]
    fn test_read_mapping_values() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "FLUTTER_STORAGE_BASE_URL: https://example.com\nretries: 3\n")
            .unwrap();

        let map = read_mapping(&path).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(
            map.get("FLUTTER_STORAGE_BASE_URL").and_then(Value::as_str),
            Some("https://example.com")
        );
        assert_eq!(map.get("retries").and_then(Value::as_u64), Some(3));
    }

    #[test]
    fn test_read_sequence_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "- a\n- b\n").unwrap();

        let err = read_mapping(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigParse);
    }

    #[test]
    fn test_read_malformed_yaml() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "key: [unclosed\n").unwrap();

        let err = read_mapping(&path).unwrap_err();
        assert!(matches!(err, HomeError::ConfigParse { .. }));
    }

    #[test]
    fn test_read_invalid_utf8_is_parse_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, [0xff, 0xfe, b':', b' ', b'1']).unwrap();

        let err = read_mapping(&path).unwrap_err();
        assert!(matches!(err, HomeError::ConfigParse { .. }));
        assert_eq!(err.kind(), ErrorKind::ConfigParse);
    }

    #[test]
    fn test_write_atomic_failed_rename_removes_tmp() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("occupied"), "").unwrap();

        let mut map = Mapping::new();
        map.insert(Value::from("mirror"), Value::from("x"));
        let err = write_atomic(&path, &map).unwrap_err();
        assert!(matches!(err, HomeError::ConfigWrite { .. }));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_write_atomic_and_read() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");

        let mut map = Mapping::new();
        map.insert(Value::from("mirror"), Value::from("https://mirror.example"));
        write_atomic(&path, &map).unwrap();

        let loaded = read_mapping(&path).unwrap();
        assert_eq!(
            loaded.get("mirror").and_then(Value::as_str),
            Some("https://mirror.example")
        );

        // Ensure tmp file was cleaned up
        assert!(!path.with_extension("tmp").exists());
    }
}
