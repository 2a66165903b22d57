//! Process-wide resolver: one bootstrap per test binary, so one test here.

use fvm_home::{HomeState, HOME_ENV};
use std::fs;

#[test]
fn test_resolve_is_cached_for_the_process() {
    let tmp = tempfile::tempdir().unwrap();
    let home = tmp.path().join("customhome");
    std::env::set_var(HOME_ENV, &home);

    let first = fvm_home::resolve().unwrap();
    assert_eq!(first.home(), home);
    assert_eq!(first.state(), HomeState::Created);
    assert!(home.join(".fvmhome").is_file());

    // Later env changes are ignored; the first resolution sticks
    std::env::set_var(HOME_ENV, tmp.path().join("elsewhere"));
    let second = fvm_home::resolve().unwrap();
    assert!(std::ptr::eq(first, second));
    assert_eq!(fvm_home::fvm_home().unwrap(), home);
    assert!(!tmp.path().join("elsewhere").exists());

    assert_eq!(
        second.config().get_string(HOME_ENV),
        Some(home.to_string_lossy().into_owned())
    );

    let versions = fvm_home::versions_dir().unwrap();
    assert_eq!(versions, home.join("versions"));
    assert_eq!(fvm_home::versions_dir().unwrap(), versions);
    assert_eq!(fvm_home::temp_dir().unwrap(), home.join("temp"));

    // Derived dirs are re-checked on every call
    fs::remove_dir(&versions).unwrap();
    fs::write(&versions, "").unwrap();
    let err = fvm_home::versions_dir().unwrap_err();
    assert_eq!(err.kind(), fvm_home::ErrorKind::DerivedDir);
}
