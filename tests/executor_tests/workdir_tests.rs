//! Tests for the per-session working directory

use std::fs;
use std::path::Path;
use minftp::executor::WorkDir;
use tempfile::TempDir;

#[test]
fn test_new_canonicalizes_start() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("a")).unwrap();

    let workdir = WorkDir::new(temp.path().join("a/../a")).unwrap();

    let expected = fs::canonicalize(temp.path().join("a")).unwrap();
    assert_eq!(workdir.start(), expected);
    assert_eq!(workdir.cwd(), expected);
}

#[test]
fn test_new_rejects_file() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("f"), b"").unwrap();

    assert!(WorkDir::new(temp.path().join("f")).is_err());
}

#[test]
fn test_new_rejects_missing() {
    let temp = TempDir::new().unwrap();
    assert!(WorkDir::new(temp.path().join("missing")).is_err());
}

#[test]
fn test_resolve_relative_and_absolute() {
    let temp = TempDir::new().unwrap();
    let workdir = WorkDir::new(temp.path()).unwrap();

    assert_eq!(workdir.resolve("x.txt"), workdir.cwd().join("x.txt"));
    assert_eq!(workdir.resolve("/etc/hosts"), Path::new("/etc/hosts"));
}

#[test]
fn test_change_dir_and_reset() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("a/b")).unwrap();
    let mut workdir = WorkDir::new(temp.path()).unwrap();

    workdir.change_dir("a").unwrap();
    workdir.change_dir("b").unwrap();
    assert!(workdir.cwd().ends_with("a/b"));

    workdir.reset();
    assert_eq!(workdir.cwd(), workdir.start());
}

#[test]
fn test_change_dir_failure_keeps_cwd() {
    let temp = TempDir::new().unwrap();
    let mut workdir = WorkDir::new(temp.path()).unwrap();
    let before = workdir.cwd().to_path_buf();

    assert!(workdir.change_dir("").is_err());
    assert!(workdir.change_dir("missing").is_err());
    assert_eq!(workdir.cwd(), before);
}

#[test]
fn test_sessions_do_not_share_cwd() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("a")).unwrap();

    let mut first = WorkDir::new(temp.path()).unwrap();
    let second = WorkDir::new(temp.path()).unwrap();

    first.change_dir("a").unwrap();
    assert_eq!(second.cwd(), second.start());
    assert_ne!(first.cwd(), second.cwd());
}

#[cfg(unix)]
#[test]
fn test_change_dir_requires_search_permission() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let locked = temp.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o600)).unwrap();

    // Privileged users bypass directory permissions.
    if fs::metadata(locked.join(".")).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o700)).unwrap();
        return;
    }

    let mut workdir = WorkDir::new(temp.path()).unwrap();
    let before = workdir.cwd().to_path_buf();
    let result = workdir.change_dir("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o700)).unwrap();

    assert!(result.is_err());
    assert_eq!(workdir.cwd(), before);
}

#[cfg(unix)]
#[test]
fn test_change_dir_into_search_only_directory() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("search_only");
    fs::create_dir(&dir).unwrap();
    fs::set_permissions(&dir, fs::Permissions::from_mode(0o100)).unwrap();

    let mut workdir = WorkDir::new(temp.path()).unwrap();
    let result = workdir.change_dir("search_only");
    fs::set_permissions(&dir, fs::Permissions::from_mode(0o700)).unwrap();

    result.unwrap();
    assert!(workdir.cwd().ends_with("search_only"));
}
