//! Configuration system tests
//!
//! Tests for config paths and host config loading/saving.

mod common;

use dockhost::config::HostConfig;
use dockhost::config_paths;
use dockhost::model::DocumentHost;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_file_ends_with_yaml() {
    if let Some(path) = config_paths::config_file() {
        assert!(path.to_string_lossy().ends_with("config.yaml"));
    }
}

#[test]
fn test_config_paths_under_app_dir() {
    if let (Some(dir), Some(file), Some(logs)) = (
        config_paths::config_dir(),
        config_paths::config_file(),
        config_paths::logs_dir(),
    ) {
        assert!(dir.to_string_lossy().contains("dockhost"));
        assert!(file.starts_with(&dir));
        assert!(logs.starts_with(&dir));
    }
}

// ========================================================================
// Host Config Tests
// ========================================================================

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let config = HostConfig {
        guard_unsaved_changes: false,
        log_close_requests: true,
        untitled_prefix: "Scratch".to_string(),
    };
    config.save_to(&path).unwrap();

    let loaded = HostConfig::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_load_from_partial_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "untitled_prefix: Draft\n").unwrap();

    let loaded = HostConfig::load_from(&path).unwrap();
    assert!(loaded.guard_unsaved_changes);
    assert_eq!(loaded.untitled_prefix, "Draft");
}

#[test]
fn test_load_from_invalid_yaml_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "guard_unsaved_changes: [not, a, bool]\n").unwrap();

    let err = HostConfig::load_from(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config"));
}

#[test]
fn test_load_from_missing_file_errors() {
    let dir = tempfile::tempdir().unwrap();
    assert!(HostConfig::load_from(&dir.path().join("absent.yaml")).is_err());
}

#[test]
fn test_loaded_config_drives_host_observers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "log_close_requests: false\n").unwrap();

    let config = HostConfig::load_from(&path).unwrap();
    let mut host = DocumentHost::with_config(&config);
    assert_eq!(host.close_requests().observer_count(), 1);

    let id = host.new_untitled();
    host.document_mut(id).unwrap().is_modified = true;
    assert!(!host.request_close(id).unwrap());

    let bare = DocumentHost::with_config(&common::bare_config());
    assert_eq!(bare.close_requests().observer_count(), 0);
}
