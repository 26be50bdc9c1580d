//! Common test utilities for integration tests.
//!
//! This module provides helper functions and fixture builders for testing
//! the deepcfg library.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use deepcfg::logging::RecordingNotifier;
use deepcfg::{schema, ConfigStore};
use tempfile::TempDir;

/// Path to a checked-in configuration directory under `tests/fixtures`.
#[allow(dead_code)]
pub fn fixture_dir(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Creates a store for the built-in schema that records its notifications.
#[allow(dead_code)]
pub fn recording_store() -> (ConfigStore, Arc<RecordingNotifier>) {
    let recorder = Arc::new(RecordingNotifier::new());
    let store = ConfigStore::new(schema::builtin()).with_notifier(Arc::clone(&recorder));
    (store, recorder)
}

/// Copies a fixture directory into a fresh temporary directory.
///
/// Tests that delete or rewrite section files work on the copy.
#[allow(dead_code)]
pub fn copy_fixture(name: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for entry in fs::read_dir(fixture_dir(name)).unwrap() {
        let entry = entry.unwrap();
        fs::copy(entry.path(), dir.path().join(entry.file_name())).unwrap();
    }
    dir
}

/// Writes a section file.
#[allow(dead_code)]
pub fn write_section(dir: &Path, section: &str, contents: &str) -> PathBuf {
    let path = dir.join(format!("{section}.yaml"));
    fs::write(&path, contents).unwrap();
    path
}

/// Writes an empty file for every built-in section.
#[allow(dead_code)]
pub fn write_empty_sections(dir: &Path) {
    for section in schema::builtin().section_names() {
        write_section(dir, section, "");
    }
}
