//! Shared fixtures for workspace configuration tests
//!
//! Every test gets its own temporary home directory with a workspace at
//! `<home>/foo/bar`.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use remote_workspace::settings::{GLOBAL_CONFIG, VCS_IGNORE_FILE, WORKSPACE_CONFIG};
use remote_workspace::GlobalSettingsProvider;
use tempfile::TempDir;

/// Isolated home directory plus a workspace inside it.
pub struct TestEnv {
    home: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let env = Self {
            home: tempfile::tempdir().expect("Failed to create temp home"),
        };
        fs::create_dir_all(env.workspace()).expect("Failed to create workspace");
        env
    }

    pub fn home(&self) -> &Path {
        self.home.path()
    }

    pub fn workspace(&self) -> PathBuf {
        self.home.path().join("foo").join("bar")
    }

    pub fn global_path(&self) -> PathBuf {
        self.home.path().join(GLOBAL_CONFIG)
    }

    pub fn local_path(&self) -> PathBuf {
        self.workspace().join(WORKSPACE_CONFIG)
    }

    pub fn write_global(&self, text: &str) {
        let path = self.global_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    pub fn write_local(&self, text: &str) {
        fs::write(self.local_path(), text).unwrap();
    }

    pub fn write_vcs_ignore(&self, text: &str) {
        fs::write(self.workspace().join(VCS_IGNORE_FILE), text).unwrap();
    }

    pub fn read_local(&self) -> String {
        fs::read_to_string(self.local_path()).unwrap()
    }

    pub fn provider(&self) -> GlobalSettingsProvider {
        GlobalSettingsProvider::with_home(self.home())
    }
}

/// Owned strings, for comparing against resolved exclude lists.
pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Sorted copy, for comparisons that only care about set membership.
pub fn sorted(mut items: Vec<String>) -> Vec<String> {
    items.sort();
    items
}
