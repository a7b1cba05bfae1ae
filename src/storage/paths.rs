// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Path constants and utilities for the local storage layout.

use std::path::{Path, PathBuf};

/// Base directory for persistent storage when `DATA_DIR` is not set.
pub const DATA_ROOT: &str = "./data";

/// Storage path utilities for the local filesystem.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self::new(DATA_ROOT)
    }
}

impl StoragePaths {
    /// Create a new StoragePaths with a custom root (useful for testing).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory for all persisted data.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // ========== Key/Value Paths ==========

    /// Directory holding one blob file per storage key.
    pub fn items_dir(&self) -> PathBuf {
        self.root.join("local-storage")
    }

    /// Path to the blob stored under `key`.
    pub fn item(&self, key: &str) -> PathBuf {
        self.items_dir().join(format!("{key}.json"))
    }

    /// Scratch file for one health check; `token` keeps concurrent checks apart.
    pub fn health_check_file(&self, token: &str) -> PathBuf {
        self.root.join(format!(".health_check-{token}"))
    }
}
