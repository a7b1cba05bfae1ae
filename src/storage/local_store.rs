// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Key/value blob storage on the local filesystem.
//!
//! Mirrors the browser `localStorage` contract: every key maps to one string
//! value, and a value is always replaced as a whole. Each key is persisted as
//! its own file so that rewriting one blob never touches another.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};

use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use super::StoragePaths;

/// Error type for local storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Storage not initialized
    #[error("Storage not initialized")]
    NotInitialized,

    /// Key cannot be mapped to a file name
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Data read back differs from what was written
    #[error("Integrity violation: {0}")]
    IntegrityViolation(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Local key/value storage.
///
/// Values are written to a temp file and renamed into place, so a reader
/// sees either the previous blob or the new one, never a partial write.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    paths: StoragePaths,
    initialized: bool,
}

impl LocalStorage {
    /// Create a new LocalStorage instance.
    ///
    /// Does NOT initialize the directory structure. Call `initialize()` first.
    pub fn new(paths: StoragePaths) -> Self {
        Self {
            paths,
            initialized: false,
        }
    }

    /// Get the storage paths.
    pub fn paths(&self) -> &StoragePaths {
        &self.paths
    }

    /// Check if storage is initialized.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Create the directory layout. Safe to call multiple times.
    pub fn initialize(&mut self) -> StorageResult<()> {
        fs::create_dir_all(self.paths.items_dir())?;
        self.initialized = true;
        Ok(())
    }

    /// Write, read back and delete a scratch file in the data directory.
    pub fn health_check(&self) -> StorageResult<()> {
        self.ensure_initialized()?;

        let scratch = self.paths.health_check_file(&Uuid::new_v4().to_string());
        let data = b"health_check_data";

        fs::write(&scratch, data)?;
        let read_back = fs::read(&scratch);
        fs::remove_file(&scratch)?;
        let read_back = read_back?;

        if read_back != data {
            return Err(StorageError::IntegrityViolation(
                "Health check data mismatch".to_string(),
            ));
        }

        Ok(())
    }

    // ========== String Operations ==========

    /// Read the value stored under `key`, or `None` when the key is unset.
    pub fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        self.ensure_initialized()?;
        let path = self.item_path(key)?;

        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the value stored under `key`.
    pub fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.ensure_initialized()?;
        let path = self.item_path(key)?;

        let temp_path = path.with_extension("tmp");
        {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            writer.write_all(value.as_bytes())?;
            writer.flush()?;
        }

        fs::rename(&temp_path, &path)?;
        Ok(())
    }

    /// Remove `key`. Removing an unset key is not an error.
    pub fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.ensure_initialized()?;
        let path = self.item_path(key)?;

        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Check whether `key` currently holds a value.
    pub fn contains(&self, key: &str) -> StorageResult<bool> {
        self.ensure_initialized()?;
        Ok(self.item_path(key)?.is_file())
    }

    /// List every key that currently holds a value.
    pub fn keys(&self) -> StorageResult<Vec<String>> {
        self.ensure_initialized()?;

        let mut keys = Vec::new();
        for entry in fs::read_dir(self.paths.items_dir())? {
            let path = entry?.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }

    // ========== JSON Operations ==========

    /// Read and deserialize the JSON value stored under `key`.
    pub fn read_json<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        match self.get_item(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Serialize `value` and store it under `key`.
    pub fn write_json<T: Serialize>(&self, key: &str, value: &T) -> StorageResult<()> {
        let raw = serde_json::to_string(value)?;
        self.set_item(key, &raw)
    }

    fn ensure_initialized(&self) -> StorageResult<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(StorageError::NotInitialized)
        }
    }

    fn item_path(&self, key: &str) -> StorageResult<std::path::PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.paths.item(key))
    }
}
