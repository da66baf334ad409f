/*
 * PageCraft landing page builder, free/libre no-code tool for makers.
 * Copyright (c) 2025 PageCraft contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! Filesystem storage port
//!
//! Stores each durable key as one JSON file in the data directory:
//! ```text
//! data_path/
//!   current_project.json
//!   dynamic_templates.json
//!   dynamic_components.json
//!   user_settings.json
//! ```

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

use crate::error::{BuilderError, BuilderResult};
use crate::storage::traits::{StorageKey, StoragePort};

/// Filesystem-backed storage port
pub struct FsStore {
    /// Directory holding one file per storage key
    data_path: PathBuf,
}

impl FsStore {
    /// Create a new FsStore rooted at `data_path`
    pub fn new(data_path: PathBuf) -> Self {
        FsStore { data_path }
    }

    /// Ensure the data directory exists
    pub async fn init(&self) -> BuilderResult<()> {
        fs::create_dir_all(&self.data_path).await?;
        tracing::info!("Builder storage at {}", self.data_path.display());
        Ok(())
    }

    fn key_path(&self, key: StorageKey) -> PathBuf {
        self.data_path.join(format!("{}.json", key.as_str()))
    }
}

#[async_trait]
impl StoragePort for FsStore {
    async fn load(&self, key: StorageKey) -> BuilderResult<Option<String>> {
        match fs::read_to_string(self.key_path(key)).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BuilderError::Io(e)),
        }
    }

    async fn save(&self, key: StorageKey, data: &str) -> BuilderResult<()> {
        fs::create_dir_all(&self.data_path).await?;
        fs::write(self.key_path(key), data).await?;
        Ok(())
    }

    async fn remove(&self, key: StorageKey) -> BuilderResult<()> {
        match fs::remove_file(self.key_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BuilderError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_load_remove_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path().to_path_buf());
        store.init().await.unwrap();

        assert_eq!(store.load(StorageKey::CurrentProject).await.unwrap(), None);

        store
            .save(StorageKey::CurrentProject, r#"{"name":"Demo"}"#)
            .await
            .unwrap();
        assert_eq!(
            store.load(StorageKey::CurrentProject).await.unwrap(),
            Some(r#"{"name":"Demo"}"#.to_string())
        );

        store.remove(StorageKey::CurrentProject).await.unwrap();
        assert_eq!(store.load(StorageKey::CurrentProject).await.unwrap(), None);

        // removing an absent key is not an error
        store.remove(StorageKey::UserSettings).await.unwrap();
    }

    #[tokio::test]
    async fn keys_map_to_separate_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path().to_path_buf());

        store.save(StorageKey::DynamicTemplates, "[]").await.unwrap();
        store.save(StorageKey::DynamicComponents, "[1]").await.unwrap();

        assert!(dir.path().join("dynamic_templates.json").exists());
        assert!(dir.path().join("dynamic_components.json").exists());
        assert_eq!(
            store.load(StorageKey::DynamicComponents).await.unwrap(),
            Some("[1]".to_string())
        );
    }
}
