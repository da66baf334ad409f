/*
 * PageCraft landing page builder, free/libre no-code tool for makers.
 * Copyright (c) 2025 PageCraft contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! In-memory storage port
//!
//! Keeps all keys in a process-local map. Used by tests and by runs
//! that do not want durable state.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::BuilderResult;
use crate::storage::traits::{StorageKey, StoragePort};

/// Memory-backed storage port
///
/// Cloning shares the underlying map, so a test can keep a handle and
/// observe what the store persisted.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<StorageKey, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StoragePort for MemoryStore {
    async fn load(&self, key: StorageKey) -> BuilderResult<Option<String>> {
        let entries = self.entries.read().unwrap();
        Ok(entries.get(&key).cloned())
    }

    async fn save(&self, key: StorageKey, data: &str) -> BuilderResult<()> {
        let mut entries = self.entries.write().unwrap();
        entries.insert(key, data.to_string());
        Ok(())
    }

    async fn remove(&self, key: StorageKey) -> BuilderResult<()> {
        let mut entries = self.entries.write().unwrap();
        entries.remove(&key);
        Ok(())
    }
}
