/*
 * PageCraft landing page builder, free/libre no-code tool for makers.
 * Copyright (c) 2025 PageCraft contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! Storage port definition
//!
//! The builder store mirrors its durable state through this port: a
//! byte-oriented key-value interface over a fixed set of keys. The port
//! is injected at construction, never reached through ambient globals.
//! Implementations might store data on:
//! - Local filesystem (FsStore)
//! - In-process memory (MemoryStore, for tests and ephemeral runs)

use async_trait::async_trait;

use crate::error::BuilderResult;

/// The fixed set of durable storage keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// The active project document
    CurrentProject,

    /// AI-generated templates, retained across projects
    DynamicTemplates,

    /// AI-generated components, retained across projects
    DynamicComponents,

    /// Editor-level user settings
    UserSettings,
}

impl StorageKey {
    /// Every key, in a stable order (used by full-teardown operations)
    pub const ALL: [StorageKey; 4] = [
        StorageKey::CurrentProject,
        StorageKey::DynamicTemplates,
        StorageKey::DynamicComponents,
        StorageKey::UserSettings,
    ];

    /// Durable name of this key
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::CurrentProject => "current_project",
            StorageKey::DynamicTemplates => "dynamic_templates",
            StorageKey::DynamicComponents => "dynamic_components",
            StorageKey::UserSettings => "user_settings",
        }
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// StoragePort persists the builder's durable collections
///
/// Each key holds one JSON document. Reads of absent keys return
/// `Ok(None)`; callers supply the defaults.
#[async_trait]
pub trait StoragePort: Send + Sync {
    /// Read the document stored under a key, if any
    async fn load(&self, key: StorageKey) -> BuilderResult<Option<String>>;

    /// Write the document stored under a key, replacing any previous value
    async fn save(&self, key: StorageKey, data: &str) -> BuilderResult<()>;

    /// Delete the document stored under a key; absent keys are not an error
    async fn remove(&self, key: StorageKey) -> BuilderResult<()>;
}
