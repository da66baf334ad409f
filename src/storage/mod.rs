/*
 * PageCraft landing page builder, free/libre no-code tool for makers.
 * Copyright (c) 2025 PageCraft contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! Storage ports for the builder's durable state
//!
//! The store owns the in-memory state; these ports mirror it to a
//! key-value byte store, best-effort.

mod fs_store;
mod memory;
mod traits;

pub use fs_store::FsStore;
pub use memory::MemoryStore;
pub use traits::{StorageKey, StoragePort};
