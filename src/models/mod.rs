/*
 * PageCraft landing page builder, free/libre no-code tool for makers.
 * Copyright (c) 2025 PageCraft contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! Data models for the PageCraft builder
//!
//! These types match the frontend's JSON shapes (camelCase field names)
//! to keep the API wire format stable.

mod component;
mod layout;
mod project;
mod template;

pub use component::*;
pub use layout::*;
pub use project::*;
pub use template::*;

/// Serde helper: skip serializing `false` provenance flags
pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}
