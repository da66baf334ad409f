/*
 * PageCraft landing page builder, free/libre no-code tool for makers.
 * Copyright (c) 2025 PageCraft contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! Template data models
//!
//! A template is a reusable bundle of components, optionally with a
//! predefined layout. Template component ids are relative: loading a
//! template into a project re-mints every id.

use serde::{Deserialize, Serialize};

use crate::models::{is_false, Component, PageLayout};

/// Unique identifier for a template
pub type TemplateId = String;

/// The fixed set of template categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    Business,
    Portfolio,
    Ecommerce,
    Saas,
    Agency,
    Blog,
}

impl Default for TemplateCategory {
    fn default() -> Self {
        TemplateCategory::Business
    }
}

/// A reusable bundle of components with descriptive metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: TemplateId,

    pub name: String,

    #[serde(default)]
    pub category: TemplateCategory,

    #[serde(default)]
    pub thumbnail: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub components: Vec<Component>,

    /// Optional predefined section layout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<PageLayout>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub is_ai_generated: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_prompt: Option<String>,
}
