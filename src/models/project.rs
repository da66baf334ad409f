/*
 * PageCraft landing page builder, free/libre no-code tool for makers.
 * Copyright (c) 2025 PageCraft contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! Project data models
//!
//! The project is the root aggregate being edited: the flat component
//! list (single source of truth for all components, sectioned or not),
//! the optional active layout, and the project settings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Component, ComponentId, PageLayout};

/// Unique identifier for a project
pub type ProjectId = String;

/// Mint a prefixed entity id (e.g. `component_3f2a...`)
pub fn new_entity_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

/// Light/dark editor theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

/// Preview device selected in the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceView {
    Desktop,
    Tablet,
    Mobile,
}

impl Default for DeviceView {
    fn default() -> Self {
        DeviceView::Desktop
    }
}

/// Project-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettings {
    pub theme: Theme,
    pub primary_color: String,
    pub font_family: String,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        ProjectSettings {
            theme: Theme::Light,
            primary_color: "#3B82F6".to_string(),
            font_family: "Inter".to_string(),
        }
    }
}

/// The root document being edited
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,

    pub name: String,

    /// Flat list of all components, whether or not they live in a section
    #[serde(default)]
    pub components: Vec<Component>,

    /// Active section layout, if one has been loaded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<PageLayout>,

    #[serde(default)]
    pub settings: ProjectSettings,

    /// Stamped on every persisted mutation, ISO-8601 on the wire
    pub last_modified: DateTime<Utc>,
}

impl Project {
    /// A fresh, empty project with default settings
    pub fn new() -> Self {
        Project {
            id: new_entity_id("project"),
            name: "New Project".to_string(),
            components: Vec::new(),
            layout: None,
            settings: ProjectSettings::default(),
            last_modified: Utc::now(),
        }
    }

    pub fn find_component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|component| component.id == id)
    }

    pub fn find_component_mut(&mut self, id: &str) -> Option<&mut Component> {
        self.components
            .iter_mut()
            .find(|component| component.id == id)
    }

    /// Remove a component id from every section membership list
    pub fn detach_from_sections(&mut self, id: &ComponentId) {
        if let Some(layout) = &mut self.layout {
            for section in &mut layout.sections {
                section.components.retain(|member| member != id);
            }
        }
    }

    /// Stamp the modification time
    pub fn touch(&mut self) {
        self.last_modified = Utc::now();
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new()
    }
}
