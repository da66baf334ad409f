/*
 * PageCraft landing page builder, free/libre no-code tool for makers.
 * Copyright (c) 2025 PageCraft contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! Layout and section data models
//!
//! A page layout is an ordered set of sections plus shared visual
//! defaults. Sections are named, constrained regions that hold
//! components; a section's `components` list is the authoritative
//! membership record, the component's `sectionId` is a lookup-only
//! back-reference.

use serde::{Deserialize, Serialize};

use crate::models::{is_false, ComponentId, ComponentKind, Dimension};

/// Unique identifier for a section
pub type SectionId = String;

/// Unique identifier for a layout
pub type LayoutId = String;

/// The closed set of section types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Header,
    Hero,
    Features,
    Testimonials,
    Pricing,
    Contact,
    Footer,
    Custom,
}

/// How a section arranges the components it holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    Flex,
    Grid,
    Absolute,
}

/// Declarative membership rules for a section
///
/// Constraints are per-section metadata, so different layouts can impose
/// different structural rules on the same component type set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionConstraints {
    /// Hard cap on the number of components in the section
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_components: Option<usize>,

    /// Component types accepted by the section; absent means any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_types: Option<Vec<ComponentKind>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutMode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<u32>,
}

/// A named region of a layout that contains components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: SectionId,

    pub name: String,

    #[serde(rename = "type")]
    pub kind: SectionKind,

    /// Sections are iterated sorted ascending by this value
    pub order: i32,

    pub height: Dimension,

    pub background_color: String,

    pub padding: f64,

    /// Authoritative membership list of component ids, in display order
    #[serde(default)]
    pub components: Vec<ComponentId>,

    #[serde(default)]
    pub constraints: SectionConstraints,
}

/// Shared visual defaults carried by a layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStyles {
    pub font_family: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub background_color: String,
}

impl Default for GlobalStyles {
    fn default() -> Self {
        GlobalStyles {
            font_family: "Inter".to_string(),
            primary_color: "#3B82F6".to_string(),
            secondary_color: "#64748B".to_string(),
            background_color: "#FFFFFF".to_string(),
        }
    }
}

/// An ordered collection of sections plus global style defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLayout {
    pub id: LayoutId,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub sections: Vec<Section>,

    #[serde(default)]
    pub global_styles: GlobalStyles,

    #[serde(default, skip_serializing_if = "is_false")]
    pub is_ai_generated: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_prompt: Option<String>,
}

impl PageLayout {
    /// Sections sorted ascending by `order` (stable for ties)
    pub fn ordered_sections(&self) -> Vec<&Section> {
        let mut sections: Vec<&Section> = self.sections.iter().collect();
        sections.sort_by_key(|section| section.order);
        sections
    }

    pub fn find_section(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == section_id)
    }

    pub fn find_section_mut(&mut self, section_id: &str) -> Option<&mut Section> {
        self.sections
            .iter_mut()
            .find(|section| section.id == section_id)
    }
}

/// Field-level patch for an existing section
///
/// The membership list is deliberately absent: membership changes go
/// through the constraint-checked attach path only, so both sides of the
/// component/section relation always move together.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionPatch {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<SectionKind>,
    pub order: Option<i32>,
    pub height: Option<Dimension>,
    pub background_color: Option<String>,
    pub padding: Option<f64>,
    pub constraints: Option<SectionConstraints>,
}
