/*
 * PageCraft landing page builder, free/libre no-code tool for makers.
 * Copyright (c) 2025 PageCraft contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! Component data models
//!
//! A component is a single placeable content block on the canvas.
//! Content is a tagged union keyed by the component type, so the editor
//! side gets compile-time exhaustiveness, while every deserialization
//! boundary stays forgiving (unknown fields ignored, missing fields
//! defaulted) to cope with AI-generated payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::{is_false, SectionId};

/// Unique identifier for a component
pub type ComponentId = String;

/// Open map of visual style properties (colors, padding, etc.)
///
/// Styles are intentionally schemaless: the renderer interprets them,
/// the model only stores them.
pub type StyleMap = Map<String, Value>;

/// The closed set of component types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Hero,
    Feature,
    Testimonial,
    Pricing,
    Contact,
    Text,
    Image,
    Button,
}

impl ComponentKind {
    /// Wire name for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Hero => "hero",
            ComponentKind::Feature => "feature",
            ComponentKind::Testimonial => "testimonial",
            ComponentKind::Pricing => "pricing",
            ComponentKind::Contact => "contact",
            ComponentKind::Text => "text",
            ComponentKind::Image => "image",
            ComponentKind::Button => "button",
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Absolute canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }

    /// Offset applied to duplicated components
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// A width or height: pixels, or one of the keyword sentinels
/// ("100%" fills the container, "auto" sizes to content)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Px(f64),
    Keyword(SizeKeyword),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeKeyword {
    #[serde(rename = "100%")]
    Fill,
    #[serde(rename = "auto")]
    Auto,
}

impl Dimension {
    pub fn px(value: f64) -> Self {
        Dimension::Px(value)
    }

    pub fn fill() -> Self {
        Dimension::Keyword(SizeKeyword::Fill)
    }

    pub fn auto() -> Self {
        Dimension::Keyword(SizeKeyword::Auto)
    }
}

/// Component dimensions on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: Dimension,
    pub height: Dimension,
}

impl Default for Size {
    fn default() -> Self {
        Size {
            width: Dimension::px(320.0),
            height: Dimension::px(240.0),
        }
    }
}

// ==================
// Typed content, one variant per component kind
// ==================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroContent {
    pub title: String,
    pub subtitle: String,
    pub button_text: String,
    pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureContent {
    pub title: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestimonialContent {
    pub name: String,
    pub role: String,
    pub content: String,
    pub avatar: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingContent {
    pub title: String,
    pub price: String,
    pub period: String,
    pub features: Vec<String>,
    pub button_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactContent {
    pub title: String,
    pub subtitle: String,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextContent {
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageContent {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonContent {
    pub text: String,
    pub link: String,
}

/// Typed component content
///
/// Serialized adjacently as `"type": "...", "content": {...}` so the wire
/// shape matches the frontend's component records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "lowercase")]
pub enum ComponentContent {
    Hero(HeroContent),
    Feature(FeatureContent),
    Testimonial(TestimonialContent),
    Pricing(PricingContent),
    Contact(ContactContent),
    Text(TextContent),
    Image(ImageContent),
    Button(ButtonContent),
}

impl ComponentContent {
    /// The kind tag of this content
    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentContent::Hero(_) => ComponentKind::Hero,
            ComponentContent::Feature(_) => ComponentKind::Feature,
            ComponentContent::Testimonial(_) => ComponentKind::Testimonial,
            ComponentContent::Pricing(_) => ComponentKind::Pricing,
            ComponentContent::Contact(_) => ComponentKind::Contact,
            ComponentContent::Text(_) => ComponentKind::Text,
            ComponentContent::Image(_) => ComponentKind::Image,
            ComponentContent::Button(_) => ComponentKind::Button,
        }
    }

    /// All-default content for a kind
    pub fn empty(kind: ComponentKind) -> Self {
        match kind {
            ComponentKind::Hero => ComponentContent::Hero(Default::default()),
            ComponentKind::Feature => ComponentContent::Feature(Default::default()),
            ComponentKind::Testimonial => ComponentContent::Testimonial(Default::default()),
            ComponentKind::Pricing => ComponentContent::Pricing(Default::default()),
            ComponentKind::Contact => ComponentContent::Contact(Default::default()),
            ComponentKind::Text => ComponentContent::Text(Default::default()),
            ComponentKind::Image => ComponentContent::Image(Default::default()),
            ComponentKind::Button => ComponentContent::Button(Default::default()),
        }
    }

    /// Current content fields as a JSON object
    pub fn field_map(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(mut wrapper)) => match wrapper.remove("content") {
                Some(Value::Object(fields)) => fields,
                _ => Map::new(),
            },
            _ => Map::new(),
        }
    }

    /// Coerce a JSON object into content of the given kind
    ///
    /// Unknown fields are dropped, missing fields default. A field whose
    /// value cannot be coerced fails the whole intake; callers decide
    /// whether to fall back to `empty`.
    pub fn from_parts(kind: ComponentKind, fields: &Map<String, Value>) -> serde_json::Result<Self> {
        let wrapper = serde_json::json!({
            "type": kind.as_str(),
            "content": fields,
        });
        serde_json::from_value(wrapper)
    }

    /// Shallow-merge a patch object into this content, keeping the kind
    pub fn merged(&self, patch: &Map<String, Value>) -> serde_json::Result<Self> {
        let mut fields = self.field_map();
        for (key, value) in patch {
            fields.insert(key.clone(), value.clone());
        }
        Self::from_parts(self.kind(), &fields)
    }
}

/// A placeable unit of content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// Opaque unique identifier, assigned at creation
    pub id: ComponentId,

    /// Typed content, carrying the `type` + `content` wire fields
    #[serde(flatten)]
    pub content: ComponentContent,

    /// Open map of visual properties
    #[serde(default)]
    pub styles: StyleMap,

    /// Canvas position (meaningful outside sections, or in
    /// absolutely-positioned sections)
    #[serde(default)]
    pub position: Position,

    /// Component dimensions
    #[serde(default)]
    pub size: Size,

    /// Weak back-reference to the owning section, if any.
    /// The section's membership list is the authoritative record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<SectionId>,

    /// True if this component was produced by the generation service
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_ai_generated: bool,

    /// The prompt that produced this component, if AI-generated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_prompt: Option<String>,
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        self.content.kind()
    }
}

/// Component data without an id, as submitted by the frontend
/// when placing a new component
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComponent {
    #[serde(flatten)]
    pub content: ComponentContent,

    #[serde(default)]
    pub styles: StyleMap,

    #[serde(default)]
    pub position: Position,

    #[serde(default)]
    pub size: Size,
}

/// Field-level patch for an existing component
///
/// Absent fields are untouched. Patching `type` switches the content
/// variant, carrying over fields that both kinds share; this is NOT
/// re-validated against section constraints (only attach operations are).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComponentPatch {
    #[serde(rename = "type")]
    pub kind: Option<ComponentKind>,
    pub content: Option<Map<String, Value>>,
    pub styles: Option<StyleMap>,
    pub position: Option<Position>,
    pub size: Option<Size>,
}
