/*
 * PageCraft landing page builder, free/libre no-code tool for makers.
 * Copyright (c) 2025 PageCraft contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! AI generation gateway
//!
//! Adapts a user prompt into a request understood by the external
//! generation service and normalizes the response into the entity
//! model. The service itself (prompt engineering, the LLM call) is an
//! external collaborator; this module only speaks its JSON contract.

mod gateway;

pub use gateway::{AiGateway, GenerationBackend, HttpBackend};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Component, PageLayout, SectionId, Template};

/// What kind of entity to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationTarget {
    Component,
    Template,
    Layout,
}

impl GenerationTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationTarget::Component => "component",
            GenerationTarget::Template => "template",
            GenerationTarget::Layout => "layout",
        }
    }
}

impl std::fmt::Display for GenerationTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Editor context forwarded to the generation service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationContext {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub existing_components: Vec<Component>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_layout: Option<PageLayout>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_section: Option<SectionId>,
}

/// Request body sent to the generation service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub user_prompt: String,

    pub target: GenerationTarget,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<GenerationContext>,
}

/// Raw response body from the generation service, read leniently
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub warning: Option<String>,
}

/// A generated entity, normalized into the model
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum GeneratedData {
    Component(Component),
    Template(Template),
    Layout(PageLayout),
}

impl GeneratedData {
    /// Parse the service payload as the entity shape of the requested
    /// target. The service guarantees a minimal valid shape, so a parse
    /// failure here is a broken contract, not a user error.
    pub fn from_value(
        target: GenerationTarget,
        value: serde_json::Value,
    ) -> serde_json::Result<Self> {
        Ok(match target {
            GenerationTarget::Component => GeneratedData::Component(serde_json::from_value(value)?),
            GenerationTarget::Template => GeneratedData::Template(serde_json::from_value(value)?),
            GenerationTarget::Layout => GeneratedData::Layout(serde_json::from_value(value)?),
        })
    }

    /// Stamp AI provenance onto the entity
    pub fn stamp_provenance(&mut self, prompt: &str) {
        match self {
            GeneratedData::Component(component) => {
                component.is_ai_generated = true;
                component.ai_prompt = Some(prompt.to_string());
            }
            GeneratedData::Template(template) => {
                template.is_ai_generated = true;
                template.ai_prompt = Some(prompt.to_string());
            }
            GeneratedData::Layout(layout) => {
                layout.is_ai_generated = true;
                layout.ai_prompt = Some(prompt.to_string());
            }
        }
    }
}

/// Generation metadata attached to every successful result
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationMetadata {
    pub generated_at: DateTime<Utc>,

    pub prompt: String,

    #[serde(rename = "type")]
    pub target: GenerationTarget,
}

/// A successful generation: the normalized entity plus metadata
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Generation {
    pub data: GeneratedData,

    pub metadata: GenerationMetadata,

    /// Set when the service substituted a fallback for unparseable
    /// model output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Why a generation failed
///
/// Failures never mutate store state; the route layer folds them into
/// the `{success: false, error}` result shape.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Prompt must not be empty")]
    EmptyPrompt,

    #[error("AI generation failed: {0}")]
    Service(String),

    #[error("Generation request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed generation payload: {0}")]
    Payload(#[from] serde_json::Error),
}
