/*
 * PageCraft landing page builder, free/libre no-code tool for makers.
 * Copyright (c) 2025 PageCraft contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! AI generation API routes
//!
//! Routes:
//! - POST /api/ai/generate - Request a generation from the external service
//! - GET/POST /api/ai/templates - List / register generated templates
//! - DELETE /api/ai/templates/:id - Drop a generated template
//! - GET/POST /api/ai/components - List / register generated components
//! - DELETE /api/ai/components/:id - Drop a generated component
//!
//! Generation results are NOT committed to the project automatically:
//! the caller previews the result, then commits it through the ordinary
//! component/template/layout endpoints and registers it here for reuse.
//!
//! The generate endpoint always responds 200 with a result object;
//! failures are carried in `{success: false, error}` so the frontend
//! never has to unwrap transport errors.

use axum::extract::{Path, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::ai::{GeneratedData, GenerationContext, GenerationMetadata, GenerationTarget};
use crate::models::{Component, Template};
use crate::routes::{AppState, DeletedResponse};

/// Build AI routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generate))
        .route("/templates", get(list_templates))
        .route("/templates", post(register_template))
        .route("/templates/:id", delete(remove_template))
        .route("/components", get(list_components))
        .route("/components", post(register_component))
        .route("/components/:id", delete(remove_component))
}

// ==================
// Request/response types
// ==================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub prompt: String,

    pub target: GenerationTarget,

    #[serde(default)]
    pub context: Option<GenerationContext>,
}

/// The generation result object returned to the frontend
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<GeneratedData>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<GenerationMetadata>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerateResponse {
    fn failure(error: String) -> Self {
        GenerateResponse {
            success: false,
            data: None,
            metadata: None,
            warning: None,
            error: Some(error),
        }
    }
}

// ==================
// Route handlers
// ==================

/// POST /api/ai/generate
async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Json<GenerateResponse> {
    let Some(gateway) = &state.gateway else {
        return Json(GenerateResponse::failure(
            "AI generation is not configured".to_string(),
        ));
    };

    match gateway
        .generate(&request.prompt, request.target, request.context)
        .await
    {
        Ok(generation) => Json(GenerateResponse {
            success: true,
            data: Some(generation.data),
            metadata: Some(generation.metadata),
            warning: generation.warning,
            error: None,
        }),
        Err(e) => Json(GenerateResponse::failure(e.to_string())),
    }
}

/// GET /api/ai/templates
async fn list_templates(State(state): State<AppState>) -> Json<Vec<Template>> {
    Json(state.store.dynamic_templates())
}

/// POST /api/ai/templates
async fn register_template(
    State(state): State<AppState>,
    Json(template): Json<Template>,
) -> Json<Template> {
    Json(state.store.add_dynamic_template(template).await)
}

/// DELETE /api/ai/templates/:id
async fn remove_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<DeletedResponse> {
    let deleted = state.store.remove_dynamic_template(&id).await;
    Json(DeletedResponse { deleted })
}

/// GET /api/ai/components
async fn list_components(State(state): State<AppState>) -> Json<Vec<Component>> {
    Json(state.store.dynamic_components())
}

/// POST /api/ai/components
async fn register_component(
    State(state): State<AppState>,
    Json(component): Json<Component>,
) -> Json<Component> {
    Json(state.store.add_dynamic_component(component).await)
}

/// DELETE /api/ai/components/:id
async fn remove_component(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<DeletedResponse> {
    let deleted = state.store.remove_dynamic_component(&id).await;
    Json(DeletedResponse { deleted })
}
