/*
 * PageCraft landing page builder, free/libre no-code tool for makers.
 * Copyright (c) 2025 PageCraft contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! Section and layout API routes
//!
//! Routes:
//! - POST /api/section/:id - Patch section fields
//! - DELETE /api/section/:id - Delete a section and its components
//! - POST /api/section/:id/components - Attach a component (constraint-checked)
//! - POST /api/layout - Load a layout (destructive: discards components)
//! - POST /api/template - Load a template (replaces project contents)
//!
//! The attach endpoint accepts either an existing component id or new
//! component data; a constraint rejection responds 200 with `null`
//! (logged server-side, never an error).

use axum::extract::{Path, State};
use axum::routing::{delete, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::models::{Component, PageLayout, Position, Project, Section, SectionPatch, Template};
use crate::routes::{AppState, DeletedResponse};
use crate::store::SectionInsert;

/// Build section routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/:id", post(update_section))
        .route("/:id", delete(delete_section))
        .route("/:id/components", post(attach_component))
}

// ==================
// Request types
// ==================

/// Body of the attach endpoint: a component (by id or as new data)
/// plus an optional drop position
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachRequest {
    pub component: SectionInsert,

    #[serde(default)]
    pub position: Option<Position>,
}

// ==================
// Route handlers
// ==================

/// POST /api/section/:id
async fn update_section(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<SectionPatch>,
) -> Json<Option<Section>> {
    Json(state.store.update_section(&id, patch).await)
}

/// DELETE /api/section/:id
async fn delete_section(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<DeletedResponse> {
    let deleted = state.store.delete_section(&id).await;
    Json(DeletedResponse { deleted })
}

/// POST /api/section/:id/components
async fn attach_component(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<AttachRequest>,
) -> Json<Option<Component>> {
    Json(
        state
            .store
            .add_component_to_section(request.component, &id, request.position)
            .await,
    )
}

/// POST /api/layout
pub async fn load_layout(
    State(state): State<AppState>,
    Json(layout): Json<PageLayout>,
) -> Json<Project> {
    Json(state.store.load_layout(layout).await)
}

/// POST /api/template
pub async fn load_template(
    State(state): State<AppState>,
    Json(template): Json<Template>,
) -> Json<Project> {
    Json(state.store.load_template(template).await)
}
