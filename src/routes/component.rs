/*
 * PageCraft landing page builder, free/libre no-code tool for makers.
 * Copyright (c) 2025 PageCraft contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! Component API routes
//!
//! Routes:
//! - POST /api/component - Place a new component on the canvas
//! - GET /api/component/:id - Read a component
//! - POST /api/component/:id - Patch component fields
//! - DELETE /api/component/:id - Delete (cascades out of sections)
//! - POST /api/component/:id/move - Update position only
//! - POST /api/component/:id/duplicate - Clone with an offset
//!
//! Mutations addressed to unknown ids are no-ops: they respond 200 with
//! a `null` body (or `deleted: false`), matching the store's
//! never-throw conventions. Reads return 404.

use axum::extract::{Path, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};

use crate::error::{BuilderError, BuilderResult};
use crate::models::{Component, ComponentPatch, NewComponent, Position};
use crate::routes::{AppState, DeletedResponse};

/// Build component routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(add_component))
        .route("/:id", get(get_component))
        .route("/:id", post(update_component))
        .route("/:id", delete(delete_component))
        .route("/:id/move", post(move_component))
        .route("/:id/duplicate", post(duplicate_component))
}

// ==================
// Route handlers
// ==================

/// POST /api/component
async fn add_component(
    State(state): State<AppState>,
    Json(data): Json<NewComponent>,
) -> Json<Component> {
    Json(state.store.add_component(data).await)
}

/// GET /api/component/:id
async fn get_component(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> BuilderResult<Json<Component>> {
    state
        .store
        .find_component(&id)
        .map(Json)
        .ok_or_else(|| BuilderError::NotFound(format!("Component '{}' not found", id)))
}

/// POST /api/component/:id
async fn update_component(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ComponentPatch>,
) -> Json<Option<Component>> {
    Json(state.store.update_component(&id, patch).await)
}

/// DELETE /api/component/:id
async fn delete_component(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<DeletedResponse> {
    let deleted = state.store.delete_component(&id).await;
    Json(DeletedResponse { deleted })
}

/// POST /api/component/:id/move
async fn move_component(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(position): Json<Position>,
) -> Json<Option<Component>> {
    Json(state.store.move_component(&id, position).await)
}

/// POST /api/component/:id/duplicate
async fn duplicate_component(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<Option<Component>> {
    Json(state.store.duplicate_component(&id).await)
}
