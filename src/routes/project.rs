/*
 * PageCraft landing page builder, free/libre no-code tool for makers.
 * Copyright (c) 2025 PageCraft contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! Project API routes
//!
//! Routes:
//! - GET /api/project - Current project snapshot
//! - PUT /api/project - Replace with a fresh project
//! - POST /api/project/save - Stamp and persist
//! - POST /api/project/reset - Full teardown (storage + state)
//! - GET /api/project/export - Download the export envelope
//! - POST /api/project/import - Apply an export envelope
//! - GET /api/project/storage - Serialized-size accounting
//! - GET/POST /api/project/view - Read / change view state
//! - POST /api/project/select - Change the selection

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::models::{ComponentId, DeviceView, Project};
use crate::routes::AppState;
use crate::store::{export_file_name, StorageInfo, ViewState};

/// Build project routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(read_project))
        .route("/", put(create_project))
        .route("/save", post(save_project))
        .route("/reset", post(reset_builder))
        .route("/export", get(export_project))
        .route("/import", post(import_project))
        .route("/storage", get(storage_info))
        .route("/view", get(view_state))
        .route("/view", post(set_view))
        .route("/select", post(select_component))
}

// ==================
// Request/response types
// ==================

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub success: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectRequest {
    pub component_id: Option<ComponentId>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewRequest {
    pub device_view: Option<DeviceView>,
    pub preview_mode: Option<bool>,
}

// ==================
// Route handlers
// ==================

/// GET /api/project
async fn read_project(State(state): State<AppState>) -> Json<Project> {
    Json(state.store.project())
}

/// PUT /api/project
async fn create_project(State(state): State<AppState>) -> Json<Project> {
    Json(state.store.create_project().await)
}

/// POST /api/project/save
async fn save_project(State(state): State<AppState>) -> Json<Project> {
    Json(state.store.save_project().await)
}

/// POST /api/project/reset
async fn reset_builder(State(state): State<AppState>) -> Json<Project> {
    Json(state.store.reset_builder().await)
}

/// GET /api/project/export
///
/// Returns the export envelope as a file download named after the
/// sanitized project name.
async fn export_project(State(state): State<AppState>) -> impl IntoResponse {
    let envelope = state.store.export();
    let disposition = format!(
        "attachment; filename=\"{}\"",
        export_file_name(&envelope.project.name)
    );

    ([(header::CONTENT_DISPOSITION, disposition)], Json(envelope))
}

/// POST /api/project/import
///
/// Never fails: a rejected payload reports `success: false` and leaves
/// all collections untouched.
async fn import_project(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Json<ImportResponse> {
    let success = state.store.import(payload).await;
    Json(ImportResponse { success })
}

/// GET /api/project/storage
async fn storage_info(State(state): State<AppState>) -> Json<StorageInfo> {
    Json(state.store.storage_info())
}

/// GET /api/project/view
async fn view_state(State(state): State<AppState>) -> Json<ViewState> {
    Json(state.store.view_state())
}

/// POST /api/project/view
async fn set_view(
    State(state): State<AppState>,
    Json(request): Json<ViewRequest>,
) -> Json<ViewState> {
    if let Some(view) = request.device_view {
        state.store.set_device_view(view);
    }
    if let Some(active) = request.preview_mode {
        state.store.set_preview_mode(active);
    }
    Json(state.store.view_state())
}

/// POST /api/project/select
async fn select_component(
    State(state): State<AppState>,
    Json(request): Json<SelectRequest>,
) -> Json<ViewState> {
    state.store.select(request.component_id);
    Json(state.store.view_state())
}
