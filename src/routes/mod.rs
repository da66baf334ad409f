/*
 * PageCraft landing page builder, free/libre no-code tool for makers.
 * Copyright (c) 2025 PageCraft contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! API routes for the PageCraft server
//!
//! This module defines all HTTP endpoints for the builder API.
//! Routes are organized into submodules by functionality. Handlers are
//! thin: every operation is a store (or gateway) call.

mod ai;
mod component;
mod project;
mod section;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::ai::AiGateway;
use crate::config::Config;
use crate::store::BuilderStore;

/// Shared application state
///
/// This state is available to all route handlers via Axum's State extractor.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<Config>,

    /// The builder store (cloneable handle over shared state)
    pub store: BuilderStore,

    /// Gateway to the generation service, when one is configured
    pub gateway: Option<Arc<AiGateway>>,
}

/// Build the API router with all routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        // Project routes (snapshot, lifecycle, transfer)
        .nest("/project", project::routes())
        // Component routes (canvas operations)
        .nest("/component", component::routes())
        // Section routes (layout-scoped operations)
        .nest("/section", section::routes())
        // Loading a layout or template replaces project contents
        .route("/layout", post(section::load_layout))
        .route("/template", post(section::load_template))
        // AI generation and the dynamic collections
        .nest("/ai", ai::routes())
}

/// Health check endpoint
///
/// Returns a simple JSON response to verify the server is running.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "service": "pagecraft-server",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Shared response for delete-style operations
#[derive(Debug, serde::Serialize)]
pub struct DeletedResponse {
    pub deleted: bool,
}
