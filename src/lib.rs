/*
 * PageCraft landing page builder, free/libre no-code tool for makers.
 * Copyright (c) 2025 PageCraft contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! PageCraft Server Library
//!
//! This crate provides the core of the PageCraft landing page builder:
//! the typed entity model, the builder store with its section
//! constraint rules, persistence ports, the AI generation gateway, and
//! the HTTP API the browser frontend drives.

pub mod ai;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod storage;
pub mod store;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// Re-export commonly used types for convenience
pub use ai::{AiGateway, GenerationTarget};
pub use config::Config;
pub use error::BuilderError;
pub use models::{Component, PageLayout, Project, Section, Template};
pub use storage::{FsStore, MemoryStore, StorageKey, StoragePort};
pub use store::BuilderStore;

use routes::AppState;

/// Build the application router
///
/// Initializes the filesystem storage port, hydrates the builder store
/// from it, wires up the AI gateway when an endpoint is configured, and
/// returns the router together with the configured port.
pub async fn build_app(config: Config) -> anyhow::Result<(Router, u16)> {
    let port = config.port;

    let fs_store = FsStore::new(config.data_path.clone());
    fs_store.init().await?;

    let store = BuilderStore::init(Arc::new(fs_store)).await;

    let gateway = config
        .ai_endpoint
        .clone()
        .map(|endpoint| Arc::new(AiGateway::over_http(endpoint, config.ai_api_key.clone())));
    if gateway.is_none() {
        tracing::info!("No AI generation endpoint configured; generation requests will fail soft");
    }

    let static_path = config.static_path.clone();
    let state = AppState {
        config: Arc::new(config),
        store,
        gateway,
    };

    let app = Router::new()
        .nest("/api", routes::api_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let app = services::configure_static_files(app, static_path);

    Ok((app, port))
}
