/*
 * PageCraft landing page builder, free/libre no-code tool for makers.
 * Copyright (c) 2025 PageCraft contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! Static file serving for the builder frontend
//!
//! Serves a single directory at "/", with index.html as the SPA
//! fallback so client-side routes resolve after a page reload.

use std::path::PathBuf;

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

/// Serve the frontend directory at "/", if configured and present
pub fn configure_static_files<S: Clone + Send + Sync + 'static>(
    app: Router<S>,
    static_path: Option<PathBuf>,
) -> Router<S> {
    let Some(path) = static_path else {
        return app;
    };

    if !path.exists() {
        tracing::warn!("Static path {} does not exist", path.display());
        return app;
    }

    tracing::info!("Serving frontend from {}", path.display());
    let index = path.join("index.html");
    let serve_dir = ServeDir::new(&path).not_found_service(ServeFile::new(index));
    app.fallback_service(serve_dir)
}
