/*
 * PageCraft landing page builder, free/libre no-code tool for makers.
 * Copyright (c) 2025 PageCraft contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! Error types for the PageCraft server
//!
//! This module defines the error type used at the storage and API
//! boundaries. Store mutations themselves never error: missing ids are
//! no-ops and constraint rejections are silent (see the store module).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors that can occur in storage and API operations
///
/// Each variant maps to a specific HTTP status code for API responses.
#[derive(Error, Debug)]
pub enum BuilderError {
    /// Requested resource does not exist (HTTP 404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid input data (HTTP 400)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Filesystem operation failed (HTTP 500)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing/serialization failed (HTTP 500)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BuilderError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            BuilderError::NotFound(_) => StatusCode::NOT_FOUND,
            BuilderError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            BuilderError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BuilderError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Convert BuilderError into an HTTP response
///
/// This allows returning BuilderError directly from route handlers,
/// and Axum will automatically convert it to a JSON error response.
impl IntoResponse for BuilderError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!("Server error: {}", message);
        }

        let body = Json(json!({
            "error": true,
            "message": message
        }));

        (status, body).into_response()
    }
}

/// Result type alias for storage and API operations
pub type BuilderResult<T> = Result<T, BuilderError>;
