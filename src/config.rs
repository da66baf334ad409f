/*
 * PageCraft landing page builder, free/libre no-code tool for makers.
 * Copyright (c) 2025 PageCraft contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! Configuration for the PageCraft server
//!
//! Loads settings from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL where the server is accessible (e.g., "http://localhost:6806")
    pub url: String,

    /// Port to listen on
    pub port: u16,

    /// Path where builder state is stored (FsStore)
    pub data_path: PathBuf,

    /// Directory with the builder frontend, served at "/"
    pub static_path: Option<PathBuf>,

    /// Endpoint of the external AI generation service.
    /// When unset, generation requests return a failure result.
    pub ai_endpoint: Option<String>,

    /// Bearer key sent to the generation service
    pub ai_api_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - PAGECRAFT_URL: Base URL (default: "http://localhost:6806")
    /// - PAGECRAFT_PORT: Port number (default: 6806)
    /// - PAGECRAFT_DATA_PATH: Builder state storage path (default: "./pagecraft/storage")
    /// - PAGECRAFT_STATIC_PATH: Frontend directory served at "/"
    /// - PAGECRAFT_AI_URL: Generation service endpoint
    /// - PAGECRAFT_AI_KEY: Generation service bearer key
    pub fn from_env() -> Self {
        // Try to load .env file, but don't fail if it doesn't exist
        let _ = dotenvy::dotenv();

        let port = env::var("PAGECRAFT_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(6806);

        let url =
            env::var("PAGECRAFT_URL").unwrap_or_else(|_| format!("http://localhost:{}", port));

        let data_path = env::var("PAGECRAFT_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./pagecraft/storage"));

        let static_path = env::var("PAGECRAFT_STATIC_PATH").ok().map(PathBuf::from);

        let ai_endpoint = env::var("PAGECRAFT_AI_URL").ok().filter(|v| !v.is_empty());
        let ai_api_key = env::var("PAGECRAFT_AI_KEY").ok().filter(|v| !v.is_empty());

        Config {
            url,
            port,
            data_path,
            static_path,
            ai_endpoint,
            ai_api_key,
        }
    }

    /// Get the full server URL including port
    pub fn server_url(&self) -> &str {
        &self.url
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            url: "http://localhost:6806".to_string(),
            port: 6806,
            data_path: PathBuf::from("./pagecraft/storage"),
            static_path: None,
            ai_endpoint: None,
            ai_api_key: None,
        }
    }
}
