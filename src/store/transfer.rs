/*
 * PageCraft landing page builder, free/libre no-code tool for makers.
 * Copyright (c) 2025 PageCraft contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! Project export/import envelope
//!
//! One JSON schema for both directions: a full snapshot of the active
//! project plus the AI collections. Import tolerates unknown and missing
//! top-level fields; only `project` is required.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Component, Project, Template};

/// Current export format version
pub const EXPORT_VERSION: &str = "1.0";

/// Top-level export payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectExport {
    pub project: Project,

    #[serde(default)]
    pub dynamic_templates: Vec<Template>,

    #[serde(default)]
    pub dynamic_components: Vec<Component>,

    pub exported_at: DateTime<Utc>,

    pub version: String,
}

/// Import payload: the export envelope read leniently
///
/// `exportedAt`/`version` and any unknown fields are ignored; the AI
/// collections default to empty when absent. A malformed `project` (or a
/// malformed present collection) fails the whole parse, so a rejected
/// import never partially applies.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectImport {
    pub project: Project,

    #[serde(default)]
    pub dynamic_templates: Vec<Template>,

    #[serde(default)]
    pub dynamic_components: Vec<Component>,
}

/// Download file name for an export: the project name with every
/// non-alphanumeric byte replaced by `_`, lowercased
pub fn export_file_name(project_name: &str) -> String {
    let slug: String = project_name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect::<String>()
        .to_lowercase();
    format!("{}_export.json", slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_is_sanitized_and_lowercased() {
        assert_eq!(export_file_name("My Page!"), "my_page__export.json");
        assert_eq!(export_file_name("New Project"), "new_project_export.json");
        assert_eq!(export_file_name("café"), "café_export.json");
    }

    #[test]
    fn import_requires_project() {
        let missing = serde_json::json!({ "dynamicTemplates": [] });
        assert!(serde_json::from_value::<ProjectImport>(missing).is_err());
    }

    #[test]
    fn import_tolerates_unknown_and_missing_fields() {
        let raw = serde_json::json!({
            "project": Project::new(),
            "someFutureField": {"nested": true}
        });
        let import: ProjectImport = serde_json::from_value(raw).unwrap();
        assert!(import.dynamic_templates.is_empty());
        assert!(import.dynamic_components.is_empty());
    }
}
