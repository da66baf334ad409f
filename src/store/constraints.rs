/*
 * PageCraft landing page builder, free/libre no-code tool for makers.
 * Copyright (c) 2025 PageCraft contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! Section membership gatekeeping
//!
//! Decides whether a component may be attached to a section, given the
//! section's declared capacity and allowed-type rules. Invoked only by
//! the store's attach path; a rejection leaves all state untouched.
//!
//! Checks run in order: allowed types first, then capacity. The
//! layout-active and section-exists preconditions are the store's job.

use thiserror::Error;

use crate::models::{ComponentKind, Section};

/// Why a component was refused by a section
///
/// Rejections are logged as warnings and swallowed; they never surface
/// to the end user as errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachRejection {
    #[error("Component type {kind} not allowed in section {section}")]
    TypeNotAllowed {
        kind: ComponentKind,
        section: String,
    },

    #[error("Section {section} has reached its limit of {limit} components")]
    CapacityReached { section: String, limit: usize },
}

/// Validate that a component of `kind` may join `section`
pub fn check_attach(section: &Section, kind: ComponentKind) -> Result<(), AttachRejection> {
    if let Some(allowed) = &section.constraints.allowed_types {
        if !allowed.contains(&kind) {
            return Err(AttachRejection::TypeNotAllowed {
                kind,
                section: section.name.clone(),
            });
        }
    }

    if let Some(limit) = section.constraints.max_components {
        if section.components.len() >= limit {
            return Err(AttachRejection::CapacityReached {
                section: section.name.clone(),
                limit,
            });
        }
    }

    Ok(())
}
