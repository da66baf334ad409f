/*
 * PageCraft landing page builder, free/libre no-code tool for makers.
 * Copyright (c) 2025 PageCraft contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! The builder store
//!
//! Single mutable source of truth for the active project, the current
//! selection and view state, and the two AI-content collections. All
//! mutations are synchronous over the in-memory state; each committed
//! project mutation is mirrored to the storage port best-effort
//! (failures are logged, never surfaced, never retried).
//!
//! Store operations never error: mutations addressed to missing ids are
//! no-ops, and section-constraint rejections are logged warnings that
//! leave all state untouched.

mod constraints;
mod transfer;

pub use constraints::{check_attach, AttachRejection};
pub use transfer::{export_file_name, ProjectExport, ProjectImport, EXPORT_VERSION};

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::models::{
    new_entity_id, Component, ComponentContent, ComponentId, ComponentPatch, DeviceView,
    NewComponent, PageLayout, Position, Project, Section, SectionId, SectionPatch, Template,
};
use crate::storage::{StorageKey, StoragePort};

/// Offset applied to a duplicated component on both axes
const DUPLICATE_OFFSET: f64 = 20.0;

/// Transient editor view state (not persisted)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub selection: Option<ComponentId>,
    pub device_view: DeviceView,
    pub preview_mode: bool,
}

/// Serialized-size accounting for the durable collections
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageInfo {
    pub current_project: usize,
    pub dynamic_templates: usize,
    pub dynamic_components: usize,
    pub total: usize,
    pub total_kb: f64,
    pub project_count: usize,
    pub template_count: usize,
    pub component_count: usize,
}

/// How a component reaches a section: an existing component re-homed by
/// id, or new component data allocated directly into the section
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SectionInsert {
    Existing(ComponentId),
    New(Box<NewComponent>),
}

struct BuilderState {
    project: Project,
    dynamic_templates: Vec<Template>,
    dynamic_components: Vec<Component>,
    selection: Option<ComponentId>,
    device_view: DeviceView,
    preview_mode: bool,
}

impl BuilderState {
    fn fresh() -> Self {
        BuilderState {
            project: Project::new(),
            dynamic_templates: Vec::new(),
            dynamic_components: Vec::new(),
            selection: None,
            device_view: DeviceView::default(),
            preview_mode: false,
        }
    }
}

/// Cloneable handle over the builder state and its storage port
#[derive(Clone)]
pub struct BuilderStore {
    state: Arc<RwLock<BuilderState>>,
    storage: Arc<dyn StoragePort>,
}

impl BuilderStore {
    /// Build a store hydrated from the storage port
    ///
    /// Missing or corrupt entries fall back to defaults (a fresh project,
    /// empty AI collections) with a logged warning; startup never fails
    /// on bad durable state.
    pub async fn init(storage: Arc<dyn StoragePort>) -> Self {
        let project = hydrate::<Project>(storage.as_ref(), StorageKey::CurrentProject)
            .await
            .unwrap_or_else(Project::new);
        let dynamic_templates =
            hydrate::<Vec<Template>>(storage.as_ref(), StorageKey::DynamicTemplates)
                .await
                .unwrap_or_default();
        let dynamic_components =
            hydrate::<Vec<Component>>(storage.as_ref(), StorageKey::DynamicComponents)
                .await
                .unwrap_or_default();

        let state = BuilderState {
            project,
            dynamic_templates,
            dynamic_components,
            ..BuilderState::fresh()
        };

        BuilderStore {
            state: Arc::new(RwLock::new(state)),
            storage,
        }
    }

    // ==================
    // Snapshots
    // ==================

    /// Clone of the active project
    pub fn project(&self) -> Project {
        self.state.read().unwrap().project.clone()
    }

    pub fn view_state(&self) -> ViewState {
        let state = self.state.read().unwrap();
        ViewState {
            selection: state.selection.clone(),
            device_view: state.device_view,
            preview_mode: state.preview_mode,
        }
    }

    pub fn dynamic_templates(&self) -> Vec<Template> {
        self.state.read().unwrap().dynamic_templates.clone()
    }

    pub fn dynamic_components(&self) -> Vec<Component> {
        self.state.read().unwrap().dynamic_components.clone()
    }

    pub fn find_component(&self, id: &str) -> Option<Component> {
        self.state.read().unwrap().project.find_component(id).cloned()
    }

    // ==================
    // Project management
    // ==================

    /// Replace the current project with a fresh one
    pub async fn create_project(&self) -> Project {
        let project = {
            let mut state = self.state.write().unwrap();
            state.project = Project::new();
            state.selection = None;
            state.project.clone()
        };
        self.persist_project().await;
        project
    }

    /// Stamp the modification time and persist
    pub async fn save_project(&self) -> Project {
        let project = {
            let mut state = self.state.write().unwrap();
            state.project.touch();
            state.project.clone()
        };
        self.persist_project().await;
        project
    }

    /// Replace the current project with a previously saved one
    pub async fn load_project(&self, project: Project) -> Project {
        let project = {
            let mut state = self.state.write().unwrap();
            state.project = project;
            state.project.touch();
            state.selection = None;
            state.project.clone()
        };
        self.persist_project().await;
        project
    }

    /// Wipe all durable storage and return every piece of state to its
    /// initial defaults. The only full-teardown operation.
    pub async fn reset_builder(&self) -> Project {
        for key in StorageKey::ALL {
            if let Err(e) = self.storage.remove(key).await {
                tracing::warn!("Failed to clear {}: {}", key, e);
            }
        }

        let mut state = self.state.write().unwrap();
        *state = BuilderState::fresh();
        state.project.clone()
    }

    // ==================
    // View state
    // ==================

    pub fn select(&self, component_id: Option<ComponentId>) {
        self.state.write().unwrap().selection = component_id;
    }

    pub fn set_device_view(&self, view: DeviceView) {
        self.state.write().unwrap().device_view = view;
    }

    pub fn set_preview_mode(&self, active: bool) {
        self.state.write().unwrap().preview_mode = active;
    }

    // ==================
    // Component operations
    // ==================

    /// Allocate a new component on the canvas and select it
    pub async fn add_component(&self, data: NewComponent) -> Component {
        let component = Component {
            id: new_entity_id("component"),
            content: data.content,
            styles: data.styles,
            position: data.position,
            size: data.size,
            section_id: None,
            is_ai_generated: false,
            ai_prompt: None,
        };

        {
            let mut state = self.state.write().unwrap();
            state.selection = Some(component.id.clone());
            state.project.components.push(component.clone());
            state.project.touch();
        }
        self.persist_project().await;
        component
    }

    /// Merge a field-level patch into a component
    ///
    /// Returns the updated component, or None (no-op) when the id is
    /// unknown. Section constraints are NOT re-validated here; only the
    /// attach path checks them.
    pub async fn update_component(&self, id: &str, patch: ComponentPatch) -> Option<Component> {
        let updated = {
            let mut state = self.state.write().unwrap();
            let component = match state.project.find_component_mut(id) {
                Some(component) => component,
                None => return None,
            };
            apply_component_patch(component, &patch);
            let snapshot = component.clone();
            state.project.touch();
            snapshot
        };
        self.persist_project().await;
        Some(updated)
    }

    /// Convenience wrapper over `update_component` restricted to position
    pub async fn move_component(&self, id: &str, position: Position) -> Option<Component> {
        self.update_component(
            id,
            ComponentPatch {
                position: Some(position),
                ..Default::default()
            },
        )
        .await
    }

    /// Remove a component from the project and from any owning section
    pub async fn delete_component(&self, id: &str) -> bool {
        let removed = {
            let mut state = self.state.write().unwrap();
            let before = state.project.components.len();
            state.project.components.retain(|component| component.id != id);
            if state.project.components.len() == before {
                false
            } else {
                state.project.detach_from_sections(&id.to_string());
                if state.selection.as_deref() == Some(id) {
                    state.selection = None;
                }
                state.project.touch();
                true
            }
        };
        if removed {
            self.persist_project().await;
        }
        removed
    }

    /// Clone a component with a fresh id, offset on both axes, and
    /// select the copy. The copy lands on the canvas: it does not join
    /// the source's section, so the membership record stays symmetric.
    pub async fn duplicate_component(&self, id: &str) -> Option<Component> {
        let copy = {
            let mut state = self.state.write().unwrap();
            let source = match state.project.find_component(id) {
                Some(component) => component.clone(),
                None => return None,
            };
            let mut copy = source;
            copy.id = new_entity_id("component");
            copy.position = copy.position.offset(DUPLICATE_OFFSET, DUPLICATE_OFFSET);
            copy.section_id = None;
            state.selection = Some(copy.id.clone());
            state.project.components.push(copy.clone());
            state.project.touch();
            copy
        };
        self.persist_project().await;
        Some(copy)
    }

    // ==================
    // Template and layout management
    // ==================

    /// Replace the project contents with fresh copies of a template
    ///
    /// Every template component gets a newly minted id; the id map is
    /// applied to the template layout's membership lists, and section
    /// back-references are rebuilt from those lists so both sides of the
    /// relation always agree.
    pub async fn load_template(&self, template: Template) -> Project {
        let mut id_map: HashMap<ComponentId, ComponentId> = HashMap::new();
        let mut components = Vec::with_capacity(template.components.len());
        for mut component in template.components {
            let fresh = new_entity_id("component");
            id_map.insert(component.id.clone(), fresh.clone());
            component.id = fresh;
            components.push(component);
        }

        let layout = template.layout.map(|mut layout| {
            for section in &mut layout.sections {
                section.components = section
                    .components
                    .iter()
                    .filter_map(|old| id_map.get(old).cloned())
                    .collect();
            }
            layout
        });

        // membership lists are authoritative; rebuild the back-references
        let mut owner: HashMap<ComponentId, SectionId> = HashMap::new();
        if let Some(layout) = &layout {
            for section in &layout.sections {
                for member in &section.components {
                    owner.insert(member.clone(), section.id.clone());
                }
            }
        }
        for component in &mut components {
            component.section_id = owner.get(&component.id).cloned();
        }

        let project = {
            let mut state = self.state.write().unwrap();
            state.project.name = template.name;
            state.project.components = components;
            state.project.layout = layout;
            state.project.touch();
            state.selection = None;
            state.project.clone()
        };
        self.persist_project().await;
        project
    }

    /// Replace the active layout, discarding all current components
    ///
    /// Destructive by design: every section of the incoming layout
    /// starts empty and the flat component list is cleared.
    pub async fn load_layout(&self, layout: PageLayout) -> Project {
        let mut layout = layout;
        for section in &mut layout.sections {
            section.components.clear();
        }

        let project = {
            let mut state = self.state.write().unwrap();
            state.project.layout = Some(layout);
            state.project.components.clear();
            state.project.touch();
            state.selection = None;
            state.project.clone()
        };
        self.persist_project().await;
        project
    }

    // ==================
    // Section operations
    // ==================

    /// Merge a field-level patch into a section
    ///
    /// No-op when no layout is active or the id is unknown. The
    /// membership list is not patchable here; see `add_component_to_section`.
    pub async fn update_section(&self, section_id: &str, patch: SectionPatch) -> Option<Section> {
        let updated = {
            let mut state = self.state.write().unwrap();
            let section = match state
                .project
                .layout
                .as_mut()
                .and_then(|layout| layout.find_section_mut(section_id))
            {
                Some(section) => section,
                None => return None,
            };
            apply_section_patch(section, patch);
            let snapshot = section.clone();
            state.project.touch();
            snapshot
        };
        self.persist_project().await;
        Some(updated)
    }

    /// Remove a section and every component it holds
    ///
    /// Cascades: member components are removed from the flat list
    /// entirely, not just unlinked.
    pub async fn delete_section(&self, section_id: &str) -> bool {
        let removed = {
            let mut state = self.state.write().unwrap();
            let members: Vec<ComponentId> = {
                let layout = match state.project.layout.as_mut() {
                    Some(layout) => layout,
                    None => return false,
                };
                let index = match layout
                    .sections
                    .iter()
                    .position(|section| section.id == section_id)
                {
                    Some(index) => index,
                    None => return false,
                };
                layout.sections.remove(index).components
            };

            state
                .project
                .components
                .retain(|component| !members.contains(&component.id));
            let selection_removed = state
                .selection
                .as_ref()
                .map(|selected| members.contains(selected))
                .unwrap_or(false);
            if selection_removed {
                state.selection = None;
            }
            state.project.touch();
            true
        };
        if removed {
            self.persist_project().await;
        }
        removed
    }

    /// Attach a component to a section, subject to the section's rules
    ///
    /// Policy, first failure aborts with no state change:
    /// 1. a layout must be active, 2. the section must exist (both
    /// silent no-ops), 3./4. the constraint engine accepts the component
    /// (rejections logged). On success both sides of the membership
    /// relation are updated together; an existing component is detached
    /// from its previous section first, a new component is appended to
    /// the project and selected.
    pub async fn add_component_to_section(
        &self,
        insert: SectionInsert,
        section_id: &str,
        position: Option<Position>,
    ) -> Option<Component> {
        let attached = {
            let mut state = self.state.write().unwrap();

            let kind = match &insert {
                SectionInsert::Existing(id) => match state.project.find_component(id) {
                    Some(component) => component.kind(),
                    None => return None,
                },
                SectionInsert::New(data) => data.content.kind(),
            };

            let section = match state
                .project
                .layout
                .as_ref()
                .and_then(|layout| layout.find_section(section_id))
            {
                Some(section) => section,
                None => return None,
            };

            if let Err(rejection) = check_attach(section, kind) {
                tracing::warn!("{}", rejection);
                return None;
            }

            let attached = match insert {
                SectionInsert::Existing(id) => {
                    state.project.detach_from_sections(&id);
                    let snapshot = match state.project.find_component_mut(&id) {
                        Some(component) => {
                            component.section_id = Some(section_id.to_string());
                            if let Some(position) = position {
                                component.position = position;
                            }
                            component.clone()
                        }
                        None => return None,
                    };
                    if let Some(section) = state
                        .project
                        .layout
                        .as_mut()
                        .and_then(|layout| layout.find_section_mut(section_id))
                    {
                        section.components.push(id);
                    }
                    snapshot
                }
                SectionInsert::New(data) => {
                    let component = Component {
                        id: new_entity_id("component"),
                        content: data.content,
                        styles: data.styles,
                        position: position.unwrap_or(data.position),
                        size: data.size,
                        section_id: Some(section_id.to_string()),
                        is_ai_generated: false,
                        ai_prompt: None,
                    };
                    if let Some(section) = state
                        .project
                        .layout
                        .as_mut()
                        .and_then(|layout| layout.find_section_mut(section_id))
                    {
                        section.components.push(component.id.clone());
                    }
                    state.selection = Some(component.id.clone());
                    state.project.components.push(component.clone());
                    component
                }
            };

            state.project.touch();
            attached
        };
        self.persist_project().await;
        Some(attached)
    }

    // ==================
    // AI-generated content
    // ==================

    /// Register a generated template for later reuse, under a fresh id
    pub async fn add_dynamic_template(&self, template: Template) -> Template {
        let registered = {
            let mut state = self.state.write().unwrap();
            let mut template = template;
            template.id = new_entity_id("ai_template");
            state.dynamic_templates.push(template.clone());
            template
        };
        self.persist_templates().await;
        registered
    }

    /// Register a generated component for later reuse, under a fresh id
    pub async fn add_dynamic_component(&self, component: Component) -> Component {
        let registered = {
            let mut state = self.state.write().unwrap();
            let mut component = component;
            component.id = new_entity_id("ai_component");
            state.dynamic_components.push(component.clone());
            component
        };
        self.persist_components().await;
        registered
    }

    pub async fn remove_dynamic_template(&self, id: &str) -> bool {
        let removed = {
            let mut state = self.state.write().unwrap();
            let before = state.dynamic_templates.len();
            state.dynamic_templates.retain(|template| template.id != id);
            state.dynamic_templates.len() != before
        };
        if removed {
            self.persist_templates().await;
        }
        removed
    }

    pub async fn remove_dynamic_component(&self, id: &str) -> bool {
        let removed = {
            let mut state = self.state.write().unwrap();
            let before = state.dynamic_components.len();
            state.dynamic_components.retain(|component| component.id != id);
            state.dynamic_components.len() != before
        };
        if removed {
            self.persist_components().await;
        }
        removed
    }

    // ==================
    // Export / import / accounting
    // ==================

    /// Full snapshot: project plus AI collections
    pub fn export(&self) -> ProjectExport {
        let state = self.state.read().unwrap();
        ProjectExport {
            project: state.project.clone(),
            dynamic_templates: state.dynamic_templates.clone(),
            dynamic_components: state.dynamic_components.clone(),
            exported_at: Utc::now(),
            version: EXPORT_VERSION.to_string(),
        }
    }

    /// Apply an export envelope: replace the project, append the AI
    /// collections. Returns false (leaving all state untouched) when the
    /// payload does not carry a well-formed `project`.
    pub async fn import(&self, payload: serde_json::Value) -> bool {
        let envelope: ProjectImport = match serde_json::from_value(payload) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!("Rejected import payload: {}", e);
                return false;
            }
        };

        {
            let mut state = self.state.write().unwrap();
            state.project = envelope.project;
            state.project.touch();
            state.dynamic_templates.extend(envelope.dynamic_templates);
            state.dynamic_components.extend(envelope.dynamic_components);
            state.selection = None;
        }

        self.persist_project().await;
        self.persist_templates().await;
        self.persist_components().await;
        true
    }

    /// Serialized-size accounting for the durable collections
    pub fn storage_info(&self) -> StorageInfo {
        let state = self.state.read().unwrap();
        let current_project = serialized_len(&state.project);
        let dynamic_templates = serialized_len(&state.dynamic_templates);
        let dynamic_components = serialized_len(&state.dynamic_components);
        let total = current_project + dynamic_templates + dynamic_components;

        StorageInfo {
            current_project,
            dynamic_templates,
            dynamic_components,
            total,
            total_kb: (total as f64 / 1024.0 * 100.0).round() / 100.0,
            project_count: 1,
            template_count: state.dynamic_templates.len(),
            component_count: state.dynamic_components.len(),
        }
    }

    // ==================
    // Persistence, best-effort
    // ==================

    async fn persist_project(&self) {
        let payload = {
            let state = self.state.read().unwrap();
            serde_json::to_string(&state.project)
        };
        self.write_key(StorageKey::CurrentProject, payload).await;
    }

    async fn persist_templates(&self) {
        let payload = {
            let state = self.state.read().unwrap();
            serde_json::to_string(&state.dynamic_templates)
        };
        self.write_key(StorageKey::DynamicTemplates, payload).await;
    }

    async fn persist_components(&self) {
        let payload = {
            let state = self.state.read().unwrap();
            serde_json::to_string(&state.dynamic_components)
        };
        self.write_key(StorageKey::DynamicComponents, payload).await;
    }

    /// A mutation is complete once in-memory state is updated; a failed
    /// durable write only means memory and storage diverge until the
    /// next successful write.
    async fn write_key(&self, key: StorageKey, payload: serde_json::Result<String>) {
        match payload {
            Ok(data) => {
                if let Err(e) = self.storage.save(key, &data).await {
                    tracing::warn!("Failed to save {}: {}", key, e);
                }
            }
            Err(e) => tracing::warn!("Failed to serialize {}: {}", key, e),
        }
    }
}

/// Read and parse one durable key, falling back to None on any failure
async fn hydrate<T: DeserializeOwned>(storage: &dyn StoragePort, key: StorageKey) -> Option<T> {
    match storage.load(key).await {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Discarding corrupt {} entry: {}", key, e);
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            tracing::warn!("Could not read {}: {}", key, e);
            None
        }
    }
}

fn serialized_len<T: Serialize>(value: &T) -> usize {
    serde_json::to_string(value).map(|json| json.len()).unwrap_or(0)
}

fn apply_component_patch(component: &mut Component, patch: &ComponentPatch) {
    let current_kind = component.content.kind();
    let target_kind = patch.kind.unwrap_or(current_kind);

    if target_kind != current_kind {
        // type change: carry over whatever fields the kinds share
        let mut fields = component.content.field_map();
        if let Some(extra) = &patch.content {
            fields.extend(extra.clone());
        }
        component.content = ComponentContent::from_parts(target_kind, &fields).unwrap_or_else(|e| {
            tracing::warn!("Could not coerce content into {}: {}", target_kind, e);
            ComponentContent::empty(target_kind)
        });
    } else if let Some(extra) = &patch.content {
        match component.content.merged(extra) {
            Ok(content) => component.content = content,
            Err(e) => tracing::warn!("Ignoring content patch for {}: {}", component.id, e),
        }
    }

    if let Some(styles) = &patch.styles {
        for (key, value) in styles {
            component.styles.insert(key.clone(), value.clone());
        }
    }
    if let Some(position) = patch.position {
        component.position = position;
    }
    if let Some(size) = patch.size {
        component.size = size;
    }
}

fn apply_section_patch(section: &mut Section, patch: SectionPatch) {
    if let Some(name) = patch.name {
        section.name = name;
    }
    if let Some(kind) = patch.kind {
        section.kind = kind;
    }
    if let Some(order) = patch.order {
        section.order = order;
    }
    if let Some(height) = patch.height {
        section.height = height;
    }
    if let Some(background_color) = patch.background_color {
        section.background_color = background_color;
    }
    if let Some(padding) = patch.padding {
        section.padding = padding;
    }
    if let Some(constraints) = patch.constraints {
        section.constraints = constraints;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ComponentKind, Dimension, GlobalStyles, HeroContent, SectionConstraints, SectionKind, Size,
        TemplateCategory,
    };
    use crate::storage::MemoryStore;

    async fn store() -> (BuilderStore, MemoryStore) {
        let memory = MemoryStore::new();
        let store = BuilderStore::init(Arc::new(memory.clone())).await;
        (store, memory)
    }

    fn new_component(content: ComponentContent) -> NewComponent {
        NewComponent {
            content,
            styles: Default::default(),
            position: Position::new(50.0, 100.0),
            size: Size::default(),
        }
    }

    fn hero() -> ComponentContent {
        ComponentContent::Hero(HeroContent {
            title: "Welcome".to_string(),
            ..Default::default()
        })
    }

    fn feature() -> ComponentContent {
        ComponentContent::Feature(Default::default())
    }

    fn section(id: &str, order: i32, constraints: SectionConstraints) -> Section {
        Section {
            id: id.to_string(),
            name: id.to_string(),
            kind: SectionKind::Custom,
            order,
            height: Dimension::auto(),
            background_color: "#FFFFFF".to_string(),
            padding: 0.0,
            components: Vec::new(),
            constraints,
        }
    }

    fn layout(sections: Vec<Section>) -> PageLayout {
        PageLayout {
            id: "layout_test".to_string(),
            name: "Test Layout".to_string(),
            description: String::new(),
            category: "saas".to_string(),
            sections,
            global_styles: GlobalStyles::default(),
            is_ai_generated: false,
            ai_prompt: None,
        }
    }

    fn hero_only() -> SectionConstraints {
        SectionConstraints {
            max_components: Some(1),
            allowed_types: Some(vec![ComponentKind::Hero]),
            layout: None,
            columns: None,
        }
    }

    /// The membership invariant: a component's back-reference and the
    /// section membership lists always agree, both ways.
    fn assert_symmetry(project: &Project) {
        let sections = project
            .layout
            .as_ref()
            .map(|layout| layout.sections.as_slice())
            .unwrap_or_default();
        for component in &project.components {
            match &component.section_id {
                Some(section_id) => {
                    let section = sections
                        .iter()
                        .find(|section| &section.id == section_id)
                        .unwrap_or_else(|| panic!("dangling sectionId on {}", component.id));
                    assert!(
                        section.components.contains(&component.id),
                        "section {} does not list {}",
                        section_id,
                        component.id
                    );
                }
                None => {
                    for section in sections {
                        assert!(
                            !section.components.contains(&component.id),
                            "{} listed by section {} without back-reference",
                            component.id,
                            section.id
                        );
                    }
                }
            }
        }
        for section in sections {
            for member in &section.components {
                let component = project
                    .find_component(member)
                    .unwrap_or_else(|| panic!("section {} lists missing {}", section.id, member));
                assert_eq!(component.section_id.as_ref(), Some(&section.id));
            }
        }
    }

    #[tokio::test]
    async fn add_component_selects_and_persists() {
        let (store, memory) = store().await;
        let component = store.add_component(new_component(hero())).await;

        assert_eq!(store.view_state().selection, Some(component.id.clone()));
        let saved = memory.load(StorageKey::CurrentProject).await.unwrap().unwrap();
        assert!(saved.contains(&component.id));
    }

    #[tokio::test]
    async fn section_constraints_gate_membership() {
        let (store, _) = store().await;
        store
            .load_layout(layout(vec![section("section_hero", 1, hero_only())]))
            .await;

        // first hero accepted
        let accepted = store
            .add_component_to_section(
                SectionInsert::New(Box::new(new_component(hero()))),
                "section_hero",
                None,
            )
            .await
            .expect("hero should be accepted");

        let project = store.project();
        let members = &project.layout.as_ref().unwrap().sections[0].components;
        assert_eq!(members, &vec![accepted.id.clone()]);
        assert_symmetry(&project);

        // second hero rejected by capacity, membership unchanged
        let rejected = store
            .add_component_to_section(
                SectionInsert::New(Box::new(new_component(hero()))),
                "section_hero",
                None,
            )
            .await;
        assert!(rejected.is_none());

        let project = store.project();
        let hero_section = &project.layout.as_ref().unwrap().sections[0];
        assert_eq!(hero_section.components, vec![accepted.id.clone()]);
        assert!(hero_section.components.len() <= hero_section.constraints.max_components.unwrap());
        assert_eq!(project.components.len(), 1);

        // feature rejected by type in a fresh hero-only section
        store
            .load_layout(layout(vec![section("section_hero", 1, hero_only())]))
            .await;
        let rejected = store
            .add_component_to_section(
                SectionInsert::New(Box::new(new_component(feature()))),
                "section_hero",
                None,
            )
            .await;
        assert!(rejected.is_none());
        assert!(store.project().components.is_empty());
    }

    #[tokio::test]
    async fn attach_without_layout_or_section_is_a_noop() {
        let (store, _) = store().await;
        let existing = store.add_component(new_component(hero())).await;

        // no layout active
        assert!(store
            .add_component_to_section(SectionInsert::Existing(existing.id.clone()), "nowhere", None)
            .await
            .is_none());

        store
            .load_layout(layout(vec![section("section_a", 1, Default::default())]))
            .await;
        // unknown section (and the layout swap dropped the component)
        assert!(store
            .add_component_to_section(SectionInsert::Existing(existing.id), "nowhere", None)
            .await
            .is_none());
    }

    #[tokio::test]
    async fn rehoming_moves_membership_between_sections() {
        let (store, _) = store().await;
        store
            .load_layout(layout(vec![
                section("section_a", 1, Default::default()),
                section("section_b", 2, Default::default()),
            ]))
            .await;

        let component = store
            .add_component_to_section(
                SectionInsert::New(Box::new(new_component(hero()))),
                "section_a",
                None,
            )
            .await
            .unwrap();

        let moved = store
            .add_component_to_section(
                SectionInsert::Existing(component.id.clone()),
                "section_b",
                Some(Position::new(5.0, 5.0)),
            )
            .await
            .unwrap();

        assert_eq!(moved.section_id.as_deref(), Some("section_b"));
        assert_eq!(moved.position, Position::new(5.0, 5.0));

        let project = store.project();
        let layout = project.layout.as_ref().unwrap();
        assert!(layout.find_section("section_a").unwrap().components.is_empty());
        assert_eq!(
            layout.find_section("section_b").unwrap().components,
            vec![component.id]
        );
        assert_symmetry(&project);
    }

    #[tokio::test]
    async fn duplicate_offsets_position_and_leaves_sections_alone() {
        let (store, _) = store().await;
        let source = store.add_component(new_component(hero())).await;

        let copy = store.duplicate_component(&source.id).await.unwrap();
        assert_ne!(copy.id, source.id);
        assert_eq!(copy.position, Position::new(70.0, 120.0));
        assert_eq!(copy.content, source.content);
        assert_eq!(copy.styles, source.styles);
        assert_eq!(copy.section_id, None);
        assert_eq!(store.view_state().selection, Some(copy.id));

        assert!(store.duplicate_component("component_missing").await.is_none());
    }

    #[tokio::test]
    async fn delete_component_cascades_from_sections_and_selection() {
        let (store, _) = store().await;
        store
            .load_layout(layout(vec![section("section_a", 1, Default::default())]))
            .await;
        let component = store
            .add_component_to_section(
                SectionInsert::New(Box::new(new_component(hero()))),
                "section_a",
                None,
            )
            .await
            .unwrap();

        assert!(store.delete_component(&component.id).await);
        let project = store.project();
        assert!(project.components.is_empty());
        assert!(project.layout.unwrap().sections[0].components.is_empty());
        assert_eq!(store.view_state().selection, None);

        assert!(!store.delete_component(&component.id).await);
    }

    #[tokio::test]
    async fn delete_section_removes_member_components_entirely() {
        let (store, _) = store().await;
        store
            .load_layout(layout(vec![
                section("section_a", 1, Default::default()),
                section("section_b", 2, Default::default()),
            ]))
            .await;

        for _ in 0..2 {
            store
                .add_component_to_section(
                    SectionInsert::New(Box::new(new_component(feature()))),
                    "section_a",
                    None,
                )
                .await
                .unwrap();
        }
        let kept = store
            .add_component_to_section(
                SectionInsert::New(Box::new(new_component(hero()))),
                "section_b",
                None,
            )
            .await
            .unwrap();

        assert!(store.delete_section("section_a").await);
        let project = store.project();
        assert_eq!(project.components.len(), 1);
        assert_eq!(project.components[0].id, kept.id);
        assert_eq!(project.layout.as_ref().unwrap().sections.len(), 1);
        assert_symmetry(&project);

        assert!(!store.delete_section("section_a").await);
    }

    #[tokio::test]
    async fn load_layout_discards_all_components() {
        let (store, _) = store().await;
        for _ in 0..3 {
            store.add_component(new_component(feature())).await;
        }
        assert_eq!(store.project().components.len(), 3);

        let project = store
            .load_layout(layout(vec![section("section_a", 1, Default::default())]))
            .await;
        assert!(project.components.is_empty());
        for section in &project.layout.unwrap().sections {
            assert!(section.components.is_empty());
        }
    }

    #[tokio::test]
    async fn load_template_remints_ids_and_keeps_membership_symmetric() {
        let (store, _) = store().await;

        let mut template_layout = layout(vec![section("section_a", 1, Default::default())]);
        template_layout.sections[0].components = vec!["old_1".to_string()];
        let template = Template {
            id: "template_1".to_string(),
            name: "Launch Page".to_string(),
            category: TemplateCategory::Saas,
            thumbnail: String::new(),
            description: String::new(),
            components: vec![
                Component {
                    id: "old_1".to_string(),
                    content: hero(),
                    styles: Default::default(),
                    position: Position::default(),
                    size: Size::default(),
                    section_id: Some("section_a".to_string()),
                    is_ai_generated: false,
                    ai_prompt: None,
                },
                Component {
                    id: "old_2".to_string(),
                    content: feature(),
                    styles: Default::default(),
                    position: Position::new(10.0, 10.0),
                    size: Size::default(),
                    section_id: None,
                    is_ai_generated: false,
                    ai_prompt: None,
                },
            ],
            layout: Some(template_layout),
            is_ai_generated: false,
            ai_prompt: None,
        };

        let project = store.load_template(template).await;
        assert_eq!(project.name, "Launch Page");
        assert_eq!(project.components.len(), 2);
        assert!(project.components.iter().all(|c| c.id != "old_1" && c.id != "old_2"));
        let members = &project.layout.as_ref().unwrap().sections[0].components;
        assert_eq!(members.len(), 1);
        assert_symmetry(&project);
    }

    #[tokio::test]
    async fn empty_patch_only_stamps_last_modified() {
        let (store, _) = store().await;
        let component = store.add_component(new_component(hero())).await;
        let before = store.project();

        let after_patch = store
            .update_component(&component.id, ComponentPatch::default())
            .await
            .unwrap();

        assert_eq!(after_patch, component);
        let after = store.project();
        assert_eq!(after.components, before.components);
        assert!(after.last_modified >= before.last_modified);

        assert!(store
            .update_component("component_missing", ComponentPatch::default())
            .await
            .is_none());
    }

    #[tokio::test]
    async fn content_patch_merges_and_type_patch_switches_variant() {
        let (store, _) = store().await;
        let component = store.add_component(new_component(hero())).await;

        let mut content = serde_json::Map::new();
        content.insert("subtitle".to_string(), "Ship today".into());
        let updated = store
            .update_component(
                &component.id,
                ComponentPatch {
                    content: Some(content),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        match &updated.content {
            ComponentContent::Hero(hero) => {
                assert_eq!(hero.title, "Welcome");
                assert_eq!(hero.subtitle, "Ship today");
            }
            other => panic!("unexpected content: {:?}", other),
        }

        // the permissive gap: type may be patched without constraint checks
        let switched = store
            .update_component(
                &component.id,
                ComponentPatch {
                    kind: Some(ComponentKind::Feature),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        match &switched.content {
            // `title` is shared between hero and feature content
            ComponentContent::Feature(feature) => assert_eq!(feature.title, "Welcome"),
            other => panic!("unexpected content: {:?}", other),
        }
    }

    #[tokio::test]
    async fn export_import_roundtrip_preserves_everything_but_timestamp() {
        let (store, _) = store().await;
        store
            .load_layout(layout(vec![section("section_a", 1, Default::default())]))
            .await;
        store
            .add_component_to_section(
                SectionInsert::New(Box::new(new_component(hero()))),
                "section_a",
                None,
            )
            .await
            .unwrap();
        store.add_component(new_component(feature())).await;
        store
            .add_dynamic_component(Component {
                id: "seed".to_string(),
                content: feature(),
                styles: Default::default(),
                position: Position::default(),
                size: Size::default(),
                section_id: None,
                is_ai_generated: true,
                ai_prompt: Some("a feature".to_string()),
            })
            .await;

        let exported = store.export();
        let before = store.project();

        // import into a clean store
        let other = BuilderStore::init(Arc::new(MemoryStore::new())).await;
        let payload = serde_json::to_value(&exported).unwrap();
        assert!(other.import(payload).await);

        let after = other.project();
        assert_eq!(after.id, before.id);
        assert_eq!(after.name, before.name);
        assert_eq!(after.components, before.components);
        assert_eq!(after.layout, before.layout);
        assert_eq!(after.settings, before.settings);
        assert_symmetry(&after);

        // AI collections are appended, not replaced
        assert_eq!(other.dynamic_components().len(), 1);
        assert!(other.import(serde_json::to_value(&exported).unwrap()).await);
        assert_eq!(other.dynamic_components().len(), 2);
    }

    #[tokio::test]
    async fn load_project_replaces_the_document_and_clears_selection() {
        let (store, _) = store().await;
        store.add_component(new_component(hero())).await;

        let mut saved = Project::new();
        saved.name = "Saved Elsewhere".to_string();
        let loaded = store.load_project(saved.clone()).await;

        assert_eq!(loaded.id, saved.id);
        assert_eq!(loaded.name, "Saved Elsewhere");
        assert!(loaded.components.is_empty());
        assert_eq!(store.view_state().selection, None);
    }

    #[tokio::test]
    async fn rejected_import_leaves_state_untouched() {
        let (store, _) = store().await;
        let component = store.add_component(new_component(hero())).await;
        let before = store.project();

        assert!(!store.import(serde_json::json!({ "version": "1.0" })).await);
        assert!(
            !store
                .import(serde_json::json!({ "project": { "name": 42 } }))
                .await
        );

        let after = store.project();
        assert_eq!(after, before);
        assert!(after.find_component(&component.id).is_some());
    }

    #[tokio::test]
    async fn reset_builder_wipes_storage_and_state() {
        let (store, memory) = store().await;
        store.add_component(new_component(hero())).await;
        store
            .add_dynamic_template(Template {
                id: "seed".to_string(),
                name: "Seed".to_string(),
                category: TemplateCategory::Business,
                thumbnail: String::new(),
                description: String::new(),
                components: Vec::new(),
                layout: None,
                is_ai_generated: true,
                ai_prompt: None,
            })
            .await;
        store.set_device_view(crate::models::DeviceView::Mobile);

        let fresh = store.reset_builder().await;
        assert!(fresh.components.is_empty());
        assert!(fresh.layout.is_none());
        assert!(store.dynamic_templates().is_empty());
        assert_eq!(store.view_state().device_view, crate::models::DeviceView::Desktop);
        assert_eq!(store.view_state().selection, None);

        for key in StorageKey::ALL {
            assert_eq!(memory.load(key).await.unwrap(), None, "{key} not cleared");
        }
    }

    #[tokio::test]
    async fn hydration_falls_back_on_corrupt_entries() {
        let memory = MemoryStore::new();
        memory
            .save(StorageKey::CurrentProject, "{ not json")
            .await
            .unwrap();
        memory.save(StorageKey::DynamicTemplates, "[]").await.unwrap();

        let store = BuilderStore::init(Arc::new(memory)).await;
        let project = store.project();
        assert!(project.components.is_empty());
        assert_eq!(project.name, "New Project");
        assert!(store.dynamic_templates().is_empty());
    }

    #[tokio::test]
    async fn storage_info_counts_serialized_sizes() {
        let (store, _) = store().await;
        store.add_component(new_component(hero())).await;

        let info = store.storage_info();
        assert!(info.current_project > 2);
        assert_eq!(info.dynamic_templates, 2); // "[]"
        assert_eq!(info.dynamic_components, 2);
        assert_eq!(
            info.total,
            info.current_project + info.dynamic_templates + info.dynamic_components
        );
        assert_eq!(info.project_count, 1);
        assert_eq!(info.template_count, 0);
    }
}
