//! # Builder Actions
//!
//! The closed set of operations the engine understands. Panels, scripts and
//! tests all drive the builder by dispatching these; nothing else may change
//! the document.
//!
//! ## Action classes
//!
//! ### Navigation
//! - Touch only session fields (page, selection, preview, edit mode)
//! - Selecting a page clears both selections; selecting a section clears the
//!   selected component
//!
//! ### Drag
//! - `START_DRAG` / `END_DRAG` carry the dragged node; session only
//!
//! ### Document mutations
//! - Produce a new document, leaving the previous one untouched
//! - Set the dirty flag
//! - Unknown ids are no-ops, never errors
//! - Updates are shallow merges (see `sitecraft_model::patch`)
//!
//! ### History
//! - `SAVE_STATE` commits a checkpoint; `UNDO` / `REDO` move through them
//!
//! ## Wire format
//!
//! Actions serialize as tagged JSON objects:
//!
//! ```json
//! { "type": "REMOVE_COMPONENT", "page": "home", "sectionId": "s1", "componentId": "c1" }
//! ```

use serde::{Deserialize, Serialize};
use sitecraft_model::{
    ComponentNode, ComponentPatch, Document, MediaAsset, MediaKind, PageId, Section, SectionPatch,
    SettingsPatch, ThemePatch,
};

/// Device width used by the live preview
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewMode {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl PreviewMode {
    /// Viewport width in CSS pixels
    pub fn width(&self) -> u32 {
        match self {
            PreviewMode::Desktop => 1280,
            PreviewMode::Tablet => 768,
            PreviewMode::Mobile => 375,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    // Navigation
    #[serde(rename_all = "camelCase")]
    SetPage { page: PageId },

    #[serde(rename_all = "camelCase")]
    SelectComponent {
        #[serde(default)]
        component_id: Option<String>,
    },

    #[serde(rename_all = "camelCase")]
    SelectSection {
        #[serde(default)]
        section_id: Option<String>,
    },

    #[serde(rename_all = "camelCase")]
    SetPreviewMode { mode: PreviewMode },

    #[serde(rename_all = "camelCase")]
    SetEditMode { editing: bool },

    // Drag lifecycle
    #[serde(rename_all = "camelCase")]
    StartDrag { component: ComponentNode },

    EndDrag,

    // Document mutations
    #[serde(rename_all = "camelCase")]
    UpdateComponent {
        page: PageId,
        section_id: String,
        component_id: String,
        patch: ComponentPatch,
    },

    /// Insert `component` into a section, or into `parent_id`'s children
    #[serde(rename_all = "camelCase")]
    AddComponent {
        page: PageId,
        section_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parent_id: Option<String>,
        component: ComponentNode,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<usize>,
    },

    #[serde(rename_all = "camelCase")]
    RemoveComponent {
        page: PageId,
        section_id: String,
        component_id: String,
    },

    #[serde(rename_all = "camelCase")]
    UpdateSection {
        page: PageId,
        section_id: String,
        patch: SectionPatch,
    },

    #[serde(rename_all = "camelCase")]
    AddSection {
        page: PageId,
        section: Section,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<usize>,
    },

    #[serde(rename_all = "camelCase")]
    RemoveSection { page: PageId, section_id: String },

    /// New section order for a page; must list every section exactly once
    #[serde(rename_all = "camelCase")]
    ReorderSections {
        page: PageId,
        section_ids: Vec<String>,
    },

    #[serde(rename_all = "camelCase")]
    UpdateTheme { patch: ThemePatch },

    #[serde(rename_all = "camelCase")]
    UpdateSettings { patch: SettingsPatch },

    #[serde(rename_all = "camelCase")]
    AddMedia { kind: MediaKind, asset: MediaAsset },

    #[serde(rename_all = "camelCase")]
    RemoveMedia { asset_id: String },

    // History
    SaveState,
    Undo,
    Redo,

    // Lifecycle
    #[serde(rename_all = "camelCase")]
    LoadData { document: Box<Document> },

    /// Persistence acknowledgment: the document at `revision` is on disk
    #[serde(rename_all = "camelCase")]
    MarkSaved { revision: u64 },
}

impl Action {
    /// Parse one action from its JSON wire form
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Tag name as it appears on the wire (`"ADD_COMPONENT"`, ...)
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetPage { .. } => "SET_PAGE",
            Action::SelectComponent { .. } => "SELECT_COMPONENT",
            Action::SelectSection { .. } => "SELECT_SECTION",
            Action::SetPreviewMode { .. } => "SET_PREVIEW_MODE",
            Action::SetEditMode { .. } => "SET_EDIT_MODE",
            Action::StartDrag { .. } => "START_DRAG",
            Action::EndDrag => "END_DRAG",
            Action::UpdateComponent { .. } => "UPDATE_COMPONENT",
            Action::AddComponent { .. } => "ADD_COMPONENT",
            Action::RemoveComponent { .. } => "REMOVE_COMPONENT",
            Action::UpdateSection { .. } => "UPDATE_SECTION",
            Action::AddSection { .. } => "ADD_SECTION",
            Action::RemoveSection { .. } => "REMOVE_SECTION",
            Action::ReorderSections { .. } => "REORDER_SECTIONS",
            Action::UpdateTheme { .. } => "UPDATE_THEME",
            Action::UpdateSettings { .. } => "UPDATE_SETTINGS",
            Action::AddMedia { .. } => "ADD_MEDIA",
            Action::RemoveMedia { .. } => "REMOVE_MEDIA",
            Action::SaveState => "SAVE_STATE",
            Action::Undo => "UNDO",
            Action::Redo => "REDO",
            Action::LoadData { .. } => "LOAD_DATA",
            Action::MarkSaved { .. } => "MARK_SAVED",
        }
    }

    /// Whether this action can change the document
    pub fn mutates_document(&self) -> bool {
        matches!(
            self,
            Action::UpdateComponent { .. }
                | Action::AddComponent { .. }
                | Action::RemoveComponent { .. }
                | Action::UpdateSection { .. }
                | Action::AddSection { .. }
                | Action::RemoveSection { .. }
                | Action::ReorderSections { .. }
                | Action::UpdateTheme { .. }
                | Action::UpdateSettings { .. }
                | Action::AddMedia { .. }
                | Action::RemoveMedia { .. }
        )
    }
}
