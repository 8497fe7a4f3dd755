//! # Builder Session State
//!
//! Everything the builder UI needs besides the document itself: which page
//! is open, what is selected, the preview viewport, the drag in flight, and
//! the undo/redo history.
//!
//! A `BuilderState` value is never edited in place by the engine; the
//! reducer returns a new one. The document is held behind an `Arc` shared
//! with the history, so cloning a state is cheap.

use crate::actions::PreviewMode;
use crate::history::{History, DEFAULT_HISTORY_LIMIT};
use sitecraft_model::{ComponentNode, Document, PageId};
use std::sync::Arc;

/// Drag-and-drop in progress
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragState {
    pub active: bool,

    /// The node being dragged; becomes the `ADD_COMPONENT` payload on drop
    pub payload: Option<ComponentNode>,
}

#[derive(Debug, Clone)]
pub struct BuilderState {
    pub document: Arc<Document>,
    pub current_page: PageId,
    pub selected_component: Option<String>,
    pub selected_section: Option<String>,
    pub preview_mode: PreviewMode,
    pub editing: bool,
    pub drag: DragState,
    pub history: History,

    /// Live document differs from the last checkpoint or save
    pub dirty: bool,

    /// Incremented on every document change
    pub revision: u64,
}

impl BuilderState {
    pub fn new(document: Document) -> Self {
        Self::with_history_limit(document, DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_history_limit(document: Document, history_limit: usize) -> Self {
        let document = Arc::new(document);
        Self {
            history: History::new(Arc::clone(&document), history_limit),
            document,
            current_page: PageId::Home,
            selected_component: None,
            selected_section: None,
            preview_mode: PreviewMode::Desktop,
            editing: true,
            drag: DragState::default(),
            dirty: false,
            revision: 0,
        }
    }

    /// Selected component node, searched on the current page
    pub fn selected_component_node(&self) -> Option<&ComponentNode> {
        let id = self.selected_component.as_deref()?;
        let page = self.document.page(self.current_page)?;
        page.sections.iter().find_map(|s| s.find_component(id))
    }

    /// Clear selections that point at ids missing from the live document
    pub(crate) fn prune_selection(&mut self) {
        if let Some(id) = &self.selected_component {
            if !self.document.contains_component(id) {
                self.selected_component = None;
            }
        }
        if let Some(id) = &self.selected_section {
            if !self.document.contains_section(id) {
                self.selected_section = None;
            }
        }
    }
}

impl Default for BuilderState {
    fn default() -> Self {
        Self::new(Document::default())
    }
}
