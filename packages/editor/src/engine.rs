//! # Engine
//!
//! Owns the builder state and is the single entry point for changing it.
//!
//! ```text
//! caller ──Action──▶ dispatch ──▶ reduce ──▶ new BuilderState
//!                                   │
//!                                   └──▶ observers (previous, current)
//! ```
//!
//! Each engine is an explicit instance; tests and tools create as many as
//! they need.

use crate::actions::Action;
use crate::errors::EditorError;
use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::observer::StateObserver;
use crate::reducer::reduce;
use crate::session::BuilderState;
use serde::{Deserialize, Serialize};
use sitecraft_model::{ComponentNode, Document, IdGenerator, PageId};
use sitecraft_registry::ComponentRegistry;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Checkpoints kept by undo/redo
    pub history_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

/// Short user-facing outcome of a history or lifecycle action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Undone,
    Redone,
    NothingToUndo,
    NothingToRedo,
    Checkpointed,
    Loaded,
    Saved,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Notice::Undone => "Undone",
            Notice::Redone => "Redone",
            Notice::NothingToUndo => "Nothing to undo",
            Notice::NothingToRedo => "Nothing to redo",
            Notice::Checkpointed => "Checkpoint saved",
            Notice::Loaded => "Document loaded",
            Notice::Saved => "All changes saved",
        };
        f.write_str(message)
    }
}

/// Where a dragged component lands
#[derive(Debug, Clone, PartialEq)]
pub struct DropTarget {
    pub page: PageId,
    pub section_id: String,

    /// Container to drop into; `None` for the section's top level
    pub parent_id: Option<String>,
    pub index: Option<usize>,
}

impl DropTarget {
    pub fn section(page: PageId, section_id: impl Into<String>) -> Self {
        Self {
            page,
            section_id: section_id.into(),
            parent_id: None,
            index: None,
        }
    }

    pub fn inside(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn at(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

pub struct Engine {
    state: BuilderState,
    registry: Arc<ComponentRegistry>,
    ids: IdGenerator,
    observers: Vec<Box<dyn StateObserver>>,
}

impl Engine {
    /// Engine editing the starter document
    pub fn new(registry: Arc<ComponentRegistry>, config: EngineConfig) -> Self {
        Self::with_document(Document::default(), registry, config)
    }

    pub fn with_document(
        document: Document,
        registry: Arc<ComponentRegistry>,
        config: EngineConfig,
    ) -> Self {
        Self {
            state: BuilderState::with_history_limit(document, config.history_limit),
            registry,
            ids: IdGenerator::new(),
            observers: Vec::new(),
        }
    }

    /// Replace the id generator (deterministic ids in tests and scripts)
    pub fn with_ids(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    /// Run one action through the reducer and notify observers
    pub fn dispatch(&mut self, action: Action) -> Option<Notice> {
        tracing::trace!("dispatch {}", action.name());

        let notice = match &action {
            Action::Undo if !self.state.history.can_undo() => Some(Notice::NothingToUndo),
            Action::Undo => Some(Notice::Undone),
            Action::Redo if !self.state.history.can_redo() => Some(Notice::NothingToRedo),
            Action::Redo => Some(Notice::Redone),
            Action::SaveState => Some(Notice::Checkpointed),
            Action::LoadData { .. } => Some(Notice::Loaded),
            Action::MarkSaved { revision } if *revision == self.state.revision => {
                Some(Notice::Saved)
            }
            _ => None,
        };

        let next = reduce(&self.state, action, &self.registry);
        let previous = std::mem::replace(&mut self.state, next);

        for observer in &mut self.observers {
            observer.state_changed(&previous, &self.state);
        }

        notice
    }

    /// Build a node of `type_id` with the registry defaults and fresh ids
    pub fn create_component(&mut self, type_id: &str) -> Result<ComponentNode, EditorError> {
        Ok(self.registry.create_node(type_id, &mut self.ids)?)
    }

    /// Start dragging a new component out of the library
    pub fn start_drag_from_library(&mut self, type_id: &str) -> Result<(), EditorError> {
        let component = self.create_component(type_id)?;
        self.dispatch(Action::StartDrag { component });
        Ok(())
    }

    /// Drop the dragged node at `target` and end the drag
    ///
    /// The payload is inserted as-is; placement rules still apply, so a drop
    /// onto a disallowed target ends the drag without changing the document.
    pub fn drop_dragged(&mut self, target: DropTarget) -> Result<(), EditorError> {
        let component = self
            .state
            .drag
            .payload
            .clone()
            .ok_or(EditorError::NothingDragged)?;

        self.dispatch(Action::AddComponent {
            page: target.page,
            section_id: target.section_id,
            parent_id: target.parent_id,
            component,
            index: target.index,
        });
        self.dispatch(Action::EndDrag);
        Ok(())
    }

    pub fn subscribe(&mut self, observer: Box<dyn StateObserver>) {
        self.observers.push(observer);
    }

    pub fn state(&self) -> &BuilderState {
        &self.state
    }

    pub fn document(&self) -> &Arc<Document> {
        &self.state.document
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    pub fn can_undo(&self) -> bool {
        self.state.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.state.history.can_redo()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Arc::new(ComponentRegistry::builtin()), EngineConfig::default())
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("revision", &self.state.revision)
            .field("dirty", &self.state.dirty)
            .field("history", &self.state.history.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}
