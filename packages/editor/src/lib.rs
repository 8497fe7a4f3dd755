//! # Sitecraft Editor
//!
//! State and history engine for the Sitecraft website builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: Document, pages, sections, theme     │
//! │ registry: component definitions + render    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: BuilderState lifecycle              │
//! │  - Actions (tagged JSON protocol)           │
//! │  - Pure reducer                             │
//! │  - Bounded undo/redo history                │
//! │  - Observers for side effects               │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ workspace: storage + debounced auto-save    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Actions are the API**: nothing changes the document except a dispatch
//! 2. **Snapshots are immutable**: every change publishes a new `Arc<Document>`
//! 3. **Absorb stale edits**: unknown ids are no-ops, not errors
//! 4. **Checkpoints are explicit**: history only grows on `SAVE_STATE`
//!
//! ## Usage
//!
//! ```rust
//! use sitecraft_editor::{Action, Engine, Notice};
//! use sitecraft_model::PageId;
//!
//! let mut engine = Engine::default();
//! let text = engine.create_component("text").unwrap();
//!
//! engine.dispatch(Action::AddComponent {
//!     page: PageId::Home,
//!     section_id: "default-intro".to_string(),
//!     parent_id: None,
//!     component: text,
//!     index: None,
//! });
//! assert!(engine.state().dirty);
//!
//! assert_eq!(engine.dispatch(Action::SaveState), Some(Notice::Checkpointed));
//! assert!(engine.can_undo());
//! ```

mod actions;
mod engine;
mod errors;
mod history;
mod observer;
mod reducer;
mod session;

pub use actions::{Action, PreviewMode};
pub use engine::{DropTarget, Engine, EngineConfig, Notice};
pub use errors::EditorError;
pub use history::{History, DEFAULT_HISTORY_LIMIT};
pub use observer::{document_changed, StateObserver};
pub use reducer::reduce;
pub use session::{BuilderState, DragState};
