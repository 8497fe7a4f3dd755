//! Storage for the Sitecraft builder document.
//!
//! # Features
//!
//! - **Pluggable stores**: files on disk or an in-memory map
//! - **Atomic writes** for the file store
//! - **Safe restore**: missing or corrupt data falls back to the starter site
//! - **Debounced auto-save** on a background tokio task
//!
//! # Example
//!
//! ```ignore
//! let store: Arc<dyn DocumentStore> = Arc::new(FileStore::new(".sitecraft"));
//! let mut engine = Engine::default();
//! load_into(&mut engine, store.as_ref());
//!
//! let (autosave, mut reports) = AutoSave::spawn(Arc::clone(&store), AutoSaveConfig::default());
//! engine.subscribe(Box::new(autosave.clone()));
//!
//! // ... dispatch actions ...
//! apply_reports(&mut engine, &mut reports);
//! ```

mod autosave;
mod error;
mod persist;
mod store;

pub use autosave::{
    acknowledge, apply_reports, AutoSave, AutoSaveConfig, AutoSaveHandle, SaveReport,
    SaveReports,
};
pub use error::{PersistenceError, Result};
pub use persist::{
    load_document, load_into, parse_document, restore, save_document, RestoreOrigin, Restored,
    STORAGE_KEY,
};
pub use store::{DocumentStore, FileStore, MemoryStore};
