//! Saving and restoring the builder document.
//!
//! The document is stored as pretty JSON under a single well-known key.
//! Restoring never fails: missing or unusable data falls back to the starter
//! document.

use crate::error::{PersistenceError, Result};
use crate::store::DocumentStore;
use sitecraft_editor::{Action, Engine};
use sitecraft_model::Document;

/// Key the builder document is stored under
pub const STORAGE_KEY: &str = "sitecraft-document";

/// Serialize `document` under [`STORAGE_KEY`]
///
/// A document that would not pass [`parse_document`] on the way back is
/// refused, leaving the previously stored copy in place.
pub fn save_document(store: &dyn DocumentStore, document: &Document) -> Result<()> {
    document.validate()?;
    let json = serde_json::to_string_pretty(document)
        .map_err(|source| PersistenceError::Serialization { source })?;
    store.write(STORAGE_KEY, &json)?;
    tracing::info!("Saved document ({} components)", document.component_count());
    Ok(())
}

/// Stored document, `None` if nothing was saved yet
///
/// Unlike [`restore`] this reports unreadable or inconsistent data as an
/// error.
pub fn load_document(store: &dyn DocumentStore) -> Result<Option<Document>> {
    let Some(json) = store.read(STORAGE_KEY)? else {
        return Ok(None);
    };
    parse_document(&json).map(Some)
}

/// Parse and validate a serialized document
pub fn parse_document(json: &str) -> Result<Document> {
    let document: Document =
        serde_json::from_str(json).map_err(|source| PersistenceError::Deserialization { source })?;
    document.validate()?;
    Ok(document)
}

/// Where a restored document came from
#[derive(Debug)]
pub enum RestoreOrigin {
    Stored,

    /// Nothing stored yet; starter document
    Missing,

    /// Stored data was unusable; starter document
    Recovered(PersistenceError),
}

#[derive(Debug)]
pub struct Restored {
    pub document: Document,
    pub origin: RestoreOrigin,
}

impl Restored {
    pub fn is_fallback(&self) -> bool {
        !matches!(self.origin, RestoreOrigin::Stored)
    }
}

pub fn restore(store: &dyn DocumentStore) -> Restored {
    match load_document(store) {
        Ok(Some(document)) => {
            tracing::info!("Restored stored document");
            Restored {
                document,
                origin: RestoreOrigin::Stored,
            }
        }
        Ok(None) => {
            tracing::info!("No stored document, starting from the default site");
            Restored {
                document: Document::default(),
                origin: RestoreOrigin::Missing,
            }
        }
        Err(e) => {
            tracing::warn!("Stored document unusable, starting from the default site: {}", e);
            Restored {
                document: Document::default(),
                origin: RestoreOrigin::Recovered(e),
            }
        }
    }
}

/// Restore from `store` and hand the result to `engine` as `LOAD_DATA`
pub fn load_into(engine: &mut Engine, store: &dyn DocumentStore) -> RestoreOrigin {
    let Restored { document, origin } = restore(store);
    engine.dispatch(Action::LoadData {
        document: Box::new(document),
    });
    origin
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use sitecraft_model::PageId;

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        let mut document = Document::default();
        document.settings.seo.title = "Saved".into();

        save_document(&store, &document).unwrap();
        assert_eq!(load_document(&store).unwrap(), Some(document));
    }

    #[test]
    fn test_save_refuses_unloadable_document() {
        let mut stored = Document::default();
        stored.settings.seo.title = "Mine".into();
        let store = MemoryStore::new();
        save_document(&store, &stored).unwrap();

        let mut broken = stored.clone();
        let intro = broken.section_mut(PageId::Home, "default-intro").unwrap();
        intro.components[0].position = Some(sitecraft_model::Position { x: f64::NAN, y: 0.0 });

        let err = save_document(&store, &broken).unwrap_err();
        assert!(matches!(err, PersistenceError::InvalidDocument(_)));
        assert_eq!(store.write_count(), 1);

        let restored = restore(&store);
        assert!(matches!(restored.origin, RestoreOrigin::Stored));
        assert_eq!(restored.document.settings.seo.title, "Mine");
    }

    #[test]
    fn test_restore_missing() {
        let restored = restore(&MemoryStore::new());
        assert!(matches!(restored.origin, RestoreOrigin::Missing));
        assert_eq!(restored.document, Document::default());
    }

    #[test]
    fn test_restore_garbage() {
        let store = MemoryStore::with_entry(STORAGE_KEY, "{ not json");
        let restored = restore(&store);

        assert!(matches!(
            restored.origin,
            RestoreOrigin::Recovered(PersistenceError::Deserialization { .. })
        ));
        assert!(restored.is_fallback());
        assert!(restored.document.page(PageId::Home).is_some());
    }

    #[test]
    fn test_restore_inconsistent_document() {
        let mut document = Document::default();
        let duplicate = document.page(PageId::Home).unwrap().sections[0].clone();
        document.page_mut(PageId::About).unwrap().sections.push(duplicate);

        let store = MemoryStore::with_entry(STORAGE_KEY, serde_json::to_string(&document).unwrap());
        let restored = restore(&store);

        assert!(matches!(
            restored.origin,
            RestoreOrigin::Recovered(PersistenceError::InvalidDocument(_))
        ));
        assert_eq!(restored.document, Document::default());
    }
}
