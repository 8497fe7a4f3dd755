//! Error types for the editor

use sitecraft_registry::RegistryError;
use thiserror::Error;

/// Failures that reach the caller
///
/// The reducer itself never fails: stale ids and disallowed placements are
/// absorbed as no-ops. Errors only come from work done *before* dispatch,
/// such as building a node from an unknown component type.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("No component is being dragged")]
    NothingDragged,

    #[error("Invalid action payload: {0}")]
    InvalidAction(#[from] serde_json::Error),
}
