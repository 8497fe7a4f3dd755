//! Error types for the component registry

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Component definition not found: {0}")]
    DefinitionNotFound(String),

    #[error("Component definition registered twice: {0}")]
    DuplicateDefinition(String),
}

/// Why a component cannot be placed where it was dropped
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlacementError {
    #[error("Unknown component type: {0}")]
    UnknownType(String),

    #[error("{0} does not accept children")]
    NotAContainer(String),

    #[error("{parent} accepts at most {max} children")]
    TooManyChildren { parent: String, max: usize },

    #[error("{child} cannot be placed inside {parent}")]
    NotAllowedIn { child: String, parent: String },
}
