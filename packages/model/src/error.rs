//! Error types for the document model

use crate::PageId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Duplicate component id: {0}")]
    DuplicateComponentId(String),

    #[error("Duplicate section id: {0}")]
    DuplicateSectionId(String),

    #[error("Component {0} has a non-finite position or size")]
    NonFiniteGeometry(String),

    #[error("Missing page: {0}")]
    MissingPage(PageId),

    #[error("Page {key} holds data for page {found}")]
    MislabeledPage { key: PageId, found: PageId },
}
