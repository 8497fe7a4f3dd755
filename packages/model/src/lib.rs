//! # Sitecraft Model
//!
//! The document tree every builder panel reads and the editor engine rewrites.
//!
//! ```text
//! Document
//!  ├── pages: home | about | products | contact
//!  │     └── sections (ordered by `order` key)
//!  │           └── components (tree of ComponentNode)
//!  ├── theme
//!  ├── media (images, videos)
//!  └── settings (navigation, forms, seo)
//! ```
//!
//! The model is plain data. It never talks to the component registry and it
//! never decides whether an edit is allowed; that belongs to the editor.
//! Partial updates go through the patch types in [`patch`], which only ever
//! replace whole fields.

mod component;
mod document;
mod error;
mod id_generator;
mod media;
mod page;
pub mod patch;
mod section;
mod settings;
mod theme;

pub use component::{ComponentNode, Position, Props, Size, Styles};
pub use document::Document;
pub use error::ModelError;
pub use id_generator::IdGenerator;
pub use media::{MediaAsset, MediaKind, MediaLibrary};
pub use page::{Page, PageId};
pub use patch::{ComponentPatch, SectionPatch, SettingsPatch, ThemePatch};
pub use section::{Section, SectionCategory};
pub use settings::{FieldKind, FormDefinition, FormField, NavItem, Seo, Settings};
pub use theme::{Fonts, Theme};
