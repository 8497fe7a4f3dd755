//! # Sitecraft Registry
//!
//! Component definitions for the builder's library: what each component
//! type is called, which properties it exposes in the property panel, what
//! a freshly dropped instance looks like, where it may be placed, and how
//! it renders.
//!
//! ## Usage
//!
//! ```rust
//! use sitecraft_model::IdGenerator;
//! use sitecraft_registry::ComponentRegistry;
//!
//! let registry = ComponentRegistry::builtin();
//! let mut ids = IdGenerator::new();
//!
//! let node = registry.create_node("button", &mut ids).unwrap();
//! assert_eq!(node.props["label"], "Click me");
//!
//! assert!(registry.create_node("carousel3d", &mut ids).is_err());
//! ```

mod builtin;
mod definition;
mod error;
mod registry;
pub mod render;

pub use definition::{ComponentCategory, ComponentDefinition, PropertyKind, PropertySchema};
pub use error::{PlacementError, RegistryError};
pub use registry::ComponentRegistry;
pub use render::{render_fragment, render_page, RenderContext, RenderFn, RenderOptions};
