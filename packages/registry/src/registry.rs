//! # Component Registry
//!
//! Lookup table from component type id to its definition. The registry is
//! built once and never changes afterwards; the editor shares it behind an
//! `Arc`.

use crate::builtin::builtin_definitions;
use crate::{ComponentCategory, ComponentDefinition, PlacementError, RegistryError};
use sitecraft_model::{ComponentNode, IdGenerator};
use std::collections::{HashMap, HashSet};

pub struct ComponentRegistry {
    definitions: Vec<ComponentDefinition>,
    index: HashMap<String, usize>,
}

impl ComponentRegistry {
    /// Registry with all built-in component types
    pub fn builtin() -> Self {
        Self::index(builtin_definitions())
    }

    /// Registry from an explicit list of definitions
    pub fn from_definitions(
        definitions: Vec<ComponentDefinition>,
    ) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for def in &definitions {
            if !seen.insert(def.type_id.as_str()) {
                return Err(RegistryError::DuplicateDefinition(def.type_id.clone()));
            }
        }
        Ok(Self::index(definitions))
    }

    /// Built-in definitions plus custom ones
    pub fn builtin_with(
        extra: Vec<ComponentDefinition>,
    ) -> Result<Self, RegistryError> {
        let mut definitions = builtin_definitions();
        definitions.extend(extra);
        Self::from_definitions(definitions)
    }

    fn index(definitions: Vec<ComponentDefinition>) -> Self {
        let index = definitions
            .iter()
            .enumerate()
            .map(|(i, def)| (def.type_id.clone(), i))
            .collect();
        Self { definitions, index }
    }

    pub fn get(&self, type_id: &str) -> Option<&ComponentDefinition> {
        self.index.get(type_id).map(|&i| &self.definitions[i])
    }

    pub fn contains(&self, type_id: &str) -> bool {
        self.index.contains_key(type_id)
    }

    /// All definitions in registration order
    pub fn iter(&self) -> impl Iterator<Item = &ComponentDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn by_category(
        &self,
        category: ComponentCategory,
    ) -> impl Iterator<Item = &ComponentDefinition> {
        self.definitions
            .iter()
            .filter(move |def| def.category == category)
    }

    /// Categories that have at least one definition, in declaration order
    pub fn categories(&self) -> Vec<ComponentCategory> {
        ComponentCategory::ALL
            .into_iter()
            .filter(|c| self.by_category(*c).next().is_some())
            .collect()
    }

    /// Build a fresh node of `type_id` with the definition's defaults
    pub fn create_node(
        &self,
        type_id: &str,
        ids: &mut IdGenerator,
    ) -> Result<ComponentNode, RegistryError> {
        let def = self
            .get(type_id)
            .ok_or_else(|| RegistryError::DefinitionNotFound(type_id.to_string()))?;

        let mut node = ComponentNode::new(ids.component_id(), def.type_id.clone());
        node.props = def.default_props.clone();
        node.styles = def.default_styles.clone();
        Ok(node)
    }

    /// Check that a `child_type` node may be added under `parent`
    ///
    /// `parent` is `None` for the top level of a section.
    pub fn check_placement(
        &self,
        parent: Option<&ComponentNode>,
        child_type: &str,
    ) -> Result<(), PlacementError> {
        let child = self
            .get(child_type)
            .ok_or_else(|| PlacementError::UnknownType(child_type.to_string()))?;

        let Some(parent) = parent else {
            return match &child.allowed_parents {
                Some(_) => Err(PlacementError::NotAllowedIn {
                    child: child_type.to_string(),
                    parent: "section".to_string(),
                }),
                None => Ok(()),
            };
        };

        let parent_def = self
            .get(&parent.component_type)
            .ok_or_else(|| PlacementError::UnknownType(parent.component_type.clone()))?;

        if !parent_def.accepts_children {
            return Err(PlacementError::NotAContainer(parent.component_type.clone()));
        }

        if let Some(max) = parent_def.max_children {
            if parent.children.len() >= max {
                return Err(PlacementError::TooManyChildren {
                    parent: parent.component_type.clone(),
                    max,
                });
            }
        }

        if let Some(allowed) = &child.allowed_parents {
            if !allowed.iter().any(|p| *p == parent.component_type) {
                return Err(PlacementError::NotAllowedIn {
                    child: child_type.to_string(),
                    parent: parent.component_type.clone(),
                });
            }
        }

        Ok(())
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("definitions", &format!("{} definitions", self.definitions.len()))
            .finish()
    }
}
