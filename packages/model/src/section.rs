use crate::{ComponentNode, Styles};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionCategory {
    Hero,
    About,
    Products,
    Testimonials,
    Cta,
    Custom,
}

impl fmt::Display for SectionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SectionCategory::Hero => "hero",
            SectionCategory::About => "about",
            SectionCategory::Products => "products",
            SectionCategory::Testimonials => "testimonials",
            SectionCategory::Cta => "cta",
            SectionCategory::Custom => "custom",
        };
        f.write_str(name)
    }
}

/// An ordered, named grouping of component nodes within a page
///
/// Sections are displayed by their `order` key, not by their position in
/// the page's list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub name: String,
    pub category: SectionCategory,

    #[serde(default)]
    pub components: Vec<ComponentNode>,

    #[serde(default)]
    pub styles: Styles,

    #[serde(default = "default_visible")]
    pub visible: bool,

    #[serde(default)]
    pub order: u32,
}

fn default_visible() -> bool {
    true
}

impl Section {
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: SectionCategory) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            components: Vec::new(),
            styles: Styles::new(),
            visible: true,
            order: 0,
        }
    }

    pub fn with_component(mut self, component: ComponentNode) -> Self {
        self.components.push(component);
        self
    }

    /// Find a component anywhere in this section's tree
    pub fn find_component(&self, id: &str) -> Option<&ComponentNode> {
        self.components.iter().find_map(|c| c.find(id))
    }

    pub fn find_component_mut(&mut self, id: &str) -> Option<&mut ComponentNode> {
        self.components.iter_mut().find_map(|c| c.find_mut(id))
    }

    /// Remove a component anywhere in this section's tree, returning it
    pub fn remove_component(&mut self, id: &str) -> Option<ComponentNode> {
        if let Some(pos) = self.components.iter().position(|c| c.id == id) {
            return Some(self.components.remove(pos));
        }
        self.components
            .iter_mut()
            .find_map(|c| c.remove_descendant(id))
    }

    /// Every component node in this section, parents before children
    pub fn walk_components<'a>(&'a self, visit: &mut impl FnMut(&'a ComponentNode)) {
        for component in &self.components {
            component.walk(visit);
        }
    }
}
