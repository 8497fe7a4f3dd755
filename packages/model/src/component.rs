use crate::IdGenerator;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Property bag of a component node
pub type Props = BTreeMap<String, Value>;

/// Style overrides (CSS property → value)
pub type Styles = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn is_finite(&self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }
}

/// One placed, configured instance of a registered component type
///
/// Nodes form a strict tree: a node is owned by its section or by its parent
/// node, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentNode {
    pub id: String,

    /// Registered component type id (e.g. `"text"`, `"hero"`)
    #[serde(rename = "type")]
    pub component_type: String,

    #[serde(default)]
    pub props: Props,

    #[serde(default)]
    pub children: Vec<ComponentNode>,

    #[serde(default)]
    pub styles: Styles,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
}

impl ComponentNode {
    pub fn new(id: impl Into<String>, component_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            component_type: component_type.into(),
            props: Props::new(),
            children: Vec::new(),
            styles: Styles::new(),
            position: None,
            size: None,
        }
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.insert(property.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: ComponentNode) -> Self {
        self.children.push(child);
        self
    }

    /// String value of a prop, if present and a string
    pub fn prop_str(&self, key: &str) -> Option<&str> {
        self.props.get(key).and_then(Value::as_str)
    }

    /// Depth-first search of this node and its descendants
    pub fn find(&self, id: &str) -> Option<&ComponentNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut ComponentNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    /// Remove a descendant (not `self`) by id
    pub fn remove_descendant(&mut self, id: &str) -> Option<ComponentNode> {
        if let Some(pos) = self.children.iter().position(|c| c.id == id) {
            return Some(self.children.remove(pos));
        }
        self.children
            .iter_mut()
            .find_map(|child| child.remove_descendant(id))
    }

    /// Visit this node and every descendant, parents before children
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a ComponentNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// Ids of this node and all descendants
    pub fn subtree_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        self.walk(&mut |node| ids.push(node.id.as_str()));
        ids
    }

    /// First node in this subtree whose position or size is NaN or infinite
    ///
    /// JSON has no encoding for non-finite numbers, so such a node cannot be
    /// persisted and read back.
    pub fn non_finite_geometry(&self) -> Option<&ComponentNode> {
        let mut found = None;
        self.walk(&mut |node| {
            let bad = node.position.map_or(false, |p| !p.is_finite())
                || node.size.map_or(false, |s| !s.is_finite());
            if bad && found.is_none() {
                found = Some(node);
            }
        });
        found
    }

    /// Deep copy with fresh ids for the node and every descendant
    ///
    /// Used when a drop target rebuilds a node from a drag payload that may
    /// already have been placed once.
    pub fn reinstantiate(&self, ids: &mut IdGenerator) -> ComponentNode {
        ComponentNode {
            id: ids.component_id(),
            component_type: self.component_type.clone(),
            props: self.props.clone(),
            children: self
                .children
                .iter()
                .map(|child| child.reinstantiate(ids))
                .collect(),
            styles: self.styles.clone(),
            position: self.position,
            size: self.size,
        }
    }
}
