//! # Patches
//!
//! Partial updates for components, sections, theme and settings.
//!
//! Every patch is a **shallow** merge: a field that is `Some` replaces the
//! target field wholesale, a field that is `None` leaves it alone. Nested
//! maps are never merged key by key. To change a single style property
//! without dropping the others, the caller copies the existing map, edits
//! the copy, and sends the whole map:
//!
//! ```rust
//! use sitecraft_model::{ComponentNode, ComponentPatch};
//!
//! let node = ComponentNode::new("c1", "text").with_style("color", "red");
//! let mut styles = node.styles.clone();
//! styles.insert("margin".into(), "8px".into());
//!
//! let mut updated = node.clone();
//! ComponentPatch::styles(styles).apply(&mut updated);
//! assert_eq!(updated.styles.len(), 2);
//! ```

use crate::{
    ComponentNode, Fonts, FormDefinition, NavItem, Position, Props, Section, SectionCategory, Seo,
    Settings, Size, Styles, Theme,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Partial update of a component node
///
/// `id` and `type` are not patchable. `position` and `size` use a nested
/// option so a patch can clear them (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<Props>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Styles>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ComponentNode>>,

    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    pub position: Option<Option<Position>>,

    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    pub size: Option<Option<Size>>,
}

impl ComponentPatch {
    pub fn props(props: Props) -> Self {
        Self {
            props: Some(props),
            ..Default::default()
        }
    }

    pub fn styles(styles: Styles) -> Self {
        Self {
            styles: Some(styles),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, node: &mut ComponentNode) {
        if let Some(props) = &self.props {
            node.props = props.clone();
        }
        if let Some(styles) = &self.styles {
            node.styles = styles.clone();
        }
        if let Some(children) = &self.children {
            node.children = children.clone();
        }
        if let Some(position) = self.position {
            node.position = position;
        }
        if let Some(size) = self.size {
            node.size = size;
        }
    }
}

/// Partial update of a section
///
/// The `order` key is owned by section insertion and reordering and cannot
/// be patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<SectionCategory>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<ComponentNode>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Styles>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

impl SectionPatch {
    pub fn apply(&self, section: &mut Section) {
        if let Some(name) = &self.name {
            section.name = name.clone();
        }
        if let Some(category) = self.category {
            section.category = category;
        }
        if let Some(components) = &self.components {
            section.components = components.clone();
        }
        if let Some(styles) = &self.styles {
            section.styles = styles.clone();
        }
        if let Some(visible) = self.visible {
            section.visible = visible;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fonts: Option<Fonts>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<BTreeMap<String, String>>,
}

impl ThemePatch {
    pub fn apply(&self, theme: &mut Theme) {
        if let Some(colors) = &self.colors {
            theme.colors = colors.clone();
        }
        if let Some(fonts) = &self.fonts {
            theme.fonts = fonts.clone();
        }
        if let Some(spacing) = &self.spacing {
            theme.spacing = spacing.clone();
        }
        if let Some(border_radius) = &self.border_radius {
            theme.border_radius = border_radius.clone();
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation: Option<Vec<NavItem>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forms: Option<Vec<FormDefinition>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<Seo>,
}

impl SettingsPatch {
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(navigation) = &self.navigation {
            settings.navigation = navigation.clone();
        }
        if let Some(forms) = &self.forms {
            settings.forms = forms.clone();
        }
        if let Some(seo) = &self.seo {
            settings.seo = seo.clone();
        }
    }
}

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`) when deserializing patches.
mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
