use crate::render::RenderFn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sitecraft_model::{Props, Styles};
use std::fmt;
use std::str::FromStr;

/// Library grouping used for browsing and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentCategory {
    Basic,
    Layout,
    Media,
    Commerce,
    Marketing,
    Forms,
}

impl ComponentCategory {
    pub const ALL: [ComponentCategory; 6] = [
        ComponentCategory::Basic,
        ComponentCategory::Layout,
        ComponentCategory::Media,
        ComponentCategory::Commerce,
        ComponentCategory::Marketing,
        ComponentCategory::Forms,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentCategory::Basic => "basic",
            ComponentCategory::Layout => "layout",
            ComponentCategory::Media => "media",
            ComponentCategory::Commerce => "commerce",
            ComponentCategory::Marketing => "marketing",
            ComponentCategory::Forms => "forms",
        }
    }
}

impl fmt::Display for ComponentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// Editor widget for a property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PropertyKind {
    Text,
    Textarea,
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    Boolean,
    Color,
    Url,
    Select {
        options: Vec<String>,
    },
}

/// One editable property shown in the property panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySchema {
    pub key: String,
    pub label: String,

    #[serde(flatten)]
    pub kind: PropertyKind,
}

impl PropertySchema {
    pub fn new(key: &str, label: &str, kind: PropertyKind) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            kind,
        }
    }

    /// Whether `value` fits this property's editor
    pub fn accepts(&self, value: &Value) -> bool {
        match &self.kind {
            PropertyKind::Text | PropertyKind::Textarea | PropertyKind::Color | PropertyKind::Url => {
                value.is_string()
            }
            PropertyKind::Boolean => value.is_boolean(),
            PropertyKind::Number { min, max } => match value.as_f64() {
                Some(n) => min.map_or(true, |m| n >= m) && max.map_or(true, |m| n <= m),
                None => false,
            },
            PropertyKind::Select { options } => value
                .as_str()
                .map_or(false, |s| options.iter().any(|o| o == s)),
        }
    }
}

/// Everything the builder knows about one component type
#[derive(Debug, Clone)]
pub struct ComponentDefinition {
    pub type_id: String,
    pub label: String,
    pub category: ComponentCategory,
    pub default_props: Props,
    pub default_styles: Styles,
    pub schema: Vec<PropertySchema>,
    pub accepts_children: bool,
    pub max_children: Option<usize>,

    /// Parent types this component may be placed in; `None` means anywhere
    pub allowed_parents: Option<Vec<String>>,

    pub render: RenderFn,
}

impl ComponentDefinition {
    pub fn new(type_id: &str, label: &str, category: ComponentCategory, render: RenderFn) -> Self {
        Self {
            type_id: type_id.to_string(),
            label: label.to_string(),
            category,
            default_props: Props::new(),
            default_styles: Styles::new(),
            schema: Vec::new(),
            accepts_children: false,
            max_children: None,
            allowed_parents: None,
            render,
        }
    }

    /// Add an editable property together with its default value
    pub fn prop(mut self, schema: PropertySchema, default: impl Into<Value>) -> Self {
        self.default_props.insert(schema.key.clone(), default.into());
        self.schema.push(schema);
        self
    }

    pub fn style(mut self, property: &str, value: &str) -> Self {
        self.default_styles
            .insert(property.to_string(), value.to_string());
        self
    }

    pub fn container(mut self, max_children: Option<usize>) -> Self {
        self.accepts_children = true;
        self.max_children = max_children;
        self
    }

    pub fn only_inside(mut self, parents: &[&str]) -> Self {
        self.allowed_parents = Some(parents.iter().map(|p| p.to_string()).collect());
        self
    }

    pub fn property(&self, key: &str) -> Option<&PropertySchema> {
        self.schema.iter().find(|p| p.key == key)
    }

    /// Keys in `props` whose values do not fit their schema entry
    ///
    /// Keys without a schema entry are allowed; renderers ignore them.
    pub fn invalid_props<'a>(&self, props: &'a Props) -> Vec<&'a str> {
        props
            .iter()
            .filter(|(key, value)| self.property(key).map_or(false, |p| !p.accepts(value)))
            .map(|(key, _)| key.as_str())
            .collect()
    }
}
