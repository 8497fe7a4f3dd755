use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fonts {
    pub primary: String,
    pub secondary: String,

    /// Named sizes (`"sm"`, `"base"`, `"xl"`, ...)
    #[serde(default)]
    pub sizes: BTreeMap<String, String>,
}

/// Global theme shared by every page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    /// Named palette; `primary`, `secondary`, `accent`, `background` and
    /// `text` are expected, more names are allowed
    #[serde(default)]
    pub colors: BTreeMap<String, String>,

    pub fonts: Fonts,

    #[serde(default)]
    pub spacing: BTreeMap<String, String>,

    #[serde(default)]
    pub border_radius: BTreeMap<String, String>,
}

impl Theme {
    pub fn color(&self, name: &str) -> Option<&str> {
        self.colors.get(name).map(String::as_str)
    }

    /// Flatten the theme into CSS custom properties (`--color-primary`, ...)
    pub fn css_variables(&self) -> Vec<(String, String)> {
        let mut vars = Vec::new();
        for (name, value) in &self.colors {
            vars.push((format!("--color-{}", name), value.clone()));
        }
        vars.push(("--font-primary".to_string(), self.fonts.primary.clone()));
        vars.push(("--font-secondary".to_string(), self.fonts.secondary.clone()));
        for (name, value) in &self.fonts.sizes {
            vars.push((format!("--font-size-{}", name), value.clone()));
        }
        for (name, value) in &self.spacing {
            vars.push((format!("--spacing-{}", name), value.clone()));
        }
        for (name, value) in &self.border_radius {
            vars.push((format!("--radius-{}", name), value.clone()));
        }
        vars
    }
}

fn scale(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            colors: scale(&[
                ("primary", "#3b82f6"),
                ("secondary", "#64748b"),
                ("accent", "#f59e0b"),
                ("background", "#ffffff"),
                ("text", "#0f172a"),
            ]),
            fonts: Fonts {
                primary: "Inter, sans-serif".to_string(),
                secondary: "Georgia, serif".to_string(),
                sizes: scale(&[
                    ("sm", "0.875rem"),
                    ("base", "1rem"),
                    ("lg", "1.25rem"),
                    ("xl", "1.5rem"),
                    ("2xl", "2rem"),
                    ("3xl", "3rem"),
                ]),
            },
            spacing: scale(&[
                ("xs", "4px"),
                ("sm", "8px"),
                ("md", "16px"),
                ("lg", "32px"),
                ("xl", "64px"),
            ]),
            border_radius: scale(&[("sm", "4px"), ("md", "8px"), ("lg", "16px"), ("full", "9999px")]),
        }
    }
}
