//! # Document
//!
//! Root aggregate of a site: the four pages, the theme, the media catalog
//! and the settings. This is the unit of undo/redo snapshots and of
//! persistence, so it must round-trip through JSON without loss.

use crate::{
    ComponentNode, FieldKind, FormDefinition, FormField, MediaLibrary, ModelError, NavItem, Page,
    PageId, Section, SectionCategory, Seo, Settings, Theme,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub pages: BTreeMap<PageId, Page>,
    pub theme: Theme,

    #[serde(default)]
    pub media: MediaLibrary,

    #[serde(default)]
    pub settings: Settings,
}

impl Document {
    /// Document with all four pages and nothing on them
    pub fn empty() -> Self {
        Self {
            pages: PageId::ALL.into_iter().map(|id| (id, Page::new(id))).collect(),
            theme: Theme::default(),
            media: MediaLibrary::default(),
            settings: Settings::default(),
        }
    }

    pub fn page(&self, id: PageId) -> Option<&Page> {
        self.pages.get(&id)
    }

    pub fn page_mut(&mut self, id: PageId) -> Option<&mut Page> {
        self.pages.get_mut(&id)
    }

    pub fn section(&self, page: PageId, section_id: &str) -> Option<&Section> {
        self.page(page).and_then(|p| p.section(section_id))
    }

    pub fn section_mut(&mut self, page: PageId, section_id: &str) -> Option<&mut Section> {
        self.page_mut(page).and_then(|p| p.section_mut(section_id))
    }

    /// Visit every component node on every page
    pub fn walk_components<'a>(&'a self, visit: &mut impl FnMut(&'a ComponentNode)) {
        for page in self.pages.values() {
            for section in &page.sections {
                section.walk_components(visit);
            }
        }
    }

    pub fn component_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        self.walk_components(&mut |node| ids.push(node.id.as_str()));
        ids
    }

    pub fn contains_component(&self, id: &str) -> bool {
        let mut found = false;
        self.walk_components(&mut |node| found |= node.id == id);
        found
    }

    pub fn contains_section(&self, id: &str) -> bool {
        self.pages
            .values()
            .any(|page| page.sections.iter().any(|s| s.id == id))
    }

    pub fn component_count(&self) -> usize {
        self.component_ids().len()
    }

    /// Check structural invariants: every page present under its own key,
    /// unique component ids, unique section ids, finite geometry
    pub fn validate(&self) -> Result<(), ModelError> {
        for id in PageId::ALL {
            match self.pages.get(&id) {
                None => return Err(ModelError::MissingPage(id)),
                Some(page) if page.id != id => {
                    return Err(ModelError::MislabeledPage { key: id, found: page.id })
                }
                Some(_) => {}
            }
        }

        let mut sections = HashSet::new();
        for page in self.pages.values() {
            for section in &page.sections {
                if !sections.insert(section.id.as_str()) {
                    return Err(ModelError::DuplicateSectionId(section.id.clone()));
                }
            }
        }

        let mut components = HashSet::new();
        for id in self.component_ids() {
            if !components.insert(id) {
                return Err(ModelError::DuplicateComponentId(id.to_string()));
            }
        }

        for page in self.pages.values() {
            for node in page.sections.iter().flat_map(|s| &s.components) {
                if let Some(bad) = node.non_finite_geometry() {
                    return Err(ModelError::NonFiniteGeometry(bad.id.clone()));
                }
            }
        }

        Ok(())
    }
}

impl Default for Document {
    /// Starter site used on first launch and when stored data is unusable
    fn default() -> Self {
        let mut doc = Document::empty();

        let mut hero = Section::new("default-hero", "Hero", SectionCategory::Hero)
            .with_component(
                ComponentNode::new("default-hero-banner", "hero")
                    .with_prop("title", "Welcome to your new site")
                    .with_prop("subtitle", "Drag components from the library to get started")
                    .with_prop("backgroundImage", "")
                    .with_prop("align", "center")
                    .with_child(
                        ComponentNode::new("default-hero-cta", "button")
                            .with_prop("label", "Shop now")
                            .with_prop("href", "/products")
                            .with_prop("variant", "primary"),
                    ),
            );
        hero.order = 0;

        let mut intro = Section::new("default-intro", "Introduction", SectionCategory::About)
            .with_component(
                ComponentNode::new("default-intro-heading", "heading")
                    .with_prop("text", "About us")
                    .with_prop("level", 2),
            )
            .with_component(
                ComponentNode::new("default-intro-text", "text")
                    .with_prop("content", "Tell visitors who you are and what you offer."),
            );
        intro.order = 1;

        if let Some(home) = doc.page_mut(PageId::Home) {
            home.sections = vec![hero, intro];
        }

        let mut contact = Section::new("default-contact", "Contact", SectionCategory::Cta)
            .with_component(
                ComponentNode::new("default-contact-form", "form").with_prop("formId", "contact"),
            );
        contact.order = 0;
        if let Some(page) = doc.page_mut(PageId::Contact) {
            page.sections = vec![contact];
        }

        doc.settings = Settings {
            navigation: PageId::ALL
                .into_iter()
                .map(|page| NavItem {
                    label: capitalize(page.as_str()),
                    target: match page {
                        PageId::Home => "/".to_string(),
                        other => format!("/{}", other),
                    },
                })
                .collect(),
            forms: vec![FormDefinition {
                id: "contact".to_string(),
                name: "Contact".to_string(),
                fields: vec![
                    field("name", "Name", FieldKind::Text, true),
                    field("email", "Email", FieldKind::Email, true),
                    field("message", "Message", FieldKind::Textarea, false),
                ],
                submit_label: "Send".to_string(),
            }],
            seo: Seo {
                title: "My Store".to_string(),
                description: "An online store built with Sitecraft".to_string(),
                keywords: vec!["store".to_string(), "shop".to_string()],
                og_image: None,
            },
        };

        doc
    }
}

fn field(name: &str, label: &str, kind: FieldKind, required: bool) -> FormField {
    FormField {
        name: name.to_string(),
        label: label.to_string(),
        kind,
        required,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
