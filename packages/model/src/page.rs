use crate::Section;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of pages a site is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageId {
    Home,
    About,
    Products,
    Contact,
}

impl PageId {
    pub const ALL: [PageId; 4] = [PageId::Home, PageId::About, PageId::Products, PageId::Contact];

    pub fn as_str(&self) -> &'static str {
        match self {
            PageId::Home => "home",
            PageId::About => "about",
            PageId::Products => "products",
            PageId::Contact => "contact",
        }
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PageId::ALL
            .into_iter()
            .find(|page| page.as_str() == s)
            .ok_or_else(|| format!("Unknown page: {}. Use: home, about, products, or contact", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: PageId,

    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Page {
    pub fn new(id: PageId) -> Self {
        Self {
            id,
            sections: Vec::new(),
        }
    }

    /// Sections sorted by order key (stable for equal keys)
    pub fn ordered_sections(&self) -> Vec<&Section> {
        let mut sections: Vec<&Section> = self.sections.iter().collect();
        sections.sort_by_key(|s| s.order);
        sections
    }

    /// Sort the owned list by order key
    pub fn sort_sections(&mut self) {
        self.sections.sort_by_key(|s| s.order);
    }

    /// Rewrite order keys to match list position (0-based, contiguous)
    pub fn renumber_sections(&mut self) {
        for (position, section) in self.sections.iter_mut().enumerate() {
            section.order = position as u32;
        }
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn section_mut(&mut self, id: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == id)
    }
}
