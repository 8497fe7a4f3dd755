use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAsset {
    pub id: String,
    pub url: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<DateTime<Utc>>,
}

impl MediaAsset {
    pub fn new(id: impl Into<String>, url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            name: name.into(),
            alt: None,
            tags: Vec::new(),
            uploaded_at: None,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Media asset catalog (images and videos)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaLibrary {
    #[serde(default)]
    pub images: Vec<MediaAsset>,

    #[serde(default)]
    pub videos: Vec<MediaAsset>,
}

impl MediaLibrary {
    pub fn assets(&self, kind: MediaKind) -> &[MediaAsset] {
        match kind {
            MediaKind::Image => &self.images,
            MediaKind::Video => &self.videos,
        }
    }

    pub fn assets_mut(&mut self, kind: MediaKind) -> &mut Vec<MediaAsset> {
        match kind {
            MediaKind::Image => &mut self.images,
            MediaKind::Video => &mut self.videos,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.images.iter().chain(&self.videos).any(|a| a.id == id)
    }

    /// Remove an asset from whichever list holds it
    pub fn remove(&mut self, id: &str) -> Option<MediaAsset> {
        for list in [&mut self.images, &mut self.videos] {
            if let Some(pos) = list.iter().position(|a| a.id == id) {
                return Some(list.remove(pos));
            }
        }
        None
    }

    pub fn tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a MediaAsset> + 'a {
        self.images
            .iter()
            .chain(&self.videos)
            .filter(move |a| a.has_tag(tag))
    }
}
