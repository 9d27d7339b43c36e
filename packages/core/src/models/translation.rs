//! Node Translations
//!
//! A `NodeTranslation` binds a node to one language: its slug, denormalized
//! url, title and publish state. Every translation points at the version that
//! is currently public.

use serde::{Deserialize, Serialize};

/// Localized content binding for a node in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeTranslation {
    pub id: i64,
    pub node_id: i64,
    pub lang: String,
    /// Path segment; `None` only for the localized root
    pub slug: Option<String>,
    /// Full denormalized path for this locale; `None` for the root
    pub url: Option<String>,
    pub online: bool,
    pub title: String,
    pub weight: i64,
    pub public_node_version_id: Option<i64>,
}

impl NodeTranslation {
    /// Reference used by link choosers, e.g. `NT42`
    pub fn reference(&self) -> String {
        format!("NT{}", self.id)
    }
}

/// Parameters for inserting a translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNodeTranslation {
    pub node_id: i64,
    pub lang: String,
    pub slug: Option<String>,
    pub url: Option<String>,
    pub online: bool,
    pub title: String,
    pub weight: i64,
}

impl NewNodeTranslation {
    pub fn new(node_id: i64, lang: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            node_id,
            lang: lang.into(),
            slug: None,
            url: None,
            online: false,
            title: title.into(),
            weight: 0,
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn online(mut self, online: bool) -> Self {
        self.online = online;
        self
    }

    pub fn with_weight(mut self, weight: i64) -> Self {
        self.weight = weight;
        self
    }
}
