//! URL Matcher
//!
//! Two lookup modes over the denormalized `url` column:
//!
//! - exact: the stored url equals the requested one
//! - best match: the longest stored url that is a string prefix of the request
//!
//! Urls are compared as stored, without normalization. A stored `"blog"`
//! therefore also prefixes `"blogger"`; callers that need segment boundaries
//! should check the remainder themselves.

use crate::db::{NodeStore, UrlQuery};
use crate::models::NodeTranslation;
use crate::services::error::NodeTreeError;
use std::sync::Arc;

pub struct UrlMatcher {
    store: Arc<dyn NodeStore>,
}

impl UrlMatcher {
    pub fn new(store: Arc<dyn NodeStore>) -> Self {
        Self { store }
    }

    /// Exact url lookup
    ///
    /// An empty `url` matches translations without a url (NULL or empty);
    /// an empty `locale` matches every language. `exclude` removes that one
    /// translation from the candidates, which is how a caller checks whether
    /// a url is already taken by some other translation.
    pub async fn resolve_by_url(
        &self,
        url: &str,
        locale: &str,
        include_deleted: bool,
        exclude: Option<&NodeTranslation>,
    ) -> Result<Option<NodeTranslation>, NodeTreeError> {
        let query = UrlQuery {
            url,
            locale,
            include_deleted,
            exclude_id: exclude.map(|t| t.id),
        };

        let found = self.store.find_translation_for_url(query).await?;
        if found.is_none() {
            tracing::debug!("No translation for url '{}' in locale '{}'", url, locale);
        }
        Ok(found)
    }

    /// Longest-prefix lookup among non-tombstoned translations of `locale`
    pub async fn best_match_for_url(
        &self,
        url: &str,
        locale: &str,
    ) -> Result<Option<NodeTranslation>, NodeTreeError> {
        Ok(self.store.find_best_match_for_url(url, locale).await?)
    }
}
