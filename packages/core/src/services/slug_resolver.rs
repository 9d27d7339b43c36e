//! Slug Resolver
//!
//! Resolves a `/`-delimited slug path to a translation by walking the forest
//! one segment at a time. Each segment is looked up among the children of the
//! node matched by the previous segment; the first segment is looked up among
//! the children of the starting parent, or among root nodes when there is
//! none.
//!
//! A segment that matches nothing fails the whole path. There is no fallback
//! to the nearest resolved ancestor.

use crate::db::NodeStore;
use crate::models::NodeTranslation;
use crate::services::error::NodeTreeError;
use std::sync::Arc;

pub struct SlugResolver {
    store: Arc<dyn NodeStore>,
}

impl SlugResolver {
    pub fn new(store: Arc<dyn NodeStore>) -> Self {
        Self { store }
    }

    /// Resolve `slug_path` below `starting_parent`
    ///
    /// - `""` resolves the root translation (no slug, node without parent),
    ///   whatever the starting parent
    /// - An empty segment (`"a//b"`, `"a/"`) matches a translation without a slug
    ///
    /// Tombstoned nodes never match; among duplicates the node with the highest
    /// sequence number wins.
    pub async fn resolve_slug_path(
        &self,
        slug_path: &str,
        starting_parent: Option<&NodeTranslation>,
    ) -> Result<Option<NodeTranslation>, NodeTreeError> {
        if slug_path.is_empty() {
            return self.resolve_root().await;
        }

        let mut parent_node_id = starting_parent.map(|t| t.node_id);
        let mut resolved = None;

        for segment in slug_path.split('/') {
            let slug = (!segment.is_empty()).then_some(segment);
            match self
                .store
                .find_translation_for_slug_part(parent_node_id, slug)
                .await?
            {
                Some(translation) => {
                    parent_node_id = Some(translation.node_id);
                    resolved = Some(translation);
                }
                None => {
                    tracing::debug!(
                        "Slug path '{}' unresolved at segment '{}' (parent node {:?})",
                        slug_path,
                        segment,
                        parent_node_id
                    );
                    return Ok(None);
                }
            }
        }

        Ok(resolved)
    }

    /// Translation without a slug whose node has no parent
    pub async fn resolve_root(&self) -> Result<Option<NodeTranslation>, NodeTreeError> {
        Ok(self.store.find_translation_for_slug_part(None, None).await?)
    }
}
