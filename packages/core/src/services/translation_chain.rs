//! Translation-Chain Validator
//!
//! A translation is only reachable through its url when every ancestor node
//! is translated in the same locale. The check walks upward from the node
//! one parent at a time. The walk is iterative, remembers every node it has
//! visited and gives up after `max_depth` hops, so a corrupted parent graph
//! yields `false` instead of looping.

use crate::db::NodeStore;
use crate::models::NodeTranslation;
use crate::services::error::NodeTreeError;
use std::collections::HashSet;
use std::sync::Arc;

pub const DEFAULT_MAX_ANCESTOR_DEPTH: usize = 64;

pub struct TranslationChainValidator {
    store: Arc<dyn NodeStore>,
    max_depth: usize,
}

impl TranslationChainValidator {
    pub fn new(store: Arc<dyn NodeStore>) -> Self {
        Self::with_max_depth(store, DEFAULT_MAX_ANCESTOR_DEPTH)
    }

    pub fn with_max_depth(store: Arc<dyn NodeStore>, max_depth: usize) -> Self {
        Self { store, max_depth }
    }

    /// Whether every ancestor of the translation's node has a `locale`
    /// translation. Offline ancestor translations count as present.
    pub async fn has_complete_ancestor_chain(
        &self,
        translation: &NodeTranslation,
        locale: &str,
    ) -> Result<bool, NodeTreeError> {
        let mut visited = HashSet::new();
        let mut node_id = translation.node_id;

        for _ in 0..=self.max_depth {
            if !visited.insert(node_id) {
                tracing::warn!(
                    "Cycle in parent chain of translation {} at node {}",
                    translation.id,
                    node_id
                );
                return Ok(false);
            }

            let Some(node) = self.store.get_node(node_id).await? else {
                tracing::warn!(
                    "Parent chain of translation {} references missing node {}",
                    translation.id,
                    node_id
                );
                return Ok(false);
            };

            let Some(parent_id) = node.parent_id else {
                return Ok(true);
            };

            match self.store.get_translation_for_node(parent_id, locale).await? {
                Some(parent_translation) => node_id = parent_translation.node_id,
                None => {
                    tracing::debug!(
                        "Chain of translation {} broken: node {} has no '{}' translation",
                        translation.id,
                        parent_id,
                        locale
                    );
                    return Ok(false);
                }
            }
        }

        tracing::warn!(
            "Parent chain of translation {} exceeds {} levels",
            translation.id,
            self.max_depth
        );
        Ok(false)
    }
}
