//! Version Store
//!
//! The version store decides what a new snapshot of a content entity looks
//! like. It never opens its own transaction: it writes through the
//! [`StoreTransaction`] handed to it, so the version commits or rolls back
//! together with the translation that links to it.

use crate::db::node_store::StoreTransaction;
use crate::models::{HasNode, NewNodeVersion, NodeTranslation, NodeVersion, User, VersionType};
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait VersionStore: Send + Sync {
    /// Create a version of `content` for `translation`, derived from
    /// `predecessor` when one is given
    async fn create_version_for(
        &self,
        tx: &dyn StoreTransaction,
        content: &dyn HasNode,
        translation: &NodeTranslation,
        owner: &User,
        predecessor: Option<&NodeVersion>,
    ) -> Result<NodeVersion>;
}

/// Stores one row per snapshot, referencing the content by type name and id
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotVersionStore;

impl SnapshotVersionStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl VersionStore for SnapshotVersionStore {
    async fn create_version_for(
        &self,
        tx: &dyn StoreTransaction,
        content: &dyn HasNode,
        translation: &NodeTranslation,
        owner: &User,
        predecessor: Option<&NodeVersion>,
    ) -> Result<NodeVersion> {
        let ref_id = content.id().ok_or_else(|| {
            anyhow::anyhow!(
                "Cannot version unsaved content of type {}",
                content.type_name()
            )
        })?;

        tx.insert_version(NewNodeVersion {
            node_translation_id: translation.id,
            owner: owner.username.clone(),
            ref_id,
            ref_entity_name: content.type_name().to_string(),
            version_type: VersionType::Public,
            origin_id: predecessor.map(|v| v.id),
        })
        .await
    }
}
