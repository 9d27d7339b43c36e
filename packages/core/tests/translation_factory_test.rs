//! Translation Factory Tests
//!
//! Integration tests for the write path: translation plus public version in
//! one transaction, and the rollback when the version store fails.

#[cfg(test)]
mod translation_factory_tests {
    use anyhow::Result;
    use async_trait::async_trait;
    use nodetree_core::db::{
        DatabaseService, NodeStore, SnapshotVersionStore, StoreTransaction, TursoStore,
        VersionStore,
    };
    use nodetree_core::models::{
        ContentRef, HasNode, NewNode, NodeTranslation, NodeVersion, User,
    };
    use nodetree_core::services::{NodeTreeError, SlugResolver, TranslationFactory};
    use std::sync::Arc;
    use tempfile::TempDir;

    /// Version store that always fails after the translation row is written
    struct FailingVersionStore;

    #[async_trait]
    impl VersionStore for FailingVersionStore {
        async fn create_version_for(
            &self,
            _tx: &dyn StoreTransaction,
            _content: &dyn HasNode,
            _translation: &NodeTranslation,
            _owner: &User,
            _predecessor: Option<&NodeVersion>,
        ) -> Result<NodeVersion> {
            anyhow::bail!("version storage unavailable")
        }
    }

    /// Helper to create test database
    async fn create_test_store() -> Result<(Arc<dyn NodeStore>, TempDir)> {
        let temp_dir = TempDir::new()?;
        let db_path = temp_dir.path().join("test.db");
        let db = Arc::new(DatabaseService::new(db_path).await?);
        Ok((Arc::new(TursoStore::new(db)), temp_dir))
    }

    #[tokio::test]
    async fn test_round_trip_public_version_resolvable() -> Result<()> {
        let (store, _temp_dir) = create_test_store().await?;
        let factory = TranslationFactory::new(store.clone(), Arc::new(SnapshotVersionStore::new()));
        let node = store.create_node(NewNode::root("page")).await?;
        let owner = User::new(7, "editor");

        let created = factory
            .create_translation_for(&ContentRef::page(11, "Welcome"), "en", &node, &owner)
            .await?;

        let loaded = store
            .get_translation_for_node(node.id, "en")
            .await?
            .expect("translation persisted");
        assert_eq!(loaded, created);

        let version_id = loaded.public_node_version_id.expect("public version set");
        let version = store.get_version(version_id).await?.expect("version resolvable");
        assert_eq!(version.node_translation_id, loaded.id);
        assert_eq!(version.ref_entity_name, "page");
        assert_eq!(version.ref_id, 11);

        let versions = store.get_versions_for_translation(loaded.id).await?;
        assert_eq!(versions.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_version_failure_rolls_back_everything() -> Result<()> {
        let (store, _temp_dir) = create_test_store().await?;
        let factory = TranslationFactory::new(store.clone(), Arc::new(FailingVersionStore));
        let owner = User::new(7, "editor");

        let err = factory
            .attach_to_tree(&ContentRef::page(3, "Orphan"), "en", None, &owner)
            .await
            .unwrap_err();
        assert!(matches!(err, NodeTreeError::Store(_)));
        assert!(err.to_string().contains("version storage unavailable"));

        // Neither the node nor the translation survived
        assert!(store.get_top_nodes().await?.is_empty());
        assert!(store.get_top_translations().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_attached_pages_resolve_by_slug() -> Result<()> {
        let (store, _temp_dir) = create_test_store().await?;
        let factory = TranslationFactory::new(store.clone(), Arc::new(SnapshotVersionStore::new()));
        let owner = User::new(7, "editor");

        let (root, root_en) = factory
            .attach_to_tree(&ContentRef::page(1, "Home"), "en", None, &owner)
            .await?;
        let (team, team_en) = factory
            .attach_to_tree(&ContentRef::page(2, "Our Team"), "en", Some(&root), &owner)
            .await?;
        let (_, member_en) = factory
            .attach_to_tree(&ContentRef::page(3, "Zoë Smith"), "en", Some(&team), &owner)
            .await?;

        assert_eq!(team_en.url.as_deref(), Some("home/our-team"));
        assert_eq!(member_en.url.as_deref(), Some("home/our-team/zoe-smith"));

        let resolver = SlugResolver::new(store.clone());
        let found = resolver
            .resolve_slug_path("our-team/zoe-smith", Some(&root_en))
            .await?
            .expect("member resolves");
        assert_eq!(found.id, member_en.id);

        // New translations start offline until published
        assert!(store.get_online_translations(Some("en")).await?.is_empty());
        assert!(store.set_translation_online(member_en.id, true).await?);
        let online = store.get_online_translations(None).await?;
        assert_eq!(online.len(), 1);
        assert_eq!(online[0].id, member_en.id);
        Ok(())
    }
}
