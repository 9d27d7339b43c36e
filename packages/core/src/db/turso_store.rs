//! TursoStore - NodeStore Implementation for the libsql Backend
//!
//! `TursoStore` wraps `DatabaseService` and delegates every operation to its
//! `db_*` methods. This module owns the conversion from `libsql::Row` to the
//! model types and the transaction boundary of the translation factory.
//!
//! # Examples
//!
//! ```rust,no_run
//! use nodetree_core::db::{DatabaseService, NodeStore, TursoStore};
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let db = Arc::new(DatabaseService::new(PathBuf::from("./data/nodetree.db")).await?);
//!     let store: Arc<dyn NodeStore> = Arc::new(TursoStore::new(db));
//!     let roots = store.get_top_nodes().await?;
//!     println!("{} root nodes", roots.len());
//!     Ok(())
//! }
//! ```

use crate::db::node_store::{
    NodeStore, NodeTarget, StoreTransaction, TranslationDraft, UrlQuery,
};
use crate::db::version_store::VersionStore;
use crate::db::{
    DatabaseService, DbCreateNodeParams, DbCreateTranslationParams, DbCreateVersionParams,
};
use crate::models::{
    HasNode, NewNode, NewNodeTranslation, NewNodeVersion, Node, NodeTranslation, NodeVersion,
    User,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use libsql::{Connection, Row, Rows};
use std::sync::Arc;

/// NodeStore implementation over `DatabaseService`
pub struct TursoStore {
    db: Arc<DatabaseService>,
}

impl TursoStore {
    pub fn new(db: Arc<DatabaseService>) -> Self {
        Self { db }
    }

    /// Parse a stored timestamp, accepting SQLite and RFC3339 formats
    fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
            return Ok(naive.and_utc());
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(dt.with_timezone(&Utc));
        }

        Err(anyhow::anyhow!(
            "Unable to parse timestamp '{}' as SQLite or RFC3339 format",
            s
        ))
    }

    /// Convert a row selected with `NODE_COLUMNS`
    fn row_to_node(row: &Row) -> Result<Node> {
        let id: i64 = row.get(0).context("Failed to get id")?;
        let parent_id: Option<i64> = row.get(1).context("Failed to get parent_id")?;
        let deleted: i64 = row.get(2).context("Failed to get deleted")?;
        let sequence_number: i64 = row.get(3).context("Failed to get sequence_number")?;
        let hidden_from_nav: i64 = row.get(4).context("Failed to get hidden_from_nav")?;
        let ref_entity_name: String = row.get(5).context("Failed to get ref_entity_name")?;
        let content_kind: String = row.get(6).context("Failed to get content_kind")?;

        Ok(Node {
            id,
            parent_id,
            deleted: deleted != 0,
            sequence_number,
            hidden_from_nav: hidden_from_nav != 0,
            ref_entity_name,
            kind: content_kind
                .parse()
                .with_context(|| format!("Invalid content kind on node {}", id))?,
        })
    }

    /// Convert a row selected with `TRANSLATION_COLUMNS`
    fn row_to_translation(row: &Row) -> Result<NodeTranslation> {
        let online: i64 = row.get(5).context("Failed to get online")?;

        Ok(NodeTranslation {
            id: row.get(0).context("Failed to get id")?,
            node_id: row.get(1).context("Failed to get node_id")?,
            lang: row.get(2).context("Failed to get lang")?,
            slug: row.get(3).context("Failed to get slug")?,
            url: row.get(4).context("Failed to get url")?,
            online: online != 0,
            title: row.get(6).context("Failed to get title")?,
            weight: row.get(7).context("Failed to get weight")?,
            public_node_version_id: row
                .get(8)
                .context("Failed to get public_node_version_id")?,
        })
    }

    /// Convert a row selected with `VERSION_COLUMNS`
    fn row_to_version(row: &Row) -> Result<NodeVersion> {
        let id: i64 = row.get(0).context("Failed to get id")?;
        let version_type: String = row.get(5).context("Failed to get version_type")?;
        let created: String = row.get(7).context("Failed to get created")?;
        let updated: String = row.get(8).context("Failed to get updated")?;

        Ok(NodeVersion {
            id,
            node_translation_id: row.get(1).context("Failed to get node_translation_id")?,
            owner: row.get(2).context("Failed to get owner")?,
            ref_id: row.get(3).context("Failed to get ref_id")?,
            ref_entity_name: row.get(4).context("Failed to get ref_entity_name")?,
            version_type: version_type
                .parse()
                .with_context(|| format!("Invalid version type on version {}", id))?,
            origin_id: row.get(6).context("Failed to get origin_id")?,
            created: Self::parse_timestamp(&created).context("Failed to parse created")?,
            updated: Self::parse_timestamp(&updated).context("Failed to parse updated")?,
        })
    }

    async fn collect<T>(mut rows: Rows, convert: fn(&Row) -> Result<T>) -> Result<Vec<T>> {
        let mut items = Vec::new();
        while let Some(row) = rows.next().await.context("Failed to read row")? {
            items.push(convert(&row)?);
        }
        Ok(items)
    }

    async fn insert_node_on(conn: &Connection, node: &NewNode) -> Result<Node> {
        node.validate()?;

        let id = DatabaseService::insert_node(
            conn,
            DbCreateNodeParams {
                parent_id: node.parent_id,
                sequence_number: node.sequence_number,
                hidden_from_nav: node.hidden_from_nav,
                ref_entity_name: &node.ref_entity_name,
                content_kind: node.kind.as_str(),
            },
        )
        .await?;

        let row = DatabaseService::select_node(conn, id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Node {} not found after creation", id))?;
        Self::row_to_node(&row)
    }

    async fn insert_translation_on(
        conn: &Connection,
        node_id: i64,
        draft: &TranslationDraft,
    ) -> Result<NodeTranslation> {
        let id = DatabaseService::insert_translation(
            conn,
            DbCreateTranslationParams {
                node_id,
                lang: &draft.lang,
                slug: draft.slug.as_deref(),
                url: draft.url.as_deref(),
                online: draft.online,
                title: &draft.title,
                weight: draft.weight,
            },
        )
        .await?;

        let row = DatabaseService::select_translation(conn, id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Translation {} not found after creation", id))?;
        Self::row_to_translation(&row)
    }

    /// Body of `create_translation_with_version`, run inside `BEGIN`/`COMMIT`
    async fn write_translation_with_version(
        tx: &TursoTransaction,
        target: NodeTarget,
        draft: TranslationDraft,
        content: &dyn HasNode,
        owner: &User,
        versions: &dyn VersionStore,
    ) -> Result<(Node, NodeTranslation)> {
        let node = match target {
            NodeTarget::Existing(node) => node,
            NodeTarget::New(params) => Self::insert_node_on(&tx.conn, &params).await?,
        };

        let mut translation = Self::insert_translation_on(&tx.conn, node.id, &draft).await?;

        let version = versions
            .create_version_for(tx, content, &translation, owner, None)
            .await
            .context("Version store failed to create the public version")?;

        DatabaseService::set_public_version(&tx.conn, translation.id, version.id).await?;
        translation.public_node_version_id = Some(version.id);

        Ok((node, translation))
    }
}

/// Open transaction on a single connection
pub struct TursoTransaction {
    conn: Connection,
}

#[async_trait]
impl StoreTransaction for TursoTransaction {
    async fn insert_version(&self, version: NewNodeVersion) -> Result<NodeVersion> {
        let id = DatabaseService::insert_version(
            &self.conn,
            DbCreateVersionParams {
                node_translation_id: version.node_translation_id,
                owner: &version.owner,
                ref_id: version.ref_id,
                ref_entity_name: &version.ref_entity_name,
                version_type: version.version_type.as_str(),
                origin_id: version.origin_id,
            },
        )
        .await?;

        let row = DatabaseService::select_version(&self.conn, id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Version {} not found after creation", id))?;
        TursoStore::row_to_version(&row)
    }
}

#[async_trait]
impl NodeStore for TursoStore {
    async fn create_node(&self, node: NewNode) -> Result<Node> {
        node.validate()?;

        let id = self
            .db
            .db_create_node(DbCreateNodeParams {
                parent_id: node.parent_id,
                sequence_number: node.sequence_number,
                hidden_from_nav: node.hidden_from_nav,
                ref_entity_name: &node.ref_entity_name,
                content_kind: node.kind.as_str(),
            })
            .await?;

        self.get_node(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Node {} not found after creation", id))
    }

    async fn get_node(&self, id: i64) -> Result<Option<Node>> {
        match self.db.db_get_node(id).await? {
            Some(row) => Ok(Some(Self::row_to_node(&row)?)),
            None => Ok(None),
        }
    }

    async fn get_top_nodes(&self) -> Result<Vec<Node>> {
        let rows = self.db.db_get_top_nodes().await?;
        Self::collect(rows, Self::row_to_node).await
    }

    async fn get_child_nodes(
        &self,
        parent_id: i64,
        lang: &str,
        include_hidden_from_nav: bool,
    ) -> Result<Vec<Node>> {
        let rows = self
            .db
            .db_get_child_nodes(parent_id, lang, include_hidden_from_nav)
            .await?;
        Self::collect(rows, Self::row_to_node).await
    }

    async fn set_node_deleted(&self, id: i64, deleted: bool) -> Result<bool> {
        let affected = self.db.db_set_node_deleted(id, deleted).await?;
        Ok(affected > 0)
    }

    async fn create_translation(&self, translation: NewNodeTranslation) -> Result<NodeTranslation> {
        let id = self
            .db
            .db_create_translation(DbCreateTranslationParams {
                node_id: translation.node_id,
                lang: &translation.lang,
                slug: translation.slug.as_deref(),
                url: translation.url.as_deref(),
                online: translation.online,
                title: &translation.title,
                weight: translation.weight,
            })
            .await?;

        self.get_translation(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Translation {} not found after creation", id))
    }

    async fn get_translation(&self, id: i64) -> Result<Option<NodeTranslation>> {
        match self.db.db_get_translation(id).await? {
            Some(row) => Ok(Some(Self::row_to_translation(&row)?)),
            None => Ok(None),
        }
    }

    async fn get_translation_for_node(
        &self,
        node_id: i64,
        lang: &str,
    ) -> Result<Option<NodeTranslation>> {
        match self.db.db_get_translation_for_node(node_id, lang).await? {
            Some(row) => Ok(Some(Self::row_to_translation(&row)?)),
            None => Ok(None),
        }
    }

    async fn get_any_translation_for_node(&self, node_id: i64) -> Result<Option<NodeTranslation>> {
        match self.db.db_get_any_translation_for_node(node_id).await? {
            Some(row) => Ok(Some(Self::row_to_translation(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_translation_for_slug_part(
        &self,
        parent_id: Option<i64>,
        slug: Option<&str>,
    ) -> Result<Option<NodeTranslation>> {
        match self
            .db
            .db_find_translation_for_slug_part(parent_id, slug)
            .await?
        {
            Some(row) => Ok(Some(Self::row_to_translation(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_translation_for_url(&self, query: UrlQuery<'_>) -> Result<Option<NodeTranslation>> {
        let url = (!query.url.is_empty()).then_some(query.url);
        let locale = (!query.locale.is_empty()).then_some(query.locale);

        match self
            .db
            .db_find_translation_for_url(url, locale, query.include_deleted, query.exclude_id)
            .await?
        {
            Some(row) => Ok(Some(Self::row_to_translation(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_best_match_for_url(
        &self,
        url: &str,
        lang: &str,
    ) -> Result<Option<NodeTranslation>> {
        match self.db.db_find_best_match_for_url(url, lang).await? {
            Some(row) => Ok(Some(Self::row_to_translation(&row)?)),
            None => Ok(None),
        }
    }

    async fn get_top_translations(&self) -> Result<Vec<NodeTranslation>> {
        let rows = self.db.db_get_top_translations().await?;
        Self::collect(rows, Self::row_to_translation).await
    }

    async fn get_online_translations(&self, lang: Option<&str>) -> Result<Vec<NodeTranslation>> {
        let rows = self.db.db_get_online_translations(lang).await?;
        Self::collect(rows, Self::row_to_translation).await
    }

    async fn get_translation_for_content(
        &self,
        ref_entity_name: &str,
        ref_id: i64,
    ) -> Result<Option<NodeTranslation>> {
        match self
            .db
            .db_get_translation_for_content(ref_entity_name, ref_id)
            .await?
        {
            Some(row) => Ok(Some(Self::row_to_translation(&row)?)),
            None => Ok(None),
        }
    }

    async fn set_translation_online(&self, id: i64, online: bool) -> Result<bool> {
        let affected = self.db.db_set_translation_online(id, online).await?;
        Ok(affected > 0)
    }

    async fn create_translation_with_version(
        &self,
        target: NodeTarget,
        draft: TranslationDraft,
        content: &dyn HasNode,
        owner: &User,
        versions: &dyn VersionStore,
    ) -> Result<(Node, NodeTranslation)> {
        let conn = self.db.connect_with_timeout().await?;
        DatabaseService::begin(&conn).await?;
        let tx = TursoTransaction { conn };

        match Self::write_translation_with_version(&tx, target, draft, content, owner, versions)
            .await
        {
            Ok(created) => {
                DatabaseService::commit(&tx.conn).await?;
                Ok(created)
            }
            Err(e) => {
                DatabaseService::rollback(&tx.conn).await;
                tracing::warn!("Rolled back translation creation: {:#}", e);
                Err(e)
            }
        }
    }

    async fn get_version(&self, id: i64) -> Result<Option<NodeVersion>> {
        match self.db.db_get_version(id).await? {
            Some(row) => Ok(Some(Self::row_to_version(&row)?)),
            None => Ok(None),
        }
    }

    async fn get_versions_for_translation(&self, translation_id: i64) -> Result<Vec<NodeVersion>> {
        let rows = self
            .db
            .db_get_versions_for_translation(translation_id)
            .await?;
        Self::collect(rows, Self::row_to_version).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SnapshotVersionStore;
    use crate::models::{ContentKind, ContentRef, VersionType};
    use tempfile::TempDir;

    async fn create_test_store() -> (TursoStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let db = Arc::new(DatabaseService::new(db_path).await.unwrap());
        (TursoStore::new(db), temp_dir)
    }

    fn draft(lang: &str, title: &str, slug: &str) -> TranslationDraft {
        TranslationDraft {
            lang: lang.to_string(),
            slug: Some(slug.to_string()),
            url: Some(slug.to_string()),
            online: false,
            title: title.to_string(),
            weight: 0,
        }
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(TursoStore::parse_timestamp("2025-01-03 10:00:00").is_ok());
        assert!(TursoStore::parse_timestamp("2025-01-03T10:00:00+00:00").is_ok());
        assert!(TursoStore::parse_timestamp("yesterday").is_err());
    }

    #[tokio::test]
    async fn test_create_node_assigns_increasing_sequence_numbers() {
        let (store, _temp) = create_test_store().await;

        let first = store.create_node(NewNode::root("page")).await.unwrap();
        let second = store
            .create_node(NewNode::child_of(first.id, "page").with_kind(ContentKind::Structure))
            .await
            .unwrap();
        let pinned = store
            .create_node(NewNode::root("page").with_sequence_number(100))
            .await
            .unwrap();

        assert!(second.sequence_number > first.sequence_number);
        assert_eq!(second.parent_id, Some(first.id));
        assert_eq!(second.kind, ContentKind::Structure);
        assert_eq!(pinned.sequence_number, 100);
        assert!(!pinned.deleted);
    }

    #[tokio::test]
    async fn test_tombstoned_nodes_leave_top_nodes() {
        let (store, _temp) = create_test_store().await;

        let a = store.create_node(NewNode::root("page")).await.unwrap();
        let b = store.create_node(NewNode::root("page")).await.unwrap();
        assert!(store.set_node_deleted(a.id, true).await.unwrap());
        assert!(!store.set_node_deleted(9999, true).await.unwrap());

        let top: Vec<i64> = store
            .get_top_nodes()
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(top, vec![b.id]);

        // Tombstoned nodes are still readable by id
        let fetched = store.get_node(a.id).await.unwrap().unwrap();
        assert!(fetched.deleted);
    }

    #[tokio::test]
    async fn test_child_nodes_ordered_by_weight_then_title() {
        let (store, _temp) = create_test_store().await;

        let root = store.create_node(NewNode::root("page")).await.unwrap();
        let zeta = store
            .create_node(NewNode::child_of(root.id, "page"))
            .await
            .unwrap();
        let alpha = store
            .create_node(NewNode::child_of(root.id, "page"))
            .await
            .unwrap();
        let heavy = store
            .create_node(NewNode::child_of(root.id, "page"))
            .await
            .unwrap();
        let hidden = store
            .create_node(NewNode::child_of(root.id, "page").hidden_from_nav(true))
            .await
            .unwrap();

        for (node, title, weight) in [
            (&zeta, "Zeta", 0),
            (&alpha, "Alpha", 0),
            (&heavy, "Aardvark", 5),
            (&hidden, "Hidden", 0),
        ] {
            store
                .create_translation(NewNodeTranslation::new(node.id, "en", title).with_weight(weight))
                .await
                .unwrap();
        }

        let ordered: Vec<i64> = store
            .get_child_nodes(root.id, "en", true)
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(ordered, vec![alpha.id, hidden.id, zeta.id, heavy.id]);

        let visible = store.get_child_nodes(root.id, "en", false).await.unwrap();
        assert!(visible.iter().all(|n| n.id != hidden.id));
    }

    #[tokio::test]
    async fn test_duplicate_node_lang_is_rejected() {
        let (store, _temp) = create_test_store().await;

        let node = store.create_node(NewNode::root("page")).await.unwrap();
        store
            .create_translation(NewNodeTranslation::new(node.id, "en", "Home"))
            .await
            .unwrap();

        let duplicate = store
            .create_translation(NewNodeTranslation::new(node.id, "en", "Home again"))
            .await;
        assert!(duplicate.is_err());
    }

    #[tokio::test]
    async fn test_translation_with_version_commits_all_rows() {
        let (store, _temp) = create_test_store().await;
        let content = ContentRef::page(12, "About us");
        let owner = User::new(1, "admin");

        let (node, translation) = store
            .create_translation_with_version(
                NodeTarget::New(NewNode::root("page")),
                draft("en", "About us", "about-us"),
                &content,
                &owner,
                &SnapshotVersionStore::new(),
            )
            .await
            .unwrap();

        assert_eq!(translation.node_id, node.id);
        let version_id = translation.public_node_version_id.unwrap();
        let version = store.get_version(version_id).await.unwrap().unwrap();
        assert_eq!(version.node_translation_id, translation.id);
        assert_eq!(version.ref_id, 12);
        assert_eq!(version.ref_entity_name, "page");
        assert_eq!(version.owner, "admin");
        assert_eq!(version.version_type, VersionType::Public);
        assert!(version.origin_id.is_none());

        let by_content = store
            .get_translation_for_content("page", 12)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_content.id, translation.id);
    }

    #[tokio::test]
    async fn test_failed_version_rolls_back_node_and_translation() {
        let (store, _temp) = create_test_store().await;
        // Unsaved content makes the snapshot version store fail mid-transaction
        let content = ContentRef::unsaved("page", "Draft");
        let owner = User::new(1, "admin");

        let result = store
            .create_translation_with_version(
                NodeTarget::New(NewNode::root("page")),
                draft("en", "Draft", "draft"),
                &content,
                &owner,
                &SnapshotVersionStore::new(),
            )
            .await;

        assert!(result.is_err());
        assert!(store.get_top_nodes().await.unwrap().is_empty());
        assert!(store.get_top_translations().await.unwrap().is_empty());
    }
}
