//! NodeStore Trait - Persistence Abstraction
//!
//! This module defines the `NodeStore` trait the resolution services depend
//! on. Services never see SQL; they call these methods and treat `Ok(None)`
//! as the normal "no such row" outcome.
//!
//! # Design Decisions
//!
//! 1. **Async-first**: every method is async so embedded and networked stores
//!    can implement it
//! 2. **Tie-breaks live in the store**: lookups that may see several candidate
//!    rows return the one with the highest node sequence number
//! 3. **Error handling**: `anyhow::Result` with context; store failures travel
//!    to the caller unchanged
//! 4. **Transactions**: the only multi-row write, creating a translation with
//!    its public version, is one store method running one transaction
//!
//! # Examples
//!
//! ```rust,no_run
//! use nodetree_core::db::{DatabaseService, NodeStore, TursoStore};
//! use nodetree_core::models::{NewNode, NewNodeTranslation};
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let db = Arc::new(DatabaseService::new(PathBuf::from("./data/nodetree.db")).await?);
//!     let store: Arc<dyn NodeStore> = Arc::new(TursoStore::new(db));
//!
//!     let home = store.create_node(NewNode::root("page")).await?;
//!     store
//!         .create_translation(NewNodeTranslation::new(home.id, "en", "Home").online(true))
//!         .await?;
//!     Ok(())
//! }
//! ```

use crate::db::version_store::VersionStore;
use crate::models::{
    HasNode, NewNode, NewNodeTranslation, NewNodeVersion, Node, NodeTranslation, NodeVersion,
    User,
};
use anyhow::Result;
use async_trait::async_trait;

/// Node the factory attaches a translation to
#[derive(Debug, Clone)]
pub enum NodeTarget {
    /// Node already in the store
    Existing(Node),
    /// Node created in the same transaction as its first translation
    New(NewNode),
}

/// Translation fields decided before the node id is known
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationDraft {
    pub lang: String,
    pub slug: Option<String>,
    pub url: Option<String>,
    pub online: bool,
    pub title: String,
    pub weight: i64,
}

/// Exact url lookup parameters
#[derive(Debug, Clone, Default)]
pub struct UrlQuery<'a> {
    /// Requested url; empty matches translations without a url
    pub url: &'a str,
    /// Locale filter; empty matches every language
    pub locale: &'a str,
    pub include_deleted: bool,
    /// Translation id removed from the candidates
    pub exclude_id: Option<i64>,
}

/// Writes available to a [`VersionStore`] inside an open store transaction
#[async_trait]
pub trait StoreTransaction: Send + Sync {
    async fn insert_version(&self, version: NewNodeVersion) -> Result<NodeVersion>;
}

/// Abstraction layer for node forest persistence
///
/// Implementations must be `Send + Sync`; services share one store through
/// `Arc<dyn NodeStore>` across concurrent requests.
#[async_trait]
pub trait NodeStore: Send + Sync {
    //
    // NODES
    //

    async fn create_node(&self, node: NewNode) -> Result<Node>;

    /// Get a node by id, tombstoned or not
    async fn get_node(&self, id: i64) -> Result<Option<Node>>;

    /// Non-tombstoned nodes without a parent
    async fn get_top_nodes(&self) -> Result<Vec<Node>>;

    /// Non-tombstoned children of `parent_id`, ordered by their `lang`
    /// translation's weight, then title
    async fn get_child_nodes(
        &self,
        parent_id: i64,
        lang: &str,
        include_hidden_from_nav: bool,
    ) -> Result<Vec<Node>>;

    /// Set or clear the tombstone flag; `false` when the node does not exist
    async fn set_node_deleted(&self, id: i64, deleted: bool) -> Result<bool>;

    //
    // TRANSLATIONS
    //

    /// Insert a translation without a version
    async fn create_translation(&self, translation: NewNodeTranslation) -> Result<NodeTranslation>;

    async fn get_translation(&self, id: i64) -> Result<Option<NodeTranslation>>;

    /// Translation of a node in `lang`, online or not
    async fn get_translation_for_node(
        &self,
        node_id: i64,
        lang: &str,
    ) -> Result<Option<NodeTranslation>>;

    /// Any translation of a node, preferring online ones
    async fn get_any_translation_for_node(&self, node_id: i64) -> Result<Option<NodeTranslation>>;

    /// One step of slug-path resolution
    ///
    /// `parent_id = None` only matches root nodes; `slug = None` only matches
    /// translations without a slug. Tombstoned nodes never match.
    async fn find_translation_for_slug_part(
        &self,
        parent_id: Option<i64>,
        slug: Option<&str>,
    ) -> Result<Option<NodeTranslation>>;

    async fn find_translation_for_url(&self, query: UrlQuery<'_>) -> Result<Option<NodeTranslation>>;

    /// Translation in `lang` whose url is the longest prefix of `url`
    async fn find_best_match_for_url(&self, url: &str, lang: &str)
        -> Result<Option<NodeTranslation>>;

    /// Translations of non-tombstoned root nodes
    async fn get_top_translations(&self) -> Result<Vec<NodeTranslation>>;

    /// Online translations of non-tombstoned nodes, optionally for one locale
    async fn get_online_translations(&self, lang: Option<&str>) -> Result<Vec<NodeTranslation>>;

    /// Translation whose newest version snapshots the given content
    async fn get_translation_for_content(
        &self,
        ref_entity_name: &str,
        ref_id: i64,
    ) -> Result<Option<NodeTranslation>>;

    /// `false` when the translation does not exist
    async fn set_translation_online(&self, id: i64, online: bool) -> Result<bool>;

    /// Create a translation and its public version in one transaction
    ///
    /// Inserts the node first when `target` is [`NodeTarget::New`]. The
    /// version comes from `versions` with no predecessor. Any failure rolls
    /// back every row written by this call.
    async fn create_translation_with_version(
        &self,
        target: NodeTarget,
        draft: TranslationDraft,
        content: &dyn HasNode,
        owner: &User,
        versions: &dyn VersionStore,
    ) -> Result<(Node, NodeTranslation)>;

    //
    // VERSIONS
    //

    async fn get_version(&self, id: i64) -> Result<Option<NodeVersion>>;

    async fn get_versions_for_translation(&self, translation_id: i64) -> Result<Vec<NodeVersion>>;
}
