//! Lazy node chooser
//!
//! Serves the link chooser one slice of the tree at a time. The first request
//! (no id, or `"#"`) returns the top of the tree; every later request passes
//! the id of an item that came back with `children: true` and receives that
//! node's permitted children.

use crate::config::NodeTreeConfig;
use crate::db::NodeStore;
use crate::models::Node;
use crate::services::error::NodeTreeError;
use crate::services::permission::{DomainContext, PermissionOracle};
use crate::services::tree_materializer::{TreeItem, TreeMaterializer};
use std::sync::Arc;

pub const DEFAULT_LAZY_INCREMENT: u32 = 2;

/// Id the client sends for the tree's top level
const TOP_LEVEL_ID: &str = "#";

pub struct NodeChooser {
    store: Arc<dyn NodeStore>,
    materializer: TreeMaterializer,
    lazy_increment: u32,
}

impl NodeChooser {
    pub fn new(store: Arc<dyn NodeStore>) -> Self {
        let materializer = TreeMaterializer::new(store.clone());
        Self::with_materializer(store, materializer, DEFAULT_LAZY_INCREMENT)
    }

    pub fn from_config(store: Arc<dyn NodeStore>, config: &NodeTreeConfig) -> Self {
        let materializer = TreeMaterializer::new(store.clone());
        Self::with_materializer(store, materializer, config.lazy_increment)
    }

    pub fn with_materializer(
        store: Arc<dyn NodeStore>,
        materializer: TreeMaterializer,
        lazy_increment: u32,
    ) -> Self {
        Self {
            store,
            materializer,
            lazy_increment,
        }
    }

    /// Items for one chooser request
    ///
    /// `id` of `None` or `"#"` starts at the top: the switched host's root
    /// node in a multi-domain setup, every top node otherwise. Any other id
    /// must name an existing, non-tombstoned node.
    #[tracing::instrument(level = "debug", skip(self, oracle, domain))]
    pub async fn select_nodes_lazy(
        &self,
        locale: &str,
        id: Option<&str>,
        oracle: &dyn PermissionOracle,
        domain: &dyn DomainContext,
    ) -> Result<Vec<TreeItem>, NodeTreeError> {
        let roots = match id.map(str::trim) {
            None | Some("") | Some(TOP_LEVEL_ID) => self.top_level(domain).await?,
            Some(raw) => {
                let parent = self.find_node(raw).await?;
                self.materializer.children_of(&parent, locale, oracle).await?
            }
        };

        self.materializer
            .materialize(locale, &roots, self.lazy_increment, oracle, domain)
            .await
    }

    async fn top_level(&self, domain: &dyn DomainContext) -> Result<Vec<Node>, NodeTreeError> {
        if !domain.is_multi_domain() {
            return Ok(self.store.get_top_nodes().await?);
        }

        let root_id = domain
            .switched_host()
            .and_then(|switched| domain.root_node_id_for_host(&switched.host));
        let Some(root_id) = root_id else {
            tracing::debug!("No root node configured for the switched host");
            return Ok(Vec::new());
        };

        match self.store.get_node(root_id).await? {
            Some(root) if !root.deleted => Ok(vec![root]),
            _ => {
                tracing::warn!("Configured root node {} does not exist", root_id);
                Ok(Vec::new())
            }
        }
    }

    async fn find_node(&self, raw_id: &str) -> Result<Node, NodeTreeError> {
        let id: i64 = raw_id
            .parse()
            .map_err(|_| NodeTreeError::node_not_found(raw_id))?;

        match self.store.get_node(id).await? {
            Some(node) if !node.deleted => Ok(node),
            _ => Err(NodeTreeError::node_not_found(raw_id)),
        }
    }
}
