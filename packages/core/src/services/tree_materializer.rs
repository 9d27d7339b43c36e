//! Tree Materializer
//!
//! Builds the nested item list a link chooser renders from a set of root
//! nodes. Each level asks a [`ChildNodeProvider`] for the permitted children
//! of a node and recurses while the depth budget allows; at the last level a
//! node with children gets `children: true` so the client can load the rest
//! lazily with that node as the new root.
//!
//! The depth budget is passed by value into every call. Siblings each get the
//! same remaining budget, whatever an earlier sibling's subtree consumed.
//!
//! Each branch carries the ids of the nodes above it. A child that already
//! appears on its own branch (corrupt cyclic parent links) is dropped, so the
//! recursion ends at the height of the tree whatever the budget.

use crate::db::NodeStore;
use crate::models::{Node, NodeTranslation};
use crate::services::error::NodeTreeError;
use crate::services::permission::{DomainContext, PermissionOracle};
use async_trait::async_trait;
use serde::ser::{Serialize, Serializer};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Item classification; first match wins in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemType {
    /// Translation is not published
    Offline,
    /// Published, but the node is hidden from navigation
    HiddenFromNav,
    Default,
}

impl ItemType {
    pub fn classify(node: &Node, translation: &NodeTranslation) -> Self {
        if !translation.online {
            ItemType::Offline
        } else if node.hidden_from_nav {
            ItemType::HiddenFromNav
        } else {
            ItemType::Default
        }
    }
}

/// Children of a tree item
#[derive(Debug, Clone, PartialEq)]
pub enum TreeChildren {
    Items(Vec<TreeItem>),
    /// Children exist but were not materialized; serialized as `true`
    More,
}

impl Serialize for TreeChildren {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TreeChildren::Items(items) => items.serialize(serializer),
            TreeChildren::More => serializer.serialize_bool(true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TreeItem {
    /// Node id
    pub id: i64,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    /// Translation title
    pub text: String,
    /// Link reference inserted by the chooser, e.g. `[NT12]` or `[site:NT12]`
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<TreeChildren>,
}

impl TreeItem {
    /// Nested items, if this item's children were materialized
    pub fn child_items(&self) -> Option<&[TreeItem]> {
        match &self.children {
            Some(TreeChildren::Items(items)) => Some(items),
            _ => None,
        }
    }

    pub fn has_more(&self) -> bool {
        matches!(self.children, Some(TreeChildren::More))
    }
}

/// Permission-aware child lookup
#[async_trait]
pub trait ChildNodeProvider: Send + Sync {
    /// Ordered children of `parent` the current user may view in `locale`
    async fn children(
        &self,
        parent: &Node,
        locale: &str,
        oracle: &dyn PermissionOracle,
    ) -> Result<Vec<Node>, NodeTreeError>;
}

/// Non-tombstoned children (hidden ones included), ordered by translation
/// weight then title, filtered through the oracle's view permission
pub struct PermissionFilteredChildren {
    store: Arc<dyn NodeStore>,
}

impl PermissionFilteredChildren {
    pub fn new(store: Arc<dyn NodeStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ChildNodeProvider for PermissionFilteredChildren {
    async fn children(
        &self,
        parent: &Node,
        locale: &str,
        oracle: &dyn PermissionOracle,
    ) -> Result<Vec<Node>, NodeTreeError> {
        let candidates = self.store.get_child_nodes(parent.id, locale, true).await?;
        Ok(candidates
            .into_iter()
            .filter(|child| oracle.can_view(child.id, locale))
            .collect())
    }
}

type ItemsFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<TreeItem>, NodeTreeError>> + Send + 'a>>;

pub struct TreeMaterializer {
    store: Arc<dyn NodeStore>,
    children: Arc<dyn ChildNodeProvider>,
}

impl TreeMaterializer {
    /// Materializer using [`PermissionFilteredChildren`] over the same store
    pub fn new(store: Arc<dyn NodeStore>) -> Self {
        let children = Arc::new(PermissionFilteredChildren::new(store.clone()));
        Self { store, children }
    }

    pub fn with_child_provider(
        store: Arc<dyn NodeStore>,
        children: Arc<dyn ChildNodeProvider>,
    ) -> Self {
        Self { store, children }
    }

    /// Permitted children of `parent`, as the materializer sees them
    pub async fn children_of(
        &self,
        parent: &Node,
        locale: &str,
        oracle: &dyn PermissionOracle,
    ) -> Result<Vec<Node>, NodeTreeError> {
        self.children.children(parent, locale, oracle).await
    }

    /// Materialize `roots` in order, at most `max_depth` levels deep
    ///
    /// Roots without any translation are skipped. A `max_depth` of 0 behaves
    /// like 1.
    #[tracing::instrument(level = "debug", skip(self, roots, oracle, domain), fields(roots = roots.len()))]
    pub async fn materialize(
        &self,
        locale: &str,
        roots: &[Node],
        max_depth: u32,
        oracle: &dyn PermissionOracle,
        domain: &dyn DomainContext,
    ) -> Result<Vec<TreeItem>, NodeTreeError> {
        let tag_prefix = Self::tag_prefix(domain);
        self.materialize_level(locale, roots, max_depth, &[], oracle, tag_prefix.as_deref())
            .await
    }

    /// Host id prefixed to tags when the item belongs to another host
    fn tag_prefix(domain: &dyn DomainContext) -> Option<String> {
        if !domain.is_multi_domain() {
            return None;
        }
        domain
            .switched_host()
            .filter(|switched| switched.host != domain.current_host())
            .map(|switched| switched.id)
    }

    fn tag(prefix: Option<&str>, translation: &NodeTranslation) -> String {
        match prefix {
            Some(host_id) => format!("[{}:{}]", host_id, translation.reference()),
            None => format!("[{}]", translation.reference()),
        }
    }

    fn materialize_level<'a>(
        &'a self,
        locale: &'a str,
        roots: &'a [Node],
        depth: u32,
        ancestors: &'a [i64],
        oracle: &'a dyn PermissionOracle,
        tag_prefix: Option<&'a str>,
    ) -> ItemsFuture<'a> {
        Box::pin(async move {
            let mut items = Vec::with_capacity(roots.len());

            for root in roots {
                let translation = match self.store.get_translation_for_node(root.id, locale).await? {
                    Some(translation) => translation,
                    None => match self.store.get_any_translation_for_node(root.id).await? {
                        Some(translation) => translation,
                        None => {
                            tracing::debug!("Skipping node {} without translation", root.id);
                            continue;
                        }
                    },
                };

                let mut children = self.children.children(root, locale, oracle).await?;
                children.retain(|child| {
                    let cyclic = child.id == root.id || ancestors.contains(&child.id);
                    if cyclic {
                        tracing::warn!(
                            "Node {} is listed below its own descendant {}, skipping",
                            child.id,
                            root.id
                        );
                    }
                    !cyclic
                });

                let children = if children.is_empty() {
                    None
                } else if depth > 1 {
                    let mut branch = ancestors.to_vec();
                    branch.push(root.id);
                    let nested = self
                        .materialize_level(locale, &children, depth - 1, &branch, oracle, tag_prefix)
                        .await?;
                    Some(TreeChildren::Items(nested))
                } else {
                    Some(TreeChildren::More)
                };

                items.push(TreeItem {
                    id: root.id,
                    item_type: ItemType::classify(root, &translation),
                    text: translation.title.clone(),
                    tag: Self::tag(tag_prefix, &translation),
                    children,
                });
            }

            Ok(items)
        })
    }
}
