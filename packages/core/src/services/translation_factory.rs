//! Translation Factory
//!
//! Creates the first translation of a node for a content entity, together
//! with the public version that snapshots the content. Both rows are written
//! in one store transaction, so a returned translation always has a
//! resolvable public version and a failed call leaves nothing behind.
//!
//! New translations start offline with weight 0. The slug comes from the
//! content title; the url is the parent translation's url joined with the
//! slug. Structure content is never addressable and gets no url.

use crate::db::{NodeStore, NodeTarget, TranslationDraft, VersionStore};
use crate::models::{HasNode, NewNode, Node, NodeTranslation, User};
use crate::services::error::NodeTreeError;
use crate::utils::slugify;
use std::sync::Arc;

pub struct TranslationFactory {
    store: Arc<dyn NodeStore>,
    versions: Arc<dyn VersionStore>,
}

impl TranslationFactory {
    pub fn new(store: Arc<dyn NodeStore>, versions: Arc<dyn VersionStore>) -> Self {
        Self { store, versions }
    }

    /// Create the `lang` translation of an existing node for `content`
    ///
    /// Fails with [`NodeTreeError::InvalidState`] when the content has not
    /// been persisted. A second translation for the same node and language is
    /// rejected by the store.
    #[tracing::instrument(level = "debug", skip(self, content, node, owner), fields(node_id = node.id))]
    pub async fn create_translation_for(
        &self,
        content: &dyn HasNode,
        lang: &str,
        node: &Node,
        owner: &User,
    ) -> Result<NodeTranslation, NodeTreeError> {
        let draft = self.draft_for(content, lang, node.parent_id).await?;
        let (_, translation) = self
            .store
            .create_translation_with_version(
                NodeTarget::Existing(node.clone()),
                draft,
                content,
                owner,
                self.versions.as_ref(),
            )
            .await?;

        tracing::info!(
            "Created translation {} ({}) for node {}",
            translation.id,
            lang,
            node.id
        );
        Ok(translation)
    }

    /// Create a node for `content` below `parent` (or as a root) together with
    /// its first translation and public version
    #[tracing::instrument(level = "debug", skip(self, content, parent, owner))]
    pub async fn attach_to_tree(
        &self,
        content: &dyn HasNode,
        lang: &str,
        parent: Option<&Node>,
        owner: &User,
    ) -> Result<(Node, NodeTranslation), NodeTreeError> {
        let params = match parent {
            Some(parent) => NewNode::child_of(parent.id, content.type_name()),
            None => NewNode::root(content.type_name()),
        }
        .with_kind(content.kind());
        params.validate()?;

        let draft = self.draft_for(content, lang, params.parent_id).await?;
        let (node, translation) = self
            .store
            .create_translation_with_version(
                NodeTarget::New(params),
                draft,
                content,
                owner,
                self.versions.as_ref(),
            )
            .await?;

        tracing::info!(
            "Attached {} {} as node {} with translation {}",
            content.type_name(),
            content.id().unwrap_or_default(),
            node.id,
            translation.id
        );
        Ok((node, translation))
    }

    async fn draft_for(
        &self,
        content: &dyn HasNode,
        lang: &str,
        parent_id: Option<i64>,
    ) -> Result<TranslationDraft, NodeTreeError> {
        // Store ids start at 1; zero or negative ids mean the content was never saved
        if !matches!(content.id(), Some(id) if id > 0) {
            return Err(NodeTreeError::invalid_state(content.type_name()));
        }

        let slug = slugify(content.title());
        let url = if content.kind().is_structure() {
            None
        } else {
            Some(self.derive_url(parent_id, lang, &slug).await?)
        };

        Ok(TranslationDraft {
            lang: lang.to_string(),
            slug: (!slug.is_empty()).then_some(slug),
            url,
            online: false,
            title: content.title().to_string(),
            weight: 0,
        })
    }

    /// Parent url joined with `slug`; the slug alone without a parent url
    async fn derive_url(
        &self,
        parent_id: Option<i64>,
        lang: &str,
        slug: &str,
    ) -> Result<String, NodeTreeError> {
        let parent_url = match parent_id {
            Some(parent_id) => self
                .store
                .get_translation_for_node(parent_id, lang)
                .await?
                .and_then(|t| t.url)
                .filter(|url| !url.is_empty()),
            None => None,
        };

        Ok(match parent_url {
            Some(parent_url) if slug.is_empty() => parent_url,
            Some(parent_url) => format!("{}/{}", parent_url.trim_end_matches('/'), slug),
            None => slug.to_string(),
        })
    }
}
